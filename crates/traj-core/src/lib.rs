#![forbid(unsafe_code)]

pub mod error;
pub mod geom;
pub mod pbc;
pub mod time_axis;
pub mod trajectory;

pub use error::{TrajError, TrajResult};
pub use geom::{mean_and_variance, RunningMoments, Vec3};
pub use pbc::CubicBox;
pub use time_axis::TimeAxis;
pub use trajectory::{Trajectory, TrajectoryKind};
