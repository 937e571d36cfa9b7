pub mod energy_log;
pub mod table;
pub mod trajectory;
pub mod writer;

use serde::{Deserialize, Serialize};
use traj_core::error::TrajResult;
use traj_core::trajectory::{Trajectory, TrajectoryKind};

pub use energy_log::EnergyLogReader;
pub use table::{parse_table, read_table, NumericTable};
pub use trajectory::{reshape_table, CsvTrajReader};
pub use writer::{write_table, Column, ResultTable};

/// What to do with trailing rows that do not fill a whole snapshot.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum RemainderPolicy {
    #[default]
    Reject,
    Truncate,
}

pub trait TrajReader {
    fn kind(&self) -> TrajectoryKind;
    fn read_trajectory(&mut self) -> TrajResult<Trajectory>;
}

pub trait TimestampSource {
    fn read_timestamps(&mut self) -> TrajResult<Vec<f64>>;
}
