use super::*;
use approx::{assert_abs_diff_eq, assert_relative_eq};
use traj_core::error::{TrajError, TrajResult};
use traj_core::pbc::CubicBox;
use traj_core::trajectory::{Trajectory, TrajectoryKind};
use traj_io::{TimestampSource, TrajReader};

struct InMemoryTraj {
    kind: TrajectoryKind,
    frames: Vec<Vec<[f64; 3]>>,
}

impl InMemoryTraj {
    fn positions(frames: Vec<Vec<[f64; 3]>>) -> Self {
        Self {
            kind: TrajectoryKind::Positions,
            frames,
        }
    }

    fn velocities(frames: Vec<Vec<[f64; 3]>>) -> Self {
        Self {
            kind: TrajectoryKind::Velocities,
            frames,
        }
    }
}

impl TrajReader for InMemoryTraj {
    fn kind(&self) -> TrajectoryKind {
        self.kind
    }

    fn read_trajectory(&mut self) -> TrajResult<Trajectory> {
        Trajectory::from_frames(self.kind, self.frames.clone())
    }
}

struct InMemoryLog {
    stamps: Vec<f64>,
}

impl TimestampSource for InMemoryLog {
    fn read_timestamps(&mut self) -> TrajResult<Vec<f64>> {
        Ok(self.stamps.clone())
    }
}

fn traj(kind: TrajectoryKind, frames: Vec<Vec<[f64; 3]>>) -> Trajectory {
    Trajectory::from_frames(kind, frames).unwrap()
}

fn pbc(length: f64) -> CubicBox {
    CubicBox::new(length).unwrap()
}

/// Two particles along x: one hops +1 per frame, one sits at x = 5.
fn hopping_pair() -> Vec<Vec<[f64; 3]>> {
    vec![
        vec![[0.0, 0.0, 0.0], [5.0, 0.0, 0.0]],
        vec![[1.0, 0.0, 0.0], [5.0, 0.0, 0.0]],
        vec![[2.0, 0.0, 0.0], [5.0, 0.0, 0.0]],
    ]
}

fn series(out: PlanOutput) -> Vec<LagStats> {
    match out {
        PlanOutput::TimeSeries(stats) => stats,
        _ => panic!("unexpected output"),
    }
}

fn rdf(out: PlanOutput) -> RdfOutput {
    match out {
        PlanOutput::Rdf(rdf) => rdf,
        _ => panic!("unexpected output"),
    }
}

/// Deterministic scatter of `n` points inside a box of edge `l`.
fn scattered_frame(n: usize, l: f64) -> Vec<[f64; 3]> {
    (0..n)
        .map(|i| {
            let a = ((i * 37 + 11) % 101) as f64 / 101.0;
            let b = ((i * 53 + 29) % 103) as f64 / 103.0;
            let c = ((i * 71 + 5) % 107) as f64 / 107.0;
            [a * l, b * l, c * l]
        })
        .collect()
}

include!("part1.rs");
include!("part2.rs");
include!("part3.rs");
