use std::path::PathBuf;

use traj_core::error::{TrajError, TrajResult};
use traj_core::trajectory::{Trajectory, TrajectoryKind};

use crate::table::{read_table, NumericTable};
use crate::{RemainderPolicy, TrajReader};

/// Reads a flat `R x 3` table and reshapes it into (T, N, 3).
pub struct CsvTrajReader {
    path: PathBuf,
    kind: TrajectoryKind,
    n_particles: usize,
    remainder: RemainderPolicy,
}

impl CsvTrajReader {
    pub fn new(path: impl Into<PathBuf>, kind: TrajectoryKind, n_particles: usize) -> Self {
        Self {
            path: path.into(),
            kind,
            n_particles,
            remainder: RemainderPolicy::default(),
        }
    }

    pub fn with_remainder(mut self, remainder: RemainderPolicy) -> Self {
        self.remainder = remainder;
        self
    }
}

impl TrajReader for CsvTrajReader {
    fn kind(&self) -> TrajectoryKind {
        self.kind
    }

    fn read_trajectory(&mut self) -> TrajResult<Trajectory> {
        let table = read_table(&self.path)?;
        reshape_table(&table, self.kind, self.n_particles, self.remainder)
    }
}

pub fn reshape_table(
    table: &NumericTable,
    kind: TrajectoryKind,
    n_particles: usize,
    remainder: RemainderPolicy,
) -> TrajResult<Trajectory> {
    if n_particles == 0 {
        return Err(TrajError::Invalid("particle count must be positive".into()));
    }
    if table.n_rows() == 0 {
        return Err(TrajError::Shape(format!("{} table is empty", kind.label())));
    }
    table.require_columns(3)?;

    let extra = table.n_rows() % n_particles;
    let n_rows = match (extra, remainder) {
        (0, _) => table.n_rows(),
        (_, RemainderPolicy::Reject) => {
            return Err(TrajError::Shape(format!(
                "{} rows of {} is not a multiple of {n_particles} particles",
                table.n_rows(),
                kind.label()
            )))
        }
        (_, RemainderPolicy::Truncate) => {
            log::warn!(
                "dropping {extra} trailing {} rows that do not form a full snapshot",
                kind.label()
            );
            table.n_rows() - extra
        }
    };
    if n_rows == 0 {
        return Err(TrajError::Shape(format!(
            "{} table holds fewer rows than one snapshot of {n_particles} particles",
            kind.label()
        )));
    }

    n_rows.checked_mul(3).ok_or_else(|| {
        TrajError::ResourceExhausted(format!("{n_rows} x 3 tensor overflows usize"))
    })?;
    let mut data: Vec<[f64; 3]> = Vec::new();
    data.try_reserve_exact(n_rows).map_err(|e| {
        TrajError::ResourceExhausted(format!("cannot allocate {n_rows} x 3 tensor: {e}"))
    })?;
    data.extend(table.rows().take(n_rows).map(|row| [row[0], row[1], row[2]]));

    let traj = Trajectory::from_rows(kind, n_particles, data)?;
    log::debug!(
        "loaded {} trajectory: {} frames x {} particles",
        kind.label(),
        traj.n_frames(),
        traj.n_particles()
    );
    Ok(traj)
}
