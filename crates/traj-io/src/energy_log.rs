use std::path::PathBuf;

use traj_core::error::TrajResult;

use crate::table::read_table;
use crate::TimestampSource;

/// Simulation log whose first column is the timestamp of each recorded frame.
pub struct EnergyLogReader {
    path: PathBuf,
}

impl EnergyLogReader {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }
}

impl TimestampSource for EnergyLogReader {
    fn read_timestamps(&mut self) -> TrajResult<Vec<f64>> {
        let table = read_table(&self.path)?;
        table.require_columns(1)?;
        table.column(0)
    }
}
