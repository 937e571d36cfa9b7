use std::fs::File;
use std::io::{BufWriter, Write};
use std::path::Path;

use csv::WriterBuilder;
use traj_core::error::{TrajError, TrajResult};

#[derive(Debug, Clone, PartialEq)]
pub enum Column {
    Real(Vec<f64>),
    Count(Vec<u64>),
}

impl Column {
    pub fn len(&self) -> usize {
        match self {
            Column::Real(v) => v.len(),
            Column::Count(v) => v.len(),
        }
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    fn cell(&self, row: usize) -> String {
        match self {
            Column::Real(v) => v[row].to_string(),
            Column::Count(v) => v[row].to_string(),
        }
    }
}

/// Axis column followed by parallel value columns, written in input order.
#[derive(Debug, Clone, PartialEq)]
pub struct ResultTable {
    axis: Vec<f64>,
    columns: Vec<Column>,
}

impl ResultTable {
    pub fn new(axis: Vec<f64>) -> Self {
        Self {
            axis,
            columns: Vec::new(),
        }
    }

    pub fn with_column(mut self, column: Column) -> TrajResult<Self> {
        if column.len() != self.axis.len() {
            return Err(TrajError::Shape(format!(
                "column of length {} does not match axis of length {}",
                column.len(),
                self.axis.len()
            )));
        }
        self.columns.push(column);
        Ok(self)
    }

    pub fn n_rows(&self) -> usize {
        self.axis.len()
    }

    pub fn n_cols(&self) -> usize {
        1 + self.columns.len()
    }

    pub fn axis(&self) -> &[f64] {
        &self.axis
    }

    pub fn columns(&self) -> &[Column] {
        &self.columns
    }

    pub fn write_to<W: Write>(&self, out: W) -> TrajResult<()> {
        let mut wtr = WriterBuilder::new().has_headers(false).from_writer(out);
        let mut record = Vec::with_capacity(self.n_cols());
        for row in 0..self.n_rows() {
            record.clear();
            record.push(self.axis[row].to_string());
            record.extend(self.columns.iter().map(|c| c.cell(row)));
            wtr.write_record(&record)
                .map_err(|e| TrajError::Io(e.into()))?;
        }
        wtr.flush()?;
        Ok(())
    }
}

pub fn write_table(path: &Path, table: &ResultTable) -> TrajResult<()> {
    if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
        std::fs::create_dir_all(parent)?;
    }
    let file = File::create(path)?;
    table.write_to(BufWriter::new(file))?;
    log::debug!(
        "wrote {} x {} table to {}",
        table.n_rows(),
        table.n_cols(),
        path.display()
    );
    Ok(())
}
