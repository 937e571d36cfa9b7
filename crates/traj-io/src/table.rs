use std::fs::File;
use std::io::{BufReader, Read};
use std::path::Path;

use csv::ReaderBuilder;
use traj_core::error::{TrajError, TrajResult};

/// Row-major table of reals read from a headerless comma-separated file.
#[derive(Debug, Clone, PartialEq)]
pub struct NumericTable {
    n_rows: usize,
    n_cols: usize,
    data: Vec<f64>,
}

impl NumericTable {
    pub fn n_rows(&self) -> usize {
        self.n_rows
    }

    pub fn n_cols(&self) -> usize {
        self.n_cols
    }

    pub fn row(&self, r: usize) -> &[f64] {
        let start = r * self.n_cols;
        &self.data[start..start + self.n_cols]
    }

    pub fn rows(&self) -> impl Iterator<Item = &[f64]> {
        self.data.chunks_exact(self.n_cols.max(1))
    }

    pub fn column(&self, c: usize) -> TrajResult<Vec<f64>> {
        if c >= self.n_cols {
            return Err(TrajError::Shape(format!(
                "column {c} requested from a table with {} columns",
                self.n_cols
            )));
        }
        Ok(self.rows().map(|row| row[c]).collect())
    }

    pub fn require_columns(&self, min_cols: usize) -> TrajResult<()> {
        if self.n_cols < min_cols {
            return Err(TrajError::Shape(format!(
                "table has {} columns, at least {min_cols} required",
                self.n_cols
            )));
        }
        Ok(())
    }
}

pub fn open_input(path: &Path) -> TrajResult<File> {
    if !path.is_file() {
        return Err(TrajError::MissingInput(path.to_path_buf()));
    }
    Ok(File::open(path)?)
}

pub fn read_table(path: &Path) -> TrajResult<NumericTable> {
    let file = open_input(path)?;
    let table = parse_table(BufReader::new(file))?;
    log::debug!(
        "read {} x {} table from {}",
        table.n_rows,
        table.n_cols,
        path.display()
    );
    Ok(table)
}

pub fn parse_table<R: Read>(reader: R) -> TrajResult<NumericTable> {
    let mut rdr = ReaderBuilder::new()
        .has_headers(false)
        .flexible(true)
        .trim(csv::Trim::All)
        .comment(Some(b'#'))
        .from_reader(reader);

    let mut n_cols = 0usize;
    let mut n_rows = 0usize;
    let mut data = Vec::new();
    for (line, record) in rdr.records().enumerate() {
        let record = record.map_err(|e| TrajError::Parse(format!("csv error: {e}")))?;
        if record.len() == 1 && record[0].is_empty() {
            continue;
        }
        if n_rows == 0 {
            n_cols = record.len();
        } else if record.len() != n_cols {
            return Err(TrajError::Shape(format!(
                "row {} has {} columns, expected {n_cols}",
                line + 1,
                record.len()
            )));
        }
        for field in record.iter() {
            let value: f64 = field.parse().map_err(|_| {
                TrajError::Parse(format!("row {}: '{field}' is not a number", line + 1))
            })?;
            data.push(value);
        }
        n_rows += 1;
    }
    Ok(NumericTable {
        n_rows,
        n_cols,
        data,
    })
}
