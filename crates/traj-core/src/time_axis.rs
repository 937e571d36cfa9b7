use crate::error::{TrajError, TrajResult};

/// Physical time attached to each emitted lag.
#[derive(Debug, Clone, PartialEq)]
pub struct TimeAxis {
    values: Vec<f64>,
}

impl TimeAxis {
    /// Derives `npoints` elapsed times from the tail of a timestamp column.
    ///
    /// With `last = timestamps.len() - 1`, entry `k` is
    /// `timestamps[last - npoints + 1 + k] - timestamps[last - npoints]`, i.e. the
    /// final `npoints` stamps measured against the stamp just before them.
    pub fn from_timestamps(timestamps: &[f64], npoints: usize) -> TrajResult<Self> {
        if timestamps.len() < npoints + 1 {
            return Err(TrajError::Shape(format!(
                "time axis of {npoints} points needs {} timestamps, log has {}",
                npoints + 1,
                timestamps.len()
            )));
        }
        let reference_row = timestamps.len() - npoints - 1;
        let reference = timestamps[reference_row];
        let values = timestamps[reference_row + 1..]
            .iter()
            .map(|t| t - reference)
            .collect();
        Ok(Self { values })
    }

    pub fn from_values(values: Vec<f64>) -> Self {
        Self { values }
    }

    /// Keeps the first `len` points.
    pub fn truncated(mut self, len: usize) -> Self {
        self.values.truncate(len);
        self
    }

    /// Shifts the axis so that its first element is zero.
    pub fn zeroed(mut self) -> Self {
        if let Some(&first) = self.values.first() {
            for v in &mut self.values {
                *v -= first;
            }
        }
        self
    }

    pub fn len(&self) -> usize {
        self.values.len()
    }

    pub fn is_empty(&self) -> bool {
        self.values.is_empty()
    }

    pub fn values(&self) -> &[f64] {
        &self.values
    }

    pub fn into_values(self) -> Vec<f64> {
        self.values
    }

    pub fn is_non_decreasing(&self) -> bool {
        self.values.windows(2).all(|w| w[0] <= w[1])
    }
}
