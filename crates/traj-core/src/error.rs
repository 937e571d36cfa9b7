use std::path::PathBuf;

use thiserror::Error;

#[derive(Debug, Error)]
pub enum TrajError {
    #[error("io error: {0}")]
    Io(#[from] std::io::Error),
    #[error("missing input table: {}", .0.display())]
    MissingInput(PathBuf),
    #[error("shape error: {0}")]
    Shape(String),
    #[error("resource exhausted: {0}")]
    ResourceExhausted(String),
    #[error("parse error: {0}")]
    Parse(String),
    #[error("invalid: {0}")]
    Invalid(String),
    #[error("{stage} failed: {source}")]
    Analysis {
        stage: &'static str,
        #[source]
        source: Box<TrajError>,
    },
}

pub type TrajResult<T> = Result<T, TrajError>;

impl TrajError {
    /// Tags an error with the analysis stage it escaped from.
    pub fn in_stage(self, stage: &'static str) -> Self {
        match self {
            TrajError::Analysis { .. } => self,
            other => TrajError::Analysis {
                stage,
                source: Box::new(other),
            },
        }
    }

    pub fn stage(&self) -> Option<&'static str> {
        match self {
            TrajError::Analysis { stage, .. } => Some(stage),
            _ => None,
        }
    }
}
