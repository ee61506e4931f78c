use std::fmt;
use std::str::FromStr;

use tm_tensor::{ComputeBackend, Tensor};

use crate::error::{MetricError, Result};

/// How to collapse a pairwise matrix along its last axis.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Reduction {
    /// Average each row across the column axis, yielding a length-N vector.
    Mean,
    /// Sum each row across the column axis, yielding a length-N vector.
    Sum,
    /// Leave the matrix unreduced.
    #[default]
    None,
}

impl Reduction {
    /// Apply this reduction to a pairwise matrix.
    ///
    /// The reduction always runs along the last axis (per row of the
    /// matrix), whether or not the matrix came from a self-comparison.
    pub fn apply(&self, matrix: Tensor, backend: &dyn ComputeBackend) -> Result<Tensor> {
        match self {
            Reduction::Mean => Ok(matrix.mean_rows(backend)?),
            Reduction::Sum => Ok(matrix.sum_rows(backend)?),
            Reduction::None => Ok(matrix),
        }
    }
}

impl FromStr for Reduction {
    type Err = MetricError;

    fn from_str(s: &str) -> Result<Self> {
        match s {
            "mean" => Ok(Reduction::Mean),
            "sum" => Ok(Reduction::Sum),
            "none" => Ok(Reduction::None),
            other => Err(MetricError::UnsupportedReduction(other.to_string())),
        }
    }
}

impl fmt::Display for Reduction {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Reduction::Mean => write!(f, "mean"),
            Reduction::Sum => write!(f, "sum"),
            Reduction::None => write!(f, "none"),
        }
    }
}
