use thiserror::Error;
use tm_tensor::TensorError;

#[derive(Error, Debug)]
pub enum MetricError {
    #[error("expected a 2-dimensional batch, got {ndim} dimension(s)")]
    NotAMatrix { ndim: usize },
    #[error("batch has a zero-sized dimension: {dims:?}")]
    EmptyBatch { dims: Vec<usize> },
    #[error("feature dimension mismatch: x has {x} column(s), y has {y}")]
    FeatureDimMismatch { x: usize, y: usize },
    #[error("unsupported reduction `{0}`, expected one of `mean`, `sum`, `none`")]
    UnsupportedReduction(String),
    #[error(transparent)]
    Tensor(#[from] TensorError),
}

pub type Result<T> = std::result::Result<T, MetricError>;
