use tm_tensor::Tensor;

use crate::error::{MetricError, Result};

/// Validated inputs for a pairwise metric, with defaults resolved.
///
/// When `y` was omitted by the caller, `y` aliases `x` by shared reference;
/// no data is copied. The `zero_diagonal` policy is resolved here, in one
/// place, rather than in each kernel.
#[derive(Debug)]
pub struct ResolvedInput<'a> {
    pub x: &'a Tensor,
    pub y: &'a Tensor,
    pub zero_diagonal: bool,
}

/// Validate a pair of batches and resolve option defaults.
///
/// Both batches must be rank-2, non-empty, and agree on the feature
/// dimension (their second axis). `zero_diagonal` defaults to `true` for
/// self-comparison (`y` omitted) and `false` when `y` is given; an explicit
/// value always wins.
pub fn check_input<'a>(
    x: &'a Tensor,
    y: Option<&'a Tensor>,
    zero_diagonal: Option<bool>,
) -> Result<ResolvedInput<'a>> {
    let zero_diagonal = zero_diagonal.unwrap_or(y.is_none());
    let y = y.unwrap_or(x);

    check_batch(x)?;
    check_batch(y)?;

    let x_features = x.shape().dim(1);
    let y_features = y.shape().dim(1);
    if x_features != y_features {
        return Err(MetricError::FeatureDimMismatch {
            x: x_features,
            y: y_features,
        });
    }

    Ok(ResolvedInput {
        x,
        y,
        zero_diagonal,
    })
}

fn check_batch(t: &Tensor) -> Result<()> {
    let ndim = t.shape().ndim();
    if ndim != 2 {
        return Err(MetricError::NotAMatrix { ndim });
    }
    if t.shape().dim(0) == 0 || t.shape().dim(1) == 0 {
        return Err(MetricError::EmptyBatch {
            dims: t.shape().dims().to_vec(),
        });
    }
    Ok(())
}
