use tm_tensor::{ComputeBackend, Tensor};

use crate::error::Result;
use crate::reduction::Reduction;
use crate::validate::check_input;

/// Pairwise linear similarity (raw inner products) between two batches.
///
/// Entry `(i, j)` is `x_i . y_j` with no normalization, so the output
/// range is unbounded. Options behave as in `pairwise_cosine_similarity`.
pub fn pairwise_linear_similarity(
    x: &Tensor,
    y: Option<&Tensor>,
    reduction: Reduction,
    zero_diagonal: Option<bool>,
    backend: &dyn ComputeBackend,
) -> Result<Tensor> {
    let resolved = check_input(x, y, zero_diagonal)?;

    let mut sim = resolved
        .x
        .matmul(&resolved.y.transpose(backend)?, backend)?;

    if resolved.zero_diagonal {
        sim.fill_diagonal(0.0)?;
    }

    reduction.apply(sim, backend)
}
