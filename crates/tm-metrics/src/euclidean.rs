use tm_tensor::{ComputeBackend, Shape, Tensor};

use crate::error::Result;
use crate::reduction::Reduction;
use crate::validate::check_input;

/// Pairwise Euclidean (L2) distance between two batches of vectors.
///
/// For `x` of shape `[n, d]` and `y` of shape `[m, d]`, computes the
/// `[n, m]` matrix of distances via the expansion
/// `|x_i - y_j|^2 = |x_i|^2 + |y_j|^2 - 2 * x_i . y_j`, so the dominant
/// cost is a single matrix product.
///
/// Default `zero_diagonal` handling matches `pairwise_cosine_similarity`:
/// on self-comparison the diagonal is forced to exactly zero (it is already
/// zero up to rounding).
pub fn pairwise_euclidean_distance(
    x: &Tensor,
    y: Option<&Tensor>,
    reduction: Reduction,
    zero_diagonal: Option<bool>,
    backend: &dyn ComputeBackend,
) -> Result<Tensor> {
    let resolved = check_input(x, y, zero_diagonal)?;

    let dot = resolved
        .x
        .matmul(&resolved.y.transpose(backend)?, backend)?;
    let x_norms = resolved.x.l2_norm_rows(backend)?;
    let y_norms = resolved.y.l2_norm_rows(backend)?;

    let (n, m) = dot.shape().as_matrix()?;
    let xs = x_norms.data_f32();
    let ys = y_norms.data_f32();
    let d = dot.data_f32();

    let mut out = vec![0.0f32; n * m];
    for i in 0..n {
        let x_sq = xs[i] * xs[i];
        for j in 0..m {
            // Clamp rounding residue so near-identical rows don't sqrt a
            // small negative.
            let sq = x_sq + ys[j] * ys[j] - 2.0 * d[i * m + j];
            out[i * m + j] = sq.max(0.0).sqrt();
        }
    }

    let mut dist = Tensor::new(out, Shape::new(vec![n, m]));
    if resolved.zero_diagonal {
        dist.fill_diagonal(0.0)?;
    }

    reduction.apply(dist, backend)
}
