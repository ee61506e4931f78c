use tm_tensor::{ComputeBackend, Tensor};

use crate::error::Result;
use crate::reduction::Reduction;
use crate::validate::check_input;

/// Pairwise cosine similarity between two batches of vectors.
///
/// For `x` of shape `[n, d]` and `y` of shape `[m, d]`, computes the
/// `[n, m]` matrix whose entry `(i, j)` is the dot product of row `i` of
/// `x` and row `j` of `y` divided by the product of their L2 norms. Entries
/// lie in `[-1, 1]` for finite non-zero rows.
///
/// When `y` is `None`, `x` is compared against itself and the diagonal is
/// zeroed by default (self-similarity is trivially 1); pass
/// `zero_diagonal: Some(false)` to keep it. With an explicit `y` the
/// diagonal is kept by default.
///
/// Rows with zero norm divide by zero and propagate NaN through their
/// output row; this is pass-through IEEE 754 behavior, not an error.
pub fn pairwise_cosine_similarity(
    x: &Tensor,
    y: Option<&Tensor>,
    reduction: Reduction,
    zero_diagonal: Option<bool>,
    backend: &dyn ComputeBackend,
) -> Result<Tensor> {
    let resolved = check_input(x, y, zero_diagonal)?;

    let x_unit = resolved.x.l2_normalize_rows(backend)?;
    let y_unit = resolved.y.l2_normalize_rows(backend)?;
    let mut sim = x_unit.matmul(&y_unit.transpose(backend)?, backend)?;

    if resolved.zero_diagonal {
        sim.fill_diagonal(0.0)?;
    }

    reduction.apply(sim, backend)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::MetricError;
    use approx::assert_relative_eq;
    use rand::rngs::StdRng;
    use rand::{Rng, SeedableRng};
    use tm_tensor::{CpuBackend, Shape};

    fn x_batch() -> Tensor {
        Tensor::new(vec![2.0, 3.0, 3.0, 5.0, 5.0, 8.0], Shape::new(vec![3, 2]))
    }

    fn y_batch() -> Tensor {
        Tensor::new(vec![1.0, 0.0, 2.0, 1.0], Shape::new(vec![2, 2]))
    }

    #[test]
    fn test_rectangular_batches() {
        let backend = CpuBackend::new();
        let sim = pairwise_cosine_similarity(
            &x_batch(),
            Some(&y_batch()),
            Reduction::None,
            None,
            &backend,
        )
        .unwrap();

        assert_eq!(sim.shape().dims(), &[3, 2]);
        let expected = [0.5547, 0.86824, 0.51450, 0.84366, 0.53000, 0.85328];
        for (got, want) in sim.data_f32().iter().zip(expected) {
            assert_relative_eq!(*got, want, epsilon = 1e-4);
        }
    }

    #[test]
    fn test_self_comparison_zeroes_diagonal() {
        let backend = CpuBackend::new();
        let sim =
            pairwise_cosine_similarity(&x_batch(), None, Reduction::None, None, &backend).unwrap();

        assert_eq!(sim.shape().dims(), &[3, 3]);
        let d = sim.data_f32();
        for i in 0..3 {
            assert_eq!(d[i * 3 + i], 0.0);
        }
        assert_relative_eq!(d[1], 0.99887, epsilon = 1e-4);
        assert_relative_eq!(d[2], 0.99957, epsilon = 1e-4);
        assert_relative_eq!(d[5], 0.99983, epsilon = 1e-4);
        // symmetric
        for i in 0..3 {
            for j in 0..3 {
                assert_relative_eq!(d[i * 3 + j], d[j * 3 + i], epsilon = 1e-6);
            }
        }
    }

    #[test]
    fn test_self_comparison_keep_diagonal() {
        let backend = CpuBackend::new();
        let sim = pairwise_cosine_similarity(
            &x_batch(),
            None,
            Reduction::None,
            Some(false),
            &backend,
        )
        .unwrap();

        let d = sim.data_f32();
        for i in 0..3 {
            assert_relative_eq!(d[i * 3 + i], 1.0, epsilon = 1e-6);
        }
    }

    #[test]
    fn test_rectangular_zero_diagonal_writes_leading_entries() {
        let backend = CpuBackend::new();
        let sim = pairwise_cosine_similarity(
            &x_batch(),
            Some(&y_batch()),
            Reduction::None,
            Some(true),
            &backend,
        )
        .unwrap();

        let d = sim.data_f32();
        assert_eq!(d[0], 0.0);
        assert_eq!(d[3], 0.0);
        // entries past min(n, m) on the "diagonal" are untouched
        assert_relative_eq!(d[1], 0.86824, epsilon = 1e-4);
        assert_relative_eq!(d[4], 0.53000, epsilon = 1e-4);
    }

    #[test]
    fn test_reduction_consistency() {
        let backend = CpuBackend::new();
        let x = x_batch();
        let y = y_batch();

        let none =
            pairwise_cosine_similarity(&x, Some(&y), Reduction::None, None, &backend).unwrap();
        let sum =
            pairwise_cosine_similarity(&x, Some(&y), Reduction::Sum, None, &backend).unwrap();
        let mean =
            pairwise_cosine_similarity(&x, Some(&y), Reduction::Mean, None, &backend).unwrap();

        assert_eq!(sum.shape().dims(), &[3]);
        assert_eq!(mean.shape().dims(), &[3]);

        let cols = none.shape().dim(1);
        let d = none.data_f32();
        for i in 0..3 {
            let row_sum: f32 = d[i * cols..(i + 1) * cols].iter().sum();
            assert_relative_eq!(sum.data_f32()[i], row_sum, epsilon = 1e-6);
            assert_relative_eq!(mean.data_f32()[i], row_sum / cols as f32, epsilon = 1e-6);
        }
    }

    #[test]
    fn test_zero_norm_row_propagates_nan() {
        let backend = CpuBackend::new();
        let x = Tensor::new(vec![0.0, 0.0, 1.0, 2.0], Shape::new(vec![2, 2]));
        let y = y_batch();
        let sim =
            pairwise_cosine_similarity(&x, Some(&y), Reduction::None, None, &backend).unwrap();

        let d = sim.data_f32();
        assert!(d[0].is_nan());
        assert!(d[1].is_nan());
        assert!(d[2].is_finite());
        assert!(d[3].is_finite());
    }

    #[test]
    fn test_randomized_symmetry_and_range() {
        let backend = CpuBackend::new();
        let mut rng = StdRng::seed_from_u64(7);
        let data: Vec<f32> = (0..8 * 5).map(|_| rng.gen_range(-1.0f32..1.0)).collect();
        let x = Tensor::new(data, Shape::new(vec![8, 5]));

        let sim = pairwise_cosine_similarity(&x, None, Reduction::None, Some(false), &backend)
            .unwrap();
        assert_eq!(sim.shape().dims(), &[8, 8]);

        let d = sim.data_f32();
        for i in 0..8 {
            for j in 0..8 {
                let v = d[i * 8 + j];
                assert!(v >= -1.0 - 1e-5 && v <= 1.0 + 1e-5, "out of range: {}", v);
                assert_relative_eq!(v, d[j * 8 + i], epsilon = 1e-5);
            }
        }
    }

    #[test]
    fn test_rank_mismatch_rejected() {
        let backend = CpuBackend::new();
        let x = Tensor::ones(Shape::new(vec![4]));
        let err = pairwise_cosine_similarity(&x, None, Reduction::None, None, &backend)
            .unwrap_err();
        assert!(matches!(err, MetricError::NotAMatrix { ndim: 1 }));
    }

    #[test]
    fn test_feature_dim_mismatch_rejected() {
        let backend = CpuBackend::new();
        let x = Tensor::ones(Shape::new(vec![3, 4]));
        let y = Tensor::ones(Shape::new(vec![3, 5]));
        let err = pairwise_cosine_similarity(&x, Some(&y), Reduction::None, None, &backend)
            .unwrap_err();
        assert!(matches!(err, MetricError::FeatureDimMismatch { x: 4, y: 5 }));
    }
}
