use std::fmt::Debug;

use crate::error::Result;

/// Trait for pluggable compute backends (CPU, BLAS, GPU, etc.).
///
/// All operations work on row-major f32 slices. Data is passed in as slices
/// and returned as owned vectors. The backend is responsible for performing
/// the computation and returning the result.
pub trait ComputeBackend: Send + Sync + Debug {
    /// Returns the name of this backend (e.g., "cpu").
    fn name(&self) -> &str;

    /// Matrix multiplication: C = A @ B.
    ///
    /// - `a`: row-major data of shape [m, k]
    /// - `b`: row-major data of shape [k, n]
    /// - Returns: row-major data of shape [m, n]
    fn matmul(&self, a: &[f32], b: &[f32], m: usize, k: usize, n: usize) -> Result<Vec<f32>>;

    /// Matrix transpose.
    ///
    /// - `a`: row-major data of shape [rows, cols]
    /// - Returns: row-major data of shape [cols, rows]
    fn transpose(&self, a: &[f32], rows: usize, cols: usize) -> Result<Vec<f32>>;

    /// Per-row Euclidean (L2) norms of a [rows, cols] matrix.
    ///
    /// Returns a vector of `rows` norms: `norms[i] = sqrt(sum_j x[i][j]^2)`.
    fn row_l2_norms(&self, x: &[f32], rows: usize, cols: usize) -> Result<Vec<f32>>;

    /// Broadcast division of each row by a per-row divisor.
    ///
    /// `result[i][j] = x[i][j] / divisors[i]`. Division follows IEEE 754:
    /// a zero divisor yields inf or NaN rather than an error.
    fn div_rows(&self, x: &[f32], divisors: &[f32], rows: usize, cols: usize)
        -> Result<Vec<f32>>;

    /// Per-row sums of a [rows, cols] matrix (reduction along the last axis).
    ///
    /// Returns a vector of `rows` sums.
    fn row_sums(&self, x: &[f32], rows: usize, cols: usize) -> Result<Vec<f32>>;

    /// Scalar multiplication: result[i] = a[i] * s.
    fn scale(&self, a: &[f32], s: f32) -> Result<Vec<f32>>;
}
