mod matmul;
mod reduce;

use crate::backend::ComputeBackend;
use crate::error::{Result, TensorError};

/// Pure-Rust CPU compute backend.
///
/// Implements all operations with straightforward loops optimized for
/// correctness rather than peak performance. Intended as a reference
/// implementation and fallback.
#[derive(Debug, Clone)]
pub struct CpuBackend;

impl CpuBackend {
    pub fn new() -> Self {
        CpuBackend
    }
}

impl Default for CpuBackend {
    fn default() -> Self {
        Self::new()
    }
}

fn check_len(op: &str, name: &str, actual: usize, expected: usize) -> Result<()> {
    if actual != expected {
        return Err(TensorError::Other(format!(
            "{}: {}.len()={} but expected {}",
            op, name, actual, expected
        )));
    }
    Ok(())
}

impl ComputeBackend for CpuBackend {
    fn name(&self) -> &str {
        "cpu"
    }

    fn matmul(&self, a: &[f32], b: &[f32], m: usize, k: usize, n: usize) -> Result<Vec<f32>> {
        check_len("matmul", "a", a.len(), m * k)?;
        check_len("matmul", "b", b.len(), k * n)?;
        Ok(matmul::matmul(a, b, m, k, n))
    }

    fn transpose(&self, a: &[f32], rows: usize, cols: usize) -> Result<Vec<f32>> {
        check_len("transpose", "a", a.len(), rows * cols)?;
        Ok(matmul::transpose(a, rows, cols))
    }

    fn row_l2_norms(&self, x: &[f32], rows: usize, cols: usize) -> Result<Vec<f32>> {
        check_len("row_l2_norms", "x", x.len(), rows * cols)?;
        Ok(reduce::row_l2_norms(x, rows, cols))
    }

    fn div_rows(
        &self,
        x: &[f32],
        divisors: &[f32],
        rows: usize,
        cols: usize,
    ) -> Result<Vec<f32>> {
        check_len("div_rows", "x", x.len(), rows * cols)?;
        check_len("div_rows", "divisors", divisors.len(), rows)?;
        Ok(reduce::div_rows(x, divisors, rows, cols))
    }

    fn row_sums(&self, x: &[f32], rows: usize, cols: usize) -> Result<Vec<f32>> {
        check_len("row_sums", "x", x.len(), rows * cols)?;
        Ok(reduce::row_sums(x, rows, cols))
    }

    fn scale(&self, a: &[f32], s: f32) -> Result<Vec<f32>> {
        Ok(a.iter().map(|x| x * s).collect())
    }
}
