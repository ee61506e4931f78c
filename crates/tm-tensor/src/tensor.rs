use crate::backend::ComputeBackend;
use crate::dtype::DType;
use crate::error::{Result, TensorError};
use crate::shape::Shape;
use crate::storage::CpuStorage;
use half::f16;

/// A tensor backed by CPU storage.
///
/// Holds contiguous, row-major f32 data with an associated shape and dtype.
/// Operations that require computation are dispatched to a `ComputeBackend`.
#[derive(Debug, Clone)]
pub struct Tensor {
    storage: CpuStorage,
    shape: Shape,
    dtype: DType,
}

impl Tensor {
    /// Create a new tensor from f32 data and a shape.
    ///
    /// # Panics
    /// Panics if `data.len() != shape.numel()`.
    pub fn new(data: Vec<f32>, shape: Shape) -> Self {
        assert_eq!(
            data.len(),
            shape.numel(),
            "data length {} does not match shape {:?} (numel={})",
            data.len(),
            shape,
            shape.numel()
        );
        Tensor {
            storage: CpuStorage::from_f32_vec(data),
            shape,
            dtype: DType::F32,
        }
    }

    /// Create a tensor by widening half-precision data to f32.
    ///
    /// # Panics
    /// Panics if `data.len() != shape.numel()`.
    pub fn from_f16(data: &[f16], shape: Shape) -> Self {
        assert_eq!(
            data.len(),
            shape.numel(),
            "data length {} does not match shape {:?} (numel={})",
            data.len(),
            shape,
            shape.numel()
        );
        Tensor {
            storage: CpuStorage::from_f16_slice(data),
            shape,
            dtype: DType::F32,
        }
    }

    /// Create a zero-filled tensor with the given shape.
    pub fn zeros(shape: Shape) -> Self {
        let n = shape.numel();
        Tensor {
            storage: CpuStorage::from_f32_vec(vec![0.0; n]),
            shape,
            dtype: DType::F32,
        }
    }

    /// Create a tensor filled with ones with the given shape.
    pub fn ones(shape: Shape) -> Self {
        let n = shape.numel();
        Tensor {
            storage: CpuStorage::from_f32_vec(vec![1.0; n]),
            shape,
            dtype: DType::F32,
        }
    }

    /// Returns a reference to the tensor's shape.
    pub fn shape(&self) -> &Shape {
        &self.shape
    }

    /// Returns the tensor's data type.
    pub fn dtype(&self) -> DType {
        self.dtype
    }

    /// Returns the underlying data as an f32 slice.
    ///
    /// # Panics
    /// Panics if the storage is not F32 (cannot happen through the public
    /// constructors).
    pub fn data_f32(&self) -> &[f32] {
        self.storage
            .as_f32_slice()
            .expect("tensor storage is not F32")
    }

    /// Reshape the tensor, returning a new tensor with the same data but
    /// a different shape.
    ///
    /// The total number of elements must remain the same.
    pub fn reshape(&self, new_shape: Shape) -> Result<Tensor> {
        if self.shape.numel() != new_shape.numel() {
            return Err(TensorError::ShapeMismatch {
                expected: self.shape.dims().to_vec(),
                got: new_shape.dims().to_vec(),
            });
        }
        Ok(Tensor {
            storage: self.storage.clone(),
            shape: new_shape,
            dtype: self.dtype,
        })
    }

    /// Matrix multiplication of two 2D tensors using the given backend.
    ///
    /// self is [m, k], other is [k, n], result is [m, n].
    pub fn matmul(&self, other: &Tensor, backend: &dyn ComputeBackend) -> Result<Tensor> {
        let (m, k) = self.shape.as_matrix()?;
        let (k2, n) = other.shape.as_matrix()?;

        if k != k2 {
            return Err(TensorError::MatmulMismatch { m, k, k2, n });
        }

        let result_data = backend.matmul(self.data_f32(), other.data_f32(), m, k, n)?;
        Ok(Tensor::new(result_data, Shape::new(vec![m, n])))
    }

    /// Transpose of a 2D tensor using the given backend.
    pub fn transpose(&self, backend: &dyn ComputeBackend) -> Result<Tensor> {
        let (rows, cols) = self.shape.as_matrix()?;
        let result_data = backend.transpose(self.data_f32(), rows, cols)?;
        Ok(Tensor::new(result_data, Shape::new(vec![cols, rows])))
    }

    /// Per-row L2 norms of a 2D tensor, returned as a [rows, 1] column so
    /// the result broadcasts against the source matrix.
    pub fn l2_norm_rows(&self, backend: &dyn ComputeBackend) -> Result<Tensor> {
        let (rows, cols) = self.shape.as_matrix()?;
        let norms = backend.row_l2_norms(self.data_f32(), rows, cols)?;
        Ok(Tensor::new(norms, Shape::new(vec![rows, 1])))
    }

    /// Broadcast division of each row of a 2D tensor by a [rows, 1] column
    /// of divisors.
    ///
    /// Zero divisors follow IEEE 754 semantics (inf/NaN pass-through).
    pub fn div_rowwise(&self, divisors: &Tensor, backend: &dyn ComputeBackend) -> Result<Tensor> {
        let (rows, cols) = self.shape.as_matrix()?;
        let broadcast = Shape::broadcast_shape(&self.shape, &divisors.shape)?;
        if broadcast != self.shape || divisors.shape.dims() != &[rows, 1] {
            return Err(TensorError::BroadcastError {
                a: self.shape.dims().to_vec(),
                b: divisors.shape.dims().to_vec(),
            });
        }
        let result_data = backend.div_rows(self.data_f32(), divisors.data_f32(), rows, cols)?;
        Ok(Tensor::new(result_data, self.shape.clone()))
    }

    /// Divide each row of a 2D tensor by its own L2 norm, yielding unit-norm
    /// rows. Rows with zero norm come out as NaN.
    pub fn l2_normalize_rows(&self, backend: &dyn ComputeBackend) -> Result<Tensor> {
        let norms = self.l2_norm_rows(backend)?;
        self.div_rowwise(&norms, backend)
    }

    /// Sum each row of a 2D tensor, collapsing the last axis.
    ///
    /// Returns a rank-1 tensor of length `rows`.
    pub fn sum_rows(&self, backend: &dyn ComputeBackend) -> Result<Tensor> {
        let (rows, cols) = self.shape.as_matrix()?;
        let sums = backend.row_sums(self.data_f32(), rows, cols)?;
        Ok(Tensor::new(sums, Shape::new(vec![rows])))
    }

    /// Average each row of a 2D tensor, collapsing the last axis.
    ///
    /// Returns a rank-1 tensor of length `rows`.
    pub fn mean_rows(&self, backend: &dyn ComputeBackend) -> Result<Tensor> {
        let (rows, cols) = self.shape.as_matrix()?;
        let sums = backend.row_sums(self.data_f32(), rows, cols)?;
        let means = backend.scale(&sums, 1.0 / cols as f32)?;
        Ok(Tensor::new(means, Shape::new(vec![rows])))
    }

    /// Overwrite the main diagonal of a 2D tensor with `value`, in place.
    ///
    /// On a rectangular matrix this writes the first `min(rows, cols)`
    /// entries (i, i).
    pub fn fill_diagonal(&mut self, value: f32) -> Result<()> {
        let (rows, cols) = self.shape.as_matrix()?;
        let data = self.storage.as_f32_slice_mut()?;
        for i in 0..rows.min(cols) {
            data[i * cols + i] = value;
        }
        Ok(())
    }
}
