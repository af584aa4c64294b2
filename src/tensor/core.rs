//! Core Tensor type

use super::{Layout, Storage};
use crate::dtype::{DType, Element};
use crate::error::{Error, Result};
use crate::runtime::Runtime;
use crate::runtime::cpu::CpuRuntime;
use std::fmt;

/// Contiguous n-dimensional array stored on a compute device
///
/// `Tensor` is the result container of the operator layer. It consists of:
/// - **Storage**: reference-counted device memory
/// - **Layout**: shape and strides of the array
/// - **DType**: element type (determined at runtime)
///
/// Tensors are always contiguous in row-major order; raw host access goes
/// through [`Tensor::to_vec`], and [`Tensor::cpu`] transfers the data to
/// the host regardless of the producing device.
pub struct Tensor<R: Runtime> {
    /// Device memory
    storage: Storage<R>,
    /// Shape and strides
    layout: Layout,
}

impl<R: Runtime> Tensor<R> {
    /// Create a tensor from storage and layout
    pub fn from_parts(storage: Storage<R>, layout: Layout) -> Self {
        Self { storage, layout }
    }

    /// Create a tensor from a slice of data
    ///
    /// # Panics
    ///
    /// Panics if `data.len()` does not equal the product of the `shape`
    /// dimensions. For a fallible alternative, use
    /// [`Self::try_from_slice`].
    pub fn from_slice<T: Element>(data: &[T], shape: &[usize], device: &R::Device) -> Self {
        Self::try_from_slice(data, shape, device).expect("Tensor::from_slice failed")
    }

    /// Create a tensor from a slice of data (fallible version)
    ///
    /// Returns an error if `data.len()` does not equal the product of the
    /// `shape` dimensions, or if memory allocation fails.
    pub fn try_from_slice<T: Element>(
        data: &[T],
        shape: &[usize],
        device: &R::Device,
    ) -> Result<Self> {
        let expected_len: usize = shape.iter().product();
        if data.len() != expected_len {
            return Err(Error::ShapeMismatch {
                expected: shape.to_vec(),
                got: vec![data.len()],
            });
        }

        let storage = Storage::from_slice(data, device)?;
        let layout = Layout::contiguous(shape);

        Ok(Self { storage, layout })
    }

    /// Create a zero-initialized tensor
    pub fn zeros(shape: &[usize], dtype: DType, device: &R::Device) -> Result<Self> {
        let len: usize = shape.iter().product();
        let storage = Storage::new(len, dtype, device)?;
        let layout = Layout::contiguous(shape);

        Ok(Self { storage, layout })
    }

    /// Get the shape
    #[inline]
    pub fn shape(&self) -> &[usize] {
        self.layout.shape()
    }

    /// Get the element type
    #[inline]
    pub fn dtype(&self) -> DType {
        self.storage.dtype()
    }

    /// Total number of elements
    #[inline]
    pub fn numel(&self) -> usize {
        self.layout.elem_count()
    }

    /// Number of dimensions (rank)
    #[inline]
    pub fn ndim(&self) -> usize {
        self.layout.ndim()
    }

    /// Get the device this tensor lives on
    #[inline]
    pub fn device(&self) -> &R::Device {
        self.storage.device()
    }

    /// Get the underlying storage
    #[inline]
    pub fn storage(&self) -> &Storage<R> {
        &self.storage
    }

    /// Get the layout
    #[inline]
    pub fn layout(&self) -> &Layout {
        &self.layout
    }

    /// Copy the elements to a host `Vec`
    ///
    /// The element type `T` must match the tensor's dtype width; this is
    /// the raw-storage access of the result contract.
    pub fn to_vec<T: Element>(&self) -> Vec<T> {
        self.storage.to_vec()
    }

    /// Transfer this tensor to host memory
    ///
    /// Returns a `Tensor<CpuRuntime>` with the same shape and dtype. For a
    /// tensor already on the CPU this is a plain copy.
    pub fn cpu(&self) -> Result<Tensor<CpuRuntime>> {
        let bytes = self.storage.to_bytes()?;
        let device = CpuRuntime::default_device();
        let storage = Storage::<CpuRuntime>::from_bytes(&bytes, self.dtype(), &device)?;
        Ok(Tensor::from_parts(storage, self.layout.clone()))
    }
}

impl<R: Runtime> Clone for Tensor<R> {
    /// Clone shares the underlying storage (zero-copy)
    fn clone(&self) -> Self {
        Self {
            storage: self.storage.clone(),
            layout: self.layout.clone(),
        }
    }
}

impl<R: Runtime> fmt::Debug for Tensor<R> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Tensor")
            .field("shape", &self.shape())
            .field("dtype", &self.dtype())
            .field("device", &crate::runtime::Device::name(self.device()))
            .finish()
    }
}
