//! Batch container for per-sample results
//!
//! A batched operator call (`batch_size = Some(n)`) produces one tensor per
//! sample. `Batch` holds them in order; every item of an operator-produced
//! batch has the operator's declared per-item shape.

use crate::error::{Error, Result};
use crate::runtime::Runtime;
use crate::tensor::Tensor;

/// Fixed-length list of per-sample tensors
pub struct Batch<R: Runtime> {
    items: Vec<Tensor<R>>,
}

impl<R: Runtime> Batch<R> {
    /// Create a batch from per-sample tensors
    pub fn new(items: Vec<Tensor<R>>) -> Self {
        Self { items }
    }

    /// Number of samples
    #[inline]
    pub fn len(&self) -> usize {
        self.items.len()
    }

    /// Check if the batch has no samples
    #[inline]
    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    /// Get a sample by index
    #[inline]
    pub fn get(&self, index: usize) -> Option<&Tensor<R>> {
        self.items.get(index)
    }

    /// Iterate over the samples in order
    pub fn iter(&self) -> std::slice::Iter<'_, Tensor<R>> {
        self.items.iter()
    }

    /// Consume the batch, yielding its samples
    pub fn into_items(self) -> Vec<Tensor<R>> {
        self.items
    }

    /// The common shape of the samples, if they all agree
    pub fn item_shape(&self) -> Option<&[usize]> {
        let first = self.items.first()?.shape();
        self.items
            .iter()
            .all(|t| t.shape() == first)
            .then_some(first)
    }

    /// Transfer every sample to host memory
    pub fn cpu(&self) -> Result<Batch<crate::runtime::cpu::CpuRuntime>> {
        let items = self
            .items
            .iter()
            .map(|t| t.cpu())
            .collect::<Result<Vec<_>>>()?;
        Ok(Batch::new(items))
    }

    /// Flatten the batch into one host vector, samples in order
    ///
    /// Fails if the samples do not share a shape.
    pub fn to_flat_vec<T: crate::dtype::Element>(&self) -> Result<Vec<T>> {
        let shape = self
            .item_shape()
            .ok_or_else(|| Error::invalid_argument("batch", "items do not share a shape"))?;
        let numel: usize = shape.iter().product();

        let mut out = Vec::with_capacity(self.items.len() * numel);
        for item in &self.items {
            out.extend(item.to_vec::<T>());
        }
        Ok(out)
    }
}

impl<'a, R: Runtime> IntoIterator for &'a Batch<R> {
    type Item = &'a Tensor<R>;
    type IntoIter = std::slice::Iter<'a, Tensor<R>>;

    fn into_iter(self) -> Self::IntoIter {
        self.iter()
    }
}

impl<R: Runtime> std::fmt::Debug for Batch<R> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Batch")
            .field("len", &self.items.len())
            .field("item_shape", &self.item_shape())
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::runtime::cpu::{CpuDevice, CpuRuntime};

    fn item(device: &CpuDevice, data: &[f32]) -> Tensor<CpuRuntime> {
        Tensor::from_slice(data, &[data.len()], device)
    }

    #[test]
    fn test_len_and_get() {
        let device = CpuDevice::new();
        let batch = Batch::new(vec![
            item(&device, &[1.0, 2.0]),
            item(&device, &[3.0, 4.0]),
            item(&device, &[5.0, 6.0]),
        ]);
        assert_eq!(batch.len(), 3);
        assert_eq!(batch.get(1).unwrap().to_vec::<f32>(), vec![3.0, 4.0]);
        assert!(batch.get(3).is_none());
    }

    #[test]
    fn test_item_shape_uniform() {
        let device = CpuDevice::new();
        let batch = Batch::new(vec![item(&device, &[1.0, 2.0]), item(&device, &[3.0, 4.0])]);
        assert_eq!(batch.item_shape(), Some(&[2usize][..]));
    }

    #[test]
    fn test_item_shape_ragged() {
        let device = CpuDevice::new();
        let batch = Batch::new(vec![item(&device, &[1.0]), item(&device, &[2.0, 3.0])]);
        assert_eq!(batch.item_shape(), None);
        assert!(batch.to_flat_vec::<f32>().is_err());
    }

    #[test]
    fn test_to_flat_vec_order() {
        let device = CpuDevice::new();
        let batch = Batch::new(vec![item(&device, &[1.0, 2.0]), item(&device, &[3.0, 4.0])]);
        assert_eq!(batch.to_flat_vec::<f32>().unwrap(), vec![1.0, 2.0, 3.0, 4.0]);
    }
}
