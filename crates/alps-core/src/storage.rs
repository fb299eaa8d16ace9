//! Injectable backing storage for engine-owned buffers.

use crate::error::Result;

/// Owned, contiguous, resizable storage for `T`.
///
/// This is the engine's allocation strategy seam: hosts that embed the
/// engine in arenas or pools implement this trait for their own buffer
/// type; everyone else uses [`HeapStorage`]. Every storage-owning engine
/// operation is generic over it.
pub trait Storage<T>: Sized {
    /// Allocate storage holding `len` zero-initialized elements.
    fn allocate(len: usize) -> Result<Self>;

    /// Resize to `new_len` elements.
    ///
    /// Elements below `min(old, new)` keep their data, new slots are
    /// zero-initialized, and shrinking discards the tail. On failure the
    /// storage must be left unchanged.
    fn resize(&mut self, new_len: usize) -> Result<()>;

    fn len(&self) -> usize;

    fn is_empty(&self) -> bool {
        self.len() == 0
    }

    fn as_slice(&self) -> &[T];

    fn as_mut_slice(&mut self) -> &mut [T];
}

/// Default storage backed by the global allocator.
///
/// Allocation failures surface as [`AlpsError::Allocation`] through
/// `Vec::try_reserve_exact` instead of aborting the process.
///
/// [`AlpsError::Allocation`]: crate::error::AlpsError::Allocation
#[derive(Debug, Clone, Default)]
pub struct HeapStorage<T> {
    items: Vec<T>,
}

impl<T: Default> Storage<T> for HeapStorage<T> {
    fn allocate(len: usize) -> Result<Self> {
        let mut items = Vec::new();
        items.try_reserve_exact(len)?;
        items.resize_with(len, T::default);
        Ok(Self { items })
    }

    fn resize(&mut self, new_len: usize) -> Result<()> {
        if new_len > self.items.len() {
            self.items.try_reserve_exact(new_len - self.items.len())?;
        }
        self.items.resize_with(new_len, T::default);
        Ok(())
    }

    fn len(&self) -> usize {
        self.items.len()
    }

    fn as_slice(&self) -> &[T] {
        &self.items
    }

    fn as_mut_slice(&mut self) -> &mut [T] {
        &mut self.items
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_allocate_zero_initialized() {
        let storage = HeapStorage::<f64>::allocate(4).unwrap();
        assert_eq!(storage.len(), 4);
        assert!(storage.as_slice().iter().all(|&v| v == 0.0));
    }

    #[test]
    fn test_resize_preserves_prefix_and_zero_fills() {
        let mut storage = HeapStorage::<f64>::allocate(3).unwrap();
        storage.as_mut_slice().copy_from_slice(&[1.0, 2.0, 3.0]);

        storage.resize(5).unwrap();
        assert_eq!(storage.as_slice(), &[1.0, 2.0, 3.0, 0.0, 0.0]);
    }

    #[test]
    fn test_resize_down_discards_tail() {
        let mut storage = HeapStorage::<f64>::allocate(4).unwrap();
        storage.as_mut_slice().copy_from_slice(&[1.0, 2.0, 3.0, 4.0]);

        storage.resize(2).unwrap();
        assert_eq!(storage.as_slice(), &[1.0, 2.0]);
    }
}
