//! The mutable buffer of bar heights being sorted.
//!
//! [`SortArray`] only exposes two mutating primitives, [`SortArray::swap`] and
//! [`SortArray::overwrite`]. Algorithms never touch the underlying `Vec`
//! directly; they go through [`crate::algorithms::Tracer`], which wraps these
//! primitives and emits a step after each one.

use serde::{Deserialize, Serialize};

use crate::error::SortError;

/// A fixed-length sequence of non-negative integers.
///
/// The length is set at construction and never changes; only values move.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct SortArray {
    values: Vec<u32>,
}

impl SortArray {
    /// Wrap an existing buffer.
    pub fn new(values: Vec<u32>) -> Self {
        Self { values }
    }

    /// Number of elements.
    pub fn len(&self) -> usize {
        self.values.len()
    }

    /// Whether the array has no elements.
    pub fn is_empty(&self) -> bool {
        self.values.is_empty()
    }

    /// Read the value at `index`.
    pub fn get(&self, index: usize) -> Result<u32, SortError> {
        self.values
            .get(index)
            .copied()
            .ok_or(SortError::IndexOutOfBounds {
                index,
                len: self.values.len(),
            })
    }

    /// Exchange the values at `i` and `j`. `i == j` is a valid no-op.
    pub fn swap(&mut self, i: usize, j: usize) -> Result<(), SortError> {
        self.check(i)?;
        self.check(j)?;
        self.values.swap(i, j);
        Ok(())
    }

    /// Set the value at `index`.
    pub fn overwrite(&mut self, index: usize, value: u32) -> Result<(), SortError> {
        self.check(index)?;
        self.values[index] = value;
        Ok(())
    }

    /// Borrow the current contents.
    pub fn as_slice(&self) -> &[u32] {
        &self.values
    }

    /// Copy the current contents for consumers that redraw the full state.
    pub fn snapshot(&self) -> Vec<u32> {
        self.values.clone()
    }

    /// Whether the contents are in non-decreasing order.
    pub fn is_sorted(&self) -> bool {
        self.values.windows(2).all(|w| w[0] <= w[1])
    }

    /// Consume the array and return its buffer.
    pub fn into_inner(self) -> Vec<u32> {
        self.values
    }

    fn check(&self, index: usize) -> Result<(), SortError> {
        if index < self.values.len() {
            Ok(())
        } else {
            Err(SortError::IndexOutOfBounds {
                index,
                len: self.values.len(),
            })
        }
    }
}

impl From<Vec<u32>> for SortArray {
    fn from(values: Vec<u32>) -> Self {
        Self::new(values)
    }
}
