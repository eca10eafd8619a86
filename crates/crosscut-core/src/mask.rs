//! Row-selection masks

use std::ops::{BitAnd, BitOr, Not};

/// Boolean vector aligned 1:1 with response rows
///
/// Binary operators require equal lengths; every mask built during one
/// execution comes from the same table, so a mismatch is a programming error.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Mask(Vec<bool>);

impl Mask {
    pub fn all(len: usize) -> Self {
        Mask(vec![true; len])
    }

    pub fn none(len: usize) -> Self {
        Mask(vec![false; len])
    }

    pub fn from_fn(len: usize, f: impl FnMut(usize) -> bool) -> Self {
        Mask((0..len).map(f).collect())
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn get(&self, row: usize) -> bool {
        self.0.get(row).copied().unwrap_or(false)
    }

    /// Number of selected rows
    pub fn count(&self) -> usize {
        self.0.iter().filter(|b| **b).count()
    }

    /// Indices of selected rows, ascending
    pub fn indices(&self) -> Vec<usize> {
        self.0
            .iter()
            .enumerate()
            .filter_map(|(i, b)| b.then_some(i))
            .collect()
    }

    pub fn as_slice(&self) -> &[bool] {
        &self.0
    }

    fn zip_with(&self, other: &Mask, f: impl Fn(bool, bool) -> bool) -> Mask {
        debug_assert_eq!(self.len(), other.len(), "mask length mismatch");
        Mask(
            self.0
                .iter()
                .zip(other.0.iter())
                .map(|(a, b)| f(*a, *b))
                .collect(),
        )
    }
}

impl From<Vec<bool>> for Mask {
    fn from(bits: Vec<bool>) -> Self {
        Mask(bits)
    }
}

impl BitAnd for &Mask {
    type Output = Mask;

    fn bitand(self, rhs: &Mask) -> Mask {
        self.zip_with(rhs, |a, b| a && b)
    }
}

impl BitOr for &Mask {
    type Output = Mask;

    fn bitor(self, rhs: &Mask) -> Mask {
        self.zip_with(rhs, |a, b| a || b)
    }
}

impl Not for &Mask {
    type Output = Mask;

    fn not(self) -> Mask {
        Mask(self.0.iter().map(|b| !b).collect())
    }
}

impl Not for Mask {
    type Output = Mask;

    fn not(self) -> Mask {
        !&self
    }
}
