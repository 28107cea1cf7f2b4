//! Displayed-list index.

/// Position in the displayed person list.
///
/// Users see 1-based positions; storage is 0-based.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct Index {
    zero_based: usize,
}

impl Index {
    pub fn from_zero_based(zero_based: usize) -> Self {
        Self { zero_based }
    }

    /// Returns `None` for `0`, which has no 1-based meaning.
    pub fn from_one_based(one_based: usize) -> Option<Self> {
        one_based
            .checked_sub(1)
            .map(|zero_based| Self { zero_based })
    }

    pub fn zero_based(self) -> usize {
        self.zero_based
    }

    pub fn one_based(self) -> usize {
        self.zero_based + 1
    }

    /// Returns whether this index addresses an element of a list of `len`.
    pub fn fits(self, len: usize) -> bool {
        self.zero_based < len
    }
}
