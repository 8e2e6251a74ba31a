//! IndexRange value object - a closed interval of list positions
//!
//! The atomic unit of range-compressed selection. Both ends are inclusive,
//! so a range always covers at least one position.

use serde::{Deserialize, Serialize};

/// Closed interval `[begin, end]` of list positions
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct IndexRange {
    begin: usize,
    end: usize,
}

impl IndexRange {
    /// Create a range covering `begin..=end`.
    ///
    /// The endpoints are reordered if given backwards.
    pub fn new(begin: usize, end: usize) -> Self {
        if begin <= end {
            Self { begin, end }
        } else {
            Self {
                begin: end,
                end: begin,
            }
        }
    }

    /// Range covering exactly one position
    pub fn single(index: usize) -> Self {
        Self {
            begin: index,
            end: index,
        }
    }

    pub fn begin(&self) -> usize {
        self.begin
    }

    pub fn end(&self) -> usize {
        self.end
    }

    /// Number of positions covered
    pub fn len(&self) -> usize {
        self.end - self.begin + 1
    }

    /// Always false; a closed range covers at least one position
    pub fn is_empty(&self) -> bool {
        false
    }

    pub fn contains(&self, index: usize) -> bool {
        self.begin <= index && index <= self.end
    }

    pub fn intersects(&self, other: &IndexRange) -> bool {
        self.begin <= other.end && other.begin <= self.end
    }

    /// Split after `at`.
    ///
    /// Returns the part `<= at` and the part `> at`; either side is `None`
    /// when it would cover no positions.
    pub fn split(&self, at: usize) -> (Option<IndexRange>, Option<IndexRange>) {
        let before = (at >= self.begin).then(|| IndexRange::new(self.begin, at.min(self.end)));
        let after = (at < self.end).then(|| IndexRange::new(self.begin.max(at + 1), self.end));
        (before, after)
    }

    /// Iterate over the covered positions in ascending order
    pub fn indices(&self) -> std::ops::RangeInclusive<usize> {
        self.begin..=self.end
    }

    /// Move both ends right by `count`
    pub(crate) fn shifted_right(&self, count: usize) -> Self {
        Self {
            begin: self.begin + count,
            end: self.end + count,
        }
    }

    /// Move both ends left by `count`
    pub(crate) fn shifted_left(&self, count: usize) -> Self {
        Self {
            begin: self.begin - count,
            end: self.end - count,
        }
    }
}

impl std::fmt::Display for IndexRange {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "[{}, {}]", self.begin, self.end)
    }
}

impl From<std::ops::RangeInclusive<usize>> for IndexRange {
    fn from(range: std::ops::RangeInclusive<usize>) -> Self {
        IndexRange::new(*range.start(), *range.end())
    }
}
