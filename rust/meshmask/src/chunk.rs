//! A contiguous run of element indices.

use std::ops::Range;

use meshmask_common::{Result, result::non_negative, verify_arg};

/// One contiguous run `[i0, i0 + len)` of element (cell or edge) indices.
///
/// A chunk stored inside a mask always has `len >= 1`. Chunks built by hand
/// with `len == 0` are rejected when they are handed to a sequence or mask
/// constructor.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct Chunk {
    /// First element index covered by the chunk.
    pub i0: usize,
    /// Number of consecutive elements.
    pub len: usize,
}

impl Chunk {
    #[inline]
    pub const fn new(i0: usize, len: usize) -> Chunk {
        Chunk { i0, len }
    }

    /// Builds a chunk from signed values, as they arrive from index arithmetic
    /// or external data.
    ///
    /// Fails with a negative-index error if `i0 < 0`, and with an invalid
    /// argument error if `len < 1`.
    pub fn try_new(i0: i64, len: i64) -> Result<Chunk> {
        let i0 = non_negative("i0", i0)?;
        verify_arg!(len, len >= 1);
        Ok(Chunk::new(i0, len as usize))
    }

    /// The chunk covering exactly one element.
    #[inline]
    pub const fn single(element: usize) -> Chunk {
        Chunk {
            i0: element,
            len: 1,
        }
    }

    /// Exclusive end of the run (`i0 + len`).
    #[inline]
    pub const fn je(&self) -> usize {
        self.i0 + self.len
    }

    /// The run as a half-open range.
    #[inline]
    pub fn range(&self) -> Range<usize> {
        self.i0..self.je()
    }

    /// All element indices of the chunk, ascending.
    ///
    /// The returned range is cheap to clone, so the enumeration can be
    /// restarted at will.
    #[inline]
    pub fn elements(&self) -> Range<usize> {
        self.range()
    }

    #[inline]
    pub fn contains(&self, element: usize) -> bool {
        self.i0 <= element && element < self.je()
    }

    /// Returns `true` if `next` starts exactly where `self` ends.
    #[inline]
    pub fn is_adjacent_to(&self, next: &Chunk) -> bool {
        self.je() == next.i0
    }
}

impl From<Chunk> for Range<usize> {
    fn from(chunk: Chunk) -> Range<usize> {
        chunk.range()
    }
}

impl From<Range<usize>> for Chunk {
    /// Converts a half-open range; an empty range yields a zero-length chunk,
    /// which mask constructors reject.
    fn from(range: Range<usize>) -> Chunk {
        Chunk::new(range.start, range.end.saturating_sub(range.start))
    }
}

impl std::fmt::Display for Chunk {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        if self.len == 1 {
            write!(f, "{}", self.i0)
        } else {
            write!(f, "{}-{}", self.i0, self.je().saturating_sub(1))
        }
    }
}
