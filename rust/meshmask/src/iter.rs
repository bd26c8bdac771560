//! Lazy enumerators over an encoded chunk sequence.
//!
//! Both iterators borrow the immutable encoded array and share no state with
//! the mask that handed them out; a fresh iterator can always be requested,
//! and an existing one can be rewound with `reset`.

use std::{iter::FusedIterator, ops::Range};

use crate::chunk::Chunk;

/// Iterator over the chunks of an encoded sequence.
#[derive(Clone)]
pub struct Chunks<'a> {
    encoded: &'a [i64],
    pos: usize,
}

impl<'a> Chunks<'a> {
    pub(crate) fn new(encoded: &'a [i64]) -> Chunks<'a> {
        Chunks { encoded, pos: 0 }
    }

    /// Rewinds to the first chunk.
    pub fn reset(&mut self) {
        self.pos = 0;
    }
}

impl Iterator for Chunks<'_> {
    type Item = Chunk;

    #[inline]
    fn next(&mut self) -> Option<Chunk> {
        let value = *self.encoded.get(self.pos)?;
        if value > 0 {
            self.pos += 1;
            Some(Chunk::single((value - 1) as usize))
        } else {
            let len = *self.encoded.get(self.pos + 1)?;
            self.pos += 2;
            Some(Chunk::new((value.unsigned_abs() - 1) as usize, len as usize))
        }
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        let remaining = self.encoded.len() - self.pos.min(self.encoded.len());
        (remaining.div_ceil(2), Some(remaining))
    }
}

impl FusedIterator for Chunks<'_> {}

/// Iterator over the flattened element indices of an encoded sequence,
/// ascending.
#[derive(Clone)]
pub struct Items<'a> {
    chunks: Chunks<'a>,
    current: Range<usize>,
}

impl<'a> Items<'a> {
    pub(crate) fn new(chunks: Chunks<'a>) -> Items<'a> {
        Items {
            chunks,
            current: 0..0,
        }
    }

    /// Rewinds to the first element.
    pub fn reset(&mut self) {
        self.chunks.reset();
        self.current = 0..0;
    }
}

impl Iterator for Items<'_> {
    type Item = usize;

    #[inline]
    fn next(&mut self) -> Option<usize> {
        loop {
            if let Some(item) = self.current.next() {
                return Some(item);
            }
            self.current = self.chunks.next()?.elements();
        }
    }
}

impl FusedIterator for Items<'_> {}
