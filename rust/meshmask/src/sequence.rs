//! Run-length encoded chunk sequences.
//!
//! A [`ChunkSequence`] stores an ordered list of chunks in a single flat `i64`
//! array whose size is proportional to the number of runs, not the number of
//! elements:
//! - a chunk of length 1 at `i0` is stored as the single value `i0 + 1` (always
//!   positive);
//! - a longer chunk at `i0` is stored as `-(i0 + 1)` followed by its length.
//!
//! The sign of a cell tells the decoder whether a length cell follows.
//!
//! Canonical form
//! - Chunks are sorted ascending by `i0` and pairwise disjoint.
//! - Adjacent chunks (`a.je() == b.i0`) are merged into one.
//!
//! Every constructor produces or verifies the canonical form, so two sequences
//! describe the same element set iff their encoded arrays are identical.

use meshmask_bits::BitMask;
use meshmask_common::{Error, Result, result::non_negative, verify_arg};

use crate::{chunk::Chunk, iter::Chunks};

#[derive(Clone, Default, PartialEq, Eq, Hash)]
pub struct ChunkSequence {
    encoded: Vec<i64>,
}

impl ChunkSequence {
    /// A sequence without chunks.
    pub fn empty() -> ChunkSequence {
        ChunkSequence::default()
    }

    /// Encodes dense boolean membership: element `i` is present iff `values[i]`.
    ///
    /// Single left-to-right pass, output proportional to the number of runs.
    pub fn from_bools(values: &[bool]) -> ChunkSequence {
        let mut encoder = SequenceEncoder::default();
        let mut run_start = None;
        for (i, &present) in values.iter().enumerate() {
            match (present, run_start) {
                (true, None) => run_start = Some(i),
                (false, Some(i0)) => {
                    encoder.push(Chunk::new(i0, i - i0));
                    run_start = None;
                }
                _ => (),
            }
        }
        if let Some(i0) = run_start {
            encoder.push(Chunk::new(i0, values.len() - i0));
        }
        encoder.finish()
    }

    /// Encodes the present elements of a dense bitmask.
    ///
    /// Equivalent to [`from_bools`](Self::from_bools) on the expanded bitmask,
    /// but scans whole words at a time.
    pub fn from_bit_mask(bits: &BitMask) -> ChunkSequence {
        let mut encoder = SequenceEncoder::default();
        for range in bits.ranges_iter() {
            encoder.push(Chunk::from(range));
        }
        encoder.finish()
    }

    /// Encodes an explicit list of chunks.
    ///
    /// Every chunk must have `len >= 1`, and chunks must be ascending and
    /// non-overlapping. Adjacent chunks are merged, so `{0, 3}, {3, 2}` yields
    /// the single chunk `{0, 5}`.
    pub fn from_chunks(chunks: impl IntoIterator<Item = Chunk>) -> Result<ChunkSequence> {
        let mut encoder = SequenceEncoder::default();
        let mut prev_end = None;
        for chunk in chunks {
            verify_arg!(chunk, chunk.len >= 1);
            if let Some(prev_end) = prev_end {
                if chunk.i0 < prev_end {
                    return Err(Error::invalid_arg(
                        "chunk",
                        format!(
                            "chunks must be ascending and disjoint: {} starts before {prev_end}",
                            chunk
                        ),
                    ));
                }
            }
            prev_end = Some(chunk.je());
            encoder.push(chunk);
        }
        Ok(encoder.finish())
    }

    /// Encodes a raw list of element indices, each of which must be below
    /// `bound`.
    ///
    /// Indices may come in any order and duplicates are ignored. Fails if any
    /// index is negative or not below `bound`; every index is checked before
    /// the dense scratch bitmask is allocated.
    pub fn from_indices(
        indices: impl IntoIterator<Item = i64>,
        bound: usize,
    ) -> Result<ChunkSequence> {
        let indices = indices
            .into_iter()
            .map(|i| {
                let index = non_negative("index", i)?;
                if index >= bound {
                    return Err(Error::out_of_range("index", i, bound));
                }
                Ok(index)
            })
            .collect::<Result<Vec<_>>>()?;
        let Some(&max) = indices.iter().max() else {
            return Ok(ChunkSequence::empty());
        };
        let bits = BitMask::from_positions(indices.into_iter(), max + 1);
        Ok(Self::from_bit_mask(&bits))
    }

    /// Wraps an already encoded array.
    ///
    /// The array must decode to canonical form: no zero cells, every negative
    /// marker followed by a length cell greater than 1, every run end
    /// representable, and chunks strictly ascending with a gap between
    /// neighbours. Anything else is rejected as malformed.
    pub fn from_encoded(encoded: Vec<i64>) -> Result<ChunkSequence> {
        let mut pos = 0;
        let mut prev_end = None;
        while pos < encoded.len() {
            let (i0, len, width) = decode_at(&encoded, pos)?;
            if let Some(prev_end) = prev_end {
                if i0 <= prev_end {
                    return Err(Error::invalid_format(
                        "sequence",
                        format!(
                            "chunk at offset {pos} starts at {i0}, \
                             not after the previous end {prev_end}"
                        ),
                    ));
                }
            }
            // checked by decode_at
            prev_end = Some(i0 + len);
            pos += width;
        }
        Ok(ChunkSequence { encoded })
    }

    /// The raw encoded array.
    #[inline]
    pub fn encoded(&self) -> &[i64] {
        &self.encoded
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.encoded.is_empty()
    }

    /// Iterates the decoded chunks in stored order.
    #[inline]
    pub fn chunks(&self) -> Chunks<'_> {
        Chunks::new(&self.encoded)
    }

    /// Highest element index covered by the sequence, or `-1` if it is empty.
    ///
    /// Looks only at the final one or two cells of the encoded array.
    pub fn imax(&self) -> i64 {
        let n = self.encoded.len();
        let je = match n {
            0 => 0,
            1 => self.encoded[0],
            _ => {
                let last = self.encoded[n - 1];
                let before_last = self.encoded[n - 2];
                if before_last < 0 {
                    // trailing run: -(i0 + 1), len
                    let i0 = -before_last - 1;
                    i0 + last
                } else {
                    last
                }
            }
        };
        je - 1
    }

    /// Number of elements covered by all chunks.
    pub fn element_count(&self) -> usize {
        self.chunks().map(|chunk| chunk.len).sum()
    }
}

impl std::fmt::Debug for ChunkSequence {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_list().entries(self.chunks()).finish()
    }
}

/// Decodes the chunk starting at `pos` as `(i0, len, cells)`, rejecting
/// cells that do not describe a representable run.
fn decode_at(encoded: &[i64], pos: usize) -> Result<(i64, i64, usize)> {
    let value = encoded[pos];
    if value > 0 {
        return Ok((value - 1, 1, 1));
    }
    if value == 0 {
        return Err(Error::invalid_format(
            "sequence",
            format!("zero cell at offset {pos}"),
        ));
    }
    let Some(marker) = value.checked_neg() else {
        return Err(Error::invalid_format(
            "sequence",
            format!("run marker {value} at offset {pos} is out of range"),
        ));
    };
    let i0 = marker - 1;
    let len = match encoded.get(pos + 1) {
        Some(&len) if len > 1 => len,
        Some(&len) => {
            return Err(Error::invalid_format(
                "sequence",
                format!("invalid run length {len} at offset {}", pos + 1),
            ));
        }
        None => {
            return Err(Error::invalid_format(
                "sequence",
                "trailing run marker without length",
            ));
        }
    };
    if i0.checked_add(len).is_none() {
        return Err(Error::invalid_format(
            "sequence",
            format!("run of {len} elements at {i0} exceeds the index range"),
        ));
    }
    Ok((i0, len, 2))
}

/// Appends chunks to an encoded array, coalescing adjacent runs.
///
/// The most recent chunk is held back until the next one is known not to
/// touch it.
#[derive(Default)]
struct SequenceEncoder {
    encoded: Vec<i64>,
    pending: Option<Chunk>,
}

impl SequenceEncoder {
    fn push(&mut self, chunk: Chunk) {
        debug_assert!(chunk.len >= 1);
        match &mut self.pending {
            Some(pending) if pending.is_adjacent_to(&chunk) => pending.len += chunk.len,
            _ => {
                if let Some(prev) = self.pending.replace(chunk) {
                    Self::encode(&mut self.encoded, prev);
                }
            }
        }
    }

    fn finish(mut self) -> ChunkSequence {
        if let Some(last) = self.pending.take() {
            Self::encode(&mut self.encoded, last);
        }
        self.encoded.shrink_to_fit();
        ChunkSequence {
            encoded: self.encoded,
        }
    }

    #[inline]
    fn encode(out: &mut Vec<i64>, chunk: Chunk) {
        let marker = chunk.i0 as i64 + 1;
        if chunk.len == 1 {
            out.push(marker);
        } else {
            out.push(-marker);
            out.push(chunk.len as i64);
        }
    }
}
