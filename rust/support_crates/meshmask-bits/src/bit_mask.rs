//! A dense, fixed-length membership bitmask.

use std::ops::{BitAnd, BitOr, Not, Range};

/// A fixed-length array of membership bits backed by `u64` words.
///
/// `BitMask` is the fully expanded, one-bit-per-element representation of an
/// element subset. It is the common substrate for set algebra between masks:
/// operands are materialized as bitmasks of equal length, combined word by word
/// and then re-encoded.
///
/// # Storage Format
///
/// Bits are stored in little-endian order within the words:
/// - Element 0 is the least significant bit of word 0.
/// - Element 64 is the least significant bit of word 1, and so on.
///
/// The number of words is `len.div_ceil(64)`. Bits beyond `len` in the final
/// word are always 0, so word-level operations (popcount, equality, AND/OR/NOT)
/// never observe garbage in the tail.
///
/// # Performance
///
/// - Single bit access: O(1)
/// - Bitwise combination, popcount: O(n/64)
/// - Run iteration: O(n/64 + number of runs)
#[derive(Clone, PartialEq, Eq, Hash)]
pub struct BitMask {
    len: usize,
    words: Box<[u64]>,
}

impl BitMask {
    /// Creates a bitmask of `len` elements with no element present.
    pub fn empty(len: usize) -> BitMask {
        BitMask {
            len,
            words: vec![0u64; len.div_ceil(64)].into_boxed_slice(),
        }
    }

    /// Creates a bitmask of `len` elements with every element present.
    pub fn full(len: usize) -> BitMask {
        let mut words = vec![u64::MAX; len.div_ceil(64)].into_boxed_slice();
        Self::mask_tail(&mut words, len);
        BitMask { len, words }
    }

    /// Creates a bitmask from a dense boolean membership slice.
    ///
    /// The resulting bitmask has exactly `values.len()` elements.
    pub fn from_bools(values: &[bool]) -> BitMask {
        let mut mask = BitMask::empty(values.len());
        for (word, chunk) in mask.words.iter_mut().zip(values.chunks(64)) {
            *word = chunk
                .iter()
                .enumerate()
                .fold(0u64, |acc, (i, &b)| acc | ((b as u64) << i));
        }
        mask
    }

    /// Creates a bitmask of `len` elements with the given half-open ranges set.
    ///
    /// # Panics
    ///
    /// Panics if any range end exceeds `len`.
    pub fn from_ranges(ranges: impl Iterator<Item = Range<usize>>, len: usize) -> BitMask {
        let mut mask = BitMask::empty(len);
        for range in ranges {
            mask.set_range(range);
        }
        mask
    }

    /// Creates a bitmask of `len` elements with the given positions set.
    ///
    /// Duplicated positions are allowed.
    ///
    /// # Panics
    ///
    /// Panics if any position is `>= len`.
    pub fn from_positions(positions: impl Iterator<Item = usize>, len: usize) -> BitMask {
        let mut mask = BitMask::empty(len);
        for pos in positions {
            mask.set(pos);
        }
        mask
    }

    /// Returns the number of elements covered by this bitmask (present or not).
    #[inline]
    pub fn len(&self) -> usize {
        self.len
    }

    /// Returns `true` if the bitmask covers zero elements.
    #[inline]
    pub fn is_empty(&self) -> bool {
        self.len == 0
    }

    /// Marks the element at `index` as present.
    #[inline]
    pub fn set(&mut self, index: usize) {
        assert!(
            index < self.len,
            "Index {index} out of bounds (len: {})",
            self.len
        );
        let (word, bit) = Self::bit_position(index);
        self.words[word] |= 1u64 << bit;
    }

    /// Marks every element in `range` as present.
    ///
    /// # Panics
    ///
    /// Panics if `range.end > self.len()`.
    pub fn set_range(&mut self, range: Range<usize>) {
        self.process_range(range, |word, mask| *word |= mask);
    }

    /// Tests whether the element at `index` is present.
    ///
    /// Indices at or beyond `len` are reported as absent.
    #[inline]
    pub fn contains(&self, index: usize) -> bool {
        if index >= self.len {
            return false;
        }
        let (word, bit) = Self::bit_position(index);
        (self.words[word] & (1u64 << bit)) != 0
    }

    /// Number of present elements.
    pub fn count_ones(&self) -> usize {
        self.words.iter().map(|w| w.count_ones() as usize).sum()
    }

    /// Flips every element in place.
    pub fn negate(&mut self) {
        for word in self.words.iter_mut() {
            *word = !*word;
        }
        Self::mask_tail(&mut self.words, self.len);
    }

    /// Removes from `self` every element present in `other` (`self & !other`).
    ///
    /// # Panics
    ///
    /// Panics if the lengths differ.
    pub fn and_not_assign(&mut self, other: &BitMask) {
        self.assert_same_len(other, "AND-NOT");
        for (l, r) in self.words.iter_mut().zip(other.words.iter()) {
            *l &= !*r;
        }
    }

    /// Expands the bitmask into a dense boolean vector of length `len`.
    pub fn to_bools(&self) -> Vec<bool> {
        (0..self.len).map(|i| self.contains(i)).collect()
    }

    /// Returns an iterator over the maximal half-open runs of present elements.
    ///
    /// Runs are yielded in ascending order, never overlap and never touch.
    pub fn ranges_iter(&self) -> BitMaskRangesIter<'_> {
        BitMaskRangesIter {
            words: self.words.iter(),
            current_word: 0,
            next_word_index: 0,
            base_index: 0,
            len: self.len,
        }
    }

}

impl BitMask {
    #[inline]
    fn bit_position(index: usize) -> (usize, usize) {
        (index / 64, index % 64)
    }

    /// Clears any bits beyond `len` in the final storage word.
    #[inline]
    fn mask_tail(words: &mut [u64], len: usize) {
        debug_assert_eq!(words.len(), len.div_ceil(64));
        let partial = len % 64;
        if partial != 0 {
            if let Some(last) = words.last_mut() {
                *last &= (1u64 << partial) - 1;
            }
        }
    }

    /// Calls `mask_fn` for every word touched by `range`, with a mask selecting
    /// the bits of that word that fall inside the range.
    fn process_range(&mut self, range: Range<usize>, mask_fn: impl Fn(&mut u64, u64)) {
        if range.start >= range.end {
            return;
        }
        assert!(
            range.end <= self.len,
            "Range end {} out of bounds (len: {})",
            range.end,
            self.len
        );

        let (start_word, start_bit) = Self::bit_position(range.start);
        let (end_word, end_bit) = Self::bit_position(range.end);

        if start_word == end_word {
            let mask = ((1u64 << end_bit) - 1) & !((1u64 << start_bit) - 1);
            mask_fn(&mut self.words[start_word], mask);
            return;
        }

        mask_fn(&mut self.words[start_word], !((1u64 << start_bit) - 1));
        for word in self.words.iter_mut().take(end_word).skip(start_word + 1) {
            mask_fn(word, u64::MAX);
        }
        if end_bit > 0 {
            mask_fn(&mut self.words[end_word], (1u64 << end_bit) - 1);
        }
    }

    fn assert_same_len(&self, other: &BitMask, op: &str) {
        assert_eq!(
            self.len, other.len,
            "bitmasks must have the same length for {op}: {} != {}",
            self.len, other.len
        );
    }

    fn zip_with(&self, other: &BitMask, op: &str, f: impl Fn(u64, u64) -> u64) -> BitMask {
        self.assert_same_len(other, op);
        let words = self
            .words
            .iter()
            .zip(other.words.iter())
            .map(|(&l, &r)| f(l, r))
            .collect::<Box<[u64]>>();
        BitMask {
            len: self.len,
            words,
        }
    }
}

impl std::fmt::Debug for BitMask {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("BitMask")
            .field("len", &self.len)
            .field("ranges", &self.ranges_iter().collect::<Vec<_>>())
            .finish()
    }
}

impl BitAnd<&BitMask> for &BitMask {
    type Output = BitMask;

    fn bitand(self, rhs: &BitMask) -> BitMask {
        self.zip_with(rhs, "AND", |l, r| l & r)
    }
}

impl BitOr<&BitMask> for &BitMask {
    type Output = BitMask;

    fn bitor(self, rhs: &BitMask) -> BitMask {
        self.zip_with(rhs, "OR", |l, r| l | r)
    }
}

impl Not for &BitMask {
    type Output = BitMask;

    fn not(self) -> BitMask {
        let mut result = self.clone();
        result.negate();
        result
    }
}

/// Iterator over the maximal runs of present elements of a [`BitMask`].
#[derive(Clone)]
pub struct BitMaskRangesIter<'a> {
    /// Storage words not yet loaded into `current_word`.
    words: std::slice::Iter<'a, u64>,
    /// Unconsumed bits of the active word; emitted bits are cleared.
    current_word: u64,
    /// Absolute index of the next word to load.
    next_word_index: usize,
    /// Absolute bit index of bit 0 of `current_word`.
    base_index: usize,
    /// Exclusive upper bound on produced indices.
    len: usize,
}

impl BitMaskRangesIter<'_> {
    #[inline]
    fn advance_to_next_word(&mut self) -> Option<u64> {
        let &word = self.words.next()?;
        self.current_word = word;
        self.base_index = self.next_word_index * 64;
        self.next_word_index += 1;
        (self.base_index < self.len).then_some(word)
    }

    /// Continues a run that reached the end of the current word into the
    /// following words and returns it once it stops.
    fn extend_run_across_words(&mut self, start: usize, mut end: usize) -> Option<Range<usize>> {
        while let Some(word) = self.advance_to_next_word() {
            if word == u64::MAX {
                end += 64;
                self.current_word = 0;
                if end >= self.len {
                    return Some(start..self.len);
                }
                continue;
            }
            let lead_ones = word.trailing_ones() as usize;
            end += lead_ones;
            self.current_word = word & !((1u64 << lead_ones) - 1);
            return Some(start..end.min(self.len));
        }
        Some(start..end.min(self.len))
    }
}

impl Iterator for BitMaskRangesIter<'_> {
    type Item = Range<usize>;

    fn next(&mut self) -> Option<Range<usize>> {
        while self.current_word == 0 {
            self.advance_to_next_word()?;
        }

        let tz = self.current_word.trailing_zeros() as usize;
        let start = self.base_index + tz;
        if start >= self.len {
            return None;
        }

        let ones = (self.current_word >> tz).trailing_ones() as usize;
        if tz + ones < 64 {
            let mask = (1u64 << ones) - 1;
            self.current_word &= !(mask << tz);
            return Some(start..(start + ones).min(self.len));
        }

        let end = self.base_index + 64;
        self.current_word = 0;
        self.extend_run_across_words(start, end)
    }
}
