//! Immutable, compressed subsets of a domain's cells or edges.
//!
//! An [`ExecutionMask`] selects a subset of the elements of one kind (cells or
//! edges) of one [`ElementDomain`](crate::domain::ElementDomain). The subset is
//! stored as a canonical [`ChunkSequence`]; a dense [`BitMask`] over the whole
//! domain is built on first use and cached for the lifetime of the mask.
//!
//! Key properties and invariants
//! - A mask never changes after construction; set algebra returns new masks.
//! - `imax() < element_count(kind)` for the mask's domain, checked at
//!   construction.
//! - Binary operations require the same kind and the same domain instance.
//! - Everything here is local to one process's slice of the mesh; global
//!   counts are the caller's business.
//!
//! Typical usage
//! - Construct via [`ExecutionMask::from_bools`], [`ExecutionMask::from_indices`],
//!   [`ExecutionMask::from_chunks`], [`ExecutionMask::full`] or [`ExecutionMask::empty`].
//! - Combine with [`union`](ExecutionMask::union), [`intersect`](ExecutionMask::intersect),
//!   [`except`](ExecutionMask::except) and [`complement`](ExecutionMask::complement).
//! - Traverse with [`chunks`](ExecutionMask::chunks) or [`items`](ExecutionMask::items).

use std::sync::OnceLock;

use meshmask_bits::BitMask;
use meshmask_common::{Error, Result};

use crate::{
    chunk::Chunk,
    domain::{DomainRef, ElementKind, same_domain},
    iter::{Chunks, Items},
    sequence::ChunkSequence,
};

/// A compressed subset of the cells or edges of a domain.
///
/// The dense bitmask and the item count are single-assignment caches, so a
/// mask can be shared between threads as-is.
#[derive(Clone)]
pub struct ExecutionMask {
    kind: ElementKind,
    domain: DomainRef,
    sequence: ChunkSequence,
    imax: i64,
    bit_mask: OnceLock<BitMask>,
    item_count: OnceLock<usize>,
}

impl ExecutionMask {
    /// Builds a mask from dense boolean membership.
    ///
    /// `values` may be shorter than the domain; missing entries count as
    /// absent. Fails if it is longer than the domain's element count.
    pub fn from_bools(domain: DomainRef, kind: ElementKind, values: &[bool]) -> Result<Self> {
        Self::check_dense_len(kind, values.len(), domain.element_count(kind))?;
        let sequence = ChunkSequence::from_bools(values);
        Self::new_validated(domain, kind, sequence)
    }

    /// Builds a mask from a dense bitmask no longer than the domain.
    ///
    /// A bitmask that spans the whole domain is kept as the mask's cached
    /// bitmask.
    pub fn from_bit_mask(domain: DomainRef, kind: ElementKind, bits: BitMask) -> Result<Self> {
        let count = domain.element_count(kind);
        Self::check_dense_len(kind, bits.len(), count)?;
        let sequence = ChunkSequence::from_bit_mask(&bits);
        let mask = Self::new_validated(domain, kind, sequence)?;
        if bits.len() == count {
            let _ = mask.bit_mask.set(bits);
        }
        Ok(mask)
    }

    /// Builds a mask from ascending, non-overlapping chunks; adjacent chunks
    /// are merged.
    pub fn from_chunks(
        domain: DomainRef,
        kind: ElementKind,
        chunks: impl IntoIterator<Item = Chunk>,
    ) -> Result<Self> {
        let sequence = ChunkSequence::from_chunks(chunks)
            .inspect_err(|e| log::debug!("rejecting {kind}: {e}"))?;
        Self::new_validated(domain, kind, sequence)
    }

    /// Builds a mask covering exactly one run.
    pub fn from_chunk(domain: DomainRef, kind: ElementKind, chunk: Chunk) -> Result<Self> {
        Self::from_chunks(domain, kind, std::iter::once(chunk))
    }

    /// Builds a mask from raw element indices (any order, duplicates ignored).
    ///
    /// Every index must be below the domain's element count.
    pub fn from_indices(
        domain: DomainRef,
        kind: ElementKind,
        indices: impl IntoIterator<Item = i64>,
    ) -> Result<Self> {
        let sequence = ChunkSequence::from_indices(indices, domain.element_count(kind))
            .inspect_err(|e| log::debug!("rejecting {kind}: {e}"))?;
        Self::new_validated(domain, kind, sequence)
    }

    /// Builds a mask from an already encoded sequence.
    ///
    /// The sequence is canonical by construction, so checking its upper bound
    /// against the domain covers every chunk.
    pub fn from_sequence(
        domain: DomainRef,
        kind: ElementKind,
        sequence: ChunkSequence,
    ) -> Result<Self> {
        Self::new_validated(domain, kind, sequence)
    }

    /// The mask selecting every element of the given kind.
    pub fn full(domain: DomainRef, kind: ElementKind) -> Self {
        let bits = BitMask::full(domain.element_count(kind));
        Self::from_full_bit_mask(domain, kind, bits)
    }

    /// The mask selecting no element.
    pub fn empty(domain: DomainRef, kind: ElementKind) -> Self {
        ExecutionMask {
            kind,
            domain,
            sequence: ChunkSequence::empty(),
            imax: -1,
            bit_mask: OnceLock::new(),
            item_count: OnceLock::new(),
        }
    }

    #[inline]
    pub fn kind(&self) -> ElementKind {
        self.kind
    }

    #[inline]
    pub fn domain(&self) -> &DomainRef {
        &self.domain
    }

    /// The canonical encoded sequence.
    #[inline]
    pub fn sequence(&self) -> &ChunkSequence {
        &self.sequence
    }

    /// Highest element index present, or `-1` for an empty mask.
    #[inline]
    pub fn imax(&self) -> i64 {
        self.imax
    }

    /// Total number of elements of this mask's kind in its domain.
    #[inline]
    pub fn element_count(&self) -> usize {
        self.domain.element_count(self.kind)
    }

    /// Iterates the chunks of the mask, ascending.
    #[inline]
    pub fn chunks(&self) -> Chunks<'_> {
        self.sequence.chunks()
    }

    /// Iterates the element indices of the mask, ascending.
    #[inline]
    pub fn items(&self) -> Items<'_> {
        Items::new(self.chunks())
    }

    /// Number of chunks (maximal runs).
    pub fn chunk_count(&self) -> usize {
        self.chunks().count()
    }

    /// Number of elements in the mask on this process; computed once.
    pub fn no_of_items_locally(&self) -> usize {
        *self
            .item_count
            .get_or_init(|| self.sequence.element_count())
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.sequence.is_empty()
    }

    /// Tests membership of `element`.
    ///
    /// Linear scan over the chunks; the cost is proportional to the number of
    /// runs and does not materialize the bitmask.
    pub fn contains(&self, element: usize) -> bool {
        self.chunks().any(|chunk| chunk.contains(element))
    }

    /// The dense bitmask over the whole domain, built on first use.
    pub fn bit_mask(&self) -> &BitMask {
        let count = self.element_count();
        let bits = self.bit_mask.get_or_init(|| {
            log::trace!(
                "materializing {} bitmask: {} elements, {} chunks",
                self.kind,
                count,
                self.sequence.encoded().len()
            );
            BitMask::from_ranges(self.chunks().map(|chunk| chunk.range()), count)
        });
        debug_assert_eq!(
            bits.len(),
            count,
            "cached bitmask does not match the element count of the domain"
        );
        bits
    }

    /// Dense boolean membership over the whole domain.
    pub fn to_bools(&self) -> Vec<bool> {
        self.bit_mask().to_bools()
    }

    /// Elements present in both masks.
    pub fn intersect(&self, other: &ExecutionMask) -> Result<ExecutionMask> {
        self.check_compatible(other, "intersect")?;
        Ok(self.derive(self.bit_mask() & other.bit_mask()))
    }

    /// Elements present in either mask.
    pub fn union(&self, other: &ExecutionMask) -> Result<ExecutionMask> {
        self.check_compatible(other, "union")?;
        Ok(self.derive(self.bit_mask() | other.bit_mask()))
    }

    /// Elements of `self` that are not in `other`.
    pub fn except(&self, other: &ExecutionMask) -> Result<ExecutionMask> {
        self.check_compatible(other, "except")?;
        let mut bits = self.bit_mask().clone();
        bits.and_not_assign(other.bit_mask());
        Ok(self.derive(bits))
    }

    /// All elements of the domain that are not in `self`.
    pub fn complement(&self) -> ExecutionMask {
        self.derive(!self.bit_mask())
    }

    /// Two-argument form of [`union`](Self::union).
    pub fn union_of(a: &ExecutionMask, b: &ExecutionMask) -> Result<ExecutionMask> {
        a.union(b)
    }

    /// Two-argument form of [`intersect`](Self::intersect).
    pub fn intersection_of(a: &ExecutionMask, b: &ExecutionMask) -> Result<ExecutionMask> {
        a.intersect(b)
    }

    /// One-argument form of [`complement`](Self::complement).
    pub fn complement_of(a: &ExecutionMask) -> ExecutionMask {
        a.complement()
    }

    /// Returns `true` if every element of `self` is present in `other`.
    ///
    /// Rejects early when `self` has more items; otherwise the cost is linear
    /// in the number of items of `self`.
    pub fn is_sub_mask_of(&self, other: &ExecutionMask) -> Result<bool> {
        self.check_compatible(other, "is_sub_mask_of")?;
        if self.no_of_items_locally() > other.no_of_items_locally() {
            return Ok(false);
        }
        let other_bits = other.bit_mask();
        Ok(self.items().all(|item| other_bits.contains(item)))
    }
}

impl ExecutionMask {
    fn new_validated(domain: DomainRef, kind: ElementKind, sequence: ChunkSequence) -> Result<Self> {
        let imax = sequence.imax();
        let count = domain.element_count(kind);
        if imax >= count as i64 {
            log::debug!("rejecting {kind}: highest index {imax} exceeds {count} elements");
            return Err(Error::out_of_range("imax", imax, count));
        }
        Ok(ExecutionMask {
            kind,
            domain,
            sequence,
            imax,
            bit_mask: OnceLock::new(),
            item_count: OnceLock::new(),
        })
    }

    fn check_dense_len(kind: ElementKind, len: usize, count: usize) -> Result<()> {
        if len > count {
            log::debug!("rejecting {kind}: dense input of {len} elements exceeds {count} elements");
            return Err(Error::out_of_range("mask length", len as i64, count));
        }
        Ok(())
    }

    /// Wraps a bitmask spanning the whole domain; no range check is needed.
    fn from_full_bit_mask(domain: DomainRef, kind: ElementKind, bits: BitMask) -> Self {
        debug_assert_eq!(bits.len(), domain.element_count(kind));
        let sequence = ChunkSequence::from_bit_mask(&bits);
        let mask = ExecutionMask {
            kind,
            imax: sequence.imax(),
            domain,
            sequence,
            bit_mask: OnceLock::new(),
            item_count: OnceLock::new(),
        };
        let _ = mask.bit_mask.set(bits);
        mask
    }

    /// Builds a sibling of `self` (same kind and domain) from a result bitmask.
    fn derive(&self, bits: BitMask) -> ExecutionMask {
        Self::from_full_bit_mask(self.domain.clone(), self.kind, bits)
    }

    fn check_compatible(&self, other: &ExecutionMask, operation: &str) -> Result<()> {
        if self.kind != other.kind {
            return Err(Error::kind_mismatch(self.kind.name(), other.kind.name()));
        }
        if !same_domain(&self.domain, &other.domain) {
            return Err(Error::domain_mismatch(operation));
        }
        Ok(())
    }
}

impl PartialEq for ExecutionMask {
    /// Structural equality: same kind, same upper bound and identical canonical
    /// sequences. The domain instance is not compared.
    fn eq(&self, other: &Self) -> bool {
        self.kind == other.kind && self.imax == other.imax && self.sequence == other.sequence
    }
}

impl Eq for ExecutionMask {}

impl std::hash::Hash for ExecutionMask {
    fn hash<H: std::hash::Hasher>(&self, state: &mut H) {
        self.kind.hash(state);
        self.sequence.hash(state);
    }
}

impl<'a> IntoIterator for &'a ExecutionMask {
    type Item = Chunk;
    type IntoIter = Chunks<'a>;

    fn into_iter(self) -> Chunks<'a> {
        self.chunks()
    }
}

impl std::fmt::Display for ExecutionMask {
    /// Compact summary, e.g. `{ 0-1, 4, 8-9 }`.
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str("{")?;
        let mut separator = " ";
        for chunk in self.chunks() {
            write!(f, "{separator}{chunk}")?;
            separator = ", ";
        }
        f.write_str(" }")
    }
}

impl std::fmt::Debug for ExecutionMask {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ExecutionMask")
            .field("kind", &self.kind)
            .field("imax", &self.imax)
            .field("chunks", &format_args!("{self}"))
            .finish()
    }
}
