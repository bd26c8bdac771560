//! The boundary between masks and the mesh they index.

use std::sync::Arc;

/// Kind of mesh entity indexed by a mask.
///
/// Only masks of the same kind can be combined.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ElementKind {
    Cells,
    Edges,
}

impl ElementKind {
    pub fn name(&self) -> &'static str {
        match self {
            ElementKind::Cells => "cell mask",
            ElementKind::Edges => "edge mask",
        }
    }
}

impl std::fmt::Display for ElementKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.name())
    }
}

/// The mesh collaborator a mask refers to.
///
/// A domain is identified by its instance, not by its counts: two distinct
/// domains with the same number of cells are still different meshes. Masks hold
/// a [`DomainRef`] and compare domains with [`same_domain`].
pub trait ElementDomain: Send + Sync {
    /// Number of locally addressable elements of the given kind.
    fn element_count(&self, kind: ElementKind) -> usize;

    /// Number of coordinate components reported by [`coordinates`](Self::coordinates).
    fn spatial_dimension(&self) -> usize;

    /// Writes the physical coordinates of one element into `out`.
    ///
    /// `out.len()` equals [`spatial_dimension`](Self::spatial_dimension) and
    /// `index < element_count(kind)`.
    fn coordinates(&self, kind: ElementKind, index: usize, out: &mut [f64]);
}

/// Shared handle to a domain; many masks reference the same domain.
pub type DomainRef = Arc<dyn ElementDomain>;

/// Identity comparison of two domain handles.
#[inline]
pub fn same_domain(a: &DomainRef, b: &DomainRef) -> bool {
    std::ptr::addr_eq(Arc::as_ptr(a), Arc::as_ptr(b))
}
