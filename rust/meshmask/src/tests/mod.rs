use std::sync::Arc;

use meshmask_testkit::StructuredGrid;

use crate::{DomainRef, ElementDomain, ElementKind};

mod algebra_tests;

/// One-dimensional domain: element `i` sits at coordinate `i`.
pub(crate) struct LineDomain {
    cells: usize,
    edges: usize,
}

impl ElementDomain for LineDomain {
    fn element_count(&self, kind: ElementKind) -> usize {
        match kind {
            ElementKind::Cells => self.cells,
            ElementKind::Edges => self.edges,
        }
    }

    fn spatial_dimension(&self) -> usize {
        1
    }

    fn coordinates(&self, _kind: ElementKind, index: usize, out: &mut [f64]) {
        out[0] = index as f64;
    }
}

/// Structured 2D grid with cell centroids and edge midpoints as coordinates.
pub(crate) struct GridDomain(StructuredGrid);

impl ElementDomain for GridDomain {
    fn element_count(&self, kind: ElementKind) -> usize {
        match kind {
            ElementKind::Cells => self.0.cell_count(),
            ElementKind::Edges => self.0.edge_count(),
        }
    }

    fn spatial_dimension(&self) -> usize {
        2
    }

    fn coordinates(&self, kind: ElementKind, index: usize, out: &mut [f64]) {
        let xy = match kind {
            ElementKind::Cells => self.0.cell_centroid(index),
            ElementKind::Edges => self.0.edge_midpoint(index),
        };
        out.copy_from_slice(&xy);
    }
}

pub(crate) fn line(cells: usize) -> DomainRef {
    Arc::new(LineDomain {
        cells,
        edges: cells + 1,
    })
}

pub(crate) fn grid(nx: usize, ny: usize) -> DomainRef {
    Arc::new(GridDomain(StructuredGrid::new(nx, ny)))
}
