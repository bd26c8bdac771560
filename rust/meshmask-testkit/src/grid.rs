//! A rectangular, uniformly spaced 2D grid.
//!
//! Cells are numbered row by row: cell `(ix, iy)` has index `iy * nx + ix`.
//! Edges come in two blocks: first the `(nx + 1) * ny` vertical edges (lines of
//! constant `x`), numbered row by row, then the `nx * (ny + 1)` horizontal
//! edges (lines of constant `y`), also row by row.

#[derive(Debug, Clone)]
pub struct StructuredGrid {
    nx: usize,
    ny: usize,
    origin: [f64; 2],
    spacing: [f64; 2],
}

impl StructuredGrid {
    /// A grid of `nx * ny` unit cells with its lower-left corner at the origin.
    pub fn new(nx: usize, ny: usize) -> StructuredGrid {
        Self::with_geometry(nx, ny, [0.0, 0.0], [1.0, 1.0])
    }

    /// A grid of `nx * ny` cells of size `spacing` with its lower-left corner
    /// at `origin`.
    pub fn with_geometry(
        nx: usize,
        ny: usize,
        origin: [f64; 2],
        spacing: [f64; 2],
    ) -> StructuredGrid {
        StructuredGrid {
            nx,
            ny,
            origin,
            spacing,
        }
    }

    pub fn cell_count(&self) -> usize {
        self.nx * self.ny
    }

    pub fn vertical_edge_count(&self) -> usize {
        (self.nx + 1) * self.ny
    }

    pub fn horizontal_edge_count(&self) -> usize {
        self.nx * (self.ny + 1)
    }

    pub fn edge_count(&self) -> usize {
        self.vertical_edge_count() + self.horizontal_edge_count()
    }

    /// Center of cell `j`.
    pub fn cell_centroid(&self, j: usize) -> [f64; 2] {
        assert!(j < self.cell_count(), "cell {j} out of range");
        let (ix, iy) = (j % self.nx, j / self.nx);
        [
            self.origin[0] + (ix as f64 + 0.5) * self.spacing[0],
            self.origin[1] + (iy as f64 + 0.5) * self.spacing[1],
        ]
    }

    /// Midpoint of edge `e`.
    pub fn edge_midpoint(&self, e: usize) -> [f64; 2] {
        assert!(e < self.edge_count(), "edge {e} out of range");
        let vertical = self.vertical_edge_count();
        let (x, y) = if e < vertical {
            let (ix, iy) = (e % (self.nx + 1), e / (self.nx + 1));
            (ix as f64, iy as f64 + 0.5)
        } else {
            let h = e - vertical;
            let (ix, iy) = (h % self.nx, h / self.nx);
            (ix as f64 + 0.5, iy as f64)
        };
        [
            self.origin[0] + x * self.spacing[0],
            self.origin[1] + y * self.spacing[1],
        ]
    }
}
