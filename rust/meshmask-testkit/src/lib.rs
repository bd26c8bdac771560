//! Test utilities for the meshmask crates.
//!
//! This crate provides:
//! - Geometry of a small structured grid (cell and edge counts, centroids)
//! - Random membership generators for property-style tests
//!
//! It deliberately does not depend on `meshmask`, so that the unit tests of
//! `meshmask` can use it without linking a second copy of the crate.

pub mod data_gen;
pub mod grid;

pub use grid::StructuredGrid;
