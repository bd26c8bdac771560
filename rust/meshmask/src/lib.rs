//! Compressed element masks over mesh cells and edges.
//!
//! This crate represents arbitrary subsets of a dense, contiguous element
//! index space with memory proportional to the number of runs. It offers:
//!
//! - **Construction** from dense membership, chunk lists or raw index lists
//! - **Set algebra**: union, intersection, difference and complement
//! - **Queries**: membership, cardinality, sub-mask tests
//! - **Traversal** by chunk or by element, and text export with coordinates
//!
//! # Key Types
//!
//! - [`ExecutionMask`] - An immutable subset of one domain's cells or edges
//! - [`ChunkSequence`] - The run-length encoded form backing a mask
//! - [`Chunk`] - One contiguous run of element indices
//! - [`ElementDomain`] - The mesh collaborator supplying element counts and coordinates

pub mod chunk;
pub mod domain;
pub mod export;
pub mod iter;
pub mod mask;
pub mod sequence;
#[cfg(test)]
mod tests;

pub use chunk::Chunk;
pub use domain::{DomainRef, ElementDomain, ElementKind};
pub use export::{ExportOptions, InfoColumn};
pub use mask::ExecutionMask;
pub use meshmask_common::{Error, ErrorKind, Result};
pub use sequence::ChunkSequence;
