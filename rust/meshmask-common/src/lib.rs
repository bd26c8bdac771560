//! Core definitions (error type and validation helpers), relied upon by all meshmask-* crates.

pub mod error;
pub mod result;

pub use error::{Error, ErrorKind};
pub use result::Result;
