//! ASDL Schema Model
//!
//! This crate contains the in-memory representation of an ASDL schema:
//! modules of named type definitions built from sums and products.
//! It provides pure data structures without any file I/O or code
//! generation logic.

pub mod types;

// Re-export commonly used types at the crate root
pub use types::*;
