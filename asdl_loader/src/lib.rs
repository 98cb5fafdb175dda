//! ASDL Schema Loading
//!
//! This crate turns schema source files into the `asdl_types` model.
//! Two source formats are understood: the ASDL text notation
//! (`module m { expr = Num(int n) | ... }`) and a YAML rendering of the
//! same model.

pub mod file;
pub mod lexer;
pub mod parser;

// Re-export commonly used types at the crate root
pub use file::{load_schema, parse_schema, SchemaFormat};
pub use lexer::{LexError, Lexer, Position, Token, TokenKind};
pub use parser::{parse_asdl, ParseError, Parser};

// Re-export asdl_types for convenience
pub use asdl_types;
