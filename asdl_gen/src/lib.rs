pub mod codegen;
pub mod encoding;
pub mod traversal;
