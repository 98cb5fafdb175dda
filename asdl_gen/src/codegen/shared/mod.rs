pub mod builder;
pub mod format;
pub mod ir;
