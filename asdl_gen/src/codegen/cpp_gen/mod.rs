pub mod accessors;
pub mod dcls;
pub mod helpers;
pub mod prologue;
pub mod types;

// Re-export main public functions
pub use accessors::{emit_deferred_body, emit_inline_accessor};
pub use dcls::emit_forward_declarations;
pub use helpers::CppWriter;
pub use prologue::{emit_epilogue, emit_prologue};
pub use types::emit_declaration;
