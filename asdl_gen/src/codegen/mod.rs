pub mod cpp;
pub mod cpp_gen;
pub mod shared;

use crate::codegen::cpp::{CppCodeGenerator, CppCodeGeneratorOptions};
use crate::codegen::shared::builder::{build_module, BuildError};
use crate::codegen::shared::format::FormatError;
use crate::codegen::shared::ir::ModuleIr;
use crate::encoding::EncodingParams;
use crate::traversal::TypeContext;
use asdl_types::Module;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum CodegenError {
    #[error("schema '{module}' is invalid: {error}")]
    Build { module: String, error: BuildError },
    #[error("internal formatting error: {0}")]
    Format(#[from] FormatError),
}

/// Validate the schema and lower it to the emitter IR.
pub fn build_ir(module: &Module, params: EncodingParams) -> Result<ModuleIr, CodegenError> {
    let invalid = |error: BuildError| CodegenError::Build {
        module: module.name.clone(),
        error,
    };
    let ctx = TypeContext::new(module).map_err(|err| invalid(err.into()))?;
    build_module(&ctx, params).map_err(invalid)
}

/// Generate the complete C++ reader for `module`. Nothing is returned
/// unless every definition was processed.
pub fn generate_cpp(module: &Module, params: EncodingParams) -> Result<String, CodegenError> {
    let ir = build_ir(module, params)?;
    let generator = CppCodeGenerator::new(CppCodeGeneratorOptions::default());
    let code = generator.emit_code(&ir)?;
    tracing::debug!(module = %module.name, bytes = code.len(), "generated C++ reader");
    Ok(code)
}
