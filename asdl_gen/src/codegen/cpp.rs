use crate::codegen::cpp_gen::{
  emit_declaration, emit_deferred_body, emit_epilogue, emit_forward_declarations, emit_prologue,
  CppWriter,
};
use crate::codegen::shared::format::{FormatError, LineFormatter};
use crate::codegen::shared::ir::ModuleIr;

pub struct CppCodeGenerator {
  options: CppCodeGeneratorOptions,
}

#[derive(Debug, Clone, Copy, Default)]
pub struct CppCodeGeneratorOptions {
  pub formatter: LineFormatter,
}

impl CppCodeGenerator {
  pub fn new(options: CppCodeGeneratorOptions) -> Self {
    Self { options }
  }

  /// Render one translation unit: prologue, forward declarations, enums and
  /// classes, deferred accessor bodies, epilogue.
  pub fn emit_code(&self, ir: &ModuleIr) -> Result<String, FormatError> {
    let ptr = ir.encoding.index_element_type.cpp_name();
    let mut writer = CppWriter::new(self.options.formatter);

    writer.push_raw(&emit_prologue(&ir.encoding));
    emit_forward_declarations(&mut writer, &ir.forward_decls)?;
    for decl in &ir.declarations {
      emit_declaration(&mut writer, decl, ptr)?;
    }
    /* Downcasts are only valid once every class above is complete */
    for deferred in &ir.deferred {
      emit_deferred_body(&mut writer, &deferred.owner, &deferred.accessor, ptr)?;
    }
    writer.push_raw(&emit_epilogue(&ir.encoding));

    Ok(writer.finish())
  }
}
