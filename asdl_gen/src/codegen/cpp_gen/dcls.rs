use super::helpers::{class_type_name, CppWriter};
use crate::codegen::shared::format::FormatError;

/* Opaque `class X_t;` for every name, then one blank line */
pub fn emit_forward_declarations(writer: &mut CppWriter, names: &[String]) -> Result<(), FormatError> {
  for name in names {
    writer.emit(&format!("class {};", class_type_name(name)), 0)?;
  }
  writer.emit("", 0)
}
