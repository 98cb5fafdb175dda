use super::accessors::emit_inline_accessor;
use super::helpers::{builtin_to_cpp, class_ref_name, class_type_name, enum_type_name, CppWriter};
use crate::codegen::shared::format::FormatError;
use crate::codegen::shared::ir::{AttributeIr, ClassIr, ClassRef, DeclIr, EnumIr, TaggedBaseIr};

/* Byte-sized scoped enumeration; values are on one reflowed line */
pub fn emit_enum(writer: &mut CppWriter, enum_ir: &EnumIr, depth: usize) -> Result<(), FormatError> {
  let values = enum_ir
    .variants
    .iter()
    .map(|variant| format!("{} = {}", variant.name, variant.value))
    .collect::<Vec<_>>()
    .join(", ");

  writer.emit(&format!("enum class {} : uint8_t {{", enum_type_name(&enum_ir.type_name)), depth)?;
  writer.emit(&values, depth + 1)?;
  writer.emit("};", depth)?;
  writer.emit("", depth)
}

fn emit_attributes(writer: &mut CppWriter, attributes: &[AttributeIr], depth: usize) -> Result<(), FormatError> {
  for attr in attributes {
    writer.emit(&format!("{} {};", builtin_to_cpp(attr.builtin), attr.name), depth)?;
  }
  Ok(())
}

/* Base of every variant class: tag() reads byte 0 */
pub fn emit_tagged_base(writer: &mut CppWriter, base: &TaggedBaseIr, depth: usize) -> Result<(), FormatError> {
  let class_name = class_type_name(&base.type_name);
  let enum_name = enum_type_name(&base.type_name);

  writer.emit(&format!("class {class_name} : public Obj {{"), depth)?;
  writer.emit(" public:", depth)?;
  writer.emit(&format!("{enum_name} tag() const {{"), depth + 1)?;
  writer.emit(&format!("return static_cast<{enum_name}>(bytes_[0]);"), depth + 2)?;
  writer.emit("}", depth + 1)?;
  emit_attributes(writer, &base.attributes, depth + 1)?;
  writer.emit("};", depth)?;
  writer.emit("", depth)
}

pub fn emit_class(writer: &mut CppWriter, class: &ClassIr, ptr: &str, depth: usize) -> Result<(), FormatError> {
  let parent = match &class.class {
    ClassRef::Product { .. } => "Obj".to_string(),
    ClassRef::Variant { sum_name, .. } => class_type_name(sum_name),
  };

  writer.emit(&format!("class {} : public {} {{", class_ref_name(&class.class), parent), depth)?;
  writer.emit(" public:", depth)?;
  for accessor in &class.accessors {
    emit_inline_accessor(writer, accessor, ptr, depth + 1)?;
  }
  emit_attributes(writer, &class.attributes, depth + 1)?;
  writer.emit("};", depth)?;
  writer.emit("", depth)
}

pub fn emit_declaration(writer: &mut CppWriter, decl: &DeclIr, ptr: &str) -> Result<(), FormatError> {
  match decl {
    DeclIr::Enum(enum_ir) => emit_enum(writer, enum_ir, 0),
    DeclIr::TaggedBase(base) => emit_tagged_base(writer, base, 0),
    DeclIr::Class(class) => emit_class(writer, class, ptr, 0),
  }
}
