use super::helpers::{class_ref_name, value_to_cpp, CppWriter};
use crate::codegen::shared::format::FormatError;
use crate::codegen::shared::ir::{AccessorIr, Cardinality, ClassRef, ValueKind};

/* Signature of a single-value accessor taking the buffer base */
fn pointer_signature(ctype: &str, name: &str, ptr: &str) -> String {
  format!("inline const {ctype} {name}(const {ptr}* base) const")
}

/* Signature of the indexed element accessor of a repeated field */
fn element_signature(ctype: &str, name: &str, ptr: &str) -> String {
  format!("inline const {ctype} {name}(const {ptr}* base, int index) const")
}

fn element_offset(stride: u32) -> String {
  format!("int a = (index+1) * {stride};")
}

/* Body line of a deferred accessor: a downcast from the generic reference */
fn downcast_body(accessor: &AccessorIr, ctype: &str) -> String {
  let offset = accessor.offset;
  match (&accessor.value, accessor.cardinality) {
    (ValueKind::Object { optional: true, .. }, Cardinality::Single) => {
      format!("return static_cast<const {ctype}>(Optional(base, {offset}));")
    }
    (_, Cardinality::Single) => format!("return static_cast<const {ctype}>(Ref(base, {offset}));"),
    (_, Cardinality::Repeated { .. }) => {
      format!("return static_cast<const {ctype}>(Ref(base, {offset}).Ref(base, a));")
    }
  }
}

/// Emit the in-class part of an accessor at `depth`. Object accessors get
/// a prototype only; their bodies come from `emit_deferred_body`.
pub fn emit_inline_accessor(
  writer: &mut CppWriter,
  accessor: &AccessorIr,
  ptr: &str,
  depth: usize,
) -> Result<(), FormatError> {
  let ctype = value_to_cpp(&accessor.value);
  let name = accessor.field.as_str();
  let offset = accessor.offset;

  match accessor.cardinality {
    Cardinality::Single => {
      let (header, body) = match &accessor.value {
        ValueKind::Int | ValueKind::Bool => {
          (format!("inline {ctype} {name}() const {{"), format!("return Int({offset});"))
        }
        ValueKind::Id | ValueKind::Enum { .. } => (
          format!("inline {ctype} {name}() const {{"),
          format!("return static_cast<const {ctype}>(Int({offset}));"),
        ),
        ValueKind::Str => (
          format!("{} {{", pointer_signature(&ctype, name, ptr)),
          format!("return Str(base, {offset});"),
        ),
        ValueKind::Object { .. } => {
          return writer.emit(&format!("{};", pointer_signature(&ctype, name, ptr)), depth);
        }
      };
      writer.emit(&header, depth)?;
      writer.emit(&body, depth + 1)?;
      writer.emit("}", depth)
    }
    Cardinality::Repeated { stride } => {
      /* element 0 of the array holds the count */
      writer.emit(&format!("inline int {name}_size(const {ptr}* base) const {{"), depth)?;
      writer.emit(&format!("return Ref(base, {offset}).Int(0);"), depth + 1)?;
      writer.emit("}", depth)?;

      let signature = element_signature(&ctype, name, ptr);
      let body = match &accessor.value {
        ValueKind::Int | ValueKind::Bool => format!("return Ref(base, {offset}).Int(a);"),
        ValueKind::Id | ValueKind::Enum { .. } => {
          format!("return static_cast<const {ctype}>(Ref(base, {offset}).Int(a));")
        }
        ValueKind::Str => format!("return Ref(base, {offset}).Str(base, a);"),
        ValueKind::Object { .. } => return writer.emit(&format!("{signature};"), depth),
      };
      writer.emit(&format!("{signature} {{"), depth)?;
      writer.emit(&element_offset(stride), depth + 1)?;
      writer.emit(&body, depth + 1)?;
      writer.emit("}", depth)
    }
  }
}

/// Emit the out-of-line definition of a queued accessor, qualified by its
/// owning class, followed by a blank line.
pub fn emit_deferred_body(
  writer: &mut CppWriter,
  owner: &ClassRef,
  accessor: &AccessorIr,
  ptr: &str,
) -> Result<(), FormatError> {
  let ctype = value_to_cpp(&accessor.value);
  let qualified = format!("{}::{}", class_ref_name(owner), accessor.field);

  match accessor.cardinality {
    Cardinality::Single => {
      writer.emit(&format!("{} {{", pointer_signature(&ctype, &qualified, ptr)), 0)?;
    }
    Cardinality::Repeated { stride } => {
      writer.emit(&format!("{} {{", element_signature(&ctype, &qualified, ptr)), 0)?;
      writer.emit(&element_offset(stride), 1)?;
    }
  }
  writer.emit(&downcast_body(accessor, &ctype), 1)?;
  writer.push_raw("}\n\n");
  Ok(())
}

#[cfg(test)]
mod tests {
  use super::*;
  use crate::codegen::shared::format::LineFormatter;

  fn render_inline(accessor: &AccessorIr) -> String {
    let mut writer = CppWriter::new(LineFormatter::default());
    emit_inline_accessor(&mut writer, accessor, "uint32_t", 1).unwrap();
    writer.finish()
  }

  fn accessor(field: &str, offset: u32, value: ValueKind, cardinality: Cardinality) -> AccessorIr {
    AccessorIr { field: field.into(), offset, value, cardinality }
  }

  #[test]
  fn single_int_reads_slot_directly() {
    let out = render_inline(&accessor("count", 4, ValueKind::Int, Cardinality::Single));
    assert_eq!(out, "  inline int count() const {\n    return Int(4);\n  }\n");
  }

  #[test]
  fn single_enum_casts_the_integer() {
    let value = ValueKind::Enum { type_name: "op".into() };
    let out = render_inline(&accessor("op", 1, value, Cardinality::Single));
    assert_eq!(
      out,
      "  inline op_e op() const {\n    return static_cast<const op_e>(Int(1));\n  }\n"
    );
  }

  #[test]
  fn single_string_takes_base() {
    let out = render_inline(&accessor("name", 1, ValueKind::Str, Cardinality::Single));
    assert_eq!(
      out,
      "  inline const char* name(const uint32_t* base) const {\n    return Str(base, 1);\n  }\n"
    );
  }

  #[test]
  fn object_accessor_is_prototype_only() {
    let value = ValueKind::Object { type_name: "word".into(), optional: false };
    let out = render_inline(&accessor("w", 0, value, Cardinality::Single));
    assert_eq!(out, "  inline const word_t& w(const uint32_t* base) const;\n");
  }

  #[test]
  fn repeated_int_emits_size_and_element_accessors() {
    let out = render_inline(&accessor("xs", 3, ValueKind::Int, Cardinality::Repeated { stride: 3 }));
    assert_eq!(
      out,
      concat!(
        "  inline int xs_size(const uint32_t* base) const {\n",
        "    return Ref(base, 3).Int(0);\n",
        "  }\n",
        "  inline const int xs(const uint32_t* base, int index) const {\n",
        "    int a = (index+1) * 3;\n",
        "    return Ref(base, 3).Int(a);\n",
        "  }\n",
      )
    );
  }

  #[test]
  fn repeated_strings_resolve_against_base() {
    let out = render_inline(&accessor("names", 0, ValueKind::Str, Cardinality::Repeated { stride: 3 }));
    assert!(out.contains("    return Ref(base, 0).Str(base, a);\n"), "{out}");
  }

  #[test]
  fn deferred_optional_uses_optional_lookup() {
    let owner = ClassRef::Product { type_name: "tree".into() };
    let value = ValueKind::Object { type_name: "node".into(), optional: true };
    let mut writer = CppWriter::new(LineFormatter::default());
    emit_deferred_body(&mut writer, &owner, &accessor("left", 3, value, Cardinality::Single), "uint32_t")
      .unwrap();
    assert_eq!(
      writer.finish(),
      concat!(
        "inline const node_t* tree_t::left(const uint32_t* base) const {\n",
        "  return static_cast<const node_t*>(Optional(base, 3));\n",
        "}\n\n",
      )
    );
  }

  #[test]
  fn deferred_repeated_object_indexes_then_downcasts() {
    let owner = ClassRef::Variant { sum_name: "expr".into(), constructor: "Call".into() };
    let value = ValueKind::Object { type_name: "expr".into(), optional: false };
    let mut writer = CppWriter::new(LineFormatter::default());
    emit_deferred_body(
      &mut writer,
      &owner,
      &accessor("args", 4, value, Cardinality::Repeated { stride: 3 }),
      "uint32_t",
    )
    .unwrap();
    assert_eq!(
      writer.finish(),
      concat!(
        "inline const expr_t& Call::args(const uint32_t* base, int index) const {\n",
        "  int a = (index+1) * 3;\n",
        "  return static_cast<const expr_t&>(Ref(base, 4).Ref(base, a));\n",
        "}\n\n",
      )
    );
  }
}
