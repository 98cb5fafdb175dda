use crate::codegen::shared::format::{FormatError, LineFormatter};
use crate::codegen::shared::ir::{ClassRef, ValueKind};
use asdl_types::BuiltinType;

/* C++ spelling of a builtin scalar */
pub fn builtin_to_cpp(builtin: BuiltinType) -> &'static str {
  match builtin {
    BuiltinType::String => "char*",
    BuiltinType::Int => "int",
    BuiltinType::Bool => "bool",
    BuiltinType::Id => "Id",
  }
}

pub fn class_type_name(type_name: &str) -> String {
  format!("{}_t", type_name)
}

pub fn enum_type_name(type_name: &str) -> String {
  format!("{}_e", type_name)
}

/* Type returned by an accessor for this value */
pub fn value_to_cpp(value: &ValueKind) -> String {
  match value {
    ValueKind::Int => builtin_to_cpp(BuiltinType::Int).to_string(),
    ValueKind::Bool => builtin_to_cpp(BuiltinType::Bool).to_string(),
    ValueKind::Str => builtin_to_cpp(BuiltinType::String).to_string(),
    ValueKind::Id => builtin_to_cpp(BuiltinType::Id).to_string(),
    ValueKind::Enum { type_name } => enum_type_name(type_name),
    /* Pointer when absent is representable, reference otherwise */
    ValueKind::Object { type_name, optional: true } => format!("{}*", class_type_name(type_name)),
    ValueKind::Object { type_name, optional: false } => format!("{}&", class_type_name(type_name)),
  }
}

/* Name of the emitted class; also the qualifier of out-of-line bodies */
pub fn class_ref_name(class: &ClassRef) -> String {
  match class {
    ClassRef::Product { type_name } => class_type_name(type_name),
    ClassRef::Variant { constructor, .. } => constructor.clone(),
  }
}

/// Accumulates formatted output. Every logical line goes through the
/// formatter so wrapping and indentation stay uniform.
pub struct CppWriter {
  formatter: LineFormatter,
  out: String,
}

impl CppWriter {
  pub fn new(formatter: LineFormatter) -> Self {
    Self {
      formatter,
      out: String::new(),
    }
  }

  pub fn emit(&mut self, line: &str, depth: usize) -> Result<(), FormatError> {
    for physical in self.formatter.format(line, depth)? {
      self.out.push_str(&physical);
    }
    Ok(())
  }

  pub fn blank(&mut self) {
    self.out.push('\n');
  }

  /* Raw text, no formatting */
  pub fn push_raw(&mut self, text: &str) {
    self.out.push_str(text);
  }

  pub fn finish(self) -> String {
    self.out
  }
}
