//! The `Obj` base class shared by every generated reader: slot decoding,
//! relative references, optional references and NUL-terminated strings.
//! Declared up front and defined after all schema classes.

use crate::encoding::EncodingParams;
use std::fmt::Write;

/* Little-endian decode of `ref_width` bytes starting at bytes_[n].
 * A byte promoted to int cannot be shifted into the sign bit, so the
 * fourth byte is widened to uint32_t first. */
fn int_decode_expr(ref_width: u32) -> String {
  (0..ref_width)
    .map(|i| match i {
      0 => "bytes_[n]".to_string(),
      3 => "(static_cast<uint32_t>(bytes_[n+3]) << 24)".to_string(),
      _ => format!("(bytes_[n+{}] << {})", i, i * 8),
    })
    .collect::<Vec<_>>()
    .join(" + ")
}

pub fn emit_prologue(params: &EncodingParams) -> String {
  let ptr = params.index_element_type.cpp_name();
  let mut out = String::new();
  writeln!(out, "#include <cstdint>").unwrap();
  writeln!(out).unwrap();
  writeln!(out, "class Obj {{").unwrap();
  writeln!(out, " public:").unwrap();
  writeln!(out, "  // Decode a {} byte integer from little endian", params.ref_width).unwrap();
  writeln!(out, "  inline int Int(int n) const;").unwrap();
  writeln!(out).unwrap();
  writeln!(out, "  inline const Obj& Ref(const {ptr}* base, int n) const;").unwrap();
  writeln!(out).unwrap();
  writeln!(out, "  inline const Obj* Optional(const {ptr}* base, int n) const;").unwrap();
  writeln!(out).unwrap();
  writeln!(out, "  // NUL-terminated").unwrap();
  writeln!(out, "  inline const char* Str(const {ptr}* base, int n) const;").unwrap();
  writeln!(out).unwrap();
  writeln!(out, " protected:").unwrap();
  writeln!(out, "  uint8_t bytes_[1];  // first is ID; rest are a payload").unwrap();
  writeln!(out, "}};").unwrap();
  writeln!(out).unwrap();
  out
}

pub fn emit_epilogue(params: &EncodingParams) -> String {
  let ptr = params.index_element_type.cpp_name();
  let mut out = String::new();
  writeln!(out, "inline int Obj::Int(int n) const {{").unwrap();
  writeln!(out, "  return {};", int_decode_expr(params.ref_width)).unwrap();
  writeln!(out, "}}").unwrap();
  writeln!(out).unwrap();
  writeln!(out, "inline const Obj& Obj::Ref(const {ptr}* base, int n) const {{").unwrap();
  writeln!(out, "  int offset = Int(n);").unwrap();
  writeln!(out, "  return reinterpret_cast<const Obj&>(base[offset]);").unwrap();
  writeln!(out, "}}").unwrap();
  writeln!(out).unwrap();
  writeln!(out, "inline const Obj* Obj::Optional(const {ptr}* base, int n) const {{").unwrap();
  writeln!(out, "  int offset = Int(n);").unwrap();
  writeln!(out, "  if (offset) {{").unwrap();
  writeln!(out, "    return reinterpret_cast<const Obj*>(base + offset);").unwrap();
  writeln!(out, "  }} else {{").unwrap();
  writeln!(out, "    return nullptr;").unwrap();
  writeln!(out, "  }}").unwrap();
  writeln!(out, "}}").unwrap();
  writeln!(out).unwrap();
  writeln!(out, "inline const char* Obj::Str(const {ptr}* base, int n) const {{").unwrap();
  writeln!(out, "  int offset = Int(n);").unwrap();
  writeln!(out, "  return reinterpret_cast<const char*>(base + offset);").unwrap();
  writeln!(out, "}}").unwrap();
  out
}

#[cfg(test)]
mod tests {
  use super::*;

  #[test]
  fn default_decoder_reads_three_bytes() {
    let epilogue = emit_epilogue(&EncodingParams::default());
    assert!(epilogue.starts_with(
      "inline int Obj::Int(int n) const {\n  return bytes_[n] + (bytes_[n+1] << 8) + (bytes_[n+2] << 16);\n}\n"
    ));
    assert!(epilogue.ends_with("  return reinterpret_cast<const char*>(base + offset);\n}\n"));
  }

  #[test]
  fn decoder_follows_ref_width() {
    assert_eq!(int_decode_expr(1), "bytes_[n]");
    assert_eq!(int_decode_expr(2), "bytes_[n] + (bytes_[n+1] << 8)");
  }

  #[test]
  fn high_byte_is_widened_before_shifting() {
    assert_eq!(
      int_decode_expr(4),
      "bytes_[n] + (bytes_[n+1] << 8) + (bytes_[n+2] << 16) + (static_cast<uint32_t>(bytes_[n+3]) << 24)"
    );
    assert!(!int_decode_expr(3).contains("static_cast"));
  }

  #[test]
  fn prologue_uses_index_element_type() {
    let params = EncodingParams::new(8).unwrap();
    let prologue = emit_prologue(&params);
    assert!(prologue.starts_with("#include <cstdint>\n\nclass Obj {\n public:\n"));
    assert!(prologue.contains("  inline const Obj& Ref(const uint64_t* base, int n) const;\n"));
    assert!(prologue.contains("  // Decode a 3 byte integer from little endian\n"));
    assert!(prologue.ends_with(" protected:\n  uint8_t bytes_[1];  // first is ID; rest are a payload\n};\n\n"));
  }
}
