//! Emitter-neutral description of the reader classes for one schema.
//!
//! The builder decides offsets, value kinds and which accessor bodies must
//! be deferred; renderers only turn this tree into text. The whole tree is
//! serde-serializable so it can be dumped for inspection.
//!
//! # Example
//! ```
//! use asdl_gen::codegen::shared::ir::*;
//! use asdl_gen::encoding::EncodingParams;
//!
//! let ir = ModuleIr::new("demo", EncodingParams::default());
//! assert_eq!(ir.version, IR_SCHEMA_VERSION);
//! assert!(ir.declarations.is_empty());
//! ```

use crate::encoding::EncodingParams;
use asdl_types::BuiltinType;
use serde_derive::{Deserialize, Serialize};

/// Schema version used for every serialized IR export.
pub const IR_SCHEMA_VERSION: u32 = 1;

/// Everything a renderer needs for one module, in emission order.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct ModuleIr {
    pub version: u32,
    pub module_name: String,
    pub encoding: EncodingParams,
    /// Schema type names needing an opaque class declaration up front.
    pub forward_decls: Vec<String>,
    pub declarations: Vec<DeclIr>,
    /// Out-of-line accessor bodies, in the order they were queued.
    pub deferred: Vec<DeferredAccessor>,
}

impl ModuleIr {
    pub fn new(module_name: impl Into<String>, encoding: EncodingParams) -> Self {
        Self {
            version: IR_SCHEMA_VERSION,
            module_name: module_name.into(),
            encoding,
            forward_decls: Vec::new(),
            declarations: Vec::new(),
            deferred: Vec::new(),
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(tag = "decl", rename_all = "kebab-case")]
pub enum DeclIr {
    Enum(EnumIr),
    TaggedBase(TaggedBaseIr),
    Class(ClassIr),
}

/// Byte-sized enumeration of a sum's constructors.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct EnumIr {
    pub type_name: String,
    pub variants: Vec<EnumVariantIr>,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct EnumVariantIr {
    pub name: String,
    /* 1-based; 0 means "no tag" */
    pub value: u8,
}

/// Shared base of a compound sum's variant classes exposing `tag()`.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct TaggedBaseIr {
    pub type_name: String,
    #[serde(default)]
    pub attributes: Vec<AttributeIr>,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct ClassIr {
    pub class: ClassRef,
    pub accessors: Vec<AccessorIr>,
    #[serde(default)]
    pub attributes: Vec<AttributeIr>,
}

/// Identity of an emitted accessor class.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(tag = "kind", rename_all = "kebab-case")]
pub enum ClassRef {
    /* Untagged class for a product */
    Product { type_name: String },
    /* Class for one constructor of a compound sum */
    Variant { sum_name: String, constructor: String },
}

/// Directly stored member; never offset-addressed.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct AttributeIr {
    pub name: String,
    pub builtin: BuiltinType,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct AccessorIr {
    pub field: String,
    /// Byte offset of the field's slot within the object.
    pub offset: u32,
    pub value: ValueKind,
    pub cardinality: Cardinality,
}

impl AccessorIr {
    /* Object reads downcast from Obj and need every class defined first */
    pub fn is_deferred(&self) -> bool {
        matches!(self.value, ValueKind::Object { .. })
    }
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(tag = "kind", rename_all = "kebab-case")]
pub enum ValueKind {
    Int,
    Bool,
    Str,
    /* Application token id, read like an enumeration */
    Id,
    Enum { type_name: String },
    Object { type_name: String, optional: bool },
}

#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
#[serde(tag = "kind", rename_all = "kebab-case")]
pub enum Cardinality {
    Single,
    /* Count at element 0, element i at (i + 1) * stride */
    Repeated { stride: u32 },
}

/// Accessor whose body is emitted after every class definition.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct DeferredAccessor {
    pub owner: ClassRef,
    pub accessor: AccessorIr,
}
