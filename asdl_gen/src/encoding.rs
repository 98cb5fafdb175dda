//! Encoding parameters shared by the generated reader and the external
//! writer that produces the buffers. Both sides must be built with the same
//! values; nothing in the generated code can detect a mismatch.

use serde_derive::{Deserialize, Serialize};
use thiserror::Error;

pub const DEFAULT_ALIGNMENT: u32 = 4;

/// Bytes per offset slot (24-bit little-endian slots).
pub const DEFAULT_REF_WIDTH: u32 = 3;

/* Generated Int() decodes into a C++ int, so slots wider than 4 bytes overflow */
const MAX_REF_WIDTH: u32 = 4;

#[derive(Debug, Error, PartialEq, Eq)]
pub enum EncodingError {
    #[error("unsupported alignment {0} (expected 1, 2, 4 or 8)")]
    UnsupportedAlignment(u32),
    #[error("unsupported reference width {0} (expected 1 to 4 bytes)")]
    UnsupportedRefWidth(u32),
}

/// Element type used to index the underlying buffer; offsets stored in
/// slots count elements of this type from the caller-supplied base.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "kebab-case")]
pub enum IndexElementType {
    U8,
    U16,
    U32,
    U64,
}

impl IndexElementType {
    pub fn cpp_name(&self) -> &'static str {
        match self {
            IndexElementType::U8 => "uint8_t",
            IndexElementType::U16 => "uint16_t",
            IndexElementType::U32 => "uint32_t",
            IndexElementType::U64 => "uint64_t",
        }
    }
}

#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "kebab-case")]
pub struct EncodingParams {
    pub alignment: u32,
    pub ref_width: u32,
    pub index_element_type: IndexElementType,
    /// Byte stride between consecutive elements of a repeated field's array
    /// body. Each element occupies one slot, so this always equals `ref_width`.
    pub array_stride: u32,
}

impl EncodingParams {
    pub fn new(alignment: u32) -> Result<Self, EncodingError> {
        let index_element_type = match alignment {
            1 => IndexElementType::U8,
            2 => IndexElementType::U16,
            4 => IndexElementType::U32,
            8 => IndexElementType::U64,
            other => return Err(EncodingError::UnsupportedAlignment(other)),
        };
        Ok(Self {
            alignment,
            ref_width: DEFAULT_REF_WIDTH,
            index_element_type,
            array_stride: DEFAULT_REF_WIDTH,
        })
    }

    pub fn with_ref_width(mut self, ref_width: u32) -> Result<Self, EncodingError> {
        if ref_width == 0 || ref_width > MAX_REF_WIDTH {
            return Err(EncodingError::UnsupportedRefWidth(ref_width));
        }
        self.ref_width = ref_width;
        self.array_stride = ref_width;
        Ok(self)
    }
}

impl Default for EncodingParams {
    fn default() -> Self {
        Self {
            alignment: DEFAULT_ALIGNMENT,
            ref_width: DEFAULT_REF_WIDTH,
            index_element_type: IndexElementType::U32,
            array_stride: DEFAULT_REF_WIDTH,
        }
    }
}
