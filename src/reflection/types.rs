// Tue Jan 13 2026 - Alex

use bitflags::bitflags;
use serde::{Deserialize, Serialize};
use std::fmt;

/// Plain data types a member can resolve to. Anything else (class members,
/// pointers to objects) has no data type and is never digested directly.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum DataType {
    Char,
    UChar,
    Short,
    UShort,
    Int,
    UInt,
    Long,
    ULong,
    Long64,
    ULong64,
    Float,
    Double,
    Bool,
}

impl DataType {
    pub fn size(self) -> usize {
        match self {
            Self::Char | Self::UChar | Self::Bool => 1,
            Self::Short | Self::UShort => 2,
            Self::Int | Self::UInt | Self::Float => 4,
            Self::Long | Self::ULong | Self::Long64 | Self::ULong64 | Self::Double => 8,
        }
    }

    pub fn name(self) -> &'static str {
        match self {
            Self::Char => "char",
            Self::UChar => "unsigned char",
            Self::Short => "short",
            Self::UShort => "unsigned short",
            Self::Int => "int",
            Self::UInt => "unsigned int",
            Self::Long => "long",
            Self::ULong => "unsigned long",
            Self::Long64 => "long long",
            Self::ULong64 => "unsigned long long",
            Self::Float => "float",
            Self::Double => "double",
            Self::Bool => "bool",
        }
    }
}

impl fmt::Display for DataType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

bitflags! {
    #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
    pub struct FieldFlags: u8 {
        /// Declared transient, never streamed.
        const TRANSIENT = 1 << 0;
        /// Object-typed member, checked through its own class.
        const OBJECT = 1 << 1;
    }
}

/// One entry of a class's real data: a member with its absolute offset
/// inside an instance.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FieldDescriptor {
    pub name: String,
    pub offset: usize,
    pub unit_size: usize,
    pub data_type: Option<DataType>,
    pub flags: FieldFlags,
}

impl FieldDescriptor {
    pub fn new(name: &str, offset: usize, unit_size: usize) -> Self {
        Self {
            name: name.to_string(),
            offset,
            unit_size,
            data_type: None,
            flags: FieldFlags::empty(),
        }
    }

    pub fn with_data_type(mut self, data_type: DataType) -> Self {
        self.data_type = Some(data_type);
        self
    }

    pub fn with_flags(mut self, flags: FieldFlags) -> Self {
        self.flags |= flags;
        self
    }

    pub fn is_transient(&self) -> bool {
        self.flags.contains(FieldFlags::TRANSIENT)
    }

    pub fn is_object(&self) -> bool {
        self.flags.contains(FieldFlags::OBJECT)
    }

    pub fn end_offset(&self) -> usize {
        self.offset + self.unit_size
    }

    /// Scalar, non-transient members with a known data type.
    pub fn is_digestible(&self) -> bool {
        !self.is_transient() && !self.is_object() && self.data_type.is_some()
    }

    /// "int fX", or just "fX" when the type cannot be resolved.
    pub fn display_with_type(&self) -> String {
        match self.data_type {
            Some(dt) => format!("{} {}", dt.name(), self.name),
            None => self.name.clone(),
        }
    }
}

impl fmt::Display for FieldDescriptor {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} @ 0x{:X} ({} bytes)", self.display_with_type(), self.offset, self.unit_size)
    }
}
