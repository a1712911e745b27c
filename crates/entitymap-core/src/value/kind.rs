use serde::{Deserialize, Serialize};
use std::fmt;

///
/// ValueKind
///
/// Canonical value-variant tag. Column descriptors carry the kind a column
/// accepts, and every record write is checked against it before any SQL is
/// built.
///
#[derive(Clone, Copy, Debug, Deserialize, Eq, Hash, PartialEq, Serialize)]
pub enum ValueKind {
    Blob,
    Bool,
    Char,
    DateTime,
    DateTimeOffset,
    Decimal,
    Duration,
    Float32,
    Float64,
    Int8,
    Int16,
    Int32,
    Int64,
    Null,
    Text,
    Uint8,
    Uint16,
    Uint32,
    Uint64,
    Uuid,
}

impl ValueKind {
    /// Every kind, in variant order. Handy for exhaustive table checks.
    pub const ALL: [Self; 20] = [
        Self::Blob,
        Self::Bool,
        Self::Char,
        Self::DateTime,
        Self::DateTimeOffset,
        Self::Decimal,
        Self::Duration,
        Self::Float32,
        Self::Float64,
        Self::Int8,
        Self::Int16,
        Self::Int32,
        Self::Int64,
        Self::Null,
        Self::Text,
        Self::Uint8,
        Self::Uint16,
        Self::Uint32,
        Self::Uint64,
        Self::Uuid,
    ];

    /// Stable human-readable kind label for diagnostics.
    #[must_use]
    pub const fn label(self) -> &'static str {
        match self {
            Self::Blob => "Blob",
            Self::Bool => "Bool",
            Self::Char => "Char",
            Self::DateTime => "DateTime",
            Self::DateTimeOffset => "DateTimeOffset",
            Self::Decimal => "Decimal",
            Self::Duration => "Duration",
            Self::Float32 => "Float32",
            Self::Float64 => "Float64",
            Self::Int8 => "Int8",
            Self::Int16 => "Int16",
            Self::Int32 => "Int32",
            Self::Int64 => "Int64",
            Self::Null => "Null",
            Self::Text => "Text",
            Self::Uint8 => "Uint8",
            Self::Uint16 => "Uint16",
            Self::Uint32 => "Uint32",
            Self::Uint64 => "Uint64",
            Self::Uuid => "Uuid",
        }
    }
}

impl fmt::Display for ValueKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}
