use crate::{
    schema::RecordTemplate,
    value::{Value, ValueKind},
};

///
/// CommonType
///
/// Provider-neutral parameter type class, used when no column descriptor is
/// known. The driver maps it onto its native type; `Object` is the untyped
/// fallback for null values without a descriptor.
///

#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub enum CommonType {
    Binary,
    Boolean,
    Byte,
    DateTime,
    DateTimeOffset,
    Decimal,
    Double,
    Guid,
    Int16,
    Int32,
    Int64,
    Object,
    SByte,
    Single,
    String,
    StringFixedLength,
    Time,
    UInt16,
    UInt32,
    UInt64,
}

impl CommonType {
    /// Static kind lookup for parameters with no backing column. Total over
    /// every value kind; nullable inputs land on the same class as their
    /// non-null form because null collapses before typing happens.
    #[must_use]
    pub const fn of(kind: ValueKind) -> Self {
        match kind {
            ValueKind::Blob => Self::Binary,
            ValueKind::Bool => Self::Boolean,
            ValueKind::Char => Self::StringFixedLength,
            ValueKind::DateTime => Self::DateTime,
            ValueKind::DateTimeOffset => Self::DateTimeOffset,
            ValueKind::Decimal => Self::Decimal,
            ValueKind::Duration => Self::Time,
            ValueKind::Float32 => Self::Single,
            ValueKind::Float64 => Self::Double,
            ValueKind::Int8 => Self::SByte,
            ValueKind::Int16 => Self::Int16,
            ValueKind::Int32 => Self::Int32,
            ValueKind::Int64 => Self::Int64,
            ValueKind::Null => Self::Object,
            ValueKind::Text => Self::String,
            ValueKind::Uint8 => Self::Byte,
            ValueKind::Uint16 => Self::UInt16,
            ValueKind::Uint32 => Self::UInt32,
            ValueKind::Uint64 => Self::UInt64,
            ValueKind::Uuid => Self::Guid,
        }
    }
}

///
/// ParamType
///
/// How a parameter's backend type was chosen: echoed from a known column
/// descriptor, or derived from the static kind table.
///

#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub enum ParamType {
    /// Backend-native type code taken from a column descriptor.
    Provider(i32),

    /// Provider-neutral class from the static kind table.
    Common(CommonType),
}

///
/// Parameter
///
/// One named binding. Names carry no placeholder prefix; builders add the
/// `@` marker in SQL text only.
///

#[derive(Clone, Debug, PartialEq)]
pub struct Parameter {
    pub name: String,
    pub value: Value,
    pub ty: ParamType,
}

impl Parameter {
    #[must_use]
    pub fn new(name: impl Into<String>, value: impl Into<Value>, ty: ParamType) -> Self {
        Self {
            name: name.into(),
            value: value.into(),
            ty,
        }
    }

    /// Parameter typed from the static kind table alone.
    #[must_use]
    pub fn from_value(name: impl Into<String>, value: impl Into<Value>) -> Self {
        let value = value.into();
        let ty = ParamType::Common(CommonType::of(value.kind()));

        Self {
            name: name.into(),
            value,
            ty,
        }
    }

    /// Parameter typed from the owning template when it has the named column
    /// (case-insensitive), from the static kind table otherwise.
    #[must_use]
    pub fn bound(
        template: &RecordTemplate,
        name: impl Into<String>,
        value: impl Into<Value>,
    ) -> Self {
        let name = name.into();
        let value = value.into();

        let ty = template.column(&name).map_or_else(
            || ParamType::Common(CommonType::of(value.kind())),
            |column| ParamType::Provider(column.provider_type),
        );

        Self { name, value, ty }
    }
}
