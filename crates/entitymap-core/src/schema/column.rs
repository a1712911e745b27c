use crate::value::ValueKind;
use serde::{Deserialize, Serialize};

///
/// ColumnDescriptor
///
/// Immutable column metadata exactly as reported by the backend. `ordinal`
/// and `provider_type` are backend-assigned and never recomputed client-side;
/// statement builders echo `provider_type` back when typing parameters.
///

#[derive(Clone, Debug, Deserialize, Eq, PartialEq, Serialize)]
pub struct ColumnDescriptor {
    /// Column name in the backend's reported casing.
    pub name: String,

    /// Kind every stored value for this column must match.
    pub kind: ValueKind,

    /// Backend-native type name, carried for diagnostics only.
    pub provider_type_name: String,

    /// Backend-native type code, echoed into parameter typing.
    pub provider_type: i32,

    /// Zero-based position in the backend result set.
    pub ordinal: usize,

    /// Declared storage size. Descriptive metadata, never enforced on writes.
    pub size: i32,

    /// Whether the column accepts null.
    pub allow_null: bool,
}

impl ColumnDescriptor {
    /// Case-insensitive name match, the lookup rule used everywhere columns
    /// are addressed by name.
    #[must_use]
    pub fn is_named(&self, name: &str) -> bool {
        self.name.eq_ignore_ascii_case(name)
    }
}
