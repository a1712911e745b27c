use crate::{
    schema::{ColumnDescriptor, RecordTemplate, SchemaError},
    value::Value,
};
use std::sync::Arc;

///
/// Record
///
/// One entity row, under construction or materialized from the backend. A
/// record shares its immutable template and keeps one value slot per column.
/// Slots stay unset until written; `Value::Null` is itself a value, so a
/// nullable column reads back as set-to-null rather than unset.
///

#[derive(Clone, Debug, PartialEq)]
pub struct Record {
    template: Arc<RecordTemplate>,
    values: Vec<Option<Value>>,
}

impl Record {
    /// Fresh record with every template column present and unset.
    #[must_use]
    pub fn from_template(template: Arc<RecordTemplate>) -> Self {
        let values = vec![None; template.len()];

        Self { template, values }
    }

    #[must_use]
    pub fn entity_name(&self) -> &str {
        self.template.entity_name()
    }

    #[must_use]
    pub const fn template(&self) -> &Arc<RecordTemplate> {
        &self.template
    }

    /// Whether `column` currently holds a value, an explicit null included.
    #[must_use]
    pub fn contains(&self, column: &str) -> bool {
        self.template
            .position(column)
            .is_some_and(|position| self.values[position].is_some())
    }

    /// Number of columns currently holding a value.
    #[must_use]
    pub fn set_len(&self) -> usize {
        self.values.iter().filter(|slot| slot.is_some()).count()
    }

    #[must_use]
    pub fn is_unset(&self) -> bool {
        self.set_len() == 0
    }

    /// Read a column. `Ok(None)` means the column exists but has not been
    /// written; a name outside the template is an error.
    pub fn get(&self, column: &str) -> Result<Option<&Value>, SchemaError> {
        let position = self.position(column)?;

        Ok(self.values[position].as_ref())
    }

    /// Write a column, enforcing the descriptor's kind and nullability. The
    /// record is unchanged when the write is rejected.
    pub fn set(&mut self, column: &str, value: impl Into<Value>) -> Result<(), SchemaError> {
        let position = self.position(column)?;
        let descriptor = &self.template.columns()[position];
        let value = value.into();

        if value.is_null() {
            if !descriptor.allow_null {
                return Err(SchemaError::NullNotAllowed {
                    column: descriptor.name.clone(),
                });
            }
        } else if value.kind() != descriptor.kind {
            return Err(SchemaError::TypeMismatch {
                column: descriptor.name.clone(),
                expected: descriptor.kind,
                found: value.kind(),
            });
        }

        self.values[position] = Some(value);

        Ok(())
    }

    /// Set columns paired with their descriptors, in template ordinal order.
    pub fn set_columns(&self) -> impl Iterator<Item = (&ColumnDescriptor, &Value)> {
        self.template
            .columns()
            .iter()
            .zip(&self.values)
            .filter_map(|(descriptor, slot)| slot.as_ref().map(|value| (descriptor, value)))
    }

    fn position(&self, column: &str) -> Result<usize, SchemaError> {
        self.template
            .position(column)
            .ok_or_else(|| SchemaError::ColumnNotFound {
                entity: self.template.entity_name().to_string(),
                column: column.to_string(),
            })
    }
}
