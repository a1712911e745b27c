use crate::schema::{ColumnDescriptor, SchemaError};
use serde::{Deserialize, Serialize};

///
/// RecordTemplate
///
/// Immutable column layout for one entity, discovered by probing the backend
/// the first time the entity name is seen. Templates are shared behind `Arc`
/// by the cache and never mutated after construction; records hold on to the
/// template they were created from.
///

#[derive(Clone, Debug, Deserialize, Eq, PartialEq, Serialize)]
pub struct RecordTemplate {
    entity_name: String,
    columns: Vec<ColumnDescriptor>,
}

impl RecordTemplate {
    /// Build a template from probed metadata. Column order is kept exactly
    /// as the backend reported it; duplicate names are rejected because every
    /// later lookup is by case-insensitive name. Templates reach callers only
    /// through the schema cache.
    pub(crate) fn new(
        entity_name: impl Into<String>,
        columns: Vec<ColumnDescriptor>,
    ) -> Result<Self, SchemaError> {
        let entity_name = entity_name.into();

        for (index, column) in columns.iter().enumerate() {
            if columns[..index].iter().any(|prior| prior.is_named(&column.name)) {
                return Err(SchemaError::DuplicateColumn {
                    entity: entity_name,
                    column: column.name.clone(),
                });
            }
        }

        Ok(Self {
            entity_name,
            columns,
        })
    }

    #[must_use]
    pub fn entity_name(&self) -> &str {
        &self.entity_name
    }

    /// Columns in backend-reported ordinal order.
    #[must_use]
    pub fn columns(&self) -> &[ColumnDescriptor] {
        &self.columns
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.columns.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.columns.is_empty()
    }

    /// Case-insensitive column lookup.
    #[must_use]
    pub fn column(&self, name: &str) -> Option<&ColumnDescriptor> {
        self.columns.iter().find(|column| column.is_named(name))
    }

    #[must_use]
    pub fn contains(&self, name: &str) -> bool {
        self.column(name).is_some()
    }

    /// Template-internal position of a column, case-insensitive.
    pub(crate) fn position(&self, name: &str) -> Option<usize> {
        self.columns.iter().position(|column| column.is_named(name))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{test_support, value::ValueKind};

    #[test]
    fn lookup_is_case_insensitive() {
        let template = test_support::customer_template();

        assert!(template.contains("Id"));
        assert!(template.contains("id"));
        assert!(template.contains("NAME"));
        assert!(!template.contains("Missing"));

        let column = template.column("ID").expect("column lookup should hit");
        assert_eq!(column.name, "Id", "descriptor keeps the backend casing");
        assert_eq!(template.position("name"), Some(1));
    }

    #[test]
    fn column_order_follows_backend_report() {
        let template = test_support::customer_template();
        let names: Vec<&str> = template
            .columns()
            .iter()
            .map(|column| column.name.as_str())
            .collect();

        assert_eq!(names, vec!["Id", "Name"]);
        assert_eq!(template.len(), 2);
        assert!(!template.is_empty());
    }

    #[test]
    fn duplicate_column_names_are_rejected() {
        let columns = vec![
            test_support::column("Id", ValueKind::Int32, 8, 0, false),
            test_support::column("id", ValueKind::Int32, 8, 1, false),
        ];

        let err = RecordTemplate::new("Customer", columns)
            .expect_err("case-insensitive duplicate should be rejected");

        assert_eq!(
            err,
            SchemaError::DuplicateColumn {
                entity: "Customer".to_string(),
                column: "id".to_string(),
            }
        );
    }

    #[test]
    fn template_serializes_to_a_stable_shape() {
        let template = test_support::customer_template();

        let json = serde_json::to_value(template.as_ref()).expect("template should serialize");
        assert_eq!(
            json,
            serde_json::json!({
                "entity_name": "Customer",
                "columns": [
                    {
                        "name": "Id",
                        "kind": "Int32",
                        "provider_type_name": "int",
                        "provider_type": 8,
                        "ordinal": 0,
                        "size": 4,
                        "allow_null": false,
                    },
                    {
                        "name": "Name",
                        "kind": "Text",
                        "provider_type_name": "nvarchar",
                        "provider_type": 12,
                        "ordinal": 1,
                        "size": 50,
                        "allow_null": true,
                    },
                ],
            })
        );

        let back: RecordTemplate =
            serde_json::from_value(json).expect("template should deserialize");
        assert_eq!(&back, template.as_ref());
    }
}
