use crate::{
    driver::{ParamType, Parameter},
    error::ArgumentError,
    record::Record,
    schema::ColumnDescriptor,
    sql::Statement,
    value::Value,
};

/// Insert every set column, in template ordinal order. Requires an "Id"
/// value, checked before any SQL text is produced.
///
/// `INSERT INTO E (c1, c2) VALUES (@c1, @c2)`
pub fn insert(record: &Record) -> Result<Statement, ArgumentError> {
    require_id(record)?;

    let set: Vec<_> = record.set_columns().collect();

    let columns = set
        .iter()
        .map(|(descriptor, _)| descriptor.name.as_str())
        .collect::<Vec<_>>()
        .join(", ");

    let placeholders = set
        .iter()
        .map(|(descriptor, _)| format!("@{}", descriptor.name))
        .collect::<Vec<_>>()
        .join(", ");

    let sql = format!(
        "INSERT INTO {} ({columns}) VALUES ({placeholders})",
        record.entity_name()
    );

    Ok(Statement::new(sql, provider_params(&set)))
}

/// Update every set column except Id, keyed by Id. The Id value still binds
/// as a parameter for the WHERE clause. Requires an "Id" value and at least
/// one other set column, both checked before any SQL text is produced.
///
/// `UPDATE [E] SET [c1] = @c1 WHERE [Id] = @Id`
pub fn update(record: &Record) -> Result<Statement, ArgumentError> {
    require_id(record)?;

    let set: Vec<_> = record.set_columns().collect();

    let assignments = set
        .iter()
        .filter(|(descriptor, _)| !descriptor.is_named("Id"))
        .map(|(descriptor, _)| {
            let name = &descriptor.name;

            format!("[{name}] = @{name}")
        })
        .collect::<Vec<_>>()
        .join(", ");

    if assignments.is_empty() {
        return Err(ArgumentError::NoUpdatableColumns {
            entity: record.entity_name().to_string(),
        });
    }

    let sql = format!(
        "UPDATE [{}] SET {assignments} WHERE [Id] = @Id",
        record.entity_name()
    );

    Ok(Statement::new(sql, provider_params(&set)))
}

/// Delete by id. No template lookup happens here, so the id parameter is
/// typed from the static kind table.
///
/// `DELETE FROM [E] WHERE Id = @id`
pub fn delete(entity_name: &str, id: impl Into<Value>) -> Statement {
    let sql = format!("DELETE FROM [{entity_name}] WHERE Id = @id");
    let params = vec![Parameter::from_value("id", id)];

    Statement::new(sql, params)
}

fn require_id(record: &Record) -> Result<(), ArgumentError> {
    if record.contains("Id") {
        Ok(())
    } else {
        Err(ArgumentError::MissingId {
            entity: record.entity_name().to_string(),
        })
    }
}

/// Record-backed parameters are always provider-typed: every set column has
/// a descriptor carrying the backend's native type code.
fn provider_params(set: &[(&ColumnDescriptor, &Value)]) -> Vec<Parameter> {
    set.iter()
        .map(|(descriptor, value)| {
            Parameter::new(
                descriptor.name.clone(),
                (*value).clone(),
                ParamType::Provider(descriptor.provider_type),
            )
        })
        .collect()
}
