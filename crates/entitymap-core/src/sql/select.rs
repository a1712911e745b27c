use crate::{
    driver::Parameter,
    error::ArgumentError,
    schema::RecordTemplate,
    sql::{OrderBy, Statement, page_offset, qualified_list, resolved_columns},
    value::Value,
};

/// Single-row lookup keyed by the conventional "Id" column.
///
/// `SELECT [E].c1, [E].c2 FROM [E] WHERE Id = @id`
pub fn fetch_by_id(
    template: &RecordTemplate,
    columns: &[&str],
    id: impl Into<Value>,
) -> Statement {
    let entity = template.entity_name();
    let columns = resolved_columns(template, columns);

    let sql = format!(
        "SELECT {} FROM [{entity}] WHERE Id = @id",
        qualified_list(entity, &columns)
    );
    let params = vec![Parameter::bound(template, "id", id)];

    Statement::new(sql, params)
}

/// One stably-ordered page via row numbering.
///
/// The inner query numbers rows by the requested ordering and groups by the
/// full selected column set, which collapses rows that are duplicates across
/// those columns. The outer query filters past the window start and
/// re-applies the same ordering so pages stay stable end to end.
pub fn fetch_page(
    template: &RecordTemplate,
    columns: &[&str],
    page_number: u32,
    page_size: u32,
    orders: &[OrderBy],
) -> Result<Statement, ArgumentError> {
    let row_number = page_offset(page_number, page_size, orders)?;

    let entity = template.entity_name();
    let columns = resolved_columns(template, columns);
    let column_list = qualified_list(entity, &columns);

    let order_list = orders
        .iter()
        .map(|order| {
            format!(
                "[{entity}].{} {}",
                order.column,
                order.direction.keyword()
            )
        })
        .collect::<Vec<_>>()
        .join(", ");

    let sql = format!(
        "SELECT TOP (@pageSize) [RowNumber], {column_list} \
         FROM (SELECT Row_Number() OVER (ORDER BY {order_list} ) AS [RowNumber], \
         {column_list} FROM [{entity}] GROUP BY {column_list}) AS [{entity}] \
         WHERE [{entity}].[RowNumber] > @rowNumber ORDER BY {order_list}"
    );

    let params = vec![
        Parameter::bound(template, "rowNumber", row_number),
        Parameter::bound(template, "pageSize", i64::from(page_size)),
    ];

    Ok(Statement::new(sql, params))
}
