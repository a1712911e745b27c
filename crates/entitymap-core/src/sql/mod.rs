mod mutate;
mod select;


pub use mutate::{delete, insert, update};
pub use select::{fetch_by_id, fetch_page};

use crate::{driver::Parameter, error::ArgumentError, schema::RecordTemplate};
use serde::{Deserialize, Serialize};

///
/// Direction
///
/// Sort direction for one order expression, rendered as the backend keyword.
///

#[derive(Clone, Copy, Debug, Default, Deserialize, Eq, PartialEq, Serialize)]
pub enum Direction {
    #[default]
    Asc,
    Desc,
}

impl Direction {
    #[must_use]
    pub const fn keyword(self) -> &'static str {
        match self {
            Self::Asc => "ASC",
            Self::Desc => "DESC",
        }
    }
}

///
/// OrderBy
///
/// One ordered column in a paged retrieval. Column names are emitted as
/// given; no template check happens at build time.
///

#[derive(Clone, Debug, Deserialize, Eq, PartialEq, Serialize)]
pub struct OrderBy {
    pub column: String,
    pub direction: Direction,
}

impl OrderBy {
    #[must_use]
    pub fn new(column: impl Into<String>, direction: Direction) -> Self {
        Self {
            column: column.into(),
            direction,
        }
    }

    #[must_use]
    pub fn asc(column: impl Into<String>) -> Self {
        Self::new(column, Direction::Asc)
    }

    #[must_use]
    pub fn desc(column: impl Into<String>) -> Self {
        Self::new(column, Direction::Desc)
    }
}

///
/// Statement
///
/// Finished SQL text plus its ordered parameter bindings. Builders are pure:
/// nothing here has touched a connection yet.
///

#[derive(Clone, Debug, PartialEq)]
pub struct Statement {
    pub sql: String,
    pub params: Vec<Parameter>,
}

impl Statement {
    #[must_use]
    pub fn new(sql: impl Into<String>, params: Vec<Parameter>) -> Self {
        Self {
            sql: sql.into(),
            params,
        }
    }
}

/// Validate one page request and compute its window start, the number of
/// rows preceding the page, narrowed to the driver's signed range. Runs
/// before any SQL exists; sessions call it ahead of the template lookup so
/// a bad request never reaches the backend.
pub(crate) fn page_offset(
    page_number: u32,
    page_size: u32,
    orders: &[OrderBy],
) -> Result<i64, ArgumentError> {
    if page_number == 0 {
        return Err(ArgumentError::PageNumberZero);
    }
    if orders.is_empty() {
        return Err(ArgumentError::EmptyOrderList);
    }

    let skip = u64::from(page_size) * (u64::from(page_number) - 1);
    i64::try_from(skip).map_err(|_| ArgumentError::PageWindowOverflow {
        page_number,
        page_size,
    })
}

/// Resolve the effective column list: the caller's subset verbatim when one
/// is given, every template column in ordinal order otherwise.
fn resolved_columns<'a>(template: &'a RecordTemplate, columns: &'a [&'a str]) -> Vec<&'a str> {
    if columns.is_empty() {
        template
            .columns()
            .iter()
            .map(|column| column.name.as_str())
            .collect()
    } else {
        columns.to_vec()
    }
}

/// Render `[Entity].Column` pairs joined by commas.
fn qualified_list(entity: &str, columns: &[&str]) -> String {
    columns
        .iter()
        .map(|column| format!("[{entity}].{column}"))
        .collect::<Vec<_>>()
        .join(", ")
}
