//! Table and Detail Cells
//!
//! What a record shows in a list row or a detail panel, already formatted.

use chrono::{NaiveDate, NaiveDateTime};
use rust_decimal::Decimal;

use crate::entity::Entity;
use crate::format;
use crate::status::Status;

/// One rendered value
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Cell {
    Text(String),
    Badge(Status),
}

impl Cell {
    pub fn text(value: impl Into<String>) -> Self {
        Cell::Text(value.into())
    }

    pub fn optional(value: Option<&str>) -> Self {
        Cell::Text(format::format_optional(value))
    }

    pub fn money(amount: Decimal) -> Self {
        Cell::Text(format::format_currency(amount))
    }

    pub fn date(date: NaiveDate) -> Self {
        Cell::Text(format::format_date(date))
    }

    pub fn optional_date(date: Option<NaiveDate>) -> Self {
        Cell::Text(format::format_optional_date(date))
    }

    pub fn datetime(dt: NaiveDateTime) -> Self {
        Cell::Text(format::format_datetime(dt))
    }

    pub fn yes_no(value: bool) -> Self {
        Cell::text(if value { "Yes" } else { "No" })
    }

    /// Plain text of the cell (badge label for badges)
    pub fn as_text(&self) -> &str {
        match self {
            Cell::Text(s) => s,
            Cell::Badge(status) => status.label(),
        }
    }
}

/// Records rendered as table rows and detail panels
pub trait Tabular: Entity {
    fn columns() -> &'static [&'static str];

    /// One cell per column
    fn cells(&self) -> Vec<Cell>;

    /// Label/value pairs for the detail view
    fn details(&self) -> Vec<(&'static str, Cell)>;
}
