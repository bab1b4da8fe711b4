//! Structured validation errors returned to clients.

use std::fmt;

use schemars::JsonSchema;
use serde::{Deserialize, Serialize};

/// The stable error codes. Their meaning is part of the public contract.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize, JsonSchema)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum ErrorCode {
    /// The `data_source` names no known resource
    UnknownResource,
    /// `select` is empty
    EmptySelect,
    /// A referenced column does not exist in the resource
    BadColumn,
    /// Two projections share an output alias
    DupAlias,
    /// A time bucket over a column that is neither a date nor a datetime
    BadTimeColumn,
    /// A malformed aggregate: missing column or percentile
    BadAgg,
    /// A numeric aggregate over a non-numeric column
    AggType,
    /// A missing or malformed window spec
    BadWindow,
    /// A filter operator not allowed for the column's type
    InvalidFilter,
    /// A sort key that references nothing selected
    BadSort,
    /// A page limit outside the accepted range
    BadLimit,
}

impl ErrorCode {
    pub fn code(&self) -> &'static str {
        match self {
            ErrorCode::UnknownResource => "UNKNOWN_RESOURCE",
            ErrorCode::EmptySelect => "EMPTY_SELECT",
            ErrorCode::BadColumn => "BAD_COLUMN",
            ErrorCode::DupAlias => "DUP_ALIAS",
            ErrorCode::BadTimeColumn => "BAD_TIME_COLUMN",
            ErrorCode::BadAgg => "BAD_AGG",
            ErrorCode::AggType => "AGG_TYPE",
            ErrorCode::BadWindow => "BAD_WINDOW",
            ErrorCode::InvalidFilter => "INVALID_FILTER",
            ErrorCode::BadSort => "BAD_SORT",
            ErrorCode::BadLimit => "BAD_LIMIT",
        }
    }
}

impl fmt::Display for ErrorCode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.code())
    }
}

/// A single violation found in a query.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize, JsonSchema)]
pub struct ErrorItem {
    pub code: ErrorCode,
    pub message: String,
    /// The request section at fault: `select`, `filters`, `sort` or `page`
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub field: Option<String>,
}

impl fmt::Display for ErrorItem {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match &self.field {
            Some(field) => write!(f, "[{}] {} ({field})", self.code, self.message),
            None => write!(f, "[{}] {}", self.code, self.message),
        }
    }
}

/// Every violation found in a query, in discovery order. Never empty.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize, JsonSchema)]
pub struct ErrorResponse {
    pub error: Vec<ErrorItem>,
}

impl ErrorResponse {
    /// Returns `None` when there is nothing to report.
    pub fn from_items(items: Vec<ErrorItem>) -> Option<Self> {
        if items.is_empty() {
            None
        } else {
            Some(ErrorResponse { error: items })
        }
    }

    pub fn single(item: ErrorItem) -> Self {
        ErrorResponse { error: vec![item] }
    }

    pub fn codes(&self) -> Vec<ErrorCode> {
        self.error.iter().map(|item| item.code).collect()
    }
}

impl fmt::Display for ErrorResponse {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let mut items = self.error.iter();
        if let Some(first) = items.next() {
            write!(f, "{first}")?;
        }
        for item in items {
            write!(f, "; {item}")?;
        }
        Ok(())
    }
}

impl std::error::Error for ErrorResponse {}
