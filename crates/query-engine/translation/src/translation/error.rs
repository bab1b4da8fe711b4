//! Errors for query validation.

use std::fmt;

use dataquery_models::{ErrorCode, ErrorItem};
use query_engine_metadata::metadata::{AggregateFunction, ColumnType, FilterOperator};
use thiserror::Error;

/// A violation found while validating a query.
///
/// Violations are collected rather than raised, so that a client can fix
/// every problem with a single round trip.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum Error {
    #[error("Unknown data_source '{0}'")]
    UnknownResource(String),
    #[error("At least one projection is required")]
    EmptySelect,
    #[error("Unknown column '{column}'{context}")]
    ColumnNotFound {
        column: String,
        context: ColumnContext,
    },
    #[error("Duplicate alias '{0}'")]
    DuplicateAlias(String),
    #[error("time_bucket requires date/datetime column, got '{0}'")]
    NotATimeColumn(String),
    #[error("{0} requires 'column'")]
    AggregateRequiresColumn(AggregateFunction),
    #[error("count takes no 'column', got '{0}'")]
    CountTakesNoColumn(String),
    #[error("{function} requires numeric column, got '{column}'")]
    AggregateRequiresNumericColumn {
        function: AggregateFunction,
        column: String,
    },
    #[error("{function} requires an aggregatable column, got '{column}'")]
    ColumnNotAggregatable {
        function: AggregateFunction,
        column: String,
    },
    #[error("percentile requires 'p'")]
    PercentileRequiresP,
    #[error("percentile 'p' should be in (0,1] or (0,100], got {0}")]
    PercentileOutOfRange(f64),
    #[error("window scope requires 'window' spec")]
    WindowSpecRequired,
    #[error("window.{0} must not be empty")]
    EmptyWindowClause(WindowClause),
    #[error("window.{clause} references unknown column or alias '{name}'")]
    UnknownWindowReference { clause: WindowClause, name: String },
    #[error("Op '{operator}' not allowed for type '{column_type}' on '{column}'")]
    OperatorNotAllowed {
        operator: FilterOperator,
        column_type: ColumnType,
        column: String,
    },
    #[error("Sort 'by' must reference a selected alias/column, got '{0}'")]
    UnresolvedSortKey(String),
    #[error("limit must be 1..{max}, got {limit}")]
    LimitOutOfRange { limit: i64, max: u32 },
}

/// Where an unknown column was referenced.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ColumnContext {
    Select,
    TimeBucket,
    Aggregate,
    Filter,
}

impl fmt::Display for ColumnContext {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ColumnContext::Select => Ok(()),
            ColumnContext::TimeBucket => write!(f, " in time_bucket"),
            ColumnContext::Aggregate => write!(f, " in aggregate"),
            ColumnContext::Filter => write!(f, " in filter"),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum WindowClause {
    PartitionBy,
    OrderBy,
}

impl fmt::Display for WindowClause {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            WindowClause::PartitionBy => write!(f, "partitionBy"),
            WindowClause::OrderBy => write!(f, "orderBy"),
        }
    }
}

impl Error {
    /// The stable code reported to clients.
    pub fn code(&self) -> ErrorCode {
        match self {
            Error::UnknownResource(_) => ErrorCode::UnknownResource,
            Error::EmptySelect => ErrorCode::EmptySelect,
            Error::ColumnNotFound { .. } => ErrorCode::BadColumn,
            Error::DuplicateAlias(_) => ErrorCode::DupAlias,
            Error::NotATimeColumn(_) => ErrorCode::BadTimeColumn,
            Error::AggregateRequiresColumn(_)
            | Error::CountTakesNoColumn(_)
            | Error::PercentileRequiresP
            | Error::PercentileOutOfRange(_) => ErrorCode::BadAgg,
            Error::AggregateRequiresNumericColumn { .. } | Error::ColumnNotAggregatable { .. } => {
                ErrorCode::AggType
            }
            Error::WindowSpecRequired
            | Error::EmptyWindowClause(_)
            | Error::UnknownWindowReference { .. } => ErrorCode::BadWindow,
            Error::OperatorNotAllowed { .. } => ErrorCode::InvalidFilter,
            Error::UnresolvedSortKey(_) => ErrorCode::BadSort,
            Error::LimitOutOfRange { .. } => ErrorCode::BadLimit,
        }
    }

    /// The request section the violation was found in.
    pub fn field(&self) -> Option<&'static str> {
        match self {
            Error::UnknownResource(_) => None,
            Error::ColumnNotFound {
                context: ColumnContext::Filter,
                ..
            }
            | Error::OperatorNotAllowed { .. } => Some("filters"),
            Error::UnresolvedSortKey(_) => Some("sort"),
            Error::LimitOutOfRange { .. } => Some("page"),
            Error::EmptySelect
            | Error::ColumnNotFound { .. }
            | Error::DuplicateAlias(_)
            | Error::NotATimeColumn(_)
            | Error::AggregateRequiresColumn(_)
            | Error::CountTakesNoColumn(_)
            | Error::AggregateRequiresNumericColumn { .. }
            | Error::ColumnNotAggregatable { .. }
            | Error::PercentileRequiresP
            | Error::PercentileOutOfRange(_)
            | Error::WindowSpecRequired
            | Error::EmptyWindowClause(_)
            | Error::UnknownWindowReference { .. } => Some("select"),
        }
    }
}

impl From<Error> for ErrorItem {
    fn from(error: Error) -> Self {
        ErrorItem {
            code: error.code(),
            message: error.to_string(),
            field: error.field().map(ToString::to_string),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_filter_violations_point_at_filters() {
        let item = ErrorItem::from(Error::ColumnNotFound {
            column: "nope".into(),
            context: ColumnContext::Filter,
        });
        assert_eq!(item.code, ErrorCode::BadColumn);
        assert_eq!(item.message, "Unknown column 'nope' in filter");
        assert_eq!(item.field.as_deref(), Some("filters"));
    }

    #[test]
    fn test_unknown_resource_has_no_field() {
        let item = ErrorItem::from(Error::UnknownResource("unknown_resource".into()));
        assert_eq!(item.code, ErrorCode::UnknownResource);
        assert_eq!(item.field, None);
    }

    #[test]
    fn test_messages() {
        assert_eq!(
            Error::OperatorNotAllowed {
                operator: FilterOperator::Contains,
                column_type: ColumnType::Currency,
                column: "share_price".into(),
            }
            .to_string(),
            "Op 'contains' not allowed for type 'currency' on 'share_price'"
        );
        assert_eq!(
            Error::EmptyWindowClause(WindowClause::OrderBy).to_string(),
            "window.orderBy must not be empty"
        );
        assert_eq!(
            Error::LimitOutOfRange {
                limit: 0,
                max: 1000
            }
            .to_string(),
            "limit must be 1..1000, got 0"
        );
        assert_eq!(
            Error::ColumnNotFound {
                column: "nope".into(),
                context: ColumnContext::Select,
            }
            .to_string(),
            "Unknown column 'nope'"
        );
    }
}
