//! Validate aggregate projections.

use dataquery_models as models;
use query_engine_metadata::metadata::AggregateFunction;

use crate::translation::error::{ColumnContext, Error, WindowClause};
use crate::translation::helpers::Env;

/// Check an aggregate's function arguments and, for window scope, its
/// window spec. The two are checked independently of each other.
pub fn check_aggregate(env: &Env, aggregate: &models::Aggregate) -> Vec<Error> {
    let mut errors = check_function(env, aggregate);
    if aggregate.scope == models::Scope::Window {
        errors.extend(check_window(env, aggregate.window.as_ref()));
    }
    errors
}

fn check_function(env: &Env, aggregate: &models::Aggregate) -> Vec<Error> {
    let function = aggregate.function;
    let column = match (function, &aggregate.column) {
        (AggregateFunction::Count, None) => return vec![],
        (AggregateFunction::Count, Some(column)) => {
            return vec![Error::CountTakesNoColumn(column.clone())]
        }
        (_, None) => return vec![Error::AggregateRequiresColumn(function)],
        (_, Some(column)) => column,
    };

    let info = match env.lookup_column(column, ColumnContext::Aggregate) {
        Ok(info) => info,
        Err(err) => return vec![err],
    };
    if !function.requires_numeric_column() {
        return vec![];
    }

    let mut errors = vec![];
    if !info.r#type.is_numeric() {
        errors.push(Error::AggregateRequiresNumericColumn {
            function,
            column: column.clone(),
        });
    } else if !info.aggregatable {
        errors.push(Error::ColumnNotAggregatable {
            function,
            column: column.clone(),
        });
    }
    if function == AggregateFunction::Percentile {
        errors.extend(check_percentile(aggregate.p));
    }
    errors
}

/// `p` is a fraction in `(0, 1]` or a percentage in `(0, 100]`.
fn check_percentile(p: Option<f64>) -> Option<Error> {
    match p {
        None => Some(Error::PercentileRequiresP),
        Some(p) if p > 0.0 && p <= 100.0 => None,
        Some(p) => Some(Error::PercentileOutOfRange(p)),
    }
}

fn check_window(env: &Env, window: Option<&models::WindowSpec>) -> Vec<Error> {
    let Some(window) = window else {
        return vec![Error::WindowSpecRequired];
    };

    let mut errors = vec![];
    for (clause, names) in [
        (WindowClause::PartitionBy, &window.partition_by),
        (WindowClause::OrderBy, &window.order_by),
    ] {
        if names.is_empty() {
            errors.push(Error::EmptyWindowClause(clause));
        }
        errors.extend(
            names
                .iter()
                .filter(|name| !env.is_column_or_alias(name))
                .map(|name| Error::UnknownWindowReference {
                    clause,
                    name: name.clone(),
                }),
        );
    }
    errors
}
