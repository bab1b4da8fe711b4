//! Build the discovery document describing what queries a resource accepts.
//!
//! Advertised filter operators come from the same per-type table the
//! validator checks against.

use thiserror::Error;

use dataquery_configuration::Configuration;
use dataquery_models as models;
use query_engine_metadata::metadata::{AggregateFunction, ColumnInfo, ColumnType, TimeGrain};
use query_engine_translation::translation::query::paging::MAX_PAGE_LIMIT;

/// The unit advertised for currency columns that do not declare one.
pub const DEFAULT_CURRENCY_UNIT: &str = "USD";

#[derive(Debug, Error, PartialEq, Eq)]
pub enum SchemaError {
    #[error("Unknown resource '{0}'")]
    UnknownResource(String),
}

/// Get the discovery document of a resource.
pub fn get_options(
    configuration: &Configuration,
    resource: &str,
) -> Result<models::OptionsResponse, SchemaError> {
    let info = configuration
        .metadata
        .lookup(resource)
        .ok_or_else(|| SchemaError::UnknownResource(resource.to_string()))?;

    let columns = info
        .columns
        .iter()
        .map(|(name, column)| column_spec(name, column))
        .collect();

    Ok(models::OptionsResponse {
        resource: resource.to_string(),
        columns,
        supports: supports(),
        constraints: models::ConstraintsSpec {
            max_select: configuration.constraints.max_select,
            max_group_by: configuration.constraints.max_group_by,
            max_aggregates: configuration.constraints.max_aggregates,
        },
    })
}

fn column_spec(name: &str, column: &ColumnInfo) -> models::ColumnSpec {
    let column_type = column.r#type;
    models::ColumnSpec {
        name: name.to_string(),
        r#type: column_type,
        sortable: column.sortable,
        filter_ops: column_type.filter_operators().to_vec(),
        values: match column_type {
            ColumnType::Enum => column.values.clone(),
            _ => vec![],
        },
        unit: match column_type {
            ColumnType::Currency => Some(
                column
                    .unit
                    .clone()
                    .unwrap_or_else(|| DEFAULT_CURRENCY_UNIT.to_string()),
            ),
            ColumnType::Number => column.unit.clone(),
            _ => None,
        },
        grains: if column_type.is_temporal() {
            enum_iterator::all::<TimeGrain>().collect()
        } else {
            vec![]
        },
    }
}

/// Capabilities shared by every resource.
fn supports() -> models::SupportsSpec {
    models::SupportsSpec {
        sorting: true,
        multi_sort: true,
        pagination: models::PaginationSpec {
            mode: models::PaginationMode::Cursor,
            max_page_size: MAX_PAGE_LIMIT,
        },
        aggregations: enum_iterator::all::<AggregateFunction>().collect(),
        group_by: true,
        time_bucketing: true,
    }
}
