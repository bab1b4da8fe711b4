//! The discovery document describing what queries a resource accepts.

use schemars::JsonSchema;
use serde::{Deserialize, Serialize};

use query_engine_metadata::metadata::{AggregateFunction, ColumnType, FilterOperator, TimeGrain};

#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize, JsonSchema)]
pub struct OptionsResponse {
    pub resource: String,
    /// The resource's columns, in declaration order
    pub columns: Vec<ColumnSpec>,
    pub supports: SupportsSpec,
    pub constraints: ConstraintsSpec,
}

#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize, JsonSchema)]
pub struct ColumnSpec {
    pub name: String,
    pub r#type: ColumnType,
    pub sortable: bool,
    /// The filter operators accepted for this column
    #[serde(rename = "filterOps")]
    pub filter_ops: Vec<FilterOperator>,
    /// Allowed values, for enum columns
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub values: Vec<String>,
    /// Unit, for number and currency columns
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub unit: Option<String>,
    /// Time bucket grains, for date and datetime columns
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub grains: Vec<TimeGrain>,
}

#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize, JsonSchema)]
#[serde(rename_all = "camelCase")]
pub struct SupportsSpec {
    pub sorting: bool,
    pub multi_sort: bool,
    pub pagination: PaginationSpec,
    pub aggregations: Vec<AggregateFunction>,
    pub group_by: bool,
    pub time_bucketing: bool,
}

#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize, JsonSchema)]
#[serde(rename_all = "camelCase")]
pub struct PaginationSpec {
    pub mode: PaginationMode,
    pub max_page_size: u32,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize, JsonSchema)]
#[serde(rename_all = "lowercase")]
pub enum PaginationMode {
    Cursor,
}

#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize, JsonSchema)]
#[serde(rename_all = "camelCase")]
pub struct ConstraintsSpec {
    pub max_select: u32,
    pub max_group_by: u32,
    pub max_aggregates: u32,
}
