//! The response envelope produced by an executor.

use indexmap::IndexMap;
use schemars::JsonSchema;
use serde::{Deserialize, Serialize};

use crate::plan::Plan;

/// One result row, keyed by projection alias in select order.
pub type Row = IndexMap<String, serde_json::Value>;

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize, JsonSchema)]
pub struct DataResponse {
    pub data: Vec<Row>,
    pub meta: Meta,
}

#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize, JsonSchema)]
pub struct Meta {
    /// The resource that was queried
    pub resource: String,
    /// The projected columns, in select order
    pub columns: Vec<String>,
    /// Token to fetch the next page, if there is one
    #[serde(rename = "nextCursor")]
    pub next_cursor: Option<String>,
}

impl Meta {
    /// Echo the resource and projected columns of a plan.
    pub fn for_plan(plan: &Plan, next_cursor: Option<String>) -> Self {
        Meta {
            resource: plan.data_source.clone(),
            columns: plan.projection_aliases.clone(),
            next_cursor,
        }
    }
}
