//! The validated, normalized description of a query.

use schemars::JsonSchema;
use serde::{Deserialize, Serialize};

use crate::query::SortKey;

/// The output of validation, handed to an executor together with the
/// original query (which still carries filter values, window specs and
/// the page cursor).
///
/// Every alias named here is a projection alias of the query; every column
/// the query references exists in the resource.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize, JsonSchema)]
pub struct Plan {
    pub data_source: String,
    /// Whether group-scoped aggregates exist, making this a GROUP BY query
    pub group: bool,
    /// Aliases to GROUP BY, in select order
    pub group_keys: Vec<String>,
    /// Aliases of time buckets
    pub time_buckets: Vec<String>,
    /// Aliases of all aggregates
    pub agg_aliases: Vec<String>,
    /// Aliases of window-scoped aggregates
    pub window_agg_aliases: Vec<String>,
    /// All aliases exposed, in select order
    pub projection_aliases: Vec<String>,
    pub order_by: Vec<SortKey>,
    pub page_limit: u32,
}
