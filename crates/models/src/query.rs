//! The query DSL, as sent by clients.
//!
//! Every value here is decoded from untrusted input. Decoding only checks
//! shape; whether a query makes sense against a resource is decided by the
//! validator.

use schemars::JsonSchema;
use serde::{Deserialize, Serialize};

pub use query_engine_metadata::metadata::{AggregateFunction, FilterOperator, TimeGrain};

/// Page size used when the request does not specify one.
pub const DEFAULT_PAGE_LIMIT: i64 = 50;

/// This is the request body of the data endpoint.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize, JsonSchema)]
pub struct Query {
    /// The resource to query
    pub data_source: String,
    /// The output columns, in order
    pub select: Vec<Projection>,
    /// Row filters, all of which must hold
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub filters: Option<Vec<Filter>>,
    /// Sort keys, in priority order
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub sort: Option<Vec<SortKey>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub page: Option<Page>,
}

/// One output column of a query.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize, JsonSchema)]
#[serde(tag = "expr", rename_all = "snake_case")]
pub enum Projection {
    /// A raw column
    Col {
        name: String,
        #[serde(rename = "as", default, skip_serializing_if = "Option::is_none")]
        alias: Option<String>,
    },
    /// A date or datetime column truncated to a time grain
    TimeBucket {
        column: String,
        grain: TimeGrain,
        #[serde(rename = "as", default, skip_serializing_if = "Option::is_none")]
        alias: Option<String>,
    },
    /// An aggregate over a column, or over rows for `count`
    Agg(Aggregate),
}

impl Projection {
    /// The output name of this projection: the explicit `as` if given,
    /// otherwise a name derived from the expression.
    pub fn alias(&self) -> String {
        match self {
            Projection::Col { name, alias } => alias.clone().unwrap_or_else(|| name.clone()),
            Projection::TimeBucket {
                column,
                grain,
                alias,
            } => alias.clone().unwrap_or_else(|| format!("{column}@{grain}")),
            Projection::Agg(aggregate) => aggregate.alias(),
        }
    }

    /// Is this an aggregate computed with GROUP BY semantics?
    pub fn is_group_aggregate(&self) -> bool {
        matches!(
            self,
            Projection::Agg(Aggregate {
                scope: Scope::Group,
                ..
            })
        )
    }
}

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize, JsonSchema)]
pub struct Aggregate {
    #[serde(rename = "fn")]
    pub function: AggregateFunction,
    /// The column to aggregate. Absent for `count`.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub column: Option<String>,
    /// The percentile to compute, for `percentile` only
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub p: Option<f64>,
    #[serde(default)]
    pub scope: Scope,
    /// Required when `scope` is `window`
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub window: Option<WindowSpec>,
    #[serde(rename = "as", default, skip_serializing_if = "Option::is_none")]
    pub alias: Option<String>,
}

impl Aggregate {
    pub fn alias(&self) -> String {
        match (&self.alias, &self.column) {
            (Some(alias), _) => alias.clone(),
            (None, Some(column)) => format!("{}_{column}", self.function),
            (None, None) => self.function.to_string(),
        }
    }

    /// The requested percentile as a fraction in `(0, 1]`.
    ///
    /// `p` up to and including 1 is already a fraction, so `p = 1` is the
    /// 100th percentile. Anything above 1 is a percentage.
    pub fn percentile_fraction(&self) -> Option<f64> {
        self.p.map(|p| if p <= 1.0 { p } else { p / 100.0 })
    }
}

/// Whether an aggregate collapses rows into groups or is computed over a window.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize, JsonSchema)]
#[serde(rename_all = "lowercase")]
pub enum Scope {
    #[default]
    Group,
    Window,
}

#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize, JsonSchema)]
pub struct WindowSpec {
    /// Column names or aliases to partition by
    #[serde(rename = "partitionBy", default)]
    pub partition_by: Vec<String>,
    /// Column names or aliases to order each partition by
    #[serde(rename = "orderBy", default)]
    pub order_by: Vec<String>,
    #[serde(default)]
    pub frame: WindowFrame,
}

/// A rows-based window frame around the current row.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize, JsonSchema)]
pub struct WindowFrame {
    #[serde(default)]
    pub r#type: FrameType,
    #[serde(default)]
    pub preceding: u32,
    #[serde(default)]
    pub following: u32,
}

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize, JsonSchema)]
#[serde(rename_all = "lowercase")]
pub enum FrameType {
    #[default]
    Rows,
}

/// A predicate over a single column.
///
/// Filters carry no discriminator on the wire: the variant is chosen by the
/// shape of `op` and `value`.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize, JsonSchema)]
#[serde(untagged)]
pub enum Filter {
    Text(TextFilter),
    Enum(EnumFilter),
    Numeric(NumericFilter),
    Date(DateFilter),
}

impl Filter {
    pub fn column(&self) -> &str {
        match self {
            Filter::Text(TextFilter { column, .. })
            | Filter::Enum(EnumFilter { column, .. })
            | Filter::Numeric(NumericFilter { column, .. })
            | Filter::Date(DateFilter { column, .. }) => column,
        }
    }

    pub fn operator(&self) -> FilterOperator {
        match self {
            Filter::Text(filter) => filter.op.into(),
            Filter::Enum(filter) => filter.op.into(),
            Filter::Numeric(filter) => filter.op.into(),
            Filter::Date(filter) => filter.op.into(),
        }
    }
}

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize, JsonSchema)]
pub struct TextFilter {
    pub column: String,
    pub op: TextOperator,
    pub value: TextValue,
    #[serde(rename = "caseSensitive", default)]
    pub case_sensitive: bool,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize, JsonSchema)]
pub enum TextOperator {
    #[serde(rename = "contains")]
    Contains,
    #[serde(rename = "startsWith")]
    StartsWith,
    #[serde(rename = "equals")]
    Equals,
    #[serde(rename = "in")]
    In,
}

impl From<TextOperator> for FilterOperator {
    fn from(value: TextOperator) -> Self {
        match value {
            TextOperator::Contains => FilterOperator::Contains,
            TextOperator::StartsWith => FilterOperator::StartsWith,
            TextOperator::Equals => FilterOperator::Equals,
            TextOperator::In => FilterOperator::In,
        }
    }
}

#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize, JsonSchema)]
#[serde(untagged)]
pub enum TextValue {
    Single(String),
    List(Vec<String>),
}

#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize, JsonSchema)]
pub struct EnumFilter {
    pub column: String,
    pub op: EnumOperator,
    pub value: Vec<String>,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize, JsonSchema)]
pub enum EnumOperator {
    #[serde(rename = "in")]
    In,
    #[serde(rename = "notIn")]
    NotIn,
}

impl From<EnumOperator> for FilterOperator {
    fn from(value: EnumOperator) -> Self {
        match value {
            EnumOperator::In => FilterOperator::In,
            EnumOperator::NotIn => FilterOperator::NotIn,
        }
    }
}

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize, JsonSchema)]
pub struct NumericFilter {
    pub column: String,
    pub op: NumericOperator,
    pub value: NumericValue,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize, JsonSchema)]
pub enum NumericOperator {
    #[serde(rename = "<")]
    LessThan,
    #[serde(rename = "<=")]
    LessThanOrEqualTo,
    #[serde(rename = "=")]
    EqualTo,
    #[serde(rename = ">=")]
    GreaterThanOrEqualTo,
    #[serde(rename = ">")]
    GreaterThan,
    #[serde(rename = "between")]
    Between,
}

impl From<NumericOperator> for FilterOperator {
    fn from(value: NumericOperator) -> Self {
        match value {
            NumericOperator::LessThan => FilterOperator::LessThan,
            NumericOperator::LessThanOrEqualTo => FilterOperator::LessThanOrEqualTo,
            NumericOperator::EqualTo => FilterOperator::EqualTo,
            NumericOperator::GreaterThanOrEqualTo => FilterOperator::GreaterThanOrEqualTo,
            NumericOperator::GreaterThan => FilterOperator::GreaterThan,
            NumericOperator::Between => FilterOperator::Between,
        }
    }
}

/// A single number, or a `[low, high]` pair for `between`.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize, JsonSchema)]
#[serde(untagged)]
pub enum NumericValue {
    Single(f64),
    Range(f64, f64),
}

#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize, JsonSchema)]
pub struct DateFilter {
    pub column: String,
    pub op: DateOperator,
    pub value: DateValue,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize, JsonSchema)]
#[serde(rename_all = "lowercase")]
pub enum DateOperator {
    On,
    Before,
    After,
    Between,
}

impl From<DateOperator> for FilterOperator {
    fn from(value: DateOperator) -> Self {
        match value {
            DateOperator::On => FilterOperator::On,
            DateOperator::Before => FilterOperator::Before,
            DateOperator::After => FilterOperator::After,
            DateOperator::Between => FilterOperator::Between,
        }
    }
}

/// An ISO-8601 date or datetime, or a `[start, end]` pair for `between`.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize, JsonSchema)]
#[serde(untagged)]
pub enum DateValue {
    Single(String),
    Range(String, String),
}

#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize, JsonSchema)]
pub struct SortKey {
    /// A projection alias or a selected column name
    pub by: String,
    #[serde(default)]
    pub dir: OrderDirection,
}

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize, JsonSchema)]
#[serde(rename_all = "lowercase")]
pub enum OrderDirection {
    #[default]
    Asc,
    Desc,
}

#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize, JsonSchema)]
pub struct Page {
    #[serde(default = "default_page_limit")]
    pub limit: i64,
    /// Opaque continuation token issued by the executor
    #[serde(default)]
    pub cursor: Option<String>,
}

fn default_page_limit() -> i64 {
    DEFAULT_PAGE_LIMIT
}

impl Default for Page {
    fn default() -> Self {
        Page {
            limit: DEFAULT_PAGE_LIMIT,
            cursor: None,
        }
    }
}

#[cfg(test)]
mod tests {
    use serde_json::json;
    use similar_asserts::assert_eq;

    use super::*;

    #[test]
    fn test_decode_request_example() {
        let query: Query = serde_json::from_value(json!({
            "data_source": "companies",
            "select": [
                {"expr": "col", "name": "sector", "as": "sector"},
                {"expr": "agg", "fn": "avg", "column": "share_price", "as": "avg_price"}
            ],
            "filters": [{"column": "sector", "op": "in", "value": ["Technology"]}],
            "sort": [{"by": "avg_price", "dir": "desc"}],
            "page": {"limit": 50, "cursor": null}
        }))
        .unwrap();

        assert_eq!(query.select.len(), 2);
        assert_eq!(query.select[1].alias(), "avg_price");
        assert!(query.select[1].is_group_aggregate());
        assert_eq!(
            query.filters.as_ref().unwrap()[0].operator(),
            FilterOperator::In
        );
        assert_eq!(
            query.sort,
            Some(vec![SortKey {
                by: "avg_price".into(),
                dir: OrderDirection::Desc,
            }])
        );
        assert_eq!(query.page, Some(Page::default()));
    }

    #[test]
    fn test_default_aliases() {
        let select: Vec<Projection> = serde_json::from_value(json!([
            {"expr": "col", "name": "ticker"},
            {"expr": "time_bucket", "column": "as_of", "grain": "1w"},
            {"expr": "agg", "fn": "count"},
            {"expr": "agg", "fn": "sum", "column": "volume"},
            {"expr": "agg", "fn": "distinct_count", "column": "ticker", "as": "tickers"}
        ]))
        .unwrap();

        let aliases: Vec<String> = select.iter().map(Projection::alias).collect();
        assert_eq!(
            aliases,
            vec!["ticker", "as_of@1w", "count", "sum_volume", "tickers"]
        );
    }

    #[test]
    fn test_filter_variant_chosen_by_shape() {
        let filters: Vec<Filter> = serde_json::from_value(json!([
            {"column": "name", "op": "contains", "value": "Corp", "caseSensitive": true},
            {"column": "sector", "op": "notIn", "value": ["Energy"]},
            {"column": "share_price", "op": "between", "value": [10, 20]},
            {"column": "as_of", "op": "between", "value": ["2024-01-01", "2024-02-01"]},
            {"column": "volume", "op": ">=", "value": 1000}
        ]))
        .unwrap();

        assert!(matches!(
            &filters[0],
            Filter::Text(TextFilter {
                case_sensitive: true,
                ..
            })
        ));
        assert!(matches!(&filters[1], Filter::Enum(_)));
        assert_eq!(
            filters[2],
            Filter::Numeric(NumericFilter {
                column: "share_price".into(),
                op: NumericOperator::Between,
                value: NumericValue::Range(10.0, 20.0),
            })
        );
        assert!(matches!(
            &filters[3],
            Filter::Date(DateFilter {
                op: DateOperator::Between,
                value: DateValue::Range(_, _),
                ..
            })
        ));
        assert_eq!(filters[4].operator(), FilterOperator::GreaterThanOrEqualTo);
    }

    #[test]
    fn test_filter_with_no_matching_shape_is_a_decode_error() {
        let result = serde_json::from_value::<Filter>(json!(
            {"column": "as_of", "op": "on", "value": 12}
        ));
        assert!(result.is_err());
    }

    #[test]
    fn test_window_defaults() {
        let projection: Projection = serde_json::from_value(json!({
            "expr": "agg",
            "fn": "sum",
            "column": "open",
            "scope": "window",
            "window": {"partitionBy": ["ticker"], "orderBy": ["as_of"]}
        }))
        .unwrap();

        let Projection::Agg(aggregate) = projection else {
            panic!("expected an aggregate");
        };
        assert_eq!(aggregate.scope, Scope::Window);
        assert_eq!(
            aggregate.window.unwrap().frame,
            WindowFrame {
                r#type: FrameType::Rows,
                preceding: 0,
                following: 0,
            }
        );
    }

    #[test]
    fn test_percentile_fraction() {
        let mut aggregate = Aggregate {
            function: AggregateFunction::Percentile,
            column: Some("share_price".into()),
            p: Some(95.0),
            scope: Scope::Group,
            window: None,
            alias: None,
        };
        assert_eq!(aggregate.percentile_fraction(), Some(0.95));

        aggregate.p = Some(0.9);
        assert_eq!(aggregate.percentile_fraction(), Some(0.9));

        aggregate.p = Some(1.0);
        assert_eq!(aggregate.percentile_fraction(), Some(1.0));
    }
}
