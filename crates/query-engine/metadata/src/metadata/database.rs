//! Metadata information regarding the resources and their columns.

use std::collections::BTreeMap;
use std::fmt;

use enum_iterator::Sequence;
use indexmap::IndexMap;
use schemars::JsonSchema;
use serde::{Deserialize, Serialize};

/// The column types supported by the engine.
#[derive(
    Debug,
    Clone,
    Copy,
    PartialEq,
    Eq,
    PartialOrd,
    Ord,
    Hash,
    Sequence,
    Serialize,
    Deserialize,
    JsonSchema,
)]
#[serde(rename_all = "lowercase")]
pub enum ColumnType {
    Text,
    Enum,
    Number,
    Currency,
    Date,
    Datetime,
}

impl ColumnType {
    const TEXT_OPERATORS: &'static [FilterOperator] = &[
        FilterOperator::Contains,
        FilterOperator::StartsWith,
        FilterOperator::Equals,
        FilterOperator::In,
    ];

    const ENUM_OPERATORS: &'static [FilterOperator] = &[FilterOperator::In, FilterOperator::NotIn];

    const NUMERIC_OPERATORS: &'static [FilterOperator] = &[
        FilterOperator::LessThan,
        FilterOperator::LessThanOrEqualTo,
        FilterOperator::EqualTo,
        FilterOperator::GreaterThanOrEqualTo,
        FilterOperator::GreaterThan,
        FilterOperator::Between,
    ];

    const TEMPORAL_OPERATORS: &'static [FilterOperator] = &[
        FilterOperator::On,
        FilterOperator::Before,
        FilterOperator::After,
        FilterOperator::Between,
    ];

    /// Returns the complete, ordered set of filter operators for the given type.
    /// Both query validation and discovery read this table.
    pub fn filter_operators(&self) -> &'static [FilterOperator] {
        match self {
            ColumnType::Text => Self::TEXT_OPERATORS,
            ColumnType::Enum => Self::ENUM_OPERATORS,
            ColumnType::Number | ColumnType::Currency => Self::NUMERIC_OPERATORS,
            ColumnType::Date | ColumnType::Datetime => Self::TEMPORAL_OPERATORS,
        }
    }

    /// Can a filter using this operator be applied to a column of this type?
    pub fn allows(&self, operator: FilterOperator) -> bool {
        self.filter_operators().contains(&operator)
    }

    /// Numeric columns can be summed, averaged and so on.
    pub fn is_numeric(&self) -> bool {
        matches!(self, ColumnType::Number | ColumnType::Currency)
    }

    /// Temporal columns can be bucketed by a time grain.
    pub fn is_temporal(&self) -> bool {
        matches!(self, ColumnType::Date | ColumnType::Datetime)
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            ColumnType::Text => "text",
            ColumnType::Enum => "enum",
            ColumnType::Number => "number",
            ColumnType::Currency => "currency",
            ColumnType::Date => "date",
            ColumnType::Datetime => "datetime",
        }
    }
}

impl fmt::Display for ColumnType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// The complete list of supported filter operators.
/// Not all of these are supported for every column type.
///
/// The serialized names are part of the public request format.
#[derive(
    Debug,
    Clone,
    Copy,
    PartialEq,
    Eq,
    PartialOrd,
    Ord,
    Hash,
    Sequence,
    Serialize,
    Deserialize,
    JsonSchema,
)]
pub enum FilterOperator {
    #[serde(rename = "contains")]
    Contains,
    #[serde(rename = "startsWith")]
    StartsWith,
    #[serde(rename = "equals")]
    Equals,
    #[serde(rename = "in")]
    In,
    #[serde(rename = "notIn")]
    NotIn,
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
    #[serde(rename = "on")]
    On,
    #[serde(rename = "before")]
    Before,
    #[serde(rename = "after")]
    After,
}

impl FilterOperator {
    /// The name of the operator as it appears in requests.
    pub fn name(&self) -> &'static str {
        match self {
            Self::Contains => "contains",
            Self::StartsWith => "startsWith",
            Self::Equals => "equals",
            Self::In => "in",
            Self::NotIn => "notIn",
            Self::LessThan => "<",
            Self::LessThanOrEqualTo => "<=",
            Self::EqualTo => "=",
            Self::GreaterThanOrEqualTo => ">=",
            Self::GreaterThan => ">",
            Self::Between => "between",
            Self::On => "on",
            Self::Before => "before",
            Self::After => "after",
        }
    }
}

impl fmt::Display for FilterOperator {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// Granularity of a time bucket.
#[derive(
    Debug,
    Clone,
    Copy,
    PartialEq,
    Eq,
    PartialOrd,
    Ord,
    Hash,
    Sequence,
    Serialize,
    Deserialize,
    JsonSchema,
)]
pub enum TimeGrain {
    #[serde(rename = "1h")]
    Hour,
    #[serde(rename = "1d")]
    Day,
    #[serde(rename = "1w")]
    Week,
    #[serde(rename = "1m")]
    Month,
}

impl TimeGrain {
    pub fn as_str(&self) -> &'static str {
        match self {
            TimeGrain::Hour => "1h",
            TimeGrain::Day => "1d",
            TimeGrain::Week => "1w",
            TimeGrain::Month => "1m",
        }
    }
}

impl fmt::Display for TimeGrain {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// All supported aggregate functions.
#[derive(
    Debug,
    Clone,
    Copy,
    PartialEq,
    Eq,
    PartialOrd,
    Ord,
    Hash,
    Sequence,
    Serialize,
    Deserialize,
    JsonSchema,
)]
#[serde(rename_all = "snake_case")]
pub enum AggregateFunction {
    Count,
    DistinctCount,
    Sum,
    Avg,
    Min,
    Max,
    Median,
    Percentile,
}

impl AggregateFunction {
    pub fn name(&self) -> &'static str {
        match self {
            Self::Count => "count",
            Self::DistinctCount => "distinct_count",
            Self::Sum => "sum",
            Self::Avg => "avg",
            Self::Min => "min",
            Self::Max => "max",
            Self::Median => "median",
            Self::Percentile => "percentile",
        }
    }

    /// Functions which only make sense over number or currency columns.
    pub fn requires_numeric_column(&self) -> bool {
        !matches!(self, Self::Count | Self::DistinctCount)
    }
}

impl fmt::Display for AggregateFunction {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// Mapping from a resource name to its information.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize, JsonSchema)]
pub struct ResourcesInfo(pub BTreeMap<String, ResourceInfo>);

impl ResourcesInfo {
    pub fn empty() -> Self {
        ResourcesInfo(BTreeMap::new())
    }
}

/// Information about a resource: its columns, in declaration order.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, JsonSchema)]
pub struct ResourceInfo {
    pub columns: IndexMap<String, ColumnInfo>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
}

impl ResourceInfo {
    pub fn lookup_column(&self, column_name: &str) -> Option<&ColumnInfo> {
        self.columns.get(column_name)
    }
}

/// Information about a column.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, JsonSchema)]
pub struct ColumnInfo {
    pub r#type: ColumnType,
    /// Whether numeric aggregates (sum, avg, ...) may be computed over this column.
    /// `count` and `distinct_count` ignore it.
    #[serde(default = "aggregatable_default")]
    pub aggregatable: bool,
    #[serde(default = "sortable_default")]
    pub sortable: bool,
    /// The allowed values of an enum column.
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub values: Vec<String>,
    /// Unit of a number or currency column.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub unit: Option<String>,
}

fn aggregatable_default() -> bool {
    true
}

fn sortable_default() -> bool {
    true
}

impl ColumnInfo {
    pub fn new(r#type: ColumnType, aggregatable: bool) -> Self {
        ColumnInfo {
            r#type,
            aggregatable,
            sortable: true,
            values: vec![],
            unit: None,
        }
    }
}
