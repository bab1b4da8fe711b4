//! Helpers for processing the Query and building the Plan.

use indexmap::IndexSet;

use dataquery_models as models;
use query_engine_metadata::metadata;

use super::error::{ColumnContext, Error};

/// Static information from the query and metadata.
pub struct Env<'a> {
    pub resource_name: &'a str,
    resource: &'a metadata::ResourceInfo,
    /// Every alias the select list declares, known up front so that window
    /// specs may refer to projections declared after them.
    select_aliases: IndexSet<String>,
    /// Whether any group-scoped aggregate exists in the select list. Only
    /// then do plain columns and time buckets become group keys.
    pub has_group_aggs: bool,
}

impl<'a> Env<'a> {
    /// Scan the select list once to gather what every projection's checks need
    /// to know about the others.
    pub fn new(
        resource_name: &'a str,
        resource: &'a metadata::ResourceInfo,
        select: &[models::Projection],
    ) -> Env<'a> {
        Env {
            resource_name,
            resource,
            select_aliases: select.iter().map(models::Projection::alias).collect(),
            has_group_aggs: select.iter().any(models::Projection::is_group_aggregate),
        }
    }

    /// Lookup a column in the resource.
    pub fn lookup_column(
        &self,
        column_name: &str,
        context: ColumnContext,
    ) -> Result<&'a metadata::ColumnInfo, Error> {
        self.resource
            .lookup_column(column_name)
            .ok_or_else(|| Error::ColumnNotFound {
                column: column_name.to_string(),
                context,
            })
    }

    /// Does this name refer to a resource column or to a projection alias?
    pub fn is_column_or_alias(&self, name: &str) -> bool {
        self.resource.lookup_column(name).is_some() || self.select_aliases.contains(name)
    }
}

/// Aliases collected while walking the select list, by classification.
#[derive(Debug, Default)]
pub struct Aliases {
    seen: IndexSet<String>,
    pub group_keys: Vec<String>,
    pub time_buckets: Vec<String>,
    pub agg_aliases: Vec<String>,
    pub window_agg_aliases: Vec<String>,
    pub projection_aliases: Vec<String>,
}

impl Aliases {
    /// Record a projection's alias. Returns false if it was already taken.
    pub fn declare(&mut self, alias: &str) -> bool {
        self.projection_aliases.push(alias.to_string());
        self.seen.insert(alias.to_string())
    }
}

/// Mutable state accumulated over a single validation.
#[derive(Debug, Default)]
pub struct State {
    pub errors: Vec<Error>,
    pub aliases: Aliases,
}

impl State {
    pub fn new() -> State {
        State::default()
    }

    pub fn report(&mut self, error: Error) {
        self.errors.push(error);
    }

    pub fn report_all(&mut self, errors: impl IntoIterator<Item = Error>) {
        self.errors.extend(errors);
    }
}
