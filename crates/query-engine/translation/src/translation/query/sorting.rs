//! Resolve sort keys against what the query selects.

use indexmap::IndexSet;

use dataquery_models as models;

use crate::translation::error::Error;
use crate::translation::helpers::State;

/// A sort key may name any projection alias, the raw name of a selected
/// column, a group key or an aggregate alias.
pub fn check_sort(state: &mut State, select: &[models::Projection], sort: &[models::SortKey]) {
    let aliases = &state.aliases;
    let targets: IndexSet<&str> = aliases
        .projection_aliases
        .iter()
        .map(String::as_str)
        .chain(select.iter().filter_map(|projection| match projection {
            models::Projection::Col { name, .. } => Some(name.as_str()),
            models::Projection::TimeBucket { .. } | models::Projection::Agg(_) => None,
        }))
        .chain(aliases.group_keys.iter().map(String::as_str))
        .chain(aliases.agg_aliases.iter().map(String::as_str))
        .collect();

    let unresolved: Vec<Error> = sort
        .iter()
        .filter(|key| !targets.contains(key.by.as_str()))
        .map(|key| Error::UnresolvedSortKey(key.by.clone()))
        .collect();
    state.report_all(unresolved);
}
