//! Validate the select list and classify each projection's alias.

use dataquery_models as models;

use crate::translation::error::{ColumnContext, Error};
use crate::translation::helpers::{Env, State};

use super::aggregates;

/// Check one projection and record its alias in the matching plan lists.
///
/// The alias is recorded even when the projection is invalid, so that
/// later sort keys referring to it are not reported a second time.
pub fn translate_projection(env: &Env, state: &mut State, projection: &models::Projection) {
    let alias = projection.alias();
    if !state.aliases.declare(&alias) {
        state.report(Error::DuplicateAlias(alias.clone()));
    }

    match projection {
        models::Projection::Col { name, .. } => {
            if let Err(err) = env.lookup_column(name, ColumnContext::Select) {
                state.report(err);
            }
            if env.has_group_aggs {
                state.aliases.group_keys.push(alias);
            }
        }
        models::Projection::TimeBucket { column, .. } => {
            match env.lookup_column(column, ColumnContext::TimeBucket) {
                Ok(info) if !info.r#type.is_temporal() => {
                    state.report(Error::NotATimeColumn(column.clone()));
                }
                Ok(_) => {}
                Err(err) => state.report(err),
            }
            state.aliases.time_buckets.push(alias.clone());
            if env.has_group_aggs {
                state.aliases.group_keys.push(alias);
            }
        }
        models::Projection::Agg(aggregate) => {
            state.report_all(aggregates::check_aggregate(env, aggregate));
            if aggregate.scope == models::Scope::Window {
                state.aliases.window_agg_aliases.push(alias.clone());
            }
            state.aliases.agg_aliases.push(alias);
        }
    }
}
