//! Translate an incoming `Query`.

pub mod aggregates;
pub mod filtering;
pub mod paging;
pub mod projections;
pub mod sorting;

use dataquery_models as models;
use query_engine_metadata::metadata;

use crate::translation::error::Error;
use crate::translation::helpers::{Env, State};

/// Validate the incoming Query against the registry and produce a Plan.
///
/// Every violation found is reported, in discovery order: projections first,
/// then filters, sort keys and the page limit. Only an unknown resource or
/// an empty select list stop validation early, since nothing further can be
/// checked without them.
pub fn translate(
    metadata: &metadata::Metadata,
    query: &models::Query,
) -> Result<models::Plan, models::ErrorResponse> {
    let Some(resource) = metadata.lookup(&query.data_source) else {
        return Err(reject(Error::UnknownResource(query.data_source.clone())));
    };

    if query.select.is_empty() {
        return Err(reject(Error::EmptySelect));
    }

    let env = Env::new(&query.data_source, resource, &query.select);
    let mut state = State::new();

    for projection in &query.select {
        projections::translate_projection(&env, &mut state, projection);
    }

    if let Some(filters) = &query.filters {
        filtering::check_filters(&env, &mut state, filters);
    }

    if let Some(sort) = &query.sort {
        sorting::check_sort(&mut state, &query.select, sort);
    }

    // the placeholder is never seen: a bad limit is always reported
    let page_limit = paging::translate_page_limit(query.page.as_ref()).unwrap_or_else(|error| {
        state.report(error);
        0
    });

    let State { errors, aliases } = state;

    if let Some(response) =
        models::ErrorResponse::from_items(errors.into_iter().map(Into::into).collect())
    {
        tracing::debug!(
            resource = env.resource_name,
            errors = response.error.len(),
            "query rejected"
        );
        return Err(response);
    }

    let plan = models::Plan {
        data_source: query.data_source.clone(),
        group: env.has_group_aggs,
        group_keys: aliases.group_keys,
        time_buckets: aliases.time_buckets,
        agg_aliases: aliases.agg_aliases,
        window_agg_aliases: aliases.window_agg_aliases,
        projection_aliases: aliases.projection_aliases,
        order_by: query.sort.clone().unwrap_or_default(),
        page_limit,
    };
    tracing::debug!(?plan, "query validated");
    Ok(plan)
}

fn reject(error: Error) -> models::ErrorResponse {
    models::ErrorResponse::single(error.into())
}
