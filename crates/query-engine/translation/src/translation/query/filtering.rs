//! Check filters against the per-type operator allow-list.

use dataquery_models as models;

use crate::translation::error::{ColumnContext, Error};
use crate::translation::helpers::{Env, State};

/// Every filter must name a known column and use an operator its type allows.
pub fn check_filters(env: &Env, state: &mut State, filters: &[models::Filter]) {
    for filter in filters {
        let column = filter.column();
        let info = match env.lookup_column(column, ColumnContext::Filter) {
            Ok(info) => info,
            Err(err) => {
                state.report(err);
                continue;
            }
        };

        let operator = filter.operator();
        if !info.r#type.allows(operator) {
            state.report(Error::OperatorNotAllowed {
                operator,
                column_type: info.r#type,
                column: column.to_string(),
            });
        }
    }
}
