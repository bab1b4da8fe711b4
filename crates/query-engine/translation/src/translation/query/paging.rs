//! Resolve the page size.

use dataquery_models as models;

use crate::translation::error::Error;

/// The largest page a query may request.
pub const MAX_PAGE_LIMIT: u32 = 1000;

/// The requested limit, or the default when no page is given.
pub fn translate_page_limit(page: Option<&models::Page>) -> Result<u32, Error> {
    let limit = page.map_or(models::DEFAULT_PAGE_LIMIT, |page| page.limit);
    match u32::try_from(limit) {
        Ok(page_limit) if page_limit > 0 && page_limit <= MAX_PAGE_LIMIT => Ok(page_limit),
        _ => Err(Error::LimitOutOfRange {
            limit,
            max: MAX_PAGE_LIMIT,
        }),
    }
}
