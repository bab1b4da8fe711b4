//! Wire types of the query DSL: the request a client sends, the plan the
//! validator hands to an executor, the structured errors returned when a
//! request is rejected, and the discovery document describing a resource.

pub mod error;
pub mod options;
pub mod plan;
pub mod query;
pub mod response;

pub use error::{ErrorCode, ErrorItem, ErrorResponse};
pub use options::{
    ColumnSpec, ConstraintsSpec, OptionsResponse, PaginationMode, PaginationSpec, SupportsSpec,
};
pub use plan::Plan;
pub use query::*;
pub use response::{DataResponse, Meta, Row};
