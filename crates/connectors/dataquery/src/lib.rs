pub mod connector;
pub mod executor;
pub mod metrics;
pub mod query;
pub mod schema;
pub mod state;

pub use connector::{DataQuery, SetupError};
pub use executor::{ExecutionError, Executor};
pub use query::QueryError;
pub use schema::SchemaError;
