//! Metadata information regarding the queryable resources.

pub mod database;

// re-export without modules
pub use database::*;
use schemars::JsonSchema;
use serde::{Deserialize, Serialize};

/// The resource registry: every resource a query may name, and its columns.
///
/// Built once at startup and never mutated afterwards.
#[derive(Clone, PartialEq, Debug, Default, Serialize, Deserialize, JsonSchema)]
pub struct Metadata {
    pub resources: ResourcesInfo,
}

impl Metadata {
    pub fn empty() -> Self {
        Metadata {
            resources: ResourcesInfo::empty(),
        }
    }

    /// Look up a resource by name.
    pub fn lookup(&self, resource_name: &str) -> Option<&ResourceInfo> {
        self.resources.0.get(resource_name)
    }
}
