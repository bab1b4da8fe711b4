//! Configuration for the connector.

use query_engine_metadata::metadata;

use crate::error::MakeRuntimeConfigurationError;
use crate::version1::{Constraints, ParsedConfiguration};

/// The 'Configuration' type collects all the information necessary to serve queries at runtime.
///
/// Values of this type are produced from a 'ParsedConfiguration' using
/// 'make_runtime_configuration', and are never mutated afterwards.
#[derive(Debug, Clone, PartialEq)]
pub struct Configuration {
    pub metadata: metadata::Metadata,
    pub constraints: Constraints,
}

/// Check a parsed configuration and turn it into a runtime one.
pub fn make_runtime_configuration(
    parsed_config: ParsedConfiguration,
) -> Result<Configuration, MakeRuntimeConfigurationError> {
    for (resource, info) in &parsed_config.metadata.resources.0 {
        if info.columns.is_empty() {
            return Err(MakeRuntimeConfigurationError::ResourceWithoutColumns {
                resource: resource.clone(),
            });
        }
    }

    let constraints = parsed_config.constraints;
    for (name, value) in [
        ("maxSelect", constraints.max_select),
        ("maxGroupBy", constraints.max_group_by),
        ("maxAggregates", constraints.max_aggregates),
    ] {
        if value == 0 {
            return Err(MakeRuntimeConfigurationError::NonPositiveConstraint { name });
        }
    }

    Ok(Configuration {
        metadata: parsed_config.metadata,
        constraints,
    })
}

#[cfg(test)]
mod tests {
    use indexmap::IndexMap;

    use super::*;

    #[test]
    fn test_initial_configuration_is_valid() {
        let configuration = make_runtime_configuration(ParsedConfiguration::initial()).unwrap();
        assert!(configuration.metadata.lookup("companies").is_some());
        assert!(configuration.metadata.lookup("stock_prices").is_some());
        assert_eq!(configuration.constraints, Constraints::default());
    }

    #[test]
    fn test_resource_without_columns_is_rejected() {
        let mut parsed = ParsedConfiguration::empty();
        parsed.metadata.resources.0.insert(
            "empty".into(),
            metadata::ResourceInfo {
                columns: IndexMap::new(),
                description: None,
            },
        );
        assert_eq!(
            make_runtime_configuration(parsed),
            Err(MakeRuntimeConfigurationError::ResourceWithoutColumns {
                resource: "empty".into()
            })
        );
    }

    #[test]
    fn test_zero_constraint_is_rejected() {
        let mut parsed = ParsedConfiguration::initial();
        parsed.constraints.max_group_by = 0;
        assert_eq!(
            make_runtime_configuration(parsed),
            Err(MakeRuntimeConfigurationError::NonPositiveConstraint { name: "maxGroupBy" })
        );
    }
}
