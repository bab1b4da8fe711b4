//! The version 1 configuration format: the resource registry and the
//! advertised query constraints.

use std::path::Path;

use indexmap::IndexMap;
use schemars::JsonSchema;
use serde::{Deserialize, Serialize};
use tokio::fs;

use query_engine_metadata::metadata::{self, ColumnInfo, ColumnType, ResourceInfo, ResourcesInfo};

use crate::error::{ParseConfigurationError, WriteParsedConfigurationError};

pub const CURRENT_VERSION: u32 = 1;
pub const CONFIGURATION_FILENAME: &str = "configuration.json";
pub const CONFIGURATION_JSONSCHEMA_FILENAME: &str = "schema.json";

/// The configuration as it is stored on disk.
#[derive(Debug, Clone, PartialEq, Deserialize, Serialize, JsonSchema)]
pub struct ParsedConfiguration {
    /// Which version of the configuration format are we using
    pub version: u32,
    #[serde(default)]
    pub metadata: metadata::Metadata,
    #[serde(default)]
    pub constraints: Constraints,
}

/// Ceilings advertised to clients through discovery.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize, Serialize, JsonSchema)]
#[serde(rename_all = "camelCase")]
pub struct Constraints {
    pub max_select: u32,
    pub max_group_by: u32,
    pub max_aggregates: u32,
}

impl Default for Constraints {
    fn default() -> Self {
        Constraints {
            max_select: 50,
            max_group_by: 4,
            max_aggregates: 8,
        }
    }
}

impl ParsedConfiguration {
    /// A configuration with no resources.
    pub fn empty() -> Self {
        ParsedConfiguration {
            version: CURRENT_VERSION,
            metadata: metadata::Metadata::empty(),
            constraints: Constraints::default(),
        }
    }

    /// The configuration written by `initialize`: the `companies` and
    /// `stock_prices` resources.
    pub fn initial() -> Self {
        let mut resources = ResourcesInfo::empty();
        resources.0.insert("companies".to_string(), companies());
        resources.0.insert("stock_prices".to_string(), stock_prices());
        ParsedConfiguration {
            metadata: metadata::Metadata { resources },
            ..ParsedConfiguration::empty()
        }
    }
}

fn companies() -> ResourceInfo {
    let mut columns = IndexMap::new();
    columns.insert("name".into(), ColumnInfo::new(ColumnType::Text, false));
    columns.insert("ticker".into(), ColumnInfo::new(ColumnType::Text, false));
    columns.insert(
        "sector".into(),
        ColumnInfo {
            values: ["Technology", "Energy", "Healthcare", "Financials"]
                .map(String::from)
                .to_vec(),
            ..ColumnInfo::new(ColumnType::Enum, false)
        },
    );
    columns.insert(
        "share_price".into(),
        ColumnInfo {
            unit: Some("USD".into()),
            ..ColumnInfo::new(ColumnType::Currency, true)
        },
    );
    columns.insert(
        "website".into(),
        ColumnInfo {
            sortable: false,
            ..ColumnInfo::new(ColumnType::Text, false)
        },
    );
    columns.insert("as_of".into(), ColumnInfo::new(ColumnType::Datetime, false));
    ResourceInfo {
        columns,
        description: Some("Listed companies and their latest share price".into()),
    }
}

fn stock_prices() -> ResourceInfo {
    let currency = || ColumnInfo {
        unit: Some("USD".into()),
        ..ColumnInfo::new(ColumnType::Currency, true)
    };
    let mut columns = IndexMap::new();
    columns.insert("ticker".into(), ColumnInfo::new(ColumnType::Text, false));
    columns.insert("open".into(), currency());
    columns.insert("close".into(), currency());
    columns.insert("max".into(), currency());
    columns.insert("min".into(), currency());
    columns.insert("volume".into(), ColumnInfo::new(ColumnType::Number, true));
    columns.insert("as_of".into(), ColumnInfo::new(ColumnType::Datetime, false));
    ResourceInfo {
        columns,
        description: Some("Daily prices per ticker".into()),
    }
}

/// Parse the configuration format from a directory.
pub async fn parse_configuration(
    configuration_dir: impl AsRef<Path>,
) -> Result<ParsedConfiguration, ParseConfigurationError> {
    let configuration_file = configuration_dir.as_ref().join(CONFIGURATION_FILENAME);

    let configuration_file_contents = fs::read_to_string(&configuration_file)
        .await
        .map_err(|inner| ParseConfigurationError::IoError {
            file_path: configuration_file.clone(),
            inner,
        })?;

    let parsed_config: ParsedConfiguration = serde_json::from_str(&configuration_file_contents)
        .map_err(|error| ParseConfigurationError::ParseError {
            file_path: configuration_file.clone(),
            line: error.line(),
            column: error.column(),
            message: error.to_string(),
        })?;

    if parsed_config.version != CURRENT_VERSION {
        return Err(ParseConfigurationError::UnsupportedVersion {
            file_path: configuration_file,
            version: parsed_config.version,
            expected: CURRENT_VERSION,
        });
    }

    tracing::debug!(
        resources = parsed_config.metadata.resources.0.len(),
        "parsed configuration"
    );

    Ok(parsed_config)
}

/// Write the parsed configuration into a directory on disk, along with the
/// JSON schema of its format.
pub async fn write_parsed_configuration(
    parsed_config: ParsedConfiguration,
    out_dir: impl AsRef<Path>,
) -> Result<(), WriteParsedConfigurationError> {
    let configuration_file = out_dir.as_ref().to_owned().join(CONFIGURATION_FILENAME);
    fs::create_dir_all(out_dir.as_ref()).await?;

    // create the configuration file
    fs::write(
        configuration_file,
        serde_json::to_string_pretty(&parsed_config)? + "\n",
    )
    .await?;

    // create the jsonschema file
    let configuration_jsonschema_file_path = out_dir
        .as_ref()
        .to_owned()
        .join(CONFIGURATION_JSONSCHEMA_FILENAME);

    let output = schemars::schema_for!(ParsedConfiguration);
    fs::write(
        &configuration_jsonschema_file_path,
        serde_json::to_string_pretty(&output)? + "\n",
    )
    .await?;

    Ok(())
}
