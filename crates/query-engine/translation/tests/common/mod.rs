use std::fs;
use std::path::PathBuf;

use dataquery_configuration::{make_runtime_configuration, Configuration, ParsedConfiguration};
use dataquery_models as models;
use query_engine_translation::translation;

/// The runtime configuration every translation test runs against.
pub fn configuration() -> Configuration {
    make_runtime_configuration(ParsedConfiguration::initial())
        .expect("the initial configuration is valid")
}

/// Validate a query against the initial registry.
pub fn translate(query: &models::Query) -> Result<models::Plan, models::ErrorResponse> {
    translation::query::translate(&configuration().metadata, query)
}

/// Validate the request of a goldenfile directory and render the plan or the
/// error envelope as JSON.
pub fn test_translation(testname: &str) -> anyhow::Result<serde_json::Value> {
    let directory = PathBuf::from("tests/goldenfiles").join(testname);
    let request: models::Query =
        serde_json::from_str(&fs::read_to_string(directory.join("request.json"))?)?;

    Ok(match translate(&request) {
        Ok(plan) => serde_json::to_value(plan)?,
        Err(errors) => serde_json::to_value(errors)?,
    })
}

/// The expected output stored next to a goldenfile request.
pub fn expected(testname: &str) -> anyhow::Result<serde_json::Value> {
    let path = PathBuf::from("tests/goldenfiles")
        .join(testname)
        .join("expected.json");
    Ok(serde_json::from_str(&fs::read_to_string(path)?)?)
}
