use std::fs;

use serde_json::json;
use similar_asserts::assert_eq;

use dataquery_cli::{run, Command, Context, Document, Outcome};

fn context(dir: &tempfile::TempDir) -> Context<Vec<u8>> {
    Context {
        context_path: dir.path().to_path_buf(),
        output: Vec::new(),
    }
}

fn output_json(context: &Context<Vec<u8>>) -> serde_json::Value {
    serde_json::from_slice(&context.output).unwrap()
}

#[tokio::test]
async fn initialize_writes_configuration_and_schema() -> anyhow::Result<()> {
    let dir = tempfile::tempdir()?;
    let mut context = context(&dir);

    let outcome = run(Command::Initialize { force: false }, &mut context).await?;

    assert_eq!(outcome, Outcome::Success);
    assert!(dir.path().join("configuration.json").exists());
    assert!(dir.path().join("schema.json").exists());
    Ok(())
}

#[tokio::test]
async fn initialize_refuses_to_overwrite() -> anyhow::Result<()> {
    let dir = tempfile::tempdir()?;
    let mut context = context(&dir);
    run(Command::Initialize { force: false }, &mut context).await?;

    assert!(run(Command::Initialize { force: false }, &mut context)
        .await
        .is_err());
    assert_eq!(
        run(Command::Initialize { force: true }, &mut context).await?,
        Outcome::Success
    );
    Ok(())
}

#[tokio::test]
async fn validate_prints_the_plan() -> anyhow::Result<()> {
    let dir = tempfile::tempdir()?;
    let mut context = context(&dir);
    run(Command::Initialize { force: false }, &mut context).await?;

    let query_path = dir.path().join("query.json");
    fs::write(
        &query_path,
        json!({
            "data_source": "companies",
            "select": [
                {"expr": "col", "name": "sector"},
                {"expr": "agg", "fn": "avg", "column": "share_price", "as": "avg_price"}
            ]
        })
        .to_string(),
    )?;

    let outcome = run(Command::Validate { query: query_path }, &mut context).await?;

    assert_eq!(outcome, Outcome::Success);
    assert_eq!(
        output_json(&context),
        json!({
            "data_source": "companies",
            "group": true,
            "group_keys": ["sector"],
            "time_buckets": [],
            "agg_aliases": ["avg_price"],
            "window_agg_aliases": [],
            "projection_aliases": ["sector", "avg_price"],
            "order_by": [],
            "page_limit": 50
        })
    );
    Ok(())
}

#[tokio::test]
async fn validate_prints_every_violation() -> anyhow::Result<()> {
    let dir = tempfile::tempdir()?;
    let mut context = context(&dir);
    run(Command::Initialize { force: false }, &mut context).await?;

    let query_path = dir.path().join("query.json");
    fs::write(
        &query_path,
        json!({
            "data_source": "companies",
            "select": [
                {"expr": "col", "name": "ticker"},
                {"expr": "col", "name": "ticker"}
            ],
            "page": {"limit": 0}
        })
        .to_string(),
    )?;

    let outcome = run(Command::Validate { query: query_path }, &mut context).await?;

    assert_eq!(outcome, Outcome::Rejected);
    assert_eq!(
        output_json(&context),
        json!({"error": [
            {"code": "DUP_ALIAS", "message": "Duplicate alias 'ticker'", "field": "select"},
            {"code": "BAD_LIMIT", "message": "limit must be 1..1000, got 0", "field": "page"}
        ]})
    );
    Ok(())
}

#[tokio::test]
async fn malformed_query_is_an_error() -> anyhow::Result<()> {
    let dir = tempfile::tempdir()?;
    let mut context = context(&dir);
    run(Command::Initialize { force: false }, &mut context).await?;

    let query_path = dir.path().join("query.json");
    fs::write(&query_path, r#"{"data_source": "companies"}"#)?;

    assert!(run(Command::Validate { query: query_path }, &mut context)
        .await
        .is_err());
    Ok(())
}

#[tokio::test]
async fn describe_prints_the_discovery_document() -> anyhow::Result<()> {
    let dir = tempfile::tempdir()?;
    let mut context = context(&dir);
    run(Command::Initialize { force: false }, &mut context).await?;

    run(
        Command::Describe {
            resource: "stock_prices".into(),
        },
        &mut context,
    )
    .await?;

    let options = output_json(&context);
    assert_eq!(options["resource"], json!("stock_prices"));
    assert_eq!(options["columns"][5]["name"], json!("volume"));
    assert_eq!(options["supports"]["pagination"]["maxPageSize"], json!(1000));
    Ok(())
}

#[tokio::test]
async fn describe_without_configuration_fails() -> anyhow::Result<()> {
    let dir = tempfile::tempdir()?;
    let mut context = context(&dir);
    assert!(run(
        Command::Describe {
            resource: "companies".into()
        },
        &mut context
    )
    .await
    .is_err());
    Ok(())
}

#[tokio::test]
async fn print_query_schema() -> anyhow::Result<()> {
    let dir = tempfile::tempdir()?;
    let mut context = context(&dir);

    run(
        Command::PrintSchema {
            document: Document::Query,
        },
        &mut context,
    )
    .await?;

    let schema = output_json(&context);
    assert_eq!(schema["title"], json!("Query"));
    Ok(())
}
