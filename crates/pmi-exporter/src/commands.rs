//! Subcommand implementations.

use std::path::PathBuf;

use anyhow::{Context, Result, anyhow};
use comfy_table::modifiers::UTF8_ROUND_CORNERS;
use comfy_table::presets::UTF8_FULL_CONDENSED;
use comfy_table::{ContentArrangement, Table};
use tracing::info;

use pmi_classify::{SchemaRegistry, classify_frame};
use pmi_exporter::server::{AppState, fetch_exposition, serve};
use pmi_ingest::read_snapshot_file;
use pmi_output::render;

use crate::cli::{CheckArgs, ModelsArgs, ProbeArgs, ServeArgs};

/// Built-in catalog plus any schema files from the command line.
fn build_registry(schema_files: &[PathBuf]) -> Result<SchemaRegistry> {
    let mut registry = SchemaRegistry::builtin().context("compile built-in schema catalog")?;
    for path in schema_files {
        registry
            .load_schema_file(path)
            .with_context(|| format!("load schema file {}", path.display()))?;
    }
    Ok(registry)
}

pub fn run_serve(args: &ServeArgs) -> Result<()> {
    let registry = build_registry(&args.schemas)?;
    let state = AppState::new(registry).context("build http client")?;
    let runtime = tokio::runtime::Runtime::new().context("start runtime")?;
    runtime
        .block_on(serve(args.listen, state))
        .with_context(|| format!("serve on {}", args.listen))
}

pub fn run_probe(args: &ProbeArgs) -> Result<String> {
    let registry = build_registry(&args.schemas)?;
    let state = AppState::new(registry).context("build http client")?;
    let runtime = tokio::runtime::Runtime::new().context("start runtime")?;
    runtime
        .block_on(fetch_exposition(&state, &args.address))
        .map_err(|failure| anyhow!("{failure}"))
}

pub fn run_check(args: &CheckArgs) -> Result<String> {
    let registry = build_registry(&args.schemas)?;
    let frame = read_snapshot_file(&args.file)?;
    let observations = classify_frame(&frame, &registry)?;
    info!(
        file = %args.file.display(),
        observations = observations.len(),
        "snapshot checked"
    );
    Ok(render(&observations))
}

pub fn run_models(args: &ModelsArgs) -> Result<()> {
    let registry = build_registry(&args.schemas)?;
    let mut table = Table::new();
    table.set_header(vec![
        "Model",
        "Info columns",
        "Grouped rules",
        "Plain rules",
        "Ignored",
    ]);
    apply_table_style(&mut table);
    for schema in registry.schemas() {
        table.add_row(vec![
            schema.model.clone(),
            schema.info_columns.len().to_string(),
            schema.group_rules.len().to_string(),
            schema.plain_rules.len().to_string(),
            schema.ignore_names.len().to_string(),
        ]);
    }
    println!("{table}");
    Ok(())
}

fn apply_table_style(table: &mut Table) {
    table
        .load_preset(UTF8_FULL_CONDENSED)
        .apply_modifier(UTF8_ROUND_CORNERS)
        .set_content_arrangement(ContentArrangement::Dynamic);
}
