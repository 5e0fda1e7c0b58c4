use crate::cli::SelectArgs;
use datalens::{SavedQueryBuilder, generate_select};
use std::path::Path;

pub fn run(args: SelectArgs) -> anyhow::Result<()> {
    println!("{}", render(&args.file)?);
    Ok(())
}

fn render(path: &Path) -> anyhow::Result<String> {
    let raw = std::fs::read_to_string(path)
        .map_err(|e| anyhow::anyhow!("failed to read {}: {e}", path.display()))?;
    select_sql(&raw).map_err(|e| anyhow::anyhow!("{}: {e}", path.display()))
}

/// SELECT for a saved query builder given as JSON.
pub fn select_sql(json: &str) -> anyhow::Result<String> {
    let saved: SavedQueryBuilder = serde_json::from_str(json)?;
    if saved.table_name.trim().is_empty() {
        anyhow::bail!("saved query builder has no table");
    }
    let spec = saved.to_spec()?;
    tracing::debug!(name = %saved.name, id = %saved.id, "loaded saved query builder");
    Ok(generate_select(&spec))
}
