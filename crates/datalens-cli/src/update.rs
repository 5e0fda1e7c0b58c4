use crate::cli::UpdateArgs;
use datalens::{EditRowSpec, generate_update};
use std::path::Path;

pub fn run(args: UpdateArgs) -> anyhow::Result<()> {
    println!("{}", render(&args.file)?);
    Ok(())
}

fn render(path: &Path) -> anyhow::Result<String> {
    let raw = std::fs::read_to_string(path)
        .map_err(|e| anyhow::anyhow!("failed to read {}: {e}", path.display()))?;
    update_sql(&raw).map_err(|e| anyhow::anyhow!("{}: {e}", path.display()))
}

/// UPDATE for an edited row given as JSON.
///
/// Rejections surface their reason alone, without the error kind prefix.
pub fn update_sql(json: &str) -> anyhow::Result<String> {
    let spec: EditRowSpec = serde_json::from_str(json)?;
    generate_update(&spec).map_err(|e| {
        if let Some(reason) = e.rejection() {
            return anyhow::anyhow!("{reason}");
        }
        e.into()
    })
}
