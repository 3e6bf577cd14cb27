use crate::Result;
use anyhow::Context;
use serde::Serialize;
use std::path::Path;

/// Write any serializable result as pretty-printed JSON.
pub fn export_json<T: Serialize>(results: &T, output_path: &Path) -> Result<()> {
    let json = serde_json::to_string_pretty(results)
        .context("Failed to serialize detection results")?;

    std::fs::write(output_path, json)
        .with_context(|| format!("Failed to write JSON to: {:?}", output_path))?;

    Ok(())
}
