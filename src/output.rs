use std::fs;
use std::path::Path;

use anyhow::{Context, Result};

use crate::model::Climb;

/// Output filename for the run mode, so a plain listing never
/// overwrites an enriched one.
pub fn output_path(enriched: bool) -> &'static str {
    if enriched {
        "climbs_enriched.json"
    } else {
        "climbs.json"
    }
}

/// Write the records as a pretty-printed JSON array.
pub fn write_climbs(path: &Path, climbs: &[Climb]) -> Result<()> {
    let json = serde_json::to_string_pretty(climbs)?;
    fs::write(path, json).with_context(|| format!("Failed to write {}", path.display()))?;
    Ok(())
}
