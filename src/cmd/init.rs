use crate::data::{Palette, Persistable, PickerSettings, TextTable};
use anyhow::{Context, Result};
use std::fs;
use std::path::Path;

pub fn run() -> Result<()> {
    let dir = crate::data::persistence::get_data_dir()?;
    fs::create_dir_all(&dir).with_context(|| format!("failed to create {}", dir.display()))?;
    run_in_dir(&dir)?;
    println!("Data files initialized successfully.");
    Ok(())
}

/// Writes config.yaml, palette.yaml and texts.json with built-in defaults.
pub(crate) fn run_in_dir(dir: &Path) -> Result<()> {
    PickerSettings::default().save_to(dir)?;
    Palette::default().save_to(dir)?;
    TextTable::default().save_to(dir)?;
    tracing::debug!(dir = %dir.display(), "default data files written");
    Ok(())
}
