use std::fs;
use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};

use crate::fields::SettingsForm;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Preset {
    pub name: String,
    #[serde(flatten)]
    pub form: SettingsForm,
}

pub fn presets_path() -> PathBuf {
    std::env::current_dir()
        .unwrap_or_else(|_| PathBuf::from("."))
        .join("presets.json")
}

pub fn load_presets_from(path: &Path) -> Result<Vec<Preset>> {
    if !path.exists() {
        return Ok(Vec::new());
    }
    let data = fs::read_to_string(path)
        .with_context(|| format!("unable to read {}", path.display()))?;
    let presets = serde_json::from_str(&data)
        .with_context(|| format!("invalid preset file {}", path.display()))?;
    Ok(presets)
}

pub fn save_presets_to(path: &Path, presets: &[Preset]) -> Result<()> {
    let data = serde_json::to_string_pretty(presets)?;
    fs::write(path, data).with_context(|| format!("unable to write {}", path.display()))?;
    Ok(())
}

pub fn load_presets() -> Result<Vec<Preset>> {
    load_presets_from(&presets_path())
}

pub fn save_presets(presets: &[Preset]) -> Result<()> {
    save_presets_to(&presets_path(), presets)
}

/// Inserts `preset`, replacing any existing preset with the same name.
pub fn upsert(presets: &mut Vec<Preset>, preset: Preset) {
    if let Some(pos) = presets.iter().position(|p| p.name == preset.name) {
        presets[pos] = preset;
    } else {
        presets.push(preset);
    }
}

pub fn find<'a>(presets: &'a [Preset], name: &str) -> Option<&'a Preset> {
    presets.iter().find(|p| p.name == name)
}
