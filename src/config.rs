//! Generator configuration.
//!
//! Handles loading, validating, and merging `core-mods.toml`. The file is
//! optional: without it every value falls back to the stock defaults, which
//! produce the descriptors the QuestPackageManager core-mods index has always
//! published.
//!
//! ## Configuration Options
//!
//! ```toml
//! # All options are optional - defaults shown below
//!
//! [descriptor]
//! schema_version = "0.1.1"
//! author = "QuestPackageManager"
//! package_id = "com.beatgames.beatsaber"
//! name = "Core mods for {version}"
//! id = "CoreMods_{version}"
//! description = "Downloads all Core mods for Beat Saber version {version}"
//!
//! [index]
//! title = "Core Mods"
//! ```
//!
//! `{version}` in the `name`, `id` and `description` templates is replaced by
//! the manifest's version key.
//!
//! ## Partial Configuration
//!
//! Config files are sparse — override just the values you want:
//!
//! ```toml
//! [descriptor]
//! author = "My Team"
//! ```
//!
//! Unknown keys are rejected to catch typos early.

use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};
use thiserror::Error;

/// Placeholder substituted with the manifest version key in templates.
pub const VERSION_PLACEHOLDER: &str = "{version}";

#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
    #[error("TOML parse error: {0}")]
    Toml(#[from] toml::de::Error),
    #[error("Config validation error: {0}")]
    Validation(String),
}

/// Generator configuration loaded from `core-mods.toml`.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct GeneratorConfig {
    /// Fixed fields and templates for every `mod.json`.
    pub descriptor: DescriptorConfig,
    /// The generated `index.html`.
    pub index: IndexConfig,
}

impl GeneratorConfig {
    /// Validate config values.
    pub fn validate(&self) -> Result<(), ConfigError> {
        let d = &self.descriptor;
        for (key, value) in [
            ("descriptor.schema_version", &d.schema_version),
            ("descriptor.author", &d.author),
            ("descriptor.package_id", &d.package_id),
            ("descriptor.id", &d.id),
        ] {
            if value.trim().is_empty() {
                return Err(ConfigError::Validation(format!("{key} must not be empty")));
            }
        }
        if !d.id.contains(VERSION_PLACEHOLDER) {
            return Err(ConfigError::Validation(format!(
                "descriptor.id must contain {VERSION_PLACEHOLDER}"
            )));
        }
        Ok(())
    }
}

/// Descriptor settings shared by every version.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct DescriptorConfig {
    /// Value of the `_QPVersion` schema tag.
    pub schema_version: String,
    pub author: String,
    /// Package the mods target (`packageId`).
    pub package_id: String,
    /// Display name template.
    pub name: String,
    /// Identifier template. Must contain `{version}`.
    pub id: String,
    /// Description template.
    pub description: String,
}

impl Default for DescriptorConfig {
    fn default() -> Self {
        Self {
            schema_version: "0.1.1".to_string(),
            author: "QuestPackageManager".to_string(),
            package_id: "com.beatgames.beatsaber".to_string(),
            name: "Core mods for {version}".to_string(),
            id: "CoreMods_{version}".to_string(),
            description: "Downloads all Core mods for Beat Saber version {version}".to_string(),
        }
    }
}

/// Index page settings.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct IndexConfig {
    /// `<title>` and heading of the index page.
    pub title: String,
}

impl Default for IndexConfig {
    fn default() -> Self {
        Self {
            title: "Core Mods".to_string(),
        }
    }
}

/// Fill `{version}` in a template.
pub fn render_template(template: &str, version: &str) -> String {
    template.replace(VERSION_PLACEHOLDER, version)
}

/// Paths for a single run. Built once at startup and read-only afterwards.
#[derive(Debug, Clone, PartialEq)]
pub struct RunPaths {
    /// The `core_mods.json` input.
    pub manifest: PathBuf,
    /// Deploy root: receives `index.html` and the `.qmod` archives.
    pub output_dir: PathBuf,
}

impl RunPaths {
    pub const MANIFEST_FILE: &'static str = "core_mods.json";
    pub const INDEX_FILE: &'static str = "index.html";
    pub const DESCRIPTOR_FILE: &'static str = "mod.json";
    pub const ARCHIVE_EXTENSION: &'static str = "qmod";

    /// Manifest and outputs all in `dir`, the layout of a deploy checkout.
    pub fn in_dir(dir: &Path) -> Self {
        Self {
            manifest: dir.join(Self::MANIFEST_FILE),
            output_dir: dir.to_path_buf(),
        }
    }

    pub fn index(&self) -> PathBuf {
        self.output_dir.join(Self::INDEX_FILE)
    }

    /// Transient descriptor, rewritten for every entry.
    pub fn descriptor(&self) -> PathBuf {
        self.output_dir.join(Self::DESCRIPTOR_FILE)
    }

    pub fn archive(&self, version: &str) -> PathBuf {
        self.output_dir.join(archive_file_name(version))
    }
}

impl Default for RunPaths {
    fn default() -> Self {
        Self::in_dir(Path::new("."))
    }
}

/// `<version>.qmod`
pub fn archive_file_name(version: &str) -> String {
    format!("{version}.{}", RunPaths::ARCHIVE_EXTENSION)
}

// =============================================================================
// Config loading, merging, and validation
// =============================================================================

/// Returns the stock default config as a `toml::Value::Table`.
pub fn stock_defaults_value() -> toml::Value {
    toml::Value::try_from(GeneratorConfig::default()).expect("default config must serialize")
}

/// Recursively merge `overlay` on top of `base`.
///
/// - Tables are merged key-by-key (overlay keys override base keys).
/// - Non-table values in overlay replace base values entirely.
/// - Keys in base that are not in overlay are preserved.
pub fn merge_toml(base: toml::Value, overlay: toml::Value) -> toml::Value {
    match (base, overlay) {
        (toml::Value::Table(mut base_table), toml::Value::Table(overlay_table)) => {
            for (key, overlay_val) in overlay_table {
                let merged = match base_table.remove(&key) {
                    Some(base_val) => merge_toml(base_val, overlay_val),
                    None => overlay_val,
                };
                base_table.insert(key, merged);
            }
            toml::Value::Table(base_table)
        }
        (_, overlay) => overlay,
    }
}

/// Load a config file as a raw TOML value.
///
/// Returns `Ok(None)` if the file does not exist.
pub fn load_raw_config(path: &Path) -> Result<Option<toml::Value>, ConfigError> {
    if !path.exists() {
        return Ok(None);
    }
    let content = fs::read_to_string(path)?;
    let value: toml::Value = toml::from_str(&content)?;
    Ok(Some(value))
}

/// Merge an optional overlay onto the stock defaults, then deserialize and validate.
pub fn resolve_config(overlay: Option<toml::Value>) -> Result<GeneratorConfig, ConfigError> {
    let base = stock_defaults_value();
    let merged = match overlay {
        Some(ov) => merge_toml(base, ov),
        None => base,
    };
    let config: GeneratorConfig = merged.try_into()?;
    config.validate()?;
    Ok(config)
}

/// Load config from `path`, falling back to stock defaults when it is absent.
pub fn load_config(path: &Path) -> Result<GeneratorConfig, ConfigError> {
    resolve_config(load_raw_config(path)?)
}

/// Returns a fully-commented stock `core-mods.toml`.
///
/// Used by the `gen-config` CLI command.
pub fn stock_config_toml() -> &'static str {
    r##"# core-mods configuration
# ========================
# All settings are optional. Remove or comment out any you don't need.
# Values shown below are the defaults. Unknown keys will cause an error.
#
# In the name, id and description templates, {version} is replaced by the
# game version key from core_mods.json.

# ---------------------------------------------------------------------------
# Package descriptor (mod.json inside every .qmod)
# ---------------------------------------------------------------------------
[descriptor]
# _QPVersion schema tag.
schema_version = "0.1.1"

author = "QuestPackageManager"

# Package the core mods are installed into.
package_id = "com.beatgames.beatsaber"

name = "Core mods for {version}"

# Must contain {version} so every game version gets its own identifier.
id = "CoreMods_{version}"

description = "Downloads all Core mods for Beat Saber version {version}"

# ---------------------------------------------------------------------------
# index.html
# ---------------------------------------------------------------------------
[index]
title = "Core Mods"
"##
}
