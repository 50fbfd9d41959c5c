//! Package descriptors (`mod.json`) and loader selection.
//!
//! Every `.qmod` carries exactly one descriptor. A core-mods package ships no
//! files of its own; it only declares dependencies on the pinned mods, each
//! with a download link so the installer can fetch whatever is missing.

use crate::config::{DescriptorConfig, render_template};
use crate::date::semver_date;
use crate::manifest::{ModRef, VersionEntry};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::fmt;

/// Last game version that still boots through QuestLoader.
pub const SCOTLAND2_THRESHOLD: &str = "1.28.0_4124311467";

/// Mod-loading runtime a package targets.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Loader {
    QuestLoader,
    Scotland2,
}

impl fmt::Display for Loader {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Loader::QuestLoader => f.write_str("QuestLoader"),
            Loader::Scotland2 => f.write_str("Scotland2"),
        }
    }
}

/// Pick the loader for a game version.
///
/// Plain string ordering, not version ordering: `"1.9.0"` sorts after
/// `"1.28.0_…"`. Every published key so far orders the same either way.
pub fn resolve_loader(version: &str) -> Loader {
    if version > SCOTLAND2_THRESHOLD {
        Loader::Scotland2
    } else {
        Loader::QuestLoader
    }
}

/// A dependency entry in `mod.json`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Dependency {
    pub id: String,
    /// Caret range on the pinned version.
    pub version: String,
    pub download_if_missing: String,
}

impl From<&ModRef> for Dependency {
    fn from(m: &ModRef) -> Self {
        Self {
            id: m.id.clone(),
            version: format!("^{}", m.version),
            download_if_missing: m.download_link.clone(),
        }
    }
}

/// The `mod.json` document. Field order here is the serialized order.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PackageDescriptor {
    #[serde(rename = "_QPVersion")]
    pub qp_version: String,
    pub name: String,
    pub id: String,
    pub author: String,
    pub description: String,
    pub version: String,
    pub package_id: String,
    pub package_version: String,
    pub modloader: Loader,
    pub mod_files: Vec<String>,
    pub library_files: Vec<String>,
    pub file_copies: Vec<String>,
    pub dependencies: Vec<Dependency>,
}

impl PackageDescriptor {
    /// Build the descriptor for one manifest entry.
    ///
    /// `last_updated` is the already-parsed `entry.last_updated`; parsing is
    /// left to the caller so the error can name the offending version.
    pub fn build(
        game_version: &str,
        entry: &VersionEntry,
        last_updated: &DateTime<Utc>,
        config: &DescriptorConfig,
    ) -> Self {
        Self {
            qp_version: config.schema_version.clone(),
            name: render_template(&config.name, game_version),
            id: render_template(&config.id, game_version),
            author: config.author.clone(),
            description: render_template(&config.description, game_version),
            version: semver_date(last_updated),
            package_id: config.package_id.clone(),
            package_version: game_version.to_string(),
            modloader: resolve_loader(game_version),
            mod_files: Vec::new(),
            library_files: Vec::new(),
            file_copies: Vec::new(),
            dependencies: entry.mods.iter().map(Dependency::from).collect(),
        }
    }

    /// Serialize as 2-space indented JSON.
    pub fn to_json(&self) -> Result<String, serde_json::Error> {
        serde_json::to_string_pretty(self)
    }
}
