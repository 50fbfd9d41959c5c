//! The `core_mods.json` input manifest.
//!
//! The manifest is a JSON object keyed by game version:
//!
//! ```json
//! {
//!   "1.28.0_4124311467": {
//!     "lastUpdated": "2023-01-05T10:20:30.123Z",
//!     "mods": [
//!       { "id": "beatsaber-hook", "version": "3.14.0", "downloadLink": "https://…" }
//!     ]
//!   }
//! }
//! ```
//!
//! Key order in the file is the processing order and the order of links in the
//! generated index, so entries are kept in a `Vec` rather than a map.

use serde::de::{Deserializer, MapAccess, Visitor};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::fs;
use std::path::Path;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum ManifestError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
}

/// A single mod pinned by a version entry.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ModRef {
    pub id: String,
    pub version: String,
    pub download_link: String,
}

/// Core mods for one game version.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct VersionEntry {
    /// ISO-8601 UTC timestamp; parsed lazily so a bad value only fails the run
    /// when that entry is reached.
    pub last_updated: String,
    pub mods: Vec<ModRef>,
}

/// All version entries, in file order.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Manifest {
    pub entries: Vec<(String, VersionEntry)>,
}

impl Manifest {
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn versions(&self) -> impl Iterator<Item = &str> {
        self.entries.iter().map(|(v, _)| v.as_str())
    }

    pub fn get(&self, version: &str) -> Option<&VersionEntry> {
        self.entries
            .iter()
            .find(|(v, _)| v == version)
            .map(|(_, e)| e)
    }
}

impl<'de> Deserialize<'de> for Manifest {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: Deserializer<'de>,
    {
        struct ManifestVisitor;

        impl<'de> Visitor<'de> for ManifestVisitor {
            type Value = Manifest;

            fn expecting(&self, f: &mut fmt::Formatter) -> fmt::Result {
                f.write_str("an object keyed by game version")
            }

            fn visit_map<A>(self, mut map: A) -> Result<Manifest, A::Error>
            where
                A: MapAccess<'de>,
            {
                let mut entries = Vec::with_capacity(map.size_hint().unwrap_or(0));
                while let Some((version, entry)) = map.next_entry::<String, VersionEntry>()? {
                    // Later duplicates win, matching how a JSON object is normally read
                    match entries.iter_mut().find(|(v, _)| *v == version) {
                        Some((_, existing)) => *existing = entry,
                        None => entries.push((version, entry)),
                    }
                }
                Ok(Manifest { entries })
            }
        }

        deserializer.deserialize_map(ManifestVisitor)
    }
}

/// Parse a manifest from JSON text.
pub fn parse_manifest(json: &str) -> Result<Manifest, ManifestError> {
    Ok(serde_json::from_str(json)?)
}

/// Read and parse a manifest file.
pub fn load_manifest(path: &Path) -> Result<Manifest, ManifestError> {
    let content = fs::read_to_string(path)?;
    parse_manifest(&content)
}
