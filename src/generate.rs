//! Package generation.
//!
//! Turns the manifest into one `.qmod` per game version plus the index page.
//! Entries are handled strictly one after another, in manifest order:
//!
//! ```text
//! parse lastUpdated → build descriptor → write + stamp mod.json
//!   → remove stale <version>.qmod → archive → stamp archive
//!   → append index link → delete mod.json
//! ```
//!
//! Every entry reuses the same transient `mod.json` path in the deploy root,
//! so the loop must stay sequential.
//!
//! ## Output Structure
//!
//! ```text
//! deploy/
//! ├── index.html
//! ├── 1.28.0_4124311467.qmod     # contains mod.json
//! └── 1.35.0_8016709773.qmod
//! ```
//!
//! ## Failure
//!
//! There is no per-entry isolation. A malformed manifest fails before anything
//! is written; a bad `lastUpdated` or an archiving error stops the run at that
//! entry, leaving the archives and index links of the entries before it.

use crate::archive::{ArchiveError, Archiver, stamp_times};
use crate::config::{GeneratorConfig, RunPaths, archive_file_name};
use crate::date::{DateError, parse_utc_date};
use crate::descriptor::PackageDescriptor;
use crate::index::IndexWriter;
use crate::manifest::{Manifest, ManifestError, VersionEntry, load_manifest};
use chrono::{DateTime, Utc};
use std::fs;
use std::path::PathBuf;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum GenerateError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
    #[error("Manifest error: {0}")]
    Manifest(#[from] ManifestError),
    #[error("lastUpdated of {version}: {source}")]
    Date {
        version: String,
        #[source]
        source: DateError,
    },
    #[error("Archive error: {0}")]
    Archive(#[from] ArchiveError),
}

/// A descriptor ready to be packaged.
#[derive(Debug, Clone, PartialEq)]
pub struct PlannedPackage {
    /// Game version key from the manifest.
    pub game_version: String,
    pub last_updated: DateTime<Utc>,
    pub descriptor: PackageDescriptor,
}

impl PlannedPackage {
    /// `<version>.qmod`
    pub fn archive_name(&self) -> String {
        archive_file_name(&self.game_version)
    }
}

/// Result of a full run.
#[derive(Debug)]
pub struct GenerateReport {
    pub packages: Vec<PlannedPackage>,
    pub index: PathBuf,
}

/// Parse the entry's date and build its descriptor. Touches no files.
pub fn plan_entry(
    game_version: &str,
    entry: &VersionEntry,
    config: &GeneratorConfig,
) -> Result<PlannedPackage, GenerateError> {
    let last_updated =
        parse_utc_date(&entry.last_updated).map_err(|source| GenerateError::Date {
            version: game_version.to_string(),
            source,
        })?;
    let descriptor =
        PackageDescriptor::build(game_version, entry, &last_updated, &config.descriptor);
    Ok(PlannedPackage {
        game_version: game_version.to_string(),
        last_updated,
        descriptor,
    })
}

/// Plan every entry, failing on the first bad one.
pub fn plan(
    manifest: &Manifest,
    config: &GeneratorConfig,
) -> Result<Vec<PlannedPackage>, GenerateError> {
    manifest
        .entries
        .iter()
        .map(|(version, entry)| plan_entry(version, entry, config))
        .collect()
}

/// Write one package's archive.
fn package(
    planned: &PlannedPackage,
    paths: &RunPaths,
    archiver: &dyn Archiver,
) -> Result<(), GenerateError> {
    let descriptor_path = paths.descriptor();
    fs::write(&descriptor_path, planned.descriptor.to_json()?)?;
    stamp_times(&descriptor_path, &planned.last_updated)?;

    let archive_path = paths.archive(&planned.game_version);
    // Absent on a fresh deploy root
    fs::remove_file(&archive_path).ok();
    archiver.archive(std::slice::from_ref(&descriptor_path), &archive_path)?;
    stamp_times(&archive_path, &planned.last_updated)?;
    Ok(())
}

/// Run the whole pipeline: manifest → archives → index.
pub fn generate(
    paths: &RunPaths,
    config: &GeneratorConfig,
    archiver: &dyn Archiver,
) -> Result<GenerateReport, GenerateError> {
    let manifest = load_manifest(&paths.manifest)?;

    fs::create_dir_all(&paths.output_dir)?;
    let mut index = IndexWriter::create(&paths.index(), &config.index.title)?;

    let mut packages = Vec::with_capacity(manifest.len());
    for (version, entry) in &manifest.entries {
        let planned = plan_entry(version, entry, config)?;
        package(&planned, paths, archiver)?;
        index.append_link(version)?;
        fs::remove_file(paths.descriptor())?;
        packages.push(planned);
    }

    let index_path = index.path().to_path_buf();
    index.finish()?;

    Ok(GenerateReport {
        packages,
        index: index_path,
    })
}
