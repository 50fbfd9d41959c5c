//! Shared test utilities for the core-mods test suite.
//!
//! Provides deploy-root fixtures, a recording [`MockArchiver`], and helpers to
//! inspect generated archives and index pages.
//!
//! # Usage
//!
//! ```rust,ignore
//! use crate::test_helpers::*;
//!
//! let tmp = setup_fixtures();
//! let archiver = MockArchiver::new();
//! generate(&RunPaths::in_dir(tmp.path()), &GeneratorConfig::default(), &archiver).unwrap();
//!
//! assert_eq!(archiver.calls().len(), 2);
//! let html = std::fs::read_to_string(tmp.path().join("index.html")).unwrap();
//! assert_eq!(index_links(&html).len(), 2);
//! ```

use chrono::{DateTime, Utc};
use std::fs::{self, File};
use std::io::Read;
use std::path::{Path, PathBuf};
use std::sync::Mutex;
use tempfile::TempDir;

use crate::archive::{ArchiveError, Archiver};

// =========================================================================
// Fixture setup
// =========================================================================

/// Copy `fixtures/core_mods.json` into a fresh temp deploy root.
pub fn setup_fixtures() -> TempDir {
    let tmp = TempDir::new().unwrap();
    let fixture = Path::new(env!("CARGO_MANIFEST_DIR")).join("fixtures/core_mods.json");
    fs::copy(&fixture, tmp.path().join("core_mods.json")).unwrap();
    tmp
}

/// A temp deploy root whose `core_mods.json` holds `manifest_json`.
pub fn deploy_dir(manifest_json: &str) -> TempDir {
    let tmp = TempDir::new().unwrap();
    fs::write(tmp.path().join("core_mods.json"), manifest_json).unwrap();
    tmp
}

// =========================================================================
// Mock archiver
// =========================================================================

#[derive(Debug, Clone, PartialEq)]
pub struct ArchiveCall {
    pub files: Vec<PathBuf>,
    pub output: PathBuf,
}

/// Archiver that records calls and writes the first input file verbatim to
/// the output path, so tests can read back exactly what was archived.
#[derive(Default)]
pub struct MockArchiver {
    calls: Mutex<Vec<ArchiveCall>>,
    input_modified: Mutex<Vec<DateTime<Utc>>>,
    fail: bool,
}

impl MockArchiver {
    pub fn new() -> Self {
        Self::default()
    }

    /// Every call fails without writing anything.
    pub fn failing() -> Self {
        Self {
            fail: true,
            ..Self::default()
        }
    }

    pub fn calls(&self) -> Vec<ArchiveCall> {
        self.calls.lock().unwrap().clone()
    }

    /// Modification time of the first input file, per call.
    pub fn input_modified(&self) -> Vec<DateTime<Utc>> {
        self.input_modified.lock().unwrap().clone()
    }
}

impl Archiver for MockArchiver {
    fn archive(&self, files: &[PathBuf], output: &Path) -> Result<(), ArchiveError> {
        self.calls.lock().unwrap().push(ArchiveCall {
            files: files.to_vec(),
            output: output.to_path_buf(),
        });
        if self.fail {
            return Err(ArchiveError::Failed("mock failure".into()));
        }
        let first = &files[0];
        self.input_modified.lock().unwrap().push(modified_utc(first));
        fs::copy(first, output)?;
        Ok(())
    }
}

// =========================================================================
// Output inspection
// =========================================================================

/// Modification time of `path` as UTC.
pub fn modified_utc(path: &Path) -> DateTime<Utc> {
    fs::metadata(path).unwrap().modified().unwrap().into()
}

/// Entry names in a zip, in archive order.
pub fn zip_entry_names(path: &Path) -> Vec<String> {
    let archive = zip::ZipArchive::new(File::open(path).unwrap()).unwrap();
    archive.file_names().map(str::to_string).collect()
}

/// Contents of one zip entry as UTF-8. Panics if the entry is missing.
pub fn read_zip_entry(path: &Path, name: &str) -> String {
    let mut archive = zip::ZipArchive::new(File::open(path).unwrap()).unwrap();
    let mut entry = archive
        .by_name(name)
        .unwrap_or_else(|e| panic!("entry '{name}' not in {}: {e}", path.display()));
    let mut content = String::new();
    entry.read_to_string(&mut content).unwrap();
    content
}

/// `href` of every list-item link in an index page, in document order.
pub fn index_links(html: &str) -> Vec<&str> {
    html.split("<li><a href=\"")
        .skip(1)
        .filter_map(|rest| rest.split('"').next())
        .collect()
}
