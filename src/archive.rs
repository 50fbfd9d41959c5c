//! Packaging descriptors into `.qmod` archives.
//!
//! A `.qmod` is a plain zip. The [`Archiver`] trait is the seam between the
//! pipeline and the compressor so the generate stage can be exercised with a
//! recording mock; [`ZipArchiver`] is the production implementation.
//!
//! Both the files on disk and the zip entries carry the manifest's
//! `lastUpdated`, never the build machine's clock.

use chrono::{DateTime, Datelike, Timelike, Utc};
use std::fs::{self, File, FileTimes};
use std::io;
use std::path::{Path, PathBuf};
use std::time::SystemTime;
use thiserror::Error;
use zip::CompressionMethod;
use zip::write::SimpleFileOptions;

#[derive(Error, Debug)]
pub enum ArchiveError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
    #[error("Zip error: {0}")]
    Zip(#[from] zip::result::ZipError),
    #[error("Archiving failed: {0}")]
    Failed(String),
}

/// Something that can pack files into an archive at `output`.
pub trait Archiver {
    /// Create `output` containing each of `files`, stored under its file name.
    fn archive(&self, files: &[PathBuf], output: &Path) -> Result<(), ArchiveError>;
}

/// Deflate-compressed zip writer.
#[derive(Debug, Default, Clone, Copy)]
pub struct ZipArchiver;

impl Archiver for ZipArchiver {
    fn archive(&self, files: &[PathBuf], output: &Path) -> Result<(), ArchiveError> {
        let mut zip = zip::ZipWriter::new(File::create(output)?);

        for path in files {
            let name = path
                .file_name()
                .ok_or_else(|| ArchiveError::Failed(format!("not a file: {}", path.display())))?
                .to_string_lossy()
                .into_owned();

            let mut options =
                SimpleFileOptions::default().compression_method(CompressionMethod::Deflated);
            let modified: DateTime<Utc> = fs::metadata(path)?.modified()?.into();
            if let Some(time) = zip_time(&modified) {
                options = options.last_modified_time(time);
            }

            zip.start_file(name, options)?;
            let mut f = File::open(path)?;
            io::copy(&mut f, &mut zip)?;
        }

        zip.finish()?;
        Ok(())
    }
}

/// Convert to an MS-DOS zip timestamp (2-second resolution, years 1980–2107).
///
/// Out-of-range instants return `None` and the entry keeps the zip default.
fn zip_time(time: &DateTime<Utc>) -> Option<zip::DateTime> {
    zip::DateTime::from_date_and_time(
        u16::try_from(time.year()).ok()?,
        time.month() as u8,
        time.day() as u8,
        time.hour() as u8,
        time.minute() as u8,
        time.second() as u8,
    )
    .ok()
}

/// Set both the access and modification time of `path`.
pub fn stamp_times(path: &Path, time: &DateTime<Utc>) -> io::Result<()> {
    let time = SystemTime::from(*time);
    let file = fs::OpenOptions::new().write(true).open(path)?;
    file.set_times(FileTimes::new().set_accessed(time).set_modified(time))
}
