//! The `index.html` download page.
//!
//! The page is written incrementally: the shell opening goes out before the
//! first package is built, one `<li>` is appended per finished archive, and
//! the closing tags are written last. A run that aborts halfway therefore
//! leaves an index listing exactly the archives that were produced.

use crate::config::archive_file_name;
use maud::{DOCTYPE, Markup, html};
use std::fs::File;
use std::io::{self, Write};
use std::path::{Path, PathBuf};

/// The page with an empty link list.
pub fn render_page(title: &str) -> Markup {
    html! {
        (DOCTYPE)
        html lang="en" {
            head {
                meta charset="UTF-8";
                meta name="viewport" content="width=device-width, initial-scale=1.0";
                title { (title) }
            }
            body {
                h1 { (title) }
                ul {}
            }
        }
    }
}

/// Split the rendered page where the links go: `(up to <ul>, from </ul>)`.
fn render_shell(title: &str) -> (String, String) {
    let page = render_page(title).into_string();
    let at = page.rfind("</ul>").unwrap_or(page.len());
    let (open, close) = page.split_at(at);
    (open.to_string(), close.to_string())
}

/// One link to `<version>.qmod`.
pub fn render_link(version: &str) -> Markup {
    html! {
        li { a href=(archive_file_name(version)) { (version) } }
    }
}

/// Append-only writer for the index page.
pub struct IndexWriter {
    path: PathBuf,
    file: File,
    close: String,
    links: usize,
}

impl IndexWriter {
    /// Create (or truncate) the index and write the shell opening.
    pub fn create(path: &Path, title: &str) -> io::Result<Self> {
        let (open, close) = render_shell(title);
        let mut file = File::create(path)?;
        writeln!(file, "{open}")?;
        file.flush()?;
        Ok(Self {
            path: path.to_path_buf(),
            file,
            close,
            links: 0,
        })
    }

    /// Append a link to the archive for `version`.
    pub fn append_link(&mut self, version: &str) -> io::Result<()> {
        writeln!(self.file, "{}", render_link(version).into_string())?;
        self.file.flush()?;
        self.links += 1;
        Ok(())
    }

    /// Write the closing tags. Returns the number of links written.
    pub fn finish(mut self) -> io::Result<usize> {
        writeln!(self.file, "{}", self.close)?;
        self.file.flush()?;
        Ok(self.links)
    }

    pub fn path(&self) -> &Path {
        &self.path
    }
}
