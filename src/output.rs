//! CLI output formatting.
//!
//! Every package is shown by its game version first, with the derived
//! descriptor details as indented context lines:
//!
//! ## Build
//!
//! ```text
//! 001 1.28.0_4124311467 → 1.28.0_4124311467.qmod
//!     Version: 2023.05.09-174512381Z
//!     Loader: QuestLoader
//!     Dependencies: 3
//! 002 1.35.0_8016709773 → 1.35.0_8016709773.qmod
//!     Version: 2024.03.21-080255000Z
//!     Loader: Scotland2
//!     Dependencies: 2
//!
//! Generated 2 packages → index.html
//! ```
//!
//! ## Check
//!
//! Same entity lines without the archive target, followed by a verdict.
//!
//! Each command has a `format_*` function (returns `Vec<String>`) for
//! testability and a `print_*` wrapper that writes to stdout.

use crate::generate::{GenerateReport, PlannedPackage};
use std::path::Path;

/// Format a 1-based positional index as 3-digit zero-padded.
fn format_index(pos: usize) -> String {
    format!("{:0>3}", pos)
}

fn plural(n: usize, one: &str, many: &str) -> String {
    if n == 1 {
        format!("{n} {one}")
    } else {
        format!("{n} {many}")
    }
}

/// Indented detail lines shared by build and check output.
fn package_details(package: &PlannedPackage) -> Vec<String> {
    let d = &package.descriptor;
    vec![
        format!("    Version: {}", d.version),
        format!("    Loader: {}", d.modloader),
        format!("    Dependencies: {}", d.dependencies.len()),
    ]
}

/// Format the result of a build.
pub fn format_generate_output(report: &GenerateReport) -> Vec<String> {
    let mut lines = Vec::new();

    for (i, package) in report.packages.iter().enumerate() {
        lines.push(format!(
            "{} {} → {}",
            format_index(i + 1),
            package.game_version,
            package.archive_name()
        ));
        lines.extend(package_details(package));
    }

    if !lines.is_empty() {
        lines.push(String::new());
    }
    let index_name = report
        .index
        .file_name()
        .map(|f| f.to_string_lossy().into_owned())
        .unwrap_or_else(|| report.index.display().to_string());
    lines.push(format!(
        "Generated {} → {}",
        plural(report.packages.len(), "package", "packages"),
        index_name
    ));

    lines
}

/// Print build output to stdout.
pub fn print_generate_output(report: &GenerateReport) {
    for line in format_generate_output(report) {
        println!("{}", line);
    }
}

/// Format the plan produced by `check`.
pub fn format_check_output(packages: &[PlannedPackage], manifest: &Path) -> Vec<String> {
    let mut lines = vec![format!("Manifest: {}", manifest.display())];
    for (i, package) in packages.iter().enumerate() {
        lines.push(format!("{} {}", format_index(i + 1), package.game_version));
        lines.extend(package_details(package));
    }
    lines.push(String::new());
    lines.push(format!(
        "{} valid",
        plural(packages.len(), "entry", "entries")
    ));
    lines
}

/// Print check output to stdout.
pub fn print_check_output(packages: &[PlannedPackage], manifest: &Path) {
    for line in format_check_output(packages, manifest) {
        println!("{}", line);
    }
}
