//! # core-mods
//!
//! Publishes the "core mods" every Beat Saber Quest install needs, as one
//! installable `.qmod` package per game version plus a static download page.
//!
//! # Pipeline
//!
//! `core_mods.json` is the single source of truth. A build reads it once and
//! walks its entries in file order:
//!
//! ```text
//! core_mods.json  →  mod.json (transient)  →  <version>.qmod  →  index.html link
//! ```
//!
//! Each package version is derived from the entry's `lastUpdated` timestamp,
//! and the archive's file times are set to that same instant, so rebuilding an
//! unchanged manifest produces the same versions and timestamps.
//!
//! # Module Map
//!
//! | Module | Role |
//! |--------|------|
//! | [`manifest`] | `core_mods.json` types and order-preserving loading |
//! | [`date`] | `lastUpdated` parsing and the semver-date version format |
//! | [`descriptor`] | `mod.json` construction and loader selection |
//! | [`archive`] | [`archive::Archiver`] seam, zip implementation, file time stamping |
//! | [`index`] | Incrementally written `index.html` |
//! | [`generate`] | The build loop tying the above together |
//! | [`config`] | Optional `core-mods.toml` loading, merging, validation; run paths |
//! | [`output`] | CLI output formatting |
//!
//! # Design Decisions
//!
//! ## Sequential by Construction
//!
//! All entries share one transient `mod.json` path in the deploy root, and the
//! index is append-only, so the loop processes one entry to completion before
//! starting the next. There is nothing to parallelize worth the ordering risk.
//!
//! ## Fail Fast
//!
//! Any error stops the run. A published index that silently skips a game
//! version is worse than a failed deploy job.
//!
//! ## Loader Selection by String Order
//!
//! Game versions newer than `1.28.0_4124311467` use Scotland2, older ones
//! QuestLoader. The comparison is plain string ordering; see
//! [`descriptor::resolve_loader`].

pub mod archive;
pub mod config;
pub mod date;
pub mod descriptor;
pub mod generate;
pub mod index;
pub mod manifest;
pub mod output;

#[cfg(test)]
pub(crate) mod test_helpers;
