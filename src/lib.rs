//! # Progressive Stash
//!
//! Configuration-driven patches for a game server's hideout content database. At startup
//! the stash becomes a chain of upgradable tiers, secure containers get workbench crafts
//! and new grid sizes, and a starting profile using the first stash tier is added.
//!
//! ## Features
//!
//! - **Progressive stash**: one hideout stage and one stash template per configured tier,
//!   with prototype chaining and per-language stage descriptions.
//! - **Secure containers**: optional workbench crafts and grid size overrides for the six
//!   known containers.
//! - **Starting profile**: a copy of the premium starting profile reset to tier 1.
//! - **Idempotent**: re-applying with the same configuration refreshes values in place.
//!
//! ## Quick Start
//!
//! ```rust,no_run
//! use progressive_stash::database::DatabaseTables;
//! use progressive_stash::lifecycle::ProgressiveStashMod;
//!
//! fn main() -> anyhow::Result<()> {
//!     // Early phase: configuration only
//!     let patcher = ProgressiveStashMod::load("config/config.json")?;
//!
//!     // Late phase: base content is loaded, patch it
//!     let mut tables = DatabaseTables::load("database")?;
//!     let report = patcher.delayed_load(&mut tables);
//!     println!("created {} stash templates", report.stashes_created);
//!     tables.save("database")?;
//!     Ok(())
//! }
//! ```
//!
//! ## Module Organization
//!
//! - [`config`] - Mod configuration loading and defaults
//! - [`database`] - Typed tables and the database directory adapter
//! - [`patch`] - Stash tier generator, secure container patcher, profile builder
//! - [`lifecycle`] - Two-phase load contract tying the patchers together
//! - [`logutil`] - Display name and debug-only logging

pub mod config;
pub mod database;
pub mod lifecycle;
pub mod logutil;
pub mod patch;
