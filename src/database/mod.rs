//! # Database Tables
//!
//! In-memory view of the host content database that the patchers mutate, plus a loader
//! for the host's on-disk `database/` directory layout.
//!
//! ## Layout
//!
//! ```text
//! <root>/hideout/areas.json        array of hideout areas        (required)
//! <root>/hideout/production.json   array of production recipes   (required)
//! <root>/templates/items.json      item templates keyed by id    (required)
//! <root>/templates/profiles.json   starting profiles keyed by name
//! <root>/locales/global/<lang>.json  flat locale catalog per language
//! ```
//!
//! Locale catalogs use the flat shape: each language is a single map keyed by interface
//! or item id whose values are strings or objects.
//!
//! Tables are always handed to patchers as an explicit `&mut DatabaseTables`; nothing in
//! this crate keeps a global handle on them.

pub mod errors;
pub mod types;

use std::collections::BTreeMap;
use std::fs;
use std::path::{Path, PathBuf};

use log::debug;
use serde::de::DeserializeOwned;
use serde::Serialize;
use serde_json::Value;

pub use errors::DatabaseError;
pub use types::*;

const AREAS_FILE: &str = "hideout/areas.json";
const PRODUCTION_FILE: &str = "hideout/production.json";
const ITEMS_FILE: &str = "templates/items.json";
const PROFILES_FILE: &str = "templates/profiles.json";
const LOCALES_DIR: &str = "locales/global";

#[derive(Debug, Clone, Default, PartialEq)]
pub struct HideoutTables {
    pub areas: Vec<HideoutArea>,
    /// Append-only from this crate's point of view.
    pub production: Vec<Production>,
}

#[derive(Debug, Clone, Default, PartialEq)]
pub struct TemplateTables {
    pub items: BTreeMap<String, ItemTemplate>,
    /// Starting profiles keyed by name. Kept raw: only the donor profile is ever parsed.
    pub profiles: BTreeMap<String, Value>,
}

#[derive(Debug, Clone, Default, PartialEq)]
pub struct LocaleTables {
    /// Language code -> catalog.
    pub global: BTreeMap<String, LocaleCatalog>,
}

/// Mutable tables shared by the stash, secure container and profile patchers.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct DatabaseTables {
    pub hideout: HideoutTables,
    pub templates: TemplateTables,
    pub locales: LocaleTables,
}

impl DatabaseTables {
    /// Load every table this crate touches from a database directory.
    pub fn load<P: AsRef<Path>>(root: P) -> Result<Self, DatabaseError> {
        let root = root.as_ref();

        let tables = DatabaseTables {
            hideout: HideoutTables {
                areas: read_table(root, AREAS_FILE)?,
                production: read_table(root, PRODUCTION_FILE)?,
            },
            templates: TemplateTables {
                items: read_table(root, ITEMS_FILE)?,
                profiles: read_optional_table(root, PROFILES_FILE)?,
            },
            locales: LocaleTables {
                global: read_locales(&root.join(LOCALES_DIR))?,
            },
        };

        debug!(
            "Loaded database from {}: {} areas, {} crafts, {} items, {} profiles, {} locales",
            root.display(),
            tables.hideout.areas.len(),
            tables.hideout.production.len(),
            tables.templates.items.len(),
            tables.templates.profiles.len(),
            tables.locales.global.len()
        );

        Ok(tables)
    }

    /// Write the tables back using the same layout `load` reads.
    ///
    /// The profile table and locale catalogs are only written when non-empty so saving
    /// into a fresh directory does not invent files the source never had.
    pub fn save<P: AsRef<Path>>(&self, root: P) -> Result<(), DatabaseError> {
        let root = root.as_ref();

        write_table(root, AREAS_FILE, &self.hideout.areas)?;
        write_table(root, PRODUCTION_FILE, &self.hideout.production)?;
        write_table(root, ITEMS_FILE, &self.templates.items)?;
        if !self.templates.profiles.is_empty() {
            write_table(root, PROFILES_FILE, &self.templates.profiles)?;
        }
        for (language, catalog) in &self.locales.global {
            write_table(root, &format!("{}/{}.json", LOCALES_DIR, language), catalog)?;
        }

        debug!("Saved database to {}", root.display());
        Ok(())
    }

    /// First hideout area of the given type.
    pub fn hideout_area(&self, area_type: u32) -> Option<&HideoutArea> {
        self.hideout
            .areas
            .iter()
            .find(|area| area.area_type == area_type)
    }

    pub fn hideout_area_mut(&mut self, area_type: u32) -> Option<&mut HideoutArea> {
        self.hideout
            .areas
            .iter_mut()
            .find(|area| area.area_type == area_type)
    }

    pub fn item(&self, id: &str) -> Option<&ItemTemplate> {
        self.templates.items.get(id)
    }
}

fn read_table<T: DeserializeOwned>(root: &Path, relative: &str) -> Result<T, DatabaseError> {
    let path = root.join(relative);
    if !path.exists() {
        return Err(DatabaseError::MissingTable(path));
    }
    parse_file(&path)
}

fn read_optional_table<T: DeserializeOwned + Default>(
    root: &Path,
    relative: &str,
) -> Result<T, DatabaseError> {
    let path = root.join(relative);
    if !path.exists() {
        debug!("Optional table {} not present", path.display());
        return Ok(T::default());
    }
    parse_file(&path)
}

fn parse_file<T: DeserializeOwned>(path: &Path) -> Result<T, DatabaseError> {
    let contents = fs::read_to_string(path).map_err(|e| DatabaseError::io(path, e))?;
    serde_json::from_str(&contents).map_err(|e| DatabaseError::json(path, e))
}

fn read_locales(dir: &Path) -> Result<BTreeMap<String, LocaleCatalog>, DatabaseError> {
    let mut catalogs = BTreeMap::new();
    if !dir.is_dir() {
        return Ok(catalogs);
    }

    let entries = fs::read_dir(dir).map_err(|e| DatabaseError::io(dir, e))?;
    for entry in entries {
        let path: PathBuf = entry.map_err(|e| DatabaseError::io(dir, e))?.path();
        if path.extension().and_then(|ext| ext.to_str()) != Some("json") {
            continue;
        }
        let Some(language) = path.file_stem().and_then(|stem| stem.to_str()) else {
            continue;
        };
        catalogs.insert(language.to_string(), parse_file(&path)?);
    }

    Ok(catalogs)
}

fn write_table<T: Serialize + ?Sized>(
    root: &Path,
    relative: &str,
    value: &T,
) -> Result<(), DatabaseError> {
    let path = root.join(relative);
    if let Some(parent) = path.parent() {
        fs::create_dir_all(parent).map_err(|e| DatabaseError::io(parent, e))?;
    }
    let contents =
        serde_json::to_string_pretty(value).map_err(|e| DatabaseError::json(&path, e))?;
    fs::write(&path, contents).map_err(|e| DatabaseError::io(&path, e))
}
