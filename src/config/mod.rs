//! # Configuration Management Module
//!
//! Loads the mod configuration (`config/config.json`) that drives every patcher.
//!
//! ## Configuration File Format
//!
//! ```json
//! {
//!   "debug": false,
//!   "initial_stash_size": 10,
//!   "stash_upgrades": [
//!     { "size": 20, "requirements": [
//!       { "type": "Item", "templateId": "5449016a4bdc2d6f028b456f", "count": 50000 }
//!     ] }
//!   ],
//!   "secure_containers": {
//!     "alpha": { "dimensions": [2, 2], "requirements": [], "not_craftable": true }
//!   }
//! }
//! ```
//!
//! - `stash_upgrades` is ordered: entry `k` describes stash tier `k + 2`, tier 1 being the
//!   initial stash of `initial_stash_size` rows.
//! - `secure_containers` only accepts the known container names; any other key is a
//!   parse error.
//! - `debug`, `disabled` and `not_craftable` default to `false` when absent.
//!
//! ## Usage
//!
//! ```rust,no_run
//! use progressive_stash::config::ModConfig;
//!
//! fn main() -> anyhow::Result<()> {
//!     let config = ModConfig::load("config/config.json")?;
//!     println!("Tiers: {}", config.stash_upgrades.len() + 1);
//!     Ok(())
//! }
//! ```

use anyhow::{anyhow, Result};
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::fs;
use std::path::Path;

use crate::database::Requirement;
use crate::patch::constants::{ROUBLES_ID, STASH_AREA, WORKBENCH_AREA};
use crate::patch::SecureContainerKind;

/// One configured stash upgrade.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct StashUpgrade {
    /// Grid depth (rows) of the stash unlocked by this upgrade.
    pub size: i64,
    #[serde(default)]
    pub requirements: Vec<Requirement>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SecureContainerConfig {
    /// When true no workbench craft is generated. Dimensions still apply.
    #[serde(default)]
    pub not_craftable: bool,
    /// `[width, depth]` of the container grid.
    pub dimensions: (i64, i64),
    #[serde(default)]
    pub requirements: Vec<Requirement>,
}

impl SecureContainerConfig {
    pub fn is_craftable(&self) -> bool {
        !self.not_craftable
    }
}

/// Settings of the generated starting profile.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ProfileTemplateConfig {
    #[serde(default = "default_profile_enabled")]
    pub enabled: bool,
    /// Container placed in the secured container slot of the new profile.
    #[serde(default = "default_starting_secure_container")]
    pub starting_secure_container: SecureContainerKind,
}

fn default_profile_enabled() -> bool {
    true
}

fn default_starting_secure_container() -> SecureContainerKind {
    SecureContainerKind::Pouch
}

impl Default for ProfileTemplateConfig {
    fn default() -> Self {
        Self {
            enabled: default_profile_enabled(),
            starting_secure_container: default_starting_secure_container(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ModConfig {
    /// Skip every patch while still loading.
    #[serde(default)]
    pub disabled: bool,
    /// Log per-step summaries.
    #[serde(default)]
    pub debug: bool,
    pub initial_stash_size: i64,
    #[serde(default)]
    pub stash_upgrades: Vec<StashUpgrade>,
    #[serde(default)]
    pub secure_containers: BTreeMap<SecureContainerKind, SecureContainerConfig>,
    #[serde(default)]
    pub profile_template: ProfileTemplateConfig,
}

impl ModConfig {
    /// Load configuration from a file
    pub fn load<P: AsRef<Path>>(path: P) -> Result<Self> {
        let path = path.as_ref();
        let content = fs::read_to_string(path)
            .map_err(|e| anyhow!("Failed to read config file {}: {}", path.display(), e))?;

        Self::from_json(&content)
            .map_err(|e| anyhow!("Failed to parse config file {}: {}", path.display(), e))
    }

    pub fn from_json(content: &str) -> Result<Self> {
        Ok(serde_json::from_str(content)?)
    }

    /// Create a default configuration file
    pub fn create_default<P: AsRef<Path>>(path: P) -> Result<()> {
        let path = path.as_ref();
        let content = serde_json::to_string_pretty(&ModConfig::default())
            .map_err(|e| anyhow!("Failed to serialize default config: {}", e))?;

        if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
            fs::create_dir_all(parent)
                .map_err(|e| anyhow!("Failed to create {}: {}", parent.display(), e))?;
        }
        fs::write(path, content)
            .map_err(|e| anyhow!("Failed to write config file {}: {}", path.display(), e))?;

        Ok(())
    }

    /// Number of stash tiers, the initial stash included.
    pub fn tier_count(&self) -> usize {
        self.stash_upgrades.len() + 1
    }
}

impl Default for ModConfig {
    fn default() -> Self {
        let roubles = |count| Requirement::item(ROUBLES_ID, count);

        let stash_upgrades = vec![
            StashUpgrade {
                size: 20,
                requirements: vec![roubles(50_000)],
            },
            StashUpgrade {
                size: 30,
                requirements: vec![roubles(150_000), Requirement::area(WORKBENCH_AREA, 1)],
            },
            StashUpgrade {
                size: 40,
                requirements: vec![roubles(400_000), Requirement::area(WORKBENCH_AREA, 2)],
            },
            StashUpgrade {
                size: 50,
                requirements: vec![
                    roubles(1_000_000),
                    Requirement::area(WORKBENCH_AREA, 3),
                    Requirement::skill("Memory", 3),
                ],
            },
            StashUpgrade {
                size: 68,
                requirements: vec![roubles(2_500_000), Requirement::area(STASH_AREA, 5)],
            },
        ];

        let mut secure_containers = BTreeMap::new();
        secure_containers.insert(
            SecureContainerKind::Pouch,
            SecureContainerConfig {
                not_craftable: true,
                dimensions: (2, 2),
                requirements: Vec::new(),
            },
        );
        secure_containers.insert(
            SecureContainerKind::Alpha,
            SecureContainerConfig {
                not_craftable: false,
                dimensions: (2, 2),
                requirements: vec![roubles(100_000)],
            },
        );
        secure_containers.insert(
            SecureContainerKind::Beta,
            SecureContainerConfig {
                not_craftable: false,
                dimensions: (3, 2),
                requirements: vec![
                    roubles(300_000),
                    Requirement::item(SecureContainerKind::Alpha.item_id(), 1),
                ],
            },
        );
        secure_containers.insert(
            SecureContainerKind::Epsilon,
            SecureContainerConfig {
                not_craftable: false,
                dimensions: (4, 2),
                requirements: vec![
                    roubles(800_000),
                    Requirement::item(SecureContainerKind::Beta.item_id(), 1),
                ],
            },
        );
        secure_containers.insert(
            SecureContainerKind::Gamma,
            SecureContainerConfig {
                not_craftable: false,
                dimensions: (3, 3),
                requirements: vec![
                    roubles(1_500_000),
                    Requirement::item(SecureContainerKind::Epsilon.item_id(), 1),
                ],
            },
        );
        secure_containers.insert(
            SecureContainerKind::Kappa,
            SecureContainerConfig {
                not_craftable: true,
                dimensions: (4, 3),
                requirements: Vec::new(),
            },
        );

        ModConfig {
            disabled: false,
            debug: false,
            initial_stash_size: 10,
            stash_upgrades,
            secure_containers,
            profile_template: ProfileTemplateConfig::default(),
        }
    }
}
