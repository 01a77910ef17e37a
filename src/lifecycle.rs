//! Two-phase startup contract with the host server.
//!
//! [`ProgressiveStashMod::load`] runs early: it reads the configuration and builds the
//! patchers, but must not touch the database because the host has not loaded its base
//! content yet. [`ProgressiveStashMod::delayed_load`] runs once the tables are populated
//! and applies every patch.

use anyhow::Result;
use log::info;
use std::path::Path;

use crate::config::ModConfig;
use crate::database::DatabaseTables;
use crate::logutil::{mod_display_name, DebugLog};
use crate::patch::{ProfileTemplateBuilder, SecureContainersController, StashBuilder};

/// Counters gathered while patching; informational only.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct PatchReport {
    pub stashes_created: usize,
    pub crafts_injected: usize,
    pub containers_tweaked: usize,
    pub profile_created: bool,
    /// True when the configuration disabled the mod and nothing was patched.
    pub skipped: bool,
}

pub struct ProgressiveStashMod {
    config: ModConfig,
    debug: DebugLog,
    stash_builder: StashBuilder,
    secure_containers: SecureContainersController,
    profile_builder: Option<ProfileTemplateBuilder>,
}

impl ProgressiveStashMod {
    /// Early phase: read the configuration file and prepare the patchers.
    pub fn load<P: AsRef<Path>>(config_path: P) -> Result<Self> {
        let config = ModConfig::load(config_path)?;
        Ok(Self::from_config(config))
    }

    pub fn from_config(config: ModConfig) -> Self {
        let debug = DebugLog::new(config.debug);
        let profile_builder = config
            .profile_template
            .enabled
            .then(|| ProfileTemplateBuilder::new(&config));

        let this = Self {
            stash_builder: StashBuilder::new(&config),
            secure_containers: SecureContainersController::new(&config),
            profile_builder,
            debug,
            config,
        };

        this.debug.log("debug mode enabled");
        info!("===> Loading {}", mod_display_name(true));
        this
    }

    pub fn config(&self) -> &ModConfig {
        &self.config
    }

    /// Late phase: patch the fully loaded tables.
    pub fn delayed_load(&self, tables: &mut DatabaseTables) -> PatchReport {
        if self.config.disabled {
            info!("===> {} is disabled, database left untouched", mod_display_name(true));
            return PatchReport {
                skipped: true,
                ..PatchReport::default()
            };
        }

        let mut report = PatchReport::default();

        report.stashes_created = self.stash_builder.inject_stashes(tables);
        if report.stashes_created > 0 {
            self.debug.log(&format!(
                "injected {} new progressive stashes into database",
                report.stashes_created
            ));
        }

        report.crafts_injected = self.secure_containers.inject_crafts(tables);
        if report.crafts_injected > 0 {
            self.debug.log(&format!(
                "injected {} new workbench crafts",
                report.crafts_injected
            ));
        }

        report.containers_tweaked = self.secure_containers.tweak_container_dimensions(tables);
        if report.containers_tweaked > 0 {
            self.debug.log(&format!(
                "{} secure containers dimensions updated",
                report.containers_tweaked
            ));
        }

        // reads the tier-1 stash and container ids set up above, keep it last
        if let Some(builder) = &self.profile_builder {
            report.profile_created = builder.build(tables);
            if report.profile_created {
                self.debug.log("progressive starting profile created");
            } else {
                self.debug.log("no starting profile created");
            }
        }

        info!("===> Successfully loaded {}", mod_display_name(true));
        report
    }
}
