//! Database patchers driven by the mod configuration.
//!
//! - [`stash`]: progressive stash tiers (hideout stages, stash templates, locales)
//! - [`secure_containers`]: workbench crafts and grid sizes of secure containers
//! - [`profile`]: starting profile using the tier-1 stash
//!
//! The stash and secure container patchers touch disjoint tables and may run in any
//! order. The profile builder reads the ids the other two establish and runs last.

pub mod constants;
pub mod profile;
pub mod secure_containers;
pub mod stash;

pub use profile::{Faction, ProfileTemplateBuilder};
pub use secure_containers::{create_craft, SecureContainerKind, SecureContainersController};
pub use stash::{
    create_stash_item, stage_description_key, stage_index_for_tier, stash_id_for_tier,
    tier_for_stage, upgrade_offset_for_tier, StashBuilder,
};
