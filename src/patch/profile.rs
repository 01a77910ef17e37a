//! Starting profile built around the tier-1 stash.
//!
//! The new profile is copy-constructed from the donor profile. Fields rewritten on each
//! faction side:
//!
//! - `Hideout.Areas[type == 3].level` is reset to 1,
//! - `Bonuses`: the first `StashSize` entry is retargeted at the tier-1 stash and any
//!   other `StashSize` entry is dropped,
//! - `Encyclopedia[<tier-1 stash>]` is set to `false`,
//! - the inventory item built on the donor stash template now uses the tier-1 stash and
//!   `Inventory.stash` points at it,
//! - the item in the `SecuredContainer` slot becomes the configured starting container.
//!
//! Every other field is copied as-is.

use log::{debug, warn};

use crate::config::ModConfig;
use crate::database::{
    AreaState, Bonus, CharacterTemplate, DatabaseTables, HideoutState, InventoryItem,
    InventoryTemplate, ProfileSide, ProfileTemplate,
};
use crate::patch::constants::{
    DONOR_PROFILE, DONOR_STASH_ID, PROGRESSIVE_PROFILE, SECURED_CONTAINER_SLOT, STASH_AREA,
};
use crate::patch::stash::stash_id_for_tier;
use crate::patch::SecureContainerKind;

/// Playable factions; every profile template has one side per faction.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Faction {
    Bear,
    Usec,
}

impl Faction {
    pub const ALL: [Faction; 2] = [Faction::Bear, Faction::Usec];

    pub fn side(self, template: &ProfileTemplate) -> &ProfileSide {
        match self {
            Faction::Bear => &template.bear,
            Faction::Usec => &template.usec,
        }
    }
}

pub struct ProfileTemplateBuilder {
    starting_secure_container: SecureContainerKind,
}

impl ProfileTemplateBuilder {
    pub fn new(config: &ModConfig) -> Self {
        Self {
            starting_secure_container: config.profile_template.starting_secure_container,
        }
    }

    /// Store the progressive profile next to the donor.
    ///
    /// Returns `false`, leaving the table untouched, when the donor profile is missing or
    /// does not look like a profile template.
    pub fn build(&self, tables: &mut DatabaseTables) -> bool {
        let Some(raw_donor) = tables.templates.profiles.get(DONOR_PROFILE) else {
            debug!("donor profile '{}' not found", DONOR_PROFILE);
            return false;
        };

        let donor: ProfileTemplate = match serde_json::from_value(raw_donor.clone()) {
            Ok(donor) => donor,
            Err(e) => {
                warn!("donor profile '{}' has an unexpected shape: {}", DONOR_PROFILE, e);
                return false;
            }
        };

        match serde_json::to_value(self.progressive_template(&donor)) {
            Ok(value) => {
                tables
                    .templates
                    .profiles
                    .insert(PROGRESSIVE_PROFILE.to_string(), value);
                true
            }
            Err(e) => {
                warn!("failed to serialize profile '{}': {}", PROGRESSIVE_PROFILE, e);
                false
            }
        }
    }

    pub fn progressive_template(&self, donor: &ProfileTemplate) -> ProfileTemplate {
        ProfileTemplate {
            bear: self.progressive_side(Faction::Bear.side(donor)),
            usec: self.progressive_side(Faction::Usec.side(donor)),
            extra: donor.extra.clone(),
        }
    }

    fn progressive_side(&self, donor: &ProfileSide) -> ProfileSide {
        ProfileSide {
            character: self.progressive_character(&donor.character),
            extra: donor.extra.clone(),
        }
    }

    fn progressive_character(&self, donor: &CharacterTemplate) -> CharacterTemplate {
        let stash_id = stash_id_for_tier(1);

        let areas = donor
            .hideout
            .areas
            .iter()
            .map(|area| AreaState {
                area_type: area.area_type,
                level: if area.area_type == STASH_AREA { 1 } else { area.level },
                extra: area.extra.clone(),
            })
            .collect();

        let bonuses = progressive_bonuses(&donor.bonuses, &stash_id);

        let mut encyclopedia = donor.encyclopedia.clone();
        encyclopedia.insert(stash_id.clone(), false);

        CharacterTemplate {
            hideout: HideoutState {
                areas,
                extra: donor.hideout.extra.clone(),
            },
            bonuses,
            encyclopedia,
            inventory: self.progressive_inventory(&donor.inventory, &stash_id),
            extra: donor.extra.clone(),
        }
    }

    fn progressive_inventory(&self, donor: &InventoryTemplate, stash_id: &str) -> InventoryTemplate {
        let mut stash = donor.stash.clone();

        let items = donor
            .items
            .iter()
            .map(|item| {
                let template_id = if item.template_id == DONOR_STASH_ID {
                    stash = item.id.clone();
                    stash_id.to_string()
                } else if item.slot_id.as_deref() == Some(SECURED_CONTAINER_SLOT) {
                    self.starting_secure_container.item_id().to_string()
                } else {
                    item.template_id.clone()
                };

                InventoryItem {
                    id: item.id.clone(),
                    template_id,
                    slot_id: item.slot_id.clone(),
                    extra: item.extra.clone(),
                }
            })
            .collect();

        InventoryTemplate {
            items,
            stash,
            extra: donor.extra.clone(),
        }
    }
}

/// Retarget the donor's first `StashSize` bonus at `stash_id` and drop the others.
///
/// The retargeted entry keeps its position and host fields (`id`, flags). A new bonus is
/// appended only when the donor had none.
fn progressive_bonuses(donor: &[Bonus], stash_id: &str) -> Vec<Bonus> {
    let mut retargeted = false;
    let mut bonuses: Vec<Bonus> = donor
        .iter()
        .filter_map(|bonus| {
            if !bonus.is_stash_size() {
                return Some(bonus.clone());
            }
            if retargeted {
                return None;
            }
            retargeted = true;
            Some(Bonus {
                template_id: Some(stash_id.to_string()),
                ..bonus.clone()
            })
        })
        .collect();

    if !retargeted {
        bonuses.push(Bonus::stash_size(stash_id));
    }
    bonuses
}
