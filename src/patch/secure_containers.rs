//! Secure container crafts and grid sizes.

use log::debug;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::fmt;

use crate::config::{ModConfig, SecureContainerConfig};
use crate::database::{normalize_requirements, DatabaseTables, Extra, Production, Requirement};
use crate::patch::constants::{
    ALPHA_CONTAINER_ID, BETA_CONTAINER_ID, EPSILON_CONTAINER_ID, GAMMA_CONTAINER_ID,
    KAPPA_CONTAINER_ID, WAIST_POUCH_ID, WORKBENCH_AREA,
};

/// The secure containers the configuration may name.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SecureContainerKind {
    Pouch,
    Alpha,
    Beta,
    Epsilon,
    Gamma,
    Kappa,
}

impl SecureContainerKind {
    pub const ALL: [SecureContainerKind; 6] = [
        SecureContainerKind::Pouch,
        SecureContainerKind::Alpha,
        SecureContainerKind::Beta,
        SecureContainerKind::Epsilon,
        SecureContainerKind::Gamma,
        SecureContainerKind::Kappa,
    ];

    /// Item template id of the container.
    pub fn item_id(self) -> &'static str {
        match self {
            SecureContainerKind::Pouch => WAIST_POUCH_ID,
            SecureContainerKind::Alpha => ALPHA_CONTAINER_ID,
            SecureContainerKind::Beta => BETA_CONTAINER_ID,
            SecureContainerKind::Epsilon => EPSILON_CONTAINER_ID,
            SecureContainerKind::Gamma => GAMMA_CONTAINER_ID,
            SecureContainerKind::Kappa => KAPPA_CONTAINER_ID,
        }
    }

    /// Name used as key in the configuration.
    pub fn config_key(self) -> &'static str {
        match self {
            SecureContainerKind::Pouch => "pouch",
            SecureContainerKind::Alpha => "alpha",
            SecureContainerKind::Beta => "beta",
            SecureContainerKind::Epsilon => "epsilon",
            SecureContainerKind::Gamma => "gamma",
            SecureContainerKind::Kappa => "kappa",
        }
    }
}

impl fmt::Display for SecureContainerKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.config_key())
    }
}

/// Workbench recipe producing `item_id` from `requirements`.
pub fn create_craft(item_id: &str, requirements: &[Requirement]) -> Production {
    Production {
        id: format!("{}_craft", item_id),
        area_type: WORKBENCH_AREA,
        requirements: normalize_requirements(requirements),
        production_time: 0,
        end_product: item_id.to_string(),
        continuous: false,
        count: 1,
        production_limit_count: 1,
        is_encoded: false,
        locked: false,
        need_fuel_for_all_production_time: false,
        extra: Extra::new(),
    }
}

pub struct SecureContainersController {
    secure_containers: BTreeMap<SecureContainerKind, SecureContainerConfig>,
}

impl SecureContainersController {
    pub fn new(config: &ModConfig) -> Self {
        Self {
            secure_containers: config.secure_containers.clone(),
        }
    }

    /// One recipe per configured container that is craftable.
    pub fn generate_crafts(&self) -> Vec<Production> {
        self.secure_containers
            .iter()
            .filter(|(_, container)| container.is_craftable())
            .map(|(kind, container)| create_craft(kind.item_id(), &container.requirements))
            .collect()
    }

    /// Append the generated recipes to the production table.
    ///
    /// No duplicate check: the host restarts on configuration changes, so this runs once
    /// per fresh table.
    pub fn inject_crafts(&self, tables: &mut DatabaseTables) -> usize {
        let crafts = self.generate_crafts();
        let counter = crafts.len();
        tables.hideout.production.extend(crafts);
        counter
    }

    /// Resize the grid of every configured container present in the item table.
    pub fn tweak_container_dimensions(&self, tables: &mut DatabaseTables) -> usize {
        let mut counter = 0;

        for (kind, container) in &self.secure_containers {
            let (width, depth) = container.dimensions;
            let grid = tables
                .templates
                .items
                .get_mut(kind.item_id())
                .and_then(|item| item.first_grid_mut());

            match grid {
                Some(grid) => {
                    grid.props.cells_h = width;
                    grid.props.cells_v = depth;
                    counter += 1;
                }
                None => debug!("secure container {} has no template to resize", kind),
            }
        }

        counter
    }
}
