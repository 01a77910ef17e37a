//! Progressive stash tiers.
//!
//! Tier numbers start at 1 and name a stash item template. Stage indices start at 0 and
//! name an upgrade stage of the stash hideout area: stage 0 is the unbuilt area and the
//! stage unlocking a tier is given by [`stage_index_for_tier`]. Tier 1 is the starting
//! stash; every later tier comes from one configured upgrade, see
//! [`upgrade_offset_for_tier`].

use log::{debug, warn};
use serde_json::{json, Value};
use std::collections::BTreeMap;

use crate::config::{ModConfig, StashUpgrade};
use crate::database::{
    normalize_requirements, Bonus, DatabaseTables, Extra, Grid, GridProps, ItemProps,
    ItemTemplate, Stage,
};
use crate::patch::constants::{
    EDGE_OF_DARKNESS_STASH_ID, GRID_PROTO_ID, LEFT_BEHIND_STASH_ID, PREPARE_FOR_ESCAPE_STASH_ID,
    PROGRESSIVE_STASH_PREFIX_ID, STANDARD_STASH_ID, STASH_AREA, STASH_GRID_WIDTH,
    STASH_PARENT_ID,
};

/// Item template id of a stash tier.
///
/// Tiers 1 to 4 reuse the base game stashes so existing profiles keep working; later
/// tiers get a synthesized id.
pub fn stash_id_for_tier(tier: u32) -> String {
    match tier {
        1 => STANDARD_STASH_ID.to_string(),
        2 => LEFT_BEHIND_STASH_ID.to_string(),
        3 => PREPARE_FOR_ESCAPE_STASH_ID.to_string(),
        4 => EDGE_OF_DARKNESS_STASH_ID.to_string(),
        _ => format!("{}_{}", PROGRESSIVE_STASH_PREFIX_ID, tier),
    }
}

/// Stash area stage that unlocks `tier`.
pub fn stage_index_for_tier(tier: u32) -> u32 {
    tier
}

/// Tier unlocked by `stage`; stage 0 unlocks nothing.
pub fn tier_for_stage(stage: u32) -> Option<u32> {
    (stage > 0).then_some(stage)
}

/// Position in the configured upgrade list describing `tier`.
///
/// `None` for tier 1, the starting stash, which has no upgrade entry.
pub fn upgrade_offset_for_tier(tier: u32) -> Option<usize> {
    tier.checked_sub(2).map(|offset| offset as usize)
}

/// Locale key of the description shown for a stash area stage.
pub fn stage_description_key(stage: u32) -> String {
    format!("hideout_area_{}_stage_{}_description", STASH_AREA, stage)
}

pub fn stash_display_name(depth: i64) -> String {
    format!("Progressive Stash {}x{}", STASH_GRID_WIDTH, depth)
}

fn stage_description(depth: i64) -> String {
    format!("Progressive Stash ({}x{})", STASH_GRID_WIDTH, depth)
}

fn stage_bonus(template_id: &str) -> Bonus {
    Bonus {
        extra: object(json!({
            "value": 0,
            "passive": true,
            "production": false,
            "visible": true
        })),
        ..Bonus::stash_size(template_id)
    }
}

fn object(value: Value) -> Extra {
    match value {
        Value::Object(map) => map,
        _ => Extra::new(),
    }
}

/// Item template for a stash of `depth` rows.
pub fn create_stash_item(id: &str, depth: i64, proto: Option<String>) -> ItemTemplate {
    let name = stash_display_name(depth);

    let grid = Grid {
        name: Some("hideout".to_string()),
        id: Some(format!("{}_hideout_grid", id)),
        parent: Some(id.to_string()),
        props: GridProps {
            cells_h: STASH_GRID_WIDTH,
            cells_v: depth,
            extra: object(json!({
                "filters": [],
                "minCount": 0,
                "maxCount": 0,
                "maxWeight": 0,
                "isSortingTable": false
            })),
        },
        proto: Some(GRID_PROTO_ID.to_string()),
        extra: Extra::new(),
    };

    let mut extra = object(json!({
        "Name": name,
        "ShortName": name,
        "Description": format!("{}\n", name),
        "Weight": 1,
        "BackgroundColor": "blue",
        "Width": 1,
        "Height": 1,
        "StackMaxSize": 1,
        "ItemSound": "generic",
        "Prefab": {"path": "", "rcid": ""},
        "UsePrefab": {"path": "", "rcid": ""},
        "StackObjectsCount": 1,
        "NotShownInSlot": false,
        "ExaminedByDefault": true,
        "ExamineTime": 1
    }));
    extra.extend(object(json!({
        "IsUndiscardable": false,
        "IsUnsaleable": false,
        "IsUnbuyable": false,
        "IsUngivable": false,
        "IsLockedafterEquip": false,
        "QuestItem": false,
        "LootExperience": 20,
        "ExamineExperience": 10,
        "HideEntrails": false,
        "RepairCost": 0,
        "RepairSpeed": 0,
        "ExtraSizeLeft": 0,
        "ExtraSizeRight": 0,
        "ExtraSizeUp": 0,
        "ExtraSizeDown": 0
    })));
    extra.extend(object(json!({
        "ExtraSizeForceAdd": false,
        "MergesWithChildren": false,
        "CanSellOnRagfair": true,
        "CanRequireOnRagfair": true,
        "ConflictingItems": [],
        "Unlootable": false,
        "UnlootableFromSlot": "FirstPrimaryWeapon",
        "UnlootableFromSide": [],
        "AnimationVariantsNumber": 0,
        "DiscardingBlock": false,
        "RagFairCommissionModifier": 1,
        "IsAlwaysAvailableForInsurance": false,
        "DiscardLimit": -1,
        "Slots": [],
        "CanPutIntoDuringTheRaid": true,
        "CantRemoveFromSlotsDuringRaid": []
    })));

    ItemTemplate {
        id: id.to_string(),
        name: Some(name),
        parent: Some(STASH_PARENT_ID.to_string()),
        kind: Some("Item".to_string()),
        props: ItemProps {
            grids: Some(vec![grid]),
            extra,
        },
        proto,
        extra: Extra::new(),
    }
}

/// Generates the stash tiers and writes them into the database tables.
pub struct StashBuilder {
    initial_stash_size: i64,
    stash_upgrades: Vec<StashUpgrade>,
}

impl StashBuilder {
    pub fn new(config: &ModConfig) -> Self {
        Self {
            initial_stash_size: config.initial_stash_size,
            stash_upgrades: config.stash_upgrades.clone(),
        }
    }

    /// Number of tiers, the starting stash included.
    pub fn tier_count(&self) -> u32 {
        u32::try_from(self.stash_upgrades.len())
            .map_or(u32::MAX, |upgrades| upgrades.saturating_add(1))
    }

    fn upgrade_for_tier(&self, tier: u32) -> Option<&StashUpgrade> {
        upgrade_offset_for_tier(tier).and_then(|offset| self.stash_upgrades.get(offset))
    }

    /// Grid depth of a tier.
    pub fn size_for_tier(&self, tier: u32) -> i64 {
        self.upgrade_for_tier(tier)
            .map_or(self.initial_stash_size, |upgrade| upgrade.size)
    }

    /// Stash area stages, keyed by stage index.
    pub fn generate_stages(&self) -> BTreeMap<String, Stage> {
        let mut stages = BTreeMap::new();
        stages.insert("0".to_string(), Stage::default());

        for tier in 1..=self.tier_count() {
            let requirements = self
                .upgrade_for_tier(tier)
                .map(|upgrade| normalize_requirements(&upgrade.requirements))
                .unwrap_or_default();

            let stage = Stage {
                requirements,
                bonuses: vec![stage_bonus(&stash_id_for_tier(tier))],
                ..Stage::default()
            };
            stages.insert(stage_index_for_tier(tier).to_string(), stage);
        }

        stages
    }

    /// Stash templates for tiers 1..=N, each one prototyped on the previous tier.
    pub fn generate_items(&self) -> Vec<ItemTemplate> {
        let mut previous_id: Option<String> = None;

        (1..=self.tier_count())
            .map(|tier| {
                let id = stash_id_for_tier(tier);
                let proto = previous_id.replace(id.clone());
                create_stash_item(&id, self.size_for_tier(tier), proto)
            })
            .collect()
    }

    /// Apply the stash tiers to the tables. Returns the number of created templates.
    ///
    /// Safe to run repeatedly: stages are replaced wholesale, existing templates only get
    /// their depth refreshed and locale entries are overwritten or created once.
    pub fn inject_stashes(&self, tables: &mut DatabaseTables) -> usize {
        let stages = self.generate_stages();
        let items = self.generate_items();

        if !set_hideout_area(tables, stages) {
            warn!("no hideout area of type {} found, stash stages not set", STASH_AREA);
        }
        let created = set_template_items(tables, &items);
        set_stash_locales(tables, &items);

        created
    }
}

fn set_hideout_area(tables: &mut DatabaseTables, stages: BTreeMap<String, Stage>) -> bool {
    match tables.hideout_area_mut(STASH_AREA) {
        Some(area) => {
            area.stages = stages;
            true
        }
        None => false,
    }
}

fn set_template_items(tables: &mut DatabaseTables, items: &[ItemTemplate]) -> usize {
    let mut counter = 0;

    for item in items {
        match tables.templates.items.get_mut(&item.id) {
            Some(existing) => {
                // keep whatever else was set on the template, only follow the size
                let depth = item.grid_depth();
                match (existing.first_grid_mut(), depth) {
                    (Some(grid), Some(depth)) => grid.props.cells_v = depth,
                    _ => debug!("stash template {} has no grid to resize", item.id),
                }
            }
            None => {
                tables
                    .templates
                    .items
                    .insert(item.id.clone(), item.clone());
                counter += 1;
            }
        }
    }

    counter
}

fn set_stash_locales(tables: &mut DatabaseTables, items: &[ItemTemplate]) {
    for catalog in tables.locales.global.values_mut() {
        let standard_entry = catalog.get(STANDARD_STASH_ID).cloned();

        for (tier, item) in (1..).zip(items) {
            let depth = item.grid_depth().unwrap_or_default();
            catalog.insert(
                stage_description_key(stage_index_for_tier(tier)),
                Value::String(stage_description(depth)),
            );

            if !catalog.contains_key(&item.id) {
                if let Some(entry) = &standard_entry {
                    catalog.insert(item.id.clone(), entry.clone());
                }
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_stash_id_for_known_tiers() {
        assert_eq!(stash_id_for_tier(1), STANDARD_STASH_ID);
        assert_eq!(stash_id_for_tier(2), LEFT_BEHIND_STASH_ID);
        assert_eq!(stash_id_for_tier(3), PREPARE_FOR_ESCAPE_STASH_ID);
        assert_eq!(stash_id_for_tier(4), EDGE_OF_DARKNESS_STASH_ID);
    }

    #[test]
    fn test_stash_id_for_synthesized_tiers() {
        assert_eq!(stash_id_for_tier(5), "trap_progressive_stash_5");
        assert_eq!(stash_id_for_tier(12), "trap_progressive_stash_12");
        assert_eq!(stash_id_for_tier(5), stash_id_for_tier(5));
    }

    #[test]
    fn test_tier_and_stage_mapping() {
        assert_eq!(tier_for_stage(0), None);
        for tier in 1..10 {
            assert_eq!(tier_for_stage(stage_index_for_tier(tier)), Some(tier));
        }
        assert_eq!(upgrade_offset_for_tier(0), None);
        assert_eq!(upgrade_offset_for_tier(1), None);
        assert_eq!(upgrade_offset_for_tier(2), Some(0));
        assert_eq!(upgrade_offset_for_tier(7), Some(5));
    }

    #[test]
    fn test_stage_description_key() {
        assert_eq!(stage_description_key(4), "hideout_area_3_stage_4_description");
    }

    #[test]
    fn test_create_stash_item_shape() {
        let item = create_stash_item("trap_progressive_stash_5", 42, Some("prev".to_string()));
        assert_eq!(item.name.as_deref(), Some("Progressive Stash 10x42"));
        assert_eq!(item.parent.as_deref(), Some(STASH_PARENT_ID));
        assert_eq!(item.proto.as_deref(), Some("prev"));

        let grid = item.first_grid().unwrap();
        assert_eq!(grid.id.as_deref(), Some("trap_progressive_stash_5_hideout_grid"));
        assert_eq!(grid.parent.as_deref(), Some("trap_progressive_stash_5"));
        assert_eq!(grid.props.cells_h, 10);
        assert_eq!(grid.props.cells_v, 42);
        assert_eq!(item.props.extra.get("Name"), Some(&json!("Progressive Stash 10x42")));
        assert_eq!(item.props.extra.get("ExamineTime"), Some(&json!(1)));
        assert_eq!(item.props.extra.get("ExtraSizeDown"), Some(&json!(0)));
        assert_eq!(item.props.extra.get("DiscardLimit"), Some(&json!(-1)));
        assert_eq!(grid.props.extra.get("filters"), Some(&json!([])));
    }

    #[test]
    fn test_stage_bonus_flags() {
        let bonus = stage_bonus(STANDARD_STASH_ID);
        assert!(bonus.is_stash_size());
        assert_eq!(bonus.extra.get("value"), Some(&json!(0)));
        assert_eq!(bonus.extra.get("passive"), Some(&json!(true)));
        assert_eq!(bonus.extra.get("production"), Some(&json!(false)));
        assert_eq!(bonus.extra.get("visible"), Some(&json!(true)));
    }

    #[test]
    fn test_tier_count_includes_initial_stash() {
        let builder = StashBuilder::new(&ModConfig::default());
        assert_eq!(builder.tier_count(), 6);
        assert_eq!(builder.size_for_tier(1), 10);
        assert_eq!(builder.size_for_tier(6), 68);
    }

    #[test]
    fn test_zero_upgrades() {
        let config = ModConfig {
            stash_upgrades: Vec::new(),
            initial_stash_size: 28,
            ..ModConfig::default()
        };
        let builder = StashBuilder::new(&config);

        let stages = builder.generate_stages();
        assert_eq!(stages.len(), 2);
        assert!(stages["0"].bonuses.is_empty());
        assert_eq!(
            stages["1"].bonuses[0].template_id.as_deref(),
            Some(STANDARD_STASH_ID)
        );

        let items = builder.generate_items();
        assert_eq!(items.len(), 1);
        assert_eq!(items[0].grid_depth(), Some(28));
        assert!(items[0].proto.is_none());
    }
}
