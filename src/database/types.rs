//! Typed views over the host content tables.
//!
//! Only the fields this crate reads or rewrites are modelled. Everything else is kept in
//! an `extra` map so a load/patch/save cycle hands the host back its data untouched.

use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};
use std::collections::BTreeMap;

/// Unmodelled JSON fields carried alongside the typed ones.
pub type Extra = Map<String, Value>;

/// One language variant of the global locale table, keyed by interface or item id.
pub type LocaleCatalog = Map<String, Value>;

pub const ITEM_REQUIREMENT: &str = "Item";
pub const STASH_SIZE_BONUS: &str = "StashSize";

// ============================================================================
// Requirements
// ============================================================================

/// Condition attached to a hideout stage or a production recipe.
///
/// The host knows several kinds (`Item`, `Area`, `Skill`, `TraderLoyalty`, `Tool`, ...)
/// with different fields, so the record is kept as raw JSON and only inspected through
/// its `type` tag.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Requirement(pub Map<String, Value>);

impl Requirement {
    /// Possession of `count` items of `template_id`.
    pub fn item(template_id: &str, count: u64) -> Self {
        let mut fields = Map::new();
        fields.insert("templateId".to_string(), Value::from(template_id));
        fields.insert("count".to_string(), Value::from(count));
        fields.insert("isFunctional".to_string(), Value::Bool(false));
        fields.insert("type".to_string(), Value::from(ITEM_REQUIREMENT));
        Self(fields)
    }

    /// Another hideout area built up to `level`.
    pub fn area(area_type: u32, level: u32) -> Self {
        let mut fields = Map::new();
        fields.insert("areaType".to_string(), Value::from(area_type));
        fields.insert("requiredLevel".to_string(), Value::from(level));
        fields.insert("type".to_string(), Value::from("Area"));
        Self(fields)
    }

    /// A character skill at `level` or above.
    pub fn skill(name: &str, level: u32) -> Self {
        let mut fields = Map::new();
        fields.insert("skillName".to_string(), Value::from(name));
        fields.insert("skillLevel".to_string(), Value::from(level));
        fields.insert("type".to_string(), Value::from("Skill"));
        Self(fields)
    }

    pub fn with_functional(mut self, functional: bool) -> Self {
        self.0
            .insert("isFunctional".to_string(), Value::Bool(functional));
        self
    }

    /// The `type` tag, when present.
    pub fn kind(&self) -> Option<&str> {
        self.0.get("type").and_then(Value::as_str)
    }

    pub fn is_item(&self) -> bool {
        self.kind() == Some(ITEM_REQUIREMENT)
    }

    pub fn is_functional(&self) -> Option<bool> {
        self.0.get("isFunctional").and_then(Value::as_bool)
    }

    pub fn template_id(&self) -> Option<&str> {
        self.0.get("templateId").and_then(Value::as_str)
    }

    /// Copy of this requirement with item requirements accepting damaged items.
    ///
    /// Only `Item` requirements are touched; every other kind is returned as-is.
    pub fn normalized(&self) -> Self {
        let mut requirement = self.clone();
        if requirement.is_item() {
            requirement
                .0
                .insert("isFunctional".to_string(), Value::Bool(false));
        }
        requirement
    }
}

/// Normalize a whole requirement list, keeping its order.
pub fn normalize_requirements(requirements: &[Requirement]) -> Vec<Requirement> {
    requirements.iter().map(Requirement::normalized).collect()
}

// ============================================================================
// Hideout areas
// ============================================================================

/// Bonus granted by a hideout stage, or held by a character profile.
///
/// Only the kind and the target template are modelled; `value`, `passive`, `id` and the
/// other flags stay in `extra` exactly as the host wrote them.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Bonus {
    #[serde(rename = "type")]
    pub kind: String,
    #[serde(rename = "templateId", default, skip_serializing_if = "Option::is_none")]
    pub template_id: Option<String>,
    #[serde(flatten)]
    pub extra: Extra,
}

impl Bonus {
    /// Bare `StashSize` bonus pointing at a stash template.
    pub fn stash_size(template_id: &str) -> Self {
        Self {
            kind: STASH_SIZE_BONUS.to_string(),
            template_id: Some(template_id.to_string()),
            extra: Extra::new(),
        }
    }

    pub fn is_stash_size(&self) -> bool {
        self.kind == STASH_SIZE_BONUS
    }
}

/// One upgrade level of a hideout area.
///
/// Requirements and bonuses are rewritten by the stash patcher; the remaining stage
/// fields (`slots`, `constructionTime`, `improvements`, ...) live in `extra`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Stage {
    pub requirements: Vec<Requirement>,
    pub bonuses: Vec<Bonus>,
    #[serde(flatten)]
    pub extra: Extra,
}

impl Default for Stage {
    /// The unbuilt stage: no requirement, no bonus, instant.
    fn default() -> Self {
        let mut extra = Extra::new();
        extra.insert("improvements".to_string(), Value::Array(Vec::new()));
        extra.insert("slots".to_string(), Value::from(0));
        extra.insert("constructionTime".to_string(), Value::from(0));
        extra.insert("description".to_string(), Value::from(""));
        extra.insert("autoUpgrade".to_string(), Value::Bool(false));
        extra.insert("displayInterface".to_string(), Value::Bool(true));

        Self {
            requirements: Vec::new(),
            bonuses: Vec::new(),
            extra,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct HideoutArea {
    #[serde(rename = "type")]
    pub area_type: u32,
    /// Stage mapping keyed by the stage index rendered as a string ("0", "1", ...).
    pub stages: BTreeMap<String, Stage>,
    #[serde(flatten)]
    pub extra: Extra,
}

// ============================================================================
// Production recipes
// ============================================================================

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Production {
    #[serde(rename = "_id")]
    pub id: String,
    pub area_type: u32,
    #[serde(default)]
    pub requirements: Vec<Requirement>,
    #[serde(default)]
    pub production_time: u64,
    pub end_product: String,
    #[serde(default)]
    pub continuous: bool,
    #[serde(default)]
    pub count: u32,
    #[serde(default)]
    pub production_limit_count: u32,
    #[serde(default)]
    pub is_encoded: bool,
    #[serde(default)]
    pub locked: bool,
    #[serde(default)]
    pub need_fuel_for_all_production_time: bool,
    #[serde(flatten)]
    pub extra: Extra,
}

// ============================================================================
// Item templates
// ============================================================================

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ItemTemplate {
    #[serde(rename = "_id")]
    pub id: String,
    #[serde(rename = "_name", default, skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    #[serde(rename = "_parent", default, skip_serializing_if = "Option::is_none")]
    pub parent: Option<String>,
    #[serde(rename = "_type", default, skip_serializing_if = "Option::is_none")]
    pub kind: Option<String>,
    #[serde(rename = "_props")]
    pub props: ItemProps,
    /// Template this one was derived from.
    #[serde(rename = "_proto", default, skip_serializing_if = "Option::is_none")]
    pub proto: Option<String>,
    #[serde(flatten)]
    pub extra: Extra,
}

impl ItemTemplate {
    pub fn first_grid(&self) -> Option<&Grid> {
        self.props.grids.as_ref().and_then(|grids| grids.first())
    }

    pub fn first_grid_mut(&mut self) -> Option<&mut Grid> {
        self.props.grids.as_mut().and_then(|grids| grids.first_mut())
    }

    /// Depth (vertical cells) of the first grid, if the item has one.
    pub fn grid_depth(&self) -> Option<i64> {
        self.first_grid().map(|grid| grid.props.cells_v)
    }
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ItemProps {
    #[serde(rename = "Grids", default, skip_serializing_if = "Option::is_none")]
    pub grids: Option<Vec<Grid>>,
    #[serde(flatten)]
    pub extra: Extra,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Grid {
    #[serde(rename = "_name", default, skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    #[serde(rename = "_id", default, skip_serializing_if = "Option::is_none")]
    pub id: Option<String>,
    #[serde(rename = "_parent", default, skip_serializing_if = "Option::is_none")]
    pub parent: Option<String>,
    #[serde(rename = "_props")]
    pub props: GridProps,
    #[serde(rename = "_proto", default, skip_serializing_if = "Option::is_none")]
    pub proto: Option<String>,
    #[serde(flatten)]
    pub extra: Extra,
}

/// Grid size; `filters` and the count/weight limits stay in `extra`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct GridProps {
    #[serde(rename = "cellsH")]
    pub cells_h: i64,
    #[serde(rename = "cellsV")]
    pub cells_v: i64,
    #[serde(flatten)]
    pub extra: Extra,
}

// ============================================================================
// Profile templates
// ============================================================================

/// A starting profile: one side per playable faction plus shared metadata.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ProfileTemplate {
    pub bear: ProfileSide,
    pub usec: ProfileSide,
    #[serde(flatten)]
    pub extra: Extra,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ProfileSide {
    pub character: CharacterTemplate,
    #[serde(flatten)]
    pub extra: Extra,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "PascalCase")]
pub struct CharacterTemplate {
    #[serde(default)]
    pub hideout: HideoutState,
    #[serde(default)]
    pub bonuses: Vec<Bonus>,
    #[serde(default)]
    pub encyclopedia: BTreeMap<String, bool>,
    pub inventory: InventoryTemplate,
    #[serde(flatten)]
    pub extra: Extra,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct HideoutState {
    #[serde(rename = "Areas", default)]
    pub areas: Vec<AreaState>,
    #[serde(flatten)]
    pub extra: Extra,
}

/// Built level of one hideout area in a profile.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AreaState {
    #[serde(rename = "type")]
    pub area_type: u32,
    #[serde(default)]
    pub level: u32,
    #[serde(flatten)]
    pub extra: Extra,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct InventoryTemplate {
    #[serde(default)]
    pub items: Vec<InventoryItem>,
    /// Instance id of the item acting as the character's stash.
    #[serde(default)]
    pub stash: String,
    #[serde(flatten)]
    pub extra: Extra,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct InventoryItem {
    #[serde(rename = "_id")]
    pub id: String,
    #[serde(rename = "_tpl")]
    pub template_id: String,
    #[serde(rename = "slotId", default, skip_serializing_if = "Option::is_none")]
    pub slot_id: Option<String>,
    #[serde(flatten)]
    pub extra: Extra,
}
