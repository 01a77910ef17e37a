//! Well-known identifiers of the host's base content.

/// Hideout area type of the stash.
pub const STASH_AREA: u32 = 3;

/// Hideout area type of the workbench, where secure container crafts are listed.
pub const WORKBENCH_AREA: u32 = 10;

// Stash templates shipped with the base game, used as tiers 1 to 4.
pub const STANDARD_STASH_ID: &str = "566abbc34bdc2d92178b4576";
pub const LEFT_BEHIND_STASH_ID: &str = "5811ce572459770cba1a34ea";
pub const PREPARE_FOR_ESCAPE_STASH_ID: &str = "5811ce662459770f6f490f32";
pub const EDGE_OF_DARKNESS_STASH_ID: &str = "5811ce772459770e9e5f9532";

/// Prefix of synthesized stash ids from tier 5 onwards.
pub const PROGRESSIVE_STASH_PREFIX_ID: &str = "trap_progressive_stash";

/// `_parent` of every stash template.
pub const STASH_PARENT_ID: &str = "566abbb64bdc2d144c8b457d";

/// `_proto` of a container grid.
pub const GRID_PROTO_ID: &str = "55d329c24bdc2d892f8b4567";

/// Every stash tier is this many cells wide.
pub const STASH_GRID_WIDTH: i64 = 10;

// Secure containers.
pub const WAIST_POUCH_ID: &str = "5732ee6a24597719ae0c0281";
pub const ALPHA_CONTAINER_ID: &str = "544a11ac4bdc2d470e8b456a";
pub const BETA_CONTAINER_ID: &str = "5857a8b324597729ab0a0e7d";
pub const EPSILON_CONTAINER_ID: &str = "59db794186f77448bc595262";
pub const GAMMA_CONTAINER_ID: &str = "5857a8bc2459772bad15db29";
pub const KAPPA_CONTAINER_ID: &str = "5c093ca986f7740a1867ab12";

/// Currency used in the default upgrade requirements.
pub const ROUBLES_ID: &str = "5449016a4bdc2d6f028b456f";

// Profile templates.
pub const DONOR_PROFILE: &str = "Edge Of Darkness";
pub const PROGRESSIVE_PROFILE: &str = "Progressive Stash";
/// Stash template carried by the donor profile's inventory.
pub const DONOR_STASH_ID: &str = EDGE_OF_DARKNESS_STASH_ID;
pub const SECURED_CONTAINER_SLOT: &str = "SecuredContainer";
