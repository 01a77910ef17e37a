//! Secure container crafts and grid overrides against the fixture database.

mod common;

use common::{fixture_tables, ROUBLES};
use progressive_stash::config::{ModConfig, SecureContainerConfig};
use progressive_stash::database::Requirement;
use progressive_stash::patch::constants::{
    ALPHA_CONTAINER_ID, BETA_CONTAINER_ID, EPSILON_CONTAINER_ID, GAMMA_CONTAINER_ID,
    KAPPA_CONTAINER_ID, WAIST_POUCH_ID, WORKBENCH_AREA,
};
use progressive_stash::patch::{SecureContainerKind, SecureContainersController};
use std::collections::BTreeMap;

fn only(kind: SecureContainerKind, container: SecureContainerConfig) -> ModConfig {
    let mut secure_containers = BTreeMap::new();
    secure_containers.insert(kind, container);
    ModConfig {
        secure_containers,
        ..ModConfig::default()
    }
}

#[test]
fn not_craftable_container_is_only_resized() {
    let config = only(
        SecureContainerKind::Alpha,
        SecureContainerConfig {
            not_craftable: true,
            dimensions: (2, 3),
            requirements: vec![Requirement::item(ROUBLES, 1000)],
        },
    );
    let controller = SecureContainersController::new(&config);
    assert!(controller.generate_crafts().is_empty());

    let mut tables = fixture_tables();
    let production_before = tables.hideout.production.clone();

    assert_eq!(controller.inject_crafts(&mut tables), 0);
    assert_eq!(controller.tweak_container_dimensions(&mut tables), 1);

    assert_eq!(tables.hideout.production, production_before);
    let grid = tables.item(ALPHA_CONTAINER_ID).unwrap().first_grid().unwrap();
    assert_eq!((grid.props.cells_h, grid.props.cells_v), (2, 3));
}

#[test]
fn default_config_crafts_every_craftable_container() {
    let controller = SecureContainersController::new(&ModConfig::default());
    let crafts = controller.generate_crafts();

    let products: Vec<_> = crafts.iter().map(|c| c.end_product.as_str()).collect();
    assert_eq!(crafts.len(), 4);
    for id in [ALPHA_CONTAINER_ID, BETA_CONTAINER_ID, EPSILON_CONTAINER_ID, GAMMA_CONTAINER_ID] {
        assert!(products.contains(&id), "missing craft for {}", id);
    }
    assert!(!products.contains(&WAIST_POUCH_ID));
    assert!(!products.contains(&KAPPA_CONTAINER_ID));

    for craft in &crafts {
        assert_eq!(craft.id, format!("{}_craft", craft.end_product));
        assert_eq!(craft.area_type, WORKBENCH_AREA);
        assert_eq!(craft.count, 1);
        assert_eq!(craft.production_limit_count, 1);
        assert!(!craft.requirements.is_empty());
    }
}

#[test]
fn craft_requirements_accept_damaged_items() {
    let config = only(
        SecureContainerKind::Beta,
        SecureContainerConfig {
            not_craftable: false,
            dimensions: (3, 2),
            requirements: vec![
                Requirement::item(ALPHA_CONTAINER_ID, 1).with_functional(true),
                Requirement::area(WORKBENCH_AREA, 2),
            ],
        },
    );
    let crafts = SecureContainersController::new(&config).generate_crafts();

    assert_eq!(crafts.len(), 1);
    let requirements = &crafts[0].requirements;
    assert_eq!(requirements[0].is_functional(), Some(false));
    assert_eq!(requirements[0].template_id(), Some(ALPHA_CONTAINER_ID));
    assert_eq!(requirements[1], Requirement::area(WORKBENCH_AREA, 2));
}

#[test]
fn inject_appends_after_existing_recipes() {
    let mut tables = fixture_tables();
    let existing = tables.hideout.production[0].clone();

    let controller = SecureContainersController::new(&ModConfig::default());
    assert_eq!(controller.inject_crafts(&mut tables), 4);

    assert_eq!(tables.hideout.production.len(), 5);
    assert_eq!(tables.hideout.production[0], existing);
    assert!(existing.extra.contains_key("isCodeProduction"));
}

#[test]
fn inject_twice_appends_twice() {
    let mut tables = fixture_tables();
    let controller = SecureContainersController::new(&ModConfig::default());

    controller.inject_crafts(&mut tables);
    controller.inject_crafts(&mut tables);

    let alpha_crafts = tables
        .hideout
        .production
        .iter()
        .filter(|craft| craft.end_product == ALPHA_CONTAINER_ID)
        .count();
    assert_eq!(alpha_crafts, 2);
}

#[test]
fn missing_templates_are_skipped_when_resizing() {
    let mut tables = fixture_tables();
    let controller = SecureContainersController::new(&ModConfig::default());

    // the fixture ships alpha, beta and epsilon only
    assert_eq!(controller.tweak_container_dimensions(&mut tables), 3);
    assert!(tables.item(GAMMA_CONTAINER_ID).is_none());
    assert!(tables.item(KAPPA_CONTAINER_ID).is_none());
    assert!(tables.item(WAIST_POUCH_ID).is_none());

    let epsilon = tables.item(EPSILON_CONTAINER_ID).unwrap();
    let grid = epsilon.first_grid().unwrap();
    assert_eq!((grid.props.cells_h, grid.props.cells_v), (4, 2));
    assert_eq!(grid.name.as_deref(), Some("main"));
}

#[test]
fn resize_keeps_other_template_fields() {
    let mut tables = fixture_tables();
    let before = tables.item(BETA_CONTAINER_ID).cloned().unwrap();

    let config = only(
        SecureContainerKind::Beta,
        SecureContainerConfig {
            not_craftable: true,
            dimensions: (5, 5),
            requirements: Vec::new(),
        },
    );
    SecureContainersController::new(&config).tweak_container_dimensions(&mut tables);

    let after = tables.item(BETA_CONTAINER_ID).unwrap();
    assert_eq!(after.props.extra, before.props.extra);
    assert_eq!(after.proto, before.proto);
    let grid = after.first_grid().unwrap();
    assert_eq!((grid.props.cells_h, grid.props.cells_v), (5, 5));
    assert_eq!(grid.props.extra, before.first_grid().unwrap().props.extra);
}
