//! Test utilities & fixtures.
//! Provides access to the small host database under `tests/test-data-int/database`.

use std::path::{Path, PathBuf};

use progressive_stash::config::{ModConfig, StashUpgrade};
use progressive_stash::database::{DatabaseTables, Requirement};

pub const ROUBLES: &str = "5449016a4bdc2d6f028b456f";

/// Return the path to the static database fixture directory.
/// Kept small & deterministic. Tests should copy to a temp dir if they mutate.
pub fn fixture_root() -> PathBuf {
    Path::new(env!("CARGO_MANIFEST_DIR"))
        .join("tests")
        .join("test-data-int")
        .join("database")
}

/// Fixture tables loaded in memory.
#[allow(dead_code)]
pub fn fixture_tables() -> DatabaseTables {
    DatabaseTables::load(fixture_root()).expect("fixture database")
}

/// Return a writable copy (temp dir) of the fixture database tree.
#[allow(dead_code)]
pub fn writable_fixture() -> tempfile::TempDir {
    let tmp = tempfile::tempdir().expect("tempdir");
    copy_dir(&fixture_root(), tmp.path());
    tmp
}

fn copy_dir(src: &Path, dst: &Path) {
    std::fs::create_dir_all(dst).unwrap();
    for entry in std::fs::read_dir(src).unwrap() {
        let entry = entry.unwrap();
        let target = dst.join(entry.file_name());
        if entry.file_type().unwrap().is_dir() {
            copy_dir(&entry.path(), &target);
        } else {
            std::fs::copy(entry.path(), target).unwrap();
        }
    }
}

/// Config with the given upgrade sizes, each requiring some roubles.
#[allow(dead_code)]
pub fn config_with_sizes(initial: i64, sizes: &[i64]) -> ModConfig {
    ModConfig {
        debug: true,
        initial_stash_size: initial,
        stash_upgrades: sizes
            .iter()
            .map(|&size| StashUpgrade {
                size,
                requirements: vec![Requirement::item(ROUBLES, size as u64 * 1000)],
            })
            .collect(),
        ..ModConfig::default()
    }
}
