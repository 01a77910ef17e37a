//! Logging helpers: the mod's display name and the debug-only summary channel.

use log::debug;

pub const DISPLAY_NAME: &str = "Progressive Stash";

/// Display name used as log prefix, optionally with the crate version.
pub fn mod_display_name(with_version: bool) -> String {
    if with_version {
        format!("{} v{}", DISPLAY_NAME, env!("CARGO_PKG_VERSION"))
    } else {
        DISPLAY_NAME.to_string()
    }
}

/// Per-step summaries that are only emitted when `debug` is set in the configuration.
#[derive(Debug, Clone, Copy)]
pub struct DebugLog {
    enabled: bool,
}

impl DebugLog {
    pub fn new(enabled: bool) -> Self {
        Self { enabled }
    }

    pub fn log(&self, message: &str) {
        if self.enabled {
            debug!("{}: {}", mod_display_name(false), message);
        }
    }
}
