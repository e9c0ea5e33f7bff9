use log::Level;
use serde::Deserialize;

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Section {
    pub key: &'static str,
    pub label: &'static str,
}

// Order matters: the active-section hit-test picks the first match.
pub const SECTIONS: &[Section] = &[
    Section { key: "home", label: "Home" },
    Section { key: "services", label: "Services" },
    Section { key: "coverage", label: "Coverage" },
    Section { key: "about", label: "About" },
    Section { key: "contact", label: "Contact" },
];

/// Tuning for the scroll tracker. The throttle windows and the jitter
/// threshold are empirical values, so every field can be overridden.
#[derive(Clone, Debug, PartialEq, Deserialize)]
#[serde(default)]
pub struct ScrollConfig {
    pub down_throttle_ms: u64,
    pub up_throttle_ms: u64,
    pub up_jitter_px: i32,
    pub reference_line_px: f64,
}

impl Default for ScrollConfig {
    fn default() -> Self {
        Self {
            down_throttle_ms: 50,  // ~20fps
            up_throttle_ms: 66,    // ~15fps
            up_jitter_px: 5,
            reference_line_px: 100.0,
        }
    }
}

#[cfg(debug_assertions)]
pub fn log_level() -> Level {
    Level::Debug  // Verbose when running locally
}

#[cfg(not(debug_assertions))]
pub fn log_level() -> Level {
    Level::Info
}
