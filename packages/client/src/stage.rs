//! Stage identifier resolution.
//!
//! The start-game push may carry either a numeric stage id or a
//! symbolic scenario name; this module is the single place that
//! translates both into the stage number the game session loads.

/// Stage loaded when an unknown symbolic id arrives.
pub const DEFAULT_STAGE: u32 = 1;

/// Known training scenarios and their stage numbers.
const SCENARIOS: &[(&str, u32)] = &[
    ("orientation", 1),
    ("fire-drill", 2),
    ("machinery", 3),
    ("chemical-handling", 4),
    ("evacuation", 5),
];

/// Resolve a raw stage identifier (numeric string or scenario name).
pub fn resolve_stage(raw: &str) -> Option<u32> {
    if let Ok(numeric) = raw.parse::<u32>() {
        return Some(numeric);
    }
    SCENARIOS
        .iter()
        .find(|(name, _)| *name == raw)
        .map(|(_, stage)| *stage)
}

/// Resolve with a fallback to [`DEFAULT_STAGE`] for unknown ids.
pub fn resolve_stage_or_default(raw: &str) -> u32 {
    resolve_stage(raw).unwrap_or_else(|| {
        tracing::warn!("Unknown stage id '{}', falling back to stage {}", raw, DEFAULT_STAGE);
        DEFAULT_STAGE
    })
}
