//! Orb drift toward the pointer.

use glam::DVec2;
use landing_fx_core::geometry::Rect;

use crate::config::EffectsConfig;
use crate::style::{StyleChange, StyleTarget};

pub const MOUSE_X_PROPERTY: &str = "--mouse-x";
pub const MOUSE_Y_PROPERTY: &str = "--mouse-y";

/// Offset of the orb: `follow` times the vector from its centre to the pointer.
pub fn orb_offset(pointer: DVec2, orb: &Rect, follow: f64) -> DVec2 {
    (pointer - orb.center()) * follow
}

/// Custom-property updates for one frame of orb drift.
///
/// Writes `--mouse-x` / `--mouse-y` rather than `transform`, so the orb's own
/// CSS animation keeps running. No orb, no changes.
pub fn orb_changes(pointer: DVec2, orb: Option<&Rect>, config: &EffectsConfig) -> Vec<StyleChange> {
    let Some(orb) = orb else {
        return Vec::new();
    };
    let offset = orb_offset(pointer, orb, config.orb_follow);
    vec![
        StyleChange::custom(StyleTarget::Orb, MOUSE_X_PROPERTY, format!("{}px", offset.x)),
        StyleChange::custom(StyleTarget::Orb, MOUSE_Y_PROPERTY, format!("{}px", offset.y)),
    ]
}
