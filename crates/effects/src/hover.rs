//! Card hover effects: pointer proximity lift and pointer enter/leave.

use glam::DVec2;
use landing_fx_core::geometry::Rect;

use crate::config::EffectsConfig;
use crate::style::{StyleChange, StyleTarget, Transform};

/// Hover intensity of a card: 1 at its centre, falling linearly to 0 at
/// `radius` px away and clamped at 0 beyond.
pub fn hover_intensity(pointer: DVec2, card: &Rect, radius: f64) -> f64 {
    let distance = pointer.distance(card.center());
    (1.0 - distance / radius).max(0.0)
}

/// Transform for every card given the current pointer position.
///
/// Cards with intensity above the threshold lift by `hover_lift_px`; all
/// others are reset to `translateY(0px)`. One change per card, in order.
pub fn proximity_changes(
    pointer: DVec2,
    cards: &[Rect],
    config: &EffectsConfig,
) -> Vec<StyleChange> {
    cards
        .iter()
        .enumerate()
        .map(|(i, card)| {
            let intensity = hover_intensity(pointer, card, config.hover_radius);
            let px = if intensity > config.hover_threshold {
                -config.hover_lift_px
            } else {
                0.0
            };
            StyleChange::transform(StyleTarget::Card(i), Transform::TranslateY(px))
        })
        .collect()
}

/// Transform applied when the pointer enters card `index`.
pub fn card_entered(index: usize, config: &EffectsConfig) -> StyleChange {
    StyleChange::transform(
        StyleTarget::Card(index),
        Transform::Lift {
            px: -config.enter_lift_px,
            scale: config.enter_scale,
        },
    )
}

/// Transform applied when the pointer leaves card `index`.
pub fn card_left(index: usize) -> StyleChange {
    StyleChange::transform(StyleTarget::Card(index), Transform::RestScaled)
}
