//! Scroll reveal of app cards.
//!
//! Cards start transparent and pushed down. Once enough of a card enters the
//! viewport (minus a bottom margin) it fades and slides into place, each card
//! staggered by its index.

use landing_fx_core::geometry::Rect;

use crate::config::EffectsConfig;
use crate::style::{StyleChange, StyleTarget, Transform};

/// Styles assigned to every card before any visibility check.
pub fn initial_styles(card_count: usize, config: &EffectsConfig) -> Vec<StyleChange> {
    let mut changes = Vec::with_capacity(card_count * 3);
    for i in 0..card_count {
        let target = StyleTarget::Card(i);
        let delay = i as f64 * config.reveal_stagger_s;
        let duration = config.reveal_duration_s;
        changes.push(StyleChange::opacity(target, 0.0));
        changes.push(StyleChange::transform(
            target,
            Transform::TranslateY(config.reveal_offset_px),
        ));
        changes.push(StyleChange::transition(
            target,
            format!("opacity {duration}s ease {delay}s, transform {duration}s ease {delay}s"),
        ));
    }
    changes
}

/// Fraction of `target` lying inside `root`.
///
/// A zero-area target counts as fully visible when it touches the root.
pub fn intersection_ratio(target: &Rect, root: &Rect) -> f64 {
    let Some(hit) = target.intersection(root) else {
        return 0.0;
    };
    let area = target.area();
    if area == 0.0 {
        return 1.0;
    }
    (hit.area() / area).clamp(0.0, 1.0)
}

/// Tracks which cards are visible and emits reveal styles on each
/// hidden-to-visible transition.
#[derive(Debug, Clone)]
pub struct RevealObserver {
    threshold: f64,
    bottom_margin_px: f64,
    visible: Vec<bool>,
    fired: Vec<u32>,
}

impl RevealObserver {
    pub fn new(config: &EffectsConfig) -> Self {
        Self {
            threshold: config.reveal_threshold,
            bottom_margin_px: config.reveal_bottom_margin_px,
            visible: Vec::new(),
            fired: Vec::new(),
        }
    }

    /// The viewport with the bottom margin removed.
    pub fn root(&self, viewport: &Rect) -> Rect {
        viewport.expand(0.0, 0.0, -self.bottom_margin_px, 0.0)
    }

    /// Checks every card against the viewport.
    ///
    /// Cards that just became visible get opacity `1` and `translateY(0)`.
    /// Cards leaving the viewport emit nothing, but are eligible to fire
    /// again on re-entry.
    pub fn observe(&mut self, cards: &[Rect], viewport: &Rect) -> Vec<StyleChange> {
        if self.visible.len() != cards.len() {
            self.visible.resize(cards.len(), false);
            self.fired.resize(cards.len(), 0);
        }
        let root = self.root(viewport);
        let mut changes = Vec::new();
        for (i, card) in cards.iter().enumerate() {
            let now_visible = intersection_ratio(card, &root) >= self.threshold;
            if now_visible && !self.visible[i] {
                log::debug!("revealing card {i}");
                self.fired[i] += 1;
                changes.push(StyleChange::opacity(StyleTarget::Card(i), 1.0));
                changes.push(StyleChange::transform(StyleTarget::Card(i), Transform::Rest));
            }
            self.visible[i] = now_visible;
        }
        changes
    }

    pub fn is_visible(&self, index: usize) -> bool {
        self.visible.get(index).copied().unwrap_or(false)
    }

    /// How many times card `index` has been revealed.
    pub fn fire_count(&self, index: usize) -> u32 {
        self.fired.get(index).copied().unwrap_or(0)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn observer() -> RevealObserver {
        RevealObserver::new(&EffectsConfig::default())
    }

    #[test]
    fn initial_styles_stagger_by_index() {
        let changes = initial_styles(2, &EffectsConfig::default());
        assert_eq!(changes.len(), 6);
        assert_eq!(changes[0].value, "0");
        assert_eq!(changes[1].value, "translateY(50px)");
        assert_eq!(changes[2].value, "opacity 0.6s ease 0s, transform 0.6s ease 0s");
        assert_eq!(changes[5].target, StyleTarget::Card(1));
        assert_eq!(
            changes[5].value,
            "opacity 0.6s ease 0.2s, transform 0.6s ease 0.2s"
        );
    }

    #[test]
    fn ratio_of_half_covered_card() {
        let root = Rect::viewport(100.0, 100.0);
        let card = Rect::new(0.0, 50.0, 100.0, 100.0);
        assert!((intersection_ratio(&card, &root) - 0.5).abs() < 1e-12);
        assert_eq!(intersection_ratio(&Rect::new(0.0, 200.0, 10.0, 10.0), &root), 0.0);
    }

    #[test]
    fn bottom_margin_hides_card_just_above_fold() {
        // Card top at 560 in a 600px viewport: 40px visible, but the root
        // stops at 550.
        let mut obs = observer();
        let viewport = Rect::viewport(800.0, 600.0);
        let card = Rect::new(0.0, 560.0, 200.0, 200.0);
        assert!(obs.observe(&[card], &viewport).is_empty());
        assert!(!obs.is_visible(0));
    }

    #[test]
    fn card_past_threshold_fires_once() {
        let mut obs = observer();
        let viewport = Rect::viewport(800.0, 600.0);
        // 30 of 200 px inside the 550px root: 15%.
        let cards = [Rect::new(0.0, 520.0, 200.0, 200.0)];
        let changes = obs.observe(&cards, &viewport);
        assert_eq!(changes.len(), 2);
        assert_eq!(changes[0].value, "1");
        assert_eq!(changes[1].value, "translateY(0)");
        assert!(obs.observe(&cards, &viewport).is_empty());
        assert_eq!(obs.fire_count(0), 1);
    }

    #[test]
    fn below_threshold_does_not_fire() {
        let mut obs = observer();
        let viewport = Rect::viewport(800.0, 600.0);
        // 10 of 200 px: 5%.
        let cards = [Rect::new(0.0, 540.0, 200.0, 200.0)];
        assert!(obs.observe(&cards, &viewport).is_empty());
    }

    #[test]
    fn re_entry_fires_again_with_same_end_state() {
        let mut obs = observer();
        let viewport = Rect::viewport(800.0, 600.0);
        let inside = [Rect::new(0.0, 100.0, 200.0, 200.0)];
        let outside = [Rect::new(0.0, 900.0, 200.0, 200.0)];
        let first = obs.observe(&inside, &viewport);
        assert!(obs.observe(&outside, &viewport).is_empty());
        let second = obs.observe(&inside, &viewport);
        assert_eq!(first, second);
        assert_eq!(obs.fire_count(0), 2);
    }

    #[test]
    fn only_newly_visible_cards_emit() {
        let mut obs = observer();
        let viewport = Rect::viewport(800.0, 600.0);
        let cards = [
            Rect::new(0.0, 100.0, 200.0, 200.0),
            Rect::new(0.0, 1000.0, 200.0, 200.0),
        ];
        let changes = obs.observe(&cards, &viewport);
        assert!(changes.iter().all(|c| c.target == StyleTarget::Card(0)));
        assert_eq!(obs.fire_count(1), 0);
    }
}
