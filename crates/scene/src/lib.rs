#![deny(unsafe_code)]
//! Scene: the particle field and every page effect behind one context.
//!
//! A [`Scene`] owns the state the page scripts would otherwise keep in
//! globals: the pointer, the element layout, reveal visibility, the flame
//! timer, and a queue of style changes waiting to be applied. Hosts feed it
//! events and frame timestamps, then drain the queue.
//!
//! Both the CLI and the wasm bindings depend on this crate so the wiring is
//! written once.

pub mod pixel;

#[cfg(feature = "png")]
pub mod snapshot;

use landing_fx_core::error::EffectError;
use landing_fx_core::frame::Animation;
use landing_fx_core::geometry::Rect;
use landing_fx_core::prng::{RandomSource, Xorshift64};
use landing_fx_core::surface::Surface;
use landing_fx_effects::flame::FlameFlicker;
use landing_fx_effects::reveal::{self, RevealObserver};
use landing_fx_effects::scroll::{cta_scroll, ScrollRequest};
use landing_fx_effects::{hover, orb, EffectsConfig, PointerContext, StyleChange};
use landing_fx_particles::{ParticleField, ParticleParams};

/// Mixed into the scene seed to derive the flame's random stream.
const FLAME_SEED_SALT: u64 = 0xF1A4_E5EE_D000_0001;

/// Where the page elements are, in client coordinates.
///
/// Optional elements that are absent disable the effect that needs them.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Layout {
    pub viewport: Rect,
    pub orb: Option<Rect>,
    pub cards: Vec<Rect>,
    pub flame: bool,
    pub flame_glow: bool,
    pub cta: bool,
    pub apps: bool,
}

impl Layout {
    /// A layout with only a viewport: every optional element missing.
    pub fn empty(width: f64, height: f64) -> Self {
        Self {
            viewport: Rect::viewport(width, height),
            ..Self::default()
        }
    }
}

/// The whole landing page effect state.
pub struct Scene<S: Surface, R: RandomSource = Xorshift64> {
    field: ParticleField<S, R>,
    pointer: PointerContext,
    layout: Layout,
    config: EffectsConfig,
    reveal: RevealObserver,
    flame: FlameFlicker<R>,
    flame_on_frames: bool,
    last_frame_ms: Option<f64>,
    pending: Vec<StyleChange>,
}

impl<S: Surface, R: RandomSource> Scene<S, R> {
    /// Builds a scene. The particle field and the flame draw from separate
    /// random sources.
    pub fn new(
        surface: S,
        particle_rng: R,
        flame_rng: R,
        params: ParticleParams,
        config: EffectsConfig,
        layout: Layout,
    ) -> Result<Self, EffectError> {
        config.validate()?;
        let field = ParticleField::new(surface, particle_rng, params)?;
        let flame = FlameFlicker::new(flame_rng, &config, layout.flame, layout.flame_glow)?;
        if layout.orb.is_none() {
            log::debug!("no orb element, orb follow disabled");
        }
        Ok(Self {
            field,
            pointer: PointerContext::new(),
            reveal: RevealObserver::new(&config),
            layout,
            config,
            flame,
            flame_on_frames: true,
            last_frame_ms: None,
            pending: Vec::new(),
        })
    }

    /// Replaces the element layout, e.g. after a scroll moved the cards.
    pub fn set_layout(&mut self, layout: Layout) {
        self.flame.set_present(layout.flame, layout.flame_glow);
        self.layout = layout;
    }

    /// Resizes the particle surface and the viewport.
    pub fn resize(&mut self, width: usize, height: usize) -> Result<(), EffectError> {
        self.field.resize(width, height)?;
        self.layout.viewport.width = width as f64;
        self.layout.viewport.height = height as f64;
        Ok(())
    }

    /// Records the pointer and queues the card proximity transforms.
    pub fn pointer_moved(&mut self, x: f64, y: f64) {
        self.pointer.moved(x, y);
        let changes =
            hover::proximity_changes(self.pointer.position(), &self.layout.cards, &self.config);
        self.pending.extend(changes);
    }

    pub fn card_entered(&mut self, index: usize) {
        if index < self.layout.cards.len() {
            self.pending.push(hover::card_entered(index, &self.config));
        } else {
            log::debug!("pointer entered unknown card {index}");
        }
    }

    pub fn card_left(&mut self, index: usize) {
        if index < self.layout.cards.len() {
            self.pending.push(hover::card_left(index));
        } else {
            log::debug!("pointer left unknown card {index}");
        }
    }

    /// Queues the hidden starting styles of every card.
    pub fn prepare_reveal(&mut self) {
        let changes = reveal::initial_styles(self.layout.cards.len(), &self.config);
        self.pending.extend(changes);
    }

    /// Checks card visibility against the current viewport and queues the
    /// reveal of every card that just came into view.
    pub fn observe_cards(&mut self) {
        let changes = self.reveal.observe(&self.layout.cards, &self.layout.viewport);
        self.pending.extend(changes);
    }

    /// Runs one flame flicker step now.
    pub fn flicker(&mut self) {
        let changes = self.flame.flicker();
        self.pending.extend(changes);
    }

    /// Stops frames from advancing the flame timer. The host then calls
    /// [`flicker`](Self::flicker) from its own interval timer.
    pub fn detach_flame_timer(&mut self) {
        self.flame_on_frames = false;
    }

    /// Scroll request for a click on the call-to-action button.
    pub fn cta_clicked(&self) -> Option<ScrollRequest> {
        cta_scroll(self.layout.cta, self.layout.apps)
    }

    /// Takes every queued style change, oldest first.
    pub fn drain_style_changes(&mut self) -> Vec<StyleChange> {
        std::mem::take(&mut self.pending)
    }

    pub fn particles(&self) -> &ParticleField<S, R> {
        &self.field
    }

    pub fn pointer(&self) -> &PointerContext {
        &self.pointer
    }

    pub fn layout(&self) -> &Layout {
        &self.layout
    }

    pub fn reveal(&self) -> &RevealObserver {
        &self.reveal
    }

    pub fn config(&self) -> &EffectsConfig {
        &self.config
    }
}

impl<S: Surface> Scene<S, Xorshift64> {
    /// Builds a scene whose random streams derive from one seed.
    pub fn seeded(
        surface: S,
        seed: u64,
        params: ParticleParams,
        config: EffectsConfig,
        layout: Layout,
    ) -> Result<Self, EffectError> {
        Self::new(
            surface,
            Xorshift64::new(seed),
            Xorshift64::new(seed ^ FLAME_SEED_SALT),
            params,
            config,
            layout,
        )
    }
}

impl<S: Surface, R: RandomSource> Animation for Scene<S, R> {
    /// Ticks the particles, queues the orb drift, and advances the flame
    /// timer by the time since the previous frame. Load time is t = 0.
    fn frame(&mut self, now_ms: f64) -> Result<(), EffectError> {
        self.field.tick()?;
        let changes =
            orb::orb_changes(self.pointer.position(), self.layout.orb.as_ref(), &self.config);
        self.pending.extend(changes);
        if self.flame_on_frames {
            let elapsed = now_ms - self.last_frame_ms.unwrap_or(0.0);
            let changes = self.flame.advance(elapsed);
            self.pending.extend(changes);
        }
        self.last_frame_ms = Some(now_ms);
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use landing_fx_core::frame::{FixedFrames, FrameLoop};
    use landing_fx_core::surface::PixelSurface;
    use landing_fx_effects::{StyleProperty, StyleTarget};

    fn full_layout() -> Layout {
        Layout {
            viewport: Rect::viewport(800.0, 600.0),
            orb: Some(Rect::new(300.0, 100.0, 200.0, 200.0)),
            cards: vec![
                Rect::new(50.0, 350.0, 200.0, 150.0),
                Rect::new(300.0, 350.0, 200.0, 150.0),
                Rect::new(550.0, 900.0, 200.0, 150.0),
            ],
            flame: true,
            flame_glow: true,
            cta: true,
            apps: true,
        }
    }

    fn scene(layout: Layout) -> Scene<PixelSurface> {
        let surface = PixelSurface::new(80, 60).unwrap();
        Scene::seeded(
            surface,
            42,
            ParticleParams::default(),
            EffectsConfig::default(),
            layout,
        )
        .unwrap()
    }

    #[test]
    fn frame_ticks_particles_and_moves_orb() {
        let mut s = scene(full_layout());
        s.pointer_moved(500.0, 200.0);
        s.drain_style_changes();
        s.frame(0.0).unwrap();
        assert_eq!(s.particles().frame_count(), 1);
        let changes = s.drain_style_changes();
        assert_eq!(changes.len(), 2);
        assert_eq!(changes[0].property, StyleProperty::Custom("--mouse-x"));
        assert_eq!(changes[0].value, "2px");
        assert_eq!(changes[1].value, "0px");
    }

    #[test]
    fn orb_uses_origin_before_first_move() {
        let mut s = scene(full_layout());
        s.frame(0.0).unwrap();
        let changes = s.drain_style_changes();
        assert_eq!(changes[0].value, "-8px");
        assert_eq!(changes[1].value, "-4px");
    }

    #[test]
    fn missing_optional_elements_produce_nothing() {
        let mut s = scene(Layout::empty(800.0, 600.0));
        s.pointer_moved(10.0, 10.0);
        s.card_entered(0);
        s.prepare_reveal();
        s.observe_cards();
        for i in 0..200 {
            s.frame(i as f64 * 16.0).unwrap();
        }
        s.flicker();
        assert!(s.drain_style_changes().is_empty());
        assert_eq!(s.cta_clicked(), None);
        assert_eq!(s.particles().frame_count(), 200);
    }

    #[test]
    fn flame_starts_after_one_second_of_frames() {
        let mut layout = full_layout();
        layout.orb = None;
        let mut s = scene(layout);
        let ran = FrameLoop::new()
            .run(&mut FixedFrames::with_interval(11, 100.0), &mut s)
            .unwrap();
        assert_eq!(ran, 11);
        // Frames at 0..=1000 ms: the first period completes at 1100 ms.
        assert!(s.drain_style_changes().is_empty());
        s.frame(1100.0).unwrap();
        let changes = s.drain_style_changes();
        assert_eq!(changes.len(), 2);
        assert_eq!(changes[0].target, StyleTarget::Flame);
        assert_eq!(changes[1].target, StyleTarget::FlameGlow);
    }

    #[test]
    fn detached_flame_timer_ignores_frames() {
        let mut s = scene(Layout {
            orb: None,
            ..full_layout()
        });
        s.detach_flame_timer();
        s.frame(0.0).unwrap();
        s.frame(5000.0).unwrap();
        assert!(s.drain_style_changes().is_empty());
        s.flicker();
        assert_eq!(s.drain_style_changes().len(), 2);
    }

    #[test]
    fn reveal_fires_only_for_visible_cards() {
        let mut s = scene(full_layout());
        s.prepare_reveal();
        assert_eq!(s.drain_style_changes().len(), 9);
        s.observe_cards();
        let changes = s.drain_style_changes();
        assert_eq!(changes.len(), 4);
        assert!(s.reveal().is_visible(0));
        assert!(s.reveal().is_visible(1));
        assert!(!s.reveal().is_visible(2));

        // Scroll the third card into view.
        let mut layout = s.layout().clone();
        layout.cards[2].top = 300.0;
        s.set_layout(layout);
        s.observe_cards();
        let changes = s.drain_style_changes();
        assert_eq!(changes.len(), 2);
        assert!(changes.iter().all(|c| c.target == StyleTarget::Card(2)));
    }

    #[test]
    fn hover_and_enter_leave_queue_in_order() {
        let mut s = scene(full_layout());
        s.pointer_moved(150.0, 425.0);
        s.card_entered(0);
        s.card_left(0);
        s.card_entered(7);
        let changes = s.drain_style_changes();
        assert_eq!(changes.len(), 5);
        assert_eq!(changes[0].value, "translateY(-2px)");
        assert_eq!(changes[1].value, "translateY(0px)");
        assert_eq!(changes[3].value, "translateY(-10px) scale(1.02)");
        assert_eq!(changes[4].value, "translateY(0) scale(1)");
        assert!(s.drain_style_changes().is_empty());
    }

    #[test]
    fn resize_updates_viewport_and_surface() {
        let mut s = scene(full_layout());
        s.resize(40, 30).unwrap();
        assert_eq!(s.particles().width(), 40);
        assert_eq!(s.layout().viewport, Rect::viewport(40.0, 30.0));
    }

    #[test]
    fn invalid_config_is_rejected() {
        let config = EffectsConfig {
            flicker_period_ms: 1e-7,
            flicker_delay_ms: 0.0,
            ..EffectsConfig::default()
        };
        let result = Scene::seeded(
            PixelSurface::new(80, 60).unwrap(),
            42,
            ParticleParams::default(),
            config,
            full_layout(),
        );
        assert!(matches!(result, Err(EffectError::InvalidParams(_))));
    }

    #[test]
    fn cta_click_requests_smooth_scroll() {
        let s = scene(full_layout());
        assert!(s.cta_clicked().is_some());
    }

    #[test]
    fn same_seed_same_frames() {
        let mut a = scene(full_layout());
        let mut b = scene(full_layout());
        for i in 0..30 {
            a.frame(i as f64 * 50.0).unwrap();
            b.frame(i as f64 * 50.0).unwrap();
        }
        assert_eq!(a.particles().surface(), b.particles().surface());
        assert_eq!(a.drain_style_changes(), b.drain_style_changes());
    }
}
