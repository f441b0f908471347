//! Scripted pointer sweep over a demo page layout.
//!
//! The pointer travels diagonally from the top-left corner to the bottom-right
//! while the page scrolls half a viewport, so every effect gets a turn: card
//! proximity and enter/leave, orb drift, reveal on scroll, and the flame once
//! the run passes one second.

use glam::DVec2;
use landing_fx_core::error::EffectError;
use landing_fx_core::frame::{Animation, FixedFrames, FrameLoop};
use landing_fx_core::geometry::Rect;
use landing_fx_core::surface::Surface;
use landing_fx_effects::{ScrollRequest, StyleChange};
use landing_fx_scene::{Layout, Scene};
use serde::Serialize;

/// Fraction of the viewport height scrolled over the whole run.
const SCROLL_FRACTION: f64 = 0.5;
const CARD_COUNT: usize = 3;
const CARD_HEIGHT: f64 = 200.0;
const ORB_SIZE: f64 = 300.0;

/// One style change and when it was queued.
#[derive(Debug, Clone, Serialize)]
pub struct TraceEvent {
    pub frame: u64,
    pub time_ms: f64,
    pub change: StyleChange,
}

/// Everything a trace run produced.
#[derive(Debug, Clone, Serialize)]
pub struct TraceReport {
    pub frames: u64,
    pub events: Vec<TraceEvent>,
    /// Result of clicking the call-to-action button after the sweep.
    pub scroll: Option<ScrollRequest>,
}

/// Orb near the top, three cards just below the fold, every optional
/// element present.
pub fn demo_layout(width: f64, height: f64) -> Layout {
    let card_width = width * 0.25;
    let gap = (width - card_width * CARD_COUNT as f64) / (CARD_COUNT as f64 + 1.0);
    let cards = (0..CARD_COUNT)
        .map(|i| {
            let left = gap + i as f64 * (card_width + gap);
            Rect::new(left, height * 0.95, card_width, CARD_HEIGHT)
        })
        .collect();
    Layout {
        viewport: Rect::viewport(width, height),
        orb: Some(Rect::new(
            (width - ORB_SIZE) / 2.0,
            height * 0.15,
            ORB_SIZE,
            ORB_SIZE,
        )),
        cards,
        flame: true,
        flame_glow: true,
        cta: true,
        apps: true,
    }
}

/// Drives a scene through the sweep, one scripted step per frame.
pub struct Sweep<'a, S: Surface> {
    scene: &'a mut Scene<S>,
    base: Layout,
    frames: u64,
    frame: u64,
    hovered: Option<usize>,
    events: Vec<TraceEvent>,
}

impl<'a, S: Surface> Sweep<'a, S> {
    /// Prepares the reveal styles and records them as frame 0.
    pub fn new(scene: &'a mut Scene<S>, frames: u64) -> Self {
        let base = scene.layout().clone();
        scene.prepare_reveal();
        let mut sweep = Self {
            scene,
            base,
            frames,
            frame: 0,
            hovered: None,
            events: Vec::new(),
        };
        sweep.collect(0.0);
        sweep
    }

    /// Clicks the CTA and returns the report.
    pub fn finish(self) -> TraceReport {
        TraceReport {
            frames: self.frame,
            scroll: self.scene.cta_clicked(),
            events: self.events,
        }
    }

    fn progress(&self) -> f64 {
        if self.frames <= 1 {
            return 1.0;
        }
        self.frame as f64 / (self.frames - 1) as f64
    }

    fn collect(&mut self, time_ms: f64) {
        let frame = self.frame;
        self.events.extend(
            self.scene
                .drain_style_changes()
                .into_iter()
                .map(|change| TraceEvent {
                    frame,
                    time_ms,
                    change,
                }),
        );
    }
}

impl<S: Surface> Animation for Sweep<'_, S> {
    fn frame(&mut self, now_ms: f64) -> Result<(), EffectError> {
        let p = self.progress();
        let viewport = self.base.viewport;

        let mut layout = self.base.clone();
        let scrolled = p * viewport.height * SCROLL_FRACTION;
        for card in &mut layout.cards {
            card.top -= scrolled;
        }
        if let Some(orb) = layout.orb.as_mut() {
            orb.top -= scrolled;
        }
        let pointer = DVec2::new(p * viewport.width, p * viewport.height);
        let hovered = layout.cards.iter().position(|c| c.contains(pointer));
        self.scene.set_layout(layout);
        self.scene.observe_cards();

        self.scene.pointer_moved(pointer.x, pointer.y);
        if hovered != self.hovered {
            if let Some(old) = self.hovered {
                self.scene.card_left(old);
            }
            if let Some(new) = hovered {
                self.scene.card_entered(new);
            }
            self.hovered = hovered;
        }

        self.scene.frame(now_ms)?;
        self.collect(now_ms);
        self.frame += 1;
        Ok(())
    }
}

/// Runs `frames` sweep frames at 60 Hz.
pub fn run<S: Surface>(scene: &mut Scene<S>, frames: u64) -> Result<TraceReport, EffectError> {
    let mut sweep = Sweep::new(scene, frames);
    FrameLoop::new().run(&mut FixedFrames::new(frames), &mut sweep)?;
    Ok(sweep.finish())
}
