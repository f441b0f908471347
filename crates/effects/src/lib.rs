#![deny(unsafe_code)]
//! DOM-facing decorative effects for landing-fx.
//!
//! Every effect is a pure calculation over a [`PointerContext`] and element
//! rectangles that returns [`StyleChange`] values. Hosts (the browser crate,
//! the `trace` CLI command) decide how to apply them. A missing element never
//! raises an error; the effect that needs it simply produces nothing.

pub mod config;
pub mod flame;
pub mod hover;
pub mod orb;
pub mod pointer;
pub mod reveal;
pub mod scroll;
pub mod style;

pub use config::EffectsConfig;
pub use flame::{FlameFlicker, Flicker};
pub use pointer::PointerContext;
pub use reveal::RevealObserver;
pub use scroll::{cta_scroll, ScrollBehavior, ScrollBlock, ScrollRequest};
pub use style::{StyleChange, StyleProperty, StyleTarget, Transform};

/// Class selectors of the page elements the effects attach to.
pub mod selectors {
    pub const PARTICLES: &str = ".particles";
    pub const ORB: &str = ".orb";
    pub const APP_CARD: &str = ".app-card";
    pub const CTA_BUTTON: &str = ".cta-button";
    pub const APPS: &str = ".apps";
    pub const FLAME: &str = ".flame";
    pub const FLAME_GLOW: &str = ".flame-glow";
}
