//! Tunable constants of the DOM-facing effects.

use landing_fx_core::params::param_f64;
use landing_fx_core::EffectError;
use serde_json::{json, Value};

/// Shortest flicker period accepted.
pub const MIN_FLICKER_PERIOD_MS: f64 = 1.0;

/// Constants for hover, orb, reveal and flame effects.
///
/// `Default` holds the values the landing page ships with.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct EffectsConfig {
    /// Pointer distance in px at which hover intensity reaches zero.
    pub hover_radius: f64,
    /// Intensity above which a card lifts.
    pub hover_threshold: f64,
    /// Lift in px applied by pointer proximity.
    pub hover_lift_px: f64,
    /// Lift in px applied while the pointer is over a card.
    pub enter_lift_px: f64,
    /// Scale applied while the pointer is over a card.
    pub enter_scale: f64,
    /// Fraction of the pointer-to-orb distance the orb drifts by.
    pub orb_follow: f64,
    /// Visible fraction of a card that counts as revealed.
    pub reveal_threshold: f64,
    /// Bottom margin in px removed from the viewport for reveal checks.
    pub reveal_bottom_margin_px: f64,
    /// Starting downward offset of unrevealed cards.
    pub reveal_offset_px: f64,
    /// Duration of the reveal transition in seconds.
    pub reveal_duration_s: f64,
    /// Extra delay per card index in seconds.
    pub reveal_stagger_s: f64,
    /// Flame flicker period.
    pub flicker_period_ms: f64,
    /// Delay before the first flicker period starts.
    pub flicker_delay_ms: f64,
    /// Lowest flicker intensity.
    pub flicker_min_intensity: f64,
    /// Intensity is drawn from [min, min + range).
    pub flicker_intensity_range: f64,
    /// Rotation is drawn from [-range / 2, range / 2) degrees.
    pub flicker_rotation_range_deg: f64,
}

impl Default for EffectsConfig {
    fn default() -> Self {
        Self {
            hover_radius: 200.0,
            hover_threshold: 0.5,
            hover_lift_px: 2.0,
            enter_lift_px: 10.0,
            enter_scale: 1.02,
            orb_follow: 0.02,
            reveal_threshold: 0.1,
            reveal_bottom_margin_px: 50.0,
            reveal_offset_px: 50.0,
            reveal_duration_s: 0.6,
            reveal_stagger_s: 0.2,
            flicker_period_ms: 100.0,
            flicker_delay_ms: 1000.0,
            flicker_min_intensity: 0.7,
            flicker_intensity_range: 0.3,
            flicker_rotation_range_deg: 10.0,
        }
    }
}

impl EffectsConfig {
    /// Reads overrides from a JSON object; missing keys keep their defaults.
    ///
    /// Returns an error for values that fail [`validate`](Self::validate).
    pub fn from_json(params: &Value) -> Result<Self, EffectError> {
        let d = Self::default();
        let parsed = Self {
            hover_radius: param_f64(params, "hover_radius", d.hover_radius),
            hover_threshold: param_f64(params, "hover_threshold", d.hover_threshold),
            hover_lift_px: param_f64(params, "hover_lift_px", d.hover_lift_px),
            enter_lift_px: param_f64(params, "enter_lift_px", d.enter_lift_px),
            enter_scale: param_f64(params, "enter_scale", d.enter_scale),
            orb_follow: param_f64(params, "orb_follow", d.orb_follow),
            reveal_threshold: param_f64(params, "reveal_threshold", d.reveal_threshold),
            reveal_bottom_margin_px: param_f64(
                params,
                "reveal_bottom_margin_px",
                d.reveal_bottom_margin_px,
            ),
            reveal_offset_px: param_f64(params, "reveal_offset_px", d.reveal_offset_px),
            reveal_duration_s: param_f64(params, "reveal_duration_s", d.reveal_duration_s),
            reveal_stagger_s: param_f64(params, "reveal_stagger_s", d.reveal_stagger_s),
            flicker_period_ms: param_f64(params, "flicker_period_ms", d.flicker_period_ms),
            flicker_delay_ms: param_f64(params, "flicker_delay_ms", d.flicker_delay_ms),
            flicker_min_intensity: param_f64(
                params,
                "flicker_min_intensity",
                d.flicker_min_intensity,
            ),
            flicker_intensity_range: param_f64(
                params,
                "flicker_intensity_range",
                d.flicker_intensity_range,
            ),
            flicker_rotation_range_deg: param_f64(
                params,
                "flicker_rotation_range_deg",
                d.flicker_rotation_range_deg,
            ),
        };
        parsed.validate()?;
        Ok(parsed)
    }

    /// Rejects non-finite values, a non-positive hover radius, a flicker
    /// period under [`MIN_FLICKER_PERIOD_MS`], thresholds outside [0, 1] and
    /// negative offsets, durations or ranges.
    pub fn validate(&self) -> Result<(), EffectError> {
        let invalid = |msg: String| Err(EffectError::InvalidParams(msg));
        for (name, value) in self.fields() {
            if !value.is_finite() {
                return invalid(format!("{name} must be finite, got {value}"));
            }
        }
        if self.hover_radius <= 0.0 {
            return invalid(format!(
                "hover_radius must be positive, got {}",
                self.hover_radius
            ));
        }
        if self.flicker_period_ms < MIN_FLICKER_PERIOD_MS {
            return invalid(format!(
                "flicker_period_ms must be at least {MIN_FLICKER_PERIOD_MS}, got {}",
                self.flicker_period_ms
            ));
        }
        for (name, value) in [
            ("hover_threshold", self.hover_threshold),
            ("reveal_threshold", self.reveal_threshold),
        ] {
            if !(0.0..=1.0).contains(&value) {
                return invalid(format!("{name} must be in [0, 1], got {value}"));
            }
        }
        for (name, value) in [
            ("hover_lift_px", self.hover_lift_px),
            ("enter_lift_px", self.enter_lift_px),
            ("enter_scale", self.enter_scale),
            ("reveal_bottom_margin_px", self.reveal_bottom_margin_px),
            ("reveal_offset_px", self.reveal_offset_px),
            ("reveal_duration_s", self.reveal_duration_s),
            ("reveal_stagger_s", self.reveal_stagger_s),
            ("flicker_delay_ms", self.flicker_delay_ms),
            ("flicker_min_intensity", self.flicker_min_intensity),
            ("flicker_intensity_range", self.flicker_intensity_range),
            ("flicker_rotation_range_deg", self.flicker_rotation_range_deg),
        ] {
            if value < 0.0 {
                return invalid(format!("{name} must be non-negative, got {value}"));
            }
        }
        Ok(())
    }

    fn fields(&self) -> [(&'static str, f64); 16] {
        [
            ("hover_radius", self.hover_radius),
            ("hover_threshold", self.hover_threshold),
            ("hover_lift_px", self.hover_lift_px),
            ("enter_lift_px", self.enter_lift_px),
            ("enter_scale", self.enter_scale),
            ("orb_follow", self.orb_follow),
            ("reveal_threshold", self.reveal_threshold),
            ("reveal_bottom_margin_px", self.reveal_bottom_margin_px),
            ("reveal_offset_px", self.reveal_offset_px),
            ("reveal_duration_s", self.reveal_duration_s),
            ("reveal_stagger_s", self.reveal_stagger_s),
            ("flicker_period_ms", self.flicker_period_ms),
            ("flicker_delay_ms", self.flicker_delay_ms),
            ("flicker_min_intensity", self.flicker_min_intensity),
            ("flicker_intensity_range", self.flicker_intensity_range),
            ("flicker_rotation_range_deg", self.flicker_rotation_range_deg),
        ]
    }

    /// Current values as a JSON object.
    pub fn to_json(&self) -> Value {
        let map = self
            .fields()
            .into_iter()
            .map(|(name, value)| (name.to_string(), json!(value)))
            .collect();
        Value::Object(map)
    }
}
