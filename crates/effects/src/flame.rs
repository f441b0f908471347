//! Flame flicker.

use landing_fx_core::frame::Interval;
use landing_fx_core::prng::RandomSource;
use landing_fx_core::EffectError;

use crate::config::EffectsConfig;
use crate::style::{StyleChange, StyleTarget, Transform};

/// One flicker step: a scale and a rotation for the flame.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Flicker {
    pub intensity: f64,
    pub rotation_deg: f64,
}

impl Flicker {
    /// Draws the intensity, then the rotation.
    pub fn sample<R: RandomSource + ?Sized>(rng: &mut R, config: &EffectsConfig) -> Self {
        let intensity =
            rng.next_f64() * config.flicker_intensity_range + config.flicker_min_intensity;
        let rotation_deg = (rng.next_f64() - 0.5) * config.flicker_rotation_range_deg;
        Self {
            intensity,
            rotation_deg,
        }
    }

    /// Flame transform and glow opacity.
    pub fn changes(&self) -> [StyleChange; 2] {
        [
            StyleChange::transform(
                StyleTarget::Flame,
                Transform::Flicker {
                    scale: self.intensity,
                    rotate_deg: self.rotation_deg,
                },
            ),
            StyleChange::opacity(StyleTarget::FlameGlow, self.intensity),
        ]
    }
}

/// Periodic flame flicker driven by elapsed time.
///
/// Disabled unless both the flame and its glow exist; a disabled flicker
/// never draws from its random source.
#[derive(Debug, Clone)]
pub struct FlameFlicker<R> {
    rng: R,
    interval: Interval,
    config: EffectsConfig,
    enabled: bool,
    last: Option<Flicker>,
}

impl<R: RandomSource> FlameFlicker<R> {
    pub fn new(
        rng: R,
        config: &EffectsConfig,
        flame_present: bool,
        glow_present: bool,
    ) -> Result<Self, EffectError> {
        let enabled = flame_present && glow_present;
        if !enabled {
            log::debug!("flame or flame glow missing, flicker disabled");
        }
        Ok(Self {
            rng,
            interval: Interval::with_delay(config.flicker_period_ms, config.flicker_delay_ms)?,
            config: *config,
            enabled,
            last: None,
        })
    }

    pub fn is_enabled(&self) -> bool {
        self.enabled
    }

    /// Re-checks element presence after the page layout changed.
    pub fn set_present(&mut self, flame_present: bool, glow_present: bool) {
        self.enabled = flame_present && glow_present;
    }

    /// Advances the timer and returns the changes of every completed period.
    pub fn advance(&mut self, elapsed_ms: f64) -> Vec<StyleChange> {
        if !self.enabled {
            return Vec::new();
        }
        let periods = self.interval.advance(elapsed_ms);
        let mut changes = Vec::with_capacity(periods as usize * 2);
        for _ in 0..periods {
            changes.extend(self.flicker());
        }
        changes
    }

    /// Runs one flicker step immediately.
    pub fn flicker(&mut self) -> Vec<StyleChange> {
        if !self.enabled {
            return Vec::new();
        }
        let step = Flicker::sample(&mut self.rng, &self.config);
        self.last = Some(step);
        step.changes().to_vec()
    }

    /// The most recent flicker step.
    pub fn last(&self) -> Option<Flicker> {
        self.last
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use landing_fx_core::prng::{SequenceSource, Xorshift64};

    #[test]
    fn sample_maps_draws_to_ranges() {
        let mut rng = SequenceSource::new([0.5, 0.25]);
        let f = Flicker::sample(&mut rng, &EffectsConfig::default());
        assert!((f.intensity - 0.85).abs() < 1e-12);
        assert!((f.rotation_deg + 2.5).abs() < 1e-12);
    }

    #[test]
    fn changes_target_flame_and_glow() {
        let f = Flicker {
            intensity: 0.75,
            rotation_deg: 2.0,
        };
        let [flame, glow] = f.changes();
        assert_eq!(flame.target, StyleTarget::Flame);
        assert_eq!(flame.value, "translateX(-50%) scale(0.75) rotate(2deg)");
        assert_eq!(glow.target, StyleTarget::FlameGlow);
        assert_eq!(glow.value, "0.75");
    }

    #[test]
    fn waits_for_start_delay_then_fires_each_period() {
        let cfg = EffectsConfig::default();
        let mut flame = FlameFlicker::new(Xorshift64::new(1), &cfg, true, true).unwrap();
        assert!(flame.advance(999.0).is_empty());
        assert!(flame.advance(50.0).is_empty());
        assert_eq!(flame.advance(51.0).len(), 2);
        assert_eq!(flame.advance(300.0).len(), 6);
    }

    #[test]
    fn missing_glow_disables_flicker() {
        let cfg = EffectsConfig::default();
        let mut flame = FlameFlicker::new(SequenceSource::new([0.5]), &cfg, true, false).unwrap();
        assert!(!flame.is_enabled());
        assert!(flame.advance(5000.0).is_empty());
        assert!(flame.flicker().is_empty());
        assert_eq!(flame.last(), None);

        flame.set_present(true, true);
        assert_eq!(flame.flicker().len(), 2);
    }

    #[test]
    fn bad_period_is_rejected() {
        let cfg = EffectsConfig {
            flicker_period_ms: 0.0,
            ..EffectsConfig::default()
        };
        assert!(FlameFlicker::new(Xorshift64::new(1), &cfg, true, true).is_err());
    }

    mod proptests {
        use super::*;
        use proptest::prelude::*;

        proptest! {
            #[test]
            fn flicker_stays_in_range(seed in any::<u64>()) {
                let cfg = EffectsConfig::default();
                let mut flame = FlameFlicker::new(Xorshift64::new(seed), &cfg, true, true).unwrap();
                for _ in 0..20 {
                    flame.flicker();
                    let f = flame.last().unwrap();
                    prop_assert!(f.intensity >= 0.7 && f.intensity < 1.0 + 1e-12);
                    prop_assert!(f.rotation_deg >= -5.0 && f.rotation_deg < 5.0 + 1e-12);
                }
            }
        }
    }
}
