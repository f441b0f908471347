#![deny(unsafe_code)]
//! Ambient particle field.
//!
//! A fixed pool of point particles drifts across a transparent surface. Each
//! frame the surface is cleared, every particle takes one Euler step and ages
//! by one, and any particle that has expired or left the surface is resampled
//! in its slot. Particles are then drawn as translucent circles whose opacity
//! fades with remaining life. Nothing is ever allocated after construction.

pub mod particle;

use landing_fx_core::color::Srgb;
use landing_fx_core::error::EffectError;
use landing_fx_core::frame::Animation;
use landing_fx_core::params::{param_color, param_f64, param_usize};
use landing_fx_core::prng::{RandomSource, Xorshift64};
use landing_fx_core::surface::Surface;
use serde_json::{json, Value};

pub use particle::Particle;

/// Default number of particles in the pool.
const DEFAULT_PARTICLE_COUNT: usize = 50;
/// Largest pool a field will allocate.
pub const MAX_PARTICLE_COUNT: usize = 100_000;
/// Default per-axis speed bound in pixels per frame.
const DEFAULT_MAX_SPEED: f64 = 0.25;
/// Default shortest life in frames.
const DEFAULT_LIFE_MIN: f64 = 50.0;
/// Default width of the life range: lives fall in [50, 150).
const DEFAULT_LIFE_SPAN: f64 = 100.0;
/// Default smallest radius in pixels.
const DEFAULT_RADIUS_MIN: f64 = 1.0;
/// Default width of the radius range: radii fall in [1, 3).
const DEFAULT_RADIUS_SPAN: f64 = 2.0;
/// Default opacity of a particle at full life.
const DEFAULT_MAX_OPACITY: f64 = 0.3;
/// Default fill color.
const DEFAULT_COLOR: &str = "#000000";

/// Tunable constants of the particle field.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ParticleParams {
    /// Number of particles, fixed for the life of the field.
    pub particle_count: usize,
    /// Each velocity component is drawn from [-max_speed, max_speed).
    pub max_speed: f64,
    /// Shortest life in frames. Must be positive.
    pub life_min: f64,
    /// Lives are drawn from [life_min, life_min + life_span).
    pub life_span: f64,
    /// Smallest radius in pixels.
    pub radius_min: f64,
    /// Radii are drawn from [radius_min, radius_min + radius_span).
    pub radius_span: f64,
    /// Opacity of a particle at full life.
    pub max_opacity: f64,
    /// Fill color.
    pub color: Srgb,
}

impl Default for ParticleParams {
    fn default() -> Self {
        Self {
            particle_count: DEFAULT_PARTICLE_COUNT,
            max_speed: DEFAULT_MAX_SPEED,
            life_min: DEFAULT_LIFE_MIN,
            life_span: DEFAULT_LIFE_SPAN,
            radius_min: DEFAULT_RADIUS_MIN,
            radius_span: DEFAULT_RADIUS_SPAN,
            max_opacity: DEFAULT_MAX_OPACITY,
            color: Srgb::BLACK,
        }
    }
}

impl ParticleParams {
    /// Extracts parameters from a JSON object, falling back to defaults.
    ///
    /// Returns an error for a malformed `color` string or for values that
    /// fail [`validate`](Self::validate).
    pub fn from_json(params: &Value) -> Result<Self, EffectError> {
        let parsed = Self {
            particle_count: param_usize(params, "particle_count", DEFAULT_PARTICLE_COUNT),
            max_speed: param_f64(params, "max_speed", DEFAULT_MAX_SPEED),
            life_min: param_f64(params, "life_min", DEFAULT_LIFE_MIN),
            life_span: param_f64(params, "life_span", DEFAULT_LIFE_SPAN),
            radius_min: param_f64(params, "radius_min", DEFAULT_RADIUS_MIN),
            radius_span: param_f64(params, "radius_span", DEFAULT_RADIUS_SPAN),
            max_opacity: param_f64(params, "max_opacity", DEFAULT_MAX_OPACITY),
            color: param_color(params, "color", Srgb::BLACK)?,
        };
        parsed.validate()?;
        Ok(parsed)
    }

    /// Checks the invariants the simulation relies on: a bounded pool,
    /// positive total life, non-negative ranges and an opacity in [0, 1].
    pub fn validate(&self) -> Result<(), EffectError> {
        let invalid = |msg: String| Err(EffectError::InvalidParams(msg));
        if self.particle_count > MAX_PARTICLE_COUNT {
            return invalid(format!(
                "particle_count must be at most {MAX_PARTICLE_COUNT}, got {}",
                self.particle_count
            ));
        }
        if !self.life_min.is_finite() || self.life_min <= 0.0 {
            return invalid(format!("life_min must be positive, got {}", self.life_min));
        }
        for (name, value) in [
            ("max_speed", self.max_speed),
            ("life_span", self.life_span),
            ("radius_min", self.radius_min),
            ("radius_span", self.radius_span),
        ] {
            if !value.is_finite() || value < 0.0 {
                return invalid(format!("{name} must be a non-negative number, got {value}"));
            }
        }
        if !(0.0..=1.0).contains(&self.max_opacity) {
            return invalid(format!(
                "max_opacity must be in [0, 1], got {}",
                self.max_opacity
            ));
        }
        Ok(())
    }

    /// Current values as a JSON object.
    pub fn to_json(&self) -> Value {
        json!({
            "particle_count": self.particle_count,
            "max_speed": self.max_speed,
            "life_min": self.life_min,
            "life_span": self.life_span,
            "radius_min": self.radius_min,
            "radius_span": self.radius_span,
            "max_opacity": self.max_opacity,
            "color": self.color.to_hex(),
        })
    }

    /// Schema describing every parameter, its type, range, and default.
    pub fn schema() -> Value {
        json!({
            "particle_count": {
                "type": "integer",
                "default": DEFAULT_PARTICLE_COUNT,
                "min": 0,
                "max": MAX_PARTICLE_COUNT,
                "description": "Number of particles, fixed for the life of the field"
            },
            "max_speed": {
                "type": "number",
                "default": DEFAULT_MAX_SPEED,
                "min": 0.0,
                "description": "Per-axis speed bound in pixels per frame"
            },
            "life_min": {
                "type": "number",
                "default": DEFAULT_LIFE_MIN,
                "exclusive_min": 0.0,
                "description": "Shortest particle life in frames"
            },
            "life_span": {
                "type": "number",
                "default": DEFAULT_LIFE_SPAN,
                "min": 0.0,
                "description": "Width of the life range above life_min"
            },
            "radius_min": {
                "type": "number",
                "default": DEFAULT_RADIUS_MIN,
                "min": 0.0,
                "description": "Smallest particle radius in pixels"
            },
            "radius_span": {
                "type": "number",
                "default": DEFAULT_RADIUS_SPAN,
                "min": 0.0,
                "description": "Width of the radius range above radius_min"
            },
            "max_opacity": {
                "type": "number",
                "default": DEFAULT_MAX_OPACITY,
                "min": 0.0,
                "max": 1.0,
                "description": "Opacity of a particle at full life"
            },
            "color": {
                "type": "string",
                "default": DEFAULT_COLOR,
                "description": "Fill color as #rrggbb"
            }
        })
    }
}

/// A fixed pool of particles redrawn onto an owned surface every frame.
///
/// Slot order is draw order. The field reads its bounds from the surface on
/// every resample, so a resize takes effect on the next tick: particles left
/// outside the new bounds are resampled then, not during the resize.
pub struct ParticleField<S: Surface, R: RandomSource = Xorshift64> {
    surface: S,
    rng: R,
    params: ParticleParams,
    particles: Vec<Particle>,
    frames: u64,
}

impl<S: Surface, R: RandomSource> ParticleField<S, R> {
    /// Creates a field and populates it with `params.particle_count`
    /// independently sampled particles.
    pub fn new(surface: S, mut rng: R, params: ParticleParams) -> Result<Self, EffectError> {
        params.validate()?;
        let width = surface.width() as f64;
        let height = surface.height() as f64;
        let particles = (0..params.particle_count)
            .map(|_| Particle::sample(&mut rng, width, height, &params))
            .collect();
        Ok(Self {
            surface,
            rng,
            params,
            particles,
            frames: 0,
        })
    }

    /// Advances one frame: clear, then step, resample if needed, and draw
    /// each particle in slot order.
    ///
    /// Returns how many particles were resampled this frame.
    pub fn tick(&mut self) -> Result<usize, EffectError> {
        self.surface.clear();
        let width = self.surface.width() as f64;
        let height = self.surface.height() as f64;
        let mut resampled = 0;

        for particle in &mut self.particles {
            particle.advance();
            if particle.is_expired() || particle.is_outside(width, height) {
                *particle = Particle::sample(&mut self.rng, width, height, &self.params);
                resampled += 1;
            }
            draw(&mut self.surface, particle, &self.params)?;
        }

        self.frames += 1;
        log::trace!("frame {}: resampled {resampled} particles", self.frames);
        Ok(resampled)
    }

    /// Clears and redraws the current particles without advancing them.
    pub fn render(&mut self) -> Result<(), EffectError> {
        self.surface.clear();
        for particle in &self.particles {
            draw(&mut self.surface, particle, &self.params)?;
        }
        Ok(())
    }

    /// Resizes the owned surface. Particle positions are left untouched.
    pub fn resize(&mut self, width: usize, height: usize) -> Result<(), EffectError> {
        self.surface.resize(width, height)?;
        log::debug!("particle surface resized to {width}x{height}");
        Ok(())
    }

    pub fn particles(&self) -> &[Particle] {
        &self.particles
    }

    pub fn surface(&self) -> &S {
        &self.surface
    }

    pub fn surface_mut(&mut self) -> &mut S {
        &mut self.surface
    }

    pub fn width(&self) -> usize {
        self.surface.width()
    }

    pub fn height(&self) -> usize {
        self.surface.height()
    }

    pub fn params(&self) -> &ParticleParams {
        &self.params
    }

    /// Schema of the field's parameters; see [`ParticleParams::schema`].
    pub fn param_schema(&self) -> Value {
        ParticleParams::schema()
    }

    /// Frames ticked since construction.
    pub fn frame_count(&self) -> u64 {
        self.frames
    }
}

impl<S: Surface> ParticleField<S, Xorshift64> {
    /// Creates a field seeded with `seed`, reading parameters from JSON.
    pub fn from_json(surface: S, seed: u64, params: &Value) -> Result<Self, EffectError> {
        Self::new(surface, Xorshift64::new(seed), ParticleParams::from_json(params)?)
    }
}

impl<S: Surface, R: RandomSource> Animation for ParticleField<S, R> {
    fn frame(&mut self, _now_ms: f64) -> Result<(), EffectError> {
        self.tick().map(|_| ())
    }
}

fn draw<S: Surface>(
    surface: &mut S,
    particle: &Particle,
    params: &ParticleParams,
) -> Result<(), EffectError> {
    surface.fill_circle(
        particle.position.x,
        particle.position.y,
        particle.radius,
        params.color,
        particle.opacity(params.max_opacity),
    )
}
