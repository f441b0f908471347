//! A single point particle and its sampling rules.

use glam::DVec2;
use landing_fx_core::prng::RandomSource;

use crate::ParticleParams;

/// One drifting point in surface-pixel space.
///
/// `max_life` is fixed when the particle is (re)sampled and is the
/// denominator for its fade; `life` counts down by one per frame.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Particle {
    pub position: DVec2,
    pub velocity: DVec2,
    pub radius: f64,
    life: f64,
    max_life: f64,
}

impl Particle {
    /// Draws a fresh particle inside a `width` x `height` surface.
    ///
    /// Consumes exactly six values from `rng`, in the order x, y, vx, vy,
    /// life, radius.
    pub fn sample<R: RandomSource + ?Sized>(
        rng: &mut R,
        width: f64,
        height: f64,
        params: &ParticleParams,
    ) -> Self {
        let x = rng.next_f64() * width;
        let y = rng.next_f64() * height;
        let vx = (rng.next_f64() - 0.5) * (2.0 * params.max_speed);
        let vy = (rng.next_f64() - 0.5) * (2.0 * params.max_speed);
        let life = rng.next_f64() * params.life_span + params.life_min;
        let radius = rng.next_f64() * params.radius_span + params.radius_min;
        Self {
            position: DVec2::new(x, y),
            velocity: DVec2::new(vx, vy),
            radius,
            life,
            max_life: life,
        }
    }

    /// Builds a particle with explicit state. `life` is also its total life.
    pub fn new(position: DVec2, velocity: DVec2, radius: f64, life: f64) -> Self {
        Self {
            position,
            velocity,
            radius,
            life,
            max_life: life,
        }
    }

    /// Frames of life remaining.
    pub fn life(&self) -> f64 {
        self.life
    }

    /// Life the particle was sampled with.
    pub fn max_life(&self) -> f64 {
        self.max_life
    }

    /// `life / max_life`, clamped to [0, 1].
    pub fn life_ratio(&self) -> f64 {
        if self.max_life <= 0.0 {
            return 0.0;
        }
        (self.life / self.max_life).clamp(0.0, 1.0)
    }

    /// Draw opacity: the life ratio scaled by `max_opacity`.
    pub fn opacity(&self, max_opacity: f64) -> f64 {
        self.life_ratio() * max_opacity
    }

    pub fn is_expired(&self) -> bool {
        self.life <= 0.0
    }

    /// True when the position is strictly outside [0, width] x [0, height].
    /// Points exactly on an edge are inside.
    pub fn is_outside(&self, width: f64, height: f64) -> bool {
        let p = self.position;
        p.x < 0.0 || p.x > width || p.y < 0.0 || p.y > height
    }

    /// One Euler step: move by velocity, then age one frame.
    pub(crate) fn advance(&mut self) {
        self.position += self.velocity;
        self.life -= 1.0;
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use landing_fx_core::prng::{SequenceSource, Xorshift64};

    #[test]
    fn sample_maps_draws_in_order() {
        let mut rng = SequenceSource::new(vec![0.5, 0.25, 0.0, 0.75, 0.5, 0.5]);
        let p = Particle::sample(&mut rng, 200.0, 100.0, &ParticleParams::default());
        assert_eq!(p.position, DVec2::new(100.0, 25.0));
        assert_eq!(p.velocity, DVec2::new(-0.25, 0.125));
        assert_eq!(p.life(), 100.0);
        assert_eq!(p.max_life(), 100.0);
        assert_eq!(p.radius, 2.0);
        assert_eq!(rng.draws(), 6);
    }

    #[test]
    fn sampled_values_fall_in_documented_ranges() {
        let params = ParticleParams::default();
        let mut rng = Xorshift64::new(11);
        for _ in 0..5_000 {
            let p = Particle::sample(&mut rng, 640.0, 480.0, &params);
            assert!((0.0..640.0).contains(&p.position.x));
            assert!((0.0..480.0).contains(&p.position.y));
            assert!((-0.25..0.25).contains(&p.velocity.x));
            assert!((-0.25..0.25).contains(&p.velocity.y));
            assert!((50.0..150.0).contains(&p.max_life()));
            assert!((1.0..3.0).contains(&p.radius));
            assert_eq!(p.life(), p.max_life());
        }
    }

    #[test]
    fn advance_moves_then_ages() {
        let mut p = Particle::new(DVec2::new(10.0, 10.0), DVec2::new(2.0, -1.0), 1.0, 3.0);
        p.advance();
        assert_eq!(p.position, DVec2::new(12.0, 9.0));
        assert_eq!(p.life(), 2.0);
        assert_eq!(p.max_life(), 3.0);
    }

    #[test]
    fn expires_at_zero_life() {
        let mut p = Particle::new(DVec2::ZERO, DVec2::ZERO, 1.0, 1.0);
        assert!(!p.is_expired());
        p.advance();
        assert!(p.is_expired());
        assert_eq!(p.opacity(0.3), 0.0);
    }

    #[test]
    fn edges_are_inside() {
        for (x, y) in [(0.0, 0.0), (100.0, 0.0), (0.0, 100.0), (100.0, 100.0)] {
            let p = Particle::new(DVec2::new(x, y), DVec2::ZERO, 1.0, 10.0);
            assert!(!p.is_outside(100.0, 100.0), "({x}, {y}) counted as outside");
        }
    }

    #[test]
    fn any_axis_past_an_edge_is_outside() {
        for (x, y) in [(-0.01, 50.0), (100.01, 50.0), (50.0, -0.01), (50.0, 100.01)] {
            let p = Particle::new(DVec2::new(x, y), DVec2::ZERO, 1.0, 10.0);
            assert!(p.is_outside(100.0, 100.0), "({x}, {y}) counted as inside");
        }
    }

    #[test]
    fn opacity_scales_with_remaining_life() {
        let mut p = Particle::new(DVec2::ZERO, DVec2::ZERO, 1.0, 4.0);
        assert!((p.opacity(0.3) - 0.3).abs() < 1e-12);
        p.advance();
        p.advance();
        assert!((p.opacity(0.3) - 0.15).abs() < 1e-12);
    }
}
