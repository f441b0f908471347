//! Frame loop abstraction.
//!
//! A host's animation callback ("run this before the next repaint, then ask
//! again") is modeled as a [`Scheduler`] handing out frame timestamps and a
//! [`FrameLoop`] that runs one [`Animation::frame`] per timestamp. Browser
//! hosts drive animations from `requestAnimationFrame`; tests and the CLI use
//! [`FixedFrames`] to step deterministically.

use crate::error::EffectError;

/// Nominal display refresh interval in milliseconds (60 Hz).
pub const FRAME_INTERVAL_MS: f64 = 1000.0 / 60.0;

/// Something redrawn once per frame tick.
///
/// Object safe, so hosts can hold a `Box<dyn Animation>`.
pub trait Animation {
    /// Runs one frame to completion. `now_ms` is the host timestamp of the
    /// frame; animations without time-based behavior ignore it.
    fn frame(&mut self, now_ms: f64) -> Result<(), EffectError>;
}

/// Hands out frame timestamps.
pub trait Scheduler {
    /// Waits for the next frame and returns its timestamp in milliseconds,
    /// or `None` once the host is torn down.
    fn next_frame(&mut self) -> Option<f64>;
}

/// A scheduler producing a fixed number of evenly spaced frames, without
/// waiting.
#[derive(Debug, Clone)]
pub struct FixedFrames {
    remaining: u64,
    now_ms: f64,
    interval_ms: f64,
}

impl FixedFrames {
    /// `count` frames at the nominal 60 Hz interval, starting at t = 0.
    pub fn new(count: u64) -> Self {
        Self::with_interval(count, FRAME_INTERVAL_MS)
    }

    /// `count` frames spaced `interval_ms` apart, starting at t = 0.
    pub fn with_interval(count: u64, interval_ms: f64) -> Self {
        Self {
            remaining: count,
            now_ms: 0.0,
            interval_ms,
        }
    }

    /// Frames left to hand out.
    pub fn remaining(&self) -> u64 {
        self.remaining
    }
}

impl Scheduler for FixedFrames {
    fn next_frame(&mut self) -> Option<f64> {
        if self.remaining == 0 {
            return None;
        }
        self.remaining -= 1;
        let now = self.now_ms;
        self.now_ms += self.interval_ms;
        Some(now)
    }
}

/// Drives an [`Animation`] from a [`Scheduler`], one frame at a time.
///
/// Each frame runs to completion before the next timestamp is requested, so
/// an animation never overlaps itself.
#[derive(Debug, Default)]
pub struct FrameLoop {
    frames_run: u64,
    last_frame_ms: Option<f64>,
}

impl FrameLoop {
    pub fn new() -> Self {
        Self::default()
    }

    /// Runs frames until the scheduler stops, returning how many ran.
    ///
    /// Stops at the first frame error and returns it.
    pub fn run<S: Scheduler + ?Sized>(
        &mut self,
        scheduler: &mut S,
        animation: &mut dyn Animation,
    ) -> Result<u64, EffectError> {
        let start = self.frames_run;
        while let Some(now) = scheduler.next_frame() {
            animation.frame(now)?;
            self.frames_run += 1;
            self.last_frame_ms = Some(now);
        }
        log::trace!("frame loop stopped after {} frames", self.frames_run - start);
        Ok(self.frames_run - start)
    }

    /// Total frames run across every `run` call.
    pub fn frames_run(&self) -> u64 {
        self.frames_run
    }

    /// Timestamp of the most recent frame.
    pub fn last_frame_ms(&self) -> Option<f64> {
        self.last_frame_ms
    }
}

/// Fixed-period timer driven by elapsed time rather than by frames.
///
/// Mirrors a host interval timer: `advance` accumulates elapsed
/// milliseconds and reports how many periods completed. An optional start
/// delay holds the timer back until it has elapsed once.
#[derive(Debug, Clone)]
pub struct Interval {
    period_ms: f64,
    delay_ms: f64,
    accumulated_ms: f64,
}

impl Interval {
    /// Creates a timer firing every `period_ms`.
    ///
    /// Returns `EffectError::InvalidParams` if the period is not positive.
    pub fn new(period_ms: f64) -> Result<Self, EffectError> {
        Self::with_delay(period_ms, 0.0)
    }

    /// Creates a timer that starts counting periods after `delay_ms`.
    pub fn with_delay(period_ms: f64, delay_ms: f64) -> Result<Self, EffectError> {
        if !period_ms.is_finite() || period_ms <= 0.0 {
            return Err(EffectError::InvalidParams(format!(
                "interval period must be positive, got {period_ms}"
            )));
        }
        Ok(Self {
            period_ms,
            delay_ms: delay_ms.max(0.0),
            accumulated_ms: 0.0,
        })
    }

    /// Adds `elapsed_ms` and returns the number of periods that completed.
    pub fn advance(&mut self, elapsed_ms: f64) -> u32 {
        let mut elapsed = elapsed_ms.max(0.0);
        if self.delay_ms > 0.0 {
            let consumed = elapsed.min(self.delay_ms);
            self.delay_ms -= consumed;
            elapsed -= consumed;
        }
        self.accumulated_ms += elapsed;
        let periods = (self.accumulated_ms / self.period_ms).floor();
        if periods < 1.0 {
            return 0;
        }
        self.accumulated_ms -= periods * self.period_ms;
        // float remainder can land a hair below zero
        self.accumulated_ms = self.accumulated_ms.max(0.0);
        if periods >= f64::from(u32::MAX) {
            u32::MAX
        } else {
            periods as u32
        }
    }
}
