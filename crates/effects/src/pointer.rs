//! Shared pointer state.

use glam::DVec2;

/// Last known pointer position in client coordinates.
///
/// One context is owned by the host and passed to every effect that reads
/// the pointer. It starts at the origin until the first move event.
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct PointerContext {
    position: DVec2,
}

impl PointerContext {
    pub fn new() -> Self {
        Self::default()
    }

    /// Records a pointer move.
    pub fn moved(&mut self, x: f64, y: f64) {
        self.position = DVec2::new(x, y);
    }

    pub fn position(&self) -> DVec2 {
        self.position
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn starts_at_origin() {
        let p = PointerContext::new();
        assert_eq!(p.position(), DVec2::ZERO);
    }

    #[test]
    fn moved_replaces_position() {
        let mut p = PointerContext::new();
        p.moved(10.0, 20.0);
        p.moved(-5.0, 3.5);
        assert_eq!(p.position(), DVec2::new(-5.0, 3.5));
    }
}
