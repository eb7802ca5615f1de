//! Out-of-play detection
//!
//! The envelope is two scalar thresholds along the vertical travel axis,
//! already offset by the ball radius, so a ball reads as lost only once it is
//! fully outside the playable area rather than merely touching the edge.
//! The check is stateless; the caller parks the lost ball and excludes parked
//! balls from later checks, which is what prevents repeat detection.

use serde::{Deserialize, Serialize};

/// Bounds beyond which a ball is out of play
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct LossEnvelope {
    /// Upper edge of the playable span (use `-INFINITY` for an open top)
    pub min_y: f32,
    /// Lower edge of the playable span
    pub max_y: f32,
}

impl LossEnvelope {
    pub fn new(min_y: f32, max_y: f32) -> Self {
        Self { min_y, max_y }
    }

    /// True once the ball's center is past either threshold
    #[inline]
    pub fn is_lost(&self, pos_y: f32) -> bool {
        pos_y < self.min_y || pos_y > self.max_y
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_strict_thresholds() {
        let envelope = LossEnvelope::new(17.5, 582.5);
        assert!(!envelope.is_lost(300.0));
        // Exactly on the edge is still in play
        assert!(!envelope.is_lost(582.5));
        assert!(!envelope.is_lost(17.5));
        assert!(envelope.is_lost(583.0));
        assert!(envelope.is_lost(17.0));
    }

    #[test]
    fn test_open_top_envelope() {
        // Seesaw play field: balls may fly above the canvas and come back
        let envelope = LossEnvelope::new(f32::NEG_INFINITY, 620.0);
        assert!(!envelope.is_lost(-10_000.0));
        assert!(!envelope.is_lost(0.0));
        assert!(envelope.is_lost(630.0));
    }
}
