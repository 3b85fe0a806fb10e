//! Frame timing
//!
//! Turns the host's monotonic frame timestamps (milliseconds, as delivered
//! by `requestAnimationFrame`) into per-tick deltas in seconds.

/// Delta-time source for the frame loop
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct FrameClock {
    last_ms: Option<f64>,
}

impl FrameClock {
    pub fn new() -> Self {
        Self::default()
    }

    /// Seconds since the previous call. The first call after construction or
    /// `reset` returns 0 so a run never starts with a jump; a timestamp that
    /// goes backwards or isn't finite also yields 0.
    pub fn delta(&mut self, now_ms: f64) -> f32 {
        if !now_ms.is_finite() {
            return 0.0;
        }
        let dt = match self.last_ms {
            Some(last) if now_ms > last => ((now_ms - last) / 1000.0) as f32,
            _ => 0.0,
        };
        if self.last_ms.is_none_or(|last| now_ms > last) {
            self.last_ms = Some(now_ms);
        }
        dt
    }

    /// Forget the previous timestamp
    pub fn reset(&mut self) {
        self.last_ms = None;
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_first_frame_is_zero() {
        let mut clock = FrameClock::new();
        assert_eq!(clock.delta(123_456.0), 0.0);
        assert!((clock.delta(123_472.0) - 0.016).abs() < 1e-6);
    }

    #[test]
    fn test_reset_zeroes_next_frame() {
        let mut clock = FrameClock::new();
        clock.delta(1000.0);
        clock.delta(2000.0);
        clock.reset();
        assert_eq!(clock.delta(60_000.0), 0.0);
        assert!((clock.delta(61_000.0) - 1.0).abs() < 1e-6);
    }

    #[test]
    fn test_backwards_time_is_zero() {
        let mut clock = FrameClock::new();
        clock.delta(5000.0);
        assert_eq!(clock.delta(4000.0), 0.0);
        // Measured from the newest timestamp seen
        assert!((clock.delta(5500.0) - 0.5).abs() < 1e-6);
        assert_eq!(clock.delta(f64::NAN), 0.0);
    }
}
