/// Simulated time units per wall-clock millisecond, at a time scale of 1.
pub const TIME_FACTOR_PER_MS: f64 = 0.01;

/// Converts a wall-clock interval into the time factor for one tick.
pub fn tick(wall_delta_ms: f64, time_scale: i32) -> f64 {
    wall_delta_ms * time_scale as f64 * TIME_FACTOR_PER_MS
}

/// Turns frame timestamps into time factors.
///
/// While paused, frames produce no ticks at all. Resuming resets the baseline
/// to the resume instant, so the time spent paused is never replayed.
#[derive(Debug, Clone, PartialEq)]
pub struct SimulationClock {
    /// Signed speed control; negative values run time backwards
    time_scale: i32,
    paused: bool,
    last_frame_ms: Option<f64>,
}

impl SimulationClock {
    pub fn new(time_scale: i32) -> Self {
        SimulationClock {
            time_scale,
            paused: false,
            last_frame_ms: None,
        }
    }

    pub fn new_paused(time_scale: i32) -> Self {
        SimulationClock {
            paused: true,
            ..Self::new(time_scale)
        }
    }

    /// Called once per host frame. Returns the time factor to apply, or
    /// `None` if the clock is paused.
    pub fn frame(&mut self, timestamp_ms: f64) -> Option<f64> {
        if self.paused {
            return None;
        }

        let wall_delta_ms = match self.last_frame_ms {
            None => 0.0,
            Some(last) if timestamp_ms < last => {
                tracing::warn!(
                    "Frame timestamp went backwards ({} ms -> {} ms); treating as no time elapsed",
                    last,
                    timestamp_ms
                );
                0.0
            }
            Some(last) => timestamp_ms - last,
        };
        self.last_frame_ms = Some(timestamp_ms);

        Some(tick(wall_delta_ms, self.time_scale))
    }

    pub fn is_paused(&self) -> bool {
        self.paused
    }

    pub fn pause(&mut self) {
        self.paused = true;
    }

    /// Resumes ticking, measuring the next frame from `now_ms`.
    pub fn resume(&mut self, now_ms: f64) {
        self.paused = false;
        self.last_frame_ms = Some(now_ms);
    }

    pub fn toggle_pause(&mut self, now_ms: f64) {
        if self.paused {
            self.resume(now_ms);
        } else {
            self.pause();
        }
    }

    pub fn time_scale(&self) -> i32 {
        self.time_scale
    }

    pub fn set_time_scale(&mut self, time_scale: i32) {
        self.time_scale = time_scale;
    }

    pub fn faster(&mut self) {
        self.time_scale = self.time_scale.saturating_add(1);
    }

    pub fn slower(&mut self) {
        self.time_scale = self.time_scale.saturating_sub(1);
    }

    pub fn reverse(&mut self) {
        self.time_scale = self.time_scale.saturating_neg();
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    use approx::assert_relative_eq;

    #[test]
    fn test_tick() {
        assert_relative_eq!(tick(16.0, 1), 0.16);
        assert_relative_eq!(tick(16.0, 5), 0.8);
        assert_relative_eq!(tick(16.0, -2), -0.32);
        assert_eq!(tick(16.0, 0), 0.0);
        assert_eq!(tick(0.0, 7), 0.0);
    }

    #[test]
    fn test_first_frame_is_baseline() {
        let mut clock = SimulationClock::new(1);
        assert_eq!(clock.frame(1234.0), Some(0.0));
        assert_relative_eq!(clock.frame(1250.0).unwrap(), 0.16);
    }

    #[test]
    fn test_pause_stops_ticks() {
        let mut clock = SimulationClock::new(3);
        clock.frame(0.0);
        clock.pause();
        assert_eq!(clock.frame(100.0), None);
        assert_eq!(clock.frame(5000.0), None);

        // The paused interval is not replayed on resume
        clock.resume(6000.0);
        assert_relative_eq!(clock.frame(6010.0).unwrap(), tick(10.0, 3));
    }

    #[test]
    fn test_starts_paused() {
        let mut clock = SimulationClock::new_paused(1);
        assert!(clock.is_paused());
        assert_eq!(clock.frame(10.0), None);
        clock.toggle_pause(20.0);
        assert!(!clock.is_paused());
        assert_eq!(clock.frame(20.0), Some(0.0));
        clock.toggle_pause(30.0);
        assert!(clock.is_paused());
    }

    #[test]
    fn test_backwards_timestamp() {
        let mut clock = SimulationClock::new(1);
        clock.frame(100.0);
        assert_eq!(clock.frame(50.0), Some(0.0));
        // Baseline follows the host clock from there on
        assert_relative_eq!(clock.frame(60.0).unwrap(), 0.1);
    }

    #[test]
    fn test_speed_controls() {
        let mut clock = SimulationClock::new(1);
        clock.faster();
        clock.faster();
        assert_eq!(clock.time_scale(), 3);
        clock.reverse();
        assert_eq!(clock.time_scale(), -3);
        clock.slower();
        assert_eq!(clock.time_scale(), -4);
        clock.set_time_scale(0);
        clock.slower();
        assert_eq!(clock.time_scale(), -1);

        clock.set_time_scale(i32::MIN);
        clock.reverse();
        assert_eq!(clock.time_scale(), i32::MAX);
    }
}
