//! Fixed-rate frame pacing and the round clock

use std::time::{Duration, Instant};

/// Schedules frames at a fixed period and reports wall-clock time since the
/// pacer was started
#[derive(Debug, Clone)]
pub struct FramePacer {
    period: Duration,
    started: Instant,
    next_frame: Instant,
}

impl FramePacer {
    pub fn new(period: Duration, now: Instant) -> Self {
        Self {
            period,
            started: now,
            next_frame: now,
        }
    }

    /// When the next frame should start
    pub fn deadline(&self) -> Instant {
        self.next_frame
    }

    /// True once the deadline has passed
    pub fn is_due(&self, now: Instant) -> bool {
        now >= self.next_frame
    }

    /// Start a frame at `now`, returning seconds elapsed since the pacer was
    /// created.
    ///
    /// Stalls count in full. If the loop fell behind by more than a period the
    /// schedule restarts from `now` rather than bursting to catch up.
    pub fn begin_frame(&mut self, now: Instant) -> f32 {
        self.next_frame += self.period;
        if self.next_frame + self.period < now {
            self.next_frame = now + self.period;
        }

        now.saturating_duration_since(self.started).as_secs_f32()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::sim::{Dot, GamePhase, GameState, Outcome, RoundConfig, TickInput, tick};
    use glam::Vec2;

    const PERIOD: Duration = Duration::from_millis(16);

    #[test]
    fn test_first_frame_schedules_next() {
        let start = Instant::now();
        let mut pacer = FramePacer::new(PERIOD, start);
        assert!(pacer.is_due(start));
        let elapsed = pacer.begin_frame(start);
        assert_eq!(elapsed, 0.0);
        assert_eq!(pacer.deadline(), start + PERIOD);
        assert!(!pacer.is_due(start + Duration::from_millis(10)));
    }

    #[test]
    fn test_elapsed_is_wall_clock() {
        let start = Instant::now();
        let mut pacer = FramePacer::new(PERIOD, start);
        pacer.begin_frame(start + Duration::from_millis(16));
        let elapsed = pacer.begin_frame(start + Duration::from_millis(36));
        assert!((elapsed - 0.036).abs() < 1e-6);
        assert_eq!(pacer.deadline(), start + PERIOD * 2);
    }

    #[test]
    fn test_stall_counts_in_full_and_reschedules() {
        let start = Instant::now();
        let mut pacer = FramePacer::new(PERIOD, start);
        pacer.begin_frame(start);

        let late = start + Duration::from_secs(2);
        let elapsed = pacer.begin_frame(late);
        assert!((elapsed - 2.0).abs() < 1e-6);
        assert_eq!(pacer.deadline(), late + PERIOD);
    }

    #[test]
    fn test_stall_ends_short_round() {
        let start = Instant::now();
        let mut pacer = FramePacer::new(PERIOD, start);
        let config = RoundConfig {
            duration_secs: 1.0,
            ..Default::default()
        };
        let dots = vec![Dot::new(Vec2::new(700.0, 500.0), false)];
        let mut state = GameState::with_dots(1, config, dots);
        let input = TickInput::default();

        tick(&mut state, &input, pacer.begin_frame(start + PERIOD));
        assert_eq!(state.phase, GamePhase::Playing);

        // Five seconds without a frame, e.g. the window being dragged
        let resumed = start + PERIOD + Duration::from_secs(5);
        tick(&mut state, &input, pacer.begin_frame(resumed));
        assert_eq!(state.phase, GamePhase::RoundOver);
        assert_eq!(state.outcome, Some(Outcome::Draw));
        assert!(state.elapsed_secs >= 5.0);
    }
}
