//! Running score with a smoothed display value.
//!
//! The authoritative score jumps immediately on a match; the displayed value
//! eases toward it with a frame-rate-independent exponential approach, so the
//! HUD counts up without ever overshooting or oscillating.

use crate::types::SCORE_EASE_RATE;

#[derive(Debug, Clone)]
pub struct ScoreTracker {
    score: f32,
    display: f32,
    high_score: f32,
}

impl ScoreTracker {
    /// `high_score` is the persisted value for this session key, fetched by
    /// the caller at session start.
    pub fn new(high_score: f32) -> Self {
        Self {
            score: 0.0,
            display: 0.0,
            high_score,
        }
    }

    pub fn score(&self) -> f32 {
        self.score
    }

    pub fn display(&self) -> f32 {
        self.display
    }

    pub fn high_score(&self) -> f32 {
        self.high_score
    }

    pub fn add(&mut self, delta: f32) {
        self.score += delta;
    }

    /// Advance the eased display value by `dt` seconds.
    pub fn tick(&mut self, dt: f32) {
        if dt <= 0.0 {
            return;
        }
        let blend = 1.0 - (-SCORE_EASE_RATE * dt).exp();
        self.display += (self.score - self.display) * blend;
        // Snap when the residual is below display resolution.
        if (self.score - self.display).abs() < 0.5 {
            self.display = self.score;
        }
    }

    pub fn beats_high_score(&self) -> bool {
        self.score > self.high_score
    }

    /// Promote the current score to the high score if it is a new record.
    /// Returns the new record so the caller can persist it.
    pub fn commit_high_score(&mut self) -> Option<f32> {
        if self.beats_high_score() {
            self.high_score = self.score;
            Some(self.high_score)
        } else {
            None
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn display_eases_toward_score_without_overshoot() {
        let mut tracker = ScoreTracker::new(0.0);
        tracker.add(400.0);

        let mut prev = tracker.display();
        for _ in 0..200 {
            tracker.tick(0.016);
            let now = tracker.display();
            assert!(now >= prev, "display must be monotonic");
            assert!(now <= tracker.score(), "display must not overshoot");
            prev = now;
        }
        assert_eq!(tracker.display(), 400.0);
    }

    #[test]
    fn large_dt_converges_in_one_step() {
        let mut tracker = ScoreTracker::new(0.0);
        tracker.add(1000.0);
        tracker.tick(10.0);
        assert_eq!(tracker.display(), 1000.0);
    }

    #[test]
    fn zero_dt_is_a_no_op() {
        let mut tracker = ScoreTracker::new(0.0);
        tracker.add(100.0);
        tracker.tick(0.0);
        assert_eq!(tracker.display(), 0.0);
    }

    #[test]
    fn commit_high_score_only_on_a_record() {
        let mut tracker = ScoreTracker::new(500.0);
        tracker.add(300.0);
        assert_eq!(tracker.commit_high_score(), None);
        assert_eq!(tracker.high_score(), 500.0);

        tracker.add(300.0);
        assert_eq!(tracker.commit_high_score(), Some(600.0));
        assert_eq!(tracker.high_score(), 600.0);
    }
}
