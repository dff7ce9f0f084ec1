//! Typing speed and accuracy.
//!
//! WPM follows the usual five-characters-per-word convention. The trailing
//! average is built from samples taken lazily, at most once per second,
//! whenever the instantaneous WPM is queried.

use std::collections::VecDeque;
use std::time::{Duration, Instant};

use crate::util::{mean, round_tenth};

pub const CHARS_PER_WORD: f64 = 5.0;
/// Number of per-second samples kept for the trailing average
pub const WPM_HISTORY_LEN: usize = 10;
pub const SAMPLE_INTERVAL: Duration = Duration::from_secs(1);

/// One WPM sample on the session timeline
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct TimeSeriesPoint {
    /// seconds since the session started
    pub t: f64,
    pub wpm: f64,
}

impl TimeSeriesPoint {
    pub fn new(t: f64, wpm: f64) -> Self {
        Self { t, wpm }
    }
}

impl From<TimeSeriesPoint> for (f64, f64) {
    fn from(p: TimeSeriesPoint) -> Self {
        (p.t, p.wpm)
    }
}

/// Raw words per minute, `None` when nothing was completed or no time passed
pub fn words_per_minute(completed_chars: usize, elapsed: Duration) -> Option<f64> {
    let minutes = elapsed.as_secs_f64() / 60.0;
    if minutes > 0.0 && completed_chars > 0 {
        Some((completed_chars as f64 / CHARS_PER_WORD) / minutes)
    } else {
        None
    }
}

/// Percentage of correct characters, rounded to one decimal.
/// Nothing typed yet counts as perfect.
pub fn accuracy(correct_chars: usize, total_chars: usize) -> f64 {
    if total_chars == 0 {
        return 100.0;
    }
    round_tenth(correct_chars as f64 / total_chars as f64 * 100.0)
}

/// Rolling window of per-second WPM samples
#[derive(Debug, Clone, Default)]
pub struct WpmTracker {
    started_at: Option<Instant>,
    last_sample: Option<Instant>,
    history: VecDeque<f64>,
    timeline: Vec<TimeSeriesPoint>,
}

impl WpmTracker {
    pub fn new() -> Self {
        Self::default()
    }

    /// Anchor the sampling clock. Later calls are ignored.
    pub fn start(&mut self, now: Instant) {
        if self.started_at.is_none() {
            self.started_at = Some(now);
            self.last_sample = Some(now);
        }
    }

    pub fn started_at(&self) -> Option<Instant> {
        self.started_at
    }

    /// Instantaneous WPM at `now`, rounded to one decimal.
    /// Records a sample when a full interval has passed since the last one.
    pub fn observe(&mut self, completed_chars: usize, now: Instant) -> f64 {
        let Some(started_at) = self.started_at else {
            return 0.0;
        };
        let elapsed = now.saturating_duration_since(started_at);
        let Some(raw) = words_per_minute(completed_chars, elapsed) else {
            return 0.0;
        };
        let wpm = round_tenth(raw);

        let due = self
            .last_sample
            .map_or(true, |last| now.saturating_duration_since(last) >= SAMPLE_INTERVAL);
        if due {
            self.history.push_back(wpm);
            while self.history.len() > WPM_HISTORY_LEN {
                self.history.pop_front();
            }
            self.timeline
                .push(TimeSeriesPoint::new(elapsed.as_secs_f64(), wpm));
            self.last_sample = Some(now);
        }

        wpm
    }

    /// Mean of the recent samples, rounded to one decimal
    pub fn average(&self) -> f64 {
        let samples: Vec<f64> = self.history.iter().copied().collect();
        mean(&samples).map_or(0.0, round_tenth)
    }

    pub fn history(&self) -> impl Iterator<Item = f64> + '_ {
        self.history.iter().copied()
    }

    pub fn timeline(&self) -> &[TimeSeriesPoint] {
        &self.timeline
    }
}
