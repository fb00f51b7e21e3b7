//! Playback scheduling: maps wall-clock time onto the catalog timeline.
//!
//! The scheduler advances a simulated clock so that a configured number of
//! real minutes covers the full data span. Each tick yields a half-open
//! window `(prev, current]` of simulated time; the caller replays every
//! event whose timestamp falls inside it.

use crate::scale::Linear;

/// Longest real interval credited to a single tick. Without this, coming
/// back from a suspended terminal would dump the entire backlog of events
/// onto the globe in one frame.
pub const MAX_TICK_MS: u64 = 500;

/// How long playback stays held after the user scrubs the timeline.
pub const SCRUB_HOLD_MS: u64 = 1000;

pub struct Scheduler {
    end: i64,
    current: f64,
    paused: bool,
    last_tick: Option<u64>,
    hold_until: Option<u64>,
    real_to_data: Linear,
    percent_to_time: Linear,
}

impl Scheduler {
    /// `start`/`end` are the catalog span in epoch millis; `minutes` is the
    /// real playback duration mapped onto that span.
    pub fn new(start: i64, end: i64, minutes: f64) -> Self {
        let span = (end - start).max(0) as f64;
        Self {
            end,
            current: start as f64,
            paused: false,
            last_tick: None,
            hold_until: None,
            real_to_data: Linear::new((0.0, minutes * 60_000.0), (0.0, span)),
            percent_to_time: Linear::new((0.0, 100.0), (start as f64, end as f64)),
        }
    }

    /// Advance the simulated clock. `now_ms` is a monotonic wall-clock
    /// reading in milliseconds. Returns the simulated window `(t0, t1]`
    /// to replay; the window is empty (`t0 == t1`) while paused, held
    /// after a scrub, or on the very first tick.
    pub fn tick(&mut self, now_ms: u64) -> (i64, i64) {
        let last = self.last_tick.replace(now_ms);

        if let Some(hold) = self.hold_until {
            if now_ms >= hold {
                self.hold_until = None;
            }
        }

        let here = (self.current as i64, self.current as i64);
        let Some(last) = last else { return here };
        if self.paused || self.hold_until.is_some() {
            return here;
        }

        let real = now_ms.saturating_sub(last).min(MAX_TICK_MS) as f64;
        let prev = self.current;
        self.current += self.real_to_data.apply(real);
        (prev as i64, self.current as i64)
    }

    pub fn is_paused(&self) -> bool {
        self.paused
    }

    pub fn set_paused(&mut self, paused: bool) {
        self.paused = paused;
    }

    pub fn toggle_paused(&mut self) {
        self.paused = !self.paused;
    }

    /// Jump the simulated clock to a percent position along the data span
    /// and hold playback briefly, mirroring pause-while-scrubbing.
    pub fn scrub_to_percent(&mut self, percent: f64, now_ms: u64) {
        let percent = percent.clamp(0.0, 100.0);
        self.current = self.percent_to_time.apply(percent);
        self.hold_until = Some(now_ms + SCRUB_HOLD_MS);
    }

    /// Position along the data span, clamped to 0..100 even when the clock
    /// has run past the last event.
    pub fn percent(&self) -> f64 {
        self.percent_to_time.invert(self.current).clamp(0.0, 100.0)
    }

    /// Current simulated time in epoch millis.
    pub fn current_ms(&self) -> i64 {
        self.current as i64
    }

    pub fn finished(&self) -> bool {
        self.current >= self.end as f64
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    // 12 real minutes (720_000 ms) map to a 7_200_000 ms span: 10x speedup.
    fn scheduler() -> Scheduler {
        Scheduler::new(0, 7_200_000, 12.0)
    }

    #[test]
    fn first_tick_yields_empty_window() {
        let mut s = scheduler();
        assert_eq!(s.tick(5_000), (0, 0));
    }

    #[test]
    fn elapsed_real_time_scales_to_data_time() {
        let mut s = scheduler();
        s.tick(0);
        assert_eq!(s.tick(100), (0, 1000));
        assert_eq!(s.tick(300), (1000, 3000));
        assert_eq!(s.current_ms(), 3000);
    }

    #[test]
    fn real_delta_is_clamped_to_500ms() {
        let mut s = scheduler();
        s.tick(0);
        // 10 seconds of wall time passed, but only 500ms is credited
        let (t0, t1) = s.tick(10_000);
        assert_eq!((t0, t1), (0, 5000));
    }

    #[test]
    fn paused_ticks_do_not_advance_but_reset_the_clock() {
        let mut s = scheduler();
        s.tick(0);
        s.set_paused(true);
        assert_eq!(s.tick(200), (0, 0));
        assert_eq!(s.tick(400), (0, 0));
        s.set_paused(false);
        // only the time since the last (paused) tick counts
        assert_eq!(s.tick(500), (0, 1000));
    }

    #[test]
    fn scrub_jumps_and_holds_playback() {
        let mut s = scheduler();
        s.tick(0);
        s.scrub_to_percent(50.0, 0);
        assert_eq!(s.current_ms(), 3_600_000);
        assert!((s.percent() - 50.0).abs() < 1e-9);

        // held: no advance inside the hold window
        assert_eq!(s.tick(500), (3_600_000, 3_600_000));
        // hold expires, playback resumes from the scrubbed position
        let (t0, t1) = s.tick(1100);
        assert_eq!(t0, 3_600_000);
        assert_eq!(t1, 3_600_000 + 5000);
    }

    #[test]
    fn scrub_percent_is_clamped() {
        let mut s = scheduler();
        s.scrub_to_percent(250.0, 0);
        assert_eq!(s.current_ms(), 7_200_000);
        s.scrub_to_percent(-10.0, 0);
        assert_eq!(s.current_ms(), 0);
    }

    #[test]
    fn percent_clamps_past_the_end() {
        let mut s = scheduler();
        s.tick(0);
        s.scrub_to_percent(100.0, 0);
        s.tick(2_000);
        s.tick(3_000);
        assert!(s.finished());
        assert_eq!(s.percent(), 100.0);
    }

    #[test]
    fn zero_span_catalog_does_not_divide_by_zero() {
        let mut s = Scheduler::new(1000, 1000, 12.0);
        s.tick(0);
        assert_eq!(s.tick(100), (1000, 1000));
        assert_eq!(s.percent(), 0.0);
    }
}
