/// Pomodoro countdown state machine
///
/// Alternates focus intervals with breaks. Every fourth break is long; the
/// rest are short. The machine has no clock of its own: the caller ticks it
/// once per second while it is running.
///
/// # Example
///
/// ```
/// use questify_timer::timer::{PomodoroTimer, Phase};
///
/// let mut timer = PomodoroTimer::new();
/// timer.toggle();
///
/// // Skip straight to the break without waiting out the countdown
/// timer.complete_segment();
/// assert_eq!(timer.phase(), Phase::Break { long: false });
/// assert_eq!(timer.completed_pomodoros(), 1);
/// ```

use serde::{Deserialize, Serialize};

/// Default focus interval length
pub const DEFAULT_FOCUS_MINUTES: u32 = 25;

/// Short break length
pub const SHORT_BREAK_MINUTES: u32 = 5;

/// Long break length
pub const LONG_BREAK_MINUTES: u32 = 15;

/// Every Nth break is long
const LONG_BREAK_EVERY: u32 = 4;

/// Current timer phase
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "lowercase")]
pub enum Phase {
    /// Counting down a focus interval
    Focus,

    /// Counting down a break
    Break {
        /// Whether this is the long break
        long: bool,
    },
}

/// Pomodoro timer state
///
/// Serializable so the embedding application can snapshot and restore it.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PomodoroTimer {
    phase: Phase,
    remaining_seconds: u32,
    running: bool,
    focus_minutes: u32,
    completed_pomodoros: u32,
    completed_short_rests: u32,
    completed_long_rests: u32,
}

impl Default for PomodoroTimer {
    fn default() -> Self {
        Self::new()
    }
}

impl PomodoroTimer {
    /// Creates a stopped timer at the start of a focus interval
    pub fn new() -> Self {
        Self::with_focus_minutes(DEFAULT_FOCUS_MINUTES)
    }

    /// Creates a stopped timer with a custom focus length
    ///
    /// A zero length is bumped to one minute.
    pub fn with_focus_minutes(minutes: u32) -> Self {
        let focus_minutes = minutes.max(1);
        Self {
            phase: Phase::Focus,
            remaining_seconds: focus_minutes * 60,
            running: false,
            focus_minutes,
            completed_pomodoros: 0,
            completed_short_rests: 0,
            completed_long_rests: 0,
        }
    }

    /// Current phase
    pub fn phase(&self) -> Phase {
        self.phase
    }

    /// Seconds left in the current segment
    pub fn remaining_seconds(&self) -> u32 {
        self.remaining_seconds
    }

    /// Whether the countdown is running
    pub fn is_running(&self) -> bool {
        self.running
    }

    /// Configured focus length in minutes
    pub fn focus_minutes(&self) -> u32 {
        self.focus_minutes
    }

    /// Focus intervals completed so far
    pub fn completed_pomodoros(&self) -> u32 {
        self.completed_pomodoros
    }

    /// Short breaks taken so far
    pub fn completed_short_rests(&self) -> u32 {
        self.completed_short_rests
    }

    /// Long breaks taken so far
    pub fn completed_long_rests(&self) -> u32 {
        self.completed_long_rests
    }

    /// Whether the next break will be the long one
    ///
    /// Breaks are numbered from 1 across the whole session; every fourth is
    /// long.
    pub fn next_break_is_long(&self) -> bool {
        let breaks_taken = self.completed_short_rests + self.completed_long_rests;
        (breaks_taken + 1) % LONG_BREAK_EVERY == 0
    }

    /// Starts or pauses the countdown
    ///
    /// Pausing keeps the remaining seconds exactly as they are.
    pub fn toggle(&mut self) {
        self.running = !self.running;
    }

    /// Advances the countdown by one second
    ///
    /// Does nothing while paused. When a segment reaches zero the timer
    /// rolls into the next segment and keeps running.
    pub fn tick(&mut self) {
        if !self.running || self.remaining_seconds == 0 {
            return;
        }

        self.remaining_seconds -= 1;

        if self.remaining_seconds == 0 {
            self.advance();
        }
    }

    /// Ends the current segment immediately and stops the clock
    ///
    /// Performs the same transition as the countdown reaching zero, but
    /// leaves the timer paused at the top of the next segment.
    pub fn complete_segment(&mut self) {
        self.advance();
        self.running = false;
    }

    /// Stops the clock and restores the current segment's full duration
    ///
    /// Counters are untouched; only the in-flight countdown is discarded.
    pub fn reset(&mut self) {
        self.running = false;
        self.remaining_seconds = self.segment_seconds(self.phase);
    }

    /// Changes the focus length
    ///
    /// Stops the clock, switches to a focus segment, and reloads the full
    /// new duration. A zero length is bumped to one minute.
    pub fn set_focus_minutes(&mut self, minutes: u32) {
        self.focus_minutes = minutes.max(1);
        self.running = false;
        self.phase = Phase::Focus;
        self.remaining_seconds = self.focus_minutes * 60;
    }

    /// Fraction of the current segment already elapsed, in `[0, 1]`
    pub fn progress(&self) -> f64 {
        let total = self.segment_seconds(self.phase);
        if total == 0 {
            return 1.0;
        }
        1.0 - f64::from(self.remaining_seconds) / f64::from(total)
    }

    /// Moves to the next segment and loads its duration
    fn advance(&mut self) {
        match self.phase {
            Phase::Focus => {
                self.completed_pomodoros += 1;
                let long = self.next_break_is_long();
                self.phase = Phase::Break { long };
                self.remaining_seconds = self.segment_seconds(self.phase);
            }
            Phase::Break { long } => {
                if long {
                    self.completed_long_rests += 1;
                } else {
                    self.completed_short_rests += 1;
                }
                self.phase = Phase::Focus;
                self.remaining_seconds = self.focus_minutes * 60;
            }
        }
    }

    /// Nominal duration of a segment in seconds
    fn segment_seconds(&self, phase: Phase) -> u32 {
        match phase {
            Phase::Focus => self.focus_minutes * 60,
            Phase::Break { long: true } => LONG_BREAK_MINUTES * 60,
            Phase::Break { long: false } => SHORT_BREAK_MINUTES * 60,
        }
    }
}

/// Renders a second count as `mm:ss`
///
/// Minutes are not capped at 59, so an hour-long segment renders as
/// `60:00`.
pub fn format_clock(seconds: u32) -> String {
    format!("{:02}:{:02}", seconds / 60, seconds % 60)
}

#[cfg(test)]
mod tests {
    use super::*;

    /// Runs the timer through one full segment via ticks
    fn run_out_segment(timer: &mut PomodoroTimer) {
        let remaining = timer.remaining_seconds();
        for _ in 0..remaining {
            timer.tick();
        }
    }

    #[test]
    fn test_initial_state() {
        let timer = PomodoroTimer::new();
        assert_eq!(timer.phase(), Phase::Focus);
        assert_eq!(timer.remaining_seconds(), 25 * 60);
        assert!(!timer.is_running());
        assert_eq!(timer.completed_pomodoros(), 0);
    }

    #[test]
    fn test_tick_does_nothing_while_paused() {
        let mut timer = PomodoroTimer::new();
        timer.tick();
        assert_eq!(timer.remaining_seconds(), 25 * 60);
    }

    #[test]
    fn test_pause_preserves_remaining_seconds() {
        let mut timer = PomodoroTimer::new();
        timer.toggle();
        for _ in 0..137 {
            timer.tick();
        }

        timer.toggle(); // pause
        let frozen = timer.remaining_seconds();
        assert_eq!(frozen, 25 * 60 - 137);

        // Ticks while paused don't move the clock
        timer.tick();
        timer.tick();
        assert_eq!(timer.remaining_seconds(), frozen);

        timer.toggle(); // resume
        timer.tick();
        assert_eq!(timer.remaining_seconds(), frozen - 1);
    }

    #[test]
    fn test_focus_rolls_into_short_break_and_keeps_running() {
        let mut timer = PomodoroTimer::with_focus_minutes(1);
        timer.toggle();
        run_out_segment(&mut timer);

        assert_eq!(timer.phase(), Phase::Break { long: false });
        assert_eq!(timer.remaining_seconds(), SHORT_BREAK_MINUTES * 60);
        assert_eq!(timer.completed_pomodoros(), 1);
        assert!(timer.is_running());
    }

    #[test]
    fn test_break_rotation_every_fourth_is_long() {
        let mut timer = PomodoroTimer::with_focus_minutes(1);
        timer.toggle();

        let mut observed = Vec::new();
        for _ in 0..8 {
            run_out_segment(&mut timer); // focus
            let Phase::Break { long } = timer.phase() else {
                panic!("expected a break after focus");
            };
            observed.push(long);
            run_out_segment(&mut timer); // break
            assert_eq!(timer.phase(), Phase::Focus);
        }

        assert_eq!(
            observed,
            vec![false, false, false, true, false, false, false, true]
        );
        assert_eq!(timer.completed_pomodoros(), 8);
        assert_eq!(timer.completed_short_rests(), 6);
        assert_eq!(timer.completed_long_rests(), 2);
    }

    #[test]
    fn test_complete_segment_stops_the_clock() {
        let mut timer = PomodoroTimer::new();
        timer.toggle();
        timer.complete_segment();

        assert_eq!(timer.phase(), Phase::Break { long: false });
        assert_eq!(timer.completed_pomodoros(), 1);
        assert!(!timer.is_running());
        assert_eq!(timer.remaining_seconds(), SHORT_BREAK_MINUTES * 60);
    }

    #[test]
    fn test_long_break_uses_long_duration() {
        let mut timer = PomodoroTimer::new();
        for _ in 0..3 {
            timer.complete_segment(); // focus -> break
            timer.complete_segment(); // break -> focus
        }

        assert!(timer.next_break_is_long());
        timer.complete_segment();
        assert_eq!(timer.phase(), Phase::Break { long: true });
        assert_eq!(timer.remaining_seconds(), LONG_BREAK_MINUTES * 60);
    }

    #[test]
    fn test_reset_restores_current_segment() {
        let mut timer = PomodoroTimer::new();
        timer.toggle();
        for _ in 0..90 {
            timer.tick();
        }

        timer.reset();
        assert!(!timer.is_running());
        assert_eq!(timer.phase(), Phase::Focus);
        assert_eq!(timer.remaining_seconds(), 25 * 60);
        assert_eq!(timer.completed_pomodoros(), 0);
    }

    #[test]
    fn test_set_focus_minutes_reloads_focus() {
        let mut timer = PomodoroTimer::new();
        timer.complete_segment(); // now in a break

        timer.set_focus_minutes(50);
        assert_eq!(timer.phase(), Phase::Focus);
        assert_eq!(timer.remaining_seconds(), 50 * 60);
        assert!(!timer.is_running());

        // Completed counters survive the change
        assert_eq!(timer.completed_pomodoros(), 1);
    }

    #[test]
    fn test_zero_focus_minutes_bumped_to_one() {
        let timer = PomodoroTimer::with_focus_minutes(0);
        assert_eq!(timer.remaining_seconds(), 60);

        let mut timer = PomodoroTimer::new();
        timer.set_focus_minutes(0);
        assert_eq!(timer.remaining_seconds(), 60);
    }

    #[test]
    fn test_progress_bounds() {
        let mut timer = PomodoroTimer::with_focus_minutes(1);
        assert_eq!(timer.progress(), 0.0);

        timer.toggle();
        for _ in 0..30 {
            timer.tick();
        }
        assert!((timer.progress() - 0.5).abs() < 1e-9);
    }

    #[test]
    fn test_format_clock() {
        assert_eq!(format_clock(0), "00:00");
        assert_eq!(format_clock(59), "00:59");
        assert_eq!(format_clock(60), "01:00");
        assert_eq!(format_clock(25 * 60), "25:00");
        assert_eq!(format_clock(3600), "60:00");
    }

    #[test]
    fn test_state_survives_serde_round_trip() {
        let mut timer = PomodoroTimer::new();
        timer.toggle();
        for _ in 0..10 {
            timer.tick();
        }

        let json = serde_json::to_string(&timer).unwrap();
        let restored: PomodoroTimer = serde_json::from_str(&json).unwrap();
        assert_eq!(restored.remaining_seconds(), timer.remaining_seconds());
        assert_eq!(restored.phase(), timer.phase());
        assert_eq!(restored.is_running(), timer.is_running());
    }
}
