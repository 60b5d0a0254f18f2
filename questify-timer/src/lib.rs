//! # Questify Timer
//!
//! Pomodoro countdown and session notes: a pure state-machine library with
//! no I/O and no clock of its own. The embedding application drives
//! [`PomodoroTimer`] with a 1 Hz `tick()` and renders the state however it
//! likes; [`NoteBoard`] holds per-session notes in memory.
//!
//! ## Example
//!
//! ```
//! use questify_timer::{PomodoroTimer, Phase};
//!
//! let mut timer = PomodoroTimer::new();
//! timer.toggle(); // start
//! timer.tick();
//! assert_eq!(timer.phase(), Phase::Focus);
//! assert_eq!(timer.remaining_seconds(), 25 * 60 - 1);
//! ```

pub mod notes;
pub mod timer;

pub use notes::{Note, NoteBoard};
pub use timer::{
    format_clock, Phase, PomodoroTimer, DEFAULT_FOCUS_MINUTES, LONG_BREAK_MINUTES,
    SHORT_BREAK_MINUTES,
};
