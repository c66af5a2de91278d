//! Time source and once-per-second redraw scheduling.
//!
//! The scheduler never sleeps or spawns anything itself. The host loop asks it
//! for the next deadline, waits until then, and calls [`RedrawScheduler::poll`].

use std::cell::Cell;
use std::time::{Duration, Instant};

use chrono::NaiveTime;

use crate::geometry::TimeReading;

pub const DEFAULT_TICK_INTERVAL: Duration = Duration::from_millis(1000);

/// Where the clock gets its notion of "now".
pub trait TimeSource {
    /// Monotonic instant used for scheduling.
    fn now(&self) -> Instant;

    /// Current wall-clock reading shown by the hands.
    fn reading(&self) -> TimeReading;
}

/// Local wall-clock time.
#[derive(Debug, Clone, Copy, Default)]
pub struct SystemTimeSource;

impl SystemTimeSource {
    pub fn new() -> Self {
        Self
    }
}

impl TimeSource for SystemTimeSource {
    fn now(&self) -> Instant {
        Instant::now()
    }

    fn reading(&self) -> TimeReading {
        TimeReading::from(chrono::Local::now().time())
    }
}

/// Virtual clock that only moves when told to.
#[derive(Debug)]
pub struct ManualTimeSource {
    origin: Instant,
    start: NaiveTime,
    elapsed: Cell<Duration>,
}

impl ManualTimeSource {
    pub fn new(start: NaiveTime) -> Self {
        Self {
            origin: Instant::now(),
            start,
            elapsed: Cell::new(Duration::ZERO),
        }
    }

    /// Starts at `hour:minute:second`; out-of-range values start at midnight.
    pub fn at(hour: u32, minute: u32, second: u32) -> Self {
        Self::new(NaiveTime::from_hms_opt(hour, minute, second).unwrap_or(NaiveTime::MIN))
    }

    pub fn advance(&self, by: Duration) {
        self.elapsed.set(self.elapsed.get() + by);
    }
}

impl TimeSource for ManualTimeSource {
    fn now(&self) -> Instant {
        self.origin + self.elapsed.get()
    }

    fn reading(&self) -> TimeReading {
        let millis = i64::try_from(self.elapsed.get().as_millis()).unwrap_or(i64::MAX);
        // Wrap to one day before converting so the signed duration cannot overflow.
        let millis = millis % (24 * 60 * 60 * 1000);
        let (time, _) = self
            .start
            .overflowing_add_signed(chrono::Duration::milliseconds(millis));
        TimeReading::from(time)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SchedulerState {
    /// Never activated.
    Idle,
    /// A tick is due at `next_tick`.
    Scheduled { next_tick: Instant },
    /// Cancelled; this scheduler will not fire again.
    Stopped,
}

/// Fires a tick every `interval` between [`activate`](Self::activate) and
/// [`cancel`](Self::cancel).
///
/// Ticks are not drift-corrected: each one schedules the next at
/// `poll instant + interval`, so a late poll pushes every later tick back and
/// several missed intervals collapse into one tick.
#[derive(Debug, Clone)]
pub struct RedrawScheduler {
    interval: Duration,
    state: SchedulerState,
}

impl RedrawScheduler {
    pub fn new(interval: Duration) -> Self {
        Self {
            interval,
            state: SchedulerState::Idle,
        }
    }

    pub fn interval(&self) -> Duration {
        self.interval
    }

    pub fn state(&self) -> SchedulerState {
        self.state
    }

    pub fn is_scheduled(&self) -> bool {
        matches!(self.state, SchedulerState::Scheduled { .. })
    }

    /// Moves Idle → Scheduled with the first tick one interval after `now`.
    /// Returns false (and changes nothing) in any other state.
    pub fn activate(&mut self, now: Instant) -> bool {
        match self.state {
            SchedulerState::Idle => {
                self.state = SchedulerState::Scheduled {
                    next_tick: now + self.interval,
                };
                true
            }
            SchedulerState::Scheduled { .. } | SchedulerState::Stopped => false,
        }
    }

    /// Returns true when a tick is due at `now`, rescheduling the next one.
    pub fn poll(&mut self, now: Instant) -> bool {
        match self.state {
            SchedulerState::Scheduled { next_tick } if now >= next_tick => {
                self.state = SchedulerState::Scheduled {
                    next_tick: now + self.interval,
                };
                true
            }
            _ => false,
        }
    }

    pub fn next_deadline(&self) -> Option<Instant> {
        match self.state {
            SchedulerState::Scheduled { next_tick } => Some(next_tick),
            SchedulerState::Idle | SchedulerState::Stopped => None,
        }
    }

    /// Drops any pending tick. Idempotent; a scheduler that never started
    /// stays idle.
    pub fn cancel(&mut self) {
        if let SchedulerState::Scheduled { .. } = self.state {
            self.state = SchedulerState::Stopped;
        }
    }
}

impl Default for RedrawScheduler {
    fn default() -> Self {
        Self::new(DEFAULT_TICK_INTERVAL)
    }
}
