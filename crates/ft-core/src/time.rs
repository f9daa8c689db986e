//! Simulation time model.
//!
//! # Design
//!
//! Time is a monotonically increasing `Tick` counter where one tick is one
//! simulated minute.  Day-phase quantities are derived arithmetically:
//!
//! ```text
//! minute_of_day = tick % 1440
//! hour_of_day   = minute_of_day / 60
//! day_index     = tick / 1440
//! ```
//!
//! `timeline_slot` is a separate key (`tick % 24`) used by the aggregate
//! episode timeline.  It is *not* an hour of day; both keys are kept so
//! callers pick the one they mean.

use std::fmt;

/// Minutes in one simulated day.
pub const MINUTES_PER_DAY: u64 = 1_440;

/// Number of slots in every 24-entry timeline.
pub const TIMELINE_SLOTS: usize = 24;

// ── Tick ─────────────────────────────────────────────────────────────────────

/// An absolute simulation tick counter (1 tick = 1 simulated minute).
#[derive(Copy, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Debug, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Tick(pub u64);

impl Tick {
    pub const ZERO: Tick = Tick(0);

    /// The following tick.
    #[inline]
    pub fn next(self) -> Tick {
        Tick(self.0 + 1)
    }

    /// Minute within the simulated day, `0..1440`.
    #[inline]
    pub fn minute_of_day(self) -> u32 {
        (self.0 % MINUTES_PER_DAY) as u32
    }

    /// Hour within the simulated day, `0..24`.
    #[inline]
    pub fn hour_of_day(self) -> u32 {
        self.minute_of_day() / 60
    }

    /// Zero-based simulated day number.
    #[inline]
    pub fn day_index(self) -> u64 {
        self.0 / MINUTES_PER_DAY
    }

    /// Fraction of the day elapsed, `[0, 1)`.
    #[inline]
    pub fn day_phase(self) -> f64 {
        self.minute_of_day() as f64 / MINUTES_PER_DAY as f64
    }

    /// `true` for day 5 and 6 of every simulated week.
    #[inline]
    pub fn is_weekend(self) -> bool {
        self.day_index() % 7 >= 5
    }

    /// Aggregate timeline key: the raw tick number modulo 24.
    #[inline]
    pub fn timeline_slot(self) -> usize {
        (self.0 % TIMELINE_SLOTS as u64) as usize
    }
}

impl fmt::Display for Tick {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let m = self.minute_of_day();
        write!(f, "T{} (day {} {:02}:{:02})", self.0, self.day_index(), m / 60, m % 60)
    }
}
