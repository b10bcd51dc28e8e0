//! Simulation time model.
//!
//! # Design
//!
//! The discrete-event clock is an integer count of nanoseconds held in
//! `SimTime`.  Integer time keeps event ordering exact: two sources scheduled
//! for the same instant compare equal, which the traffic manager relies on to
//! drain every due source within one tick.
//!
//! Mobility works in `f64` seconds; [`SimTime::as_secs_f64`] bridges the two.
//!
//! `SimTime::NEVER` (`u64::MAX`) stands for "+∞": nothing pending.

use std::fmt;

use crate::{WnError, WnResult};

const NANOS_PER_MICRO: u64 = 1_000;
const NANOS_PER_MILLI: u64 = 1_000_000;
const NANOS_PER_SEC:   u64 = 1_000_000_000;

/// An absolute simulation time in nanoseconds.
#[derive(Copy, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Debug, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct SimTime(pub u64);

impl SimTime {
    pub const ZERO: SimTime = SimTime(0);

    /// Sentinel for "no pending event".
    pub const NEVER: SimTime = SimTime(u64::MAX);

    #[inline]
    pub fn from_nanos(ns: u64) -> SimTime {
        SimTime(ns)
    }

    #[inline]
    pub fn from_micros(us: u64) -> SimTime {
        SimTime(us.saturating_mul(NANOS_PER_MICRO))
    }

    #[inline]
    pub fn from_millis(ms: u64) -> SimTime {
        SimTime(ms.saturating_mul(NANOS_PER_MILLI))
    }

    #[inline]
    pub fn from_secs(s: u64) -> SimTime {
        SimTime(s.saturating_mul(NANOS_PER_SEC))
    }

    /// Convert fractional seconds, rounding up to the next whole nanosecond.
    pub fn try_from_secs_f64(secs: f64) -> WnResult<SimTime> {
        if !secs.is_finite() || secs < 0.0 {
            return Err(WnError::Config(format!("invalid time {secs} s")));
        }
        let ns = (secs * NANOS_PER_SEC as f64).ceil();
        if ns >= u64::MAX as f64 {
            return Err(WnError::TimeOverflow(ns as u128));
        }
        Ok(SimTime(ns as u64))
    }

    #[inline]
    pub fn as_nanos(self) -> u64 {
        self.0
    }

    /// Seconds as `f64` (the unit packet generation times are stamped in).
    #[inline]
    pub fn as_secs_f64(self) -> f64 {
        self.0 as f64 / NANOS_PER_SEC as f64
    }

    #[inline]
    pub fn is_never(self) -> bool {
        self == SimTime::NEVER
    }

    /// `self + ns`, saturating at [`SimTime::NEVER`].
    #[inline]
    pub fn offset(self, ns: u64) -> SimTime {
        SimTime(self.0.saturating_add(ns))
    }

    /// Nanoseconds elapsed from `earlier` to `self`.
    ///
    /// # Panics
    /// Panics in debug mode if `earlier > self`.
    #[inline]
    pub fn since(self, earlier: SimTime) -> u64 {
        self.0 - earlier.0
    }
}

/// Convert an inter-packet gap given in (fractional) microseconds to whole
/// nanoseconds, always rounding **up**.
///
/// The upward rounding guarantees the next packet is never scheduled earlier
/// than the generator asked for.
pub fn gap_nanos_from_micros(gap_us: f64) -> WnResult<u64> {
    if !gap_us.is_finite() || gap_us < 0.0 {
        return Err(WnError::Config(format!("invalid inter-packet gap {gap_us} us")));
    }
    let ns = (gap_us * NANOS_PER_MICRO as f64).ceil();
    if ns >= u64::MAX as f64 {
        return Err(WnError::TimeOverflow(ns as u128));
    }
    Ok(ns as u64)
}

impl std::ops::Sub for SimTime {
    type Output = u64;
    #[inline]
    fn sub(self, rhs: SimTime) -> u64 {
        self.0 - rhs.0
    }
}

impl fmt::Display for SimTime {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.is_never() {
            write!(f, "never")
        } else {
            write!(f, "{:.9}s", self.as_secs_f64())
        }
    }
}
