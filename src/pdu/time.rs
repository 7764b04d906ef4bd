//! DIS timestamps: the `timestamp` field of [`PduHeader`](super::PduHeader).
//!
//! The upper 31 bits count time past the top of the hour in units of one hour divided by
//! 2^31 - 1. The low bit is set for absolute time (simulation clocks synchronised to a
//! shared reference) and clear for relative time.

use std::time::{Duration, SystemTime, UNIX_EPOCH};

/// Timestamp units in one hour.
pub const UNITS_PER_HOUR: u32 = i32::MAX as u32;

const NANOS_PER_HOUR: u128 = 3_600 * 1_000_000_000;
const ABSOLUTE_BIT: u32 = 0x0000_0001;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum TimeReference {
    Absolute,
    Relative,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct DisTimestamp {
    /// Units past the top of the hour, at most [`UNITS_PER_HOUR`].
    pub units: u32,
    pub reference: TimeReference,
}

impl DisTimestamp {
    /// Absolute timestamp for `time_past_hour`. Whole hours are dropped.
    pub fn absolute(time_past_hour: Duration) -> Self {
        DisTimestamp {
            units: units_past_hour(time_past_hour),
            reference: TimeReference::Absolute,
        }
    }

    /// Relative timestamp for `time_past_hour`. Whole hours are dropped.
    pub fn relative(time_past_hour: Duration) -> Self {
        DisTimestamp {
            units: units_past_hour(time_past_hour),
            reference: TimeReference::Relative,
        }
    }

    /// Absolute timestamp for the current UTC wall clock.
    pub fn now_absolute() -> Self {
        Self::absolute(since_epoch(SystemTime::now()))
    }

    /// Relative timestamp for the current UTC wall clock.
    pub fn now_relative() -> Self {
        Self::relative(since_epoch(SystemTime::now()))
    }

    /// Split a raw header timestamp into units and reference.
    pub fn from_raw(raw: u32) -> Self {
        DisTimestamp {
            units: raw >> 1,
            reference: if raw & ABSOLUTE_BIT != 0 {
                TimeReference::Absolute
            } else {
                TimeReference::Relative
            },
        }
    }

    /// Value for the header `timestamp` field.
    pub fn to_raw(self) -> u32 {
        let bit = match self.reference {
            TimeReference::Absolute => ABSOLUTE_BIT,
            TimeReference::Relative => 0,
        };
        (self.units << 1) | bit
    }

    pub fn is_absolute(self) -> bool {
        self.reference == TimeReference::Absolute
    }

    /// Time past the top of the hour, to the nearest nanosecond.
    pub fn time_past_hour(self) -> Duration {
        let units = self.units.min(UNITS_PER_HOUR) as u128;
        let nanos = (units * NANOS_PER_HOUR + UNITS_PER_HOUR as u128 / 2) / UNITS_PER_HOUR as u128;
        Duration::from_nanos(nanos as u64)
    }
}

impl From<u32> for DisTimestamp {
    fn from(raw: u32) -> Self {
        DisTimestamp::from_raw(raw)
    }
}

impl From<DisTimestamp> for u32 {
    fn from(t: DisTimestamp) -> Self {
        t.to_raw()
    }
}

fn units_past_hour(time: Duration) -> u32 {
    let nanos = time.as_nanos() % NANOS_PER_HOUR;
    let units = (nanos * UNITS_PER_HOUR as u128 + NANOS_PER_HOUR / 2) / NANOS_PER_HOUR;
    units.min(UNITS_PER_HOUR as u128) as u32
}

fn since_epoch(now: SystemTime) -> Duration {
    now.duration_since(UNIX_EPOCH).unwrap_or_default()
}

/// Seconds since the Unix epoch, truncated to 32 bits.
pub fn unix_timestamp(now: SystemTime) -> u32 {
    since_epoch(now).as_secs() as u32
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn low_bit_marks_reference() {
        let quarter = Duration::from_secs(15 * 60);
        let abs = DisTimestamp::absolute(quarter).to_raw();
        let rel = DisTimestamp::relative(quarter).to_raw();
        assert_eq!(abs & 1, 1);
        assert_eq!(rel & 1, 0);
        assert_eq!(abs >> 1, rel >> 1);
        assert_eq!(abs >> 1, 536_870_912);
    }

    #[test]
    fn raw_round_trip() {
        let t = DisTimestamp::absolute(Duration::from_millis(1_234_567));
        let back = DisTimestamp::from_raw(t.to_raw());
        assert_eq!(back, t);
        assert!(back.is_absolute());
        assert!(!DisTimestamp::from(0x8000_0000u32).is_absolute());
        assert_eq!(u32::from(back), t.to_raw());
    }

    #[test]
    fn hour_rolls_over() {
        let quarter = Duration::from_secs(15 * 60);
        let later = Duration::from_secs(5 * 3_600 + 15 * 60);
        assert_eq!(DisTimestamp::relative(later), DisTimestamp::relative(quarter));
        assert_eq!(DisTimestamp::absolute(Duration::from_secs(3_600)).units, 0);
        assert_eq!(DisTimestamp::absolute(Duration::ZERO).to_raw(), 1);
    }

    #[test]
    fn end_of_hour_fits_field() {
        let t = DisTimestamp::absolute(Duration::from_nanos(3_600 * 1_000_000_000 - 1));
        assert_eq!(t.units, UNITS_PER_HOUR);
        assert_eq!(t.to_raw(), u32::MAX);
    }

    #[test]
    fn units_back_to_duration() {
        let half = DisTimestamp::relative(Duration::from_secs(30 * 60));
        let back = half.time_past_hour();
        let expected = Duration::from_secs(30 * 60);
        let diff = if back > expected { back - expected } else { expected - back };
        assert!(diff < Duration::from_micros(2), "{diff:?}");
    }

    #[test]
    fn unix_seconds() {
        let t = UNIX_EPOCH + Duration::from_secs(1_700_000_000);
        assert_eq!(unix_timestamp(t), 1_700_000_000);
    }
}
