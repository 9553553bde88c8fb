use std::ops::Add;
use std::time::Duration;

/// Monotonic point in time, measured from the owning clock's origin.
///
/// Resolution is whatever the host provides; hosts driven by animation-frame
/// callbacks usually report whole or fractional milliseconds.
#[derive(Debug, Copy, Clone, Default, Eq, PartialEq, Ord, PartialOrd, Hash)]
pub struct Timestamp(Duration);

impl Timestamp {
    pub const ZERO: Self = Self(Duration::ZERO);

    pub const fn from_duration(since_origin: Duration) -> Self {
        Self(since_origin)
    }

    pub const fn from_millis(ms: u64) -> Self {
        Self(Duration::from_millis(ms))
    }

    /// Fractional milliseconds, as reported by browser-style frame clocks.
    ///
    /// Negative and non-finite inputs collapse to `ZERO`; values beyond
    /// `Duration::MAX` saturate.
    pub fn from_millis_f64(ms: f64) -> Self {
        if !ms.is_finite() || ms <= 0.0 {
            return Self::ZERO;
        }
        Self(Duration::try_from_secs_f64(ms / 1000.0).unwrap_or(Duration::MAX))
    }

    pub const fn since_origin(self) -> Duration {
        self.0
    }

    pub fn as_millis_f64(self) -> f64 {
        self.0.as_secs_f64() * 1000.0
    }

    /// Elapsed time from `earlier` to `self`, or zero if `earlier` is later.
    pub fn saturating_since(self, earlier: Timestamp) -> Duration {
        self.0.saturating_sub(earlier.0)
    }
}

impl Add<Duration> for Timestamp {
    type Output = Timestamp;

    fn add(self, rhs: Duration) -> Timestamp {
        Timestamp(self.0 + rhs)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn saturating_since_forward() {
        let a = Timestamp::from_millis(16);
        let b = Timestamp::from_millis(600);
        assert_eq!(b.saturating_since(a), Duration::from_millis(584));
    }

    #[test]
    fn saturating_since_backwards_is_zero() {
        let a = Timestamp::from_millis(20);
        let b = Timestamp::from_millis(5);
        assert_eq!(b.saturating_since(a), Duration::ZERO);
    }

    #[test]
    fn from_millis_f64_rejects_negative_and_nan() {
        assert_eq!(Timestamp::from_millis_f64(-3.0), Timestamp::ZERO);
        assert_eq!(Timestamp::from_millis_f64(f64::NAN), Timestamp::ZERO);
        assert_eq!(Timestamp::from_millis_f64(250.0), Timestamp::from_millis(250));
    }

    #[test]
    fn from_millis_f64_saturates_huge_values() {
        assert_eq!(
            Timestamp::from_millis_f64(1e300).since_origin(),
            Duration::MAX
        );
    }
}
