use chrono::{DateTime, Duration, Utc};

/// Source of "now" for the practice runner; fixed in tests.
#[derive(Debug, Clone, Copy, Default)]
pub enum Clock {
    #[default]
    System,
    Fixed(DateTime<Utc>),
}

impl Clock {
    #[must_use]
    pub fn fixed(at: DateTime<Utc>) -> Self {
        Self::Fixed(at)
    }

    #[must_use]
    pub fn now(&self) -> DateTime<Utc> {
        match self {
            Clock::System => Utc::now(),
            Clock::Fixed(t) => *t,
        }
    }

    /// Move a fixed clock forward. No effect on the system clock.
    pub fn advance(&mut self, delta: Duration) {
        if let Clock::Fixed(t) = self {
            *t += delta;
        }
    }

    /// Milliseconds since `shown_at`, never negative.
    #[must_use]
    pub fn elapsed_ms(&self, shown_at: DateTime<Utc>) -> i64 {
        (self.now() - shown_at).num_milliseconds().max(0)
    }
}

/// 2023-11-14T22:13:20Z, for deterministic tests.
pub const FIXED_TEST_TIMESTAMP: i64 = 1_700_000_000;

/// # Panics
///
/// Panics if the fixed timestamp cannot be represented.
#[must_use]
pub fn fixed_now() -> DateTime<Utc> {
    DateTime::<Utc>::from_timestamp(FIXED_TEST_TIMESTAMP, 0)
        .expect("fixed timestamp should be valid")
}

#[must_use]
pub fn fixed_clock() -> Clock {
    Clock::fixed(fixed_now())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn elapsed_is_clamped_at_zero() {
        let mut clock = fixed_clock();
        let shown = clock.now();
        clock.advance(Duration::milliseconds(1_250));
        assert_eq!(clock.elapsed_ms(shown), 1_250);
        assert_eq!(clock.elapsed_ms(shown + Duration::seconds(5)), 0);
    }
}
