use time::{OffsetDateTime, UtcOffset};

use crate::domain::ports::Clock;

/// Wall clock in a configured offset, or the host's local offset.
#[derive(Debug, Clone, Copy, Default)]
pub struct SystemClock {
    offset: Option<UtcOffset>,
}

impl SystemClock {
    #[must_use]
    pub fn new(offset: Option<UtcOffset>) -> Self {
        Self { offset }
    }
}

impl Clock for SystemClock {
    fn now(&self) -> OffsetDateTime {
        match self.offset {
            Some(offset) => OffsetDateTime::now_utc().to_offset(offset),
            None => OffsetDateTime::now_local().unwrap_or_else(|_| OffsetDateTime::now_utc()),
        }
    }
}

/// Always returns the same instant.
#[derive(Debug, Clone, Copy)]
pub struct FixedClock(pub OffsetDateTime);

impl Clock for FixedClock {
    fn now(&self) -> OffsetDateTime {
        self.0
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use time::macros::{datetime, offset};

    #[test]
    fn configured_offset_is_applied() {
        let clock = SystemClock::new(Some(offset!(+5:30)));
        assert_eq!(clock.now().offset(), offset!(+5:30));
    }

    #[test]
    fn fixed_clock_is_fixed() {
        let at = datetime!(2025-06-01 08:15 UTC);
        assert_eq!(FixedClock(at).now(), at);
    }
}
