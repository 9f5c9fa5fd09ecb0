use std::cell::Cell;

use chrono::{DateTime, Utc};

/// Issues integer ids from wall-clock milliseconds, bumped past every id
/// already issued or observed so two creations in the same millisecond
/// still get distinct ids.
#[derive(Debug, Default)]
pub struct IdGenerator {
    last: Cell<u64>,
}

impl IdGenerator {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn observe<I>(&self, ids: I)
    where
        I: IntoIterator<Item = u64>,
    {
        if let Some(max) = ids.into_iter().max() {
            self.last.set(self.last.get().max(max));
        }
    }

    pub fn next(&self, now: DateTime<Utc>) -> u64 {
        let millis = u64::try_from(now.timestamp_millis()).unwrap_or(0);
        let id = millis.max(self.last.get().saturating_add(1));
        self.last.set(id);
        id
    }
}

#[cfg(test)]
mod tests {
    use chrono::TimeZone;

    use super::*;

    #[test]
    fn same_millisecond_ids_do_not_collide() {
        let now = Utc
            .with_ymd_and_hms(2026, 2, 17, 12, 0, 0)
            .single()
            .expect("valid now");
        let ids = IdGenerator::new();

        let first = ids.next(now);
        let second = ids.next(now);
        assert_eq!(first, now.timestamp_millis() as u64);
        assert_eq!(second, first + 1);
    }

    #[test]
    fn stays_ahead_of_observed_ids() {
        let now = Utc
            .with_ymd_and_hms(2026, 2, 17, 12, 0, 0)
            .single()
            .expect("valid now");
        let ids = IdGenerator::new();
        let future = now.timestamp_millis() as u64 + 5_000;
        ids.observe([3, future, 12]);

        assert_eq!(ids.next(now), future + 1);
    }
}
