use application::{Clock, IdGenerator};
use chrono::{DateTime, Utc};
use domain::DocumentId;
use uuid::Uuid;

/// Wall-clock time in UTC.
#[derive(Debug, Clone, Copy, Default)]
pub struct SystemClock;

impl Clock for SystemClock {
    fn now(&self) -> DateTime<Utc> {
        Utc::now()
    }
}

/// Random v4 UUIDs in hyphenated form.
#[derive(Debug, Clone, Copy, Default)]
pub struct UuidGenerator;

impl IdGenerator for UuidGenerator {
    fn generate(&self) -> DocumentId {
        DocumentId::new(Uuid::new_v4().to_string())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashSet;

    #[test]
    fn uuid_ids_are_unique_and_parseable() {
        let generator = UuidGenerator;
        let ids: HashSet<String> = (0..1_000)
            .map(|_| generator.generate().into())
            .collect();
        assert_eq!(ids.len(), 1_000);
        for id in &ids {
            assert!(Uuid::parse_str(id).is_ok());
        }
    }

    #[test]
    fn system_clock_moves_forward() {
        let before = Utc::now();
        let now = SystemClock.now();
        assert!(now >= before);
        assert!(Utc::now() >= now);
    }
}
