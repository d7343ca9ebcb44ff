//! Contact heat scoring.
//!
//! Pure computation over a contact's full activity history. No decay, no
//! cap: the score only ever grows as activities are logged, so it doubles
//! as a lifetime-engagement counter. Every mutation path calls [`rescore`]
//! before committing; nothing else writes `score`.

use serde::{Deserialize, Serialize};

use crate::types::{ActivityKind, Contact};

/// Score at or above which a contact is considered hot.
pub const HOT_THRESHOLD: u32 = 50;
/// Score at or above which a contact is considered warm.
pub const WARM_THRESHOLD: u32 = 20;

/// Qualitative engagement label derived from the score.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Temperature {
    Hot,
    Warm,
    Cold,
}

impl Temperature {
    pub fn as_str(&self) -> &'static str {
        match self {
            Temperature::Hot => "Hot",
            Temperature::Warm => "Warm",
            Temperature::Cold => "Cold",
        }
    }
}

/// Weight contributed by one logged activity.
pub fn activity_weight(kind: ActivityKind) -> u32 {
    match kind {
        ActivityKind::Proposal => 20,
        ActivityKind::Meeting => 15,
        ActivityKind::Call => 10,
        ActivityKind::Email => 5,
        ActivityKind::Note => 2,
        ActivityKind::Task => 0,
    }
}

/// Sum of weights over every activity ever logged.
pub fn score(contact: &Contact) -> u32 {
    contact
        .activities
        .iter()
        .map(|a| activity_weight(a.kind))
        .sum()
}

/// Map a score to its temperature band.
pub fn temperature(score: u32) -> Temperature {
    if score >= HOT_THRESHOLD {
        Temperature::Hot
    } else if score >= WARM_THRESHOLD {
        Temperature::Warm
    } else {
        Temperature::Cold
    }
}

/// Recompute and store the derived score on a contact snapshot.
pub fn rescore(contact: &mut Contact) {
    contact.score = score(contact);
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::contact::{append_activity, NewActivity};
    use crate::presets::test_contact;

    #[test]
    fn empty_history_is_cold_zero() {
        let c = test_contact("Empty", "History");
        assert_eq!(score(&c), 0);
        assert_eq!(temperature(0), Temperature::Cold);
    }

    #[test]
    fn weighted_example_crosses_warm_to_hot() {
        let mut c = test_contact("Jean", "Dupont");
        for kind in [
            ActivityKind::Proposal,
            ActivityKind::Meeting,
            ActivityKind::Call,
        ] {
            c = append_activity(&c, NewActivity::new(kind, "x"));
        }
        assert_eq!(score(&c), 45);
        assert_eq!(temperature(score(&c)), Temperature::Warm);

        c = append_activity(&c, NewActivity::new(ActivityKind::Call, "follow-up"));
        assert_eq!(score(&c), 55);
        assert_eq!(temperature(score(&c)), Temperature::Hot);
    }

    #[test]
    fn scoring_is_idempotent() {
        let mut c = test_contact("Marie", "Curie");
        c = append_activity(&c, NewActivity::new(ActivityKind::Email, "intro"));
        let first = score(&c);
        let second = score(&c);
        assert_eq!(first, second);
    }

    #[test]
    fn appending_never_decreases_score() {
        let mut c = test_contact("Pierre", "Martin");
        let mut previous = score(&c);
        for kind in [
            ActivityKind::Task,
            ActivityKind::Note,
            ActivityKind::Email,
            ActivityKind::Call,
            ActivityKind::Meeting,
            ActivityKind::Proposal,
        ] {
            c = append_activity(&c, NewActivity::new(kind, "x"));
            let current = score(&c);
            assert!(current >= previous, "{:?} decreased the score", kind);
            previous = current;
        }
    }

    #[test]
    fn band_edges() {
        assert_eq!(temperature(19), Temperature::Cold);
        assert_eq!(temperature(20), Temperature::Warm);
        assert_eq!(temperature(49), Temperature::Warm);
        assert_eq!(temperature(50), Temperature::Hot);
    }
}
