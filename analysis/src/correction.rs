//! Repairs for known defects in the round-end stream.
//!
//! A correction proposes a candidate set of records and validates it; the
//! first correction (in rank order) whose candidate validates replaces the
//! input. A correction that does not match leaves the records untouched.

use crate::events::RawRoundEvent;
use crate::Side;

pub trait Correction: Send + Sync + core::fmt::Debug {
    fn name(&self) -> &'static str;

    /// The records this correction would keep, or `None` if it does not
    /// apply to the input at all.
    fn candidate(&self, events: &[RawRoundEvent]) -> Option<Vec<RawRoundEvent>>;

    fn validate(&self, candidate: &[RawRoundEvent]) -> bool;
}

/// Ranked list of corrections.
#[derive(Debug)]
pub struct Corrections {
    ranked: Vec<Box<dyn Correction>>,
}

impl Default for Corrections {
    fn default() -> Self {
        Self::none().with(DuplicateRoundEnd::default())
    }
}

impl Corrections {
    pub fn none() -> Self {
        Self { ranked: Vec::new() }
    }

    pub fn with(mut self, correction: impl Correction + 'static) -> Self {
        self.ranked.push(Box::new(correction));
        self
    }

    pub fn is_empty(&self) -> bool {
        self.ranked.is_empty()
    }

    /// Applies the first matching correction. Returns its name alongside the
    /// corrected records, or `None` if nothing matched.
    pub fn apply(&self, events: &[RawRoundEvent]) -> Option<(&'static str, Vec<RawRoundEvent>)> {
        self.ranked.iter().find_map(|correction| {
            let candidate = correction.candidate(events)?;
            if !correction.validate(&candidate) {
                tracing::debug!(correction = correction.name(), "Candidate rejected");
                return None;
            }
            Some((correction.name(), candidate))
        })
    }
}

/// Some demos emit an extra round-end signal early in the match, which shows
/// up as one original round number too many. If dropping every record of
/// `suspect_round` turns an oversized stream into a complete first-to-13
/// scoreline, those records are discarded.
///
/// This only targets the one observed pattern (round 2 of a 13-9 game). It is
/// not a general deduplication and can misfire on other duplicate shapes.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DuplicateRoundEnd {
    pub suspect_round: u32,
    pub expected_rounds: usize,
    pub winning_score: usize,
}

impl Default for DuplicateRoundEnd {
    fn default() -> Self {
        Self {
            suspect_round: 2,
            expected_rounds: 22,
            winning_score: 13,
        }
    }
}

impl Correction for DuplicateRoundEnd {
    fn name(&self) -> &'static str {
        "duplicate-round-end"
    }

    fn candidate(&self, events: &[RawRoundEvent]) -> Option<Vec<RawRoundEvent>> {
        if events.len() <= self.expected_rounds {
            return None;
        }

        tracing::debug!(records = events.len(), "Checking for duplicate round-end records");

        Some(
            events
                .iter()
                .filter(|event| event.round != Some(self.suspect_round))
                .cloned()
                .collect(),
        )
    }

    fn validate(&self, candidate: &[RawRoundEvent]) -> bool {
        if candidate.len() != self.expected_rounds {
            return false;
        }

        let sides = candidate
            .iter()
            .filter_map(|event| event.winner.as_ref().and_then(Side::from_code));
        let (t_wins, ct_wins) = sides.fold((0, 0), |(t, ct), side| match side {
            Side::T => (t + 1, ct),
            Side::CT => (t, ct + 1),
        });

        (t_wins == self.winning_score || ct_wins == self.winning_score)
            && t_wins + ct_wins == self.expected_rounds
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn event(round: u32, winner: &str) -> RawRoundEvent {
        RawRoundEvent {
            round: Some(round),
            reason: None,
            winner: Some(winner.into()),
            tick: Some(round * 1000),
        }
    }

    #[test]
    fn small_streams_are_not_candidates() {
        let events: Vec<_> = (1..=22).map(|r| event(r, "T")).collect();
        assert_eq!(None, DuplicateRoundEnd::default().candidate(&events));
    }

    #[test]
    fn validates_thirteen_nine() {
        let correction = DuplicateRoundEnd::default();

        let mut events: Vec<_> = (1..=13).map(|r| event(r, "T")).collect();
        events.extend((14..=22).map(|r| event(r, "CT")));
        assert!(correction.validate(&events));

        events[0].winner = Some("CT".into());
        assert!(!correction.validate(&events));
    }

    #[test]
    fn empty_list_applies_nothing() {
        let events: Vec<_> = (1..=30).map(|r| event(r, "T")).collect();
        assert!(Corrections::none().apply(&events).is_none());
    }
}
