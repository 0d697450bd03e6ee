//! Expansion of a movement's cadence into concrete occurrence dates.

use cashflow_domain::{Cadence, Movement};
use chrono::{DateTime, Utc};
use tracing::debug;

/// Cadence steps attempted before a movement is considered to have no
/// computable next occurrence.
pub const DEFAULT_MAX_RECURRENCE_STEPS: usize = 60;

/// Occurrence dates of a movement: the anchor first, then one per cadence
/// step. One-off and unrecognized cadences yield only the anchor.
///
/// Recurring series are unbounded; callers cap them with `take`.
#[derive(Debug, Clone)]
pub struct Occurrences<'a> {
    cadence: &'a Cadence,
    next: Option<DateTime<Utc>>,
}

impl Iterator for Occurrences<'_> {
    type Item = DateTime<Utc>;

    fn next(&mut self) -> Option<Self::Item> {
        let current = self.next?;
        self.next = self.cadence.next_occurrence(current);
        Some(current)
    }
}

pub fn occurrences(movement: &Movement) -> Occurrences<'_> {
    Occurrences {
        cadence: &movement.cadence,
        next: Some(movement.occurs_at),
    }
}

/// Finds the first occurrence strictly after `now`, advancing from the anchor
/// at most `max_steps` times.
///
/// Returns `None` for a one-off movement already in the past and for any
/// series that does not pass `now` within the bound.
pub fn next_upcoming(
    movement: &Movement,
    now: DateTime<Utc>,
    max_steps: usize,
) -> Option<DateTime<Utc>> {
    let found = occurrences(movement)
        .take(max_steps.saturating_add(1))
        .find(|at| *at > now);
    if found.is_none() && movement.cadence.recurs() {
        debug!(
            movement = %movement.id,
            cadence = movement.cadence.key(),
            max_steps,
            "recurrence bound reached before reference date"
        );
    }
    found
}
