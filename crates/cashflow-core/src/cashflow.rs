//! Per-account cashflow views: history, next occurrences, and the running
//! balance projection used to draw the trend chart.

use cashflow_domain::{Account, Cadence};
use chrono::{DateTime, Utc};
use serde::Serialize;
use tracing::debug;
use uuid::Uuid;

use crate::recurrence::{next_upcoming, DEFAULT_MAX_RECURRENCE_STEPS};

/// Limits applied while summarizing an account.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ProjectionSettings {
    pub max_recurrence_steps: usize,
    /// Nearest upcoming occurrences appended to the projection.
    pub projected_occurrences: usize,
}

impl Default for ProjectionSettings {
    fn default() -> Self {
        Self {
            max_recurrence_steps: DEFAULT_MAX_RECURRENCE_STEPS,
            projected_occurrences: 6,
        }
    }
}

/// A movement whose anchor date is at or before the reference instant.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct PastEntry {
    pub movement_id: Uuid,
    pub occurred_at: DateTime<Utc>,
    pub amount: f64,
    pub cadence: Cadence,
}

/// The nearest future occurrence of a movement.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct UpcomingEntry {
    pub movement_id: Uuid,
    pub next_at: DateTime<Utc>,
    pub amount: f64,
    pub cadence: Cadence,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum PointKind {
    Historical,
    Projected,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ProjectionPoint {
    pub at: DateTime<Utc>,
    pub value: f64,
    pub kind: PointKind,
}

impl ProjectionPoint {
    pub fn is_projected(&self) -> bool {
        self.kind == PointKind::Projected
    }
}

#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct CashflowSummary {
    /// Most recent first.
    pub past: Vec<PastEntry>,
    /// Soonest first, one entry per movement.
    pub upcoming: Vec<UpcomingEntry>,
    /// Ascending by date; never empty.
    pub projection: Vec<ProjectionPoint>,
}

/// Builds the past, upcoming, and projection views for one account.
///
/// Skipped occurrences of recurring movements are simulated only; history
/// holds the stored anchor rows. Every sort is stable, so equal timestamps
/// keep the account's load order.
pub fn summarize(
    account: &Account,
    now: DateTime<Utc>,
    settings: &ProjectionSettings,
) -> CashflowSummary {
    let mut movements: Vec<_> = account.movements.iter().collect();
    movements.sort_by_key(|movement| movement.occurs_at);

    let mut past: Vec<PastEntry> = movements
        .iter()
        .filter(|movement| movement.occurs_at <= now)
        .map(|movement| PastEntry {
            movement_id: movement.id,
            occurred_at: movement.occurs_at,
            amount: movement.amount,
            cadence: movement.cadence.clone(),
        })
        .collect();
    past.sort_by(|a, b| b.occurred_at.cmp(&a.occurred_at));

    let mut upcoming: Vec<UpcomingEntry> = movements
        .iter()
        .filter_map(|movement| {
            next_upcoming(movement, now, settings.max_recurrence_steps).map(|next_at| {
                UpcomingEntry {
                    movement_id: movement.id,
                    next_at,
                    amount: movement.amount,
                    cadence: movement.cadence.clone(),
                }
            })
        })
        .collect();
    upcoming.sort_by_key(|entry| entry.next_at);

    let mut running = 0.0;
    let mut projection = Vec::with_capacity(movements.len() + settings.projected_occurrences);
    for movement in &movements {
        running += movement.amount;
        projection.push(ProjectionPoint {
            at: movement.occurs_at,
            value: running,
            kind: PointKind::Historical,
        });
    }
    for entry in upcoming
        .iter()
        .filter(|entry| entry.next_at > now)
        .take(settings.projected_occurrences)
    {
        running += entry.amount;
        projection.push(ProjectionPoint {
            at: entry.next_at,
            value: running,
            kind: PointKind::Projected,
        });
    }
    if projection.is_empty() {
        projection.push(ProjectionPoint {
            at: now,
            value: 0.0,
            kind: PointKind::Historical,
        });
    }
    projection.sort_by_key(|point| point.at);

    debug!(
        account = %account.id,
        past = past.len(),
        upcoming = upcoming.len(),
        points = projection.len(),
        "cashflow summarized"
    );

    CashflowSummary {
        past,
        upcoming,
        projection,
    }
}
