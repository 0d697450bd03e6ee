//! Signed monetary events owned by an account.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::cadence::Cadence;

/// A single movement: one-off, or the anchor of a recurring series.
///
/// Positive amounts are inflows, negative amounts outflows. Only the anchor
/// occurrence is stored; later occurrences are computed on demand.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Movement {
    pub id: Uuid,
    pub amount: f64,
    #[serde(default)]
    pub cadence: Cadence,
    pub occurs_at: DateTime<Utc>,
}

impl Movement {
    pub fn new(amount: f64, cadence: Cadence, occurs_at: DateTime<Utc>) -> Self {
        Self {
            id: Uuid::new_v4(),
            amount,
            cadence,
            occurs_at,
        }
    }

    /// True for every cadence other than `none`, unrecognized ones included.
    pub fn is_recurring(&self) -> bool {
        !self.cadence.is_one_off()
    }
}
