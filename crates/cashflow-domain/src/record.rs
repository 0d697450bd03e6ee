//! Raw rows handed over by the data store and their normalization into the
//! typed domain model.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use tracing::warn;
use uuid::Uuid;

use crate::{
    account::{Account, AccountKind},
    cadence::Cadence,
    movement::Movement,
};

/// Numeric column as delivered by the store: a JSON number or a decimal string.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum RawAmount {
    Number(f64),
    Text(String),
}

impl RawAmount {
    /// Blank text counts as zero; anything else that is not a finite number
    /// yields `None`.
    pub fn to_amount(&self) -> Option<f64> {
        match self {
            RawAmount::Number(value) => value.is_finite().then_some(*value),
            RawAmount::Text(text) => {
                let trimmed = text.trim();
                if trimmed.is_empty() {
                    return Some(0.0);
                }
                trimmed.parse::<f64>().ok().filter(|value| value.is_finite())
            }
        }
    }
}

impl From<f64> for RawAmount {
    fn from(value: f64) -> Self {
        RawAmount::Number(value)
    }
}

/// Movement row nested under its account.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MovementRecord {
    pub id: Uuid,
    #[serde(default)]
    pub amount: Option<RawAmount>,
    #[serde(rename = "repeats_every", alias = "cadence", default)]
    pub cadence: Cadence,
    #[serde(alias = "occurs_at")]
    pub created_at: DateTime<Utc>,
}

/// Account row with its movements, ordered by creation time.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AccountRecord {
    pub id: Uuid,
    #[serde(default)]
    pub name: String,
    #[serde(rename = "type", alias = "kind")]
    pub kind: AccountKind,
    #[serde(default)]
    pub starting_balance: Option<RawAmount>,
    pub created_at: DateTime<Utc>,
    #[serde(default)]
    pub movements: Vec<MovementRecord>,
}

impl Movement {
    /// Normalizes a stored row. Missing amounts become zero and unparsable
    /// amounts are logged and treated as zero, so loading never fails.
    pub fn from_record(record: &MovementRecord) -> Movement {
        Movement {
            id: record.id,
            amount: normalize_amount(record.amount.as_ref(), record.id),
            cadence: record.cadence.clone(),
            occurs_at: record.created_at,
        }
    }
}

impl Account {
    pub fn from_record(record: AccountRecord) -> Account {
        let movements: Vec<Movement> = record.movements.iter().map(Movement::from_record).collect();
        Account {
            id: record.id,
            name: record.name,
            kind: record.kind,
            starting_balance: normalize_amount(record.starting_balance.as_ref(), record.id),
            created_at: record.created_at,
            movements: Vec::new(),
        }
        .with_movements(movements)
    }
}

/// Converts a full load result, keeping the store's account order.
pub fn normalize_accounts(records: Vec<AccountRecord>) -> Vec<Account> {
    records.into_iter().map(Account::from_record).collect()
}

fn normalize_amount(raw: Option<&RawAmount>, owner: Uuid) -> f64 {
    match raw {
        None => 0.0,
        Some(value) => value.to_amount().unwrap_or_else(|| {
            warn!(record = %owner, ?value, "non-numeric amount treated as zero");
            0.0
        }),
    }
}
