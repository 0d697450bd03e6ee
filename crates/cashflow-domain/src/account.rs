//! Accounts and their classification.

use std::fmt;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::{common::Displayable, movement::Movement};

/// A user-owned account together with the movements loaded for it.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Account {
    pub id: Uuid,
    pub name: String,
    pub kind: AccountKind,
    /// Informational only; the real balance is derived from `movements`.
    pub starting_balance: f64,
    pub created_at: DateTime<Utc>,
    /// Sorted ascending by `occurs_at`, ties in load order.
    pub movements: Vec<Movement>,
}

impl Account {
    /// Creates an account without movements.
    pub fn new(name: impl Into<String>, kind: AccountKind, created_at: DateTime<Utc>) -> Self {
        Self {
            id: Uuid::new_v4(),
            name: name.into(),
            kind,
            starting_balance: 0.0,
            created_at,
            movements: Vec::new(),
        }
    }

    /// Appends movements and restores chronological order. The sort is stable,
    /// so movements sharing a timestamp keep their insertion order.
    pub fn with_movements(mut self, movements: impl IntoIterator<Item = Movement>) -> Self {
        self.movements.extend(movements);
        self.sort_movements();
        self
    }

    pub fn sort_movements(&mut self) {
        self.movements.sort_by_key(|movement| movement.occurs_at);
    }

    /// Sum of every movement amount.
    pub fn balance(&self) -> f64 {
        self.movements.iter().map(|movement| movement.amount).sum()
    }

    pub fn recurring_movements(&self) -> usize {
        self.movements
            .iter()
            .filter(|movement| movement.is_recurring())
            .count()
    }
}

impl Displayable for Account {
    fn display_label(&self) -> String {
        format!("{} ({})", self.name, self.kind)
    }
}

/// Enumerates the supported account classifications.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum AccountKind {
    Cash,
    Bank,
    Savings,
    Assets,
}

impl AccountKind {
    pub fn all() -> [AccountKind; 4] {
        [
            AccountKind::Cash,
            AccountKind::Bank,
            AccountKind::Savings,
            AccountKind::Assets,
        ]
    }

    /// Storage key, also used as the deterministic tie-break when ordering.
    pub fn key(self) -> &'static str {
        match self {
            AccountKind::Cash => "cash",
            AccountKind::Bank => "bank",
            AccountKind::Savings => "savings",
            AccountKind::Assets => "assets",
        }
    }

    pub fn parse(raw: &str) -> Option<AccountKind> {
        let normalized = raw.trim().to_ascii_lowercase();
        Self::all()
            .into_iter()
            .find(|kind| kind.key() == normalized)
    }
}

impl fmt::Display for AccountKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let label = match self {
            AccountKind::Cash => "Cash",
            AccountKind::Bank => "Bank",
            AccountKind::Savings => "Savings",
            AccountKind::Assets => "Assets",
        };
        f.write_str(label)
    }
}
