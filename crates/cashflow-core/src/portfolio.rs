//! Portfolio roll-up across every account a user owns.

use cashflow_domain::{Account, AccountKind};
use serde::Serialize;

/// Balance and activity of all accounts sharing one kind.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct KindTotals {
    pub kind: AccountKind,
    pub balance: f64,
    pub movements: usize,
    /// Percentage of the portfolio total; zero when the total is zero.
    pub share: f64,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct PortfolioSummary {
    pub total_balance: f64,
    /// Largest balance first, ties ordered by kind key.
    pub by_kind: Vec<KindTotals>,
    pub recurring_count: usize,
    pub non_recurring_count: usize,
}

/// Groups accounts by kind and derives balances, movement counts, and shares.
///
/// Sums run in account load order, so repeated calls on the same accounts
/// produce bit-identical totals.
pub fn aggregate(accounts: &[Account]) -> PortfolioSummary {
    let mut totals: Vec<(AccountKind, f64, usize)> = Vec::new();
    let mut total_balance = 0.0;
    let mut recurring_count = 0usize;
    let mut non_recurring_count = 0usize;

    for account in accounts {
        let balance = account.balance();
        total_balance += balance;
        match totals.iter_mut().find(|(kind, _, _)| *kind == account.kind) {
            Some((_, group_balance, movements)) => {
                *group_balance += balance;
                *movements += account.movements.len();
            }
            None => totals.push((account.kind, balance, account.movements.len())),
        }

        let recurring = account.recurring_movements();
        recurring_count += recurring;
        non_recurring_count += account.movements.len() - recurring;
    }

    let mut by_kind: Vec<KindTotals> = totals
        .into_iter()
        .map(|(kind, balance, movements)| KindTotals {
            kind,
            balance,
            movements,
            share: if total_balance == 0.0 {
                0.0
            } else {
                balance / total_balance * 100.0
            },
        })
        .collect();
    by_kind.sort_by(|a, b| {
        b.balance
            .total_cmp(&a.balance)
            .then_with(|| a.kind.key().cmp(b.kind.key()))
    });

    PortfolioSummary {
        total_balance,
        by_kind,
        recurring_count,
        non_recurring_count,
    }
}
