use cashflow_domain::{normalize_accounts, Account, UserId};
use chrono::{DateTime, Utc};
use tracing::info;
use uuid::Uuid;

use crate::{
    cashflow::{summarize, CashflowSummary, ProjectionSettings},
    error::CoreError,
    portfolio::{aggregate, PortfolioSummary},
    store::AccountStore,
};

/// Normalized accounts of one user plus the settings used to project them.
#[derive(Debug, Clone, PartialEq)]
pub struct Dashboard {
    accounts: Vec<Account>,
    settings: ProjectionSettings,
}

impl Dashboard {
    pub fn new(accounts: Vec<Account>, settings: ProjectionSettings) -> Self {
        Self { accounts, settings }
    }

    pub fn accounts(&self) -> &[Account] {
        &self.accounts
    }

    pub fn settings(&self) -> &ProjectionSettings {
        &self.settings
    }

    /// The requested account, or the first one when it is absent or unknown.
    pub fn selected_account(&self, selection: Option<Uuid>) -> Option<&Account> {
        selection
            .and_then(|id| self.accounts.iter().find(|account| account.id == id))
            .or_else(|| self.accounts.first())
    }

    pub fn account(&self, id: Uuid) -> Result<&Account, CoreError> {
        self.accounts
            .iter()
            .find(|account| account.id == id)
            .ok_or(CoreError::AccountNotFound(id))
    }

    pub fn cashflow(&self, selection: Option<Uuid>, now: DateTime<Utc>) -> Option<CashflowSummary> {
        self.selected_account(selection)
            .map(|account| summarize(account, now, &self.settings))
    }

    pub fn portfolio(&self) -> PortfolioSummary {
        aggregate(&self.accounts)
    }
}

pub struct DashboardService;

impl DashboardService {
    /// Loads and normalizes every account the user owns.
    pub fn load(
        store: &dyn AccountStore,
        user: UserId,
        settings: ProjectionSettings,
    ) -> Result<Dashboard, CoreError> {
        let records = store.load_accounts(user)?;
        let accounts = normalize_accounts(records);
        info!(
            accounts = accounts.len(),
            movements = accounts.iter().map(|a| a.movements.len()).sum::<usize>(),
            "dashboard loaded"
        );
        Ok(Dashboard::new(accounts, settings))
    }
}
