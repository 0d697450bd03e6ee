//! cashflow-core
//!
//! The cashflow projection engine (recurrence expansion, per-account
//! summaries, portfolio roll-ups) and the services that talk to the external
//! data store on its behalf.

pub mod account_service;
pub mod cashflow;
pub mod dashboard_service;
pub mod error;
pub mod memory_store;
pub mod movement_service;
pub mod portfolio;
pub mod recurrence;
pub mod saga;
pub mod store;
pub mod time;

pub use account_service::{AccountForm, AccountService};
pub use cashflow::{
    summarize, CashflowSummary, PastEntry, PointKind, ProjectionPoint, ProjectionSettings,
    UpcomingEntry,
};
pub use dashboard_service::{Dashboard, DashboardService};
pub use error::{CollaboratorError, CollaboratorErrorKind, CoreError};
pub use memory_store::MemoryStore;
pub use movement_service::{MovementForm, MovementService};
pub use portfolio::{aggregate, KindTotals, PortfolioSummary};
pub use recurrence::{next_upcoming, occurrences, Occurrences, DEFAULT_MAX_RECURRENCE_STEPS};
pub use saga::{Saga, SagaFailure};
pub use store::{AccountStore, NewAccount, NewMovement, StoreOperation};
pub use time::{Clock, FixedClock, SystemClock};

#[cfg(test)]
mod tests;
