//! Contract with the external data store that owns accounts and movements.

use cashflow_domain::{AccountKind, AccountRecord, Cadence, UserId};
use uuid::Uuid;

use crate::error::CollaboratorError;

/// Fields required to insert an account row.
#[derive(Debug, Clone, PartialEq)]
pub struct NewAccount {
    pub name: String,
    pub kind: AccountKind,
    pub starting_balance: f64,
}

/// Fields required to insert a movement row. The store stamps `created_at`.
#[derive(Debug, Clone, PartialEq)]
pub struct NewMovement {
    pub account_id: Uuid,
    pub amount: f64,
    pub cadence: Cadence,
}

/// Names each store call, for failure injection and call tracing.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum StoreOperation {
    LoadAccounts,
    InsertAccount,
    InsertMovement,
    DeleteMovements,
    DeleteMovement,
    DeleteAccount,
}

/// Request/response operations offered by the data store.
///
/// Every call is scoped to one user. Loads return accounts and their nested
/// movements ordered by creation time. Deleting an account does not cascade:
/// callers remove its movements first.
pub trait AccountStore: Send + Sync {
    fn load_accounts(&self, user: UserId) -> Result<Vec<AccountRecord>, CollaboratorError>;
    fn insert_account(&self, user: UserId, account: &NewAccount)
        -> Result<Uuid, CollaboratorError>;
    fn insert_movement(
        &self,
        user: UserId,
        movement: &NewMovement,
    ) -> Result<(), CollaboratorError>;
    fn delete_movements(&self, user: UserId, account_id: Uuid) -> Result<(), CollaboratorError>;
    fn delete_movement(&self, user: UserId, movement_id: Uuid) -> Result<(), CollaboratorError>;
    fn delete_account(&self, user: UserId, account_id: Uuid) -> Result<(), CollaboratorError>;
}
