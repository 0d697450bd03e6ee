//! In-process [`AccountStore`] that mirrors the remote store's constraints.

use std::{
    collections::HashMap,
    sync::{Mutex, MutexGuard},
};

use cashflow_domain::{AccountRecord, Cadence, MovementRecord, RawAmount, UserId};
use tracing::info;
use uuid::Uuid;

use crate::{
    error::{CollaboratorError, CHECK_VIOLATION, INSUFFICIENT_PRIVILEGE},
    store::{AccountStore, NewAccount, NewMovement, StoreOperation},
    time::Clock,
};

/// SQLSTATE raised when a row is still referenced by another table.
pub const FOREIGN_KEY_VIOLATION: &str = "23503";

struct StoredAccount {
    owner: UserId,
    record: AccountRecord,
}

#[derive(Default)]
struct State {
    accounts: Vec<StoredAccount>,
    failures: HashMap<StoreOperation, CollaboratorError>,
    calls: Vec<StoreOperation>,
}

/// Keeps rows in insertion order, stamps `created_at` from its clock, and
/// enforces ownership, the cadence check constraint, and the movement foreign
/// key the way the hosted store does.
pub struct MemoryStore {
    state: Mutex<State>,
    clock: Box<dyn Clock>,
}

impl MemoryStore {
    pub fn new(clock: impl Clock + 'static) -> Self {
        Self {
            state: Mutex::new(State::default()),
            clock: Box::new(clock),
        }
    }

    /// Creates a store pre-populated with rows owned by `owner`.
    pub fn seeded(owner: UserId, records: Vec<AccountRecord>, clock: impl Clock + 'static) -> Self {
        let store = Self::new(clock);
        if let Ok(mut state) = store.state.lock() {
            state.accounts = records
                .into_iter()
                .map(|record| StoredAccount { owner, record })
                .collect();
        }
        store
    }

    /// Makes the next call of `operation` fail with `error`.
    pub fn fail_next(&self, operation: StoreOperation, error: CollaboratorError) {
        if let Ok(mut state) = self.state.lock() {
            state.failures.insert(operation, error);
        }
    }

    /// Every operation attempted so far, in call order.
    pub fn calls(&self) -> Vec<StoreOperation> {
        self.state
            .lock()
            .map(|state| state.calls.clone())
            .unwrap_or_default()
    }

    pub fn account_count(&self) -> usize {
        self.state
            .lock()
            .map(|state| state.accounts.len())
            .unwrap_or_default()
    }

    fn begin(&self, operation: StoreOperation) -> Result<MutexGuard<'_, State>, CollaboratorError> {
        let mut state = self
            .state
            .lock()
            .map_err(|_| CollaboratorError::from_message("memory store lock poisoned"))?;
        state.calls.push(operation);
        let injected = state.failures.remove(&operation);
        if let Some(error) = injected {
            return Err(error);
        }
        Ok(state)
    }
}

impl State {
    fn account_mut(
        &mut self,
        user: UserId,
        account_id: Uuid,
    ) -> Result<Option<&mut StoredAccount>, CollaboratorError> {
        match self
            .accounts
            .iter_mut()
            .find(|stored| stored.record.id == account_id)
        {
            Some(stored) if stored.owner != user => Err(permission_denied()),
            found => Ok(found),
        }
    }
}

impl AccountStore for MemoryStore {
    fn load_accounts(&self, user: UserId) -> Result<Vec<AccountRecord>, CollaboratorError> {
        let state = self.begin(StoreOperation::LoadAccounts)?;
        Ok(state
            .accounts
            .iter()
            .filter(|stored| stored.owner == user)
            .map(|stored| stored.record.clone())
            .collect())
    }

    fn insert_account(
        &self,
        user: UserId,
        account: &NewAccount,
    ) -> Result<Uuid, CollaboratorError> {
        let mut state = self.begin(StoreOperation::InsertAccount)?;
        let id = Uuid::new_v4();
        state.accounts.push(StoredAccount {
            owner: user,
            record: AccountRecord {
                id,
                name: account.name.clone(),
                kind: account.kind,
                starting_balance: Some(RawAmount::Number(account.starting_balance)),
                created_at: self.clock.now(),
                movements: Vec::new(),
            },
        });
        info!(account = %id, kind = account.kind.key(), "account inserted");
        Ok(id)
    }

    fn insert_movement(
        &self,
        user: UserId,
        movement: &NewMovement,
    ) -> Result<(), CollaboratorError> {
        let mut state = self.begin(StoreOperation::InsertMovement)?;
        if matches!(movement.cadence, Cadence::Unrecognized(_)) {
            return Err(CollaboratorError::new(
                CHECK_VIOLATION,
                "new row violates check constraint \"repeats_every_check\"",
            ));
        }
        let created_at = self.clock.now();
        let stored = state
            .account_mut(user, movement.account_id)?
            .ok_or_else(|| {
                CollaboratorError::new(
                    FOREIGN_KEY_VIOLATION,
                    "insert or update on table \"movements\" violates foreign key constraint",
                )
            })?;
        stored.record.movements.push(MovementRecord {
            id: Uuid::new_v4(),
            amount: Some(RawAmount::Number(movement.amount)),
            cadence: movement.cadence.clone(),
            created_at,
        });
        Ok(())
    }

    fn delete_movements(&self, user: UserId, account_id: Uuid) -> Result<(), CollaboratorError> {
        let mut state = self.begin(StoreOperation::DeleteMovements)?;
        if let Some(stored) = state.account_mut(user, account_id)? {
            stored.record.movements.clear();
        }
        Ok(())
    }

    fn delete_movement(&self, user: UserId, movement_id: Uuid) -> Result<(), CollaboratorError> {
        let mut state = self.begin(StoreOperation::DeleteMovement)?;
        let Some(stored) = state.accounts.iter_mut().find(|stored| {
            stored
                .record
                .movements
                .iter()
                .any(|movement| movement.id == movement_id)
        }) else {
            return Ok(());
        };
        if stored.owner != user {
            return Err(permission_denied());
        }
        stored
            .record
            .movements
            .retain(|movement| movement.id != movement_id);
        Ok(())
    }

    fn delete_account(&self, user: UserId, account_id: Uuid) -> Result<(), CollaboratorError> {
        let mut state = self.begin(StoreOperation::DeleteAccount)?;
        let Some(stored) = state.account_mut(user, account_id)? else {
            return Ok(());
        };
        if !stored.record.movements.is_empty() {
            return Err(CollaboratorError::new(
                FOREIGN_KEY_VIOLATION,
                "update or delete on table \"accounts\" violates foreign key constraint on table \"movements\"",
            ));
        }
        state.accounts.retain(|stored| stored.record.id != account_id);
        info!(account = %account_id, "account deleted");
        Ok(())
    }
}

fn permission_denied() -> CollaboratorError {
    CollaboratorError::new(INSUFFICIENT_PRIVILEGE, "permission denied for table accounts")
}
