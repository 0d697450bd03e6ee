use cashflow_domain::{AccountKind, Cadence, UserId};
use tracing::info;
use uuid::Uuid;

use crate::{
    error::{CollaboratorError, CoreError},
    saga::Saga,
    store::{AccountStore, NewAccount, NewMovement},
};

/// Raw input from the account creation form.
#[derive(Debug, Clone, PartialEq)]
pub struct AccountForm {
    pub name: String,
    pub kind: AccountKind,
    /// Free text; blank means zero.
    pub starting_balance: String,
}

impl AccountForm {
    pub fn new(
        name: impl Into<String>,
        kind: AccountKind,
        starting_balance: impl Into<String>,
    ) -> Self {
        Self {
            name: name.into(),
            kind,
            starting_balance: starting_balance.into(),
        }
    }

    pub fn validate(&self) -> Result<NewAccount, CoreError> {
        let name = self.name.trim();
        if name.is_empty() {
            return Err(CoreError::Validation(
                "Give the account a name before creating it.".into(),
            ));
        }
        let starting_balance = if self.starting_balance.trim().is_empty() {
            0.0
        } else {
            parse_decimal(&self.starting_balance).ok_or_else(|| {
                CoreError::Validation("Starting balance must be a valid number.".into())
            })?
        };
        Ok(NewAccount {
            name: name.to_string(),
            kind: self.kind,
            starting_balance,
        })
    }
}

/// Parses a user-entered decimal, rejecting blanks and non-finite values.
pub(crate) fn parse_decimal(raw: &str) -> Option<f64> {
    raw.trim()
        .parse::<f64>()
        .ok()
        .filter(|value| value.is_finite())
}

#[derive(Default)]
struct CreateAccount {
    account_id: Option<Uuid>,
}

pub struct AccountService;

impl AccountService {
    /// Inserts the account and its opening-balance movement. When the
    /// movement insert fails the account row is deleted again.
    pub fn create(
        store: &dyn AccountStore,
        user: UserId,
        form: &AccountForm,
    ) -> Result<Uuid, CoreError> {
        let account = form.validate()?;
        let opening_amount = account.starting_balance;

        let mut context = CreateAccount::default();
        Saga::new()
            .step_with_compensation(
                "insert account",
                |ctx: &mut CreateAccount| {
                    ctx.account_id = Some(store.insert_account(user, &account)?);
                    Ok(())
                },
                |ctx: &CreateAccount| match ctx.account_id {
                    Some(id) => store.delete_account(user, id),
                    None => Ok(()),
                },
            )
            .step("insert opening movement", |ctx: &mut CreateAccount| {
                let account_id = ctx.account_id.ok_or_else(|| {
                    CollaboratorError::from_message("The account was not created.")
                })?;
                store.insert_movement(
                    user,
                    &NewMovement {
                        account_id,
                        amount: opening_amount,
                        cadence: Cadence::None,
                    },
                )
            })
            .run(&mut context)?;

        let id = context
            .account_id
            .ok_or_else(|| CollaboratorError::from_message("The account was not created."))?;
        info!(account = %id, kind = account.kind.key(), "account created");
        Ok(id)
    }

    /// Removes the account's movements, then the account itself.
    pub fn delete(store: &dyn AccountStore, user: UserId, account_id: Uuid) -> Result<(), CoreError> {
        store.delete_movements(user, account_id)?;
        store.delete_account(user, account_id)?;
        info!(account = %account_id, "account deleted with its movements");
        Ok(())
    }
}
