use cashflow_domain::{Cadence, UserId};
use tracing::info;
use uuid::Uuid;

use crate::{
    account_service::parse_decimal,
    error::CoreError,
    store::{AccountStore, NewMovement},
};

/// Raw input from the movement form.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct MovementForm {
    pub account_id: Option<Uuid>,
    pub amount: String,
    pub cadence: Cadence,
}

impl MovementForm {
    pub fn validate(&self) -> Result<NewMovement, CoreError> {
        let account_id = self
            .account_id
            .ok_or_else(|| CoreError::Validation("Choose an account for the movement.".into()))?;
        if self.amount.trim().is_empty() {
            return Err(CoreError::Validation("Movement amount is required.".into()));
        }
        let amount = parse_decimal(&self.amount)
            .ok_or_else(|| CoreError::Validation("Movement amount must be a valid number.".into()))?;
        Ok(NewMovement {
            account_id,
            amount,
            cadence: self.cadence.clone(),
        })
    }
}

pub struct MovementService;

impl MovementService {
    pub fn add(store: &dyn AccountStore, user: UserId, form: &MovementForm) -> Result<(), CoreError> {
        let movement = form.validate()?;
        store.insert_movement(user, &movement)?;
        info!(
            account = %movement.account_id,
            cadence = movement.cadence.key(),
            "movement added"
        );
        Ok(())
    }

    pub fn remove(store: &dyn AccountStore, user: UserId, movement_id: Uuid) -> Result<(), CoreError> {
        store.delete_movement(user, movement_id)?;
        info!(movement = %movement_id, "movement removed");
        Ok(())
    }
}
