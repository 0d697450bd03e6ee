use cashflow_domain::{AccountKind, Cadence};
use chrono::{DateTime, TimeZone, Utc};
use uuid::Uuid;

use crate::{
    error::INSUFFICIENT_PRIVILEGE,
    memory_store::FOREIGN_KEY_VIOLATION,
    AccountForm, AccountService, AccountStore, CollaboratorError, CoreError, DashboardService,
    FixedClock, MemoryStore, MovementForm, MovementService, ProjectionSettings, StoreOperation,
};

fn at(year: i32, month: u32, day: u32) -> DateTime<Utc> {
    Utc.with_ymd_and_hms(year, month, day, 9, 30, 0).unwrap()
}

fn store() -> MemoryStore {
    MemoryStore::new(FixedClock(at(2024, 1, 15)))
}

fn create(store: &MemoryStore, user: Uuid, name: &str, balance: &str) -> Uuid {
    AccountService::create(store, user, &AccountForm::new(name, AccountKind::Bank, balance))
        .expect("account created")
}

#[test]
fn create_account_inserts_opening_movement() {
    let store = store();
    let user = Uuid::new_v4();
    let id = create(&store, user, "Everyday", "1200.50");

    let dashboard = DashboardService::load(&store, user, ProjectionSettings::default())
        .expect("dashboard loads");
    let account = dashboard.account(id).expect("account present");
    assert_eq!(account.name, "Everyday");
    assert_eq!(account.starting_balance, 1200.50);
    assert_eq!(account.movements.len(), 1);
    assert_eq!(account.movements[0].cadence, Cadence::None);
    assert_eq!(account.movements[0].occurs_at, at(2024, 1, 15));
    assert_eq!(account.balance(), 1200.50);
    assert_eq!(
        store.calls(),
        vec![
            StoreOperation::InsertAccount,
            StoreOperation::InsertMovement,
            StoreOperation::LoadAccounts,
        ]
    );
}

#[test]
fn validation_failure_never_reaches_store() {
    let store = store();
    let err = AccountService::create(
        &store,
        Uuid::new_v4(),
        &AccountForm::new("", AccountKind::Cash, "10"),
    )
    .unwrap_err();
    assert!(err.is_validation());
    assert!(store.calls().is_empty());
}

#[test]
fn failed_opening_movement_removes_account() {
    let store = store();
    store.fail_next(
        StoreOperation::InsertMovement,
        CollaboratorError::new("08006", "connection lost"),
    );
    let err = AccountService::create(
        &store,
        Uuid::new_v4(),
        &AccountForm::new("Savings", AccountKind::Savings, "50"),
    )
    .unwrap_err();

    assert!(matches!(err, CoreError::Collaborator(_)));
    assert_eq!(err.to_string(), "connection lost");
    assert_eq!(store.account_count(), 0);
    assert_eq!(
        store.calls(),
        vec![
            StoreOperation::InsertAccount,
            StoreOperation::InsertMovement,
            StoreOperation::DeleteAccount,
        ]
    );
}

#[test]
fn failed_cleanup_reports_both_messages() {
    let store = store();
    store.fail_next(
        StoreOperation::InsertMovement,
        CollaboratorError::from_message("Could not save the opening balance."),
    );
    store.fail_next(
        StoreOperation::DeleteAccount,
        CollaboratorError::from_message("Cleanup failed."),
    );
    let err = AccountService::create(
        &store,
        Uuid::new_v4(),
        &AccountForm::new("Broker", AccountKind::Assets, ""),
    )
    .unwrap_err();

    assert!(matches!(err, CoreError::Compensation { .. }));
    assert_eq!(
        err.to_string(),
        "Could not save the opening balance. Cleanup failed."
    );
    assert_eq!(store.account_count(), 1);
}

#[test]
fn failed_account_insert_skips_compensation() {
    let store = store();
    store.fail_next(
        StoreOperation::InsertAccount,
        CollaboratorError::from_message("insert refused"),
    );
    let err = AccountService::create(
        &store,
        Uuid::new_v4(),
        &AccountForm::new("Wallet", AccountKind::Cash, "5"),
    )
    .unwrap_err();
    assert_eq!(err.to_string(), "insert refused");
    assert_eq!(store.calls(), vec![StoreOperation::InsertAccount]);
}

#[test]
fn delete_removes_movements_before_account() {
    let store = store();
    let user = Uuid::new_v4();
    let id = create(&store, user, "Everyday", "100");
    MovementService::add(
        &store,
        user,
        &MovementForm {
            account_id: Some(id),
            amount: "-20".into(),
            cadence: Cadence::Weekly,
        },
    )
    .expect("movement added");

    AccountService::delete(&store, user, id).expect("account deleted");
    let calls = store.calls();
    assert_eq!(
        &calls[calls.len() - 2..],
        &[StoreOperation::DeleteMovements, StoreOperation::DeleteAccount]
    );
    assert_eq!(store.account_count(), 0);
}

#[test]
fn store_refuses_account_delete_while_movements_remain() {
    let store = store();
    let user = Uuid::new_v4();
    let id = create(&store, user, "Everyday", "100");
    let err = store.delete_account(user, id).unwrap_err();
    assert_eq!(err.code.as_deref(), Some(FOREIGN_KEY_VIOLATION));
    assert_eq!(store.account_count(), 1);
}

#[test]
fn rejected_cadence_gets_friendly_message() {
    let store = store();
    let user = Uuid::new_v4();
    let id = create(&store, user, "Everyday", "100");
    let err = MovementService::add(
        &store,
        user,
        &MovementForm {
            account_id: Some(id),
            amount: "15".into(),
            cadence: Cadence::parse("quarterly"),
        },
    )
    .unwrap_err();
    assert!(err.to_string().contains("repeats_every"));
}

#[test]
fn other_users_cannot_touch_accounts() {
    let store = store();
    let owner = Uuid::new_v4();
    let intruder = Uuid::new_v4();
    let id = create(&store, owner, "Everyday", "100");

    let err = AccountService::delete(&store, intruder, id).unwrap_err();
    match &err {
        CoreError::Collaborator(inner) => {
            assert_eq!(inner.code.as_deref(), Some(INSUFFICIENT_PRIVILEGE))
        }
        other => panic!("unexpected error: {other:?}"),
    }
    assert!(err.to_string().starts_with("Permission denied."));

    let visible = DashboardService::load(&store, intruder, ProjectionSettings::default())
        .expect("dashboard loads");
    assert!(visible.accounts().is_empty());
}

#[test]
fn removing_a_movement_updates_balance() {
    let store = store();
    let user = Uuid::new_v4();
    let id = create(&store, user, "Everyday", "100");
    MovementService::add(
        &store,
        user,
        &MovementForm {
            account_id: Some(id),
            amount: "-30".into(),
            cadence: Cadence::None,
        },
    )
    .expect("movement added");

    let dashboard =
        DashboardService::load(&store, user, ProjectionSettings::default()).expect("loads");
    let account = dashboard.account(id).expect("present");
    assert_eq!(account.balance(), 70.0);
    let expense = account
        .movements
        .iter()
        .find(|movement| movement.amount == -30.0)
        .expect("expense stored");

    MovementService::remove(&store, user, expense.id).expect("removed");
    let dashboard =
        DashboardService::load(&store, user, ProjectionSettings::default()).expect("loads");
    assert_eq!(dashboard.account(id).expect("present").balance(), 100.0);
}

#[test]
fn dashboard_selection_falls_back_to_first_account() {
    let store = store();
    let user = Uuid::new_v4();
    let first = create(&store, user, "First", "10");
    let second = create(&store, user, "Second", "20");
    let dashboard =
        DashboardService::load(&store, user, ProjectionSettings::default()).expect("loads");

    assert_eq!(dashboard.selected_account(Some(second)).map(|a| a.id), Some(second));
    assert_eq!(dashboard.selected_account(None).map(|a| a.id), Some(first));
    assert_eq!(
        dashboard.selected_account(Some(Uuid::new_v4())).map(|a| a.id),
        Some(first)
    );
    let missing = Uuid::new_v4();
    assert!(matches!(
        dashboard.account(missing),
        Err(CoreError::AccountNotFound(id)) if id == missing
    ));

    let summary = dashboard
        .cashflow(None, at(2024, 2, 1))
        .expect("an account is selected");
    assert_eq!(summary.past.len(), 1);
    assert_eq!(dashboard.portfolio().total_balance, 30.0);
}

#[test]
fn empty_dashboard_has_no_cashflow() {
    let store = store();
    let dashboard = DashboardService::load(&store, Uuid::new_v4(), ProjectionSettings::default())
        .expect("loads");
    assert!(dashboard.cashflow(None, at(2024, 2, 1)).is_none());
    assert_eq!(dashboard.portfolio().total_balance, 0.0);
}

#[test]
fn load_failure_surfaces_collaborator_message() {
    let store = store();
    store.fail_next(
        StoreOperation::LoadAccounts,
        CollaboratorError::default(),
    );
    let err = DashboardService::load(&store, Uuid::new_v4(), ProjectionSettings::default())
        .unwrap_err();
    assert_eq!(
        err.to_string(),
        "An unexpected error occurred. Please try again."
    );
}
