mod common;

use common::{DSN, MockDriver, adapter, registry, session};
use oracle_adapter::prelude::*;

#[tokio::test]
async fn statements_inside_a_transaction_do_not_auto_commit() -> Result<(), OracleAdapterError> {
    let driver = MockDriver::new();
    let registry = registry(&driver);
    let mut adapter = adapter(&registry);
    let mut session = session(DSN);
    adapter.connect(&mut session).await?;

    session.set_command(Command::Update);
    adapter
        .query(&mut session, "update \"users\" set \"age\" = ?", &[RowValues::Int(1)])
        .await?;

    adapter.transaction(&mut session).await?;
    assert!(adapter.in_transaction());
    adapter
        .query(&mut session, "update \"users\" set \"age\" = ?", &[RowValues::Int(2)])
        .await?;
    adapter.commit(&mut session).await?;
    assert!(!adapter.in_transaction());

    adapter
        .query(&mut session, "update \"users\" set \"age\" = ?", &[RowValues::Int(3)])
        .await?;

    let flags: Vec<bool> = driver.executed().iter().map(|e| e.auto_commit).collect();
    assert_eq!(flags, [true, false, true]);
    assert_eq!(driver.state().commits, 1);
    Ok(())
}

#[tokio::test]
async fn rollback_leaves_transaction() -> Result<(), OracleAdapterError> {
    let driver = MockDriver::new();
    let registry = registry(&driver);
    let mut adapter = adapter(&registry);
    let mut session = session(DSN);
    adapter.connect(&mut session).await?;

    adapter.transaction(&mut session).await?;
    adapter
        .query(&mut session, "delete from \"users\"", &[])
        .await?;
    adapter.rollback(&mut session).await?;

    assert!(!adapter.in_transaction());
    assert_eq!(driver.state().rollbacks, 1);
    assert_eq!(driver.state().commits, 0);
    assert!(!driver.executed()[0].auto_commit);
    Ok(())
}

#[tokio::test]
async fn failed_commit_keeps_transaction_open() {
    let driver = MockDriver::new();
    let registry = registry(&driver);
    let mut adapter = adapter(&registry);
    let mut session = session(DSN);
    adapter.connect(&mut session).await.unwrap();

    adapter.transaction(&mut session).await.unwrap();
    driver.state().fail_commit = true;
    let err = adapter.commit(&mut session).await.unwrap_err();

    assert!(matches!(err, OracleAdapterError::QueryError(_)));
    assert_eq!(err.code(), Some(2091));
    assert!(adapter.in_transaction());
}

#[tokio::test]
async fn commit_without_connection_fails() {
    let driver = MockDriver::new();
    let registry = registry(&driver);
    let mut adapter = adapter(&registry);
    let mut session = session(DSN);

    let err = adapter.commit(&mut session).await.unwrap_err();
    assert!(matches!(err, OracleAdapterError::NotConnected(_)));
    let err = adapter.rollback(&mut session).await.unwrap_err();
    assert!(matches!(err, OracleAdapterError::NotConnected(_)));
}

#[tokio::test]
async fn transaction_with_commits_on_success() -> Result<(), OracleAdapterError> {
    let driver = MockDriver::new();
    let registry = registry(&driver);
    let mut adapter = adapter(&registry);
    let mut session = session(DSN).with_primary_key("id");
    adapter.connect(&mut session).await?;

    driver.respond(Ok(common::inserted(44)));
    let id = adapter
        .transaction_with(&mut session, |adapter, session| {
            Box::pin(async move {
                session.set_command(Command::Insert);
                adapter
                    .query(session, "insert into \"users\" (\"name\") values (?)", &[
                        RowValues::from("ann"),
                    ])
                    .await?;
                Ok(session.insert_id)
            })
        })
        .await?;

    assert_eq!(id, Some(44));
    assert!(!adapter.in_transaction());
    let state = driver.state();
    assert_eq!(state.commits, 1);
    assert_eq!(state.rollbacks, 0);
    assert!(!state.executed[0].auto_commit);
    Ok(())
}

#[tokio::test]
async fn transaction_with_rolls_back_on_failure() {
    let driver = MockDriver::new();
    let registry = registry(&driver);
    let mut adapter = adapter(&registry);
    let mut session = session(DSN);
    adapter.connect(&mut session).await.unwrap();

    driver.respond(Ok(ExecuteResult::default()));
    driver.respond(Err(DriverError::with_code(1, "unique constraint violated")));
    let err = adapter
        .transaction_with(&mut session, |adapter, session| {
            Box::pin(async move {
                session.set_command(Command::Update);
                adapter
                    .query(session, "update \"users\" set \"age\" = 1", &[])
                    .await?;
                adapter
                    .query(session, "update \"users\" set \"age\" = 2", &[])
                    .await
            })
        })
        .await
        .unwrap_err();

    let OracleAdapterError::TransactionError { source, rollback } = &err else {
        panic!("expected a transaction error, got {err:?}");
    };
    assert!(matches!(**source, OracleAdapterError::QueryError(_)));
    assert!(rollback.is_none());
    assert_eq!(err.code(), Some(1));
    assert!(!adapter.in_transaction());

    let state = driver.state();
    assert_eq!(state.commits, 0);
    assert_eq!(state.rollbacks, 1);
}

#[tokio::test]
async fn failed_rollback_is_attached_not_substituted() {
    let driver = MockDriver::new();
    let registry = registry(&driver);
    let mut adapter = adapter(&registry);
    let mut session = session(DSN);
    adapter.connect(&mut session).await.unwrap();

    driver.state().fail_rollback = true;
    driver.respond(Err(DriverError::with_code(1722, "invalid number")));
    let err = adapter
        .transaction_with(&mut session, |adapter, session| {
            Box::pin(async move {
                adapter
                    .query(session, "update \"users\" set \"age\" = 'x'", &[])
                    .await
            })
        })
        .await
        .unwrap_err();

    let OracleAdapterError::TransactionError { source, rollback } = err else {
        panic!("expected a transaction error");
    };
    assert_eq!(source.code(), Some(1722));
    assert_eq!(rollback.and_then(|r| r.code()), Some(3113));
}

#[tokio::test]
async fn failed_commit_triggers_rollback() {
    let driver = MockDriver::new();
    let registry = registry(&driver);
    let mut adapter = adapter(&registry);
    let mut session = session(DSN);
    adapter.connect(&mut session).await.unwrap();

    driver.state().fail_commit = true;
    let err = adapter
        .transaction_with(&mut session, |adapter, session| {
            Box::pin(async move {
                adapter
                    .query(session, "delete from \"users\"", &[])
                    .await
            })
        })
        .await
        .unwrap_err();

    assert!(matches!(err, OracleAdapterError::TransactionError { .. }));
    assert_eq!(err.code(), Some(2091));
    assert_eq!(driver.state().rollbacks, 1);
    assert!(!adapter.in_transaction());
}
