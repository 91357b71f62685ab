//! Connectivity bootstrap behavior through the public API.

use ctf_portal::bootstrap::{ConnectionConfig, ConnectionError, USER_MESSAGE};
use ctf_portal::config::DatabaseConfig;
use ctf_portal::lifecycle::startup::bootstrap_with;
use ctf_portal::lifecycle::StartupError;

fn refused() -> ConnectionConfig {
    let mut db = DatabaseConfig::default();
    db.host = "127.0.0.1".into();
    db.port = 1;
    db.connect_timeout_secs = 2;

    ConnectionConfig::from_lookup(&db, |key| match key {
        "MYSQL_database" => Some("ctf".into()),
        "MYSQL_username" => Some("player".into()),
        "MYSQL_password" => Some("secret".into()),
        _ => None,
    })
    .unwrap()
}

#[tokio::test]
async fn test_unreachable_store_never_yields_connection() {
    let (mut out, mut err) = (Vec::new(), Vec::new());
    let result = bootstrap_with(&refused(), &mut out, &mut err).await;

    match result {
        Err(StartupError::Database(ConnectionError::Connect { .. }))
        | Err(StartupError::Database(ConnectionError::Timeout { .. })) => {}
        Err(other) => panic!("unexpected error: {}", other),
        Ok(_) => panic!("connected to a refused port"),
    }

    assert!(out.is_empty());
    let report = String::from_utf8(err).unwrap();
    assert!(report.ends_with(&format!("{}\n", USER_MESSAGE)));
    assert!(!report.contains("secret"));
}

// Run with: MYSQL_host=... MYSQL_database=... MYSQL_username=... MYSQL_password=... cargo test -- --ignored
#[tokio::test]
#[ignore = "requires database"]
async fn test_reachable_store_confirms_once() {
    let mut db = DatabaseConfig::default();
    if let Ok(host) = std::env::var("MYSQL_host") {
        db.host = host;
    }
    let settings = ConnectionConfig::from_env(&db).expect("MYSQL_* variables required");

    let (mut out, mut err) = (Vec::new(), Vec::new());
    let database = bootstrap_with(&settings, &mut out, &mut err)
        .await
        .expect("bootstrap failed");

    let confirmation = String::from_utf8(out).unwrap();
    assert_eq!(confirmation.lines().count(), 1);
    assert!(err.is_empty());
    database.ping().await.expect("ping failed");
}
