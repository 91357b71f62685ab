//! Startup order as seen from the metrics endpoint.
//!
//! Installs the process-wide recorder, so it lives in its own test binary.

use std::net::TcpListener as StdListener;
use std::time::Duration;

use ctf_portal::config::PortalConfig;
use ctf_portal::lifecycle::{run, StartupError};

/// Reserve a free loopback port and release it for the exporter.
fn free_port() -> u16 {
    let listener = StdListener::bind("127.0.0.1:0").unwrap();
    listener.local_addr().unwrap().port()
}

#[tokio::test]
async fn test_failed_bootstrap_is_scraped() {
    let metrics_address = format!("127.0.0.1:{}", free_port());

    let mut config = PortalConfig::default();
    config.listener.bind_address = "127.0.0.1:0".into();
    config.observability.metrics_enabled = true;
    config.observability.metrics_address = metrics_address.clone();
    config.database.host = "127.0.0.1".into();
    config.database.port = 1;
    config.database.connect_timeout_secs = 2;

    // Fails either on missing MYSQL_* variables or on the refused port.
    let result = run(config).await;
    assert!(matches!(result, Err(StartupError::Database(_))));

    tokio::time::sleep(Duration::from_millis(100)).await;
    let body = reqwest::get(format!("http://{}/metrics", metrics_address))
        .await
        .unwrap()
        .text()
        .await
        .unwrap();

    assert!(
        body.contains(r#"portal_bootstrap_attempts_total{outcome="failure"} 1"#),
        "bootstrap failure missing from scrape:\n{body}"
    );
}
