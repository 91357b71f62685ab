//! Shared utilities for integration tests.

use std::net::SocketAddr;
use std::time::Duration;

use ctf_portal::config::PortalConfig;
use ctf_portal::http::PortalServer;
use ctf_portal::lifecycle::{prepare_route_table, Shutdown};
use tokio::net::TcpListener;

pub const API_KEY: &str = "integration-key";

/// Config with the bootstrap disabled and a known API key.
pub fn test_config() -> PortalConfig {
    let mut config = PortalConfig::default();
    config.listener.bind_address = "127.0.0.1:0".into();
    config.database.enabled = false;
    config.admin.api_key = API_KEY.into();
    config
}

/// Start the portal on an ephemeral port.
pub async fn start_portal(config: PortalConfig) -> (SocketAddr, Shutdown) {
    let table = prepare_route_table(&config).unwrap();
    let listener = TcpListener::bind(&config.listener.bind_address).await.unwrap();
    let addr = listener.local_addr().unwrap();

    let shutdown = Shutdown::new();
    let server = PortalServer::new(config, table);
    let server_shutdown = shutdown.subscribe();
    tokio::spawn(async move {
        let _ = server.run(listener, server_shutdown).await;
    });

    // Wait for server to start
    tokio::time::sleep(Duration::from_millis(100)).await;
    (addr, shutdown)
}

/// Client that does not follow redirects, so fallbacks stay visible.
pub fn client() -> reqwest::Client {
    reqwest::Client::builder()
        .redirect(reqwest::redirect::Policy::none())
        .build()
        .unwrap()
}
