//! End-to-end navigation against a running portal.

use reqwest::StatusCode;
use serde_json::Value;

mod common;

const PARTICIPANT_PATHS: &[&str] = &[
    "/challenges",
    "/leaderboard",
    "/users",
    "/home",
    "/logout",
    "/notifications",
    "/settings",
    "/login",
];

const ADMIN_PATHS: &[&str] = &[
    "/admin/challenges",
    "/admin/leaderboard",
    "/admin/users",
    "/admin/home",
    "/admin/logout",
    "/admin/notifications",
    "/admin/settings",
];

#[tokio::test]
async fn test_every_declared_path_serves_its_view() {
    let (addr, shutdown) = common::start_portal(common::test_config()).await;
    let client = common::client();

    for path in PARTICIPANT_PATHS {
        let res = client.get(format!("http://{}{}", addr, path)).send().await.unwrap();
        assert_eq!(res.status(), StatusCode::OK, "{}", path);
        let body: Value = res.json().await.unwrap();
        assert_eq!(body["path"], *path);
        assert_eq!(body["segment"], "participant");
    }

    for path in ADMIN_PATHS {
        let res = client
            .get(format!("http://{}{}", addr, path))
            .bearer_auth(common::API_KEY)
            .send()
            .await
            .unwrap();
        assert_eq!(res.status(), StatusCode::OK, "{}", path);
        let body: Value = res.json().await.unwrap();
        assert_eq!(body["path"], *path);
        assert_eq!(body["segment"], "administrator");
    }

    shutdown.trigger();
}

#[tokio::test]
async fn test_unknown_paths_fall_back_to_login() {
    let (addr, shutdown) = common::start_portal(common::test_config()).await;
    let client = common::client();

    for path in ["/nonexistent", "/", "/home/", "/admin", "/admin/unknown"] {
        let res = client.get(format!("http://{}{}", addr, path)).send().await.unwrap();
        assert_eq!(res.status(), StatusCode::TEMPORARY_REDIRECT, "{}", path);
        assert_eq!(res.headers()["location"], "/login");
    }

    shutdown.trigger();
}

#[tokio::test]
async fn test_admin_views_are_guarded() {
    let (addr, shutdown) = common::start_portal(common::test_config()).await;
    let client = common::client();

    let res = client
        .get(format!("http://{}/admin/settings", addr))
        .send()
        .await
        .unwrap();
    assert_eq!(res.status(), StatusCode::UNAUTHORIZED);

    let res = client
        .get(format!("http://{}/admin/settings", addr))
        .bearer_auth("wrong-key")
        .send()
        .await
        .unwrap();
    assert_eq!(res.status(), StatusCode::UNAUTHORIZED);

    shutdown.trigger();
}

#[tokio::test]
async fn test_custom_fallback_path() {
    let mut config = common::test_config();
    config.navigation.fallback_path = "/home".into();
    let (addr, shutdown) = common::start_portal(config).await;

    let res = common::client()
        .get(format!("http://{}/missing", addr))
        .send()
        .await
        .unwrap();
    assert_eq!(res.headers()["location"], "/home");

    shutdown.trigger();
}

#[tokio::test]
async fn test_request_id_is_echoed() {
    let (addr, shutdown) = common::start_portal(common::test_config()).await;

    let res = common::client()
        .get(format!("http://{}/home", addr))
        .header("x-request-id", "trace-me")
        .send()
        .await
        .unwrap();
    assert_eq!(res.headers()["x-request-id"], "trace-me");

    shutdown.trigger();
}

#[tokio::test]
async fn test_portal_api_lists_routes() {
    let (addr, shutdown) = common::start_portal(common::test_config()).await;
    let client = common::client();

    let res = client
        .get(format!("http://{}/_portal/routes", addr))
        .bearer_auth(common::API_KEY)
        .send()
        .await
        .unwrap();
    assert_eq!(res.status(), StatusCode::OK);
    let routes: Vec<Value> = res.json().await.unwrap();
    assert_eq!(routes.len(), PARTICIPANT_PATHS.len() + ADMIN_PATHS.len());

    let res = client
        .get(format!("http://{}/_portal/resolve", addr))
        .query(&[("name", "admin.Logout")])
        .bearer_auth(common::API_KEY)
        .send()
        .await
        .unwrap();
    let body: Value = res.json().await.unwrap();
    assert_eq!(body["path"], "/admin/logout");

    shutdown.trigger();
}
