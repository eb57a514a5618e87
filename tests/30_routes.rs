mod common;

use anyhow::Result;

use education_crm_client::{guard, Navigation, Route, RouteDecision, Shell, TokenStore};

#[tokio::test]
async fn expired_session_is_honored_on_next_navigation() -> Result<()> {
    let server = common::spawn_backend().await?;
    let h = common::harness(&server.base_url, Some("stale-token"));

    assert_eq!(
        guard(h.store.as_ref(), &h.config, "/students"),
        RouteDecision::Render { shell: Shell::Authenticated, route: Route::Students }
    );

    let _ = h.client.get("/api/v1/students").await;

    assert_eq!(
        guard(h.store.as_ref(), &h.config, "/students"),
        RouteDecision::Redirect(Navigation::replace("/login"))
    );
    assert_eq!(
        guard(h.store.as_ref(), &h.config, "/login"),
        RouteDecision::Render { shell: Shell::Auth, route: Route::Login }
    );
    Ok(())
}

#[test]
fn login_page_redirects_home_once_authenticated() {
    let h = common::harness("http://localhost:3000", None);
    h.store.set_token(Some("T"));

    assert_eq!(
        guard(h.store.as_ref(), &h.config, "/login"),
        RouteDecision::Redirect(Navigation::replace("/"))
    );
    assert_eq!(
        guard(h.store.as_ref(), &h.config, "/register"),
        RouteDecision::Redirect(Navigation::replace("/"))
    );
}

#[test]
fn file_store_drives_guard_across_instances() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("session.json");
    let config = education_crm_client::config::ClientConfig::with_base_url("http://localhost:3000");

    education_crm_client::FileTokenStore::new(&path).set_token(Some("persisted"));
    let reloaded = education_crm_client::FileTokenStore::new(&path);
    assert!(!guard(&reloaded, &config, "/batches/3").is_redirect());

    reloaded.clear_token();
    assert!(guard(&reloaded, &config, "/batches/3").is_redirect());
}
