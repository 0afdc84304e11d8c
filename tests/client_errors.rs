//! Error-surfacing contract: every failure kind carries a non-empty,
//! server-derived message and mutates nothing client-side.

use serde_json::json;
use setdoc_admin::config::Config;
use setdoc_admin::errors::AdminError;
use setdoc_admin::models::NewAccount;
use setdoc_admin::panel::AdminPanel;
use wiremock::matchers::{method, path};
use wiremock::{Mock, MockServer, ResponseTemplate};

const ADMIN_KEY: &str = "sk-admin-test";

fn test_config(server: &MockServer) -> Config {
    Config {
        api_url: server.uri(),
        ..Config::default()
    }
}

async fn mount_probe_ok(server: &MockServer, times: u64) {
    Mock::given(method("GET"))
        .and(path("/admin/accounts/"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!([])))
        .up_to_n_times(times)
        .mount(server)
        .await;
}

#[tokio::test]
async fn login_with_a_bad_key_is_unauthorized() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/admin/accounts/"))
        .respond_with(
            ResponseTemplate::new(401)
                .set_body_json(json!({"detail": "Invalid or non-admin API key"})),
        )
        .expect(1)
        .mount(&server)
        .await;

    let mut panel = AdminPanel::new(test_config(&server));
    let err = panel.login("sk-wrong").await.unwrap_err();

    match err {
        AdminError::Unauthorized { detail } => {
            assert_eq!(detail, "Invalid or non-admin API key")
        }
        other => panic!("expected Unauthorized, got {other:?}"),
    }
    assert!(!panel.is_authenticated());
}

#[tokio::test]
async fn server_validation_failure_surfaces_the_detail() {
    let server = MockServer::start().await;
    mount_probe_ok(&server, 1).await;

    Mock::given(method("POST"))
        .and(path("/admin/accounts/"))
        .respond_with(
            ResponseTemplate::new(422).set_body_json(json!({"detail": "account name already taken"})),
        )
        .expect(1)
        .mount(&server)
        .await;

    let mut panel = AdminPanel::new(test_config(&server));
    panel.login(ADMIN_KEY).await.unwrap();

    let err = panel
        .create_account(NewAccount::new("Cartório A"))
        .await
        .unwrap_err();
    match err {
        AdminError::Validation { status, detail } => {
            assert_eq!(status, 422);
            assert_eq!(detail, "account name already taken");
        }
        other => panic!("expected Validation, got {other:?}"),
    }
    // the failure must not end the session
    assert!(panel.is_authenticated());
}

#[tokio::test]
async fn empty_name_is_rejected_before_any_request() {
    let server = MockServer::start().await;
    mount_probe_ok(&server, 1).await;

    Mock::given(method("POST"))
        .respond_with(ResponseTemplate::new(200))
        .expect(0)
        .mount(&server)
        .await;

    let mut panel = AdminPanel::new(test_config(&server));
    panel.login(ADMIN_KEY).await.unwrap();

    let err = panel.create_account(NewAccount::new("  ")).await.unwrap_err();
    let message = err.to_string();
    assert!(matches!(err, AdminError::InvalidInput(_)));
    assert!(!message.is_empty());
}

#[tokio::test]
async fn failed_mutation_leaves_cached_reads_intact() {
    let server = MockServer::start().await;
    // probe + one listing; no further GET is mounted, so a refetch would 404
    mount_probe_ok(&server, 2).await;

    Mock::given(method("POST"))
        .and(path("/admin/accounts/"))
        .respond_with(ResponseTemplate::new(500).set_body_string("internal error"))
        .expect(1)
        .mount(&server)
        .await;

    let mut panel = AdminPanel::new(test_config(&server));
    panel.login(ADMIN_KEY).await.unwrap();

    assert!(panel.accounts().await.unwrap().is_empty());

    let err = panel
        .create_account(NewAccount::new("Cartório A"))
        .await
        .unwrap_err();
    assert!(matches!(err, AdminError::Server { status: 500, .. }));

    // still served from cache: the failed mutation invalidated nothing
    assert!(panel.accounts().await.unwrap().is_empty());
    assert!(panel.is_authenticated());
}

#[tokio::test]
async fn plain_text_error_bodies_are_used_verbatim() {
    let server = MockServer::start().await;
    mount_probe_ok(&server, 1).await;

    Mock::given(method("GET"))
        .and(path("/admin/prompts/"))
        .respond_with(ResponseTemplate::new(503).set_body_string("upstream maintenance"))
        .mount(&server)
        .await;

    let mut panel = AdminPanel::new(test_config(&server));
    panel.login(ADMIN_KEY).await.unwrap();

    let err = panel.prompts().await.unwrap_err();
    match err {
        AdminError::Server { status, detail } => {
            assert_eq!(status, 503);
            assert_eq!(detail, "upstream maintenance");
        }
        other => panic!("expected Server, got {other:?}"),
    }
}

#[tokio::test]
async fn unreachable_api_is_a_transport_failure() {
    let server = MockServer::start().await;
    let uri = server.uri();
    // nothing is listening on the port once the mock server is gone
    drop(server);

    let mut panel = AdminPanel::new(Config {
        api_url: uri,
        ..Config::default()
    });

    let err = panel.login(ADMIN_KEY).await.unwrap_err();
    assert!(matches!(err, AdminError::Transport(_)));
    assert!(!err.to_string().is_empty());
    assert!(!panel.is_authenticated());
}
