use alarmsync_api::routes;
use alarmsync_client::storage::{EMAIL_KEY, LocalStorage, PASSWORD_KEY, TOKEN_KEY};
use alarmsync_client::{ApiMode, Error, TransportError};

mod common;
use common::test_client::{EMAIL, PASSWORD, TOKEN, TestClient, silent_listener};

#[tokio::test]
async fn test_stored_token_is_valid() {
    let app = TestClient::new().await.with_token().await;

    assert!(app.client.session.is_session_valid().await);
    assert_eq!(app.server.state.validated_tokens().await, vec![TOKEN]);
}

#[tokio::test]
async fn test_revoked_token_is_invalid() {
    let app = TestClient::new().await.with_token().await;
    app.server.state.revoke_token(TOKEN).await;

    assert!(!app.client.session.is_session_valid().await);

    let result = app.client.session.check_session().await;
    assert!(matches!(result, Err(Error::BackendRejected { status }) if status == "INVALID"));
}

#[tokio::test]
async fn test_no_token_skips_network() {
    let app = TestClient::new().await;

    assert!(!app.client.session.is_session_valid().await);
    assert!(matches!(
        app.client.session.check_session().await,
        Err(Error::NoTokenStored)
    ));
    assert_eq!(app.server.state.hits(routes::VALIDATE_TOKEN).await, 0);
}

#[tokio::test]
async fn test_validation_network_failure_is_invalid() {
    let app = TestClient::new().await.with_token().await;
    app.client.context().set_mode(ApiMode::Production);

    assert!(!app.client.session.is_session_valid().await);
    assert!(matches!(
        app.client.session.check_session().await,
        Err(Error::Transport(_))
    ));
    assert_eq!(app.server.state.hits(routes::VALIDATE_TOKEN).await, 0);
}

#[tokio::test]
async fn test_login() {
    let app = TestClient::new().await;

    assert!(app.client.session.login(EMAIL, PASSWORD).await.unwrap());

    let token = app.client.session.token().await.unwrap().unwrap();
    assert!(!token.is_empty());
    assert_ne!(token, TOKEN);
    assert!(app.client.session.is_session_valid().await);

    let credentials = app.client.session.cached_credentials().await.unwrap().unwrap();
    assert_eq!(credentials.email, EMAIL);
    assert_eq!(credentials.password, PASSWORD);
}

#[tokio::test]
async fn test_login_wrong_password_keeps_previous_token() {
    let app = TestClient::new().await.with_token().await;

    assert!(!app.client.session.login(EMAIL, "wrong_password").await.unwrap());
    assert!(!app.client.session.login("nobody@cti.test", PASSWORD).await.unwrap());

    assert_eq!(app.storage.get_item(TOKEN_KEY).await.unwrap().as_deref(), Some(TOKEN));
    assert_eq!(app.storage.get_item(EMAIL_KEY).await.unwrap(), None);
    assert_eq!(app.server.state.hits(routes::LOGIN).await, 2);
}

#[tokio::test]
async fn test_login_network_failure_is_error() {
    let app = TestClient::new().await.with_token().await;
    app.client.context().set_mode(ApiMode::Production);

    let result = app.client.session.login(EMAIL, PASSWORD).await;
    assert!(matches!(result, Err(Error::Transport(_))));

    assert_eq!(app.storage.get_item(TOKEN_KEY).await.unwrap().as_deref(), Some(TOKEN));
    assert_eq!(app.storage.get_item(PASSWORD_KEY).await.unwrap(), None);
    assert_eq!(app.server.state.hits(routes::LOGIN).await, 0);
}

#[tokio::test]
async fn test_unanswered_request_times_out() {
    let (_listener, url) = silent_listener();
    let app = TestClient::with_settings(|settings| {
        settings.api.production_url = url;
        settings.api.timeout = 1;
        settings.api.connect_timeout = 1;
    })
    .await
    .with_token()
    .await;
    app.client.context().set_mode(ApiMode::Production);

    let result = app.client.session.login(EMAIL, PASSWORD).await;
    assert!(matches!(
        result,
        Err(Error::Transport(TransportError::Timeout))
    ));
    assert_eq!(app.storage.get_item(TOKEN_KEY).await.unwrap().as_deref(), Some(TOKEN));

    assert!(!app.client.session.is_session_valid().await);
    assert!(matches!(
        app.client.session.check_session().await,
        Err(Error::Transport(TransportError::Timeout))
    ));
}

#[tokio::test]
async fn test_login_without_remembering_credentials() {
    let app = TestClient::with_settings(|settings| {
        settings.storage.remember_credentials = false;
    })
    .await;

    assert!(app.client.session.login(EMAIL, PASSWORD).await.unwrap());

    assert!(app.storage.get_item(TOKEN_KEY).await.unwrap().is_some());
    assert_eq!(app.storage.get_item(EMAIL_KEY).await.unwrap(), None);
    assert_eq!(app.storage.get_item(PASSWORD_KEY).await.unwrap(), None);
    assert_eq!(app.client.session.cached_credentials().await.unwrap(), None);
}

#[tokio::test]
async fn test_rejected_login_does_not_supersede_valid_one() {
    let app = TestClient::new().await;

    let (good, bad) = tokio::join!(
        app.client.session.login(EMAIL, PASSWORD),
        app.client.session.login(EMAIL, "wrong_password"),
    );

    assert!(good.unwrap());
    assert!(!bad.unwrap());
    assert!(app.client.session.token().await.unwrap().is_some());
    assert!(app.client.session.is_session_valid().await);
}

#[tokio::test]
async fn test_concurrent_logins_keep_one_session() {
    let app = TestClient::new().await;
    app.server.state.add_user("other@cti.test", "other").await;

    let (first, second) = tokio::join!(
        app.client.session.authenticate(EMAIL, PASSWORD),
        app.client.session.authenticate("other@cti.test", "other"),
    );

    let winner = match (first, second) {
        (Ok(session), Err(Error::SessionSuperseded)) => session,
        (Err(Error::SessionSuperseded), Ok(session)) => session,
        other => panic!("expected exactly one superseded login, got {:?}", other),
    };

    assert_eq!(app.client.session.token().await.unwrap(), Some(winner.token));
    let credentials = app.client.session.cached_credentials().await.unwrap().unwrap();
    assert_eq!(credentials.email, winner.email);
}

#[tokio::test]
async fn test_logout_clears_token() {
    let app = TestClient::new().await.with_token().await;

    app.client.session.logout().await.unwrap();

    assert_eq!(app.client.session.token().await.unwrap(), None);
    assert!(!app.client.session.is_session_valid().await);
    assert_eq!(app.server.state.hits(routes::VALIDATE_TOKEN).await, 0);
}

#[tokio::test]
async fn test_mode_toggle_switches_backend() {
    let app = TestClient::new().await;
    let context = app.client.context();

    assert_eq!(context.mode(), ApiMode::Development);
    assert_eq!(context.base_url(), app.server.url());

    assert_eq!(context.toggle_mode(), ApiMode::Production);
    assert_ne!(context.base_url(), app.server.url());
    assert!(app.client.session.login(EMAIL, PASSWORD).await.is_err());

    assert_eq!(context.toggle_mode(), ApiMode::Development);
    assert!(app.client.session.login(EMAIL, PASSWORD).await.unwrap());
    assert_eq!(app.server.state.hits(routes::LOGIN).await, 1);
}
