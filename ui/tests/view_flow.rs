use api_client::ApiClient;
use mocks::{album_server, base_url};
use ui::{Action, Effect, Key, TimerEffect, TimerKind, ViewError, ViewMode, ViewStateMachine};

fn machine(server: &mocks::httptest::Server, root: &str) -> ViewStateMachine<ApiClient> {
    let client = ApiClient::new(&base_url(server, root)).unwrap();
    ViewStateMachine::new(client)
}

#[tokio::test]
async fn test_boot_without_session_shows_login() {
    let server = album_server();
    mocks::expect_me_unauthenticated(&server, "");

    let mut view = machine(&server, "");
    view.boot().await.unwrap();
    let snap = view.snapshot();
    assert_eq!(snap.mode, ViewMode::Login);
    assert_eq!(snap.login_error, None);
}

#[tokio::test]
async fn test_login_loads_first_album() {
    let server = album_server();
    mocks::expect_login(&server, "/albums", "alice");
    mocks::expect_albums(&server, "/albums", &["Summer 2023", "winter"]);
    mocks::expect_contents(&server, "/albums", "Summer%202023", &["1.jpg", "2.jpg"]);

    let mut view = machine(&server, "/albums");
    view.login("alice", "secret").await.unwrap();

    let snap = view.snapshot();
    assert_eq!(snap.mode, ViewMode::Top);
    assert_eq!(snap.username.as_deref(), Some("alice"));
    assert_eq!(snap.albums.len(), 2);
    assert_eq!(snap.active_album.map(|a| a.id), Some("Summer 2023".to_string()));
    assert_eq!(snap.photos, vec!["1.jpg".to_string(), "2.jpg".to_string()]);
    assert_eq!(snap.cursor, Some(0));
}

#[tokio::test]
async fn test_rejected_login_shows_server_detail() {
    let server = album_server();
    mocks::expect_login_rejected(&server, "");

    let mut view = machine(&server, "");
    let err = view.login("alice", "wrong").await.unwrap_err();
    assert_eq!(err, ViewError::Auth("Invalid username/password".into()));
    assert_eq!(view.mode(), ViewMode::Login);
    assert_eq!(
        view.snapshot().login_error.as_deref(),
        Some("Invalid username/password")
    );
}

#[tokio::test]
async fn test_failed_album_fetch_keeps_previous_album() {
    let server = album_server();
    mocks::expect_me(&server, "", "bob");
    mocks::expect_albums(&server, "", &["a", "gone"]);
    mocks::expect_contents(&server, "", "a", &["x.jpg", "y.jpg"]);
    mocks::expect_contents_missing(&server, "", "gone");

    let mut view = machine(&server, "");
    view.boot().await.unwrap();
    view.dispatch(Action::OpenQuickPreview(1));
    view.dispatch(Action::PromoteQuickPreview);
    assert_eq!(view.mode(), ViewMode::Album);

    let err = view.select_album("gone", true).await.unwrap_err();
    assert_eq!(err, ViewError::Remote("Album not found".into()));
    let snap = view.snapshot();
    assert_eq!(snap.active_album.map(|a| a.id), Some("a".to_string()));
    assert_eq!(snap.cursor, Some(1));
}

#[tokio::test]
async fn test_slideshow_from_album_then_logout() {
    let server = album_server();
    mocks::expect_me(&server, "", "bob");
    mocks::expect_albums(&server, "", &["a"]);
    mocks::expect_contents(&server, "", "a", &["1.jpg", "2.jpg", "3.jpg"]);
    mocks::expect_logout(&server, "");

    let mut view = machine(&server, "");
    view.boot().await.unwrap();
    view.dispatch(Action::OpenQuickPreview(1));
    assert!(view.handle_key(Key::Enter));
    assert_eq!(view.mode(), ViewMode::Album);
    assert_eq!(view.catalog().cursor(), Some(1));

    view.drain_effects();
    view.dispatch(Action::Play);
    let advance = view
        .drain_effects()
        .into_iter()
        .find_map(|e| match e {
            Effect::Timer(TimerEffect::Arm { id, .. }) if id.kind == TimerKind::Advance => Some(id),
            _ => None,
        })
        .unwrap();
    assert!(view.on_timer(advance));
    assert_eq!(view.snapshot().slideshow.and_then(|s| s.photo), Some("3.jpg".into()));

    view.logout().await;
    assert_eq!(view.mode(), ViewMode::Login);
    assert!(!view.on_timer(advance));
}
