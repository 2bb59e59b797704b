use crossterm::style::Color;
use serde_json::json;
use wiremock::matchers::{body_json, header, method, path};
use wiremock::{Mock, MockServer, ResponseTemplate};

use issuemyst::backend::{BackendClient, Engine, HttpEngine};
use issuemyst::config::types::ServerConfig;
use issuemyst::error::{FetchError, MALFORMED_RESPONSE_MESSAGE, TRANSPORT_MESSAGE};
use issuemyst::render::RenderedPanel;
use issuemyst::repo::parse_repo_input;
use issuemyst::state::{Controller, Submission, UiState};
use issuemyst::theme::ResolvedTheme;

const HELLO_WORLD_URL: &str = "https://github.com/octocat/Hello-World";

fn bug_issue_body() -> serde_json::Value {
    json!({
        "number": 42,
        "title": "Bug",
        "html_url": "https://github.com/octocat/Hello-World/issues/42",
        "labels": [{ "name": "bug", "color": "ff0000" }],
    })
}

fn client_for(server: &MockServer) -> BackendClient {
    BackendClient::new(&ServerConfig {
        url: server.uri(),
        timeout_secs: Some(5),
    })
    .unwrap()
}

/// Drive one submission through the controller against `client`, the same
/// way the UI does, and return the final state.
async fn submit(client: &BackendClient, raw: &str) -> UiState {
    let mut controller = Controller::new();
    if let Submission::Dispatch { seq, repo } = controller.submit(raw) {
        assert!(controller.state().visibility().loading);
        let result = client.fetch_random_issue(&repo).await;
        assert!(controller.resolve(seq, result));
    }
    controller.state().clone()
}

#[tokio::test]
async fn scenario_a_issue_is_shown_with_contrasting_label() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/"))
        .and(header("content-type", "application/json"))
        .and(body_json(json!({ "username": "octocat", "repo": "Hello-World" })))
        .respond_with(ResponseTemplate::new(200).set_body_json(bug_issue_body()))
        .expect(1)
        .mount(&server)
        .await;

    let state = submit(&client_for(&server), HELLO_WORLD_URL).await;
    let panel = RenderedPanel::build(&state, &ResolvedTheme::default());

    assert!(panel.loading.is_none());
    assert!(panel.error.is_none());
    let card = panel.issue.expect("issue card should be visible");
    assert_eq!(card.id, "[#42]");
    assert_eq!(card.title, "Bug");
    assert_eq!(card.url, "https://github.com/octocat/Hello-World/issues/42");
    assert_eq!(card.labels.len(), 1);
    assert_eq!(card.labels[0].name, "bug");
    assert_eq!(card.labels[0].bg, Color::Rgb { r: 255, g: 0, b: 0 });
    assert_eq!(card.labels[0].fg, Color::Rgb { r: 255, g: 255, b: 255 });
}

#[tokio::test]
async fn scenario_b_invalid_input_sends_nothing() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .respond_with(ResponseTemplate::new(200).set_body_json(bug_issue_body()))
        .expect(0)
        .mount(&server)
        .await;

    let state = submit(&client_for(&server), "not a url").await;
    assert_eq!(state, UiState::Error("invalid repo url".to_owned()));

    let panel = RenderedPanel::build(&state, &ResolvedTheme::default());
    assert!(panel.issue.is_none());
    assert!(panel.loading.is_none());
    assert_eq!(panel.error.unwrap().text, "invalid repo url");
}

#[tokio::test]
async fn scenario_c_not_found_message_comes_from_body() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/"))
        .respond_with(ResponseTemplate::new(404).set_body_json(json!({ "message": "not found" })))
        .expect(1)
        .mount(&server)
        .await;

    let state = submit(&client_for(&server), "octocat/Hello-World").await;
    assert_eq!(state.error_message(), Some("not found"));

    let visibility = state.visibility();
    assert!(visibility.error);
    assert!(!visibility.loading);
    assert!(!visibility.issue);
}

#[tokio::test]
async fn scenario_d_malformed_body() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/"))
        .respond_with(ResponseTemplate::new(200).set_body_string("not json"))
        .expect(1)
        .mount(&server)
        .await;

    let state = submit(&client_for(&server), HELLO_WORLD_URL).await;
    assert_eq!(state.error_message(), Some(MALFORMED_RESPONSE_MESSAGE));
    assert!(!state.visibility().issue);
}

#[tokio::test]
async fn repeating_a_submission_gives_the_same_state() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/"))
        .respond_with(ResponseTemplate::new(200).set_body_json(bug_issue_body()))
        .expect(2)
        .mount(&server)
        .await;

    let client = client_for(&server);
    let first = submit(&client, HELLO_WORLD_URL).await;
    let second = submit(&client, HELLO_WORLD_URL).await;
    assert!(matches!(first, UiState::Showing(_)));
    assert_eq!(first, second);

    let theme = ResolvedTheme::default();
    assert_eq!(
        RenderedPanel::build(&first, &theme),
        RenderedPanel::build(&second, &theme)
    );
}

#[tokio::test]
async fn non_json_error_body_falls_back_to_status() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .respond_with(ResponseTemplate::new(500).set_body_string("<html>oops</html>"))
        .mount(&server)
        .await;

    let repo = parse_repo_input("octocat/Hello-World").unwrap();
    let err = client_for(&server).fetch_random_issue(&repo).await.unwrap_err();
    assert_eq!(
        err,
        FetchError::Server {
            status: 500,
            message: "server error (HTTP 500)".to_owned(),
        }
    );
}

#[tokio::test]
async fn request_carries_user_agent() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(header(
            "user-agent",
            concat!("issuemyst/", env!("CARGO_PKG_VERSION")),
        ))
        .respond_with(ResponseTemplate::new(200).set_body_json(bug_issue_body()))
        .expect(1)
        .mount(&server)
        .await;

    let repo = parse_repo_input("octocat/Hello-World").unwrap();
    let issue = client_for(&server).fetch_random_issue(&repo).await.unwrap();
    assert_eq!(issue.number, 42);
}

#[tokio::test]
async fn unreachable_server_is_a_transport_error() {
    // Reserve a free port, then release it so connections are refused.
    let port = {
        let listener = std::net::TcpListener::bind("127.0.0.1:0").unwrap();
        listener.local_addr().unwrap().port()
    };
    let client = BackendClient::new(&ServerConfig {
        url: format!("http://127.0.0.1:{port}"),
        timeout_secs: Some(2),
    })
    .unwrap();

    let repo = parse_repo_input("octocat/Hello-World").unwrap();
    let err = client.fetch_random_issue(&repo).await.unwrap_err();
    assert!(matches!(err, FetchError::Transport(_)));
    assert_eq!(err.to_string(), TRANSPORT_MESSAGE);
}

#[tokio::test(flavor = "multi_thread")]
async fn http_engine_answers_pick() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(body_json(json!({ "username": "octocat", "repo": "Hello-World" })))
        .respond_with(ResponseTemplate::new(200).set_body_json(bug_issue_body()))
        .expect(1)
        .mount(&server)
        .await;

    let handle = HttpEngine::new(client_for(&server)).start();
    let state = tokio::task::spawn_blocking(move || {
        issuemyst::pick::pick(&handle, "www.github.com/octocat/Hello-World/")
    })
    .await
    .unwrap();

    let issue = state.issue().expect("pick should end on an issue");
    assert_eq!(issue.number, 42);
    assert_eq!(issue.labels[0].color, "ff0000");
}
