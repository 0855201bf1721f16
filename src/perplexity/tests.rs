//! Tests for the vendor call against a mock chat-completions endpoint.

use super::*;
use crate::http::{create_blocking_client, create_client};
use mockito::Matcher;
use pretty_assertions::assert_eq;
use serde_json::json;

fn client_for(server: &mockito::ServerGuard) -> PerplexityClient {
    PerplexityClient::new(create_client().unwrap())
        .with_endpoint(&format!("{}/chat/completions", server.url()))
}

fn conversation() -> Vec<Message> {
    vec![Message::system("Be precise."), Message::user("Hi there")]
}

#[tokio::test]
async fn sends_both_auth_headers_and_disables_streaming() {
    let mut server = mockito::Server::new_async().await;

    let mock = server
        .mock("POST", "/chat/completions")
        .match_header("authorization", "Bearer pplx-test")
        .match_header("x-subscription-token", "pplx-test")
        .match_header("content-type", "application/json")
        .match_body(Matcher::Json(json!({
            "model": "sonar",
            "messages": [
                {"role": "system", "content": "Be precise."},
                {"role": "user", "content": "Hi there"}
            ],
            "stream": false
        })))
        .with_status(200)
        .with_body(json!({"choices": [{"message": {"content": "hello"}}]}).to_string())
        .expect(1)
        .create_async()
        .await;

    let answer = client_for(&server)
        .chat("pplx-test", "sonar", &conversation())
        .await
        .unwrap();

    mock.assert_async().await;
    assert_eq!(answer.answer, "hello");
}

#[tokio::test]
async fn returns_first_choice_with_citations_and_usage() {
    let mut server = mockito::Server::new_async().await;

    let body = json!({
        "choices": [
            {"message": {"content": "first"}},
            {"message": {"content": "second"}}
        ],
        "citations": ["https://a.example", "https://b.example"],
        "usage": {"prompt_tokens": 3, "completion_tokens": 5}
    });
    let mock = server
        .mock("POST", "/chat/completions")
        .with_status(200)
        .with_body(body.to_string())
        .create_async()
        .await;

    let answer = client_for(&server)
        .chat("k", "sonar", &conversation())
        .await
        .unwrap();

    mock.assert_async().await;
    assert_eq!(
        answer,
        ChatAnswer {
            answer: "first".to_string(),
            citations: Some(vec![
                "https://a.example".to_string(),
                "https://b.example".to_string()
            ]),
            usage: Some(json!({"prompt_tokens": 3, "completion_tokens": 5})),
        }
    );
}

#[tokio::test]
async fn non_200_surfaces_status_and_raw_body() {
    let mut server = mockito::Server::new_async().await;

    let mock = server
        .mock("POST", "/chat/completions")
        .with_status(401)
        .with_body("<html>401 Authorization Required</html>")
        .create_async()
        .await;

    let err = client_for(&server)
        .chat("bad", "sonar", &conversation())
        .await
        .unwrap_err();

    mock.assert_async().await;
    assert_eq!(
        err.to_string(),
        "api error 401: <html>401 Authorization Required</html>"
    );
}

#[tokio::test]
async fn empty_choices_keep_citations_and_usage() {
    let mut server = mockito::Server::new_async().await;

    let mock = server
        .mock("POST", "/chat/completions")
        .with_status(200)
        .with_body(
            json!({
                "choices": [],
                "citations": ["https://c.example"],
                "usage": {"total_tokens": 7}
            })
            .to_string(),
        )
        .create_async()
        .await;

    let err = client_for(&server)
        .chat("k", "sonar", &conversation())
        .await
        .unwrap_err();

    mock.assert_async().await;
    assert_eq!(err.to_string(), "empty response");
    let (citations, usage) = err.partial().unwrap();
    assert_eq!(citations, Some(&["https://c.example".to_string()][..]));
    assert_eq!(usage, Some(&json!({"total_tokens": 7})));
}

#[tokio::test]
async fn null_choices_are_an_empty_response_with_partial_data() {
    let mut server = mockito::Server::new_async().await;

    let mock = server
        .mock("POST", "/chat/completions")
        .with_status(200)
        .with_body(r#"{"choices":null,"citations":["c"],"usage":{"t":1}}"#)
        .create_async()
        .await;

    let err = client_for(&server)
        .chat("k", "sonar", &conversation())
        .await
        .unwrap_err();

    mock.assert_async().await;
    assert_eq!(err.to_string(), "empty response");
    let (citations, usage) = err.partial().unwrap();
    assert_eq!(citations, Some(&["c".to_string()][..]));
    assert_eq!(usage, Some(&json!({"t": 1})));
}

#[tokio::test]
async fn choice_without_message_answers_empty_string() {
    let mut server = mockito::Server::new_async().await;

    let mock = server
        .mock("POST", "/chat/completions")
        .with_status(200)
        .with_body(r#"{"choices":[{"message":{"content":null}}]}"#)
        .create_async()
        .await;

    let answer = client_for(&server)
        .chat("k", "sonar", &conversation())
        .await
        .unwrap();

    mock.assert_async().await;
    assert_eq!(answer.answer, "");
}

#[tokio::test]
async fn malformed_body_is_a_payload_error() {
    let mut server = mockito::Server::new_async().await;

    let mock = server
        .mock("POST", "/chat/completions")
        .with_status(200)
        .with_body("not json at all")
        .create_async()
        .await;

    let err = client_for(&server)
        .chat("k", "sonar", &conversation())
        .await
        .unwrap_err();

    mock.assert_async().await;
    assert!(matches!(err, PplxError::BadJson(_)));
    assert!(err.to_string().starts_with("bad api json:"));
}

#[tokio::test]
async fn unreachable_endpoint_is_a_transport_error() {
    let client = PerplexityClient::new(create_client().unwrap())
        .with_endpoint("http://127.0.0.1:1/chat/completions");

    let err = client.chat("k", "sonar", &conversation()).await.unwrap_err();

    assert!(matches!(err, PplxError::Request(_)));
    assert!(err.to_string().starts_with("request failed:"));
}

#[tokio::test]
async fn invalid_key_fails_before_any_request() {
    let mut server = mockito::Server::new_async().await;

    let mock = server
        .mock("POST", "/chat/completions")
        .expect(0)
        .create_async()
        .await;

    let err = client_for(&server)
        .chat("line\nbreak", "sonar", &conversation())
        .await
        .unwrap_err();

    mock.assert_async().await;
    assert!(matches!(err, PplxError::Request(_)));
}

#[test]
fn blocking_post_returns_raw_body_verbatim() {
    let mut server = mockito::Server::new();
    let raw = "{\"id\":\"abc\",  \"choices\":[{\"message\":{\"content\":\"x\"}}]}";

    let mock = server
        .mock("POST", "/chat/completions")
        .match_header("authorization", "Bearer pplx-cli")
        .match_header("x-subscription-token", "pplx-cli")
        .match_body(Matcher::PartialJson(json!({"stream": false, "model": "sonar"})))
        .with_status(200)
        .with_body(raw)
        .create();

    let http = create_blocking_client().unwrap();
    let body = post_blocking(
        &http,
        &format!("{}/chat/completions", server.url()),
        "pplx-cli",
        "sonar",
        &conversation(),
    )
    .unwrap();

    mock.assert();
    assert_eq!(body, raw);
}

#[test]
fn blocking_post_reports_non_200() {
    let mut server = mockito::Server::new();

    let mock = server
        .mock("POST", "/chat/completions")
        .with_status(402)
        .with_body("insufficient credits")
        .create();

    let http = create_blocking_client().unwrap();
    let err = post_blocking(
        &http,
        &format!("{}/chat/completions", server.url()),
        "k",
        "sonar",
        &conversation(),
    )
    .unwrap_err();

    mock.assert();
    match err {
        PplxError::Api { status, body } => {
            assert_eq!(status, 402);
            assert_eq!(body, "insufficient credits");
        }
        other => panic!("unexpected error: {other}"),
    }
}

#[test]
fn parse_response_treats_201_as_failure() {
    let err = parse_response(201, "{}").unwrap_err();
    assert_eq!(err.to_string(), "api error 201: {}");
}

#[test]
fn from_config_uses_configured_endpoint() {
    let api = crate::config::ApiConfig {
        endpoint: "http://localhost:4000/chat/completions".to_string(),
        ..Default::default()
    };
    let client = PerplexityClient::from_config(&api).unwrap();
    assert_eq!(client.endpoint(), "http://localhost:4000/chat/completions");
}
