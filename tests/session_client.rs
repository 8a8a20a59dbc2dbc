//! SessionTokenClient against a mock provider endpoint.

use avatar_chef::persona::Persona;
use avatar_chef::recipe::RecipeBook;
use avatar_chef::session::{SessionInitiator, SessionParams, SessionTokenClient};
use avatar_chef::Error;
use mockito::Matcher;
use std::sync::Arc;

const PATH: &str = "/v1/auth/session-token";

fn client(server: &mockito::ServerGuard) -> SessionTokenClient {
    SessionTokenClient::builder()
        .api_key("sk-test-123")
        .endpoint(format!("{}{}", server.url(), PATH))
        .build()
        .expect("client builds")
}

#[tokio::test]
async fn test_sends_bearer_and_persona_config() {
    let mut server = mockito::Server::new_async().await;
    let mock = server
        .mock("POST", PATH)
        .match_header("authorization", "Bearer sk-test-123")
        .match_header("content-type", "application/json")
        .match_header("x-request-id", Matcher::Any)
        .match_body(Matcher::PartialJson(serde_json::json!({
            "personaConfig": {
                "name": "Alex",
                "avatarId": "30fa96d0-26c4-4e55-94a0-517025942e18",
                "systemPrompt": "Cook carefully."
            }
        })))
        .with_status(200)
        .with_header("content-type", "application/json")
        .with_body(r#"{"sessionToken":"sess-abc"}"#)
        .create_async()
        .await;

    let persona = Persona::default().configure("Cook carefully.");
    let token = client(&server).create_session_token(&persona).await.unwrap();
    assert_eq!(token.as_str(), "sess-abc");
    mock.assert_async().await;
}

#[tokio::test]
async fn test_non_success_maps_to_remote_error() {
    let mut server = mockito::Server::new_async().await;
    let _mock = server
        .mock("POST", PATH)
        .with_status(401)
        .with_body("invalid api key")
        .create_async()
        .await;

    let persona = Persona::default().configure("x");
    let err = client(&server).create_session_token(&persona).await.unwrap_err();
    match err {
        Error::Remote { status, message } => {
            assert_eq!(status, 401);
            assert!(message.contains("Unauthorized"));
            assert!(message.contains("invalid api key"));
        }
        other => panic!("unexpected error: {other:?}"),
    }
}

#[tokio::test]
async fn test_missing_token_field_is_serialization_error() {
    let mut server = mockito::Server::new_async().await;
    let _mock = server
        .mock("POST", PATH)
        .with_status(200)
        .with_body(r#"{"token":"wrong-field"}"#)
        .create_async()
        .await;

    let persona = Persona::default().configure("x");
    let err = client(&server).create_session_token(&persona).await.unwrap_err();
    assert!(matches!(err, Error::Serialization(_)));
}

#[tokio::test]
async fn test_unreachable_endpoint_is_transport_error() {
    let client = SessionTokenClient::builder()
        .api_key("k")
        .endpoint("http://127.0.0.1:1/token")
        .build()
        .unwrap();
    let err = client
        .create_session_token(&Persona::default().configure("x"))
        .await
        .unwrap_err();
    assert!(matches!(err, Error::Transport { .. }));
    assert!(err.is_retryable());
}

#[test]
fn test_builder_rejects_bad_endpoint() {
    let result = SessionTokenClient::builder()
        .api_key("k")
        .endpoint("::not a url::")
        .build();
    assert!(matches!(result, Err(Error::Configuration { .. })));
}

#[tokio::test]
async fn test_initiator_sends_compiled_prompt() {
    let mut server = mockito::Server::new_async().await;
    let mock = server
        .mock("POST", PATH)
        .match_body(Matcher::Regex("Servings: 2".to_string()))
        .with_status(200)
        .with_body(r#"{"sessionToken":"sess-carbonara"}"#)
        .create_async()
        .await;

    let path = std::path::Path::new(env!("CARGO_MANIFEST_DIR")).join("data/recipes.json");
    let book = Arc::new(RecipeBook::load(path).await.unwrap());
    let initiator = SessionInitiator::new(book, Arc::new(client(&server)));
    let token = initiator
        .initiate(&SessionParams::for_recipe("spaghetti-carbonara"))
        .await
        .unwrap();
    assert_eq!(token.as_str(), "sess-carbonara");
    mock.assert_async().await;
}
