//! Webhook HTTP integration tests
//!
//! Drives the composed router through `tower::ServiceExt::oneshot` with the
//! mock delivery gateway and mock LLM service, asserting on the HTTP
//! contract, the recorded outbound messages, and the conversation state.

use std::sync::Arc;
use std::time::Duration;

use axum::{
    body::Body,
    http::{Method, Request, StatusCode},
    Router,
};
use serde_json::{json, Value};
use tower::ServiceExt;

use paradise_chat::{
    catalog, ChatState, CompletionDelegate, ConversationStore, DispatchRouter, MenuNode,
};
use paradise_llm::{FailingLlmService, LlmService, MockLlmService};
use paradise_messenger::MockMessengerService;

const VERIFY_TOKEN: &str = "test_verify_token";

struct TestApp {
    router: Router,
    messenger: MockMessengerService,
    store: Arc<ConversationStore>,
}

impl TestApp {
    fn new(llm: Option<Arc<dyn LlmService>>) -> Self {
        let store = Arc::new(ConversationStore::new());
        let delegate =
            llm.map(|service| CompletionDelegate::new(service, Duration::from_secs(5)));
        let messenger = MockMessengerService::new();

        let state = ChatState {
            router: Arc::new(DispatchRouter::new(Arc::clone(&store), delegate)),
            messenger: Arc::new(messenger.clone()),
            verify_token: VERIFY_TOKEN.to_string(),
        };

        Self {
            router: paradise_chat::routes().with_state(state),
            messenger,
            store,
        }
    }

    async fn get(&self, uri: &str) -> axum::http::Response<Body> {
        let req = Request::builder()
            .method(Method::GET)
            .uri(uri)
            .body(Body::empty())
            .unwrap();
        self.router.clone().oneshot(req).await.unwrap()
    }

    async fn post_webhook(&self, body: Value) -> axum::http::Response<Body> {
        let req = Request::builder()
            .method(Method::POST)
            .uri("/webhook")
            .header("content-type", "application/json")
            .body(Body::from(serde_json::to_string(&body).unwrap()))
            .unwrap();
        self.router.clone().oneshot(req).await.unwrap()
    }
}

async fn body_string(response: axum::http::Response<Body>) -> String {
    let bytes = axum::body::to_bytes(response.into_body(), usize::MAX)
        .await
        .unwrap();
    String::from_utf8(bytes.to_vec()).unwrap()
}

fn message_body(sender: &str, text: &str) -> Value {
    json!({
        "object": "page",
        "entry": [{
            "messaging": [{
                "sender": { "id": sender },
                "message": { "text": text },
                "timestamp": 1000
            }]
        }]
    })
}

fn postback_body(sender: &str, payload: &str) -> Value {
    json!({
        "object": "page",
        "entry": [{
            "messaging": [{
                "sender": { "id": sender },
                "postback": { "payload": payload },
                "timestamp": 1000
            }]
        }]
    })
}

mod verification {
    use super::*;

    #[tokio::test]
    async fn test_handshake_returns_challenge() {
        let app = TestApp::new(None);

        let resp = app
            .get(&format!(
                "/webhook?hub.mode=subscribe&hub.verify_token={}&hub.challenge=challenge-123",
                VERIFY_TOKEN
            ))
            .await;

        assert_eq!(resp.status(), StatusCode::OK);
        assert_eq!(body_string(resp).await, "challenge-123");
    }

    #[tokio::test]
    async fn test_wrong_token_is_forbidden() {
        let app = TestApp::new(None);

        let resp = app
            .get("/webhook?hub.mode=subscribe&hub.verify_token=wrong&hub.challenge=x")
            .await;

        assert_eq!(resp.status(), StatusCode::FORBIDDEN);
    }

    #[tokio::test]
    async fn test_missing_params_is_bad_request() {
        let app = TestApp::new(None);

        let resp = app.get("/webhook?hub.mode=subscribe").await;
        assert_eq!(resp.status(), StatusCode::BAD_REQUEST);
    }
}

mod event_batches {
    use super::*;

    #[tokio::test]
    async fn test_wrong_object_type_is_not_found() {
        let app = TestApp::new(None);

        let resp = app
            .post_webhook(json!({ "object": "user", "entry": [] }))
            .await;

        assert_eq!(resp.status(), StatusCode::NOT_FOUND);
        assert!(app.messenger.sent_messages().is_empty());
    }

    #[tokio::test]
    async fn test_acknowledges_event_batch() {
        let app = TestApp::new(None);

        let resp = app.post_webhook(postback_body("U1", "MAIN_MENU")).await;

        assert_eq!(resp.status(), StatusCode::OK);
        let body: Value = serde_json::from_str(&body_string(resp).await).unwrap();
        assert_eq!(body["status"], "EVENT_RECEIVED");
    }

    #[tokio::test]
    async fn test_entry_without_messaging_is_tolerated() {
        let app = TestApp::new(None);

        let resp = app
            .post_webhook(json!({
                "object": "page",
                "entry": [{ "id": "page-1" }]
            }))
            .await;

        assert_eq!(resp.status(), StatusCode::OK);
        assert!(app.messenger.sent_messages().is_empty());
    }
}

mod conversation_flow {
    use super::*;

    #[tokio::test]
    async fn test_keyword_match_transitions_and_replies() {
        let app = TestApp::new(None);

        // Keyword priority: "tour" is checked before "book", so this lands
        // in tour packages.
        let resp = app
            .post_webhook(message_body("U1", "I want to book a tour"))
            .await;
        assert_eq!(resp.status(), StatusCode::OK);

        assert_eq!(app.store.state("U1").node, MenuNode::TourPackages);

        let sent = app.messenger.sent_messages();
        assert_eq!(sent.len(), 1);
        assert_eq!(sent[0].recipient_id, "U1");
        assert_eq!(
            sent[0].message.text.as_deref(),
            Some(catalog::TOUR_PACKAGES_PROMPT)
        );
        // No delegate configured and none needed: a keyword matched.
    }

    #[tokio::test]
    async fn test_reserve_keyword_reaches_book_tour() {
        let app = TestApp::new(None);

        app.post_webhook(message_body("U1", "I'd like to reserve a trip"))
            .await;

        assert_eq!(app.store.state("U1").node, MenuNode::BookTour);
        let sent = app.messenger.sent_messages();
        assert_eq!(sent[0].message.text.as_deref(), Some(catalog::BOOK_TOUR_PROMPT));
    }

    #[tokio::test]
    async fn test_unknown_postback_resets_to_main_menu() {
        let app = TestApp::new(None);

        app.post_webhook(postback_body("U1", "BOOK_TOUR")).await;
        assert_eq!(app.store.state("U1").node, MenuNode::BookTour);

        app.post_webhook(postback_body("U1", "XYZ_UNKNOWN")).await;
        assert_eq!(app.store.state("U1").node, MenuNode::MainMenu);

        let sent = app.messenger.sent_messages();
        assert_eq!(
            sent.last().unwrap().message.text.as_deref(),
            Some(catalog::WELCOME_TEXT)
        );
    }

    #[tokio::test]
    async fn test_delegate_failure_sends_apology() {
        let app = TestApp::new(Some(Arc::new(FailingLlmService::new())));

        app.post_webhook(message_body("U1", "kumusta")).await;

        assert_eq!(app.store.state("U1").node, MenuNode::MainMenu);
        let sent = app.messenger.sent_messages();
        assert_eq!(sent[0].message.text.as_deref(), Some(catalog::APOLOGY_TEXT));
        let quick_replies = sent[0].message.quick_replies.as_ref().unwrap();
        assert_eq!(quick_replies.len(), 3);
    }

    #[tokio::test]
    async fn test_delegate_reply_for_free_text() {
        let app = TestApp::new(Some(Arc::new(MockLlmService::new())));

        app.post_webhook(message_body("U1", "ano ang magandang beach?"))
            .await;

        let sent = app.messenger.sent_messages();
        assert!(sent[0]
            .message
            .text
            .as_deref()
            .unwrap()
            .contains("ano ang magandang beach?"));
        assert_eq!(app.store.state("U1").node, MenuNode::MainMenu);
    }

    #[tokio::test]
    async fn test_transcript_grows_two_per_turn() {
        let app = TestApp::new(None);

        app.post_webhook(message_body("U1", "hello")).await;
        assert_eq!(app.store.state("U1").transcript.len(), 2);

        app.post_webhook(postback_body("U1", "CONTACT_US")).await;
        assert_eq!(app.store.state("U1").transcript.len(), 4);
    }

    #[tokio::test]
    async fn test_delivery_failure_does_not_roll_back_state() {
        let app = TestApp::new(None);
        app.messenger.set_failing(true);

        let resp = app
            .post_webhook(message_body("U1", "show me packages"))
            .await;

        // Batch still acknowledged; state advanced despite failed delivery.
        assert_eq!(resp.status(), StatusCode::OK);
        assert_eq!(app.store.state("U1").node, MenuNode::TourPackages);
        assert_eq!(app.store.state("U1").transcript.len(), 2);
    }

    #[tokio::test]
    async fn test_batch_with_multiple_users() {
        let app = TestApp::new(None);

        let resp = app
            .post_webhook(json!({
                "object": "page",
                "entry": [
                    { "messaging": [{
                        "sender": { "id": "U1" },
                        "message": { "text": "tour please" }
                    }]},
                    { "messaging": [{
                        "sender": { "id": "U2" },
                        "postback": { "payload": "CONTACT_US" }
                    }]}
                ]
            }))
            .await;

        assert_eq!(resp.status(), StatusCode::OK);
        assert_eq!(app.store.state("U1").node, MenuNode::TourPackages);
        assert_eq!(app.store.state("U2").node, MenuNode::MainMenu);

        let sent = app.messenger.sent_messages();
        assert_eq!(sent.len(), 2);
        assert_eq!(sent[0].recipient_id, "U1");
        assert_eq!(sent[1].recipient_id, "U2");
        assert_eq!(
            sent[1].message.text.as_deref(),
            Some(catalog::CONTACT_US_PROMPT)
        );
    }

    #[tokio::test]
    async fn test_palawan_postback_sends_card_carousel() {
        let app = TestApp::new(None);

        app.post_webhook(postback_body("U1", "PALAWAN_TOURS")).await;

        let sent = app.messenger.sent_messages();
        let attachment = sent[0].message.attachment.as_ref().unwrap();
        assert_eq!(attachment.payload.template_type, "generic");
        assert_eq!(attachment.payload.elements.len(), 2);
    }
}

mod app_composition {
    use super::*;
    use paradise_common::Config;

    fn test_config() -> Config {
        Config {
            verify_token: VERIFY_TOKEN.to_string(),
            page_access_token: "test-page-token".to_string(),
            graph_api_base_url: Some("http://localhost:1".to_string()),
            llm_provider: "mock".to_string(),
            deepseek_api_key: None,
            deepseek_base_url: None,
            llm_timeout_secs: 5,
            log_level: "info".to_string(),
            rust_log: "paradise=debug".to_string(),
            port: 0,
        }
    }

    #[tokio::test]
    async fn test_health_check() {
        let app = paradise_app::create_app(test_config()).unwrap();

        let req = Request::builder()
            .uri("/health")
            .body(Body::empty())
            .unwrap();
        let resp = app.oneshot(req).await.unwrap();

        assert_eq!(resp.status(), StatusCode::OK);
        assert_eq!(body_string(resp).await, "OK");
    }

    #[tokio::test]
    async fn test_root_status_endpoint() {
        let app = paradise_app::create_app(test_config()).unwrap();

        let req = Request::builder().uri("/").body(Body::empty()).unwrap();
        let resp = app.oneshot(req).await.unwrap();

        assert_eq!(resp.status(), StatusCode::OK);
        let body: Value = serde_json::from_str(&body_string(resp).await).unwrap();
        assert_eq!(body["status"], "ok");
        assert_eq!(body["message"], "Webhook server is running");
    }

    #[tokio::test]
    async fn test_composed_app_verifies_webhook() {
        let app = paradise_app::create_app(test_config()).unwrap();

        let req = Request::builder()
            .uri(format!(
                "/webhook?hub.mode=subscribe&hub.verify_token={}&hub.challenge=abc",
                VERIFY_TOKEN
            ))
            .body(Body::empty())
            .unwrap();
        let resp = app.oneshot(req).await.unwrap();

        assert_eq!(resp.status(), StatusCode::OK);
        assert_eq!(body_string(resp).await, "abc");
    }
}
