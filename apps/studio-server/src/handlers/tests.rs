use std::collections::VecDeque;
use std::sync::{Arc, Mutex};

use actix_web::middleware::from_fn;
use actix_web::{App, http::StatusCode, test, web};
use async_trait::async_trait;
use serde_json::{Value, json};

use postcraft_core::domain::ApiKey;
use postcraft_core::ports::{
    GenerativeModel, ModelRequest, ModelResponse, ProviderError, ResponsePart,
};
use postcraft_core::services::GeneratorConfig;
use postcraft_infra::InMemoryKeyValueStore;

use super::{configure_routes, json_config};
use crate::middleware::request_id::{REQUEST_ID_HEADER, request_id};
use crate::state::AppState;

const DRAFT_JSON: &str = r#"{"text":"Five habits for a productive home office","hashtags":["produtividade","homeoffice"],"imagePrompt":"a cozy desk"}"#;

#[derive(Default)]
struct ScriptedModel {
    responses: Mutex<VecDeque<Result<ModelResponse, ProviderError>>>,
    calls: Mutex<usize>,
}

impl ScriptedModel {
    fn replying(responses: Vec<Result<ModelResponse, ProviderError>>) -> Arc<Self> {
        Arc::new(Self {
            responses: Mutex::new(responses.into()),
            calls: Mutex::new(0),
        })
    }

    fn calls(&self) -> usize {
        *self.calls.lock().unwrap()
    }
}

#[async_trait]
impl GenerativeModel for ScriptedModel {
    async fn generate(
        &self,
        _api_key: &ApiKey,
        _request: ModelRequest,
    ) -> Result<ModelResponse, ProviderError> {
        *self.calls.lock().unwrap() += 1;
        self.responses
            .lock()
            .unwrap()
            .pop_front()
            .unwrap_or_else(|| Err(ProviderError::Transport("no scripted response".into())))
    }
}

async fn state_with(model: Arc<ScriptedModel>, env_key: Option<&str>) -> AppState {
    AppState::from_parts(
        Arc::new(InMemoryKeyValueStore::new()),
        model,
        env_key.map(String::from),
        GeneratorConfig::default(),
        "memory",
    )
    .await
}

macro_rules! app {
    ($state:expr) => {
        test::init_service(
            App::new()
                .wrap(from_fn(request_id))
                .app_data(web::Data::new($state.clone()))
                .app_data(json_config(1024 * 1024))
                .configure(configure_routes),
        )
        .await
    };
}

fn save_request(content: &str) -> Value {
    json!({
        "platform": "Instagram",
        "content": content,
        "hashtags": ["one", "two"]
    })
}

#[actix_web::test]
async fn test_health_check() {
    let state = state_with(ScriptedModel::replying(vec![]), None).await;
    let app = app!(state);

    let req = test::TestRequest::get().uri("/api/health").to_request();
    let body: Value = test::call_and_read_body_json(&app, req).await;

    assert_eq!(body["status"], "ok");
    assert_eq!(body["storage"], "memory");
    assert_eq!(body["posts"], 0);
}

#[actix_web::test]
async fn test_responses_carry_request_id() {
    let state = state_with(ScriptedModel::replying(vec![]), None).await;
    let app = app!(state);

    let req = test::TestRequest::get()
        .uri("/api/posts/missing")
        .insert_header((REQUEST_ID_HEADER, "trace-42"))
        .to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), StatusCode::NOT_FOUND);
    assert_eq!(resp.headers().get(REQUEST_ID_HEADER).unwrap(), "trace-42");

    let req = test::TestRequest::get().uri("/api/health").to_request();
    let resp = test::call_service(&app, req).await;
    assert!(resp.headers().contains_key(REQUEST_ID_HEADER));
}

#[actix_web::test]
async fn test_generate_without_key_routes_to_settings() {
    let model = ScriptedModel::replying(vec![]);
    let state = state_with(model.clone(), None).await;
    let app = app!(state);

    let req = test::TestRequest::post()
        .uri("/api/generate")
        .set_json(json!({ "topic": "home office tips", "platform": "Instagram" }))
        .to_request();
    let resp = test::call_service(&app, req).await;

    assert_eq!(resp.status(), StatusCode::PRECONDITION_FAILED);
    let body: Value = test::read_body_json(resp).await;
    assert_eq!(body["title"], "API Key Not Configured");
    assert_eq!(model.calls(), 0);
}

#[actix_web::test]
async fn test_generate_draft() {
    let model = ScriptedModel::replying(vec![Ok(ModelResponse::from_text(DRAFT_JSON))]);
    let state = state_with(model.clone(), Some("env-key")).await;
    let app = app!(state);

    let req = test::TestRequest::post()
        .uri("/api/generate")
        .set_json(json!({
            "topic": "home office tips",
            "platform": "Instagram",
            "tone": "Professional",
            "includeEmoji": true
        }))
        .to_request();
    let body: Value = test::call_and_read_body_json(&app, req).await;

    assert_eq!(body["text"], "Five habits for a productive home office");
    assert_eq!(body["hashtags"], json!(["produtividade", "homeoffice"]));
    assert_eq!(body["imagePrompt"], "a cozy desk");
    assert!(body.get("imageBase64").is_none());
    assert_eq!(model.calls(), 1);
    assert!(!state.generation_gate.is_busy());
}

#[actix_web::test]
async fn test_generate_with_image() {
    let model = ScriptedModel::replying(vec![
        Ok(ModelResponse::from_text(DRAFT_JSON)),
        Ok(ModelResponse {
            parts: vec![ResponsePart::InlineData {
                mime_type: "image/png".into(),
                data: "AAAA".into(),
            }],
        }),
    ]);
    let state = state_with(model, Some("env-key")).await;
    let app = app!(state);

    let req = test::TestRequest::post()
        .uri("/api/generate")
        .set_json(json!({ "topic": "desk", "platform": "LinkedIn", "generateImage": true }))
        .to_request();
    let body: Value = test::call_and_read_body_json(&app, req).await;

    assert_eq!(body["imageBase64"], "data:image/png;base64,AAAA");
}

#[actix_web::test]
async fn test_generate_rejects_unknown_platform_and_blank_topic() {
    let model = ScriptedModel::replying(vec![]);
    let state = state_with(model.clone(), Some("env-key")).await;
    let app = app!(state);

    let req = test::TestRequest::post()
        .uri("/api/generate")
        .set_json(json!({ "topic": "x", "platform": "MySpace" }))
        .to_request();
    assert_eq!(test::call_service(&app, req).await.status(), StatusCode::BAD_REQUEST);

    let req = test::TestRequest::post()
        .uri("/api/generate")
        .set_json(json!({ "topic": "  ", "platform": "Facebook" }))
        .to_request();
    assert_eq!(test::call_service(&app, req).await.status(), StatusCode::BAD_REQUEST);

    assert_eq!(model.calls(), 0);
}

#[actix_web::test]
async fn test_generate_while_busy_is_conflict() {
    let model = ScriptedModel::replying(vec![]);
    let state = state_with(model.clone(), Some("env-key")).await;
    let app = app!(state);

    let _permit = state.generation_gate.try_acquire().unwrap();
    let req = test::TestRequest::post()
        .uri("/api/generate/image")
        .set_json(json!({ "prompt": "a cozy desk" }))
        .to_request();

    assert_eq!(test::call_service(&app, req).await.status(), StatusCode::CONFLICT);
    assert_eq!(model.calls(), 0);
}

#[actix_web::test]
async fn test_provider_failure_is_bad_gateway() {
    let model = ScriptedModel::replying(vec![Err(ProviderError::Api {
        status: 500,
        message: "internal".into(),
    })]);
    let state = state_with(model, Some("env-key")).await;
    let app = app!(state);

    let req = test::TestRequest::post()
        .uri("/api/generate/image")
        .set_json(json!({ "prompt": "a cozy desk" }))
        .to_request();

    assert_eq!(test::call_service(&app, req).await.status(), StatusCode::BAD_GATEWAY);
    assert!(!state.generation_gate.is_busy());
}

#[actix_web::test]
async fn test_post_lifecycle() {
    let state = state_with(ScriptedModel::replying(vec![]), None).await;
    let app = app!(state);

    let req = test::TestRequest::post()
        .uri("/api/posts")
        .set_json(save_request("first"))
        .to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), StatusCode::CREATED);
    let first: Value = test::read_body_json(resp).await;
    assert_eq!(first["status"], "draft");
    assert!(first["scheduledDate"].is_string());

    let req = test::TestRequest::post()
        .uri("/api/posts")
        .set_json(save_request("second"))
        .to_request();
    let second: Value = test::call_and_read_body_json(&app, req).await;

    let req = test::TestRequest::get().uri("/api/posts").to_request();
    let list: Value = test::call_and_read_body_json(&app, req).await;
    assert_eq!(list[0]["id"], second["id"]);
    assert_eq!(list[1]["id"], first["id"]);

    let id = first["id"].as_str().unwrap();
    let req = test::TestRequest::put()
        .uri(&format!("/api/posts/{id}/status"))
        .set_json(json!({ "status": "published" }))
        .to_request();
    assert_eq!(test::call_service(&app, req).await.status(), StatusCode::NO_CONTENT);

    let req = test::TestRequest::get()
        .uri(&format!("/api/posts/{id}"))
        .to_request();
    let updated: Value = test::call_and_read_body_json(&app, req).await;
    assert_eq!(updated["status"], "published");
    assert_eq!(updated["content"], first["content"]);
    assert_eq!(updated["createdAt"], first["createdAt"]);

    for _ in 0..2 {
        let req = test::TestRequest::delete()
            .uri(&format!("/api/posts/{id}"))
            .to_request();
        assert_eq!(test::call_service(&app, req).await.status(), StatusCode::NO_CONTENT);
    }

    let req = test::TestRequest::get().uri("/api/posts").to_request();
    let list: Value = test::call_and_read_body_json(&app, req).await;
    assert_eq!(list.as_array().unwrap().len(), 1);
}

#[actix_web::test]
async fn test_post_errors() {
    let state = state_with(ScriptedModel::replying(vec![]), None).await;
    let app = app!(state);

    let req = test::TestRequest::get().uri("/api/posts/missing").to_request();
    assert_eq!(test::call_service(&app, req).await.status(), StatusCode::NOT_FOUND);

    let req = test::TestRequest::put()
        .uri("/api/posts/missing/status")
        .set_json(json!({ "status": "archived" }))
        .to_request();
    assert_eq!(test::call_service(&app, req).await.status(), StatusCode::BAD_REQUEST);

    let req = test::TestRequest::put()
        .uri("/api/posts/missing/status")
        .set_json(json!({ "status": "scheduled" }))
        .to_request();
    assert_eq!(test::call_service(&app, req).await.status(), StatusCode::NO_CONTENT);

    let req = test::TestRequest::post()
        .uri("/api/posts")
        .set_json(save_request("   "))
        .to_request();
    assert_eq!(test::call_service(&app, req).await.status(), StatusCode::BAD_REQUEST);

    let req = test::TestRequest::post()
        .uri("/api/posts")
        .insert_header(("content-type", "application/json"))
        .set_payload("{not json")
        .to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), StatusCode::BAD_REQUEST);
    let body: Value = test::read_body_json(resp).await;
    assert_eq!(body["title"], "Bad Request");
}

#[actix_web::test]
async fn test_dashboard_counts_and_recent_drafts() {
    let state = state_with(ScriptedModel::replying(vec![]), None).await;
    let app = app!(state);

    for i in 0..5 {
        let req = test::TestRequest::post()
            .uri("/api/posts")
            .set_json(save_request(&format!("post {i}")))
            .to_request();
        test::call_service(&app, req).await;
    }
    let newest = state.posts.list().await[0].id.clone();
    state
        .posts
        .update_status(&newest, postcraft_core::domain::PostStatus::Scheduled)
        .await
        .unwrap();

    let req = test::TestRequest::get().uri("/api/dashboard").to_request();
    let body: Value = test::call_and_read_body_json(&app, req).await;

    assert_eq!(body["counts"]["total"], 5);
    assert_eq!(body["counts"]["drafts"], 4);
    assert_eq!(body["counts"]["scheduled"], 1);
    assert_eq!(body["recentDrafts"].as_array().unwrap().len(), 3);
    assert_eq!(body["recentDrafts"][0]["content"], "post 3");
}

#[actix_web::test]
async fn test_trends_fallbacks_never_fail() {
    let model = ScriptedModel::replying(vec![]);
    let state = state_with(model.clone(), None).await;
    let app = app!(state);

    let req = test::TestRequest::get().uri("/api/trends").to_request();
    let body: Value = test::call_and_read_body_json(&app, req).await;
    assert_eq!(body["generated"], false);
    assert_eq!(body["fallback"], "no_posts");

    let req = test::TestRequest::post()
        .uri("/api/posts")
        .set_json(save_request("coffee launch"))
        .to_request();
    test::call_service(&app, req).await;

    let req = test::TestRequest::get().uri("/api/trends").to_request();
    let body: Value = test::call_and_read_body_json(&app, req).await;
    assert_eq!(body["fallback"], "missing_credential");
    assert_eq!(model.calls(), 0);
}

#[actix_web::test]
async fn test_trends_generated() {
    let model = ScriptedModel::replying(vec![Ok(ModelResponse::from_text("- idea"))]);
    let state = state_with(model, Some("env-key")).await;
    let app = app!(state);

    let req = test::TestRequest::post()
        .uri("/api/posts")
        .set_json(save_request("coffee launch"))
        .to_request();
    test::call_service(&app, req).await;

    let req = test::TestRequest::get().uri("/api/trends").to_request();
    let body: Value = test::call_and_read_body_json(&app, req).await;
    assert_eq!(body["generated"], true);
    assert_eq!(body["text"], "- idea");
    assert!(body.get("fallback").is_none());
}

#[actix_web::test]
async fn test_settings_api_key_precedence() {
    let state = state_with(ScriptedModel::replying(vec![]), Some("env-key")).await;
    let app = app!(state);

    let req = test::TestRequest::get().uri("/api/settings").to_request();
    let body: Value = test::call_and_read_body_json(&app, req).await;
    assert_eq!(body["apiKeyConfigured"], true);
    assert_eq!(body["apiKeySource"], "environment");
    assert_eq!(body["textModel"], "gemini-2.5-flash");

    let req = test::TestRequest::put()
        .uri("/api/settings/api-key")
        .set_json(json!({ "apiKey": "local-key" }))
        .to_request();
    let body: Value = test::call_and_read_body_json(&app, req).await;
    assert_eq!(body["success"], true);
    assert_eq!(body["data"]["apiKeySource"], "local");

    let req = test::TestRequest::delete()
        .uri("/api/settings/api-key")
        .to_request();
    let body: Value = test::call_and_read_body_json(&app, req).await;
    assert_eq!(body["data"]["apiKeySource"], "environment");

    let req = test::TestRequest::put()
        .uri("/api/settings/api-key")
        .set_json(json!({ "apiKey": "  " }))
        .to_request();
    assert_eq!(test::call_service(&app, req).await.status(), StatusCode::BAD_REQUEST);
}

#[actix_web::test]
async fn test_analytics_is_static_sample() {
    let state = state_with(ScriptedModel::replying(vec![]), None).await;
    let app = app!(state);

    let req = test::TestRequest::get().uri("/api/analytics").to_request();
    let body: Value = test::call_and_read_body_json(&app, req).await;

    assert_eq!(body["sample"], true);
    assert_eq!(body["engagement"].as_array().unwrap().len(), 7);
    assert_eq!(body["audience"][1]["value"], 45);
}
