use std::collections::VecDeque;
use std::sync::{Arc, Mutex};

use agenda_backend::AppState;
use agenda_common::services::{
    BoxFuture, BoxedError, CalendarService, CompletionRequest, LanguageModelService,
    ServiceFactory,
};
use agenda_common::BusyInterval;
use agenda_config::{AppConfig, GcalConfig, SchedulingConfig, ServerConfig};
use axum::{
    body::{to_bytes, Body},
    http::{header, Request, StatusCode},
    Router,
};
use chrono::{DateTime, Utc};
use serde_json::{json, Value};
use tower::ServiceExt;

struct FreeCalendar;

impl CalendarService for FreeCalendar {
    type Error = BoxedError;

    fn get_busy_times(
        &self,
        _calendar_id: &str,
        _start_time: DateTime<Utc>,
        _end_time: DateTime<Utc>,
        _time_zone: &str,
    ) -> BoxFuture<'_, Vec<BusyInterval>, Self::Error> {
        Box::pin(async move { Ok(Vec::new()) })
    }
}

struct ScriptedModel {
    replies: Mutex<VecDeque<Value>>,
}

impl LanguageModelService for ScriptedModel {
    type Error = BoxedError;

    fn generate_json(&self, _request: CompletionRequest) -> BoxFuture<'_, Value, Self::Error> {
        Box::pin(async move {
            self.replies
                .lock()
                .unwrap()
                .pop_front()
                .ok_or_else(|| BoxedError("no scripted reply".into()))
        })
    }
}

struct FakeServiceFactory {
    calendar: bool,
    replies: Vec<Value>,
}

impl ServiceFactory for FakeServiceFactory {
    fn calendar_service(&self) -> Option<Arc<dyn CalendarService<Error = BoxedError>>> {
        if self.calendar {
            Some(Arc::new(FreeCalendar))
        } else {
            None
        }
    }

    fn language_model(&self) -> Option<Arc<dyn LanguageModelService<Error = BoxedError>>> {
        Some(Arc::new(ScriptedModel {
            replies: Mutex::new(self.replies.clone().into()),
        }))
    }
}

fn create_config(scheduling: SchedulingConfig) -> Arc<AppConfig> {
    create_config_with_static_dir(scheduling, None)
}

fn create_config_with_static_dir(
    scheduling: SchedulingConfig,
    static_dir: Option<String>,
) -> Arc<AppConfig> {
    Arc::new(AppConfig {
        server: ServerConfig {
            host: "127.0.0.1".to_string(),
            port: 8086,
            static_dir,
        },
        use_gcal: true,
        use_llm: true,
        scheduling,
        booking: Default::default(),
        logging: Default::default(),
        gcal: Some(GcalConfig {
            key_path: None,
            calendar_id: Some("primary".to_string()),
        }),
        llm: None,
    })
}

fn create_router(calendar: bool, replies: Vec<Value>) -> Router {
    AppState::builder(create_config(SchedulingConfig::default()))
        .with_service_factory(Arc::new(FakeServiceFactory { calendar, replies }))
        .build()
        .unwrap()
        .router()
}

async fn send(router: Router, request: Request<Body>) -> (StatusCode, Value) {
    let response = router.oneshot(request).await.unwrap();
    let status = response.status();
    let body = to_bytes(response.into_body(), usize::MAX).await.unwrap();
    (status, serde_json::from_slice(&body).unwrap_or(Value::Null))
}

#[tokio::test]
async fn test_api_root_is_nested() {
    let response = create_router(true, Vec::new())
        .oneshot(Request::builder().uri("/api").body(Body::empty()).unwrap())
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::OK);
}

#[tokio::test]
async fn test_availability_served_under_api() {
    let (status, body) = send(
        create_router(true, Vec::new()),
        Request::builder()
            .uri("/api/availability")
            .body(Body::empty())
            .unwrap(),
    )
    .await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["time_zone"], "America/Sao_Paulo");
    assert_eq!(body["slots"].as_array().unwrap().len(), 3);
}

#[tokio::test]
async fn test_chat_flow_uses_shared_calendar() {
    let router = create_router(
        true,
        vec![
            json!({ "language": "en" }),
            json!({ "understood": true, "subject": "Check-up" }),
        ],
    );

    let (status, body) = send(
        router,
        Request::builder()
            .method("POST")
            .uri("/api/chat/messages")
            .header(header::CONTENT_TYPE, "application/json")
            .body(Body::from(json!({ "text": "When can I come in?" }).to_string()))
            .unwrap(),
    )
    .await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["outcome"], "suggestions");
    assert_eq!(body["suggestions"].as_array().unwrap().len(), 3);
}

#[tokio::test]
async fn test_chat_disabled_without_calendar() {
    let router = create_router(false, vec![json!({ "language": "en" })]);

    let (status, body) = send(
        router,
        Request::builder()
            .method("POST")
            .uri("/api/chat/messages")
            .header(header::CONTENT_TYPE, "application/json")
            .body(Body::from(json!({ "text": "Hello" }).to_string()))
            .unwrap(),
    )
    .await;

    assert_eq!(status, StatusCode::SERVICE_UNAVAILABLE);
    assert_eq!(body["error"]["code"], 503);
}

#[tokio::test]
async fn test_paths_outside_api_are_not_found_without_static_dir() {
    let response = create_router(true, Vec::new())
        .oneshot(Request::builder().uri("/index.html").body(Body::empty()).unwrap())
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn test_configured_static_dir_is_served() {
    let dir = std::env::temp_dir().join(format!("agenda-static-{}", std::process::id()));
    std::fs::create_dir_all(&dir).unwrap();
    std::fs::write(dir.join("index.html"), "<h1>Agenda</h1>").unwrap();

    let config = create_config_with_static_dir(
        SchedulingConfig::default(),
        Some(dir.to_string_lossy().into_owned()),
    );
    let router = AppState::builder(config)
        .with_service_factory(Arc::new(FakeServiceFactory {
            calendar: true,
            replies: Vec::new(),
        }))
        .build()
        .unwrap()
        .router();

    let response = router
        .clone()
        .oneshot(Request::builder().uri("/index.html").body(Body::empty()).unwrap())
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::OK);
    let body = to_bytes(response.into_body(), usize::MAX).await.unwrap();
    assert_eq!(&body[..], b"<h1>Agenda</h1>");

    // API routes still take precedence over the fallback
    let response = router
        .oneshot(Request::builder().uri("/api").body(Body::empty()).unwrap())
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::OK);

    std::fs::remove_dir_all(&dir).unwrap();
}

#[test]
fn test_invalid_scheduling_section_fails_build() {
    let scheduling = SchedulingConfig {
        provider_time_zone: "Mars/Olympus_Mons".to_string(),
        ..Default::default()
    };

    let result = AppState::builder(create_config(scheduling))
        .with_service_factory(Arc::new(FakeServiceFactory {
            calendar: true,
            replies: Vec::new(),
        }))
        .build();

    let err = result.err().unwrap();
    assert!(err.to_string().contains("Mars/Olympus_Mons"));
}

#[test]
fn test_builder_requires_service_factory() {
    assert!(AppState::builder(create_config(SchedulingConfig::default()))
        .build()
        .is_err());
}
