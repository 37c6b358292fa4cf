//! HTTP Routes
//!
//! API Endpoints:
//! - /api/v1/synthesize     POST  合成语音（返回 WAV）
//! - /api/v1/voices         GET   列出已加载的音色
//! - /api/ping              GET   存活检查
//! - /health                GET   就绪检查（模型不可用时 503）

use axum::{
    routing::{get, post},
    Router,
};
use std::sync::Arc;

use super::handlers;
use super::state::AppState;

/// 创建所有路由
pub fn create_routes() -> Router<Arc<AppState>> {
    Router::new()
        .nest("/api", api_routes())
        .route("/health", get(handlers::health))
}

/// API 路由
fn api_routes() -> Router<Arc<AppState>> {
    Router::new()
        .route("/ping", get(handlers::ping))
        .nest("/v1", v1_routes())
}

/// V1 路由
fn v1_routes() -> Router<Arc<AppState>> {
    Router::new()
        .route("/synthesize", post(handlers::synthesize))
        .route("/voices", get(handlers::list_voices))
}

#[cfg(test)]
mod tests {
    use super::*;
    use axum::{
        body::{to_bytes, Body},
        http::{header, Request, StatusCode},
    };
    use tower::util::ServiceExt;

    use crate::application::{
        AudioEncoderPort, EncodeError, EngineOptions, SampleFormat, SynthesisEngine,
        VoiceRegistryPort,
    };
    use crate::domain::generation::{GenerationOverrides, Waveform};
    use crate::domain::voice::VoiceProfile;
    use crate::infrastructure::adapters::{FakeModelConfig, FakeModelLoader, WavEncoder};
    use crate::infrastructure::voices::VoiceRegistry;

    struct BrokenEncoder;

    impl AudioEncoderPort for BrokenEncoder {
        fn encode(&self, _waveform: &Waveform) -> Result<Vec<u8>, EncodeError> {
            Err(EncodeError::EncodingError("disk on fire".to_string()))
        }

        fn content_type(&self) -> &'static str {
            "audio/wav"
        }
    }

    async fn app_with(
        config: FakeModelConfig,
        encoder: Arc<dyn AudioEncoderPort>,
    ) -> Router {
        let voices: Arc<dyn VoiceRegistryPort> = Arc::new(VoiceRegistry::from_profiles([
            VoiceProfile::new(
                "narrator",
                None,
                GenerationOverrides {
                    temperature: Some(0.9),
                    ..Default::default()
                },
            ),
        ]));
        let loader = FakeModelLoader::new(config);
        let engine = SynthesisEngine::initialize(
            &loader,
            &EngineOptions::default(),
            voices.clone(),
            encoder,
        )
        .await;

        create_routes().with_state(Arc::new(AppState::new(Arc::new(engine), voices)))
    }

    async fn app(config: FakeModelConfig) -> Router {
        app_with(config, Arc::new(WavEncoder::new(SampleFormat::Pcm16))).await
    }

    fn synthesize_request(body: &str) -> Request<Body> {
        Request::builder()
            .method("POST")
            .uri("/api/v1/synthesize")
            .header(header::CONTENT_TYPE, "application/json")
            .body(Body::from(body.to_string()))
            .unwrap()
    }

    fn get_request(uri: &str) -> Request<Body> {
        Request::builder().uri(uri).body(Body::empty()).unwrap()
    }

    async fn json_body(response: axum::response::Response) -> serde_json::Value {
        let bytes = to_bytes(response.into_body(), usize::MAX).await.unwrap();
        serde_json::from_slice(&bytes).unwrap()
    }

    #[tokio::test]
    async fn test_synthesize_returns_wav_with_headers() {
        let app = app(FakeModelConfig::default()).await;

        let response = app
            .oneshot(synthesize_request(r#"{"text": "Hello", "voice": "narrator"}"#))
            .await
            .unwrap();

        assert_eq!(response.status(), StatusCode::OK);
        let headers = response.headers();
        assert_eq!(headers[header::CONTENT_TYPE], "audio/wav");
        assert_eq!(headers["x-tts-sample-rate"], "24000");
        assert_eq!(headers["x-tts-channels"], "1");
        // 5 chars * 50ms
        assert_eq!(headers["x-tts-duration-ms"], "250");

        let bytes = to_bytes(response.into_body(), usize::MAX).await.unwrap();
        assert_eq!(&bytes[0..4], b"RIFF");
    }

    #[tokio::test]
    async fn test_empty_text_returns_no_content() {
        let app = app(FakeModelConfig::default()).await;

        let response = app
            .oneshot(synthesize_request(r#"{"text": ""}"#))
            .await
            .unwrap();

        assert_eq!(response.status(), StatusCode::NO_CONTENT);
        let bytes = to_bytes(response.into_body(), usize::MAX).await.unwrap();
        assert!(bytes.is_empty());
    }

    #[tokio::test]
    async fn test_unavailable_model_returns_503() {
        let app = app(FakeModelConfig {
            fail_load: true,
            ..Default::default()
        })
        .await;

        let response = app
            .clone()
            .oneshot(synthesize_request(r#"{"text": "Hello"}"#))
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::SERVICE_UNAVAILABLE);
        let body = json_body(response).await;
        assert_eq!(body["errno"], 503);
        assert!(body["data"].is_null());

        let response = app.oneshot(get_request("/health")).await.unwrap();
        assert_eq!(response.status(), StatusCode::SERVICE_UNAVAILABLE);
        let body = json_body(response).await;
        assert_eq!(body["state"], "unavailable");
    }

    #[tokio::test]
    async fn test_generation_failure_returns_500() {
        let app = app(FakeModelConfig {
            fail_generate: true,
            ..Default::default()
        })
        .await;

        let response = app
            .oneshot(synthesize_request(r#"{"text": "Hello"}"#))
            .await
            .unwrap();

        assert_eq!(response.status(), StatusCode::INTERNAL_SERVER_ERROR);
        let body = json_body(response).await;
        assert_eq!(body["errno"], 500);
    }

    #[tokio::test]
    async fn test_encoding_failure_returns_500() {
        let app = app_with(FakeModelConfig::default(), Arc::new(BrokenEncoder)).await;

        let response = app
            .oneshot(synthesize_request(r#"{"text": "Hello"}"#))
            .await
            .unwrap();

        assert_eq!(response.status(), StatusCode::INTERNAL_SERVER_ERROR);
    }

    #[tokio::test]
    async fn test_malformed_json_is_rejected() {
        let app = app(FakeModelConfig::default()).await;

        let response = app
            .oneshot(synthesize_request(r#"{"voice": "narrator"}"#))
            .await
            .unwrap();

        assert!(response.status().is_client_error());
    }

    #[tokio::test]
    async fn test_list_voices() {
        let app = app(FakeModelConfig::default()).await;

        let response = app.oneshot(get_request("/api/v1/voices")).await.unwrap();

        assert_eq!(response.status(), StatusCode::OK);
        let body = json_body(response).await;
        assert_eq!(body["errno"], 0);
        assert_eq!(body["data"]["voices"], serde_json::json!(["narrator"]));
    }

    #[tokio::test]
    async fn test_health_ready() {
        let app = app(FakeModelConfig::default()).await;

        let response = app.oneshot(get_request("/health")).await.unwrap();

        assert_eq!(response.status(), StatusCode::OK);
        let body = json_body(response).await;
        assert_eq!(body["status"], "ok");
        assert_eq!(body["state"], "ready");
        assert_eq!(body["device"], "cpu");
        assert_eq!(body["accelerator"], false);
        assert_eq!(body["voices_loaded"], 1);
    }

    #[tokio::test]
    async fn test_ping() {
        let app = app(FakeModelConfig::default()).await;

        let response = app.oneshot(get_request("/api/ping")).await.unwrap();

        assert_eq!(response.status(), StatusCode::OK);
        let body = json_body(response).await;
        assert_eq!(body["status"], "ok");
    }
}
