pub mod health;
pub mod index;

use axum::{
    routing::{get, post},
    Router,
};

use crate::generation::handlers as generation;
use crate::render::handlers as poster;
use crate::state::AppState;

pub fn build_router(state: AppState) -> Router {
    Router::new()
        .route("/", get(index::index_handler))
        .route("/health", get(health::health_handler))
        // Generation API
        .route("/api/v1/generate", post(generation::handle_generate))
        .route("/api/v1/generation", get(generation::handle_get_generation))
        // Poster API
        .route("/api/v1/poster", get(poster::handle_get_poster))
        .route(
            "/api/v1/poster/download",
            get(poster::handle_download_poster),
        )
        .with_state(state)
}

#[cfg(test)]
mod tests {
    use std::sync::Arc;

    use axum::body::{to_bytes, Body};
    use axum::http::{header, Request, StatusCode};
    use serde_json::{json, Value};
    use tower::ServiceExt;

    use super::*;
    use crate::layout::PosterFonts;
    use crate::render::poster::{POSTER_HEIGHT, POSTER_WIDTH};
    use crate::render::PosterComposer;
    use crate::testing::{BlockFace, ScriptedBackend};

    const SCENARIO_A: &str = "HISTORICKY_TITUL: Mistr cechu\nPOPIS_HISTORICKY: Popis.\nPROMPT_OBRAZEK: a man painting\nPROMPT_ERB: a shield";

    fn app_state(backend: ScriptedBackend) -> AppState {
        let fonts = PosterFonts::new(Arc::new(BlockFace), Arc::new(BlockFace));
        AppState::new(Arc::new(backend), PosterComposer::new(fonts))
    }

    fn form(profession: &str) -> Value {
        json!({"profession": profession, "activities": "Maluji obrazy", "gender": "man"})
    }

    async fn post_json(app: Router, uri: &str, body: Value) -> (StatusCode, Value) {
        let request = Request::builder()
            .method("POST")
            .uri(uri)
            .header(header::CONTENT_TYPE, "application/json")
            .body(Body::from(body.to_string()))
            .unwrap();
        let response = app.oneshot(request).await.unwrap();
        let status = response.status();
        let bytes = to_bytes(response.into_body(), usize::MAX).await.unwrap();
        (status, serde_json::from_slice(&bytes).unwrap())
    }

    async fn get(app: Router, uri: &str) -> axum::response::Response {
        let request = Request::builder().uri(uri).body(Body::empty()).unwrap();
        app.oneshot(request).await.unwrap()
    }

    async fn get_json(app: Router, uri: &str) -> (StatusCode, Value) {
        let response = get(app, uri).await;
        let status = response.status();
        let bytes = to_bytes(response.into_body(), usize::MAX).await.unwrap();
        (status, serde_json::from_slice(&bytes).unwrap())
    }

    #[tokio::test]
    async fn test_health_reports_ok() {
        let app = build_router(app_state(ScriptedBackend::replying(SCENARIO_A)));
        let (status, body) = get_json(app, "/health").await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(body["status"], "ok");
        assert_eq!(body["service"], "kronikar-api");
    }

    #[tokio::test]
    async fn test_index_serves_form() {
        let app = build_router(app_state(ScriptedBackend::replying(SCENARIO_A)));
        let response = get(app, "/").await;
        assert_eq!(response.status(), StatusCode::OK);
        let bytes = to_bytes(response.into_body(), usize::MAX).await.unwrap();
        let html = String::from_utf8(bytes.to_vec()).unwrap();
        assert!(html.contains("/api/v1/generate"));
    }

    #[tokio::test]
    async fn test_generation_state_starts_idle() {
        let app = build_router(app_state(ScriptedBackend::replying(SCENARIO_A)));
        let (status, body) = get_json(app, "/api/v1/generation").await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(body["status"], "idle");
    }

    #[tokio::test]
    async fn test_generate_success_then_poster_download() {
        let app = build_router(app_state(ScriptedBackend::replying(SCENARIO_A)));

        let (status, body) = post_json(app.clone(), "/api/v1/generate", form("Malíř")).await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(body["title"], "Mistr cechu");
        assert_eq!(body["historical_description"], "Popis.");
        assert_eq!(body["image_prompt"], "a man painting");
        assert_eq!(body["coat_of_arms_prompt"], "a shield");

        let (_, state) = get_json(app.clone(), "/api/v1/generation").await;
        assert_eq!(state["status"], "success");
        assert_eq!(state["content"]["title"], "Mistr cechu");

        let (status, poster) = get_json(app.clone(), "/api/v1/poster").await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(poster["width"], POSTER_WIDTH);
        assert!(poster["poster_url"]
            .as_str()
            .unwrap()
            .starts_with("data:image/png;base64,"));

        let response = get(app, "/api/v1/poster/download").await;
        assert_eq!(response.status(), StatusCode::OK);
        assert_eq!(response.headers()[header::CONTENT_TYPE], "image/png");
        assert_eq!(
            response.headers()[header::CONTENT_DISPOSITION],
            "attachment; filename=\"kronikar-profesi-plakat.png\""
        );
        let png = to_bytes(response.into_body(), usize::MAX).await.unwrap();
        let image = image::load_from_memory(&png).unwrap();
        assert_eq!((image.width(), image.height()), (POSTER_WIDTH, POSTER_HEIGHT));
    }

    #[tokio::test]
    async fn test_generate_empty_field_is_rejected_without_touching_state() {
        let app = build_router(app_state(ScriptedBackend::replying(SCENARIO_A)));
        let (status, body) = post_json(app.clone(), "/api/v1/generate", form("   ")).await;
        assert_eq!(status, StatusCode::BAD_REQUEST);
        assert_eq!(
            body["error"]["message"],
            "Prosím, vyplňte všechna pole, Vaše ctihodnosti."
        );

        let (_, state) = get_json(app, "/api/v1/generation").await;
        assert_eq!(state["status"], "idle");
    }

    #[tokio::test]
    async fn test_generate_missing_coat_of_arms_marker_fails_whole_pipeline() {
        let backend = ScriptedBackend::replying(
            "HISTORICKY_TITUL: Mistr cechu\nPOPIS_HISTORICKY: Popis.\nPROMPT_OBRAZEK: a man painting",
        );
        let app = build_router(app_state(backend));

        let (status, body) = post_json(app.clone(), "/api/v1/generate", form("Malíř")).await;
        assert_eq!(status, StatusCode::BAD_GATEWAY);
        assert_eq!(body["error"]["code"], "MISSING_IMAGE_PROMPTS");

        let (_, state) = get_json(app, "/api/v1/generation").await;
        assert_eq!(state["status"], "failed");
        assert_eq!(
            state["message"],
            "Nastala chyba: Nepodařilo se vygenerovat prompty pro obrázky z textové odpovědi."
        );
    }

    #[tokio::test]
    async fn test_generate_zero_images_leaves_no_content() {
        let app = build_router(app_state(
            ScriptedBackend::replying(SCENARIO_A).without_images(),
        ));

        let (status, body) = post_json(app.clone(), "/api/v1/generate", form("Malíř")).await;
        assert_eq!(status, StatusCode::BAD_GATEWAY);
        assert!(body["error"]["message"]
            .as_str()
            .unwrap()
            .starts_with("Nastala chyba: "));

        let (_, state) = get_json(app.clone(), "/api/v1/generation").await;
        assert_eq!(state["status"], "failed");
        assert!(state.get("content").is_none());

        let response = get(app, "/api/v1/poster").await;
        assert_eq!(response.status(), StatusCode::NOT_FOUND);
    }

    #[tokio::test]
    async fn test_poster_before_generation_is_not_found() {
        let app = build_router(app_state(ScriptedBackend::replying(SCENARIO_A)));
        let response = get(app, "/api/v1/poster/download").await;
        assert_eq!(response.status(), StatusCode::NOT_FOUND);
    }
}
