use axum::{
    Json, Router,
    routing::{get, post},
};
use tower_http::cors::CorsLayer;
use tower_http::trace::TraceLayer;

use testify_types::api::StatusResponse;

use crate::state::AppState;
use crate::{media, study, testimonies, token, users, webhook};

pub fn router(state: AppState) -> Router {
    Router::new()
        .route("/health", get(health))
        // Testimonies
        .route("/testimony", get(testimonies::list_testimonies))
        .route("/testimony/create", post(testimonies::create_testimony))
        .route("/testimony/like", post(testimonies::toggle_like))
        .route("/testimony/comment", post(testimonies::add_comment))
        // Users
        .route("/users/{user_id}", get(users::get_user))
        // Study
        .route("/{domain}/progress", get(study::get_progress))
        .route("/{domain}/lessons", get(study::list_lessons))
        .route("/{domain}/lessons/{lesson_id}", get(study::get_lesson))
        .route("/{domain}/lessons/{lesson_id}/check", post(study::check_answers))
        // Proxies
        .route("/token/{address}", get(token::get_token))
        .route("/generate-image", post(media::generate_image))
        .route("/tts", post(media::text_to_speech))
        // Platform
        .route(
            "/webhook",
            get(webhook::webhook_status).post(webhook::receive_webhook),
        )
        .layer(CorsLayer::permissive())
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}

async fn health() -> Json<StatusResponse> {
    Json(StatusResponse { status: "ok" })
}
