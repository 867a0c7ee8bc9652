mod health;
mod resend;
mod submit;
mod verify;

use axum::{
    routing::{get, post},
    Router,
};

use crate::AppState;

pub fn create_router() -> Router<AppState> {
    Router::new()
        .route("/health", get(health::health_check))
        .route("/health/ready", get(health::readiness_check))
        .route("/api/blog-submissions/submit", post(submit::submit_blog))
        .route(
            "/api/blog-submissions/verify-email",
            post(verify::verify_email),
        )
        .route(
            "/api/blog-submissions/resend-verification",
            post(resend::resend_verification),
        )
}
