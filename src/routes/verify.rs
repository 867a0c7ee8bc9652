use axum::{extract::State, Json};

use crate::{
    error::{AppError, Result},
    models::{VerificationData, VerificationResponse, VerifyEmailRequest},
    services::publisher::PublishJob,
    AppState,
};

/// The single Pending -> Verified transition. On success the submission is
/// handed to the publish queue; whatever happens there, verification stands
/// and the caller sees success.
pub async fn verify_email(
    State(state): State<AppState>,
    Json(payload): Json<VerifyEmailRequest>,
) -> Result<Json<VerificationResponse>> {
    if payload.submission_id.is_empty() || payload.verification_code.is_empty() {
        return Err(AppError::Validation(
            "Submission ID and verification code are required".to_string(),
        ));
    }

    let (identity, record) = state
        .store
        .verify(&payload.submission_id, &payload.verification_code)?;

    let submission_id = record.submission_id.clone();

    if let Err(e) = state.publisher.try_send(PublishJob {
        identity: identity.clone(),
        record,
    }) {
        tracing::error!(
            "Could not enqueue publish job for submission {}: {}",
            submission_id,
            e
        );
    }

    tracing::info!("Email verified for {} (submission {})", identity, submission_id);

    Ok(Json(VerificationResponse {
        success: true,
        message: "Email verified successfully".to_string(),
        data: VerificationData {
            submission_id,
            email: identity,
        },
    }))
}
