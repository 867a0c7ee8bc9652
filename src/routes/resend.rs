use axum::{extract::State, Json};

use crate::{
    error::{AppError, Result},
    models::{ResendVerificationRequest, VerificationData, VerificationResponse},
    services::email_service,
    utils::otp,
    AppState,
};

/// Reissues a fresh code for an existing pending record. The draft and the
/// submission id survive; only code and expiry clock restart, so the old
/// code is dead the moment this returns.
pub async fn resend_verification(
    State(state): State<AppState>,
    Json(payload): Json<ResendVerificationRequest>,
) -> Result<Json<VerificationResponse>> {
    if payload.submission_id.is_empty() {
        return Err(AppError::Validation(
            "Submission ID is required".to_string(),
        ));
    }

    let code = otp::generate_code();
    let (identity, record) = state
        .store
        .refresh_code(&payload.submission_id, code.clone())?;

    email_service::send_resend_email(
        &state.ses_client,
        &state.config.email,
        &identity,
        &record.submission.full_name,
        &code,
    )
    .await
    .map_err(|e| e.with_submission_id(&record.submission_id))?;

    tracing::info!(
        "Resent verification code to {} for submission {}",
        identity,
        record.submission_id
    );

    Ok(Json(VerificationResponse {
        success: true,
        message: "New verification code sent to your email".to_string(),
        data: VerificationData {
            submission_id: record.submission_id,
            email: identity,
        },
    }))
}
