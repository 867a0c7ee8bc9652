use axum::{extract::State, Json};

use crate::{
    error::Result,
    models::{DraftSubmission, PendingVerification, SubmitResponse},
    services::email_service,
    store,
    utils::otp,
    AppState,
};

/// Intake: validate the draft, store a pending record keyed by the
/// submitter's email, and deliver the challenge code. The stored draft is a
/// snapshot; a later resubmission for the same email replaces it wholesale.
pub async fn submit_blog(
    State(state): State<AppState>,
    Json(payload): Json<DraftSubmission>,
) -> Result<Json<SubmitResponse>> {
    payload.validate(state.config.verification.require_seo_fields)?;

    let identity = store::normalize_identity(&payload.email);
    let code = otp::generate_code();
    let full_name = payload.full_name.clone();

    let record = PendingVerification::new(payload, code.clone());
    let submission_id = record.submission_id.clone();

    state.store.put(&identity, record);

    // The record is already stored at this point: a delivery failure is
    // reported with the submission id so the caller can resend instead of
    // resubmitting the whole draft.
    email_service::send_verification_email(
        &state.ses_client,
        &state.config.email,
        &identity,
        &full_name,
        &code,
    )
    .await
    .map_err(|e| e.with_submission_id(&submission_id))?;

    tracing::info!(
        "Verification code sent to {} for submission {}",
        identity,
        submission_id
    );

    Ok(Json(SubmitResponse {
        success: true,
        submission_id,
        email: identity,
    }))
}
