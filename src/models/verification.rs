use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::models::DraftSubmission;

/// The pending challenge for one submitter identity. Created at intake,
/// refreshed in place by resend, consumed by a successful verification.
#[derive(Debug, Clone, Serialize)]
pub struct PendingVerification {
    pub submission_id: String,
    pub code: String,
    pub issued_at: DateTime<Utc>,
    pub verified: bool,
    pub verified_at: Option<DateTime<Utc>>,
    pub submission: DraftSubmission,
}

impl PendingVerification {
    pub fn new(submission: DraftSubmission, code: String) -> Self {
        Self {
            submission_id: Uuid::new_v4().to_string(),
            code,
            issued_at: Utc::now(),
            verified: false,
            verified_at: None,
            submission,
        }
    }
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct VerifyEmailRequest {
    #[serde(default)]
    pub submission_id: String,
    #[serde(default)]
    pub verification_code: String,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ResendVerificationRequest {
    #[serde(default)]
    pub submission_id: String,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct SubmitResponse {
    pub success: bool,
    pub submission_id: String,
    pub email: String,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct VerificationResponse {
    pub success: bool,
    pub message: String,
    pub data: VerificationData,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct VerificationData {
    pub submission_id: String,
    pub email: String,
}
