use std::collections::HashMap;
use std::sync::{Arc, Mutex};

use chrono::{Duration, Utc};

use crate::error::{AppError, Result};
use crate::models::PendingVerification;

/// A code is accepted only while younger than this.
pub const CODE_EXPIRY_MINUTES: i64 = 15;

/// Housekeeping threshold. Strictly greater than the code expiry so a
/// record is never swept while still legitimately resendable.
pub const SWEEP_MAX_AGE_MINUTES: i64 = 20;

/// Process-local map of submitter identity (normalized email) to the one
/// outstanding verification record for that identity. Everything lives in
/// memory: a restart drops all pending submissions, which operators are
/// warned about at startup.
#[derive(Clone, Default)]
pub struct VerificationStore {
    records: Arc<Mutex<HashMap<String, PendingVerification>>>,
}

/// Submitter identities are keyed by normalized email.
pub fn normalize_identity(email: &str) -> String {
    email.trim().to_lowercase()
}

impl VerificationStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Unconditional overwrite: a resubmission invalidates any older
    /// unverified record for the same identity, draft included.
    pub fn put(&self, identity: &str, record: PendingVerification) {
        let mut records = self.lock();
        records.insert(identity.to_string(), record);
    }

    pub fn get(&self, identity: &str) -> Option<PendingVerification> {
        self.lock().get(identity).cloned()
    }

    /// Clients only hold the submission id after intake, so lookups scan
    /// the map. Fine at the record counts this store ever sees.
    pub fn find_by_submission_id(&self, id: &str) -> Option<(String, PendingVerification)> {
        self.lock()
            .iter()
            .find(|(_, record)| record.submission_id == id)
            .map(|(identity, record)| (identity.clone(), record.clone()))
    }

    pub fn remove(&self, identity: &str) -> Option<PendingVerification> {
        self.lock().remove(identity)
    }

    /// Drops every record older than `max_age`, returning how many went.
    pub fn sweep_expired(&self, max_age: Duration) -> usize {
        let now = Utc::now();
        let mut records = self.lock();
        let before = records.len();
        records.retain(|_, record| now - record.issued_at <= max_age);
        before - records.len()
    }

    pub fn len(&self) -> usize {
        self.lock().len()
    }

    pub fn is_empty(&self) -> bool {
        self.lock().is_empty()
    }

    /// The single verifying transition, done under one lock acquisition so
    /// a racing resend cannot interleave with it.
    ///
    /// Pending -> Verified exactly once; a failed guess leaves the record
    /// untouched, an expired record is actively deleted.
    pub fn verify(&self, submission_id: &str, candidate: &str) -> Result<(String, PendingVerification)> {
        let mut records = self.lock();

        let identity = records
            .iter()
            .find(|(_, record)| record.submission_id == submission_id)
            .map(|(identity, _)| identity.clone())
            .ok_or_else(|| {
                AppError::NotFound(
                    "Invalid submission ID or code has expired. The submission may have \
                     expired or the server was restarted. Please submit your blog again \
                     to get a new verification code."
                        .to_string(),
                )
            })?;

        let Some(record) = records.get(&identity) else {
            return Err(AppError::NotFound("Invalid submission ID".to_string()));
        };

        if record.verified {
            return Err(AppError::AlreadyVerified(
                "This submission has already been verified".to_string(),
            ));
        }

        let now = Utc::now();
        let expired = now - record.issued_at >= Duration::minutes(CODE_EXPIRY_MINUTES);
        let code_matches = record.code == candidate;

        if expired {
            records.remove(&identity);
            return Err(AppError::Expired(
                "Verification code has expired. Please request a new one.".to_string(),
            ));
        }

        if !code_matches {
            return Err(AppError::CodeMismatch(
                "Invalid verification code. Please check and try again.".to_string(),
            ));
        }

        let Some(record) = records.get_mut(&identity) else {
            return Err(AppError::NotFound("Invalid submission ID".to_string()));
        };
        record.verified = true;
        record.verified_at = Some(now);

        Ok((identity.clone(), record.clone()))
    }

    /// Resend: swap in a fresh code and restart the expiry clock. The old
    /// code dies immediately, the draft and submission id stay untouched.
    pub fn refresh_code(
        &self,
        submission_id: &str,
        new_code: String,
    ) -> Result<(String, PendingVerification)> {
        let mut records = self.lock();

        let (identity, record) = records
            .iter_mut()
            .find(|(_, record)| record.submission_id == submission_id)
            .ok_or_else(|| AppError::NotFound("Invalid submission ID".to_string()))?;

        if record.verified {
            return Err(AppError::AlreadyVerified(
                "This submission has already been verified".to_string(),
            ));
        }

        record.code = new_code;
        record.issued_at = Utc::now();

        Ok((identity.clone(), record.clone()))
    }

    fn lock(&self) -> std::sync::MutexGuard<'_, HashMap<String, PendingVerification>> {
        self.records
            .lock()
            .expect("verification store mutex poisoned")
    }
}
