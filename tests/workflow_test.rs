use chrono::{Duration, Utc};

use techy_blog_back::error::AppError;
use techy_blog_back::models::{DraftSubmission, PendingVerification};
use techy_blog_back::store::{normalize_identity, VerificationStore, CODE_EXPIRY_MINUTES};
use techy_blog_back::utils::otp;

fn draft(email: &str, title: &str) -> DraftSubmission {
    DraftSubmission {
        full_name: "Grace Hopper".to_string(),
        email: email.to_string(),
        mobile_number: "+1 555 0199".to_string(),
        title: title.to_string(),
        description: "Compilers, briefly".to_string(),
        content: "First line\nSecond line".to_string(),
        categories: vec!["Technology".to_string()],
        tags: vec!["compilers".to_string()],
        meta_title: None,
        meta_description: None,
        image_link: None,
    }
}

/// Mirrors what the submit handler does short of sending the email.
fn intake(store: &VerificationStore, submission: DraftSubmission) -> (String, String, String) {
    submission.validate(false).expect("valid draft");
    let identity = normalize_identity(&submission.email);
    let code = otp::generate_code();
    let record = PendingVerification::new(submission, code.clone());
    let submission_id = record.submission_id.clone();
    store.put(&identity, record);
    (identity, submission_id, code)
}

#[test]
fn submit_resend_verify_scenario() {
    let store = VerificationStore::new();

    let (identity, s1, c1) = intake(&store, draft("a@x.com", "T"));
    assert_eq!(identity, "a@x.com");

    // Resend: new code, same submission id, old code dead.
    let c2 = if c1 == "111111" { "222222" } else { "111111" }.to_string();
    let (_, refreshed) = store.refresh_code(&s1, c2.clone()).expect("resend");
    assert_eq!(refreshed.submission_id, s1);

    match store.verify(&s1, &c1) {
        Err(AppError::CodeMismatch(_)) => {}
        other => panic!("stale code must mismatch, got {:?}", other.map(|_| ())),
    }

    let (verified_identity, verified) = store.verify(&s1, &c2).expect("fresh code verifies");
    assert_eq!(verified_identity, "a@x.com");
    assert!(verified.verified);

    // Single-use: the same code cannot verify twice.
    assert!(matches!(
        store.verify(&s1, &c2),
        Err(AppError::AlreadyVerified(_))
    ));
}

#[test]
fn unknown_submission_id_is_rejected() {
    let store = VerificationStore::new();
    assert!(matches!(
        store.verify("unknown-id", "000000"),
        Err(AppError::NotFound(_))
    ));
}

#[test]
fn resubmission_discards_the_earlier_draft() {
    let store = VerificationStore::new();

    let (_, first_id, first_code) = intake(&store, draft("a@x.com", "First draft"));
    let (_, second_id, _) = intake(&store, draft("A@X.com ", "Second draft"));

    // Same identity after normalization, so only one record remains.
    assert_eq!(store.len(), 1);
    assert!(matches!(
        store.verify(&first_id, &first_code),
        Err(AppError::NotFound(_))
    ));

    let (_, record) = store.find_by_submission_id(&second_id).expect("current record");
    assert_eq!(record.submission.title, "Second draft");
}

#[test]
fn expired_submission_is_deleted_on_verify() {
    let store = VerificationStore::new();

    let (identity, submission_id, code) = intake(&store, draft("late@x.com", "T"));

    let mut record = store.get(&identity).expect("stored");
    record.issued_at = Utc::now() - Duration::minutes(CODE_EXPIRY_MINUTES) - Duration::seconds(1);
    store.put(&identity, record);

    assert!(matches!(
        store.verify(&submission_id, &code),
        Err(AppError::Expired(_))
    ));
    assert!(store.get(&identity).is_none());
}

#[test]
fn resend_does_not_touch_the_draft_snapshot() {
    let store = VerificationStore::new();

    let (_, submission_id, _) = intake(&store, draft("a@x.com", "Immutable draft"));

    let (_, refreshed) = store
        .refresh_code(&submission_id, "123456".to_string())
        .expect("resend");
    assert_eq!(refreshed.submission.title, "Immutable draft");
    assert_eq!(refreshed.submission.content, "First line\nSecond line");
}
