use std::sync::Arc;

use aws_sdk_sesv2::Client as SesClient;
use tokio::sync::mpsc;

use crate::config::AppConfig;
use crate::models::PendingVerification;
use crate::services::{cms_service, email_service};

const PUBLISH_QUEUE_CAPACITY: usize = 64;

/// One verified submission waiting to be forwarded to the CMS and announced
/// to the submitter and the review team.
#[derive(Debug)]
pub struct PublishJob {
    pub identity: String,
    pub record: PendingVerification,
}

/// Spawns the background worker draining the publish queue. Publishing is
/// best-effort: the verification state is already recorded when a job is
/// enqueued, so failures here are logged for manual follow-up and never
/// surface to the submitter.
pub fn spawn(
    ses_client: SesClient,
    http_client: reqwest::Client,
    config: Arc<AppConfig>,
) -> mpsc::Sender<PublishJob> {
    let (tx, mut rx) = mpsc::channel::<PublishJob>(PUBLISH_QUEUE_CAPACITY);

    tokio::spawn(async move {
        while let Some(job) = rx.recv().await {
            publish(&ses_client, &http_client, &config, job).await;
        }
        tracing::info!("Publish queue closed, worker stopping");
    });

    tx
}

async fn publish(
    ses_client: &SesClient,
    http_client: &reqwest::Client,
    config: &AppConfig,
    job: PublishJob,
) {
    let PublishJob { identity, record } = job;
    let submission_id = record.submission_id.clone();

    let cms_outcome =
        match cms_service::create_draft_article(http_client, &config.cms, &record.submission).await
        {
            Ok(article) => {
                tracing::info!(
                    "Submission {} queued for moderation as CMS article {}",
                    submission_id,
                    article.article_id
                );
                format!(
                    "Created as pending article {} ({})",
                    article.article_id, article.url
                )
            }
            Err(e) => {
                tracing::error!(
                    "Publish failed for submission {}: could not create CMS article: {}",
                    submission_id,
                    e
                );
                "CMS article creation failed; manual follow-up required".to_string()
            }
        };

    if let Err(e) =
        email_service::send_thank_you_email(ses_client, &config.email, &identity, &record.submission)
            .await
    {
        tracing::error!(
            "Publish failed for submission {}: thank-you email not sent: {}",
            submission_id,
            e
        );
    }

    if let Err(e) = email_service::send_reviewer_notification(
        ses_client,
        &config.email,
        &identity,
        &record,
        &cms_outcome,
    )
    .await
    {
        tracing::error!(
            "Publish failed for submission {}: reviewer notification not sent: {}",
            submission_id,
            e
        );
    }
}
