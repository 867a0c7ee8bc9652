use aws_sdk_sesv2::Client as SesClient;

use crate::config::EmailConfig;
use crate::error::{AppError, Result};
use crate::models::{DraftSubmission, PendingVerification};

pub async fn send_email(
    ses_client: &SesClient,
    email: &EmailConfig,
    recipients: &[String],
    subject: &str,
    html: String,
) -> Result<()> {
    let mut destination = aws_sdk_sesv2::types::Destination::builder();
    for recipient in recipients {
        destination = destination.to_addresses(recipient);
    }
    let destination = destination.build();

    let subject = aws_sdk_sesv2::types::Content::builder()
        .data(subject)
        .charset("UTF-8")
        .build()
        .map_err(|e| AppError::InternalError(format!("Failed to build subject: {}", e)))?;

    let html_body = aws_sdk_sesv2::types::Content::builder()
        .data(html)
        .charset("UTF-8")
        .build()
        .map_err(|e| AppError::InternalError(format!("Failed to build HTML body: {}", e)))?;

    let body = aws_sdk_sesv2::types::Body::builder().html(html_body).build();

    let message = aws_sdk_sesv2::types::Message::builder()
        .subject(subject)
        .body(body)
        .build();

    let content = aws_sdk_sesv2::types::EmailContent::builder()
        .simple(message)
        .build();

    let sender = format!("{} <{}>", email.sender_name, email.sender_address);

    ses_client
        .send_email()
        .from_email_address(sender)
        .destination(destination)
        .content(content)
        .send()
        .await
        .map_err(|e| {
            tracing::error!("Failed to send email: {:?}", e);
            AppError::Delivery {
                message: "Failed to send verification email".to_string(),
                submission_id: None,
            }
        })?;

    Ok(())
}

pub async fn send_verification_email(
    ses_client: &SesClient,
    email: &EmailConfig,
    recipient: &str,
    full_name: &str,
    code: &str,
) -> Result<()> {
    let html = otp_body(full_name, code);
    send_email(
        ses_client,
        email,
        &[recipient.to_string()],
        "Verify Your Email - Techy Blog Submission",
        html,
    )
    .await
}

pub async fn send_resend_email(
    ses_client: &SesClient,
    email: &EmailConfig,
    recipient: &str,
    full_name: &str,
    code: &str,
) -> Result<()> {
    let html = otp_body(full_name, code);
    send_email(
        ses_client,
        email,
        &[recipient.to_string()],
        "New Verification Code - Techy Blog Submission",
        html,
    )
    .await
}

pub async fn send_thank_you_email(
    ses_client: &SesClient,
    email: &EmailConfig,
    recipient: &str,
    submission: &DraftSubmission,
) -> Result<()> {
    let html = format!(
        r#"<div style="font-family: Arial, sans-serif; max-width: 600px; margin: 0 auto;">
    <h2 style="color: #333;">Thank You for Your Submission!</h2>
    <p>Hi {},</p>
    <p>Your email has been verified successfully! We've received your blog submission and our team will review it shortly.</p>
    <div style="background-color: #f0f9ff; border-left: 4px solid #3b82f6; padding: 15px; margin: 20px 0;">
        <h3 style="color: #1e40af; margin-top: 0;">Your Blog Details:</h3>
        <p><strong>Title:</strong> {}</p>
        <p><strong>Description:</strong> {}</p>
        <p><strong>Categories:</strong> {}</p>
        <p><strong>Tags:</strong> {}</p>
    </div>
    <p>We'll notify you once your blog is published. This usually takes 24-48 hours.</p>
    <p>If you have any questions, feel free to reach out to us.</p>
    <hr style="border: none; border-top: 1px solid #eee; margin: 30px 0;">
    <p style="color: #999; font-size: 12px;">&mdash; Team Techy Blog</p>
</div>"#,
        submission.full_name,
        submission.title,
        submission.description,
        submission.categories.join(", "),
        submission.tags.join(", "),
    );

    send_email(
        ses_client,
        email,
        &[recipient.to_string()],
        "Thank You for Your Blog Submission - Techy Blog",
        html,
    )
    .await
}

/// Notifies the review team about a verified submission, including the full
/// draft and what happened on the CMS side.
pub async fn send_reviewer_notification(
    ses_client: &SesClient,
    email: &EmailConfig,
    identity: &str,
    record: &PendingVerification,
    cms_outcome: &str,
) -> Result<()> {
    let submission = &record.submission;
    let verified_at = record
        .verified_at
        .map(|t| t.to_rfc3339())
        .unwrap_or_default();

    let html = format!(
        r#"<div style="font-family: Arial, sans-serif; max-width: 600px; margin: 0 auto;">
    <h2 style="color: #333;">New Verified Blog Submission</h2>
    <div style="background-color: #d4edda; border: 1px solid #c3e6cb; border-radius: 5px; padding: 10px; margin: 10px 0;">
        <h4 style="color: #155724; margin: 0;">Email Verified</h4>
        <p style="color: #155724; margin: 5px 0 0 0; font-size: 14px;">Verified at: {}</p>
    </div>
    <h3>Personal Information</h3>
    <p><strong>Full Name:</strong> {}</p>
    <p><strong>Email:</strong> {}</p>
    <p><strong>Mobile Number:</strong> {}</p>
    <h3>Blog Details</h3>
    <p><strong>Title:</strong> {}</p>
    <p><strong>Description:</strong> {}</p>
    <p><strong>Categories:</strong> {}</p>
    <p><strong>Tags:</strong> {}</p>
    <h3>SEO Information</h3>
    <p><strong>Meta Title:</strong> {}</p>
    <p><strong>Meta Description:</strong> {}</p>
    <h3>Blog Content</h3>
    <div style="background-color: #f5f5f5; padding: 15px; border-radius: 5px; margin: 10px 0;">{}</div>
    <h3>CMS</h3>
    <p>{}</p>
    <hr style="border: none; border-top: 1px solid #eee; margin: 30px 0;">
    <p style="color: #999; font-size: 12px;">Submission ID: {}</p>
</div>"#,
        verified_at,
        submission.full_name,
        identity,
        submission.mobile_number,
        submission.title,
        submission.description,
        submission.categories.join(", "),
        submission.tags.join(", "),
        submission.meta_title.as_deref().unwrap_or("Not provided"),
        submission.meta_description.as_deref().unwrap_or("Not provided"),
        submission.content.replace('\n', "<br>"),
        cms_outcome,
        record.submission_id,
    );

    send_email(
        ses_client,
        email,
        &email.reviewer_addresses,
        "New Verified Blog Submission - Techy Blog",
        html,
    )
    .await
}

fn otp_body(full_name: &str, code: &str) -> String {
    let html_template = include_str!("../utils/code.html");
    html_template
        .replace("{{full_name}}", full_name)
        .replace("{{verification_code}}", code)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn otp_template_interpolates_name_and_code() {
        let html = otp_body("Ada", "042137");
        assert!(html.contains("Hi Ada,"));
        assert!(html.contains("042137"));
        assert!(!html.contains("{{"));
    }
}
