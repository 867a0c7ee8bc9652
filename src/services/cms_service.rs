use std::time::Duration;

use serde::Deserialize;

use crate::config::CmsConfig;
use crate::error::{AppError, Result};
use crate::models::DraftSubmission;

const CMS_REQUEST_TIMEOUT_SECS: u64 = 15;

#[derive(Debug, Clone)]
pub struct DraftArticle {
    pub article_id: i64,
    pub url: String,
}

#[derive(Debug, Deserialize)]
struct WpTerm {
    id: i64,
    name: String,
    slug: String,
}

#[derive(Debug, Deserialize)]
struct WpPost {
    id: i64,
    #[serde(default)]
    link: String,
}

pub fn build_client() -> Result<reqwest::Client> {
    reqwest::Client::builder()
        .timeout(Duration::from_secs(CMS_REQUEST_TIMEOUT_SECS))
        .build()
        .map_err(|e| AppError::InternalError(format!("Failed to build HTTP client: {}", e)))
}

/// Creates the verified submission as a moderation-queued article. Posts go
/// in with `status: "pending"`, never published directly.
pub async fn create_draft_article(
    client: &reqwest::Client,
    cms: &CmsConfig,
    submission: &DraftSubmission,
) -> Result<DraftArticle> {
    let category_ids = resolve_category_ids(client, cms, &submission.categories).await?;
    let tag_ids = resolve_tag_ids(client, cms, &submission.tags).await?;

    let excerpt = if !submission.description.is_empty() {
        submission.description.clone()
    } else {
        submission.meta_description.clone().unwrap_or_default()
    };

    let body = serde_json::json!({
        "title": submission.title,
        "content": submission.content.replace('\n', "<br>"),
        "status": "pending",
        "excerpt": excerpt,
        "categories": category_ids,
        "tags": tag_ids,
    });

    let response = client
        .post(format!("{}/wp-json/wp/v2/posts", cms.base_url))
        .basic_auth(&cms.username, Some(&cms.app_password))
        .json(&body)
        .send()
        .await
        .map_err(|e| AppError::InternalError(format!("CMS post creation request failed: {}", e)))?;

    if !response.status().is_success() {
        let status = response.status();
        let text = response.text().await.unwrap_or_default();
        tracing::error!("CMS post creation failed ({}): {}", status, text);
        return Err(AppError::InternalError(format!(
            "CMS post creation failed with status {}",
            status
        )));
    }

    let post: WpPost = response
        .json()
        .await
        .map_err(|e| AppError::InternalError(format!("Failed to parse CMS response: {}", e)))?;

    tracing::info!("Created pending CMS article {} at {}", post.id, post.link);

    Ok(DraftArticle {
        article_id: post.id,
        url: post.link,
    })
}

/// Matches submitted category names against the CMS taxonomy, by exact name
/// first and slug second. Unknown categories are skipped, not created.
async fn resolve_category_ids(
    client: &reqwest::Client,
    cms: &CmsConfig,
    categories: &[String],
) -> Result<Vec<i64>> {
    if categories.is_empty() {
        return Ok(Vec::new());
    }

    let wp_categories: Vec<WpTerm> = client
        .get(format!(
            "{}/wp-json/wp/v2/categories?per_page=100",
            cms.base_url
        ))
        .send()
        .await
        .map_err(|e| AppError::InternalError(format!("Failed to fetch CMS categories: {}", e)))?
        .json()
        .await
        .map_err(|e| AppError::InternalError(format!("Failed to parse CMS categories: {}", e)))?;

    let mut ids = Vec::new();
    for name in categories {
        let name = name.trim();
        if name.is_empty() {
            continue;
        }
        let slug = slugify(name);

        let matched = wp_categories
            .iter()
            .find(|cat| cat.name.eq_ignore_ascii_case(name))
            .or_else(|| wp_categories.iter().find(|cat| cat.slug == slug));

        match matched {
            Some(cat) => ids.push(cat.id),
            None => tracing::warn!("Category not found in CMS, skipping: {}", name),
        }
    }

    Ok(ids)
}

/// Tags are looked up by slug and created on the fly when absent.
async fn resolve_tag_ids(
    client: &reqwest::Client,
    cms: &CmsConfig,
    tags: &[String],
) -> Result<Vec<i64>> {
    let mut ids = Vec::new();

    for name in tags {
        let name = name.trim();
        if name.is_empty() {
            continue;
        }
        let slug = slugify(name);

        let existing: Vec<WpTerm> = client
            .get(format!("{}/wp-json/wp/v2/tags?slug={}", cms.base_url, slug))
            .send()
            .await
            .map_err(|e| AppError::InternalError(format!("Failed to fetch CMS tags: {}", e)))?
            .json()
            .await
            .map_err(|e| AppError::InternalError(format!("Failed to parse CMS tags: {}", e)))?;

        if let Some(tag) = existing.first() {
            ids.push(tag.id);
            continue;
        }

        let created = client
            .post(format!("{}/wp-json/wp/v2/tags", cms.base_url))
            .basic_auth(&cms.username, Some(&cms.app_password))
            .json(&serde_json::json!({ "name": name, "slug": slug }))
            .send()
            .await
            .map_err(|e| AppError::InternalError(format!("Failed to create CMS tag: {}", e)))?;

        if created.status().is_success() {
            let tag: WpTerm = created.json().await.map_err(|e| {
                AppError::InternalError(format!("Failed to parse created CMS tag: {}", e))
            })?;
            ids.push(tag.id);
        } else {
            tracing::warn!("Failed to create CMS tag, skipping: {}", name);
        }
    }

    Ok(ids)
}

fn slugify(name: &str) -> String {
    name.trim().to_lowercase().split_whitespace().collect::<Vec<_>>().join("-")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn slugify_collapses_whitespace_and_lowercases() {
        assert_eq!(slugify("  Machine   Learning "), "machine-learning");
        assert_eq!(slugify("Rust"), "rust");
    }
}
