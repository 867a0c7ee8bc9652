use serde::{Deserialize, Serialize};

use crate::error::{AppError, Result};

/// A reader-submitted draft article. Snapshotted at intake time and never
/// altered afterwards; resend reissues the code, not the draft.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DraftSubmission {
    #[serde(default)]
    pub full_name: String,
    #[serde(default)]
    pub email: String,
    #[serde(default)]
    pub mobile_number: String,
    #[serde(default)]
    pub title: String,
    #[serde(default)]
    pub description: String,
    #[serde(default)]
    pub content: String,
    #[serde(default)]
    pub categories: Vec<String>,
    #[serde(default)]
    pub tags: Vec<String>,
    #[serde(default)]
    pub meta_title: Option<String>,
    #[serde(default)]
    pub meta_description: Option<String>,
    #[serde(default)]
    pub image_link: Option<String>,
}

impl DraftSubmission {
    /// Checks required fields before any side effect happens. With
    /// `require_seo_fields` the meta title/description become mandatory too.
    pub fn validate(&self, require_seo_fields: bool) -> Result<()> {
        if self.full_name.trim().is_empty() {
            return Err(missing("fullName"));
        }
        if self.email.trim().is_empty() {
            return Err(missing("email"));
        }
        if !self.email.contains('@') {
            return Err(AppError::Validation("Invalid email address".to_string()));
        }
        if self.mobile_number.trim().is_empty() {
            return Err(missing("mobileNumber"));
        }
        if self.title.trim().is_empty() {
            return Err(missing("title"));
        }
        if self.description.trim().is_empty() {
            return Err(missing("description"));
        }
        if self.content.trim().is_empty() {
            return Err(missing("content"));
        }
        if !self.categories.iter().any(|c| !c.trim().is_empty()) {
            return Err(missing("categories"));
        }
        if !self.tags.iter().any(|t| !t.trim().is_empty()) {
            return Err(missing("tags"));
        }
        if require_seo_fields {
            if self.meta_title.as_deref().unwrap_or("").trim().is_empty() {
                return Err(missing("metaTitle"));
            }
            if self
                .meta_description
                .as_deref()
                .unwrap_or("")
                .trim()
                .is_empty()
            {
                return Err(missing("metaDescription"));
            }
        }
        Ok(())
    }
}

fn missing(field: &str) -> AppError {
    AppError::Validation(format!("Required field missing: {}", field))
}

#[cfg(test)]
mod tests {
    use super::*;

    fn valid_submission() -> DraftSubmission {
        DraftSubmission {
            full_name: "Ada Lovelace".to_string(),
            email: "ada@example.com".to_string(),
            mobile_number: "+1 555 0100".to_string(),
            title: "Notes on the Analytical Engine".to_string(),
            description: "A short description".to_string(),
            content: "Full article body".to_string(),
            categories: vec!["Technology".to_string()],
            tags: vec!["history".to_string()],
            meta_title: None,
            meta_description: None,
            image_link: None,
        }
    }

    #[test]
    fn accepts_a_complete_submission() {
        assert!(valid_submission().validate(false).is_ok());
    }

    #[test]
    fn rejects_each_missing_required_field_by_name() {
        let cases: Vec<(&str, Box<dyn Fn(&mut DraftSubmission)>)> = vec![
            ("fullName", Box::new(|s| s.full_name.clear())),
            ("email", Box::new(|s| s.email.clear())),
            ("mobileNumber", Box::new(|s| s.mobile_number.clear())),
            ("title", Box::new(|s| s.title.clear())),
            ("description", Box::new(|s| s.description.clear())),
            ("content", Box::new(|s| s.content.clear())),
            ("categories", Box::new(|s| s.categories.clear())),
            ("tags", Box::new(|s| s.tags = vec!["  ".to_string()])),
        ];

        for (field, mutate) in cases {
            let mut submission = valid_submission();
            mutate(&mut submission);
            match submission.validate(false) {
                Err(AppError::Validation(msg)) => {
                    assert!(msg.contains(field), "expected {} in: {}", field, msg)
                }
                other => panic!("expected validation error for {}, got {:?}", field, other),
            }
        }
    }

    #[test]
    fn rejects_implausible_email() {
        let mut submission = valid_submission();
        submission.email = "not-an-address".to_string();
        assert!(matches!(
            submission.validate(false),
            Err(AppError::Validation(_))
        ));
    }

    #[test]
    fn strict_mode_requires_seo_fields() {
        let mut submission = valid_submission();
        assert!(submission.validate(true).is_err());

        submission.meta_title = Some("Meta title".to_string());
        submission.meta_description = Some("Meta description".to_string());
        assert!(submission.validate(true).is_ok());
    }
}
