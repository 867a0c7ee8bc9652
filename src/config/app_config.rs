use crate::error::{AppError, Result};
use std::env;

#[derive(Debug, Clone)]
pub struct AppConfig {
    pub server: ServerConfig,
    pub cors: CorsConfig,
    pub email: EmailConfig,
    pub cms: CmsConfig,
    pub verification: VerificationConfig,
}

#[derive(Debug, Clone)]
pub struct ServerConfig {
    pub host: String,
    pub port: u16,
    pub max_body_size: usize,
}

#[derive(Debug, Clone)]
pub struct CorsConfig {
    pub allowed_origins: Vec<String>,
}

#[derive(Debug, Clone)]
pub struct EmailConfig {
    pub sender_name: String,
    pub sender_address: String,
    pub reviewer_addresses: Vec<String>,
}

#[derive(Debug, Clone)]
pub struct CmsConfig {
    pub base_url: String,
    pub username: String,
    pub app_password: String,
}

#[derive(Debug, Clone)]
pub struct VerificationConfig {
    pub require_seo_fields: bool,
}

impl AppConfig {
    pub fn from_env() -> Result<Self> {
        Ok(Self {
            server: ServerConfig {
                host: env::var("HOST").unwrap_or_else(|_| "0.0.0.0".to_string()),
                port: env::var("PORT")
                    .unwrap_or_else(|_| "3000".to_string())
                    .parse()
                    .map_err(|_| AppError::ConfigError("Invalid PORT value".to_string()))?,
                max_body_size: env::var("MAX_BODY_SIZE")
                    .unwrap_or_else(|_| "2097152".to_string())
                    .parse()
                    .map_err(|_| AppError::ConfigError("Invalid MAX_BODY_SIZE value".to_string()))?,
            },
            cors: CorsConfig {
                allowed_origins: env::var("FRONTEND_URL")?
                    .split(',')
                    .map(|s| s.trim().to_string())
                    .collect(),
            },
            email: EmailConfig {
                sender_name: env::var("EMAIL_SENDER_NAME")
                    .unwrap_or_else(|_| "Techy Blog".to_string()),
                sender_address: env::var("EMAIL_SENDER_ADDRESS")?,
                reviewer_addresses: env::var("REVIEWER_EMAILS")?
                    .split(',')
                    .map(|s| s.trim().to_string())
                    .filter(|s| !s.is_empty())
                    .collect(),
            },
            cms: CmsConfig {
                base_url: env::var("WORDPRESS_URL")?
                    .trim_end_matches('/')
                    .to_string(),
                username: env::var("WORDPRESS_USERNAME")?.trim().to_string(),
                // WordPress generates application passwords with spaces
                // ("xxxx xxxx xxxx"); strip them before use.
                app_password: env::var("WORDPRESS_APPLICATION_PASSWORD")?
                    .split_whitespace()
                    .collect(),
            },
            verification: VerificationConfig {
                require_seo_fields: env::var("REQUIRE_SEO_FIELDS")
                    .map(|v| v == "true" || v == "1")
                    .unwrap_or(false),
            },
        })
    }

    pub fn server_address(&self) -> String {
        format!("{}:{}", self.server.host, self.server.port)
    }
}
