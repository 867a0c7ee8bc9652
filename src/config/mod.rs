mod app_config;
mod ses_config;

pub use app_config::{
    AppConfig, CmsConfig, CorsConfig, EmailConfig, ServerConfig, VerificationConfig,
};
pub use ses_config::*;
