pub mod cms_service;
pub mod email_service;
pub mod publisher;
