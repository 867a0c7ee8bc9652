use std::sync::Arc;
use std::time::Duration as StdDuration;

use aws_sdk_sesv2::Client as SesClient;
use axum::{
    extract::DefaultBodyLimit,
    http::{HeaderValue, Method},
    Router,
};
use chrono::Duration;
use tokio::sync::mpsc;
use tower_http::cors::CorsLayer;

use crate::{
    config::{self, AppConfig},
    error::Result,
    routes,
    services::{cms_service, publisher, publisher::PublishJob},
    store::{VerificationStore, SWEEP_MAX_AGE_MINUTES},
};

const SWEEP_INTERVAL_SECS: u64 = 300;

#[derive(Clone)]
pub struct AppState {
    pub store: VerificationStore,
    pub ses_client: SesClient,
    pub publisher: mpsc::Sender<PublishJob>,
    pub config: Arc<AppConfig>,
}

pub async fn build(config: AppConfig) -> Result<Router> {
    let config = Arc::new(config);

    let ses_client = config::load_ses_client().await;
    let http_client = cms_service::build_client()?;
    let store = VerificationStore::new();

    let publisher = publisher::spawn(ses_client.clone(), http_client, Arc::clone(&config));
    spawn_expiry_sweeper(store.clone());

    tracing::warn!(
        "Verification store is in-memory: a restart invalidates all pending \
         submissions; affected submitters must resubmit, not resend"
    );

    let state = AppState {
        store,
        ses_client,
        publisher,
        config: Arc::clone(&config),
    };

    let allowed_origins: Vec<HeaderValue> = config
        .cors
        .allowed_origins
        .iter()
        .map(|origin| {
            origin.parse::<HeaderValue>().map_err(|_| {
                crate::error::AppError::ConfigError(format!("Invalid CORS origin: {}", origin))
            })
        })
        .collect::<Result<Vec<_>>>()?;

    let cors = CorsLayer::new()
        .allow_methods([Method::GET, Method::POST, Method::OPTIONS])
        .allow_headers([http::header::CONTENT_TYPE])
        .allow_origin(allowed_origins);

    let app = routes::create_router()
        .layer(DefaultBodyLimit::max(config.server.max_body_size))
        .layer(cors)
        .with_state(state);

    Ok(app)
}

fn spawn_expiry_sweeper(store: VerificationStore) {
    tokio::spawn(async move {
        let mut interval = tokio::time::interval(StdDuration::from_secs(SWEEP_INTERVAL_SECS));
        loop {
            interval.tick().await;
            let removed = store.sweep_expired(Duration::minutes(SWEEP_MAX_AGE_MINUTES));
            if removed > 0 {
                tracing::info!("Swept {} expired verification records", removed);
            }
        }
    });
}
