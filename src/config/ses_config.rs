use aws_config::{BehaviorVersion, Region};
use aws_sdk_sesv2::{config::Credentials, Client as SesClient};

pub async fn load_ses_client() -> SesClient {
    let aws_region = std::env::var("AWS_REGION").unwrap_or_else(|_| "us-east-1".to_string());

    let loader = aws_config::defaults(BehaviorVersion::latest()).region(Region::new(aws_region));

    // Explicit env credentials when present, otherwise the default provider
    // chain (instance profile, shared config).
    let config = match (
        std::env::var("AWS_ACCESS_KEY_ID"),
        std::env::var("AWS_SECRET_ACCESS_KEY"),
    ) {
        (Ok(access_key), Ok(secret_key)) => {
            let credentials = Credentials::new(access_key, secret_key, None, None, "env-credentials");
            loader.credentials_provider(credentials).load().await
        }
        _ => loader.load().await,
    };

    let ses_client = SesClient::new(&config);

    tracing::info!("AWS SES client initialized");

    ses_client
}
