use anyhow::Context;
use tracing_subscriber::EnvFilter;
use wompi_client::{PaymentGateway, WompiConfig, WompiHandler};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Initialize logging
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));
    if std::env::var("LOG_FORMAT").as_deref() == Ok("json") {
        tracing_subscriber::fmt().json().with_env_filter(filter).init();
    } else {
        tracing_subscriber::fmt().with_env_filter(filter).init();
    }

    // Load configuration
    let config = WompiConfig::from_env()?;
    tracing::info!(
        "Environment: {}",
        if config.sandbox { "sandbox" } else { "production" }
    );

    let handler = WompiHandler::new(config).context("Failed to create Wompi handler")?;
    let gateway: &dyn PaymentGateway = &handler;
    let token = gateway
        .fetch_acceptance_token()
        .await
        .context("Failed to fetch acceptance token")?;

    println!("acceptance_token: {}", token.acceptance_token());
    if let Some(permalink) = token.permalink() {
        println!("terms: {}", permalink);
    }

    Ok(())
}
