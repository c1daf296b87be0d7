use backend::{config::AppConfig, routes::service};
use tracing::info;
use tracing_subscriber::EnvFilter;

#[rocket::main]
async fn main() -> Result<(), rocket::Error> {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .init();

    let config = AppConfig::from_env();
    info!("🗳️ Starting voting service on {}:{}", config.address, config.port);

    let figment = rocket::Config::figment()
        .merge(("address", config.address.to_string()))
        .merge(("port", config.port));

    let _rocket = service().configure(figment).launch().await?;

    Ok(())
}
