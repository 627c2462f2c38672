use stonedesk_api::config::ApiConfig;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let config = ApiConfig::from_env()?;
    stonedesk_observability::init(config.log_format);

    let app = stonedesk_api::app::build_app(&config)?;

    let listener = tokio::net::TcpListener::bind(config.bind_addr).await?;
    tracing::info!(
        addr = %listener.local_addr()?,
        seeded = config.seed_demo_data,
        "listening"
    );

    axum::serve(listener, app).await?;
    Ok(())
}
