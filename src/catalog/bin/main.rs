use std::net::SocketAddr;
use tracing::info;
use bookdata::catalog::controller::router;
use bookdata::catalog::factory::create_catalog_service;
use bookdata::catalog::seed::load_sample_books;
use bookdata::core::controller::AppState;
use bookdata::core::domain::Configuration;
use bookdata::store::factory::create_document_store;
use bookdata::utils::logs::setup_tracing;

type Error = Box<dyn std::error::Error + Send + Sync>;

#[tokio::main]
async fn main() -> Result<(), Error> {
    let config = Configuration::from_env()?;
    setup_tracing(config.log_json);

    let store = create_document_store(&config).await?;
    let catalog = create_catalog_service(&config, store);
    if config.load_sample_data {
        load_sample_books(catalog.as_ref()).await;
    }

    let addr: SocketAddr = config.bind_addr.parse()?;
    let app = router(AppState::new(config, catalog));

    info!("catalog listening on {}", addr);
    axum::Server::try_bind(&addr)?
        .serve(app.into_make_service())
        .with_graceful_shutdown(shutdown_signal())
        .await?;
    info!("catalog stopped");
    Ok(())
}

async fn shutdown_signal() {
    if let Err(err) = tokio::signal::ctrl_c().await {
        tracing::error!("failed to listen for shutdown signal: {}", err);
    }
}
