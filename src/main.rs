use dotenvy::dotenv;
use schooldesk::logging::init_logging;
use schooldesk::router::init_router;
use schooldesk::state::AppState;
use schooldesk_config::AppConfig;
use schooldesk_db::{init_db_pool, run_migrations};
use tracing::{error, info};

#[tokio::main]
async fn main() {
    dotenv().ok();

    let config = match AppConfig::from_env() {
        Ok(config) => config,
        Err(e) => {
            eprintln!("Configuration error: {e}");
            std::process::exit(1);
        }
    };

    let _log_guard = init_logging(&config.logging);

    if let Err(e) = run(config).await {
        error!(error = %e, "Server stopped");
        std::process::exit(1);
    }
}

async fn run(config: AppConfig) -> anyhow::Result<()> {
    let pool = init_db_pool(&config.database).await?;
    run_migrations(&pool).await?;

    let state = AppState::postgres(pool, &config);
    let app = init_router(state);

    let address = config.server.bind_address();
    let listener = tokio::net::TcpListener::bind(&address).await?;
    info!(address = %address, "Server running");
    info!("Swagger UI available at http://{address}/swagger-ui");
    info!("Scalar UI available at http://{address}/scalar");

    axum::serve(listener, app).await?;
    Ok(())
}
