use anyhow::Result;
use stackbox::{app, config::Config, db, types::AppState};

#[tokio::main]
async fn main() -> Result<()> {
    // initialize tracing
    tracing_subscriber::fmt::init();

    let config = Config::from_env()?;
    let db_pool = db::make_db_pool(&config.database_url).await?;
    if config.run_migrations {
        db::run_migrations(&db_pool).await?;
        tracing::info!("database migrations applied");
    }

    let app_state = AppState::new(db_pool, env!("CARGO_PKG_VERSION"));
    let app = app::build_app(app_state, &config);

    let listener = tokio::net::TcpListener::bind(("0.0.0.0", config.port)).await?;
    tracing::info!("application is running on {}", listener.local_addr()?);

    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await?;

    Ok(())
}

async fn shutdown_signal() {
    // Wait for the CTRL+C signal
    if let Err(err) = tokio::signal::ctrl_c().await {
        tracing::error!("failed to install CTRL+C signal handler: {}", err);
        std::future::pending::<()>().await;
    }
    tracing::info!("signal received, starting graceful shutdown");
}
