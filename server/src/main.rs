use anyhow::Context;
use bookswap_auth::Authenticator;
use bookswap_config::load as load_config;
use bookswap_database::initialize_database;
use bookswap_gateway::{create_router, AppState};
use tokio::{net::TcpListener, signal};
use tracing::{error, info, Level};
use tracing_subscriber::FmtSubscriber;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let env_filter = tracing_subscriber::EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("info"));

    let subscriber = FmtSubscriber::builder()
        .with_max_level(Level::INFO)
        .with_env_filter(env_filter)
        .finish();
    tracing::subscriber::set_global_default(subscriber)
        .context("failed to set tracing subscriber")?;

    info!("starting BookSwap backend");

    let config = load_config().context("failed to load configuration")?;

    let pool = initialize_database(&config.database)
        .await
        .context("failed to initialize database")?;

    let authenticator = Authenticator::new(pool.clone(), &config.auth);
    info!(
        token_ttl_seconds = config.auth.token_ttl_seconds,
        "authentication subsystem ready"
    );

    let state = AppState::new(pool, authenticator);
    let app = create_router(state);

    let address = format!("{}:{}", config.http.address, config.http.port);
    let listener = TcpListener::bind(&address)
        .await
        .with_context(|| format!("failed to bind http listener on {address}"))?;

    info!(%address, "http server listening");

    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await
        .context("http server error")?;

    info!("backend shut down");
    Ok(())
}

fn shutdown_signal() -> impl std::future::Future<Output = ()> {
    async {
        if let Err(error) = signal::ctrl_c().await {
            error!(?error, "failed to listen for shutdown signal");
        }
        info!("shutdown signal received");
    }
}
