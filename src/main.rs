use storefront_api::{config::Config, db, rest, AppState};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    dotenvy::dotenv().ok();

    tracing_subscriber::registry()
        .with(tracing_subscriber::EnvFilter::new(
            std::env::var("RUST_LOG")
                .unwrap_or_else(|_| "storefront_api=debug,tower_http=info".into()),
        ))
        .with(tracing_subscriber::fmt::layer())
        .init();

    let config = Config::from_env()?;

    let pool = db::connect(&config).await?;
    db::MIGRATOR.run(&pool).await?;
    tracing::info!("DB: Successfully Connected!");

    let app = rest::router(AppState::new(&config, pool));

    let addr = config.listen_addr();
    tracing::info!("REST API listening on {}", addr);
    let listener = tokio::net::TcpListener::bind(&addr).await?;

    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await?;

    Ok(())
}

/// Resolves on SIGINT or SIGTERM. A listener that cannot be installed is
/// logged and left out rather than aborting the server.
async fn shutdown_signal() {
    let interrupt = async {
        if let Err(e) = tokio::signal::ctrl_c().await {
            tracing::error!("cannot listen for SIGINT: {}", e);
            std::future::pending::<()>().await;
        }
        "SIGINT"
    };

    #[cfg(unix)]
    let terminate = async {
        use tokio::signal::unix::{signal, SignalKind};

        match signal(SignalKind::terminate()) {
            Ok(mut stream) => {
                stream.recv().await;
            }
            Err(e) => {
                tracing::error!("cannot listen for SIGTERM: {}", e);
                std::future::pending::<()>().await;
            }
        }
        "SIGTERM"
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<&'static str>();

    let received = first_signal(interrupt, terminate).await;
    tracing::info!(signal = received, "draining connections before exit");
}

async fn first_signal<I, T>(interrupt: I, terminate: T) -> &'static str
where
    I: std::future::Future<Output = &'static str>,
    T: std::future::Future<Output = &'static str>,
{
    tokio::select! {
        name = interrupt => name,
        name = terminate => name,
    }
}
