use std::sync::Arc;

use inspiration_board::api::{AppState, app_routes};
use inspiration_board::config::{ServerConfig, SlackConfig};
use inspiration_board::notify::{NoopNotifier, Notifier, SlackNotifier};
use inspiration_board::store::{Database, LibSqlBackend};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Initialize tracing
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("info")),
        )
        .with_target(false)
        .init();

    let server_config = ServerConfig::from_env();
    let slack_config = SlackConfig::from_env();

    eprintln!("📌 Inspiration Board v{}", env!("CARGO_PKG_VERSION"));
    eprintln!("   API: http://{}", server_config.bind_addr());

    // ── Database ─────────────────────────────────────────────────────────
    let db: Arc<dyn Database> = Arc::new(
        LibSqlBackend::new_local(std::path::Path::new(&server_config.db_path)).await?,
    );
    eprintln!("   Database: {}", server_config.db_path);

    // ── Notifications ────────────────────────────────────────────────────
    let notifier: Arc<dyn Notifier> = if slack_config.enabled {
        eprintln!(
            "   Slack: enabled (channel: {}, token from ${})",
            slack_config.channel, slack_config.token_var
        );
        Arc::new(SlackNotifier::new(slack_config)?)
    } else {
        eprintln!("   Slack: disabled");
        Arc::new(NoopNotifier)
    };

    let app = app_routes(AppState::new(db, notifier));

    let listener = tokio::net::TcpListener::bind(server_config.bind_addr()).await?;
    tracing::info!(addr = %server_config.bind_addr(), "Inspiration board API started");
    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await?;

    Ok(())
}

async fn shutdown_signal() {
    if let Err(e) = tokio::signal::ctrl_c().await {
        tracing::warn!(error = %e, "Failed to listen for shutdown signal");
    }
    tracing::info!("Shutting down");
}
