use anyhow::Context;
use clap::{Parser, Subcommand};
use dotenvy::dotenv;
use tokio::net::TcpListener;
use tracing::info;

use shoplist::logging::init_tracing;
use shoplist::metrics::{init_metrics, metrics_app};
use shoplist::router::{ServiceMode, init_service_router};
use shoplist::shoplist_config::ServerConfig;
use shoplist::shoplist_db::{DbConfig, init_db_pool, run_migrations};
use shoplist::state::AppState;

#[derive(Parser)]
#[command(name = "shoplist")]
#[command(about = "Shoplist - shopping list API and auth service", long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Run migrations and start serving
    Serve {
        /// Which routes to mount
        #[arg(short = 's', long, value_enum, default_value_t = ServiceMode::All)]
        service: ServiceMode,

        /// Overrides HOST
        #[arg(long)]
        host: Option<String>,

        /// Overrides PORT
        #[arg(short = 'p', long)]
        port: Option<u16>,
    },
    /// Apply pending database migrations and exit
    Migrate,
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    dotenv().ok();
    init_tracing()?;

    let cli = Cli::parse();

    let db_config = DbConfig::from_env();
    let pool = init_db_pool(&db_config)
        .await
        .context("failed to connect to the database")?;

    run_migrations(&pool)
        .await
        .context("failed to run migrations")?;
    info!("Migrations applied");

    match cli.command {
        Commands::Migrate => {
            pool.close().await;
            Ok(())
        }
        Commands::Serve {
            service,
            host,
            port,
        } => {
            let mut server_config = ServerConfig::from_env();
            if let Some(host) = host {
                server_config.host = host;
            }
            if let Some(port) = port {
                server_config.port = port;
            }

            let state = AppState::from_env(pool.clone());
            let mut app = init_service_router(state, service);
            if let Some(handle) = init_metrics()? {
                app = app.merge(metrics_app(handle));
            }

            let address = server_config.bind_address();
            let listener = TcpListener::bind(&address)
                .await
                .with_context(|| format!("failed to bind {address}"))?;

            info!(address = %address, service = ?service, "Server listening");
            info!("Swagger UI available at http://{address}/swagger-ui");

            axum::serve(listener, app)
                .with_graceful_shutdown(shutdown_signal())
                .await?;

            pool.close().await;
            info!("Server stopped");
            Ok(())
        }
    }
}

async fn shutdown_signal() {
    let ctrl_c = async {
        if let Err(e) = tokio::signal::ctrl_c().await {
            tracing::error!(error = %e, "failed to listen for ctrl-c");
        }
    };

    #[cfg(unix)]
    let terminate = async {
        match tokio::signal::unix::signal(tokio::signal::unix::SignalKind::terminate()) {
            Ok(mut signal) => {
                signal.recv().await;
            }
            Err(e) => tracing::error!(error = %e, "failed to listen for SIGTERM"),
        }
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        _ = ctrl_c => {},
        _ = terminate => {},
    }

    info!("Shutdown signal received");
}
