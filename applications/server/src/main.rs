/// ms-user - user and group administration over an identity backend
use clap::{Parser, Subcommand};
use identity_client::IdentityClient;
use ms_user_server::{create_router, ApiTokenAuth, AppState, ServerConfig};
use std::{
    net::SocketAddr,
    path::{Path, PathBuf},
    sync::Arc,
};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

#[derive(Parser)]
#[command(name = "ms-user")]
#[command(about = "User, group and membership administration service", long_about = None)]
#[command(version)]
struct Cli {
    #[command(subcommand)]
    command: Option<Commands>,
}

#[derive(Subcommand)]
enum Commands {
    /// Start the HTTP server
    Serve {
        /// Configuration file path
        #[arg(short, long, env = "MS_USER_CONFIG")]
        config: Option<PathBuf>,
    },
    /// Fetch an admin token once and report whether the backend is reachable
    CheckBackend {
        /// Configuration file path
        #[arg(short, long, env = "MS_USER_CONFIG")]
        config: Option<PathBuf>,
    },
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Initialize tracing
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env().unwrap_or_else(|_| {
                "ms_user_server=info,identity_client=info,tower_http=info".into()
            }),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    let cli = Cli::parse();

    match cli.command.unwrap_or(Commands::Serve { config: None }) {
        Commands::Serve { config } => {
            serve(config.as_deref()).await?;
        }
        Commands::CheckBackend { config } => {
            check_backend(config.as_deref()).await?;
        }
    }

    Ok(())
}

fn load_config(path: Option<&Path>) -> anyhow::Result<ServerConfig> {
    let config = ServerConfig::load_from(path)?;
    config.validate()?;
    Ok(config)
}

async fn serve(config_path: Option<&Path>) -> anyhow::Result<()> {
    let config = load_config(config_path)?;

    tracing::info!("Starting ms-user");
    tracing::info!("Host: {}", config.server.host);
    tracing::info!("Port: {}", config.server.port);
    tracing::info!(
        url = %config.keycloak.url,
        realm = %config.keycloak.realm,
        "Identity backend"
    );

    if config.uses_default_api_token() {
        tracing::warn!("Using the default API token; set API_TOKEN for anything but local development");
    }

    let identity = IdentityClient::connect(config.backend_config()).await?;
    let app_state = AppState::new(Arc::new(identity));
    let auth = Arc::new(ApiTokenAuth::new(config.auth.api_token.clone()));

    let app = create_router(app_state, auth);

    let addr = SocketAddr::from((
        config.server.host.parse::<std::net::IpAddr>()?,
        config.server.port,
    ));

    tracing::info!("Server listening on {}", addr);

    let listener = tokio::net::TcpListener::bind(addr).await?;
    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await?;

    Ok(())
}

async fn check_backend(config_path: Option<&Path>) -> anyhow::Result<()> {
    let config = load_config(config_path)?;
    let identity = IdentityClient::new(config.backend_config())?;

    match identity.acquire_token().await {
        Ok(_) => {
            println!(
                "OK: obtained admin token from {} (realm {})",
                identity.base_url(),
                identity.realm()
            );
            Ok(())
        }
        Err(e) => {
            eprintln!("FAILED: {e}");
            Err(e.into())
        }
    }
}

async fn shutdown_signal() {
    if let Err(e) = tokio::signal::ctrl_c().await {
        tracing::error!("Failed to listen for shutdown signal: {}", e);
        std::future::pending::<()>().await;
    }
    tracing::info!("Shutting down");
}
