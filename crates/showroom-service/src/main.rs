use showroom_service::{
    DefaultAppState, auth::AdminAuth, config::AppConfig, create_app, db::establish_connection,
};
use std::sync::{Arc, Mutex};
use tokio::signal;
use tracing::{error, info, warn};
use tracing_subscriber::EnvFilter;

#[tokio::main]
async fn main() {
    // Before tracing, so RUST_LOG can come from .env
    let dotenv_loaded = dotenv::dotenv().is_ok();

    // Initialize tracing
    let filter = EnvFilter::from_default_env().add_directive(
        "showroom_service=debug"
            .parse()
            .expect("static directive is valid"),
    );
    tracing_subscriber::fmt().with_env_filter(filter).init();

    if dotenv_loaded {
        info!("Loaded environment from .env");
    }

    let config = AppConfig::load().unwrap_or_else(|err| {
        error!(error = %err, "Failed to load configuration");
        std::process::exit(1);
    });

    if config.jwt_secret.is_none() {
        warn!("SHOWROOM_JWT_SECRET is not set; admin endpoints will fail");
    }
    if config.admin_username.is_none() || config.admin_password.is_none() {
        warn!("Admin credentials are not configured; login will fail");
    }

    let connection = establish_connection(&config.database_url).unwrap_or_else(|err| {
        error!(database_url = %config.database_url, error = %err, "Failed to set up database");
        std::process::exit(1);
    });

    info!(database_url = %config.database_url, "Connected to database");

    let app_state = DefaultAppState::new(
        Arc::new(Mutex::new(connection)),
        AdminAuth::from_config(&config),
    );

    let app = create_app(app_state, &config);

    let listener = tokio::net::TcpListener::bind(&config.bind_address)
        .await
        .unwrap_or_else(|err| {
            error!(bind_address = %config.bind_address, error = %err, "Failed to bind to address");
            std::process::exit(1);
        });

    info!(
        bind_address = %config.bind_address,
        allowed_origins = ?config.allowed_origins,
        "Server running"
    );

    let server = axum::serve(listener, app).with_graceful_shutdown(shutdown_signal());

    if let Err(err) = server.await {
        error!(error = %err, "Server error");
        std::process::exit(1);
    }

    info!("Graceful shutdown completed");
}

async fn shutdown_signal() {
    let ctrl_c = async {
        if let Err(err) = signal::ctrl_c().await {
            error!(error = %err, "Failed to install Ctrl+C handler");
            std::future::pending::<()>().await;
        }
    };

    #[cfg(unix)]
    let terminate = async {
        match signal::unix::signal(signal::unix::SignalKind::terminate()) {
            Ok(mut stream) => {
                stream.recv().await;
            }
            Err(err) => {
                error!(error = %err, "Failed to install SIGTERM handler");
                std::future::pending::<()>().await;
            }
        }
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        _ = ctrl_c => {},
        _ = terminate => {},
    }

    info!("Shutdown signal received, draining in-flight requests");
}
