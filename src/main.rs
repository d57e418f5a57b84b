// src/main.rs

use std::sync::Arc;

use dotenvy::dotenv;
use tokio::net::TcpListener;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use crop_gateway::build_router;
use crop_gateway::config::GatewayConfig;
use crop_gateway::state::AppState;

#[tokio::main]
async fn main() {
    dotenv().ok();

    // Inicjalizacja systemu logowania (tracing), poziom przez RUST_LOG
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "crop_gateway=debug,tower_http=debug".into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    tracing::info!("Inicjalizacja bramki...");

    let config = match GatewayConfig::from_env() {
        Ok(config) => config,
        Err(err) => {
            tracing::error!("Nieprawidłowa konfiguracja: {}", err);
            std::process::exit(1);
        }
    };

    tracing::info!("Backend predykcji: {}", config.backend_url);

    let addr = config.bind_address();
    let app = build_router(Arc::new(AppState::new(config)));

    let listener = match TcpListener::bind(&addr).await {
        Ok(listener) => listener,
        Err(e) => {
            tracing::error!("Nie można powiązać adresu {}: {}", addr, e);
            std::process::exit(1);
        }
    };
    tracing::info!("Serwer nasłuchuje na {}", addr);

    if let Err(e) = axum::serve(listener, app.into_make_service()).await {
        tracing::error!("Błąd serwera: {}", e);
    }
}
