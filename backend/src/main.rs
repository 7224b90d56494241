use std::net::SocketAddr;
use std::sync::Arc;

use axum::http::{HeaderValue, Method};
use tower_http::cors::{Any, CorsLayer};
use tracing::{info, warn, Level};

use rewards_backend::db::AccountDb;
use rewards_backend::domain::{
    AccountLocks, AccountService, CashbackService, DonationService, InvestService,
};
use rewards_backend::feeds::{FixedRateSource, HttpRateSource, RateSource};
use rewards_backend::rest::{self, AppState};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Initialize logging
    tracing_subscriber::fmt()
        .with_max_level(Level::INFO)
        .init();

    info!("Setting up database");
    let db = AccountDb::init().await?;
    let locks = AccountLocks::new();
    let http = reqwest::Client::new();

    // Fixed-rate override for offline development; live feed otherwise.
    let rate_source: Arc<dyn RateSource> = match std::env::var("EXCHANGE_RATE_OVERRIDE") {
        Ok(raw) => {
            let rate: f64 = raw.parse()?;
            warn!("using fixed exchange rate {}", rate);
            Arc::new(FixedRateSource(rate))
        }
        Err(_) => Arc::new(HttpRateSource::new(http.clone())),
    };

    let state = AppState {
        accounts: AccountService::new(db.clone(), locks.clone()),
        cashback: CashbackService::new(db.clone(), locks.clone(), rate_source),
        donations: DonationService::new(db.clone(), locks.clone()),
        invest: InvestService::new(db, locks),
        http,
    };

    // CORS setup to allow the web client to make requests
    let cors_origin =
        std::env::var("CORS_ORIGIN").unwrap_or_else(|_| "http://localhost:8080".to_string());
    let cors = CorsLayer::new()
        .allow_origin(cors_origin.parse::<HeaderValue>()?)
        .allow_methods([Method::GET, Method::POST, Method::PUT, Method::DELETE])
        .allow_headers(Any);

    let app = rest::router(state).layer(cors);

    let port: u16 = std::env::var("PORT")
        .ok()
        .and_then(|p| p.parse().ok())
        .unwrap_or(3000);
    let addr = SocketAddr::from(([127, 0, 0, 1], port));
    info!("Starting server on {}", addr);

    let listener = tokio::net::TcpListener::bind(addr).await?;
    info!("Listening on {}", addr);

    axum::serve(listener, app).await?;

    Ok(())
}
