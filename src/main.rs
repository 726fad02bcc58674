//! Store calendar HTTP server.

use std::sync::Arc;

use store_calendar::api::{AppState, create_router};
use store_calendar::config::{HolidayCalendar, ServerConfig};
use store_calendar::store::InMemoryCalendarStore;
use tower_http::trace::TraceLayer;
use tracing::info;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    dotenvy::dotenv().ok();

    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "store_calendar=info,tower_http=info".into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    let config = ServerConfig::from_env()?;

    let holidays = match &config.holidays_dir {
        Some(dir) => HolidayCalendar::load(dir)?,
        None => {
            info!("HOLIDAYS_DIR not set, using the built-in holiday table");
            HolidayCalendar::default()
        }
    };

    let state = AppState::new(Arc::new(InMemoryCalendarStore::new()), Arc::new(holidays));
    let app = create_router(state).layer(TraceLayer::new_for_http());

    let (host, port) = config.bind_addr();
    info!("Starting server on {host}:{port}");

    let listener = tokio::net::TcpListener::bind((host, port)).await?;
    axum::serve(listener, app).await?;
    Ok(())
}
