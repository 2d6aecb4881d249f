use std::net::SocketAddr;
use std::path::PathBuf;

use tower_http::cors::CorsLayer;
use tower_http::trace::TraceLayer;
use tracing::{error, info};

use inbox_api::state::AppStateInner;
use inbox_db::Database;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Load .env if present
    let _ = dotenvy::dotenv();

    // Init logging
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "inbox=debug,inbox_api=debug,tower_http=debug".into()),
        )
        .init();

    // Config
    let db_path = std::env::var("INBOX_DB_PATH").unwrap_or_else(|_| "inbox.db".into());
    let host = std::env::var("INBOX_HOST").unwrap_or_else(|_| "0.0.0.0".into());
    let port: u16 = std::env::var("INBOX_PORT")
        .unwrap_or_else(|_| "3000".into())
        .parse()?;
    let seed_demo = std::env::var("INBOX_SEED_DEMO")
        .map(|v| matches!(v.as_str(), "1" | "true"))
        .unwrap_or(false);

    // A missing store is reported per request, not fatal at startup
    let db = match Database::open(&PathBuf::from(&db_path)) {
        Ok(db) => Some(db),
        Err(e) => {
            error!("Could not open database at {}: {}", db_path, e);
            None
        }
    };

    if seed_demo {
        if let Some(db) = &db {
            db.seed_demo()?;
        }
    }

    let state = AppStateInner::new(db);

    let app = inbox_api::router(state)
        .layer(CorsLayer::permissive())
        .layer(TraceLayer::new_for_http());

    let addr: SocketAddr = format!("{}:{}", host, port).parse()?;
    info!("Inbox feed server listening on {}", addr);

    let listener = tokio::net::TcpListener::bind(addr).await?;
    axum::serve(listener, app).await?;

    Ok(())
}
