use anyhow::Result;
use axum::Router;
use clap::Parser;
use state::SharedState;
use std::sync::Arc;
use tower_http::trace::TraceLayer;
use tracing::{debug, info};
use tracing_subscriber::filter::EnvFilter;

mod api;
mod error;
mod state;

#[derive(Parser, Debug)]
#[command(author, version, about)]
pub struct Cli {
    #[arg(short, long, default_value = "orgmap.sqlite")]
    pub database: String,
    #[arg(short, long, default_value = "localhost")]
    pub listen: String,
    #[arg(short, long, default_value = "8080")]
    pub port: u16,
}

fn app(state: state::AppState) -> Router {
    api::router()
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}

#[cfg(test)]
pub(crate) async fn test_app(
    pool: sqlx::Pool<sqlx::Sqlite>,
) -> Result<(Router, state::AppState)> {
    let state = Arc::new(SharedState::test(pool));
    Ok((app(state.clone()), state))
}

#[tokio::main]
async fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_env("ORGWEB_LOG"))
        .init();
    let args = Cli::parse();
    debug!("using database '{}'", args.database);

    let shared_state = Arc::new(SharedState::new(&args.database).await?);

    let listener = tokio::net::TcpListener::bind((args.listen.as_str(), args.port)).await?;
    info!("Listening on http://{}", listener.local_addr()?);
    axum::serve(listener, app(shared_state).into_make_service()).await?;
    Ok(())
}
