use anyhow::{Context, Result};
use liborg::Database;
use std::sync::Arc;
use tracing::trace;

#[derive(Debug)]
pub struct SharedState {
    pub db: Database,
}

impl SharedState {
    pub async fn new(database: &str) -> Result<Self> {
        trace!("Creating shared app state");
        Ok(Self {
            db: Database::open(database)
                .await
                .with_context(|| format!("Unable to open database {database}"))?,
        })
    }

    #[cfg(test)]
    pub fn test(pool: sqlx::Pool<sqlx::Sqlite>) -> Self {
        Self {
            db: Database::from(pool),
        }
    }
}

pub type AppState = Arc<SharedState>;
