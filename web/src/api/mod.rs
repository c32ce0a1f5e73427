use crate::state::AppState;
use axum::{Router, routing::get};

mod organisation;

#[cfg(test)]
mod tests;

pub(crate) fn router() -> Router<AppState> {
    Router::new()
        .route("/", get(root))
        .nest("/organisations", organisation::router())
}

async fn root() -> &'static str {
    "orgmap API root here"
}
