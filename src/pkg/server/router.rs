use axum::middleware::from_fn_with_state;
use axum::{
    routing::{get, post},
    Router,
};

use super::handlers;
use super::handlers::probes::{healthz, livez};
use super::middlewares::authn;
use super::state::AppState;
use crate::prelude::Result;

pub fn build_routes() -> Result<Router> {
    let state = AppState::new()?;
    let app = Router::new()
        .route("/jobs", post(handlers::jobs::create).get(handlers::jobs::list))
        .route(
            "/jobs/{id}",
            get(handlers::jobs::retrieve)
                .put(handlers::jobs::update)
                .delete(handlers::jobs::remove),
        )
        .route("/stats", get(handlers::stats::status_summary))
        .route("/stats/timeline", get(handlers::stats::timeline))
        .route("/logout", post(handlers::auth::logout))
        .layer(from_fn_with_state(state.clone(), authn::authenticate))
        .route("/healthz", get(healthz))
        .route("/livez", get(livez))
        .with_state(state);

    Ok(app)
}
