//! Single-user cycle wellness tracker: journal, symptom tracking, onboarding
//! quiz, phase resources and settings over a string-keyed JSON store.

use axum::{routing::get, Router};
use tower_http::trace::TraceLayer;

pub mod config;
pub mod cycle;
pub mod error;
pub mod journal;
pub mod models;
pub mod quiz;
pub mod records;
pub mod resources;
pub mod routes;
pub mod settings;
pub mod state;
pub mod store;
pub mod tracker;

pub use error::{Error, Result};
pub use state::AppState;

pub fn app(state: AppState) -> Router {
    Router::new()
        .merge(routes::cycle::routes(state.clone()))
        .merge(routes::journal::routes(state.clone()))
        .merge(routes::tracker::routes(state.clone()))
        .merge(routes::quiz::routes(state.clone()))
        .merge(routes::resources::routes(state.clone()))
        .merge(routes::settings::routes(state))
        .route("/health", get(|| async { "✅ Backend up" }))
        .layer(TraceLayer::new_for_http())
}
