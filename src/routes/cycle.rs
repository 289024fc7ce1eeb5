use axum::{extract::State, routing::get, Json, Router};

use crate::{cycle, error::Error, models::CycleSummary, state::AppState};

pub fn routes(state: AppState) -> Router {
    Router::new()
        .route("/cycle", get(get_cycle_summary))
        .with_state(state)
}

async fn get_cycle_summary(State(state): State<AppState>) -> Result<Json<CycleSummary>, Error> {
    let summary = cycle::current_summary(&state.store, state.today()).await?;
    Ok(Json(summary))
}
