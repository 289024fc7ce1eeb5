use axum::{
    extract::{rejection::QueryRejection, Query, State},
    routing::get,
    Json, Router,
};
use serde::Deserialize;

use crate::{
    error::Error,
    resources::{self, PhaseResources},
    state::AppState,
};

#[derive(Deserialize)]
pub struct ResourcesQuery {
    pub phase: Option<String>,
}

pub fn routes(state: AppState) -> Router {
    Router::new()
        .route("/resources", get(list_resources))
        .route("/resources/current", get(current_resources))
        .with_state(state)
}

async fn list_resources(
    query: Result<Query<ResourcesQuery>, QueryRejection>,
) -> Result<Json<Vec<PhaseResources>>, Error> {
    let Query(query) = query?;
    Ok(Json(resources::list(query.phase.as_deref())?))
}

async fn current_resources(State(state): State<AppState>) -> Result<Json<PhaseResources>, Error> {
    Ok(Json(resources::current(&state.store).await?))
}
