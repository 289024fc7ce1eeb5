use axum::{
    extract::{rejection::JsonRejection, State},
    routing::get,
    Json, Router,
};

use crate::{
    error::Error,
    settings::{self, Presentation, Settings, SettingsPatch},
    state::AppState,
};

pub fn routes(state: AppState) -> Router {
    Router::new()
        .route(
            "/settings",
            get(get_settings).put(update_settings).delete(reset_settings),
        )
        .route("/settings/presentation", get(get_presentation))
        .with_state(state)
}

async fn get_settings(State(state): State<AppState>) -> Result<Json<Settings>, Error> {
    Ok(Json(settings::load(&state.store).await?))
}

async fn update_settings(
    State(state): State<AppState>,
    patch: Result<Json<SettingsPatch>, JsonRejection>,
) -> Result<Json<Settings>, Error> {
    let Json(patch) = patch?;
    Ok(Json(settings::update(&state.store, &state.presentation, patch).await?))
}

async fn reset_settings(State(state): State<AppState>) -> Result<Json<Settings>, Error> {
    Ok(Json(settings::reset(&state.store, &state.presentation).await?))
}

async fn get_presentation(State(state): State<AppState>) -> Json<Presentation> {
    Json(state.presentation.current().await)
}
