use axum::{
    extract::{
        rejection::{JsonRejection, PathRejection},
        Path, State,
    },
    http::StatusCode,
    routing::get,
    Json, Router,
};
use chrono::NaiveDate;
use serde::Serialize;

use crate::{
    error::Error,
    models::{TrackingDraft, TrackingEntry},
    records::Upsert,
    state::AppState,
    tracker::{self, TrackerOptions},
};

#[derive(Serialize)]
pub struct SavedTrackingEntry {
    pub outcome: Upsert,
    pub entry: TrackingEntry,
}

pub fn routes(state: AppState) -> Router {
    Router::new()
        .route("/tracking", get(list_entries).post(save_entry))
        .route("/tracking/options", get(get_options))
        .route("/tracking/:date", get(get_entry).delete(delete_entry))
        .with_state(state)
}

async fn list_entries(State(state): State<AppState>) -> Result<Json<Vec<TrackingEntry>>, Error> {
    Ok(Json(tracker::list(&state.store).await?))
}

async fn get_options() -> Json<TrackerOptions> {
    Json(tracker::options())
}

async fn get_entry(
    State(state): State<AppState>,
    date: Result<Path<NaiveDate>, PathRejection>,
) -> Result<Json<TrackingEntry>, Error> {
    let Path(date) = date?;
    Ok(Json(tracker::get(&state.store, date).await?))
}

async fn save_entry(
    State(state): State<AppState>,
    body: Result<Json<TrackingDraft>, JsonRejection>,
) -> Result<(StatusCode, Json<SavedTrackingEntry>), Error> {
    let Json(body) = body?;
    let (outcome, entry) = tracker::save(&state.store, body, state.today()).await?;
    let status = match outcome {
        Upsert::Created => StatusCode::CREATED,
        Upsert::Updated => StatusCode::OK,
    };
    Ok((status, Json(SavedTrackingEntry { outcome, entry })))
}

async fn delete_entry(
    State(state): State<AppState>,
    date: Result<Path<NaiveDate>, PathRejection>,
) -> Result<StatusCode, Error> {
    let Path(date) = date?;
    tracker::delete(&state.store, date).await?;
    Ok(StatusCode::NO_CONTENT)
}
