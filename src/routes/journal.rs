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
    journal::{self, JournalOptions},
    models::{JournalDraft, JournalEntry},
    records::Upsert,
    state::AppState,
};

#[derive(Serialize)]
pub struct SavedJournalEntry {
    pub outcome: Upsert,
    pub entry: JournalEntry,
}

pub fn routes(state: AppState) -> Router {
    Router::new()
        .route("/journal", get(list_entries).post(save_entry))
        .route("/journal/options", get(get_options))
        .route("/journal/:date", get(get_entry).delete(delete_entry))
        .with_state(state)
}

async fn list_entries(State(state): State<AppState>) -> Result<Json<Vec<JournalEntry>>, Error> {
    Ok(Json(journal::list(&state.store).await?))
}

async fn get_options() -> Json<JournalOptions> {
    Json(journal::options())
}

async fn get_entry(
    State(state): State<AppState>,
    date: Result<Path<NaiveDate>, PathRejection>,
) -> Result<Json<JournalEntry>, Error> {
    let Path(date) = date?;
    Ok(Json(journal::get(&state.store, date).await?))
}

async fn save_entry(
    State(state): State<AppState>,
    body: Result<Json<JournalDraft>, JsonRejection>,
) -> Result<(StatusCode, Json<SavedJournalEntry>), Error> {
    let Json(body) = body?;
    let (outcome, entry) = journal::save(&state.store, body, state.today()).await?;
    let status = match outcome {
        Upsert::Created => StatusCode::CREATED,
        Upsert::Updated => StatusCode::OK,
    };
    Ok((status, Json(SavedJournalEntry { outcome, entry })))
}

async fn delete_entry(
    State(state): State<AppState>,
    date: Result<Path<NaiveDate>, PathRejection>,
) -> Result<StatusCode, Error> {
    let Path(date) = date?;
    journal::delete(&state.store, date).await?;
    Ok(StatusCode::NO_CONTENT)
}
