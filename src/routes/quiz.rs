use axum::{
    extract::{rejection::JsonRejection, State},
    routing::{get, post},
    Json, Router,
};
use serde::Deserialize;

use crate::{
    error::Error,
    quiz::{self, AnswerValue, QuizResults, QuizView},
    state::AppState,
};

#[derive(Deserialize)]
pub struct AnswerRequest {
    pub value: Option<AnswerValue>,
}

pub fn routes(state: AppState) -> Router {
    Router::new()
        .route("/quiz", get(get_quiz))
        .route("/quiz/answer", post(answer_question))
        .route("/quiz/back", post(go_back))
        .route("/quiz/restart", post(restart_quiz))
        .route("/quiz/results", get(get_results))
        .with_state(state)
}

async fn get_quiz(State(state): State<AppState>) -> Result<Json<QuizView>, Error> {
    Ok(Json(quiz::current(&state.store).await?))
}

async fn answer_question(
    State(state): State<AppState>,
    body: Result<Json<AnswerRequest>, JsonRejection>,
) -> Result<Json<QuizView>, Error> {
    let Json(body) = body?;
    let value = body.value.unwrap_or(AnswerValue::Text(String::new()));
    Ok(Json(quiz::answer(&state.store, value, state.today()).await?))
}

async fn go_back(State(state): State<AppState>) -> Result<Json<QuizView>, Error> {
    Ok(Json(quiz::back(&state.store).await?))
}

async fn restart_quiz(State(state): State<AppState>) -> Result<Json<QuizView>, Error> {
    Ok(Json(quiz::restart(&state.store).await?))
}

async fn get_results(State(state): State<AppState>) -> Result<Json<QuizResults>, Error> {
    Ok(Json(quiz::results(&state.store, state.today()).await?))
}
