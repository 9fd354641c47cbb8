use axum::{
    extract::{rejection::JsonRejection, Path, State},
    http::StatusCode,
    routing::{get, post},
    Json, Router,
};
use axum_extra::extract::cookie::CookieJar;
use tracing::{debug, info, instrument};
use uuid::Uuid;

use super::dto::{MealListResponse, MealResponse, SummaryResponse};
use super::validate::{body_rejection, parse_meal_id, validate_meal, MealPayload};
use super::{repo, services};
use crate::{
    error::AppError,
    session::{provision, SessionId},
    state::AppState,
};

pub fn meal_routes() -> Router<AppState> {
    Router::new()
        .route("/meals", post(create_meal).get(list_meals))
        .route("/meals/summary", get(get_summary))
        .route(
            "/meals/:id",
            get(get_meal).put(update_meal).delete(delete_meal),
        )
}

/// POST /meals. The only endpoint allowed to start a session.
#[instrument(skip(state, jar, body))]
pub async fn create_meal(
    State(state): State<AppState>,
    jar: CookieJar,
    body: Result<Json<MealPayload>, JsonRejection>,
) -> Result<(StatusCode, CookieJar), AppError> {
    let Json(payload) = body.map_err(body_rejection)?;
    let input = validate_meal(payload)?;

    let (jar, session_id) = provision(jar);
    let id = Uuid::new_v4();
    repo::insert(&state.db, id, &session_id, &input).await?;

    info!(meal_id = %id, on_diet = input.is_on_the_diet, "meal created");
    Ok((StatusCode::CREATED, jar))
}

#[instrument(skip(state, session_id, body))]
pub async fn update_meal(
    State(state): State<AppState>,
    SessionId(session_id): SessionId,
    Path(id): Path<String>,
    body: Result<Json<MealPayload>, JsonRejection>,
) -> Result<StatusCode, AppError> {
    let id = parse_meal_id(&id)?;
    let Json(payload) = body.map_err(body_rejection)?;
    let input = validate_meal(payload)?;

    let affected = repo::update(&state.db, &session_id, id, &input).await?;
    if affected == 0 {
        debug!(meal_id = %id, "update matched no meal");
    } else {
        info!(meal_id = %id, "meal updated");
    }
    Ok(StatusCode::OK)
}

#[instrument(skip(state, session_id))]
pub async fn delete_meal(
    State(state): State<AppState>,
    SessionId(session_id): SessionId,
    Path(id): Path<String>,
) -> Result<StatusCode, AppError> {
    let id = parse_meal_id(&id)?;

    let affected = repo::delete(&state.db, &session_id, id).await?;
    if affected == 0 {
        debug!(meal_id = %id, "delete matched no meal");
    } else {
        info!(meal_id = %id, "meal deleted");
    }
    Ok(StatusCode::OK)
}

#[instrument(skip(state, session_id))]
pub async fn list_meals(
    State(state): State<AppState>,
    SessionId(session_id): SessionId,
) -> Result<Json<MealListResponse>, AppError> {
    let meals = repo::list_by_session(&state.db, &session_id).await?;
    Ok(Json(MealListResponse { meals }))
}

#[instrument(skip(state, session_id))]
pub async fn get_meal(
    State(state): State<AppState>,
    SessionId(session_id): SessionId,
    Path(id): Path<String>,
) -> Result<Json<MealResponse>, AppError> {
    let id = parse_meal_id(&id)?;
    let meal = repo::find_by_id(&state.db, &session_id, id).await?;
    Ok(Json(MealResponse { meal }))
}

#[instrument(skip(state, session_id))]
pub async fn get_summary(
    State(state): State<AppState>,
    SessionId(session_id): SessionId,
) -> Result<Json<SummaryResponse>, AppError> {
    let summary =
        services::summarize(&state.db, &session_id, state.config.streak_rule).await?;
    Ok(Json(summary))
}
