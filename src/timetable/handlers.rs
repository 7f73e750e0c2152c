use axum::{
    extract::{rejection::JsonRejection, State},
    response::{Html, IntoResponse, Redirect, Response},
    routing::get,
    Json, Router,
};
use tracing::{instrument, warn};

use super::{
    dto::{MutationResponse, TimetableRequest},
    repo_types::TimetableEntry,
    services,
};
use crate::{auth::TeacherSession, error::AppError, state::AppState, views};

pub fn timetable_routes() -> Router<AppState> {
    Router::new()
        .route("/dashboard", get(dashboard))
        .route("/api/timetable", get(list_entries).post(mutate))
}

/// Without a teacher session the browser is sent back to the landing page.
#[instrument(skip_all)]
pub async fn dashboard(
    State(state): State<AppState>,
    session: Option<TeacherSession>,
) -> Response {
    let Some(TeacherSession(identity)) = session else {
        return Redirect::to("/").into_response();
    };
    match services::list(&state.db, &identity).await {
        Ok(entries) => Html(views::dashboard_page(&identity.name, &entries)).into_response(),
        Err(e) => e.into_response(),
    }
}

#[instrument(skip_all)]
pub async fn list_entries(
    State(state): State<AppState>,
    TeacherSession(identity): TeacherSession,
) -> Result<Json<Vec<TimetableEntry>>, AppError> {
    let entries = services::list(&state.db, &identity).await?;
    Ok(Json(entries))
}

/// `POST /api/timetable` with an `action` of `add`, `update` or `delete`.
/// The session is checked before the body is looked at.
#[instrument(skip_all)]
pub async fn mutate(
    State(state): State<AppState>,
    TeacherSession(identity): TeacherSession,
    payload: Result<Json<TimetableRequest>, JsonRejection>,
) -> Result<Json<MutationResponse>, AppError> {
    let Json(request) = payload.map_err(|e| {
        warn!(error = %e, "malformed timetable payload");
        AppError::Validation(e.body_text())
    })?;
    let command = request.into_command()?;
    let res = services::apply(&state.db, &identity, command).await?;
    Ok(Json(res))
}
