use axum::{
    async_trait,
    extract::{FromRef, FromRequestParts},
    http::request::Parts,
};
use axum_extra::extract::cookie::CookieJar;
use tracing::warn;

use super::{jwt::SessionKeys, services::resolve_session, session::SessionIdentity};
use crate::{error::AppError, state::AppState};

/// Extracts the session cookie and requires it to belong to a teacher.
pub struct TeacherSession(pub SessionIdentity);

#[async_trait]
impl FromRequestParts<AppState> for TeacherSession {
    type Rejection = AppError;

    async fn from_request_parts(
        parts: &mut Parts,
        state: &AppState,
    ) -> Result<Self, Self::Rejection> {
        let jar = CookieJar::from_headers(&parts.headers);
        let token = jar
            .get(&state.config.session.cookie_name)
            .map(|c| c.value().to_string())
            .ok_or(AppError::Unauthorized)?;

        let keys = SessionKeys::from_ref(state);
        let identity = resolve_session(&state.db, &keys, &token)
            .await?
            .ok_or(AppError::Unauthorized)?;

        if !identity.is_teacher() {
            warn!(user_id = identity.user_id, role = %identity.role, "non-teacher session");
            return Err(AppError::Unauthorized);
        }

        Ok(TeacherSession(identity))
    }
}
