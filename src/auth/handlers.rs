use axum::{
    extract::{FromRef, Query, State},
    http::StatusCode,
    response::{Html, IntoResponse, Redirect, Response},
    routing::{get, post},
    Form, Router,
};
use axum_extra::extract::cookie::{Cookie, CookieJar, SameSite};
use tracing::{error, info, instrument};

use crate::{
    auth::{
        dto::{IndexQuery, LoginForm},
        jwt::SessionKeys,
        services,
    },
    config::SessionConfig,
    error::AppError,
    state::AppState,
    views,
};

pub fn auth_routes() -> Router<AppState> {
    Router::new()
        .route("/", get(index))
        .route("/login", post(login))
        .route("/logout", get(logout))
}

pub(crate) fn session_cookie(cfg: &SessionConfig, token: String) -> Cookie<'static> {
    Cookie::build((cfg.cookie_name.clone(), token))
        .path("/")
        .http_only(true)
        .same_site(SameSite::Lax)
        .secure(cfg.cookie_secure)
        .max_age(time::Duration::minutes(cfg.ttl_minutes()))
        .build()
}

fn cleared_cookie(cfg: &SessionConfig) -> Cookie<'static> {
    Cookie::build((cfg.cookie_name.clone(), "")).path("/").build()
}

#[instrument(skip_all)]
pub async fn index(Query(q): Query<IndexQuery>) -> Html<String> {
    Html(views::index_page(q.error.as_deref()))
}

#[instrument(skip(state, jar, form))]
pub async fn login(
    State(state): State<AppState>,
    jar: CookieJar,
    Form(form): Form<LoginForm>,
) -> Response {
    let identity = match services::login(&state.db, &form.email, &form.password).await {
        Ok(identity) => identity,
        Err(AppError::InvalidCredentials) => {
            return Html(views::index_page(Some("Invalid credentials"))).into_response();
        }
        Err(AppError::UnsupportedRole) => {
            return (
                StatusCode::FORBIDDEN,
                Html(views::index_page(Some("Role not supported yet"))),
            )
                .into_response();
        }
        Err(e) => return e.into_response(),
    };

    let cfg = &state.config.session;
    let keys = SessionKeys::from_ref(&state);

    // a fresh login replaces whatever session this browser held before
    let previous = jar.get(&cfg.cookie_name).map(|c| c.value().to_string());
    if let Err(e) = services::logout(&state.db, &keys, previous.as_deref()).await {
        error!(error = %e, "failed to drop previous session");
    }

    match services::open_session(&state.db, &keys, &identity).await {
        Ok(token) => {
            info!(user_id = identity.user_id, "teacher logged in");
            (jar.add(session_cookie(cfg, token)), Redirect::to("/dashboard")).into_response()
        }
        Err(e) => e.into_response(),
    }
}

#[instrument(skip_all)]
pub async fn logout(State(state): State<AppState>, jar: CookieJar) -> (CookieJar, Redirect) {
    let cfg = &state.config.session;
    let keys = SessionKeys::from_ref(&state);
    let token = jar.get(&cfg.cookie_name).map(|c| c.value().to_string());

    if let Err(e) = services::logout(&state.db, &keys, token.as_deref()).await {
        error!(error = %e, "failed to delete session row");
    }

    (jar.remove(cleared_cookie(cfg)), Redirect::to("/"))
}
