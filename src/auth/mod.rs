use crate::state::AppState;
use axum::Router;

mod dto;
pub mod extractors;
pub mod handlers;
pub mod jwt;
pub mod password;
pub mod repo;
pub mod repo_types;
pub mod services;
pub mod session;

pub use extractors::TeacherSession;
pub use repo_types::{NewUser, Role, User};
pub use session::SessionIdentity;

pub fn router() -> Router<AppState> {
    Router::new().merge(handlers::auth_routes())
}
