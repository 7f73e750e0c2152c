use time::OffsetDateTime;
use timetable::{app, auth::session::Session, db, seed, state::AppState};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    dotenvy::dotenv().ok();

    let env_filter = std::env::var("RUST_LOG")
        .unwrap_or_else(|_| "timetable=debug,axum=info,tower_http=info".to_string());
    let json_logs = std::env::var("LOG_FORMAT")
        .map(|v| v == "json")
        .unwrap_or(false);

    if json_logs {
        tracing_subscriber::fmt()
            .with_env_filter(env_filter)
            .with_target(false)
            .json()
            .init();
    } else {
        tracing_subscriber::fmt().with_env_filter(env_filter).init();
    }

    let app_state = AppState::init().await?;
    db::migrate(&app_state.db).await?;

    let purged = Session::purge_expired(&app_state.db, OffsetDateTime::now_utc()).await?;
    if purged > 0 {
        tracing::info!(purged, "expired sessions removed");
    }

    if let Some(seed_cfg) = &app_state.config.seed {
        seed::ensure_seed_teacher(&app_state.db, seed_cfg).await?;
    }

    let config = app_state.config.clone();
    let router = app::build_app(app_state);
    app::serve(&config, router).await
}
