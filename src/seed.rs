use anyhow::Context;
use sqlx::SqlitePool;
use tracing::{info, warn};

use crate::{
    auth::{password::hash_password_blocking, repo::normalize_email, NewUser, Role, User},
    config::SeedConfig,
};

/// First-run provisioning of the bootstrap teacher. Does nothing when an
/// account with the seed email already exists.
pub async fn ensure_seed_teacher(db: &SqlitePool, cfg: &SeedConfig) -> anyhow::Result<bool> {
    let email = normalize_email(&cfg.email);
    if User::find_by_email(db, &email).await?.is_some() {
        return Ok(false);
    }

    if cfg.default_password {
        warn!(
            email = %email,
            "seeding teacher with the built-in default password; set SEED_TEACHER_PASSWORD or disable SEED_TEACHER"
        );
    }

    let hash = hash_password_blocking(cfg.password.clone())
        .await
        .context("hash seed password")?;
    let user = User::create(
        db,
        NewUser {
            email: &email,
            password_hash: &hash,
            role: Role::Teacher,
            name: Some(&cfg.name),
            department: Some(&cfg.department),
        },
    )
    .await
    .context("insert seed teacher")?;

    info!(user_id = user.id, email = %user.email, "seed teacher created");
    Ok(true)
}
