use sqlx::SqlitePool;
use time::OffsetDateTime;
use tracing::{info, warn};

use crate::{
    auth::{
        jwt::SessionKeys,
        password::verify_password_blocking,
        repo_types::{Role, User},
        session::{Session, SessionIdentity},
    },
    error::AppError,
};

/// Checks credentials and returns the identity a session should carry.
///
/// Unknown email and wrong password both fail with the same
/// `InvalidCredentials`. Correct credentials for a non-teacher account fail with
/// `UnsupportedRole`.
pub async fn login(
    db: &SqlitePool,
    email: &str,
    password: &str,
) -> Result<SessionIdentity, AppError> {
    let user = match User::find_by_email(db, email).await? {
        Some(u) => u,
        None => {
            warn!(email = %email.trim(), "login unknown email");
            return Err(AppError::InvalidCredentials);
        }
    };

    let ok = verify_password_blocking(password.to_string(), user.password_hash.clone()).await?;
    if !ok {
        warn!(user_id = user.id, "login invalid password");
        return Err(AppError::InvalidCredentials);
    }

    if user.role != Role::Teacher {
        warn!(user_id = user.id, role = %user.role, "login with unsupported role");
        return Err(AppError::UnsupportedRole);
    }

    info!(user_id = user.id, "credentials accepted");
    Ok(SessionIdentity {
        user_id: user.id,
        role: user.role,
        name: user.display_name(),
    })
}

/// Persists a session for `identity` and returns the signed cookie token.
pub async fn open_session(
    db: &SqlitePool,
    keys: &SessionKeys,
    identity: &SessionIdentity,
) -> Result<String, AppError> {
    let now = OffsetDateTime::now_utc();
    let sid = Session::create(db, identity, keys.expires_at(now)).await?;
    let token = keys.sign(sid, now)?;
    info!(user_id = identity.user_id, "session opened");
    Ok(token)
}

/// Resolves a cookie token to its identity. Any failure means "no session".
pub async fn resolve_session(
    db: &SqlitePool,
    keys: &SessionKeys,
    token: &str,
) -> Result<Option<SessionIdentity>, AppError> {
    let claims = match keys.verify(token) {
        Ok(c) => c,
        Err(_) => {
            warn!("invalid or expired session token");
            return Ok(None);
        }
    };
    let identity = Session::find_active(db, claims.sid, OffsetDateTime::now_utc()).await?;
    Ok(identity)
}

/// Destroys the session behind `token`. No token, or a bad one, is a no-op.
pub async fn logout(
    db: &SqlitePool,
    keys: &SessionKeys,
    token: Option<&str>,
) -> Result<(), AppError> {
    let Some(token) = token else {
        return Ok(());
    };
    if let Ok(claims) = keys.verify(token) {
        Session::delete(db, claims.sid).await?;
        info!(session_id = %claims.sid, "session closed");
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{
        auth::{password::hash_password, repo_types::NewUser},
        config::SessionConfig,
        db,
    };

    fn keys() -> SessionKeys {
        SessionKeys::from_config(&SessionConfig {
            secret: "test-secret".into(),
            issuer: "timetable".into(),
            audience: "timetable-web".into(),
            ttl_minutes: 30,
            cookie_name: "timetable_session".into(),
            cookie_secure: false,
        })
    }

    async fn store() -> SqlitePool {
        let db = db::connect_in_memory().await.unwrap();
        db::migrate(&db).await.unwrap();
        let hash = hash_password("password123").unwrap();
        for (email, role) in [
            ("teacher@uvas.edu.pk", Role::Teacher),
            ("admin@uvas.edu.pk", Role::Admin),
        ] {
            User::create(
                &db,
                NewUser {
                    email,
                    password_hash: &hash,
                    role,
                    name: Some("Dr. Smith"),
                    department: Some("CS"),
                },
            )
            .await
            .unwrap();
        }
        db
    }

    #[tokio::test]
    async fn teacher_login_yields_teacher_identity() {
        let db = store().await;
        let identity = login(&db, " Teacher@uvas.edu.pk", "password123").await.unwrap();
        assert_eq!(identity.role, Role::Teacher);
        assert_eq!(identity.name, "Dr. Smith");
    }

    #[tokio::test]
    async fn bad_credentials_are_indistinguishable() {
        let db = store().await;
        let wrong_pw = login(&db, "teacher@uvas.edu.pk", "nope").await.unwrap_err();
        let unknown = login(&db, "ghost@uvas.edu.pk", "password123").await.unwrap_err();
        let empty = login(&db, "", "").await.unwrap_err();
        for err in [wrong_pw, unknown, empty] {
            assert!(matches!(err, AppError::InvalidCredentials));
        }
    }

    #[tokio::test]
    async fn stored_emails_log_in_as_submitted() {
        let db = store().await;
        let hash = hash_password("s3cret").unwrap();
        for email in ["Mixed@UVAS.edu.pk", "admin@localhost"] {
            User::create(
                &db,
                NewUser {
                    email,
                    password_hash: &hash,
                    role: Role::Teacher,
                    name: None,
                    department: None,
                },
            )
            .await
            .unwrap();
            let identity = login(&db, email, "s3cret").await.unwrap();
            assert_eq!(identity.role, Role::Teacher);
            assert_eq!(identity.name, email.to_lowercase());
        }
    }

    #[tokio::test]
    async fn non_teacher_role_is_refused() {
        let db = store().await;
        let err = login(&db, "admin@uvas.edu.pk", "password123").await.unwrap_err();
        assert!(matches!(err, AppError::UnsupportedRole));
    }

    #[tokio::test]
    async fn session_lifecycle() {
        let db = store().await;
        let keys = keys();
        let identity = login(&db, "teacher@uvas.edu.pk", "password123").await.unwrap();

        let token = open_session(&db, &keys, &identity).await.unwrap();
        let resolved = resolve_session(&db, &keys, &token).await.unwrap();
        assert_eq!(resolved, Some(identity));

        logout(&db, &keys, Some(&token)).await.unwrap();
        assert_eq!(resolve_session(&db, &keys, &token).await.unwrap(), None);

        // idempotent
        logout(&db, &keys, Some(&token)).await.unwrap();
        logout(&db, &keys, None).await.unwrap();
        logout(&db, &keys, Some("garbage")).await.unwrap();
    }
}
