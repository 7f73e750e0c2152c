use crate::auth::repo_types::{NewUser, User};
use sqlx::SqlitePool;

/// Emails are stored and looked up trimmed and lower-cased.
pub fn normalize_email(email: &str) -> String {
    email.trim().to_lowercase()
}

impl User {
    /// Find a user by email, ignoring case and surrounding whitespace.
    pub async fn find_by_email(db: &SqlitePool, email: &str) -> anyhow::Result<Option<User>> {
        let email = normalize_email(email);
        let user = sqlx::query_as::<_, User>(
            r#"
            SELECT id, email, password_hash, role, name, department
            FROM users
            WHERE email = ?
            "#,
        )
        .bind(&email)
        .fetch_optional(db)
        .await?;
        Ok(user)
    }

    pub async fn find_by_id(db: &SqlitePool, id: i64) -> anyhow::Result<Option<User>> {
        let user = sqlx::query_as::<_, User>(
            r#"
            SELECT id, email, password_hash, role, name, department
            FROM users
            WHERE id = ?
            "#,
        )
        .bind(id)
        .fetch_optional(db)
        .await?;
        Ok(user)
    }

    /// Insert a user with a pre-hashed password. Fails on a duplicate email,
    /// where duplicates are compared after normalization.
    pub async fn create(db: &SqlitePool, new: NewUser<'_>) -> anyhow::Result<User> {
        let email = normalize_email(new.email);
        let id = sqlx::query(
            r#"
            INSERT INTO users (email, password_hash, role, name, department)
            VALUES (?, ?, ?, ?, ?)
            "#,
        )
        .bind(&email)
        .bind(new.password_hash)
        .bind(new.role)
        .bind(new.name)
        .bind(new.department)
        .execute(db)
        .await?
        .last_insert_rowid();

        Ok(User {
            id,
            email,
            password_hash: new.password_hash.to_string(),
            role: new.role,
            name: new.name.map(str::to_string),
            department: new.department.map(str::to_string),
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{auth::repo_types::Role, db};

    async fn store() -> SqlitePool {
        let db = db::connect_in_memory().await.expect("in-memory db");
        db::migrate(&db).await.expect("migrate");
        db
    }

    fn teacher(email: &str) -> NewUser<'_> {
        NewUser {
            email,
            password_hash: "$argon2id$placeholder",
            role: Role::Teacher,
            name: Some("Dr. Smith"),
            department: Some("CS"),
        }
    }

    #[tokio::test]
    async fn create_then_lookup_by_email_and_id() {
        let db = store().await;
        let created = User::create(&db, teacher("a@uvas.edu.pk")).await.unwrap();

        let by_email = User::find_by_email(&db, "a@uvas.edu.pk").await.unwrap().unwrap();
        assert_eq!(by_email.id, created.id);
        assert_eq!(by_email.role, Role::Teacher);
        assert_eq!(by_email.department.as_deref(), Some("CS"));

        let by_id = User::find_by_id(&db, created.id).await.unwrap().unwrap();
        assert_eq!(by_id.email, "a@uvas.edu.pk");
        assert!(User::find_by_email(&db, "nobody@uvas.edu.pk").await.unwrap().is_none());
    }

    #[tokio::test]
    async fn duplicate_email_is_rejected() {
        let db = store().await;
        User::create(&db, teacher("dup@uvas.edu.pk")).await.unwrap();
        assert!(User::create(&db, teacher("dup@uvas.edu.pk")).await.is_err());
        assert!(User::create(&db, teacher(" DUP@uvas.edu.pk")).await.is_err());
    }

    #[tokio::test]
    async fn email_is_normalized_on_write_and_lookup() {
        let db = store().await;
        let created = User::create(&db, teacher("  Mixed@UVAS.edu.pk ")).await.unwrap();
        assert_eq!(created.email, "mixed@uvas.edu.pk");

        let found = User::find_by_email(&db, "MIXED@uvas.EDU.pk").await.unwrap().unwrap();
        assert_eq!(found.id, created.id);
        assert_eq!(found.email, "mixed@uvas.edu.pk");
    }

    #[test]
    fn display_name_falls_back_to_email() {
        let user = User {
            id: 1,
            email: "x@uvas.edu.pk".into(),
            password_hash: String::new(),
            role: Role::Student,
            name: None,
            department: None,
        };
        assert_eq!(user.display_name(), "x@uvas.edu.pk");
    }
}
