use sqlx::SqlitePool;
use tracing::{info, warn};

use super::{
    dto::{MutationResponse, TimetableCommand},
    repo,
    repo_types::{EntryFields, TimetableEntry},
};
use crate::{auth::SessionIdentity, error::AppError};

fn teacher_id(identity: &SessionIdentity) -> Result<i64, AppError> {
    if identity.is_teacher() {
        Ok(identity.user_id)
    } else {
        Err(AppError::Unauthorized)
    }
}

pub async fn list(
    db: &SqlitePool,
    identity: &SessionIdentity,
) -> Result<Vec<TimetableEntry>, AppError> {
    let teacher_id = teacher_id(identity)?;
    Ok(repo::list_by_teacher(db, teacher_id).await?)
}

pub async fn create(
    db: &SqlitePool,
    identity: &SessionIdentity,
    fields: &EntryFields,
) -> Result<i64, AppError> {
    let teacher_id = teacher_id(identity)?;
    let id = repo::insert(db, teacher_id, fields).await?;
    info!(teacher_id, entry_id = id, "timetable entry created");
    Ok(id)
}

/// Missing and foreign entries both fail with `NotFoundOrForbidden`.
pub async fn update(
    db: &SqlitePool,
    identity: &SessionIdentity,
    id: i64,
    fields: &EntryFields,
) -> Result<(), AppError> {
    let teacher_id = teacher_id(identity)?;
    if !repo::update_owned(db, teacher_id, id, fields).await? {
        warn!(teacher_id, entry_id = id, "update of missing or foreign entry");
        return Err(AppError::NotFoundOrForbidden);
    }
    info!(teacher_id, entry_id = id, "timetable entry updated");
    Ok(())
}

pub async fn delete(
    db: &SqlitePool,
    identity: &SessionIdentity,
    id: i64,
) -> Result<(), AppError> {
    let teacher_id = teacher_id(identity)?;
    if !repo::delete_owned(db, teacher_id, id).await? {
        warn!(teacher_id, entry_id = id, "delete of missing or foreign entry");
        return Err(AppError::NotFoundOrForbidden);
    }
    info!(teacher_id, entry_id = id, "timetable entry deleted");
    Ok(())
}

pub async fn apply(
    db: &SqlitePool,
    identity: &SessionIdentity,
    command: TimetableCommand,
) -> Result<MutationResponse, AppError> {
    match command {
        TimetableCommand::Add(fields) => {
            create(db, identity, &fields).await.map(MutationResponse::created)
        }
        TimetableCommand::Update { id, fields } => {
            update(db, identity, id, &fields).await?;
            Ok(MutationResponse::ok())
        }
        TimetableCommand::Delete { id } => {
            delete(db, identity, id).await?;
            Ok(MutationResponse::ok())
        }
    }
}
