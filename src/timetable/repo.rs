use sqlx::SqlitePool;

use super::repo_types::{EntryFields, TimetableEntry};

/// Entries owned by `teacher_id`, in insertion order.
pub async fn list_by_teacher(
    db: &SqlitePool,
    teacher_id: i64,
) -> anyhow::Result<Vec<TimetableEntry>> {
    let rows = sqlx::query_as::<_, TimetableEntry>(
        r#"
        SELECT id, teacher_id, day, start_time, end_time, subject, room
        FROM timetable
        WHERE teacher_id = ?
        ORDER BY id ASC
        "#,
    )
    .bind(teacher_id)
    .fetch_all(db)
    .await?;
    Ok(rows)
}

pub async fn insert(
    db: &SqlitePool,
    teacher_id: i64,
    fields: &EntryFields,
) -> anyhow::Result<i64> {
    let id = sqlx::query(
        r#"
        INSERT INTO timetable (teacher_id, day, start_time, end_time, subject, room)
        VALUES (?, ?, ?, ?, ?, ?)
        "#,
    )
    .bind(teacher_id)
    .bind(&fields.day)
    .bind(&fields.start_time)
    .bind(&fields.end_time)
    .bind(&fields.subject)
    .bind(&fields.room)
    .execute(db)
    .await?
    .last_insert_rowid();
    Ok(id)
}

/// Overwrites all five fields of an entry the teacher owns.
/// Returns false when no such owned entry exists.
pub async fn update_owned(
    db: &SqlitePool,
    teacher_id: i64,
    id: i64,
    fields: &EntryFields,
) -> anyhow::Result<bool> {
    let res = sqlx::query(
        r#"
        UPDATE timetable
           SET day = ?, start_time = ?, end_time = ?, subject = ?, room = ?
         WHERE id = ? AND teacher_id = ?
        "#,
    )
    .bind(&fields.day)
    .bind(&fields.start_time)
    .bind(&fields.end_time)
    .bind(&fields.subject)
    .bind(&fields.room)
    .bind(id)
    .bind(teacher_id)
    .execute(db)
    .await?;
    Ok(res.rows_affected() > 0)
}

pub async fn delete_owned(db: &SqlitePool, teacher_id: i64, id: i64) -> anyhow::Result<bool> {
    let res = sqlx::query("DELETE FROM timetable WHERE id = ? AND teacher_id = ?")
        .bind(id)
        .bind(teacher_id)
        .execute(db)
        .await?;
    Ok(res.rows_affected() > 0)
}
