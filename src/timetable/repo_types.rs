use serde::{Deserialize, Serialize};
use sqlx::FromRow;

/// One scheduled class slot. Day and times are free text and never validated.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, FromRow)]
pub struct TimetableEntry {
    pub id: i64,
    pub teacher_id: i64,
    pub day: String,
    pub start_time: String,
    pub end_time: String,
    pub subject: String,
    pub room: String,
}

/// The five user-editable fields, always written together.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EntryFields {
    pub day: String,
    pub start_time: String,
    pub end_time: String,
    pub subject: String,
    pub room: String,
}

#[cfg(test)]
impl TimetableEntry {
    pub fn fields(&self) -> EntryFields {
        EntryFields {
            day: self.day.clone(),
            start_time: self.start_time.clone(),
            end_time: self.end_time.clone(),
            subject: self.subject.clone(),
            room: self.room.clone(),
        }
    }
}
