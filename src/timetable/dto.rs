use serde::{Deserialize, Deserializer, Serialize};

use super::repo_types::EntryFields;
use crate::error::AppError;

/// Body of `POST /api/timetable`. Everything is optional on the wire so that
/// missing fields surface as validation errors rather than parse failures.
#[derive(Debug, Default, Deserialize)]
pub struct TimetableRequest {
    pub action: Option<String>,
    /// Accepts `7` or `"7"`; form-driven clients send ids as strings.
    #[serde(default, deserialize_with = "lenient_id")]
    pub id: Option<i64>,
    pub day: Option<String>,
    pub start_time: Option<String>,
    pub end_time: Option<String>,
    pub subject: Option<String>,
    pub room: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum TimetableCommand {
    Add(EntryFields),
    Update { id: i64, fields: EntryFields },
    Delete { id: i64 },
}

impl TimetableRequest {
    /// Resolves the `action` discriminator and checks the fields it needs.
    pub fn into_command(self) -> Result<TimetableCommand, AppError> {
        match self.action.as_deref() {
            Some("add") => Ok(TimetableCommand::Add(self.into_fields()?)),
            Some("update") => {
                let id = required_id(self.id)?;
                Ok(TimetableCommand::Update {
                    id,
                    fields: self.into_fields()?,
                })
            }
            Some("delete") => Ok(TimetableCommand::Delete {
                id: required_id(self.id)?,
            }),
            _ => Err(AppError::InvalidAction),
        }
    }

    fn into_fields(self) -> Result<EntryFields, AppError> {
        Ok(EntryFields {
            day: required(self.day, "day")?,
            start_time: required(self.start_time, "start_time")?,
            end_time: required(self.end_time, "end_time")?,
            subject: required(self.subject, "subject")?,
            room: required(self.room, "room")?,
        })
    }
}

fn required(value: Option<String>, name: &str) -> Result<String, AppError> {
    value.ok_or_else(|| AppError::Validation(format!("missing field: {name}")))
}

fn required_id(id: Option<i64>) -> Result<i64, AppError> {
    id.ok_or_else(|| AppError::Validation("missing field: id".into()))
}

fn lenient_id<'de, D>(deserializer: D) -> Result<Option<i64>, D::Error>
where
    D: Deserializer<'de>,
{
    #[derive(Deserialize)]
    #[serde(untagged)]
    enum IdRepr {
        Num(i64),
        Text(String),
    }

    match Option::<IdRepr>::deserialize(deserializer)? {
        None => Ok(None),
        Some(IdRepr::Num(n)) => Ok(Some(n)),
        Some(IdRepr::Text(s)) => s
            .trim()
            .parse::<i64>()
            .map(Some)
            .map_err(|_| serde::de::Error::custom(format!("invalid id: {s:?}"))),
    }
}

#[derive(Debug, Serialize)]
pub struct MutationResponse {
    pub success: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub id: Option<i64>,
}

impl MutationResponse {
    pub fn ok() -> Self {
        Self {
            success: true,
            id: None,
        }
    }

    pub fn created(id: i64) -> Self {
        Self {
            success: true,
            id: Some(id),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn parse(v: serde_json::Value) -> Result<TimetableCommand, AppError> {
        serde_json::from_value::<TimetableRequest>(v)
            .expect("request should deserialize")
            .into_command()
    }

    #[test]
    fn add_takes_fields_verbatim() {
        let cmd = parse(serde_json::json!({
            "action": "add",
            "day": "Funday",
            "start_time": "25:99",
            "end_time": "08:00",
            "subject": "CS101",
            "room": "Room 4"
        }))
        .unwrap();
        assert_eq!(
            cmd,
            TimetableCommand::Add(EntryFields {
                day: "Funday".into(),
                start_time: "25:99".into(),
                end_time: "08:00".into(),
                subject: "CS101".into(),
                room: "Room 4".into(),
            })
        );
    }

    #[test]
    fn unknown_or_missing_action_is_invalid() {
        let err = parse(serde_json::json!({ "action": "archive" })).unwrap_err();
        assert!(matches!(err, AppError::InvalidAction));
        let err = parse(serde_json::json!({ "day": "Monday" })).unwrap_err();
        assert!(matches!(err, AppError::InvalidAction));
    }

    #[test]
    fn missing_fields_are_named() {
        let err = parse(serde_json::json!({
            "action": "add", "day": "Monday", "start_time": "09:00",
            "end_time": "10:00", "subject": "CS101"
        }))
        .unwrap_err();
        assert_eq!(err.to_string(), "missing field: room");

        let err = parse(serde_json::json!({ "action": "delete" })).unwrap_err();
        assert_eq!(err.to_string(), "missing field: id");

        let err = parse(serde_json::json!({
            "action": "update", "day": "Monday", "start_time": "09:00",
            "end_time": "10:00", "subject": "CS101", "room": "R"
        }))
        .unwrap_err();
        assert_eq!(err.to_string(), "missing field: id");
    }

    #[test]
    fn delete_ignores_entry_fields() {
        let cmd = parse(serde_json::json!({ "action": "delete", "id": 7 })).unwrap();
        assert_eq!(cmd, TimetableCommand::Delete { id: 7 });
    }

    #[test]
    fn numeric_string_ids_are_accepted() {
        let cmd = parse(serde_json::json!({ "action": "delete", "id": "7" })).unwrap();
        assert_eq!(cmd, TimetableCommand::Delete { id: 7 });

        let err = parse(serde_json::json!({ "action": "delete", "id": null })).unwrap_err();
        assert_eq!(err.to_string(), "missing field: id");

        let bad = serde_json::from_value::<TimetableRequest>(
            serde_json::json!({ "action": "delete", "id": "abc" }),
        );
        assert!(bad.is_err());
    }

    #[test]
    fn mutation_response_omits_absent_id() {
        let ok = serde_json::to_value(MutationResponse::ok()).unwrap();
        assert_eq!(ok, serde_json::json!({ "success": true }));
        let created = serde_json::to_value(MutationResponse::created(1)).unwrap();
        assert_eq!(created, serde_json::json!({ "success": true, "id": 1 }));
    }
}
