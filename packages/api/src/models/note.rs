//! `notes` row.

use chrono::{DateTime, SecondsFormat, Utc};
use sqlx::FromRow;
use store::Note;
use uuid::Uuid;

#[derive(Debug, Clone, FromRow)]
pub struct NoteRow {
    pub id: Uuid,
    pub calculation_id: Uuid,
    pub user_id: Uuid,
    pub content: String,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl NoteRow {
    pub fn to_note(&self) -> Note {
        Note {
            id: self.id.to_string(),
            calculation_id: self.calculation_id.to_string(),
            content: self.content.clone(),
            updated_at: self.updated_at.to_rfc3339_opts(SecondsFormat::Secs, true),
        }
    }
}
