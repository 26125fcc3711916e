use std::str::FromStr;

use chrono::{DateTime, Utc};
use flashy_core::model::{Card, Difficulty, Quiz, QuizFormat, QuizId, SavedCard};
use sqlx::Row;
use sqlx::sqlite::SqliteRow;

use crate::repository::StorageError;

pub(crate) fn ser<E: core::fmt::Display>(e: E) -> StorageError {
    StorageError::Serialization(e.to_string())
}

pub(crate) fn conn<E: core::fmt::Display>(e: E) -> StorageError {
    StorageError::Connection(e.to_string())
}

pub(crate) fn quiz_id_from_text(raw: &str) -> Result<QuizId, StorageError> {
    QuizId::from_str(raw).map_err(|_| StorageError::Serialization(format!("invalid quiz id: {raw}")))
}

pub(crate) fn map_saved_card_row(row: &SqliteRow) -> Result<SavedCard, StorageError> {
    let saved_at: DateTime<Utc> = row.try_get("saved_at").map_err(ser)?;
    let card = Card::new(
        row.try_get::<String, _>("question").map_err(ser)?,
        row.try_get::<String, _>("answer").map_err(ser)?,
    );
    Ok(SavedCard::new(card, saved_at))
}

/// Format and difficulty are parsed strictly. The card payload is left as
/// stored; it is only validated when the quiz is loaded for study.
pub(crate) fn map_quiz_row(row: &SqliteRow) -> Result<Quiz, StorageError> {
    let id: String = row.try_get("id").map_err(ser)?;
    let format: String = row.try_get("format").map_err(ser)?;
    let difficulty: String = row.try_get("difficulty").map_err(ser)?;

    Ok(Quiz::from_persisted(
        quiz_id_from_text(&id)?,
        row.try_get("name").map_err(ser)?,
        row.try_get("created_at").map_err(ser)?,
        row.try_get("card_data").map_err(ser)?,
        QuizFormat::from_str(&format).map_err(ser)?,
        Difficulty::from_str(&difficulty).map_err(ser)?,
        row.try_get("original_file_name").map_err(ser)?,
    ))
}
