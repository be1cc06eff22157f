//! SQL behind the note, calculation and account server functions.
//!
//! Every read and write is scoped by [`SessionUser`]: consultants reach only
//! rows they own, admins reach everything.

use sqlx::PgPool;
use store::{Calculation, Note, UserInfo};
use uuid::Uuid;

use crate::auth::SessionUser;
use crate::error::ApiError;
use crate::models::{calculations_from_rows, CalculationRow, NoteRow, User};

fn parse_id(id: &str, not_found: ApiError) -> Result<Uuid, ApiError> {
    Uuid::parse_str(id).map_err(|_| not_found)
}

async fn visible_calculation(
    pool: &PgPool,
    user: SessionUser,
    calculation_id: Uuid,
) -> Result<Option<CalculationRow>, ApiError> {
    let row: Option<CalculationRow> =
        sqlx::query_as("SELECT * FROM calculations WHERE id = $1 AND ($2 OR user_id = $3)")
            .bind(calculation_id)
            .bind(user.sees_all())
            .bind(user.id)
            .fetch_optional(pool)
            .await?;
    Ok(row)
}

pub async fn list_calculations(
    pool: &PgPool,
    user: SessionUser,
) -> Result<Vec<Calculation>, ApiError> {
    let rows: Vec<CalculationRow> = sqlx::query_as(
        "SELECT * FROM calculations WHERE ($1 OR user_id = $2) ORDER BY created_at DESC",
    )
    .bind(user.sees_all())
    .bind(user.id)
    .fetch_all(pool)
    .await?;

    Ok(calculations_from_rows(&rows))
}

pub async fn get_calculation(
    pool: &PgPool,
    user: SessionUser,
    id: &str,
) -> Result<Option<Calculation>, ApiError> {
    let Ok(id) = Uuid::parse_str(id) else {
        return Ok(None);
    };
    visible_calculation(pool, user, id)
        .await?
        .map(|row| row.to_calculation())
        .transpose()
}

pub async fn get_note(
    pool: &PgPool,
    user: SessionUser,
    calculation_id: &str,
) -> Result<Option<Note>, ApiError> {
    let calculation_id = parse_id(calculation_id, ApiError::CalculationNotFound)?;
    if visible_calculation(pool, user, calculation_id).await?.is_none() {
        return Err(ApiError::CalculationNotFound);
    }

    let row: Option<NoteRow> = sqlx::query_as("SELECT * FROM notes WHERE calculation_id = $1")
        .bind(calculation_id)
        .fetch_optional(pool)
        .await?;
    Ok(row.map(|r| r.to_note()))
}

/// Insert the note for a calculation. A calculation that already has a note
/// gets that note overwritten, so there is never more than one.
pub async fn create_note(
    pool: &PgPool,
    user: SessionUser,
    calculation_id: &str,
    content: &str,
) -> Result<Note, ApiError> {
    let calculation_id = parse_id(calculation_id, ApiError::CalculationNotFound)?;
    if visible_calculation(pool, user, calculation_id).await?.is_none() {
        return Err(ApiError::CalculationNotFound);
    }

    let row: NoteRow = sqlx::query_as(
        "INSERT INTO notes (calculation_id, user_id, content) VALUES ($1, $2, $3)
         ON CONFLICT (calculation_id) DO UPDATE SET
            content = EXCLUDED.content,
            updated_at = NOW()
         RETURNING *",
    )
    .bind(calculation_id)
    .bind(user.id)
    .bind(content)
    .fetch_one(pool)
    .await?;

    tracing::info!(note_id = %row.id, calculation_id = %calculation_id, "note saved");
    Ok(row.to_note())
}

pub async fn update_note(
    pool: &PgPool,
    user: SessionUser,
    note_id: &str,
    content: &str,
) -> Result<Note, ApiError> {
    let note_id = parse_id(note_id, ApiError::NoteNotFound)?;

    let row: Option<NoteRow> = sqlx::query_as(
        "UPDATE notes AS n SET content = $2, updated_at = NOW()
         FROM calculations AS c
         WHERE n.id = $1 AND c.id = n.calculation_id AND ($3 OR c.user_id = $4)
         RETURNING n.*",
    )
    .bind(note_id)
    .bind(content)
    .bind(user.sees_all())
    .bind(user.id)
    .fetch_optional(pool)
    .await?;

    row.map(|r| r.to_note()).ok_or(ApiError::NoteNotFound)
}

pub async fn find_user_by_email(pool: &PgPool, email: &str) -> Result<Option<User>, ApiError> {
    let user: Option<User> = sqlx::query_as("SELECT * FROM users WHERE email = $1")
        .bind(email)
        .fetch_optional(pool)
        .await?;
    Ok(user)
}

pub async fn update_email(pool: &PgPool, user_id: Uuid, email: &str) -> Result<UserInfo, ApiError> {
    let result: Result<User, sqlx::Error> = sqlx::query_as(
        "UPDATE users SET email = $2, updated_at = NOW() WHERE id = $1 RETURNING *",
    )
    .bind(user_id)
    .bind(email)
    .fetch_one(pool)
    .await;

    match result {
        Ok(user) => Ok(user.to_info()),
        Err(sqlx::Error::Database(e)) if e.is_unique_violation() => Err(ApiError::InvalidInput(
            "An account with this email already exists".to_string(),
        )),
        Err(e) => Err(e.into()),
    }
}

pub async fn update_password_hash(
    pool: &PgPool,
    user_id: Uuid,
    password_hash: &str,
) -> Result<(), ApiError> {
    sqlx::query("UPDATE users SET password_hash = $2, updated_at = NOW() WHERE id = $1")
        .bind(user_id)
        .bind(password_hash)
        .execute(pool)
        .await?;
    Ok(())
}

/// Normalise and sanity-check an email address.
pub fn normalize_email(email: &str) -> Result<String, ApiError> {
    let email = email.trim().to_lowercase();
    if email.is_empty() || !email.contains('@') {
        return Err(ApiError::InvalidInput("Invalid email address".to_string()));
    }
    Ok(email)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_normalize_email() {
        assert_eq!(
            normalize_email("  Ana@Example.COM ").unwrap(),
            "ana@example.com"
        );
        assert!(normalize_email("").is_err());
        assert!(normalize_email("no-at-sign").is_err());
    }

    #[test]
    fn test_malformed_ids_are_not_found() {
        assert!(matches!(
            parse_id("nope", ApiError::NoteNotFound),
            Err(ApiError::NoteNotFound)
        ));
        assert!(parse_id(&Uuid::nil().to_string(), ApiError::NoteNotFound).is_ok());
    }
}
