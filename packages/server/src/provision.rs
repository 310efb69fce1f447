//! Administrative provisioning of classrooms and accounts.
//!
//! There is no HTTP surface for this; the bootstrap seed and operator
//! tooling call these functions directly.

use chrono::Utc;
use sea_orm::{ActiveModelTrait, ConnectionTrait, DbErr, Set, SqlErr};
use thiserror::Error;
use tracing::info;

use crate::entity::{classroom, student, teacher, user};
use crate::error::AppError;
use crate::utils::hash;

#[derive(Debug, Error)]
pub enum ProvisionError {
    #[error("{0}")]
    Invalid(String),
    #[error("{0} is already taken")]
    Duplicate(&'static str),
    #[error("password hashing failed: {0}")]
    Hash(#[from] anyhow::Error),
    #[error(transparent)]
    Db(#[from] DbErr),
}

impl From<ProvisionError> for AppError {
    fn from(err: ProvisionError) -> Self {
        match err {
            ProvisionError::Invalid(msg) => AppError::Validation(msg),
            ProvisionError::Duplicate(field) => {
                AppError::Conflict(format!("{field} is already taken"))
            }
            ProvisionError::Hash(e) => AppError::Internal(e.to_string()),
            ProvisionError::Db(e) => AppError::from(e),
        }
    }
}

fn validate_len(field: &str, value: &str, max: usize) -> Result<String, ProvisionError> {
    let value = value.trim();
    if value.is_empty() || value.chars().count() > max {
        return Err(ProvisionError::Invalid(format!(
            "{field} must be 1-{max} characters"
        )));
    }
    Ok(value.to_string())
}

/// Map a unique-constraint violation on insert to `Duplicate(field)`.
fn on_unique(field: &'static str) -> impl FnOnce(DbErr) -> ProvisionError {
    move |e| match e.sql_err() {
        Some(SqlErr::UniqueConstraintViolation(_)) => ProvisionError::Duplicate(field),
        _ => ProvisionError::Db(e),
    }
}

pub async fn create_classroom<C: ConnectionTrait>(
    db: &C,
    name: &str,
) -> Result<classroom::Model, ProvisionError> {
    let name = validate_len("Classroom name", name, 50)?;

    let model = classroom::ActiveModel {
        name: Set(name),
        ..Default::default()
    }
    .insert(db)
    .await
    .map_err(on_unique("Classroom name"))?;

    info!(classroom_id = model.id, name = %model.name, "Classroom created");
    Ok(model)
}

pub async fn create_user<C: ConnectionTrait>(
    db: &C,
    username: &str,
    password: &str,
    is_superuser: bool,
) -> Result<user::Model, ProvisionError> {
    let username = validate_len("Username", username, 150)?;
    if password.is_empty() {
        return Err(ProvisionError::Invalid("Password must not be empty".into()));
    }
    let hash = hash::hash_password(password)?;

    let model = user::ActiveModel {
        username: Set(username),
        password: Set(hash),
        is_superuser: Set(is_superuser),
        created_at: Set(Utc::now()),
        ..Default::default()
    }
    .insert(db)
    .await
    .map_err(on_unique("Username"))?;

    info!(user_id = model.id, username = %model.username, is_superuser, "User created");
    Ok(model)
}

/// Attach a teacher record to an existing user.
pub async fn create_teacher<C: ConnectionTrait>(
    db: &C,
    user_id: i32,
    subject: &str,
    classroom_id: Option<i32>,
) -> Result<teacher::Model, ProvisionError> {
    let subject = validate_len("Subject", subject, 100)?;

    let model = teacher::ActiveModel {
        user_id: Set(user_id),
        subject: Set(subject),
        classroom_id: Set(classroom_id),
        ..Default::default()
    }
    .insert(db)
    .await
    .map_err(on_unique("Teacher account"))?;

    info!(teacher_id = model.id, user_id, ?classroom_id, "Teacher created");
    Ok(model)
}

/// Attach a student record to an existing user.
pub async fn create_student<C: ConnectionTrait>(
    db: &C,
    user_id: i32,
    roll_number: &str,
    classroom_id: i32,
) -> Result<student::Model, ProvisionError> {
    let roll_number = validate_len("Roll number", roll_number, 20)?;

    let model = student::ActiveModel {
        user_id: Set(user_id),
        roll_number: Set(roll_number),
        classroom_id: Set(classroom_id),
        ..Default::default()
    }
    .insert(db)
    .await
    .map_err(|e| match e.sql_err() {
        Some(SqlErr::UniqueConstraintViolation(detail)) if detail.contains("roll_number") => {
            ProvisionError::Duplicate("Roll number")
        }
        Some(SqlErr::UniqueConstraintViolation(_)) => ProvisionError::Duplicate("Student account"),
        _ => ProvisionError::Db(e),
    })?;

    info!(student_id = model.id, user_id, classroom_id, "Student created");
    Ok(model)
}
