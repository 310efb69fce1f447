use chrono::Utc;
use sea_orm::sea_query::{Index, IndexCreateStatement, OnConflict, PostgresQueryBuilder};
use sea_orm::*;
use tracing::info;

use crate::config::BootstrapConfig;
use crate::entity::{complaint, student_attendance, teacher_attendance, user};
use crate::utils::hash;

/// Create the configured bootstrap superuser if it does not exist yet.
///
/// An existing account with the same username is left untouched, including
/// its password.
pub async fn seed_superuser(db: &DatabaseConnection, config: &BootstrapConfig) -> anyhow::Result<()> {
    let (Some(username), Some(password)) = (
        config.superuser_username.as_deref(),
        config.superuser_password.as_deref(),
    ) else {
        return Ok(());
    };

    let model = user::ActiveModel {
        username: Set(username.trim().to_string()),
        password: Set(hash::hash_password(password)?),
        is_superuser: Set(true),
        created_at: Set(Utc::now()),
        ..Default::default()
    };

    let result = user::Entity::insert(model)
        .on_conflict(
            OnConflict::column(user::Column::Username)
                .do_nothing()
                .to_owned(),
        )
        .exec_without_returning(db)
        .await;

    match result {
        Ok(0) | Err(DbErr::RecordNotInserted) => {}
        Ok(_) => info!(username, "Seeded bootstrap superuser"),
        Err(e) => return Err(e.into()),
    }

    Ok(())
}

/// Ensure required database indexes exist.
///
/// SeaORM's schema-sync doesn't support composite non-unique indexes,
/// so we create them manually on startup.
pub async fn ensure_indexes(db: &DatabaseConnection) -> Result<(), DbErr> {
    let indexes: [(&str, IndexCreateStatement); 3] = [
        // "has this class been marked today?" and the admin distinct-classroom count
        (
            "idx_student_attendance_classroom_date",
            Index::create()
                .if_not_exists()
                .name("idx_student_attendance_classroom_date")
                .table(student_attendance::Entity)
                .col(student_attendance::Column::ClassroomId)
                .col(student_attendance::Column::Date)
                .to_owned(),
        ),
        // teachers checked in today
        (
            "idx_teacher_attendance_date_present",
            Index::create()
                .if_not_exists()
                .name("idx_teacher_attendance_date_present")
                .table(teacher_attendance::Entity)
                .col(teacher_attendance::Column::Date)
                .col(teacher_attendance::Column::Present)
                .to_owned(),
        ),
        // recent complaints
        (
            "idx_complaint_created",
            Index::create()
                .if_not_exists()
                .name("idx_complaint_created")
                .table(complaint::Entity)
                .col(complaint::Column::CreatedAt)
                .to_owned(),
        ),
    ];

    for (name, stmt) in indexes {
        match db.execute_unprepared(&stmt.to_string(PostgresQueryBuilder)).await {
            Ok(_) => info!("Ensured index {} exists", name),
            Err(e) => tracing::warn!("Failed to create index {}: {}", name, e),
        }
    }

    Ok(())
}
