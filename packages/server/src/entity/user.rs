use sea_orm::entity::prelude::*;
use serde::{Deserialize, Serialize};

/// A login identity. Its role is derived from the superuser flag and from
/// whichever of `teacher` / `student` is attached to it.
#[sea_orm::model]
#[derive(Clone, Debug, PartialEq, Eq, DeriveEntityModel, Serialize, Deserialize)]
#[sea_orm(table_name = "user")]
pub struct Model {
    #[sea_orm(primary_key)]
    pub id: i32,

    #[sea_orm(unique)]
    pub username: String,
    /// Argon2 PHC string.
    #[serde(skip_serializing)]
    pub password: String,

    #[sea_orm(default_value = false)]
    pub is_superuser: bool,

    #[sea_orm(has_one)]
    pub teacher: HasOne<super::teacher::Entity>,
    #[sea_orm(has_one)]
    pub student: HasOne<super::student::Entity>,

    pub created_at: DateTimeUtc,
}

impl ActiveModelBehavior for ActiveModel {}
