use sea_orm::entity::prelude::*;
use serde::{Deserialize, Serialize};

/// A teacher's self check-in. At most one row per teacher per date.
#[sea_orm::model]
#[derive(Clone, Debug, PartialEq, Eq, DeriveEntityModel, Serialize, Deserialize)]
#[sea_orm(table_name = "teacher_attendance")]
pub struct Model {
    #[sea_orm(primary_key)]
    pub id: i32,

    #[sea_orm(unique_key = "teacher_date")]
    pub teacher_id: i32,
    #[sea_orm(belongs_to, from = "teacher_id", to = "id", on_delete = "Cascade")]
    pub teacher: HasOne<super::teacher::Entity>,

    /// Snapshot of the teacher's classroom at check-in time.
    pub classroom_id: Option<i32>,
    #[sea_orm(belongs_to, from = "classroom_id", to = "id", on_delete = "Cascade")]
    pub classroom: HasOne<super::classroom::Entity>,

    #[sea_orm(unique_key = "teacher_date")]
    pub date: Date,

    #[sea_orm(default_value = true)]
    pub present: bool,

    pub created_at: DateTimeUtc,
}

impl ActiveModelBehavior for ActiveModel {}
