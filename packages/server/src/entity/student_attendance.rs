use sea_orm::entity::prelude::*;
use serde::{Deserialize, Serialize};

/// A student's presence on one date. At most one row per student per date;
/// resubmitting the class roll overwrites it.
#[sea_orm::model]
#[derive(Clone, Debug, PartialEq, Eq, DeriveEntityModel, Serialize, Deserialize)]
#[sea_orm(table_name = "student_attendance")]
pub struct Model {
    #[sea_orm(primary_key)]
    pub id: i32,

    #[sea_orm(unique_key = "student_date")]
    pub student_id: i32,
    #[sea_orm(belongs_to, from = "student_id", to = "id", on_delete = "Cascade")]
    pub student: HasOne<super::student::Entity>,

    pub classroom_id: i32,
    #[sea_orm(belongs_to, from = "classroom_id", to = "id", on_delete = "Cascade")]
    pub classroom: HasOne<super::classroom::Entity>,

    #[sea_orm(unique_key = "student_date")]
    pub date: Date,

    #[sea_orm(default_value = false)]
    pub present: bool,
    #[sea_orm(default_value = false)]
    pub marked_by_teacher: bool,

    pub created_at: DateTimeUtc,
}

impl ActiveModelBehavior for ActiveModel {}
