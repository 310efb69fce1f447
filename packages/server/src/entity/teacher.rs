use sea_orm::entity::prelude::*;
use serde::{Deserialize, Serialize};

#[sea_orm::model]
#[derive(Clone, Debug, PartialEq, Eq, DeriveEntityModel, Serialize, Deserialize)]
#[sea_orm(table_name = "teacher")]
pub struct Model {
    #[sea_orm(primary_key)]
    pub id: i32,

    #[sea_orm(unique)]
    pub user_id: i32,
    #[sea_orm(belongs_to, from = "user_id", to = "id", on_delete = "Cascade")]
    pub user: HasOne<super::user::Entity>,

    pub subject: String,

    /// NULL until the teacher is assigned to a classroom.
    pub classroom_id: Option<i32>,
    #[sea_orm(belongs_to, from = "classroom_id", to = "id", on_delete = "SetNull")]
    pub classroom: HasOne<super::classroom::Entity>,

    #[sea_orm(has_many)]
    pub attendances: HasMany<super::teacher_attendance::Entity>,
}

impl ActiveModelBehavior for ActiveModel {}
