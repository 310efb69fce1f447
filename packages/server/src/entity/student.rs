use sea_orm::entity::prelude::*;
use serde::{Deserialize, Serialize};

#[sea_orm::model]
#[derive(Clone, Debug, PartialEq, Eq, DeriveEntityModel, Serialize, Deserialize)]
#[sea_orm(table_name = "student")]
pub struct Model {
    #[sea_orm(primary_key)]
    pub id: i32,

    #[sea_orm(unique)]
    pub user_id: i32,
    #[sea_orm(belongs_to, from = "user_id", to = "id", on_delete = "Cascade")]
    pub user: HasOne<super::user::Entity>,

    #[sea_orm(unique)]
    pub roll_number: String,

    pub classroom_id: i32,
    #[sea_orm(belongs_to, from = "classroom_id", to = "id", on_delete = "Cascade")]
    pub classroom: HasOne<super::classroom::Entity>,

    #[sea_orm(has_many)]
    pub attendances: HasMany<super::student_attendance::Entity>,
    #[sea_orm(has_many)]
    pub complaints: HasMany<super::complaint::Entity>,
}

impl ActiveModelBehavior for ActiveModel {}
