use sea_orm::entity::prelude::*;
use serde::{Deserialize, Serialize};

/// A named group of students, e.g. "12th D".
#[sea_orm::model]
#[derive(Clone, Debug, PartialEq, Eq, DeriveEntityModel, Serialize, Deserialize)]
#[sea_orm(table_name = "classroom")]
pub struct Model {
    #[sea_orm(primary_key)]
    pub id: i32,

    #[sea_orm(unique)]
    pub name: String,

    #[sea_orm(has_many)]
    pub teachers: HasMany<super::teacher::Entity>,
    #[sea_orm(has_many)]
    pub students: HasMany<super::student::Entity>,
}

impl ActiveModelBehavior for ActiveModel {}
