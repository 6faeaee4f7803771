// entities/post.rs
use poem_openapi::{Enum, Object};
use sea_orm::FromQueryResult;
use sea_orm::entity::prelude::*;

#[derive(Clone, Debug, PartialEq, Eq, DeriveEntityModel)]
#[sea_orm(table_name = "posts")]
pub struct Model {
    #[sea_orm(primary_key)]
    pub id: i32,
    pub title: String,
    #[sea_orm(column_type = "Text")]
    pub content: String,
    pub category: String,
    pub status: Status,
    pub created_date: DateTime,
    pub updated_date: DateTime,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {}
impl ActiveModelBehavior for ActiveModel {}

/// Publication status. Stored as its lowercase literal.
#[derive(Copy, Clone, Debug, PartialEq, Eq, EnumIter, DeriveActiveEnum, Enum)]
#[sea_orm(rs_type = "String", db_type = "String(StringLen::N(7))")]
#[oai(rename_all = "lowercase")]
pub enum Status {
    #[sea_orm(string_value = "publish")]
    Publish,
    #[sea_orm(string_value = "draft")]
    Draft,
    #[sea_orm(string_value = "trash")]
    Trash,
}

/// The client-visible projection of a row. Timestamps stay in the table.
#[derive(Clone, Debug, PartialEq, Eq, DerivePartialModel, FromQueryResult, Object)]
#[sea_orm(entity = "Entity")]
pub struct Post {
    pub id: i32,
    pub title: String,
    pub content: String,
    pub category: String,
    pub status: Status,
}
