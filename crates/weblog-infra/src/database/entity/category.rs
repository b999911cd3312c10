//! Category entity for SeaORM.

use sea_orm::Set;
use sea_orm::entity::prelude::*;

#[derive(Clone, Debug, PartialEq, Eq, DeriveEntityModel)]
#[sea_orm(table_name = "categories")]
pub struct Model {
    #[sea_orm(primary_key)]
    pub id: i32,
    /// Unique so concurrent lookup-or-create settles on one row.
    #[sea_orm(unique)]
    pub name: String,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {
    #[sea_orm(has_many = "super::post_category::Entity")]
    PostCategory,
}

impl Related<super::post_category::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::PostCategory.def()
    }
}

impl Related<super::post::Entity> for Entity {
    fn to() -> RelationDef {
        super::post_category::Relation::Post.def()
    }

    fn via() -> Option<RelationDef> {
        Some(super::post_category::Relation::Category.def().rev())
    }
}

impl ActiveModelBehavior for ActiveModel {}

impl From<Model> for weblog_core::domain::Category {
    fn from(model: Model) -> Self {
        Self {
            id: model.id,
            name: model.name,
        }
    }
}

impl From<weblog_core::domain::NewCategory> for ActiveModel {
    fn from(category: weblog_core::domain::NewCategory) -> Self {
        Self {
            name: Set(category.name),
            ..Default::default()
        }
    }
}
