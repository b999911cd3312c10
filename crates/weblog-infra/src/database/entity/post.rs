//! Post entity for SeaORM.

use sea_orm::Set;
use sea_orm::entity::prelude::*;

#[derive(Clone, Debug, PartialEq, Eq, DeriveEntityModel)]
#[sea_orm(table_name = "posts")]
pub struct Model {
    #[sea_orm(primary_key)]
    pub id: i32,
    pub title: String,
    pub image: Option<String>,
    #[sea_orm(column_type = "Text")]
    pub desc: String,
    pub date_created: DateTimeWithTimeZone,
    pub author_id: i32,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {
    #[sea_orm(
        belongs_to = "super::user::Entity",
        from = "Column::AuthorId",
        to = "super::user::Column::Id",
        on_update = "Cascade",
        on_delete = "Cascade"
    )]
    User,
    #[sea_orm(has_many = "super::post_category::Entity")]
    PostCategory,
}

impl Related<super::user::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::User.def()
    }
}

impl Related<super::post_category::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::PostCategory.def()
    }
}

impl Related<super::category::Entity> for Entity {
    fn to() -> RelationDef {
        super::post_category::Relation::Category.def()
    }

    fn via() -> Option<RelationDef> {
        Some(super::post_category::Relation::Post.def().rev())
    }
}

impl ActiveModelBehavior for ActiveModel {}

/// Conversion from SeaORM Model to Domain Post.
impl From<Model> for weblog_core::domain::Post {
    fn from(model: Model) -> Self {
        Self {
            id: model.id,
            title: model.title,
            image: model.image,
            desc: model.desc,
            date_created: model.date_created.into(),
            author_id: model.author_id,
        }
    }
}

/// Conversion from a domain insert payload to SeaORM ActiveModel.
/// Categories are stored separately through the join table.
impl From<&weblog_core::domain::NewPost> for ActiveModel {
    fn from(post: &weblog_core::domain::NewPost) -> Self {
        Self {
            title: Set(post.title.clone()),
            image: Set(post.image.clone()),
            desc: Set(post.desc.clone()),
            date_created: Set(post.date_created.into()),
            author_id: Set(post.author_id),
            ..Default::default()
        }
    }
}
