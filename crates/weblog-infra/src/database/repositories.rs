//! SeaORM repository implementations.

use async_trait::async_trait;
use sea_orm::sea_query::OnConflict;
use sea_orm::{
    ActiveModelTrait, ColumnTrait, ConnectionTrait, DbErr, EntityTrait, QueryFilter, QueryOrder,
    Set, TransactionTrait,
};

use weblog_core::domain::{Category, CategoryId, NewPost, PostId, TaggedPost, User, UserId};
use weblog_core::error::RepoError;
use weblog_core::ports::{CategoryRepository, PostRepository, UserRepository};

use super::entity::category::{self, Entity as CategoryEntity};
use super::entity::post::{self, Entity as PostEntity};
use super::entity::post_category::{self, Entity as PostCategoryEntity};
use super::entity::user::{self, Entity as UserEntity};
use super::sea_orm_base::{SeaOrmRepository, map_db_err};

/// SeaORM user repository.
pub type SeaOrmUserRepository = SeaOrmRepository<UserEntity>;

/// SeaORM category repository.
pub type SeaOrmCategoryRepository = SeaOrmRepository<CategoryEntity>;

/// SeaORM post repository.
pub type SeaOrmPostRepository = SeaOrmRepository<PostEntity>;

/// Insert the category if its name is new, then load it.
///
/// Relies on the unique index on `categories.name`: a concurrent insert of the
/// same name turns ours into a no-op and both callers read the same row.
async fn upsert_category<C: ConnectionTrait>(
    conn: &C,
    name: &str,
) -> Result<category::Model, DbErr> {
    CategoryEntity::insert(category::ActiveModel {
        name: Set(name.to_string()),
        ..Default::default()
    })
    .on_conflict(
        OnConflict::column(category::Column::Name)
            .do_nothing()
            .to_owned(),
    )
    .exec_without_returning(conn)
    .await?;

    CategoryEntity::find()
        .filter(category::Column::Name.eq(name))
        .one(conn)
        .await?
        .ok_or_else(|| DbErr::RecordNotFound(format!("category '{name}'")))
}

async fn link_categories<C: ConnectionTrait>(
    conn: &C,
    post_id: PostId,
    category_ids: &[CategoryId],
) -> Result<(), DbErr> {
    for &category_id in category_ids {
        PostCategoryEntity::insert(post_category::ActiveModel {
            post_id: Set(post_id),
            category_id: Set(category_id),
        })
        .on_conflict(
            OnConflict::columns([
                post_category::Column::PostId,
                post_category::Column::CategoryId,
            ])
            .do_nothing()
            .to_owned(),
        )
        .exec_without_returning(conn)
        .await?;
    }
    Ok(())
}

/// Insert a post with its categories and join rows on `conn`.
async fn insert_tagged<C: ConnectionTrait>(conn: &C, new: &NewPost) -> Result<TaggedPost, DbErr> {
    let post = post::ActiveModel::from(new).insert(conn).await?;

    let mut categories: Vec<category::Model> = Vec::with_capacity(new.categories.len());
    for name in &new.categories {
        let category = upsert_category(conn, name).await?;
        if !categories.iter().any(|c| c.id == category.id) {
            categories.push(category);
        }
    }

    let ids: Vec<CategoryId> = categories.iter().map(|c| c.id).collect();
    link_categories(conn, post.id, &ids).await?;

    Ok(TaggedPost {
        post: post.into(),
        categories: categories.into_iter().map(Into::into).collect(),
    })
}

fn tagged(rows: Vec<(post::Model, Vec<category::Model>)>) -> Vec<TaggedPost> {
    rows.into_iter()
        .map(|(post, categories)| TaggedPost {
            post: post.into(),
            categories: categories.into_iter().map(Into::into).collect(),
        })
        .collect()
}

#[async_trait]
impl UserRepository for SeaOrmUserRepository {
    async fn find_by_username(&self, username: &str) -> Result<Option<User>, RepoError> {
        tracing::debug!(username, "Finding user by username");

        let result = UserEntity::find()
            .filter(user::Column::Username.eq(username))
            .one(&self.db)
            .await
            .map_err(map_db_err)?;

        Ok(result.map(Into::into))
    }
}

#[async_trait]
impl CategoryRepository for SeaOrmCategoryRepository {
    async fn find_by_name(&self, name: &str) -> Result<Option<Category>, RepoError> {
        let result = CategoryEntity::find()
            .filter(category::Column::Name.eq(name))
            .one(&self.db)
            .await
            .map_err(map_db_err)?;

        Ok(result.map(Into::into))
    }

    async fn find_or_create(&self, name: &str) -> Result<Category, RepoError> {
        let model = upsert_category(&self.db, name).await.map_err(map_db_err)?;
        Ok(model.into())
    }

    async fn find_by_post(&self, post_id: PostId) -> Result<Vec<Category>, RepoError> {
        let result = CategoryEntity::find()
            .inner_join(PostCategoryEntity)
            .filter(post_category::Column::PostId.eq(post_id))
            .order_by_asc(category::Column::Id)
            .all(&self.db)
            .await
            .map_err(map_db_err)?;

        Ok(result.into_iter().map(Into::into).collect())
    }
}

#[async_trait]
impl PostRepository for SeaOrmPostRepository {
    async fn find_by_id(&self, id: PostId) -> Result<Option<TaggedPost>, RepoError> {
        let rows = PostEntity::find_by_id(id)
            .find_with_related(CategoryEntity)
            .order_by_asc(category::Column::Id)
            .all(&self.db)
            .await
            .map_err(map_db_err)?;

        Ok(tagged(rows).into_iter().next())
    }

    async fn find_all(&self) -> Result<Vec<TaggedPost>, RepoError> {
        let rows = PostEntity::find()
            .order_by_asc(post::Column::Id)
            .find_with_related(CategoryEntity)
            .order_by_asc(category::Column::Id)
            .all(&self.db)
            .await
            .map_err(map_db_err)?;

        Ok(tagged(rows))
    }

    async fn find_by_author(&self, author_id: UserId) -> Result<Vec<TaggedPost>, RepoError> {
        tracing::debug!(author_id, "Finding posts by author");

        let rows = PostEntity::find()
            .filter(post::Column::AuthorId.eq(author_id))
            .order_by_asc(post::Column::Id)
            .find_with_related(CategoryEntity)
            .order_by_asc(category::Column::Id)
            .all(&self.db)
            .await
            .map_err(map_db_err)?;

        Ok(tagged(rows))
    }

    async fn create(&self, new: NewPost) -> Result<TaggedPost, RepoError> {
        let txn = self.db.begin().await.map_err(map_db_err)?;
        let created = insert_tagged(&txn, &new).await.map_err(map_db_err)?;

        // Dropping the transaction on any error above rolls everything back
        txn.commit().await.map_err(map_db_err)?;
        Ok(created)
    }

    async fn create_many(&self, posts: Vec<NewPost>) -> Result<Vec<TaggedPost>, RepoError> {
        let txn = self.db.begin().await.map_err(map_db_err)?;

        let mut created = Vec::with_capacity(posts.len());
        for new in &posts {
            created.push(insert_tagged(&txn, new).await.map_err(map_db_err)?);
        }

        txn.commit().await.map_err(map_db_err)?;
        tracing::debug!(count = created.len(), "Posts created in one batch");
        Ok(created)
    }

    async fn attach_categories(
        &self,
        post_id: PostId,
        category_ids: &[CategoryId],
    ) -> Result<(), RepoError> {
        link_categories(&self.db, post_id, category_ids)
            .await
            .map_err(map_db_err)
    }
}
