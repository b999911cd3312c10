use async_trait::async_trait;

use crate::domain::{
    Category, CategoryId, NewCategory, NewPost, NewUser, PostId, TaggedPost, User, UserId,
};
use crate::error::RepoError;

/// Generic repository trait for insert-and-fetch entities.
///
/// `N` is the insert payload; the storage assigns the identifier.
#[async_trait]
pub trait BaseRepository<T, N, ID>: Send + Sync {
    /// Find an entity by its unique ID.
    async fn find_by_id(&self, id: ID) -> Result<Option<T>, RepoError>;

    /// Insert a new entity and return it with its assigned ID.
    async fn insert(&self, new: N) -> Result<T, RepoError>;
}

/// User repository with domain-specific methods.
#[async_trait]
pub trait UserRepository: BaseRepository<User, NewUser, UserId> {
    /// Find a user by exact username.
    async fn find_by_username(&self, username: &str) -> Result<Option<User>, RepoError>;
}

/// Category repository.
#[async_trait]
pub trait CategoryRepository: BaseRepository<Category, NewCategory, CategoryId> {
    /// Find a category by exact, case-sensitive name.
    async fn find_by_name(&self, name: &str) -> Result<Option<Category>, RepoError>;

    /// Insert the category unless one with that name exists, then fetch it.
    async fn find_or_create(&self, name: &str) -> Result<Category, RepoError>;

    /// Categories attached to a post.
    async fn find_by_post(&self, post_id: PostId) -> Result<Vec<Category>, RepoError>;
}

/// Post repository.
#[async_trait]
pub trait PostRepository: Send + Sync {
    async fn find_by_id(&self, id: PostId) -> Result<Option<TaggedPost>, RepoError>;

    /// All posts, oldest first.
    async fn find_all(&self) -> Result<Vec<TaggedPost>, RepoError>;

    /// Posts written by one author, oldest first.
    async fn find_by_author(&self, author_id: UserId) -> Result<Vec<TaggedPost>, RepoError>;

    /// Insert the post, its categories and the join rows atomically.
    async fn create(&self, post: NewPost) -> Result<TaggedPost, RepoError>;

    /// Insert several posts in one commit: all of them or none.
    async fn create_many(&self, posts: Vec<NewPost>) -> Result<Vec<TaggedPost>, RepoError>;

    /// Associate existing categories with a post. Already present pairs are kept once.
    async fn attach_categories(
        &self,
        post_id: PostId,
        category_ids: &[CategoryId],
    ) -> Result<(), RepoError>;
}
