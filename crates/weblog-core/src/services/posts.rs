//! Post authoring and browsing.

use std::sync::Arc;

use crate::domain::{NewPost, PostId, Session, TaggedPost, UserId, parse_tags};
use crate::error::DomainError;
use crate::ports::PostRepository;
use crate::validation;

use super::AuthService;

/// Post authoring workflow.
pub struct PostService {
    auth: Arc<AuthService>,
    posts: Arc<dyn PostRepository>,
}

impl PostService {
    pub fn new(auth: Arc<AuthService>, posts: Arc<dyn PostRepository>) -> Self {
        Self { auth, posts }
    }

    /// Publish a post for the session's user, tagged with `tags_csv`.
    pub async fn create_post(
        &self,
        session: &Session,
        title: &str,
        tags_csv: &str,
        content: &str,
    ) -> Result<PostId, DomainError> {
        let author = self.auth.require_user(session).await?;

        let tags = parse_tags(tags_csv);
        validation::validate_post(title, content, &tags)?;

        let created = self
            .posts
            .create(NewPost::new(
                author.id,
                title.to_string(),
                content.to_string(),
                tags,
            ))
            .await?;

        tracing::info!(
            post_id = created.post.id,
            author_id = author.id,
            categories = created.categories.len(),
            "Post created"
        );
        Ok(created.post.id)
    }

    /// Public feed.
    pub async fn feed(&self) -> Result<Vec<TaggedPost>, DomainError> {
        Ok(self.posts.find_all().await?)
    }

    /// The session user's own posts.
    pub async fn dashboard(&self, session: &Session) -> Result<Vec<TaggedPost>, DomainError> {
        let user = self.auth.require_user(session).await?;
        self.posts_by_author(user.id).await
    }

    pub async fn posts_by_author(&self, author_id: UserId) -> Result<Vec<TaggedPost>, DomainError> {
        Ok(self.posts.find_by_author(author_id).await?)
    }
}
