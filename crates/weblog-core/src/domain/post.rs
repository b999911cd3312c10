use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use super::category::Category;
use super::user::UserId;

pub type PostId = i32;

/// Post entity - a blog post written by one author.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Post {
    pub id: PostId,
    pub title: String,
    pub image: Option<String>,
    /// Post body.
    pub desc: String,
    pub date_created: DateTime<Utc>,
    pub author_id: UserId,
}

/// Insert payload for a post together with its category names.
///
/// `author_id` is required up front so a post can never be stored without one.
#[derive(Debug, Clone)]
pub struct NewPost {
    pub author_id: UserId,
    pub title: String,
    pub image: Option<String>,
    pub desc: String,
    pub date_created: DateTime<Utc>,
    pub categories: Vec<String>,
}

impl NewPost {
    /// Create a new post dated now.
    pub fn new(author_id: UserId, title: String, desc: String, categories: Vec<String>) -> Self {
        Self {
            author_id,
            title,
            image: None,
            desc,
            date_created: Utc::now(),
            categories,
        }
    }

    pub fn with_image(mut self, image: impl Into<String>) -> Self {
        self.image = Some(image.into());
        self
    }
}

/// A post loaded together with its categories.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TaggedPost {
    pub post: Post,
    pub categories: Vec<Category>,
}

impl TaggedPost {
    pub fn category_names(&self) -> Vec<&str> {
        self.categories.iter().map(|c| c.name.as_str()).collect()
    }
}
