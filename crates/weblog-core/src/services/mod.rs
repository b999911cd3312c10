//! Workflows built on top of the ports.

mod auth;
mod posts;

pub use auth::AuthService;
pub use posts::PostService;

#[cfg(test)]
pub(crate) mod fakes {
    //! In-process port implementations for workflow tests.

    use std::collections::HashMap;
    use std::sync::atomic::{AtomicUsize, Ordering};
    use std::sync::{Arc, Mutex};

    use async_trait::async_trait;

    use crate::domain::{
        Category, CategoryId, NewPost, NewUser, Post, PostId, SessionToken, TaggedPost, User,
        UserId,
    };
    use crate::error::RepoError;
    use crate::ports::{
        BaseRepository, CredentialError, PasswordService, PostRepository, SessionStore,
        UserRepository,
    };

    use super::AuthService;

    pub fn auth_service(users: Arc<FakeUsers>) -> AuthService {
        auth_service_with(users, Arc::new(PrefixPasswords::default()))
    }

    pub fn auth_service_with(
        users: Arc<FakeUsers>,
        passwords: Arc<PrefixPasswords>,
    ) -> AuthService {
        AuthService::new(users, passwords, Arc::new(FakeSessions::default()))
    }

    #[derive(Default)]
    pub struct FakeUsers {
        rows: Mutex<Vec<User>>,
    }

    impl FakeUsers {
        pub fn count(&self) -> usize {
            self.rows.lock().unwrap().len()
        }
    }

    #[async_trait]
    impl BaseRepository<User, NewUser, UserId> for FakeUsers {
        async fn find_by_id(&self, id: UserId) -> Result<Option<User>, RepoError> {
            Ok(self.rows.lock().unwrap().iter().find(|u| u.id == id).cloned())
        }

        async fn insert(&self, new: NewUser) -> Result<User, RepoError> {
            let mut rows = self.rows.lock().unwrap();
            if rows.iter().any(|u| u.username == new.username) {
                return Err(RepoError::Constraint("users.username".to_string()));
            }
            let user = User {
                id: rows.len() as UserId + 1,
                username: new.username,
                password: new.password,
                role: new.role,
            };
            rows.push(user.clone());
            Ok(user)
        }
    }

    #[async_trait]
    impl UserRepository for FakeUsers {
        async fn find_by_username(&self, username: &str) -> Result<Option<User>, RepoError> {
            Ok(self
                .rows
                .lock()
                .unwrap()
                .iter()
                .find(|u| u.username == username)
                .cloned())
        }
    }

    #[derive(Default)]
    pub struct FakePosts {
        rows: Mutex<Vec<TaggedPost>>,
        categories: Mutex<Vec<Category>>,
    }

    impl FakePosts {
        pub fn count(&self) -> usize {
            self.rows.lock().unwrap().len()
        }

        fn category(&self, name: &str) -> Category {
            let mut categories = self.categories.lock().unwrap();
            if let Some(found) = categories.iter().find(|c| c.name == name) {
                return found.clone();
            }
            let category = Category {
                id: categories.len() as CategoryId + 1,
                name: name.to_string(),
            };
            categories.push(category.clone());
            category
        }
    }

    #[async_trait]
    impl PostRepository for FakePosts {
        async fn find_by_id(&self, id: PostId) -> Result<Option<TaggedPost>, RepoError> {
            Ok(self
                .rows
                .lock()
                .unwrap()
                .iter()
                .find(|p| p.post.id == id)
                .cloned())
        }

        async fn find_all(&self) -> Result<Vec<TaggedPost>, RepoError> {
            Ok(self.rows.lock().unwrap().clone())
        }

        async fn find_by_author(&self, author_id: UserId) -> Result<Vec<TaggedPost>, RepoError> {
            Ok(self
                .rows
                .lock()
                .unwrap()
                .iter()
                .filter(|p| p.post.author_id == author_id)
                .cloned()
                .collect())
        }

        async fn create(&self, post: NewPost) -> Result<TaggedPost, RepoError> {
            let categories = post.categories.iter().map(|n| self.category(n)).collect();
            let mut rows = self.rows.lock().unwrap();
            let tagged = TaggedPost {
                post: Post {
                    id: rows.len() as PostId + 1,
                    title: post.title,
                    image: post.image,
                    desc: post.desc,
                    date_created: post.date_created,
                    author_id: post.author_id,
                },
                categories,
            };
            rows.push(tagged.clone());
            Ok(tagged)
        }

        async fn create_many(&self, posts: Vec<NewPost>) -> Result<Vec<TaggedPost>, RepoError> {
            let mut created = Vec::with_capacity(posts.len());
            for post in posts {
                created.push(self.create(post).await?);
            }
            Ok(created)
        }

        async fn attach_categories(
            &self,
            _post_id: PostId,
            _category_ids: &[CategoryId],
        ) -> Result<(), RepoError> {
            Ok(())
        }
    }

    /// Reversible "hash" so tests stay fast. Counts verifications.
    #[derive(Default)]
    pub struct PrefixPasswords {
        verified: AtomicUsize,
    }

    impl PrefixPasswords {
        pub fn verifications(&self) -> usize {
            self.verified.load(Ordering::SeqCst)
        }
    }

    impl PasswordService for PrefixPasswords {
        fn hash(&self, password: &str) -> Result<String, CredentialError> {
            Ok(format!("hashed:{password}"))
        }

        fn verify(&self, password: &str, hash: &str) -> bool {
            self.verified.fetch_add(1, Ordering::SeqCst);
            hash.strip_prefix("hashed:") == Some(password)
        }
    }

    #[derive(Default)]
    pub struct FakeSessions {
        tokens: Mutex<HashMap<SessionToken, UserId>>,
    }

    #[async_trait]
    impl SessionStore for FakeSessions {
        async fn create(&self, user_id: UserId) -> SessionToken {
            let token = SessionToken::generate();
            self.tokens.lock().unwrap().insert(token.clone(), user_id);
            token
        }

        async fn resolve(&self, token: &SessionToken) -> Option<UserId> {
            self.tokens.lock().unwrap().get(token).copied()
        }

        async fn revoke(&self, token: &SessionToken) {
            self.tokens.lock().unwrap().remove(token);
        }
    }
}
