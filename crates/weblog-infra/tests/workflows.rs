//! End-to-end workflow tests against a real SQLite store.

use std::sync::Arc;

use sea_orm::{ColumnTrait, DbConn, EntityTrait, PaginatorTrait, QueryFilter};

use weblog_core::domain::{Redirect, Session};
use weblog_core::{AuthService, DomainError, PostService};
use weblog_infra::database::entity::{category, post_category, user};
use weblog_infra::database::{
    DatabaseConfig, SeaOrmPostRepository, SeaOrmUserRepository, connect, create_tables,
};
use weblog_infra::{Argon2PasswordService, InMemorySessionStore};

struct App {
    db: DbConn,
    auth: Arc<AuthService>,
    posts: Arc<PostService>,
}

async fn app() -> App {
    app_with(&DatabaseConfig::in_memory()).await
}

async fn app_with(config: &DatabaseConfig) -> App {
    let db = connect(config).await.unwrap();
    create_tables(&db).await.unwrap();

    let auth = Arc::new(AuthService::new(
        Arc::new(SeaOrmUserRepository::new(db.clone())),
        Arc::new(Argon2PasswordService::new()),
        Arc::new(InMemorySessionStore::new()),
    ));
    let posts = Arc::new(PostService::new(
        auth.clone(),
        Arc::new(SeaOrmPostRepository::new(db.clone())),
    ));

    App { db, auth, posts }
}

async fn sign_in(app: &App, username: &str, password: &str) -> Session {
    app.auth.register(username, password).await.unwrap();
    app.auth.login(username, password).await.unwrap().session()
}

#[tokio::test]
async fn test_register_then_login_binds_session() {
    let app = app().await;

    let id = app.auth.register("alice", "secret1").await.unwrap();
    let outcome = app.auth.login("alice", "secret1").await.unwrap();

    assert_eq!(outcome.redirect, Redirect::Dashboard);
    let current = app
        .auth
        .current_user(&outcome.session())
        .await
        .unwrap()
        .unwrap();
    assert_eq!(current.id, id);
    assert_eq!(current.role, "author");
    assert!(current.password.starts_with("$argon2"));
}

#[tokio::test]
async fn test_duplicate_registration_creates_no_second_row() {
    let app = app().await;

    app.auth.register("alice", "secret1").await.unwrap();
    let err = app.auth.register("alice", "secret2").await.unwrap_err();

    assert!(matches!(err, DomainError::DuplicateUsername(_)));
    let rows = user::Entity::find()
        .filter(user::Column::Username.eq("alice"))
        .count(&app.db)
        .await
        .unwrap();
    assert_eq!(rows, 1);
}

#[tokio::test]
async fn test_bad_login_kinds_match() {
    let app = app().await;
    app.auth.register("alice", "secret1").await.unwrap();

    let unknown = app.auth.login("mallory", "secret1").await.unwrap_err();
    let wrong = app.auth.login("alice", "secret2").await.unwrap_err();

    assert!(matches!(unknown, DomainError::InvalidCredentials));
    assert!(matches!(wrong, DomainError::InvalidCredentials));
}

#[tokio::test]
async fn test_repeated_tag_is_joined_once() {
    let app = app().await;
    let session = sign_in(&app, "alice", "secret1").await;

    let id = app
        .posts
        .create_post(&session, "Hi", "war,war,education", "body")
        .await
        .unwrap();

    let mine = app.posts.dashboard(&session).await.unwrap();
    assert_eq!(mine.len(), 1);
    assert_eq!(mine[0].post.id, id);
    let mut names = mine[0].category_names();
    names.sort();
    assert_eq!(names, vec!["education", "war"]);

    let links = post_category::Entity::find()
        .filter(post_category::Column::PostId.eq(id))
        .count(&app.db)
        .await
        .unwrap();
    assert_eq!(links, 2);
}

#[tokio::test(flavor = "multi_thread", worker_threads = 4)]
async fn test_concurrent_new_tag_creates_one_category() {
    const WRITERS: usize = 8;

    // A file-backed pool so writers really hold separate connections.
    let dir = tempfile::tempdir().unwrap();
    let config = DatabaseConfig {
        url: format!("sqlite://{}?mode=rwc", dir.path().join("weblog.db").display()),
        max_connections: WRITERS as u32,
        min_connections: 1,
    };
    let app = app_with(&config).await;
    let session = sign_in(&app, "alice", "secret1").await;

    for round in 0..3 {
        let tag = format!("shared{round}");
        let writers: Vec<_> = (0..WRITERS)
            .map(|i| {
                let posts = app.posts.clone();
                let session = session.clone();
                let tags = format!("{tag},own{round}x{i}");
                tokio::spawn(async move {
                    posts
                        .create_post(&session, &format!("Post {i}"), &tags, "body")
                        .await
                })
            })
            .collect();

        for writer in writers {
            writer.await.unwrap().unwrap();
        }

        let shared = category::Entity::find()
            .filter(category::Column::Name.eq(tag.as_str()))
            .all(&app.db)
            .await
            .unwrap();
        assert_eq!(shared.len(), 1);

        let links = post_category::Entity::find()
            .filter(post_category::Column::CategoryId.eq(shared[0].id))
            .count(&app.db)
            .await
            .unwrap();
        assert_eq!(links, WRITERS as u64);
    }
}

#[tokio::test]
async fn test_bob_end_to_end() {
    let app = app().await;

    let bob_id = app.auth.register("bob1", "secret1").await.unwrap();
    let session = app.auth.login("bob1", "secret1").await.unwrap().session();
    let post_id = app
        .posts
        .create_post(&session, "Hi", "news", "body")
        .await
        .unwrap();

    let posts = app.posts.posts_by_author(bob_id).await.unwrap();
    assert_eq!(posts.len(), 1);
    assert_eq!(posts[0].post.id, post_id);
    assert_eq!(posts[0].post.author_id, bob_id);
    assert_eq!(posts[0].post.title, "Hi");
    assert_eq!(posts[0].post.desc, "body");
    assert_eq!(posts[0].category_names(), vec!["news"]);
}

#[tokio::test]
async fn test_logout_invalidates_previous_session() {
    let app = app().await;

    assert!(
        app.auth
            .current_user(&Session::Anonymous)
            .await
            .unwrap()
            .is_none()
    );

    let mut session = sign_in(&app, "alice", "secret1").await;
    let before = session.clone();
    assert!(app.auth.current_user(&before).await.unwrap().is_some());

    assert_eq!(app.auth.logout(&mut session).await, Redirect::Login);
    assert!(app.auth.current_user(&session).await.unwrap().is_none());
    assert!(app.auth.current_user(&before).await.unwrap().is_none());

    let err = app
        .posts
        .create_post(&before, "Late", "news", "body")
        .await
        .unwrap_err();
    assert!(matches!(err, DomainError::Unauthenticated));
    assert!(app.posts.feed().await.unwrap().is_empty());
}
