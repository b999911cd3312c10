//! Seeding CLI tool: creates the schema and loads development fixtures.

use std::sync::Arc;

use anyhow::Context;
use weblog_core::AuthService;
use weblog_core::domain::{NewPost, UserId, parse_tags};
use weblog_core::ports::{PostRepository, UserRepository};
use weblog_infra::database::{self, DbConn, SeaOrmPostRepository, SeaOrmUserRepository};
use weblog_infra::{Argon2PasswordService, DatabaseConfig, InMemorySessionStore};

const SEED_USER: &str = "Arash";
const DEFAULT_SEED_PASSWORD: &str = "123456";
const DEFAULT_DATABASE_URL: &str = "sqlite://weblog.db?mode=rwc";

/// (title, content, tags)
const SEED_POSTS: &[(&str, &str, &str)] = &[
    ("Welcome", "Welcome to my weblog", ""),
    ("Notes on history", "Some thoughts on old battles.", "war,history"),
    ("Learning Rust", "Ownership finally clicked.", "education,programming"),
    ("Teaching kids", "What worked in class this week.", "education"),
];

#[derive(Debug, PartialEq, Eq)]
enum SeedOutcome {
    Seeded { author: UserId, posts: usize },
    AlreadyPresent,
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    dotenvy::dotenv().ok();

    tracing_subscriber::fmt().with_env_filter("info").init();

    let url = std::env::var("DATABASE_URL").unwrap_or_else(|_| DEFAULT_DATABASE_URL.to_string());
    let password =
        std::env::var("SEED_PASSWORD").unwrap_or_else(|_| DEFAULT_SEED_PASSWORD.to_string());

    let db = database::connect(&DatabaseConfig::new(url))
        .await
        .context("connecting to the database")?;

    match seed(&db, &password).await? {
        SeedOutcome::Seeded { author, posts } => {
            tracing::info!(user = SEED_USER, author_id = author, posts, "Seeding complete")
        }
        SeedOutcome::AlreadyPresent => {
            tracing::info!(user = SEED_USER, "Seed data already present, nothing to do")
        }
    }
    Ok(())
}

/// Create the tables and load the fixtures.
///
/// The user is registered (or reused if an earlier run stopped after it) and
/// all posts are committed together, so a rerun finishes an interrupted seed.
async fn seed(db: &DbConn, password: &str) -> anyhow::Result<SeedOutcome> {
    database::create_tables(db)
        .await
        .context("creating tables")?;

    let users: Arc<dyn UserRepository> = Arc::new(SeaOrmUserRepository::new(db.clone()));
    let posts: Arc<dyn PostRepository> = Arc::new(SeaOrmPostRepository::new(db.clone()));

    let author = match users.find_by_username(SEED_USER).await? {
        Some(user) => user.id,
        None => {
            let auth = AuthService::new(
                users,
                Arc::new(Argon2PasswordService::new()),
                Arc::new(InMemorySessionStore::new()),
            );
            auth.register(SEED_USER, password)
                .await
                .context("registering the seed user")?
        }
    };

    if !posts.find_by_author(author).await?.is_empty() {
        return Ok(SeedOutcome::AlreadyPresent);
    }

    let fixtures = SEED_POSTS
        .iter()
        .map(|(title, content, tags)| {
            NewPost::new(author, title.to_string(), content.to_string(), parse_tags(tags))
        })
        .collect();
    let created = posts
        .create_many(fixtures)
        .await
        .context("creating seed posts")?;

    Ok(SeedOutcome::Seeded {
        author,
        posts: created.len(),
    })
}
