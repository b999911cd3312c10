//! Domain entities - the core business objects.

mod category;
mod post;
mod session;
mod user;

pub use category::{Category, CategoryId, NewCategory, parse_tags};
pub use post::{NewPost, Post, PostId, TaggedPost};
pub use session::{LoginOutcome, Redirect, Session, SessionToken};
pub use user::{DEFAULT_ROLE, NewUser, User, UserId};
