//! SeaORM entities.

pub mod category;
pub mod post;
pub mod post_category;
pub mod user;
