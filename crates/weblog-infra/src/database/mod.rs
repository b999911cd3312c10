//! Relational storage: connection, schema and repositories.

mod connections;
mod repositories;
mod schema;
mod sea_orm_base;

pub mod entity;

pub use connections::{DatabaseConfig, connect};
pub use sea_orm::{DbConn, DbErr};
pub use repositories::{SeaOrmCategoryRepository, SeaOrmPostRepository, SeaOrmUserRepository};
pub use schema::create_tables;
pub use sea_orm_base::SeaOrmRepository;
