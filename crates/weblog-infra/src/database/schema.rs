//! Table creation derived from the entity definitions.

use sea_orm::{ConnectionTrait, DbConn, DbErr, EntityTrait, Schema};

use super::entity::{category, post, post_category, user};

/// Create every table that does not exist yet, parents before children.
pub async fn create_tables(db: &DbConn) -> Result<(), DbErr> {
    let schema = Schema::new(db.get_database_backend());

    create_table(db, &schema, user::Entity).await?;
    create_table(db, &schema, category::Entity).await?;
    create_table(db, &schema, post::Entity).await?;
    create_table(db, &schema, post_category::Entity).await?;

    tracing::info!("Database schema ready");
    Ok(())
}

async fn create_table<E: EntityTrait>(db: &DbConn, schema: &Schema, entity: E) -> Result<(), DbErr> {
    let mut stmt = schema.create_table_from_entity(entity);
    stmt.if_not_exists();

    let backend = db.get_database_backend();
    db.execute(backend.build(&stmt)).await?;
    tracing::debug!(table = entity.table_name(), "Table ensured");
    Ok(())
}
