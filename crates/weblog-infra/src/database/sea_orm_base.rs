use std::marker::PhantomData;

use async_trait::async_trait;
use sea_orm::{
    ActiveModelBehavior, ActiveModelTrait, DbConn, DbErr, EntityTrait, IntoActiveModel,
    PrimaryKeyTrait, SqlErr,
};

use weblog_core::error::RepoError;
use weblog_core::ports::BaseRepository;

/// Generic SeaORM repository implementation.
pub struct SeaOrmRepository<E>
where
    E: EntityTrait,
{
    pub(crate) db: DbConn,
    _entity: PhantomData<E>,
}

impl<E> SeaOrmRepository<E>
where
    E: EntityTrait,
{
    pub fn new(db: DbConn) -> Self {
        Self {
            db,
            _entity: PhantomData,
        }
    }
}

/// Translate a SeaORM error into the repository taxonomy.
pub(crate) fn map_db_err(err: DbErr) -> RepoError {
    match err.sql_err() {
        Some(SqlErr::UniqueConstraintViolation(msg))
        | Some(SqlErr::ForeignKeyConstraintViolation(msg)) => return RepoError::Constraint(msg),
        _ => {}
    }

    match &err {
        DbErr::Conn(_) | DbErr::ConnectionAcquire(_) => RepoError::Connection(err.to_string()),
        DbErr::RecordNotFound(_) => RepoError::NotFound,
        _ => {
            let err_str = err.to_string();
            let lowered = err_str.to_lowercase();
            if lowered.contains("duplicate") || lowered.contains("unique") {
                RepoError::Constraint(err_str)
            } else {
                RepoError::Query(err_str)
            }
        }
    }
}

#[async_trait]
impl<E, T, N, ID> BaseRepository<T, N, ID> for SeaOrmRepository<E>
where
    E: EntityTrait,
    E::Model: IntoActiveModel<E::ActiveModel> + Sync + Send,
    E::ActiveModel: ActiveModelTrait<Entity = E> + ActiveModelBehavior + Send + Sync,
    E::PrimaryKey: PrimaryKeyTrait<ValueType = ID>,
    ID: Send + Sync + Into<sea_orm::Value> + Clone + Copy + 'static,
    T: From<E::Model> + Send + Sync + 'static,
    N: Into<E::ActiveModel> + Send + Sync + 'static,
{
    async fn find_by_id(&self, id: ID) -> Result<Option<T>, RepoError> {
        let result = E::find_by_id(id).one(&self.db).await.map_err(map_db_err)?;

        Ok(result.map(Into::into))
    }

    async fn insert(&self, new: N) -> Result<T, RepoError> {
        let active_model: E::ActiveModel = new.into();
        let model = active_model.insert(&self.db).await.map_err(map_db_err)?;

        Ok(model.into())
    }
}
