//! Generic entity repository implementation for PostgreSQL.

use std::marker::PhantomData;

use async_trait::async_trait;
use sqlx::PgPool;
use tracing::{debug, instrument};

use traveller_core::error::{StorageError, StorageResult};
use traveller_core::ports::{EntityRepository, Page, PageRequest};

use super::database::Database;
use super::tables::PgEntity;

/// First statement of a paging transaction: one snapshot for count and rows.
const SNAPSHOT_READ: &str = "SET TRANSACTION ISOLATION LEVEL REPEATABLE READ, READ ONLY";

/// PostgreSQL implementation of `EntityRepository` for any [`PgEntity`].
///
/// SQL is assembled from the table description; table and column names
/// are compile-time constants, values are always bound.
pub struct PgEntityRepository<T> {
    pool: PgPool,
    _entity: PhantomData<fn() -> T>,
}

impl<T: PgEntity> PgEntityRepository<T> {
    pub fn new(db: &Database) -> Self {
        Self {
            pool: db.pool().clone(),
            _entity: PhantomData,
        }
    }

    fn select(suffix: &str) -> String {
        format!("SELECT {} FROM {} {}", T::COLUMNS, T::TABLE, suffix)
    }

    fn count_sql() -> String {
        format!("SELECT COUNT(*) FROM {}", T::TABLE)
    }
}

#[async_trait]
impl<T: PgEntity> EntityRepository<T> for PgEntityRepository<T> {
    async fn get(&self, id: i64) -> StorageResult<Option<T>> {
        let row = sqlx::query_as::<_, T::Row>(&Self::select("WHERE id = $1"))
            .bind(id)
            .fetch_optional(&self.pool)
            .await
            .map_err(|e| StorageError::QueryError(e.to_string()))?;

        row.map(T::from_row).transpose()
    }

    async fn list(&self) -> StorageResult<Vec<T>> {
        let rows = sqlx::query_as::<_, T::Row>(&Self::select("ORDER BY id ASC"))
            .fetch_all(&self.pool)
            .await
            .map_err(|e| StorageError::QueryError(e.to_string()))?;

        rows.into_iter().map(T::from_row).collect()
    }

    /// Count and page rows inside one read-only snapshot, so `totalCount`
    /// and the page flags agree with the rows returned.
    #[instrument(skip(self), fields(table = T::TABLE))]
    async fn list_page(&self, request: PageRequest) -> StorageResult<Page<T>> {
        let mut tx = self
            .pool
            .begin()
            .await
            .map_err(|e| StorageError::TransactionError(e.to_string()))?;

        sqlx::query(SNAPSHOT_READ)
            .execute(&mut *tx)
            .await
            .map_err(|e| StorageError::TransactionError(e.to_string()))?;

        let (count,): (i64,) = sqlx::query_as(&Self::count_sql())
            .fetch_one(&mut *tx)
            .await
            .map_err(|e| StorageError::QueryError(e.to_string()))?;
        let total_count =
            usize::try_from(count).map_err(|e| StorageError::SerializationError(e.to_string()))?;
        let offset = request.offset().min(total_count);

        let rows = sqlx::query_as::<_, T::Row>(&Self::select("ORDER BY id ASC LIMIT $1 OFFSET $2"))
            .bind(i64::try_from(request.size).unwrap_or(i64::MAX))
            .bind(i64::try_from(offset).unwrap_or(i64::MAX))
            .fetch_all(&mut *tx)
            .await
            .map_err(|e| StorageError::QueryError(e.to_string()))?;

        tx.commit()
            .await
            .map_err(|e| StorageError::TransactionError(e.to_string()))?;

        let items = rows
            .into_iter()
            .map(T::from_row)
            .collect::<StorageResult<Vec<_>>>()?;

        debug!(rows = items.len(), total_count, "Fetched page");

        Ok(Page::from_window(items, offset, total_count))
    }

    async fn count(&self) -> StorageResult<usize> {
        let (count,): (i64,) = sqlx::query_as(&Self::count_sql())
            .fetch_one(&self.pool)
            .await
            .map_err(|e| StorageError::QueryError(e.to_string()))?;

        usize::try_from(count).map_err(|e| StorageError::SerializationError(e.to_string()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use traveller_core::models::World;

    #[test]
    fn test_paging_runs_in_a_snapshot() {
        assert!(SNAPSHOT_READ.starts_with("SET TRANSACTION"));
        assert!(SNAPSHOT_READ.contains("REPEATABLE READ"));
        assert!(SNAPSHOT_READ.contains("READ ONLY"));
    }

    #[test]
    fn test_sql_targets_entity_table() {
        assert_eq!(
            PgEntityRepository::<World>::count_sql(),
            "SELECT COUNT(*) FROM worlds"
        );
        let select = PgEntityRepository::<World>::select("ORDER BY id ASC LIMIT $1 OFFSET $2");
        assert!(select.starts_with("SELECT id, name"));
        assert!(select.ends_with("FROM worlds ORDER BY id ASC LIMIT $1 OFFSET $2"));
    }
}
