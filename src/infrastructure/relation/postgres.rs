//! PostgreSQL link store

use async_trait::async_trait;
use sqlx::postgres::PgPool;
use sqlx::Row;

use super::rows_to_write;
use crate::domain::catalog::{EntityId, EntityKind};
use crate::domain::relation::{Cardinality, JoinTable, LinkSide, LinkStore};
use crate::domain::DomainError;

const TABLE_NAME: &str = "catalog_links";

fn column(side: LinkSide) -> &'static str {
    match side {
        LinkSide::Left => "left_id",
        LinkSide::Right => "right_id",
    }
}

fn storage_error(action: &str) -> impl FnOnce(sqlx::Error) -> DomainError + '_ {
    move |e| DomainError::storage(format!("Failed to {}: {}", action, e))
}

/// Every join table stored in one `catalog_links` table, ordered by a serial
/// position column
#[derive(Debug, Clone)]
pub struct PostgresLinkStore {
    pool: PgPool,
}

impl PostgresLinkStore {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    pub async fn ensure_table(&self) -> Result<(), DomainError> {
        let query = format!(
            r#"
            CREATE TABLE IF NOT EXISTS {TABLE_NAME} (
                position BIGSERIAL PRIMARY KEY,
                join_table VARCHAR(64) NOT NULL,
                left_id VARCHAR(255) NOT NULL,
                right_id VARCHAR(255) NOT NULL
            )
            "#
        );

        sqlx::query(&query)
            .execute(&self.pool)
            .await
            .map_err(storage_error("create link table"))?;

        for side in [LinkSide::Left, LinkSide::Right] {
            let col = column(side);
            let index = format!(
                "CREATE INDEX IF NOT EXISTS {TABLE_NAME}_{col}_idx ON {TABLE_NAME} (join_table, {col})"
            );
            sqlx::query(&index)
                .execute(&self.pool)
                .await
                .map_err(storage_error("create link index"))?;
        }

        Ok(())
    }
}

#[async_trait]
impl LinkStore for PostgresLinkStore {
    async fn linked(
        &self,
        table: JoinTable,
        side: LinkSide,
        id: &EntityId,
    ) -> Result<Vec<EntityId>, DomainError> {
        let query = format!(
            "SELECT {other} AS other FROM {TABLE_NAME} WHERE join_table = $1 AND {this} = $2 ORDER BY position",
            other = column(side.opposite()),
            this = column(side),
        );

        let rows = sqlx::query(&query)
            .bind(table.as_str())
            .bind(id.as_str())
            .fetch_all(&self.pool)
            .await
            .map_err(storage_error("read links"))?;

        rows.into_iter()
            .map(|row| EntityId::new(row.get::<String, _>("other")))
            .collect()
    }

    async fn replace(
        &self,
        table: JoinTable,
        side: LinkSide,
        id: &EntityId,
        others: &[EntityId],
    ) -> Result<(), DomainError> {
        let others = rows_to_write(table, side, others);
        let mut tx = self
            .pool
            .begin()
            .await
            .map_err(storage_error("begin transaction"))?;

        let delete = format!(
            "DELETE FROM {TABLE_NAME} WHERE join_table = $1 AND {} = $2",
            column(side)
        );
        sqlx::query(&delete)
            .bind(table.as_str())
            .bind(id.as_str())
            .execute(&mut *tx)
            .await
            .map_err(storage_error("delete links"))?;

        if table.cardinality() == Cardinality::OneToMany && side == LinkSide::Left {
            let moved: Vec<String> = others.iter().map(|o| o.as_str().to_string()).collect();
            let detach = format!(
                "DELETE FROM {TABLE_NAME} WHERE join_table = $1 AND right_id = ANY($2)"
            );
            sqlx::query(&detach)
                .bind(table.as_str())
                .bind(&moved)
                .execute(&mut *tx)
                .await
                .map_err(storage_error("detach moved members"))?;
        }

        let insert = format!(
            "INSERT INTO {TABLE_NAME} (join_table, left_id, right_id) VALUES ($1, $2, $3)"
        );
        for other in &others {
            let (left, right) = match side {
                LinkSide::Left => (id, other),
                LinkSide::Right => (other, id),
            };
            sqlx::query(&insert)
                .bind(table.as_str())
                .bind(left.as_str())
                .bind(right.as_str())
                .execute(&mut *tx)
                .await
                .map_err(storage_error("insert link"))?;
        }

        tx.commit().await.map_err(storage_error("commit links"))?;
        Ok(())
    }

    async fn detach(&self, kind: EntityKind, id: &EntityId) -> Result<usize, DomainError> {
        let mut tx = self
            .pool
            .begin()
            .await
            .map_err(storage_error("begin transaction"))?;
        let mut removed = 0;

        for table in JoinTable::ALL {
            for side in table.sides_of(kind) {
                let query = format!(
                    "DELETE FROM {TABLE_NAME} WHERE join_table = $1 AND {} = $2",
                    column(side)
                );
                let result = sqlx::query(&query)
                    .bind(table.as_str())
                    .bind(id.as_str())
                    .execute(&mut *tx)
                    .await
                    .map_err(storage_error("detach links"))?;
                removed += result.rows_affected() as usize;
            }
        }

        tx.commit().await.map_err(storage_error("commit detach"))?;
        Ok(removed)
    }

    async fn clear(&self) -> Result<(), DomainError> {
        sqlx::query(&format!("DELETE FROM {TABLE_NAME}"))
            .execute(&self.pool)
            .await
            .map_err(storage_error("clear links"))?;
        Ok(())
    }
}
