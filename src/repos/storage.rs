use async_trait::async_trait;
use sqlx::{FromRow, PgPool, Postgres, QueryBuilder, Row};
use uuid::Uuid;

use crate::error::DatabaseError;
use crate::repos::base::{Entity, Fields, OnConflict};

/// The storage capability the generic store runs against.
///
/// Write operations hand back the rows the database actually wrote so that
/// store-assigned columns never have to be guessed by the caller.
#[async_trait]
pub trait Storage<E: Entity>: Send + Sync {
    async fn find(&self, skip: i64, take: i64) -> Result<Vec<E>, DatabaseError>;

    /// Fetches one window of rows together with the total row count, which
    /// ignores `skip` and `take`.
    async fn find_and_count(&self, skip: i64, take: i64) -> Result<(Vec<E>, i64), DatabaseError>;

    async fn count(&self) -> Result<i64, DatabaseError>;

    async fn find_one(&self, id: Uuid) -> Result<Option<E>, DatabaseError>;

    async fn insert(&self, fields: Fields, on_conflict: OnConflict) -> Result<Vec<E>, DatabaseError>;

    async fn update(&self, id: Uuid, fields: Fields) -> Result<Vec<E>, DatabaseError>;

    /// Returns the number of deleted rows.
    async fn delete(&self, id: Uuid) -> Result<u64, DatabaseError>;
}

/// Postgres storage shared by every entity table.
#[derive(Debug, Clone)]
pub struct PgStorage {
    pool: PgPool,
}

impl PgStorage {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

fn column_list<E: Entity>() -> String {
    E::columns().join(", ")
}

#[async_trait]
impl<E: Entity> Storage<E> for PgStorage {
    async fn find(&self, skip: i64, take: i64) -> Result<Vec<E>, DatabaseError> {
        let query = format!(
            "SELECT {} FROM {} ORDER BY created_at ASC, id ASC LIMIT $1 OFFSET $2",
            column_list::<E>(),
            E::get_table_name()
        );
        let rows = sqlx::query_as::<_, E>(&query)
            .bind(take)
            .bind(skip)
            .fetch_all(&self.pool)
            .await?;
        Ok(rows)
    }

    async fn find_and_count(&self, skip: i64, take: i64) -> Result<(Vec<E>, i64), DatabaseError> {
        // One statement, one snapshot. The LEFT JOIN keeps the count row when
        // the window is past the end of the table.
        let query = format!(
            "WITH total AS (SELECT COUNT(*) AS total_count FROM {table}), \
             page AS (SELECT {cols} FROM {table} ORDER BY created_at ASC, id ASC LIMIT $1 OFFSET $2) \
             SELECT total.total_count, page.* FROM total LEFT JOIN page ON TRUE \
             ORDER BY page.created_at ASC, page.id ASC",
            table = E::get_table_name(),
            cols = column_list::<E>(),
        );
        let rows = sqlx::query(&query)
            .bind(take)
            .bind(skip)
            .fetch_all(&self.pool)
            .await?;

        let mut total = 0;
        let mut items = Vec::with_capacity(rows.len());
        for row in &rows {
            total = row.try_get::<i64, _>("total_count")?;
            if row.try_get::<Option<Uuid>, _>("id")?.is_some() {
                items.push(E::from_row(row)?);
            }
        }
        Ok((items, total))
    }

    async fn count(&self) -> Result<i64, DatabaseError> {
        let query = format!("SELECT COUNT(*) FROM {}", E::get_table_name());
        let count = sqlx::query_scalar::<_, i64>(&query)
            .fetch_one(&self.pool)
            .await?;
        Ok(count)
    }

    async fn find_one(&self, id: Uuid) -> Result<Option<E>, DatabaseError> {
        let query = format!(
            "SELECT {} FROM {} WHERE id = $1",
            column_list::<E>(),
            E::get_table_name()
        );
        let row = sqlx::query_as::<_, E>(&query)
            .bind(id)
            .fetch_optional(&self.pool)
            .await?;
        Ok(row)
    }

    async fn insert(&self, fields: Fields, on_conflict: OnConflict) -> Result<Vec<E>, DatabaseError> {
        let mut qb = QueryBuilder::<Postgres>::new(format!("INSERT INTO {} ", E::get_table_name()));
        if fields.is_empty() {
            qb.push("DEFAULT VALUES");
        } else {
            let columns: Vec<&str> = fields.iter().map(|(column, _)| *column).collect();
            qb.push("(").push(columns.join(", ")).push(") VALUES (");
            for (i, (_, value)) in fields.into_iter().enumerate() {
                if i > 0 {
                    qb.push(", ");
                }
                value.push_bind(&mut qb);
            }
            qb.push(")");
        }
        if on_conflict == OnConflict::DoNothing {
            qb.push(" ON CONFLICT DO NOTHING");
        }
        qb.push(" RETURNING ").push(column_list::<E>());

        let rows = qb.build_query_as::<E>().fetch_all(&self.pool).await?;
        Ok(rows)
    }

    async fn update(&self, id: Uuid, fields: Fields) -> Result<Vec<E>, DatabaseError> {
        let mut qb = QueryBuilder::<Postgres>::new(format!("UPDATE {} SET ", E::get_table_name()));
        for (i, (column, value)) in fields.into_iter().enumerate() {
            if i > 0 {
                qb.push(", ");
            }
            qb.push(column).push(" = ");
            value.push_bind(&mut qb);
        }
        qb.push(" WHERE id = ")
            .push_bind(id)
            .push(" RETURNING ")
            .push(column_list::<E>());

        let rows = qb.build_query_as::<E>().fetch_all(&self.pool).await?;
        Ok(rows)
    }

    async fn delete(&self, id: Uuid) -> Result<u64, DatabaseError> {
        let query = format!("DELETE FROM {} WHERE id = $1", E::get_table_name());
        let result = sqlx::query(&query).bind(id).execute(&self.pool).await?;
        Ok(result.rows_affected())
    }
}
