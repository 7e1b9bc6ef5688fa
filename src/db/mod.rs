pub mod queries;

use std::ops::RangeInclusive;

use sqlx::sqlite::{SqlitePool, SqlitePoolOptions};

pub use queries::categories::{Category, NewCategory};
pub use queries::questions::{NewQuestion, Question};

use sqlx::Error;

pub const DIFFICULTY_RANGE: RangeInclusive<i64> = 1..=5;

pub async fn establish_connection(url: &str, max_connections: u32) -> Result<SqlitePool, Error> {
    SqlitePoolOptions::new()
        .max_connections(max_connections)
        .connect(url)
        .await
}

/// Single-connection pool over a private in-memory database.
///
/// Every SQLite `:memory:` connection is its own database, so the pool is
/// pinned to one connection that never idles out.
pub async fn connect_in_memory() -> Result<SqlitePool, Error> {
    let pool = SqlitePoolOptions::new()
        .max_connections(1)
        .min_connections(1)
        .idle_timeout(None)
        .max_lifetime(None)
        .connect("sqlite::memory:")
        .await?;
    run_migrations(&pool).await?;
    Ok(pool)
}

pub async fn run_migrations(pool: &SqlitePool) -> Result<(), Error> {
    sqlx::migrate!("./migrations").run(pool).await?;
    Ok(())
}

/// Forgets the `AUTOINCREMENT` counters of both tables so that the next
/// inserted rows start again at id 1. Only meaningful on empty tables.
pub async fn reset_id_sequences(pool: &SqlitePool) -> Result<u64, Error> {
    let reset = sqlx::query("DELETE FROM sqlite_sequence WHERE name IN ('categories', 'questions')")
        .execute(pool)
        .await?
        .rows_affected();
    Ok(reset)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn migrations_are_idempotent() {
        let pool = connect_in_memory().await.unwrap();
        run_migrations(&pool).await.unwrap();

        let tables: Vec<(String,)> = sqlx::query_as(
            "SELECT name FROM sqlite_master WHERE type = 'table' AND name IN ('categories', 'questions') ORDER BY name",
        )
        .fetch_all(&pool)
        .await
        .unwrap();
        assert_eq!(
            tables,
            vec![("categories".to_owned(),), ("questions".to_owned(),)]
        );
    }
}
