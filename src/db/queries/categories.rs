use serde::{Deserialize, Serialize};
use sqlx::SqlitePool;

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, sqlx::FromRow)]
pub struct Category {
    pub id: i64,
    #[serde(rename = "type")]
    #[sqlx(rename = "type")]
    pub kind: String,
}

/// Category row to insert. A missing `id` lets the database assign one.
#[derive(Debug, Clone)]
pub struct NewCategory {
    pub id: Option<i64>,
    pub kind: String,
}

pub async fn get_all_categories(pool: &SqlitePool) -> sqlx::Result<Vec<Category>> {
    sqlx::query_as::<_, Category>(
        r#"
        SELECT id, type FROM categories ORDER BY id
        "#,
    )
    .fetch_all(pool)
    .await
}

/// Categories referenced by at least one question.
pub async fn get_categories_with_questions(pool: &SqlitePool) -> sqlx::Result<Vec<Category>> {
    sqlx::query_as::<_, Category>(
        r#"
        SELECT categories.id, categories.type FROM categories
        WHERE EXISTS (SELECT 1 FROM questions WHERE questions.category = categories.id)
        ORDER BY categories.id
        "#,
    )
    .fetch_all(pool)
    .await
}

pub async fn get_category(pool: &SqlitePool, id: i64) -> sqlx::Result<Option<Category>> {
    sqlx::query_as::<_, Category>(
        r#"
        SELECT id, type FROM categories WHERE categories.id = ?1
        "#,
    )
    .bind(id)
    .fetch_optional(pool)
    .await
}

pub async fn create_category(pool: &SqlitePool, kind: &str) -> sqlx::Result<i64> {
    let id = sqlx::query(
        r#"
        INSERT INTO categories (type) VALUES (?1)
        "#,
    )
    .bind(kind)
    .execute(pool)
    .await?
    .last_insert_rowid();

    Ok(id)
}

/// Inserts all categories in one transaction and returns how many were written.
pub async fn import_categories(pool: &SqlitePool, categories: Vec<NewCategory>) -> sqlx::Result<u64> {
    let mut tx = pool.begin().await?;
    let mut inserted = 0;
    for category in categories {
        inserted += sqlx::query(
            r#"
            INSERT INTO categories (id, type) VALUES (?1, ?2)
            "#,
        )
        .bind(category.id)
        .bind(category.kind)
        .execute(&mut *tx)
        .await?
        .rows_affected();
    }
    tx.commit().await?;
    Ok(inserted)
}

pub async fn delete_all_categories(pool: &SqlitePool) -> sqlx::Result<u64> {
    let deleted = sqlx::query("DELETE FROM categories")
        .execute(pool)
        .await?
        .rows_affected();
    Ok(deleted)
}
