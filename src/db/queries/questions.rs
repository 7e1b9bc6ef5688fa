use serde::{Deserialize, Serialize};
use sqlx::SqlitePool;

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, sqlx::FromRow)]
pub struct Question {
    pub id: i64,
    pub question: String,
    pub answer: String,
    pub category: i64,
    pub difficulty: i64,
}

/// A question that passed validation and can be inserted as is.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NewQuestion {
    pub question: String,
    pub answer: String,
    pub category: i64,
    pub difficulty: i64,
}

pub async fn get_all_questions(pool: &SqlitePool) -> sqlx::Result<Vec<Question>> {
    sqlx::query_as::<_, Question>(
        r#"
        SELECT id, question, answer, category, difficulty FROM questions ORDER BY id
        "#,
    )
    .fetch_all(pool)
    .await
}

pub async fn get_questions_page(
    pool: &SqlitePool,
    limit: i64,
    offset: i64,
) -> sqlx::Result<Vec<Question>> {
    sqlx::query_as::<_, Question>(
        r#"
        SELECT id, question, answer, category, difficulty FROM questions ORDER BY id LIMIT ?1 OFFSET ?2
        "#,
    )
    .bind(limit)
    .bind(offset)
    .fetch_all(pool)
    .await
}

pub async fn count_questions(pool: &SqlitePool) -> sqlx::Result<i64> {
    sqlx::query_scalar::<_, i64>("SELECT COUNT(*) FROM questions")
        .fetch_one(pool)
        .await
}

pub async fn get_question(pool: &SqlitePool, id: i64) -> sqlx::Result<Option<Question>> {
    sqlx::query_as::<_, Question>(
        r#"
        SELECT id, question, answer, category, difficulty FROM questions WHERE questions.id = ?1
        "#,
    )
    .bind(id)
    .fetch_optional(pool)
    .await
}

pub async fn get_questions_for_category(
    pool: &SqlitePool,
    category: i64,
) -> sqlx::Result<Vec<Question>> {
    sqlx::query_as::<_, Question>(
        r#"
        SELECT id, question, answer, category, difficulty FROM questions
        WHERE questions.category = ?1
        ORDER BY id
        "#,
    )
    .bind(category)
    .fetch_all(pool)
    .await
}

/// Case-insensitive substring match against the question text.
///
/// SQLite's `lower()` only folds ASCII, so matching happens on the Rust side.
pub async fn search_questions(pool: &SqlitePool, term: &str) -> sqlx::Result<Vec<Question>> {
    let needle = term.to_lowercase();
    let found = get_all_questions(pool)
        .await?
        .into_iter()
        .filter(|q| q.question.to_lowercase().contains(&needle))
        .collect();
    Ok(found)
}

pub async fn create_question(pool: &SqlitePool, question: &NewQuestion) -> sqlx::Result<i64> {
    let id = sqlx::query(
        r#"
        INSERT INTO questions (question, answer, category, difficulty) VALUES (?1, ?2, ?3, ?4)
        "#,
    )
    .bind(&question.question)
    .bind(&question.answer)
    .bind(question.category)
    .bind(question.difficulty)
    .execute(pool)
    .await?
    .last_insert_rowid();

    Ok(id)
}

/// Returns `false` when there was no question with this id.
pub async fn delete_question(pool: &SqlitePool, id: i64) -> sqlx::Result<bool> {
    let deleted = sqlx::query(
        r#"
        DELETE FROM questions WHERE questions.id = ?1
        "#,
    )
    .bind(id)
    .execute(pool)
    .await?
    .rows_affected();
    Ok(deleted > 0)
}

pub async fn import_questions(pool: &SqlitePool, questions: Vec<NewQuestion>) -> sqlx::Result<u64> {
    let mut tx = pool.begin().await?;
    let mut inserted = 0;
    for question in questions {
        inserted += sqlx::query(
            r#"
            INSERT INTO questions (question, answer, category, difficulty) VALUES (?1, ?2, ?3, ?4)
            "#,
        )
        .bind(question.question)
        .bind(question.answer)
        .bind(question.category)
        .bind(question.difficulty)
        .execute(&mut *tx)
        .await?
        .rows_affected();
    }
    tx.commit().await?;
    Ok(inserted)
}

pub async fn delete_all_questions(pool: &SqlitePool) -> sqlx::Result<u64> {
    let deleted = sqlx::query("DELETE FROM questions")
        .execute(pool)
        .await?
        .rows_affected();
    Ok(deleted)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::db::{connect_in_memory, queries::categories::create_category};

    fn new_question(text: &str, category: i64) -> NewQuestion {
        NewQuestion {
            question: text.to_owned(),
            answer: "answer".to_owned(),
            category,
            difficulty: 3,
        }
    }

    #[tokio::test]
    async fn pages_are_ordered_and_bounded() {
        let pool = connect_in_memory().await.unwrap();
        let category = create_category(&pool, "Geography").await.unwrap();
        for n in 0..12 {
            create_question(&pool, &new_question(&format!("Question {n}"), category))
                .await
                .unwrap();
        }

        assert_eq!(count_questions(&pool).await.unwrap(), 12);
        let first = get_questions_page(&pool, 10, 0).await.unwrap();
        assert_eq!(first.len(), 10);
        assert_eq!(first[0].question, "Question 0");
        let second = get_questions_page(&pool, 10, 10).await.unwrap();
        assert_eq!(second.len(), 2);
        assert!(get_questions_page(&pool, 10, 20).await.unwrap().is_empty());
    }

    #[tokio::test]
    async fn search_ignores_case() {
        let pool = connect_in_memory().await.unwrap();
        let category = create_category(&pool, "Art").await.unwrap();
        create_question(&pool, &new_question("Who painted the Mona Lisa?", category))
            .await
            .unwrap();
        create_question(&pool, &new_question("Which color is the sky?", category))
            .await
            .unwrap();

        let found = search_questions(&pool, "mona").await.unwrap();
        assert_eq!(found.len(), 1);
        assert_eq!(found[0].question, "Who painted the Mona Lisa?");
        assert_eq!(search_questions(&pool, "WH").await.unwrap().len(), 2);
        assert!(search_questions(&pool, "%").await.unwrap().is_empty());

        create_question(&pool, &new_question("Où est l'ÉCOLE?", category))
            .await
            .unwrap();
        let found = search_questions(&pool, "école").await.unwrap();
        assert_eq!(found.len(), 1);
        assert_eq!(found[0].question, "Où est l'ÉCOLE?");
    }

    #[tokio::test]
    async fn delete_reports_missing_rows() {
        let pool = connect_in_memory().await.unwrap();
        let category = create_category(&pool, "Art").await.unwrap();
        let id = create_question(&pool, &new_question("Who?", category))
            .await
            .unwrap();

        assert!(delete_question(&pool, id).await.unwrap());
        assert!(get_question(&pool, id).await.unwrap().is_none());
        assert!(!delete_question(&pool, id).await.unwrap());
    }

    #[tokio::test]
    async fn unknown_category_is_rejected_by_foreign_key() {
        let pool = connect_in_memory().await.unwrap();
        let result = create_question(&pool, &new_question("Orphan?", 42)).await;
        assert!(result.is_err());
    }

    #[tokio::test]
    async fn questions_for_category() {
        let pool = connect_in_memory().await.unwrap();
        let art = create_category(&pool, "Art").await.unwrap();
        let sports = create_category(&pool, "Sports").await.unwrap();
        create_question(&pool, &new_question("Brush?", art)).await.unwrap();
        create_question(&pool, &new_question("Ball?", sports)).await.unwrap();
        create_question(&pool, &new_question("Canvas?", art)).await.unwrap();

        let questions = get_questions_for_category(&pool, art).await.unwrap();
        assert_eq!(questions.len(), 2);
        assert!(questions.iter().all(|q| q.category == art));
    }
}
