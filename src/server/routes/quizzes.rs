use std::collections::HashSet;

use axum::{extract::State, routing::post, Json, Router};
use serde::{Deserialize, Serialize};
use sqlx::SqlitePool;

use crate::{
    db::{
        queries::{categories, questions},
        Question,
    },
    quiz::{pick_question, QuizScope},
    server::{app::AppState, deserializers::LooseI64, error::ApiError, extract::JsonBody},
    telemetry::QUIZ_QUESTIONS_CNTR,
};

use super::ApiResponse;

#[derive(Deserialize)]
struct QuizPayload {
    previous_questions: Option<Vec<LooseI64>>,
    quiz_category: Option<QuizCategoryPayload>,
}

#[derive(Deserialize)]
struct QuizCategoryPayload {
    id: Option<LooseI64>,
    #[serde(rename = "type")]
    kind: Option<String>,
}

struct Quiz {
    scope: QuizScope,
    previous: HashSet<i64>,
}

impl QuizPayload {
    fn validate(self) -> Result<Quiz, ApiError> {
        let invalid = || ApiError::BadRequest("Wrong data format.".to_owned());

        let previous = self.previous_questions.ok_or_else(invalid)?;
        let category = self.quiz_category.ok_or_else(invalid)?;
        let id = category.id.ok_or_else(invalid)?;
        category.kind.ok_or_else(invalid)?;

        Ok(Quiz {
            scope: QuizScope::from(id.0),
            previous: previous.into_iter().map(|q| q.0).collect(),
        })
    }
}

#[derive(Serialize)]
struct QuizQuestion {
    success: bool,
    question: Question,
}

async fn next_quiz_question(
    State(pool): State<SqlitePool>,
    JsonBody(payload): JsonBody<QuizPayload>,
) -> ApiResponse<Json<QuizQuestion>> {
    let quiz = payload.validate()?;

    let (candidates, label) = match quiz.scope {
        QuizScope::AnyCategory => (questions::get_all_questions(&pool).await?, "all".to_owned()),
        QuizScope::Category(id) => {
            categories::get_category(&pool, id)
                .await?
                .ok_or_else(|| ApiError::NotFound("Category not found.".to_owned()))?;
            (
                questions::get_questions_for_category(&pool, id).await?,
                id.to_string(),
            )
        }
    };

    let question = pick_question(candidates, &quiz.previous, &mut rand::thread_rng())
        .ok_or_else(|| {
            ApiError::NotFound("No questions with specified criteria found.".to_owned())
        })?;
    QUIZ_QUESTIONS_CNTR.with_label_values(&[label.as_str()]).inc();
    tracing::debug!(question_id = question.id, category = %label, "Serving quiz question");

    Ok(Json(QuizQuestion {
        success: true,
        question,
    }))
}

pub fn quizzes_router(state: AppState) -> Router {
    Router::new()
        .route("/quizzes", post(next_quiz_question))
        .with_state(state)
}
