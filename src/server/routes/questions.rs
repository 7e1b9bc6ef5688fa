use std::collections::{BTreeMap, HashSet};

use axum::{
    extract::{Query, State},
    http::{header, StatusCode},
    routing::{get, post},
    Json, Router,
};
use serde::{Deserialize, Serialize};
use sqlx::SqlitePool;

use crate::{
    db::{
        queries::{categories, questions},
        Category, NewQuestion, Question, DIFFICULTY_RANGE,
    },
    server::{
        app::{AppState, API_PREFIX},
        deserializers::LooseI64,
        error::ApiError,
        extract::{IdPath, JsonBody},
        pagination::{PageQuery, Pagination},
    },
    telemetry::QUESTIONS_CREATED_CNTR,
};

use super::{categories_by_id, ApiResponse, QuestionList};

#[derive(Deserialize)]
struct QuestionPayload {
    question: Option<String>,
    answer: Option<String>,
    category: Option<LooseI64>,
    difficulty: Option<LooseI64>,
}

impl QuestionPayload {
    fn validate(self) -> Result<NewQuestion, ApiError> {
        let invalid = || ApiError::BadRequest("Wrong format of the `Question` object".to_owned());
        let non_empty = |text: Option<String>| text.filter(|t| !t.trim().is_empty());

        Ok(NewQuestion {
            question: non_empty(self.question).ok_or_else(invalid)?,
            answer: non_empty(self.answer).ok_or_else(invalid)?,
            category: self
                .category
                .map(|c| c.0)
                .filter(|c| *c > 0)
                .ok_or_else(invalid)?,
            difficulty: self
                .difficulty
                .map(|d| d.0)
                .filter(|d| DIFFICULTY_RANGE.contains(d))
                .ok_or_else(invalid)?,
        })
    }
}

#[derive(Deserialize)]
struct SearchPayload {
    #[serde(rename = "searchTerm")]
    search_term: Option<String>,
}

#[derive(Serialize)]
struct QuestionsPage {
    success: bool,
    total_questions: i64,
    questions: Vec<Question>,
    current_category: Option<Category>,
    categories: BTreeMap<i64, String>,
}

#[derive(Serialize)]
struct SingleQuestion {
    success: bool,
    question: Question,
}

#[derive(Serialize)]
struct Confirmation {
    success: bool,
    message: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    id: Option<i64>,
}

fn question_not_found() -> ApiError {
    ApiError::NotFound("Requested `Question` does not exist.".to_owned())
}

async fn list_questions(
    State(pool): State<SqlitePool>,
    Query(query): Query<PageQuery>,
) -> ApiResponse<Json<QuestionsPage>> {
    let pagination = Pagination::from(query);
    let not_found = || {
        ApiError::NotFound("`Questions` not found. Requested page does not exist?".to_owned())
    };

    let offset = pagination.offset().ok_or_else(not_found)?;
    let page = questions::get_questions_page(&pool, pagination.limit(), offset).await?;
    if page.is_empty() {
        return Err(not_found());
    }

    let total_questions = questions::count_questions(&pool).await?;
    let on_page: HashSet<i64> = page.iter().map(|q| q.category).collect();
    let categories = categories::get_all_categories(&pool)
        .await?
        .into_iter()
        .filter(|c| on_page.contains(&c.id));

    Ok(Json(QuestionsPage {
        success: true,
        total_questions,
        questions: page,
        current_category: None,
        categories: categories_by_id(categories),
    }))
}

async fn get_question(
    State(pool): State<SqlitePool>,
    IdPath(id): IdPath<i64>,
) -> ApiResponse<Json<SingleQuestion>> {
    let question = questions::get_question(&pool, id)
        .await?
        .ok_or_else(question_not_found)?;
    Ok(Json(SingleQuestion {
        success: true,
        question,
    }))
}

async fn delete_question(
    State(pool): State<SqlitePool>,
    IdPath(id): IdPath<i64>,
) -> ApiResponse<Json<Confirmation>> {
    if !questions::delete_question(&pool, id).await? {
        return Err(question_not_found());
    }
    tracing::info!(question_id = id, "Question deleted");

    Ok(Json(Confirmation {
        success: true,
        message: format!("`Question` id: {id} has been deleted."),
        id: None,
    }))
}

async fn create_question(
    State(pool): State<SqlitePool>,
    JsonBody(payload): JsonBody<QuestionPayload>,
) -> ApiResponse<(StatusCode, [(header::HeaderName, String); 1], Json<Confirmation>)> {
    let new_question = payload.validate()?;
    if categories::get_category(&pool, new_question.category)
        .await?
        .is_none()
    {
        return Err(ApiError::BadRequest(
            "Given category does not exist.".to_owned(),
        ));
    }

    let id = questions::create_question(&pool, &new_question).await?;
    QUESTIONS_CREATED_CNTR.inc();
    tracing::info!(question_id = id, category = new_question.category, "Question created");

    Ok((
        StatusCode::CREATED,
        [(header::LOCATION, format!("{API_PREFIX}/questions/{id}"))],
        Json(Confirmation {
            success: true,
            message: "Question has been created.".to_owned(),
            id: Some(id),
        }),
    ))
}

async fn search_questions(
    State(pool): State<SqlitePool>,
    JsonBody(payload): JsonBody<SearchPayload>,
) -> ApiResponse<Json<QuestionList>> {
    let term = payload
        .search_term
        .filter(|term| !term.is_empty())
        .ok_or_else(|| {
            ApiError::BadRequest("Required key `searchTerm` is not found.".to_owned())
        })?;

    let found = questions::search_questions(&pool, &term).await?;
    Ok(Json(QuestionList::new(found, None)))
}

pub fn questions_router(state: AppState) -> Router {
    Router::new()
        .route("/questions", get(list_questions).post(create_question))
        .route("/questions/searches", post(search_questions))
        .route(
            "/questions/{id}",
            get(get_question).delete(delete_question),
        )
        .with_state(state)
}
