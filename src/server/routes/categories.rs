use std::collections::BTreeMap;

use axum::{
    extract::{Query, State},
    routing::get,
    Json, Router,
};
use serde::{Deserialize, Serialize};
use sqlx::SqlitePool;

use crate::{
    db::queries::{categories, questions},
    server::{
        app::AppState, deserializers::deserialize_bool_flag, error::ApiError, extract::IdPath,
    },
};

use super::{categories_by_id, ApiResponse, QuestionList};

#[derive(Deserialize)]
struct CategoriesQuery {
    #[serde(default, rename = "emptyIncluded")]
    #[serde(deserialize_with = "deserialize_bool_flag")]
    empty_included: Option<bool>,
}

#[derive(Serialize)]
struct CategoriesResponse {
    success: bool,
    categories: BTreeMap<i64, String>,
}

async fn get_categories(
    State(pool): State<SqlitePool>,
    Query(query): Query<CategoriesQuery>,
) -> ApiResponse<Json<CategoriesResponse>> {
    let categories = if query.empty_included.unwrap_or(true) {
        categories::get_all_categories(&pool).await?
    } else {
        categories::get_categories_with_questions(&pool).await?
    };
    if categories.is_empty() {
        return Err(ApiError::NotFound("`Categories` not found.".to_owned()));
    }

    Ok(Json(CategoriesResponse {
        success: true,
        categories: categories_by_id(categories),
    }))
}

async fn category_questions(
    State(pool): State<SqlitePool>,
    IdPath(id): IdPath<i64>,
) -> ApiResponse<Json<QuestionList>> {
    let category = categories::get_category(&pool, id)
        .await?
        .ok_or_else(|| ApiError::NotFound("Category not found.".to_owned()))?;

    let questions = questions::get_questions_for_category(&pool, id).await?;
    if questions.is_empty() {
        return Err(ApiError::NotFound(
            "No questions for a given category found.".to_owned(),
        ));
    }

    Ok(Json(QuestionList::new(questions, Some(category))))
}

pub fn category_router(state: AppState) -> Router {
    Router::new()
        .route("/categories", get(get_categories))
        .route("/categories/{id}/questions", get(category_questions))
        .with_state(state)
}
