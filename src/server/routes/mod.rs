mod categories;
mod questions;
mod quizzes;

use std::collections::BTreeMap;

use serde::Serialize;

pub use categories::category_router;
pub use questions::questions_router;
pub use quizzes::quizzes_router;

use crate::db::{Category, Question};

use super::error::ApiError;

pub type ApiResponse<T> = Result<T, ApiError>;

/// Questions listed together with the category they were filtered by.
#[derive(Serialize)]
struct QuestionList {
    success: bool,
    total_questions: usize,
    questions: Vec<Question>,
    current_category: Option<Category>,
}

impl QuestionList {
    fn new(questions: Vec<Question>, current_category: Option<Category>) -> Self {
        Self {
            success: true,
            total_questions: questions.len(),
            questions,
            current_category,
        }
    }
}

// categories go over the wire as {"<id>": "<type>"}
fn categories_by_id(categories: impl IntoIterator<Item = Category>) -> BTreeMap<i64, String> {
    categories.into_iter().map(|c| (c.id, c.kind)).collect()
}
