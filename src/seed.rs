//! CSV import and export of the trivia data set.
//!
//! A data directory holds `categories.csv` (`Id`, `Type`) and
//! `questions.csv` (`Question`, `Answer`, `Difficulty`, `Category`). The
//! `Id` column is optional on import; without it ids are assigned in file
//! order.

use std::collections::HashSet;
use std::path::Path;

use anyhow::Context;
use serde::de::DeserializeOwned;
use serde::{Deserialize, Serialize};
use sqlx::SqlitePool;

use crate::db::queries::{categories, questions};
use crate::db::{self, NewCategory, NewQuestion, DIFFICULTY_RANGE};

pub const CATEGORIES_FILE: &str = "categories.csv";
pub const QUESTIONS_FILE: &str = "questions.csv";

#[derive(Debug, Serialize, Deserialize)]
pub struct CategoryRecord {
    #[serde(rename = "Id", default)]
    pub id: Option<i64>,
    #[serde(rename = "Type")]
    pub kind: String,
}

#[derive(Debug, Serialize, Deserialize)]
pub struct QuestionRecord {
    #[serde(rename = "Question")]
    pub question: String,
    #[serde(rename = "Answer")]
    pub answer: String,
    #[serde(rename = "Difficulty")]
    pub difficulty: String,
    #[serde(rename = "Category")]
    pub category: String,
}

impl QuestionRecord {
    fn into_new_question(self) -> Option<NewQuestion> {
        let difficulty = self.difficulty.parse::<i64>().ok()?;
        let category = self.category.parse::<i64>().ok()?;
        if self.question.is_empty() || self.answer.is_empty() {
            return None;
        }
        if !DIFFICULTY_RANGE.contains(&difficulty) || category <= 0 {
            return None;
        }
        Some(NewQuestion {
            question: self.question,
            answer: self.answer,
            category,
            difficulty,
        })
    }
}

#[derive(Debug, Default, Clone, Copy, PartialEq, Eq)]
pub struct ImportReport {
    pub categories: u64,
    pub questions: u64,
    pub skipped: usize,
}

// rows that do not deserialize are counted and left out
fn read_from<T: DeserializeOwned>(path: &Path) -> anyhow::Result<(Vec<T>, usize)> {
    let mut rdr = csv::ReaderBuilder::new()
        .trim(csv::Trim::All)
        .from_path(path)
        .with_context(|| format!("Cannot open {}", path.display()))?;
    let mut out = Vec::new();
    let mut skipped = 0;
    for record in rdr.deserialize() {
        match record {
            Ok(record) => out.push(record),
            Err(err) => {
                tracing::warn!("Skipping row in {}: {err}", path.display());
                skipped += 1;
            }
        }
    }
    Ok((out, skipped))
}

fn write_to(path: &Path, data: Vec<impl Serialize>) -> anyhow::Result<()> {
    let mut wtr = csv::Writer::from_path(path)
        .with_context(|| format!("Cannot create {}", path.display()))?;
    for line in data {
        wtr.serialize(line)?;
    }
    wtr.flush()?;
    Ok(())
}

pub async fn import_dir(pool: &SqlitePool, dir: &Path) -> anyhow::Result<ImportReport> {
    let (category_rows, bad_categories) = read_from::<CategoryRecord>(&dir.join(CATEGORIES_FILE))?;
    let (question_rows, bad_questions) = read_from::<QuestionRecord>(&dir.join(QUESTIONS_FILE))?;
    let mut skipped = bad_categories + bad_questions;

    let category_count = category_rows.len();
    let new_categories: Vec<NewCategory> = category_rows
        .into_iter()
        .filter(|c| !c.kind.is_empty())
        .map(|c| NewCategory {
            id: c.id,
            kind: c.kind,
        })
        .collect();
    skipped += category_count - new_categories.len();
    let imported_categories = categories::import_categories(pool, new_categories).await?;

    let known: HashSet<i64> = categories::get_all_categories(pool)
        .await?
        .into_iter()
        .map(|c| c.id)
        .collect();
    let question_count = question_rows.len();
    let new_questions: Vec<NewQuestion> = question_rows
        .into_iter()
        .filter_map(QuestionRecord::into_new_question)
        .filter(|q| known.contains(&q.category))
        .collect();
    skipped += question_count - new_questions.len();
    let imported_questions = questions::import_questions(pool, new_questions).await?;

    let report = ImportReport {
        categories: imported_categories,
        questions: imported_questions,
        skipped,
    };
    tracing::info!(?report, "Import finished");
    Ok(report)
}

pub async fn export_dir(pool: &SqlitePool, dir: &Path) -> anyhow::Result<()> {
    let categories: Vec<CategoryRecord> = categories::get_all_categories(pool)
        .await?
        .into_iter()
        .map(|c| CategoryRecord {
            id: Some(c.id),
            kind: c.kind,
        })
        .collect();
    let questions: Vec<QuestionRecord> = questions::get_all_questions(pool)
        .await?
        .into_iter()
        .map(|q| QuestionRecord {
            question: q.question,
            answer: q.answer,
            difficulty: q.difficulty.to_string(),
            category: q.category.to_string(),
        })
        .collect();

    if !dir.exists() {
        std::fs::create_dir_all(dir)?
    }
    write_to(&dir.join(CATEGORIES_FILE), categories)?;
    write_to(&dir.join(QUESTIONS_FILE), questions)?;
    Ok(())
}

/// Removes every question, then every category, and restarts id numbering
/// so a later import without `Id` lines up with question rows again.
pub async fn clear(pool: &SqlitePool) -> anyhow::Result<(u64, u64)> {
    let questions = questions::delete_all_questions(pool).await?;
    let categories = categories::delete_all_categories(pool).await?;
    db::reset_id_sequences(pool).await?;
    Ok((categories, questions))
}
