use serde::Deserialize;

use super::deserializers::deserialize_lenient_i64;

pub const QUESTIONS_PER_PAGE: i64 = 10;

/// Fixed-size page of questions, 1-indexed.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Pagination {
    pub page: i64,
    pub per_page: i64,
}

impl Pagination {
    pub fn new(page: i64) -> Self {
        Self {
            page,
            per_page: QUESTIONS_PER_PAGE,
        }
    }

    /// SQL OFFSET, `None` when the page can not hold any rows.
    pub fn offset(&self) -> Option<i64> {
        if self.page < 1 {
            return None;
        }
        (self.page - 1).checked_mul(self.per_page)
    }

    pub fn limit(&self) -> i64 {
        self.per_page
    }
}

impl Default for Pagination {
    fn default() -> Self {
        Self::new(1)
    }
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct PageQuery {
    #[serde(default, deserialize_with = "deserialize_lenient_i64")]
    pub page: Option<i64>,
}

impl From<PageQuery> for Pagination {
    fn from(query: PageQuery) -> Self {
        query.page.map(Self::new).unwrap_or_default()
    }
}
