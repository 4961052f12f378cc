use anyhow::Context;
use domain::models::QuestionRecord;
use domain::ports::VectorStore;
use domain::query::{NearTextQuery, WhereFilter};
use shared::types::Result;

pub const DEFAULT_QUERY_CONCEPTS: [&str; 1] = ["cute"];

/// Near-text search, optionally narrowed to one category and capped.
pub struct QueryService<S> {
    store: S,
}

impl<S: VectorStore> QueryService<S> {
    pub fn new(store: S) -> Self {
        Self { store }
    }

    pub async fn search(
        &self,
        concepts: &[String],
        category: Option<&str>,
        limit: Option<usize>,
    ) -> Result<Vec<QuestionRecord>> {
        let mut query = NearTextQuery::questions(concepts.iter().cloned());
        if let Some(category) = category {
            query = query.with_where(WhereFilter::equal("category", category));
        }
        if let Some(limit) = limit {
            query = query.with_limit(limit);
        }
        self.store
            .search(&query)
            .await
            .context("Near-text query failed")
    }
}
