use lattice_core::{wire, SearchQuery, SearchResult, SqlSearchRequest};

use crate::client::Client;
use crate::error::{require, require_id, LatticeError, Result};

/// Structured, SQL-style and enumeration searches over a collection
pub struct Search<'a> {
    client: &'a Client,
}

impl<'a> Search<'a> {
    pub(crate) fn new(client: &'a Client) -> Self {
        Self { client }
    }

    #[tracing::instrument(skip(self, query), fields(collection_id = %query.collection_id))]
    pub async fn search(&self, query: &SearchQuery) -> Result<Option<SearchResult>> {
        require_id("collection_id", &query.collection_id)?;
        if let Some(filters) = &query.filters {
            if let Some(index) = filters.iter().position(|f| f.field.trim().is_empty()) {
                return Err(LatticeError::validation(
                    "field",
                    format!("search filter {index} has no field"),
                ));
            }
        }

        let envelope = self
            .client
            .transport()
            .post(&search_path(&query.collection_id), query)
            .await?;
        self.decode(envelope)
    }

    /// List a collection page by page. Same endpoint and body as [`Search::search`];
    /// a query without predicates returns every document.
    pub async fn enumerate(&self, query: &SearchQuery) -> Result<Option<SearchResult>> {
        self.search(query).await
    }

    /// Search with a single SQL-like expression instead of structured filters
    #[tracing::instrument(skip(self))]
    pub async fn search_by_sql(
        &self,
        collection_id: &str,
        sql_expression: &str,
    ) -> Result<Option<SearchResult>> {
        require_id("collection_id", collection_id)?;
        require("sql_expression", sql_expression)?;

        let body = SqlSearchRequest {
            sql_expression: sql_expression.to_string(),
        };
        let envelope = self
            .client
            .transport()
            .post(&search_path(collection_id), &body)
            .await?;
        self.decode(envelope)
    }

    fn decode(&self, envelope: lattice_core::ResponseEnvelope) -> Result<Option<SearchResult>> {
        let result = self
            .client
            .accept(envelope)?
            .and_then(|data| wire::decode_object::<SearchResult>(&data));
        if let Some(r) = &result {
            tracing::debug!(
                returned = r.documents.len(),
                total = r.total_records,
                end_of_results = r.end_of_results,
                "search page received"
            );
        }
        Ok(result)
    }
}

fn search_path(collection_id: &str) -> String {
    format!("/collections/{collection_id}/documents/search")
}
