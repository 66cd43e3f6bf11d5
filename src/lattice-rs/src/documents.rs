use lattice_core::{wire, Document, IngestDocumentRequest};

use crate::client::Client;
use crate::error::{require_id, Result};

/// Which parts of a document a read should return
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ReadOptions {
    pub include_content: bool,
    pub include_labels: bool,
    pub include_tags: bool,
}

impl Default for ReadOptions {
    fn default() -> Self {
        Self {
            include_content: false,
            include_labels: true,
            include_tags: true,
        }
    }
}

impl ReadOptions {
    /// Metadata plus raw content
    pub fn with_content() -> Self {
        Self {
            include_content: true,
            ..Default::default()
        }
    }

    fn query(&self, include_content: bool) -> [(&'static str, String); 3] {
        [
            ("includeContent", include_content.to_string()),
            ("includeLabels", self.include_labels.to_string()),
            ("includeTags", self.include_tags.to_string()),
        ]
    }
}

/// Document operations within a collection
pub struct Documents<'a> {
    client: &'a Client,
}

impl<'a> Documents<'a> {
    pub(crate) fn new(client: &'a Client) -> Self {
        Self { client }
    }

    /// Ingest a document; the server assigns its id and schema
    #[tracing::instrument(skip(self, request))]
    pub async fn ingest(
        &self,
        collection_id: &str,
        request: &IngestDocumentRequest,
    ) -> Result<Option<Document>> {
        require_id("collection_id", collection_id)?;
        let envelope = self
            .client
            .transport()
            .put(&format!("/collections/{collection_id}/documents"), request)
            .await?;

        let document = self
            .client
            .accept(envelope)?
            .and_then(|data| wire::decode_object::<Document>(&data));
        if let Some(d) = &document {
            tracing::debug!(id = %d.id, schema_id = %d.schema_id, "document ingested");
        }
        Ok(document)
    }

    pub async fn read_all_in_collection(
        &self,
        collection_id: &str,
        options: ReadOptions,
    ) -> Result<Vec<Document>> {
        require_id("collection_id", collection_id)?;
        let envelope = self
            .client
            .transport()
            .get_with_query(
                &format!("/collections/{collection_id}/documents"),
                &options.query(options.include_content),
            )
            .await?;
        Ok(self
            .client
            .accept(envelope)?
            .map(|data| wire::decode_list(&data))
            .unwrap_or_default())
    }

    /// Read one document.
    ///
    /// Metadata and content come from two requests: the server answers a
    /// content request with the raw document rather than an envelope. The
    /// first request never asks for content; when content is wanted, a second
    /// request fetches it and, if it returns 200, its body replaces
    /// `content` on the decoded document.
    #[tracing::instrument(skip(self))]
    pub async fn read_by_id(
        &self,
        collection_id: &str,
        document_id: &str,
        options: ReadOptions,
    ) -> Result<Option<Document>> {
        require_id("collection_id", collection_id)?;
        require_id("document_id", document_id)?;
        let path = format!("/collections/{collection_id}/documents/{document_id}");

        let envelope = self
            .client
            .transport()
            .get_with_query(&path, &options.query(false))
            .await?;
        let Some(mut document) = self
            .client
            .accept(envelope)?
            .and_then(|data| wire::decode_object::<Document>(&data))
        else {
            return Ok(None);
        };

        if options.include_content {
            let raw = self
                .client
                .transport()
                .fetch_raw(&path, &[("includeContent", "true".to_string())])
                .await?;
            if raw.status == 200 {
                document.content = Some(raw.json_or_text());
            } else {
                tracing::debug!(status = raw.status, "content request returned no content");
            }
        }

        Ok(Some(document))
    }

    pub async fn exists(&self, collection_id: &str, document_id: &str) -> Result<bool> {
        require_id("collection_id", collection_id)?;
        require_id("document_id", document_id)?;
        let envelope = self
            .client
            .transport()
            .head(&format!("/collections/{collection_id}/documents/{document_id}"))
            .await?;
        Ok(envelope.success)
    }

    #[tracing::instrument(skip(self))]
    pub async fn delete(&self, collection_id: &str, document_id: &str) -> Result<bool> {
        require_id("collection_id", collection_id)?;
        require_id("document_id", document_id)?;
        let envelope = self
            .client
            .transport()
            .delete(&format!("/collections/{collection_id}/documents/{document_id}"))
            .await?;
        self.client.accept_status(envelope)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_read_options_defaults() {
        let options = ReadOptions::default();
        assert!(!options.include_content);
        assert!(options.include_labels);
        assert!(options.include_tags);
        assert!(ReadOptions::with_content().include_content);
    }

    #[test]
    fn test_read_options_query_is_stringified() {
        let options = ReadOptions {
            include_content: true,
            include_labels: false,
            include_tags: true,
        };
        let query = options.query(false);
        assert_eq!(query[0], ("includeContent", "false".to_string()));
        assert_eq!(query[1], ("includeLabels", "false".to_string()));
        assert_eq!(query[2], ("includeTags", "true".to_string()));
    }
}
