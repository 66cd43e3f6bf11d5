use lattice_core::{
    wire, Collection, CollectionConstraints, CreateCollectionRequest, FieldConstraint,
    IndexRebuildResult, IndexedField, IndexingConfiguration, IndexingMode, RebuildIndexesRequest,
    SchemaEnforcementMode, UpdateConstraintsRequest, UpdateIndexingRequest,
};

use crate::client::Client;
use crate::error::{require, require_id, LatticeError, Result};

/// Collection operations: CRUD plus constraint and indexing management
pub struct Collections<'a> {
    client: &'a Client,
}

impl<'a> Collections<'a> {
    pub(crate) fn new(client: &'a Client) -> Self {
        Self { client }
    }

    /// Create a collection, returning it with its server-assigned id
    #[tracing::instrument(skip(self, request), fields(name = %request.name))]
    pub async fn create(&self, request: &CreateCollectionRequest) -> Result<Option<Collection>> {
        require("name", &request.name)?;
        if let Some(constraints) = &request.field_constraints {
            validate_constraints(constraints)?;
        }

        let envelope = self.client.transport().put("/collections", request).await?;
        let collection = self
            .client
            .accept(envelope)?
            .and_then(|data| wire::decode_object::<Collection>(&data));

        if let Some(c) = &collection {
            tracing::info!(id = %c.id, "collection created");
        }
        Ok(collection)
    }

    pub async fn read_all(&self) -> Result<Vec<Collection>> {
        let envelope = self.client.transport().get("/collections").await?;
        Ok(self
            .client
            .accept(envelope)?
            .map(|data| wire::decode_list(&data))
            .unwrap_or_default())
    }

    pub async fn read_by_id(&self, collection_id: &str) -> Result<Option<Collection>> {
        require_id("collection_id", collection_id)?;
        let envelope = self
            .client
            .transport()
            .get(&format!("/collections/{collection_id}"))
            .await?;
        Ok(self
            .client
            .accept(envelope)?
            .and_then(|data| wire::decode_object(&data)))
    }

    /// HEAD request; existence is exactly a success status
    pub async fn exists(&self, collection_id: &str) -> Result<bool> {
        require_id("collection_id", collection_id)?;
        let envelope = self
            .client
            .transport()
            .head(&format!("/collections/{collection_id}"))
            .await?;
        Ok(envelope.success)
    }

    #[tracing::instrument(skip(self))]
    pub async fn delete(&self, collection_id: &str) -> Result<bool> {
        require_id("collection_id", collection_id)?;
        let envelope = self
            .client
            .transport()
            .delete(&format!("/collections/{collection_id}"))
            .await?;
        self.client.accept_status(envelope)
    }

    pub async fn get_constraints(&self, collection_id: &str) -> Result<Vec<FieldConstraint>> {
        require_id("collection_id", collection_id)?;
        let envelope = self
            .client
            .transport()
            .get(&format!("/collections/{collection_id}/constraints"))
            .await?;
        Ok(self
            .client
            .accept(envelope)?
            .map(|data| wire::decode::<CollectionConstraints>(&data).field_constraints)
            .unwrap_or_default())
    }

    /// Replace the enforcement mode and, when given, the field constraints
    #[tracing::instrument(skip(self, field_constraints))]
    pub async fn update_constraints(
        &self,
        collection_id: &str,
        schema_enforcement_mode: SchemaEnforcementMode,
        field_constraints: Option<Vec<FieldConstraint>>,
    ) -> Result<bool> {
        require_id("collection_id", collection_id)?;
        if let Some(constraints) = &field_constraints {
            validate_constraints(constraints)?;
        }

        let body = UpdateConstraintsRequest {
            schema_enforcement_mode,
            field_constraints,
        };
        let envelope = self
            .client
            .transport()
            .put(&format!("/collections/{collection_id}/constraints"), &body)
            .await?;
        self.client.accept_status(envelope)
    }

    pub async fn get_indexed_fields(&self, collection_id: &str) -> Result<Vec<IndexedField>> {
        require_id("collection_id", collection_id)?;
        let envelope = self
            .client
            .transport()
            .get(&format!("/collections/{collection_id}/indexing"))
            .await?;
        Ok(self
            .client
            .accept(envelope)?
            .map(|data| wire::decode::<IndexingConfiguration>(&data).indexed_fields)
            .unwrap_or_default())
    }

    #[tracing::instrument(skip(self, indexed_fields))]
    pub async fn update_indexing(
        &self,
        collection_id: &str,
        indexing_mode: IndexingMode,
        indexed_fields: Option<Vec<String>>,
        rebuild_indexes: bool,
    ) -> Result<bool> {
        require_id("collection_id", collection_id)?;
        let body = UpdateIndexingRequest {
            indexing_mode,
            rebuild_indexes,
            indexed_fields,
        };
        let envelope = self
            .client
            .transport()
            .put(&format!("/collections/{collection_id}/indexing"), &body)
            .await?;
        self.client.accept_status(envelope)
    }

    #[tracing::instrument(skip(self))]
    pub async fn rebuild_indexes(
        &self,
        collection_id: &str,
        drop_unused_indexes: bool,
    ) -> Result<Option<IndexRebuildResult>> {
        require_id("collection_id", collection_id)?;
        let body = RebuildIndexesRequest {
            drop_unused_indexes,
        };
        let envelope = self
            .client
            .transport()
            .post(&format!("/collections/{collection_id}/indexes/rebuild"), &body)
            .await?;

        let result = self
            .client
            .accept(envelope)?
            .and_then(|data| wire::decode_object::<IndexRebuildResult>(&data));
        if let Some(r) = &result {
            tracing::info!(
                documents = r.documents_processed,
                created = r.indexes_created.len(),
                dropped = r.indexes_dropped.len(),
                errors = r.errors.len(),
                "index rebuild finished"
            );
        }
        Ok(result)
    }
}

fn validate_constraints(constraints: &[FieldConstraint]) -> Result<()> {
    match constraints.iter().position(|c| c.field_path.trim().is_empty()) {
        Some(index) => Err(LatticeError::validation(
            "field_path",
            format!("field constraint {index} has no field path"),
        )),
        None => Ok(()),
    }
}
