use lattice_core::{wire, Schema, SchemaElement};

use crate::client::Client;
use crate::error::{require_id, Result};

/// Read-only access to server-inferred schemas
pub struct Schemas<'a> {
    client: &'a Client,
}

impl<'a> Schemas<'a> {
    pub(crate) fn new(client: &'a Client) -> Self {
        Self { client }
    }

    pub async fn read_all(&self) -> Result<Vec<Schema>> {
        let envelope = self.client.transport().get("/schemas").await?;
        Ok(self
            .client
            .accept(envelope)?
            .map(|data| wire::decode_list(&data))
            .unwrap_or_default())
    }

    pub async fn read_by_id(&self, schema_id: &str) -> Result<Option<Schema>> {
        require_id("schema_id", schema_id)?;
        let envelope = self
            .client
            .transport()
            .get(&format!("/schemas/{schema_id}"))
            .await?;
        Ok(self
            .client
            .accept(envelope)?
            .and_then(|data| wire::decode_object(&data)))
    }

    /// Elements of a schema, ordered by position
    pub async fn get_elements(&self, schema_id: &str) -> Result<Vec<SchemaElement>> {
        require_id("schema_id", schema_id)?;
        let envelope = self
            .client
            .transport()
            .get(&format!("/schemas/{schema_id}/elements"))
            .await?;

        let mut elements: Vec<SchemaElement> = self
            .client
            .accept(envelope)?
            .map(|data| wire::decode_list(&data))
            .unwrap_or_default();
        elements.sort_by_key(|e| e.position);
        Ok(elements)
    }
}
