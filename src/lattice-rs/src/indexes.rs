use lattice_core::{wire, IndexTableMapping};

use crate::client::Client;
use crate::error::Result;

/// Server-wide index table information
pub struct Indexes<'a> {
    client: &'a Client,
}

impl<'a> Indexes<'a> {
    pub(crate) fn new(client: &'a Client) -> Self {
        Self { client }
    }

    /// Every index table mapping on the server (not scoped to a collection)
    pub async fn get_mappings(&self) -> Result<Vec<IndexTableMapping>> {
        let envelope = self.client.transport().get("/tables").await?;
        Ok(self
            .client
            .accept(envelope)?
            .map(|data| wire::decode_list(&data))
            .unwrap_or_default())
    }
}
