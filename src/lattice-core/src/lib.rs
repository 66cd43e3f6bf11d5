//! Lattice Core Library
//!
//! Wire types shared by Lattice clients:
//! - Domain model (collections, documents, schemas, constraints, indexes)
//! - Search predicates and result pages
//! - The response envelope every API call is wrapped in
//! - Lenient decoding helpers
//! - Client configuration

pub mod config;
pub mod envelope;
pub mod models;
pub mod search;
pub mod wire;

// Re-export commonly used types
pub use config::ClientConfig;
pub use envelope::ResponseEnvelope;
pub use models::*;
pub use search::{
    EnumerationOrder, SearchCondition, SearchFilter, SearchQuery, SearchResult, SqlSearchRequest,
};
pub use wire::{ParseEnumError, WireEnum};

/// Prefix of every server-assigned collection id
pub const COLLECTION_ID_PREFIX: &str = "col_";
/// Prefix of every server-assigned document id
pub const DOCUMENT_ID_PREFIX: &str = "doc_";
/// Prefix of every server-assigned schema id
pub const SCHEMA_ID_PREFIX: &str = "sch_";
