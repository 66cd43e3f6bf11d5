//! Lattice Client Library
//!
//! HTTP client for Lattice document-storage servers.
//!
//! ```rust,no_run
//! use lattice_rs::{Client, CreateCollectionRequest, SearchFilter, SearchQuery};
//!
//! #[tokio::main]
//! async fn main() -> anyhow::Result<()> {
//!     let client = Client::new("http://localhost:8000")?;
//!     let orders = client
//!         .collections()
//!         .create(&CreateCollectionRequest::new("orders"))
//!         .await?
//!         .expect("collection created");
//!
//!     let query = SearchQuery::new(&orders.id).with_filter(SearchFilter::equals("Status", "open"));
//!     if let Some(page) = client.search().search(&query).await? {
//!         println!("{} open orders", page.total_records);
//!     }
//!     Ok(())
//! }
//! ```

mod client;
mod collections;
mod documents;
mod error;
mod indexes;
mod schemas;
mod searching;
pub mod transport;

pub use client::Client;
pub use collections::Collections;
pub use documents::{Documents, ReadOptions};
pub use error::{LatticeError, Result};
pub use indexes::Indexes;
pub use schemas::Schemas;
pub use searching::Search;

pub use lattice_core;
pub use lattice_core::*;
