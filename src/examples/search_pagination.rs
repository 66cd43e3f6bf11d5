//! Search Pagination Example
//!
//! Seeds a collection, pages through it with skip/maxResults, and runs a
//! SQL-style search.
//!
//! Run with: cargo run --example search_pagination -- [config.json]

use lattice_rs::*;
use serde_json::json;
use tracing_subscriber::EnvFilter;

const PAGE_SIZE: u32 = 7;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("lattice_rs=debug")),
        )
        .init();

    let config = match std::env::args().nth(1) {
        Some(path) => ClientConfig::load(&path)?,
        None => ClientConfig::default(),
    };
    let client = Client::with_config(config)?;

    let Some(collection) = client
        .collections()
        .create(&CreateCollectionRequest::new("pagination-demo"))
        .await?
    else {
        anyhow::bail!("collection was not created");
    };
    println!("📁 Collection {}", collection.id);

    for i in 0..20 {
        let content = json!({
            "Value": i * 10,
            "Category": format!("Category_{}", i % 5),
            "IsActive": i % 2 == 0,
        });
        client
            .documents()
            .ingest(&collection.id, &IngestDocumentRequest::new(content))
            .await?;
    }
    println!("📝 Ingested 20 documents\n");

    // Page through everything, oldest first
    let mut skip = 0;
    let mut page_number = 1;
    loop {
        let query = SearchQuery::new(&collection.id)
            .with_skip(skip)
            .with_max_results(PAGE_SIZE)
            .with_ordering(EnumerationOrder::CreatedAscending);
        let Some(page) = client.search().enumerate(&query).await? else {
            break;
        };

        println!(
            "📄 Page {page_number}: {} documents ({} of {} remaining)",
            page.documents.len(),
            page.records_remaining,
            page.total_records
        );
        skip += page.documents.len() as u32;
        page_number += 1;
        if page.end_of_results || page.documents.is_empty() {
            break;
        }
    }

    // Active documents in one category
    let query = SearchQuery::new(&collection.id)
        .with_filter(SearchFilter::equals("Category", "Category_2"))
        .with_filter(SearchFilter::equals("IsActive", "true"))
        .with_content(true);
    if let Some(result) = client.search().search(&query).await? {
        println!("\n🔍 Active Category_2 documents: {}", result.total_records);
        for doc in &result.documents {
            println!("   {} {}", doc.id, doc.content.clone().unwrap_or_default());
        }
    }

    match client
        .search()
        .search_by_sql(&collection.id, "SELECT * FROM documents WHERE Value > 150")
        .await
    {
        Ok(Some(result)) => println!("\n🧮 SQL search matched {}", result.total_records),
        Ok(None) => println!("\n🧮 SQL search not supported by this server"),
        Err(e) => println!("\n🧮 SQL search failed: {e}"),
    }

    client.collections().delete(&collection.id).await?;
    Ok(())
}
