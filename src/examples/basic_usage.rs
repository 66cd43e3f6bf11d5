//! Basic Usage Example
//!
//! Walks through collections, documents, schemas and a simple search against a
//! running Lattice server.
//!
//! Run with: cargo run --example basic_usage -- [base_url]

use lattice_rs::*;
use serde_json::json;
use tracing_subscriber::EnvFilter;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("lattice_rs=debug")),
        )
        .init();

    let base_url = std::env::args()
        .nth(1)
        .unwrap_or_else(|| "http://localhost:8000".to_string());
    let client = Client::new(base_url)?;

    if !client.health_check().await {
        anyhow::bail!("Lattice server is not reachable at {}", client.config().base_url);
    }
    println!("✅ Server healthy\n");

    // Collection with one strict constraint and selective indexing
    let request = CreateCollectionRequest::new("people")
        .with_description("Example people collection")
        .with_label("example")
        .with_tag("source", "basic_usage")
        .with_schema_enforcement(
            SchemaEnforcementMode::Flexible,
            vec![FieldConstraint::new("Email")
                .with_data_type(DataType::String)
                .with_required(true)],
        )
        .with_indexing(IndexingMode::Selective, vec!["Email".to_string(), "Age".to_string()]);

    let Some(collection) = client.collections().create(&request).await? else {
        anyhow::bail!("collection was not created");
    };
    println!("📁 Created collection {} ({})", collection.name, collection.id);

    // Documents
    let people = [
        json!({"Name": "Ada", "Email": "ada@example.com", "Age": 36}),
        json!({"Name": "Grace", "Email": "grace@example.com", "Age": 45}),
        json!({"Name": "Linus", "Email": "linus@example.com", "Age": 28}),
    ];
    let mut first_id = None;
    for person in people {
        let name = person["Name"].as_str().unwrap_or_default().to_lowercase();
        let ingest = IngestDocumentRequest::new(person).with_name(name);
        if let Some(doc) = client.documents().ingest(&collection.id, &ingest).await? {
            println!("📝 Ingested {} (schema {})", doc.id, doc.schema_id);
            first_id.get_or_insert(doc.id);
        }
    }

    if let Some(id) = &first_id {
        let doc = client
            .documents()
            .read_by_id(&collection.id, id, ReadOptions::with_content())
            .await?;
        if let Some(doc) = doc {
            println!("\n📄 {} content: {}", doc.id, doc.content.unwrap_or_default());

            for element in client.schemas().get_elements(&doc.schema_id).await? {
                println!("   {}. {} ({})", element.position, element.key, element.data_type);
            }
        }
    }

    // Search
    let query = SearchQuery::new(&collection.id)
        .with_filter(SearchFilter::new("Age", SearchCondition::GreaterThan, "30"))
        .with_ordering(EnumerationOrder::NameAscending);
    if let Some(result) = client.search().search(&query).await? {
        println!("\n🔍 {} people older than 30:", result.total_records);
        for doc in &result.documents {
            println!("   {} {}", doc.id, doc.name.as_deref().unwrap_or("-"));
        }
    }

    // Indexes
    if let Some(rebuild) = client.collections().rebuild_indexes(&collection.id, true).await? {
        println!(
            "\n🗂  Rebuilt indexes: {} documents, {} created, {} dropped",
            rebuild.documents_processed,
            rebuild.indexes_created.len(),
            rebuild.indexes_dropped.len()
        );
    }
    for mapping in client.indexes().get_mappings().await? {
        println!("   {} -> {}", mapping.key, mapping.table_name);
    }

    // Cleanup
    client.collections().delete(&collection.id).await?;
    println!("\n🧹 Deleted collection {}", collection.id);

    Ok(())
}
