//! Shared helpers for client integration tests.

#![allow(dead_code)]

use chrono::Utc;
use lattice_rs::{Client, ClientConfig, IngestDocumentRequest};
use serde_json::{json, Map, Value};
use std::cmp::Ordering;
use std::collections::HashMap;
use std::net::TcpListener;
use std::sync::{Arc, Mutex};
use wiremock::matchers::any;
use wiremock::{Mock, MockServer, Request, Respond, ResponseTemplate};

/// Route client logs to the test harness; set RUST_LOG to see them.
pub fn init_tracing() {
    let _ = tracing_subscriber::fmt()
        .with_env_filter(tracing_subscriber::EnvFilter::from_default_env())
        .with_test_writer()
        .try_init();
}

/// Path as the client sends it, including the API root
pub fn api(path: &str) -> String {
    format!("/v1.0{path}")
}

pub fn client_for(server: &MockServer) -> Client {
    Client::new(server.uri()).expect("client should build")
}

pub fn raising_client_for(server: &MockServer) -> Client {
    let config = ClientConfig {
        raise_api_errors: true,
        ..ClientConfig::new(server.uri())
    };
    Client::with_config(config).expect("client should build")
}

/// A client pointed at a local port nothing listens on.
pub fn unreachable_client() -> Client {
    let port = {
        let listener = TcpListener::bind("127.0.0.1:0").expect("bind ephemeral port");
        listener.local_addr().expect("local addr").port()
    };
    let config = ClientConfig {
        timeout_secs: 2,
        ..ClientConfig::new(format!("http://127.0.0.1:{port}"))
    };
    Client::with_config(config).expect("client should build")
}

/// Successful envelope carrying `data`
pub fn ok(status: u16, data: Value) -> ResponseTemplate {
    ResponseTemplate::new(status).set_body_json(json!({
        "success": true,
        "statusCode": status,
        "data": data,
        "processingTimeMs": 0.4,
        "guid": uuid::Uuid::new_v4().to_string(),
        "timestampUtc": Utc::now().to_rfc3339(),
    }))
}

/// Unsuccessful envelope with an error message
pub fn failure(status: u16, message: &str) -> ResponseTemplate {
    ResponseTemplate::new(status).set_body_json(json!({
        "success": false,
        "statusCode": status,
        "errorMessage": message,
        "data": null,
    }))
}

/// Document bodies for the 20-document search fixture
pub fn fixture_documents() -> Vec<IngestDocumentRequest> {
    (0..20)
        .map(|i| {
            IngestDocumentRequest::new(json!({
                "Name": format!("Item {i}"),
                "Value": i * 10,
                "Category": format!("Category_{}", i % 5),
                "IsActive": i % 2 == 0,
            }))
            .with_name(format!("item-{i:02}"))
        })
        .collect()
}

/// In-process fake of a Lattice server.
///
/// Holds collections, documents and inferred schemas in memory and answers
/// the REST contract the client speaks: envelopes for every route except
/// content reads, HEAD requests by status, and structured search with
/// pagination.
#[derive(Clone, Default)]
pub struct FakeLattice {
    state: Arc<Mutex<State>>,
}

impl FakeLattice {
    /// Start a mock server whose every route is answered by a fresh fake
    pub async fn start() -> (MockServer, FakeLattice) {
        let server = MockServer::start().await;
        let fake = FakeLattice::default();
        Mock::given(any())
            .respond_with(fake.clone())
            .mount(&server)
            .await;
        (server, fake)
    }

    pub fn document_count(&self) -> usize {
        self.state.lock().expect("fake state").documents.len()
    }

    pub fn schema_count(&self) -> usize {
        self.state.lock().expect("fake state").schemas.len()
    }
}

impl Respond for FakeLattice {
    fn respond(&self, request: &Request) -> ResponseTemplate {
        let path = request.url.path().trim_start_matches("/v1.0").to_string();
        let segments: Vec<&str> = path.split('/').filter(|s| !s.is_empty()).collect();
        let query: HashMap<String, String> = request.url.query_pairs().into_owned().collect();
        let body: Value = request.body_json().unwrap_or(Value::Null);

        let mut state = self.state.lock().expect("fake state");
        match (request.method.as_str(), segments.as_slice()) {
            ("GET", ["health"]) => ResponseTemplate::new(200).set_body_string("Healthy"),

            ("PUT", ["collections"]) => state.create_collection(&body),
            ("GET", ["collections"]) => ok(200, Value::Array(state.collections.clone())),
            ("GET", ["collections", id]) => match state.collection(id) {
                Some(c) => ok(200, c.clone()),
                None => failure(404, "Collection not found"),
            },
            ("HEAD", ["collections", id]) => head(state.collection(id).is_some()),
            ("DELETE", ["collections", id]) => state.delete_collection(id),

            ("PUT", ["collections", id, "documents"]) => state.ingest(id, &body),
            ("GET", ["collections", id, "documents"]) => {
                let docs: Vec<Value> = state
                    .documents_in(id)
                    .map(|d| d.metadata.clone())
                    .collect();
                ok(200, Value::Array(docs))
            }
            ("POST", ["collections", id, "documents", "search"]) => state.search(id, &body),
            ("GET", ["collections", cid, "documents", did]) => {
                match state.document(cid, did) {
                    None => failure(404, "Document not found"),
                    Some(d) if query.get("includeContent").map(String::as_str) == Some("true") => {
                        ResponseTemplate::new(200).set_body_json(d.content.clone())
                    }
                    Some(d) => ok(200, d.metadata.clone()),
                }
            }
            ("HEAD", ["collections", cid, "documents", did]) => {
                head(state.document(cid, did).is_some())
            }
            ("DELETE", ["collections", cid, "documents", did]) => state.delete_document(cid, did),

            ("GET", ["schemas"]) => {
                let schemas: Vec<Value> = state.schemas.iter().map(StoredSchema::summary).collect();
                ok(200, Value::Array(schemas))
            }
            ("GET", ["schemas", id]) => match state.schemas.iter().find(|s| s.id == *id) {
                Some(s) => ok(200, s.summary()),
                None => failure(404, "Schema not found"),
            },
            ("GET", ["schemas", id, "elements"]) => {
                match state.schemas.iter().find(|s| s.id == *id) {
                    Some(s) => ok(200, Value::Array(s.elements.clone())),
                    None => failure(404, "Schema not found"),
                }
            }
            ("GET", ["tables"]) => ok(200, state.table_mappings()),

            _ => failure(404, "Not found"),
        }
    }
}

fn head(found: bool) -> ResponseTemplate {
    ResponseTemplate::new(if found { 200 } else { 404 })
}

#[derive(Default)]
struct State {
    collections: Vec<Value>,
    documents: Vec<StoredDocument>,
    schemas: Vec<StoredSchema>,
}

struct StoredDocument {
    collection_id: String,
    id: String,
    name: String,
    metadata: Value,
    content: Value,
}

struct StoredSchema {
    id: String,
    shape: String,
    elements: Vec<Value>,
    created_utc: String,
}

impl StoredSchema {
    fn summary(&self) -> Value {
        json!({
            "id": self.id,
            "name": self.shape,
            "createdUtc": self.created_utc,
            "lastUpdateUtc": self.created_utc,
        })
    }
}

impl State {
    fn collection(&self, id: &str) -> Option<&Value> {
        self.collections.iter().find(|c| c["id"] == id)
    }

    fn document(&self, collection_id: &str, id: &str) -> Option<&StoredDocument> {
        self.documents
            .iter()
            .find(|d| d.collection_id == collection_id && d.id == id)
    }

    fn documents_in<'a>(&'a self, collection_id: &'a str) -> impl Iterator<Item = &'a StoredDocument> {
        self.documents
            .iter()
            .filter(move |d| d.collection_id == collection_id)
    }

    fn create_collection(&mut self, body: &Value) -> ResponseTemplate {
        let Some(name) = body["name"].as_str().filter(|n| !n.is_empty()) else {
            return failure(400, "Name is required");
        };

        let now = Utc::now().to_rfc3339();
        let collection = json!({
            "id": format!("col_{}", uuid::Uuid::new_v4().simple()),
            "name": name,
            "description": body.get("description").cloned().unwrap_or(Value::Null),
            "documentsDirectory": body.get("documentsDirectory").cloned().unwrap_or(Value::Null),
            "labels": body.get("labels").cloned().unwrap_or_else(|| json!([])),
            "tags": body.get("tags").cloned().unwrap_or_else(|| json!({})),
            "schemaEnforcementMode": body.get("schemaEnforcementMode").cloned().unwrap_or_else(|| json!("None")),
            "indexingMode": body.get("indexingMode").cloned().unwrap_or_else(|| json!("All")),
            "createdUtc": now,
            "lastUpdateUtc": now,
        });
        self.collections.push(collection.clone());
        ok(201, collection)
    }

    fn delete_collection(&mut self, id: &str) -> ResponseTemplate {
        let before = self.collections.len();
        self.collections.retain(|c| c["id"] != id);
        if self.collections.len() == before {
            return failure(404, "Collection not found");
        }
        self.documents.retain(|d| d.collection_id != id);
        ResponseTemplate::new(204)
    }

    fn delete_document(&mut self, collection_id: &str, id: &str) -> ResponseTemplate {
        let before = self.documents.len();
        self.documents
            .retain(|d| !(d.collection_id == collection_id && d.id == id));
        if self.documents.len() == before {
            return failure(404, "Document not found");
        }
        ResponseTemplate::new(204)
    }

    fn ingest(&mut self, collection_id: &str, body: &Value) -> ResponseTemplate {
        if self.collection(collection_id).is_none() {
            return failure(404, "Collection not found");
        }

        let content = body.get("content").cloned().unwrap_or(Value::Null);
        let schema_id = self.schema_for(&content);
        let id = format!("doc_{}", uuid::Uuid::new_v4().simple());
        let name = body["name"].as_str().unwrap_or_default().to_string();
        let now = Utc::now().to_rfc3339();

        let metadata = json!({
            "id": id,
            "collectionId": collection_id,
            "schemaId": schema_id,
            "name": if name.is_empty() { Value::Null } else { json!(name) },
            "labels": body.get("labels").cloned().unwrap_or_else(|| json!([])),
            "tags": body.get("tags").cloned().unwrap_or_else(|| json!({})),
            "contentLength": content.to_string().len(),
            "createdUtc": now,
            "lastUpdateUtc": now,
        });

        self.documents.push(StoredDocument {
            collection_id: collection_id.to_string(),
            id,
            name,
            metadata: metadata.clone(),
            content,
        });
        ok(201, metadata)
    }

    /// Schema id for a content shape; documents with the same keys share one
    fn schema_for(&mut self, content: &Value) -> String {
        let mut fields: Vec<(&String, &Value)> = content
            .as_object()
            .map(|o| o.iter().collect())
            .unwrap_or_default();
        fields.sort_by(|a, b| a.0.cmp(b.0));
        let shape = fields
            .iter()
            .map(|(k, _)| k.as_str())
            .collect::<Vec<_>>()
            .join(",");

        if let Some(existing) = self.schemas.iter().find(|s| s.shape == shape) {
            return existing.id.clone();
        }

        let id = format!("sch_{}", uuid::Uuid::new_v4().simple());
        let now = Utc::now().to_rfc3339();
        let elements = fields
            .iter()
            .enumerate()
            .map(|(position, (key, value))| {
                json!({
                    "id": format!("sel_{}", uuid::Uuid::new_v4().simple()),
                    "schemaId": id,
                    "position": position,
                    "key": key,
                    "dataType": data_type(value),
                    "nullable": value.is_null(),
                    "createdUtc": now,
                })
            })
            .collect();

        self.schemas.push(StoredSchema {
            id: id.clone(),
            shape,
            elements,
            created_utc: now,
        });
        id
    }

    fn table_mappings(&self) -> Value {
        let mut keys: Vec<String> = self
            .schemas
            .iter()
            .flat_map(|s| s.elements.iter())
            .filter_map(|e| e["key"].as_str().map(str::to_string))
            .collect();
        keys.sort();
        keys.dedup();
        Value::Array(
            keys.into_iter()
                .map(|key| {
                    let table = format!("index_{}", key.to_lowercase());
                    json!({ "key": key, "tableName": table })
                })
                .collect(),
        )
    }

    fn search(&self, collection_id: &str, body: &Value) -> ResponseTemplate {
        if self.collection(collection_id).is_none() {
            return failure(404, "Collection not found");
        }

        let mut matched: Vec<&StoredDocument> = if body.get("sqlExpression").is_some() {
            self.documents_in(collection_id).collect()
        } else {
            self.documents_in(collection_id)
                .filter(|d| matches_query(d, body))
                .collect()
        };

        match body["ordering"].as_str().unwrap_or("CreatedDescending") {
            "NameAscending" => matched.sort_by(|a, b| a.name.cmp(&b.name)),
            "NameDescending" => matched.sort_by(|a, b| b.name.cmp(&a.name)),
            order if order.ends_with("Descending") => matched.reverse(),
            _ => {}
        }

        let total = matched.len() as u64;
        let skip = body["skip"].as_u64().unwrap_or(0);
        let max_results = body["maxResults"].as_u64().unwrap_or(1000);
        let include_content = body["includeContent"].as_bool().unwrap_or(false);

        let documents: Vec<Value> = matched
            .into_iter()
            .skip(skip as usize)
            .take(max_results as usize)
            .map(|d| {
                let mut doc = d.metadata.clone();
                if include_content {
                    doc["content"] = d.content.clone();
                }
                doc
            })
            .collect();

        let seen = skip + documents.len() as u64;
        ok(
            200,
            json!({
                "success": true,
                "timestamp": Utc::now().to_rfc3339(),
                "maxResults": max_results,
                "endOfResults": seen >= total,
                "totalRecords": total,
                "recordsRemaining": total.saturating_sub(seen),
                "documents": documents,
            }),
        )
    }
}

fn data_type(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "boolean",
        Value::Number(n) if n.is_i64() || n.is_u64() => "integer",
        Value::Number(_) => "number",
        Value::String(_) => "string",
        Value::Array(_) => "array",
        Value::Object(_) => "object",
    }
}

fn matches_query(doc: &StoredDocument, body: &Value) -> bool {
    let filters_match = body["filters"]
        .as_array()
        .map(|filters| filters.iter().all(|f| matches_filter(&doc.content, f)))
        .unwrap_or(true);

    let doc_labels: Vec<&str> = doc.metadata["labels"]
        .as_array()
        .map(|a| a.iter().filter_map(Value::as_str).collect())
        .unwrap_or_default();
    let labels_match = match body["labels"].as_array() {
        Some(wanted) if !wanted.is_empty() => wanted
            .iter()
            .filter_map(Value::as_str)
            .any(|l| doc_labels.contains(&l)),
        _ => true,
    };

    let empty = Map::new();
    let doc_tags = doc.metadata["tags"].as_object().unwrap_or(&empty);
    let tags_match = body["tags"]
        .as_object()
        .map(|wanted| wanted.iter().all(|(k, v)| doc_tags.get(k) == Some(v)))
        .unwrap_or(true);

    filters_match && labels_match && tags_match
}

fn matches_filter(content: &Value, filter: &Value) -> bool {
    let field = filter["field"].as_str().unwrap_or_default();
    let condition = filter["condition"].as_str().unwrap_or("Equals");
    let expected = filter["value"].as_str().unwrap_or_default();
    let actual = content.get(field).filter(|v| !v.is_null());

    match condition {
        "IsNull" => actual.is_none(),
        "IsNotNull" => actual.is_some(),
        _ => match actual {
            Some(actual) => compare(condition, &scalar_text(actual), expected),
            None => false,
        },
    }
}

fn scalar_text(value: &Value) -> String {
    match value {
        Value::String(s) => s.clone(),
        other => other.to_string(),
    }
}

fn compare(condition: &str, actual: &str, expected: &str) -> bool {
    let ordering = match (actual.parse::<f64>(), expected.parse::<f64>()) {
        (Ok(a), Ok(b)) => a.partial_cmp(&b),
        _ => Some(actual.cmp(expected)),
    };

    match condition {
        "Equals" => ordering == Some(Ordering::Equal),
        "NotEquals" => ordering != Some(Ordering::Equal),
        "GreaterThan" => ordering == Some(Ordering::Greater),
        "GreaterThanOrEqualTo" => matches!(ordering, Some(Ordering::Greater | Ordering::Equal)),
        "LessThan" => ordering == Some(Ordering::Less),
        "LessThanOrEqualTo" => matches!(ordering, Some(Ordering::Less | Ordering::Equal)),
        "Contains" => actual.contains(expected),
        "StartsWith" => actual.starts_with(expected),
        "EndsWith" => actual.ends_with(expected),
        "Like" => actual.contains(expected.trim_matches('%')),
        _ => false,
    }
}
