use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use serde_json::Value;
use std::collections::HashMap;
use std::fmt;
use std::str::FromStr;

use crate::wire::{self, ParseEnumError, WireEnum};

/// How strictly the server validates ingested documents against a
/// collection's field constraints.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize)]
pub enum SchemaEnforcementMode {
    #[default]
    None,
    Strict,
    Flexible,
    Partial,
}

impl WireEnum for SchemaEnforcementMode {
    const KIND: &'static str = "schema enforcement mode";
    const ALL: &'static [Self] = &[Self::None, Self::Strict, Self::Flexible, Self::Partial];

    fn as_str(&self) -> &'static str {
        match self {
            Self::None => "None",
            Self::Strict => "Strict",
            Self::Flexible => "Flexible",
            Self::Partial => "Partial",
        }
    }
}

impl FromStr for SchemaEnforcementMode {
    type Err = ParseEnumError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        wire::parse_wire_enum(s)
    }
}

impl fmt::Display for SchemaEnforcementMode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        wire::fmt_wire_enum(self, f)
    }
}

/// Which document fields the server maintains index tables for.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize)]
pub enum IndexingMode {
    #[default]
    All,
    Selective,
    None,
}

impl WireEnum for IndexingMode {
    const KIND: &'static str = "indexing mode";
    const ALL: &'static [Self] = &[Self::All, Self::Selective, Self::None];

    fn as_str(&self) -> &'static str {
        match self {
            Self::All => "All",
            Self::Selective => "Selective",
            Self::None => "None",
        }
    }
}

impl FromStr for IndexingMode {
    type Err = ParseEnumError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        wire::parse_wire_enum(s)
    }
}

impl fmt::Display for IndexingMode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        wire::fmt_wire_enum(self, f)
    }
}

/// JSON data types used when authoring field constraints
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum DataType {
    #[default]
    String,
    Integer,
    Number,
    Boolean,
    Array,
    Object,
    Null,
}

impl WireEnum for DataType {
    const KIND: &'static str = "data type";
    const ALL: &'static [Self] = &[
        Self::String,
        Self::Integer,
        Self::Number,
        Self::Boolean,
        Self::Array,
        Self::Object,
        Self::Null,
    ];

    fn as_str(&self) -> &'static str {
        match self {
            Self::String => "string",
            Self::Integer => "integer",
            Self::Number => "number",
            Self::Boolean => "boolean",
            Self::Array => "array",
            Self::Object => "object",
            Self::Null => "null",
        }
    }
}

impl FromStr for DataType {
    type Err = ParseEnumError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        wire::parse_wire_enum(s)
    }
}

impl fmt::Display for DataType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        wire::fmt_wire_enum(self, f)
    }
}

impl From<DataType> for String {
    fn from(value: DataType) -> Self {
        value.as_str().to_string()
    }
}

/// Collection is a named, server-managed group of documents
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct Collection {
    #[serde(skip_serializing_if = "String::is_empty", deserialize_with = "wire::string")]
    pub id: String,
    #[serde(skip_serializing_if = "String::is_empty", deserialize_with = "wire::string")]
    pub name: String,
    #[serde(skip_serializing_if = "Option::is_none", deserialize_with = "wire::opt_string")]
    pub description: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none", deserialize_with = "wire::opt_string")]
    pub documents_directory: Option<String>,
    #[serde(skip_serializing_if = "Vec::is_empty", deserialize_with = "wire::strings")]
    pub labels: Vec<String>,
    #[serde(skip_serializing_if = "HashMap::is_empty", deserialize_with = "wire::string_map")]
    pub tags: HashMap<String, String>,
    #[serde(skip_serializing_if = "Option::is_none", deserialize_with = "wire::timestamp")]
    pub created_utc: Option<DateTime<Utc>>,
    #[serde(skip_serializing_if = "Option::is_none", deserialize_with = "wire::timestamp")]
    pub last_update_utc: Option<DateTime<Utc>>,
    #[serde(skip_serializing_if = "wire::is_default", deserialize_with = "wire::enumeration")]
    pub schema_enforcement_mode: SchemaEnforcementMode,
    #[serde(skip_serializing_if = "wire::is_default", deserialize_with = "wire::enumeration")]
    pub indexing_mode: IndexingMode,
}

/// Document is one ingested JSON payload plus its metadata
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct Document {
    #[serde(skip_serializing_if = "String::is_empty", deserialize_with = "wire::string")]
    pub id: String,
    #[serde(skip_serializing_if = "String::is_empty", deserialize_with = "wire::string")]
    pub collection_id: String,
    #[serde(skip_serializing_if = "String::is_empty", deserialize_with = "wire::string")]
    pub schema_id: String,
    #[serde(skip_serializing_if = "Option::is_none", deserialize_with = "wire::opt_string")]
    pub name: Option<String>,
    #[serde(skip_serializing_if = "Vec::is_empty", deserialize_with = "wire::strings")]
    pub labels: Vec<String>,
    #[serde(skip_serializing_if = "HashMap::is_empty", deserialize_with = "wire::string_map")]
    pub tags: HashMap<String, String>,
    #[serde(skip_serializing_if = "Option::is_none", deserialize_with = "wire::timestamp")]
    pub created_utc: Option<DateTime<Utc>>,
    #[serde(skip_serializing_if = "Option::is_none", deserialize_with = "wire::timestamp")]
    pub last_update_utc: Option<DateTime<Utc>>,
    /// Raw document body; only populated when content was requested
    #[serde(skip_serializing_if = "Option::is_none", deserialize_with = "wire::json")]
    pub content: Option<Value>,
    #[serde(deserialize_with = "wire::uint")]
    pub content_length: u64,
    #[serde(
        rename = "sha256Hash",
        skip_serializing_if = "Option::is_none",
        deserialize_with = "wire::opt_string"
    )]
    pub content_hash: Option<String>,
}

/// Schema is the server-inferred shape shared by a set of documents
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct Schema {
    #[serde(skip_serializing_if = "String::is_empty", deserialize_with = "wire::string")]
    pub id: String,
    #[serde(skip_serializing_if = "Option::is_none", deserialize_with = "wire::opt_string")]
    pub name: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none", deserialize_with = "wire::opt_string")]
    pub hash: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none", deserialize_with = "wire::timestamp")]
    pub created_utc: Option<DateTime<Utc>>,
    #[serde(skip_serializing_if = "Option::is_none", deserialize_with = "wire::timestamp")]
    pub last_update_utc: Option<DateTime<Utc>>,
}

/// SchemaElement describes one key of a schema
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct SchemaElement {
    #[serde(skip_serializing_if = "String::is_empty", deserialize_with = "wire::string")]
    pub id: String,
    #[serde(skip_serializing_if = "String::is_empty", deserialize_with = "wire::string")]
    pub schema_id: String,
    #[serde(deserialize_with = "wire::uint")]
    pub position: u32, // 0-based
    #[serde(skip_serializing_if = "String::is_empty", deserialize_with = "wire::string")]
    pub key: String,
    #[serde(skip_serializing_if = "String::is_empty", deserialize_with = "wire::string")]
    pub data_type: String,
    #[serde(skip_serializing_if = "wire::is_false", deserialize_with = "wire::boolean")]
    pub nullable: bool,
    #[serde(skip_serializing_if = "Option::is_none", deserialize_with = "wire::timestamp")]
    pub created_utc: Option<DateTime<Utc>>,
    #[serde(skip_serializing_if = "Option::is_none", deserialize_with = "wire::timestamp")]
    pub last_update_utc: Option<DateTime<Utc>>,
}

/// FieldConstraint is a per-field validation rule enforced by the server.
///
/// The same type is sent when authoring constraints and returned when reading
/// them back. Unset rules are left out of the request body entirely; note that
/// `nullable` defaults to `true` and is therefore only sent when it is `false`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct FieldConstraint {
    #[serde(skip_serializing_if = "String::is_empty", deserialize_with = "wire::string")]
    pub id: String,
    #[serde(skip_serializing_if = "String::is_empty", deserialize_with = "wire::string")]
    pub collection_id: String,
    #[serde(deserialize_with = "wire::string")]
    pub field_path: String,
    #[serde(skip_serializing_if = "Option::is_none", deserialize_with = "wire::opt_string")]
    pub data_type: Option<String>,
    #[serde(skip_serializing_if = "wire::is_false", deserialize_with = "wire::boolean")]
    pub required: bool,
    #[serde(skip_serializing_if = "wire::is_true", deserialize_with = "wire::boolean_or_true")]
    pub nullable: bool,
    #[serde(skip_serializing_if = "Option::is_none", deserialize_with = "wire::opt_string")]
    pub regex_pattern: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none", deserialize_with = "wire::opt_float")]
    pub min_value: Option<f64>,
    #[serde(skip_serializing_if = "Option::is_none", deserialize_with = "wire::opt_float")]
    pub max_value: Option<f64>,
    #[serde(skip_serializing_if = "Option::is_none", deserialize_with = "wire::opt_uint")]
    pub min_length: Option<u64>,
    #[serde(skip_serializing_if = "Option::is_none", deserialize_with = "wire::opt_uint")]
    pub max_length: Option<u64>,
    #[serde(skip_serializing_if = "Option::is_none", deserialize_with = "wire::opt_strings")]
    pub allowed_values: Option<Vec<String>>,
    #[serde(skip_serializing_if = "Option::is_none", deserialize_with = "wire::opt_string")]
    pub array_element_type: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none", deserialize_with = "wire::timestamp")]
    pub created_utc: Option<DateTime<Utc>>,
    #[serde(skip_serializing_if = "Option::is_none", deserialize_with = "wire::timestamp")]
    pub last_update_utc: Option<DateTime<Utc>>,
}

impl Default for FieldConstraint {
    fn default() -> Self {
        Self {
            id: String::new(),
            collection_id: String::new(),
            field_path: String::new(),
            data_type: None,
            required: false,
            nullable: true,
            regex_pattern: None,
            min_value: None,
            max_value: None,
            min_length: None,
            max_length: None,
            allowed_values: None,
            array_element_type: None,
            created_utc: None,
            last_update_utc: None,
        }
    }
}

impl FieldConstraint {
    /// Create an unrestricted constraint for the given field path
    pub fn new(field_path: impl Into<String>) -> Self {
        Self {
            field_path: field_path.into(),
            ..Default::default()
        }
    }

    pub fn with_data_type(mut self, data_type: impl Into<String>) -> Self {
        self.data_type = Some(data_type.into());
        self
    }

    pub fn with_required(mut self, required: bool) -> Self {
        self.required = required;
        self
    }

    pub fn with_nullable(mut self, nullable: bool) -> Self {
        self.nullable = nullable;
        self
    }

    pub fn with_regex_pattern(mut self, pattern: impl Into<String>) -> Self {
        self.regex_pattern = Some(pattern.into());
        self
    }

    pub fn with_value_range(mut self, min: Option<f64>, max: Option<f64>) -> Self {
        self.min_value = min;
        self.max_value = max;
        self
    }

    pub fn with_length_range(mut self, min: Option<u64>, max: Option<u64>) -> Self {
        self.min_length = min;
        self.max_length = max;
        self
    }

    pub fn with_allowed_values<I, S>(mut self, values: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.allowed_values = Some(values.into_iter().map(Into::into).collect());
        self
    }

    pub fn with_array_element_type(mut self, data_type: impl Into<String>) -> Self {
        self.array_element_type = Some(data_type.into());
        self
    }
}

/// IndexedField names a field the server indexes under selective indexing
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct IndexedField {
    #[serde(skip_serializing_if = "String::is_empty", deserialize_with = "wire::string")]
    pub id: String,
    #[serde(skip_serializing_if = "String::is_empty", deserialize_with = "wire::string")]
    pub collection_id: String,
    #[serde(skip_serializing_if = "String::is_empty", deserialize_with = "wire::string")]
    pub field_path: String,
    #[serde(skip_serializing_if = "Option::is_none", deserialize_with = "wire::timestamp")]
    pub created_utc: Option<DateTime<Utc>>,
    #[serde(skip_serializing_if = "Option::is_none", deserialize_with = "wire::timestamp")]
    pub last_update_utc: Option<DateTime<Utc>>,
}

/// IndexRebuildResult reports the outcome of a collection index rebuild.
///
/// `success` and `errors` are reported independently by the server.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct IndexRebuildResult {
    #[serde(skip_serializing_if = "String::is_empty", deserialize_with = "wire::string")]
    pub collection_id: String,
    #[serde(deserialize_with = "wire::uint")]
    pub documents_processed: u64,
    #[serde(skip_serializing_if = "Vec::is_empty", deserialize_with = "wire::strings")]
    pub indexes_created: Vec<String>,
    #[serde(skip_serializing_if = "Vec::is_empty", deserialize_with = "wire::strings")]
    pub indexes_dropped: Vec<String>,
    #[serde(deserialize_with = "wire::uint")]
    pub values_inserted: u64,
    #[serde(skip_serializing_if = "Option::is_none", deserialize_with = "wire::opt_string")]
    pub duration: Option<String>,
    #[serde(deserialize_with = "wire::float")]
    pub duration_ms: f64,
    #[serde(skip_serializing_if = "Vec::is_empty", deserialize_with = "wire::strings")]
    pub errors: Vec<String>,
    #[serde(skip_serializing_if = "wire::is_false", deserialize_with = "wire::boolean")]
    pub success: bool,
}

/// IndexTableMapping maps an indexed key to its server-side table
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct IndexTableMapping {
    #[serde(skip_serializing_if = "String::is_empty", deserialize_with = "wire::string")]
    pub key: String,
    #[serde(skip_serializing_if = "String::is_empty", deserialize_with = "wire::string")]
    pub table_name: String,
}

/// Payload of `GET /collections/{id}/constraints`
#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct CollectionConstraints {
    #[serde(deserialize_with = "wire::enumeration")]
    pub schema_enforcement_mode: SchemaEnforcementMode,
    #[serde(deserialize_with = "wire::list")]
    pub field_constraints: Vec<FieldConstraint>,
}

/// Payload of `GET /collections/{id}/indexing`
#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct IndexingConfiguration {
    #[serde(deserialize_with = "wire::enumeration")]
    pub indexing_mode: IndexingMode,
    #[serde(deserialize_with = "wire::list")]
    pub indexed_fields: Vec<IndexedField>,
}

/// CreateCollectionRequest represents the request to create a collection
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct CreateCollectionRequest {
    pub name: String, // Required
    #[serde(skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub documents_directory: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub labels: Option<Vec<String>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub tags: Option<HashMap<String, String>>,
    #[serde(skip_serializing_if = "wire::is_default")]
    pub schema_enforcement_mode: SchemaEnforcementMode,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub field_constraints: Option<Vec<FieldConstraint>>,
    #[serde(skip_serializing_if = "wire::is_default")]
    pub indexing_mode: IndexingMode,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub indexed_fields: Option<Vec<String>>,
}

impl CreateCollectionRequest {
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            ..Default::default()
        }
    }

    pub fn with_description(mut self, description: impl Into<String>) -> Self {
        self.description = Some(description.into());
        self
    }

    pub fn with_documents_directory(mut self, directory: impl Into<String>) -> Self {
        self.documents_directory = Some(directory.into());
        self
    }

    pub fn with_label(mut self, label: impl Into<String>) -> Self {
        self.labels.get_or_insert_with(Vec::new).push(label.into());
        self
    }

    pub fn with_tag(mut self, key: impl Into<String>, value: impl Into<String>) -> Self {
        self.tags
            .get_or_insert_with(HashMap::new)
            .insert(key.into(), value.into());
        self
    }

    pub fn with_schema_enforcement(
        mut self,
        mode: SchemaEnforcementMode,
        constraints: Vec<FieldConstraint>,
    ) -> Self {
        self.schema_enforcement_mode = mode;
        self.field_constraints = Some(constraints);
        self
    }

    pub fn with_indexing(mut self, mode: IndexingMode, indexed_fields: Vec<String>) -> Self {
        self.indexing_mode = mode;
        self.indexed_fields = Some(indexed_fields);
        self
    }
}

/// IngestDocumentRequest represents the request to store a document
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct IngestDocumentRequest {
    pub content: Value, // Always sent, even when null
    #[serde(skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub labels: Option<Vec<String>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub tags: Option<HashMap<String, String>>,
}

impl IngestDocumentRequest {
    pub fn new(content: Value) -> Self {
        Self {
            content,
            ..Default::default()
        }
    }

    pub fn with_name(mut self, name: impl Into<String>) -> Self {
        self.name = Some(name.into());
        self
    }

    pub fn with_labels<I, S>(mut self, labels: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.labels = Some(labels.into_iter().map(Into::into).collect());
        self
    }

    pub fn with_tag(mut self, key: impl Into<String>, value: impl Into<String>) -> Self {
        self.tags
            .get_or_insert_with(HashMap::new)
            .insert(key.into(), value.into());
        self
    }
}

/// Body of `PUT /collections/{id}/constraints`
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct UpdateConstraintsRequest {
    pub schema_enforcement_mode: SchemaEnforcementMode,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub field_constraints: Option<Vec<FieldConstraint>>,
}

/// Body of `PUT /collections/{id}/indexing`
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct UpdateIndexingRequest {
    pub indexing_mode: IndexingMode,
    pub rebuild_indexes: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub indexed_fields: Option<Vec<String>>,
}

/// Body of `POST /collections/{id}/indexes/rebuild`
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct RebuildIndexesRequest {
    pub drop_unused_indexes: bool,
}
