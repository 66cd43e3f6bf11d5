use chrono::{DateTime, Utc};
use serde::ser::SerializeStruct;
use serde::{Deserialize, Serialize, Serializer};
use std::collections::HashMap;
use std::fmt;
use std::str::FromStr;

use crate::models::Document;
use crate::wire::{self, ParseEnumError, WireEnum};

/// SearchCondition is the comparison a filter applies to a field
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize)]
pub enum SearchCondition {
    #[default]
    Equals,
    NotEquals,
    GreaterThan,
    GreaterThanOrEqualTo,
    LessThan,
    LessThanOrEqualTo,
    IsNull,
    IsNotNull,
    Contains,
    StartsWith,
    EndsWith,
    Like,
}

impl SearchCondition {
    /// Null checks compare against nothing; every other condition needs a value.
    pub fn takes_value(&self) -> bool {
        !matches!(self, Self::IsNull | Self::IsNotNull)
    }
}

impl WireEnum for SearchCondition {
    const KIND: &'static str = "search condition";
    const ALL: &'static [Self] = &[
        Self::Equals,
        Self::NotEquals,
        Self::GreaterThan,
        Self::GreaterThanOrEqualTo,
        Self::LessThan,
        Self::LessThanOrEqualTo,
        Self::IsNull,
        Self::IsNotNull,
        Self::Contains,
        Self::StartsWith,
        Self::EndsWith,
        Self::Like,
    ];

    fn as_str(&self) -> &'static str {
        match self {
            Self::Equals => "Equals",
            Self::NotEquals => "NotEquals",
            Self::GreaterThan => "GreaterThan",
            Self::GreaterThanOrEqualTo => "GreaterThanOrEqualTo",
            Self::LessThan => "LessThan",
            Self::LessThanOrEqualTo => "LessThanOrEqualTo",
            Self::IsNull => "IsNull",
            Self::IsNotNull => "IsNotNull",
            Self::Contains => "Contains",
            Self::StartsWith => "StartsWith",
            Self::EndsWith => "EndsWith",
            Self::Like => "Like",
        }
    }
}

impl FromStr for SearchCondition {
    type Err = ParseEnumError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        wire::parse_wire_enum(s)
    }
}

impl fmt::Display for SearchCondition {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        wire::fmt_wire_enum(self, f)
    }
}

/// EnumerationOrder controls the ordering of search and enumeration results
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize)]
pub enum EnumerationOrder {
    CreatedAscending,
    #[default]
    CreatedDescending,
    LastUpdateAscending,
    LastUpdateDescending,
    NameAscending,
    NameDescending,
}

impl WireEnum for EnumerationOrder {
    const KIND: &'static str = "enumeration order";
    const ALL: &'static [Self] = &[
        Self::CreatedAscending,
        Self::CreatedDescending,
        Self::LastUpdateAscending,
        Self::LastUpdateDescending,
        Self::NameAscending,
        Self::NameDescending,
    ];

    fn as_str(&self) -> &'static str {
        match self {
            Self::CreatedAscending => "CreatedAscending",
            Self::CreatedDescending => "CreatedDescending",
            Self::LastUpdateAscending => "LastUpdateAscending",
            Self::LastUpdateDescending => "LastUpdateDescending",
            Self::NameAscending => "NameAscending",
            Self::NameDescending => "NameDescending",
        }
    }
}

impl FromStr for EnumerationOrder {
    type Err = ParseEnumError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        wire::parse_wire_enum(s)
    }
}

impl fmt::Display for EnumerationOrder {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        wire::fmt_wire_enum(self, f)
    }
}

/// SearchFilter is one predicate over a document field.
///
/// Values are compared as strings by the server; numeric comparisons are
/// expressed with the number's text (`"150"`).
#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
#[serde(default)]
pub struct SearchFilter {
    #[serde(deserialize_with = "wire::string")]
    pub field: String,
    #[serde(deserialize_with = "wire::enumeration")]
    pub condition: SearchCondition,
    #[serde(deserialize_with = "wire::opt_string")]
    pub value: Option<String>,
}

impl SearchFilter {
    pub fn new(
        field: impl Into<String>,
        condition: SearchCondition,
        value: impl Into<String>,
    ) -> Self {
        Self {
            field: field.into(),
            condition,
            value: Some(value.into()),
        }
    }

    pub fn equals(field: impl Into<String>, value: impl Into<String>) -> Self {
        Self::new(field, SearchCondition::Equals, value)
    }

    pub fn is_null(field: impl Into<String>) -> Self {
        Self {
            field: field.into(),
            condition: SearchCondition::IsNull,
            value: None,
        }
    }

    pub fn is_not_null(field: impl Into<String>) -> Self {
        Self {
            field: field.into(),
            condition: SearchCondition::IsNotNull,
            value: None,
        }
    }

    /// The value as sent on the wire: never present for null checks.
    pub fn wire_value(&self) -> Option<&str> {
        self.value
            .as_deref()
            .filter(|_| self.condition.takes_value())
    }
}

impl Serialize for SearchFilter {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        let value = self.wire_value();
        let len = if value.is_some() { 3 } else { 2 };
        let mut state = serializer.serialize_struct("SearchFilter", len)?;
        state.serialize_field("field", &self.field)?;
        state.serialize_field("condition", &self.condition)?;
        if let Some(value) = value {
            state.serialize_field("value", value)?;
        }
        state.end()
    }
}

/// SearchQuery is a structured search over one collection.
///
/// Filters are AND-combined, labels match any, tags match all. A query with no
/// predicates enumerates the whole collection. The collection id travels in the
/// request path and is not part of the body.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct SearchQuery {
    #[serde(skip)]
    pub collection_id: String,
    #[serde(skip_serializing_if = "Option::is_none", deserialize_with = "wire::opt_list")]
    pub filters: Option<Vec<SearchFilter>>,
    #[serde(skip_serializing_if = "Option::is_none", deserialize_with = "wire::opt_strings")]
    pub labels: Option<Vec<String>>,
    #[serde(skip_serializing_if = "Option::is_none", deserialize_with = "wire::opt_string_map")]
    pub tags: Option<HashMap<String, String>>,
    #[serde(skip_serializing_if = "Option::is_none", deserialize_with = "wire::opt_uint")]
    pub max_results: Option<u32>,
    #[serde(skip_serializing_if = "Option::is_none", deserialize_with = "wire::opt_uint")]
    pub skip: Option<u32>,
    #[serde(skip_serializing_if = "Option::is_none", deserialize_with = "wire::opt_enumeration")]
    pub ordering: Option<EnumerationOrder>,
    #[serde(skip_serializing_if = "wire::is_false", deserialize_with = "wire::boolean")]
    pub include_content: bool,
}

impl SearchQuery {
    pub fn new(collection_id: impl Into<String>) -> Self {
        Self {
            collection_id: collection_id.into(),
            ..Default::default()
        }
    }

    pub fn with_filter(mut self, filter: SearchFilter) -> Self {
        self.filters.get_or_insert_with(Vec::new).push(filter);
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

    pub fn with_max_results(mut self, max_results: u32) -> Self {
        self.max_results = Some(max_results);
        self
    }

    pub fn with_skip(mut self, skip: u32) -> Self {
        self.skip = Some(skip);
        self
    }

    pub fn with_ordering(mut self, ordering: EnumerationOrder) -> Self {
        self.ordering = Some(ordering);
        self
    }

    pub fn with_content(mut self, include_content: bool) -> Self {
        self.include_content = include_content;
        self
    }
}

/// Body of a SQL-style search request
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct SqlSearchRequest {
    pub sql_expression: String,
}

/// SearchResult is one page of search or enumeration results.
///
/// `total_records` counts every match before pagination; `end_of_results`
/// is set when no records remain after this page.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct SearchResult {
    #[serde(skip_serializing_if = "wire::is_false", deserialize_with = "wire::boolean")]
    pub success: bool,
    #[serde(skip_serializing_if = "Option::is_none", deserialize_with = "wire::timestamp")]
    pub timestamp: Option<DateTime<Utc>>,
    #[serde(skip_serializing_if = "Option::is_none", deserialize_with = "wire::opt_uint")]
    pub max_results: Option<u64>,
    #[serde(skip_serializing_if = "Option::is_none", deserialize_with = "wire::opt_string")]
    pub continuation_token: Option<String>,
    #[serde(skip_serializing_if = "wire::is_false", deserialize_with = "wire::boolean")]
    pub end_of_results: bool,
    #[serde(deserialize_with = "wire::uint")]
    pub total_records: u64,
    #[serde(deserialize_with = "wire::uint")]
    pub records_remaining: u64,
    #[serde(skip_serializing_if = "Vec::is_empty", deserialize_with = "wire::list")]
    pub documents: Vec<Document>,
}
