//! Upstream entities (solutions, tables, records) and record listing parameters.

use crate::model::schema::FieldDescriptor;
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

/// Record attribute values keyed by field slug; also the shape of create/update payloads.
pub type RecordFields = Map<String, Value>;

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct Solution {
    pub id: String,
    pub name: String,
    #[serde(default)]
    pub structure: Value,
}

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct Table {
    pub id: String,
    pub name: String,
    #[serde(default)]
    pub solution: String,
    #[serde(default)]
    pub structure: Vec<FieldDescriptor>,
}

impl Table {
    pub fn field(&self, slug: &str) -> Option<&FieldDescriptor> {
        self.structure.iter().find(|f| f.slug == slug)
    }
}

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct Record {
    pub id: String,
    #[serde(flatten)]
    pub fields: RecordFields,
}

impl Record {
    pub fn get(&self, slug: &str) -> Option<&Value> {
        self.fields.get(slug)
    }
}

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct RecordList {
    pub items: Vec<Record>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub total_items: Option<u64>,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum FilterOperator {
    And,
    Or,
}

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct FieldFilter {
    pub field: String,
    pub comparison: String,
    pub value: Value,
}

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct RecordFilter {
    pub operator: FilterOperator,
    pub fields: Vec<FieldFilter>,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SortDirection {
    Asc,
    Desc,
}

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct SortSpec {
    pub field: String,
    pub direction: SortDirection,
}

/// Body of the record list call. Unset members are omitted from the wire.
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct ListParams {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub filter: Option<RecordFilter>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub sort: Option<Vec<SortSpec>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub offset: Option<u64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub limit: Option<u64>,
}

impl ListParams {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn limit(mut self, limit: u64) -> Self {
        self.limit = Some(limit);
        self
    }

    pub fn offset(mut self, offset: u64) -> Self {
        self.offset = Some(offset);
        self
    }

    pub fn sort_by(mut self, field: impl Into<String>, direction: SortDirection) -> Self {
        self.sort.get_or_insert_with(Vec::new).push(SortSpec {
            field: field.into(),
            direction,
        });
        self
    }

    /// Add a field condition; the first call fixes the operator for the whole filter.
    pub fn filter(
        mut self,
        operator: FilterOperator,
        field: impl Into<String>,
        comparison: impl Into<String>,
        value: Value,
    ) -> Self {
        let filter = self.filter.get_or_insert_with(|| RecordFilter {
            operator,
            fields: Vec::new(),
        });
        filter.fields.push(FieldFilter {
            field: field.into(),
            comparison: comparison.into(),
            value,
        });
        self
    }
}
