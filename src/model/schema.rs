//! Table schema metadata: field descriptors and the closed set of field kinds.

use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

/// Known SmartSuite field type tags. Unrecognised tags are kept verbatim in `Other`.
#[derive(Clone, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(from = "String", into = "String")]
pub enum FieldKind {
    Text,
    TextArea,
    Number,
    RecordTitle,
    Currency,
    Date,
    LinkedRecord,
    User,
    SingleSelect,
    MultiSelect,
    Other(String),
}

impl FieldKind {
    pub fn tag(&self) -> &str {
        match self {
            FieldKind::Text => "textfield",
            FieldKind::TextArea => "textareafield",
            FieldKind::Number => "numberfield",
            FieldKind::RecordTitle => "recordtitlefield",
            FieldKind::Currency => "currencyfield",
            FieldKind::Date => "datefield",
            FieldKind::LinkedRecord => "linkedrecordfield",
            FieldKind::User => "userfield",
            FieldKind::SingleSelect => "singleselectfield",
            FieldKind::MultiSelect => "multiselectfield",
            FieldKind::Other(tag) => tag,
        }
    }

    /// Short instruction shown under the form input.
    pub fn input_hint(&self) -> Option<&'static str> {
        match self {
            FieldKind::LinkedRecord => Some("Enter record ID or JSON array of IDs"),
            FieldKind::User => Some("Enter user ID or JSON array of user IDs"),
            FieldKind::Date => Some("Enter date in format: YYYY-MM-DD"),
            FieldKind::Currency | FieldKind::Number => Some("Enter number value"),
            FieldKind::SingleSelect => Some("Enter option value"),
            FieldKind::MultiSelect => Some("Enter JSON array of values"),
            _ => None,
        }
    }

    /// Kinds that can be filled from plain text without tripping upstream validation.
    pub fn is_safe_for_create(&self) -> bool {
        matches!(
            self,
            FieldKind::Text | FieldKind::TextArea | FieldKind::Number | FieldKind::RecordTitle
        )
    }

    pub fn is_numeric(&self) -> bool {
        matches!(self, FieldKind::Number | FieldKind::Currency)
    }

    /// Kinds whose value may be a list (ids or option values).
    pub fn accepts_list(&self) -> bool {
        matches!(self, FieldKind::LinkedRecord | FieldKind::User | FieldKind::MultiSelect)
    }
}

impl From<String> for FieldKind {
    fn from(tag: String) -> Self {
        match tag.as_str() {
            "textfield" => FieldKind::Text,
            "textareafield" => FieldKind::TextArea,
            "numberfield" => FieldKind::Number,
            "recordtitlefield" => FieldKind::RecordTitle,
            "currencyfield" => FieldKind::Currency,
            "datefield" => FieldKind::Date,
            "linkedrecordfield" => FieldKind::LinkedRecord,
            "userfield" => FieldKind::User,
            "singleselectfield" => FieldKind::SingleSelect,
            "multiselectfield" => FieldKind::MultiSelect,
            _ => FieldKind::Other(tag),
        }
    }
}

impl From<FieldKind> for String {
    fn from(kind: FieldKind) -> Self {
        match kind {
            FieldKind::Other(tag) => tag,
            known => known.tag().to_string(),
        }
    }
}

#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct FieldParams {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub required: Option<bool>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub system: Option<bool>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub placeholder: Option<String>,
    /// Type-specific parameters (choices, linked table, display format, ...).
    #[serde(flatten)]
    pub other: Map<String, Value>,
}

/// Schema metadata for one record attribute. `slug` is the key used in record storage and in
/// request payloads.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct FieldDescriptor {
    pub slug: String,
    pub label: String,
    pub field_type: FieldKind,
    #[serde(default)]
    pub params: Option<FieldParams>,
}

impl FieldDescriptor {
    pub fn is_required(&self) -> bool {
        self.params.as_ref().and_then(|p| p.required).unwrap_or(false)
    }

    pub fn is_system(&self) -> bool {
        self.params.as_ref().and_then(|p| p.system).unwrap_or(false)
    }

    pub fn placeholder(&self) -> Option<&str> {
        self.params
            .as_ref()
            .and_then(|p| p.placeholder.as_deref())
            .filter(|p| !p.is_empty())
    }

    /// System fields and the `id` slug are never user-editable.
    pub fn is_editable(&self) -> bool {
        !self.is_system() && self.slug != "id"
    }
}
