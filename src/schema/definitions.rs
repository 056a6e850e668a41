//! Validated operation and field schemas
//!
//! These are the post-filter types the rest of the engine works with. The raw
//! serde shapes of the fetched definition document live in
//! [`registry`](super::registry); anything that survives filtering is
//! guaranteed to use only supported field types and allow-listed operation
//! keys.

use serde::{Deserialize, Serialize};
use serde_json::Value;

/// Whether an operation is a read-only query or a state-mutating transition.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum OperationKind {
    Query,
    Transition,
}

/// Supported input field types.
///
/// `string` is accepted as an alias of `text` during parsing, mirroring the
/// definition document's loose typing.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum FieldType {
    #[serde(rename = "text", alias = "string")]
    Text,
    #[serde(rename = "textarea")]
    TextArea,
    #[serde(rename = "number")]
    Number,
    #[serde(rename = "checkbox")]
    Checkbox,
    #[serde(rename = "json")]
    Json,
    #[serde(rename = "select")]
    Select,
    #[serde(rename = "multiselect")]
    MultiSelect,
    #[serde(rename = "array")]
    Array,
    #[serde(rename = "dynamic")]
    Dynamic,
    #[serde(rename = "button")]
    Button,
    #[serde(rename = "keyPreview")]
    KeyPreview,
}

impl FieldType {
    /// Parse a definition-document type string, normalizing aliases.
    pub fn parse(raw: &str) -> Option<Self> {
        match raw {
            "text" | "string" => Some(Self::Text),
            "textarea" => Some(Self::TextArea),
            "number" => Some(Self::Number),
            "checkbox" => Some(Self::Checkbox),
            "json" => Some(Self::Json),
            "select" => Some(Self::Select),
            "multiselect" => Some(Self::MultiSelect),
            "array" => Some(Self::Array),
            "dynamic" => Some(Self::Dynamic),
            "button" => Some(Self::Button),
            "keyPreview" => Some(Self::KeyPreview),
            _ => None,
        }
    }

    /// Fields of this type never contribute a collected value.
    pub fn is_presentational(self) -> bool {
        matches!(self, Self::Button | Self::KeyPreview)
    }
}

/// One option of a `select`/`multiselect` field.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SelectOption {
    pub value: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub label: Option<String>,
}

impl SelectOption {
    /// Display text: the label when present, else the value itself.
    pub fn display(&self) -> &str {
        self.label.as_deref().unwrap_or(&self.value)
    }
}

/// Visibility dependency rule: the field is hidden until the referenced
/// field's live value matches one of `values`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DependsOn {
    pub field: String,
    pub values: Vec<String>,
}

/// A single validated input field.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct FieldSchema {
    pub name: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub label: Option<String>,
    #[serde(rename = "type")]
    pub field_type: FieldType,
    #[serde(default)]
    pub required: bool,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub min: Option<f64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub max: Option<f64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub step: Option<f64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub rows: Option<u32>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub options: Vec<SelectOption>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub placeholder: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub help: Option<String>,
    /// Default value from the definition document (`value`/`default`).
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub value: Option<Value>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub depends_on: Option<DependsOn>,
}

impl FieldSchema {
    /// Human-readable name used in validation error messages.
    pub fn display_label(&self) -> &str {
        self.label.as_deref().unwrap_or(&self.name)
    }
}

/// A validated operation: one form in the console.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct OperationSchema {
    pub key: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub label: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    #[serde(default)]
    pub inputs: Vec<FieldSchema>,
    /// Parameter names of the wrapped SDK method, used to infer
    /// authentication requirements.
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub sdk_params: Vec<String>,
}

impl OperationSchema {
    pub fn display_label(&self) -> &str {
        self.label.as_deref().unwrap_or(&self.key)
    }
}
