//! Dynamic-field handlers
//!
//! A `dynamic` field delegates rendering and collection to a handler
//! registered under the field's name. Handlers keep their own state (loaded
//! schemas, picked values) behind interior mutability, since the session
//! mutates them through button actions while the form holds shared
//! references.

use std::cell::RefCell;
use std::collections::HashMap;
use std::rc::Rc;

use serde_json::{Map, Value};

/// A delegated sub-renderer for one `dynamic` field.
pub trait DynamicHandler {
    /// Human-readable name used in error messages.
    fn label(&self) -> &str;

    /// Produce the field's collected value, or a validation message.
    fn collect(&self) -> Result<Option<Value>, String>;
}

/// Handlers keyed by field name.
#[derive(Clone, Default)]
pub struct DynamicRegistry {
    handlers: HashMap<String, Rc<dyn DynamicHandler>>,
}

impl DynamicRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn register(&mut self, field_name: impl Into<String>, handler: Rc<dyn DynamicHandler>) {
        self.handlers.insert(field_name.into(), handler);
    }

    pub fn handler(&self, field_name: &str) -> Option<&Rc<dyn DynamicHandler>> {
        self.handlers.get(field_name)
    }
}

/// Document-field editor: one sub-control per property of a fetched
/// document-type schema. Replace flows additionally require the current
/// document's revision, loaded by fetching the existing document.
#[derive(Default)]
pub struct DocumentFieldsHandler {
    schema: RefCell<Option<Value>>,
    values: RefCell<Map<String, Value>>,
    revision: RefCell<Option<u64>>,
    requires_revision: bool,
}

impl DocumentFieldsHandler {
    pub fn new() -> Self {
        Self::default()
    }

    /// Editor for a replace flow, which refuses to collect until the
    /// existing document's revision has been loaded.
    pub fn for_replace() -> Self {
        Self {
            requires_revision: true,
            ..Self::default()
        }
    }

    pub fn load_schema(&self, schema: Value) {
        *self.schema.borrow_mut() = Some(schema);
    }

    pub fn set_field(&self, name: impl Into<String>, value: Value) {
        self.values.borrow_mut().insert(name.into(), value);
    }

    /// Record the state of an existing document fetched for editing.
    pub fn load_document(&self, revision: u64, data: Map<String, Value>) {
        *self.revision.borrow_mut() = Some(revision);
        *self.values.borrow_mut() = data;
    }

    pub fn revision(&self) -> Option<u64> {
        *self.revision.borrow()
    }
}

impl DynamicHandler for DocumentFieldsHandler {
    fn label(&self) -> &str {
        "Document fields"
    }

    fn collect(&self) -> Result<Option<Value>, String> {
        if self.schema.borrow().is_none() {
            return Err("Fetch the document type schema first".to_string());
        }
        if self.requires_revision && self.revision.borrow().is_none() {
            return Err(
                "Document revision is missing. Load the existing document first.".to_string(),
            );
        }
        Ok(Some(Value::Object(self.values.borrow().clone())))
    }
}

/// Contested-resource picker: index values chosen from a listed result set.
#[derive(Default)]
pub struct ContestedResourceHandler {
    listed: RefCell<Vec<Value>>,
    chosen: RefCell<Vec<Value>>,
}

impl ContestedResourceHandler {
    pub fn new() -> Self {
        Self::default()
    }

    /// Record the result set of a contested-resources listing.
    pub fn load_options(&self, options: Vec<Value>) {
        *self.listed.borrow_mut() = options;
    }

    /// The listed result set available to pick from.
    pub fn options(&self) -> Vec<Value> {
        self.listed.borrow().clone()
    }

    pub fn choose(&self, values: Vec<Value>) {
        *self.chosen.borrow_mut() = values;
    }
}

impl DynamicHandler for ContestedResourceHandler {
    fn label(&self) -> &str {
        "Contested resource"
    }

    fn collect(&self) -> Result<Option<Value>, String> {
        Ok(Some(Value::Array(self.chosen.borrow().clone())))
    }
}

/// Fallback handler: collects nothing.
#[derive(Default)]
pub struct NoopHandler;

impl DynamicHandler for NoopHandler {
    fn label(&self) -> &str {
        "No-op"
    }

    fn collect(&self) -> Result<Option<Value>, String> {
        Ok(None)
    }
}
