//! Operation schema handling
//!
//! Declarative descriptions of every console operation:
//! - Serde types for the fetched definition document
//! - Allow-list filtering against the supported operation/field-type sets
//! - The validated, pure-lookup [`Registry`] built once at load time

pub mod definitions;
pub mod registry;

pub use definitions::{
    DependsOn, FieldSchema, FieldType, OperationKind, OperationSchema, SelectOption,
};
pub use registry::{
    CategoryGroup, PROOF_CAPABLE, Registry, SUPPORTED_QUERIES, SUPPORTED_TRANSITIONS, SchemaError,
};

/// Fetch the definition document over HTTP and build a validated registry.
///
/// The document is filtered against the supported-operation allow-lists
/// exactly as [`Registry::from_json`] does for a local document.
#[cfg(feature = "fetch")]
pub async fn fetch_definitions(url: &str) -> Result<Registry, SchemaError> {
    let body = reqwest::get(url)
        .await
        .map_err(|e| SchemaError::Http(e.to_string()))?
        .error_for_status()
        .map_err(|e| SchemaError::Http(e.to_string()))?
        .text()
        .await
        .map_err(|e| SchemaError::Http(e.to_string()))?;
    Registry::from_json(&body)
}

/// Blocking variant of [`fetch_definitions`] for native embedders without
/// their own runtime.
#[cfg(all(feature = "native", feature = "fetch"))]
pub fn fetch_definitions_blocking(url: &str) -> Result<Registry, SchemaError> {
    let runtime = tokio::runtime::Builder::new_current_thread()
        .enable_all()
        .build()
        .map_err(|e| SchemaError::Http(e.to_string()))?;
    runtime.block_on(fetch_definitions(url))
}
