//! Evo Console - Headless console engine for Dash Platform operations
//!
//! Provides the full pipeline behind an operations console:
//! - Schema registry (fetched definition document, allow-list filtered)
//! - Headless form rendering and value collection
//! - Authentication requirement derivation per transition
//! - Lookup-table dispatch onto the wrapped platform SDK
//! - Result normalization into plain JSON for display

pub mod auth;
pub mod dispatch;
pub mod form;
pub mod normalize;
pub mod schema;
pub mod sdk;
pub mod session;

// Re-export commonly used types
pub use auth::{
    AssetLockRequirement, AuthError, AuthInputs, AuthRequirements, IdentityRequirement,
    PrivateKeyRequirement, collect_auth_args, compute_auth_requirements,
};
pub use dispatch::{CallContext, DispatchError, NamedArgs, dispatch};
pub use form::{
    CollectError, CollectedArgs, ControlKind, ControlValue, DynamicHandler, DynamicRegistry,
    FormModel, FormState, collect_args,
};
pub use normalize::{format_result, normalize};
pub use schema::{FieldSchema, FieldType, OperationKind, OperationSchema, Registry, SchemaError};
pub use sdk::{
    ConnectOptions, Network, PlatformSdk, RawValue, SdkConnector, SdkError, SdkResponse, Signer,
};
pub use session::{ExecutionResult, Session, SessionError, Status, StatusKind};

#[cfg(feature = "fetch")]
pub use schema::fetch_definitions;
#[cfg(all(feature = "native", feature = "fetch"))]
pub use schema::fetch_definitions_blocking;

// WASM bindings for the stateless parts of the pipeline
#[cfg(all(target_arch = "wasm32", feature = "wasm"))]
mod wasm {
    use crate::schema::{OperationKind, Registry};
    use js_sys;
    use serde_json;
    use wasm_bindgen::prelude::*;
    use wasm_bindgen_futures;

    /// Serialize a value to a JSON string for JavaScript consumption
    fn to_js_json<T: serde::Serialize>(value: &T) -> Result<String, JsValue> {
        serde_json::to_string(value)
            .map_err(|e| JsValue::from_str(&format!("Serialization error: {}", e)))
    }

    /// Parse and filter a definition document.
    ///
    /// # Arguments
    ///
    /// * `definitions_json` - Definition document as fetched from the deployment
    ///
    /// # Returns
    ///
    /// JSON string containing the filtered registry (unknown operations and
    /// field types dropped), or JsValue error
    #[wasm_bindgen]
    pub fn parse_definitions(definitions_json: &str) -> Result<String, JsValue> {
        match Registry::from_json(definitions_json) {
            Ok(registry) => to_js_json(&registry),
            Err(err) => Err(JsValue::from_str(&err.to_string())),
        }
    }

    /// Fetch, parse, and filter the definition document from a URL.
    ///
    /// # Arguments
    ///
    /// * `url` - Definition document URL
    ///
    /// # Returns
    ///
    /// Promise that resolves to a JSON string containing the filtered
    /// registry, or rejects with error
    #[cfg(feature = "fetch")]
    #[wasm_bindgen]
    pub fn fetch_definitions(url: &str) -> js_sys::Promise {
        let url = url.to_string();
        wasm_bindgen_futures::future_to_promise(async move {
            match crate::schema::fetch_definitions(&url).await {
                Ok(registry) => serde_json::to_string(&registry)
                    .map(|s| JsValue::from_str(&s))
                    .map_err(|e| JsValue::from_str(&format!("Serialization error: {}", e))),
                Err(err) => Err(JsValue::from_str(&err.to_string())),
            }
        })
    }

    /// Registry used when the definition document cannot be fetched at all.
    ///
    /// # Returns
    ///
    /// JSON string containing the fallback registry
    #[wasm_bindgen]
    pub fn fallback_definitions() -> Result<String, JsValue> {
        to_js_json(&Registry::fallback())
    }

    /// Derive the authentication inputs a transition needs.
    ///
    /// # Arguments
    ///
    /// * `operation_key` - Transition key (e.g. "identityCreditTransfer")
    /// * `sdk_params_json` - JSON array of SDK parameter names from the schema
    ///
    /// # Returns
    ///
    /// JSON string with the requirements object, or `"null"` when the
    /// operation needs no authentication inputs
    #[wasm_bindgen]
    pub fn auth_requirements(
        operation_key: &str,
        sdk_params_json: &str,
    ) -> Result<String, JsValue> {
        let sdk_params: Vec<String> = serde_json::from_str(sdk_params_json)
            .map_err(|e| JsValue::from_str(&format!("Failed to parse sdk params: {}", e)))?;
        to_js_json(&crate::auth::compute_auth_requirements(
            operation_key,
            &sdk_params,
        ))
    }

    /// Whether a query has a proof-carrying variant.
    #[wasm_bindgen]
    pub fn is_proof_capable(key: &str) -> bool {
        crate::schema::registry::PROOF_CAPABLE.contains(key)
    }

    /// Format a normalized result value for the result pane.
    ///
    /// # Arguments
    ///
    /// * `result_json` - Normalized result as JSON, or `"null"` for no result
    ///
    /// # Returns
    ///
    /// Display text (pretty-printed JSON, a bare string verbatim, or the
    /// no-result placeholder)
    #[wasm_bindgen]
    pub fn format_query_result(result_json: &str) -> Result<String, JsValue> {
        let value: serde_json::Value = serde_json::from_str(result_json)
            .map_err(|e| JsValue::from_str(&format!("Failed to parse result: {}", e)))?;
        let normalized = match value {
            serde_json::Value::Null => None,
            other => Some(other),
        };
        Ok(crate::normalize::format_result(normalized.as_ref()))
    }

    /// Operation keys the dispatcher actually handles, for feature probing.
    ///
    /// # Returns
    ///
    /// JSON string: `{"queries": [...], "transitions": [...]}`
    #[wasm_bindgen]
    pub fn supported_operations() -> Result<String, JsValue> {
        let mut queries: Vec<&str> = crate::dispatch::handled_query_keys().collect();
        queries.sort_unstable();
        let mut transitions: Vec<&str> = crate::dispatch::handled_transition_keys().collect();
        transitions.sort_unstable();
        to_js_json(&serde_json::json!({
            "queries": queries,
            "transitions": transitions,
        }))
    }

    /// Category labels of a definition document, sorted for display.
    ///
    /// # Arguments
    ///
    /// * `definitions_json` - Definition document as fetched from the deployment
    /// * `kind` - `"queries"` or `"transitions"`
    ///
    /// # Returns
    ///
    /// JSON string containing an array of `[key, label]` pairs
    #[wasm_bindgen]
    pub fn registry_categories(definitions_json: &str, kind: &str) -> Result<String, JsValue> {
        let registry = Registry::from_json(definitions_json)
            .map_err(|e| JsValue::from_str(&e.to_string()))?;
        let kind = match kind {
            "queries" => OperationKind::Query,
            "transitions" => OperationKind::Transition,
            other => {
                return Err(JsValue::from_str(&format!(
                    "Unknown operation kind: {}",
                    other
                )));
            }
        };
        to_js_json(&registry.categories(kind))
    }
}
