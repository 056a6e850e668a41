//! Definition document filtering tests

use serde_json::json;

use evo_console::form::{ControlKind, ControlValue, FormModel, FormState};
use evo_console::schema::{FieldType, OperationKind, Registry};

fn document() -> String {
    json!({
        "queries": {
            "identity": { "label": "Identity", "queries": {
                "getIdentity": {
                    "label": "Get Identity",
                    "inputs": [{ "name": "id", "type": "text", "required": true }]
                },
                "getIdentityKeys": {
                    "label": "Get Identity Keys",
                    "inputs": [
                        { "name": "identityId", "type": "text", "required": true },
                        { "name": "keyRequestType", "type": "select", "options": [
                            { "value": "all", "label": "All Keys" },
                            { "value": "specific" },
                            { "value": "search" }
                        ]},
                        { "name": "specificKeyIds", "type": "array",
                          "dependsOn": { "field": "keyRequestType", "values": ["specific"] } }
                    ]
                },
                "getFutureQuery": { "label": "Not Yet Supported", "inputs": [] }
            }},
            "system": { "label": "System Status", "queries": {
                "getStatus": { "label": "Get Status", "inputs": [] }
            }},
            "experimental": { "label": "Experimental", "queries": {
                "getSomethingElse": { "inputs": [] }
            }}
        },
        "transitions": {
            "document": { "label": "Documents", "transitions": {
                "documentCreate": {
                    "label": "Create Document",
                    "inputs": [
                        { "name": "contractId", "type": "text", "required": true },
                        { "name": "fetchSchema", "type": "button" },
                        { "name": "data", "type": "dynamic", "required": true }
                    ],
                    "sdkParams": [{ "name": "ownerId" }, { "name": "privateKey" }]
                },
                "documentBulkImport": {
                    "label": "Bulk Import",
                    "inputs": [{ "name": "file", "type": "file" }]
                }
            }}
        }
    })
    .to_string()
}

#[test]
fn test_unknown_operations_and_categories_are_filtered_out() {
    let registry = Registry::from_json(&document()).unwrap();

    assert!(
        registry
            .operation(OperationKind::Query, "identity", "getIdentity")
            .is_some()
    );
    assert!(
        registry
            .operation(OperationKind::Query, "identity", "getFutureQuery")
            .is_none()
    );
    // A category left with no surviving operations disappears entirely.
    let categories = registry.categories(OperationKind::Query);
    assert!(!categories.iter().any(|(key, _)| *key == "experimental"));
}

#[test]
fn test_unsupported_field_type_drops_the_operation() {
    let registry = Registry::from_json(&document()).unwrap();
    assert!(
        registry
            .operation(OperationKind::Transition, "document", "documentCreate")
            .is_some()
    );
    // `file` is not a supported input type.
    assert!(
        registry
            .operation(OperationKind::Transition, "document", "documentBulkImport")
            .is_none()
    );
}

#[test]
fn test_categories_are_sorted_by_label() {
    let registry = Registry::from_json(&document()).unwrap();
    let labels: Vec<&str> = registry
        .categories(OperationKind::Query)
        .into_iter()
        .map(|(_, label)| label)
        .collect();
    assert_eq!(labels, vec!["Identity", "System Status"]);
}

#[test]
fn test_sdk_params_survive_validation() {
    let registry = Registry::from_json(&document()).unwrap();
    let op = registry
        .operation(OperationKind::Transition, "document", "documentCreate")
        .unwrap();
    assert_eq!(op.sdk_params, vec!["ownerId", "privateKey"]);
}

#[test]
fn test_proof_capability_is_query_only() {
    let registry = Registry::from_json(&document()).unwrap();
    assert!(registry.is_proof_capable(OperationKind::Query, "getIdentity"));
    // getStatus has no proof-carrying variant.
    assert!(!registry.is_proof_capable(OperationKind::Query, "getStatus"));
    assert!(!registry.is_proof_capable(OperationKind::Transition, "documentCreate"));
}

#[test]
fn test_malformed_document_reports_parse_error() {
    let err = Registry::from_json("{ not json").unwrap_err();
    assert!(err.to_string().starts_with("failed to parse definition document"));
}

#[test]
fn test_rendered_form_follows_the_validated_schema() {
    let registry = Registry::from_json(&document()).unwrap();
    let op = registry
        .operation(OperationKind::Query, "identity", "getIdentityKeys")
        .unwrap();
    let model = FormModel::for_operation(op);

    let request_type = model.control("keyRequestType").unwrap();
    match &request_type.kind {
        ControlKind::Select { options } => {
            assert_eq!(options.len(), 3);
            assert_eq!(options[0].display(), "All Keys");
            assert_eq!(options[1].display(), "specific");
        }
        other => panic!("expected a select control, got {other:?}"),
    }

    // The select starts on its first option, which keeps the dependent
    // key-id list hidden until "specific" is chosen.
    let mut state = FormState::for_model(&model);
    assert_eq!(
        state.value("keyRequestType"),
        Some(&ControlValue::Text("all".into()))
    );
    assert!(!state.is_visible("specificKeyIds"));
    state.set_text("keyRequestType", "specific");
    assert!(state.is_visible("specificKeyIds"));
}

#[test]
fn test_presentational_fields_pass_filtering() {
    let registry = Registry::from_json(&document()).unwrap();
    let op = registry
        .operation(OperationKind::Transition, "document", "documentCreate")
        .unwrap();
    assert_eq!(op.inputs[1].field_type, FieldType::Button);
    assert_eq!(op.inputs[2].field_type, FieldType::Dynamic);
}
