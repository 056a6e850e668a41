//! Button action tests
//!
//! `button` fields trigger named side-effecting actions through the session:
//! fetching the document-type schema, loading the existing document for a
//! replace, generating entropy, and listing contested resources.

use std::cell::RefCell;
use std::rc::Rc;

use async_trait::async_trait;
use serde_json::json;
use tokio::runtime::Runtime;

use evo_console::form::{ControlValue, DynamicHandler};
use evo_console::schema::{OperationKind, Registry};
use evo_console::sdk::api::ContestedResourcesQuery;
use evo_console::sdk::{
    ConnectOptions, ContractsApi, DocumentsApi, PlatformSdk, SdkConnector, SdkError, SdkResponse,
    SdkResult, VotingApi,
};
use evo_console::session::{Session, StatusKind};

fn runtime() -> Runtime {
    tokio::runtime::Builder::new_current_thread()
        .enable_all()
        .build()
        .unwrap()
}

fn registry() -> Registry {
    Registry::from_json(
        r#"{
            "transitions": {
                "document": { "label": "Documents", "transitions": {
                    "documentCreate": {
                        "label": "Create Document",
                        "inputs": [
                            { "name": "contractId", "label": "Contract ID", "type": "text", "required": true },
                            { "name": "documentType", "label": "Document Type", "type": "text", "required": true },
                            { "name": "fetchSchema", "label": "Fetch Schema", "type": "button" },
                            { "name": "entropyHex", "label": "Entropy (hex)", "type": "text" },
                            { "name": "generateEntropy", "label": "Generate", "type": "button" },
                            { "name": "data", "label": "Document Data", "type": "dynamic", "required": true }
                        ]
                    },
                    "documentReplace": {
                        "label": "Replace Document",
                        "inputs": [
                            { "name": "contractId", "label": "Contract ID", "type": "text", "required": true },
                            { "name": "documentType", "label": "Document Type", "type": "text", "required": true },
                            { "name": "documentId", "label": "Document ID", "type": "text", "required": true },
                            { "name": "fetchSchema", "label": "Fetch Schema", "type": "button" },
                            { "name": "loadDocument", "label": "Load Document", "type": "button" },
                            { "name": "data", "label": "Document Data", "type": "dynamic", "required": true }
                        ]
                    }
                }},
                "voting": { "label": "Voting", "transitions": {
                    "masternodeVote": {
                        "label": "Masternode Vote",
                        "inputs": [
                            { "name": "dataContractId", "label": "Data Contract ID", "type": "text", "required": true },
                            { "name": "documentTypeName", "label": "Document Type Name", "type": "text", "required": true },
                            { "name": "indexName", "label": "Index Name", "type": "text", "required": true },
                            { "name": "fetchContestedResources", "label": "List Resources", "type": "button" },
                            { "name": "indexValues", "label": "Index Values", "type": "dynamic", "required": true }
                        ]
                    }
                }}
            }
        }"#,
    )
    .unwrap()
}

type CallLog = Rc<RefCell<Vec<String>>>;

struct MockContracts {
    calls: CallLog,
}

#[async_trait(?Send)]
impl ContractsApi for MockContracts {
    async fn fetch(&self, id: &str, _proof: bool) -> SdkResult {
        self.calls.borrow_mut().push(format!("contract:{id}"));
        Ok(SdkResponse::bare_json(&json!({
            "id": id,
            "documentSchemas": {
                "note": { "properties": { "message": { "type": "string" } } }
            }
        })))
    }
}

struct MockDocuments {
    calls: CallLog,
}

#[async_trait(?Send)]
impl DocumentsApi for MockDocuments {
    async fn get(
        &self,
        contract_id: &str,
        document_type: &str,
        document_id: &str,
        _proof: bool,
    ) -> SdkResult {
        self.calls
            .borrow_mut()
            .push(format!("get:{contract_id}:{document_type}:{document_id}"));
        Ok(SdkResponse::bare_json(&json!({
            "$id": document_id,
            "$revision": 7,
            "data": { "message": "old text" }
        })))
    }
}

struct MockVoting {
    calls: CallLog,
}

#[async_trait(?Send)]
impl VotingApi for MockVoting {
    async fn contested_resources(&self, query: ContestedResourcesQuery, _proof: bool) -> SdkResult {
        self.calls.borrow_mut().push(format!(
            "resources:{}:{}:{}",
            query.contract_id, query.document_type_name, query.index_name
        ));
        Ok(SdkResponse::bare_json(&json!({
            "contestedResources": [["dash", "alice"], ["dash", "bob"]]
        })))
    }
}

struct MockSdk {
    contracts: MockContracts,
    documents: MockDocuments,
    voting: MockVoting,
}

#[async_trait(?Send)]
impl PlatformSdk for MockSdk {
    fn contracts(&self) -> &dyn ContractsApi {
        &self.contracts
    }
    fn documents(&self) -> &dyn DocumentsApi {
        &self.documents
    }
    fn voting(&self) -> &dyn VotingApi {
        &self.voting
    }
}

struct MockConnector {
    calls: CallLog,
}

#[async_trait(?Send)]
impl SdkConnector for MockConnector {
    async fn connect(&self, _options: &ConnectOptions) -> Result<Box<dyn PlatformSdk>, SdkError> {
        Ok(Box::new(MockSdk {
            contracts: MockContracts {
                calls: self.calls.clone(),
            },
            documents: MockDocuments {
                calls: self.calls.clone(),
            },
            voting: MockVoting {
                calls: self.calls.clone(),
            },
        }))
    }
}

fn session_with_log() -> (Session, CallLog) {
    let calls: CallLog = Rc::new(RefCell::new(Vec::new()));
    let session = Session::new(
        registry(),
        Box::new(MockConnector {
            calls: calls.clone(),
        }),
    );
    (session, calls)
}

#[test]
fn test_fetch_schema_feeds_the_document_editor() {
    let rt = runtime();
    rt.block_on(async {
        let (mut session, calls) = session_with_log();
        session
            .select_operation(OperationKind::Transition, "document", "documentCreate")
            .unwrap();
        {
            let state = session.form_state_mut().unwrap();
            state.set_text("contractId", "contract-id");
            state.set_text("documentType", "note");
        }

        session.run_button_action("fetchSchema").await.unwrap();

        assert_eq!(*calls.borrow(), vec!["contract:contract-id"]);
        let status = session.status().unwrap();
        assert_eq!(status.kind, StatusKind::Success);
        assert_eq!(status.message, "Document schema loaded");

        let editor = session.selection().unwrap().document_editor.clone().unwrap();
        editor.set_field("message", json!("hello"));
        assert_eq!(editor.collect(), Ok(Some(json!({ "message": "hello" }))));
    });
}

#[test]
fn test_fetch_schema_requires_the_contract_id() {
    let rt = runtime();
    rt.block_on(async {
        let (mut session, calls) = session_with_log();
        session
            .select_operation(OperationKind::Transition, "document", "documentCreate")
            .unwrap();

        let err = session.run_button_action("fetchSchema").await.unwrap_err();
        assert_eq!(err.to_string(), "Contract ID is required");
        assert!(calls.borrow().is_empty());
        assert_eq!(session.status().unwrap().kind, StatusKind::Error);
    });
}

#[test]
fn test_fetch_schema_rejects_an_unknown_document_type() {
    let rt = runtime();
    rt.block_on(async {
        let (mut session, _calls) = session_with_log();
        session
            .select_operation(OperationKind::Transition, "document", "documentCreate")
            .unwrap();
        {
            let state = session.form_state_mut().unwrap();
            state.set_text("contractId", "contract-id");
            state.set_text("documentType", "missing");
        }

        let err = session.run_button_action("fetchSchema").await.unwrap_err();
        assert_eq!(
            err.to_string(),
            "Document type missing not found on contract"
        );
    });
}

#[test]
fn test_load_document_feeds_revision_and_fields() {
    let rt = runtime();
    rt.block_on(async {
        let (mut session, calls) = session_with_log();
        session
            .select_operation(OperationKind::Transition, "document", "documentReplace")
            .unwrap();
        {
            let state = session.form_state_mut().unwrap();
            state.set_text("contractId", "contract-id");
            state.set_text("documentType", "note");
            state.set_text("documentId", "existing-doc");
        }

        session.run_button_action("loadDocument").await.unwrap();

        assert_eq!(*calls.borrow(), vec!["get:contract-id:note:existing-doc"]);
        let editor = session.selection().unwrap().document_editor.clone().unwrap();
        assert_eq!(editor.revision(), Some(7));

        // Replace editors still refuse to collect until the schema arrives.
        editor.load_schema(json!({ "properties": { "message": { "type": "string" } } }));
        assert_eq!(editor.collect(), Ok(Some(json!({ "message": "old text" }))));
    });
}

#[test]
fn test_generate_entropy_fills_the_entropy_field() {
    let rt = runtime();
    rt.block_on(async {
        let (mut session, calls) = session_with_log();
        session
            .select_operation(OperationKind::Transition, "document", "documentCreate")
            .unwrap();

        session.run_button_action("generateEntropy").await.unwrap();

        assert!(calls.borrow().is_empty());
        let sel = session.selection().unwrap();
        match sel.state.value("entropyHex") {
            Some(ControlValue::Text(hex)) => {
                assert_eq!(hex.len(), 64);
                assert!(hex.chars().all(|c| c.is_ascii_hexdigit()));
            }
            other => panic!("expected entropy text, got {other:?}"),
        }
        assert_eq!(session.status().unwrap().message, "Entropy generated");
    });
}

#[test]
fn test_listing_contested_resources_fills_the_picker() {
    let rt = runtime();
    rt.block_on(async {
        let (mut session, calls) = session_with_log();
        session
            .select_operation(OperationKind::Transition, "voting", "masternodeVote")
            .unwrap();
        {
            let state = session.form_state_mut().unwrap();
            state.set_text("dataContractId", "contract-id");
            state.set_text("documentTypeName", "domain");
            state.set_text("indexName", "parentNameAndLabel");
        }

        session
            .run_button_action("fetchContestedResources")
            .await
            .unwrap();

        assert_eq!(
            *calls.borrow(),
            vec!["resources:contract-id:domain:parentNameAndLabel"]
        );
        let picker = session.selection().unwrap().resource_picker.clone().unwrap();
        assert_eq!(
            picker.options(),
            vec![json!(["dash", "alice"]), json!(["dash", "bob"])]
        );
        assert_eq!(
            session.status().unwrap().message,
            "Listed 2 contested resources"
        );
    });
}

#[test]
fn test_non_button_fields_have_no_action() {
    let rt = runtime();
    rt.block_on(async {
        let (mut session, calls) = session_with_log();
        session
            .select_operation(OperationKind::Transition, "document", "documentCreate")
            .unwrap();

        let err = session.run_button_action("contractId").await.unwrap_err();
        assert_eq!(err.to_string(), "no button action behind field contractId");
        assert!(calls.borrow().is_empty());
    });
}
