//! Session tests: client memoization, execution flow, and outcome recording

use std::cell::RefCell;
use std::rc::Rc;

use async_trait::async_trait;
use serde_json::json;
use tokio::runtime::Runtime;

use evo_console::schema::{OperationKind, Registry};
use evo_console::sdk::{
    AdvancedOptions, ConnectOptions, IdentitiesApi, Network, PlatformSdk, SdkConnector, SdkError,
    SdkResponse, SdkResult,
};
use evo_console::session::{Session, SessionError, StatusKind};

fn runtime() -> Runtime {
    tokio::runtime::Builder::new_current_thread()
        .enable_all()
        .build()
        .unwrap()
}

fn registry() -> Registry {
    Registry::from_json(
        r#"{
            "queries": {
                "identity": { "label": "Identity", "queries": {
                    "getIdentity": {
                        "label": "Get Identity",
                        "inputs": [{ "name": "id", "label": "Identity ID", "type": "text", "required": true }]
                    }
                }}
            },
            "transitions": {
                "identity": { "label": "Identity", "transitions": {
                    "identityCreditTransfer": {
                        "label": "Transfer Credits",
                        "inputs": [
                            { "name": "recipientId", "type": "text", "required": true },
                            { "name": "amount", "type": "text", "required": true }
                        ]
                    }
                }}
            }
        }"#,
    )
    .unwrap()
}

struct MockIdentities {
    fail_fetch: bool,
}

#[async_trait(?Send)]
impl IdentitiesApi for MockIdentities {
    async fn fetch(&self, id: &str, proof: bool) -> SdkResult {
        if self.fail_fetch {
            return Err(SdkError::Call("identity not found on network".to_string()));
        }
        Ok(SdkResponse::bare_json(&json!({ "id": id, "proof": proof })))
    }
}

struct MockSdk {
    identities: MockIdentities,
}

#[async_trait(?Send)]
impl PlatformSdk for MockSdk {
    fn identities(&self) -> &dyn IdentitiesApi {
        &self.identities
    }
}

struct MockConnector {
    connects: Rc<RefCell<Vec<ConnectOptions>>>,
    fail_fetch: bool,
}

impl MockConnector {
    fn new(fail_fetch: bool) -> (Self, Rc<RefCell<Vec<ConnectOptions>>>) {
        let connects = Rc::new(RefCell::new(Vec::new()));
        (
            Self {
                connects: connects.clone(),
                fail_fetch,
            },
            connects,
        )
    }
}

#[async_trait(?Send)]
impl SdkConnector for MockConnector {
    async fn connect(&self, options: &ConnectOptions) -> Result<Box<dyn PlatformSdk>, SdkError> {
        self.connects.borrow_mut().push(options.clone());
        Ok(Box::new(MockSdk {
            identities: MockIdentities {
                fail_fetch: self.fail_fetch,
            },
        }))
    }
}

fn select_get_identity(session: &mut Session) {
    session
        .select_operation(OperationKind::Query, "identity", "getIdentity")
        .unwrap();
}

#[test]
fn test_execute_records_success_outcome() {
    let rt = runtime();
    rt.block_on(async {
        let (connector, _connects) = MockConnector::new(false);
        let mut session = Session::new(registry(), Box::new(connector));
        select_get_identity(&mut session);
        session
            .form_state_mut()
            .unwrap()
            .set_text("id", "some-identity");

        let text = session.execute().await.unwrap();
        assert!(text.contains("some-identity"));

        let status = session.status().unwrap();
        assert_eq!(status.kind, StatusKind::Success);
        assert_eq!(status.message, "Completed");

        let result = session.last_result().unwrap();
        assert!(!result.is_error);
        assert_eq!(result.text, text);
        assert_eq!(session.current_result_text(), Some(result.text.as_str()));
        assert!(!session.is_busy());
    });
}

#[test]
fn test_execute_records_error_outcome_and_releases_busy() {
    let rt = runtime();
    rt.block_on(async {
        let (connector, _connects) = MockConnector::new(true);
        let mut session = Session::new(registry(), Box::new(connector));
        select_get_identity(&mut session);
        session
            .form_state_mut()
            .unwrap()
            .set_text("id", "some-identity");

        let err = session.execute().await.unwrap_err();
        assert_eq!(err.to_string(), "identity not found on network");

        let status = session.status().unwrap();
        assert_eq!(status.kind, StatusKind::Error);
        assert_eq!(status.message, "Error: identity not found on network");

        let result = session.last_result().unwrap();
        assert!(result.is_error);
        // The copy action only offers successful results.
        assert_eq!(session.current_result_text(), None);
        assert!(!session.is_busy());

        // The session stays usable after a failure.
        session.clear_result();
        assert!(session.last_result().is_none());
    });
}

#[test]
fn test_client_is_memoized_until_options_change() {
    let rt = runtime();
    rt.block_on(async {
        let (connector, connects) = MockConnector::new(false);
        let mut session = Session::new(registry(), Box::new(connector));
        select_get_identity(&mut session);
        session
            .form_state_mut()
            .unwrap()
            .set_text("id", "some-identity");

        session.execute().await.unwrap();
        session.execute().await.unwrap();
        assert_eq!(connects.borrow().len(), 1);

        session.set_trusted(true);
        session.execute().await.unwrap();
        assert_eq!(connects.borrow().len(), 2);
        assert!(connects.borrow()[1].trusted);

        // Reverting produces a different digest than the live one, so the
        // session reconnects rather than reviving the first client.
        session.set_trusted(false);
        session.execute().await.unwrap();
        assert_eq!(connects.borrow().len(), 3);
    });
}

#[test]
fn test_execute_without_selection_fails() {
    let rt = runtime();
    rt.block_on(async {
        let (connector, connects) = MockConnector::new(false);
        let mut session = Session::new(registry(), Box::new(connector));
        let err = session.execute().await.unwrap_err();
        assert!(matches!(err, SessionError::NothingSelected));
        assert!(connects.borrow().is_empty());
    });
}

#[test]
fn test_selecting_unknown_operation_fails() {
    let (connector, _connects) = MockConnector::new(false);
    let mut session = Session::new(registry(), Box::new(connector));
    let err = session
        .select_operation(OperationKind::Query, "identity", "getSomethingElse")
        .unwrap_err();
    assert!(matches!(err, SessionError::UnknownOperation(ref key) if key == "getSomethingElse"));
}

#[test]
fn test_missing_auth_input_fails_before_connecting() {
    let rt = runtime();
    rt.block_on(async {
        let (connector, connects) = MockConnector::new(false);
        let mut session = Session::new(registry(), Box::new(connector));
        session
            .select_operation(OperationKind::Transition, "identity", "identityCreditTransfer")
            .unwrap();
        {
            let state = session.form_state_mut().unwrap();
            state.set_text("recipientId", "recipient-identity");
            state.set_text("amount", "1000000");
        }

        let err = session.execute().await.unwrap_err();
        assert_eq!(err.to_string(), "Identity ID is required for this operation.");
        assert!(connects.borrow().is_empty());

        let status = session.status().unwrap();
        assert_eq!(status.kind, StatusKind::Error);
    });
}

#[test]
fn test_connection_changes_warn_about_reconnect() {
    let rt = runtime();
    rt.block_on(async {
        let (connector, _connects) = MockConnector::new(false);
        let mut session = Session::new(registry(), Box::new(connector));

        session.set_network(Network::Testnet);
        let status = session.status().unwrap();
        assert_eq!(status.kind, StatusKind::Warning);
        assert_eq!(
            status.message,
            "Connection settings changed. Reconnecting on next request."
        );

        // Executing clears the warning; re-applying the same settings does
        // not bring it back.
        select_get_identity(&mut session);
        session
            .form_state_mut()
            .unwrap()
            .set_text("id", "some-identity");
        session.execute().await.unwrap();
        assert_eq!(session.status().unwrap().kind, StatusKind::Success);

        session.set_network(Network::Testnet);
        session.set_trusted(false);
        session.apply_config(AdvancedOptions::default());
        assert_eq!(session.status().unwrap().kind, StatusKind::Success);

        session.apply_config(AdvancedOptions {
            retries: Some(5),
            ..AdvancedOptions::default()
        });
        assert_eq!(session.status().unwrap().kind, StatusKind::Warning);
    });
}

#[test]
fn test_transition_auth_requirements_are_derived_on_selection() {
    let (connector, _connects) = MockConnector::new(false);
    let mut session = Session::new(registry(), Box::new(connector));
    session
        .select_operation(OperationKind::Transition, "identity", "identityCreditTransfer")
        .unwrap();

    let auth = session.selection().unwrap().auth.as_ref().unwrap();
    let identity = auth.identity.as_ref().unwrap();
    assert!(identity.required);
    assert_eq!(identity.targets, vec!["senderId".to_string()]);
    let key = auth.private_key.as_ref().unwrap();
    assert!(key.allow_key_id);

    // Queries need nothing beyond their form inputs.
    session
        .select_operation(OperationKind::Query, "identity", "getIdentity")
        .unwrap();
    assert!(session.selection().unwrap().auth.is_none());
}
