//! Dispatcher tests against a recording mock SDK

use std::cell::RefCell;
use std::rc::Rc;

use async_trait::async_trait;
use serde_json::{Map, Value, json};
use tokio::runtime::Runtime;

use evo_console::dispatch::{DispatchError, dispatch};
use evo_console::normalize::normalize;
use evo_console::schema::{FieldSchema, OperationKind};
use evo_console::sdk::api::{CreditTransferParams, KeyRequest};
use evo_console::sdk::{
    IdentitiesApi, IdentityHandle, KeyPurpose, PlatformSdk, RawValue, ResolvedKey, SdkResponse,
    SdkResult, SecurityLevel, SigningContext,
};

const WIF: &str = "XK6CFyvYUMvY9FVQLeYBZBFDbC4QuBLiqWMAFxBVZcMHJ5eARJtb";

fn runtime() -> Runtime {
    tokio::runtime::Builder::new_current_thread()
        .enable_all()
        .build()
        .unwrap()
}

fn field(name: &str, field_type: &str) -> FieldSchema {
    serde_json::from_value(json!({ "name": name, "type": field_type })).unwrap()
}

type CallLog = Rc<RefCell<Vec<String>>>;

struct MockIdentities {
    calls: CallLog,
    identity: Option<IdentityHandle>,
}

#[async_trait(?Send)]
impl IdentitiesApi for MockIdentities {
    async fn fetch(&self, id: &str, proof: bool) -> SdkResult {
        self.calls.borrow_mut().push(format!("fetch:{id}:{proof}"));
        if proof {
            Ok(SdkResponse::Proved {
                data: RawValue::from_json(&json!({ "id": id })),
                metadata: RawValue::from_json(&json!({ "height": 42 })),
                proof: RawValue::from_json(&json!({ "quorumHash": "ab12" })),
            })
        } else {
            Ok(SdkResponse::bare_json(&json!({ "id": id })))
        }
    }

    async fn keys(&self, request: KeyRequest, proof: bool) -> SdkResult {
        self.calls.borrow_mut().push(format!(
            "keys:{}:search={}:{proof}",
            request.identity_id,
            request.search_purpose_map.is_some()
        ));
        Ok(SdkResponse::bare_json(&json!([])))
    }

    async fn resolve(&self, id: &str) -> Result<Option<IdentityHandle>, evo_console::SdkError> {
        self.calls.borrow_mut().push(format!("resolve:{id}"));
        Ok(self.identity.clone())
    }

    async fn credit_transfer(
        &self,
        params: CreditTransferParams,
        ctx: &SigningContext,
    ) -> SdkResult {
        self.calls.borrow_mut().push(format!(
            "creditTransfer:{}->{}:{}:key={}",
            params.sender_id, params.recipient_id, params.amount, ctx.key.id
        ));
        Ok(SdkResponse::bare_json(&json!({ "transitionHash": "deadbeef" })))
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

fn mock_sdk(identity: Option<IdentityHandle>) -> (MockSdk, CallLog) {
    let calls: CallLog = Rc::new(RefCell::new(Vec::new()));
    let sdk = MockSdk {
        identities: MockIdentities {
            calls: calls.clone(),
            identity,
        },
    };
    (sdk, calls)
}

fn signing_identity() -> IdentityHandle {
    IdentityHandle {
        id: "5rvkgL9BDyrSkkSEPNFUoKHssjbFHI2dGy2QSEyVbT2A".to_string(),
        revision: 1,
        keys: vec![ResolvedKey {
            id: 0,
            purpose: KeyPurpose::Authentication,
            security_level: SecurityLevel::High,
            disabled: false,
        }],
    }
}

#[test]
fn test_get_identity_passes_proof_flag_through() {
    let rt = runtime();
    rt.block_on(async {
        let (sdk, calls) = mock_sdk(None);
        let inputs = vec![field("id", "text")];
        let args = vec![Some(json!("some-identity"))];

        let response = dispatch(
            &sdk,
            OperationKind::Query,
            "getIdentity",
            &inputs,
            &args,
            false,
            Map::new(),
        )
        .await
        .unwrap();
        assert_eq!(normalize(&response), Some(json!({ "id": "some-identity" })));

        let response = dispatch(
            &sdk,
            OperationKind::Query,
            "getIdentity",
            &inputs,
            &args,
            true,
            Map::new(),
        )
        .await
        .unwrap();
        assert_eq!(
            normalize(&response),
            Some(json!({
                "data": { "id": "some-identity" },
                "metadata": { "height": 42 },
                "proof": { "quorumHash": "ab12" },
            }))
        );

        assert_eq!(
            *calls.borrow(),
            vec!["fetch:some-identity:false", "fetch:some-identity:true"]
        );
    });
}

#[test]
fn test_identity_key_search_rejects_proof() {
    let rt = runtime();
    rt.block_on(async {
        let (sdk, calls) = mock_sdk(None);
        let inputs = vec![
            field("identityId", "text"),
            field("keyRequestType", "select"),
            field("searchPurposeMap", "json"),
        ];
        let args = vec![
            Some(json!("some-identity")),
            Some(json!("search")),
            Some(json!({ "0": { "0": "currentKeyOfKindRequest" } })),
        ];

        let err = dispatch(
            &sdk,
            OperationKind::Query,
            "getIdentityKeys",
            &inputs,
            &args,
            true,
            Map::new(),
        )
        .await
        .unwrap_err();
        assert_eq!(
            err.to_string(),
            "Identity key search does not support proof responses. Disable proof to search by purpose."
        );
        // Rejected before any SDK call.
        assert!(calls.borrow().is_empty());

        // Without proof the search map goes through.
        dispatch(
            &sdk,
            OperationKind::Query,
            "getIdentityKeys",
            &inputs,
            &args,
            false,
            Map::new(),
        )
        .await
        .unwrap();
        assert_eq!(*calls.borrow(), vec!["keys:some-identity:search=true:false"]);
    });
}

#[test]
fn test_credit_transfer_signs_with_resolved_key() {
    let rt = runtime();
    rt.block_on(async {
        let (sdk, calls) = mock_sdk(Some(signing_identity()));
        let inputs = vec![field("recipientId", "text"), field("amount", "text")];
        let args = vec![Some(json!("recipient-identity")), Some(json!("1000000"))];
        let mut extras = Map::new();
        extras.insert("senderId".to_string(), json!("sender-identity"));
        extras.insert("privateKeyWif".to_string(), json!(WIF));

        let response = dispatch(
            &sdk,
            OperationKind::Transition,
            "identityCreditTransfer",
            &inputs,
            &args,
            false,
            extras,
        )
        .await
        .unwrap();

        assert_eq!(
            normalize(&response),
            Some(json!({
                "status": "success",
                "message": "Credits transferred",
                "result": { "transitionHash": "deadbeef" },
            }))
        );
        assert_eq!(
            *calls.borrow(),
            vec![
                "resolve:sender-identity",
                "creditTransfer:sender-identity->recipient-identity:1000000:key=0",
            ]
        );
    });
}

#[test]
fn test_signing_fails_when_identity_is_missing() {
    let rt = runtime();
    rt.block_on(async {
        let (sdk, calls) = mock_sdk(None);
        let inputs = vec![field("recipientId", "text"), field("amount", "text")];
        let args = vec![Some(json!("recipient-identity")), Some(json!("1000000"))];
        let mut extras = Map::new();
        extras.insert("senderId".to_string(), json!("sender-identity"));
        extras.insert("privateKeyWif".to_string(), json!(WIF));

        let err = dispatch(
            &sdk,
            OperationKind::Transition,
            "identityCreditTransfer",
            &inputs,
            &args,
            false,
            extras,
        )
        .await
        .unwrap_err();
        assert_eq!(err.to_string(), "identity not found");
        assert_eq!(*calls.borrow(), vec!["resolve:sender-identity"]);
    });
}

#[test]
fn test_signing_fails_without_a_strong_enough_key() {
    let rt = runtime();
    rt.block_on(async {
        let mut identity = signing_identity();
        identity.keys[0].security_level = SecurityLevel::Medium;
        let (sdk, _calls) = mock_sdk(Some(identity));
        let inputs = vec![field("recipientId", "text"), field("amount", "text")];
        let args = vec![Some(json!("recipient-identity")), Some(json!("1000000"))];
        let mut extras = Map::new();
        extras.insert("senderId".to_string(), json!("sender-identity"));
        extras.insert("privateKeyWif".to_string(), json!(WIF));

        let err = dispatch(
            &sdk,
            OperationKind::Transition,
            "identityCreditTransfer",
            &inputs,
            &args,
            false,
            extras,
        )
        .await
        .unwrap_err();
        assert_eq!(err.to_string(), "no suitable signing key");
    });
}

#[test]
fn test_document_replace_requires_a_revision() {
    let rt = runtime();
    rt.block_on(async {
        let (sdk, _calls) = mock_sdk(Some(signing_identity()));
        let inputs = vec![
            field("contractId", "text"),
            field("documentType", "text"),
            field("documentId", "text"),
            field("ownerId", "text"),
            field("data", "dynamic"),
        ];
        let args = vec![
            Some(json!("contract-id")),
            Some(json!("note")),
            Some(json!("document-id")),
            Some(json!("owner-identity")),
            Some(json!({ "message": "hello" })),
        ];
        let mut extras = Map::new();
        extras.insert("privateKeyWif".to_string(), json!(WIF));

        let err = dispatch(
            &sdk,
            OperationKind::Transition,
            "documentReplace",
            &inputs,
            &args,
            false,
            extras,
        )
        .await
        .unwrap_err();
        assert!(matches!(err, DispatchError::MissingField(ref name) if name == "revision"));
    });
}

#[test]
fn test_address_transitions_fail_before_any_sdk_call() {
    let rt = runtime();
    rt.block_on(async {
        let (sdk, calls) = mock_sdk(None);
        for key in [
            "addressCreate",
            "addressTopUp",
            "addressWithdraw",
            "addressTransfer",
            "addressFreeze",
            "addressUnfreeze",
        ] {
            let err = dispatch(
                &sdk,
                OperationKind::Transition,
                key,
                &[],
                &Vec::new(),
                false,
                Map::new(),
            )
            .await
            .unwrap_err();
            assert_eq!(
                err.to_string(),
                "Platform address transitions are not implemented in this console."
            );
        }
        assert!(calls.borrow().is_empty());
    });
}

#[test]
fn test_unknown_operation_is_rejected() {
    let rt = runtime();
    rt.block_on(async {
        let (sdk, _calls) = mock_sdk(None);
        let err = dispatch(
            &sdk,
            OperationKind::Query,
            "getSomethingElse",
            &[],
            &Vec::new(),
            false,
            Map::new(),
        )
        .await
        .unwrap_err();
        assert_eq!(
            err.to_string(),
            "Operation getSomethingElse is not supported in this console."
        );
    });
}

#[test]
fn test_unhandled_domain_reports_unsupported_method() {
    let rt = runtime();
    rt.block_on(async {
        // The mock only provides the identities group; everything else falls
        // back to the unsupported defaults.
        let (sdk, _calls) = mock_sdk(None);
        let err = dispatch(
            &sdk,
            OperationKind::Query,
            "getStatus",
            &[],
            &Vec::new(),
            false,
            Map::new(),
        )
        .await
        .unwrap_err();
        assert_eq!(
            err.to_string(),
            "SDK method system.status is not available on this connection"
        );
    });
}

#[test]
fn test_missing_required_field_names_it() {
    let rt = runtime();
    rt.block_on(async {
        let (sdk, _calls) = mock_sdk(None);
        let inputs = vec![field("id", "text")];
        let args: Vec<Option<Value>> = vec![None];
        let err = dispatch(
            &sdk,
            OperationKind::Query,
            "getIdentity",
            &inputs,
            &args,
            false,
            Map::new(),
        )
        .await
        .unwrap_err();
        assert!(matches!(err, DispatchError::MissingField(ref name) if name == "id"));
    });
}
