//! Console session
//!
//! One [`Session`] owns everything the console mutates: the schema registry,
//! the current selection and its form, the authentication inputs, the
//! connection configuration, and the memoized connected client. State changes
//! happen only through named operations, and at most one execution is in
//! flight at a time.

use std::rc::Rc;

use rand::RngCore;
use serde_json::{Map, Value};
use sha2::{Digest, Sha256};
use thiserror::Error;
use tracing::{debug, info};

use crate::auth::{
    AuthError, AuthInputs, AuthRequirements, collect_auth_args, compute_auth_requirements,
};
use crate::dispatch::{DispatchError, dispatch};
use crate::form::{
    CollectError, ContestedResourceHandler, ControlValue, DocumentFieldsHandler, DynamicRegistry,
    FormModel, FormState, NoopHandler, collect_args,
};
use crate::normalize::{format_result, normalize};
use crate::schema::{FieldType, OperationKind, OperationSchema, Registry};
use crate::sdk::api::ContestedResourcesQuery;
use crate::sdk::{AdvancedOptions, ConnectOptions, Network, PlatformSdk, SdkConnector, SdkError};

#[derive(Debug, Error)]
pub enum SessionError {
    #[error("no operation selected")]
    NothingSelected,
    #[error("operation {0} not found")]
    UnknownOperation(String),
    #[error("an operation is already running")]
    Busy,
    #[error("no button action behind field {0}")]
    UnknownAction(String),
    #[error("{0}")]
    Action(String),
    #[error("invalid connection options: {0}")]
    Options(String),
    #[error(transparent)]
    Collect(#[from] CollectError),
    #[error(transparent)]
    Auth(#[from] AuthError),
    #[error(transparent)]
    Dispatch(#[from] DispatchError),
    #[error(transparent)]
    Sdk(#[from] SdkError),
}

/// Status banner state.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StatusKind {
    Loading,
    Success,
    Error,
    Warning,
}

#[derive(Debug, Clone)]
pub struct Status {
    pub kind: StatusKind,
    pub message: String,
}

impl Status {
    fn new(kind: StatusKind, message: impl Into<String>) -> Self {
        Self {
            kind,
            message: message.into(),
        }
    }
}

/// Outcome of the last execution, as shown in the result pane.
#[derive(Debug, Clone)]
pub struct ExecutionResult {
    pub text: String,
    pub is_error: bool,
}

/// The currently selected operation and its live form.
pub struct Selection {
    pub kind: OperationKind,
    pub category: String,
    pub operation: OperationSchema,
    pub auth: Option<AuthRequirements>,
    pub model: FormModel,
    pub state: FormState,
    /// Editor behind the operation's document-data field, when it has one.
    pub document_editor: Option<Rc<DocumentFieldsHandler>>,
    /// Picker behind the operation's index-values field, when it has one.
    pub resource_picker: Option<Rc<ContestedResourceHandler>>,
}

pub struct Session {
    registry: Registry,
    connector: Box<dyn SdkConnector>,
    client: Option<Box<dyn PlatformSdk>>,
    client_key: Option<[u8; 32]>,
    network: Network,
    trusted: bool,
    proof_requested: bool,
    advanced: AdvancedOptions,
    dynamic: DynamicRegistry,
    auth_inputs: AuthInputs,
    selection: Option<Selection>,
    last_result: Option<ExecutionResult>,
    status: Option<Status>,
    busy: bool,
}

impl Session {
    pub fn new(registry: Registry, connector: Box<dyn SdkConnector>) -> Self {
        Self {
            registry,
            connector,
            client: None,
            client_key: None,
            network: Network::default(),
            trusted: false,
            proof_requested: false,
            advanced: AdvancedOptions::default(),
            dynamic: DynamicRegistry::new(),
            auth_inputs: AuthInputs::default(),
            selection: None,
            last_result: None,
            status: None,
            busy: false,
        }
    }

    pub fn registry(&self) -> &Registry {
        &self.registry
    }

    /// Select an operation: builds its form, derives its authentication
    /// requirements, and wires up dynamic-field handlers.
    pub fn select_operation(
        &mut self,
        kind: OperationKind,
        category: &str,
        key: &str,
    ) -> Result<(), SessionError> {
        let operation = self
            .registry
            .operation(kind, category, key)
            .cloned()
            .ok_or_else(|| SessionError::UnknownOperation(key.to_string()))?;

        let model = FormModel::for_operation(&operation);
        let state = FormState::for_model(&model);
        let auth = compute_auth_requirements(&operation.key, &operation.sdk_params);

        self.dynamic = DynamicRegistry::new();
        let mut document_editor = None;
        let mut resource_picker = None;
        for field in &operation.inputs {
            if field.field_type != FieldType::Dynamic {
                continue;
            }
            match field.name.as_str() {
                "data" => {
                    let editor = Rc::new(if operation.key == "documentReplace" {
                        DocumentFieldsHandler::for_replace()
                    } else {
                        DocumentFieldsHandler::new()
                    });
                    self.dynamic.register(&field.name, editor.clone());
                    document_editor = Some(editor);
                }
                "indexValues" => {
                    let picker = Rc::new(ContestedResourceHandler::new());
                    self.dynamic.register(&field.name, picker.clone());
                    resource_picker = Some(picker);
                }
                _ => {
                    self.dynamic.register(&field.name, Rc::new(NoopHandler));
                }
            }
        }

        debug!(operation = %operation.key, "operation selected");
        self.selection = Some(Selection {
            kind,
            category: category.to_string(),
            operation,
            auth,
            model,
            state,
            document_editor,
            resource_picker,
        });
        Ok(())
    }

    pub fn selection(&self) -> Option<&Selection> {
        self.selection.as_ref()
    }

    /// Live form state of the current selection.
    pub fn form_state_mut(&mut self) -> Option<&mut FormState> {
        self.selection.as_mut().map(|sel| &mut sel.state)
    }

    pub fn auth_inputs_mut(&mut self) -> &mut AuthInputs {
        &mut self.auth_inputs
    }

    pub fn set_network(&mut self, network: Network) {
        if self.network != network {
            self.network = network;
            self.note_reconnect();
        }
    }

    pub fn set_trusted(&mut self, trusted: bool) {
        if self.trusted != trusted {
            self.trusted = trusted;
            self.note_reconnect();
        }
    }

    pub fn set_proof_requested(&mut self, requested: bool) {
        self.proof_requested = requested;
    }

    /// Apply advanced settings. They take effect on the next connection,
    /// since they change the client memo key.
    pub fn apply_config(&mut self, options: AdvancedOptions) {
        if self.advanced != options {
            self.advanced = options;
            self.note_reconnect();
        }
    }

    fn note_reconnect(&mut self) {
        self.status = Some(Status::new(
            StatusKind::Warning,
            "Connection settings changed. Reconnecting on next request.",
        ));
    }

    pub fn status(&self) -> Option<&Status> {
        self.status.as_ref()
    }

    pub fn is_busy(&self) -> bool {
        self.busy
    }

    pub fn last_result(&self) -> Option<&ExecutionResult> {
        self.last_result.as_ref()
    }

    /// Text for the copy action: the last successful result.
    pub fn current_result_text(&self) -> Option<&str> {
        self.last_result
            .as_ref()
            .filter(|r| !r.is_error)
            .map(|r| r.text.as_str())
    }

    pub fn clear_result(&mut self) {
        self.last_result = None;
    }

    fn connect_options(&self) -> ConnectOptions {
        let mut options = ConnectOptions {
            network: self.network,
            trusted: self.trusted,
            proofs: true,
            version: None,
            settings: None,
        };
        self.advanced.apply_to(&mut options);
        options
    }

    /// Connected client memoized by a digest of its options. Changing any
    /// option reconnects on next use.
    async fn ensure_client(&mut self) -> Result<(), SessionError> {
        let options = self.connect_options();
        let serialized =
            serde_json::to_vec(&options).map_err(|e| SessionError::Options(e.to_string()))?;
        let key: [u8; 32] = Sha256::digest(&serialized).into();

        if let Some(client) = &self.client
            && self.client_key == Some(key)
            && client.is_connected()
        {
            return Ok(());
        }

        if let Some(old) = self.client.take() {
            // Stale client; a failed disconnect is not actionable.
            let _ = old.disconnect().await;
        }
        info!(network = %options.network.as_str(), trusted = options.trusted, "connecting");
        self.client = Some(self.connector.connect(&options).await?);
        self.client_key = Some(key);
        Ok(())
    }

    /// Run the selected operation end to end: collect, authenticate,
    /// connect, dispatch, normalize. The outcome is also recorded in the
    /// status banner and result pane, and the busy flag is released on both
    /// paths.
    pub async fn execute(&mut self) -> Result<String, SessionError> {
        if self.busy {
            return Err(SessionError::Busy);
        }
        self.busy = true;
        let outcome = self.execute_inner().await;
        self.busy = false;
        match &outcome {
            Ok(text) => {
                self.status = Some(Status::new(StatusKind::Success, "Completed"));
                self.last_result = Some(ExecutionResult {
                    text: text.clone(),
                    is_error: false,
                });
            }
            Err(err) => {
                let message = format!("Error: {err}");
                self.status = Some(Status::new(StatusKind::Error, message.clone()));
                self.last_result = Some(ExecutionResult {
                    text: message,
                    is_error: true,
                });
            }
        }
        outcome
    }

    async fn execute_inner(&mut self) -> Result<String, SessionError> {
        let (kind, key, inputs, args, extras, proof) = {
            let sel = self.selection.as_ref().ok_or(SessionError::NothingSelected)?;
            let args = collect_args(&sel.operation, &sel.model, &sel.state, &self.dynamic)?;
            let mut extras = match &sel.auth {
                Some(requirements) => collect_auth_args(requirements, &self.auth_inputs)?,
                None => Map::new(),
            };
            // Replace flows carry the loaded document's revision alongside
            // the edited fields.
            if let Some(editor) = &sel.document_editor
                && let Some(revision) = editor.revision()
            {
                extras.insert("revision".to_string(), Value::from(revision));
            }
            let proof = self.proof_requested
                && self.registry.is_proof_capable(sel.kind, &sel.operation.key);
            (
                sel.kind,
                sel.operation.key.clone(),
                sel.operation.inputs.clone(),
                args,
                extras,
                proof,
            )
        };

        self.status = Some(Status::new(
            StatusKind::Loading,
            format!("Running {key}{}...", if proof { " (proof)" } else { "" }),
        ));

        self.ensure_client().await?;
        let client = self.client.as_deref().ok_or(SdkError::NotConnected)?;

        let response = dispatch(client, kind, &key, &inputs, &args, proof, extras).await?;
        let normalized = normalize(&response);
        Ok(format_result(normalized.as_ref()))
    }

    /// Run the side-effecting action behind one of the selected operation's
    /// `button` fields: fetch the document-type schema, load the existing
    /// document, generate entropy, or list contested resources. The outcome
    /// lands in the status banner like an execution does.
    pub async fn run_button_action(&mut self, field_name: &str) -> Result<(), SessionError> {
        if self.busy {
            return Err(SessionError::Busy);
        }
        self.busy = true;
        let outcome = self.button_action_inner(field_name).await;
        self.busy = false;
        match &outcome {
            Ok(message) => {
                self.status = Some(Status::new(StatusKind::Success, message.clone()));
            }
            Err(err) => {
                self.status = Some(Status::new(StatusKind::Error, format!("Error: {err}")));
            }
        }
        outcome.map(|_| ())
    }

    async fn button_action_inner(&mut self, field_name: &str) -> Result<String, SessionError> {
        let sel = self.selection.as_ref().ok_or(SessionError::NothingSelected)?;
        let declared = sel
            .operation
            .inputs
            .iter()
            .any(|field| field.name == field_name && field.field_type == FieldType::Button);
        if !declared {
            return Err(SessionError::UnknownAction(field_name.to_string()));
        }
        match field_name {
            "generateEntropy" => self.generate_entropy(),
            "fetchSchema" => self.fetch_document_schema().await,
            "loadDocument" => self.load_existing_document().await,
            "fetchContestedResources" => self.list_contested_resources().await,
            other => Err(SessionError::UnknownAction(other.to_string())),
        }
    }

    /// Required text input read from the live form, by the first matching
    /// field name. Errors name the field's label.
    fn required_text(&self, names: &[&str]) -> Result<String, SessionError> {
        let sel = self.selection.as_ref().ok_or(SessionError::NothingSelected)?;
        for name in names {
            if let Some(ControlValue::Text(text)) = sel.state.value(name)
                && !text.trim().is_empty()
            {
                return Ok(text.trim().to_string());
            }
        }
        let label = names
            .first()
            .and_then(|name| sel.model.control(name))
            .map(|control| control.label.clone())
            .unwrap_or_else(|| names.first().copied().unwrap_or_default().to_string());
        Err(SessionError::Action(format!("{label} is required")))
    }

    fn document_editor(&self) -> Result<Rc<DocumentFieldsHandler>, SessionError> {
        self.selection
            .as_ref()
            .and_then(|sel| sel.document_editor.clone())
            .ok_or_else(|| {
                SessionError::Action("This operation has no document data field.".to_string())
            })
    }

    fn generate_entropy(&mut self) -> Result<String, SessionError> {
        let mut bytes = [0u8; 32];
        rand::rngs::OsRng.fill_bytes(&mut bytes);
        let hex: String = bytes.iter().map(|b| format!("{b:02x}")).collect();
        if let Some(sel) = self.selection.as_mut() {
            sel.state.set_text("entropyHex", hex);
        }
        Ok("Entropy generated".to_string())
    }

    /// Fetch the contract and feed the named document type's schema to the
    /// document editor.
    async fn fetch_document_schema(&mut self) -> Result<String, SessionError> {
        let contract_id = self.required_text(&["contractId"])?;
        let document_type = self.required_text(&["documentType"])?;
        let editor = self.document_editor()?;

        self.status = Some(Status::new(
            StatusKind::Loading,
            "Fetching document schema...",
        ));
        self.ensure_client().await?;
        let client = self.client.as_deref().ok_or(SdkError::NotConnected)?;

        let response = client.contracts().fetch(&contract_id, false).await?;
        let contract = normalize(&response)
            .ok_or_else(|| SessionError::Action(format!("Contract {contract_id} not found")))?;
        let schema = contract
            .get("documentSchemas")
            .or_else(|| contract.get("documents"))
            .and_then(|schemas| schemas.get(&document_type))
            .cloned()
            .ok_or_else(|| {
                SessionError::Action(format!(
                    "Document type {document_type} not found on contract"
                ))
            })?;
        editor.load_schema(schema);
        Ok("Document schema loaded".to_string())
    }

    /// Fetch the existing document and feed its revision and field values to
    /// the document editor, for replace flows.
    async fn load_existing_document(&mut self) -> Result<String, SessionError> {
        let contract_id = self.required_text(&["contractId"])?;
        let document_type = self.required_text(&["documentType"])?;
        let document_id = self.required_text(&["documentId"])?;
        let editor = self.document_editor()?;

        self.status = Some(Status::new(StatusKind::Loading, "Loading document..."));
        self.ensure_client().await?;
        let client = self.client.as_deref().ok_or(SdkError::NotConnected)?;

        let response = client
            .documents()
            .get(&contract_id, &document_type, &document_id, false)
            .await?;
        let document = normalize(&response)
            .ok_or_else(|| SessionError::Action(format!("Document {document_id} not found")))?;
        let revision = document
            .get("$revision")
            .or_else(|| document.get("revision"))
            .and_then(Value::as_u64)
            .ok_or_else(|| {
                SessionError::Action("Fetched document has no revision".to_string())
            })?;
        // Field values live under `data` or, on raw document shapes, beside
        // the $-prefixed system properties.
        let data = if let Some(Value::Object(map)) = document.get("data") {
            map.clone()
        } else if let Value::Object(map) = document {
            map.into_iter()
                .filter(|(key, _)| !key.starts_with('$'))
                .collect()
        } else {
            Map::new()
        };
        editor.load_document(revision, data);
        Ok("Document loaded".to_string())
    }

    /// List contested resources for the entered index and feed the result
    /// set to the resource picker.
    async fn list_contested_resources(&mut self) -> Result<String, SessionError> {
        let contract_id = self.required_text(&["dataContractId", "contractId"])?;
        let document_type_name = self.required_text(&["documentTypeName"])?;
        let index_name = self.required_text(&["indexName"])?;
        let picker = self
            .selection
            .as_ref()
            .and_then(|sel| sel.resource_picker.clone())
            .ok_or_else(|| {
                SessionError::Action("This operation has no index values field.".to_string())
            })?;

        self.status = Some(Status::new(
            StatusKind::Loading,
            "Listing contested resources...",
        ));
        self.ensure_client().await?;
        let client = self.client.as_deref().ok_or(SdkError::NotConnected)?;

        let query = ContestedResourcesQuery {
            contract_id,
            document_type_name,
            index_name,
            ..ContestedResourcesQuery::default()
        };
        let response = client.voting().contested_resources(query, false).await?;
        let listed = match normalize(&response) {
            Some(Value::Array(items)) => items,
            Some(Value::Object(map)) => match map.get("contestedResources") {
                Some(Value::Array(items)) => items.clone(),
                _ => Vec::new(),
            },
            _ => Vec::new(),
        };
        let count = listed.len();
        picker.load_options(listed);
        Ok(format!("Listed {count} contested resources"))
    }
}
