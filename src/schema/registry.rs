//! Registry of supported operations
//!
//! The definition document is fetched from the deployment (or supplied by the
//! embedder) and cannot be trusted to match what this console actually
//! supports: it drifts ahead of the wrapped SDK. Everything is therefore
//! filtered against explicit allow-lists before use. Unknown operation keys
//! and unknown field types are silently dropped rather than rendered.

use std::collections::{BTreeMap, HashSet};

use once_cell::sync::Lazy;
use serde::{Deserialize, Serialize};
use serde_json::Value;
use thiserror::Error;
use tracing::{debug, warn};

use super::definitions::{
    DependsOn, FieldSchema, FieldType, OperationKind, OperationSchema, SelectOption,
};

/// Query operations the console knows how to dispatch.
pub static SUPPORTED_QUERIES: Lazy<HashSet<&'static str>> = Lazy::new(|| {
    [
        // Identity
        "getIdentity",
        "getIdentityUnproved",
        "getIdentityKeys",
        "getIdentitiesContractKeys",
        "getIdentityNonce",
        "getIdentityContractNonce",
        "getIdentityBalance",
        "getIdentitiesBalances",
        "getIdentityBalanceAndRevision",
        "getIdentityByPublicKeyHash",
        "getIdentityByNonUniquePublicKeyHash",
        "getIdentityTokenBalances",
        "getIdentitiesTokenBalances",
        "getIdentityTokenInfos",
        "getIdentitiesTokenInfos",
        // Data contracts
        "getDataContract",
        "getDataContractHistory",
        "getDataContracts",
        // Documents
        "getDocuments",
        "getDocument",
        // DPNS
        "getDpnsUsername",
        "getDpnsUsernames",
        "getDpnsUsernameByName",
        "dpnsResolve",
        "dpnsCheckAvailability",
        "dpnsConvertToHomographSafe",
        "dpnsIsValidUsername",
        "dpnsIsContestedUsername",
        // Epoch
        "getEpochsInfo",
        "getCurrentEpoch",
        "getFinalizedEpochInfos",
        "getEvonodesProposedEpochBlocksByIds",
        "getEvonodesProposedEpochBlocksByRange",
        // Voting & contested resources
        "getContestedResources",
        "getContestedResourceVotersForIdentity",
        "getContestedResourceVoteState",
        "getContestedResourceIdentityVotes",
        "getVotePollsByEndDate",
        // Protocol
        "getProtocolVersionUpgradeState",
        "getProtocolVersionUpgradeVoteStatus",
        // Tokens
        "getTokenStatuses",
        "getTokenDirectPurchasePrices",
        "getTokenContractInfo",
        "getTokenPerpetualDistributionLastClaim",
        "getTokenTotalSupply",
        "getTokenPriceByContract",
        // Groups
        "getGroupInfo",
        "getGroupInfos",
        "getGroupMembers",
        "getGroupActions",
        "getGroupActionSigners",
        "getIdentityGroups",
        "getGroupsDataContracts",
        // System
        "getStatus",
        "getCurrentQuorumsInfo",
        "getPrefundedSpecializedBalance",
        "getTotalCreditsInPlatform",
        "getPathElements",
        "waitForStateTransitionResult",
    ]
    .into_iter()
    .collect()
});

/// State transitions the console knows how to dispatch. The six platform
/// address transitions are allow-listed so they remain selectable, but their
/// handlers fail immediately with an explanatory message.
pub static SUPPORTED_TRANSITIONS: Lazy<HashSet<&'static str>> = Lazy::new(|| {
    [
        "identityCreate",
        "identityTopUp",
        "identityCreditTransfer",
        "identityCreditWithdrawal",
        "identityUpdate",
        "dataContractCreate",
        "dataContractUpdate",
        "documentCreate",
        "documentReplace",
        "documentDelete",
        "documentTransfer",
        "documentPurchase",
        "documentSetPrice",
        "tokenMint",
        "tokenBurn",
        "tokenTransfer",
        "tokenFreeze",
        "tokenUnfreeze",
        "tokenDestroyFrozen",
        "tokenSetPriceForDirectPurchase",
        "tokenDirectPurchase",
        "tokenClaim",
        "tokenConfigUpdate",
        "masternodeVote",
        // Platform addresses (not implemented in this console)
        "addressCreate",
        "addressTopUp",
        "addressWithdraw",
        "addressTransfer",
        "addressFreeze",
        "addressUnfreeze",
    ]
    .into_iter()
    .collect()
});

/// Queries with a proof-carrying variant.
pub static PROOF_CAPABLE: Lazy<HashSet<&'static str>> = Lazy::new(|| {
    [
        "getIdentity",
        "getIdentityKeys",
        "getIdentitiesContractKeys",
        "getIdentityNonce",
        "getIdentityContractNonce",
        "getIdentityBalance",
        "getIdentitiesBalances",
        "getIdentityBalanceAndRevision",
        "getIdentityByPublicKeyHash",
        "getIdentityByNonUniquePublicKeyHash",
        "getIdentityTokenBalances",
        "getIdentitiesTokenBalances",
        "getIdentityTokenInfos",
        "getIdentitiesTokenInfos",
        "getDataContract",
        "getDataContractHistory",
        "getDataContracts",
        "getDocuments",
        "getDocument",
        "getDpnsUsername",
        "getDpnsUsernames",
        "getDpnsUsernameByName",
        "getEpochsInfo",
        "getCurrentEpoch",
        "getFinalizedEpochInfos",
        "getEvonodesProposedEpochBlocksByIds",
        "getEvonodesProposedEpochBlocksByRange",
        "getContestedResources",
        "getContestedResourceVotersForIdentity",
        "getContestedResourceVoteState",
        "getContestedResourceIdentityVotes",
        "getVotePollsByEndDate",
        "getProtocolVersionUpgradeState",
        "getProtocolVersionUpgradeVoteStatus",
        "getTokenStatuses",
        "getTokenDirectPurchasePrices",
        "getTokenContractInfo",
        "getTokenPerpetualDistributionLastClaim",
        "getTokenTotalSupply",
        "getGroupInfo",
        "getGroupInfos",
        "getGroupMembers",
        "getGroupActions",
        "getGroupActionSigners",
        "getIdentityGroups",
        "getGroupsDataContracts",
        "getPrefundedSpecializedBalance",
        "getTotalCreditsInPlatform",
        "getPathElements",
    ]
    .into_iter()
    .collect()
});

/// Errors raised while loading or parsing the definition document.
#[derive(Debug, Error)]
pub enum SchemaError {
    #[error("failed to parse definition document: {0}")]
    Parse(String),
    #[error("failed to fetch definition document: {0}")]
    Http(String),
}

// ---------------------------------------------------------------------------
// Raw serde shapes of the fetched definition document
// ---------------------------------------------------------------------------

#[derive(Debug, Default, Deserialize)]
struct RawDocument {
    #[serde(default)]
    queries: BTreeMap<String, RawGroup>,
    #[serde(default)]
    transitions: BTreeMap<String, RawGroup>,
}

#[derive(Debug, Default, Deserialize)]
struct RawGroup {
    #[serde(default)]
    label: Option<String>,
    // The entries key is `queries` or `transitions` depending on the class.
    #[serde(default, alias = "transitions")]
    queries: BTreeMap<String, RawOperation>,
}

#[derive(Debug, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
struct RawOperation {
    #[serde(default)]
    label: Option<String>,
    #[serde(default)]
    description: Option<String>,
    #[serde(default)]
    inputs: Vec<RawField>,
    #[serde(default, alias = "sdk_params")]
    sdk_params: Vec<RawParam>,
}

#[derive(Debug, Deserialize)]
struct RawParam {
    name: String,
}

#[derive(Debug, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
struct RawField {
    #[serde(default)]
    name: Option<String>,
    #[serde(default)]
    label: Option<String>,
    #[serde(default, rename = "type")]
    field_type: Option<String>,
    #[serde(default)]
    required: bool,
    #[serde(default)]
    min: Option<f64>,
    #[serde(default)]
    max: Option<f64>,
    #[serde(default)]
    step: Option<f64>,
    #[serde(default)]
    rows: Option<u32>,
    #[serde(default)]
    options: Vec<RawOption>,
    #[serde(default)]
    placeholder: Option<String>,
    #[serde(default)]
    help: Option<String>,
    #[serde(default)]
    value: Option<Value>,
    #[serde(default)]
    default: Option<Value>,
    #[serde(default)]
    depends_on: Option<RawDependsOn>,
}

#[derive(Debug, Deserialize)]
struct RawOption {
    value: Value,
    #[serde(default)]
    label: Option<String>,
}

#[derive(Debug, Deserialize)]
struct RawDependsOn {
    field: String,
    #[serde(default)]
    values: Option<Value>,
    #[serde(default)]
    value: Option<Value>,
}

// ---------------------------------------------------------------------------
// Validated registry
// ---------------------------------------------------------------------------

/// One category of operations (e.g. "identity", "token").
#[derive(Debug, Clone, Serialize)]
pub struct CategoryGroup {
    pub label: String,
    pub operations: BTreeMap<String, OperationSchema>,
}

/// Pure lookup over the pre-validated definition document.
///
/// Built once at load time; every surviving operation has an allow-listed key
/// and only supported field types.
#[derive(Debug, Clone, Serialize)]
pub struct Registry {
    queries: BTreeMap<String, CategoryGroup>,
    transitions: BTreeMap<String, CategoryGroup>,
}

impl Registry {
    /// Parse and filter a definition document from JSON text.
    pub fn from_json(json: &str) -> Result<Self, SchemaError> {
        let raw: RawDocument =
            serde_json::from_str(json).map_err(|e| SchemaError::Parse(e.to_string()))?;
        Ok(Self::from_raw(raw))
    }

    /// Registry containing only the hardcoded fallback category, for use when
    /// the definition document cannot be fetched at all.
    pub fn fallback() -> Self {
        let mut registry = Self {
            queries: BTreeMap::new(),
            transitions: BTreeMap::new(),
        };
        registry
            .queries
            .insert("identity".to_string(), fallback_identity_group());
        registry
    }

    fn from_raw(raw: RawDocument) -> Self {
        let mut registry = Self {
            queries: filter_groups(raw.queries, OperationKind::Query),
            transitions: filter_groups(raw.transitions, OperationKind::Transition),
        };
        // The identity category is the console's bread and butter; keep it
        // usable even when the served definition file is stale.
        registry
            .queries
            .entry("identity".to_string())
            .or_insert_with(fallback_identity_group);
        registry
    }

    fn groups(&self, kind: OperationKind) -> &BTreeMap<String, CategoryGroup> {
        match kind {
            OperationKind::Query => &self.queries,
            OperationKind::Transition => &self.transitions,
        }
    }

    /// Category keys and labels, sorted by label.
    pub fn categories(&self, kind: OperationKind) -> Vec<(&str, &str)> {
        let mut entries: Vec<(&str, &str)> = self
            .groups(kind)
            .iter()
            .map(|(key, group)| (key.as_str(), group.label.as_str()))
            .collect();
        entries.sort_by(|a, b| a.1.cmp(b.1));
        entries
    }

    /// Operations of a category, sorted by display label.
    pub fn operations(&self, kind: OperationKind, category: &str) -> Vec<&OperationSchema> {
        let mut ops: Vec<&OperationSchema> = self
            .groups(kind)
            .get(category)
            .map(|group| group.operations.values().collect())
            .unwrap_or_default();
        ops.sort_by(|a, b| a.display_label().cmp(b.display_label()));
        ops
    }

    /// Look up a single operation schema.
    pub fn operation(
        &self,
        kind: OperationKind,
        category: &str,
        key: &str,
    ) -> Option<&OperationSchema> {
        self.groups(kind)
            .get(category)
            .and_then(|group| group.operations.get(key))
    }

    /// Whether a query operation has a proof-carrying variant. Transitions
    /// are never proof-capable.
    pub fn is_proof_capable(&self, kind: OperationKind, key: &str) -> bool {
        kind == OperationKind::Query && PROOF_CAPABLE.contains(key)
    }

    pub fn is_empty(&self) -> bool {
        self.queries.is_empty() && self.transitions.is_empty()
    }
}

fn filter_groups(
    raw: BTreeMap<String, RawGroup>,
    kind: OperationKind,
) -> BTreeMap<String, CategoryGroup> {
    let allow: &HashSet<&'static str> = match kind {
        OperationKind::Query => &SUPPORTED_QUERIES,
        OperationKind::Transition => &SUPPORTED_TRANSITIONS,
    };
    let mut groups = BTreeMap::new();
    for (category_key, group) in raw {
        let mut operations = BTreeMap::new();
        for (op_key, op) in group.queries {
            if !allow.contains(op_key.as_str()) {
                debug!(operation = %op_key, "dropping operation not in allow-list");
                continue;
            }
            match validate_operation(&op_key, op) {
                Ok(schema) => {
                    operations.insert(op_key, schema);
                }
                Err(reason) => {
                    warn!(operation = %op_key, %reason, "dropping operation");
                }
            }
        }
        if operations.is_empty() {
            continue;
        }
        groups.insert(
            category_key.clone(),
            CategoryGroup {
                label: group.label.unwrap_or(category_key),
                operations,
            },
        );
    }
    groups
}

fn validate_operation(key: &str, raw: RawOperation) -> Result<OperationSchema, String> {
    let mut inputs = Vec::with_capacity(raw.inputs.len());
    let mut seen_names: Vec<String> = Vec::new();
    for (index, field) in raw.inputs.into_iter().enumerate() {
        let type_name = field.field_type.as_deref().unwrap_or("text");
        let field_type = FieldType::parse(type_name)
            .ok_or_else(|| format!("unsupported input type '{type_name}'"))?;
        let name = field
            .name
            .clone()
            .unwrap_or_else(|| format!("param_{index}"));
        let depends_on = match field.depends_on {
            Some(raw_dep) => {
                // A dependency may only reference an input declared earlier
                // in the same operation.
                if !seen_names.iter().any(|n| n == &raw_dep.field) {
                    return Err(format!(
                        "field '{name}' depends on undeclared field '{}'",
                        raw_dep.field
                    ));
                }
                Some(DependsOn {
                    field: raw_dep.field,
                    values: dependency_values(raw_dep.values.or(raw_dep.value)),
                })
            }
            None => None,
        };
        seen_names.push(name.clone());
        inputs.push(FieldSchema {
            name,
            label: field.label,
            field_type,
            required: field.required,
            min: field.min,
            max: field.max,
            step: field.step,
            rows: field.rows,
            options: field
                .options
                .into_iter()
                .map(|opt| SelectOption {
                    value: scalar_to_string(&opt.value),
                    label: opt.label,
                })
                .collect(),
            placeholder: field.placeholder,
            help: field.help,
            value: field.value.or(field.default),
            depends_on,
        });
    }
    Ok(OperationSchema {
        key: key.to_string(),
        label: raw.label,
        description: raw.description,
        inputs,
        sdk_params: raw.sdk_params.into_iter().map(|p| p.name).collect(),
    })
}

/// Dependency values are string-compared against live control values, so
/// scalars are stringified up front.
fn dependency_values(raw: Option<Value>) -> Vec<String> {
    match raw {
        Some(Value::Array(items)) => items.iter().map(scalar_to_string).collect(),
        Some(value) => vec![scalar_to_string(&value)],
        None => Vec::new(),
    }
}

fn scalar_to_string(value: &Value) -> String {
    match value {
        Value::String(s) => s.clone(),
        Value::Bool(b) => b.to_string(),
        Value::Number(n) => n.to_string(),
        Value::Null => String::new(),
        other => other.to_string(),
    }
}

fn fallback_identity_group() -> CategoryGroup {
    let id_field = FieldSchema {
        name: "id".to_string(),
        label: Some("Identity ID".to_string()),
        field_type: FieldType::Text,
        required: true,
        min: None,
        max: None,
        step: None,
        rows: None,
        options: Vec::new(),
        placeholder: Some("Base58 identity identifier".to_string()),
        help: None,
        value: None,
        depends_on: None,
    };
    let mut operations = BTreeMap::new();
    operations.insert(
        "getIdentity".to_string(),
        OperationSchema {
            key: "getIdentity".to_string(),
            label: Some("Get Identity".to_string()),
            description: Some("Fetch an identity by its identifier".to_string()),
            inputs: vec![id_field.clone()],
            sdk_params: Vec::new(),
        },
    );
    operations.insert(
        "getIdentityBalance".to_string(),
        OperationSchema {
            key: "getIdentityBalance".to_string(),
            label: Some("Get Identity Balance".to_string()),
            description: Some("Fetch an identity's credit balance".to_string()),
            inputs: vec![FieldSchema {
                name: "identityId".to_string(),
                ..id_field
            }],
            sdk_params: Vec::new(),
        },
    );
    CategoryGroup {
        label: "Identity".to_string(),
        operations,
    }
}
