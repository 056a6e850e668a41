//! Authentication requirements
//!
//! Transitions need some combination of an identity id, an asset-lock proof,
//! and a private key. [`compute_auth_requirements`] derives the combination
//! for an operation purely from a static per-operation table merged with the
//! operation's declared SDK parameter names; [`collect_auth_args`] validates
//! the panel inputs against it and produces the extra named arguments the
//! dispatcher folds in on top of the collected form values.

use std::collections::HashMap;

use once_cell::sync::Lazy;
use serde::Serialize;
use serde_json::{Map, Value};
use thiserror::Error;

/// Identity-id requirement: which named arguments receive the entered id.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct IdentityRequirement {
    pub required: bool,
    pub targets: Vec<String>,
}

/// Asset-lock-proof requirement.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct AssetLockRequirement {
    pub required: bool,
    pub target: String,
}

/// Private-key requirement, optionally accepting a `wif:keyId` suffix.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct PrivateKeyRequirement {
    pub required: bool,
    pub targets: Vec<String>,
    pub allow_key_id: bool,
    pub key_id_target: Option<String>,
}

/// Everything an operation needs beyond its form inputs.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct AuthRequirements {
    pub identity: Option<IdentityRequirement>,
    pub asset_lock_proof: Option<AssetLockRequirement>,
    pub private_key: Option<PrivateKeyRequirement>,
}

/// Raw values of the three authentication panel inputs.
#[derive(Debug, Clone, Default)]
pub struct AuthInputs {
    pub identity_id: String,
    pub asset_lock_proof: String,
    pub private_key: String,
}

#[derive(Debug, Error, PartialEq, Eq)]
pub enum AuthError {
    #[error("Identity ID is required for this operation.")]
    IdentityRequired,
    #[error("Asset Lock Proof is required for this operation.")]
    AssetLockProofRequired,
    #[error("Private key is required for this operation.")]
    PrivateKeyRequired,
    #[error("Key ID suffix is not supported for this operation.")]
    KeyIdNotSupported,
    #[error("Private key is required before specifying a key ID.")]
    KeyBeforeKeyId,
    #[error("Key ID suffix must be provided after \":\".")]
    EmptyKeyIdSuffix,
    #[error("Key ID suffix must be a non-negative integer.")]
    InvalidKeyIdSuffix,
}

fn identity(targets: &[&str]) -> Option<IdentityRequirement> {
    Some(IdentityRequirement {
        required: true,
        targets: targets.iter().map(|t| t.to_string()).collect(),
    })
}

fn asset_lock() -> Option<AssetLockRequirement> {
    Some(AssetLockRequirement {
        required: true,
        target: "assetLockProof".to_string(),
    })
}

fn asset_lock_key() -> Option<PrivateKeyRequirement> {
    Some(PrivateKeyRequirement {
        required: true,
        targets: vec!["assetLockPrivateKeyWif".to_string()],
        allow_key_id: false,
        key_id_target: None,
    })
}

fn signing_key(key_id_target: Option<&str>) -> Option<PrivateKeyRequirement> {
    Some(PrivateKeyRequirement {
        required: true,
        targets: vec!["privateKeyWif".to_string()],
        allow_key_id: true,
        key_id_target: key_id_target.map(str::to_string),
    })
}

/// Static requirements per transition key.
static TRANSITION_AUTH: Lazy<HashMap<&'static str, AuthRequirements>> = Lazy::new(|| {
    let mut table = HashMap::new();
    table.insert(
        "identityCreate",
        AuthRequirements {
            identity: None,
            asset_lock_proof: asset_lock(),
            private_key: asset_lock_key(),
        },
    );
    table.insert(
        "identityTopUp",
        AuthRequirements {
            identity: identity(&["identityId"]),
            asset_lock_proof: asset_lock(),
            private_key: asset_lock_key(),
        },
    );
    table.insert(
        "identityCreditTransfer",
        AuthRequirements {
            identity: identity(&["senderId"]),
            asset_lock_proof: None,
            private_key: signing_key(Some("keyId")),
        },
    );
    table.insert(
        "identityCreditWithdrawal",
        AuthRequirements {
            identity: identity(&["identityId"]),
            asset_lock_proof: None,
            private_key: signing_key(Some("keyId")),
        },
    );
    table.insert(
        "identityUpdate",
        AuthRequirements {
            identity: identity(&["identityId"]),
            asset_lock_proof: None,
            private_key: signing_key(None),
        },
    );
    for key in ["dataContractCreate", "dataContractUpdate"] {
        table.insert(
            key,
            AuthRequirements {
                identity: identity(&["ownerId"]),
                asset_lock_proof: None,
                private_key: signing_key(Some("keyId")),
            },
        );
    }
    for key in [
        "documentCreate",
        "documentReplace",
        "documentDelete",
        "documentTransfer",
        "documentSetPrice",
    ] {
        table.insert(
            key,
            AuthRequirements {
                identity: identity(&["ownerId"]),
                asset_lock_proof: None,
                private_key: signing_key(None),
            },
        );
    }
    table.insert(
        "documentPurchase",
        AuthRequirements {
            identity: identity(&["buyerId"]),
            asset_lock_proof: None,
            private_key: signing_key(None),
        },
    );
    for key in [
        "tokenMint",
        "tokenBurn",
        "tokenSetPriceForDirectPurchase",
        "tokenDirectPurchase",
        "tokenClaim",
        "tokenConfigUpdate",
    ] {
        table.insert(
            key,
            AuthRequirements {
                identity: identity(&["identityId"]),
                asset_lock_proof: None,
                private_key: signing_key(None),
            },
        );
    }
    table.insert(
        "tokenTransfer",
        AuthRequirements {
            identity: identity(&["senderId"]),
            asset_lock_proof: None,
            private_key: signing_key(None),
        },
    );
    table.insert(
        "tokenFreeze",
        AuthRequirements {
            identity: identity(&["freezerId"]),
            asset_lock_proof: None,
            private_key: signing_key(None),
        },
    );
    table.insert(
        "tokenUnfreeze",
        AuthRequirements {
            identity: identity(&["unfreezerId"]),
            asset_lock_proof: None,
            private_key: signing_key(None),
        },
    );
    table.insert(
        "tokenDestroyFrozen",
        AuthRequirements {
            identity: identity(&["destroyerId"]),
            asset_lock_proof: None,
            private_key: signing_key(None),
        },
    );
    table.insert(
        "masternodeVote",
        AuthRequirements {
            identity: None,
            asset_lock_proof: None,
            private_key: Some(PrivateKeyRequirement {
                required: true,
                targets: vec!["votingKeyWif".to_string()],
                allow_key_id: false,
                key_id_target: None,
            }),
        },
    );
    table
});

/// Derive the authentication requirements for an operation. Pure: only the
/// static table and the declared SDK parameter names feed in. Returns `None`
/// when the operation needs nothing beyond its form inputs.
pub fn compute_auth_requirements(
    operation_key: &str,
    sdk_params: &[String],
) -> Option<AuthRequirements> {
    let mut auth = TRANSITION_AUTH
        .get(operation_key)
        .cloned()
        .unwrap_or_default();

    let has = |name: &str| sdk_params.iter().any(|p| p == name);

    if has("assetLockProof") {
        match &mut auth.asset_lock_proof {
            Some(req) => req.required = true,
            None => auth.asset_lock_proof = asset_lock(),
        }
    }
    if has("assetLockProofPrivateKey") {
        match &mut auth.private_key {
            Some(req) => {
                req.required = true;
                if req.targets.is_empty() {
                    req.targets = vec!["assetLockPrivateKeyWif".to_string()];
                }
            }
            None => auth.private_key = asset_lock_key(),
        }
    }
    if has("identityId") {
        match &mut auth.identity {
            Some(req) => {
                req.required = true;
                if req.targets.is_empty() {
                    req.targets = vec!["identityId".to_string()];
                }
            }
            None => auth.identity = identity(&["identityId"]),
        }
    }

    // A requirement with nowhere to put its value collapses away.
    if auth.identity.as_ref().is_some_and(|r| r.targets.is_empty()) {
        auth.identity = None;
    }
    if auth
        .private_key
        .as_ref()
        .is_some_and(|r| r.targets.is_empty())
    {
        auth.private_key = None;
    }

    if auth.identity.is_none() && auth.asset_lock_proof.is_none() && auth.private_key.is_none() {
        return None;
    }
    Some(auth)
}

/// Validate the panel inputs against the requirements and produce the extra
/// named arguments. Optional inputs left blank simply contribute nothing.
pub fn collect_auth_args(
    requirements: &AuthRequirements,
    inputs: &AuthInputs,
) -> Result<Map<String, Value>, AuthError> {
    let mut extras = Map::new();

    if let Some(req) = &requirements.identity
        && !req.targets.is_empty()
    {
        let value = inputs.identity_id.trim();
        if value.is_empty() {
            if req.required {
                return Err(AuthError::IdentityRequired);
            }
        } else {
            for target in &req.targets {
                extras.insert(target.clone(), Value::String(value.to_string()));
            }
        }
    }

    if let Some(req) = &requirements.asset_lock_proof
        && req.required
    {
        let value = inputs.asset_lock_proof.trim();
        if value.is_empty() {
            return Err(AuthError::AssetLockProofRequired);
        }
        extras.insert(req.target.clone(), Value::String(value.to_string()));
    }

    if let Some(req) = &requirements.private_key
        && !req.targets.is_empty()
    {
        let raw = inputs.private_key.trim();
        if raw.is_empty() {
            if req.required {
                return Err(AuthError::PrivateKeyRequired);
            }
        } else {
            if !req.allow_key_id && raw.contains(':') {
                return Err(AuthError::KeyIdNotSupported);
            }
            let (key_value, key_id) = split_key_id(raw, req.allow_key_id)?;
            for target in &req.targets {
                extras.insert(target.clone(), Value::String(key_value.to_string()));
            }
            if let Some(id) = key_id {
                let target = req.key_id_target.as_deref().unwrap_or("keyId");
                extras.insert(target.to_string(), Value::Number(id.into()));
            }
        }
    }

    Ok(extras)
}

/// Split an optional `wif:keyId` suffix off the entered key.
fn split_key_id(raw: &str, allow_key_id: bool) -> Result<(&str, Option<u32>), AuthError> {
    if !allow_key_id {
        return Ok((raw, None));
    }
    let Some(colon) = raw.rfind(':') else {
        return Ok((raw, None));
    };
    if colon == 0 {
        return Err(AuthError::KeyBeforeKeyId);
    }
    let suffix = raw[colon + 1..].trim();
    if suffix.is_empty() {
        return Err(AuthError::EmptyKeyIdSuffix);
    }
    let key = raw[..colon].trim();
    if key.is_empty() {
        return Err(AuthError::KeyBeforeKeyId);
    }
    let id = suffix
        .parse::<u32>()
        .map_err(|_| AuthError::InvalidKeyIdSuffix)?;
    Ok((key, Some(id)))
}
