//! Operation dispatch
//!
//! One typed handler per supported operation, grouped into per-category
//! lookup tables so coverage is checkable: every allow-listed key has a
//! handler, and an unknown key fails before any SDK call. Handlers convert
//! the positional collected arguments into a named map (authentication
//! extras win on conflict), apply per-field conversions, and invoke exactly
//! one SDK method.

pub mod addresses;
pub mod contracts;
pub mod documents;
pub mod dpns;
pub mod epoch;
pub mod group;
pub mod identities;
pub mod system;
pub mod tokens;
pub mod voting;

use std::collections::HashMap;
use std::future::Future;
use std::pin::Pin;

use bigdecimal::BigDecimal;
use serde_json::{Map, Value};
use thiserror::Error;
use tracing::debug;

use crate::form::CollectedArgs;
use crate::schema::{FieldSchema, OperationKind};
use crate::sdk::{
    PlatformSdk, SdkError, SdkResponse, SecurityLevel, Signer, SigningContext, RawValue,
};

#[derive(Debug, Error)]
pub enum DispatchError {
    #[error("Operation {0} is not supported in this console.")]
    NotSupported(String),
    /// Allow-listed but permanently unimplemented (the address stubs).
    #[error("{0}")]
    Unimplemented(&'static str),
    #[error("missing required field: {0}")]
    MissingField(String),
    #[error("invalid JSON in field {0}")]
    InvalidJson(String),
    #[error("invalid value for field {field}: {reason}")]
    InvalidField { field: String, reason: String },
    /// Failed lookup ahead of a mutation, or an unsatisfiable request shape.
    #[error("{0}")]
    Precondition(String),
    #[error(transparent)]
    Sdk(#[from] SdkError),
}

/// Arguments by field name: positional collected values keyed by their
/// schema names, with authentication extras folded in on top.
#[derive(Debug, Clone, Default)]
pub struct NamedArgs {
    values: Map<String, Value>,
}

impl NamedArgs {
    pub fn new(inputs: &[FieldSchema], args: &CollectedArgs, extras: Map<String, Value>) -> Self {
        let mut values = Map::new();
        for (field, value) in inputs.iter().zip(args) {
            if let Some(value) = value {
                values.insert(field.name.clone(), value.clone());
            }
        }
        // Auth-derived values win on conflict.
        for (name, value) in extras {
            values.insert(name, value);
        }
        Self { values }
    }

    /// Present and non-null.
    fn get(&self, name: &str) -> Option<&Value> {
        self.values.get(name).filter(|v| !v.is_null())
    }

    pub fn str_of(&self, name: &str) -> Result<&str, DispatchError> {
        self.get(name)
            .and_then(Value::as_str)
            .filter(|s| !s.is_empty())
            .ok_or_else(|| DispatchError::MissingField(name.to_string()))
    }

    /// First present value among aliases, e.g. `dataContractId` falling back
    /// to `contractId`.
    pub fn first_str(&self, names: &[&str]) -> Result<&str, DispatchError> {
        names
            .iter()
            .find_map(|name| self.get(name).and_then(Value::as_str).filter(|s| !s.is_empty()))
            .ok_or_else(|| DispatchError::MissingField(names[0].to_string()))
    }

    pub fn opt_str(&self, name: &str) -> Option<String> {
        self.get(name)
            .and_then(Value::as_str)
            .filter(|s| !s.is_empty())
            .map(str::to_string)
    }

    pub fn opt_u32(&self, name: &str) -> Option<u32> {
        self.get(name)
            .and_then(Value::as_u64)
            .and_then(|n| u32::try_from(n).ok())
    }

    pub fn opt_u64(&self, name: &str) -> Option<u64> {
        self.get(name).and_then(Value::as_u64)
    }

    pub fn opt_bool(&self, name: &str) -> Option<bool> {
        self.get(name).and_then(Value::as_bool)
    }

    pub fn bool_or(&self, name: &str, default: bool) -> bool {
        self.opt_bool(name).unwrap_or(default)
    }

    pub fn u32_or(&self, name: &str, default: u32) -> u32 {
        self.opt_u32(name).unwrap_or(default)
    }

    pub fn opt_value(&self, name: &str) -> Option<Value> {
        self.get(name).cloned()
    }

    pub fn required_value(&self, name: &str) -> Result<Value, DispatchError> {
        self.get(name)
            .cloned()
            .ok_or_else(|| DispatchError::MissingField(name.to_string()))
    }

    /// Non-empty string elements, blanks dropped.
    pub fn string_array(&self, name: &str) -> Vec<String> {
        match self.get(name) {
            Some(Value::Array(items)) => items
                .iter()
                .filter_map(|item| item.as_str())
                .filter(|s| !s.is_empty())
                .map(str::to_string)
                .collect(),
            _ => Vec::new(),
        }
    }

    /// Numeric elements, non-numeric entries dropped.
    pub fn number_array(&self, name: &str) -> Vec<u32> {
        match self.get(name) {
            Some(Value::Array(items)) => items
                .iter()
                .filter_map(|item| match item {
                    Value::Number(n) => n.as_u64().and_then(|n| u32::try_from(n).ok()),
                    Value::String(s) => s.trim().parse().ok(),
                    _ => None,
                })
                .collect(),
            _ => Vec::new(),
        }
    }

    /// Financial amount: an arbitrary-precision integer, accepted as a JSON
    /// number or a decimal string.
    pub fn amount(&self, name: &str) -> Result<BigDecimal, DispatchError> {
        let value = self
            .get(name)
            .ok_or_else(|| DispatchError::MissingField(name.to_string()))?;
        let parsed = match value {
            Value::Number(n) => n.to_string().parse::<BigDecimal>().ok(),
            Value::String(s) => s.trim().parse::<BigDecimal>().ok(),
            _ => None,
        };
        parsed
            .filter(BigDecimal::is_integer)
            .ok_or_else(|| DispatchError::InvalidField {
                field: name.to_string(),
                reason: "must be an integer amount".to_string(),
            })
    }

    pub fn opt_amount(&self, name: &str) -> Result<Option<BigDecimal>, DispatchError> {
        if self.get(name).is_none() {
            return Ok(None);
        }
        self.amount(name).map(Some)
    }
}

/// Everything a handler receives.
#[derive(Clone, Copy)]
pub struct CallContext<'a> {
    pub sdk: &'a dyn PlatformSdk,
    pub args: &'a NamedArgs,
    pub proof: bool,
}

pub type HandlerFuture<'a> = Pin<Box<dyn Future<Output = Result<SdkResponse, DispatchError>> + 'a>>;
pub type Handler = for<'a> fn(CallContext<'a>) -> HandlerFuture<'a>;

/// Define a category's handler table: one named `fn` per operation key, plus
/// the `Lazy` map from key to handler.
macro_rules! handler_table {
    ($table:ident, { $($key:literal => $name:ident($ctx:ident) $body:block)* }) => {
        $(
            fn $name<'a>($ctx: $crate::dispatch::CallContext<'a>) -> $crate::dispatch::HandlerFuture<'a> {
                Box::pin(async move $body)
            }
        )*
        pub(crate) static $table: once_cell::sync::Lazy<
            std::collections::HashMap<&'static str, $crate::dispatch::Handler>,
        > = once_cell::sync::Lazy::new(|| {
            let mut table: std::collections::HashMap<&'static str, $crate::dispatch::Handler> =
                std::collections::HashMap::new();
            $(table.insert($key, $name as $crate::dispatch::Handler);)*
            table
        });
    };
}
pub(crate) use handler_table;

/// The just-in-time signing sequence shared by most transitions: fetch the
/// identity, locate a usable key (explicit `keyId` wins), wrap the entered
/// private key.
pub(crate) async fn signing_context(
    ctx: CallContext<'_>,
    identity_id: &str,
) -> Result<SigningContext, DispatchError> {
    let identity = ctx
        .sdk
        .identities()
        .resolve(identity_id)
        .await?
        .ok_or_else(|| DispatchError::Precondition("identity not found".to_string()))?;
    let key = identity
        .signing_key(ctx.args.opt_u32("keyId"), SecurityLevel::High)
        .cloned()
        .ok_or_else(|| DispatchError::Precondition("no suitable signing key".to_string()))?;
    let signer = Signer::from_wif(ctx.args.str_of("privateKeyWif")?)?;
    Ok(SigningContext {
        identity,
        key,
        signer,
    })
}

/// Uniform success object for transitions.
pub(crate) fn transition_success(message: &str, response: SdkResponse) -> SdkResponse {
    let result = match response {
        SdkResponse::Bare(value) => value,
        SdkResponse::Proved { data, .. } => data,
    };
    SdkResponse::Bare(RawValue::object(vec![
        ("status", RawValue::from("success")),
        ("message", RawValue::from(message)),
        ("result", result),
    ]))
}

fn query_tables() -> [&'static HashMap<&'static str, Handler>; 9] {
    [
        &identities::QUERIES,
        &contracts::QUERIES,
        &documents::QUERIES,
        &tokens::QUERIES,
        &dpns::QUERIES,
        &epoch::QUERIES,
        &system::QUERIES,
        &group::QUERIES,
        &voting::QUERIES,
    ]
}

fn transition_tables() -> [&'static HashMap<&'static str, Handler>; 6] {
    [
        &identities::TRANSITIONS,
        &contracts::TRANSITIONS,
        &documents::TRANSITIONS,
        &tokens::TRANSITIONS,
        &voting::TRANSITIONS,
        &addresses::TRANSITIONS,
    ]
}

fn lookup(kind: OperationKind, key: &str) -> Option<Handler> {
    match kind {
        OperationKind::Query => query_tables()
            .iter()
            .find_map(|table| table.get(key).copied()),
        OperationKind::Transition => transition_tables()
            .iter()
            .find_map(|table| table.get(key).copied()),
    }
}

/// Every query key with a registered handler.
pub fn handled_query_keys() -> impl Iterator<Item = &'static str> {
    query_tables().into_iter().flat_map(|t| t.keys().copied())
}

/// Every transition key with a registered handler.
pub fn handled_transition_keys() -> impl Iterator<Item = &'static str> {
    transition_tables()
        .into_iter()
        .flat_map(|t| t.keys().copied())
}

/// Invoke the operation's handler against the connected client.
pub async fn dispatch(
    sdk: &dyn PlatformSdk,
    kind: OperationKind,
    operation_key: &str,
    inputs: &[FieldSchema],
    args: &CollectedArgs,
    proof: bool,
    extras: Map<String, Value>,
) -> Result<SdkResponse, DispatchError> {
    let handler = lookup(kind, operation_key)
        .ok_or_else(|| DispatchError::NotSupported(operation_key.to_string()))?;
    let named = NamedArgs::new(inputs, args, extras);
    debug!(operation = operation_key, proof, "dispatching");
    handler(CallContext {
        sdk,
        args: &named,
        proof,
    })
    .await
}
