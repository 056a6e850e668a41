//! Dynamic values at the SDK boundary
//!
//! SDK responses arrive as graphs of binary-backed objects, map-like
//! structures, and large integers rather than plain JSON. [`RawValue`] is the
//! adapter-level representation the result normalizer consumes: a small
//! closed set of variants, with shared nodes (`Rc`) so aliasing and cycles in
//! the source graph are representable.

use std::cell::RefCell;
use std::rc::Rc;

use bigdecimal::BigDecimal;
use serde_json::Value;

/// Shared sequence node.
pub type SharedSeq = Rc<RefCell<Vec<RawValue>>>;
/// Shared map node with value-typed keys.
pub type SharedEntries = Rc<RefCell<Vec<(RawValue, RawValue)>>>;
/// Shared plain-object node.
pub type SharedFields = Rc<RefCell<Vec<(String, RawValue)>>>;

/// A value exposing its own serialization method (typically a binary-backed
/// SDK object). Normalization unwraps these before anything else.
pub trait SdkHandle {
    fn serialize(&self) -> RawValue;
}

/// One value as returned by the wrapped SDK.
#[derive(Clone)]
pub enum RawValue {
    Null,
    Bool(bool),
    Number(serde_json::Number),
    /// Large integer outside the safe double range.
    BigInt(BigDecimal),
    Text(String),
    /// Binary buffer view.
    Bytes(Vec<u8>),
    Sequence(SharedSeq),
    /// Map-like structure; keys may themselves be SDK values.
    Map(SharedEntries),
    /// Plain object, copied field-by-field during normalization.
    Object(SharedFields),
    Handle(Rc<dyn SdkHandle>),
    /// Functions vanish during normalization.
    Function,
}

impl std::fmt::Debug for RawValue {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Null => write!(f, "Null"),
            Self::Bool(v) => f.debug_tuple("Bool").field(v).finish(),
            Self::Number(v) => f.debug_tuple("Number").field(v).finish(),
            Self::BigInt(v) => f.debug_tuple("BigInt").field(v).finish(),
            Self::Text(v) => f.debug_tuple("Text").field(v).finish(),
            Self::Bytes(v) => f.debug_tuple("Bytes").field(v).finish(),
            Self::Sequence(v) => f.debug_tuple("Sequence").field(v).finish(),
            Self::Map(v) => f.debug_tuple("Map").field(v).finish(),
            Self::Object(v) => f.debug_tuple("Object").field(v).finish(),
            Self::Handle(_) => write!(f, "Handle(..)"),
            Self::Function => write!(f, "Function"),
        }
    }
}

impl RawValue {
    pub fn text(value: impl Into<String>) -> Self {
        Self::Text(value.into())
    }

    pub fn sequence(items: Vec<RawValue>) -> Self {
        Self::Sequence(Rc::new(RefCell::new(items)))
    }

    pub fn map(entries: Vec<(RawValue, RawValue)>) -> Self {
        Self::Map(Rc::new(RefCell::new(entries)))
    }

    pub fn object(fields: Vec<(&str, RawValue)>) -> Self {
        Self::Object(Rc::new(RefCell::new(
            fields
                .into_iter()
                .map(|(name, value)| (name.to_string(), value))
                .collect(),
        )))
    }

    /// Lift plain JSON into the boundary representation.
    pub fn from_json(value: &Value) -> Self {
        match value {
            Value::Null => Self::Null,
            Value::Bool(b) => Self::Bool(*b),
            Value::Number(n) => Self::Number(n.clone()),
            Value::String(s) => Self::Text(s.clone()),
            Value::Array(items) => Self::sequence(items.iter().map(Self::from_json).collect()),
            Value::Object(fields) => Self::Object(Rc::new(RefCell::new(
                fields
                    .iter()
                    .map(|(name, value)| (name.clone(), Self::from_json(value)))
                    .collect(),
            ))),
        }
    }
}

impl From<u64> for RawValue {
    fn from(value: u64) -> Self {
        Self::Number(serde_json::Number::from(value))
    }
}

impl From<&str> for RawValue {
    fn from(value: &str) -> Self {
        Self::Text(value.to_string())
    }
}

/// One SDK response: either bare data, or data bundled with consensus proof
/// metadata. The proof-carrying shape is preserved end to end so callers can
/// distinguish the two.
#[derive(Debug)]
pub enum SdkResponse {
    Bare(RawValue),
    Proved {
        data: RawValue,
        metadata: RawValue,
        proof: RawValue,
    },
}

impl SdkResponse {
    /// Bare response lifted from plain JSON.
    pub fn bare_json(value: &Value) -> Self {
        Self::Bare(RawValue::from_json(value))
    }
}
