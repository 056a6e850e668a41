//! Result normalization
//!
//! SDK responses are graphs of boundary values ([`RawValue`]); display and
//! copy need canonical JSON. Normalization walks the graph with a seen-set
//! keyed by node identity, so shared and cyclic structures terminate: any
//! node reached a second time renders as the literal string `"[Circular]"`.

use std::collections::HashSet;
use std::rc::Rc;

use serde_json::{Map, Value};

use crate::sdk::{RawValue, SdkResponse};

/// Shown when an operation completes without returning a value.
pub const NO_RESULT_PLACEHOLDER: &str = "Completed (no result returned)";

const CIRCULAR: &str = "[Circular]";

/// Internal pointer field of wasm-bindgen objects, dropped from output.
const WASM_PTR_FIELD: &str = "__wbg_ptr";

/// Canonical JSON form of one SDK response. `None` means the call completed
/// without a displayable value.
pub fn normalize(response: &SdkResponse) -> Option<Value> {
    let mut seen = HashSet::new();
    match response {
        SdkResponse::Bare(value) => raw(value, &mut seen),
        // Proof-bearing responses keep their exact triple shape so they stay
        // distinguishable from bare data.
        SdkResponse::Proved {
            data,
            metadata,
            proof,
        } => {
            let mut triple = Map::new();
            triple.insert(
                "data".to_string(),
                raw(data, &mut seen).unwrap_or(Value::Null),
            );
            triple.insert(
                "metadata".to_string(),
                raw(metadata, &mut seen).unwrap_or(Value::Null),
            );
            triple.insert(
                "proof".to_string(),
                raw(proof, &mut seen).unwrap_or(Value::Null),
            );
            Some(Value::Object(triple))
        }
    }
}

/// Pretty-printed text for the result pane.
pub fn format_result(normalized: Option<&Value>) -> String {
    match normalized {
        None => NO_RESULT_PLACEHOLDER.to_string(),
        Some(Value::String(s)) => s.clone(),
        Some(value) => {
            serde_json::to_string_pretty(value).unwrap_or_else(|_| value.to_string())
        }
    }
}

fn raw(value: &RawValue, seen: &mut HashSet<*const ()>) -> Option<Value> {
    match value {
        RawValue::Null => Some(Value::Null),
        RawValue::Bool(b) => Some(Value::Bool(*b)),
        RawValue::Number(n) => Some(Value::Number(n.clone())),
        // Outside the safe double range; decimal text is lossless.
        RawValue::BigInt(big) => Some(Value::String(big.to_string())),
        RawValue::Text(s) => Some(Value::String(s.clone())),
        RawValue::Bytes(bytes) => Some(Value::Array(
            bytes.iter().map(|b| Value::Number((*b).into())).collect(),
        )),
        RawValue::Function => None,
        RawValue::Handle(handle) => {
            let ptr = Rc::as_ptr(handle) as *const ();
            if !seen.insert(ptr) {
                return Some(Value::String(CIRCULAR.to_string()));
            }
            raw(&handle.serialize(), seen)
        }
        RawValue::Sequence(items) => {
            let ptr = Rc::as_ptr(items) as *const ();
            if !seen.insert(ptr) {
                return Some(Value::String(CIRCULAR.to_string()));
            }
            Some(Value::Array(
                items
                    .borrow()
                    .iter()
                    .filter_map(|item| raw(item, seen))
                    .collect(),
            ))
        }
        RawValue::Map(entries) => {
            let ptr = Rc::as_ptr(entries) as *const ();
            if !seen.insert(ptr) {
                return Some(Value::String(CIRCULAR.to_string()));
            }
            let mut out = Map::new();
            for (key, item) in entries.borrow().iter() {
                let Some(item) = raw(item, seen) else { continue };
                out.insert(map_key(key, seen), item);
            }
            Some(Value::Object(out))
        }
        RawValue::Object(fields) => {
            let ptr = Rc::as_ptr(fields) as *const ();
            if !seen.insert(ptr) {
                return Some(Value::String(CIRCULAR.to_string()));
            }
            let mut out = Map::new();
            for (name, item) in fields.borrow().iter() {
                if name == WASM_PTR_FIELD {
                    continue;
                }
                if let Some(item) = raw(item, seen) {
                    out.insert(name.clone(), item);
                }
            }
            Some(Value::Object(out))
        }
    }
}

/// Map keys become strings: text keys pass through, serializable handles go
/// through their own serialization, everything else is stringified.
fn map_key(key: &RawValue, seen: &mut HashSet<*const ()>) -> String {
    match key {
        RawValue::Text(s) => s.clone(),
        RawValue::Handle(handle) => match raw(&handle.serialize(), seen) {
            Some(Value::String(s)) => s,
            Some(other) => other.to_string(),
            None => String::new(),
        },
        other => match raw(other, seen) {
            Some(Value::String(s)) => s,
            Some(value) => value.to_string(),
            None => String::new(),
        },
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::sdk::SdkHandle;
    use serde_json::json;
    use std::cell::RefCell;

    struct Balance(u64);

    impl SdkHandle for Balance {
        fn serialize(&self) -> RawValue {
            RawValue::object(vec![("confirmed", RawValue::from(self.0))])
        }
    }

    #[test]
    fn bare_json_passes_through() {
        let response = SdkResponse::bare_json(&json!({ "id": "abc", "balance": 42 }));
        assert_eq!(
            normalize(&response),
            Some(json!({ "id": "abc", "balance": 42 }))
        );
    }

    #[test]
    fn proved_responses_keep_the_triple_shape() {
        let response = SdkResponse::Proved {
            data: RawValue::from("identity"),
            metadata: RawValue::object(vec![("height", RawValue::from(120_u64))]),
            proof: RawValue::Bytes(vec![1, 2]),
        };
        assert_eq!(
            normalize(&response),
            Some(json!({
                "data": "identity",
                "metadata": { "height": 120 },
                "proof": [1, 2]
            }))
        );
    }

    #[test]
    fn handles_unwrap_through_their_serializer() {
        let response =
            SdkResponse::Bare(RawValue::Handle(Rc::new(Balance(9_000_000_000))));
        assert_eq!(
            normalize(&response),
            Some(json!({ "confirmed": 9_000_000_000_u64 }))
        );
    }

    #[test]
    fn big_integers_render_as_decimal_strings() {
        let big: bigdecimal::BigDecimal = "184467440737095516150".parse().unwrap();
        let response = SdkResponse::Bare(RawValue::BigInt(big));
        assert_eq!(
            normalize(&response),
            Some(json!("184467440737095516150"))
        );
    }

    #[test]
    fn functions_vanish_from_objects() {
        let response = SdkResponse::Bare(RawValue::object(vec![
            ("toJSON", RawValue::Function),
            ("value", RawValue::from(7_u64)),
        ]));
        assert_eq!(normalize(&response), Some(json!({ "value": 7 })));
    }

    #[test]
    fn cycle_renders_circular_exactly_once() {
        // object -> { "map": Map, "buffer": bytes, "self": object }
        let fields = Rc::new(RefCell::new(vec![
            (
                "map".to_string(),
                RawValue::map(vec![(RawValue::from("epoch"), RawValue::from(3_u64))]),
            ),
            ("buffer".to_string(), RawValue::Bytes(vec![0, 255])),
            ("__wbg_ptr".to_string(), RawValue::from(123_u64)),
        ]));
        fields
            .borrow_mut()
            .push(("self".to_string(), RawValue::Object(Rc::clone(&fields))));

        let normalized = normalize(&SdkResponse::Bare(RawValue::Object(fields)))
            .expect("object normalizes");
        let text = serde_json::to_string(&normalized).expect("valid JSON");
        assert_eq!(text.matches("[Circular]").count(), 1);
        assert!(!text.contains("__wbg_ptr"));
        assert_eq!(normalized["map"], json!({ "epoch": 3 }));
        assert_eq!(normalized["buffer"], json!([0, 255]));
        assert_eq!(normalized["self"], json!("[Circular]"));
    }

    #[test]
    fn placeholder_for_empty_results() {
        assert_eq!(format_result(None), NO_RESULT_PLACEHOLDER);
        assert_eq!(format_result(Some(&json!("already text"))), "already text");
    }
}
