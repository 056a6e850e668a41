//! Value collection
//!
//! Turns live form state into the positional argument list for dispatch, one
//! entry per schema input. Presentational and hidden controls yield `None`;
//! a hidden field is never required. The first validation failure aborts the
//! whole collection with a message naming the field's label.

use serde_json::{Number, Value};
use thiserror::Error;

use crate::schema::OperationSchema;

use super::dynamic::DynamicRegistry;
use super::model::{ControlKind, FormModel, RenderedControl};
use super::state::{ControlValue, FormState};

/// Positional argument values, aligned with the operation's input list.
pub type CollectedArgs = Vec<Option<Value>>;

#[derive(Debug, Error, PartialEq)]
pub enum CollectError {
    #[error("Missing required input: {0}")]
    MissingInput(String),
    #[error("{0} is required")]
    Required(String),
    #[error("{0} must be a number")]
    NotANumber(String),
    #[error("{0} must be valid JSON")]
    InvalidJson(String),
    /// Validation failure raised by a dynamic-field handler.
    #[error("{0}")]
    Dynamic(String),
}

/// Collect every input of the operation in declared order.
pub fn collect_args(
    schema: &OperationSchema,
    model: &FormModel,
    state: &FormState,
    dynamic: &DynamicRegistry,
) -> Result<CollectedArgs, CollectError> {
    debug_assert_eq!(schema.inputs.len(), model.controls().len());
    model
        .controls()
        .iter()
        .map(|control| collect_one(control, state, dynamic))
        .collect()
}

fn collect_one(
    control: &RenderedControl,
    state: &FormState,
    dynamic: &DynamicRegistry,
) -> Result<Option<Value>, CollectError> {
    if !control.collects_value() {
        return Ok(None);
    }

    if matches!(control.kind, ControlKind::Dynamic) {
        return match dynamic.handler(&control.name) {
            Some(handler) => handler.collect().map_err(CollectError::Dynamic),
            None if control.required => Err(CollectError::MissingInput(control.label.clone())),
            None => Ok(None),
        };
    }

    let Some(value) = state.value(&control.name) else {
        if control.required {
            return Err(CollectError::MissingInput(control.label.clone()));
        }
        return Ok(None);
    };

    // A hidden field is never required.
    if !state.is_visible(&control.name) {
        return Ok(None);
    }

    parse_value(control, value)
}

fn parse_value(
    control: &RenderedControl,
    value: &ControlValue,
) -> Result<Option<Value>, CollectError> {
    let label = || control.label.clone();
    match &control.kind {
        ControlKind::Number { .. } => {
            let raw = text_of(value);
            let raw = raw.trim();
            if raw.is_empty() {
                return if control.required {
                    Err(CollectError::Required(label()))
                } else {
                    Ok(Some(Value::Null))
                };
            }
            parse_number(raw)
                .map(|n| Some(Value::Number(n)))
                .ok_or_else(|| CollectError::NotANumber(label()))
        }
        ControlKind::Checkbox => Ok(Some(Value::Bool(match value {
            ControlValue::Checked(b) => *b,
            ControlValue::Text(s) => s == "true",
            ControlValue::Selected(_) => false,
        }))),
        ControlKind::Json { .. } => {
            let raw = text_of(value);
            let raw = raw.trim();
            if raw.is_empty() {
                return if control.required {
                    Err(CollectError::Required(label()))
                } else {
                    Ok(Some(Value::Null))
                };
            }
            serde_json::from_str(raw)
                .map(Some)
                .map_err(|_| CollectError::InvalidJson(label()))
        }
        ControlKind::Array => {
            if let ControlValue::Selected(values) = value {
                return Ok(Some(Value::Array(
                    values.iter().cloned().map(Value::String).collect(),
                )));
            }
            let raw = text_of(value);
            let raw = raw.trim();
            if raw.is_empty() {
                return if control.required {
                    Err(CollectError::Required(label()))
                } else {
                    Ok(Some(Value::Array(Vec::new())))
                };
            }
            // JSON array text, a bare JSON scalar wrapped, or the
            // comma-split fallback.
            Ok(Some(match serde_json::from_str::<Value>(raw) {
                Ok(Value::Array(items)) => Value::Array(items),
                Ok(other) => Value::Array(vec![other]),
                Err(_) => Value::Array(
                    raw.split(',')
                        .map(str::trim)
                        .filter(|item| !item.is_empty())
                        .map(|item| Value::String(item.to_string()))
                        .collect(),
                ),
            }))
        }
        ControlKind::MultiSelect { .. } => {
            let selected: Vec<String> = match value {
                ControlValue::Selected(values) => values.clone(),
                ControlValue::Text(s) if !s.is_empty() => vec![s.clone()],
                _ => Vec::new(),
            };
            if selected.is_empty() && control.required {
                return Err(CollectError::Required(label()));
            }
            Ok(Some(Value::Array(
                selected.into_iter().map(Value::String).collect(),
            )))
        }
        ControlKind::Select { .. } => {
            let raw = text_of(value);
            if raw.is_empty() && control.required {
                return Err(CollectError::Required(label()));
            }
            Ok(Some(Value::String(raw.into_owned())))
        }
        // text, textarea, and anything else single-line
        _ => {
            let raw = text_of(value);
            let raw = raw.trim();
            if raw.is_empty() {
                return if control.required {
                    Err(CollectError::Required(label()))
                } else {
                    Ok(Some(Value::Null))
                };
            }
            Ok(Some(Value::String(raw.to_string())))
        }
    }
}

fn text_of(value: &ControlValue) -> std::borrow::Cow<'_, str> {
    match value {
        ControlValue::Checked(true) => "true".into(),
        ControlValue::Checked(false) => "false".into(),
        ControlValue::Text(s) => s.as_str().into(),
        ControlValue::Selected(values) => values.join(",").into(),
    }
}

/// Integers stay integers; everything else goes through `f64`.
fn parse_number(raw: &str) -> Option<Number> {
    if let Ok(n) = raw.parse::<i64>() {
        return Some(Number::from(n));
    }
    if let Ok(n) = raw.parse::<u64>() {
        return Some(Number::from(n));
    }
    raw.parse::<f64>().ok().and_then(Number::from_f64)
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn setup(schema: Value) -> (OperationSchema, FormModel, FormState) {
        let schema: OperationSchema = serde_json::from_value(schema).unwrap();
        let model = FormModel::for_operation(&schema);
        let state = FormState::for_model(&model);
        (schema, model, state)
    }

    #[test]
    fn numbers_parse_or_fail_with_the_label() {
        let (schema, model, mut state) = setup(json!({
            "key": "getEpochsInfo",
            "inputs": [{ "name": "count", "label": "Count", "type": "number" }]
        }));
        let dynamic = DynamicRegistry::new();

        state.set_text("count", "40");
        assert_eq!(
            collect_args(&schema, &model, &state, &dynamic).unwrap(),
            vec![Some(json!(40))]
        );

        state.set_text("count", "forty");
        assert_eq!(
            collect_args(&schema, &model, &state, &dynamic),
            Err(CollectError::NotANumber("Count".into()))
        );

        state.set_text("count", "");
        assert_eq!(
            collect_args(&schema, &model, &state, &dynamic).unwrap(),
            vec![Some(Value::Null)]
        );
    }

    #[test]
    fn hidden_required_field_is_omitted() {
        let (schema, model, mut state) = setup(json!({
            "key": "tokenSetPriceForDirectPurchase",
            "inputs": [
                { "name": "priceType", "type": "select",
                  "options": [{ "value": "single" }, { "value": "schedule" }] },
                { "name": "priceData", "label": "Price Data", "type": "json", "required": true,
                  "dependsOn": { "field": "priceType", "values": ["schedule"] } }
            ]
        }));
        let dynamic = DynamicRegistry::new();

        let args = collect_args(&schema, &model, &state, &dynamic).unwrap();
        assert_eq!(args, vec![Some(json!("single")), None]);

        state.set_text("priceType", "schedule");
        assert_eq!(
            collect_args(&schema, &model, &state, &dynamic),
            Err(CollectError::Required("Price Data".into()))
        );
    }

    #[test]
    fn array_accepts_json_or_comma_split() {
        let (schema, model, mut state) = setup(json!({
            "key": "getIdentitiesBalances",
            "inputs": [{ "name": "identityIds", "type": "array" }]
        }));
        let dynamic = DynamicRegistry::new();

        state.set_text("identityIds", "[\"a\", \"b\"]");
        assert_eq!(
            collect_args(&schema, &model, &state, &dynamic).unwrap(),
            vec![Some(json!(["a", "b"]))]
        );

        state.set_text("identityIds", "a, b, ,c");
        assert_eq!(
            collect_args(&schema, &model, &state, &dynamic).unwrap(),
            vec![Some(json!(["a", "b", "c"]))]
        );

        state.set_text("identityIds", "");
        assert_eq!(
            collect_args(&schema, &model, &state, &dynamic).unwrap(),
            vec![Some(json!([]))]
        );
    }

    #[test]
    fn invalid_json_names_the_field() {
        let (schema, model, mut state) = setup(json!({
            "key": "getDocuments",
            "inputs": [{ "name": "where", "label": "Where Clause", "type": "json" }]
        }));
        let dynamic = DynamicRegistry::new();

        state.set_text("where", "{ not json");
        assert_eq!(
            collect_args(&schema, &model, &state, &dynamic),
            Err(CollectError::InvalidJson("Where Clause".into()))
        );
    }

    #[test]
    fn missing_dynamic_handler_fails_only_when_required() {
        let (schema, model, state) = setup(json!({
            "key": "documentCreate",
            "inputs": [
                { "name": "data", "label": "Document Data", "type": "dynamic", "required": true }
            ]
        }));
        let dynamic = DynamicRegistry::new();
        assert_eq!(
            collect_args(&schema, &model, &state, &dynamic),
            Err(CollectError::MissingInput("Document Data".into()))
        );
    }

    #[test]
    fn buttons_collect_nothing() {
        let (schema, model, state) = setup(json!({
            "key": "documentCreate",
            "inputs": [
                { "name": "fetchSchema", "type": "button" },
                { "name": "ownerId", "type": "text" }
            ]
        }));
        let dynamic = DynamicRegistry::new();
        let args = collect_args(&schema, &model, &state, &dynamic).unwrap();
        assert_eq!(args[0], None);
    }
}
