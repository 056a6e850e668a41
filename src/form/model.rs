//! Headless form model
//!
//! One [`RenderedControl`] per schema input, carrying everything a frontend
//! needs to draw the control and everything the collector needs to interpret
//! it. Unsupported types never reach this layer; the registry filters them
//! out before an operation is selectable.

use serde_json::Value;

use crate::schema::{DependsOn, FieldSchema, FieldType, OperationSchema, SelectOption};

use super::state::ControlValue;

/// What kind of control a field renders as.
#[derive(Debug, Clone, PartialEq)]
pub enum ControlKind {
    /// Single-line field. `array` inputs render the same way; the split into
    /// list elements happens at collection time.
    Text,
    TextArea {
        rows: u32,
    },
    Number {
        min: Option<f64>,
        max: Option<f64>,
        step: Option<f64>,
    },
    Checkbox,
    /// Multi-line field collected as parsed JSON.
    Json {
        rows: u32,
    },
    Select {
        options: Vec<SelectOption>,
    },
    MultiSelect {
        options: Vec<SelectOption>,
    },
    /// Single-line field collected as a list.
    Array,
    /// Delegated to a registered dynamic-field handler.
    Dynamic,
    /// Action trigger; collects nothing.
    Button,
    /// Read-only display; collects nothing.
    KeyPreview,
}

/// One control of a rendered form.
#[derive(Debug, Clone)]
pub struct RenderedControl {
    pub name: String,
    pub label: String,
    pub kind: ControlKind,
    pub required: bool,
    pub placeholder: Option<String>,
    pub help: Option<String>,
    pub depends_on: Option<DependsOn>,
    pub initial: ControlValue,
}

impl RenderedControl {
    /// Whether this control contributes a value to [`CollectedArgs`].
    ///
    /// [`CollectedArgs`]: super::collect::CollectedArgs
    pub fn collects_value(&self) -> bool {
        !matches!(self.kind, ControlKind::Button | ControlKind::KeyPreview)
    }
}

/// The rendered form for one operation.
#[derive(Debug, Clone, Default)]
pub struct FormModel {
    controls: Vec<RenderedControl>,
}

impl FormModel {
    /// Build the form for an operation, one control per input in declared
    /// order.
    pub fn for_operation(schema: &OperationSchema) -> Self {
        Self {
            controls: schema.inputs.iter().map(build_control).collect(),
        }
    }

    pub fn controls(&self) -> &[RenderedControl] {
        &self.controls
    }

    pub fn control(&self, name: &str) -> Option<&RenderedControl> {
        self.controls.iter().find(|c| c.name == name)
    }

    pub fn is_empty(&self) -> bool {
        self.controls.is_empty()
    }
}

fn build_control(field: &FieldSchema) -> RenderedControl {
    let kind = match field.field_type {
        FieldType::Text => ControlKind::Text,
        FieldType::TextArea => ControlKind::TextArea {
            rows: field.rows.unwrap_or(4),
        },
        FieldType::Number => ControlKind::Number {
            min: field.min,
            max: field.max,
            step: field.step,
        },
        FieldType::Checkbox => ControlKind::Checkbox,
        FieldType::Json => ControlKind::Json {
            rows: field.rows.unwrap_or(6),
        },
        FieldType::Select => ControlKind::Select {
            options: field.options.clone(),
        },
        FieldType::MultiSelect => ControlKind::MultiSelect {
            options: field.options.clone(),
        },
        FieldType::Array => ControlKind::Array,
        FieldType::Dynamic => ControlKind::Dynamic,
        FieldType::Button => ControlKind::Button,
        FieldType::KeyPreview => ControlKind::KeyPreview,
    };

    RenderedControl {
        name: field.name.clone(),
        label: field.display_label().to_string(),
        initial: initial_value(field, &kind),
        kind,
        required: field.required,
        placeholder: field.placeholder.clone(),
        help: field.help.clone(),
        depends_on: field.depends_on.clone(),
    }
}

/// Default value of a fresh control, following the schema's `value` where
/// one is declared.
fn initial_value(field: &FieldSchema, kind: &ControlKind) -> ControlValue {
    match kind {
        ControlKind::Checkbox => {
            ControlValue::Checked(field.value == Some(Value::Bool(true)))
        }
        ControlKind::MultiSelect { .. } => {
            let selected = match &field.value {
                Some(Value::Array(items)) => items
                    .iter()
                    .filter_map(|item| item.as_str().map(str::to_string))
                    .collect(),
                _ => Vec::new(),
            };
            ControlValue::Selected(selected)
        }
        // A select with no declared default starts on its first option.
        ControlKind::Select { options } => {
            let text = match &field.value {
                Some(Value::String(s)) => s.clone(),
                _ => options.first().map(|o| o.value.clone()).unwrap_or_default(),
            };
            ControlValue::Text(text)
        }
        ControlKind::TextArea { .. } | ControlKind::Json { .. } => {
            ControlValue::Text(match &field.value {
                Some(Value::String(s)) => s.clone(),
                Some(other) => serde_json::to_string_pretty(other).unwrap_or_default(),
                None => String::new(),
            })
        }
        _ => ControlValue::Text(match &field.value {
            Some(Value::String(s)) => s.clone(),
            Some(Value::Number(n)) => n.to_string(),
            Some(Value::Bool(b)) => b.to_string(),
            Some(other) => other.to_string(),
            None => String::new(),
        }),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn field(name: &str, ty: FieldType) -> FieldSchema {
        serde_json::from_value(json!({ "name": name, "type": match ty {
            FieldType::Checkbox => "checkbox",
            FieldType::Select => "select",
            FieldType::Number => "number",
            _ => "text",
        }}))
        .unwrap()
    }

    #[test]
    fn select_defaults_to_first_option() {
        let mut f = field("network", FieldType::Select);
        f.options = vec![
            SelectOption {
                value: "mainnet".into(),
                label: None,
            },
            SelectOption {
                value: "testnet".into(),
                label: None,
            },
        ];
        let control = build_control(&f);
        assert_eq!(control.initial, ControlValue::Text("mainnet".into()));
    }

    #[test]
    fn checkbox_defaults_from_schema_value() {
        let mut f = field("prove", FieldType::Checkbox);
        f.value = Some(Value::Bool(true));
        assert_eq!(build_control(&f).initial, ControlValue::Checked(true));

        f.value = None;
        assert_eq!(build_control(&f).initial, ControlValue::Checked(false));
    }

    #[test]
    fn presentational_controls_collect_nothing() {
        let mut f = field("fetchSchema", FieldType::Text);
        f.field_type = FieldType::Button;
        assert!(!build_control(&f).collects_value());
    }
}
