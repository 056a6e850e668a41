//! Live form state
//!
//! Values typed by control shape, plus the visibility of dependent controls.
//! Visibility is recomputed after every mutation, mirroring the original
//! change/input listeners. Hiding a control never clears its value; the
//! collector is the one that ignores hidden controls.

use std::collections::{HashMap, HashSet};

use serde::{Deserialize, Serialize};

use super::model::{ControlKind, FormModel};
use crate::schema::DependsOn;

/// The live value of one control.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum ControlValue {
    Checked(bool),
    Text(String),
    Selected(Vec<String>),
}

impl ControlValue {
    /// The string a dependency rule compares against: checkboxes read as
    /// `"true"`/`"false"`, multi-selects as their first selected value.
    fn comparison_text(&self) -> &str {
        match self {
            Self::Checked(true) => "true",
            Self::Checked(false) => "false",
            Self::Text(s) => s,
            Self::Selected(values) => values.first().map(String::as_str).unwrap_or(""),
        }
    }
}

/// Values and visibility for one rendered form.
#[derive(Debug, Clone, Default)]
pub struct FormState {
    values: HashMap<String, ControlValue>,
    rules: Vec<(String, DependsOn)>,
    hidden: HashSet<String>,
}

impl FormState {
    /// Fresh state for a form: schema defaults applied, dependent controls
    /// hidden or shown per those defaults.
    pub fn for_model(model: &FormModel) -> Self {
        let mut state = Self::default();
        for control in model.controls() {
            if holds_value(&control.kind) {
                state
                    .values
                    .insert(control.name.clone(), control.initial.clone());
            }
            if let Some(rule) = &control.depends_on {
                state.rules.push((control.name.clone(), rule.clone()));
            }
        }
        state.recompute_visibility();
        state
    }

    pub fn set_text(&mut self, name: &str, value: impl Into<String>) {
        self.values
            .insert(name.to_string(), ControlValue::Text(value.into()));
        self.recompute_visibility();
    }

    pub fn set_checked(&mut self, name: &str, checked: bool) {
        self.values
            .insert(name.to_string(), ControlValue::Checked(checked));
        self.recompute_visibility();
    }

    pub fn set_selected(&mut self, name: &str, values: Vec<String>) {
        self.values
            .insert(name.to_string(), ControlValue::Selected(values));
        self.recompute_visibility();
    }

    pub fn value(&self, name: &str) -> Option<&ControlValue> {
        self.values.get(name)
    }

    /// Whether the control is currently shown. Controls without a dependency
    /// rule are always visible.
    pub fn is_visible(&self, name: &str) -> bool {
        !self.hidden.contains(name)
    }

    fn recompute_visibility(&mut self) {
        self.hidden.clear();
        for (name, rule) in &self.rules {
            let shown = self
                .values
                .get(&rule.field)
                .is_some_and(|value| rule.values.iter().any(|v| v == value.comparison_text()));
            if !shown {
                self.hidden.insert(name.clone());
            }
        }
    }
}

fn holds_value(kind: &ControlKind) -> bool {
    !matches!(
        kind,
        ControlKind::Dynamic | ControlKind::Button | ControlKind::KeyPreview
    )
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::schema::OperationSchema;
    use serde_json::json;

    fn model_with_dependency() -> FormModel {
        let schema: OperationSchema = serde_json::from_value(json!({
            "key": "tokenSetPriceForDirectPurchase",
            "inputs": [
                { "name": "priceType", "type": "select", "options": [
                    { "value": "single" }, { "value": "schedule" }
                ]},
                { "name": "priceData", "type": "json",
                  "dependsOn": { "field": "priceType", "values": ["schedule"] } },
                { "name": "prove", "type": "checkbox" },
                { "name": "extra", "type": "text",
                  "dependsOn": { "field": "prove", "values": ["true"] } }
            ]
        }))
        .unwrap();
        FormModel::for_operation(&schema)
    }

    #[test]
    fn dependent_control_follows_referenced_value() {
        let model = model_with_dependency();
        let mut state = FormState::for_model(&model);
        assert!(!state.is_visible("priceData"));

        state.set_text("priceType", "schedule");
        assert!(state.is_visible("priceData"));

        state.set_text("priceType", "single");
        assert!(!state.is_visible("priceData"));
    }

    #[test]
    fn checkbox_dependency_compares_literal_true_false() {
        let model = model_with_dependency();
        let mut state = FormState::for_model(&model);
        assert!(!state.is_visible("extra"));

        state.set_checked("prove", true);
        assert!(state.is_visible("extra"));
    }

    #[test]
    fn hiding_keeps_the_value() {
        let model = model_with_dependency();
        let mut state = FormState::for_model(&model);
        state.set_text("priceType", "schedule");
        state.set_text("priceData", "{\"0\": 5}");
        state.set_text("priceType", "single");
        assert!(!state.is_visible("priceData"));
        assert_eq!(
            state.value("priceData"),
            Some(&ControlValue::Text("{\"0\": 5}".into()))
        );
    }
}
