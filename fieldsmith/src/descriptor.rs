//! Field requests and their normalized descriptors.
//!
//! A [`FieldRequest`] is what callers hand in: every attribute optional,
//! deserializable from loosely shaped JSON or YAML objects. [`normalize`]
//! completes it against the fixed default schema, giving a
//! [`FieldDescriptor`] with no holes left except the ones the builder resolves
//! itself (identifier, wrapper tag) and `kind`, which stays raw so that an
//! unknown kind surfaces at build time rather than here.

use serde::{Deserialize, Serialize};
use serde_json::Value;

use crate::error::{FormsError, Result};
use crate::kind::FieldKind;
use crate::types::{Constraints, DataStore, FieldValue, SelectChoice};

/// A sparse request for a single field.
///
/// Both the descriptive attribute names and the short keys used by older
/// front-ends (`field_type`, `html_attributes`, `fieldClass`, ...) are accepted.
/// `null` counts as absent.
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
pub struct FieldRequest {
    #[serde(default, alias = "auxiliaryData", skip_serializing_if = "Option::is_none")]
    pub data: Option<DataStore>,
    #[serde(default, alias = "desc", skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    #[serde(
        default,
        alias = "html_attributes",
        skip_serializing_if = "Option::is_none"
    )]
    pub constraints: Option<Constraints>,
    #[serde(
        default,
        alias = "fieldClass",
        alias = "widgetClass",
        skip_serializing_if = "Option::is_none"
    )]
    pub widget_class: Option<String>,
    #[serde(default, alias = "wrapperClass", skip_serializing_if = "Option::is_none")]
    pub wrapper_class: Option<String>,
    #[serde(default, alias = "field_type", skip_serializing_if = "Option::is_none")]
    pub kind: Option<String>,
    #[serde(
        default,
        alias = "genericOption",
        alias = "genericOptionTag",
        skip_serializing_if = "Option::is_none"
    )]
    pub generic_option: Option<String>,
    #[serde(default, alias = "identifier", skip_serializing_if = "Option::is_none")]
    pub id: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub label: Option<String>,
    #[serde(default, alias = "options", skip_serializing_if = "Option::is_none")]
    pub choices: Option<Vec<SelectChoice>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub placeholder: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub value: Option<FieldValue>,
    #[serde(
        default,
        alias = "wrapperEl",
        alias = "wrapperElementTag",
        skip_serializing_if = "Option::is_none"
    )]
    pub wrapper_element: Option<String>,
}

impl FieldRequest {
    /// Start a request for the given kind name.
    pub fn new(kind: impl Into<String>) -> Self {
        Self {
            kind: Some(kind.into()),
            ..Self::default()
        }
    }

    pub fn with_id(mut self, id: impl Into<String>) -> Self {
        self.id = Some(id.into());
        self
    }

    pub fn with_label(mut self, label: impl Into<String>) -> Self {
        self.label = Some(label.into());
        self
    }

    pub fn with_description(mut self, description: impl Into<String>) -> Self {
        self.description = Some(description.into());
        self
    }

    pub fn with_value(mut self, value: impl Into<FieldValue>) -> Self {
        self.value = Some(value.into());
        self
    }

    pub fn with_placeholder(mut self, placeholder: impl Into<String>) -> Self {
        self.placeholder = Some(placeholder.into());
        self
    }

    pub fn with_constraint(mut self, name: impl Into<String>, value: impl Into<Value>) -> Self {
        self.constraints
            .get_or_insert_with(Constraints::new)
            .insert(name.into(), value.into());
        self
    }

    pub fn with_choice(mut self, value: impl Into<String>, label: impl Into<String>) -> Self {
        self.choices
            .get_or_insert_with(Vec::new)
            .push(SelectChoice::new(value, label));
        self
    }

    pub fn with_data(mut self, key: impl Into<String>, value: impl Into<Value>) -> Self {
        self.data
            .get_or_insert_with(DataStore::new)
            .insert(key, value);
        self
    }

    pub fn with_widget_class(mut self, class: impl Into<String>) -> Self {
        self.widget_class = Some(class.into());
        self
    }

    pub fn with_wrapper_class(mut self, class: impl Into<String>) -> Self {
        self.wrapper_class = Some(class.into());
        self
    }

    pub fn with_wrapper_element(mut self, tag: impl Into<String>) -> Self {
        self.wrapper_element = Some(tag.into());
        self
    }

    pub fn with_generic_option(mut self, tag: impl Into<String>) -> Self {
        self.generic_option = Some(tag.into());
        self
    }

    /// Parse a request from a JSON object.
    pub fn from_json(json: &str) -> Result<Self> {
        Ok(serde_json::from_str(json)?)
    }

    /// Parse a request from a YAML mapping.
    pub fn from_yaml(yaml: &str) -> Result<Self> {
        Ok(serde_yaml::from_str(yaml)?)
    }
}

/// A fully populated field description.
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
pub struct FieldDescriptor {
    pub data: DataStore,
    pub description: Option<String>,
    pub constraints: Constraints,
    pub widget_class: Option<String>,
    pub wrapper_class: Option<String>,
    pub kind: Option<String>,
    pub generic_option: Option<String>,
    pub id: Option<String>,
    pub label: String,
    pub choices: Vec<SelectChoice>,
    pub placeholder: Option<String>,
    pub value: Option<FieldValue>,
    pub wrapper_element: Option<String>,
}

impl FieldDescriptor {
    /// Resolve the raw kind name into a supported kind.
    pub fn field_kind(&self) -> Result<FieldKind> {
        match self.kind.as_deref() {
            Some(name) => name.parse(),
            None => Err(FormsError::MissingKind),
        }
    }
}

impl From<FieldDescriptor> for FieldRequest {
    fn from(d: FieldDescriptor) -> Self {
        FieldRequest {
            data: Some(d.data),
            description: d.description,
            constraints: Some(d.constraints),
            widget_class: d.widget_class,
            wrapper_class: d.wrapper_class,
            kind: d.kind,
            generic_option: d.generic_option,
            id: d.id,
            label: Some(d.label),
            choices: Some(d.choices),
            placeholder: d.placeholder,
            value: d.value,
            wrapper_element: d.wrapper_element,
        }
    }
}

/// Complete a sparse request against the default schema.
///
/// Present values win; everything else takes its default (absent, empty
/// mapping, or empty label). Never fails.
pub fn normalize(request: &FieldRequest) -> FieldDescriptor {
    let request = request.clone();
    FieldDescriptor {
        data: request.data.unwrap_or_default(),
        description: request.description,
        constraints: request.constraints.unwrap_or_default(),
        widget_class: request.widget_class,
        wrapper_class: request.wrapper_class,
        kind: request.kind,
        generic_option: request.generic_option,
        id: request.id,
        label: request.label.unwrap_or_default(),
        choices: request.choices.unwrap_or_default(),
        placeholder: request.placeholder,
        value: request.value,
        wrapper_element: request.wrapper_element,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn empty_request_takes_defaults() {
        let d = normalize(&FieldRequest::default());
        assert!(d.data.is_empty());
        assert!(d.constraints.is_empty());
        assert!(d.choices.is_empty());
        assert_eq!(d.label, "");
        assert!(d.kind.is_none());
        assert!(d.id.is_none());
        assert!(d.value.is_none());
        assert!(d.wrapper_element.is_none());
    }

    #[test]
    fn present_values_win() {
        let request = FieldRequest::new("number")
            .with_id("lap_count")
            .with_label("Laps")
            .with_constraint("min", 1)
            .with_value(5);
        let d = normalize(&request);
        assert_eq!(d.kind.as_deref(), Some("number"));
        assert_eq!(d.id.as_deref(), Some("lap_count"));
        assert_eq!(d.label, "Laps");
        assert_eq!(d.constraints.get("min"), Some(&Value::from(1)));
        assert_eq!(d.value, Some(FieldValue::from(5)));
    }

    #[test]
    fn normalizing_a_full_descriptor_is_identity() {
        let request = FieldRequest::new("select")
            .with_id("mode")
            .with_label("Mode")
            .with_description("Race mode")
            .with_choice("a", "A")
            .with_choice("b", "B")
            .with_data("node", 2)
            .with_widget_class("wide")
            .with_wrapper_class("row")
            .with_wrapper_element("li")
            .with_generic_option("race_mode");
        let once = normalize(&request);
        let twice = normalize(&FieldRequest::from(once.clone()));
        assert_eq!(once, twice);
    }

    #[test]
    fn short_keys_and_nulls_from_json() {
        let request = FieldRequest::from_json(
            r#"{
                "field_type": "text",
                "label": "Callsign",
                "desc": "Pilot callsign",
                "html_attributes": {"minlength": 2, "maxlength": 5},
                "fieldClass": "callsign",
                "genericOption": "pilot_callsign",
                "wrapperEl": "li",
                "data": {"pilot_id": 7},
                "placeholder": null,
                "value": null
            }"#,
        )
        .unwrap();
        assert_eq!(request.kind.as_deref(), Some("text"));
        assert_eq!(request.description.as_deref(), Some("Pilot callsign"));
        assert_eq!(request.widget_class.as_deref(), Some("callsign"));
        assert_eq!(request.generic_option.as_deref(), Some("pilot_callsign"));
        assert_eq!(request.wrapper_element.as_deref(), Some("li"));
        assert!(request.placeholder.is_none());
        assert!(request.value.is_none());
        let constraints = request.constraints.unwrap();
        assert_eq!(constraints.len(), 2);
        assert_eq!(request.data.unwrap().get_as::<u32>("pilot_id").unwrap(), Some(7));
    }

    #[test]
    fn options_alias_from_yaml() {
        let request = FieldRequest::from_yaml(
            r#"
kind: select
label: Band
options:
  - value: r
    label: Raceband
  - value: f
    label: Fatshark
"#,
        )
        .unwrap();
        let choices = request.choices.unwrap();
        assert_eq!(choices.len(), 2);
        assert_eq!(choices[0].value, "r");
        assert_eq!(choices[1].display_label(), "Fatshark");
    }

    #[test]
    fn field_kind_resolution() {
        let d = normalize(&FieldRequest::new("basic_int"));
        assert_eq!(d.field_kind().unwrap(), FieldKind::BasicInt);

        let d = normalize(&FieldRequest::new("bogus"));
        assert!(matches!(
            d.field_kind(),
            Err(FormsError::UnsupportedKind { ref kind }) if kind == "bogus"
        ));

        let d = normalize(&FieldRequest::default());
        assert!(matches!(d.field_kind(), Err(FormsError::MissingKind)));
    }
}
