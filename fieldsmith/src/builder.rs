//! Widget builder and updater.
//!
//! [`FieldBuilder::build`] turns a request into a wrapper element holding a
//! label block and the control. [`FieldBuilder::update`] writes value and
//! attached data into an existing control; `build` finishes by calling it so
//! value population has a single code path.

use std::sync::Arc;

use serde_json::Value;
use tracing::{debug, warn};

use crate::config::{FormsConfig, PasswordMode};
use crate::descriptor::{normalize, FieldDescriptor, FieldRequest};
use crate::element::{is_markup_name, Element};
use crate::error::{FormsError, Result};
use crate::ids::IdGenerator;
use crate::kind::FieldKind;
use crate::translate::{Identity, Translate};
use crate::types::{FieldValue, QuickButton};

/// Data key carrying a widget's generic option tag.
pub const OPTION_DATA_KEY: &str = "option";
/// Data key carrying a quick button's dispatch identifier.
pub const BUTTON_ID_DATA_KEY: &str = "btn_id";

pub struct FieldBuilder {
    config: FormsConfig,
    translator: Arc<dyn Translate>,
    ids: IdGenerator,
}

impl FieldBuilder {
    pub fn new() -> Self {
        let config = FormsConfig::default();
        let ids = IdGenerator::new(config.id_prefix.clone());
        Self {
            config,
            translator: Arc::new(Identity),
            ids,
        }
    }

    /// Replace the configuration. Restarts identifier synthesis with the
    /// configured prefix.
    pub fn with_config(mut self, config: FormsConfig) -> Self {
        self.ids = IdGenerator::new(config.id_prefix.clone());
        self.config = config;
        self
    }

    pub fn with_translator(mut self, translator: impl Translate + 'static) -> Self {
        self.translator = Arc::new(translator);
        self
    }

    pub fn config(&self) -> &FormsConfig {
        &self.config
    }

    /// Build a field wrapper from a request.
    ///
    /// Fails with [`FormsError::UnsupportedKind`] or [`FormsError::MissingKind`]
    /// when the kind cannot be resolved, and with [`FormsError::EmptyChoices`]
    /// for a select that has nothing to select. Nothing is produced on failure.
    pub fn build(&self, request: &FieldRequest) -> Result<Element> {
        let settings = normalize(request);
        let kind = settings.field_kind().inspect_err(|e| {
            warn!(kind = ?settings.kind, error = %e, "field type not supported");
        })?;

        let id = settings.id.clone().unwrap_or_else(|| self.ids.next_id());

        if kind == FieldKind::Select && settings.choices.is_empty() && settings.value.is_none() {
            warn!(%id, "select field built without choices");
            return Err(FormsError::EmptyChoices { id });
        }

        let wrapper_tag = settings
            .wrapper_element
            .as_deref()
            .unwrap_or(&self.config.default_wrapper);
        if !is_markup_name(wrapper_tag) {
            warn!(%id, tag = wrapper_tag, "invalid wrapper element");
            return Err(FormsError::InvalidWrapperElement {
                tag: wrapper_tag.to_string(),
            });
        }
        let mut wrapper = Element::new(wrapper_tag);
        if let Some(class) = &settings.wrapper_class {
            wrapper.add_class(class);
        }

        let mut field = self.control(kind, &settings);
        field.set_attr("id", id.as_str());
        if let Some(class) = &settings.widget_class {
            field.add_class(class);
        }
        if let Some(tag) = &settings.generic_option {
            field.add_class(&self.config.classes.generic_option);
            field.set_data(OPTION_DATA_KEY, tag.as_str());
        }
        field.merge_data(&settings.data);

        self.update(request, &mut field);

        wrapper.append(self.label_block(&settings, &id));
        wrapper.append(field);

        debug!(%id, %kind, "built field");
        Ok(wrapper)
    }

    /// Write the request's value and attached data into an existing control.
    ///
    /// Checkbox kinds set the checked state from the value's truthiness; all
    /// other kinds set the text value (`""` when absent). A select without a
    /// value falls back to its first choice. Idempotent.
    pub fn update(&self, request: &FieldRequest, widget: &mut Element) {
        let settings = normalize(request);
        let boolean = match settings.field_kind() {
            Ok(kind) => kind.is_boolean(),
            Err(_) => is_checkbox(widget),
        };

        if boolean {
            widget.set_checked(settings.value.as_ref().is_some_and(FieldValue::is_truthy));
        } else {
            let value = match &settings.value {
                Some(v) => v.to_text(),
                None => default_choice(&settings)
                    .or_else(|| first_option(widget))
                    .unwrap_or_default(),
            };
            widget.set_value(&value);
        }

        widget.merge_data(&settings.data);
    }

    /// Build a row of quick-action buttons, one per entry, in order.
    pub fn quick_buttons(&self, buttons: &[QuickButton]) -> Element {
        let classes = &self.config.classes;
        let mut group = Element::new("div").with_class(&classes.button_group);
        for button in buttons {
            let mut el = Element::new("button").with_class(&classes.quick_button);
            el.append(self.translator.translate(&button.label));
            el.set_data(BUTTON_ID_DATA_KEY, button.name.as_str());
            group.append(el);
        }
        debug!(buttons = buttons.len(), "built quick button group");
        group
    }

    fn label_block(&self, settings: &FieldDescriptor, id: &str) -> Element {
        let classes = &self.config.classes;
        let label = Element::new("label")
            .with_attr("for", id)
            .with_child(self.translator.translate(&settings.label));

        let mut block = Element::new("div").with_class(&classes.label_block);
        block.append(label);
        if let Some(desc) = &settings.description {
            block.append(
                Element::new("p")
                    .with_class(&classes.description)
                    .with_child(desc.as_str()),
            );
        }
        block
    }

    fn control(&self, kind: FieldKind, settings: &FieldDescriptor) -> Element {
        let control = kind.control();
        let mut field = Element::new(control.tag);

        if let Some(input_type) = control.input_type {
            let input_type = match (kind, self.config.password_mode) {
                (FieldKind::Password, PasswordMode::Secret) => "password",
                _ => input_type,
            };
            field.set_attr("type", input_type);
        }
        if kind == FieldKind::Password {
            field.add_class(&self.config.classes.password);
        }
        for (name, value) in control.fixed {
            field.set_attr(*name, *value);
        }
        if control.placeholder {
            if let Some(placeholder) = &settings.placeholder {
                field.set_attr("placeholder", placeholder.as_str());
            }
        }
        for name in control.constraints {
            if let Some(value) = settings.constraints.get(*name).filter(|v| !v.is_null()) {
                field.set_attr(*name, constraint_text(value));
            }
        }
        if control.multi_value {
            let multiple = settings
                .constraints
                .get("multiple")
                .is_some_and(|v| !matches!(v, Value::Bool(false) | Value::Null));
            field.set_multiple(multiple);
        }

        if kind == FieldKind::Select {
            for choice in &settings.choices {
                field.append(
                    Element::new("option")
                        .with_attr("value", choice.value.as_str())
                        .with_child(choice.display_label()),
                );
            }
        }

        field
    }
}

impl Default for FieldBuilder {
    fn default() -> Self {
        Self::new()
    }
}

fn is_checkbox(widget: &Element) -> bool {
    widget.tag() == "input" && widget.input_type() == Some("checkbox")
}

fn default_choice(settings: &FieldDescriptor) -> Option<String> {
    if settings.field_kind().ok()? != FieldKind::Select {
        return None;
    }
    settings.choices.first().map(|c| c.value.clone())
}

/// Value of a select's first option, used when an untyped update carries no value.
fn first_option(widget: &Element) -> Option<String> {
    if widget.tag() != "select" {
        return None;
    }
    widget
        .child_elements()
        .next()
        .and_then(|o| o.attr("value"))
        .map(str::to_string)
}

fn constraint_text(value: &Value) -> String {
    match value {
        Value::String(s) => s.clone(),
        other => other.to_string(),
    }
}
