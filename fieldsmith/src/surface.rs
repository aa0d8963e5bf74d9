//! The surface that built fields are inserted into.
//!
//! A [`Surface`] owns inserted elements, relocates widgets by identifier for
//! updates and reads, and delivers activations to registered listeners. The
//! quick-button listener is installed at most once per surface.

use std::sync::Arc;

use indexmap::IndexMap;
use tracing::debug;

use crate::accessor::field_value;
use crate::builder::{FieldBuilder, OPTION_DATA_KEY};
use crate::config::ClassNames;
use crate::descriptor::FieldRequest;
use crate::dispatch::{ActivationListener, EventChannel, QuickButtonDispatcher};
use crate::element::Element;
use crate::error::{FormsError, Result};
use crate::types::FieldValue;

#[derive(Default)]
pub struct Surface {
    elements: Vec<Element>,
    listeners: Vec<Box<dyn ActivationListener>>,
    quick_buttons_installed: bool,
}

impl Surface {
    pub fn new() -> Self {
        Self::default()
    }

    /// Insert a built element at the end of the surface.
    pub fn insert(&mut self, element: Element) {
        debug!(tag = element.tag(), "inserted element");
        self.elements.push(element);
    }

    pub fn elements(&self) -> &[Element] {
        &self.elements
    }

    pub fn find(&self, id: &str) -> Option<&Element> {
        self.elements.iter().find_map(|e| e.find_by_id(id))
    }

    pub fn find_mut(&mut self, id: &str) -> Option<&mut Element> {
        self.elements.iter_mut().find_map(|e| e.find_by_id_mut(id))
    }

    /// First element in document order matching the predicate.
    pub fn find_where(&self, pred: &dyn Fn(&Element) -> bool) -> Option<&Element> {
        self.elements.iter().find_map(|e| e.find(pred))
    }

    /// Apply a request to the widget it identifies.
    pub fn update_field(&mut self, builder: &FieldBuilder, request: &FieldRequest) -> Result<()> {
        let id = request.id.as_deref().ok_or(FormsError::MissingIdentifier)?;
        let widget = self
            .find_mut(id)
            .ok_or_else(|| FormsError::WidgetNotFound { id: id.to_string() })?;
        builder.update(request, widget);
        Ok(())
    }

    /// Current value of the widget with this identifier.
    pub fn value_of(&self, id: &str) -> Result<FieldValue> {
        self.find(id)
            .map(field_value)
            .ok_or_else(|| FormsError::WidgetNotFound { id: id.to_string() })
    }

    /// Option tag → current value for every generic-option widget, in
    /// document order.
    pub fn generic_options(&self, classes: &ClassNames) -> IndexMap<String, FieldValue> {
        let marker = classes.generic_option.as_str();
        let mut options = IndexMap::new();
        for root in &self.elements {
            for widget in root.find_all(&|e| e.has_class(marker)) {
                if let Some(tag) = widget.data().get_str(OPTION_DATA_KEY) {
                    options.insert(tag.to_string(), field_value(widget));
                }
            }
        }
        options
    }

    pub fn add_listener(&mut self, listener: Box<dyn ActivationListener>) {
        self.listeners.push(listener);
    }

    /// Register the quick-button dispatcher. Returns `false` without
    /// registering anything if it is already installed.
    pub fn install_quick_buttons(
        &mut self,
        channel: Arc<dyn EventChannel>,
        classes: &ClassNames,
    ) -> bool {
        if self.quick_buttons_installed {
            debug!("quick button dispatcher already installed");
            return false;
        }
        self.add_listener(Box::new(QuickButtonDispatcher::new(
            channel,
            classes.quick_button.as_str(),
        )));
        self.quick_buttons_installed = true;
        debug!("installed quick button dispatcher");
        true
    }

    /// Deliver an activation of `element` to every listener.
    pub fn activate(&self, element: &Element) {
        for listener in &self.listeners {
            listener.on_activate(element);
        }
    }

    pub fn to_html(&self) -> String {
        self.elements.iter().map(Element::to_html).collect()
    }
}
