//! Reading values back out of built widgets.

use crate::element::Element;
use crate::types::FieldValue;

/// Current value of a widget.
///
/// Checkbox inputs yield their checked state; everything else yields the raw
/// text value (empty when unset). No coercion is applied.
pub fn field_value(widget: &Element) -> FieldValue {
    if widget.input_type() == Some("checkbox") {
        FieldValue::Bool(widget.is_checked())
    } else {
        FieldValue::Text(widget.value().unwrap_or_default().to_string())
    }
}
