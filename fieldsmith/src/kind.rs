//! The closed set of field kinds and the control each one builds.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::error::FormsError;

const TEXT_CONSTRAINTS: &[&str] = &["minlength", "maxlength", "pattern"];
const RANGE_CONSTRAINTS: &[&str] = &["min", "max", "step"];

/// Supported field kinds.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum FieldKind {
    Text,
    Password,
    BasicInt,
    Number,
    Range,
    Select,
    Checkbox,
    Date,
    Time,
    Datetime,
    Email,
    Tel,
    Url,
}

/// Shape of the control a kind builds.
#[derive(Debug, Clone, PartialEq)]
pub struct Control {
    /// Element tag, `input` or `select`.
    pub tag: &'static str,
    /// `type` attribute for inputs.
    pub input_type: Option<&'static str>,
    /// Constraint keys copied from the request as attributes.
    pub constraints: &'static [&'static str],
    /// Attributes that are always set regardless of the request.
    pub fixed: &'static [(&'static str, &'static str)],
    /// Whether the request's placeholder is applied.
    pub placeholder: bool,
    /// Whether the `multiple` constraint toggles multi-value mode.
    pub multi_value: bool,
}

impl Control {
    const fn input(input_type: &'static str, constraints: &'static [&'static str]) -> Self {
        Self {
            tag: "input",
            input_type: Some(input_type),
            constraints,
            fixed: &[],
            placeholder: false,
            multi_value: false,
        }
    }

    const fn with_placeholder(mut self) -> Self {
        self.placeholder = true;
        self
    }
}

impl FieldKind {
    pub const ALL: [FieldKind; 13] = [
        FieldKind::Text,
        FieldKind::Password,
        FieldKind::BasicInt,
        FieldKind::Number,
        FieldKind::Range,
        FieldKind::Select,
        FieldKind::Checkbox,
        FieldKind::Date,
        FieldKind::Time,
        FieldKind::Datetime,
        FieldKind::Email,
        FieldKind::Tel,
        FieldKind::Url,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            FieldKind::Text => "text",
            FieldKind::Password => "password",
            FieldKind::BasicInt => "basic_int",
            FieldKind::Number => "number",
            FieldKind::Range => "range",
            FieldKind::Select => "select",
            FieldKind::Checkbox => "checkbox",
            FieldKind::Date => "date",
            FieldKind::Time => "time",
            FieldKind::Datetime => "datetime",
            FieldKind::Email => "email",
            FieldKind::Tel => "tel",
            FieldKind::Url => "url",
        }
    }

    /// Boolean-style kinds hold a checked state instead of a text value.
    pub fn is_boolean(&self) -> bool {
        matches!(self, FieldKind::Checkbox)
    }

    /// The control this kind builds.
    ///
    /// Password is a text input here; the builder adds the masking class and
    /// switches to a real password input only when configured to.
    pub fn control(&self) -> Control {
        match self {
            FieldKind::Text => Control::input("text", TEXT_CONSTRAINTS).with_placeholder(),
            FieldKind::Password => Control::input("text", TEXT_CONSTRAINTS).with_placeholder(),
            FieldKind::BasicInt => Control {
                fixed: &[("min", "0"), ("max", "999"), ("step", "1")],
                ..Control::input("number", &[]).with_placeholder()
            },
            FieldKind::Number => Control::input("number", RANGE_CONSTRAINTS).with_placeholder(),
            FieldKind::Range => Control::input("range", RANGE_CONSTRAINTS).with_placeholder(),
            FieldKind::Select => Control {
                tag: "select",
                input_type: None,
                constraints: &[],
                fixed: &[],
                placeholder: false,
                multi_value: false,
            },
            FieldKind::Checkbox => Control::input("checkbox", &[]),
            FieldKind::Date => Control::input("date", RANGE_CONSTRAINTS),
            FieldKind::Time => Control::input("time", RANGE_CONSTRAINTS),
            FieldKind::Datetime => Control::input("datetime-local", RANGE_CONSTRAINTS),
            FieldKind::Email => Control {
                multi_value: true,
                ..Control::input("email", TEXT_CONSTRAINTS).with_placeholder()
            },
            FieldKind::Tel => Control::input("tel", TEXT_CONSTRAINTS),
            FieldKind::Url => Control::input("url", TEXT_CONSTRAINTS),
        }
    }
}

impl fmt::Display for FieldKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for FieldKind {
    type Err = FormsError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        FieldKind::ALL
            .iter()
            .copied()
            .find(|k| k.as_str() == s)
            .ok_or_else(|| FormsError::UnsupportedKind {
                kind: s.to_string(),
            })
    }
}
