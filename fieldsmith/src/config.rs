//! Builder configuration.
//!
//! Every field has a default, so an empty YAML document (or no file at all)
//! yields the stock markup: `div` wrappers, `setting_` ids, and the class
//! names front-end stylesheets already target.

use std::path::Path;

use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::error::Result;

/// How the `password` kind is rendered.
#[derive(Debug, Clone, Copy, Default, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "kebab-case")]
pub enum PasswordMode {
    /// Plain text input carrying the masking class; the stylesheet hides it.
    #[default]
    MaskedText,
    /// A real `type=password` input. The masking class is still added.
    Secret,
}

/// Class names applied to generated markup.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(default)]
pub struct ClassNames {
    pub label_block: String,
    pub description: String,
    pub generic_option: String,
    pub password: String,
    pub quick_button: String,
    pub button_group: String,
}

impl Default for ClassNames {
    fn default() -> Self {
        Self {
            label_block: "label-block".into(),
            description: "desc".into(),
            generic_option: "set-option".into(),
            password: "uifield-password".into(),
            quick_button: "quickbutton".into(),
            button_group: "control-set".into(),
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(default)]
pub struct FormsConfig {
    /// Wrapper tag used when a request names none.
    pub default_wrapper: String,
    /// Prefix for synthesized identifiers.
    pub id_prefix: String,
    pub password_mode: PasswordMode,
    pub classes: ClassNames,
}

impl Default for FormsConfig {
    fn default() -> Self {
        Self {
            default_wrapper: "div".into(),
            id_prefix: "setting_".into(),
            password_mode: PasswordMode::default(),
            classes: ClassNames::default(),
        }
    }
}

impl FormsConfig {
    pub fn from_yaml_str(yaml: &str) -> Result<Self> {
        if yaml.trim().is_empty() {
            return Ok(Self::default());
        }
        Ok(serde_yaml::from_str(yaml)?)
    }

    pub fn load(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        let content = std::fs::read_to_string(path)?;
        let config = Self::from_yaml_str(&content)?;
        debug!(?path, password_mode = ?config.password_mode, "loaded forms config");
        Ok(config)
    }
}
