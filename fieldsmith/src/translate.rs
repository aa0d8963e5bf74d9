//! Label translation.
//!
//! The builder runs every label through a [`Translate`] implementation. The
//! lookup is assumed to be synchronous and total: a missing entry falls back
//! to the original text, never an error.

use std::collections::HashMap;
use std::path::Path;

use tracing::debug;

use crate::error::Result;

pub trait Translate: Send + Sync {
    fn translate(&self, text: &str) -> String;
}

/// Returns text unchanged.
#[derive(Debug, Clone, Copy, Default)]
pub struct Identity;

impl Translate for Identity {
    fn translate(&self, text: &str) -> String {
        text.to_string()
    }
}

impl<F> Translate for F
where
    F: Fn(&str) -> String + Send + Sync,
{
    fn translate(&self, text: &str) -> String {
        self(text)
    }
}

/// Message catalog keyed by source text.
///
/// ```yaml
/// Laps: Runden
/// Callsign: Rufzeichen
/// ```
#[derive(Debug, Clone, Default)]
pub struct Catalog {
    messages: HashMap<String, String>,
}

impl Catalog {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_message(mut self, source: impl Into<String>, text: impl Into<String>) -> Self {
        self.messages.insert(source.into(), text.into());
        self
    }

    pub fn from_yaml_str(yaml: &str) -> Result<Self> {
        let messages: HashMap<String, String> = serde_yaml::from_str(yaml)?;
        Ok(Self { messages })
    }

    pub fn load(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        let content = std::fs::read_to_string(path)?;
        let catalog = Self::from_yaml_str(&content)?;
        debug!(?path, messages = catalog.len(), "loaded message catalog");
        Ok(catalog)
    }

    pub fn len(&self) -> usize {
        self.messages.len()
    }

    pub fn is_empty(&self) -> bool {
        self.messages.is_empty()
    }
}

impl Translate for Catalog {
    fn translate(&self, text: &str) -> String {
        self.messages
            .get(text)
            .cloned()
            .unwrap_or_else(|| text.to_string())
    }
}
