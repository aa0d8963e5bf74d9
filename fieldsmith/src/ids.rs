//! Identifier synthesis for fields built without an explicit id.

use std::sync::Mutex;

use ulid::{Generator, Ulid};

/// Produces `prefix` + a monotonic ULID, lowercased so it is usable as an
/// HTML id and CSS selector.
pub struct IdGenerator {
    prefix: String,
    inner: Mutex<Generator>,
}

impl IdGenerator {
    pub fn new(prefix: impl Into<String>) -> Self {
        Self {
            prefix: prefix.into(),
            inner: Mutex::new(Generator::new()),
        }
    }

    pub fn prefix(&self) -> &str {
        &self.prefix
    }

    /// Next identifier. Strictly increasing within this generator.
    pub fn next_id(&self) -> String {
        let mut generator = match self.inner.lock() {
            Ok(guard) => guard,
            Err(poisoned) => poisoned.into_inner(),
        };
        // Overflow only happens after 2^80 ids in one millisecond.
        let ulid = generator.generate().unwrap_or_else(|_| Ulid::new());
        format!("{}{}", self.prefix, ulid.to_string().to_lowercase())
    }
}
