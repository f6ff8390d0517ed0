//! Compiled message catalog.
//!
//! A [`MessageSet`] is built once from a [`MessageConfig`] and never mutated.
//! [`MessageCatalog`] holds the current set behind an `Arc` and swaps it out
//! wholesale on reload, so readers always see one complete set.

use std::collections::HashMap;
use std::sync::{Arc, PoisonError, RwLock};

use chrono::{DateTime, Utc};

use portal_core::{MessageConfig, MessageKey};

use crate::error::MessageError;
use crate::template::CompiledTemplate;

/// Immutable map of compiled templates.
#[derive(Debug, Clone)]
pub struct MessageSet {
    templates: HashMap<MessageKey, CompiledTemplate>,
    loaded_at: DateTime<Utc>,
}

impl MessageSet {
    /// Compile every entry of `config`.
    pub fn from_config(config: &MessageConfig) -> Self {
        let templates = config
            .messages
            .iter()
            .map(|(key, raw)| (key.clone(), CompiledTemplate::compile(raw)))
            .collect();
        MessageSet { templates, loaded_at: Utc::now() }
    }

    pub fn get(&self, key: &MessageKey) -> Option<&CompiledTemplate> {
        self.templates.get(key)
    }

    /// Render the message stored under `key`.
    pub fn render<S: AsRef<str>>(&self, key: &MessageKey, args: &[S]) -> Result<String, MessageError> {
        let Some(template) = self.templates.get(key) else {
            tracing::warn!(key = %key, "unknown message key");
            return Err(MessageError::UnknownKey(key.clone()));
        };
        template.render(args)
    }

    /// Keys in sorted order.
    pub fn keys(&self) -> Vec<&MessageKey> {
        let mut keys: Vec<_> = self.templates.keys().collect();
        keys.sort();
        keys
    }

    pub fn len(&self) -> usize {
        self.templates.len()
    }

    pub fn is_empty(&self) -> bool {
        self.templates.is_empty()
    }

    pub fn loaded_at(&self) -> DateTime<Utc> {
        self.loaded_at
    }
}

/// Shared handle to the current [`MessageSet`].
#[derive(Debug)]
pub struct MessageCatalog {
    current: RwLock<Arc<MessageSet>>,
}

impl MessageCatalog {
    pub fn new(set: MessageSet) -> Self {
        MessageCatalog { current: RwLock::new(Arc::new(set)) }
    }

    pub fn from_config(config: &MessageConfig) -> Self {
        Self::new(MessageSet::from_config(config))
    }

    /// The set in effect right now. Later reloads do not affect it.
    pub fn snapshot(&self) -> Arc<MessageSet> {
        // The lock only guards an Arc swap, so a poisoned lock still holds a
        // complete set.
        let guard = self.current.read().unwrap_or_else(PoisonError::into_inner);
        Arc::clone(&*guard)
    }

    /// Render `key` against the current set.
    pub fn render<S: AsRef<str>>(&self, key: &MessageKey, args: &[S]) -> Result<String, MessageError> {
        self.snapshot().render(key, args)
    }

    /// Replace the whole set.
    pub fn reload(&self, set: MessageSet) {
        let count = set.len();
        *self.current.write().unwrap_or_else(PoisonError::into_inner) = Arc::new(set);
        tracing::info!(messages = count, "message catalog reloaded");
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
