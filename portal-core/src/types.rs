//! Domain types shared by the message engine and the action dispatcher.
//!
//! All types are serializable/deserializable via serde + serde_yaml.

use std::collections::BTreeMap;
use std::fmt;

use serde::{Deserialize, Serialize};

// ---------------------------------------------------------------------------
// Newtypes
// ---------------------------------------------------------------------------

/// A strongly-typed key naming one message in the catalog (e.g. `warp-success`).
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct MessageKey(pub String);

impl fmt::Display for MessageKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        self.0.fmt(f)
    }
}

impl From<String> for MessageKey {
    fn from(s: String) -> Self {
        Self(s)
    }
}

impl From<&str> for MessageKey {
    fn from(s: &str) -> Self {
        Self(s.to_owned())
    }
}

/// A strongly-typed name for a warp (named teleport destination).
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct WarpName(pub String);

impl fmt::Display for WarpName {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        self.0.fmt(f)
    }
}

impl From<String> for WarpName {
    fn from(s: String) -> Self {
        Self(s)
    }
}

impl From<&str> for WarpName {
    fn from(s: &str) -> Self {
        Self(s.to_owned())
    }
}

// ---------------------------------------------------------------------------
// Catalog document
// ---------------------------------------------------------------------------

/// Root of the `messages.yaml` document: raw, uncompiled templates by key.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct MessageConfig {
    #[serde(default = "default_version")]
    pub version: u32,
    #[serde(default)]
    pub messages: BTreeMap<MessageKey, String>,
}

fn default_version() -> u32 {
    1
}

impl Default for MessageConfig {
    fn default() -> Self {
        Self {
            version: default_version(),
            messages: BTreeMap::new(),
        }
    }
}

impl MessageConfig {
    /// Raw template for `key`, if present.
    pub fn get(&self, key: &MessageKey) -> Option<&str> {
        self.messages.get(key).map(String::as_str)
    }

    /// Layer `self` over `defaults`: keys present in `self` win, keys only in
    /// `defaults` are filled in.
    pub fn merged_over(self, defaults: &MessageConfig) -> MessageConfig {
        let mut messages = defaults.messages.clone();
        messages.extend(self.messages);
        MessageConfig {
            version: self.version,
            messages,
        }
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
