//! MobPortals core library: domain types, message catalog configuration, errors.
//!
//! - [`types`]: newtypes and the serialisable catalog document
//! - [`error`]: [`CatalogError`]
//! - [`catalog`]: load / save / init of `~/.mobportals/messages.yaml`

pub mod catalog;
pub mod error;
pub mod types;

pub use error::CatalogError;
pub use types::{MessageConfig, MessageKey, WarpName};
