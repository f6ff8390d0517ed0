//! # portal-message
//!
//! Brace-token message templates with formatting-state tracking.
//!
//! A template is compiled once into segments and rendered many times against
//! positional arguments. Tokens carrying a directive (`{&e}`) are wrapped in
//! reset codes and followed by the codes needed to restore the formatting that
//! was active before them.
//!
//! ## Usage
//!
//! ```rust
//! use portal_message::{compile, format::translate};
//!
//! let template = compile("&cWarp {&e} not found");
//! let text = template.render(&["spawn"]).unwrap();
//! assert_eq!(text, translate("&cWarp &r&espawn&r&c not found"));
//! ```

pub mod catalog;
pub mod error;
pub mod format;
pub mod render;
pub mod template;

pub use catalog::{MessageCatalog, MessageSet};
pub use error::MessageError;
pub use format::FormattingState;
pub use render::render;
pub use template::{compile, CompiledTemplate, Segment};
