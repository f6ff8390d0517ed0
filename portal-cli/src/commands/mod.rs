pub mod check;
pub mod init;
pub mod render;
pub mod show;

use std::path::Path;

use anyhow::{Context, Result};

use portal_core::{catalog, MessageConfig};
use portal_message::format;

/// Load the catalog at `path`, or the user's catalog (falling back to the
/// built-in defaults) when no path is given.
pub(crate) fn load_catalog(path: Option<&Path>) -> Result<MessageConfig> {
    match path {
        Some(path) => catalog::load_file(path)
            .with_context(|| format!("failed to load catalog '{}'", path.display())),
        None => catalog::load_or_default().context("failed to load message catalog"),
    }
}

/// Rendered text as printed: raw `§` codes, or `&` codes when `show_codes`.
pub(crate) fn display(rendered: &str, show_codes: bool) -> String {
    if show_codes {
        format::untranslate(rendered)
    } else {
        rendered.to_string()
    }
}
