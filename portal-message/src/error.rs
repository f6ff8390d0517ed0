//! Error types for portal-message.

use thiserror::Error;

use portal_core::MessageKey;

/// All errors that can arise from rendering a message.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum MessageError {
    /// Fewer arguments were supplied than the template has tokens.
    /// Surplus arguments are not an error.
    #[error("template needs {required} argument(s) but {supplied} were supplied")]
    ArgumentCount { required: usize, supplied: usize },

    /// The catalog has no message under this key.
    #[error("no message registered under key '{0}'")]
    UnknownKey(MessageKey),
}
