//! Error types for portal-actions.

use thiserror::Error;

use portal_core::{MessageKey, WarpName};
use portal_message::MessageError;

use crate::types::Capability;

/// Why an action did not run.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum ActionError {
    /// The actor lacks the capability the action requires.
    #[error("missing permission '{0}'")]
    Permission(Capability),

    /// The action needs a player and was issued from the console.
    #[error("only players can do this")]
    PlayerOnly,

    #[error("warp '{0}' not found")]
    WarpNotFound(WarpName),

    #[error("warp '{0}' already exists")]
    WarpExists(WarpName),

    /// The target mob already carries a binding.
    #[error("mob is already interactive")]
    AlreadyExists,

    #[error("mob is not interactive")]
    NotInteractive,

    #[error("nothing to cancel")]
    NothingToCancel,

    /// The host reported the command as failed.
    #[error("command '{0}' failed")]
    CommandFailed(String),

    #[error("teleport to '{0}' failed")]
    TeleportFailed(WarpName),

    #[error("reload failed: {0}")]
    ReloadFailed(String),

    /// A catalog message could not be rendered.
    #[error("message error: {0}")]
    Message(#[from] MessageError),
}

impl ActionError {
    /// Catalog key and arguments of the message shown to the actor, if any.
    pub fn user_message(&self) -> Option<(MessageKey, Vec<String>)> {
        let (key, args) = match self {
            ActionError::Permission(capability) => ("permission-error", vec![capability.to_string()]),
            ActionError::PlayerOnly => ("console-command-error", vec![]),
            ActionError::WarpNotFound(name) => ("warp-not-found", vec![name.0.clone()]),
            ActionError::WarpExists(name) => ("warp-exists-error", vec![name.0.clone()]),
            ActionError::AlreadyExists => ("mob-exists-error", vec![]),
            ActionError::NotInteractive => ("mob-not-interactive-error", vec![]),
            ActionError::NothingToCancel => ("cancel-error", vec![]),
            ActionError::CommandFailed(command) => ("command-failed", vec![command.clone()]),
            ActionError::ReloadFailed(_) => ("reload-error", vec![]),
            ActionError::TeleportFailed(_) | ActionError::Message(_) => return None,
        };
        Some((MessageKey::from(key), args))
    }
}
