//! Veto hooks run after an action is validated and before it executes.

use crate::types::Action;

/// An action that passed its checks and is about to run.
#[derive(Debug, Clone, Copy)]
pub struct Pending<'a> {
    pub actor: &'a str,
    pub action: &'a Action,
    /// Rendered command line, for [`Action::RunCommand`] only.
    pub command: Option<&'a str>,
}

/// Synchronous observer that may veto a pending action.
pub trait Hook: Send + Sync {
    /// Return `false` to cancel.
    fn allow(&self, pending: &Pending<'_>) -> bool;
}

impl<F> Hook for F
where
    F: Fn(&Pending<'_>) -> bool + Send + Sync,
{
    fn allow(&self, pending: &Pending<'_>) -> bool {
        self(pending)
    }
}
