//! # portal-actions
//!
//! Interactive actions bound to mobs or triggered by commands.
//!
//! The set of action kinds is closed ([`Action`]); [`Dispatcher::run`] checks
//! the actor's capability, validates preconditions against the [`World`],
//! offers the pending action to every [`Hook`] and only then executes it and
//! sends the success message from the message catalog.

pub mod dispatch;
pub mod error;
pub mod host;
pub mod hooks;
pub mod types;

pub use dispatch::Dispatcher;
pub use error::ActionError;
pub use host::{Actor, World};
pub use hooks::{Hook, Pending};
pub use types::{Action, Capability, MobBinding, MobId, Mode, Outcome};
