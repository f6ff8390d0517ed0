//! Action kinds and the capabilities that gate them.

use std::fmt;

use portal_core::WarpName;

/// Host-assigned identifier of a mob.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct MobId(pub u64);

impl fmt::Display for MobId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "mob#{}", self.0)
    }
}

/// What an interactive mob does when a player interacts with it.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum MobBinding {
    /// Run `command` as the interacting player. `command` is a message
    /// template whose single token receives the player's name.
    Command { alias: String, command: String },
    /// Teleport the interacting player to a warp.
    Warp { name: WarpName },
}

impl MobBinding {
    /// The action an interaction with a mob carrying this binding triggers.
    pub fn action(&self) -> Action {
        match self {
            MobBinding::Command { alias, command } => Action::RunCommand {
                alias: alias.clone(),
                command: command.clone(),
            },
            MobBinding::Warp { name } => Action::Warp { name: name.clone() },
        }
    }
}

/// What the next mob interaction of an actor does.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub enum Mode {
    /// Run the mob's binding, if it has one.
    #[default]
    Idle,
    /// Attach this binding to the next mob.
    Creating(MobBinding),
    /// Strip the binding from the next mob.
    Removing,
}

/// Every action the dispatcher knows how to run.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Action {
    RunCommand { alias: String, command: String },
    Warp { name: WarpName },
    SetWarp { name: WarpName },
    DeleteWarp { name: WarpName },
    ListWarps,
    /// Enter [`Mode::Creating`].
    StartCreate { binding: MobBinding },
    /// Enter [`Mode::Removing`].
    StartRemove,
    /// Leave create or remove mode.
    Cancel,
    Create { mob: MobId, binding: MobBinding },
    Remove { mob: MobId },
    /// Reload the message catalog from the host's configuration.
    Reload,
}

impl Action {
    /// Capability the actor must hold, if any.
    pub fn capability(&self) -> Option<Capability> {
        let capability = match self {
            Action::RunCommand { alias, .. } => Capability::RunCommand(alias.clone()),
            Action::Warp { name } => Capability::UseWarp(name.clone()),
            Action::SetWarp { .. } => Capability::SetWarp,
            Action::DeleteWarp { .. } => Capability::RemoveWarp,
            Action::ListWarps => Capability::ListWarps,
            Action::StartCreate { .. } | Action::Create { .. } => Capability::Create,
            Action::StartRemove | Action::Remove { .. } => Capability::Remove,
            Action::Reload => Capability::Reload,
            Action::Cancel => return None,
        };
        Some(capability)
    }

    /// Whether the action needs a player rather than the console.
    pub fn requires_player(&self) -> bool {
        !matches!(
            self,
            Action::RunCommand { .. }
                | Action::DeleteWarp { .. }
                | Action::ListWarps
                | Action::Reload
        )
    }

    /// Short label for logs.
    pub fn kind(&self) -> &'static str {
        match self {
            Action::RunCommand { .. } => "command",
            Action::Warp { .. } => "warp",
            Action::SetWarp { .. } => "set-warp",
            Action::DeleteWarp { .. } => "delete-warp",
            Action::ListWarps => "list-warps",
            Action::StartCreate { .. } => "start-create",
            Action::StartRemove => "start-remove",
            Action::Cancel => "cancel",
            Action::Create { .. } => "create",
            Action::Remove { .. } => "remove",
            Action::Reload => "reload",
        }
    }
}

/// A right an actor may or may not hold.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum Capability {
    RunCommand(String),
    UseWarp(WarpName),
    SetWarp,
    RemoveWarp,
    ListWarps,
    Create,
    Remove,
    Reload,
}

impl fmt::Display for Capability {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Capability::RunCommand(alias) => write!(f, "command.{alias}"),
            Capability::UseWarp(name) => write!(f, "warp.{name}"),
            Capability::SetWarp => f.write_str("setwarp"),
            Capability::RemoveWarp => f.write_str("delwarp"),
            Capability::ListWarps => f.write_str("list"),
            Capability::Create => f.write_str("create"),
            Capability::Remove => f.write_str("remove"),
            Capability::Reload => f.write_str("reload"),
        }
    }
}

/// Result of a dispatch that passed every check.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Outcome {
    Completed,
    /// A hook rejected the action; nothing was executed.
    Vetoed,
}
