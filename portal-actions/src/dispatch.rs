//! Action dispatcher.
//!
//! ## `run`: 5-step protocol
//!
//! 1. Check the actor may run the action: players only where required, and
//!    holding the action's [`Capability`](crate::Capability).
//! 2. Validate preconditions against the [`World`] and the actor's [`Mode`].
//! 3. Build the pending action (render the command line for commands).
//! 4. Offer it to every hook in registration order; the first veto stops it.
//! 5. Execute through the host and send the success message.

use std::sync::Arc;

use portal_core::{MessageKey, WarpName};
use portal_message::{compile, MessageCatalog, MessageSet};

use crate::error::ActionError;
use crate::hooks::{Hook, Pending};
use crate::host::{Actor, World};
use crate::types::{Action, MobBinding, MobId, Mode, Outcome};

const NO_ARGS: &[&str] = &[];

/// Runs [`Action`]s against host collaborators.
pub struct Dispatcher {
    messages: Arc<MessageCatalog>,
    hooks: Vec<Box<dyn Hook>>,
}

impl std::fmt::Debug for Dispatcher {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Dispatcher")
            .field("messages", &self.messages)
            .field("hooks", &self.hooks.len())
            .finish()
    }
}

impl Dispatcher {
    pub fn new(messages: Arc<MessageCatalog>) -> Self {
        Dispatcher { messages, hooks: Vec::new() }
    }

    /// Register a veto hook. Hooks run in registration order.
    pub fn with_hook(mut self, hook: impl Hook + 'static) -> Self {
        self.hooks.push(Box::new(hook));
        self
    }

    pub fn add_hook(&mut self, hook: impl Hook + 'static) {
        self.hooks.push(Box::new(hook));
    }

    /// Run `action` for `actor`. See the module docs for the steps.
    pub fn run(
        &self,
        action: &Action,
        actor: &mut dyn Actor,
        world: &mut dyn World,
    ) -> Result<Outcome, ActionError> {
        tracing::debug!(kind = action.kind(), actor = actor.name(), "running action");

        // Step 1: who may run it.
        if action.requires_player() && !actor.is_player() {
            tracing::debug!(kind = action.kind(), "console cannot run this action");
            return Err(ActionError::PlayerOnly);
        }
        if let Some(capability) = action.capability() {
            if !actor.can(&capability) {
                tracing::debug!(capability = %capability, "permission error");
                return Err(ActionError::Permission(capability));
            }
        }

        // Step 2: preconditions.
        match action {
            Action::Warp { name }
            | Action::DeleteWarp { name }
            | Action::StartCreate { binding: MobBinding::Warp { name } }
                if !world.warp_exists(name) =>
            {
                tracing::debug!(warp = %name, "warp not found");
                return Err(ActionError::WarpNotFound(name.clone()));
            }
            Action::SetWarp { name } if world.warp_exists(name) => {
                tracing::debug!(warp = %name, "warp already exists");
                return Err(ActionError::WarpExists(name.clone()));
            }
            Action::Create { mob, .. } if world.binding(*mob).is_some() => {
                tracing::debug!(mob = %mob, "found existing mob");
                return Err(ActionError::AlreadyExists);
            }
            Action::Remove { mob } if world.binding(*mob).is_none() => {
                tracing::debug!(mob = %mob, "mob is not interactive");
                return Err(ActionError::NotInteractive);
            }
            Action::Cancel if *actor.mode() == Mode::Idle => {
                return Err(ActionError::NothingToCancel);
            }
            _ => {}
        }

        // Step 3: pending result.
        let command = match action {
            Action::RunCommand { command, .. } => Some(compile(command).render(&[actor.name()])?),
            _ => None,
        };
        if let Some(command) = &command {
            tracing::debug!(command = %command, "rendered command");
        }

        // Step 4: hooks.
        let pending = Pending {
            actor: actor.name(),
            action,
            command: command.as_deref(),
        };
        if !self.hooks.iter().all(|hook| hook.allow(&pending)) {
            tracing::debug!(kind = action.kind(), "event cancelled");
            return Ok(Outcome::Vetoed);
        }

        // Step 5: execute.
        match action {
            Action::RunCommand { .. } => {
                let command = command.unwrap_or_default();
                if !actor.perform_command(&command) {
                    tracing::debug!("command execution failed");
                    return Err(ActionError::CommandFailed(command));
                }
                tracing::debug!("command executed");
            }
            Action::Warp { name } => self.warp(actor, name)?,
            Action::SetWarp { name } => {
                if !world.set_warp(name, actor.name()) {
                    return Err(ActionError::WarpExists(name.clone()));
                }
                self.send(actor, "warp-create-success", &[name.0.as_str()])?;
                tracing::debug!(warp = %name, "warp created");
            }
            Action::DeleteWarp { name } => {
                if !world.remove_warp(name) {
                    tracing::debug!(warp = %name, "warp vanished before removal");
                    return Err(ActionError::WarpNotFound(name.clone()));
                }
                self.send(actor, "warp-delete-success", &[name.0.as_str()])?;
                tracing::debug!(warp = %name, "warp deleted");
            }
            Action::ListWarps => self.list(actor, world)?,
            Action::StartCreate { binding } => {
                actor.set_mode(Mode::Creating(binding.clone()));
                self.send(actor, "create-command", NO_ARGS)?;
                self.send(actor, "edit-cancel", NO_ARGS)?;
            }
            Action::StartRemove => {
                actor.set_mode(Mode::Removing);
                self.send(actor, "remove-command", NO_ARGS)?;
                self.send(actor, "edit-cancel", NO_ARGS)?;
            }
            Action::Cancel => {
                actor.set_mode(Mode::Idle);
                self.send(actor, "cancel-success", NO_ARGS)?;
            }
            Action::Create { mob, binding } => self.create(actor, world, *mob, binding)?,
            Action::Remove { mob } => {
                world.unbind(*mob);
                world.set_mob_name(*mob, None);
                self.send(actor, "action-remove-success", NO_ARGS)?;
                tracing::debug!(mob = %mob, "mob removed");
            }
            Action::Reload => self.reload(actor, world)?,
        }
        Ok(Outcome::Completed)
    }

    /// Interact with `mob`. An actor in create or remove mode edits the mob
    /// and returns to [`Mode::Idle`] once that succeeds; otherwise the mob's
    /// binding runs. Unbound mobs are ignored outside those modes.
    pub fn interact(
        &self,
        mob: MobId,
        actor: &mut dyn Actor,
        world: &mut dyn World,
    ) -> Option<Result<Outcome, ActionError>> {
        let action = match actor.mode() {
            Mode::Creating(binding) => Action::Create { mob, binding: binding.clone() },
            Mode::Removing => Action::Remove { mob },
            Mode::Idle => world.binding(mob)?.action(),
        };
        let editing = matches!(action, Action::Create { .. } | Action::Remove { .. });

        let result = self.run(&action, actor, world);
        if editing && matches!(result, Ok(Outcome::Completed)) {
            actor.set_mode(Mode::Idle);
        }
        Some(result)
    }

    /// Like [`run`](Self::run), but reports failures to the actor through the
    /// catalog message matching the error before returning it.
    ///
    /// The action's own error is always returned, even when its message
    /// cannot be rendered.
    pub fn run_and_report(
        &self,
        action: &Action,
        actor: &mut dyn Actor,
        world: &mut dyn World,
    ) -> Result<Outcome, ActionError> {
        let result = self.run(action, actor, world);
        if let Err(err) = &result {
            self.report(err, actor);
        }
        result
    }

    fn report(&self, err: &ActionError, actor: &mut dyn Actor) {
        let Some((key, args)) = err.user_message() else {
            return;
        };
        match self.messages.render(&key, &args) {
            Ok(text) => actor.send_message(&text),
            Err(render_err) => {
                tracing::warn!(
                    key = %key,
                    error = %render_err,
                    action_error = %err,
                    "cannot report action error"
                );
            }
        }
    }

    fn warp(&self, actor: &mut dyn Actor, name: &WarpName) -> Result<(), ActionError> {
        if !actor.teleport(name) {
            return Err(ActionError::TeleportFailed(name.clone()));
        }
        self.send(actor, "warp-success", &[name.0.as_str()])?;
        tracing::debug!(warp = %name, "player warped");
        Ok(())
    }

    fn list(&self, actor: &mut dyn Actor, world: &dyn World) -> Result<(), ActionError> {
        let names = world.warp_names();
        self.send(actor, "list-header", &[names.len().to_string()])?;
        if !names.is_empty() {
            let line: Vec<&str> = names.iter().map(|n| n.0.as_str()).collect();
            actor.send_message(&line.join(", "));
        }
        Ok(())
    }

    fn create(
        &self,
        actor: &mut dyn Actor,
        world: &mut dyn World,
        mob: MobId,
        binding: &MobBinding,
    ) -> Result<(), ActionError> {
        if let MobBinding::Warp { name } = binding {
            let label = self
                .messages
                .render(&MessageKey::from("mob-name-text"), &[name.0.as_str()])?;
            world.set_mob_name(mob, Some(label));
        }
        world.bind(mob, binding.clone());
        self.send(actor, "action-create-success", NO_ARGS)?;
        tracing::debug!(mob = %mob, "mob created");
        Ok(())
    }

    fn reload(&self, actor: &mut dyn Actor, world: &mut dyn World) -> Result<(), ActionError> {
        let config = world.load_messages().map_err(|err| {
            tracing::warn!(error = %err, "message reload failed");
            ActionError::ReloadFailed(err.to_string())
        })?;
        self.messages.reload(MessageSet::from_config(&config));
        self.send(actor, "reload-complete", NO_ARGS)?;
        Ok(())
    }

    fn send<S: AsRef<str>>(
        &self,
        actor: &mut dyn Actor,
        key: &str,
        args: &[S],
    ) -> Result<(), ActionError> {
        let text = self.messages.render(&MessageKey::from(key), args)?;
        actor.send_message(&text);
        Ok(())
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
