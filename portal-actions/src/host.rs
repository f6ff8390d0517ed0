//! Host-side collaborators. The game server implements these; this crate
//! never talks to it any other way.

use portal_core::{CatalogError, MessageConfig, WarpName};

use crate::types::{Capability, MobBinding, MobId, Mode};

/// The player (or console) an action runs for.
pub trait Actor {
    fn name(&self) -> &str;

    /// `false` for the server console.
    fn is_player(&self) -> bool {
        true
    }

    /// Whether the actor holds `capability`. How that maps onto the host's
    /// permission system is up to the host.
    fn can(&self, capability: &Capability) -> bool;

    fn send_message(&mut self, text: &str);

    /// Run `command` as this actor. Returns `false` if the host rejected it.
    fn perform_command(&mut self, command: &str) -> bool;

    /// Move the actor to the warp. Returns `false` if the teleport failed.
    fn teleport(&mut self, warp: &WarpName) -> bool;

    /// What the actor's next mob interaction does.
    fn mode(&self) -> &Mode;

    fn set_mode(&mut self, mode: Mode);
}

/// Warps, interactive mobs and configuration known to the host.
pub trait World {
    fn warp_exists(&self, name: &WarpName) -> bool;

    /// Create a warp at `owner`'s position. Returns `false` if it already exists.
    fn set_warp(&mut self, name: &WarpName, owner: &str) -> bool;

    /// Returns `false` if there was nothing to remove.
    fn remove_warp(&mut self, name: &WarpName) -> bool;

    /// Warp names in display order.
    fn warp_names(&self) -> Vec<WarpName>;

    fn binding(&self, mob: MobId) -> Option<&MobBinding>;

    fn bind(&mut self, mob: MobId, binding: MobBinding);

    /// Returns the removed binding, if any.
    fn unbind(&mut self, mob: MobId) -> Option<MobBinding>;

    /// Show `name` above the mob, or clear it with `None`.
    fn set_mob_name(&mut self, mob: MobId, name: Option<String>);

    /// Re-read the message configuration.
    fn load_messages(&mut self) -> Result<MessageConfig, CatalogError>;
}
