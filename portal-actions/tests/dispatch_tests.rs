//! Dispatcher behaviour against an in-memory host.

use std::collections::{BTreeMap, HashMap, HashSet};
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Arc;

use portal_actions::{
    Action, ActionError, Actor, Capability, Dispatcher, Hook, MobBinding, MobId, Mode, Outcome,
    Pending, World,
};
use portal_core::{catalog, CatalogError, MessageConfig, MessageKey, WarpName};
use portal_message::{format::translate, MessageCatalog, MessageSet};
use rstest::rstest;

// ---------------------------------------------------------------------------
// Fake host
// ---------------------------------------------------------------------------

#[derive(Default)]
struct Player {
    name: String,
    caps: HashSet<Capability>,
    sent: Vec<String>,
    commands: Vec<String>,
    teleports: Vec<WarpName>,
    command_ok: bool,
    teleport_ok: bool,
    console: bool,
    mode: Mode,
}

impl Player {
    fn new(name: &str) -> Self {
        Player {
            name: name.to_string(),
            command_ok: true,
            teleport_ok: true,
            ..Default::default()
        }
    }

    fn console() -> Self {
        Player {
            console: true,
            ..Player::new("CONSOLE")
        }
    }

    fn with(mut self, cap: Capability) -> Self {
        self.caps.insert(cap);
        self
    }
}

impl Actor for Player {
    fn name(&self) -> &str {
        &self.name
    }
    fn is_player(&self) -> bool {
        !self.console
    }
    fn can(&self, capability: &Capability) -> bool {
        self.caps.contains(capability)
    }
    fn send_message(&mut self, text: &str) {
        self.sent.push(text.to_string());
    }
    fn perform_command(&mut self, command: &str) -> bool {
        self.commands.push(command.to_string());
        self.command_ok
    }
    fn teleport(&mut self, warp: &WarpName) -> bool {
        self.teleports.push(warp.clone());
        self.teleport_ok
    }
    fn mode(&self) -> &Mode {
        &self.mode
    }
    fn set_mode(&mut self, mode: Mode) {
        self.mode = mode;
    }
}

#[derive(Default)]
struct Server {
    warps: BTreeMap<WarpName, String>,
    mobs: HashMap<MobId, MobBinding>,
    names: HashMap<MobId, String>,
    /// Configuration handed out on reload; `None` simulates a missing file.
    config: Option<MessageConfig>,
    /// Refuse every removal, as if the warp store were out of sync.
    removal_fails: bool,
}

impl Server {
    fn with_warp(mut self, name: &str) -> Self {
        self.warps.insert(WarpName::from(name), "server".to_string());
        self
    }
}

impl World for Server {
    fn warp_exists(&self, name: &WarpName) -> bool {
        self.warps.contains_key(name)
    }
    fn set_warp(&mut self, name: &WarpName, owner: &str) -> bool {
        if self.warps.contains_key(name) {
            return false;
        }
        self.warps.insert(name.clone(), owner.to_string());
        true
    }
    fn remove_warp(&mut self, name: &WarpName) -> bool {
        !self.removal_fails && self.warps.remove(name).is_some()
    }
    fn warp_names(&self) -> Vec<WarpName> {
        self.warps.keys().cloned().collect()
    }
    fn binding(&self, mob: MobId) -> Option<&MobBinding> {
        self.mobs.get(&mob)
    }
    fn bind(&mut self, mob: MobId, binding: MobBinding) {
        self.mobs.insert(mob, binding);
    }
    fn unbind(&mut self, mob: MobId) -> Option<MobBinding> {
        self.mobs.remove(&mob)
    }
    fn set_mob_name(&mut self, mob: MobId, name: Option<String>) {
        match name {
            Some(name) => self.names.insert(mob, name),
            None => self.names.remove(&mob),
        };
    }
    fn load_messages(&mut self) -> Result<MessageConfig, CatalogError> {
        self.config.clone().ok_or_else(|| CatalogError::CatalogNotFound {
            path: "messages.yaml".into(),
        })
    }
}

fn messages() -> Arc<MessageCatalog> {
    let config = catalog::defaults().expect("defaults");
    Arc::new(MessageCatalog::from_config(&config))
}

fn warp(name: &str) -> Action {
    Action::Warp { name: WarpName::from(name) }
}

// ---------------------------------------------------------------------------
// 1. Success paths
// ---------------------------------------------------------------------------

#[test]
fn warp_teleports_and_confirms() {
    let mut player = Player::new("alex").with(Capability::UseWarp("spawn".into()));
    let mut server = Server::default().with_warp("spawn");

    let outcome = Dispatcher::new(messages())
        .run(&warp("spawn"), &mut player, &mut server)
        .expect("warp");

    assert_eq!(outcome, Outcome::Completed);
    assert_eq!(player.teleports, [WarpName::from("spawn")]);
    assert_eq!(player.sent, [translate("&aWarped to &r&espawn&r&a!")]);
}

#[test]
fn delete_warp_removes_and_confirms() {
    let mut player = Player::new("alex").with(Capability::RemoveWarp);
    let mut server = Server::default().with_warp("spawn");

    Dispatcher::new(messages())
        .run(&Action::DeleteWarp { name: "spawn".into() }, &mut player, &mut server)
        .expect("delete");

    assert!(server.warps.is_empty());
    assert_eq!(player.sent, [translate("&aWarp &r&espawn&r&a deleted!")]);
}

#[test]
fn create_then_interact_runs_binding() {
    let mut admin = Player::new("admin")
        .with(Capability::Create)
        .with(Capability::RunCommand("kit".into()));
    let mut server = Server::default();
    let dispatcher = Dispatcher::new(messages());
    let binding = MobBinding::Command { alias: "kit".into(), command: "kit starter {}".into() };

    dispatcher
        .run(&Action::Create { mob: MobId(1), binding }, &mut admin, &mut server)
        .expect("create");
    assert!(server.binding(MobId(1)).is_some());

    let result = dispatcher.interact(MobId(1), &mut admin, &mut server).expect("bound");
    assert_eq!(result.expect("run"), Outcome::Completed);
    assert_eq!(admin.commands, ["kit starter admin"]);
}

#[test]
fn interacting_with_unbound_mob_does_nothing() {
    let mut player = Player::new("alex");
    let mut server = Server::default();
    assert!(Dispatcher::new(messages())
        .interact(MobId(42), &mut player, &mut server)
        .is_none());
}

// ---------------------------------------------------------------------------
// 2. Failure paths
// ---------------------------------------------------------------------------

#[rstest]
#[case::no_permission(
    Player::new("a"),
    Server::default().with_warp("spawn"),
    ActionError::Permission(Capability::UseWarp("spawn".into()))
)]
#[case::console(
    Player::console().with(Capability::UseWarp("spawn".into())),
    Server::default().with_warp("spawn"),
    ActionError::PlayerOnly
)]
#[case::missing_warp(
    Player::new("a").with(Capability::UseWarp("spawn".into())),
    Server::default(),
    ActionError::WarpNotFound("spawn".into())
)]
fn warp_failures(#[case] player: Player, #[case] server: Server, #[case] expected: ActionError) {
    let (mut player, mut server) = (player, server);
    let err = Dispatcher::new(messages())
        .run(&warp("spawn"), &mut player, &mut server)
        .unwrap_err();
    assert_eq!(err, expected);
    assert!(player.teleports.is_empty());
}

#[test]
fn failures_are_reported_with_catalog_text() {
    let mut player = Player::new("a").with(Capability::UseWarp("nowhere".into()));
    let mut server = Server::default();

    let err = Dispatcher::new(messages())
        .run_and_report(&warp("nowhere"), &mut player, &mut server)
        .unwrap_err();

    assert_eq!(err, ActionError::WarpNotFound("nowhere".into()));
    assert_eq!(player.sent, [translate("&cWarp &r&enowhere&r&c does not exist!")]);
}

#[test]
fn create_on_bound_mob_fails() {
    let mut admin = Player::new("admin").with(Capability::Create);
    let mut server = Server::default();
    server.bind(MobId(3), MobBinding::Warp { name: "spawn".into() });

    let err = Dispatcher::new(messages())
        .run(
            &Action::Create { mob: MobId(3), binding: MobBinding::Warp { name: "other".into() } },
            &mut admin,
            &mut server,
        )
        .unwrap_err();
    assert_eq!(err, ActionError::AlreadyExists);
    assert_eq!(server.binding(MobId(3)), Some(&MobBinding::Warp { name: "spawn".into() }));
}

#[test]
fn rejected_command_is_an_error() {
    let mut player = Player::new("alex").with(Capability::RunCommand("fly".into()));
    player.command_ok = false;

    let err = Dispatcher::new(messages())
        .run(
            &Action::RunCommand { alias: "fly".into(), command: "fly {}".into() },
            &mut player,
            &mut Server::default(),
        )
        .unwrap_err();
    assert_eq!(err, ActionError::CommandFailed("fly alex".into()));
}

#[test]
fn failed_teleport_sends_no_confirmation() {
    let mut player = Player::new("alex").with(Capability::UseWarp("spawn".into()));
    player.teleport_ok = false;
    let mut server = Server::default().with_warp("spawn");

    let err = Dispatcher::new(messages())
        .run(&warp("spawn"), &mut player, &mut server)
        .unwrap_err();
    assert_eq!(err, ActionError::TeleportFailed("spawn".into()));
    assert!(player.sent.is_empty());
}

#[test]
fn command_template_without_token_is_a_message_error() {
    let mut player = Player::new("alex").with(Capability::RunCommand("x".into()));
    let err = Dispatcher::new(messages())
        .run(
            &Action::RunCommand { alias: "x".into(), command: "{} {}".into() },
            &mut player,
            &mut Server::default(),
        )
        .unwrap_err();
    assert!(matches!(err, ActionError::Message(_)), "got {err:?}");
}

// ---------------------------------------------------------------------------
// 3. Hooks
// ---------------------------------------------------------------------------

fn deny_spawn(pending: &Pending<'_>) -> bool {
    !matches!(pending.action, Action::Warp { name } if name.0 == "spawn")
}

fn deny_ban_alex(pending: &Pending<'_>) -> bool {
    pending.command != Some("ban alex")
}

struct Counter(Arc<AtomicUsize>);

impl Hook for Counter {
    fn allow(&self, _pending: &Pending<'_>) -> bool {
        self.0.fetch_add(1, Ordering::SeqCst);
        true
    }
}

#[test]
fn function_hook_vetoes_selectively() {
    let mut player = Player::new("alex")
        .with(Capability::UseWarp("spawn".into()))
        .with(Capability::UseWarp("market".into()));
    let mut server = Server::default().with_warp("spawn").with_warp("market");
    let dispatcher = Dispatcher::new(messages()).with_hook(deny_spawn);

    assert_eq!(dispatcher.run(&warp("spawn"), &mut player, &mut server).unwrap(), Outcome::Vetoed);
    assert_eq!(dispatcher.run(&warp("market"), &mut player, &mut server).unwrap(), Outcome::Completed);
    assert_eq!(player.teleports, [WarpName::from("market")]);
}

#[test]
fn hooks_see_rendered_command_and_stop_at_first_veto() {
    let seen = Arc::new(AtomicUsize::new(0));
    let mut dispatcher = Dispatcher::new(messages());
    dispatcher.add_hook(Counter(Arc::clone(&seen)));
    dispatcher.add_hook(deny_ban_alex);
    dispatcher.add_hook(Counter(Arc::clone(&seen)));

    let mut player = Player::new("alex").with(Capability::RunCommand("ban".into()));
    let outcome = dispatcher
        .run(
            &Action::RunCommand { alias: "ban".into(), command: "ban {}".into() },
            &mut player,
            &mut Server::default(),
        )
        .unwrap();

    assert_eq!(outcome, Outcome::Vetoed);
    assert_eq!(seen.load(Ordering::SeqCst), 1, "hooks after a veto must not run");
    assert!(player.commands.is_empty());
}

#[test]
fn reloaded_catalog_is_used_for_later_messages() {
    let catalog = messages();
    let dispatcher = Dispatcher::new(Arc::clone(&catalog));

    let mut config = MessageConfig::default();
    config.messages.insert(MessageKey::from("warp-success"), "&dWhoosh: {}".to_string());
    catalog.reload(MessageSet::from_config(&config));

    let mut player = Player::new("alex").with(Capability::UseWarp("spawn".into()));
    let mut server = Server::default().with_warp("spawn");
    dispatcher.run(&warp("spawn"), &mut player, &mut server).unwrap();
    assert_eq!(player.sent, [translate("&dWhoosh: spawn")]);
}

// ---------------------------------------------------------------------------
// 4. Reporting
// ---------------------------------------------------------------------------

fn messages_with(key: &str, template: &str) -> Arc<MessageCatalog> {
    let mut config = catalog::defaults().expect("defaults");
    config.messages.insert(MessageKey::from(key), template.to_string());
    Arc::new(MessageCatalog::from_config(&config))
}

#[test]
fn permission_message_names_missing_capability() {
    let mut player = Player::new("alex");
    let mut server = Server::default().with_warp("spawn");
    let dispatcher = Dispatcher::new(messages_with("permission-error", "&cMissing permission {&e}"));

    let err = dispatcher
        .run_and_report(&warp("spawn"), &mut player, &mut server)
        .unwrap_err();

    assert_eq!(err, ActionError::Permission(Capability::UseWarp("spawn".into())));
    assert_eq!(player.sent, [translate("&cMissing permission &r&ewarp.spawn&r&c")]);
}

#[test]
fn unrenderable_report_keeps_original_error() {
    let mut player = Player::new("alex");
    let mut server = Server::default().with_warp("spawn");
    let dispatcher = Dispatcher::new(messages_with("permission-error", "&c{} lacks {}"));

    let err = dispatcher
        .run_and_report(&warp("spawn"), &mut player, &mut server)
        .unwrap_err();

    assert_eq!(err, ActionError::Permission(Capability::UseWarp("spawn".into())));
    assert!(player.sent.is_empty());
}

// ---------------------------------------------------------------------------
// 5. Warp management
// ---------------------------------------------------------------------------

#[test]
fn set_warp_records_owner_and_refuses_duplicates() {
    let mut player = Player::new("alex").with(Capability::SetWarp);
    let mut server = Server::default();
    let dispatcher = Dispatcher::new(messages());
    let set = Action::SetWarp { name: "market".into() };

    dispatcher.run(&set, &mut player, &mut server).expect("set");
    assert_eq!(server.warps.get(&WarpName::from("market")).map(String::as_str), Some("alex"));
    assert_eq!(player.sent, [translate("&aWarp &r&emarket&r&a created!")]);

    let err = dispatcher.run_and_report(&set, &mut player, &mut server).unwrap_err();
    assert_eq!(err, ActionError::WarpExists("market".into()));
    assert_eq!(player.sent[1], translate("&cWarp &r&emarket&r&c already exists!"));
}

#[test]
fn failed_removal_reports_missing_warp() {
    let mut player = Player::new("alex").with(Capability::RemoveWarp);
    let mut server = Server::default().with_warp("spawn");
    server.removal_fails = true;

    let err = Dispatcher::new(messages())
        .run_and_report(&Action::DeleteWarp { name: "spawn".into() }, &mut player, &mut server)
        .unwrap_err();

    assert_eq!(err, ActionError::WarpNotFound("spawn".into()));
    assert_eq!(player.sent, [translate("&cWarp &r&espawn&r&c does not exist!")]);
}

#[test]
fn list_sends_count_then_names() {
    let mut console = Player::console().with(Capability::ListWarps);
    let mut server = Server::default().with_warp("spawn").with_warp("market");

    Dispatcher::new(messages())
        .run(&Action::ListWarps, &mut console, &mut server)
        .expect("list");

    assert_eq!(
        console.sent,
        [translate("&6Available warps &7(2&7):"), "market, spawn".to_string()]
    );
}

#[test]
fn empty_list_sends_only_header() {
    let mut player = Player::new("alex").with(Capability::ListWarps);
    Dispatcher::new(messages())
        .run(&Action::ListWarps, &mut player, &mut Server::default())
        .expect("list");
    assert_eq!(player.sent, [translate("&6Available warps &7(0&7):")]);
}

// ---------------------------------------------------------------------------
// 6. Create / remove modes
// ---------------------------------------------------------------------------

#[test]
fn create_mode_binds_next_mob_and_names_it() {
    let mut player = Player::new("alex").with(Capability::Create);
    let mut server = Server::default().with_warp("spawn");
    let dispatcher = Dispatcher::new(messages());
    let binding = MobBinding::Warp { name: "spawn".into() };

    dispatcher
        .run(&Action::StartCreate { binding: binding.clone() }, &mut player, &mut server)
        .expect("start");
    assert_eq!(player.mode, Mode::Creating(binding.clone()));
    assert_eq!(
        player.sent,
        [
            translate("&6Right click a mob to make it interactive."),
            translate("&7Type &e/ma cancel &7to cancel."),
        ]
    );

    let outcome = dispatcher.interact(MobId(9), &mut player, &mut server).expect("edit");
    assert_eq!(outcome, Ok(Outcome::Completed));
    assert_eq!(player.mode, Mode::Idle);
    assert_eq!(server.binding(MobId(9)), Some(&binding));
    assert_eq!(server.names.get(&MobId(9)), Some(&translate("&b&r&lspawn&r&b")));
}

#[test]
fn create_mode_for_missing_warp_is_refused() {
    let mut player = Player::new("alex").with(Capability::Create);
    let err = Dispatcher::new(messages())
        .run(
            &Action::StartCreate { binding: MobBinding::Warp { name: "nowhere".into() } },
            &mut player,
            &mut Server::default(),
        )
        .unwrap_err();
    assert_eq!(err, ActionError::WarpNotFound("nowhere".into()));
    assert_eq!(player.mode, Mode::Idle);
}

#[test]
fn create_mode_stays_active_when_mob_is_taken() {
    let binding = MobBinding::Warp { name: "spawn".into() };
    let mut player = Player::new("alex").with(Capability::Create);
    player.mode = Mode::Creating(binding.clone());
    let mut server = Server::default().with_warp("spawn");
    server.bind(MobId(2), MobBinding::Warp { name: "spawn".into() });

    let result = Dispatcher::new(messages())
        .interact(MobId(2), &mut player, &mut server)
        .expect("edit");
    assert_eq!(result, Err(ActionError::AlreadyExists));
    assert_eq!(player.mode, Mode::Creating(binding));
}

#[test]
fn remove_mode_unbinds_next_mob() {
    let mut player = Player::new("alex").with(Capability::Remove);
    let mut server = Server::default();
    server.bind(MobId(4), MobBinding::Warp { name: "spawn".into() });
    server.names.insert(MobId(4), "label".to_string());
    let dispatcher = Dispatcher::new(messages());

    dispatcher.run(&Action::StartRemove, &mut player, &mut server).expect("start");
    assert_eq!(player.mode, Mode::Removing);

    let outcome = dispatcher.interact(MobId(4), &mut player, &mut server).expect("edit");
    assert_eq!(outcome, Ok(Outcome::Completed));
    assert!(server.binding(MobId(4)).is_none());
    assert!(server.names.is_empty());
    assert_eq!(player.mode, Mode::Idle);
    assert_eq!(player.sent.last(), Some(&translate("&aInteractive mob removed!")));
}

#[test]
fn removing_plain_mob_is_an_error() {
    let mut player = Player::new("alex").with(Capability::Remove);
    player.mode = Mode::Removing;
    let result = Dispatcher::new(messages())
        .interact(MobId(5), &mut player, &mut Server::default())
        .expect("edit");
    assert_eq!(result, Err(ActionError::NotInteractive));
}

#[test]
fn cancel_leaves_mode() {
    let mut player = Player::new("alex");
    player.mode = Mode::Removing;
    let dispatcher = Dispatcher::new(messages());

    dispatcher.run(&Action::Cancel, &mut player, &mut Server::default()).expect("cancel");
    assert_eq!(player.mode, Mode::Idle);
    assert_eq!(player.sent, [translate("&aAction cancelled.")]);

    let err = dispatcher
        .run_and_report(&Action::Cancel, &mut player, &mut Server::default())
        .unwrap_err();
    assert_eq!(err, ActionError::NothingToCancel);
    assert_eq!(player.sent[1], translate("&cThere is nothing to cancel."));
}

// ---------------------------------------------------------------------------
// 7. Reload and console
// ---------------------------------------------------------------------------

#[test]
fn reload_swaps_catalog_and_confirms_in_new_text() {
    let catalog = messages();
    let dispatcher = Dispatcher::new(Arc::clone(&catalog));
    let mut config = MessageConfig::default();
    config.messages.insert(MessageKey::from("reload-complete"), "&aFresh!".to_string());
    let mut server = Server { config: Some(config), ..Server::default() };
    let mut console = Player::console().with(Capability::Reload);

    dispatcher.run(&Action::Reload, &mut console, &mut server).expect("reload");

    assert_eq!(console.sent, [translate("&aFresh!")]);
    assert_eq!(catalog.snapshot().len(), 1);
}

#[test]
fn failed_reload_keeps_old_catalog() {
    let catalog = messages();
    let before = catalog.snapshot().len();
    let mut console = Player::console().with(Capability::Reload);

    let err = Dispatcher::new(Arc::clone(&catalog))
        .run_and_report(&Action::Reload, &mut console, &mut Server::default())
        .unwrap_err();

    assert!(matches!(err, ActionError::ReloadFailed(_)), "got {err:?}");
    assert_eq!(catalog.snapshot().len(), before);
    assert_eq!(
        console.sent,
        [translate("&cFailed to reload the configuration. Check the server log.")]
    );
}

#[test]
fn console_is_told_to_use_a_player() {
    let mut console = Player::console().with(Capability::Create);
    let err = Dispatcher::new(messages())
        .run_and_report(&Action::StartRemove, &mut console, &mut Server::default())
        .unwrap_err();
    assert_eq!(err, ActionError::PlayerOnly);
    assert_eq!(console.sent, [translate("&cThis command can only be run by a player.")]);
}
