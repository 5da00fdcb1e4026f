//! Host-level ordering guarantees: notifications land before decisions,
//! deferred actions consume the tick's action budget, tasks stay independent.

use tickbot::action::RecordingActuator;
use tickbot::core::config::PacingConfig;
use tickbot::core::types::{EntityId, WorldPoint};
use tickbot::events::WorldEvent;
use tickbot::loot::LootFilter;
use tickbot::task::host::TaskHost;
use tickbot::tasks::gather::{GatherConfig, GatherTask};
use tickbot::tasks::protect::{ProtectConfig, ProtectTask};
use tickbot::tasks::sentry::{SentryConfig, SentryTask};
use tickbot::world::entity::{Entity, EntityKind, ItemSlot};
use tickbot::world::scripted::ScriptedWorld;
use tickbot::world::snapshot::INVENTORY_CAPACITY;

fn full_inventory_world() -> ScriptedWorld {
    let mut world = ScriptedWorld::new(WorldPoint::new(0, 0, 0));
    for slot in 0..INVENTORY_CAPACITY as u32 {
        world.add_item(ItemSlot::new(slot, "Adamantite ore", 1));
    }
    world.add_entity(Entity::new(
        EntityId(9),
        EntityKind::Object,
        "Bank chest",
        WorldPoint::new(0, 1, 0),
    ));
    world
}

#[test]
fn deferred_deposit_fires_alone_on_its_tick() {
    let mut host = TaskHost::new();
    let id = host.register(
        Box::new(GatherTask::new(GatherConfig::default())),
        LootFilter::All,
        PacingConfig::default(),
    );
    host.start(id).unwrap();

    let world = full_inventory_world();
    let mut actuator = RecordingActuator::new();

    host.tick(&world, &mut actuator); // full inventory -> Banking
    host.tick(&world, &mut actuator); // Use bank, deposit deferred
    let opened = actuator.take_all();
    assert_eq!(opened.len(), 1);
    assert_eq!(opened[0].verb, "Use");

    host.tick(&world, &mut actuator); // deferred countdown, no action
    assert!(actuator.take_all().is_empty());

    host.tick(&world, &mut actuator); // deferred Deposit-All, nothing else
    let deposited = actuator.take_all();
    assert_eq!(deposited.len(), 1);
    assert_eq!(deposited[0].verb, "Deposit-All");
}

#[test]
fn text_event_lands_before_the_same_ticks_decision() {
    let mut host = TaskHost::new();
    let config = SentryConfig {
        respond_interval: 0,
        watch_interval: 0,
        ..Default::default()
    };
    let id = host.register(
        Box::new(SentryTask::new(config)),
        LootFilter::All,
        PacingConfig::default(),
    );
    host.start(id).unwrap();

    let mut world = ScriptedWorld::new(WorldPoint::new(0, 0, 0));
    world.add_entity(Entity::new(
        EntityId(3),
        EntityKind::Actor,
        "Security guard",
        WorldPoint::new(0, 2, 2),
    ));
    let mut actuator = RecordingActuator::new();

    // The announcement is queued before the tick; the very same tick's
    // decision must already see the toggled state and engage.
    host.push_event(WorldEvent::Text("A security guard has been spawned!".into()));
    host.tick(&world, &mut actuator);

    let actions = actuator.take_all();
    assert_eq!(actions.len(), 1);
    assert_eq!(actions[0].verb, "Talk-to");
}

#[test]
fn projectile_reaction_is_not_delayed_by_another_tasks_cooldown() {
    let mut host = TaskHost::new();
    let sentry = host.register(
        Box::new(SentryTask::new(SentryConfig {
            watch_interval: 50,
            ..Default::default()
        })),
        LootFilter::All,
        PacingConfig::default(),
    );
    let protect = host.register(
        Box::new(ProtectTask::new(ProtectConfig::default())),
        LootFilter::All,
        PacingConfig::default(),
    );
    host.start(sentry).unwrap();
    host.start(protect).unwrap();

    let world = ScriptedWorld::new(WorldPoint::new(0, 0, 0));
    let mut actuator = RecordingActuator::new();
    host.tick(&world, &mut actuator); // sentry parks on its long timer
    actuator.take_all();

    // The launch lands and the protection toggles on the very same tick
    host.push_event(WorldEvent::ProjectileLaunched(1046));
    host.tick(&world, &mut actuator);
    let actions = actuator.take_all();
    assert_eq!(actions.len(), 1);
    assert_eq!(actions[0].verb, "Activate");
}

#[test]
fn tasks_keep_independent_cooldowns() {
    let mut host = TaskHost::new();
    let sentry = host.register(
        Box::new(SentryTask::new(SentryConfig {
            watch_interval: 50,
            ..Default::default()
        })),
        LootFilter::All,
        PacingConfig::default(),
    );
    let gather = host.register(
        Box::new(GatherTask::new(GatherConfig::default())),
        LootFilter::All,
        PacingConfig::default(),
    );
    host.start(sentry).unwrap();
    host.start(gather).unwrap();

    let world = full_inventory_world();
    let mut actuator = RecordingActuator::new();

    // The sentry parks itself on a long cooldown; the gatherer still
    // proceeds through its own banking cycle.
    for _ in 0..3 {
        host.tick(&world, &mut actuator);
    }
    let verbs: Vec<_> = actuator.take_all().into_iter().map(|a| a.verb).collect();
    assert!(verbs.contains(&"Use".to_string()));
    assert!(!verbs.iter().any(|v| v == "Talk-to"));
}
