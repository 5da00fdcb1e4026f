//! Scripted boss-run demo
//!
//! Drives a [`BossTask`] against a small simulated arena: the harness
//! replays each dispatched action into world mutations and notification
//! pushes, the way a live host would. Useful for eyeballing the decision
//! cadence with `RUST_LOG=tickbot=debug`.

use clap::Parser;
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};

use tickbot::action::{Action, ActionKind, RecordingActuator};
use tickbot::core::config::PacingConfig;
use tickbot::core::error::Result;
use tickbot::core::types::{EntityId, PromptId, WorldPoint};
use tickbot::events::WorldEvent;
use tickbot::loot::LootFilter;
use tickbot::task::host::TaskHost;
use tickbot::tasks::boss::{BossConfig, BossTask};
use tickbot::world::entity::{Entity, EntityKind, Vital, VitalLevel};
use tickbot::world::scripted::ScriptedWorld;

const PLAYER: EntityId = EntityId(1000);
const BOAT: EntityId = EntityId(1);
const BOSS: EntityId = EntityId(2);

#[derive(Parser, Debug)]
#[command(name = "sim")]
#[command(about = "Run the boss automation against a scripted arena")]
struct Args {
    /// Number of host ticks to simulate
    #[arg(long, default_value_t = 120)]
    ticks: u64,

    /// Optional pacing config (TOML)
    #[arg(long)]
    config: Option<std::path::PathBuf>,

    /// Random seed for loot rolls
    #[arg(long, default_value_t = 7)]
    seed: u64,

    /// Write the dispatched actions as pretty JSON to this file
    #[arg(long)]
    journal: Option<std::path::PathBuf>,
}

/// Harness-side reactions still pending
#[derive(Default)]
struct ArenaScript {
    boss_spawns_in: Option<u32>,
    boss_dies_in: Option<u32>,
    next_item_id: u64,
}

fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            std::env::var("RUST_LOG").unwrap_or_else(|_| "tickbot=info".into()),
        )
        .init();

    let args = Args::parse();
    let pacing = match &args.config {
        Some(path) => PacingConfig::load(path)?,
        None => PacingConfig::default(),
    };

    let mut rng = StdRng::seed_from_u64(args.seed);

    let mut world = ScriptedWorld::new(WorldPoint::new(0, 10, 10));
    world.add_entity(Entity::new(
        BOAT,
        EntityKind::Object,
        "Sacrificial Boat",
        WorldPoint::new(0, 12, 10),
    ));
    world.set_vital(Vital::Prayer, VitalLevel::new(70, 70));
    world.set_vital(Vital::Health, VitalLevel::new(99, 99));

    let mut host = TaskHost::new();
    let task_id = host.register(
        Box::new(BossTask::new(BossConfig::default())),
        LootFilter::whitelist(["coins", "zulrah's scales", "battlestaff", "coconut"]),
        pacing,
    );
    if let Some(ctx) = host.context_mut(task_id) {
        ctx.agent = Some(PLAYER);
    }
    host.start(task_id)?;

    let mut actuator = RecordingActuator::new();
    let mut script = ArenaScript::default();
    let mut journal: Vec<Action> = Vec::new();

    for _ in 0..args.ticks {
        advance_script(&mut script, &mut world, &mut host, &mut rng);
        host.tick(&world, &mut actuator);
        for action in actuator.take_all() {
            apply_action(&action, &mut script, &mut world, &mut host);
            journal.push(action);
        }
    }

    tracing::info!(ticks = args.ticks, issued = journal.len(), "Simulation finished");
    if let Some(path) = &args.journal {
        std::fs::write(path, serde_json::to_string_pretty(&journal)?)?;
        tracing::info!(path = %path.display(), "Action journal written");
    }
    Ok(())
}

/// Play out countdowns the previous actions started
fn advance_script(
    script: &mut ArenaScript,
    world: &mut ScriptedWorld,
    host: &mut TaskHost,
    rng: &mut StdRng,
) {
    if let Some(remaining) = script.boss_spawns_in {
        if remaining == 0 {
            script.boss_spawns_in = None;
            world.add_entity(Entity::new(
                BOSS,
                EntityKind::Actor,
                "Zulrah",
                WorldPoint::new(0, 14, 14),
            ));
            tracing::info!("[arena] boss surfaced");
        } else {
            script.boss_spawns_in = Some(remaining - 1);
        }
    }
    if let Some(remaining) = script.boss_dies_in {
        if remaining == 0 {
            script.boss_dies_in = None;
            world.remove_entity(BOSS);
            tracing::info!("[arena] boss slain");
            for name in ["Coins", "Zulrah's scales", "Swamp tar"] {
                if rng.gen_bool(0.8) {
                    script.next_item_id += 1;
                    let drop = Entity::new(
                        EntityId(5000 + script.next_item_id),
                        EntityKind::GroundItem,
                        name,
                        WorldPoint::new(0, 14 + rng.gen_range(-1..=1), 14 + rng.gen_range(-1..=1)),
                    );
                    world.add_entity(drop.clone());
                    host.push_event(WorldEvent::EntityAppeared(drop));
                }
            }
        } else {
            script.boss_dies_in = Some(remaining - 1);
        }
    }
}

/// Translate one dispatched intent into arena consequences
fn apply_action(
    action: &Action,
    script: &mut ArenaScript,
    world: &mut ScriptedWorld,
    host: &mut TaskHost,
) {
    match (action.verb.as_str(), action.kind) {
        ("Board", ActionKind::ObjectFirstOption) => {
            world.set_prompt(tickbot::world::entity::Prompt::new(
                PromptId(400),
                vec!["No".into(), "Yes".into()],
            ));
        }
        // The boarding confirmation; the blind post-teleport continue
        // carries a different prompt id and falls through harmlessly.
        ("Continue", ActionKind::PromptContinue) if action.param1 == 400 => {
            world.clear_prompt();
            // Ride across; the player lands in the instance
            world.set_player(WorldPoint::new(0, 13, 13));
            script.boss_spawns_in = Some(6);
        }
        ("Attack", ActionKind::ActorSecondOption) => {
            script.boss_dies_in = Some(8);
        }
        ("Take", ActionKind::GroundItemThirdOption) => {
            let id = EntityId(action.target_id as u64);
            if world.remove_entity(id).is_some() {
                host.push_event(WorldEvent::EntityVanished(id));
            }
        }
        ("Previous-teleport", ActionKind::ComponentOp) => {
            world.set_player(WorldPoint::new(0, 10, 10));
            host.push_event(WorldEvent::ActorRemoved(PLAYER));
        }
        _ => {}
    }
}
