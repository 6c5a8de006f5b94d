use std::sync::Arc;

use anyhow::{Context, Result};
use rung_engine::causal::graph::CausalGraph;
use rung_engine::causal::scheduler::Scheduler;
use rung_engine::rules::RuleSet;
use rung_engine::world::World;
use rung_engine::world::face::Face;
use rung_engine::world::position::{BlockPos, Vec3};
use rung_server::block::info::{Tool, ToolKind};
use rung_server::block::{self, Block, Ladder};
use rung_server::changes;
use rung_server::entity::{self, FallDistance, Player};
use rung_server::interaction::{self, UseContext};
use rung_server::registry::Registry;
use rung_server::tx::Tx;

/// Default ladder column height for the demo.
const DEFAULT_HEIGHT: i64 = 4;

fn main() -> Result<()> {
    let use_parallel = std::env::args().any(|a| a == "--parallel");
    let height: i64 = match std::env::args().skip_while(|a| a != "--height").nth(1) {
        Some(s) => s.parse().with_context(|| format!("invalid --height {s:?}"))?,
        None => DEFAULT_HEIGHT,
    };

    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("info")),
        )
        .init();

    tracing::info!("Ladder demo on the causal voxel engine");

    let registry = Arc::new(Registry::bootstrap()?);
    tracing::info!("Registered {} block states", registry.len());

    let world = World::new();
    generate_flat_world(&world, &registry, 8)?;

    // A stone pillar to hang ladders on.
    let wall_base = BlockPos::new(0, 5, 0);
    let stone = registry.id(&block::STONE).context("stone is not registered")?;
    world.fill(wall_base, BlockPos::new(0, 4 + height, 0), stone);

    let rules = rung_server::rules::standard(Arc::clone(&registry));
    let scheduler = Scheduler::new();
    let run = |graph: &mut CausalGraph, rules: &RuleSet| {
        if use_parallel {
            scheduler.run_until_quiet_parallel(&world, graph, rules, 1000)
        } else {
            scheduler.run_until_quiet(&world, graph, rules, 1000)
        }
    };

    // ── Climb up: hang a ladder on every south face of the pillar ───────
    let mut player = Player::new("demo", Vec3::new(0.5, 5.0, 3.5));
    let held = Block::from(Ladder::new(Face::North));
    let mut placed = 0;
    for y in 5..5 + height {
        let mut raw = world.transaction();
        let mut tx = Tx::new(&mut raw, &registry);
        let mut ctx = UseContext::new();
        let wall = BlockPos::new(0, y, 0);
        if interaction::use_item_on_block(&mut tx, &held, wall, Face::South, wall.centre(), &mut player, &mut ctx) {
            placed += 1;
        }
        let mut graph = CausalGraph::new();
        graph.insert_batch(raw.into_batch());
        run(&mut graph, &rules);
    }
    tracing::info!("Placed {} ladders", placed);

    // ── Fall down the ladder: the fall distance never builds up ─────────
    player.position = Vec3::new(0.5, (4 + height) as f64, 1.5);
    while player.position.y > 5.0 {
        player.fall(0.5);
        let mut raw = world.transaction();
        let mut tx = Tx::new(&mut raw, &registry);
        entity::tick_entity_inside(&mut tx, &mut player);
    }
    tracing::info!("Fall distance at the bottom: {}", player.fall_distance());

    // ── Mine the pillar: every ladder loses its wall and drops ──────────
    let mut graph = CausalGraph::new();
    {
        let mut raw = world.transaction();
        let mut tx = Tx::new(&mut raw, &registry);
        for y in 5..5 + height {
            interaction::break_block(&mut tx, BlockPos::new(0, y, 0), Tool::new(ToolKind::Pickaxe, 4.0));
        }
        graph.insert_batch(raw.into_batch());
    }
    let total = run(&mut graph, &rules);

    let block_changes = changes::collect_block_changes(&graph);
    let effects = changes::collect_effects(&graph);
    tracing::info!(
        "Quiescence after {} events: {} block changes, {} effects, causal depth {}",
        total,
        block_changes.len(),
        effects.len(),
        graph.max_depth()
    );
    for (pos, id) in &block_changes {
        let name = registry.block(*id).map(|b| b.name()).unwrap_or("unknown");
        tracing::info!("  {:?} -> {}", pos, name);
    }

    let remaining = (5..5 + height)
        .filter(|y| !world.get_block(BlockPos::new(0, *y, 1)).is_air())
        .count();
    if remaining == 0 {
        tracing::info!("All ladders came down with the pillar.");
    } else {
        tracing::warn!("{} ladders are still hanging -- something is off.", remaining);
    }

    Ok(())
}

/// Bedrock at y=0, stone y=1..=3, dirt at y=4.
fn generate_flat_world(world: &World, registry: &Registry, radius: i64) -> Result<()> {
    let id = |b: &Block| registry.id(b).with_context(|| format!("{} is not registered", b.name()));
    world.fill(BlockPos::new(-radius, 0, -radius), BlockPos::new(radius, 0, radius), id(&block::BEDROCK)?);
    world.fill(BlockPos::new(-radius, 1, -radius), BlockPos::new(radius, 3, radius), id(&block::STONE)?);
    world.fill(BlockPos::new(-radius, 4, -radius), BlockPos::new(radius, 4, radius), id(&block::DIRT)?);
    tracing::info!("World ready: {} blocks", world.len());
    Ok(())
}
