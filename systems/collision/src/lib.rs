#![deny(
    unsafe_code,
    missing_docs,
    dead_code,
    unused_results,
    non_snake_case,
    unreachable_pub
)]

//! Per-tick collision detection pass.
//!
//! The pass partitions the live entities, reports every overlapping pair on
//! the [`EventBus`] and finally prunes dead entities. Handlers run
//! synchronously while the pass iterates, so every pair re-reads the current
//! geometry and liveness by identifier instead of trusting the partition.

use star_siege_core::{EntityId, EntityKind, Event, EventBus, Rect};
use star_siege_world::World;
use tracing::trace;

/// Counters describing a single collision pass.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct PassSummary {
    /// Collision events published on the bus.
    pub published: usize,
    /// Dead entities removed at the end of the pass.
    pub pruned: usize,
}

#[derive(Debug, Default)]
struct Partition {
    hostiles: Vec<EntityId>,
    lasers: Vec<EntityId>,
    boss_lasers: Vec<EntityId>,
    shield_items: Vec<EntityId>,
}

impl Partition {
    fn capture(world: &World) -> Self {
        let mut partition = Self::default();
        for entity in world.entities().iter().filter(|entity| !entity.is_dead()) {
            let bucket = match entity.kind() {
                EntityKind::Enemy | EntityKind::Boss => &mut partition.hostiles,
                EntityKind::Laser => &mut partition.lasers,
                EntityKind::BossLaser => &mut partition.boss_lasers,
                EntityKind::ShieldItem => &mut partition.shield_items,
                EntityKind::Hero | EntityKind::SideHero | EntityKind::Meteor => continue,
            };
            bucket.push(entity.id());
        }
        partition
    }
}

/// Runs the collision pass once.
///
/// Steps, in order: partition, hero clamp, laser/hostile pairs, boss
/// laser/hero pairs (the boss laser is spent on contact), hostile/hero pairs,
/// shield item/hero pairs, prune. A pair is skipped once either side died
/// earlier in the same pass, and hero pairs are skipped once the hero died.
pub fn run_pass(world: &mut World, bus: &EventBus<World>) -> PassSummary {
    let partition = Partition::capture(world);
    world.clamp_hero();

    let mut published = 0;
    for &laser in &partition.lasers {
        for &target in &partition.hostiles {
            if overlapping(world, laser, target) {
                bus.emit(world, Event::CollisionEnemyLaser { laser, target });
                published += 1;
            }
        }
    }

    let hero = world.hero_id();
    for &enemy in &partition.boss_lasers {
        if overlapping(world, enemy, hero) {
            bus.emit(world, Event::CollisionEnemyHero { enemy });
            let _ = world.kill(enemy);
            published += 1;
        }
    }

    for &enemy in partition.hostiles.iter().chain(&partition.shield_items) {
        if overlapping(world, enemy, hero) {
            bus.emit(world, Event::CollisionEnemyHero { enemy });
            published += 1;
        }
    }

    let pruned = world.prune();
    trace!(
        hostiles = partition.hostiles.len(),
        lasers = partition.lasers.len(),
        boss_lasers = partition.boss_lasers.len(),
        shield_items = partition.shield_items.len(),
        published,
        pruned,
        "collision pass"
    );
    PassSummary { published, pruned }
}

fn live_bounds(world: &World, id: EntityId) -> Option<Rect> {
    world
        .entity(id)
        .filter(|entity| !entity.is_dead())
        .map(|entity| entity.bounds())
}

fn overlapping(world: &World, first: EntityId, second: EntityId) -> bool {
    match (live_bounds(world, first), live_bounds(world, second)) {
        (Some(first), Some(second)) => first.intersects(&second),
        _ => false,
    }
}
