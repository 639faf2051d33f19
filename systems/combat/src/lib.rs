#![deny(
    unsafe_code,
    missing_docs,
    dead_code,
    unused_results,
    non_snake_case,
    unreachable_pub
)]

//! Collision resolution handlers.
//!
//! The collision pass only reports overlaps; this system decides what they
//! mean. Laser hits damage hostiles and reward the hero, contacts with the
//! hero cost lives or grant shields, and both may end the stage or the game.

use star_siege_core::{EntityId, EntityKind, Event, EventBus, Topic};
use star_siege_system_stage_director::check_stage_clear;
use star_siege_world::World;
use tracing::debug;

/// Registers the collision handlers on the bus.
pub fn register(bus: &mut EventBus<World>) {
    bus.on(Topic::CollisionEnemyLaser, |world, event, _| {
        if let Event::CollisionEnemyLaser { laser, target } = *event {
            let _ = resolve_laser_hit(world, laser, target);
        }
    });
    bus.on(Topic::CollisionEnemyHero, |world, event, bus| {
        if let Event::CollisionEnemyHero { enemy } = *event {
            resolve_hero_contact(world, bus, enemy);
        }
    });
}

/// Applies a laser hit on an enemy or the boss.
///
/// Every hit awards points and gauge charge and consumes one hit credit of
/// the laser. Enemies die outright and may drop a shield pickup; the boss
/// loses life equal to the laser damage. Returns `true` when the target was
/// destroyed.
pub fn resolve_laser_hit(world: &mut World, laser: EntityId, target: EntityId) -> bool {
    let Some(damage) = world
        .entity(laser)
        .filter(|entity| !entity.is_dead())
        .and_then(|entity| entity.as_laser())
        .map(|payload| payload.damage())
    else {
        return false;
    };
    let Some((kind, x, y)) = world
        .entity(target)
        .filter(|entity| !entity.is_dead())
        .map(|entity| (entity.kind(), entity.x(), entity.y()))
    else {
        return false;
    };

    let destroyed = match kind {
        EntityKind::Boss => world.damage_boss(target, damage),
        EntityKind::Enemy => {
            let _ = world.kill(target);
            true
        }
        _ => return false,
    };

    world.reward_hit(damage);
    if kind == EntityKind::Enemy && world.roll_shield_drop(x, y) {
        debug!(x, y, "shield dropped");
    }
    world.spend_laser(laser);

    if destroyed {
        let _ = check_stage_clear(world);
    }
    destroyed
}

/// Applies contact between the hero and `enemy`.
///
/// The boss and boss lasers cost one life unit, enemies cost one life unit
/// and die, shield pickups grant a shield charge. Publishes `GameEndLoss`
/// once the hero is dead, otherwise checks whether the stage was cleared.
pub fn resolve_hero_contact(world: &mut World, bus: &EventBus<World>, enemy: EntityId) {
    if !world.hero_alive() {
        return;
    }
    let Some(kind) = world
        .entity(enemy)
        .filter(|entity| !entity.is_dead())
        .map(|entity| entity.kind())
    else {
        return;
    };

    match kind {
        EntityKind::Boss | EntityKind::BossLaser => {
            let _ = world.damage_hero();
        }
        EntityKind::Enemy => {
            let _ = world.kill(enemy);
            let _ = world.damage_hero();
        }
        EntityKind::ShieldItem => {
            world.grant_shield();
            let _ = world.kill(enemy);
        }
        EntityKind::Hero | EntityKind::SideHero | EntityKind::Laser | EntityKind::Meteor => {
            return;
        }
    }

    if world.hero_alive() {
        let _ = check_stage_clear(world);
    } else {
        bus.emit(world, Event::GameEndLoss);
    }
}
