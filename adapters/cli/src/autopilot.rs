//! Scripted pilot driving headless runs.

use star_siege_core::{EntityKind, InputKey, WeaponKind, GAUGE_MAX, HERO_STEP};
use star_siege_world::{query, World};

/// Tracks the nearest hostile horizontally and fires every tick.
///
/// The pilot switches to the penetrating weapon first and calls a meteor
/// strike whenever the gauge is full.
#[derive(Debug, Default)]
pub(crate) struct Autopilot {
    decisions: u64,
}

impl Autopilot {
    /// Keys to press before the next tick.
    pub(crate) fn next_keys(&mut self, world: &World) -> Vec<InputKey> {
        if !world.phase().is_active() {
            return Vec::new();
        }
        let Some(hero) = query::hero(world).filter(|hero| !hero.dead) else {
            return Vec::new();
        };
        self.decisions += 1;

        let mut keys = Vec::new();
        if hero.weapon != WeaponKind::Green {
            keys.push(InputKey::CycleWeapon);
        }
        if hero.gauge >= GAUGE_MAX {
            keys.push(InputKey::Meteor);
        }

        let hero_center = hero.bounds.left() + hero.bounds.width() / 2.0;
        let target = query::entity_view(world)
            .iter()
            .filter(|entity| matches!(entity.kind, EntityKind::Enemy | EntityKind::Boss))
            .map(|entity| entity.bounds.left() + entity.bounds.width() / 2.0)
            .min_by(|a, b| (a - hero_center).abs().total_cmp(&(b - hero_center).abs()));
        if let Some(target) = target {
            let offset = target - hero_center;
            if offset > HERO_STEP / 2.0 {
                keys.push(InputKey::Right);
            } else if offset < -HERO_STEP / 2.0 {
                keys.push(InputKey::Left);
            }
        }

        keys.push(InputKey::Space);
        keys
    }

    /// Number of ticks the pilot has acted in.
    pub(crate) fn decisions(&self) -> u64 {
        self.decisions
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use star_siege_core::Phase;
    use star_siege_world::GameConfig;

    #[test]
    fn pilot_switches_to_green_and_fires() {
        let world = World::new(GameConfig::default());
        let mut pilot = Autopilot::default();
        let keys = pilot.next_keys(&world);
        assert_eq!(keys.first(), Some(&InputKey::CycleWeapon));
        assert_eq!(keys.last(), Some(&InputKey::Space));
        assert_eq!(pilot.decisions(), 1);
    }

    #[test]
    fn pilot_steers_toward_nearest_hostile() {
        let mut world = World::new(GameConfig::default());
        world.remove_hostiles();
        let hero = query::hero(&world).expect("hero");
        let _ = world
            .spawn_scripted(EntityKind::Enemy, hero.bounds.left() + 300.0, 100.0)
            .expect("enemy");
        let _ = world
            .spawn_scripted(EntityKind::Enemy, hero.bounds.left() - 600.0, 100.0)
            .expect("enemy");

        let keys = Autopilot::default().next_keys(&world);
        assert!(keys.contains(&InputKey::Right));
        assert!(!keys.contains(&InputKey::Left));
    }

    #[test]
    fn pilot_calls_meteor_on_full_gauge() {
        let mut world = World::new(GameConfig::default());
        world.charge_gauge();
        let keys = Autopilot::default().next_keys(&world);
        assert!(keys.contains(&InputKey::Meteor));
    }

    #[test]
    fn pilot_idles_outside_active_phases() {
        let mut world = World::new(GameConfig::default());
        world.force_phase(Phase::Lost);
        let mut pilot = Autopilot::default();
        assert!(pilot.next_keys(&world).is_empty());
        assert_eq!(pilot.decisions(), 0);
    }
}
