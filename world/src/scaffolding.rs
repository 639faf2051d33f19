//! Scripted placement helpers for scenario tests.
//!
//! Stage populations are randomized, so tests that need a hostile at an exact
//! spot inject it through these helpers instead.

use star_siege_core::{EntityId, EntityKind, Phase, WeaponKind};

use crate::{Entity, World};

impl World {
    /// Spawns an entity of `kind` at the provided position.
    ///
    /// Lasers carry the red weapon payload; use [`World::spawn_scripted_laser`]
    /// for other weapons. Returns `None` for the hero and escorts, which exist
    /// exactly once per world.
    pub fn spawn_scripted(&mut self, kind: EntityKind, x: f32, y: f32) -> Option<EntityId> {
        let id = self.allocate_id();
        let entity = match kind {
            EntityKind::Hero | EntityKind::SideHero => return None,
            EntityKind::Enemy => Entity::enemy(id, x, y),
            EntityKind::Boss => Entity::boss(id, x, y),
            EntityKind::Laser => Entity::laser(id, x, y, WeaponKind::Red),
            EntityKind::BossLaser => Entity::boss_laser(id, x, y, 0.0, 20.0),
            EntityKind::ShieldItem => Entity::shield_item(id, x, y),
            EntityKind::Meteor => Entity::meteor(id, x, y),
        };
        self.entities.push(entity);
        Some(id)
    }

    /// Spawns a laser fired by `weapon` at the provided position.
    pub fn spawn_scripted_laser(&mut self, weapon: WeaponKind, x: f32, y: f32) -> EntityId {
        let id = self.allocate_id();
        self.entities.push(Entity::laser(id, x, y, weapon));
        id
    }

    /// Teleports an entity; moving the hero drags its escorts along.
    pub fn place(&mut self, id: EntityId, x: f32, y: f32) -> bool {
        let Some(entity) = self.entity_mut(id) else {
            return false;
        };
        entity.x = x;
        entity.y = y;
        if id == self.hero {
            self.align_escorts();
        }
        true
    }

    /// Removes every hostile from the stage without killing the hero.
    pub fn remove_hostiles(&mut self) {
        self.entities.retain(|entity| !entity.kind().is_hostile());
    }

    /// Jumps straight to `phase`, skipping the campaign order.
    pub fn force_phase(&mut self, phase: Phase) {
        self.phase = phase;
    }

    /// Fills the meteor gauge.
    pub fn charge_gauge(&mut self) {
        if let Some(hero) = self.hero_mut() {
            hero.add_gauge(star_siege_core::GAUGE_MAX);
        }
    }
}
