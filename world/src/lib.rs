#![deny(
    unsafe_code,
    missing_docs,
    dead_code,
    unused_results,
    non_snake_case,
    unreachable_pub
)]

//! Authoritative world state management for Star Siege.
//!
//! The [`World`] owns every entity of a running game together with the stage
//! bookkeeping and the seeded random number generator. Player intent reaches
//! it through [`apply`]; the gameplay systems drive it through the narrow
//! mutation methods on [`World`] and read it through the [`query`] module.

mod cadence;
mod config;
mod entity;
mod hero;
#[cfg(any(test, feature = "scenario_scaffolding"))]
mod scaffolding;

use std::time::Duration;

use rand::{Rng, SeedableRng};
use rand_chacha::ChaCha8Rng;
use star_siege_core::{
    Arena, Command, EntityId, Phase, Rect, StageConfig, HERO_STEP, POINTS_PER_HIT,
};
use tracing::debug;

pub use config::{ConfigError, GameConfig};
pub use entity::{
    Boss, Entity, Laser, BOSS_LASER_SIZE, BOSS_SIZE, ENEMY_SIZE, HERO_SIZE, LASER_SIZE,
    METEOR_SIZE, SHIELD_ITEM_SIZE, SIDE_HERO_SIZE,
};
pub use hero::Hero;

use entity::{Spawn, TickEffects, Variant};

const GAUGE_PER_HIT: u32 = 100;
const GAUGE_PER_HEAVY_HIT: u32 = 200;
const SHIELD_DROPS_PER_STAGE: u32 = 2;
const SHIELD_DROP_CHANCE: f64 = 0.2;
const METEORS_PER_STRIKE: usize = 3;
const METEOR_ALTITUDE: f32 = -100.0;
const HERO_MUZZLE: (f32, f32) = (45.0, -10.0);
const HERO_START_INSET: f32 = 45.0;
const LEFT_ESCORT_OFFSET: (f32, f32) = (-50.0, 20.0);
const RIGHT_ESCORT_GAP: f32 = 10.0;
const ESCORT_DROP: f32 = 20.0;
const WAVE_ALTITUDE_BASE: f32 = 50.0;
const WAVE_ALTITUDE_SPREAD: f32 = 300.0;
const BOSS_ALTITUDE: f32 = 50.0;

/// Represents the authoritative Star Siege world state.
#[derive(Debug)]
pub struct World {
    config: GameConfig,
    rng: ChaCha8Rng,
    entities: Vec<Entity>,
    hero: EntityId,
    fallen_hero: Option<(Hero, Rect)>,
    next_id: u32,
    stage_index: usize,
    phase: Phase,
    shield_drops: u32,
    tick_index: u64,
}

impl World {
    /// Creates a world for the provided configuration with the first stage spawned.
    #[must_use]
    pub fn new(config: GameConfig) -> Self {
        let rng = ChaCha8Rng::seed_from_u64(config.seed);
        let mut world = Self {
            config,
            rng,
            entities: Vec::new(),
            hero: EntityId::new(0),
            fallen_hero: None,
            next_id: 0,
            stage_index: 0,
            phase: Phase::Won,
            shield_drops: 0,
            tick_index: 0,
        };

        let hero = world.allocate_id();
        let left = world.allocate_id();
        let right = world.allocate_id();
        world.hero = hero;
        world
            .entities
            .push(Entity::hero(hero, 0.0, 0.0, Hero::new([left, right])));
        world.entities.push(Entity::side_hero(left, 0.0, 0.0));
        world.entities.push(Entity::side_hero(right, 0.0, 0.0));

        let _ = world.start_stage(0);
        world
    }

    /// Configuration the world was created from.
    #[must_use]
    pub fn config(&self) -> &GameConfig {
        &self.config
    }

    /// Playfield dimensions.
    #[must_use]
    pub fn arena(&self) -> Arena {
        self.config.arena
    }

    /// Current stage director state.
    #[must_use]
    pub fn phase(&self) -> Phase {
        self.phase
    }

    /// Moves an active stage into the transition countdown.
    ///
    /// Returns the cleared stage index, or `None` when no stage is active.
    pub fn begin_transition(&mut self, delay: Duration) -> Option<usize> {
        if !self.phase.is_active() {
            return None;
        }
        let cleared = self.stage_index;
        self.phase = Phase::Transitioning {
            cleared,
            remaining: delay,
        };
        Some(cleared)
    }

    /// Shortens a pending transition by `dt`; returns the cleared stage index
    /// and the delay still left.
    pub fn count_down_transition(&mut self, dt: Duration) -> Option<(usize, Duration)> {
        let Phase::Transitioning { cleared, remaining } = self.phase else {
            return None;
        };
        let remaining = remaining.saturating_sub(dt);
        self.phase = Phase::Transitioning { cleared, remaining };
        Some((cleared, remaining))
    }

    /// Ends the campaign as won. Only a pending transition can end this way.
    pub fn declare_won(&mut self) -> bool {
        if !matches!(self.phase, Phase::Transitioning { .. }) {
            return false;
        }
        self.phase = Phase::Won;
        true
    }

    /// Ends the campaign as lost. Only an active stage can end this way.
    pub fn declare_lost(&mut self) -> bool {
        if !self.phase.is_active() {
            return false;
        }
        self.phase = Phase::Lost;
        true
    }

    /// Zero-based index of the current (or last cleared) stage.
    #[must_use]
    pub fn stage_index(&self) -> usize {
        self.stage_index
    }

    /// Configuration of the current stage.
    #[must_use]
    pub fn stage(&self) -> Option<&StageConfig> {
        self.config.stages.get(self.stage_index)
    }

    /// Number of stages in the campaign.
    #[must_use]
    pub fn stage_count(&self) -> usize {
        self.config.stages.len()
    }

    /// Number of entity ticks simulated so far.
    #[must_use]
    pub fn tick_index(&self) -> u64 {
        self.tick_index
    }

    /// Identifier of the hero.
    #[must_use]
    pub fn hero_id(&self) -> EntityId {
        self.hero
    }

    /// Every entity in enumeration order, including those awaiting the next prune.
    #[must_use]
    pub fn entities(&self) -> &[Entity] {
        &self.entities
    }

    /// Looks up an entity by identifier.
    #[must_use]
    pub fn entity(&self, id: EntityId) -> Option<&Entity> {
        self.entities.iter().find(|entity| entity.id() == id)
    }

    /// Hero entity, until a prune removes it after its death.
    #[must_use]
    pub fn hero_entity(&self) -> Option<&Entity> {
        self.entity(self.hero)
    }

    /// Hero payload; after the dead hero was pruned, its final state.
    #[must_use]
    pub fn hero(&self) -> Option<&Hero> {
        self.hero_entity()
            .and_then(Entity::as_hero)
            .or_else(|| self.fallen_hero.as_ref().map(|(hero, _)| hero))
    }

    /// Reports whether the hero still has lives left.
    #[must_use]
    pub fn hero_alive(&self) -> bool {
        self.hero_entity().is_some_and(|hero| !hero.is_dead())
    }

    /// Number of live enemies and bosses.
    #[must_use]
    pub fn hostiles_remaining(&self) -> usize {
        self.entities
            .iter()
            .filter(|entity| !entity.is_dead() && entity.kind().is_hostile())
            .count()
    }

    /// Marks an entity dead; returns `true` if it was alive.
    pub fn kill(&mut self, id: EntityId) -> bool {
        match self.entity_mut(id) {
            Some(entity) if !entity.dead => {
                entity.dead = true;
                true
            }
            _ => false,
        }
    }

    /// Costs the hero one life unit, shield first.
    ///
    /// When the last life is lost the hero and both escorts are marked dead.
    /// Returns `true` when the hero is dead afterwards.
    pub fn damage_hero(&mut self) -> bool {
        let Some(hero) = self.hero_mut() else {
            return true;
        };
        if !hero.absorb_hit() {
            return false;
        }

        let escorts = hero.escorts();
        let _ = self.kill(self.hero);
        for escort in escorts {
            let _ = self.kill(escort);
        }
        true
    }

    /// Subtracts `damage` from the boss life; returns `true` when the boss died.
    pub fn damage_boss(&mut self, id: EntityId, damage: u8) -> bool {
        let Some(entity) = self.entity_mut(id) else {
            return false;
        };
        let Variant::Boss(boss) = &mut entity.variant else {
            return false;
        };
        if boss.take_damage(damage) {
            entity.dead = true;
            return true;
        }
        false
    }

    /// Consumes one hit credit of a laser, killing it once spent.
    pub fn spend_laser(&mut self, id: EntityId) {
        let Some(entity) = self.entity_mut(id) else {
            return;
        };
        if let Variant::Laser(laser) = &mut entity.variant {
            if laser.register_hit() {
                entity.dead = true;
            }
        }
    }

    /// Credits the hero for a laser hit dealing `damage`.
    pub fn reward_hit(&mut self, damage: u8) {
        if let Some(hero) = self.hero_mut() {
            hero.add_points(POINTS_PER_HIT);
            hero.add_gauge(if damage == 2 {
                GAUGE_PER_HEAVY_HIT
            } else {
                GAUGE_PER_HIT
            });
        }
    }

    /// Grants the hero one shield charge.
    pub fn grant_shield(&mut self) {
        if let Some(hero) = self.hero_mut() {
            hero.add_shield();
        }
    }

    /// Rolls for a shield pickup at the provided position.
    ///
    /// At most two pickups drop per stage. Returns `true` when one spawned.
    pub fn roll_shield_drop(&mut self, x: f32, y: f32) -> bool {
        if self.shield_drops >= SHIELD_DROPS_PER_STAGE || !self.rng.gen_bool(SHIELD_DROP_CHANCE) {
            return false;
        }

        self.shield_drops += 1;
        let id = self.allocate_id();
        self.entities.push(Entity::shield_item(id, x, y));
        true
    }

    /// Keeps a living hero inside the arena and drags the escorts along.
    pub fn clamp_hero(&mut self) {
        let arena = self.arena();
        let hero_id = self.hero;
        if let Some(hero) = self.entity_mut(hero_id).filter(|hero| !hero.dead) {
            hero.x = hero.x.min(arena.width - hero.width()).max(0.0);
            hero.y = hero.y.min(arena.height - hero.height()).max(0.0);
            self.align_escorts();
        }
    }

    /// Advances every live entity by `dt`.
    ///
    /// Projectiles fired during the sweep are appended afterwards in the order
    /// they were produced, then meteors destroy every hostile they overlap.
    pub fn tick_entities(&mut self, dt: Duration) {
        self.tick_index = self.tick_index.saturating_add(1);

        let arena = self.arena();
        let mut effects = TickEffects::default();
        for entity in &mut self.entities {
            entity.tick(dt, arena, &mut self.rng, &mut effects);
        }

        for spawn in effects.spawns {
            let id = self.allocate_id();
            let entity = match spawn {
                Spawn::Laser { x, y, weapon } => Entity::laser(id, x, y, weapon),
                Spawn::BossLaser { x, y, vx, vy } => Entity::boss_laser(id, x, y, vx, vy),
            };
            self.entities.push(entity);
        }

        for sweep in effects.sweeps {
            for entity in &mut self.entities {
                if !entity.dead && entity.kind().is_hostile() && entity.bounds().intersects(&sweep)
                {
                    entity.dead = true;
                }
            }
        }
    }

    /// Removes every dead entity; returns how many were removed.
    ///
    /// A dead hero is removed too; its final payload and bounds stay readable
    /// through [`World::hero`] and [`query::hero`].
    pub fn prune(&mut self) -> usize {
        let fallen = self
            .hero_entity()
            .filter(|entity| entity.is_dead())
            .and_then(|entity| Some((entity.as_hero()?.clone(), entity.bounds())));
        if fallen.is_some() {
            self.fallen_hero = fallen;
        }

        let before = self.entities.len();
        self.entities.retain(|entity| !entity.dead);
        before - self.entities.len()
    }

    /// Removes every entity except the hero and its escorts.
    pub fn clear_hostiles(&mut self) {
        self.entities
            .retain(|entity| entity.kind().is_player_side());
    }

    /// Spawns the population of the stage at `index` and activates it.
    ///
    /// Leftover projectiles and pickups are removed, the hero is repositioned
    /// and the shield drop budget is renewed. Returns `false` when the
    /// campaign has no such stage.
    pub fn start_stage(&mut self, index: usize) -> bool {
        let Some(stage) = self.config.stages.get(index).copied() else {
            return false;
        };

        self.clear_hostiles();
        self.stage_index = index;
        self.shield_drops = 0;

        let arena = self.arena();
        match stage {
            StageConfig::Wave { rows, columns } => {
                for _ in 0..rows.saturating_mul(columns) {
                    let x = random_coordinate(&mut self.rng, arena.width - ENEMY_SIZE.0);
                    let y = -(random_coordinate(&mut self.rng, WAVE_ALTITUDE_SPREAD)
                        + WAVE_ALTITUDE_BASE);
                    let id = self.allocate_id();
                    self.entities.push(Entity::enemy(id, x, y));
                }
            }
            StageConfig::Boss => {
                let id = self.allocate_id();
                let x = arena.width / 2.0 - BOSS_SIZE.0 / 2.0;
                self.entities.push(Entity::boss(id, x, BOSS_ALTITUDE));
            }
        }

        let hero_id = self.hero;
        if let Some(hero) = self.entity_mut(hero_id) {
            hero.x = arena.width / 2.0 - HERO_START_INSET;
            hero.y = arena.height - arena.height / 4.0;
        }
        self.align_escorts();

        self.phase = Phase::active(index, &stage);
        debug!(
            stage = index + 1,
            hostiles = stage.hostile_count(),
            "stage population spawned"
        );
        true
    }

    fn allocate_id(&mut self) -> EntityId {
        let id = EntityId::new(self.next_id);
        self.next_id = self.next_id.wrapping_add(1);
        id
    }

    fn entity_mut(&mut self, id: EntityId) -> Option<&mut Entity> {
        self.entities.iter_mut().find(|entity| entity.id() == id)
    }

    fn hero_mut(&mut self) -> Option<&mut Hero> {
        let id = self.hero;
        self.entity_mut(id).and_then(|entity| match &mut entity.variant {
            Variant::Hero(hero) => Some(hero),
            _ => None,
        })
    }

    fn align_escorts(&mut self) {
        let Some(entity) = self.hero_entity() else {
            return;
        };
        let Some(hero) = entity.as_hero() else {
            return;
        };
        let (x, y, width) = (entity.x(), entity.y(), entity.width());
        let [left, right] = hero.escorts();

        let placements = [
            (left, x + LEFT_ESCORT_OFFSET.0, y + LEFT_ESCORT_OFFSET.1),
            (right, x + width + RIGHT_ESCORT_GAP, y + ESCORT_DROP),
        ];
        for (id, escort_x, escort_y) in placements {
            if let Some(escort) = self.entity_mut(id) {
                escort.x = escort_x;
                escort.y = escort_y;
            }
        }
    }

    fn move_hero(&mut self, dx: f32, dy: f32) {
        let hero_id = self.hero;
        if let Some(hero) = self.entity_mut(hero_id).filter(|hero| !hero.dead) {
            hero.x += dx;
            hero.y += dy;
            self.align_escorts();
        }
    }

    fn fire(&mut self) {
        let Some(entity) = self.hero_entity().filter(|hero| !hero.is_dead()) else {
            return;
        };
        let Some(hero) = entity.as_hero().filter(|hero| hero.can_fire()) else {
            return;
        };
        let weapon = hero.weapon();
        let x = entity.x() + HERO_MUZZLE.0;
        let y = entity.y() + HERO_MUZZLE.1;

        let id = self.allocate_id();
        self.entities.push(Entity::laser(id, x, y, weapon));
        if let Some(hero) = self.hero_mut() {
            hero.arm_cooldown();
        }
    }

    fn meteor_strike(&mut self) {
        match self.hero_mut() {
            Some(hero) if hero.can_use_meteor() => hero.drain_gauge(),
            _ => return,
        }

        let span = self.arena().width - METEOR_SIZE.0;
        for _ in 0..METEORS_PER_STRIKE {
            let x = random_coordinate(&mut self.rng, span);
            let id = self.allocate_id();
            self.entities.push(Entity::meteor(id, x, METEOR_ALTITUDE));
        }
    }
}

fn random_coordinate(rng: &mut ChaCha8Rng, span: f32) -> f32 {
    if span > 0.0 {
        rng.gen_range(0.0..span)
    } else {
        0.0
    }
}

/// Applies the provided command to the world, mutating state deterministically.
pub fn apply(world: &mut World, command: Command) {
    match command {
        Command::MoveHero { direction } => {
            let (dx, dy) = direction.offset(HERO_STEP);
            world.move_hero(dx, dy);
        }
        Command::Fire => world.fire(),
        Command::CycleWeapon => {
            if let Some(hero) = world.hero_mut() {
                hero.cycle_weapon();
            }
        }
        Command::MeteorStrike => world.meteor_strike(),
    }
}

/// Query functions that provide read-only access to the world state.
pub mod query {
    use star_siege_core::{EntitySnapshot, EntityView, HeroSnapshot, Phase};

    use super::{Entity, World};

    /// Captures the hero's state, if the hero exists.
    #[must_use]
    pub fn hero(world: &World) -> Option<HeroSnapshot> {
        let (hero, bounds, dead) = match world.hero_entity() {
            Some(entity) => (entity.as_hero()?, entity.bounds(), entity.is_dead()),
            None => {
                let (hero, bounds) = world.fallen_hero.as_ref()?;
                (hero, *bounds, true)
            }
        };
        Some(HeroSnapshot {
            id: world.hero_id(),
            bounds,
            dead,
            life: hero.life(),
            shield_count: hero.shield_count(),
            points: hero.points(),
            gauge: hero.gauge(),
            weapon: hero.weapon(),
            cooldown: hero.cooldown(),
        })
    }

    /// Captures a read-only view of every live entity in enumeration order.
    #[must_use]
    pub fn entity_view(world: &World) -> EntityView {
        EntityView::from_snapshots(
            world
                .entities()
                .iter()
                .filter(|entity| !entity.is_dead())
                .map(snapshot)
                .collect(),
        )
    }

    /// Current stage director state.
    #[must_use]
    pub fn phase(world: &World) -> Phase {
        world.phase()
    }

    fn snapshot(entity: &Entity) -> EntitySnapshot {
        EntitySnapshot {
            id: entity.id(),
            kind: entity.kind(),
            bounds: entity.bounds(),
            weapon: entity.as_laser().map(|laser| laser.weapon()),
            boss_life: entity.as_boss().map(|boss| boss.life()),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use star_siege_core::{Direction, EntityKind, WeaponKind, GAUGE_MAX, HERO_MAX_LIFE};

    const TICK: Duration = Duration::from_millis(100);

    fn world() -> World {
        World::new(GameConfig::default())
    }

    fn count(world: &World, kind: EntityKind) -> usize {
        query::entity_view(world).count(kind)
    }

    #[test]
    fn new_world_spawns_first_wave_and_escorted_hero() {
        let world = world();
        assert_eq!(world.phase(), Phase::WaveActive { stage: 0 });
        assert_eq!(count(&world, EntityKind::Hero), 1);
        assert_eq!(count(&world, EntityKind::SideHero), 2);
        assert_eq!(count(&world, EntityKind::Enemy), 15);

        let hero = query::hero(&world).expect("hero exists");
        assert_eq!(hero.life, HERO_MAX_LIFE);
        assert_eq!(hero.bounds.left(), 1024.0 / 2.0 - 45.0);
        assert_eq!(hero.bounds.top(), 768.0 - 192.0);
    }

    #[test]
    fn wave_enemies_spawn_above_arena_within_columns() {
        let world = world();
        for enemy in world
            .entities()
            .iter()
            .filter(|entity| entity.kind() == EntityKind::Enemy)
        {
            assert!(enemy.x() >= 0.0 && enemy.x() < 1024.0 - ENEMY_SIZE.0);
            assert!(enemy.y() <= -50.0 && enemy.y() > -350.0);
        }
    }

    #[test]
    fn escorts_follow_hero_moves() {
        let mut world = world();
        apply(
            &mut world,
            Command::MoveHero {
                direction: Direction::Left,
            },
        );
        let hero = world.hero_entity().expect("hero").clone();
        let [left, right] = world.hero().expect("hero").escorts();
        let left = world.entity(left).expect("left escort");
        let right = world.entity(right).expect("right escort");
        assert_eq!(left.x(), hero.x() - 50.0);
        assert_eq!(left.y(), hero.y() + 20.0);
        assert_eq!(right.x(), hero.x() + hero.width() + 10.0);
        assert_eq!(right.y(), hero.y() + 20.0);
    }

    #[test]
    fn fire_respects_cooldown() {
        let mut world = world();
        apply(&mut world, Command::Fire);
        apply(&mut world, Command::Fire);
        assert_eq!(count(&world, EntityKind::Laser), 1);

        let hero = world.hero_entity().expect("hero");
        let laser = world
            .entities()
            .iter()
            .find(|entity| entity.kind() == EntityKind::Laser)
            .expect("laser");
        assert_eq!(laser.x(), hero.x() + 45.0);
        assert_eq!(laser.y(), hero.y() - 10.0);

        for _ in 0..5 {
            world.tick_entities(TICK);
        }
        apply(&mut world, Command::Fire);
        assert_eq!(count(&world, EntityKind::Laser), 2);
    }

    #[test]
    fn cycled_weapon_determines_laser_payload() {
        let mut world = world();
        apply(&mut world, Command::CycleWeapon);
        apply(&mut world, Command::CycleWeapon);
        apply(&mut world, Command::Fire);
        let laser = world
            .entities()
            .iter()
            .find_map(Entity::as_laser)
            .expect("laser");
        assert_eq!(laser.weapon(), WeaponKind::Green);
        assert_eq!(laser.damage(), 2);
        assert_eq!(laser.penetration(), 2);
    }

    #[test]
    fn meteor_strike_requires_full_gauge() {
        let mut world = world();
        apply(&mut world, Command::MeteorStrike);
        assert_eq!(count(&world, EntityKind::Meteor), 0);

        world.hero_mut().expect("hero").add_gauge(GAUGE_MAX);
        apply(&mut world, Command::MeteorStrike);
        assert_eq!(count(&world, EntityKind::Meteor), 3);
        assert_eq!(world.hero().expect("hero").gauge(), 0);
        for meteor in world
            .entities()
            .iter()
            .filter(|entity| entity.kind() == EntityKind::Meteor)
        {
            assert_eq!(meteor.y(), -100.0);
            assert!(meteor.x() >= 0.0 && meteor.x() < 1024.0 - 80.0);
        }
    }

    #[test]
    fn meteors_destroy_overlapped_hostiles_without_reward() {
        let mut world = world();
        let enemy = world
            .entities()
            .iter()
            .find(|entity| entity.kind() == EntityKind::Enemy)
            .expect("enemy")
            .clone();
        let id = world.allocate_id();
        world
            .entities
            .push(Entity::meteor(id, enemy.x(), enemy.y() - 30.0));

        world.tick_entities(TICK);
        assert!(world.entity(enemy.id()).expect("enemy").is_dead());
        assert_eq!(world.hero().expect("hero").points(), 0);
    }

    #[test]
    fn losing_last_life_kills_escorts() {
        let mut world = world();
        assert!(!world.damage_hero());
        assert!(!world.damage_hero());
        assert!(world.damage_hero());
        assert!(!world.hero_alive());
        let [left, right] = world.hero().expect("hero").escorts();
        assert!(world.entity(left).expect("left").is_dead());
        assert!(world.entity(right).expect("right").is_dead());

        let points = world.hero().expect("hero").points();
        let pruned = world.prune();
        assert_eq!(pruned, 3);
        assert!(world.hero_entity().is_none());
        assert!(world.entities().iter().all(|entity| !entity.is_dead()));

        let fallen = query::hero(&world).expect("final hero state");
        assert!(fallen.dead);
        assert_eq!(fallen.life, 0);
        assert_eq!(fallen.points, points);
        assert_eq!(world.hero().expect("hero").escorts(), [left, right]);
    }

    #[test]
    fn phase_changes_follow_the_campaign_order() {
        let mut world = world();
        assert!(!world.declare_won(), "an active stage cannot be won");
        assert_eq!(world.count_down_transition(Duration::from_secs(1)), None);

        assert_eq!(world.begin_transition(Duration::from_secs(2)), Some(0));
        assert_eq!(world.begin_transition(Duration::from_secs(2)), None);
        assert!(!world.declare_lost(), "a cleared stage cannot be lost");
        assert_eq!(
            world.count_down_transition(Duration::from_millis(1_500)),
            Some((0, Duration::from_millis(500)))
        );
        assert_eq!(
            world.count_down_transition(Duration::from_secs(1)),
            Some((0, Duration::ZERO))
        );

        assert!(world.declare_won());
        assert_eq!(world.phase(), Phase::Won);
        assert!(!world.declare_lost());
        assert!(!world.declare_won());
        assert_eq!(world.phase(), Phase::Won);
    }

    #[test]
    fn losing_requires_an_active_stage() {
        let mut world = world();
        assert!(world.declare_lost());
        assert_eq!(world.phase(), Phase::Lost);
        assert_eq!(world.begin_transition(Duration::from_secs(2)), None);
        assert!(!world.declare_won());
        assert_eq!(world.phase(), Phase::Lost);
    }

    #[test]
    fn clamp_keeps_hero_inside_arena() {
        let mut world = world();
        for _ in 0..40 {
            apply(
                &mut world,
                Command::MoveHero {
                    direction: Direction::Right,
                },
            );
        }
        world.clamp_hero();
        let hero = world.hero_entity().expect("hero");
        assert_eq!(hero.x(), 1024.0 - HERO_SIZE.0);
    }

    #[test]
    fn shield_drops_are_capped_per_stage() {
        let mut world = world();
        let mut drops = 0;
        for _ in 0..200 {
            if world.roll_shield_drop(10.0, 10.0) {
                drops += 1;
            }
        }
        assert_eq!(drops, 2);
        assert_eq!(count(&world, EntityKind::ShieldItem), 2);

        assert!(world.start_stage(1));
        assert_eq!(count(&world, EntityKind::ShieldItem), 0);
        assert_eq!(count(&world, EntityKind::Enemy), 24);
    }

    #[test]
    fn boss_stage_spawns_single_boss() {
        let mut world = world();
        assert!(world.start_stage(3));
        assert_eq!(world.phase(), Phase::BossActive { stage: 3 });
        let boss = world
            .entities()
            .iter()
            .find(|entity| entity.kind() == EntityKind::Boss)
            .expect("boss");
        assert_eq!(boss.x(), 1024.0 / 2.0 - 75.0);
        assert_eq!(boss.y(), 50.0);
        assert_eq!(boss.as_boss().map(Boss::life), Some(20));
        assert!(!world.start_stage(4));
    }

    #[test]
    fn boss_damage_may_overshoot_below_zero() {
        let mut world = world();
        assert!(world.start_stage(3));
        let boss = world
            .entities()
            .iter()
            .find(|entity| entity.kind() == EntityKind::Boss)
            .expect("boss")
            .id();
        for _ in 0..19 {
            assert!(!world.damage_boss(boss, 1));
        }
        assert!(world.damage_boss(boss, 2));
        let entity = world.entity(boss).expect("boss");
        assert_eq!(entity.as_boss().map(Boss::life), Some(-1));
        assert!(entity.is_dead());
    }

    #[test]
    fn same_seed_yields_same_population() {
        let first = query::entity_view(&world());
        let second = query::entity_view(&world());
        assert_eq!(first, second);

        let reseeded = World::new(GameConfig::default().with_seed(1));
        assert_ne!(query::entity_view(&reseeded), first);
    }
}
