//! Entity variants and their self-driven behaviors.
//!
//! Every autonomous behavior is expressed as a fixed-period [`Cadence`]
//! advanced from [`Entity::tick`]. The world invokes `tick` once per game tick
//! for every live entity, so a dead entity stops all of its behaviors the
//! moment its flag is set.

use std::time::Duration;

use rand::Rng;
use star_siege_core::{Arena, EntityId, EntityKind, Rect, WeaponKind, BOSS_LIFE};

use crate::{cadence::Cadence, hero::Hero};

/// Width and height of the hero.
pub const HERO_SIZE: (f32, f32) = (99.0, 75.0);
/// Width and height of an escort.
pub const SIDE_HERO_SIZE: (f32, f32) = (50.0, 40.0);
/// Width and height of a wave enemy.
pub const ENEMY_SIZE: (f32, f32) = (98.0, 50.0);
/// Width and height of the boss.
pub const BOSS_SIZE: (f32, f32) = (150.0, 100.0);
/// Width and height of hero and escort lasers.
pub const LASER_SIZE: (f32, f32) = (9.0, 33.0);
/// Width and height of boss lasers.
pub const BOSS_LASER_SIZE: (f32, f32) = (9.0, 33.0);
/// Width and height of a shield pickup.
pub const SHIELD_ITEM_SIZE: (f32, f32) = (32.0, 32.0);
/// Width and height of a meteor.
pub const METEOR_SIZE: (f32, f32) = (80.0, 80.0);

const ENEMY_DESCENT_PERIOD: Duration = Duration::from_millis(300);
const ENEMY_DESCENT_STEP: f32 = 15.0;
const ESCORT_FIRE_PERIOD: Duration = Duration::from_millis(1_200);
const BOSS_MOVE_PERIOD: Duration = Duration::from_millis(300);
const BOSS_ATTACK_PERIOD: Duration = Duration::from_millis(1_000);
const BOSS_TELEPORT: f32 = 50.0;
const BOSS_LASER_SPEED: f32 = 20.0;
const BOSS_LASER_SPREAD: f32 = 10.0;
const PROJECTILE_PERIOD: Duration = Duration::from_millis(100);
const LASER_SPEED: f32 = 30.0;
const SHIELD_ITEM_SPEED: f32 = 5.0;
const METEOR_SPEED: f32 = 30.0;
const MUZZLE_CLEARANCE: f32 = 10.0;

/// Laser payload carried by hero and escort projectiles.
#[derive(Clone, Debug, PartialEq)]
pub struct Laser {
    weapon: WeaponKind,
    damage: u8,
    penetration: u8,
    travel: Cadence,
}

impl Laser {
    fn new(weapon: WeaponKind) -> Self {
        Self {
            weapon,
            damage: weapon.damage(),
            penetration: weapon.penetration(),
            travel: Cadence::new(PROJECTILE_PERIOD),
        }
    }

    /// Weapon that produced the laser.
    #[must_use]
    pub const fn weapon(&self) -> WeaponKind {
        self.weapon
    }

    /// Damage dealt on every hit.
    #[must_use]
    pub const fn damage(&self) -> u8 {
        self.damage
    }

    /// Hits left before the laser is spent.
    #[must_use]
    pub const fn penetration(&self) -> u8 {
        self.penetration
    }

    /// Consumes one hit credit; returns `true` when the laser is spent.
    ///
    /// Only damage-2 lasers carry more than one credit, every other laser is
    /// spent by its first hit.
    pub(crate) fn register_hit(&mut self) -> bool {
        if self.damage != 2 {
            self.penetration = 0;
            return true;
        }

        self.penetration = self.penetration.saturating_sub(1);
        self.penetration == 0
    }
}

/// Boss payload.
#[derive(Clone, Debug, PartialEq)]
pub struct Boss {
    life: i32,
    movement: Cadence,
    attack: Cadence,
}

impl Boss {
    fn new() -> Self {
        Self {
            life: BOSS_LIFE,
            movement: Cadence::new(BOSS_MOVE_PERIOD),
            attack: Cadence::new(BOSS_ATTACK_PERIOD),
        }
    }

    /// Remaining life; zero or below means the boss is destroyed.
    #[must_use]
    pub const fn life(&self) -> i32 {
        self.life
    }

    /// Subtracts damage; returns `true` once life reached zero or below.
    pub(crate) fn take_damage(&mut self, damage: u8) -> bool {
        self.life -= i32::from(damage);
        self.life <= 0
    }
}

#[derive(Clone, Debug, PartialEq)]
pub(crate) enum Variant {
    Hero(Hero),
    SideHero { fire: Cadence },
    Enemy { descent: Cadence },
    Boss(Boss),
    Laser(Laser),
    BossLaser { vx: f32, vy: f32, travel: Cadence },
    ShieldItem { drift: Cadence },
    Meteor { fall: Cadence },
}

/// Entities produced while ticking, appended once the sweep completes.
#[derive(Clone, Copy, Debug, PartialEq)]
pub(crate) enum Spawn {
    Laser {
        x: f32,
        y: f32,
        weapon: WeaponKind,
    },
    BossLaser {
        x: f32,
        y: f32,
        vx: f32,
        vy: f32,
    },
}

/// Side effects collected from a tick sweep.
#[derive(Debug, Default)]
pub(crate) struct TickEffects {
    pub(crate) spawns: Vec<Spawn>,
    /// Areas swept by meteors; hostiles inside are destroyed.
    pub(crate) sweeps: Vec<Rect>,
}

/// Shared record of every game object: position, size, liveness, payload.
#[derive(Clone, Debug, PartialEq)]
pub struct Entity {
    id: EntityId,
    pub(crate) x: f32,
    pub(crate) y: f32,
    width: f32,
    height: f32,
    pub(crate) dead: bool,
    pub(crate) variant: Variant,
}

impl Entity {
    fn with_variant(id: EntityId, x: f32, y: f32, size: (f32, f32), variant: Variant) -> Self {
        Self {
            id,
            x,
            y,
            width: size.0,
            height: size.1,
            dead: false,
            variant,
        }
    }

    pub(crate) fn hero(id: EntityId, x: f32, y: f32, hero: Hero) -> Self {
        Self::with_variant(id, x, y, HERO_SIZE, Variant::Hero(hero))
    }

    pub(crate) fn side_hero(id: EntityId, x: f32, y: f32) -> Self {
        let fire = Cadence::new(ESCORT_FIRE_PERIOD);
        Self::with_variant(id, x, y, SIDE_HERO_SIZE, Variant::SideHero { fire })
    }

    pub(crate) fn enemy(id: EntityId, x: f32, y: f32) -> Self {
        let descent = Cadence::new(ENEMY_DESCENT_PERIOD);
        Self::with_variant(id, x, y, ENEMY_SIZE, Variant::Enemy { descent })
    }

    pub(crate) fn boss(id: EntityId, x: f32, y: f32) -> Self {
        Self::with_variant(id, x, y, BOSS_SIZE, Variant::Boss(Boss::new()))
    }

    pub(crate) fn laser(id: EntityId, x: f32, y: f32, weapon: WeaponKind) -> Self {
        Self::with_variant(id, x, y, LASER_SIZE, Variant::Laser(Laser::new(weapon)))
    }

    pub(crate) fn boss_laser(id: EntityId, x: f32, y: f32, vx: f32, vy: f32) -> Self {
        let travel = Cadence::new(PROJECTILE_PERIOD);
        Self::with_variant(
            id,
            x,
            y,
            BOSS_LASER_SIZE,
            Variant::BossLaser { vx, vy, travel },
        )
    }

    pub(crate) fn shield_item(id: EntityId, x: f32, y: f32) -> Self {
        let drift = Cadence::new(PROJECTILE_PERIOD);
        Self::with_variant(id, x, y, SHIELD_ITEM_SIZE, Variant::ShieldItem { drift })
    }

    pub(crate) fn meteor(id: EntityId, x: f32, y: f32) -> Self {
        let fall = Cadence::new(PROJECTILE_PERIOD);
        Self::with_variant(id, x, y, METEOR_SIZE, Variant::Meteor { fall })
    }

    /// Identifier assigned by the world.
    #[must_use]
    pub const fn id(&self) -> EntityId {
        self.id
    }

    /// Variant tag of the entity.
    #[must_use]
    pub const fn kind(&self) -> EntityKind {
        match self.variant {
            Variant::Hero(_) => EntityKind::Hero,
            Variant::SideHero { .. } => EntityKind::SideHero,
            Variant::Enemy { .. } => EntityKind::Enemy,
            Variant::Boss(_) => EntityKind::Boss,
            Variant::Laser(_) => EntityKind::Laser,
            Variant::BossLaser { .. } => EntityKind::BossLaser,
            Variant::ShieldItem { .. } => EntityKind::ShieldItem,
            Variant::Meteor { .. } => EntityKind::Meteor,
        }
    }

    /// Horizontal position of the top-left corner.
    #[must_use]
    pub const fn x(&self) -> f32 {
        self.x
    }

    /// Vertical position of the top-left corner.
    #[must_use]
    pub const fn y(&self) -> f32 {
        self.y
    }

    /// Horizontal extent.
    #[must_use]
    pub const fn width(&self) -> f32 {
        self.width
    }

    /// Vertical extent.
    #[must_use]
    pub const fn height(&self) -> f32 {
        self.height
    }

    /// Whether the entity awaits removal by the next prune.
    #[must_use]
    pub const fn is_dead(&self) -> bool {
        self.dead
    }

    /// Rectangle covered by the entity.
    #[must_use]
    pub fn bounds(&self) -> Rect {
        Rect::from_bounds(self.x, self.y, self.width, self.height)
    }

    /// Hero payload, for the hero only.
    #[must_use]
    pub const fn as_hero(&self) -> Option<&Hero> {
        match &self.variant {
            Variant::Hero(hero) => Some(hero),
            _ => None,
        }
    }

    /// Laser payload, for hero and escort lasers only.
    #[must_use]
    pub const fn as_laser(&self) -> Option<&Laser> {
        match &self.variant {
            Variant::Laser(laser) => Some(laser),
            _ => None,
        }
    }

    /// Boss payload, for the boss only.
    #[must_use]
    pub const fn as_boss(&self) -> Option<&Boss> {
        match &self.variant {
            Variant::Boss(boss) => Some(boss),
            _ => None,
        }
    }

    /// Advances every self-driven behavior by `dt`.
    pub(crate) fn tick<R: Rng>(
        &mut self,
        dt: Duration,
        arena: Arena,
        rng: &mut R,
        effects: &mut TickEffects,
    ) {
        if self.dead {
            return;
        }

        match &mut self.variant {
            Variant::Hero(hero) => hero.decay_cooldown(dt),
            Variant::SideHero { fire } => {
                for _ in 0..fire.advance(dt) {
                    effects.spawns.push(Spawn::Laser {
                        x: self.x + self.width / 2.0,
                        y: self.y - MUZZLE_CLEARANCE,
                        weapon: WeaponKind::Red,
                    });
                }
            }
            Variant::Enemy { descent } => {
                for _ in 0..descent.advance(dt) {
                    if self.y < arena.height - self.height {
                        self.y += ENEMY_DESCENT_STEP;
                    }
                }
            }
            Variant::Boss(boss) => {
                for _ in 0..boss.movement.advance(dt) {
                    let shift = if rng.gen_bool(0.5) {
                        BOSS_TELEPORT
                    } else {
                        -BOSS_TELEPORT
                    };
                    self.x = (self.x + shift).min(arena.width - self.width).max(0.0);
                }
                for _ in 0..boss.attack.advance(dt) {
                    let x = self.x + self.width / 2.0;
                    let y = self.y + self.height;
                    for vx in [0.0, -BOSS_LASER_SPREAD, BOSS_LASER_SPREAD] {
                        effects.spawns.push(Spawn::BossLaser {
                            x,
                            y,
                            vx,
                            vy: BOSS_LASER_SPEED,
                        });
                    }
                }
            }
            Variant::Laser(laser) => {
                for _ in 0..laser.travel.advance(dt) {
                    if self.y > 0.0 {
                        self.y -= LASER_SPEED;
                    } else {
                        self.dead = true;
                        break;
                    }
                }
            }
            Variant::BossLaser { vx, vy, travel } => {
                for _ in 0..travel.advance(dt) {
                    let on_screen =
                        self.y < arena.height && self.x > 0.0 && self.x < arena.width;
                    if on_screen {
                        self.x += *vx;
                        self.y += *vy;
                    } else {
                        self.dead = true;
                        break;
                    }
                }
            }
            Variant::ShieldItem { drift } => {
                for _ in 0..drift.advance(dt) {
                    if self.y < arena.height - self.height {
                        self.y += SHIELD_ITEM_SPEED;
                    } else {
                        self.dead = true;
                        break;
                    }
                }
            }
            Variant::Meteor { fall } => {
                for _ in 0..fall.advance(dt) {
                    if self.y < arena.height {
                        self.y += METEOR_SPEED;
                        effects.sweeps.push(Rect::from_bounds(
                            self.x,
                            self.y,
                            self.width,
                            self.height,
                        ));
                    } else {
                        self.dead = true;
                        break;
                    }
                }
            }
        }
    }
}
