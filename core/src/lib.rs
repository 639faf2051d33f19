#![deny(
    unsafe_code,
    missing_docs,
    dead_code,
    unused_results,
    non_snake_case,
    unreachable_pub
)]

//! Core contracts shared across the Star Siege engine.
//!
//! This crate defines the message surface that connects adapters, the
//! authoritative world, and the gameplay systems. Adapters translate key
//! presses into [`Command`] values that the world applies directly. The
//! per-tick update pass publishes [`Event`] values on an [`EventBus`], whose
//! handlers resolve collisions and stage transitions against the world
//! synchronously. Systems read the world through immutable snapshots such as
//! [`EntityView`] and [`HeroSnapshot`].

mod bus;
mod geometry;

use std::time::Duration;

use serde::{Deserialize, Serialize};

pub use bus::{EventBus, Handler};
pub use geometry::{Arena, Rect};

/// Title used by adapters that open a window.
pub const WINDOW_TITLE: &str = "Star Siege";

/// Fixed interval between two invocations of the central update pass.
pub const TICK_INTERVAL: Duration = Duration::from_millis(100);

/// Delay between clearing a stage and spawning the next one.
pub const STAGE_TRANSITION_DELAY: Duration = Duration::from_secs(2);

/// Number of lives the hero starts with; also the upper bound of its life.
pub const HERO_MAX_LIFE: u32 = 3;

/// Charge required before the hero may call a meteor strike.
pub const GAUGE_MAX: u32 = 1_000;

/// Distance the hero travels for a single movement key press.
pub const HERO_STEP: f32 = 20.0;

/// Points awarded for every laser hit on a hostile.
pub const POINTS_PER_HIT: u32 = 100;

/// Life the boss spawns with.
pub const BOSS_LIFE: i32 = 20;

/// Cardinal movement directions available to the hero.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum Direction {
    /// Movement toward decreasing y.
    Up,
    /// Movement toward increasing y.
    Down,
    /// Movement toward decreasing x.
    Left,
    /// Movement toward increasing x.
    Right,
}

impl Direction {
    /// Offset applied to the hero position for one step in this direction.
    #[must_use]
    pub fn offset(self, step: f32) -> (f32, f32) {
        match self {
            Self::Up => (0.0, -step),
            Self::Down => (0.0, step),
            Self::Left => (-step, 0.0),
            Self::Right => (step, 0.0),
        }
    }
}

/// Discrete key-down events delivered by the input source.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum InputKey {
    /// Arrow up.
    Up,
    /// Arrow down.
    Down,
    /// Arrow left.
    Left,
    /// Arrow right.
    Right,
    /// Space bar, fires the active weapon.
    Space,
    /// `m`, requests a meteor strike.
    Meteor,
    /// `r`, cycles the active weapon.
    CycleWeapon,
    /// Enter, restarts a finished game.
    Enter,
}

/// Commands that express all player-driven world mutations.
#[derive(Clone, Copy, Debug, PartialEq)]
pub enum Command {
    /// Moves the hero one step and drags its escorts along.
    MoveHero {
        /// Direction of travel.
        direction: Direction,
    },
    /// Fires the active weapon if its cooldown elapsed.
    Fire,
    /// Selects the next weapon in the cycle.
    CycleWeapon,
    /// Drains a full gauge to call down three meteors.
    MeteorStrike,
}

/// Unique identifier assigned to every entity by the world.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct EntityId(u32);

impl EntityId {
    /// Creates a new entity identifier with the provided numeric value.
    #[must_use]
    pub const fn new(value: u32) -> Self {
        Self(value)
    }

    /// Retrieves the numeric representation of the identifier.
    #[must_use]
    pub const fn get(&self) -> u32 {
        self.0
    }
}

/// Closed set of entity variants living in the world.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum EntityKind {
    /// The player-controlled ship.
    Hero,
    /// Escort bound to the hero.
    SideHero,
    /// Regular wave enemy.
    Enemy,
    /// Boss of the final stage.
    Boss,
    /// Projectile fired by the hero or an escort.
    Laser,
    /// Projectile fired by the boss.
    BossLaser,
    /// Pickup granting one shield charge.
    ShieldItem,
    /// Falling rock that destroys hostiles it touches.
    Meteor,
}

impl EntityKind {
    /// Reports whether the kind counts toward the stage population.
    #[must_use]
    pub const fn is_hostile(self) -> bool {
        matches!(self, Self::Enemy | Self::Boss)
    }

    /// Reports whether the kind survives stage transitions.
    #[must_use]
    pub const fn is_player_side(self) -> bool {
        matches!(self, Self::Hero | Self::SideHero)
    }
}

/// Weapons the hero cycles through.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
pub enum WeaponKind {
    /// Baseline laser.
    #[default]
    Red,
    /// Rapid laser with a shorter cooldown.
    Blue,
    /// Heavy laser that penetrates a second target.
    Green,
}

impl WeaponKind {
    /// Weapon selected after this one.
    #[must_use]
    pub const fn next(self) -> Self {
        match self {
            Self::Red => Self::Blue,
            Self::Blue => Self::Green,
            Self::Green => Self::Red,
        }
    }

    /// Damage dealt by a laser of this weapon.
    #[must_use]
    pub const fn damage(self) -> u8 {
        match self {
            Self::Red | Self::Blue => 1,
            Self::Green => 2,
        }
    }

    /// Hits a laser of this weapon survives before it is spent.
    #[must_use]
    pub const fn penetration(self) -> u8 {
        match self {
            Self::Red | Self::Blue => 1,
            Self::Green => 2,
        }
    }

    /// Time that must pass before the hero can fire again.
    #[must_use]
    pub const fn cooldown(self) -> Duration {
        match self {
            Self::Red | Self::Green => Duration::from_millis(500),
            Self::Blue => Duration::from_millis(300),
        }
    }
}

/// Configuration of a single stage in the campaign.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum StageConfig {
    /// Grid of regular enemies dropped in from above the arena.
    Wave {
        /// Number of enemy rows.
        rows: u32,
        /// Number of enemy columns.
        columns: u32,
    },
    /// A single boss encounter.
    Boss,
}

impl StageConfig {
    /// The stock campaign: three escalating waves followed by the boss.
    #[must_use]
    pub fn default_campaign() -> Vec<Self> {
        vec![
            Self::Wave {
                rows: 3,
                columns: 5,
            },
            Self::Wave {
                rows: 4,
                columns: 6,
            },
            Self::Wave {
                rows: 5,
                columns: 8,
            },
            Self::Boss,
        ]
    }

    /// Reports whether the stage is a boss encounter.
    #[must_use]
    pub const fn is_boss(&self) -> bool {
        matches!(self, Self::Boss)
    }

    /// Number of hostiles the stage spawns.
    #[must_use]
    pub const fn hostile_count(&self) -> u32 {
        match self {
            Self::Wave { rows, columns } => rows.saturating_mul(*columns),
            Self::Boss => 1,
        }
    }
}

/// Stage director state.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Phase {
    /// A wave stage is being played.
    WaveActive {
        /// Zero-based index of the stage.
        stage: usize,
    },
    /// The boss stage is being played.
    BossActive {
        /// Zero-based index of the stage.
        stage: usize,
    },
    /// A stage was cleared and the next one is pending.
    Transitioning {
        /// Zero-based index of the stage that was cleared.
        cleared: usize,
        /// Time left before the next stage starts.
        remaining: Duration,
    },
    /// Every stage was cleared.
    Won,
    /// The hero ran out of lives.
    Lost,
}

impl Phase {
    /// Active phase for the provided stage.
    #[must_use]
    pub const fn active(stage: usize, config: &StageConfig) -> Self {
        if config.is_boss() {
            Self::BossActive { stage }
        } else {
            Self::WaveActive { stage }
        }
    }

    /// Reports whether the tick driver simulates entities in this phase.
    #[must_use]
    pub const fn is_active(&self) -> bool {
        matches!(self, Self::WaveActive { .. } | Self::BossActive { .. })
    }

    /// Reports whether the game ended and waits for a restart.
    #[must_use]
    pub const fn is_terminal(&self) -> bool {
        matches!(self, Self::Won | Self::Lost)
    }
}

/// Topics handlers subscribe to on the [`EventBus`].
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum Topic {
    /// A laser overlaps a hostile.
    CollisionEnemyLaser,
    /// Something harmful or collectible overlaps the hero.
    CollisionEnemyHero,
    /// The player asked for a meteor strike.
    MeteorRequested,
    /// The last stage was cleared.
    GameEndWin,
    /// The hero died.
    GameEndLoss,
}

/// Events published on the [`EventBus`].
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Event {
    /// A laser intersects an enemy or the boss.
    CollisionEnemyLaser {
        /// Laser involved in the collision.
        laser: EntityId,
        /// Enemy or boss struck by the laser.
        target: EntityId,
    },
    /// An entity intersects the hero.
    CollisionEnemyHero {
        /// Enemy, boss, boss laser or shield item touching the hero.
        enemy: EntityId,
    },
    /// The player pressed the meteor key.
    MeteorRequested,
    /// The campaign was won.
    GameEndWin,
    /// The campaign was lost.
    GameEndLoss,
}

impl Event {
    /// Topic under which the event is delivered.
    #[must_use]
    pub const fn topic(&self) -> Topic {
        match self {
            Self::CollisionEnemyLaser { .. } => Topic::CollisionEnemyLaser,
            Self::CollisionEnemyHero { .. } => Topic::CollisionEnemyHero,
            Self::MeteorRequested => Topic::MeteorRequested,
            Self::GameEndWin => Topic::GameEndWin,
            Self::GameEndLoss => Topic::GameEndLoss,
        }
    }
}

/// Immutable representation of a single entity used for queries.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct EntitySnapshot {
    /// Identifier assigned to the entity.
    pub id: EntityId,
    /// Variant tag of the entity.
    pub kind: EntityKind,
    /// Bounds occupied by the entity.
    pub bounds: Rect,
    /// Weapon that produced the laser, for lasers only.
    pub weapon: Option<WeaponKind>,
    /// Remaining life, for the boss only.
    pub boss_life: Option<i32>,
}

/// Read-only snapshot describing every live entity in enumeration order.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct EntityView {
    snapshots: Vec<EntitySnapshot>,
}

impl EntityView {
    /// Creates a new view from snapshots already in enumeration order.
    #[must_use]
    pub fn from_snapshots(snapshots: Vec<EntitySnapshot>) -> Self {
        Self { snapshots }
    }

    /// Iterator over the captured snapshots.
    pub fn iter(&self) -> impl Iterator<Item = &EntitySnapshot> {
        self.snapshots.iter()
    }

    /// Number of snapshots that match the provided kind.
    #[must_use]
    pub fn count(&self, kind: EntityKind) -> usize {
        self.snapshots
            .iter()
            .filter(|snapshot| snapshot.kind == kind)
            .count()
    }

    /// Consumes the view, yielding the underlying snapshots.
    #[must_use]
    pub fn into_vec(self) -> Vec<EntitySnapshot> {
        self.snapshots
    }
}

/// Immutable representation of the hero's state used for queries.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct HeroSnapshot {
    /// Identifier assigned to the hero.
    pub id: EntityId,
    /// Bounds occupied by the hero.
    pub bounds: Rect,
    /// Whether the hero ran out of lives.
    pub dead: bool,
    /// Remaining lives.
    pub life: u32,
    /// Shield charges absorbing hits before lives are lost.
    pub shield_count: u32,
    /// Score accumulated so far.
    pub points: u32,
    /// Meteor gauge charge.
    pub gauge: u32,
    /// Weapon currently selected.
    pub weapon: WeaponKind,
    /// Time left before the hero may fire again.
    pub cooldown: Duration,
}
