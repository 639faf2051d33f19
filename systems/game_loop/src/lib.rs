#![deny(
    unsafe_code,
    missing_docs,
    dead_code,
    unused_results,
    non_snake_case,
    unreachable_pub
)]

//! Fixed-interval game loop and lifecycle management.
//!
//! [`Game`] owns the world and the event bus, converts elapsed wall-clock
//! time into 100 ms simulation ticks, routes key presses into commands and
//! rebuilds everything from configuration on restart.

use std::time::Duration;

use star_siege_core::{Command, Direction, Event, EventBus, InputKey, Phase, Topic, TICK_INTERVAL};
use star_siege_system_collision::run_pass;
use star_siege_system_stage_director as director;
use star_siege_world::{apply, GameConfig, World};
use tracing::{debug, trace};

/// Upper bound on ticks simulated by a single [`Game::advance`] call.
///
/// Time beyond the bound is dropped so a stalled frame does not trigger a
/// burst of catch-up simulation.
pub const MAX_TICKS_PER_ADVANCE: u32 = 10;

const SEED_STRIDE: u64 = 0x9e37_79b9_7f4a_7c15;

/// A running game session.
#[derive(Debug)]
pub struct Game {
    config: GameConfig,
    world: World,
    bus: EventBus<World>,
    accumulator: Duration,
    generation: u64,
}

impl Game {
    /// Creates a game at the first stage of the configured campaign.
    #[must_use]
    pub fn new(config: GameConfig) -> Self {
        let world = World::new(config.clone());
        Self {
            config,
            world,
            bus: build_bus(),
            accumulator: Duration::ZERO,
            generation: 0,
        }
    }

    /// Read-only access to the world.
    #[must_use]
    pub fn world(&self) -> &World {
        &self.world
    }

    /// Mutable access to the world for scripted scenarios.
    pub fn world_mut(&mut self) -> &mut World {
        &mut self.world
    }

    /// Event bus with the gameplay handlers registered.
    #[must_use]
    pub fn bus(&self) -> &EventBus<World> {
        &self.bus
    }

    /// Number of resets performed so far.
    #[must_use]
    pub fn generation(&self) -> u64 {
        self.generation
    }

    /// Reports whether the game still waits for a restart.
    #[must_use]
    pub fn is_over(&self) -> bool {
        self.world.phase().is_terminal()
    }

    /// Routes a key press.
    ///
    /// Enter restarts a finished game. Every other key is ignored unless a
    /// stage is being played and the hero is alive.
    pub fn handle_key(&mut self, key: InputKey) {
        if key == InputKey::Enter {
            if self.is_over() {
                self.reset();
            }
            return;
        }

        if !self.world.phase().is_active() || !self.world.hero_alive() {
            return;
        }

        let command = match key {
            InputKey::Up => Command::MoveHero {
                direction: Direction::Up,
            },
            InputKey::Down => Command::MoveHero {
                direction: Direction::Down,
            },
            InputKey::Left => Command::MoveHero {
                direction: Direction::Left,
            },
            InputKey::Right => Command::MoveHero {
                direction: Direction::Right,
            },
            InputKey::Space => Command::Fire,
            InputKey::CycleWeapon => Command::CycleWeapon,
            InputKey::Meteor => {
                self.bus.emit(&mut self.world, Event::MeteorRequested);
                return;
            }
            InputKey::Enter => return,
        };
        apply(&mut self.world, command);
    }

    /// Accumulates elapsed time and runs one step per whole tick interval.
    ///
    /// Returns the number of steps that ran.
    pub fn advance(&mut self, dt: Duration) -> u32 {
        self.accumulator = self.accumulator.saturating_add(dt);
        let mut steps = 0;
        while self.accumulator >= TICK_INTERVAL {
            self.accumulator -= TICK_INTERVAL;
            if steps == MAX_TICKS_PER_ADVANCE {
                self.accumulator = Duration::ZERO;
                break;
            }
            self.step();
            steps += 1;
        }
        steps
    }

    /// Runs a single tick.
    ///
    /// Active stages tick every entity, run the collision pass and check for
    /// a cleared stage; a pending transition counts down; finished games are
    /// frozen.
    pub fn step(&mut self) {
        match self.world.phase() {
            Phase::WaveActive { .. } | Phase::BossActive { .. } => {
                self.world.tick_entities(TICK_INTERVAL);
                let summary = run_pass(&mut self.world, &self.bus);
                let _ = director::check_stage_clear(&mut self.world);
                trace!(
                    tick = self.world.tick_index(),
                    published = summary.published,
                    pruned = summary.pruned,
                    "tick"
                );
            }
            Phase::Transitioning { .. } => {
                director::advance(&mut self.world, &self.bus, TICK_INTERVAL);
            }
            Phase::Won | Phase::Lost => {}
        }
    }

    /// Rebuilds the world and the bus from configuration.
    ///
    /// Every reset draws a fresh seed derived from the configured seed, so
    /// consecutive games differ while staying reproducible.
    pub fn reset(&mut self) {
        self.generation = self.generation.wrapping_add(1);
        let seed = derive_seed(self.config.seed, self.generation);
        self.world = World::new(self.config.clone().with_seed(seed));
        self.bus = build_bus();
        self.accumulator = Duration::ZERO;
        debug!(generation = self.generation, seed, "game reset");
    }
}

/// Creates a bus with every gameplay handler registered exactly once.
#[must_use]
pub fn build_bus() -> EventBus<World> {
    let mut bus = EventBus::new();
    star_siege_system_combat::register(&mut bus);
    director::register(&mut bus);
    bus.on(Topic::MeteorRequested, |world, _, _| {
        apply(world, Command::MeteorStrike);
    });
    bus
}

fn derive_seed(seed: u64, generation: u64) -> u64 {
    seed ^ generation.wrapping_mul(SEED_STRIDE)
}
