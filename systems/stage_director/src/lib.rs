#![deny(
    unsafe_code,
    missing_docs,
    dead_code,
    unused_results,
    non_snake_case,
    unreachable_pub
)]

//! Stage director that sequences the campaign.
//!
//! The director owns the transitions of [`Phase`]: it detects cleared
//! stages, counts down the delay before the next stage, and reacts to the
//! terminal game-end topics published on the bus.

use std::time::Duration;

use star_siege_core::{Event, EventBus, Phase, Topic, STAGE_TRANSITION_DELAY};
use star_siege_world::World;
use tracing::info;

/// Registers the game-end handlers on the bus.
pub fn register(bus: &mut EventBus<World>) {
    bus.on(Topic::GameEndWin, |world, _, _| {
        if world.declare_won() {
            info!(stages = world.stage_count(), "campaign won");
        }
    });
    bus.on(Topic::GameEndLoss, |world, _, _| {
        let stage = world.stage_index() + 1;
        if world.declare_lost() {
            info!(stage, "hero destroyed");
        }
    });
}

/// Ends the active stage if it has been cleared.
///
/// A stage is cleared when it is active, the hero is alive and no enemy or
/// boss remains. Clearing removes every leftover projectile and pickup and
/// starts the transition countdown. Returns `true` when the stage ended.
pub fn check_stage_clear(world: &mut World) -> bool {
    if !world.phase().is_active() || !world.hero_alive() || world.hostiles_remaining() > 0 {
        return false;
    }

    world.clear_hostiles();
    let Some(cleared) = world.begin_transition(STAGE_TRANSITION_DELAY) else {
        return false;
    };
    info!(stage = cleared + 1, "stage cleared");
    true
}

/// Counts down a pending transition by `dt`.
///
/// When the delay elapses the next stage is spawned, or `GameEndWin` is
/// published once the campaign is exhausted.
pub fn advance(world: &mut World, bus: &EventBus<World>, dt: Duration) {
    let Some((cleared, remaining)) = world.count_down_transition(dt) else {
        return;
    };
    if !remaining.is_zero() {
        return;
    }

    if !world.start_stage(cleared + 1) {
        bus.emit(world, Event::GameEndWin);
    }
}

/// Colour family of a banner.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Tone {
    /// Progress or victory, drawn in green.
    Success,
    /// Defeat, drawn in red.
    Failure,
}

/// Full-screen message shown instead of the playfield.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Banner {
    /// Message to display.
    pub text: String,
    /// Colour family of the message.
    pub tone: Tone,
}

impl Banner {
    fn success(text: impl Into<String>) -> Self {
        Self {
            text: text.into(),
            tone: Tone::Success,
        }
    }
}

/// Banner matching the current phase, if the playfield is hidden.
#[must_use]
pub fn banner(world: &World) -> Option<Banner> {
    match world.phase() {
        Phase::WaveActive { .. } | Phase::BossActive { .. } => None,
        Phase::Transitioning { cleared, .. } => {
            let boss = world
                .config()
                .stages
                .get(cleared)
                .is_some_and(|stage| stage.is_boss());
            Some(if boss {
                Banner::success("Boss Defeated!")
            } else {
                Banner::success(format!("Stage {} Clear!", cleared + 1))
            })
        }
        Phase::Won => Some(Banner::success(
            "Victory!!! Press [Enter] to start a new game",
        )),
        Phase::Lost => Some(Banner {
            text: "You Died!!! Press [Enter] to restart".to_owned(),
            tone: Tone::Failure,
        }),
    }
}

/// HUD label naming the stage being played.
#[must_use]
pub fn stage_label(world: &World) -> String {
    if world.stage().is_some_and(|stage| stage.is_boss()) {
        "Boss Stage".to_owned()
    } else {
        format!("Stage {}", world.stage_index() + 1)
    }
}
