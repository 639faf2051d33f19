use std::time::Duration;

use star_siege_core::{EntitySnapshot, InputKey};
use star_siege_system_game_loop::Game;
use star_siege_world::{query, GameConfig};

#[test]
fn identical_seeds_and_inputs_replay_identically() {
    let first = replay(GameConfig::default());
    let second = replay(GameConfig::default());
    assert_eq!(first, second, "replay diverged between runs");
}

#[test]
fn different_seeds_diverge() {
    let first = replay(GameConfig::default());
    let second = replay(GameConfig::default().with_seed(7));
    assert_ne!(first, second);
}

fn replay(config: GameConfig) -> ReplayOutcome {
    let mut game = Game::new(config);
    let mut frames = Vec::new();

    for (frame, key) in scripted_inputs().into_iter().enumerate() {
        if let Some(key) = key {
            game.handle_key(key);
        }
        let _ = game.advance(Duration::from_millis(16 + (frame as u64 % 5)));
        if frame % 25 == 0 {
            frames.push(query::entity_view(game.world()).into_vec());
        }
    }

    let hero = query::hero(game.world()).expect("hero exists");
    ReplayOutcome {
        frames,
        points: hero.points,
        life: hero.life,
        phase: format!("{:?}", game.world().phase()),
    }
}

fn scripted_inputs() -> Vec<Option<InputKey>> {
    let pattern = [
        Some(InputKey::Space),
        Some(InputKey::Left),
        None,
        Some(InputKey::Space),
        Some(InputKey::Right),
        Some(InputKey::Right),
        None,
        Some(InputKey::CycleWeapon),
        Some(InputKey::Space),
        Some(InputKey::Meteor),
        Some(InputKey::Left),
        None,
    ];
    pattern.iter().copied().cycle().take(600).collect()
}

#[derive(Debug, PartialEq)]
struct ReplayOutcome {
    frames: Vec<Vec<EntitySnapshot>>,
    points: u32,
    life: u32,
    phase: String,
}
