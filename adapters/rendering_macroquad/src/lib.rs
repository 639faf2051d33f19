#![deny(
    unsafe_code,
    missing_docs,
    dead_code,
    unused_results,
    non_snake_case,
    unreachable_pub
)]

//! Macroquad-backed rendering adapter for Star Siege.
//!
//! Macroquad's optional audio stack depends on native ALSA development
//! libraries, which are unavailable in the containerised CI environment.
//! To keep `cargo test` usable everywhere we depend on macroquad without its
//! default `audio` feature.
//!
//! The arena is letterboxed into the window: world units are scaled
//! uniformly and centered, and everything outside the arena keeps the
//! presentation's clear colour.

mod surface;

use anyhow::{Context, Result};
use glam::Vec2;
use macroquad::input::{is_key_down, is_key_pressed, KeyCode};
use star_siege_core::{Arena, InputKey};
use star_siege_rendering::{
    render, Color, FrameInput, Presentation, RenderingBackend, Scene, TextureSet,
};
use std::{path::PathBuf, sync::mpsc, time::Duration};
use tracing::{debug, info};

use self::surface::{FileTextureProvider, MacroquadSurface};

/// Manifest looked up when no other path is configured.
pub const DEFAULT_MANIFEST_PATH: &str = "assets/manifest.toml";

/// Keys polled every frame, in the order they are reported.
const BINDINGS: [(KeyCode, InputKey); 8] = [
    (KeyCode::Up, InputKey::Up),
    (KeyCode::Down, InputKey::Down),
    (KeyCode::Left, InputKey::Left),
    (KeyCode::Right, InputKey::Right),
    (KeyCode::Space, InputKey::Space),
    (KeyCode::M, InputKey::Meteor),
    (KeyCode::R, InputKey::CycleWeapon),
    (KeyCode::Enter, InputKey::Enter),
];

/// The leading bindings that auto-repeat while held.
const REPEATING_BINDINGS: usize = 5;

/// Uniform scale and offset mapping arena units onto the window.
#[doc(hidden)]
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Letterbox {
    /// Screen pixels per world unit.
    pub scale: f32,
    /// Screen position of the arena's top-left corner.
    pub offset: Vec2,
}

impl Letterbox {
    /// Fits the arena into a screen of the provided size, preserving its
    /// aspect ratio and centering it.
    #[must_use]
    pub fn fit(arena: Arena, screen: Vec2) -> Self {
        let scale = if arena.width <= f32::EPSILON || arena.height <= f32::EPSILON {
            1.0
        } else {
            (screen.x / arena.width).min(screen.y / arena.height)
        };
        let scaled = Vec2::new(arena.width, arena.height) * scale;
        let offset = ((screen - scaled) * 0.5).max(Vec2::ZERO);
        Self { scale, offset }
    }

    /// Converts a world position into screen coordinates.
    #[must_use]
    pub fn to_screen(&self, point: Vec2) -> Vec2 {
        self.offset + point * self.scale
    }

    /// Converts a world length into screen pixels.
    #[must_use]
    pub fn scale_length(&self, length: f32) -> f32 {
        length * self.scale
    }
}

/// Converts a held key into discrete presses, like an operating system's
/// keyboard auto-repeat.
#[doc(hidden)]
#[derive(Clone, Copy, Debug, Default)]
pub struct KeyRepeat {
    held: Option<Duration>,
}

impl KeyRepeat {
    /// Hold time before the first repeat.
    pub const DELAY: Duration = Duration::from_millis(250);
    /// Hold time between subsequent repeats.
    pub const INTERVAL: Duration = Duration::from_millis(50);

    /// Observes the key state for a frame lasting `dt` and returns how many
    /// presses the frame produced.
    pub fn observe(&mut self, down: bool, dt: Duration) -> u32 {
        if !down {
            self.held = None;
            return 0;
        }

        match self.held {
            None => {
                self.held = Some(Duration::ZERO);
                1
            }
            Some(previous) => {
                let current = previous.saturating_add(dt);
                self.held = Some(current);
                repeats_within(current) - repeats_within(previous)
            }
        }
    }
}

fn repeats_within(held: Duration) -> u32 {
    if held < KeyRepeat::DELAY {
        return 0;
    }
    let extra = (held - KeyRepeat::DELAY).as_nanos() / KeyRepeat::INTERVAL.as_nanos();
    u32::try_from(extra).map_or(u32::MAX, |extra| extra.saturating_add(1))
}

#[derive(Debug, Default)]
struct Keyboard {
    repeats: [KeyRepeat; REPEATING_BINDINGS],
}

impl Keyboard {
    fn poll(&mut self, dt: Duration) -> FrameInput {
        let mut keys = Vec::new();
        for (index, (code, key)) in BINDINGS.into_iter().enumerate() {
            let presses = match self.repeats.get_mut(index) {
                Some(repeat) => repeat.observe(is_key_down(code) || is_key_pressed(code), dt),
                None => u32::from(is_key_pressed(code)),
            };
            keys.extend(std::iter::repeat(key).take(presses as usize));
        }
        FrameInput { keys }
    }
}

fn quit_requested() -> bool {
    is_key_pressed(KeyCode::Escape) || is_key_pressed(KeyCode::Q)
}

/// Rendering backend implemented on top of macroquad.
#[derive(Clone, Debug)]
pub struct MacroquadBackend {
    swap_interval: Option<i32>,
    manifest_path: PathBuf,
}

impl Default for MacroquadBackend {
    fn default() -> Self {
        Self {
            swap_interval: None,
            manifest_path: PathBuf::from(DEFAULT_MANIFEST_PATH),
        }
    }
}

impl MacroquadBackend {
    /// Returns a backend that requests the platform's default swap interval.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Configures the backend to request a specific swap interval from the platform.
    #[must_use]
    pub fn with_swap_interval(mut self, swap_interval: Option<i32>) -> Self {
        self.swap_interval = swap_interval;
        self
    }

    /// Configures the backend to either synchronise presentation with the display refresh rate
    /// or render as fast as possible.
    #[must_use]
    pub fn with_vsync(self, enabled: bool) -> Self {
        let swap_interval = if enabled { Some(1) } else { Some(0) };
        self.with_swap_interval(swap_interval)
    }

    /// Configures the texture manifest loaded before the first frame.
    #[must_use]
    pub fn with_manifest(mut self, path: impl Into<PathBuf>) -> Self {
        self.manifest_path = path.into();
        self
    }
}

impl RenderingBackend for MacroquadBackend {
    fn run<F>(self, presentation: Presentation, mut update_scene: F) -> Result<()>
    where
        F: FnMut(Duration, FrameInput, &mut Scene) + 'static,
    {
        let Self {
            swap_interval,
            manifest_path,
        } = self;

        let Presentation {
            window_title,
            clear_color,
            scene,
        } = presentation;

        let mut config = macroquad::window::Conf {
            window_title,
            window_width: scene.arena.width.round() as i32,
            window_height: scene.arena.height.round() as i32,
            ..macroquad::window::Conf::default()
        };
        if let Some(swap_interval) = swap_interval {
            config.platform.swap_interval = Some(swap_interval);
        }

        let (outcome_sender, outcome_receiver) = mpsc::channel::<Result<()>>();

        macroquad::Window::from_config(config, async move {
            let mut scene = scene;
            let mut provider = FileTextureProvider;
            let textures = match TextureSet::from_manifest_path(&manifest_path, &mut provider)
                .with_context(|| {
                    format!("failed to load textures from {}", manifest_path.display())
                }) {
                Ok(textures) => textures,
                Err(error) => {
                    let _ = outcome_sender.send(Err(error));
                    return;
                }
            };
            debug!(textures = textures.len(), "textures loaded");

            let background = to_macroquad_color(clear_color);
            let mut keyboard = Keyboard::default();
            loop {
                if quit_requested() {
                    info!("quit requested");
                    break;
                }

                let frame_time = macroquad::time::get_frame_time().max(0.0);
                let dt = Duration::from_secs_f32(frame_time);
                let input = keyboard.poll(dt);
                update_scene(dt, input, &mut scene);

                macroquad::window::clear_background(background);
                let screen = Vec2::new(
                    macroquad::window::screen_width(),
                    macroquad::window::screen_height(),
                );
                let mut surface =
                    MacroquadSurface::new(Letterbox::fit(scene.arena, screen), background);
                if let Err(error) =
                    render(&scene, &textures, &mut surface).context("failed to render scene")
                {
                    let _ = outcome_sender.send(Err(error));
                    return;
                }

                macroquad::window::next_frame().await;
            }

            let _ = outcome_sender.send(Ok(()));
        });

        outcome_receiver.recv().unwrap_or_else(|_| Ok(()))?;

        Ok(())
    }
}

fn to_macroquad_color(color: Color) -> macroquad::color::Color {
    macroquad::color::Color::new(color.red, color.green, color.blue, color.alpha)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn bindings_cover_every_input_key_once() {
        let keys: Vec<InputKey> = BINDINGS.iter().map(|(_, key)| *key).collect();
        assert_eq!(
            keys,
            vec![
                InputKey::Up,
                InputKey::Down,
                InputKey::Left,
                InputKey::Right,
                InputKey::Space,
                InputKey::Meteor,
                InputKey::CycleWeapon,
                InputKey::Enter,
            ]
        );
    }

    #[test]
    fn colors_keep_their_channels() {
        let converted = to_macroquad_color(Color::GREEN);
        assert_eq!(converted.r, 0.0);
        assert_eq!(converted.g, 128.0 / 255.0);
        assert_eq!(converted.a, 1.0);
    }

    #[test]
    fn repeats_accumulate_across_long_frames() {
        assert_eq!(repeats_within(Duration::from_millis(249)), 0);
        assert_eq!(repeats_within(Duration::from_millis(250)), 1);
        assert_eq!(repeats_within(Duration::from_millis(399)), 3);
    }
}
