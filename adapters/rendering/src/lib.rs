#![deny(
    unsafe_code,
    missing_docs,
    dead_code,
    unused_results,
    non_snake_case,
    unreachable_pub
)]

//! Shared rendering contracts for Star Siege adapters.
//!
//! Adapters populate a [`Scene`] from the world every frame. The scene is
//! plain data, so the HUD layout in [`render`] can be exercised against any
//! [`DrawSurface`], including recording surfaces in tests.

mod hud;
mod textures;

use std::{path::PathBuf, time::Duration};

use anyhow::Result as AnyResult;
use glam::Vec2;
use star_siege_core::{Arena, InputKey, Rect};
use thiserror::Error;

pub use hud::render;
pub use textures::{TextureKey, TextureManifest, TextureProvider, TextureSet};

/// RGBA color used when presenting frames.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Color {
    /// Red channel intensity in the range 0.0..=1.0.
    pub red: f32,
    /// Green channel intensity in the range 0.0..=1.0.
    pub green: f32,
    /// Blue channel intensity in the range 0.0..=1.0.
    pub blue: f32,
    /// Alpha channel intensity in the range 0.0..=1.0.
    pub alpha: f32,
}

impl Color {
    /// Opaque black.
    pub const BLACK: Self = Self::from_rgb_u8(0, 0, 0);
    /// Opaque white.
    pub const WHITE: Self = Self::from_rgb_u8(0xff, 0xff, 0xff);
    /// Opaque pure blue.
    pub const BLUE: Self = Self::from_rgb_u8(0, 0, 0xff);
    /// Opaque yellow.
    pub const YELLOW: Self = Self::from_rgb_u8(0xff, 0xff, 0);
    /// Opaque cyan.
    pub const CYAN: Self = Self::from_rgb_u8(0, 0xff, 0xff);
    /// Opaque CSS green.
    pub const GREEN: Self = Self::from_rgb_u8(0, 0x80, 0);
    /// Opaque pure red.
    pub const RED: Self = Self::from_rgb_u8(0xff, 0, 0);

    /// Creates a new color from floating point channels.
    #[must_use]
    pub const fn new(red: f32, green: f32, blue: f32, alpha: f32) -> Self {
        Self {
            red,
            green,
            blue,
            alpha,
        }
    }

    /// Creates an opaque color from byte RGB values.
    #[must_use]
    pub const fn from_rgb_u8(red: u8, green: u8, blue: u8) -> Self {
        Self {
            red: red as f32 / 255.0,
            green: green as f32 / 255.0,
            blue: blue as f32 / 255.0,
            alpha: 1.0,
        }
    }
}

/// Axis-aligned drawing region expressed in world units.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Region {
    /// Top-left corner.
    pub origin: Vec2,
    /// Width and height.
    pub size: Vec2,
}

impl Region {
    /// Creates a region from its top-left corner and extent.
    #[must_use]
    pub fn new(x: f32, y: f32, width: f32, height: f32) -> Self {
        Self {
            origin: Vec2::new(x, y),
            size: Vec2::new(width, height),
        }
    }

    /// Region covering the provided rectangle.
    #[must_use]
    pub fn from_rect(rect: Rect) -> Self {
        Self::new(rect.left(), rect.top(), rect.width(), rect.height())
    }
}

/// Horizontal anchoring of drawn text.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum TextAlign {
    /// The anchor is the start of the text.
    Left,
    /// The anchor is the middle of the text.
    Center,
}

/// Font settings for [`DrawSurface::draw_text`].
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct TextStyle {
    /// Font size in world units.
    pub size: f32,
    /// Fill colour of the glyphs.
    pub color: Color,
    /// Anchoring relative to the provided position.
    pub align: TextAlign,
}

impl TextStyle {
    /// Left-aligned text of the provided size and colour.
    #[must_use]
    pub const fn left(size: f32, color: Color) -> Self {
        Self {
            size,
            color,
            align: TextAlign::Left,
        }
    }

    /// Centered text of the provided size and colour.
    #[must_use]
    pub const fn centered(size: f32, color: Color) -> Self {
        Self {
            size,
            color,
            align: TextAlign::Center,
        }
    }
}

/// Immediate-mode drawing target.
///
/// Positions are world units; text positions name the baseline anchor.
pub trait DrawSurface {
    /// Handle of a texture uploaded to the surface.
    type Texture;

    /// Clears the region.
    fn clear(&mut self, region: Region);

    /// Fills the region with a solid colour.
    fn fill_rect(&mut self, region: Region, color: Color);

    /// Outlines the region.
    fn stroke_rect(&mut self, region: Region, thickness: f32, color: Color);

    /// Draws a texture stretched over the region.
    fn draw_image(&mut self, texture: &Self::Texture, region: Region);

    /// Draws a line of text.
    fn draw_text(&mut self, text: &str, position: Vec2, style: TextStyle);
}

/// Entity drawn with a texture.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct SceneSprite {
    /// Texture used for the entity.
    pub texture: TextureKey,
    /// Area covered by the entity.
    pub bounds: Rect,
}

/// Text floating above an entity.
#[derive(Clone, Debug, PartialEq)]
pub struct Caption {
    /// Text to display.
    pub text: String,
    /// Center of the baseline.
    pub anchor: Vec2,
    /// Text colour.
    pub color: Color,
}

/// Heads-up display values.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct Hud {
    /// Score accumulated by the hero.
    pub points: u32,
    /// Remaining lives, one icon each.
    pub life: u32,
    /// Current meteor gauge charge.
    pub gauge: u32,
    /// Charge at which the gauge is full.
    pub gauge_max: u32,
    /// Label naming the current stage.
    pub stage_label: String,
}

/// Message replacing the playfield during transitions and after the game.
#[derive(Clone, Debug, PartialEq)]
pub struct SceneBanner {
    /// Message to display.
    pub text: String,
    /// Text colour.
    pub color: Color,
}

/// Scene description populated from the world every frame.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct Scene {
    /// Dimensions of the playfield.
    pub arena: Arena,
    /// Live entities in draw order.
    pub sprites: Vec<SceneSprite>,
    /// Texts drawn above entities.
    pub captions: Vec<Caption>,
    /// Heads-up display values.
    pub hud: Hud,
    /// Banner hiding the playfield, if any.
    pub banner: Option<SceneBanner>,
}

/// Presentation descriptor consumed by rendering backends.
#[derive(Clone, Debug, PartialEq)]
pub struct Presentation {
    /// Title used by the created window.
    pub window_title: String,
    /// Solid color used to clear each frame outside the arena.
    pub clear_color: Color,
    /// Scene content that should be displayed.
    pub scene: Scene,
}

impl Presentation {
    /// Constructs a new presentation descriptor.
    #[must_use]
    pub fn new<T>(window_title: T, clear_color: Color, scene: Scene) -> Self
    where
        T: Into<String>,
    {
        Self {
            window_title: window_title.into(),
            clear_color,
            scene,
        }
    }
}

/// Input snapshot gathered by adapters before updating the scene.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct FrameInput {
    /// Keys pressed since the previous frame, in a fixed polling order.
    pub keys: Vec<InputKey>,
}

/// Rendering backend capable of presenting Star Siege scenes.
pub trait RenderingBackend {
    /// Runs the rendering backend until it is requested to exit.
    ///
    /// The provided `update_scene` closure receives the elapsed frame time
    /// and the input captured by the adapter, and refreshes the scene before
    /// it is rendered.
    fn run<F>(self, presentation: Presentation, update_scene: F) -> AnyResult<()>
    where
        F: FnMut(Duration, FrameInput, &mut Scene) + 'static;
}

/// Errors raised while loading textures or drawing a scene.
#[derive(Debug, Error)]
pub enum RenderingError {
    /// The texture manifest could not be read.
    #[error("failed to read texture manifest at {path:?}")]
    ManifestRead {
        /// Requested manifest path.
        path: PathBuf,
        /// Underlying I/O failure.
        #[source]
        source: std::io::Error,
    },
    /// The texture manifest is not valid TOML.
    #[error("failed to parse texture manifest")]
    ManifestParse(#[from] toml::de::Error),
    /// The manifest declares a version this adapter does not understand.
    #[error("unsupported texture manifest version {found}; expected {expected}")]
    UnsupportedVersion {
        /// Declared version.
        found: u32,
        /// Supported version.
        expected: u32,
    },
    /// The manifest names a texture that does not exist.
    #[error("unknown texture key `{name}` in manifest")]
    UnknownTexture {
        /// Offending key.
        name: String,
    },
    /// The manifest omits a required texture.
    #[error("texture manifest missing entry for {key:?}")]
    MissingTexture {
        /// Texture without an entry.
        key: TextureKey,
    },
    /// A texture file could not be loaded.
    #[error("failed to load texture {key:?} from {path:?}: {reason}")]
    TextureLoad {
        /// Texture being loaded.
        key: TextureKey,
        /// File the texture was loaded from.
        path: PathBuf,
        /// Description of the failure.
        reason: String,
    },
    /// A scene referenced a texture that was never loaded.
    #[error("texture {key:?} is not loaded")]
    TextureUnavailable {
        /// Texture requested by the scene.
        key: TextureKey,
    },
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn region_mirrors_rect() {
        let region = Region::from_rect(Rect::from_bounds(10.0, 20.0, 30.0, 40.0));
        assert_eq!(region, Region::new(10.0, 20.0, 30.0, 40.0));
    }

    #[test]
    fn named_colors_are_opaque() {
        for color in [
            Color::BLACK,
            Color::WHITE,
            Color::BLUE,
            Color::YELLOW,
            Color::CYAN,
            Color::GREEN,
            Color::RED,
        ] {
            assert_eq!(color.alpha, 1.0);
        }
        assert_eq!(Color::GREEN.green, 128.0 / 255.0);
    }

    #[test]
    fn default_scene_has_no_banner() {
        let scene = Scene::default();
        assert!(scene.banner.is_none());
        assert_eq!(scene.arena, Arena::default());
    }
}
