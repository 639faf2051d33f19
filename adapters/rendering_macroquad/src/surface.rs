use anyhow::{bail, Context, Result};
use glam::Vec2;
use macroquad::{
    color::{Color as MacroquadColor, WHITE},
    math::Vec2 as MacroquadVec2,
    shapes::{draw_rectangle, draw_rectangle_lines},
    text::{draw_text, measure_text},
    texture::{draw_texture_ex, DrawTextureParams, Texture2D},
};
use star_siege_rendering::{
    Color, DrawSurface, Region, TextAlign, TextStyle, TextureKey, TextureProvider,
};
use std::{fs, path::Path};

use crate::{to_macroquad_color, Letterbox};

const PNG_SIGNATURE: [u8; 8] = [0x89, b'P', b'N', b'G', b'\r', b'\n', 0x1a, b'\n'];

/// Draws onto the macroquad window through a letterbox transform.
pub(crate) struct MacroquadSurface {
    letterbox: Letterbox,
    background: MacroquadColor,
}

impl MacroquadSurface {
    pub(crate) fn new(letterbox: Letterbox, background: MacroquadColor) -> Self {
        Self {
            letterbox,
            background,
        }
    }

    fn project(&self, region: Region) -> (Vec2, Vec2) {
        (
            self.letterbox.to_screen(region.origin),
            region.size * self.letterbox.scale,
        )
    }
}

impl DrawSurface for MacroquadSurface {
    type Texture = Texture2D;

    fn clear(&mut self, region: Region) {
        let (origin, size) = self.project(region);
        draw_rectangle(origin.x, origin.y, size.x, size.y, self.background);
    }

    fn fill_rect(&mut self, region: Region, color: Color) {
        let (origin, size) = self.project(region);
        draw_rectangle(origin.x, origin.y, size.x, size.y, to_macroquad_color(color));
    }

    fn stroke_rect(&mut self, region: Region, thickness: f32, color: Color) {
        let (origin, size) = self.project(region);
        draw_rectangle_lines(
            origin.x,
            origin.y,
            size.x,
            size.y,
            self.letterbox.scale_length(thickness).max(1.0),
            to_macroquad_color(color),
        );
    }

    fn draw_image(&mut self, texture: &Texture2D, region: Region) {
        let (origin, size) = self.project(region);
        draw_texture_ex(
            *texture,
            origin.x,
            origin.y,
            WHITE,
            DrawTextureParams {
                dest_size: Some(MacroquadVec2::new(size.x, size.y)),
                ..DrawTextureParams::default()
            },
        );
    }

    fn draw_text(&mut self, text: &str, position: Vec2, style: TextStyle) {
        let font_size = self.letterbox.scale_length(style.size).round().max(1.0) as u16;
        let anchor = self.letterbox.to_screen(position);
        let x = match style.align {
            TextAlign::Left => anchor.x,
            TextAlign::Center => anchor.x - measure_text(text, None, font_size, 1.0).width * 0.5,
        };
        draw_text(
            text,
            x,
            anchor.y,
            f32::from(font_size),
            to_macroquad_color(style.color),
        );
    }
}

/// Loads PNG textures from disk.
#[derive(Clone, Copy, Debug, Default)]
pub(crate) struct FileTextureProvider;

impl TextureProvider for FileTextureProvider {
    type Texture = Texture2D;

    fn load(&mut self, key: TextureKey, path: &Path) -> Result<Texture2D> {
        let bytes = fs::read(path)
            .with_context(|| format!("failed to read {} texture", key.name()))?;
        if !is_png(&bytes) {
            bail!("{} texture is not a PNG image", key.name());
        }
        Ok(Texture2D::from_file_with_format(&bytes, None))
    }
}

fn is_png(bytes: &[u8]) -> bool {
    bytes.starts_with(&PNG_SIGNATURE)
}
