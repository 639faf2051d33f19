//! Scene and heads-up display layout.

use glam::Vec2;

use crate::{
    Color, DrawSurface, Region, RenderingError, Scene, TextStyle, TextureKey, TextureSet,
};

const BANNER_FONT: f32 = 30.0;
const CAPTION_FONT: f32 = 20.0;
const POINTS_FONT: f32 = 20.0;
const LABEL_FONT: f32 = 16.0;

const POINTS_MARGIN: Vec2 = Vec2::new(10.0, 20.0);

const LIFE_ROW_INSET: f32 = 180.0;
const LIFE_ICON_SPACING: f32 = 45.0;
const LIFE_ROW_RAISE: f32 = 37.0;
const LIFE_ICON_SIZE: Vec2 = Vec2::new(35.0, 27.0);

const GAUGE_ORIGIN: Vec2 = Vec2::new(10.0, 50.0);
const GAUGE_SIZE: Vec2 = Vec2::new(200.0, 20.0);
const GAUGE_LABEL_RAISE: f32 = 5.0;

const STAGE_LABEL_ORIGIN: Vec2 = Vec2::new(10.0, 80.0);

/// Draws the scene onto `surface`.
///
/// The arena is cleared and filled black. A banner, when present, replaces
/// the playfield entirely; otherwise sprites, captions and the HUD are drawn
/// in that order.
pub fn render<S>(
    scene: &Scene,
    textures: &TextureSet<S::Texture>,
    surface: &mut S,
) -> Result<(), RenderingError>
where
    S: DrawSurface,
{
    let arena = Region::from_rect(scene.arena.bounds());
    surface.clear(arena);
    surface.fill_rect(arena, Color::BLACK);

    if let Some(banner) = &scene.banner {
        let center = Vec2::new(scene.arena.width / 2.0, scene.arena.height / 2.0);
        surface.draw_text(
            &banner.text,
            center,
            TextStyle::centered(BANNER_FONT, banner.color),
        );
        return Ok(());
    }

    for sprite in &scene.sprites {
        let texture = textures.require(sprite.texture)?;
        surface.draw_image(texture, Region::from_rect(sprite.bounds));
    }

    for caption in &scene.captions {
        surface.draw_text(
            &caption.text,
            caption.anchor,
            TextStyle::centered(CAPTION_FONT, caption.color),
        );
    }

    draw_points(scene, surface);
    draw_lives(scene, textures, surface)?;
    draw_gauge(scene, surface);
    surface.draw_text(
        &scene.hud.stage_label,
        STAGE_LABEL_ORIGIN,
        TextStyle::left(LABEL_FONT, Color::WHITE),
    );
    Ok(())
}

fn draw_points<S: DrawSurface>(scene: &Scene, surface: &mut S) {
    surface.draw_text(
        &format!("Points: {}", scene.hud.points),
        Vec2::new(POINTS_MARGIN.x, scene.arena.height - POINTS_MARGIN.y),
        TextStyle::left(POINTS_FONT, Color::WHITE),
    );
}

fn draw_lives<S: DrawSurface>(
    scene: &Scene,
    textures: &TextureSet<S::Texture>,
    surface: &mut S,
) -> Result<(), RenderingError> {
    if scene.hud.life == 0 {
        return Ok(());
    }

    let icon = textures.require(TextureKey::Life)?;
    let start = scene.arena.width - LIFE_ROW_INSET;
    let y = scene.arena.height - LIFE_ROW_RAISE;
    for index in 0..scene.hud.life {
        let x = start + LIFE_ICON_SPACING * (index + 1) as f32;
        surface.draw_image(
            icon,
            Region::new(x, y, LIFE_ICON_SIZE.x, LIFE_ICON_SIZE.y),
        );
    }
    Ok(())
}

fn draw_gauge<S: DrawSurface>(scene: &Scene, surface: &mut S) {
    let frame = Region {
        origin: GAUGE_ORIGIN,
        size: GAUGE_SIZE,
    };
    surface.fill_rect(frame, Color::WHITE);

    let ratio = if scene.hud.gauge_max == 0 {
        0.0
    } else {
        (scene.hud.gauge as f32 / scene.hud.gauge_max as f32).clamp(0.0, 1.0)
    };
    if ratio > 0.0 {
        let fill = Region {
            origin: GAUGE_ORIGIN,
            size: Vec2::new(GAUGE_SIZE.x * ratio, GAUGE_SIZE.y),
        };
        surface.fill_rect(fill, Color::BLUE);
    }

    surface.stroke_rect(frame, 1.0, Color::BLACK);
    surface.draw_text(
        "Meteor Gauge",
        Vec2::new(GAUGE_ORIGIN.x, GAUGE_ORIGIN.y - GAUGE_LABEL_RAISE),
        TextStyle::left(LABEL_FONT, Color::YELLOW),
    );
}

#[cfg(test)]
mod tests {
    use std::path::Path;

    use super::*;
    use crate::{Caption, Hud, SceneBanner, SceneSprite, TextureManifest, TextureProvider};
    use star_siege_core::{Arena, Rect};

    #[derive(Debug, PartialEq)]
    enum Op {
        Clear(Region),
        Fill(Region, Color),
        Stroke(Region, Color),
        Image(TextureKey, Region),
        Text(String, Vec2, TextStyle),
    }

    #[derive(Default)]
    struct Recorder {
        ops: Vec<Op>,
    }

    impl DrawSurface for Recorder {
        type Texture = TextureKey;

        fn clear(&mut self, region: Region) {
            self.ops.push(Op::Clear(region));
        }

        fn fill_rect(&mut self, region: Region, color: Color) {
            self.ops.push(Op::Fill(region, color));
        }

        fn stroke_rect(&mut self, region: Region, _thickness: f32, color: Color) {
            self.ops.push(Op::Stroke(region, color));
        }

        fn draw_image(&mut self, texture: &TextureKey, region: Region) {
            self.ops.push(Op::Image(*texture, region));
        }

        fn draw_text(&mut self, text: &str, position: Vec2, style: TextStyle) {
            self.ops.push(Op::Text(text.to_owned(), position, style));
        }
    }

    struct KeyProvider;

    impl TextureProvider for KeyProvider {
        type Texture = TextureKey;

        fn load(&mut self, key: TextureKey, _path: &Path) -> anyhow::Result<TextureKey> {
            Ok(key)
        }
    }

    fn textures() -> TextureSet<TextureKey> {
        let mut manifest = String::from("version = 1\n[textures]\n");
        for key in TextureKey::ALL {
            manifest.push_str(&format!("{} = \"{}.png\"\n", key.name(), key.name()));
        }
        let manifest = TextureManifest::parse(&manifest, Path::new(".")).expect("manifest");
        TextureSet::load(&manifest, &mut KeyProvider).expect("textures")
    }

    fn scene() -> Scene {
        Scene {
            arena: Arena::new(800.0, 600.0),
            sprites: vec![SceneSprite {
                texture: TextureKey::Hero,
                bounds: Rect::from_bounds(100.0, 400.0, 99.0, 75.0),
            }],
            captions: vec![Caption {
                text: "Shield: 1".to_owned(),
                anchor: Vec2::new(149.5, 390.0),
                color: Color::CYAN,
            }],
            hud: Hud {
                points: 300,
                life: 2,
                gauge: 250,
                gauge_max: 1_000,
                stage_label: "Stage 2".to_owned(),
            },
            banner: None,
        }
    }

    fn texts(ops: &[Op]) -> Vec<&str> {
        ops.iter()
            .filter_map(|op| match op {
                Op::Text(text, ..) => Some(text.as_str()),
                _ => None,
            })
            .collect()
    }

    #[test]
    fn playfield_draws_sprites_captions_and_hud() {
        let mut recorder = Recorder::default();
        render(&scene(), &textures(), &mut recorder).expect("renders");

        let arena = Region::new(0.0, 0.0, 800.0, 600.0);
        assert_eq!(recorder.ops[0], Op::Clear(arena));
        assert_eq!(recorder.ops[1], Op::Fill(arena, Color::BLACK));
        assert_eq!(
            recorder.ops[2],
            Op::Image(TextureKey::Hero, Region::new(100.0, 400.0, 99.0, 75.0))
        );
        assert_eq!(
            texts(&recorder.ops),
            vec!["Shield: 1", "Points: 300", "Meteor Gauge", "Stage 2"]
        );
    }

    #[test]
    fn hud_layout_follows_arena_edges() {
        let mut recorder = Recorder::default();
        render(&scene(), &textures(), &mut recorder).expect("renders");

        assert!(recorder.ops.contains(&Op::Text(
            "Points: 300".to_owned(),
            Vec2::new(10.0, 580.0),
            TextStyle::left(20.0, Color::WHITE)
        )));

        let lives: Vec<Vec2> = recorder
            .ops
            .iter()
            .filter_map(|op| match op {
                Op::Image(TextureKey::Life, region) => Some(region.origin),
                _ => None,
            })
            .collect();
        assert_eq!(
            lives,
            vec![Vec2::new(665.0, 563.0), Vec2::new(710.0, 563.0)]
        );
    }

    #[test]
    fn gauge_fill_is_proportional() {
        let mut recorder = Recorder::default();
        render(&scene(), &textures(), &mut recorder).expect("renders");

        let frame = Region::new(10.0, 50.0, 200.0, 20.0);
        assert!(recorder.ops.contains(&Op::Fill(frame, Color::WHITE)));
        assert!(recorder
            .ops
            .contains(&Op::Fill(Region::new(10.0, 50.0, 50.0, 20.0), Color::BLUE)));
        assert!(recorder.ops.contains(&Op::Stroke(frame, Color::BLACK)));
    }

    #[test]
    fn banner_replaces_playfield() {
        let mut scene = scene();
        scene.banner = Some(SceneBanner {
            text: "You Died!!! Press [Enter] to restart".to_owned(),
            color: Color::RED,
        });

        let mut recorder = Recorder::default();
        render(&scene, &textures(), &mut recorder).expect("renders");
        assert_eq!(recorder.ops.len(), 3);
        assert_eq!(
            recorder.ops[2],
            Op::Text(
                "You Died!!! Press [Enter] to restart".to_owned(),
                Vec2::new(400.0, 300.0),
                TextStyle::centered(30.0, Color::RED)
            )
        );
    }

    #[test]
    fn missing_texture_is_an_error() {
        let mut recorder = Recorder::default();
        let error = render(&scene(), &TextureSet::default(), &mut recorder)
            .expect_err("no hero texture");
        assert!(matches!(
            error,
            RenderingError::TextureUnavailable {
                key: TextureKey::Hero
            }
        ));
    }
}
