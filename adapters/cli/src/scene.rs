//! Scene population from the world.

use glam::Vec2;
use star_siege_core::{EntityKind, EntitySnapshot, Rect, WeaponKind, GAUGE_MAX};
use star_siege_rendering::{Caption, Color, Hud, Scene, SceneBanner, SceneSprite, TextureKey};
use star_siege_system_stage_director::{self as director, Tone};
use star_siege_world::{query, World};

const CAPTION_RAISE: f32 = 10.0;

/// Refreshes `scene` to mirror the world.
pub(crate) fn populate_scene(world: &World, scene: &mut Scene) {
    scene.arena = world.arena();
    scene.sprites.clear();
    scene.captions.clear();

    let hero = query::hero(world);
    for entity in query::entity_view(world).iter() {
        scene.sprites.push(SceneSprite {
            texture: texture_for(entity),
            bounds: entity.bounds,
        });

        if let Some(life) = entity.boss_life {
            scene
                .captions
                .push(caption(format!("Boss HP: {life}"), entity.bounds, Color::WHITE));
        }
        if entity.kind == EntityKind::Hero {
            if let Some(shield) = hero.map(|hero| hero.shield_count).filter(|count| *count > 0) {
                scene
                    .captions
                    .push(caption(format!("Shield: {shield}"), entity.bounds, Color::CYAN));
            }
        }
    }

    scene.hud = Hud {
        points: hero.map_or(0, |hero| hero.points),
        life: hero.map_or(0, |hero| hero.life),
        gauge: hero.map_or(0, |hero| hero.gauge),
        gauge_max: GAUGE_MAX,
        stage_label: director::stage_label(world),
    };

    scene.banner = director::banner(world).map(|banner| SceneBanner {
        text: banner.text,
        color: match banner.tone {
            Tone::Success => Color::GREEN,
            Tone::Failure => Color::RED,
        },
    });
}

fn texture_for(entity: &EntitySnapshot) -> TextureKey {
    match entity.kind {
        EntityKind::Hero | EntityKind::SideHero => TextureKey::Hero,
        EntityKind::Enemy | EntityKind::Boss => TextureKey::Enemy,
        EntityKind::Laser => match entity.weapon {
            Some(WeaponKind::Blue) => TextureKey::LaserBlue,
            Some(WeaponKind::Green) => TextureKey::LaserGreen,
            Some(WeaponKind::Red) | None => TextureKey::LaserRed,
        },
        EntityKind::BossLaser => TextureKey::BossLaser,
        EntityKind::ShieldItem => TextureKey::Shield,
        EntityKind::Meteor => TextureKey::Meteor,
    }
}

fn caption(text: String, bounds: Rect, color: Color) -> Caption {
    Caption {
        text,
        anchor: Vec2::new(
            bounds.left() + bounds.width() / 2.0,
            bounds.top() - CAPTION_RAISE,
        ),
        color,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use star_siege_core::Phase;
    use star_siege_world::GameConfig;

    fn populated(world: &World) -> Scene {
        let mut scene = Scene::default();
        populate_scene(world, &mut scene);
        scene
    }

    #[test]
    fn opening_wave_maps_every_live_entity() {
        let world = World::new(GameConfig::default());
        let scene = populated(&world);

        assert_eq!(scene.sprites.len(), query::entity_view(&world).iter().count());
        assert_eq!(scene.sprites[0].texture, TextureKey::Hero);
        assert!(scene
            .sprites
            .iter()
            .any(|sprite| sprite.texture == TextureKey::Enemy));
        assert!(scene.captions.is_empty());
        assert!(scene.banner.is_none());
        assert_eq!(scene.hud.life, 3);
        assert_eq!(scene.hud.gauge_max, GAUGE_MAX);
        assert_eq!(scene.hud.stage_label, "Stage 1");
    }

    #[test]
    fn lasers_use_their_weapon_texture() {
        let mut world = World::new(GameConfig::default());
        let _ = world.spawn_scripted_laser(WeaponKind::Green, 10.0, 10.0);
        let _ = world.spawn_scripted_laser(WeaponKind::Blue, 30.0, 10.0);
        let textures: Vec<TextureKey> = populated(&world)
            .sprites
            .iter()
            .map(|sprite| sprite.texture)
            .collect();
        assert!(textures.ends_with(&[TextureKey::LaserGreen, TextureKey::LaserBlue]));
    }

    #[test]
    fn shield_and_boss_get_captions() {
        let mut world = World::new(GameConfig::default());
        world.remove_hostiles();
        world.grant_shield();
        let boss = world
            .spawn_scripted(EntityKind::Boss, 400.0, 100.0)
            .expect("boss");

        let scene = populated(&world);
        let texts: Vec<&str> = scene
            .captions
            .iter()
            .map(|caption| caption.text.as_str())
            .collect();
        assert_eq!(texts, vec!["Shield: 1", "Boss HP: 20"]);
        assert_eq!(scene.captions[0].color, Color::CYAN);

        let bounds = world.entity(boss).expect("boss").bounds();
        assert_eq!(
            scene.captions[1].anchor,
            Vec2::new(bounds.left() + bounds.width() / 2.0, 90.0)
        );
    }

    #[test]
    fn terminal_phases_show_banners() {
        let mut world = World::new(GameConfig::default());
        world.force_phase(Phase::Lost);
        let banner = populated(&world).banner.expect("banner");
        assert_eq!(banner.text, "You Died!!! Press [Enter] to restart");
        assert_eq!(banner.color, Color::RED);

        world.force_phase(Phase::Won);
        assert_eq!(populated(&world).banner.map(|b| b.color), Some(Color::GREEN));
    }
}
