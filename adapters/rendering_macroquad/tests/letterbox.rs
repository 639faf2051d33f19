use glam::Vec2;
use star_siege_core::Arena;
use star_siege_rendering_macroquad::Letterbox;

#[test]
fn matching_window_is_identity() {
    let letterbox = Letterbox::fit(Arena::new(1024.0, 768.0), Vec2::new(1024.0, 768.0));
    assert_eq!(letterbox.scale, 1.0);
    assert_eq!(letterbox.offset, Vec2::ZERO);
    assert_eq!(letterbox.to_screen(Vec2::new(10.0, 50.0)), Vec2::new(10.0, 50.0));
}

#[test]
fn wide_window_is_pillarboxed() {
    let letterbox = Letterbox::fit(Arena::new(800.0, 600.0), Vec2::new(1600.0, 600.0));
    assert_eq!(letterbox.scale, 1.0);
    assert_eq!(letterbox.offset, Vec2::new(400.0, 0.0));
}

#[test]
fn small_window_scales_down_uniformly() {
    let letterbox = Letterbox::fit(Arena::new(800.0, 600.0), Vec2::new(400.0, 400.0));
    assert_eq!(letterbox.scale, 0.5);
    assert_eq!(letterbox.offset, Vec2::new(0.0, 50.0));
    assert_eq!(letterbox.to_screen(Vec2::new(800.0, 600.0)), Vec2::new(400.0, 350.0));
    assert_eq!(letterbox.scale_length(20.0), 10.0);
}
