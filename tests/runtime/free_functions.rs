use bevy::prelude::*;
use bevy_confetti::runtime::Confetto;
use bevy_confetti::simulate::*;

fn test_confetto() -> Confetto {
    Confetto {
        emitter: Entity::PLACEHOLDER,
        x: 10.0,
        y: -100.0,
        dx: 0.05,
        dy: 0.2,
        theta: 45.0,
        spin: 0.5,
        opacity: 1.0,
        fade: true,
        tumble_axis: Vec3::Z,
        tumble_angle: 0.0,
    }
}

#[test]
fn advance_is_linear_in_elapsed_time() {
    let mut confetto = test_confetto();
    advance_confetto(&mut confetto, 16.0);
    assert!((confetto.x - 10.8).abs() < 1e-4);
    assert!((confetto.y - -96.8).abs() < 1e-4);
    assert!((confetto.theta - 53.0).abs() < 1e-4);
}

#[test]
fn zero_elapsed_time_changes_nothing() {
    let mut confetto = test_confetto();
    advance_confetto(&mut confetto, 0.0);
    assert_eq!(confetto.x, 10.0);
    assert_eq!(confetto.y, -100.0);
    assert_eq!(confetto.theta, 45.0);
}

#[test]
fn y_never_decreases_over_fixed_steps() {
    let mut confetto = test_confetto();
    let mut previous_y = confetto.y;
    for _ in 0..1000 {
        advance_confetto(&mut confetto, 16.0);
        assert!(confetto.y >= previous_y);
        previous_y = confetto.y;
    }
}

#[test]
fn fade_zone_starts_a_hundred_pixels_above_the_bottom() {
    assert!(!in_fade_zone(720.0, 619.9));
    assert!(in_fade_zone(720.0, 620.0));
    assert!(in_fade_zone(720.0, 720.0));
    assert!(in_fade_zone(720.0, 900.0));
}

#[test]
fn fade_opacity_ramps_from_one_to_zero() {
    assert_eq!(fade_opacity(720.0, 620.0), 1.0);
    assert!((fade_opacity(720.0, 670.0) - 0.5).abs() < 1e-6);
    assert_eq!(fade_opacity(720.0, 720.0), 0.0);
}

#[test]
fn fade_opacity_is_clamped() {
    assert_eq!(fade_opacity(720.0, -50.0), 1.0);
    assert_eq!(fade_opacity(720.0, 900.0), 0.0);
}

#[test]
fn fade_opacity_is_non_increasing_as_y_grows() {
    let mut previous = f32::INFINITY;
    let mut y = 600.0;
    while y < 760.0 {
        let opacity = fade_opacity(720.0, y);
        assert!(opacity <= previous);
        previous = opacity;
        y += 4.0;
    }
}

#[test]
fn removal_happens_a_hundred_pixels_below_the_bottom() {
    assert!(!is_below_viewport(720.0, 820.0));
    assert!(is_below_viewport(720.0, 820.1));
}

#[test]
fn spawn_delay_scales_the_roll() {
    assert_eq!(spawn_delay(40.0, 0.0), 0.0);
    assert_eq!(spawn_delay(40.0, 0.5), 20.0);
    assert!((spawn_delay(40.0, 0.999) - 39.96).abs() < 1e-3);
}

#[test]
fn spawn_delay_clamps_negative_rates() {
    assert_eq!(spawn_delay(-10.0, 0.5), 0.0);
    assert_eq!(spawn_delay(0.0, 0.5), 0.0);
}

#[test]
fn transform_translates_then_rotates() {
    let mut confetto = test_confetto();
    confetto.x = 100.0;
    confetto.y = 50.0;
    confetto.theta = 90.0;

    let transform = confetto_transform(&confetto);

    assert_eq!(transform.translation, Vec3::new(100.0, -50.0, 0.0));
    let expected = Quat::from_rotation_z(std::f32::consts::FRAC_PI_2);
    assert!(transform.rotation.dot(expected).abs() > 0.9999);
    assert_eq!(transform.scale, Vec3::ONE);
}

#[test]
fn transform_composes_the_fixed_tumble() {
    let mut confetto = test_confetto();
    confetto.theta = 0.0;
    confetto.tumble_axis = Vec3::X;
    confetto.tumble_angle = 180.0;

    let transform = confetto_transform(&confetto);

    let expected = Quat::from_axis_angle(Vec3::X, std::f32::consts::PI);
    assert!(transform.rotation.dot(expected).abs() > 0.9999);
}
