use bevy::prelude::*;

use crate::runtime::{Confetto, ConfettiViewport};

/// Vertical span of the fade zone above the bottom edge, in pixels.
pub const FADE_ZONE: f32 = 100.0;

/// How far below the bottom edge a confetto may fall before removal, in pixels.
pub const REMOVAL_MARGIN: f32 = 100.0;

/// How far above the top edge confetti spawn, in pixels.
pub const SPAWN_MARGIN: f32 = 100.0;

/// Advances a confetto's position and rotation by `delta_ms` milliseconds.
pub fn advance_confetto(confetto: &mut Confetto, delta_ms: f32) {
    confetto.x += confetto.dx * delta_ms;
    confetto.y += confetto.dy * delta_ms;
    confetto.theta += confetto.spin * delta_ms;
}

/// Whether `y` has entered the fade zone near the bottom of the viewport.
pub fn in_fade_zone(viewport_height: f32, y: f32) -> bool {
    y >= viewport_height - FADE_ZONE
}

/// Opacity of a fading confetto at `y`, ramping from `1.0` at the top of the
/// fade zone to `0.0` at the bottom edge.
pub fn fade_opacity(viewport_height: f32, y: f32) -> f32 {
    ((viewport_height - y) / FADE_ZONE).clamp(0.0, 1.0)
}

/// Whether `y` is far enough below the viewport for removal.
pub fn is_below_viewport(viewport_height: f32, y: f32) -> bool {
    y > viewport_height + REMOVAL_MARGIN
}

/// Delay until the next scheduled spawn, given a uniform roll in `[0, 1)`.
///
/// Negative spawn rates are treated as zero.
pub fn spawn_delay(spawn_rate: f32, roll: f32) -> f32 {
    spawn_rate.max(0.0) * roll
}

/// The overlay-local transform for a confetto: translate, then rotate.
///
/// The accumulated `theta` rotation is composed with the fixed tumble chosen at
/// creation.
pub fn confetto_transform(confetto: &Confetto) -> Transform {
    Transform {
        translation: Vec3::new(confetto.x, -confetto.y, 0.0),
        rotation: Quat::from_rotation_z(confetto.theta.to_radians())
            * Quat::from_axis_angle(confetto.tumble_axis, confetto.tumble_angle.to_radians()),
        scale: Vec3::ONE,
    }
}

/// Advances every live confetto and retires the ones that left the viewport.
///
/// All confetti share the elapsed time computed once for the frame. Fading
/// confetti have their sprite alpha follow [`fade_opacity`] once they enter the
/// fade zone; every confetto is despawned when it falls more than
/// [`REMOVAL_MARGIN`] below the viewport or becomes fully transparent.
pub fn update_confetti(
    time: Res<Time>,
    viewport: Res<ConfettiViewport>,
    mut commands: Commands,
    mut confetti: Query<(Entity, &mut Confetto, &mut Sprite, &mut Transform)>,
) {
    let delta_ms = time.delta_secs() * 1000.0;
    for (entity, mut confetto, mut sprite, mut transform) in confetti.iter_mut() {
        advance_confetto(&mut confetto, delta_ms);

        if confetto.fade && in_fade_zone(viewport.height, confetto.y) {
            confetto.opacity = fade_opacity(viewport.height, confetto.y);
            sprite.color.set_alpha(confetto.opacity);
        }

        *transform = confetto_transform(&confetto);

        if is_below_viewport(viewport.height, confetto.y) || confetto.opacity <= 0.0 {
            commands.entity(entity).despawn();
        }
    }
}
