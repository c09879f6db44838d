use bevy::prelude::*;
use bevy::window::PrimaryWindow;
use rand::Rng;

use crate::asset::{ConfettiAsset, default_palette};
use crate::runtime::{
    Confetto, ConfettiAutostart, ConfettiEmitter, ConfettiOverlay, ConfettiRuntime,
    ConfettiViewport, OVERLAY_Z,
};
use crate::simulate::{SPAWN_MARGIN, confetto_transform, spawn_delay};

/// Mirrors the primary window's size into [`ConfettiViewport`].
///
/// Does nothing on headless hosts, leaving whatever value was inserted.
pub fn sync_confetti_viewport(
    windows: Query<&Window, With<PrimaryWindow>>,
    mut viewport: ResMut<ConfettiViewport>,
) {
    let Some(window) = windows.iter().next() else {
        return;
    };
    let (width, height) = (window.width(), window.height());
    if viewport.width != width || viewport.height != height {
        viewport.width = width;
        viewport.height = height;
    }
}

/// Inserts a [`ConfettiRuntime`] on emitters whose configuration has loaded.
///
/// Emitters carrying a [`ConfettiAutostart`] begin their run right away.
pub fn setup_confetti_emitters(
    mut commands: Commands,
    assets: Res<Assets<ConfettiAsset>>,
    query: Query<(Entity, &ConfettiEmitter, Option<&ConfettiAutostart>), Without<ConfettiRuntime>>,
) {
    for (entity, emitter, autostart) in query.iter() {
        let Some(asset) = assets.get(&emitter.handle) else {
            continue;
        };
        let mut runtime = ConfettiRuntime::new(asset.emission.fixed_seed);
        if let Some(autostart) = autostart {
            runtime.start(autostart.0);
        }
        commands.entity(entity).insert(runtime);
    }
}

/// Despawns overlays and confetti for cleared or removed emitters.
pub fn cleanup_confetti_entities(
    mut commands: Commands,
    mut removed_emitters: RemovedComponents<ConfettiEmitter>,
    mut emitters: Query<(Entity, &mut ConfettiRuntime)>,
    overlays: Query<(Entity, &ConfettiOverlay)>,
    confetti: Query<(Entity, &Confetto)>,
) {
    for (emitter_entity, mut runtime) in emitters.iter_mut() {
        if !runtime.clear_requested {
            continue;
        }
        runtime.clear_requested = false;
        despawn_emitter_entities(&mut commands, emitter_entity, &overlays, &confetti);
    }

    for removed in removed_emitters.read() {
        despawn_emitter_entities(&mut commands, removed, &overlays, &confetti);
    }
}

fn despawn_emitter_entities(
    commands: &mut Commands,
    emitter: Entity,
    overlays: &Query<(Entity, &ConfettiOverlay)>,
    confetti: &Query<(Entity, &Confetto)>,
) {
    for (overlay_entity, overlay) in overlays.iter() {
        if overlay.emitter == emitter {
            commands.entity(overlay_entity).despawn();
        }
    }
    // overlay despawns take their children along; try_despawn covers confetti
    // that already went down with their overlay
    for (confetto_entity, confetto) in confetti.iter() {
        if confetto.emitter == emitter {
            commands.entity(confetto_entity).try_despawn();
        }
    }
}

fn overlay_translation(viewport: &ConfettiViewport) -> Vec3 {
    Vec3::new(-viewport.width / 2.0, viewport.height / 2.0, OVERLAY_Z)
}

/// Keeps each emitter's overlay attached while it is running or draining.
///
/// The overlay is anchored to the top-left corner of the viewport and despawned
/// once the emitter is inactive with no live confetti.
pub fn sync_confetti_overlays(
    viewport: Res<ConfettiViewport>,
    mut commands: Commands,
    emitters: Query<(Entity, &ConfettiRuntime)>,
    mut overlays: Query<(Entity, &ConfettiOverlay, &mut Transform)>,
    confetti: Query<&Confetto>,
) {
    for (emitter_entity, runtime) in emitters.iter() {
        let live = confetti.iter().any(|c| c.emitter == emitter_entity);
        let existing = overlays
            .iter_mut()
            .find(|(_, overlay, _)| overlay.emitter == emitter_entity);

        match existing {
            Some((overlay_entity, _, _)) if !runtime.active && !live => {
                commands.entity(overlay_entity).despawn();
            }
            Some((_, _, mut transform)) => {
                transform.translation = overlay_translation(&viewport);
            }
            None if runtime.active => {
                commands.spawn((
                    ConfettiOverlay {
                        emitter: emitter_entity,
                    },
                    Transform::from_translation(overlay_translation(&viewport)),
                    Visibility::default(),
                ));
            }
            None => {}
        }
    }
}

/// Ticks emitter delays and spawns confetti while active.
///
/// Timed runs deactivate once their duration elapses; burst runs emit their
/// volley and deactivate; streaming runs spawn one confetto whenever the
/// jittered delay elapses, then reschedule. Spawn attempts at capacity are
/// no-ops either way.
pub fn spawn_confetti(
    time: Res<Time>,
    viewport: Res<ConfettiViewport>,
    assets: Res<Assets<ConfettiAsset>>,
    mut commands: Commands,
    mut emitters: Query<(Entity, &ConfettiEmitter, &mut ConfettiRuntime)>,
    overlays: Query<(Entity, &ConfettiOverlay)>,
    confetti: Query<&Confetto>,
) {
    let delta_ms = time.delta_secs() * 1000.0;
    for (emitter_entity, emitter, mut runtime) in emitters.iter_mut() {
        if !runtime.active {
            continue;
        }
        let Some(asset) = assets.get(&emitter.handle) else {
            continue;
        };

        if let Some(remaining) = runtime.stop_after.as_mut() {
            *remaining -= delta_ms;
            if *remaining <= 0.0 {
                runtime.deactivate();
                continue;
            }
        }

        let Some(overlay_entity) = overlays
            .iter()
            .find(|(_, overlay)| overlay.emitter == emitter_entity)
            .map(|(entity, _)| entity)
        else {
            continue;
        };

        let live = confetti
            .iter()
            .filter(|c| c.emitter == emitter_entity)
            .count() as u32;
        let max = asset.emission.max_particles;

        if runtime.pending_burst {
            let amount = asset.emission.burst_amount.min(max.saturating_sub(live));
            for _ in 0..amount {
                spawn_confetto(
                    &mut commands,
                    overlay_entity,
                    emitter_entity,
                    asset,
                    &viewport,
                    &mut runtime,
                );
            }
            runtime.deactivate();
            continue;
        }

        runtime.next_spawn -= delta_ms;
        if runtime.next_spawn <= 0.0 {
            if live < max {
                spawn_confetto(
                    &mut commands,
                    overlay_entity,
                    emitter_entity,
                    asset,
                    &viewport,
                    &mut runtime,
                );
            }
            runtime.next_spawn = spawn_delay(asset.emission.spawn_rate, runtime.rng.random());
        }
    }
}

fn spawn_confetto(
    commands: &mut Commands,
    overlay: Entity,
    emitter: Entity,
    asset: &ConfettiAsset,
    viewport: &ConfettiViewport,
    runtime: &mut ConfettiRuntime,
) {
    let rng = &mut runtime.rng;

    let fallback;
    let palette = if asset.sprites.palette.is_empty() {
        fallback = default_palette();
        &fallback
    } else {
        &asset.sprites.palette
    };
    let [red, green, blue, alpha] = palette[rng.random_range(0..palette.len())];
    let color = Color::srgba(red, green, blue, alpha);

    let size = Vec2::new(
        asset.sprites.size.sample(rng.random()),
        asset.sprites.size.sample(rng.random()),
    );

    let theta = 360.0 * rng.random::<f32>();
    let tumble_axis = Vec3::new(
        (360.0 * rng.random::<f32>()).cos(),
        (360.0 * rng.random::<f32>()).cos(),
        0.0,
    )
    .try_normalize()
    .unwrap_or(Vec3::Z);

    let confetto = Confetto {
        emitter,
        x: viewport.width * rng.random::<f32>(),
        y: -SPAWN_MARGIN,
        dx: asset.motion.drift.sample(rng.random()).sin(),
        dy: asset.motion.gravity.sample(rng.random()),
        theta,
        spin: asset.motion.spin.sample(rng.random()),
        opacity: 1.0,
        fade: asset.fade_out,
        tumble_axis,
        tumble_angle: theta,
    };

    let transform = confetto_transform(&confetto);
    let confetto_entity = commands
        .spawn((
            confetto,
            Sprite {
                color,
                custom_size: Some(size),
                ..default()
            },
            transform,
            Visibility::default(),
        ))
        .id();
    commands.entity(overlay).add_child(confetto_entity);
}
