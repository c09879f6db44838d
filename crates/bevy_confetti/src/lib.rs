#![deny(missing_docs)]
//! **bevy_confetti** is a falling-confetti overlay effect for the
//! [Bevy game engine](https://bevyengine.org/).
//!
//! Confetti spawn just above the top edge of the viewport, fall and tumble
//! under simple kinematics, fade out near the bottom edge, and are retired once
//! they leave the screen. An emitter can stream confetti until told to stop,
//! run for a fixed duration, or emit a single burst.
//!
//! # Getting started
//!
//! ## Add the plugin
//!
//! Add [`ConfettiPlugin`] to your Bevy app:
//!
//! ```no_run
//! use bevy::prelude::*;
//! use bevy_confetti::prelude::*;
//!
//! fn main() {
//!     App::new()
//!         .add_plugins((DefaultPlugins, ConfettiPlugin))
//!         // ...your other plugins, systems and resources
//!         .run();
//! }
//! ```
//!
//! The overlay is drawn by your app's own 2D camera; a headless app can still
//! run the simulation without one.
//!
//! ## Spawning an emitter
//!
//! An effect is defined by a [`ConfettiAsset`]. Spawn a [`ConfettiEmitter`]
//! component to drive it; add [`ConfettiAutostart`] to begin as soon as the
//! config is loaded.
//!
//! ### Loading from a file
//!
//! Configs can be loaded from RON asset files:
//!
//! ```
//! use bevy::prelude::*;
//! use bevy_confetti::prelude::*;
//!
//! fn setup(mut commands: Commands, asset_server: Res<AssetServer>) {
//!     commands.spawn((
//!         ConfettiEmitter {
//!             handle: asset_server.load("party.ron"),
//!         },
//!         ConfettiAutostart(ConfettiMode::Timed(5000.0)),
//!     ));
//! }
//! ```
//!
//! ### Building in code
//!
//! Every config field has a default, so partial configs are fine:
//!
//! ```
//! use bevy::prelude::*;
//! use bevy_confetti::prelude::*;
//!
//! fn setup(mut commands: Commands, mut assets: ResMut<Assets<ConfettiAsset>>) {
//!     let mut config = ConfettiAsset::default();
//!     config.emission.spawn_rate = 25.0;
//!     config.emission.max_particles = 200;
//!     let handle = assets.add(config);
//!
//!     commands.spawn(ConfettiEmitter { handle });
//! }
//! ```
//!
//! ## Controlling playback
//!
//! Once the config is loaded the emitter entity carries a [`ConfettiRuntime`]:
//!
//! ```
//! use bevy::prelude::*;
//! use bevy_confetti::prelude::*;
//!
//! fn celebrate(mut emitters: Query<&mut ConfettiRuntime>) {
//!     for mut runtime in &mut emitters {
//!         runtime.start(ConfettiMode::Burst);
//!     }
//! }
//!
//! fn party_is_over(mut emitters: Query<&mut ConfettiRuntime>) {
//!     for mut runtime in &mut emitters {
//!         runtime.stop();
//!     }
//! }
//! ```
//!
//! [`ConfettiRuntime::stop`] tears the effect down immediately;
//! [`ConfettiMode::Timed`] and [`ConfettiMode::Burst`] runs instead stop
//! spawning on their own and let the remaining confetti finish falling.

/// Confetti configuration assets and serialization types.
pub mod asset;
/// Convenience re-exports for common confetti types.
pub mod prelude;
/// Runtime components and playback state for active confetti emitters.
pub mod runtime;
/// The per-frame confetti update and its kinematic helpers.
pub mod simulate;
/// Systems that set up, spawn for, and clean up confetti emitters.
pub mod spawning;

use bevy::prelude::*;

use simulate::update_confetti;
use spawning::{
    cleanup_confetti_entities, setup_confetti_emitters, spawn_confetti, sync_confetti_overlays,
    sync_confetti_viewport,
};

/// Plugin that adds confetti overlay support to a Bevy app.
///
/// Registers the [`ConfettiAsset`] loader, the [`ConfettiViewport`] resource,
/// and the systems that drive emitters. The systems are chained so teardown
/// requests are honored before anything new spawns in the same frame.
pub struct ConfettiPlugin;

impl Plugin for ConfettiPlugin {
    fn build(&self, app: &mut App) {
        app.init_asset::<ConfettiAsset>()
            .init_asset_loader::<ConfettiAssetLoader>()
            .init_resource::<ConfettiViewport>();

        app.add_systems(
            Update,
            (
                sync_confetti_viewport,
                setup_confetti_emitters,
                cleanup_confetti_entities,
                sync_confetti_overlays,
                spawn_confetti,
                update_confetti,
            )
                .chain(),
        );
    }
}

pub use asset::{
    ConfettiAsset, ConfettiAssetLoader, ConfettiAssetLoaderError, ConfettiEmission,
    ConfettiMotion, ConfettiSprites, Range,
};
pub use runtime::{
    Confetto, ConfettiAutostart, ConfettiEmitter, ConfettiMode, ConfettiOverlay, ConfettiRuntime,
    ConfettiViewport, OVERLAY_Z,
};
