use bevy::prelude::*;
use rand::SeedableRng;
use rand::rngs::SmallRng;

use crate::asset::ConfettiAsset;

/// Z coordinate of the overlay, above typical 2D content.
pub const OVERLAY_Z: f32 = 999.0;

/// Spawns a confetti effect driven by a [`ConfettiAsset`].
///
/// Once the asset is loaded, [`setup_confetti_emitters`](crate::spawning::setup_confetti_emitters)
/// inserts a [`ConfettiRuntime`] on this entity; call [`ConfettiRuntime::start`]
/// to begin the effect, or add a [`ConfettiAutostart`] to begin immediately.
#[derive(Component)]
pub struct ConfettiEmitter {
    /// The effect configuration to run.
    pub handle: Handle<ConfettiAsset>,
}

/// Starts the effect in the given mode as soon as its configuration is loaded.
#[derive(Component, Debug, Clone, Copy)]
pub struct ConfettiAutostart(pub ConfettiMode);

/// How long an emitter keeps spawning confetti.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub enum ConfettiMode {
    /// Spawn continuously until [`ConfettiRuntime::stop`] is called.
    #[default]
    Stream,
    /// Spawn continuously for the given number of milliseconds, then let the
    /// remaining confetti finish falling.
    Timed(f32),
    /// Emit a single volley of
    /// [`burst_amount`](crate::ConfettiEmission::burst_amount) confetti and let
    /// them finish falling.
    Burst,
}

/// Playback state for one confetti emitter.
///
/// The runtime owns every pending delay of its run. [`stop`](Self::stop) clears
/// them all, so no scheduled spawn or auto-stop can fire after it returns.
#[derive(Component)]
pub struct ConfettiRuntime {
    /// Whether the emitter is running (spawning, or counting down to a volley).
    pub active: bool,
    /// Whether elapsed spawns reschedule themselves.
    pub streaming: bool,
    /// Milliseconds until the next spawn attempt.
    pub next_spawn: f32,
    /// Milliseconds until a timed run deactivates, if any.
    pub stop_after: Option<f32>,
    /// Whether a burst volley has not been emitted yet.
    pub pending_burst: bool,
    /// Requests the cleanup system to despawn this emitter's overlay and confetti.
    pub clear_requested: bool,
    pub(crate) rng: SmallRng,
}

impl ConfettiRuntime {
    /// Creates an inactive runtime seeded from `fixed_seed`, or from the system
    /// clock when `None`.
    pub fn new(fixed_seed: Option<u32>) -> Self {
        let seed = fixed_seed.unwrap_or_else(rand_seed);
        Self {
            active: false,
            streaming: false,
            next_spawn: 0.0,
            stop_after: None,
            pending_burst: false,
            clear_requested: false,
            rng: SmallRng::seed_from_u64(u64::from(seed)),
        }
    }

    /// Starts (or restarts) the effect in the given mode.
    ///
    /// Any previous run is fully reset first: its confetti and overlay are
    /// despawned before the new run spawns anything. The first spawn fires on
    /// the next frame.
    pub fn start(&mut self, mode: ConfettiMode) {
        self.clear_requested = true;
        self.active = true;
        self.streaming = !matches!(mode, ConfettiMode::Burst);
        self.stop_after = match mode {
            ConfettiMode::Timed(duration) => Some(duration),
            _ => None,
        };
        self.pending_burst = matches!(mode, ConfettiMode::Burst);
        self.next_spawn = 0.0;
    }

    /// Stops the effect immediately.
    ///
    /// Clears every pending delay and requests the overlay and all live confetti
    /// to be despawned. Live confetti do not get to finish falling; use
    /// [`deactivate`](Self::deactivate) for that. Calling this twice in a row is
    /// safe.
    pub fn stop(&mut self) {
        self.deactivate();
        self.clear_requested = true;
    }

    /// Stops spawning but lets live confetti finish falling.
    pub fn deactivate(&mut self) {
        self.active = false;
        self.streaming = false;
        self.next_spawn = 0.0;
        self.stop_after = None;
        self.pending_burst = false;
    }
}

fn rand_seed() -> u32 {
    use std::time::{SystemTime, UNIX_EPOCH};
    let duration = SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .unwrap_or_default();
    (duration.as_nanos() & 0xFFFF_FFFF) as u32
}

/// One falling, rotating, fading confetti sprite.
///
/// Position is in viewport pixels with `y` growing downward from the top edge;
/// [`update_confetti`](crate::simulate::update_confetti) maps it into the
/// overlay's local space. Speeds are fixed at creation; `theta` accumulates
/// without bound.
#[derive(Component, Debug, Clone)]
pub struct Confetto {
    /// The emitter entity this confetto belongs to.
    pub emitter: Entity,
    /// Horizontal position in viewport pixels.
    pub x: f32,
    /// Vertical position in viewport pixels, growing downward.
    pub y: f32,
    /// Horizontal speed in pixels per millisecond.
    pub dx: f32,
    /// Vertical speed in pixels per millisecond.
    pub dy: f32,
    /// Accumulated rotation in degrees.
    pub theta: f32,
    /// Rotation speed in degrees per millisecond.
    pub spin: f32,
    /// Current opacity in `0.0..=1.0`.
    pub opacity: f32,
    /// Whether this confetto fades out near the bottom edge.
    pub fade: bool,
    /// Fixed cosmetic tumble axis, chosen at creation.
    pub tumble_axis: Vec3,
    /// Fixed cosmetic tumble angle in degrees, chosen at creation.
    pub tumble_angle: f32,
}

/// Marker for the screen-space container entity confetti are parented to.
///
/// Attached (spawned) when a run starts and detached (despawned, taking its
/// confetti with it) once the emitter is idle again, or immediately on
/// [`ConfettiRuntime::stop`].
#[derive(Component)]
pub struct ConfettiOverlay {
    /// The emitter entity this overlay belongs to.
    pub emitter: Entity,
}

/// Current viewport dimensions in pixels.
///
/// Mirrors the primary window every frame when one exists; headless hosts can
/// insert their own value instead.
#[derive(Resource, Debug, Clone, Copy, PartialEq)]
pub struct ConfettiViewport {
    /// Viewport width in pixels.
    pub width: f32,
    /// Viewport height in pixels.
    pub height: f32,
}

impl Default for ConfettiViewport {
    fn default() -> Self {
        Self {
            width: 1280.0,
            height: 720.0,
        }
    }
}
