/// Config format version tracking and compatibility validation.
pub mod versioning;

use bevy::{
    asset::{AssetLoader, LoadContext, io::Reader},
    prelude::*,
};
use serde::{Deserialize, Serialize};
use thiserror::Error;

use versioning::{VersionStatus, current_format_version};

/// Asset loader for [`ConfettiAsset`] files in RON format.
#[derive(Default, TypePath)]
pub struct ConfettiAssetLoader;

/// Errors that can occur when loading a [`ConfettiAsset`].
#[non_exhaustive]
#[derive(Debug, Error)]
pub enum ConfettiAssetLoaderError {
    /// An I/O error occurred while reading the config file.
    #[error("Could not load asset: {0}")]
    Io(#[from] std::io::Error),
    /// The config file contained invalid RON syntax.
    #[error("Could not parse RON: {0}")]
    Ron(#[from] ron::error::SpannedError),
    /// The config file has an unknown format version, likely from a newer bevy_confetti.
    #[error("Unknown confetti_version. You may need a newer version of bevy_confetti.")]
    UnknownVersion,
}

impl AssetLoader for ConfettiAssetLoader {
    type Asset = ConfettiAsset;
    type Settings = ();
    type Error = ConfettiAssetLoaderError;

    async fn load(
        &self,
        reader: &mut dyn Reader,
        _settings: &(),
        load_context: &mut LoadContext<'_>,
    ) -> Result<Self::Asset, Self::Error> {
        let mut bytes = Vec::new();
        reader.read_to_end(&mut bytes).await?;
        let mut asset = ron::de::from_bytes::<ConfettiAsset>(&bytes)?;

        match asset.try_upgrade_version() {
            VersionStatus::Current => {}
            VersionStatus::Outdated { found, current } => {
                let path = load_context.path();
                warn!(
                    "{path:?}: loaded config with confetti_version \"{found}\", current is \"{current}\""
                );
            }
            VersionStatus::Unknown => {
                return Err(ConfettiAssetLoaderError::UnknownVersion);
            }
        }

        Ok(asset)
    }

    fn extensions(&self) -> &[&str] {
        &["ron"]
    }
}

/// An inclusive numeric range a per-particle value is sampled from.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize, Reflect)]
pub struct Range {
    /// Lower bound.
    pub min: f32,
    /// Upper bound.
    pub max: f32,
}

impl Range {
    /// Creates a new range.
    pub fn new(min: f32, max: f32) -> Self {
        Self { min, max }
    }

    /// Maps a uniform roll in `[0, 1)` to a value in this range.
    pub fn sample(&self, roll: f32) -> f32 {
        self.min + (self.max - self.min) * roll
    }
}

impl Default for Range {
    fn default() -> Self {
        Self { min: 0.0, max: 1.0 }
    }
}

/// Spawn timing and population configuration.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, Reflect)]
pub struct ConfettiEmission {
    /// Base interval between spawns, in milliseconds.
    ///
    /// Each rescheduled spawn waits `spawn_rate * jitter` with `jitter` uniform
    /// in `[0, 1)`, so the mean interval is half this value. Negative values are
    /// treated as zero, which attempts a spawn every frame. Defaults to `40.0`.
    #[serde(default = "default_spawn_rate")]
    pub spawn_rate: f32,
    /// Maximum number of confetti alive at once.
    ///
    /// Spawn attempts while at capacity are no-ops; `0` never spawns anything.
    /// Defaults to `150`.
    #[serde(default = "default_max_particles")]
    pub max_particles: u32,
    /// Number of confetti emitted in one volley by
    /// [`ConfettiMode::Burst`](crate::ConfettiMode::Burst).
    ///
    /// Capped by [`max_particles`](Self::max_particles). Defaults to `24`.
    #[serde(default = "default_burst_amount")]
    pub burst_amount: u32,
    /// Optional fixed random seed for deterministic runs.
    ///
    /// When set, spawn timing, placement, and motion are reproducible across
    /// replays, which is useful for cinematics or testing. Defaults to `None`.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub fixed_seed: Option<u32>,
}

fn default_spawn_rate() -> f32 {
    40.0
}

fn default_max_particles() -> u32 {
    150
}

fn default_burst_amount() -> u32 {
    24
}

impl Default for ConfettiEmission {
    fn default() -> Self {
        Self {
            spawn_rate: 40.0,
            max_particles: 150,
            burst_amount: 24,
            fixed_seed: None,
        }
    }
}

/// Per-particle motion configuration.
///
/// Linear speeds are in viewport pixels per millisecond, angular speed in
/// degrees per millisecond. Each confetto samples its own values from these
/// ranges at creation and keeps them for life.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, Reflect)]
pub struct ConfettiMotion {
    /// Vertical fall speed range. Defaults to `0.13..0.31`.
    #[serde(default = "default_gravity")]
    pub gravity: Range,
    /// Horizontal drift parameter range.
    ///
    /// A confetto's horizontal speed is `sin(sample)`, which stays close to the
    /// sampled parameter for small values. Defaults to `-0.1..0.1`.
    #[serde(default = "default_drift")]
    pub drift: Range,
    /// Rotation speed range, in degrees per millisecond. Defaults to `0.4..0.7`.
    #[serde(default = "default_spin")]
    pub spin: Range,
}

fn default_gravity() -> Range {
    Range::new(0.13, 0.31)
}

fn default_drift() -> Range {
    Range::new(-0.1, 0.1)
}

fn default_spin() -> Range {
    Range::new(0.4, 0.7)
}

impl Default for ConfettiMotion {
    fn default() -> Self {
        Self {
            gravity: default_gravity(),
            drift: default_drift(),
            spin: default_spin(),
        }
    }
}

/// Visual configuration for the confetti sprites.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, Reflect)]
pub struct ConfettiSprites {
    /// Colors the confetti are drawn in, as RGBA components in `0.0..=1.0`.
    ///
    /// Each confetto picks one uniformly at creation. An empty palette falls
    /// back to [`default_palette`]. Defaults to a seven-color mixed palette.
    #[serde(default = "default_palette")]
    pub palette: Vec<[f32; 4]>,
    /// Sprite size range in pixels, sampled independently per axis.
    ///
    /// Defaults to `3.0..12.0`.
    #[serde(default = "default_sprite_size")]
    pub size: Range,
}

/// The built-in confetti palette.
pub fn default_palette() -> Vec<[f32; 4]> {
    vec![
        [0.416, 0.451, 0.490, 1.0], // #6a737d
        [0.012, 0.400, 0.839, 1.0], // #0366d6
        [0.157, 0.655, 0.271, 1.0], // #28a745
        [1.000, 0.827, 0.239, 1.0], // #ffd33d
        [0.965, 0.416, 0.039, 1.0], // #f66a0a
        [0.435, 0.259, 0.757, 1.0], // #6f42c1
        [0.918, 0.290, 0.667, 1.0], // #ea4aaa
    ]
}

fn default_sprite_size() -> Range {
    Range::new(3.0, 12.0)
}

impl Default for ConfettiSprites {
    fn default() -> Self {
        Self {
            palette: default_palette(),
            size: default_sprite_size(),
        }
    }
}

/// A complete confetti effect configuration, loadable from RON files.
///
/// Every field has a default, so a partial config merges over the defaults and
/// unknown fields are ignored. Reference a loaded asset from a
/// [`ConfettiEmitter`](crate::ConfettiEmitter) component and control playback
/// through [`ConfettiRuntime`](crate::ConfettiRuntime).
#[derive(Asset, TypePath, Debug, Clone, Serialize, Deserialize)]
pub struct ConfettiAsset {
    #[serde(default = "default_version")]
    confetti_version: String,
    /// Display name for this effect.
    #[serde(default = "default_name")]
    pub name: String,
    /// Spawn timing and population settings.
    #[serde(default)]
    pub emission: ConfettiEmission,
    /// Per-particle motion settings.
    #[serde(default)]
    pub motion: ConfettiMotion,
    /// Sprite color and size settings.
    #[serde(default)]
    pub sprites: ConfettiSprites,
    /// Whether confetti fade out near the bottom of the viewport.
    ///
    /// When disabled, opacity stays at `1.0` and confetti are removed purely by
    /// the position bound check. Defaults to `true`.
    #[serde(default = "default_fade_out", skip_serializing_if = "is_true")]
    pub fade_out: bool,
}

fn default_version() -> String {
    current_format_version().to_string()
}

fn default_name() -> String {
    "Confetti".to_string()
}

fn default_fade_out() -> bool {
    true
}

fn is_true(value: &bool) -> bool {
    *value
}

impl ConfettiAsset {
    /// Creates a new confetti config with the current format version.
    pub fn new(
        name: String,
        emission: ConfettiEmission,
        motion: ConfettiMotion,
        sprites: ConfettiSprites,
        fade_out: bool,
    ) -> Self {
        Self {
            confetti_version: current_format_version().to_string(),
            name,
            emission,
            motion,
            sprites,
            fade_out,
        }
    }

    /// Validates this config's `confetti_version` against the current format
    /// version.
    ///
    /// If the version is outdated but compatible, it is automatically upgraded.
    /// Returns the original [`VersionStatus`] so the caller can react accordingly.
    pub fn try_upgrade_version(&mut self) -> VersionStatus {
        let status = versioning::validate_version(&self.confetti_version);
        if matches!(status, VersionStatus::Outdated { .. }) {
            self.confetti_version = current_format_version().to_string();
        }
        status
    }
}

impl Default for ConfettiAsset {
    fn default() -> Self {
        Self::new(
            default_name(),
            ConfettiEmission::default(),
            ConfettiMotion::default(),
            ConfettiSprites::default(),
            true,
        )
    }
}
