// all known config format versions. the last must always be the current version.
const FORMAT_VERSIONS: &[&str] = &["0.0"];

/// The result of validating a config's `confetti_version` against the current
/// format version.
pub enum VersionStatus {
    /// The config version matches the current format version.
    Current,
    /// The config version is older and is auto-upgraded on load.
    Outdated {
        /// The version found in the config.
        found: String,
        /// The current format version.
        current: &'static str,
    },
    /// The config version is not recognized (might be from a newer bevy_confetti).
    Unknown,
}

/// Returns the current config format version string.
pub fn current_format_version() -> &'static str {
    FORMAT_VERSIONS
        .last()
        .expect("FORMAT_VERSIONS must not be empty")
}

/// Validates a version string against the current format version and returns
/// the appropriate [`VersionStatus`].
pub fn validate_version(version: &str) -> VersionStatus {
    let current = current_format_version();
    if version == current {
        VersionStatus::Current
    } else if FORMAT_VERSIONS.contains(&version) {
        VersionStatus::Outdated {
            found: version.to_string(),
            current,
        }
    } else {
        VersionStatus::Unknown
    }
}
