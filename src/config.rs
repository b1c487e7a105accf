//
//  config.rs
//  Junction
//

use serde::{Deserialize, Serialize};
use std::path::Path;
use std::time::Duration;

use crate::lock::{clamp_wait, MAX_LOCK_WAIT};

/// Engine configuration.
///
/// The engine's only tunable is the per-collection lock wait: how long a
/// public operation blocks for a collection lock before failing with a
/// timeout error.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct GraphConfig {
    /// Milliseconds to wait for a collection lock before giving up.
    /// Clamped to `[0, 120_000]`; negative values clamp to zero.
    #[serde(default = "default_lock_wait_ms")]
    pub lock_wait_ms: i64,
}

fn default_lock_wait_ms() -> i64 {
    MAX_LOCK_WAIT.as_millis() as i64
}

impl Default for GraphConfig {
    fn default() -> Self {
        Self {
            lock_wait_ms: default_lock_wait_ms(),
        }
    }
}

impl GraphConfig {
    /// Load config from a TOML file, falling back to defaults.
    pub fn load(path: &Path) -> Self {
        match std::fs::read_to_string(path) {
            Ok(contents) => toml::from_str(&contents).unwrap_or_default(),
            Err(_) => Self::default(),
        }
    }

    /// The configured wait as a clamped `Duration`.
    pub fn lock_wait(&self) -> Duration {
        if self.lock_wait_ms <= 0 {
            return Duration::ZERO;
        }
        clamp_wait(Duration::from_millis(self.lock_wait_ms as u64))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    #[test]
    fn test_default_is_ceiling() {
        let config = GraphConfig::default();
        assert_eq!(config.lock_wait(), MAX_LOCK_WAIT);
    }

    #[test]
    fn test_negative_wait_clamps_to_zero() {
        let config = GraphConfig { lock_wait_ms: -250 };
        assert_eq!(config.lock_wait(), Duration::ZERO);
    }

    #[test]
    fn test_oversized_wait_clamps_to_ceiling() {
        let config = GraphConfig {
            lock_wait_ms: 600_000,
        };
        assert_eq!(config.lock_wait(), MAX_LOCK_WAIT);
    }

    #[test]
    fn test_load_from_toml() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("junction.toml");
        {
            let mut f = std::fs::File::create(&path).unwrap();
            writeln!(f, "lock_wait_ms = 5000").unwrap();
        }

        let config = GraphConfig::load(&path);
        assert_eq!(config.lock_wait(), Duration::from_millis(5000));
    }

    #[test]
    fn test_load_missing_file_falls_back_to_defaults() {
        let config = GraphConfig::load(Path::new("does/not/exist.toml"));
        assert_eq!(config.lock_wait(), MAX_LOCK_WAIT);
    }
}
