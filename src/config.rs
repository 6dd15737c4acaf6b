//! Runner configuration from `JAPA_*` environment variables
//!
//! | Variable | Meaning | Default |
//! |----------|---------|---------|
//! | `JAPA_LEVEL` | 1-based level number | 1 |
//! | `JAPA_SEED` | RNG seed for a reproducible run | entropy |
//! | `JAPA_LEVELS_PATH` | JSON level table | built-in table |
//! | `JAPA_MODE` | `general` or a deity name | the level's own mode |
//! | `JAPA_MAX_SWAPS` | autoplay cap | 500 |
//! | `JAPA_SNAPSHOT` | `1`/`true` prints the final snapshot JSON | off |
//!
//! Unparseable values fall back to the default.

use std::env;

use crate::types::GameMode;

pub const DEFAULT_MAX_SWAPS: u32 = 500;

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RunConfig {
    pub level: u32,
    pub seed: Option<u64>,
    pub levels_path: Option<String>,
    pub mode: Option<GameMode>,
    pub max_swaps: u32,
    pub print_snapshot: bool,
}

impl Default for RunConfig {
    fn default() -> Self {
        Self {
            level: 1,
            seed: None,
            levels_path: None,
            mode: None,
            max_swaps: DEFAULT_MAX_SWAPS,
            print_snapshot: false,
        }
    }
}

impl RunConfig {
    /// Create from the process environment
    pub fn from_env() -> Self {
        Self::from_lookup(|key| env::var(key).ok())
    }

    /// Create from any key lookup (the environment, or a map in tests)
    pub fn from_lookup<F>(lookup: F) -> Self
    where
        F: Fn(&str) -> Option<String>,
    {
        let get = |key: &str| {
            lookup(key)
                .map(|s| s.trim().to_string())
                .filter(|s| !s.is_empty())
        };

        let level = get("JAPA_LEVEL")
            .and_then(|s| s.parse().ok())
            .filter(|&n| n > 0)
            .unwrap_or(1);

        let seed = get("JAPA_SEED").and_then(|s| s.parse().ok());

        let levels_path = get("JAPA_LEVELS_PATH");

        let mode = get("JAPA_MODE").and_then(|s| GameMode::from_str(&s));

        let max_swaps = get("JAPA_MAX_SWAPS")
            .and_then(|s| s.parse().ok())
            .unwrap_or(DEFAULT_MAX_SWAPS);

        let print_snapshot = get("JAPA_SNAPSHOT")
            .map(|v| v == "1" || v.eq_ignore_ascii_case("true"))
            .unwrap_or(false);

        Self {
            level,
            seed,
            levels_path,
            mode,
            max_swaps,
            print_snapshot,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::Deity;
    use std::collections::HashMap;

    fn lookup(pairs: &[(&str, &str)]) -> impl Fn(&str) -> Option<String> {
        let map: HashMap<String, String> = pairs
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect();
        move |key| map.get(key).cloned()
    }

    #[test]
    fn test_defaults_when_unset() {
        assert_eq!(RunConfig::from_lookup(lookup(&[])), RunConfig::default());
    }

    #[test]
    fn test_reads_every_variable() {
        let config = RunConfig::from_lookup(lookup(&[
            ("JAPA_LEVEL", "4"),
            ("JAPA_SEED", "12345"),
            ("JAPA_LEVELS_PATH", " levels.json "),
            ("JAPA_MODE", "Hanuman"),
            ("JAPA_MAX_SWAPS", "50"),
            ("JAPA_SNAPSHOT", "TRUE"),
        ]));
        assert_eq!(config.level, 4);
        assert_eq!(config.seed, Some(12345));
        assert_eq!(config.levels_path.as_deref(), Some("levels.json"));
        assert_eq!(config.mode, Some(GameMode::Deity(Deity::Hanuman)));
        assert_eq!(config.max_swaps, 50);
        assert!(config.print_snapshot);
    }

    #[test]
    fn test_bad_values_fall_back() {
        let config = RunConfig::from_lookup(lookup(&[
            ("JAPA_LEVEL", "0"),
            ("JAPA_SEED", "abc"),
            ("JAPA_MODE", "vishnu"),
            ("JAPA_MAX_SWAPS", "-3"),
            ("JAPA_SNAPSHOT", "yes"),
        ]));
        assert_eq!(config, RunConfig::default());
    }

    #[test]
    fn test_from_env_does_not_panic() {
        let _config = RunConfig::from_env();
    }
}
