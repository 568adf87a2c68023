use std::env;

use crate::blockchain::{DEFAULT_DIFFICULTY, MAX_DIFFICULTY};
use crate::error::{ChainError, Result};

pub const DIFFICULTY_VAR: &str = "LEDGER_DIFFICULTY";
pub const DEMO_BLOCKS_VAR: &str = "LEDGER_DEMO_BLOCKS";

/// Blocks the demo binary mints when nothing is configured.
pub const DEFAULT_DEMO_BLOCKS: usize = 3;

/// Runtime settings, read from the environment (and `.env`, if present).
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Config {
    pub difficulty: usize,
    pub demo_blocks: usize,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            difficulty: DEFAULT_DIFFICULTY,
            demo_blocks: DEFAULT_DEMO_BLOCKS,
        }
    }
}

impl Config {
    /// Read settings from the process environment. Call `dotenvy::dotenv()`
    /// first to pick up a `.env` file.
    pub fn from_env() -> Result<Self> {
        Self::from_lookup(|key| env::var(key).ok())
    }

    /// Read settings through `lookup`; unset keys fall back to defaults.
    pub fn from_lookup<F>(lookup: F) -> Result<Self>
    where
        F: Fn(&str) -> Option<String>,
    {
        let defaults = Self::default();

        let difficulty = parse_var(&lookup, DIFFICULTY_VAR)?.unwrap_or(defaults.difficulty);
        if difficulty > MAX_DIFFICULTY {
            return Err(ChainError::Config(format!(
                "{DIFFICULTY_VAR}={difficulty} exceeds the {MAX_DIFFICULTY} hex characters \
                 of a hash"
            )));
        }

        let demo_blocks = parse_var(&lookup, DEMO_BLOCKS_VAR)?.unwrap_or(defaults.demo_blocks);
        if demo_blocks == 0 {
            return Err(ChainError::Config(format!("{DEMO_BLOCKS_VAR} must be at least 1")));
        }

        Ok(Self {
            difficulty,
            demo_blocks,
        })
    }
}

fn parse_var<F>(lookup: &F, key: &str) -> Result<Option<usize>>
where
    F: Fn(&str) -> Option<String>,
{
    match lookup(key) {
        None => Ok(None),
        Some(raw) => raw
            .trim()
            .parse()
            .map(Some)
            .map_err(|_| {
                ChainError::Config(format!("{key}={raw:?} is not a non-negative integer"))
            }),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    fn lookup(pairs: &[(&str, &str)]) -> impl Fn(&str) -> Option<String> {
        let map: HashMap<String, String> = pairs
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect();
        move |key| map.get(key).cloned()
    }

    #[test]
    fn defaults_when_unset() {
        let cfg = Config::from_lookup(lookup(&[])).unwrap();
        assert_eq!(cfg, Config::default());
        assert_eq!(cfg.difficulty, DEFAULT_DIFFICULTY);
    }

    #[test]
    fn reads_values() {
        let cfg = Config::from_lookup(lookup(&[
            (DIFFICULTY_VAR, " 4 "),
            (DEMO_BLOCKS_VAR, "5"),
        ]))
        .unwrap();
        assert_eq!(cfg.difficulty, 4);
        assert_eq!(cfg.demo_blocks, 5);
    }

    #[test]
    fn zero_difficulty_is_allowed() {
        let cfg = Config::from_lookup(lookup(&[(DIFFICULTY_VAR, "0")])).unwrap();
        assert_eq!(cfg.difficulty, 0);
    }

    #[test]
    fn rejects_bad_values() {
        for pairs in [
            [(DIFFICULTY_VAR, "-1")],
            [(DIFFICULTY_VAR, "hard")],
            [(DIFFICULTY_VAR, "65")],
            [(DEMO_BLOCKS_VAR, "0")],
        ] {
            let err = Config::from_lookup(lookup(&pairs)).unwrap_err();
            assert!(matches!(err, ChainError::Config(_)), "{pairs:?}");
        }
    }
}
