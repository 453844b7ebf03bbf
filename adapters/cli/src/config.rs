//! TOML run configuration.

use std::{fs, path::Path};

use anyhow::{bail, Context, Result};
use dead_grid_core::RulesConfig;
use serde::Deserialize;

const SUPPORTED_CONFIG_VERSION: u32 = 1;
const DEFAULT_MAX_TURNS: u32 = 100;

/// Settings resolved from the optional configuration file.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub(crate) struct Settings {
    pub(crate) rules: RulesConfig,
    pub(crate) spawn_interval: u32,
    pub(crate) seed: u64,
    pub(crate) max_turns: u32,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            rules: RulesConfig::default(),
            spawn_interval: 0,
            seed: 0,
            max_turns: DEFAULT_MAX_TURNS,
        }
    }
}

impl Settings {
    /// Reads and validates the configuration file at `path`.
    pub(crate) fn load(path: impl AsRef<Path>) -> Result<Self> {
        let config_path = path.as_ref();
        let contents = fs::read_to_string(config_path).with_context(|| {
            format!("failed to read configuration at {}", config_path.display())
        })?;
        parse(&contents)
            .with_context(|| format!("invalid configuration in {}", config_path.display()))
    }
}

#[derive(Debug, Deserialize)]
#[serde(deny_unknown_fields)]
struct Document {
    version: u32,
    #[serde(default)]
    rules: RulesConfig,
    #[serde(default)]
    spawning: SpawningSection,
    #[serde(default)]
    run: RunSection,
}

#[derive(Debug, Default, Deserialize)]
#[serde(deny_unknown_fields)]
struct SpawningSection {
    #[serde(default)]
    interval: u32,
    #[serde(default)]
    seed: u64,
}

#[derive(Debug, Deserialize)]
#[serde(deny_unknown_fields)]
struct RunSection {
    #[serde(default = "default_max_turns")]
    max_turns: u32,
}

impl Default for RunSection {
    fn default() -> Self {
        Self {
            max_turns: DEFAULT_MAX_TURNS,
        }
    }
}

fn default_max_turns() -> u32 {
    DEFAULT_MAX_TURNS
}

fn parse(contents: &str) -> Result<Settings> {
    let document: Document =
        toml::from_str(contents).context("failed to parse configuration toml contents")?;
    if document.version != SUPPORTED_CONFIG_VERSION {
        bail!(
            "unsupported configuration version {}; expected {}",
            document.version,
            SUPPORTED_CONFIG_VERSION
        );
    }

    let rules = document.rules;
    for (name, health) in [
        ("zombie_health", rules.zombie_health()),
        ("player_health", rules.player_health()),
        ("box_health", rules.box_health()),
        ("landmine_health", rules.landmine_health()),
    ] {
        if health.get() < 1 {
            bail!("rules.{name} must be at least 1, found {}", health.get());
        }
    }

    Ok(Settings {
        rules,
        spawn_interval: document.spawning.interval,
        seed: document.spawning.seed,
        max_turns: document.run.max_turns,
    })
}
