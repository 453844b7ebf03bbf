#![deny(
    unsafe_code,
    missing_docs,
    dead_code,
    unused_results,
    non_snake_case,
    unreachable_pub
)]

//! Deterministic spawning system responsible for emitting zombie spawn actions.

use std::collections::VecDeque;

use dead_grid_core::{Action, Position};
use log::debug;
use rand::{seq::SliceRandom, SeedableRng};
use rand_chacha::ChaCha8Rng;

/// Chooses where the next zombie appears.
pub trait SpawnSource {
    /// Picks one of `candidates`, or `None` to skip this spawn.
    fn choose(&mut self, candidates: &[Position]) -> Option<Position>;
}

impl<S: SpawnSource + ?Sized> SpawnSource for Box<S> {
    fn choose(&mut self, candidates: &[Position]) -> Option<Position> {
        (**self).choose(candidates)
    }
}

/// Uniform choice driven by a seeded ChaCha8 stream.
#[derive(Clone, Debug)]
pub struct SeededSource {
    rng: ChaCha8Rng,
}

impl SeededSource {
    /// Creates a source whose choices are fully determined by `seed`.
    #[must_use]
    pub fn new(seed: u64) -> Self {
        Self {
            rng: ChaCha8Rng::seed_from_u64(seed),
        }
    }
}

impl SpawnSource for SeededSource {
    fn choose(&mut self, candidates: &[Position]) -> Option<Position> {
        candidates.choose(&mut self.rng).copied()
    }
}

/// Replays a fixed list of spawn locations, oldest first.
///
/// A scripted location that is not currently a candidate is consumed
/// without spawning anything.
#[derive(Clone, Debug, Default)]
pub struct ScriptedSource {
    queue: VecDeque<Position>,
}

impl ScriptedSource {
    /// Creates a source that yields `positions` in order.
    #[must_use]
    pub fn new(positions: impl IntoIterator<Item = Position>) -> Self {
        Self {
            queue: positions.into_iter().collect(),
        }
    }

    /// Number of scripted locations not yet consumed.
    #[must_use]
    pub fn remaining(&self) -> usize {
        self.queue.len()
    }
}

impl SpawnSource for ScriptedSource {
    fn choose(&mut self, candidates: &[Position]) -> Option<Position> {
        let next = self.queue.pop_front()?;
        candidates.contains(&next).then_some(next)
    }
}

/// Configuration parameters required to construct the spawning system.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Config {
    interval_turns: u32,
    seed: u64,
}

impl Config {
    /// Creates a new configuration using the provided spawn cadence and seed.
    ///
    /// An interval of zero disables spawning.
    #[must_use]
    pub const fn new(interval_turns: u32, seed: u64) -> Self {
        Self {
            interval_turns,
            seed,
        }
    }

    /// Turns between consecutive spawns.
    #[must_use]
    pub const fn interval_turns(&self) -> u32 {
        self.interval_turns
    }

    /// Seed used by [`Spawning::seeded`].
    #[must_use]
    pub const fn seed(&self) -> u64 {
        self.seed
    }
}

/// Pure system that emits a zombie spawn every configured number of turns.
#[derive(Debug)]
pub struct Spawning<S> {
    interval_turns: u32,
    source: S,
}

impl Spawning<SeededSource> {
    /// Creates a spawning system drawing locations from the configured seed.
    #[must_use]
    pub fn seeded(config: Config) -> Self {
        Self::new(config, SeededSource::new(config.seed()))
    }
}

impl<S: SpawnSource> Spawning<S> {
    /// Creates a new spawning system using the supplied configuration and source.
    #[must_use]
    pub fn new(config: Config, source: S) -> Self {
        Self {
            interval_turns: config.interval_turns(),
            source,
        }
    }

    /// Reports whether this system ever spawns.
    #[must_use]
    pub const fn enabled(&self) -> bool {
        self.interval_turns > 0
    }

    /// Emits at most one `ZombieSpawn` for the turn about to be played.
    ///
    /// `turn_index` counts turns already played, so a spawn is due on turn
    /// zero and then every `interval_turns` turns. `candidates` are the cells
    /// currently free for a spawn.
    pub fn handle(&mut self, turn_index: u32, candidates: &[Position], out: &mut Vec<Action>) {
        if !self.enabled() || candidates.is_empty() {
            return;
        }
        if turn_index % self.interval_turns != 0 {
            return;
        }

        if let Some(position) = self.source.choose(candidates) {
            debug!("turn {turn_index}: spawning zombie at {position}");
            out.push(Action::ZombieSpawn { position });
        }
    }
}
