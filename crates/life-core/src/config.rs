//! Configuration types for the simulation and its driver.

use crate::{Error, Result};
use serde::{Deserialize, Serialize};
use std::path::Path;

/// Largest grid dimension a policy or grid may use
pub const MAX_GRID_SIZE: usize = 256;

/// One viewport-width tier
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct SizeTier {
    /// Exclusive upper bound on viewport width; `None` for the last tier
    pub below_width: Option<u32>,
    /// Grid dimension used inside this tier
    pub size: usize,
}

/// Maps viewport width to grid size
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SizePolicy {
    pub tiers: Vec<SizeTier>,
}

impl Default for SizePolicy {
    fn default() -> Self {
        Self {
            tiers: vec![
                SizeTier { below_width: Some(600), size: 10 },
                SizeTier { below_width: Some(900), size: 20 },
                SizeTier { below_width: None, size: 30 },
            ],
        }
    }
}

impl SizePolicy {
    /// Small screens get 10x10, everything else 30x30.
    pub fn two_tier() -> Self {
        Self {
            tiers: vec![
                SizeTier { below_width: Some(600), size: 10 },
                SizeTier { below_width: None, size: 30 },
            ],
        }
    }

    /// A policy that always yields `size`.
    pub fn fixed(size: usize) -> Self {
        Self {
            tiers: vec![SizeTier { below_width: None, size }],
        }
    }

    /// Grid size for the given viewport width.
    ///
    /// Assumes a validated policy; an empty policy yields 0, which grid
    /// construction rejects.
    pub fn size_for_width(&self, width: u32) -> usize {
        self.tiers
            .iter()
            .find(|tier| tier.below_width.map_or(true, |limit| width < limit))
            .or_else(|| self.tiers.last())
            .map_or(0, |tier| tier.size)
    }

    pub fn validate(&self) -> Result<()> {
        let Some(last) = self.tiers.last() else {
            return Err(Error::Configuration("size policy has no tiers".to_string()));
        };
        if last.below_width.is_some() {
            return Err(Error::Configuration(
                "last size tier must not have a width limit".to_string(),
            ));
        }

        let mut previous: Option<u32> = None;
        for (idx, tier) in self.tiers.iter().enumerate() {
            if tier.size == 0 || tier.size > MAX_GRID_SIZE {
                return Err(Error::Configuration(format!(
                    "size tier {} has size {}, expected 1..={}",
                    idx, tier.size, MAX_GRID_SIZE
                )));
            }
            if idx + 1 < self.tiers.len() {
                let Some(limit) = tier.below_width else {
                    return Err(Error::Configuration(format!(
                        "size tier {} is unbounded but is not the last tier",
                        idx
                    )));
                };
                if previous.is_some_and(|prev| limit <= prev) {
                    return Err(Error::Configuration(format!(
                        "size tier {} width limit {} is not increasing",
                        idx, limit
                    )));
                }
                previous = Some(limit);
            }
        }

        Ok(())
    }
}

/// How the initial grid is populated
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum SeedConfig {
    /// All cells dead
    Empty,
    /// A named pattern with its top-left corner at `(row, col)`;
    /// centered when either coordinate is omitted
    Pattern {
        name: String,
        #[serde(default)]
        row: Option<usize>,
        #[serde(default)]
        col: Option<usize>,
    },
    /// Each cell alive with probability `density`
    Random { density: f64, seed: u64 },
}

impl Default for SeedConfig {
    fn default() -> Self {
        SeedConfig::Pattern {
            name: "glider".to_string(),
            row: None,
            col: None,
        }
    }
}

/// Headless driver configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct RunnerConfig {
    /// Interval between generation steps (milliseconds)
    pub tick_interval_ms: u64,
    /// Viewport width fed to the size policy
    pub viewport_width: u32,
    /// Width-to-size policy
    pub size_policy: SizePolicy,
    /// Initial grid contents
    pub seed: SeedConfig,
    /// Start stepping immediately
    pub autoplay: bool,
    /// Stop after this many generations
    pub max_generations: Option<u64>,
    /// Print the grid after every step
    pub render: bool,
    /// Emit logs as JSON lines
    pub json_logs: bool,
}

impl Default for RunnerConfig {
    fn default() -> Self {
        Self {
            tick_interval_ms: 1000,
            viewport_width: 1024,
            size_policy: SizePolicy::default(),
            seed: SeedConfig::default(),
            autoplay: true,
            max_generations: None,
            render: true,
            json_logs: false,
        }
    }
}

impl RunnerConfig {
    /// Load and validate a configuration from a JSON file. Missing fields
    /// take their defaults.
    pub fn from_json_file(path: impl AsRef<Path>) -> Result<Self> {
        let text = std::fs::read_to_string(path)?;
        let config: Self = serde_json::from_str(&text)?;
        config.validate()?;
        Ok(config)
    }

    pub fn validate(&self) -> Result<()> {
        if self.tick_interval_ms == 0 {
            return Err(Error::Configuration("tick_interval_ms must be positive".to_string()));
        }
        self.size_policy.validate()?;
        if let SeedConfig::Random { density, .. } = self.seed {
            if !(0.0..=1.0).contains(&density) {
                return Err(Error::Configuration(format!(
                    "random density {} is outside [0, 1]",
                    density
                )));
            }
        }
        Ok(())
    }

    /// Grid size for the configured viewport.
    pub fn grid_size(&self) -> usize {
        self.size_policy.size_for_width(self.viewport_width)
    }
}
