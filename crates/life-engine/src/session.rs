//! Driver-side session state: the current grid plus play/pause/stop control.
//!
//! The session owns its grid between steps and replaces it wholesale on every
//! step, toggle, reset and resize. It never runs two steps at once because
//! `tick` takes `&mut self`.

use crate::grid::Grid;
use crate::patterns::Pattern;
use crate::rules;
use life_core::{
    Error, Position, Result, RunnerConfig, SeedConfig, SessionId, SizePolicy, StepReport,
};
use rand::SeedableRng;
use rand_chacha::ChaCha8Rng;
use tracing::{debug, info, instrument, warn};

pub struct Session {
    id: SessionId,
    grid: Grid,
    policy: SizePolicy,
    running: bool,
    generation: u64,
    message: Option<String>,
}

impl Session {
    /// Start with an empty grid sized for `viewport_width`.
    pub fn new(policy: SizePolicy, viewport_width: u32) -> Result<Self> {
        policy.validate()?;
        let grid = Grid::empty(policy.size_for_width(viewport_width))?;
        let session = Self {
            id: SessionId::new(),
            grid,
            policy,
            running: false,
            generation: 0,
            message: None,
        };
        info!(
            session_id = %session.id,
            size = session.grid.size(),
            viewport_width,
            "Session created"
        );
        Ok(session)
    }

    /// Build a session from runner configuration and apply its seed.
    pub fn from_config(config: &RunnerConfig) -> Result<Self> {
        config.validate()?;
        let mut session = Self::new(config.size_policy.clone(), config.viewport_width)?;
        session.seed(&config.seed)?;
        if config.autoplay && !session.grid.is_extinct() {
            session.play()?;
        }
        Ok(session)
    }

    /// Replace the grid according to `seed`. The generation counter restarts.
    pub fn seed(&mut self, seed: &SeedConfig) -> Result<()> {
        let size = self.grid.size();
        let empty = Grid::empty(size)?;
        let grid = match seed {
            SeedConfig::Empty => empty,
            SeedConfig::Pattern { name, row, col } => {
                let pattern = Pattern::by_name(name)?;
                match (row, col) {
                    (Some(row), Some(col)) => pattern.place(&empty, Position::new(*row, *col))?,
                    _ => pattern.place_centered(&empty)?,
                }
            }
            SeedConfig::Random { density, seed: rng_seed } => {
                let mut rng = ChaCha8Rng::seed_from_u64(*rng_seed);
                Grid::random(size, *density, &mut rng)?
            }
        };
        debug!(session_id = %self.id, population = grid.population(), "Grid seeded");
        self.replace_grid(grid);
        Ok(())
    }

    pub fn id(&self) -> SessionId {
        self.id
    }

    pub fn grid(&self) -> &Grid {
        &self.grid
    }

    pub fn size(&self) -> usize {
        self.grid.size()
    }

    pub fn is_running(&self) -> bool {
        self.running
    }

    pub fn generation(&self) -> u64 {
        self.generation
    }

    /// Message left by the last terminal step, until dismissed or cleared.
    pub fn message(&self) -> Option<&str> {
        self.message.as_deref()
    }

    /// Start stepping. An all-dead grid has nothing to run.
    pub fn play(&mut self) -> Result<()> {
        if self.grid.is_extinct() {
            warn!(session_id = %self.id, "Play rejected: grid is empty");
            return Err(Error::InvalidState("cannot play an empty grid".to_string()));
        }
        self.message = None;
        self.running = true;
        info!(session_id = %self.id, generation = self.generation, "Playing");
        Ok(())
    }

    pub fn pause(&mut self) {
        self.running = false;
        info!(session_id = %self.id, generation = self.generation, "Paused");
    }

    /// Halt and reset to an empty grid of the current size.
    pub fn stop(&mut self) -> Result<()> {
        self.running = false;
        self.message = None;
        self.replace_grid(Grid::empty(self.grid.size())?);
        info!(session_id = %self.id, "Stopped");
        Ok(())
    }

    /// Flip one cell.
    pub fn toggle(&mut self, pos: Position) -> Result<()> {
        self.grid = self.grid.toggled(pos)?;
        debug!(session_id = %self.id, row = pos.row, col = pos.col, "Cell toggled");
        Ok(())
    }

    /// Re-size for a new viewport width. Always discards the current cells
    /// and starts over with an empty grid; the running flag is kept.
    pub fn resize_for_width(&mut self, width: u32) -> Result<()> {
        let size = self.policy.size_for_width(width);
        self.replace_grid(Grid::empty(size)?);
        info!(session_id = %self.id, width, size, "Resized");
        Ok(())
    }

    pub fn dismiss_message(&mut self) {
        self.message = None;
    }

    /// Advance one generation if running. A terminal classification halts the
    /// session and leaves its message behind.
    #[instrument(skip(self), fields(session_id = %self.id))]
    pub fn tick(&mut self) -> Option<StepReport> {
        if !self.running {
            return None;
        }

        let (next, report) = rules::advance(&self.grid, self.generation + 1);
        self.grid = next;
        self.generation = report.generation;

        if let Some(message) = report.classification.message() {
            self.running = false;
            self.message = Some(message.to_string());
            info!(
                generation = report.generation,
                classification = %report.classification,
                population = report.population,
                "{}",
                message
            );
        }

        Some(report)
    }

    fn replace_grid(&mut self, grid: Grid) {
        self.grid = grid;
        self.generation = 0;
    }
}
