//! The bounded grid and the generation step.

use crate::catalog::{self, Pattern};
use crate::cell::{Coord, Population};
use crate::config::{valid_dimensions, DEFAULT_COLUMNS, DEFAULT_ROWS};
use crate::error::{Error, Result};
use crate::notifier::{Listener, Notifier};
use log::{debug, trace};
use rand::Rng;
use std::collections::HashMap;
use std::fmt;
use std::sync::Arc;

#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum CellState {
    Dead,
    Alive,
}

impl CellState {
    /// State of a cell in the next generation given its live neighbor count.
    pub fn next(self, alive_neighbors: u8) -> CellState {
        match (self, alive_neighbors) {
            (CellState::Alive, 2..=3) => CellState::Alive, // Survives
            (CellState::Dead, 3) => CellState::Alive,      // Becomes alive
            _ => CellState::Dead,                          // Dies or remains dead
        }
    }
}

/// A game of life on a finite, resizable grid.
///
/// Only live cells are stored, and a generation step only looks at live cells
/// and their neighbors, so its cost follows the population rather than the
/// grid area. The borders are hard edges: cells past them never exist.
///
/// Every mutator notifies the subscribed [`Listener`]s exactly once after the
/// change is complete. Mutation takes `&mut self`, so share a game between
/// threads behind a lock to keep queries from observing a half-applied step.
#[derive(Debug)]
pub struct Game {
    columns: usize,
    rows: usize,
    generations: u64,
    population: Population,
    notifier: Notifier,
}

impl Default for Game {
    fn default() -> Self {
        Game {
            columns: DEFAULT_COLUMNS,
            rows: DEFAULT_ROWS,
            generations: 0,
            population: Population::new(),
            notifier: Notifier::new(),
        }
    }
}

impl Game {
    /// Creates a game with every cell dead.
    pub fn new(columns: usize, rows: usize) -> Result<Self> {
        if !valid_dimensions(columns, rows) {
            return Err(Error::InvalidDimensions { columns, rows });
        }
        Ok(Game {
            columns,
            rows,
            ..Game::default()
        })
    }

    pub fn columns(&self) -> usize {
        self.columns
    }

    pub fn rows(&self) -> usize {
        self.rows
    }

    /// Generations computed since construction or the last [`clear`](Game::clear).
    pub fn generations(&self) -> u64 {
        self.generations
    }

    /// Number of live cells.
    pub fn population_count(&self) -> usize {
        self.population.len()
    }

    /// A copy of the live cells. Changing it does not affect the game.
    pub fn population(&self) -> Population {
        self.population.clone()
    }

    fn coord(&self, column: usize, row: usize) -> Result<Coord> {
        let coord = Coord::new(column, row);
        if coord.within(self.columns, self.rows) {
            Ok(coord)
        } else {
            Err(Error::OutOfBounds {
                column,
                row,
                columns: self.columns,
                rows: self.rows,
            })
        }
    }

    pub fn is_alive(&self, column: usize, row: usize) -> Result<bool> {
        let coord = self.coord(column, row)?;
        Ok(self.population.contains(coord))
    }

    pub fn set_alive(&mut self, column: usize, row: usize) -> Result<()> {
        let coord = self.coord(column, row)?;
        self.population.insert(coord);
        self.notify();
        Ok(())
    }

    pub fn set_dead(&mut self, column: usize, row: usize) -> Result<()> {
        let coord = self.coord(column, row)?;
        self.population.remove(coord);
        self.notify();
        Ok(())
    }

    /// Flips a cell between alive and dead. Returns the new state.
    pub fn toggle(&mut self, column: usize, row: usize) -> Result<CellState> {
        let coord = self.coord(column, row)?;
        let state = if self.population.remove(coord) {
            CellState::Dead
        } else {
            self.population.insert(coord);
            CellState::Alive
        };
        self.notify();
        Ok(state)
    }

    /// Kills every cell and resets the generation counter.
    pub fn clear(&mut self) {
        debug!("clearing {} live cells", self.population.len());
        self.population.clear();
        self.generations = 0;
        self.notify();
    }

    /// Changes the grid size.
    ///
    /// Live cells outside the new bounds are dropped for good; growing the grid
    /// again does not bring them back. Resizing to the current size does
    /// nothing and notifies no one.
    pub fn resize(&mut self, columns: usize, rows: usize) -> Result<()> {
        if !valid_dimensions(columns, rows) {
            return Err(Error::InvalidDimensions { columns, rows });
        }
        if self.columns == columns && self.rows == rows {
            return Ok(());
        }

        let before = self.population.len();
        self.population.retain(|cell| cell.within(columns, rows));
        debug!(
            "resized {}x{} -> {}x{}, pruned {} live cells",
            self.columns,
            self.rows,
            columns,
            rows,
            before - self.population.len()
        );
        self.columns = columns;
        self.rows = rows;
        self.notify();
        Ok(())
    }

    /// Advances the game by one generation.
    pub fn next(&mut self) {
        self.population = self.successor();
        self.generations += 1;
        trace!(
            "generation {}: {} live cells",
            self.generations,
            self.population.len()
        );
        self.notify();
    }

    /// Computes the next generation from the current one without touching it.
    ///
    /// The first pass credits every on-grid neighbor of every live cell; the
    /// second decides each candidate against those counts. A dead cell with no
    /// live neighbor cannot be born, so it is never a candidate.
    fn successor(&self) -> Population {
        let mut candidates: HashMap<Coord, u8> =
            HashMap::with_capacity(self.population.len() * 8);

        for &cell in &self.population {
            for neighbor in cell.neighbors(self.columns, self.rows) {
                *candidates.entry(neighbor).or_insert(0) += 1;
            }
        }
        // Isolated live cells must still be judged, so that they die.
        for &cell in &self.population {
            candidates.entry(cell).or_insert(0);
        }

        candidates
            .into_iter()
            .filter(|&(cell, alive_neighbors)| {
                let state = if self.population.contains(cell) {
                    CellState::Alive
                } else {
                    CellState::Dead
                };
                state.next(alive_neighbors) == CellState::Alive
            })
            .map(|(cell, _)| cell)
            .collect()
    }

    /// Makes every cell alive with probability `density`, using the thread rng.
    pub fn randomize(&mut self, density: f64) -> Result<()> {
        self.randomize_with(&mut rand::rng(), density)
    }

    /// Makes every cell alive with probability `density`.
    ///
    /// The generation counter is left alone.
    pub fn randomize_with<R: Rng>(&mut self, rng: &mut R, density: f64) -> Result<()> {
        if !(0.0..=1.0).contains(&density) {
            return Err(Error::InvalidDensity(density));
        }

        let mut population = Population::new();
        for row in 0..self.rows {
            for column in 0..self.columns {
                if rng.random_bool(density) {
                    population.insert(Coord::new(column, row));
                }
            }
        }
        debug!(
            "randomized {}x{} grid with density {density}: {} live cells",
            self.columns,
            self.rows,
            population.len()
        );
        self.population = population;
        self.notify();
        Ok(())
    }

    /// Clears the game and places `pattern` at its center. See [`catalog::seed`].
    pub fn seed(&mut self, pattern: &Pattern) -> Result<()> {
        catalog::seed(self, pattern)
    }

    /// Subscribes a listener. Returns `false` if it was already subscribed.
    pub fn subscribe(&mut self, listener: Arc<dyn Listener>) -> bool {
        self.notifier.subscribe(listener)
    }

    /// Unsubscribes a listener. Returns `false` if it was not subscribed.
    pub fn unsubscribe(&mut self, listener: &Arc<dyn Listener>) -> bool {
        self.notifier.unsubscribe(listener)
    }

    fn notify(&self) {
        self.notifier.notify_all(self);
    }
}

/// One line per row, `X` for a live cell and `.` for a dead one.
impl fmt::Display for Game {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for row in 0..self.rows {
            if row > 0 {
                writeln!(f)?;
            }
            for column in 0..self.columns {
                let alive = self.population.contains(Coord::new(column, row));
                f.write_str(if alive { "X" } else { "." })?;
            }
        }
        Ok(())
    }
}
