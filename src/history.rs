use arrayvec::ArrayVec;
use log::debug;
use thiserror::Error;

use crate::game::{Level, Tile};

/// Maximum number of snapshots retained per level attempt.
pub const MAX_HISTORY: usize = 50;

/// Undo requested with only the setup snapshot present.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
#[error("nothing to undo")]
pub struct NothingToUndo;

/// A fully independent copy of the observable level state at one instant.
#[derive(Debug, Clone, PartialEq, Eq)]
struct Snapshot {
    grid: Vec<Vec<Tile>>,
    player: (usize, usize),
}

impl Snapshot {
    fn capture(level: &Level) -> Self {
        Snapshot {
            grid: level.rows().to_vec(),
            player: level.player(),
        }
    }
}

/// Bounded undo stack. The top entry always mirrors the current level state;
/// once full, recording evicts the oldest entry (purely time-ordered, so long
/// games simply lose the ability to undo all the way back to setup).
#[derive(Debug, Default)]
pub struct History {
    entries: ArrayVec<Snapshot, MAX_HISTORY>,
}

impl History {
    pub fn new() -> Self {
        History {
            entries: ArrayVec::new(),
        }
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Snapshot the current level state. Called once at level setup and once
    /// after every accepted move.
    pub fn record(&mut self, level: &Level) {
        if self.entries.is_full() {
            self.entries.remove(0);
        }
        self.entries.push(Snapshot::capture(level));
    }

    /// Discard the top snapshot (the current state) and restore the level to
    /// the one beneath it. Fails with `NothingToUndo` at the setup state.
    pub fn undo(&mut self, level: &mut Level) -> Result<(), NothingToUndo> {
        if self.entries.len() <= 1 {
            debug!("undo requested at initial state");
            return Err(NothingToUndo);
        }
        self.entries.pop();
        let prior = self.entries.last().expect("history cannot be empty here");
        level.restore(prior.grid.clone(), prior.player);
        Ok(())
    }
}
