//! Simulation engine that applies user actions to the top-level pack.

use std::mem;

use tracing::{debug, info};

use crate::cells::{Battery, Pack};

use super::action::Action;
use super::clock::Clock;
use super::types::{PackState, StepResult};

/// Simulation engine owning the top-level pack and every cell in it.
///
/// The engine is the sole owner of all cells: added cells move into the
/// pack, removed cells are dropped, and retyping moves the same members
/// into a freshly built pack.
#[derive(Debug)]
pub struct Engine {
    pack: Pack,
    clock: Clock,
    default_hours: f64,
}

impl Engine {
    /// Creates a new simulation engine.
    ///
    /// # Arguments
    ///
    /// * `pack` - Starting pack
    /// * `default_hours` - Hours used by use/recharge actions without their own
    pub fn new(pack: Pack, default_hours: f64) -> Self {
        Self {
            pack,
            clock: Clock::new(),
            default_hours,
        }
    }

    /// Applies one action and returns the resulting step record.
    pub fn apply(&mut self, action: &Action) -> StepResult {
        let hours = action.hours(self.default_hours);
        let label = action.label(self.default_hours);
        let mut used_hours = 0.0;
        let mut recharged_hours = 0.0;
        let mut clamps = 0;

        match action {
            Action::Use { .. } => {
                used_hours = hours.unwrap_or(0.0);
                clamps = self.pack.use_for(used_hours).len();
            }
            Action::Recharge { .. } => {
                recharged_hours = hours.unwrap_or(0.0);
                clamps = self.pack.recharge(recharged_hours).len();
            }
            Action::Add(cell) => self.pack.add(cell.build()),
            Action::Remove { index } => {
                let removed = usize::try_from(*index)
                    .ok()
                    .and_then(|i| self.pack.delete_battery(i));
                if removed.is_none() {
                    debug!(index, members = self.pack.len(), "remove ignored, out of range");
                }
            }
            Action::Retype { connection } => {
                self.pack = mem::take(&mut self.pack).retype(*connection);
            }
        }

        let step = self.clock.tick(hours);
        let state = PackState::of(&self.pack);
        debug!(step, action = %label, clamps, charge = state.charge, "applied action");

        StepResult {
            step,
            elapsed_hours: self.clock.elapsed_hours(),
            action: label,
            used_hours,
            recharged_hours,
            clamps,
            state,
        }
    }

    /// Applies every action in order and returns the complete step record vector.
    pub fn run(&mut self, actions: &[Action]) -> Vec<StepResult> {
        info!(
            actions = actions.len(),
            members = self.pack.len(),
            connection = %self.pack.connection_type(),
            "starting run"
        );
        let results: Vec<StepResult> = actions.iter().map(|a| self.apply(a)).collect();
        info!(
            steps = self.clock.steps(),
            elapsed_hours = self.clock.elapsed_hours(),
            "run finished"
        );
        results
    }

    /// Returns a reference to the top-level pack.
    pub fn pack(&self) -> &Pack {
        &self.pack
    }

    /// Returns a reference to the simulation clock.
    pub fn clock(&self) -> &Clock {
        &self.clock
    }
}
