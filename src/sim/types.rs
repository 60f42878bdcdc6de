//! Core simulation types: per-step records of the pack state.

use std::fmt;

use crate::cells::{Battery, Pack};

/// Aggregate figures of a pack at one instant.
#[derive(Debug, Clone, PartialEq)]
pub struct PackState {
    /// Number of direct members.
    pub members: usize,
    /// Pack voltage (V); `None` when it cannot be derived (empty parallel pack).
    pub voltage: Option<f64>,
    /// Pack capacity.
    pub capacity: f64,
    /// Pack charge.
    pub charge: f64,
    /// Charge over capacity in percent (0 when capacity is 0).
    pub percent: f64,
}

impl PackState {
    /// Queries every aggregate of `pack`.
    pub fn of(pack: &Pack) -> Self {
        Self {
            members: pack.len(),
            voltage: pack.voltage().ok(),
            capacity: pack.capacity(),
            charge: pack.charge(),
            percent: pack.percent(),
        }
    }
}

impl fmt::Display for PackState {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.voltage {
            Some(v) => write!(f, "V={v:>6.2} V")?,
            None => write!(f, "V=   n/a  ")?,
        }
        write!(
            f,
            "  cap={:>8.1}  charge={:>8.1} ({:>5.1}%)  members={}",
            self.capacity, self.charge, self.percent, self.members
        )
    }
}

/// Complete record of one applied action.
#[derive(Debug, Clone, PartialEq)]
pub struct StepResult {
    /// Step index.
    pub step: usize,
    /// Simulated hours elapsed after this step.
    pub elapsed_hours: f64,
    /// Description of the applied action.
    pub action: String,
    /// Hours of use applied by this step.
    pub used_hours: f64,
    /// Hours of recharge applied by this step.
    pub recharged_hours: f64,
    /// Number of cells that hit a charge bound during this step.
    pub clamps: usize,
    /// Pack aggregates after this step.
    pub state: PackState,
}

impl fmt::Display for StepResult {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "#{:>3} ({:>6.2}h) | {:<18} | {} | clamped={}",
            self.step, self.elapsed_hours, self.action, self.state, self.clamps,
        )
    }
}
