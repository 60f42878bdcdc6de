//! Common types and traits shared by single cells and composite packs.

use std::fmt;

use serde::Deserialize;
use thiserror::Error;

/// Charge removed from every cell per hour of use.
pub const DISCHARGE_RATE: f64 = 100.0;

/// Charge added to every cell per hour of recharge.
pub const RECHARGE_RATE: f64 = 150.0;

/// How the members of a pack are wired together.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ConnectionType {
    /// Voltages add up; capacity and charge are bounded by the weakest member.
    #[default]
    Series,
    /// Capacities and charges add up; voltage is that of the first member.
    Parallel,
}

impl fmt::Display for ConnectionType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Series => write!(f, "series"),
            Self::Parallel => write!(f, "parallel"),
        }
    }
}

/// Errors raised by aggregate queries on a pack.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum PackError {
    /// A parallel pack takes its voltage from its first member and has none.
    #[error("parallel pack has no members to take a voltage from")]
    NoMembers,
}

/// Informational record of a cell operation that hit a charge bound.
///
/// Clamping is never a failure: the operation completed and the charge was
/// forced back into `[0, capacity]`.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Clamp {
    /// `use_for` ran the cell empty; only `usable_hours` of charge existed.
    Depleted { usable_hours: f64 },
    /// `recharge` filled the cell; `excess_hours` were spent past full.
    Overcharged { excess_hours: f64 },
}

impl fmt::Display for Clamp {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Depleted { usable_hours } => {
                write!(f, "depleted after {usable_hours:.2} h of use")
            }
            Self::Overcharged { excess_hours } => {
                write!(f, "overcharged for an extra {excess_hours:.2} h")
            }
        }
    }
}

/// Trait shared by everything that stores charge: single cells and packs.
///
/// A pack holds its members as `Box<dyn Battery>`, so packs nest inside
/// other packs without special handling.
pub trait Battery: fmt::Debug {
    /// Drains charge for `hours` of use.
    ///
    /// # Returns
    ///
    /// One [`Clamp`] for every cell that ran empty, in membership order.
    fn use_for(&mut self, hours: f64) -> Vec<Clamp>;

    /// Adds charge for `hours` of recharging.
    ///
    /// # Returns
    ///
    /// One [`Clamp`] for every cell that was filled past capacity.
    fn recharge(&mut self, hours: f64) -> Vec<Clamp>;

    /// Terminal voltage in volts.
    ///
    /// # Errors
    ///
    /// Returns [`PackError::NoMembers`] when the voltage depends on an empty
    /// parallel pack.
    fn voltage(&self) -> Result<f64, PackError>;

    /// Maximum storable charge.
    fn capacity(&self) -> f64;

    /// Charge currently stored.
    fn charge(&self) -> f64;

    /// State of charge in percent; zero when there is no capacity.
    fn percent(&self) -> f64 {
        let capacity = self.capacity();
        if capacity > 0.0 {
            self.charge() / capacity * 100.0
        } else {
            0.0
        }
    }
}

/// Sanitizes a requested duration; negative and NaN hours count as zero.
pub(crate) fn sanitize_hours(hours: f64) -> f64 {
    hours.max(0.0)
}
