use std::fmt;

use serde::Deserialize;

use crate::cells::ConnectionType;
use crate::config::CellConfig;

/// A discrete user action applied to the top-level pack.
///
/// Simulated time only moves on `Use` and `Recharge`; membership edits and
/// retyping are instantaneous.
///
/// # Examples
///
/// ```
/// use pack_sim::sim::action::Action;
///
/// let a = Action::Use { hours: Some(2.0) };
/// assert_eq!(a.label(1.0), "use 2.00h");
/// assert_eq!(a.hours(1.0), Some(2.0));
/// ```
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(tag = "action", rename_all = "snake_case", deny_unknown_fields)]
pub enum Action {
    /// Drain every cell; `None` falls back to the scenario default.
    Use { hours: Option<f64> },
    /// Recharge every cell; `None` falls back to the scenario default.
    Recharge { hours: Option<f64> },
    /// Append a new cell at the end of the pack.
    Add(CellConfig),
    /// Remove the member at `index`; out of range (including negative) is a no-op.
    Remove { index: i64 },
    /// Rebuild the pack under another topology, keeping members and order.
    Retype { connection: ConnectionType },
}

impl Action {
    /// Hours of simulated time this action advances, if any.
    pub fn hours(&self, default_hours: f64) -> Option<f64> {
        match self {
            Self::Use { hours } | Self::Recharge { hours } => Some(hours.unwrap_or(default_hours)),
            _ => None,
        }
    }

    /// Short human-readable description used in step records.
    pub fn label(&self, default_hours: f64) -> String {
        let hours = self.hours(default_hours).unwrap_or(0.0);
        match self {
            Self::Use { .. } => format!("use {hours:.2}h"),
            Self::Recharge { .. } => format!("recharge {hours:.2}h"),
            Self::Add(cell) => format!(
                "add {}V/{}/{}",
                cell.voltage, cell.capacity, cell.charge
            ),
            Self::Remove { index } => format!("remove #{index}"),
            Self::Retype { connection } => format!("retype {connection}"),
        }
    }
}

impl fmt::Display for Action {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Use { hours: None } => write!(f, "use"),
            Self::Recharge { hours: None } => write!(f, "recharge"),
            _ => write!(f, "{}", self.label(0.0)),
        }
    }
}
