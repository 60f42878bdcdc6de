use tracing::warn;

use crate::cells::types::{
    Battery, Clamp, DISCHARGE_RATE, PackError, RECHARGE_RATE, sanitize_hours,
};

/// A single battery cell with fixed voltage and capacity.
///
/// `Cell` keeps its charge within `[0, capacity]` at all times. Use and
/// recharge move charge linearly at [`DISCHARGE_RATE`] and [`RECHARGE_RATE`],
/// the same for every cell regardless of its voltage or capacity.
#[derive(Debug, Clone, PartialEq)]
pub struct Cell {
    /// Terminal voltage in volts.
    voltage: f64,

    /// Maximum storable charge.
    capacity: f64,

    /// Charge currently stored (0.0 to `capacity`).
    charge: f64,
}

impl Cell {
    /// Creates a new cell.
    ///
    /// Out-of-range input is clamped rather than rejected: a negative or NaN
    /// capacity becomes zero and `initial_charge` is forced into
    /// `[0, capacity]`.
    ///
    /// # Arguments
    ///
    /// * `voltage` - Terminal voltage in volts
    /// * `capacity` - Maximum storable charge
    /// * `initial_charge` - Charge at construction
    pub fn new(voltage: f64, capacity: f64, initial_charge: f64) -> Self {
        let capacity = capacity.max(0.0);
        Self {
            voltage,
            capacity,
            charge: initial_charge.max(0.0).min(capacity),
        }
    }
}

impl Battery for Cell {
    fn use_for(&mut self, hours: f64) -> Vec<Clamp> {
        let hours = sanitize_hours(hours);
        let usable_hours = self.charge / DISCHARGE_RATE;
        let drained = self.charge - hours * DISCHARGE_RATE;

        if drained < 0.0 {
            self.charge = 0.0;
            let clamp = Clamp::Depleted { usable_hours };
            warn!(requested_hours = hours, "cell {clamp}");
            vec![clamp]
        } else {
            self.charge = drained.min(self.capacity);
            Vec::new()
        }
    }

    fn recharge(&mut self, hours: f64) -> Vec<Clamp> {
        let hours = sanitize_hours(hours);
        let chargeable_hours = (self.capacity - self.charge) / RECHARGE_RATE;
        let filled = self.charge + hours * RECHARGE_RATE;

        if filled > self.capacity {
            self.charge = self.capacity;
            let clamp = Clamp::Overcharged {
                excess_hours: hours - chargeable_hours,
            };
            warn!(requested_hours = hours, "cell {clamp}");
            vec![clamp]
        } else {
            self.charge = filled.max(0.0);
            Vec::new()
        }
    }

    fn voltage(&self) -> Result<f64, PackError> {
        Ok(self.voltage)
    }

    fn capacity(&self) -> f64 {
        self.capacity
    }

    fn charge(&self) -> f64 {
        self.charge
    }
}
