//! Post-hoc run summary computed from step results.

use std::fmt;

use super::types::{PackState, StepResult};

/// Aggregate figures derived from a complete run.
///
/// Computed post-hoc from `Vec<StepResult>` so the report always agrees
/// with the recorded steps.
#[derive(Debug, Clone, PartialEq)]
pub struct RunReport {
    /// Number of applied actions.
    pub steps: usize,
    /// Simulated hours at the end of the run.
    pub elapsed_hours: f64,
    /// Total hours of use applied.
    pub used_hours: f64,
    /// Total hours of recharge applied.
    pub recharged_hours: f64,
    /// Total number of clamped cell operations.
    pub clamp_events: usize,
    /// Lowest pack percent observed, starting state included.
    pub min_percent: f64,
    /// Pack aggregates after the last step, if any step ran.
    pub last: Option<PackState>,
}

impl RunReport {
    /// Computes the report from the complete step record vector.
    ///
    /// # Arguments
    ///
    /// * `initial` - Pack aggregates before the first action
    /// * `results` - Complete step results in order
    ///
    /// # Returns
    ///
    /// A `RunReport` with all fields populated; an empty run yields zero
    /// totals and the starting percent as its minimum.
    pub fn from_results(initial: &PackState, results: &[StepResult]) -> Self {
        let Some(last) = results.last() else {
            return Self {
                steps: 0,
                elapsed_hours: 0.0,
                used_hours: 0.0,
                recharged_hours: 0.0,
                clamp_events: 0,
                min_percent: initial.percent,
                last: None,
            };
        };

        Self {
            steps: results.len(),
            elapsed_hours: last.elapsed_hours,
            used_hours: results.iter().map(|r| r.used_hours).sum(),
            recharged_hours: results.iter().map(|r| r.recharged_hours).sum(),
            clamp_events: results.iter().map(|r| r.clamps).sum(),
            min_percent: results
                .iter()
                .map(|r| r.state.percent)
                .fold(initial.percent, f64::min),
            last: Some(last.state.clone()),
        }
    }
}

impl fmt::Display for RunReport {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "--- Pack Report ---")?;
        if let Some(state) = &self.last {
            writeln!(f, "Members:          {}", state.members)?;
            match state.voltage {
                Some(v) => writeln!(f, "Pack Voltage:     {v:.2} V")?,
                None => writeln!(f, "Pack Voltage:     n/a")?,
            }
            writeln!(f, "Pack Capacity:    {:.2}", state.capacity)?;
            writeln!(f, "Pack Charge:      {:.2}", state.charge)?;
            writeln!(f, "Pack Percent:     {:.1}%", state.percent)?;
        }
        writeln!(f, "Steps:            {}", self.steps)?;
        writeln!(f, "Elapsed:          {:.2} h", self.elapsed_hours)?;
        writeln!(
            f,
            "Hours used:       {:.2} h (recharged {:.2} h)",
            self.used_hours, self.recharged_hours
        )?;
        writeln!(f, "Lowest percent:   {:.1}%", self.min_percent)?;
        write!(f, "Clamp events:     {}", self.clamp_events)
    }
}
