/// User actions applied to the pack.
pub mod action;
/// Simulation clock for step and elapsed-hour tracking.
pub mod clock;
pub mod engine;
/// Post-hoc run summary.
pub mod report;
pub mod types;
