//! Battery pack simulator: series/parallel composites of cells with linear
//! charge bookkeeping over discrete use and recharge steps.

pub mod cells;
pub mod config;
/// CSV export of step results.
pub mod io;
/// Action driver, clock, step records and run reports.
pub mod sim;
