//! Shared test fixtures for integration tests.

#![allow(dead_code)]

use pack_sim::cells::{Cell, ConnectionType, Pack};

/// Desktop default cell (3.7 V, 2000 capacity, full).
pub fn default_cell() -> Cell {
    Cell::new(3.7, 2000.0, 2000.0)
}

/// Smaller 3.7 V cell (1000 capacity, full).
pub fn small_cell() -> Cell {
    Cell::new(3.7, 1000.0, 1000.0)
}

/// The two-cell pack used throughout the examples: default cell then small cell.
pub fn two_cell_pack(connection: ConnectionType) -> Pack {
    let mut pack = Pack::new(connection);
    pack.add(default_cell());
    pack.add(small_cell());
    pack
}

/// Series string of two parallel pairs with the given per-cell capacities.
pub fn series_of_parallel_pairs(first: f64, second: f64) -> Pack {
    let pair = |capacity: f64| {
        let mut p = Pack::new(ConnectionType::Parallel);
        p.add(Cell::new(3.7, capacity, capacity));
        p.add(Cell::new(3.7, capacity, capacity));
        p
    };
    let mut pack = Pack::new(ConnectionType::Series);
    pack.add(pair(first));
    pack.add(pair(second));
    pack
}

/// Asserts two floats are equal within `1e-9`.
pub fn assert_close(actual: f64, expected: f64) {
    assert!(
        (actual - expected).abs() < 1e-9,
        "expected {expected}, got {actual}"
    );
}
