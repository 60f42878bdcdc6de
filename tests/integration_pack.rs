//! Integration tests for cell and pack aggregation.

mod common;

use common::assert_close;
use pack_sim::cells::{Battery, Cell, Clamp, ConnectionType, Pack, PackError};

#[test]
fn single_cell_use_scenario() {
    let mut cell = common::default_cell();
    cell.use_for(5.0);
    assert_close(cell.charge(), 1500.0);
    assert_eq!(cell.voltage(), Ok(3.7));
    assert_close(cell.percent(), 75.0);
}

#[test]
fn series_pack_scenario() {
    let pack = common::two_cell_pack(ConnectionType::Series);
    assert_close(pack.voltage().unwrap_or(f64::NAN), 7.4);
    assert_close(pack.capacity(), 1000.0);
    assert_close(pack.charge(), 1000.0);
}

#[test]
fn parallel_pack_scenario() {
    let pack = common::two_cell_pack(ConnectionType::Parallel);
    assert_close(pack.voltage().unwrap_or(f64::NAN), 3.7);
    assert_close(pack.capacity(), 3000.0);
    assert_close(pack.charge(), 3000.0);
}

#[test]
fn overcharge_scenario_reports_excess_hours() {
    let mut cell = Cell::new(3.7, 2000.0, 1900.0);
    let clamps = cell.recharge(2.0);
    assert_close(cell.charge(), 2000.0);
    let [Clamp::Overcharged { excess_hours }] = clamps.as_slice() else {
        panic!("expected one overcharge clamp, got {clamps:?}");
    };
    assert!((excess_hours - 4.0 / 3.0).abs() < 1e-9);
}

#[test]
fn delete_scenario_keeps_relative_order() {
    let mut pack = Pack::new(ConnectionType::Parallel);
    pack.add(Cell::new(1.0, 10.0, 10.0));
    pack.add(Cell::new(2.0, 20.0, 20.0));
    pack.add(Cell::new(3.0, 30.0, 30.0));

    assert!(pack.delete_battery(1).is_some());
    let capacities: Vec<f64> = pack.cells().iter().map(|b| b.capacity()).collect();
    assert_eq!(capacities, vec![10.0, 30.0]);

    assert!(pack.delete_battery(2).is_none());
    assert_eq!(pack.len(), 2);
}

#[test]
fn empty_pack_scenario() {
    let series = Pack::new(ConnectionType::Series);
    assert_eq!(series.capacity(), 0.0);
    assert_eq!(series.charge(), 0.0);

    let parallel = Pack::new(ConnectionType::Parallel);
    assert_eq!(parallel.voltage(), Err(PackError::NoMembers));
    assert_eq!(parallel.percent(), 0.0);
}

#[test]
fn nested_packs_aggregate_recursively() {
    let pack = common::series_of_parallel_pairs(2000.0, 1500.0);
    // each pair: 3.7 V, 2 x capacity; series of pairs: sum V, min capacity
    assert_close(pack.voltage().unwrap_or(f64::NAN), 7.4);
    assert_close(pack.capacity(), 3000.0);
    assert_close(pack.charge(), 3000.0);
    assert_close(pack.percent(), 100.0);
}

#[test]
fn nested_packs_fan_out_use_and_recharge() {
    let mut pack = common::series_of_parallel_pairs(2000.0, 1500.0);
    let clamps = pack.use_for(16.0);
    // the two 1500 cells run empty after 15 h each
    assert_eq!(
        clamps,
        vec![
            Clamp::Depleted { usable_hours: 15.0 },
            Clamp::Depleted { usable_hours: 15.0 },
        ]
    );
    assert_close(pack.charge(), 0.0);

    pack.recharge(2.0);
    // first pair 400 + 300 each, second pair 0 + 300 each
    assert_close(pack.charge(), 600.0);
    assert_close(pack.capacity(), 3000.0);
    assert_close(pack.percent(), 20.0);
}

#[test]
fn nested_empty_parallel_pack_poisons_series_voltage() {
    let mut pack = Pack::new(ConnectionType::Series);
    pack.add(common::default_cell());
    pack.add(Pack::new(ConnectionType::Parallel));
    assert_eq!(pack.voltage(), Err(PackError::NoMembers));
    // empty member contributes zero capacity to the series minimum
    assert_eq!(pack.capacity(), 0.0);
}

#[test]
fn charge_invariant_holds_for_every_member() {
    let mut pack = common::series_of_parallel_pairs(700.0, 300.0);
    pack.add(Cell::new(1.2, 50.0, 25.0));
    for hours in [0.0, 0.25, 1.0, 3.5, 10.0, 99.0] {
        pack.use_for(hours);
        assert!(all_in_bounds(&pack));
        pack.recharge(hours);
        assert!(all_in_bounds(&pack));
    }
}

#[test]
fn retype_preserves_member_state() {
    let mut pack = common::two_cell_pack(ConnectionType::Series);
    pack.use_for(5.0);
    let pack = pack.retype(ConnectionType::Parallel);
    assert_close(pack.charge(), 2000.0);
    assert_close(pack.capacity(), 3000.0);
}

#[test]
fn parallel_pack_takes_voltage_from_nested_series_head() {
    // series head: 3.7 + 3.5 V, capacity min(1000, 2000), charge min(800, 2000)
    let mut head = Pack::new(ConnectionType::Series);
    head.add(Cell::new(3.7, 1000.0, 800.0));
    head.add(Cell::new(3.5, 2000.0, 2000.0));

    let mut pack = Pack::new(ConnectionType::Parallel);
    pack.add(head);
    pack.add(Cell::new(9.0, 500.0, 250.0));

    assert_close(pack.voltage().unwrap_or(f64::NAN), 7.2);
    assert_close(pack.capacity(), 1500.0);
    assert_close(pack.charge(), 1050.0);
}

#[test]
fn clamps_follow_membership_order_for_unequal_cells() {
    let mut pack = Pack::new(ConnectionType::Parallel);
    pack.add(Cell::new(3.7, 1000.0, 200.0));
    pack.add(Cell::new(3.7, 1000.0, 1000.0));
    pack.add(Cell::new(3.7, 1000.0, 50.0));
    assert_eq!(
        pack.use_for(5.0),
        vec![
            Clamp::Depleted { usable_hours: 2.0 },
            Clamp::Depleted { usable_hours: 0.5 },
        ]
    );

    // 850 + 450 and 700 + 450 overflow; 100 + 450 does not
    let mut pack = Pack::new(ConnectionType::Series);
    pack.add(Cell::new(3.7, 1000.0, 850.0));
    pack.add(Cell::new(3.7, 1000.0, 100.0));
    pack.add(Cell::new(3.7, 1000.0, 700.0));
    assert_eq!(
        pack.recharge(3.0),
        vec![
            Clamp::Overcharged { excess_hours: 2.0 },
            Clamp::Overcharged { excess_hours: 1.0 },
        ]
    );
}

fn all_in_bounds(pack: &Pack) -> bool {
    pack.cells().iter().all(|b| {
        let charge = b.charge();
        (0.0..=b.capacity()).contains(&charge)
    })
}
