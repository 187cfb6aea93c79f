use crate::core::vehicle_data::Vehicle;
use std::cmp::Ordering;

/// Whether one vehicle reaches the observer before, together with, or after another.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ImpactOrder {
    Before,
    Equal,
    After,
}

impl From<ImpactOrder> for Ordering {
    fn from(order: ImpactOrder) -> Self {
        match order {
            ImpactOrder::Before => Ordering::Less,
            ImpactOrder::Equal => Ordering::Equal,
            ImpactOrder::After => Ordering::Greater,
        }
    }
}

/// Ranks two impact times against the observer.
///
/// Vehicles that never impact go last. Future impacts rank before past ones, and
/// within each sign the smaller time goes first. A time of exactly `0.0` is not
/// consistently placed against negative times: each ranks after the other.
pub fn impact_order(t1: f64, t2: f64) -> ImpactOrder {
    if t1 == t2 {
        return ImpactOrder::Equal;
    }
    if t1 == f64::INFINITY {
        return ImpactOrder::After;
    }
    if t2 == f64::INFINITY {
        return ImpactOrder::Before;
    }
    if t1 > 0.0 {
        if t2 > 0.0 && t1 >= t2 {
            ImpactOrder::After
        } else {
            ImpactOrder::Before
        }
    } else if t2 < 0.0 {
        if t1 < t2 {
            ImpactOrder::Before
        } else {
            ImpactOrder::After
        }
    } else {
        ImpactOrder::After
    }
}

/// Stable sort of `vehicles` by their impact time against `observer`.
///
/// Insertion sort: `impact_order` is not a total order around zero and
/// `slice::sort_by` may panic on such comparators.
pub fn sort_by_impact(observer: &Vehicle, vehicles: Vec<Vehicle>, radius: f64) -> Vec<Vehicle> {
    let mut keyed: Vec<(f64, Vehicle)> = vehicles
        .into_iter()
        .map(|v| (observer.impact(&v, radius), v))
        .collect();

    for i in 1..keyed.len() {
        let mut j = i;
        while j > 0 && impact_order(keyed[j - 1].0, keyed[j].0) == ImpactOrder::After {
            keyed.swap(j - 1, j);
            j -= 1;
        }
    }

    keyed.into_iter().map(|(_, v)| v).collect()
}
