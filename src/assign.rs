// SPDX-License-Identifier: Apache-2.0

use itertools::Itertools;

use crate::config::{IconLayoutConfig, PlacementMode, Rotation};
use crate::{BoundingBox, Coordinate, Port, Side, SideCounts};

/// Side, position along that side, and label rotation chosen for one port.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SideAssignment {
    pub side: Side,
    pub ordinal: usize,
    pub rotation: Rotation,
}

/// Ports in the order they are laid out, each paired with its assignment.
pub(crate) struct Assignments<'a> {
    pub(crate) ports: Vec<(&'a Port, SideAssignment)>,
    pub(crate) counts: SideCounts,
}

/// Assigns every port to a side using the strategy selected by `config`.
/// Body-only ports are dropped.
pub(crate) fn assign_sides<'a>(
    ports: &'a [Port],
    config: &IconLayoutConfig,
    cell_bounds: &BoundingBox,
) -> Assignments<'a> {
    let ports: Vec<&Port> = ports.iter().filter(|p| !p.body_only).collect();
    match config.placement_mode {
        PlacementMode::ByCharacteristic => by_characteristic(ports, config),
        PlacementMode::ByCellLocation => by_cell_location(ports, config, cell_bounds),
    }
}

fn by_characteristic<'a>(mut ports: Vec<&'a Port>, config: &IconLayoutConfig) -> Assignments<'a> {
    if config.reverse_order {
        ports.reverse();
    }
    let mut counts = SideCounts::default();
    let ports = ports
        .into_iter()
        .map(|port| {
            let class = port.class();
            let side = config.side_for_characteristic.get(class);
            let slot = counts.get_mut(side);
            let ordinal = *slot;
            *slot += 1;
            let rotation = config.rotation_for_characteristic.get(class);
            (
                port,
                SideAssignment {
                    side,
                    ordinal,
                    rotation,
                },
            )
        })
        .collect();
    Assignments { ports, counts }
}

/// Number of ports per side when placing by cell location. Every side gets
/// `n / 4`; the remainder goes one each to left, top and right.
pub fn location_quotas(n: usize) -> SideCounts {
    let base = n / 4;
    let mut counts = SideCounts {
        left: base,
        right: base,
        top: base,
        bottom: base,
    };
    for side in [Side::Left, Side::Top, Side::Right] {
        if counts.total() < n {
            *counts.get_mut(side) += 1;
        }
    }
    counts
}

/// Reference point for each side: the cell center pushed out by the cell
/// width along that side's normal. All slots on one side share it.
fn side_reference(side: Side, bounds: &BoundingBox) -> Coordinate {
    bounds.center() + side.outward() * bounds.width()
}

/// Sides in the order they are filled while walking around the sorted
/// ports.
const FILL_ORDER: [Side; 4] = [Side::Left, Side::Top, Side::Right, Side::Bottom];

fn by_cell_location<'a>(
    mut ports: Vec<&'a Port>,
    config: &IconLayoutConfig,
    cell_bounds: &BoundingBox,
) -> Assignments<'a> {
    let center = cell_bounds.center();
    // stable sort keeps input order for equal angles; total_cmp keeps the
    // order total when an anchor is NaN
    ports.sort_by(|a, b| {
        let angle_a = a.anchor.angle_about(&center);
        let angle_b = b.anchor.angle_about(&center);
        angle_b.total_cmp(&angle_a)
    });

    let n = ports.len();
    let counts = location_quotas(n);
    let slot_points: Vec<Coordinate> = FILL_ORDER
        .iter()
        .flat_map(|&side| std::iter::repeat_n(side_reference(side, cell_bounds), counts.get(side)))
        .collect();

    // try every circular starting offset and keep the first with the least
    // total distance
    let mut best = 0;
    let mut best_distance = f64::MAX;
    for offset in 0..n {
        let distance: f64 = slot_points
            .iter()
            .enumerate()
            .map(|(j, point)| ports[(j + offset) % n].anchor.distance(point))
            .sum();
        if distance < best_distance {
            best_distance = distance;
            best = offset;
        }
    }
    log::debug!("cell location placement: rotation {best} of {n}, total distance {best_distance}");

    let mut assigned: Vec<Option<SideAssignment>> = vec![None; n];
    let mut start = 0;
    for side in FILL_ORDER {
        let count = counts.get(side);
        for i in 0..count {
            // left and top run against the walk direction
            let ordinal = match side {
                Side::Left | Side::Top => count - i - 1,
                Side::Right | Side::Bottom => i,
            };
            assigned[(start + i + best) % n] = Some(SideAssignment {
                side,
                ordinal,
                rotation: config.rotation_for_side.get(side),
            });
        }
        start += count;
    }

    let ports = ports
        .into_iter()
        .zip_eq(assigned)
        .filter_map(|(port, assignment)| assignment.map(|a| (port, a)))
        .collect();
    Assignments { ports, counts }
}
