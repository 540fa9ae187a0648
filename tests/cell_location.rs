// SPDX-License-Identifier: Apache-2.0

use rstest::rstest;

use iconstitch::{
    BoundingBox, Characteristic, Coordinate, IconLayoutConfig, PlacementMode, Port, Rotation,
    Side, SideRotations, compute_layout, location_quotas,
};

fn init_logging() {
    let _ = env_logger::builder().is_test(true).try_init();
}

fn by_location(exact: bool) -> IconLayoutConfig {
    IconLayoutConfig {
        placement_mode: PlacementMode::ByCellLocation,
        use_exact_location: exact,
        ..Default::default()
    }
}

fn square() -> BoundingBox {
    BoundingBox::new(-10.0, -10.0, 10.0, 10.0)
}

/// Two ports near the middle of each edge of `square()`.
fn ring_ports() -> Vec<Port> {
    [
        ("e1", (10.0, 3.0)),
        ("w2", (-10.0, -3.0)),
        ("n1", (-3.0, 10.0)),
        ("s1", (3.0, -10.0)),
        ("e2", (10.0, -3.0)),
        ("w1", (-10.0, 3.0)),
        ("n2", (3.0, 10.0)),
        ("s2", (-3.0, -10.0)),
    ]
    .into_iter()
    .map(|(name, at)| Port::new(name, Characteristic::Input, at))
    .collect()
}

/// `n` ports spread over a spiral so no two share an angle.
fn spiral_ports(n: usize) -> Vec<Port> {
    (0..n)
        .map(|i| {
            let angle = i as f64 * 2.4;
            let radius = 2.0 + i as f64 * 0.3;
            Port::new(
                format!("p{i}"),
                Characteristic::Output,
                (radius * angle.cos(), radius * angle.sin()),
            )
        })
        .collect()
}

#[rstest]
#[case(0)]
#[case(1)]
#[case(2)]
#[case(3)]
#[case(4)]
#[case(5)]
#[case(6)]
#[case(7)]
#[case(11)]
#[case(12)]
#[case(30)]
fn quotas_cover_every_port(#[case] n: usize) {
    init_logging();
    let layout = compute_layout(&spiral_ports(n), &by_location(false), &square());
    let counts = layout.counts;
    assert_eq!(counts.total(), n);
    assert_eq!(counts, location_quotas(n));
    let base = n / 4;
    for side in [Side::Left, Side::Top, Side::Right] {
        assert!(counts.get(side) == base || counts.get(side) == base + 1);
    }
    assert_eq!(counts.bottom, n - counts.left - counts.top - counts.right);
    assert_eq!(layout.validate(), Ok(()));
}

#[test]
fn ring_ports_go_to_nearest_side() {
    init_logging();
    let layout = compute_layout(&ring_ports(), &by_location(false), &square());
    let placed = |name: &str| {
        let p = layout.port(name).unwrap();
        (p.side, p.ordinal)
    };
    assert_eq!(placed("w1"), (Side::Left, 0));
    assert_eq!(placed("w2"), (Side::Left, 1));
    assert_eq!(placed("n2"), (Side::Top, 0));
    assert_eq!(placed("n1"), (Side::Top, 1));
    assert_eq!(placed("e1"), (Side::Right, 0));
    assert_eq!(placed("e2"), (Side::Right, 1));
    assert_eq!(placed("s1"), (Side::Bottom, 0));
    assert_eq!(placed("s2"), (Side::Bottom, 1));

    // layout order follows descending angle
    let order: Vec<&str> = layout.ports.iter().map(|p| p.name.as_str()).collect();
    assert_eq!(order, vec!["e2", "s1", "s2", "w2", "w1", "n1", "n2", "e1"]);
}

#[test]
fn ring_ports_on_grid_slots() {
    init_logging();
    let layout = compute_layout(&ring_ports(), &by_location(false), &square());
    assert_eq!(layout.body_bounds, BoundingBox::centered(6.0, 10.0));
    assert_eq!(layout.port("w1").unwrap().pin, Coordinate::new(-5.0, 1.0));
    assert_eq!(layout.port("w2").unwrap().pin, Coordinate::new(-5.0, -1.0));
    assert_eq!(layout.port("n2").unwrap().pin, Coordinate::new(1.0, 7.0));
    assert_eq!(layout.port("s2").unwrap().pin, Coordinate::new(-1.0, -7.0));
}

#[test]
fn exact_location_keeps_source_coordinates() {
    init_logging();
    let config = IconLayoutConfig {
        lead_spacing: 7.0,
        lead_length: 3.0,
        ..by_location(true)
    };
    let ports = vec![Port::new("x", Characteristic::Input, (37.5, -12.0))];
    let bounds = BoundingBox::new(0.0, -20.0, 50.0, 10.0);
    let layout = compute_layout(&ports, &config, &bounds);

    let x = layout.port("x").unwrap();
    assert_eq!(x.pin, Coordinate::new(37.5, -12.0));
    assert_eq!(x.body_point, Coordinate::new(37.5, -12.0));
    assert_eq!(layout.body_bounds, bounds);
    assert!(layout.exact);
    assert_eq!(layout.validate(), Ok(()));
}

#[test]
fn rotation_follows_side() {
    init_logging();
    let rotations = SideRotations::default()
        .with(Side::Top, Rotation::R90)
        .with(Side::Bottom, Rotation::R270);
    let config = IconLayoutConfig {
        rotation_for_side: rotations,
        ..by_location(false)
    };
    let layout = compute_layout(&ring_ports(), &config, &square());
    for port in &layout.ports {
        let expected = match port.side {
            Side::Top => Rotation::R90,
            Side::Bottom => Rotation::R270,
            Side::Left | Side::Right => Rotation::R0,
        };
        assert_eq!(port.label.rotation, expected, "{}", port.name);
    }
}

#[test]
fn reverse_order_is_ignored() {
    init_logging();
    let forward = compute_layout(&ring_ports(), &by_location(false), &square());
    let config = IconLayoutConfig {
        reverse_order: true,
        ..by_location(false)
    };
    assert_eq!(compute_layout(&ring_ports(), &config, &square()), forward);
}

#[test]
fn undefined_anchors_still_lay_out() {
    init_logging();
    let ports: Vec<Port> = spiral_ports(40)
        .into_iter()
        .enumerate()
        .map(|(i, port)| {
            if i % 3 == 0 {
                Port::new(port.name, port.characteristic, (f64::NAN, 0.0))
            } else {
                port
            }
        })
        .collect();
    let layout = compute_layout(&ports, &by_location(false), &square());
    assert_eq!(layout.ports.len(), 40);
    assert_eq!(layout.counts, location_quotas(40));
    assert_eq!(layout.validate(), Ok(()));
}
