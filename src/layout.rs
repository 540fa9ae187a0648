// SPDX-License-Identifier: Apache-2.0

use nalgebra::Vector2;

use crate::assign::{SideAssignment, assign_sides};
use crate::config::{ExportTechnology, ExportTextLocation, ExportTextStyle, IconLayoutConfig, Rotation};
use crate::{BoundingBox, Characteristic, Coordinate, Port, Side, SideCounts};

/// Width and height of a schematic bus pin.
pub const BUS_PIN_SIZE: f64 = 2.0;

/// Fewest lead slots the body is sized for along the left and right sides.
pub const MIN_VERTICAL_SLOTS: usize = 5;

/// Fewest lead slots the body is sized for along the top and bottom sides.
pub const MIN_HORIZONTAL_SLOTS: usize = 3;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PinKind {
    Universal,
    Bus,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LeadKind {
    Wire,
    Bus,
}

/// Which point of the label text sits on its location.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TextAnchor {
    Center,
    Left,
    Right,
    Up,
    Down,
}

/// Placement of an export's name.
#[derive(Debug, Clone, PartialEq)]
pub struct Label {
    pub anchor: TextAnchor,
    pub rotation: Rotation,
    /// Displacement of the label from the pin.
    pub offset: Vector2<f64>,
}

/// Line from the body edge out to the pin.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Lead {
    pub from: Coordinate,
    pub to: Coordinate,
    pub kind: LeadKind,
    /// Whether the lead's ends extend past its endpoints. Bus leads do not.
    pub extended: bool,
}

/// Everything needed to materialize one export on the icon.
#[derive(Debug, Clone, PartialEq)]
pub struct PlacedPort {
    pub name: String,
    pub characteristic: Characteristic,
    pub side: Side,
    pub ordinal: usize,
    /// Where the pin and its export go.
    pub pin: Coordinate,
    /// Where the lead meets the body.
    pub body_point: Coordinate,
    pub pin_kind: PinKind,
    pub pin_size: (f64, f64),
    pub lead: Option<Lead>,
    pub label: Label,
    pub always_drawn: bool,
}

/// The "black box" outline of the icon.
#[derive(Debug, Clone, PartialEq)]
pub struct Body {
    pub bounds: BoundingBox,
    pub outline: [Coordinate; 5],
    pub text_size: f64,
}

/// Invisible pin that keeps an otherwise near-empty icon from having no
/// geometry.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Placeholder {
    pub center: Coordinate,
    pub width: f64,
    pub height: f64,
}

/// Result of [`compute_layout`].
#[derive(Debug, Clone, PartialEq)]
pub struct IconLayout {
    /// Ports in the order they were laid out.
    pub ports: Vec<PlacedPort>,
    pub counts: SideCounts,
    /// Extent of the body, whether or not it is drawn.
    pub body_bounds: BoundingBox,
    pub body: Option<Body>,
    pub placeholder: Option<Placeholder>,
    /// Where the cell-center marker goes, when one is placed.
    pub cell_center: Option<Coordinate>,
    /// Pins sit at their source locations.
    pub exact: bool,
    pub lead_spacing: f64,
}

impl IconLayout {
    pub fn port(&self, name: impl AsRef<str>) -> Option<&PlacedPort> {
        self.ports.iter().find(|p| p.name == name.as_ref())
    }

    /// Ports on `side`, by ordinal.
    pub fn ports_on(&self, side: Side) -> Vec<&PlacedPort> {
        let mut ports: Vec<&PlacedPort> = self.ports.iter().filter(|p| p.side == side).collect();
        ports.sort_by_key(|p| p.ordinal);
        ports
    }

    /// Spacing actually used between leads on `side`.
    pub fn spacing(&self, side: Side) -> f64 {
        effective_spacing(&self.counts, side, self.lead_spacing)
    }

    /// Extent of all geometry in the icon: body, placeholder, pins and
    /// leads. An icon with no geometry has an empty box at the origin.
    pub fn bounds(&self) -> BoundingBox {
        let mut boxes = Vec::new();
        if let Some(body) = &self.body {
            boxes.push(body.bounds);
        }
        if let Some(p) = &self.placeholder {
            boxes.push(BoundingBox::new(
                p.center.x - p.width / 2.0,
                p.center.y - p.height / 2.0,
                p.center.x + p.width / 2.0,
                p.center.y + p.height / 2.0,
            ));
        }
        for port in &self.ports {
            let (w, h) = port.pin_size;
            boxes.push(BoundingBox::new(
                port.pin.x - w / 2.0,
                port.pin.y - h / 2.0,
                port.pin.x + w / 2.0,
                port.pin.y + h / 2.0,
            ));
            if let Some(lead) = &port.lead {
                boxes.push(BoundingBox::new(
                    lead.from.x.min(lead.to.x),
                    lead.from.y.min(lead.to.y),
                    lead.from.x.max(lead.to.x),
                    lead.from.y.max(lead.to.y),
                ));
            }
        }
        boxes
            .into_iter()
            .reduce(|a, b| a.union(&b))
            .unwrap_or_default()
    }
}

/// Lead spacing on `side`, doubled when the side holds fewer than half the
/// ports of the opposite side.
pub fn effective_spacing(counts: &SideCounts, side: Side, lead_spacing: f64) -> f64 {
    if counts.is_crowded_out(side) {
        lead_spacing * 2.0
    } else {
        lead_spacing
    }
}

/// Width and height of the body.
fn body_size(counts: &SideCounts, config: &IconLayoutConfig, cell_bounds: &BoundingBox) -> (f64, f64) {
    if config.places_exactly() {
        (cell_bounds.width(), cell_bounds.height())
    } else {
        (
            counts.max_horizontal().max(MIN_HORIZONTAL_SLOTS) as f64 * config.lead_spacing,
            counts.max_vertical().max(MIN_VERTICAL_SLOTS) as f64 * config.lead_spacing,
        )
    }
}

/// Point where the lead of the `ordinal`th port on `side` meets the body.
/// Slots are centered as a group along the side.
fn body_point(
    side: Side,
    ordinal: usize,
    counts: &SideCounts,
    lead_spacing: f64,
    (x_size, y_size): (f64, f64),
) -> Coordinate {
    let spacing = effective_spacing(counts, side, lead_spacing);
    let count = counts.get(side) as f64;
    let along = |extent: f64| {
        extent / 2.0 - ((extent - (count - 1.0) * spacing) / 2.0 + ordinal as f64 * spacing)
    };
    match side {
        Side::Left => Coordinate::new(-x_size / 2.0, along(y_size)),
        Side::Right => Coordinate::new(x_size / 2.0, along(y_size)),
        Side::Top => Coordinate::new(along(x_size), y_size / 2.0),
        Side::Bottom => Coordinate::new(along(x_size), -y_size / 2.0),
    }
}

fn text_anchor(style: ExportTextStyle, side: Side) -> TextAnchor {
    match (style, side) {
        (ExportTextStyle::Centered, _) => TextAnchor::Center,
        (ExportTextStyle::Inward, Side::Left) | (ExportTextStyle::Outward, Side::Right) => {
            TextAnchor::Right
        }
        (ExportTextStyle::Inward, Side::Right) | (ExportTextStyle::Outward, Side::Left) => {
            TextAnchor::Left
        }
        (ExportTextStyle::Inward, Side::Top) | (ExportTextStyle::Outward, Side::Bottom) => {
            TextAnchor::Down
        }
        (ExportTextStyle::Inward, Side::Bottom) | (ExportTextStyle::Outward, Side::Top) => {
            TextAnchor::Up
        }
    }
}

fn label_offset(location: ExportTextLocation, pin: Coordinate, body_point: Coordinate) -> Vector2<f64> {
    match location {
        ExportTextLocation::OnBody => body_point - pin,
        ExportTextLocation::LeadEnd => Vector2::zeros(),
        ExportTextLocation::LeadMiddle => (body_point - pin) / 2.0,
    }
}

fn place_port(
    port: &Port,
    assignment: SideAssignment,
    counts: &SideCounts,
    size: (f64, f64),
    config: &IconLayoutConfig,
) -> PlacedPort {
    let SideAssignment {
        side,
        ordinal,
        rotation,
    } = assignment;

    let (body_point, lead_end) = if config.places_exactly() {
        (port.anchor, port.anchor)
    } else {
        let bb = body_point(side, ordinal, counts, config.lead_spacing, size);
        (bb, bb + side.outward() * config.lead_length)
    };
    let pin = if config.draw_leads { lead_end } else { body_point };

    let bus = port.bus_capable && port.is_bus_member();
    let pin_kind = if bus || config.export_technology == ExportTechnology::SchematicBus {
        PinKind::Bus
    } else {
        PinKind::Universal
    };
    let pin_size = match pin_kind {
        PinKind::Bus => (BUS_PIN_SIZE, BUS_PIN_SIZE),
        PinKind::Universal => (0.0, 0.0),
    };

    let lead = config.draw_leads.then_some(Lead {
        from: body_point,
        to: pin,
        kind: if bus { LeadKind::Bus } else { LeadKind::Wire },
        extended: !bus,
    });

    let location = if config.draw_leads {
        config.export_text_location
    } else {
        ExportTextLocation::OnBody
    };
    let label = Label {
        anchor: text_anchor(config.export_text_style, side),
        rotation,
        offset: label_offset(location, pin, body_point),
    };

    PlacedPort {
        name: port.name.clone(),
        characteristic: port.characteristic,
        side,
        ordinal,
        pin,
        body_point,
        pin_kind,
        pin_size,
        lead,
        label,
        always_drawn: config.always_drawn,
    }
}

/// Computes the icon for a cell with the given `ports` and bounds.
///
/// This is a pure function of its inputs. Degenerate settings such as a
/// negative lead spacing are not rejected; they produce degenerate but
/// well-defined geometry.
pub fn compute_layout(ports: &[Port], config: &IconLayoutConfig, cell_bounds: &BoundingBox) -> IconLayout {
    let assignments = assign_sides(ports, config, cell_bounds);
    let counts = assignments.counts;
    let size = body_size(&counts, config, cell_bounds);
    let body_bounds = if config.places_exactly() {
        *cell_bounds
    } else {
        BoundingBox::centered(size.0, size.1)
    };
    log::debug!(
        "icon body {} x {} for sides L{} R{} T{} B{}",
        size.0,
        size.1,
        counts.left,
        counts.right,
        counts.top,
        counts.bottom
    );

    let placed: Vec<PlacedPort> = assignments
        .ports
        .into_iter()
        .map(|(port, assignment)| place_port(port, assignment, &counts, size, config))
        .collect();

    let body = config.draw_body.then(|| Body {
        bounds: body_bounds,
        outline: body_bounds.outline(),
        text_size: config.body_text_size,
    });

    let placeholder = (!config.draw_body
        && !config.draw_leads
        && config.place_cell_center_marker
        && placed.len() <= 1)
        .then_some(Placeholder {
            center: Coordinate::ORIGIN,
            width: size.0,
            height: size.1,
        });

    IconLayout {
        ports: placed,
        counts,
        body_bounds,
        body,
        placeholder,
        cell_center: config.place_cell_center_marker.then_some(Coordinate::ORIGIN),
        exact: config.places_exactly(),
        lead_spacing: config.lead_spacing,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::PlacementMode;

    fn input(name: &str) -> Port {
        Port::new(name, Characteristic::Input, (0.0, 0.0))
    }

    #[test]
    fn single_input_is_centered_on_left() {
        let layout = compute_layout(&[input("a")], &IconLayoutConfig::default(), &BoundingBox::default());
        let a = layout.port("a").unwrap();
        assert_eq!(a.body_point, Coordinate::new(-3.0, 0.0));
        assert_eq!(a.pin, Coordinate::new(-5.0, 0.0));
        assert_eq!(layout.body_bounds, BoundingBox::centered(6.0, 10.0));
    }

    #[test]
    fn slots_run_top_to_bottom() {
        let ports: Vec<Port> = ["a", "b", "c"].into_iter().map(input).collect();
        let layout = compute_layout(&ports, &IconLayoutConfig::default(), &BoundingBox::default());
        let ys: Vec<f64> = layout.ports_on(Side::Left).iter().map(|p| p.pin.y).collect();
        assert_eq!(ys, vec![2.0, 0.0, -2.0]);
    }

    #[test]
    fn text_anchors_mirror() {
        for side in Side::ALL {
            let inward = text_anchor(ExportTextStyle::Inward, side);
            let outward = text_anchor(ExportTextStyle::Outward, side);
            assert_ne!(inward, outward);
            assert_eq!(text_anchor(ExportTextStyle::Centered, side), TextAnchor::Center);
        }
        assert_eq!(text_anchor(ExportTextStyle::Inward, Side::Left), TextAnchor::Right);
        assert_eq!(text_anchor(ExportTextStyle::Outward, Side::Top), TextAnchor::Up);
    }

    #[test]
    fn label_offsets() {
        let pin = Coordinate::new(-5.0, 2.0);
        let bb = Coordinate::new(-3.0, 2.0);
        assert_eq!(label_offset(ExportTextLocation::OnBody, pin, bb), Vector2::new(2.0, 0.0));
        assert_eq!(label_offset(ExportTextLocation::LeadEnd, pin, bb), Vector2::zeros());
        assert_eq!(label_offset(ExportTextLocation::LeadMiddle, pin, bb), Vector2::new(1.0, 0.0));
    }

    #[test]
    fn no_leads_collapses_pin_onto_body() {
        let config = IconLayoutConfig {
            draw_leads: false,
            export_text_location: ExportTextLocation::LeadMiddle,
            ..Default::default()
        };
        let layout = compute_layout(&[input("a")], &config, &BoundingBox::default());
        let a = layout.port("a").unwrap();
        assert_eq!(a.pin, a.body_point);
        assert!(a.lead.is_none());
        assert_eq!(a.label.offset, Vector2::zeros());
    }

    #[test]
    fn bus_ports_get_bus_leads() {
        let config = IconLayoutConfig {
            export_technology: ExportTechnology::Universal,
            ..Default::default()
        };
        let ports = vec![
            input("d[0:3]"),
            input("a,b"),
            input("e"),
            input("g[3]"),
            input("f[1:2]").with_bus_capable(false),
        ];
        let layout = compute_layout(&ports, &config, &BoundingBox::default());

        for name in ["d[0:3]", "a,b"] {
            let p = layout.port(name).unwrap();
            assert_eq!(p.pin_kind, PinKind::Bus);
            assert_eq!(p.pin_size, (BUS_PIN_SIZE, BUS_PIN_SIZE));
            let lead = p.lead.unwrap();
            assert_eq!(lead.kind, LeadKind::Bus);
            assert!(!lead.extended);
        }

        for name in ["e", "g[3]", "f[1:2]"] {
            let p = layout.port(name).unwrap();
            assert_eq!(p.pin_kind, PinKind::Universal);
            assert_eq!(p.pin_size, (0.0, 0.0));
            let lead = p.lead.unwrap();
            assert_eq!(lead.kind, LeadKind::Wire);
            assert!(lead.extended);
        }
    }

    #[test]
    fn exact_body_is_cell_bounds() {
        let bounds = BoundingBox::new(-4.0, -1.0, 12.0, 7.0);
        let config = IconLayoutConfig {
            placement_mode: PlacementMode::ByCellLocation,
            ..Default::default()
        };
        let layout = compute_layout(&[], &config, &bounds);
        assert_eq!(layout.body.unwrap().bounds, bounds);
        assert!(layout.exact);
    }

    #[test]
    fn cell_center_marker_follows_flag() {
        let layout = compute_layout(&[input("a")], &IconLayoutConfig::default(), &BoundingBox::default());
        assert_eq!(layout.cell_center, Some(Coordinate::ORIGIN));

        let config = IconLayoutConfig {
            place_cell_center_marker: false,
            ..Default::default()
        };
        let layout = compute_layout(&[input("a")], &config, &BoundingBox::default());
        assert_eq!(layout.cell_center, None);
    }

    #[test]
    fn bounds_cover_pins_and_body() {
        let layout = compute_layout(&[input("a")], &IconLayoutConfig::default(), &BoundingBox::default());
        // bus pin of size 2 at (-5, 0)
        assert_eq!(layout.bounds(), BoundingBox::new(-6.0, -5.0, 3.0, 5.0));
    }
}
