// SPDX-License-Identifier: Apache-2.0

use std::fmt;
use std::str::FromStr;
use std::sync::LazyLock;

use regex::Regex;

use crate::Coordinate;

// `low:high` index range inside brackets
static BUS_RANGE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"\[[^\[\]]*?(\d+):(\d+)").expect("valid bus range pattern"));

/// Sub-kinds of clock ports. All of them are treated alike when choosing an
/// icon side.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ClockKind {
    /// Generic clock (`clk`).
    Clock,
    /// Clock phase 1-6 (`c1`..`c6`).
    Phase(u8),
    /// Precharge phase 1-6 (`p1`..`p6`).
    Precharge(u8),
}

/// Electrical role of a port.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Characteristic {
    Input,
    Output,
    Bidirectional,
    Power,
    Ground,
    Clock(ClockKind),
    ReferenceInput,
    ReferenceOutput,
    ReferenceBase,
    Unknown,
}

impl Characteristic {
    pub fn is_clock(&self) -> bool {
        matches!(self, Characteristic::Clock(_))
    }

}

impl fmt::Display for Characteristic {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Characteristic::Input => write!(f, "in"),
            Characteristic::Output => write!(f, "out"),
            Characteristic::Bidirectional => write!(f, "bidir"),
            Characteristic::Power => write!(f, "pwr"),
            Characteristic::Ground => write!(f, "gnd"),
            Characteristic::Clock(ClockKind::Clock) => write!(f, "clk"),
            Characteristic::Clock(ClockKind::Phase(n)) => write!(f, "c{n}"),
            Characteristic::Clock(ClockKind::Precharge(n)) => write!(f, "p{n}"),
            Characteristic::ReferenceInput => write!(f, "refin"),
            Characteristic::ReferenceOutput => write!(f, "refout"),
            Characteristic::ReferenceBase => write!(f, "refbase"),
            Characteristic::Unknown => write!(f, "unknown"),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UnknownCharacteristic(pub String);

impl fmt::Display for UnknownCharacteristic {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "unknown port characteristic '{}'", self.0)
    }
}

impl std::error::Error for UnknownCharacteristic {}

impl FromStr for Characteristic {
    type Err = UnknownCharacteristic;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let lower = s.to_ascii_lowercase();
        let characteristic = match lower.as_str() {
            "in" | "input" => Characteristic::Input,
            "out" | "output" => Characteristic::Output,
            "bidir" | "bidirectional" => Characteristic::Bidirectional,
            "pwr" | "power" => Characteristic::Power,
            "gnd" | "ground" => Characteristic::Ground,
            "clk" | "clock" => Characteristic::Clock(ClockKind::Clock),
            "refin" => Characteristic::ReferenceInput,
            "refout" => Characteristic::ReferenceOutput,
            "refbase" => Characteristic::ReferenceBase,
            "unknown" => Characteristic::Unknown,
            other => {
                let phase = |prefix: char| -> Option<u8> {
                    let rest = other.strip_prefix(prefix)?;
                    let n: u8 = rest.parse().ok()?;
                    (1..=6).contains(&n).then_some(n)
                };
                if let Some(n) = phase('c') {
                    Characteristic::Clock(ClockKind::Phase(n))
                } else if let Some(n) = phase('p') {
                    Characteristic::Clock(ClockKind::Precharge(n))
                } else {
                    return Err(UnknownCharacteristic(s.to_string()));
                }
            }
        };
        Ok(characteristic)
    }
}

/// Classes of ports that have their own entry in the side and rotation
/// tables.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum PortClass {
    Input,
    Output,
    Bidirectional,
    Power,
    Ground,
    Clock,
}

impl PortClass {
    pub const ALL: [PortClass; 6] = [
        PortClass::Input,
        PortClass::Output,
        PortClass::Bidirectional,
        PortClass::Power,
        PortClass::Ground,
        PortClass::Clock,
    ];
}

impl fmt::Display for PortClass {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            PortClass::Input => "input",
            PortClass::Output => "output",
            PortClass::Bidirectional => "bidirectional",
            PortClass::Power => "power",
            PortClass::Ground => "ground",
            PortClass::Clock => "clock",
        };
        write!(f, "{name}")
    }
}

/// An exported connection point of the source cell.
#[derive(Debug, Clone, PartialEq)]
pub struct Port {
    pub name: String,
    pub characteristic: Characteristic,
    /// Location of the port in the source cell.
    pub anchor: Coordinate,
    /// Electrically marked as a supply, regardless of `characteristic`.
    pub is_power: bool,
    /// Electrically marked as ground, regardless of `characteristic`.
    pub is_ground: bool,
    /// Ports that only belong on the body of the source cell never appear on
    /// its icon.
    pub body_only: bool,
    /// Whether the underlying port can connect to a bus wire.
    pub bus_capable: bool,
}

impl Port {
    pub fn new(
        name: impl AsRef<str>,
        characteristic: Characteristic,
        anchor: impl Into<Coordinate>,
    ) -> Self {
        Port {
            name: name.as_ref().to_string(),
            characteristic,
            anchor: anchor.into(),
            is_power: false,
            is_ground: false,
            body_only: false,
            bus_capable: true,
        }
    }

    pub fn with_power(mut self) -> Self {
        self.is_power = true;
        self
    }

    pub fn with_ground(mut self) -> Self {
        self.is_ground = true;
        self
    }

    pub fn with_body_only(mut self) -> Self {
        self.body_only = true;
        self
    }

    pub fn with_bus_capable(mut self, bus_capable: bool) -> Self {
        self.bus_capable = bus_capable;
        self
    }

    /// Returns `true` if the name denotes more than one signal: a list such
    /// as `a,b` or a bracketed index range such as `data[0:7]`. A single
    /// index like `d[3]` names one bit and is not a bus.
    pub fn is_bus_member(&self) -> bool {
        if self.name.contains(',') {
            return true;
        }
        // a range with equal ends is a single bit
        BUS_RANGE
            .captures_iter(&self.name)
            .any(|c| c[1].parse::<u64>().ok() != c[2].parse::<u64>().ok())
    }

    /// Class used to look up the side and text rotation of this port. Ground
    /// and power markings override the nominal characteristic; unrecognized
    /// characteristics fall back to the input class.
    pub fn class(&self) -> PortClass {
        if self.is_ground {
            return PortClass::Ground;
        }
        if self.is_power {
            return PortClass::Power;
        }
        match self.characteristic {
            Characteristic::Input => PortClass::Input,
            Characteristic::Output => PortClass::Output,
            Characteristic::Bidirectional => PortClass::Bidirectional,
            Characteristic::Power => PortClass::Power,
            Characteristic::Ground => PortClass::Ground,
            Characteristic::Clock(_) => PortClass::Clock,
            Characteristic::ReferenceInput
            | Characteristic::ReferenceOutput
            | Characteristic::ReferenceBase
            | Characteristic::Unknown => PortClass::Input,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parse_characteristics() {
        assert_eq!("IN".parse::<Characteristic>().unwrap(), Characteristic::Input);
        assert_eq!(
            "c3".parse::<Characteristic>().unwrap(),
            Characteristic::Clock(ClockKind::Phase(3))
        );
        assert_eq!(
            "p6".parse::<Characteristic>().unwrap(),
            Characteristic::Clock(ClockKind::Precharge(6))
        );
        assert!("c7".parse::<Characteristic>().is_err());
        assert!("sideways".parse::<Characteristic>().is_err());
    }

    #[test]
    fn ground_marking_wins() {
        let port = Port::new("vss", Characteristic::Output, (0.0, 0.0))
            .with_power()
            .with_ground();
        assert_eq!(port.class(), PortClass::Ground);
        let port = Port::new("vdd", Characteristic::Input, (0.0, 0.0)).with_power();
        assert_eq!(port.class(), PortClass::Power);
    }

    #[test]
    fn fallback_class() {
        let port = Port::new("r", Characteristic::ReferenceBase, (0.0, 0.0));
        assert_eq!(port.class(), PortClass::Input);
        let port = Port::new("phi", Characteristic::Clock(ClockKind::Phase(2)), (0.0, 0.0));
        assert_eq!(port.class(), PortClass::Clock);
    }

    #[test]
    fn bus_names() {
        let port = |name: &str| Port::new(name, Characteristic::Input, (0.0, 0.0));
        assert!(port("data[0:7]").is_bus_member());
        assert!(port("a,b").is_bus_member());
        assert!(port("x[0],y").is_bus_member());
        assert!(port("q[1,4:6]").is_bus_member());
        assert!(!port("a[3]").is_bus_member());
        assert!(!port("d[2:2]").is_bus_member());
        assert!(!port("clk").is_bus_member());
        assert!(!port("a[0][1]").is_bus_member());
    }

    #[test]
    fn display_names() {
        assert_eq!(Characteristic::Bidirectional.to_string(), "bidir");
        assert_eq!(Characteristic::Clock(ClockKind::Phase(4)).to_string(), "c4");
        assert_eq!(Characteristic::Clock(ClockKind::Precharge(2)).to_string(), "p2");
        for name in ["in", "gnd", "c1", "p6", "refout"] {
            assert_eq!(name.parse::<Characteristic>().unwrap().to_string(), name);
        }
    }
}
