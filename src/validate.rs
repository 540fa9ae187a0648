// SPDX-License-Identifier: Apache-2.0

use std::fmt;

use fixedbitset::FixedBitSet;
use geo::relate::Relate;

use crate::layout::{MIN_HORIZONTAL_SLOTS, MIN_VERTICAL_SLOTS};
use crate::{IconLayout, Side};

/// A broken structural rule in an [`IconLayout`].
#[derive(Debug, Clone, PartialEq)]
pub enum ValidationError {
    /// The recorded side count disagrees with the ports on that side.
    CountMismatch {
        side: Side,
        recorded: usize,
        actual: usize,
    },
    /// An ordinal is outside `0..count` for its side.
    OrdinalOutOfRange {
        port: String,
        side: Side,
        ordinal: usize,
    },
    /// Two ports share an ordinal on the same side.
    DuplicateOrdinal { side: Side, ordinal: usize },
    /// A pin lies strictly inside the body.
    PinInsideBody { port: String },
    /// The body is smaller than its minimum slot count allows.
    BodyTooSmall { width: f64, height: f64 },
}

impl fmt::Display for ValidationError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ValidationError::CountMismatch {
                side,
                recorded,
                actual,
            } => write!(
                f,
                "{side} side records {recorded} ports but holds {actual}"
            ),
            ValidationError::OrdinalOutOfRange {
                port,
                side,
                ordinal,
            } => write!(f, "port {port} has ordinal {ordinal} outside the {side} side"),
            ValidationError::DuplicateOrdinal { side, ordinal } => {
                write!(f, "ordinal {ordinal} is used twice on the {side} side")
            }
            ValidationError::PinInsideBody { port } => {
                write!(f, "pin of port {port} is inside the icon body")
            }
            ValidationError::BodyTooSmall { width, height } => {
                write!(f, "icon body {width} x {height} is below its minimum size")
            }
        }
    }
}

impl std::error::Error for ValidationError {}

impl IconLayout {
    /// Checks that every side holds a contiguous run of ordinals, that side
    /// counts agree with the ports, and (unless pins are placed at their
    /// source locations) that the body meets its minimum size and no pin
    /// falls inside it.
    pub fn validate(&self) -> Result<(), ValidationError> {
        for side in Side::ALL {
            let recorded = self.counts.get(side);
            let mut seen = FixedBitSet::with_capacity(recorded);
            let mut actual = 0;
            for port in self.ports.iter().filter(|p| p.side == side) {
                actual += 1;
                if port.ordinal >= recorded {
                    return Err(ValidationError::OrdinalOutOfRange {
                        port: port.name.clone(),
                        side,
                        ordinal: port.ordinal,
                    });
                }
                if seen.put(port.ordinal) {
                    return Err(ValidationError::DuplicateOrdinal {
                        side,
                        ordinal: port.ordinal,
                    });
                }
            }
            if actual != recorded {
                return Err(ValidationError::CountMismatch {
                    side,
                    recorded,
                    actual,
                });
            }
        }

        if self.exact {
            return Ok(());
        }

        let width = self.body_bounds.width();
        let height = self.body_bounds.height();
        if width < MIN_HORIZONTAL_SLOTS as f64 * self.lead_spacing
            || height < MIN_VERTICAL_SLOTS as f64 * self.lead_spacing
        {
            return Err(ValidationError::BodyTooSmall { width, height });
        }

        let body = self.body_bounds.to_geo_polygon();
        for port in &self.ports {
            // a point on the outline is not contained
            if body.relate(&port.pin.to_geo_point()).is_contains() {
                return Err(ValidationError::PinInsideBody {
                    port: port.name.clone(),
                });
            }
        }
        Ok(())
    }
}
