// SPDX-License-Identifier: Apache-2.0

use std::fmt;

use indexmap::IndexMap;

use crate::{PortClass, Side};

/// Error raised while building an [`IconLayoutConfig`] or reading one from
/// stored preferences.
#[derive(Debug, Clone, PartialEq)]
pub enum ConfigError {
    /// A side index outside `0..=3`.
    InvalidSide(i64),
    /// A text rotation that is not one of 0, 90, 180 or 270 degrees.
    InvalidRotation(i64),
    /// A per-class table lacks an entry.
    MissingClass {
        table: &'static str,
        class: PortClass,
    },
    /// A per-side table lacks an entry.
    MissingSide { table: &'static str, side: Side },
    /// An enumerated preference holds an index with no meaning.
    InvalidChoice { key: String, value: i64 },
    /// A preference holds a value of the wrong type.
    WrongType { key: String, expected: &'static str },
    /// A preference key that does not configure icon generation.
    UnknownKey(String),
    /// The preference document could not be parsed.
    Parse(String),
}

impl fmt::Display for ConfigError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ConfigError::InvalidSide(index) => {
                write!(f, "side index {index} is not one of 0 (left), 1 (right), 2 (top), 3 (bottom)")
            }
            ConfigError::InvalidRotation(degrees) => {
                write!(f, "text rotation {degrees} is not one of 0, 90, 180, 270")
            }
            ConfigError::MissingClass { table, class } => {
                write!(f, "{table} has no entry for {class} ports")
            }
            ConfigError::MissingSide { table, side } => {
                write!(f, "{table} has no entry for the {side} side")
            }
            ConfigError::InvalidChoice { key, value } => {
                write!(f, "preference '{key}' has invalid value {value}")
            }
            ConfigError::WrongType { key, expected } => {
                write!(f, "preference '{key}' must be {expected}")
            }
            ConfigError::UnknownKey(key) => write!(f, "unknown preference '{key}'"),
            ConfigError::Parse(msg) => write!(f, "cannot parse preferences: {msg}"),
        }
    }
}

impl std::error::Error for ConfigError {}

/// Text rotation applied to an export label.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum Rotation {
    #[default]
    R0,
    R90,
    R180,
    R270,
}

impl Rotation {
    pub fn from_degrees(degrees: i64) -> Result<Rotation, ConfigError> {
        match degrees {
            0 => Ok(Rotation::R0),
            90 => Ok(Rotation::R90),
            180 => Ok(Rotation::R180),
            270 => Ok(Rotation::R270),
            _ => Err(ConfigError::InvalidRotation(degrees)),
        }
    }

    pub fn degrees(&self) -> u16 {
        match self {
            Rotation::R0 => 0,
            Rotation::R90 => 90,
            Rotation::R180 => 180,
            Rotation::R270 => 270,
        }
    }
}

/// How ports are distributed around the icon body.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum PlacementMode {
    /// Side chosen from the port's electrical characteristic.
    #[default]
    ByCharacteristic,
    /// Side chosen from where the port sits in the source cell.
    ByCellLocation,
}

/// Anchor of an export label relative to its lead.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum ExportTextStyle {
    #[default]
    Centered,
    Inward,
    Outward,
}

/// Where along the lead an export label is drawn.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum ExportTextLocation {
    OnBody,
    #[default]
    LeadEnd,
    LeadMiddle,
}

/// Kind of pin created for each export.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum ExportTechnology {
    /// Zero-size universal pins.
    Universal,
    /// Schematic bus pins.
    #[default]
    SchematicBus,
}

/// Corner of the source schematic next to which the generated icon is
/// instantiated.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum IconCorner {
    #[default]
    UpperRight,
    UpperLeft,
    LowerRight,
    LowerLeft,
}

/// A complete table with one value per [`PortClass`].
#[derive(Debug, Clone, PartialEq)]
pub struct ClassMap<T>(IndexMap<PortClass, T>);

impl<T: Copy> ClassMap<T> {
    /// Builds a table from `entries`, failing if any class is missing. Later
    /// entries for the same class replace earlier ones.
    pub fn new(
        table: &'static str,
        entries: impl IntoIterator<Item = (PortClass, T)>,
    ) -> Result<Self, ConfigError> {
        let map: IndexMap<PortClass, T> = entries.into_iter().collect();
        if let Some(class) = PortClass::ALL.into_iter().find(|c| !map.contains_key(c)) {
            return Err(ConfigError::MissingClass { table, class });
        }
        Ok(ClassMap(map))
    }

    /// Builds a table that maps every class to `value`.
    pub fn uniform(value: T) -> Self {
        ClassMap(PortClass::ALL.into_iter().map(|c| (c, value)).collect())
    }

    pub fn get(&self, class: PortClass) -> T {
        // construction guarantees every class is present
        self.0[&class]
    }

    /// Returns a copy of this table with `class` remapped to `value`.
    pub fn with(mut self, class: PortClass, value: T) -> Self {
        self.0.insert(class, value);
        self
    }
}

pub type SideMap = ClassMap<Side>;
pub type ClassRotations = ClassMap<Rotation>;

impl Default for SideMap {
    fn default() -> Self {
        ClassMap(
            [
                (PortClass::Input, Side::Left),
                (PortClass::Output, Side::Right),
                (PortClass::Bidirectional, Side::Top),
                (PortClass::Power, Side::Bottom),
                (PortClass::Ground, Side::Bottom),
                (PortClass::Clock, Side::Left),
            ]
            .into_iter()
            .collect(),
        )
    }
}

impl Default for ClassRotations {
    fn default() -> Self {
        ClassMap::uniform(Rotation::R0)
    }
}

/// A complete table with one text rotation per [`Side`].
#[derive(Debug, Clone, PartialEq)]
pub struct SideRotations(IndexMap<Side, Rotation>);

impl SideRotations {
    pub fn new(entries: impl IntoIterator<Item = (Side, Rotation)>) -> Result<Self, ConfigError> {
        let map: IndexMap<Side, Rotation> = entries.into_iter().collect();
        if let Some(side) = Side::ALL.into_iter().find(|s| !map.contains_key(s)) {
            return Err(ConfigError::MissingSide {
                table: "rotation_for_side",
                side,
            });
        }
        Ok(SideRotations(map))
    }

    pub fn get(&self, side: Side) -> Rotation {
        self.0[&side]
    }

    pub fn with(mut self, side: Side, rotation: Rotation) -> Self {
        self.0.insert(side, rotation);
        self
    }
}

impl Default for SideRotations {
    fn default() -> Self {
        SideRotations(Side::ALL.into_iter().map(|s| (s, Rotation::R0)).collect())
    }
}

/// Options controlling icon generation. [`Default`] yields the factory
/// settings.
#[derive(Debug, Clone, PartialEq)]
pub struct IconLayoutConfig {
    /// Length of the lead from the body edge to the pin. Default: 2.
    pub lead_length: f64,
    /// Distance between adjacent leads on a side. Default: 2.
    pub lead_spacing: f64,
    pub placement_mode: PlacementMode,
    /// Under [`PlacementMode::ByCellLocation`], put each pin exactly where
    /// the port sits in the source cell. Default: true.
    pub use_exact_location: bool,
    /// Under [`PlacementMode::ByCharacteristic`], process ports last to
    /// first. Default: false.
    pub reverse_order: bool,
    pub draw_body: bool,
    pub draw_leads: bool,
    /// Whether the icon cell gets a cell-center marker.
    pub place_cell_center_marker: bool,
    /// Relative size of the cell name drawn on the body. Default: 2.
    pub body_text_size: f64,
    pub side_for_characteristic: SideMap,
    /// Label rotation under [`PlacementMode::ByCharacteristic`].
    pub rotation_for_characteristic: ClassRotations,
    /// Label rotation under [`PlacementMode::ByCellLocation`].
    pub rotation_for_side: SideRotations,
    pub export_text_style: ExportTextStyle,
    pub export_text_location: ExportTextLocation,
    pub export_technology: ExportTechnology,
    /// Passed through to every export unchanged.
    pub always_drawn: bool,
    /// Where the icon instance goes next to the schematic.
    pub instance_corner: IconCorner,
    /// Grid used to snap the icon instance position. Default: 1.
    pub grid_alignment: f64,
}

impl Default for IconLayoutConfig {
    fn default() -> Self {
        IconLayoutConfig {
            lead_length: 2.0,
            lead_spacing: 2.0,
            placement_mode: PlacementMode::ByCharacteristic,
            use_exact_location: true,
            reverse_order: false,
            draw_body: true,
            draw_leads: true,
            place_cell_center_marker: true,
            body_text_size: 2.0,
            side_for_characteristic: SideMap::default(),
            rotation_for_characteristic: ClassRotations::default(),
            rotation_for_side: SideRotations::default(),
            export_text_style: ExportTextStyle::Centered,
            export_text_location: ExportTextLocation::LeadEnd,
            export_technology: ExportTechnology::SchematicBus,
            always_drawn: false,
            instance_corner: IconCorner::UpperRight,
            grid_alignment: 1.0,
        }
    }
}

impl IconLayoutConfig {
    /// Returns `true` when pins sit at the ports' source locations.
    pub fn places_exactly(&self) -> bool {
        self.placement_mode == PlacementMode::ByCellLocation && self.use_exact_location
    }
}
