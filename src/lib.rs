// SPDX-License-Identifier: Apache-2.0

//! Automatic icon generation for schematic cells.
//!
//! Given the exported ports of a cell, [`compute_layout`] decides which side
//! of a rectangular "black box" each port belongs on, where along that side
//! its lead and pin go, and how its label is drawn. [`make_icon`] then hands
//! the finished layout to an [`IconBuilder`] that creates the actual objects.

mod assign;
mod config;
mod geometry;
mod layout;
mod materialize;
mod port;
mod prefs;
mod side;
mod validate;

pub use assign::{SideAssignment, location_quotas};
pub use config::{
    ClassMap, ClassRotations, ConfigError, ExportTechnology, ExportTextLocation, ExportTextStyle,
    IconCorner, IconLayoutConfig, PlacementMode, Rotation, SideMap, SideRotations,
};
pub use geometry::{BoundingBox, Coordinate};
pub use layout::{
    BUS_PIN_SIZE, Body, IconLayout, Label, Lead, LeadKind, MIN_HORIZONTAL_SLOTS,
    MIN_VERTICAL_SLOTS, PinKind, Placeholder, PlacedPort, TextAnchor, compute_layout,
    effective_spacing,
};
pub use materialize::{
    BuilderError, Cell, IconBuilder, LayoutError, SourceCell, icon_cell_name, instance_position,
    make_icon,
};
pub use port::{Characteristic, ClockKind, Port, PortClass, UnknownCharacteristic};
pub use prefs::{ConfigSource, PrefValue, Preferences, SharedPreferences};
pub use side::{
    BOTTOM_SIDE_INDEX, LEFT_SIDE_INDEX, RIGHT_SIDE_INDEX, Side, SideCounts, TOP_SIDE_INDEX,
};
pub use validate::ValidationError;
