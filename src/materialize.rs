// SPDX-License-Identifier: Apache-2.0

use std::fmt;

use crate::config::{IconCorner, IconLayoutConfig};
use crate::layout::{Body, Placeholder, PlacedPort};
use crate::{BoundingBox, Coordinate, IconLayout, Port, compute_layout};

/// A cell that an icon can be generated from.
pub trait SourceCell {
    fn name(&self) -> &str;
    fn bounds(&self) -> BoundingBox;
    /// Exported ports, in definition order.
    fn ports(&self) -> &[Port];
}

/// Plain in-memory [`SourceCell`].
#[derive(Debug, Clone, PartialEq)]
pub struct Cell {
    pub name: String,
    pub bounds: BoundingBox,
    pub ports: Vec<Port>,
}

impl Cell {
    pub fn new(name: impl AsRef<str>, bounds: BoundingBox) -> Self {
        Cell {
            name: name.as_ref().to_string(),
            bounds,
            ports: Vec::new(),
        }
    }

    pub fn add_port(&mut self, port: Port) -> &mut Self {
        self.ports.push(port);
        self
    }
}

impl SourceCell for Cell {
    fn name(&self) -> &str {
        &self.name
    }

    fn bounds(&self) -> BoundingBox {
        self.bounds
    }

    fn ports(&self) -> &[Port] {
        &self.ports
    }
}

/// Failure reported by an [`IconBuilder`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BuilderError(pub String);

impl fmt::Display for BuilderError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl std::error::Error for BuilderError {}

/// Receives a finished [`IconLayout`] and creates the corresponding objects
/// in a design database.
pub trait IconBuilder {
    fn create_cell(&mut self, name: &str) -> Result<(), BuilderError>;
    /// Places the cell-center marker.
    fn add_cell_center(&mut self, at: Coordinate) -> Result<(), BuilderError>;
    /// Draws the body outline annotated with `function_name`.
    fn add_body(&mut self, body: &Body, function_name: &str) -> Result<(), BuilderError>;
    /// Creates the pin, export, label and lead for one port.
    fn add_port(&mut self, port: &PlacedPort) -> Result<(), BuilderError>;
    fn add_placeholder(&mut self, placeholder: &Placeholder) -> Result<(), BuilderError>;
}

/// Error that aborts icon generation.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum LayoutError {
    /// The icon cell itself could not be created.
    CannotCreateCell { name: String, source: BuilderError },
    /// The cell-center marker could not be placed.
    CellCenter { cell: String, source: BuilderError },
    /// The body outline could not be created.
    Body { cell: String, source: BuilderError },
    /// A port's pin or export could not be created.
    Port {
        cell: String,
        port: String,
        source: BuilderError,
    },
    /// The placeholder pin could not be created.
    Placeholder { cell: String, source: BuilderError },
}

impl fmt::Display for LayoutError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            LayoutError::CannotCreateCell { name, source } => {
                write!(f, "Cannot create Icon cell {name}: {source}")
            }
            LayoutError::CellCenter { cell, source } => {
                write!(f, "cannot place cell center in {cell}: {source}")
            }
            LayoutError::Body { cell, source } => {
                write!(f, "cannot draw body of {cell}: {source}")
            }
            LayoutError::Port { cell, port, source } => {
                write!(f, "cannot create export {port} in {cell}: {source}")
            }
            LayoutError::Placeholder { cell, source } => {
                write!(f, "cannot create placeholder pin in {cell}: {source}")
            }
        }
    }
}

impl std::error::Error for LayoutError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            LayoutError::CannotCreateCell { source, .. }
            | LayoutError::CellCenter { source, .. }
            | LayoutError::Body { source, .. }
            | LayoutError::Port { source, .. }
            | LayoutError::Placeholder { source, .. } => Some(source),
        }
    }
}

/// Name of the icon view of `cell_name`.
pub fn icon_cell_name(cell_name: &str) -> String {
    format!("{cell_name}{{ic}}")
}

/// Lays out an icon for `cell` and hands it to `builder`.
///
/// The whole layout is computed before the builder sees anything; the first
/// builder failure aborts generation and is returned.
pub fn make_icon(
    cell: &impl SourceCell,
    config: &IconLayoutConfig,
    builder: &mut impl IconBuilder,
) -> Result<IconLayout, LayoutError> {
    let layout = compute_layout(cell.ports(), config, &cell.bounds());
    let name = icon_cell_name(cell.name());

    builder
        .create_cell(&name)
        .map_err(|source| LayoutError::CannotCreateCell {
            name: name.clone(),
            source,
        })?;

    if let Some(at) = layout.cell_center {
        builder
            .add_cell_center(at)
            .map_err(|source| LayoutError::CellCenter {
                cell: name.clone(),
                source,
            })?;
    }

    if let Some(body) = &layout.body {
        builder
            .add_body(body, cell.name())
            .map_err(|source| LayoutError::Body {
                cell: name.clone(),
                source,
            })?;
    }

    for port in &layout.ports {
        builder.add_port(port).map_err(|source| LayoutError::Port {
            cell: name.clone(),
            port: port.name.clone(),
            source,
        })?;
    }

    if let Some(placeholder) = &layout.placeholder {
        builder
            .add_placeholder(placeholder)
            .map_err(|source| LayoutError::Placeholder {
                cell: name.clone(),
                source,
            })?;
    }

    log::debug!("created {} with {} exports", name, layout.ports.len());
    Ok(layout)
}

/// Position for an instance of the icon next to its schematic: just outside
/// the `corner` of `cell_bounds`, snapped to `alignment`.
pub fn instance_position(
    cell_bounds: &BoundingBox,
    icon_bounds: &BoundingBox,
    corner: IconCorner,
    alignment: f64,
) -> Coordinate {
    let half_width = icon_bounds.width() / 2.0;
    let half_height = icon_bounds.height() / 2.0;
    let position = match corner {
        IconCorner::UpperRight => Coordinate::new(
            cell_bounds.max_x + half_width,
            cell_bounds.max_y + half_height,
        ),
        IconCorner::UpperLeft => Coordinate::new(
            cell_bounds.min_x - half_width,
            cell_bounds.max_y + half_height,
        ),
        IconCorner::LowerRight => Coordinate::new(
            cell_bounds.max_x + half_width,
            cell_bounds.min_y - half_height,
        ),
        IconCorner::LowerLeft => Coordinate::new(
            cell_bounds.min_x - half_width,
            cell_bounds.min_y - half_height,
        ),
    };
    position.grid_aligned(alignment)
}
