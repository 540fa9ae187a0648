// SPDX-License-Identifier: Apache-2.0

//! Stored user preferences for icon generation.
//!
//! Preferences use the same keys as the desktop tool (`IconGenLeadLength`,
//! `IconGenInputSide`, ...). A [`ConfigSource`] turns them into an immutable
//! [`IconLayoutConfig`] once; the layout engine never reads preferences
//! itself.

use std::sync::Arc;

use indexmap::IndexMap;
use parking_lot::RwLock;

use crate::config::{
    ConfigError, ExportTechnology, ExportTextLocation, ExportTextStyle, IconCorner,
    IconLayoutConfig, PlacementMode, Rotation,
};
use crate::{PortClass, Side};

/// Anything that can produce an icon layout configuration.
pub trait ConfigSource {
    fn load_config(&self) -> Result<IconLayoutConfig, ConfigError>;
}

impl ConfigSource for IconLayoutConfig {
    fn load_config(&self) -> Result<IconLayoutConfig, ConfigError> {
        Ok(self.clone())
    }
}

/// A single stored preference value.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum PrefValue {
    Bool(bool),
    Integer(i64),
    Double(f64),
}

impl From<bool> for PrefValue {
    fn from(value: bool) -> Self {
        PrefValue::Bool(value)
    }
}

impl From<i64> for PrefValue {
    fn from(value: i64) -> Self {
        PrefValue::Integer(value)
    }
}

impl From<f64> for PrefValue {
    fn from(value: f64) -> Self {
        PrefValue::Double(value)
    }
}

const KNOWN_KEYS: &[&str] = &[
    "IconGenLeadLength",
    "IconGenLeadSpacing",
    "IconGenDrawLeads",
    "IconGenDrawBody",
    "IconsAlwaysDrawn",
    "PlaceCellCenter",
    "IconGenExportPlacement",
    "IconGenExportPlacementExact",
    "IconGenReverseExportOrder",
    "IconGenBodyTextSize",
    "IconGenExportLocation",
    "IconGenExportStyle",
    "IconGenExportTech",
    "IconGenInstanceLocation",
    "AlignmentToGrid",
    "IconGenInputSide",
    "IconGenOutputSide",
    "IconGenBidirSide",
    "IconGenPowerSide",
    "IconGenGroundSide",
    "IconGenClockSide",
    "IconGenInputRot",
    "IconGenOutputRot",
    "IconGenBidirRot",
    "IconGenPowerRot",
    "IconGenGroundRot",
    "IconGenClockRot",
    "IconGenTopRot",
    "IconGenBottomRot",
    "IconGenLeftRot",
    "IconGenRightRot",
];

fn class_for_key(key: &str) -> Option<PortClass> {
    let name = key.strip_prefix("IconGen")?;
    let name = name.strip_suffix("Side").or_else(|| name.strip_suffix("Rot"))?;
    match name {
        "Input" => Some(PortClass::Input),
        "Output" => Some(PortClass::Output),
        "Bidir" => Some(PortClass::Bidirectional),
        "Power" => Some(PortClass::Power),
        "Ground" => Some(PortClass::Ground),
        "Clock" => Some(PortClass::Clock),
        _ => None,
    }
}

fn side_for_rot_key(key: &str) -> Option<Side> {
    match key {
        "IconGenLeftRot" => Some(Side::Left),
        "IconGenRightRot" => Some(Side::Right),
        "IconGenTopRot" => Some(Side::Top),
        "IconGenBottomRot" => Some(Side::Bottom),
        _ => None,
    }
}

/// Key/value preference store. Keys not set here keep their factory
/// default.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Preferences {
    values: IndexMap<String, PrefValue>,
}

impl Preferences {
    pub fn new() -> Self {
        Self::default()
    }

    /// Stores `value` under `key`. Unknown keys are rejected; type checks
    /// happen when the configuration is loaded.
    pub fn set(&mut self, key: impl AsRef<str>, value: impl Into<PrefValue>) -> Result<(), ConfigError> {
        let key = key.as_ref();
        if !KNOWN_KEYS.contains(&key) {
            return Err(ConfigError::UnknownKey(key.to_string()));
        }
        self.values.insert(key.to_string(), value.into());
        Ok(())
    }

    pub fn get(&self, key: impl AsRef<str>) -> Option<PrefValue> {
        self.values.get(key.as_ref()).copied()
    }

    /// Restores `key` to its factory default.
    pub fn reset(&mut self, key: impl AsRef<str>) {
        self.values.shift_remove(key.as_ref());
    }

    /// Reads preferences from a flat TOML table, e.g.
    ///
    /// ```toml
    /// IconGenLeadLength = 3.0
    /// IconGenDrawBody = false
    /// IconGenInputSide = 2
    /// ```
    pub fn from_toml_str(text: &str) -> Result<Self, ConfigError> {
        let value: toml::Value = text
            .parse()
            .map_err(|e: toml::de::Error| ConfigError::Parse(e.to_string()))?;
        let table = match value {
            toml::Value::Table(table) => table,
            _ => return Err(ConfigError::Parse("expected a table".to_string())),
        };
        let mut prefs = Preferences::new();
        for (key, value) in table {
            let value = match value {
                toml::Value::Boolean(b) => PrefValue::Bool(b),
                toml::Value::Integer(i) => PrefValue::Integer(i),
                toml::Value::Float(f) => PrefValue::Double(f),
                _ => {
                    return Err(ConfigError::WrongType {
                        key,
                        expected: "a boolean or a number",
                    });
                }
            };
            prefs.set(&key, value)?;
        }
        Ok(prefs)
    }

    fn apply(config: &mut IconLayoutConfig, key: &str, value: PrefValue) -> Result<(), ConfigError> {
        let as_bool = || match value {
            PrefValue::Bool(b) => Ok(b),
            _ => Err(ConfigError::WrongType {
                key: key.to_string(),
                expected: "a boolean",
            }),
        };
        let as_int = || match value {
            PrefValue::Integer(i) => Ok(i),
            _ => Err(ConfigError::WrongType {
                key: key.to_string(),
                expected: "an integer",
            }),
        };
        let as_double = || match value {
            PrefValue::Double(d) => Ok(d),
            PrefValue::Integer(i) => Ok(i as f64),
            _ => Err(ConfigError::WrongType {
                key: key.to_string(),
                expected: "a number",
            }),
        };
        let invalid = |value: i64| ConfigError::InvalidChoice {
            key: key.to_string(),
            value,
        };
        // rotations are stored as quarter turns
        let rotation = |index: i64| match index {
            0..=3 => Rotation::from_degrees(index * 90),
            _ => Err(invalid(index)),
        };

        match key {
            "IconGenLeadLength" => config.lead_length = as_double()?,
            "IconGenLeadSpacing" => config.lead_spacing = as_double()?,
            "IconGenDrawLeads" => config.draw_leads = as_bool()?,
            "IconGenDrawBody" => config.draw_body = as_bool()?,
            "IconsAlwaysDrawn" => config.always_drawn = as_bool()?,
            "PlaceCellCenter" => config.place_cell_center_marker = as_bool()?,
            "IconGenExportPlacementExact" => config.use_exact_location = as_bool()?,
            "IconGenReverseExportOrder" => config.reverse_order = as_bool()?,
            "IconGenBodyTextSize" => config.body_text_size = as_double()?,
            "AlignmentToGrid" => config.grid_alignment = as_double()?,
            "IconGenExportPlacement" => {
                config.placement_mode = match as_int()? {
                    0 => PlacementMode::ByCharacteristic,
                    1 => PlacementMode::ByCellLocation,
                    other => return Err(invalid(other)),
                }
            }
            "IconGenExportLocation" => {
                config.export_text_location = match as_int()? {
                    0 => ExportTextLocation::OnBody,
                    1 => ExportTextLocation::LeadEnd,
                    2 => ExportTextLocation::LeadMiddle,
                    other => return Err(invalid(other)),
                }
            }
            "IconGenExportStyle" => {
                config.export_text_style = match as_int()? {
                    0 => ExportTextStyle::Centered,
                    1 => ExportTextStyle::Inward,
                    2 => ExportTextStyle::Outward,
                    other => return Err(invalid(other)),
                }
            }
            "IconGenExportTech" => {
                config.export_technology = match as_int()? {
                    0 => ExportTechnology::Universal,
                    1 => ExportTechnology::SchematicBus,
                    other => return Err(invalid(other)),
                }
            }
            "IconGenInstanceLocation" => {
                config.instance_corner = match as_int()? {
                    0 => IconCorner::UpperRight,
                    1 => IconCorner::UpperLeft,
                    2 => IconCorner::LowerRight,
                    3 => IconCorner::LowerLeft,
                    other => return Err(invalid(other)),
                }
            }
            _ if key.ends_with("Side") => {
                let class = class_for_key(key).ok_or_else(|| ConfigError::UnknownKey(key.to_string()))?;
                let side = Side::from_index(as_int()?)?;
                config.side_for_characteristic = config.side_for_characteristic.clone().with(class, side);
            }
            _ if side_for_rot_key(key).is_some() => {
                let side = side_for_rot_key(key).ok_or_else(|| ConfigError::UnknownKey(key.to_string()))?;
                let rotation = rotation(as_int()?)?;
                config.rotation_for_side = config.rotation_for_side.clone().with(side, rotation);
            }
            _ if key.ends_with("Rot") => {
                let class = class_for_key(key).ok_or_else(|| ConfigError::UnknownKey(key.to_string()))?;
                let rotation = rotation(as_int()?)?;
                config.rotation_for_characteristic =
                    config.rotation_for_characteristic.clone().with(class, rotation);
            }
            _ => return Err(ConfigError::UnknownKey(key.to_string())),
        }
        Ok(())
    }
}

impl ConfigSource for Preferences {
    fn load_config(&self) -> Result<IconLayoutConfig, ConfigError> {
        let mut config = IconLayoutConfig::default();
        for (key, value) in &self.values {
            Preferences::apply(&mut config, key, *value)?;
        }
        log::debug!("loaded icon configuration from {} preferences", self.values.len());
        Ok(config)
    }
}

/// Process-wide preferences shared between threads. Each
/// [`ConfigSource::load_config`] call takes a consistent snapshot.
#[derive(Debug, Clone, Default)]
pub struct SharedPreferences {
    inner: Arc<RwLock<Preferences>>,
}

impl SharedPreferences {
    pub fn new(prefs: Preferences) -> Self {
        SharedPreferences {
            inner: Arc::new(RwLock::new(prefs)),
        }
    }

    pub fn set(&self, key: impl AsRef<str>, value: impl Into<PrefValue>) -> Result<(), ConfigError> {
        self.inner.write().set(key, value)
    }

    pub fn snapshot(&self) -> Preferences {
        self.inner.read().clone()
    }
}

impl ConfigSource for SharedPreferences {
    fn load_config(&self) -> Result<IconLayoutConfig, ConfigError> {
        self.inner.read().load_config()
    }
}
