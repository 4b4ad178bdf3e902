// ── Device domain type ──

use std::collections::BTreeMap;
use std::path::PathBuf;

use serde::{Deserialize, Serialize};
use serde_json::Value;

/// Beamline position used when the database record carries none.
pub const DEFAULT_Z: f64 = -1.0;

fn default_z() -> f64 {
    DEFAULT_Z
}

fn default_active() -> bool {
    true
}

/// A device record from the device database.
///
/// The fields the grouping and rendering code needs are typed; everything
/// else in the record lands in `extra` so filters can still address it.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Device {
    pub name: String,

    /// Control-system address.
    #[serde(default)]
    pub prefix: String,

    #[serde(default)]
    pub stand: Option<String>,

    /// Name of the logical grouping this device belongs to.
    #[serde(default)]
    pub parent: Option<String>,

    /// Position along the beamline.
    #[serde(default = "default_z")]
    pub z: f64,

    #[serde(default)]
    pub system: Option<String>,

    #[serde(default)]
    pub beamline: Option<String>,

    /// EDM screen embedded for this device in group displays.
    #[serde(default)]
    pub embedded_screen: Option<PathBuf>,

    /// Macro string handed to the embedded screen (e.g. `P=MMS:01`).
    #[serde(default)]
    pub macros: Option<String>,

    #[serde(default = "default_active")]
    pub active: bool,

    #[serde(flatten)]
    pub extra: BTreeMap<String, Value>,
}

impl Device {
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            prefix: String::new(),
            stand: None,
            parent: None,
            z: DEFAULT_Z,
            system: None,
            beamline: None,
            embedded_screen: None,
            macros: None,
            active: true,
            extra: BTreeMap::new(),
        }
    }

    // ── Builders ─────────────────────────────────────────────────────

    pub fn with_prefix(mut self, prefix: impl Into<String>) -> Self {
        self.prefix = prefix.into();
        self
    }

    pub fn with_stand(mut self, stand: impl Into<String>) -> Self {
        self.stand = Some(stand.into());
        self
    }

    pub fn with_parent(mut self, parent: impl Into<String>) -> Self {
        self.parent = Some(parent.into());
        self
    }

    pub fn with_z(mut self, z: f64) -> Self {
        self.z = z;
        self
    }

    pub fn with_system(mut self, system: impl Into<String>) -> Self {
        self.system = Some(system.into());
        self
    }

    pub fn with_beamline(mut self, beamline: impl Into<String>) -> Self {
        self.beamline = Some(beamline.into());
        self
    }

    pub fn with_embedded_screen(mut self, screen: impl Into<PathBuf>) -> Self {
        self.embedded_screen = Some(screen.into());
        self
    }

    pub fn with_macros(mut self, macros: impl Into<String>) -> Self {
        self.macros = Some(macros.into());
        self
    }

    pub fn with_attribute(mut self, key: impl Into<String>, value: impl Into<Value>) -> Self {
        self.extra.insert(key.into(), value.into());
        self
    }

    // ── Attribute lookup ─────────────────────────────────────────────

    /// Look up any attribute by name, typed field or extra.
    ///
    /// Returns `None` when the device does not carry the attribute at all
    /// (an unset optional field counts as absent).
    pub fn attribute(&self, key: &str) -> Option<Value> {
        match key {
            "name" => Some(Value::String(self.name.clone())),
            "prefix" => Some(Value::String(self.prefix.clone())),
            "stand" => self.stand.clone().map(Value::String),
            "parent" => self.parent.clone().map(Value::String),
            "z" => serde_json::Number::from_f64(self.z).map(Value::Number),
            "system" => self.system.clone().map(Value::String),
            "beamline" => self.beamline.clone().map(Value::String),
            "embedded_screen" => self
                .embedded_screen
                .as_ref()
                .map(|p| Value::String(p.display().to_string())),
            "macros" => self.macros.clone().map(Value::String),
            "active" => Some(Value::Bool(self.active)),
            other => self.extra.get(other).cloned(),
        }
    }

    /// Whether this device is a motor, judged by its record prefix.
    pub fn is_motor(&self) -> bool {
        self.prefix.contains("MMS")
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn deserialize_fills_defaults() {
        let device: Device = serde_json::from_value(json!({"name": "mono"})).unwrap();
        assert_eq!(device.name, "mono");
        assert!(device.stand.is_none());
        assert!((device.z - DEFAULT_Z).abs() < f64::EPSILON);
        assert!(device.active);
        assert!(device.extra.is_empty());
    }

    #[test]
    fn unknown_fields_land_in_extra() {
        let device: Device = serde_json::from_value(json!({
            "name": "yag1",
            "stand": "DG1",
            "device_class": "PIM",
            "location_group": "Diagnostics",
        }))
        .unwrap();
        assert_eq!(device.attribute("device_class"), Some(json!("PIM")));
        assert_eq!(device.attribute("location_group"), Some(json!("Diagnostics")));
        assert_eq!(device.attribute("stand"), Some(json!("DG1")));
    }

    #[test]
    fn unset_optional_attribute_is_absent() {
        let device = Device::new("a");
        assert!(device.attribute("parent").is_none());
        assert!(device.attribute("missing").is_none());
        assert_eq!(device.attribute("active"), Some(json!(true)));
    }

    #[test]
    fn z_attribute_is_numeric() {
        let device = Device::new("a").with_z(12.5);
        assert_eq!(device.attribute("z"), Some(json!(12.5)));
    }

    #[test]
    fn motors_are_detected_by_prefix() {
        assert!(Device::new("m").with_prefix("HXD:DG1:MMS:01").is_motor());
        assert!(!Device::new("c").with_prefix("HXD:DG1:CAM:01").is_motor());
    }
}
