// ── Device database access ──
//
// The loader only ever asks two questions of the device database: "all
// devices" and "devices matching these attributes". Anything that can
// answer them can back a hutch.

use std::path::{Path, PathBuf};
use std::sync::Arc;

use indexmap::IndexMap;
use serde_json::Value;
use tracing::debug;

use crate::error::CoreError;
use crate::filter::AttributeFilter;
use crate::model::Device;

/// Read-only query capability over a device inventory.
pub trait DeviceDatabase {
    fn fetch_all(&self) -> Result<Vec<Arc<Device>>, CoreError>;

    fn fetch_filtered(&self, filter: &AttributeFilter) -> Result<Vec<Arc<Device>>, CoreError> {
        Ok(self
            .fetch_all()?
            .into_iter()
            .filter(|d| filter.matches_all(d))
            .collect())
    }
}

// ── In-memory ───────────────────────────────────────────────────────

/// Device list held in memory, in insertion order.
#[derive(Debug, Clone, Default)]
pub struct MemoryDatabase {
    devices: Vec<Arc<Device>>,
}

impl MemoryDatabase {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn insert(&mut self, device: Device) {
        self.devices.push(Arc::new(device));
    }

    pub fn len(&self) -> usize {
        self.devices.len()
    }

    pub fn is_empty(&self) -> bool {
        self.devices.is_empty()
    }
}

impl FromIterator<Device> for MemoryDatabase {
    fn from_iter<I: IntoIterator<Item = Device>>(iter: I) -> Self {
        Self {
            devices: iter.into_iter().map(Arc::new).collect(),
        }
    }
}

impl DeviceDatabase for MemoryDatabase {
    fn fetch_all(&self) -> Result<Vec<Arc<Device>>, CoreError> {
        Ok(self.devices.clone())
    }
}

// ── JSON file ───────────────────────────────────────────────────────

/// The facility JSON device database: one object keyed by device name.
///
/// ```json
/// {
///   "dg1_yag": {"name": "dg1_yag", "prefix": "HXD:DG1:PIM", "stand": "DG1", "z": 10.0},
///   "dg1_mms": {"prefix": "HXD:DG1:MMS:01", "stand": "DG1", "parent": "dg1_yag"}
/// }
/// ```
///
/// Records without a `name` take their key. File order is preserved.
#[derive(Debug, Clone)]
pub struct JsonDatabase {
    path: PathBuf,
    devices: Vec<Arc<Device>>,
}

impl JsonDatabase {
    /// Read and parse the whole database file.
    pub fn open(path: impl AsRef<Path>) -> Result<Self, CoreError> {
        let path = path.as_ref().to_path_buf();
        let contents = std::fs::read_to_string(&path).map_err(|source| CoreError::DatabaseRead {
            path: path.clone(),
            source,
        })?;
        let records: IndexMap<String, Value> =
            serde_json::from_str(&contents).map_err(|source| CoreError::DatabaseFormat {
                path: path.clone(),
                source,
            })?;

        let devices = parse_records(records)?;
        debug!(path = %path.display(), count = devices.len(), "device database loaded");
        Ok(Self { path, devices })
    }

    pub fn path(&self) -> &Path {
        &self.path
    }
}

impl DeviceDatabase for JsonDatabase {
    fn fetch_all(&self) -> Result<Vec<Arc<Device>>, CoreError> {
        Ok(self.devices.clone())
    }
}

fn parse_records(records: IndexMap<String, Value>) -> Result<Vec<Arc<Device>>, CoreError> {
    records
        .into_iter()
        .map(|(key, mut record)| {
            if let Value::Object(ref mut fields) = record {
                fields
                    .entry("name")
                    .or_insert_with(|| Value::String(key.clone()));
            }
            serde_json::from_value::<Device>(record)
                .map(Arc::new)
                .map_err(|source| CoreError::DeviceRecord { name: key, source })
        })
        .collect()
}
