// ── Hutch loader ──
//
// Turns the flat, filtered device list into the three-level hierarchy
// hutch → stand → device group. Runs once per load; the resulting tree
// is read-only.

use std::collections::{HashMap, HashSet};
use std::sync::Arc;

use indexmap::IndexMap;
use tracing::{debug, info};

use crate::database::DeviceDatabase;
use crate::error::CoreError;
use crate::filter::AttributeFilter;
use crate::model::{Child, Device, Group};

/// Hutch name used when none is configured.
pub const DEFAULT_HUTCH: &str = "hutch";

/// What to load: the hutch identity and the device filters.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct LoadOptions {
    pub hutch: Option<String>,
    pub include: Option<AttributeFilter>,
    pub exclude: Option<AttributeFilter>,
}

impl LoadOptions {
    pub fn for_hutch(hutch: impl Into<String>) -> Self {
        Self {
            hutch: Some(hutch.into()),
            ..Self::default()
        }
    }

    pub fn with_include(mut self, include: AttributeFilter) -> Self {
        self.include = Some(include);
        self
    }

    pub fn with_exclude(mut self, exclude: AttributeFilter) -> Self {
        self.exclude = Some(exclude);
        self
    }

    pub fn hutch_name(&self) -> &str {
        self.hutch.as_deref().unwrap_or(DEFAULT_HUTCH)
    }

    /// The inclusion filter actually queried.
    ///
    /// An explicit, non-empty include wins; otherwise a configured hutch
    /// scopes the query to `beamline = <hutch>`; otherwise everything.
    pub fn effective_include(&self) -> Option<AttributeFilter> {
        match (&self.include, &self.hutch) {
            (Some(include), _) if !include.is_empty() => Some(include.clone()),
            (_, Some(hutch)) => Some(AttributeFilter::new().with("beamline", hutch.as_str())),
            _ => None,
        }
    }
}

/// The loaded hutch: filtered devices plus the grouped tree.
#[derive(Debug, Clone)]
pub struct HutchLayout {
    devices: Vec<Arc<Device>>,
    home: Group,
}

impl HutchLayout {
    /// Query the database and build the hutch tree.
    pub fn load(db: &dyn DeviceDatabase, options: &LoadOptions) -> Result<Self, CoreError> {
        let mut devices = match options.effective_include() {
            Some(include) => db.fetch_filtered(&include)?,
            None => db.fetch_all()?,
        };
        if devices.is_empty() {
            return Err(CoreError::NoDevices);
        }

        if let Some(exclude) = options.exclude.as_ref().filter(|f| !f.is_empty()) {
            let before = devices.len();
            devices.retain(|d| !exclude.matches_any(d));
            debug!(removed = before - devices.len(), "exclusion filter applied");
            if devices.is_empty() {
                return Err(CoreError::NoDevices);
            }
        }

        let home = group_devices(&devices, options.hutch_name())?;
        info!(
            hutch = home.name(),
            devices = devices.len(),
            stands = home.subgroups().len(),
            "hutch loaded"
        );

        Ok(Self { devices, home })
    }

    /// Filtered devices in query order.
    pub fn devices(&self) -> &[Arc<Device>] {
        &self.devices
    }

    /// Root of the tree.
    pub fn home(&self) -> &Group {
        &self.home
    }

    /// Stands in beamline order.
    pub fn stands(&self) -> Vec<&Group> {
        self.home.subgroups()
    }

    pub fn into_home(self) -> Group {
        self.home
    }
}

/// Group a device list into hutch → stand → device group.
///
/// Devices sharing a `parent` are merged into one group named after the
/// parent, which also absorbs the parent device itself when present.
/// Every other device becomes a singleton group. Stands are ordered by the
/// largest `z` of their devices.
pub fn group_devices(devices: &[Arc<Device>], hutch: &str) -> Result<Group, CoreError> {
    // Stand buckets in first-seen order.
    let mut stands: IndexMap<&str, Vec<Child>> = IndexMap::new();
    for device in devices {
        stands.entry(stand_of(device)?).or_default();
    }

    let by_name: HashMap<&str, &Arc<Device>> =
        devices.iter().map(|d| (d.name.as_str(), d)).collect();
    let mut assigned: HashSet<&str> = HashSet::new();

    // Merge siblings under their parent.
    for device in devices {
        let Some(parent) = device.parent.as_deref() else {
            continue;
        };
        if assigned.contains(device.name.as_str()) {
            continue;
        }
        let stand = stand_of(device)?;

        let mut members: Vec<&Arc<Device>> = devices
            .iter()
            .filter(|d| d.parent.as_deref() == Some(parent))
            .filter(|d| !assigned.contains(d.name.as_str()))
            .collect();
        if let Some(&parent_device) = by_name.get(parent) {
            let already_member = members.iter().any(|m| m.name == parent);
            if !already_member && !assigned.contains(parent) {
                members.push(parent_device);
            }
        }

        for &member in &members {
            assigned.insert(member.name.as_str());
        }

        debug!(group = parent, stand, members = members.len(), "merged devices under parent");
        let group = Group::new(parent, members.into_iter().map(|d| Child::Device(Arc::clone(d))))?;
        stands.entry(stand).or_default().push(group.into());
    }

    // Everything left stands alone.
    for device in devices {
        if assigned.contains(device.name.as_str()) {
            continue;
        }
        let group = Group::new(device.name.as_str(), [Child::Device(Arc::clone(device))])?;
        stands.entry(stand_of(device)?).or_default().push(group.into());
    }

    let mut stands: Vec<Group> = stands
        .into_iter()
        .map(|(name, children)| Group::new(name, children))
        .collect::<Result<_, _>>()?;

    stands.sort_by(|a, b| {
        let za = a.max_z().unwrap_or(f64::NEG_INFINITY);
        let zb = b.max_z().unwrap_or(f64::NEG_INFINITY);
        za.total_cmp(&zb)
    });

    Group::hutch(hutch, stands.into_iter().map(Child::Group))
}

fn stand_of(device: &Device) -> Result<&str, CoreError> {
    device
        .stand
        .as_deref()
        .filter(|s| !s.trim().is_empty())
        .ok_or_else(|| CoreError::MissingStand {
            device: device.name.clone(),
        })
}
