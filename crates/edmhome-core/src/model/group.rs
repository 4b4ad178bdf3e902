// ── Group domain types ──

use std::collections::HashSet;
use std::sync::Arc;

use super::device::Device;
use super::selector::{OVERVIEW_STATE, Selector};
use crate::error::CoreError;

/// Which rendering entry point a group calls for.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum GroupKind {
    /// Stand or device grouping.
    Group,
    /// Top-level hutch grouping.
    Hutch,
}

/// A member of a [`Group`]: either a device or a nested group.
#[derive(Debug, Clone, PartialEq)]
pub enum Child {
    Device(Arc<Device>),
    Group(Group),
}

impl Child {
    pub fn as_group(&self) -> Option<&Group> {
        match self {
            Self::Group(g) => Some(g),
            Self::Device(_) => None,
        }
    }

    pub fn as_device(&self) -> Option<&Arc<Device>> {
        match self {
            Self::Device(d) => Some(d),
            Self::Group(_) => None,
        }
    }
}

impl From<Group> for Child {
    fn from(group: Group) -> Self {
        Self::Group(group)
    }
}

impl From<Arc<Device>> for Child {
    fn from(device: Arc<Device>) -> Self {
        Self::Device(device)
    }
}

impl From<Device> for Child {
    fn from(device: Device) -> Self {
        Self::Device(Arc::new(device))
    }
}

/// A named, ordered collection of devices and nested groups.
///
/// Built once bottom-up and read-only afterwards. Leaf devices are never
/// stored twice: [`Group::devices`] expands subgroups on every call.
#[derive(Debug, Clone, PartialEq)]
pub struct Group {
    name: String,
    kind: GroupKind,
    children: Vec<Child>,
}

impl Group {
    pub fn new(
        name: impl Into<String>,
        children: impl IntoIterator<Item = Child>,
    ) -> Result<Self, CoreError> {
        Self::with_kind(name, GroupKind::Group, children)
    }

    /// Build the top-level hutch grouping.
    pub fn hutch(
        name: impl Into<String>,
        children: impl IntoIterator<Item = Child>,
    ) -> Result<Self, CoreError> {
        Self::with_kind(name, GroupKind::Hutch, children)
    }

    fn with_kind(
        name: impl Into<String>,
        kind: GroupKind,
        children: impl IntoIterator<Item = Child>,
    ) -> Result<Self, CoreError> {
        let name = name.into();
        if name.trim().is_empty() {
            return Err(CoreError::EmptyGroupName);
        }

        let children: Vec<Child> = children.into_iter().collect();

        let mut seen = HashSet::new();
        for sub in children.iter().filter_map(Child::as_group) {
            let alias = sub.alias();
            if alias == OVERVIEW_STATE {
                return Err(CoreError::ReservedAlias { group: name, alias });
            }
            if !seen.insert(alias.clone()) {
                return Err(CoreError::DuplicateAlias { group: name, alias });
            }
        }

        Ok(Self {
            name,
            kind,
            children,
        })
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn kind(&self) -> GroupKind {
        self.kind
    }

    pub fn is_hutch(&self) -> bool {
        self.kind == GroupKind::Hutch
    }

    /// Machine-safe key: whitespace runs become `_`, then lowercased.
    pub fn alias(&self) -> String {
        alias_of(&self.name)
    }

    pub fn children(&self) -> &[Child] {
        &self.children
    }

    /// Every device in this group, subgroups expanded depth-first.
    pub fn devices(&self) -> Vec<&Arc<Device>> {
        let mut out = Vec::new();
        self.collect_devices(&mut out);
        out
    }

    fn collect_devices<'a>(&'a self, out: &mut Vec<&'a Arc<Device>>) {
        for child in &self.children {
            match child {
                Child::Device(d) => out.push(d),
                Child::Group(g) => g.collect_devices(out),
            }
        }
    }

    /// Immediate children that are groups.
    pub fn subgroups(&self) -> Vec<&Group> {
        self.children.iter().filter_map(Child::as_group).collect()
    }

    /// Keyed lookup of an immediate subgroup by alias.
    pub fn subgroup(&self, alias: &str) -> Option<&Group> {
        self.children
            .iter()
            .filter_map(Child::as_group)
            .find(|g| g.alias() == alias)
    }

    /// Like [`Group::subgroup`], but accepts a display name too and
    /// reports a structural error when nothing matches.
    pub fn find_subgroup(&self, name_or_alias: &str) -> Result<&Group, CoreError> {
        let wanted = alias_of(name_or_alias);
        self.subgroup(&wanted)
            .ok_or_else(|| CoreError::SubgroupNotFound {
                group: self.name.clone(),
                alias: wanted,
            })
    }

    /// The control selector over this group's subgroups.
    pub fn selector(&self) -> Result<Selector, CoreError> {
        let states: Vec<String> = self
            .children
            .iter()
            .filter_map(Child::as_group)
            .map(Group::alias)
            .collect();

        if states.is_empty() {
            return Err(CoreError::NoSubgroups {
                group: self.name.clone(),
            });
        }

        Ok(Selector::new(self.alias(), states))
    }

    /// Shallow copy under a new name. Devices stay shared.
    pub fn renamed(&self, name: impl Into<String>) -> Result<Self, CoreError> {
        Self::with_kind(name, self.kind, self.children.iter().cloned())
    }

    /// Maximum beamline position over all devices, if there are any.
    pub fn max_z(&self) -> Option<f64> {
        self.devices().iter().map(|d| d.z).reduce(f64::max)
    }
}

pub(crate) fn alias_of(name: &str) -> String {
    name.split_whitespace()
        .collect::<Vec<_>>()
        .join("_")
        .to_lowercase()
}
