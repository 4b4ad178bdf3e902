//! `edmhome devices`: filtered devices with their stand and group.

use std::path::PathBuf;

use serde::Serialize;
use tabled::Tabled;

use edmhome_core::Group;

use crate::cli::{DevicesArgs, GlobalOpts};
use crate::config;
use crate::error::CliError;
use crate::output;

#[derive(Debug, Serialize)]
struct DeviceEntry {
    name: String,
    prefix: String,
    stand: String,
    group: String,
    z: f64,
    #[serde(skip_serializing_if = "Option::is_none")]
    embedded_screen: Option<PathBuf>,
}

#[derive(Tabled)]
struct DeviceRow {
    #[tabled(rename = "Name")]
    name: String,
    #[tabled(rename = "Stand")]
    stand: String,
    #[tabled(rename = "Group")]
    group: String,
    #[tabled(rename = "Z")]
    z: String,
    #[tabled(rename = "Prefix")]
    prefix: String,
    #[tabled(rename = "Screen")]
    screen: String,
}

fn device_row(d: &DeviceEntry) -> DeviceRow {
    DeviceRow {
        name: d.name.clone(),
        stand: d.stand.clone(),
        group: d.group.clone(),
        z: d.z.to_string(),
        prefix: d.prefix.clone(),
        screen: d
            .embedded_screen
            .as_ref()
            .map(|p| p.display().to_string())
            .unwrap_or_default(),
    }
}

/// Devices in screen order: stand by stand, group by group.
fn entries(stands: &[&Group]) -> Vec<DeviceEntry> {
    let mut out = Vec::new();
    for stand in stands {
        for group in stand.subgroups() {
            for device in group.devices() {
                out.push(DeviceEntry {
                    name: device.name.clone(),
                    prefix: device.prefix.clone(),
                    stand: stand.name().to_owned(),
                    group: group.name().to_owned(),
                    z: device.z,
                    embedded_screen: device.embedded_screen.clone(),
                });
            }
        }
    }
    out
}

pub fn handle(args: &DevicesArgs, global: &GlobalOpts) -> Result<(), CliError> {
    let cfg = config::load(global)?;
    let layout = config::load_layout(&cfg, global)?;

    let stands = match args.stand.as_deref() {
        Some(name) => vec![layout.home().find_subgroup(name)?],
        None => layout.stands(),
    };
    let devices = entries(&stands);

    let out = output::render_list(&global.output, &devices, device_row, |d| d.name.clone())?;
    output::print_output(&out, global.quiet);
    Ok(())
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;
    use edmhome_core::{Device, group_devices};
    use std::sync::Arc;

    #[test]
    fn entries_follow_screen_order() {
        let devices: Vec<Arc<Device>> = [
            Device::new("ipm").with_stand("DG2").with_z(5.0),
            Device::new("yag").with_stand("DG1").with_z(1.0),
            Device::new("mms").with_stand("DG1").with_parent("yag").with_z(1.5),
        ]
        .into_iter()
        .map(Arc::new)
        .collect();
        let hutch = group_devices(&devices, "TST").unwrap();

        let rows = entries(&hutch.subgroups());
        let names: Vec<(&str, &str, &str)> = rows
            .iter()
            .map(|e| (e.stand.as_str(), e.group.as_str(), e.name.as_str()))
            .collect();
        assert_eq!(
            names,
            [("DG1", "yag", "mms"), ("DG1", "yag", "yag"), ("DG2", "ipm", "ipm")]
        );
    }
}
