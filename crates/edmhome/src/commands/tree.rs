//! `edmhome tree`: the grouping as the screens will show it.

use std::fmt::Write as _;

use owo_colors::OwoColorize;
use serde::Serialize;

use edmhome_core::{Child, Group};

use crate::cli::{GlobalOpts, TreeArgs};
use crate::config;
use crate::error::CliError;
use crate::output;

#[derive(Debug, Serialize)]
struct Node {
    name: String,
    kind: &'static str,
    #[serde(skip_serializing_if = "Option::is_none")]
    alias: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    z: Option<f64>,
    #[serde(skip_serializing_if = "Vec::is_empty")]
    children: Vec<Node>,
}

const LEVELS: [&str; 3] = ["hutch", "stand", "group"];

impl Node {
    fn from_group(group: &Group, level: usize) -> Self {
        let children = group
            .children()
            .iter()
            .map(|child| match child {
                Child::Group(sub) => Self::from_group(sub, level + 1),
                Child::Device(device) => Self {
                    name: device.name.clone(),
                    kind: "device",
                    alias: None,
                    z: Some(device.z),
                    children: Vec::new(),
                },
            })
            .collect();

        Self {
            name: group.name().to_owned(),
            kind: LEVELS[level.min(LEVELS.len() - 1)],
            alias: Some(group.alias()),
            z: group.max_z(),
            children,
        }
    }
}

fn render_tree(root: &Node, color: bool) -> String {
    let mut out = String::new();
    write_node(&mut out, root, 0, color);
    out.truncate(out.trim_end().len());
    out
}

fn write_node(out: &mut String, node: &Node, depth: usize, color: bool) {
    let indent = "  ".repeat(depth);
    let z = node.z.map(|z| format!("  z={z}")).unwrap_or_default();
    let label = if node.kind == "device" {
        node.name.clone()
    } else if color {
        node.name.bold().to_string()
    } else {
        node.name.clone()
    };
    let kind = if color {
        format!("({})", node.kind).dimmed().to_string()
    } else {
        format!("({})", node.kind)
    };
    let _ = writeln!(out, "{indent}{label} {kind}{z}");
    for child in &node.children {
        write_node(out, child, depth + 1, color);
    }
}

pub fn handle(args: &TreeArgs, global: &GlobalOpts) -> Result<(), CliError> {
    let cfg = config::load(global)?;
    let layout = config::load_layout(&cfg, global)?;
    let group = config::select(&layout, args.stand.as_deref())?;

    let level = usize::from(!group.is_hutch());
    let root = Node::from_group(group, level);
    let color = output::should_color(&global.color);

    let out = output::render_single(
        &global.output,
        &root,
        |n| render_tree(n, color),
        |n| render_tree(n, false),
    )?;
    output::print_output(&out, global.quiet);
    Ok(())
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;
    use edmhome_core::{Device, group_devices};
    use std::sync::Arc;

    fn hutch() -> Group {
        let devices: Vec<Arc<Device>> = [
            Device::new("yag").with_stand("DG1").with_z(1.0),
            Device::new("mms").with_stand("DG1").with_parent("yag").with_z(1.5),
            Device::new("ipm").with_stand("DG2").with_z(5.0),
        ]
        .into_iter()
        .map(Arc::new)
        .collect();
        group_devices(&devices, "TST").unwrap()
    }

    #[test]
    fn nodes_carry_levels() {
        let root = Node::from_group(&hutch(), 0);
        assert_eq!(root.kind, "hutch");
        assert_eq!(root.children[0].kind, "stand");
        assert_eq!(root.children[0].children[0].kind, "group");
        assert_eq!(root.children[0].children[0].children[0].kind, "device");
        assert_eq!(root.z, Some(5.0));
    }

    #[test]
    fn plain_tree_is_indented() {
        let text = render_tree(&Node::from_group(&hutch(), 0), false);
        let lines: Vec<&str> = text.lines().collect();
        assert_eq!(lines[0], "TST (hutch)  z=5");
        assert_eq!(lines[1], "  DG1 (stand)  z=1.5");
        assert!(lines.iter().any(|l| l.starts_with("      mms (device)")));
    }
}
