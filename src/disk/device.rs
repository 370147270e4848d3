//! Block device tree
//!
//! One recursive node type covers both whole disks and their partitions, in
//! the shape `lsblk -J` reports them.

use serde::{Deserialize, Serialize};

/// Prefix every kernel block device name lives under
pub const DEV_PREFIX: &str = "/dev/";

/// A block device or partition as reported by the device inventory
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DeviceNode {
    /// Kernel device name (e.g., sda, sda1, nvme0n1p2)
    pub name: String,
    /// Mount point, present iff the device is mounted
    #[serde(default)]
    pub mountpoint: Option<String>,
    /// Filesystem label
    #[serde(default)]
    pub label: Option<String>,
    /// Filesystem UUID
    #[serde(default)]
    pub uuid: Option<String>,
    /// Partitions of a whole disk; empty for partitions
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub children: Vec<DeviceNode>,
}

impl DeviceNode {
    /// Create an unmounted device with no label, UUID or children
    pub fn new<S: Into<String>>(name: S) -> Self {
        Self {
            name: name.into(),
            mountpoint: None,
            label: None,
            uuid: None,
            children: Vec::new(),
        }
    }

    /// Set the filesystem label
    pub fn with_label<S: Into<String>>(mut self, label: S) -> Self {
        self.label = Some(label.into());
        self
    }

    /// Set the filesystem UUID
    pub fn with_uuid<S: Into<String>>(mut self, uuid: S) -> Self {
        self.uuid = Some(uuid.into());
        self
    }

    /// Set the mount point
    pub fn with_mountpoint<S: Into<String>>(mut self, mountpoint: S) -> Self {
        self.mountpoint = Some(mountpoint.into());
        self
    }

    /// Append a child partition
    pub fn with_child(mut self, child: DeviceNode) -> Self {
        self.children.push(child);
        self
    }

    /// Device path (e.g., /dev/sda1)
    pub fn path(&self) -> String {
        format!("{}{}", DEV_PREFIX, self.name)
    }

    /// Check if device is currently mounted
    pub fn is_mounted(&self) -> bool {
        self.mountpoint.is_some()
    }

    /// Check if this node has partitions
    pub fn has_children(&self) -> bool {
        !self.children.is_empty()
    }

    /// Depth-first, pre-order walk over this node and all its descendants
    pub fn walk(&self) -> Walk<'_> {
        Walk { stack: vec![self] }
    }
}

/// Iterator returned by [`DeviceNode::walk`] and [`walk_all`]
pub struct Walk<'a> {
    stack: Vec<&'a DeviceNode>,
}

impl<'a> Iterator for Walk<'a> {
    type Item = &'a DeviceNode;

    fn next(&mut self) -> Option<Self::Item> {
        let node = self.stack.pop()?;
        // Reversed so the first child is visited next
        self.stack.extend(node.children.iter().rev());
        Some(node)
    }
}

/// Walk every node of a device forest in inventory order
pub fn walk_all(devices: &[DeviceNode]) -> Walk<'_> {
    Walk {
        stack: devices.iter().rev().collect(),
    }
}

/// Collect every node of the forest matching `pred`, in inventory order
pub fn search_devices<'a, F>(devices: &'a [DeviceNode], pred: F) -> Vec<&'a DeviceNode>
where
    F: Fn(&DeviceNode) -> bool,
{
    walk_all(devices).filter(|d| pred(d)).collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    fn sample_forest() -> Vec<DeviceNode> {
        vec![
            DeviceNode::new("sda")
                .with_child(DeviceNode::new("sda1").with_label("EFI"))
                .with_child(DeviceNode::new("sda2").with_label("root")),
            DeviceNode::new("sdb").with_child(DeviceNode::new("sdb1")),
            DeviceNode::new("sr0"),
        ]
    }

    #[test]
    fn test_walk_all_is_depth_first_in_inventory_order() {
        let devices = sample_forest();
        let names: Vec<&str> = walk_all(&devices).map(|d| d.name.as_str()).collect();
        assert_eq!(names, vec!["sda", "sda1", "sda2", "sdb", "sdb1", "sr0"]);
    }

    #[test]
    fn test_walk_single_disk() {
        let devices = sample_forest();
        let names: Vec<&str> = devices[0].walk().map(|d| d.name.as_str()).collect();
        assert_eq!(names, vec!["sda", "sda1", "sda2"]);
    }

    #[test]
    fn test_search_devices_visits_partitions() {
        let devices = sample_forest();
        let found = search_devices(&devices, |d| d.label.as_deref() == Some("root"));
        assert_eq!(found.len(), 1);
        assert_eq!(found[0].name, "sda2");
    }

    #[test]
    fn test_path_and_mount_state() {
        let device = DeviceNode::new("nvme0n1p2").with_mountpoint("/home");
        assert_eq!(device.path(), "/dev/nvme0n1p2");
        assert!(device.is_mounted());
        assert!(!DeviceNode::new("sdb1").is_mounted());
    }

    #[test]
    fn test_deserialize_lsblk_node() {
        let json = r#"{"name":"sda","mountpoint":null,"label":null,"uuid":null,
            "children":[{"name":"sda1","mountpoint":"/boot","label":"BOOT","uuid":"1234-ABCD"}]}"#;
        let node: DeviceNode = serde_json::from_str(json).unwrap();
        assert_eq!(node.mountpoint, None);
        assert!(node.has_children());
        assert_eq!(
            node.children[0],
            DeviceNode::new("sda1")
                .with_mountpoint("/boot")
                .with_label("BOOT")
                .with_uuid("1234-ABCD")
        );
    }
}
