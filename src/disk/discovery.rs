//! Device discovery using `lsblk`
//!
//! The inventory is read as JSON so disks and their partitions arrive as a
//! tree instead of a flat table.

use crate::disk::device::DeviceNode;
use crate::error::{DiskError, Result};
use serde::Deserialize;

/// Program used to enumerate block devices
pub const LSBLK: &str = "lsblk";

/// Arguments requesting a JSON tree with the fields resolution needs
pub const LSBLK_ARGS: [&str; 3] = ["-J", "-o", "NAME,MOUNTPOINT,LABEL,UUID"];

#[derive(Debug, Deserialize)]
struct LsblkOutput {
    blockdevices: Option<Vec<DeviceNode>>,
}

/// Parse the stdout of `lsblk -J` into a device forest
pub fn parse_lsblk_output(stdout: &str) -> Result<Vec<DeviceNode>> {
    let output: LsblkOutput = serde_json::from_str(stdout)
        .map_err(|e| DiskError::inventory(format!("malformed lsblk output: {}", e)))?;

    let devices = output
        .blockdevices
        .ok_or_else(|| DiskError::inventory("lsblk output has no 'blockdevices' key"))?;

    log::debug!("Discovered {} top-level block devices", devices.len());
    Ok(devices)
}
