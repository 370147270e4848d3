//! Device resolution
//!
//! Maps a user-supplied string to exactly one device of the inventory.
//! Strategies are tried in priority order and the first unique hit wins:
//!
//! 1. alias, whose UUID must match exactly one device (otherwise ignored)
//! 2. filesystem UUID
//! 3. filesystem label (several hits are remembered, not returned)
//! 4. kernel device name
//!
//! When nothing is unique, a remembered label collision is reported as
//! [`DiskError::AmbiguousLabel`]; anything else is [`DiskError::NotFound`].

use crate::config::AliasEntry;
use crate::disk::device::{search_devices, DeviceNode, DEV_PREFIX};
use crate::error::{DiskError, Result};

/// Strip a leading `/dev/` when something follows it
pub fn normalize_search(search: &str) -> &str {
    match search.strip_prefix(DEV_PREFIX) {
        Some(rest) if !rest.is_empty() => rest,
        _ => search,
    }
}

/// All devices whose filesystem UUID equals `uuid`
pub fn search_by_uuid<'a>(devices: &'a [DeviceNode], uuid: &str) -> Vec<&'a DeviceNode> {
    search_devices(devices, |d| d.uuid.as_deref() == Some(uuid))
}

/// All devices whose filesystem label equals `label`
pub fn search_by_label<'a>(devices: &'a [DeviceNode], label: &str) -> Vec<&'a DeviceNode> {
    search_devices(devices, |d| d.label.as_deref() == Some(label))
}

/// All devices whose kernel name equals `name`
pub fn search_by_name<'a>(devices: &'a [DeviceNode], name: &str) -> Vec<&'a DeviceNode> {
    search_devices(devices, |d| d.name == name)
}

fn single<'a>(matches: &[&'a DeviceNode]) -> Option<&'a DeviceNode> {
    match matches {
        [only] => Some(*only),
        _ => None,
    }
}

/// Resolve `search` against aliases first, then device identifiers
pub fn resolve<'a>(
    search: &str,
    aliases: &[AliasEntry],
    devices: &'a [DeviceNode],
) -> Result<&'a DeviceNode> {
    let search = normalize_search(search);

    if let Some(entry) = aliases.iter().find(|a| a.alias == search) {
        let by_alias = search_by_uuid(devices, &entry.uuid);
        if let Some(device) = single(&by_alias) {
            log::debug!("'{}' resolved by alias to {}", search, device.name);
            return Ok(device);
        }
        log::debug!(
            "Alias '{}' -> {} matches {} devices, ignoring it",
            search,
            entry.uuid,
            by_alias.len()
        );
    }

    match_identifier(search, devices)
}

/// Resolve `search` by UUID, label and name only, ignoring aliases
pub fn resolve_identifier<'a>(search: &str, devices: &'a [DeviceNode]) -> Result<&'a DeviceNode> {
    match_identifier(normalize_search(search), devices)
}

fn match_identifier<'a>(search: &str, devices: &'a [DeviceNode]) -> Result<&'a DeviceNode> {
    if let Some(device) = single(&search_by_uuid(devices, search)) {
        log::debug!("'{}' resolved by UUID to {}", search, device.name);
        return Ok(device);
    }

    let by_label = search_by_label(devices, search);
    if let Some(device) = single(&by_label) {
        log::debug!("'{}' resolved by label to {}", search, device.name);
        return Ok(device);
    }

    if let Some(device) = single(&search_by_name(devices, search)) {
        log::debug!("'{}' resolved by name", search);
        return Ok(device);
    }

    if by_label.len() > 1 {
        return Err(DiskError::AmbiguousLabel {
            label: search.to_string(),
            candidates: by_label.iter().map(|d| d.name.clone()).collect(),
        });
    }

    Err(DiskError::NotFound(search.to_string()))
}
