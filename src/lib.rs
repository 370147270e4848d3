//! disk-mgr library
//!
//! Lists block devices, mounts and unmounts them by a flexible identifier,
//! and keeps user-chosen aliases for filesystem UUIDs.
//!
//! # Architecture
//!
//! - `config`: persisted alias list and its on-disk store
//! - `alias`: add/remove alias bindings
//! - `disk`: device tree, lsblk parsing, resolution and mount operations
//! - `system`: the seam to external programs (`lsblk`, `mount`, `umount`)
//! - `ui`: text table rendering
//! - `error`: error types and handling
//!
//! A device identifier is resolved in this order: alias, filesystem UUID,
//! filesystem label, kernel device name. See [`disk::resolver`].
//!
//! # Example
//!
//! ```rust,no_run
//! use disk_mgr::*;
//!
//! # fn main() -> Result<()> {
//! let manager = DiskManager::new(AliasStore::user_default()?, HostSystem::new());
//!
//! manager.add_alias("DATA", "data")?;
//! manager.mount_disk("data", "/mnt/data", &[])?;
//! # Ok(())
//! # }
//! ```

#![warn(missing_docs)]
#![warn(rustdoc::missing_crate_level_docs)]

pub mod alias;
pub mod config;
pub mod disk;
pub mod error;
pub mod system;
pub mod ui;

// Re-export commonly used types
pub use alias::AliasManager;
pub use config::{AliasEntry, AliasStore, Configuration};
pub use disk::{DeviceNode, MountController};
pub use error::{DiskError, Result};
pub use system::{HostSystem, SystemOps};

use ui::Table;

/// Entry point tying the alias store, device inventory and mount operations
pub struct DiskManager<S: SystemOps = HostSystem> {
    store: AliasStore,
    system: S,
}

impl<S: SystemOps> DiskManager<S> {
    /// Create a new manager
    pub fn new(store: AliasStore, system: S) -> Self {
        Self { store, system }
    }

    /// Alias store this manager reads and writes
    pub fn store(&self) -> &AliasStore {
        &self.store
    }

    /// Current device inventory
    pub fn list_devices(&self) -> Result<Vec<DeviceNode>> {
        self.system.list_block_devices()
    }

    /// Current alias bindings in file order
    pub fn list_aliases(&self) -> Vec<AliasEntry> {
        AliasManager::new(&self.store).list_aliases()
    }

    /// Device table annotated with aliases
    pub fn device_table(&self) -> Result<Table> {
        let devices = self.list_devices()?;
        let config = self.store.load();
        Ok(ui::device_table(&devices, &config))
    }

    /// Resolve `search` and mount it at `mountpoint`
    ///
    /// Returns the device as it was before mounting.
    pub fn mount_disk(
        &self,
        search: &str,
        mountpoint: &str,
        extra_args: &[String],
    ) -> Result<DeviceNode> {
        if search.is_empty() || mountpoint.is_empty() {
            return Err(DiskError::invalid_args(
                "device and mountpoint are required",
            ));
        }

        let device = self.find_device(search)?;
        MountController::new(&self.system).mount(&device, mountpoint, extra_args)?;
        Ok(device)
    }

    /// Resolve `search` and unmount it
    ///
    /// Returns the device as it was before unmounting.
    pub fn umount_disk(&self, search: &str, extra_args: &[String]) -> Result<DeviceNode> {
        if search.is_empty() {
            return Err(DiskError::invalid_args("device is required"));
        }

        let device = self.find_device(search)?;
        MountController::new(&self.system).unmount(&device, extra_args)?;
        Ok(device)
    }

    /// Bind `alias` to the UUID of the device identified by `search`
    ///
    /// `search` is matched by UUID, label or name; existing aliases are not
    /// consulted.
    pub fn add_alias(&self, search: &str, alias: &str) -> Result<AliasEntry> {
        if search.is_empty() || alias.is_empty() {
            return Err(DiskError::invalid_args("device and alias name are required"));
        }

        let devices = self.list_devices()?;
        let device = disk::resolve_identifier(search, &devices)?;
        let uuid = device
            .uuid
            .as_deref()
            .ok_or_else(|| DiskError::MissingUuid(device.name.clone()))?;

        AliasManager::new(&self.store).add_alias(alias, uuid)?;
        Ok(AliasEntry::new(alias, uuid))
    }

    /// Delete the alias named `alias`
    pub fn remove_alias(&self, alias: &str) -> Result<AliasEntry> {
        if alias.is_empty() {
            return Err(DiskError::invalid_args("alias name is required"));
        }

        AliasManager::new(&self.store).remove_alias(alias)
    }

    /// Resolve `search` against a fresh inventory and the stored aliases
    fn find_device(&self, search: &str) -> Result<DeviceNode> {
        let config = self.store.load();
        let devices = self.list_devices()?;
        disk::resolve(search, &config.alias_list, &devices).cloned()
    }
}
