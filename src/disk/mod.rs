//! Disk management module
//!
//! Provides the device tree, lsblk discovery, identifier resolution and
//! mount operations.

pub mod device;
pub mod discovery;
pub mod operations;
pub mod resolver;

pub use device::{search_devices, walk_all, DeviceNode};
pub use discovery::parse_lsblk_output;
pub use operations::MountController;
pub use resolver::{resolve, resolve_identifier};
