//! Mount and unmount operations
//!
//! The mount state checks run against the inventory snapshot the device was
//! resolved from. They can be stale; the OS has the final word and reports
//! through [`DiskError::CommandFailed`].

use crate::disk::device::DeviceNode;
use crate::error::{DiskError, Result};
use crate::system::SystemOps;

/// Mounts and unmounts resolved devices through a [`SystemOps`] backend
pub struct MountController<'a, S: SystemOps + ?Sized> {
    system: &'a S,
}

impl<'a, S: SystemOps + ?Sized> MountController<'a, S> {
    /// Create a new mount controller
    pub fn new(system: &'a S) -> Self {
        Self { system }
    }

    /// Mount `device` at `mountpoint`, passing `extra_args` to mount verbatim
    pub fn mount(&self, device: &DeviceNode, mountpoint: &str, extra_args: &[String]) -> Result<()> {
        if let Some(current) = &device.mountpoint {
            return Err(DiskError::AlreadyMounted {
                device: device.name.clone(),
                mountpoint: current.clone(),
            });
        }

        log::info!("Mounting {} at {}", device.path(), mountpoint);
        self.system.mount(&device.path(), mountpoint, extra_args)
    }

    /// Unmount `device`, passing `extra_args` to umount verbatim
    pub fn unmount(&self, device: &DeviceNode, extra_args: &[String]) -> Result<()> {
        if !device.is_mounted() {
            return Err(DiskError::NotMounted(device.name.clone()));
        }

        log::info!("Unmounting {}", device.path());
        self.system.unmount(&device.path(), extra_args)
    }
}

#[cfg(test)]
pub(crate) mod tests {
    use super::*;
    use pretty_assertions::assert_eq;
    use std::cell::RefCell;

    /// Recording [`SystemOps`] fake shared by the crate's tests
    #[derive(Default)]
    pub(crate) struct FakeSystem {
        pub devices: Vec<DeviceNode>,
        pub calls: RefCell<Vec<Vec<String>>>,
        pub fail_with: Option<String>,
    }

    impl FakeSystem {
        pub fn with_devices(devices: Vec<DeviceNode>) -> Self {
            Self {
                devices,
                ..Default::default()
            }
        }

        fn record(&self, program: &str, args: Vec<String>) -> Result<()> {
            let mut call = vec![program.to_string()];
            call.extend(args.iter().cloned());
            self.calls.borrow_mut().push(call);

            match &self.fail_with {
                Some(stderr) => Err(DiskError::CommandFailed {
                    cmd: format!("{} {}", program, args.join(" ")),
                    code: 32,
                    stderr: stderr.clone(),
                }),
                None => Ok(()),
            }
        }
    }

    impl SystemOps for FakeSystem {
        fn list_block_devices(&self) -> Result<Vec<DeviceNode>> {
            Ok(self.devices.clone())
        }

        fn mount(&self, device: &str, mountpoint: &str, extra_args: &[String]) -> Result<()> {
            self.record(
                "mount",
                crate::system::mount_args(device, mountpoint, extra_args),
            )
        }

        fn unmount(&self, device: &str, extra_args: &[String]) -> Result<()> {
            self.record("umount", crate::system::unmount_args(device, extra_args))
        }
    }

    #[test]
    fn test_mount_unmounted_device() {
        let system = FakeSystem::default();
        let controller = MountController::new(&system);

        controller
            .mount(&DeviceNode::new("sda1"), "/mnt/data", &[])
            .unwrap();

        assert_eq!(
            *system.calls.borrow(),
            vec![vec!["mount", "/dev/sda1", "/mnt/data"]]
        );
    }

    #[test]
    fn test_mount_already_mounted_device() {
        let system = FakeSystem::default();
        let controller = MountController::new(&system);
        let device = DeviceNode::new("sda1").with_mountpoint("/media/usb");

        match controller.mount(&device, "/mnt/data", &[]) {
            Err(DiskError::AlreadyMounted { device, mountpoint }) => {
                assert_eq!(device, "sda1");
                assert_eq!(mountpoint, "/media/usb");
            }
            other => panic!("unexpected result: {:?}", other),
        }
        assert!(system.calls.borrow().is_empty());
    }

    #[test]
    fn test_unmount_not_mounted_device() {
        let system = FakeSystem::default();
        let controller = MountController::new(&system);

        let err = controller
            .unmount(&DeviceNode::new("sda1"), &[])
            .unwrap_err();

        assert!(matches!(err, DiskError::NotMounted(ref name) if name == "sda1"));
        assert!(system.calls.borrow().is_empty());
    }

    #[test]
    fn test_unmount_with_force() {
        let system = FakeSystem::default();
        let controller = MountController::new(&system);
        let device = DeviceNode::new("sdb1").with_mountpoint("/mnt/nfs");

        controller.unmount(&device, &["-f".to_string()]).unwrap();

        assert_eq!(
            *system.calls.borrow(),
            vec![vec!["umount", "-f", "/dev/sdb1"]]
        );
    }

    #[test]
    fn test_command_failure_surfaces() {
        let system = FakeSystem {
            fail_with: Some("mount point does not exist".to_string()),
            ..Default::default()
        };
        let controller = MountController::new(&system);

        let err = controller
            .mount(&DeviceNode::new("sda1"), "/mnt/missing", &[])
            .unwrap_err();

        match err {
            DiskError::CommandFailed { stderr, .. } => {
                assert_eq!(stderr, "mount point does not exist")
            }
            other => panic!("unexpected error: {}", other),
        }
    }
}
