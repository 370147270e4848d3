//! System utilities: the narrow seam between disk-mgr and the host OS
//!
//! Every external program the tool runs goes through [`SystemOps`], one
//! method per call. [`HostSystem`] shells out for real; tests substitute a
//! recording fake.

use crate::disk::discovery::{parse_lsblk_output, LSBLK, LSBLK_ARGS};
use crate::disk::DeviceNode;
use crate::error::{DiskError, Result};
use std::process::{Command, Output};

/// External calls disk-mgr makes
pub trait SystemOps {
    /// Enumerate block devices as a disk → partition tree
    fn list_block_devices(&self) -> Result<Vec<DeviceNode>>;

    /// Mount `device` (a /dev path) at `mountpoint`
    fn mount(&self, device: &str, mountpoint: &str, extra_args: &[String]) -> Result<()>;

    /// Unmount `device` (a /dev path)
    fn unmount(&self, device: &str, extra_args: &[String]) -> Result<()>;
}

/// Arguments passed to `mount`: extra flags first, then source and target
pub fn mount_args(device: &str, mountpoint: &str, extra_args: &[String]) -> Vec<String> {
    let mut args = extra_args.to_vec();
    args.push(device.to_string());
    args.push(mountpoint.to_string());
    args
}

/// Arguments passed to `umount`: extra flags first, then the device
pub fn unmount_args(device: &str, extra_args: &[String]) -> Vec<String> {
    let mut args = extra_args.to_vec();
    args.push(device.to_string());
    args
}

/// Check if running as root
pub fn is_root() -> bool {
    nix::unistd::Uid::effective().is_root()
}

/// [`SystemOps`] backed by `lsblk`, `mount` and `umount`
#[derive(Debug, Default, Clone, Copy)]
pub struct HostSystem;

impl HostSystem {
    /// Create a new host system handle
    pub fn new() -> Self {
        Self
    }

    /// Run a command to completion
    ///
    /// A program that cannot be spawned, a non-zero exit status or anything
    /// written to stderr is a failure.
    fn execute(&self, cmd: &mut Command) -> Result<Output> {
        let cmd_str = command_line(cmd);

        log::debug!("Executing: {}", cmd_str);
        let output = cmd.output().map_err(|e| DiskError::CommandFailed {
            cmd: cmd_str.clone(),
            code: -1,
            stderr: e.to_string(),
        })?;
        let stderr = String::from_utf8_lossy(&output.stderr);
        log::debug!("{} -> {}", cmd_str, output.status);

        if !output.status.success() || !stderr.trim().is_empty() {
            return Err(DiskError::CommandFailed {
                cmd: cmd_str,
                code: output.status.code().unwrap_or(-1),
                stderr: stderr.trim().to_string(),
            });
        }

        Ok(output)
    }

    fn warn_if_unprivileged(&self, action: &str) {
        if !is_root() {
            log::warn!("Not running as root, {} will likely be refused", action);
        }
    }
}

impl SystemOps for HostSystem {
    fn list_block_devices(&self) -> Result<Vec<DeviceNode>> {
        let output = self.execute(Command::new(LSBLK).args(LSBLK_ARGS))?;
        parse_lsblk_output(&String::from_utf8_lossy(&output.stdout))
    }

    fn mount(&self, device: &str, mountpoint: &str, extra_args: &[String]) -> Result<()> {
        self.warn_if_unprivileged("mount");
        self.execute(Command::new("mount").args(mount_args(device, mountpoint, extra_args)))?;
        Ok(())
    }

    fn unmount(&self, device: &str, extra_args: &[String]) -> Result<()> {
        self.warn_if_unprivileged("umount");
        self.execute(Command::new("umount").args(unmount_args(device, extra_args)))?;
        Ok(())
    }
}

/// Render a command as a shell-like line for logs and errors
fn command_line(cmd: &Command) -> String {
    std::iter::once(cmd.get_program())
        .chain(cmd.get_args())
        .map(|s| s.to_string_lossy().into_owned())
        .collect::<Vec<_>>()
        .join(" ")
}
