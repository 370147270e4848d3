//! disk-mgr - Main Entry Point
//!
//! Mount, unmount and alias block devices by name, UUID, label or alias.

use clap::{CommandFactory, Parser, Subcommand};
use disk_mgr::*;
use std::path::PathBuf;
use std::process;

/// Block device helper: list, mount, unmount and alias devices
#[derive(Parser, Debug)]
#[command(author, version, about, long_about = None)]
#[command(after_help = "\
EXAMPLES:
    # Show disks, partitions and their aliases
    disk-mgr ls

    # Mount by label, UUID, device name or alias
    disk-mgr mount BACKUP /mnt/backup
    disk-mgr m /dev/sdb1 /mnt/backup -o ro

    # Give a partition a short name, then use it
    disk-mgr add sdb1 backup
    disk-mgr umount backup --force
")]
struct Args {
    #[command(subcommand)]
    command: Option<Commands>,

    /// Verbose output
    #[arg(short, long, global = true)]
    verbose: bool,

    /// Directory holding config.json (defaults to the user config directory)
    #[arg(long, global = true, env = "DISK_MGR_CONFIG_DIR")]
    config_dir: Option<PathBuf>,
}

#[derive(Subcommand, Debug)]
enum Commands {
    /// List devices
    Ls,

    /// Mount device, <DEVICE> could be dev|uuid|label|alias
    #[command(visible_alias = "m")]
    Mount {
        /// Device name, /dev path, filesystem UUID, label or alias
        device: String,

        /// Directory to mount the device at
        mountpoint: String,

        /// Mount options, passed to mount as `-o <OPTIONS>`
        #[arg(short, long)]
        options: Option<String>,
    },

    /// Unmount device, <DEVICE> could be dev|uuid|label|alias
    #[command(visible_alias = "u")]
    Umount {
        /// Device name, /dev path, filesystem UUID, label or alias
        device: String,

        /// Force unmount (in case of an unreachable NFS system)
        #[arg(short, long)]
        force: bool,
    },

    /// Add alias name to a disk, <DEVICE> could be dev|uuid|label
    #[command(visible_alias = "a")]
    Add {
        /// Device name, /dev path, filesystem UUID or label
        device: String,

        /// New alias for the device's filesystem UUID
        alias_name: String,
    },

    /// Remove alias name of a disk
    #[command(visible_alias = "r")]
    Remove {
        /// Alias to delete
        alias_name: String,
    },
}

fn main() {
    let args = Args::parse();

    // Initialize logging
    let verbose = args.verbose;
    let log_level = if verbose { "debug" } else { "warn" };

    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or(log_level)).init();

    let command = match args.command {
        Some(command) => command,
        None => {
            let _ = Args::command().print_help();
            println!();
            process::exit(0);
        }
    };

    match run(command, args.config_dir) {
        Ok(()) => process::exit(0),
        Err(e) => {
            eprintln!();
            eprintln!("{}", e);
            if !e.is_precondition() && !verbose {
                eprintln!("Run again with --verbose for the commands disk-mgr executed");
            }
            eprintln!();
            log::debug!("error: {:?}", e);
            process::exit(1);
        }
    }
}

fn run(command: Commands, config_dir: Option<PathBuf>) -> Result<()> {
    let store = match config_dir {
        Some(dir) => AliasStore::new(dir),
        None => AliasStore::user_default()?,
    };
    let manager = DiskManager::new(store, HostSystem::new());
    log::debug!("Using configuration {}", manager.store().path().display());

    match command {
        Commands::Ls => {
            let table = manager.device_table()?;
            println!();
            print!("{}", table);
            println!();
        }
        Commands::Mount {
            device,
            mountpoint,
            options,
        } => {
            let mut extra_args = Vec::new();
            if let Some(options) = options {
                extra_args.push("-o".to_string());
                extra_args.push(options);
            }
            let mounted = manager.mount_disk(&device, &mountpoint, &extra_args)?;
            println!("Mounted {} at {}", mounted.path(), mountpoint);
        }
        Commands::Umount { device, force } => {
            let mut extra_args = Vec::new();
            if force {
                extra_args.push("-f".to_string());
            }
            let unmounted = manager.umount_disk(&device, &extra_args)?;
            println!("Unmounted {}", unmounted.path());
        }
        Commands::Add { device, alias_name } => {
            let entry = manager.add_alias(&device, &alias_name)?;
            println!("Added alias {} -> {}", entry.alias, entry.uuid);
        }
        Commands::Remove { alias_name } => {
            let entry = manager.remove_alias(&alias_name)?;
            println!("Removed alias {} -> {}", entry.alias, entry.uuid);
        }
    }

    Ok(())
}
