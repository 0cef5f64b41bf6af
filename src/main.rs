//! vfsh entry point
//!
//! Opens (or seeds) the partition, builds the kernel, and hands the
//! terminal to the interactive shell.

use chrono::Local;
use log::{error, info, warn};

use vfsh::bootstrap;
use vfsh::config::VfshConfig;
use vfsh::kernel::Kernel;
use vfsh::shell::Shell;
use vfsh::storage::{Filesystem, JsonFileStore, PartitionStore};

#[tokio::main]
async fn main() {
    env_logger::init();

    let config = match VfshConfig::load() {
        Ok(config) => config,
        Err(err) => {
            warn!("Falling back to the default configuration: {}", err);
            VfshConfig::default()
        }
    };

    let store = JsonFileStore::new(&config.partition_path);
    if !store.exists() {
        warn!(
            "Partition {} not found, seeding a fresh one",
            config.partition_path
        );
        let seed = bootstrap::default_partition(Local::now().date_naive());
        if let Err(err) = store.save(&seed) {
            error!("Failed to seed partition: {}", err);
            return;
        }
    }

    let fs = match Filesystem::open(Box::new(store)) {
        Ok(fs) => fs,
        Err(err) => {
            error!("Failed to open partition: {}", err);
            return;
        }
    };

    info!("vfsh starting on partition {}", config.partition_path);
    let kernel = Kernel::new(fs, config);
    if let Err(err) = Shell::new(kernel).run().await {
        error!("Shell terminated: {}", err);
    }
}
