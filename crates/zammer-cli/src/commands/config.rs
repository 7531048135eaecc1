use anyhow::Result;
use zammer_core::TrackerConfig;

use crate::cli::ConfigCommands;
use crate::output::{OutputFormat, json::print_json};

pub fn run(
    tracker_config: &TrackerConfig,
    command: ConfigCommands,
    format: OutputFormat,
) -> Result<()> {
    match command {
        ConfigCommands::Show => show_config(tracker_config, format),
    }
}

fn show_config(config: &TrackerConfig, format: OutputFormat) -> Result<()> {
    if format.is_json() {
        return print_json(config);
    }

    println!("Capacity:       {}", config.capacity);
    println!("Retention days: {}", config.retention_days);
    println!("Storage key:    {}", config.storage_key);
    Ok(())
}
