use anyhow::Result;
use serde_json::json;
use zammer_core::paths;

use crate::config::CliConfig;
use crate::output::{OutputFormat, json::print_json};

pub fn run(db_path: &str, format: OutputFormat) -> Result<()> {
    let data_dir = paths::resolve_zammer_dir()?;
    let config_path = CliConfig::default_path()
        .map(|p| p.display().to_string())
        .unwrap_or_else(|| "-".to_string());

    if format.is_json() {
        return print_json(&json!({
            "version": env!("CARGO_PKG_VERSION"),
            "data_dir": data_dir.display().to_string(),
            "database": db_path,
            "config": config_path,
        }));
    }

    println!("Zammer {}", env!("CARGO_PKG_VERSION"));
    println!("  Data dir: {}", data_dir.display());
    println!("  Database: {db_path}");
    println!("  Config:   {config_path}");
    Ok(())
}
