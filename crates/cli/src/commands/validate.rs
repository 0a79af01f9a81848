use anyhow::Result;
use sitegraft_core::GraftConfig;
use std::path::PathBuf;

use super::{ConfigArgs, describe_base_path, load_config};

pub fn run(args: ConfigArgs) -> Result<()> {
    println!("Validating configuration: {}", args.config.display());

    let config = load_config(&args)?;

    println!("✓ Configuration valid");
    println!("  Docs dir:  {}", config.site.docs_dir.display());
    println!("  Site dir:  {}", config.site.site_dir.display());
    println!("  Base path: {}", describe_base_path(&config));
    println!("  Entry:     {} ({:?})", config.entry.source.display(), config.entry.local_assets);

    let missing = missing_sources(&config);
    if missing.is_empty() {
        println!("✓ All sources present");
    } else {
        for path in &missing {
            println!("⚠ Not found (will be skipped): {}", path.display());
        }
    }

    if !config.site.site_dir.is_dir() {
        println!("⚠ Site directory does not exist yet, run the site generator before building");
    }

    Ok(())
}

/// Secondary trees and the entry document that a build would skip
fn missing_sources(config: &GraftConfig) -> Vec<PathBuf> {
    let docs_dir = &config.site.docs_dir;
    let mut missing: Vec<PathBuf> = config
        .merge
        .static_dirs
        .iter()
        .map(|d| docs_dir.join(&d.source))
        .filter(|path| !path.is_dir())
        .collect();

    let entry = docs_dir.join(&config.entry.source);
    if !entry.is_file() {
        missing.push(entry);
    }
    missing
}
