pub mod build;
pub mod init;
pub mod preview;
pub mod validate;

use anyhow::{Context, Result};
use sitegraft_core::config::{CONFIG_FILE, parse_graft_toml, parse_graft_toml_str};
use sitegraft_core::GraftConfig;
use std::path::{Path, PathBuf};

/// Configuration file location and per-run overrides
#[derive(clap::Args, Debug, Clone)]
pub struct ConfigArgs {
    /// Path to sitegraft.toml (defaults are used when it does not exist)
    #[arg(short, long, default_value = CONFIG_FILE)]
    pub config: PathBuf,

    /// Override site.site_url
    #[arg(long)]
    pub site_url: Option<String>,

    /// Override site.docs_dir
    #[arg(long)]
    pub docs_dir: Option<PathBuf>,

    /// Override site.site_dir
    #[arg(long)]
    pub site_dir: Option<PathBuf>,
}

/// Load the configuration file (or defaults) and apply command-line overrides.
pub fn load_config(args: &ConfigArgs) -> Result<GraftConfig> {
    let config = if args.config.exists() {
        parse_graft_toml(&args.config)
            .with_context(|| format!("Failed to parse {}", args.config.display()))?
    } else {
        log::info!(
            "{} not found, using default configuration",
            args.config.display()
        );
        parse_graft_toml_str("", Path::new("."))?
    };

    Ok(apply_overrides(config, args))
}

fn apply_overrides(config: GraftConfig, args: &ConfigArgs) -> GraftConfig {
    let GraftConfig {
        mut site,
        entry,
        merge,
        assets,
        ..
    } = config;

    if let Some(site_url) = &args.site_url {
        site.site_url = Some(site_url.clone()).filter(|url| !url.trim().is_empty());
    }
    if let Some(docs_dir) = &args.docs_dir {
        site.docs_dir = docs_dir.clone();
    }
    if let Some(site_dir) = &args.site_dir {
        site.site_dir = site_dir.clone();
    }

    // Rebuilt so the base path follows an overridden site_url
    GraftConfig::new(site, entry, merge, assets)
}

/// Base path for display, `(none)` when the site is served from the root
pub fn describe_base_path(config: &GraftConfig) -> String {
    if config.base_path.is_empty() {
        "(none)".to_string()
    } else {
        config.base_path.to_string()
    }
}
