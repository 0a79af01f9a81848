use crate::error::{Error, Result};
use crate::types::*;
use serde::Deserialize;
use std::fs;
use std::path::{Component, Path, PathBuf};

/// Default configuration file name
pub const CONFIG_FILE: &str = "sitegraft.toml";

/// Raw TOML configuration structure
/// This matches the sitegraft.toml file structure exactly; every section is optional
#[derive(Debug, Default, Deserialize)]
#[serde(default, deny_unknown_fields)]
struct RawConfig {
    site: RawSite,
    entry: RawEntry,
    merge: RawMerge,
    assets: RawAssets,
}

#[derive(Debug, Deserialize)]
#[serde(default, deny_unknown_fields)]
struct RawSite {
    docs_dir: String,
    site_dir: String,
    site_url: Option<String>,
}

impl Default for RawSite {
    fn default() -> Self {
        Self {
            docs_dir: "docs".to_string(),
            site_dir: "site".to_string(),
            site_url: None,
        }
    }
}

#[derive(Debug, Default, Deserialize)]
#[serde(default, deny_unknown_fields)]
struct RawEntry {
    source: Option<String>,
    output: Option<String>,
    dist_prefix: Option<String>,
    home_prefix: Option<String>,
    local_assets: Option<LocalAssetPolicy>,
    local_suffixes: Option<Vec<String>>,
    local_exclude: Option<String>,
}

#[derive(Debug, Default, Deserialize)]
#[serde(default, deny_unknown_fields)]
struct RawMerge {
    #[serde(rename = "static_dir")]
    static_dirs: Option<Vec<RawStaticDir>>,
    exclude_dirs: Option<Vec<String>>,
    exclude_files: Option<Vec<String>>,
    exclude_suffixes: Option<Vec<String>>,
}

#[derive(Debug, Deserialize)]
#[serde(deny_unknown_fields)]
struct RawStaticDir {
    source: String,
    dest: Option<String>,
}

#[derive(Debug, Default, Deserialize)]
#[serde(default, deny_unknown_fields)]
struct RawAssets {
    dir: Option<String>,
}

/// Parse sitegraft.toml from a file path
///
/// `docs_dir` and `site_dir` are resolved against the directory holding the file.
pub fn parse_graft_toml<P: AsRef<Path>>(path: P) -> Result<GraftConfig> {
    let path = path.as_ref();
    let content = fs::read_to_string(path)?;
    let root = path.parent().unwrap_or_else(|| Path::new("."));
    parse_graft_toml_str(&content, root)
}

/// Parse sitegraft.toml from a string (useful for testing)
pub fn parse_graft_toml_str(content: &str, root: &Path) -> Result<GraftConfig> {
    let raw: RawConfig = toml::from_str(content)?;

    let site = SiteConfig {
        docs_dir: root.join(&raw.site.docs_dir),
        site_dir: root.join(&raw.site.site_dir),
        site_url: raw.site.site_url.filter(|url| !url.trim().is_empty()),
    };

    let defaults = EntryConfig::default();
    let entry = EntryConfig {
        source: match raw.entry.source {
            Some(source) => validate_path(&source, "entry.source")?,
            None => defaults.source,
        },
        output: match raw.entry.output {
            Some(output) => validate_path(&output, "entry.output")?,
            None => defaults.output,
        },
        dist_prefix: match raw.entry.dist_prefix {
            Some(prefix) => validate_prefix(&prefix, "entry.dist_prefix")?,
            None => defaults.dist_prefix,
        },
        home_prefix: match raw.entry.home_prefix {
            Some(prefix) => validate_prefix(&prefix, "entry.home_prefix")?,
            None => defaults.home_prefix,
        },
        local_assets: raw.entry.local_assets.unwrap_or(defaults.local_assets),
        local_suffixes: raw.entry.local_suffixes.unwrap_or(defaults.local_suffixes),
        local_exclude: raw.entry.local_exclude.unwrap_or(defaults.local_exclude),
    };

    let defaults = MergeConfig::default();
    let static_dirs = match raw.merge.static_dirs {
        Some(dirs) => dirs
            .into_iter()
            .map(|d| {
                let source = validate_path(&d.source, "merge.static_dir.source")?;
                let dest = match d.dest {
                    Some(dest) => validate_path(&dest, "merge.static_dir.dest")?,
                    None => source.clone(),
                };
                Ok(StaticDir { source, dest })
            })
            .collect::<Result<Vec<_>>>()?,
        None => defaults.static_dirs,
    };
    let merge = MergeConfig {
        static_dirs,
        exclude_dirs: raw.merge.exclude_dirs.unwrap_or(defaults.exclude_dirs),
        exclude_files: raw.merge.exclude_files.unwrap_or(defaults.exclude_files),
        exclude_suffixes: raw
            .merge
            .exclude_suffixes
            .unwrap_or(defaults.exclude_suffixes),
    };

    let assets = AssetConfig {
        dir: match raw.assets.dir {
            Some(dir) => validate_prefix(&dir, "assets.dir")?,
            None => AssetConfig::default().dir,
        },
    };

    Ok(GraftConfig::new(site, entry, merge, assets))
}

/// Validate and convert a path string to PathBuf.
///
/// Every tree-relative path in the configuration must stay inside its tree,
/// so this rejects:
/// - Absolute paths (starting with `/` or Windows drive letters)
/// - Paths containing parent directory references (`..`)
/// - Empty paths
///
/// ```text
/// validate_path("land/dist", "merge.static_dir.source")  → Ok(PathBuf)
/// validate_path("/etc", "merge.static_dir.dest")  → Err("Absolute paths not allowed...")
/// validate_path("../site", "entry.output")  → Err("Parent directory references...")
/// ```
fn validate_path(path_str: &str, field_name: &str) -> Result<PathBuf> {
    if path_str.trim().is_empty() {
        return Err(Error::ConfigParse(format!(
            "Empty path in '{}' field",
            field_name
        )));
    }

    let path = Path::new(path_str);

    if path.is_absolute() || path_str.starts_with('/') {
        return Err(Error::ConfigParse(format!(
            "Absolute paths not allowed in '{}': '{}'. Use relative paths only.",
            field_name, path_str
        )));
    }

    if path.components().any(|c| c == Component::ParentDir) {
        return Err(Error::ConfigParse(format!(
            "Parent directory references (..) not allowed in '{}': '{}'",
            field_name, path_str
        )));
    }

    Ok(path.to_path_buf())
}

/// URL prefixes are stored without surrounding slashes: `/land/dist/` → `land/dist`
fn validate_prefix(prefix: &str, field_name: &str) -> Result<String> {
    let trimmed = prefix.trim().trim_matches('/');
    validate_path(trimmed, field_name)?;
    Ok(trimmed.to_string())
}
