use anyhow::{Context, Result};
use sitegraft_core::config::CONFIG_FILE;
use std::fs;
use std::path::{Path, PathBuf};

/// Escape a string for safe inclusion in a TOML basic string
///
/// The config is written from a commented template rather than serialized,
/// so values are escaped by hand:
/// - Backslash (\\) -> \\\\
/// - Quote (\") -> \\\"
/// - Control characters (\b, \f, \n, \r, \t) -> their escape sequences
///
/// See: https://toml.io/en/v1.0.0#string
fn toml_escape_string(s: &str) -> String {
    s.replace('\\', "\\\\")
        .replace('"', "\\\"")
        .replace('\x08', "\\b")
        .replace('\x0C', "\\f")
        .replace('\n', "\\n")
        .replace('\r', "\\r")
        .replace('\t', "\\t")
}

/// Write a commented default sitegraft.toml into `path`.
///
/// # Errors
///
/// Returns an error if:
/// - The directory doesn't exist
/// - sitegraft.toml already exists in the directory
/// - The file cannot be written
pub fn run(path: PathBuf, site_url: Option<String>) -> Result<()> {
    if !path.is_dir() {
        anyhow::bail!("Directory does not exist: {}", path.display());
    }

    let config_path = path.join(CONFIG_FILE);
    if config_path.exists() {
        anyhow::bail!(
            "{} already exists in {}\nEdit it directly or remove it first",
            CONFIG_FILE,
            path.display()
        );
    }

    write_config_toml(&path, site_url.as_deref())?;

    println!("✓ Created {}", config_path.display());
    println!("\nNext steps:");
    println!("  1. Set site.site_url to the deployed URL");
    println!("  2. Build the documentation site");
    println!("  3. Run 'sitegraft build --config {}'", config_path.display());

    Ok(())
}

fn write_config_toml(base: &Path, site_url: Option<&str>) -> Result<()> {
    let site_url_line = match site_url {
        Some(url) => format!("site_url = \"{}\"", toml_escape_string(url)),
        None => "# site_url = \"https://example.github.io/project/\"".to_string(),
    };

    let content = format!(
        r#"# sitegraft configuration
# Paths in [site] are relative to this file.

[site]
docs_dir = "docs"
site_dir = "site"
{site_url_line}

[entry]
# Landing page copied to the output root, relative to docs_dir
source = "home/index.html"
output = "index.html"
dist_prefix = "land/dist"
home_prefix = "home"
# What happens to ./*.js and ./*.css references in the landing page:
#   dist     - rewritten under <base path>/land/dist/ like everything else
#   relative - left relative
#   home     - rewritten under <base path>/home/
local_assets = "dist"
local_suffixes = [".js", ".css"]
local_exclude = "./land/"

[merge]
exclude_dirs = ["global-assets", "land"]
exclude_files = ["sitemap.xml", "sitemap.xml.gz", "schema.json", "404.html", "index.html"]
exclude_suffixes = [".map"]

[[merge.static_dir]]
source = "global-assets"
dest = "global-assets"

[[merge.static_dir]]
source = "land/dist"
dest = "land/dist"

[[merge.static_dir]]
source = "land/public"
dest = "land/public"

[assets]
dir = "assets"
"#
    );

    fs::write(base.join(CONFIG_FILE), content).context("Failed to write sitegraft.toml")?;
    Ok(())
}
