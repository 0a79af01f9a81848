//! Global asset-path rewriting.
//!
//! Generated pages reference their theme assets relative to their own depth
//! (`../assets/…`, `./assets/…`, `assets/…`). Those references are turned into
//! `<base path>/assets/…` so they resolve from every copy of the page.

use crate::reference::{is_absolute_or_external, rewrite_references};
use log::info;
use sitegraft_core::{BasePath, Error, GraftConfig, Outcome, Report, Stage};
use std::borrow::Cow;
use std::fs;
use std::path::Path;
use walkdir::WalkDir;

/// Rewrite one asset reference, or `None` to leave it as is.
///
/// Only one level of `../` is recognised.
pub fn rewrite_asset_reference(
    value: &str,
    base_path: &BasePath,
    asset_dir: &str,
) -> Option<String> {
    if is_absolute_or_external(value) {
        return None;
    }

    let rest = value
        .strip_prefix("../")
        .or_else(|| value.strip_prefix("./"))
        .unwrap_or(value);

    let in_asset_dir = rest
        .strip_prefix(asset_dir)
        .is_some_and(|after| after.starts_with('/'));

    in_asset_dir.then(|| base_path.prefixed(rest))
}

/// Rewrite the asset references of one HTML document held in memory.
pub fn rewrite_asset_html<'a>(
    html: &'a str,
    base_path: &BasePath,
    asset_dir: &str,
) -> Cow<'a, str> {
    rewrite_references(html, |value| rewrite_asset_reference(value, base_path, asset_dir))
}

/// Rewrite every HTML file under `site_dir`, including the base-path copies.
///
/// No-op when no base path is configured. Files are written back only when
/// their content changed.
pub fn rewrite_asset_paths(config: &GraftConfig) -> Report {
    let mut report = Report::new();

    if config.base_path.is_empty() {
        info!("site_url has no path, skipping asset path rewriting");
        return report;
    }

    let site_dir = &config.site.site_dir;
    for entry in WalkDir::new(site_dir).sort_by_file_name() {
        let entry = match entry {
            Ok(entry) => entry,
            Err(e) => {
                let subject = e
                    .path()
                    .map(|p| relative_name(p, site_dir))
                    .unwrap_or_else(|| site_dir.display().to_string());
                report.record(Stage::Assets, subject, Outcome::Failed(e.to_string()));
                continue;
            }
        };

        if !entry.file_type().is_file() || !is_html(entry.path()) {
            continue;
        }

        let outcome = match rewrite_file(entry.path(), config) {
            Ok(true) => Outcome::Rewritten,
            Ok(false) => Outcome::Unchanged,
            Err(e) => Outcome::Failed(e.to_string()),
        };
        report.record(Stage::Assets, relative_name(entry.path(), site_dir), outcome);
    }

    report
}

/// Returns whether the file was rewritten.
fn rewrite_file(path: &Path, config: &GraftConfig) -> sitegraft_core::Result<bool> {
    let to_error = |source| Error::Rewrite {
        path: path.to_path_buf(),
        source,
    };

    let html = fs::read_to_string(path).map_err(to_error)?;
    let rewritten = rewrite_asset_html(&html, &config.base_path, &config.assets.dir);
    if rewritten == html {
        return Ok(false);
    }

    fs::write(path, rewritten.as_bytes()).map_err(to_error)?;
    Ok(true)
}

fn is_html(path: &Path) -> bool {
    path.extension()
        .and_then(|ext| ext.to_str())
        .is_some_and(|ext| ext.eq_ignore_ascii_case("html"))
}

fn relative_name(path: &Path, root: &Path) -> String {
    path.strip_prefix(root).unwrap_or(path).display().to_string()
}
