//! Static tree merging.
//!
//! Makes the secondary trees (landing bundle, shared assets) and every
//! generated page reachable at two places: the output root, for local
//! serving, and under the base path, for project-pages style hosting.

pub mod fs;

use log::info;
use sitegraft_core::{Error, GraftConfig, Outcome, Report, Stage, StaticDir};
use std::collections::HashSet;
use std::path::{Component, Path};

/// Run the whole merge: static directories first, then page duplication.
pub fn merge(config: &GraftConfig) -> Report {
    let mut report = merge_static_dirs(config);
    report.extend(duplicate_generated_pages(config));
    report
}

/// Copy every configured secondary tree into the output tree.
pub fn merge_static_dirs(config: &GraftConfig) -> Report {
    let mut report = Report::new();
    for static_dir in &config.merge.static_dirs {
        report.extend(merge_static_dir(config, static_dir));
    }
    report
}

/// Replace `site_dir/dest` (and `site_dir/<base path>/dest`) with a fresh
/// copy of `docs_dir/source`.
///
/// A missing source directory is skipped, not an error.
pub fn merge_static_dir(config: &GraftConfig, static_dir: &StaticDir) -> Report {
    let mut report = Report::new();
    let source = config.site.docs_dir.join(&static_dir.source);
    let source_name = static_dir.source.display().to_string();

    if !source.is_dir() {
        report.record(
            Stage::StaticDir,
            source_name,
            Outcome::Skipped(Error::MissingSource(source).to_string()),
        );
        return report;
    }

    let dest_name = static_dir.dest.display().to_string();
    let root_dest = config.site.site_dir.join(&static_dir.dest);
    record_copy(
        &mut report,
        Stage::StaticDir,
        format!("{} to {}", source_name, dest_name),
        fs::replace_with(&source, &root_dest),
    );

    if let Some(base_dir) = config.base_dir() {
        record_copy(
            &mut report,
            Stage::StaticDir,
            format!(
                "{} to {}",
                source_name,
                config.base_path.prefixed(&dest_name)
            ),
            fs::replace_with(&source, &base_dir.join(&static_dir.dest)),
        );
    }

    report
}

/// Copy every top-level entry of the output tree under the base path.
///
/// Excluded: the secondary trees' destinations, the base path's own top-level
/// directory, the entry document, and the configured file names and suffixes. Each entry gets its
/// own outcome so one failed copy does not stop the others.
pub fn duplicate_generated_pages(config: &GraftConfig) -> Report {
    let mut report = Report::new();

    let Some(base_dir) = config.base_dir() else {
        info!("No base path configured, skipping page duplication");
        return report;
    };

    let site_dir = &config.site.site_dir;
    let entries = match std::fs::read_dir(site_dir) {
        Ok(entries) => entries,
        Err(e) => {
            report.record(
                Stage::Duplicate,
                site_dir.display().to_string(),
                Outcome::Failed(e.to_string()),
            );
            return report;
        }
    };

    let mut paths: Vec<_> = entries
        .filter_map(|entry| entry.ok().map(|e| e.path()))
        .collect();
    paths.sort();

    let excluded_dirs = excluded_dir_names(config);

    for path in paths {
        let Some(name) = path.file_name().and_then(|n| n.to_str()) else {
            continue;
        };

        let subject = if path.is_dir() {
            if excluded_dirs.contains(name) {
                continue;
            }
            format!("{}/ to {}/", name, config.base_path.prefixed(name))
        } else if path.is_file() {
            if is_excluded_file(config, name) {
                continue;
            }
            format!("{} to {}", name, config.base_path.prefixed(name))
        } else {
            continue;
        };

        record_copy(
            &mut report,
            Stage::Duplicate,
            subject,
            fs::replace_with(&path, &base_dir.join(name)),
        );
    }

    report
}

/// Directory names never duplicated under the base path
fn excluded_dir_names(config: &GraftConfig) -> HashSet<&str> {
    let mut names: HashSet<&str> = config
        .merge
        .exclude_dirs
        .iter()
        .map(String::as_str)
        .collect();

    names.extend(
        config
            .merge
            .static_dirs
            .iter()
            .filter_map(|d| first_component(&d.dest)),
    );
    names.extend(config.base_path.first_segment());
    names
}

fn is_excluded_file(config: &GraftConfig, name: &str) -> bool {
    Path::new(name) == config.entry.output
        || config.merge.exclude_files.iter().any(|f| f == name)
        || config
            .merge
            .exclude_suffixes
            .iter()
            .any(|suffix| name.ends_with(suffix.as_str()))
}

fn first_component(path: &Path) -> Option<&str> {
    match path.components().next() {
        Some(Component::Normal(name)) => name.to_str(),
        _ => None,
    }
}

fn record_copy(
    report: &mut Report,
    stage: Stage,
    subject: String,
    result: sitegraft_core::Result<()>,
) {
    let outcome = match result {
        Ok(()) => Outcome::Copied,
        Err(e) => Outcome::Failed(e.to_string()),
    };
    report.record(stage, subject, outcome);
}
