//! Entry-point rewriting.
//!
//! The landing page is built for a layout where its bundle sits next to it.
//! Once it is copied to the output root its `./` references have to be
//! pointed at where the bundle actually lands.

use crate::reference::{path_part, rewrite_references};
use sitegraft_core::{
    BasePath, EntryConfig, Error, GraftConfig, LocalAssetPolicy, Outcome, Report, Stage,
};
use std::fs;
use std::path::Path;

/// Classification of one reference found in the entry document
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EntryReference<'a> {
    /// Already absolute under the base path
    UnderBase,
    /// `../…`, assumed to target the generated documentation
    Parent,
    /// `./<rest>` naming a local script or stylesheet
    LocalAsset(&'a str),
    /// `./<rest>`, anything else
    Relative(&'a str),
    /// External URLs and absolute paths outside the base path
    Other,
}

/// Rewrite rule for references in the entry document
#[derive(Debug, Clone, Copy)]
pub struct EntryRule<'a> {
    base_path: &'a BasePath,
    entry: &'a EntryConfig,
}

impl<'a> EntryRule<'a> {
    pub fn new(base_path: &'a BasePath, entry: &'a EntryConfig) -> Self {
        Self { base_path, entry }
    }

    pub fn classify<'v>(&self, value: &'v str) -> EntryReference<'v> {
        if value.starts_with(&format!("{}/", self.base_path)) {
            return EntryReference::UnderBase;
        }
        if value.starts_with("../") {
            return EntryReference::Parent;
        }
        let Some(rest) = value.strip_prefix("./") else {
            return EntryReference::Other;
        };

        let file = path_part(value);
        let local_suffix = self
            .entry
            .local_suffixes
            .iter()
            .any(|suffix| file.ends_with(suffix.as_str()));
        let excluded = !self.entry.local_exclude.is_empty()
            && value.starts_with(self.entry.local_exclude.as_str());

        if local_suffix && !excluded {
            EntryReference::LocalAsset(rest)
        } else {
            EntryReference::Relative(rest)
        }
    }

    /// New value for `value`, or `None` to leave it as is.
    pub fn rewrite(&self, value: &str) -> Option<String> {
        match self.classify(value) {
            EntryReference::UnderBase | EntryReference::Parent | EntryReference::Other => None,
            EntryReference::LocalAsset(rest) => match self.entry.local_assets {
                LocalAssetPolicy::Dist => Some(self.under(&self.entry.dist_prefix, rest)),
                LocalAssetPolicy::Relative => None,
                LocalAssetPolicy::Home => Some(self.under(&self.entry.home_prefix, rest)),
            },
            EntryReference::Relative(rest) => Some(self.under(&self.entry.dist_prefix, rest)),
        }
    }

    fn under(&self, prefix: &str, rest: &str) -> String {
        self.base_path.prefixed(&format!("{}/{}", prefix, rest))
    }
}

/// Rewrite the references of an entry document held in memory.
pub fn rewrite_entry_html(html: &str, base_path: &BasePath, entry: &EntryConfig) -> String {
    let rule = EntryRule::new(base_path, entry);
    rewrite_references(html, |value| rule.rewrite(value)).into_owned()
}

/// Copy the entry document to the output root with its references rewritten.
///
/// A missing entry document is skipped and no file is produced.
pub fn rewrite_entry(config: &GraftConfig) -> Report {
    let mut report = Report::new();
    let source = config.site.docs_dir.join(&config.entry.source);
    let dest = config.site.site_dir.join(&config.entry.output);
    let subject = format!(
        "{} to {}",
        config.entry.source.display(),
        config.entry.output.display()
    );

    if !source.is_file() {
        report.record(
            Stage::Entry,
            subject,
            Outcome::Skipped(Error::MissingSource(source).to_string()),
        );
        return report;
    }

    let outcome = match copy_rewritten(&source, &dest, config) {
        Ok(()) => Outcome::Rewritten,
        Err(e) => Outcome::Failed(e.to_string()),
    };
    report.record(Stage::Entry, subject, outcome);
    report
}

fn copy_rewritten(
    source: &Path,
    dest: &Path,
    config: &GraftConfig,
) -> sitegraft_core::Result<()> {
    let html = fs::read_to_string(source).map_err(|e| Error::Rewrite {
        path: source.to_path_buf(),
        source: e,
    })?;

    let html = rewrite_entry_html(&html, &config.base_path, &config.entry);

    let write = || -> std::io::Result<()> {
        if let Some(parent) = dest.parent() {
            fs::create_dir_all(parent)?;
        }
        fs::write(dest, html)
    };
    write().map_err(|e| Error::Rewrite {
        path: dest.to_path_buf(),
        source: e,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    fn govhub() -> BasePath {
        BasePath::resolve(Some("https://host.example/govhub/"))
    }

    fn entry_with(policy: LocalAssetPolicy) -> EntryConfig {
        EntryConfig {
            local_assets: policy,
            ..EntryConfig::default()
        }
    }

    #[test]
    fn test_classify_table() {
        let base = govhub();
        let entry = EntryConfig::default();
        let rule = EntryRule::new(&base, &entry);

        assert_eq!(rule.classify("/govhub/land/dist/a.js"), EntryReference::UnderBase);
        assert_eq!(rule.classify("../guide/"), EntryReference::Parent);
        assert_eq!(rule.classify("./index.js"), EntryReference::LocalAsset("index.js"));
        assert_eq!(rule.classify("./style.css?v=2"), EntryReference::LocalAsset("style.css?v=2"));
        assert_eq!(
            rule.classify("./land/dist/app.js"),
            EntryReference::Relative("land/dist/app.js")
        );
        assert_eq!(rule.classify("./logo.png"), EntryReference::Relative("logo.png"));
        assert_eq!(rule.classify("https://example.com/x"), EntryReference::Other);
        assert_eq!(rule.classify("/other/absolute"), EntryReference::Other);
        assert_eq!(rule.classify("#anchor"), EntryReference::Other);
    }

    #[test]
    fn test_default_policy_sends_everything_to_dist() {
        let html = rewrite_entry_html(
            r#"<link href="./style.css"><img src="./img/logo.png">"#,
            &govhub(),
            &EntryConfig::default(),
        );
        assert_eq!(
            html,
            r#"<link href="/govhub/land/dist/style.css"><img src="/govhub/land/dist/img/logo.png">"#
        );
    }

    #[test]
    fn test_relative_policy_keeps_local_scripts() {
        let html = rewrite_entry_html(
            r#"<script src="./index.js"></script><script src="./land/x.js"></script>"#,
            &govhub(),
            &entry_with(LocalAssetPolicy::Relative),
        );
        assert_eq!(
            html,
            r#"<script src="./index.js"></script><script src="/govhub/land/dist/land/x.js"></script>"#
        );
    }

    #[test]
    fn test_home_policy_moves_local_scripts_under_home() {
        let html = rewrite_entry_html(
            r#"<script src="./index.js"></script><img src="./a.png">"#,
            &govhub(),
            &entry_with(LocalAssetPolicy::Home),
        );
        assert_eq!(
            html,
            r#"<script src="/govhub/home/index.js"></script><img src="/govhub/land/dist/a.png">"#
        );
    }

    #[test]
    fn test_untouched_references() {
        let html = r#"<a href="../guide/">g</a><a href="https://example.com/x">x</a><img src="/govhub/land/dist/a.png">"#;
        assert_eq!(rewrite_entry_html(html, &govhub(), &EntryConfig::default()), html);
    }

    #[test]
    fn test_css_url_in_entry() {
        let html = r#"<div style="background: url('./hero.jpg')"></div>"#;
        assert_eq!(
            rewrite_entry_html(html, &govhub(), &EntryConfig::default()),
            r#"<div style="background: url('/govhub/land/dist/hero.jpg')"></div>"#
        );
    }

    #[test]
    fn test_empty_base_path_yields_root_absolute() {
        let html = rewrite_entry_html(
            r#"<img src="./a.png"><a href="/docs/">d</a>"#,
            &BasePath::default(),
            &EntryConfig::default(),
        );
        assert_eq!(html, r#"<img src="/land/dist/a.png"><a href="/docs/">d</a>"#);
    }

    #[test]
    fn test_rewrite_entry_writes_index() {
        let dir = TempDir::new().unwrap();
        let config = GraftConfig::with_dirs(
            dir.path().join("docs"),
            dir.path().join("site"),
            Some("https://host.example/govhub/".to_string()),
        );
        fs::create_dir_all(dir.path().join("docs/home")).unwrap();
        fs::write(
            dir.path().join("docs/home/index.html"),
            r#"<link href="./style.css">"#,
        )
        .unwrap();

        let report = rewrite_entry(&config);

        assert_eq!(report.items()[0].outcome, Outcome::Rewritten);
        let index = fs::read_to_string(dir.path().join("site/index.html")).unwrap();
        assert!(index.contains(r#"href="/govhub/land/dist/style.css""#));
    }

    #[test]
    fn test_rewrite_entry_missing_source() {
        let dir = TempDir::new().unwrap();
        let config = GraftConfig::with_dirs(dir.path().join("docs"), dir.path().join("site"), None);

        let report = rewrite_entry(&config);

        assert!(matches!(report.items()[0].outcome, Outcome::Skipped(_)));
        assert!(!dir.path().join("site/index.html").exists());
    }
}
