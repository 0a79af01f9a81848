use sitegraft_core::{GraftConfig, ItemReport, Outcome, Report, Stage};
use sitegraft_merger as merger;
use sitegraft_rewriter as rewriter;

const STAGES: [Stage; 4] = [Stage::StaticDir, Stage::Duplicate, Stage::Entry, Stage::Assets];

/// Run the whole post-build pass over an already generated site.
///
/// Merging runs first so the asset rewriter also sees the base-path copies
/// and the entry document in their final locations.
pub fn post_build(config: &GraftConfig) -> Report {
    let mut report = merger::merge(config);
    report.extend(rewriter::rewrite_entry(config));
    report.extend(rewriter::rewrite_asset_paths(config));
    report
}

/// One summary line per stage that did anything, e.g.
/// `asset paths: 12 rewritten, 3 unchanged`
pub fn summarize(report: &Report) -> Vec<String> {
    STAGES
        .iter()
        .filter_map(|&stage| {
            let counts = [
                ("copied", report.count(stage, |o| *o == Outcome::Copied)),
                ("rewritten", report.count(stage, |o| *o == Outcome::Rewritten)),
                ("unchanged", report.count(stage, |o| *o == Outcome::Unchanged)),
                (
                    "skipped",
                    report.count(stage, |o| matches!(o, Outcome::Skipped(_))),
                ),
                ("failed", report.count(stage, Outcome::is_failure)),
            ];

            let parts: Vec<String> = counts
                .iter()
                .filter(|(_, n)| *n > 0)
                .map(|(label, n)| format!("{} {}", n, label))
                .collect();

            (!parts.is_empty()).then(|| format!("{}: {}", stage, parts.join(", ")))
        })
        .collect()
}

/// `stage: subject: reason` line for a failed item
pub fn describe_failure(item: &ItemReport) -> String {
    match &item.outcome {
        Outcome::Failed(reason) => format!("{}: {}: {}", item.stage, item.subject, reason),
        _ => format!("{}: {}", item.stage, item.subject),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_summarize_skips_idle_stages() {
        let mut report = Report::new();
        report.record(Stage::StaticDir, "global-assets", Outcome::Copied);
        report.record(Stage::StaticDir, "land/dist", Outcome::Copied);
        report.record(Stage::StaticDir, "land/public", Outcome::Skipped("missing".into()));
        report.record(Stage::Assets, "a.html", Outcome::Rewritten);
        report.record(Stage::Assets, "b.html", Outcome::Failed("denied".into()));

        assert_eq!(
            summarize(&report),
            vec![
                "static dirs: 2 copied, 1 skipped".to_string(),
                "asset paths: 1 rewritten, 1 failed".to_string(),
            ]
        );
    }

    #[test]
    fn test_describe_failure_includes_reason() {
        let mut report = Report::new();
        report.record(Stage::Assets, "b.html", Outcome::Failed("permission denied".into()));

        let lines: Vec<_> = report.failures().map(describe_failure).collect();
        assert_eq!(lines, vec!["asset paths: b.html: permission denied".to_string()]);
    }

    #[test]
    fn test_summarize_empty_report() {
        assert!(summarize(&Report::new()).is_empty());
    }
}
