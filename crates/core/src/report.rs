//! Per-item outcomes of a post-build pass.
//!
//! Every unit of work (a static directory, a duplicated top-level entry, an
//! HTML file) produces one [`ItemReport`]. Failures are values, so one bad
//! item never stops the rest of the pass.

use log::{debug, info, warn};
use std::fmt;

/// Stage of the post-build pass an item belongs to
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Stage {
    StaticDir,
    Duplicate,
    Entry,
    Assets,
}

impl fmt::Display for Stage {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Stage::StaticDir => "static dirs",
            Stage::Duplicate => "page duplication",
            Stage::Entry => "entry point",
            Stage::Assets => "asset paths",
        };
        f.write_str(name)
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Outcome {
    Copied,
    Rewritten,
    Unchanged,
    Skipped(String),
    Failed(String),
}

impl Outcome {
    pub fn is_failure(&self) -> bool {
        matches!(self, Outcome::Failed(_))
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ItemReport {
    pub stage: Stage,
    /// Human-readable name of the item (relative path or directory name)
    pub subject: String,
    pub outcome: Outcome,
}

/// Aggregated outcomes, in the order the items were processed
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Report {
    items: Vec<ItemReport>,
}

impl Report {
    pub fn new() -> Self {
        Self::default()
    }

    /// Record an outcome and log it.
    pub fn record(&mut self, stage: Stage, subject: impl Into<String>, outcome: Outcome) {
        let subject = subject.into();
        match &outcome {
            Outcome::Copied => info!("✓ Copied {}", subject),
            Outcome::Rewritten => info!("✓ Rewrote asset paths in {}", subject),
            Outcome::Unchanged => debug!("{} unchanged", subject),
            Outcome::Skipped(reason) => warn!("⚠ Skipped {}: {}", subject, reason),
            Outcome::Failed(message) => warn!("⚠ Error processing {}: {}", subject, message),
        }
        self.items.push(ItemReport {
            stage,
            subject,
            outcome,
        });
    }

    /// Append all items of `other`, keeping their order.
    pub fn extend(&mut self, other: Report) {
        self.items.extend(other.items);
    }

    pub fn items(&self) -> &[ItemReport] {
        &self.items
    }

    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    pub fn failures(&self) -> impl Iterator<Item = &ItemReport> {
        self.items.iter().filter(|item| item.outcome.is_failure())
    }

    pub fn has_failures(&self) -> bool {
        self.failures().next().is_some()
    }

    /// Count the items of `stage` whose outcome satisfies `pred`.
    pub fn count(&self, stage: Stage, pred: impl Fn(&Outcome) -> bool) -> usize {
        self.items
            .iter()
            .filter(|item| item.stage == stage && pred(&item.outcome))
            .count()
    }

    pub fn stage(&self, stage: Stage) -> impl Iterator<Item = &ItemReport> {
        self.items.iter().filter(move |item| item.stage == stage)
    }
}
