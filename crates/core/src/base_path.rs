use log::{debug, warn};
use percent_encoding::percent_decode_str;
use std::fmt;
use std::path::{Path, PathBuf};
use url::Url;

/// Base used to resolve site URLs that are not absolute (e.g. `govhub/`).
const PLACEHOLDER_BASE: &str = "http://placeholder.invalid/";

/// URL path prefix the site is served under.
///
/// Either empty (site served from the domain root) or a string that starts
/// with `/` and never ends with `/`, e.g. `/govhub`.
#[derive(Debug, Clone, Default, PartialEq, Eq, Hash)]
pub struct BasePath(String);

impl BasePath {
    /// Derive the base path from the configured site URL.
    ///
    /// Never fails: URLs that do not parse as absolute are joined against a
    /// placeholder base and whatever path comes out is used.
    pub fn resolve(site_url: Option<&str>) -> Self {
        let site_url = match site_url.map(str::trim) {
            Some(url) if !url.is_empty() => url,
            _ => return Self::default(),
        };

        let path = match extract_path(site_url) {
            Some(path) => path,
            None => {
                warn!(
                    "⚠ Could not extract a path from site_url '{}', serving from the root",
                    site_url
                );
                return Self::default();
            }
        };

        let trimmed = path.trim_end_matches('/');
        if trimmed.is_empty() {
            debug!("site_url '{}' has no path component", site_url);
            return Self::default();
        }

        if trimmed.starts_with('/') {
            Self(trimmed.to_string())
        } else {
            Self(format!("/{}", trimmed))
        }
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    /// Join `rest` onto the base path: `/govhub` + `assets/x.png` gives
    /// `/govhub/assets/x.png`. With an empty base path the result is
    /// root-absolute.
    pub fn prefixed(&self, rest: &str) -> String {
        format!("{}/{}", self.0, rest.trim_start_matches('/'))
    }

    /// Directory holding the prefixed copy of the tree rooted at `root`.
    pub fn dir_in(&self, root: &Path) -> Option<PathBuf> {
        if self.is_empty() {
            return None;
        }
        Some(self.segments().fold(root.to_path_buf(), |dir, seg| dir.join(seg)))
    }

    /// Top-level directory name the prefixed tree lives in (`a` for `/a/b`).
    pub fn first_segment(&self) -> Option<&str> {
        self.segments().next()
    }

    fn segments(&self) -> impl Iterator<Item = &str> {
        self.0.split('/').filter(|s| !s.is_empty())
    }
}

impl fmt::Display for BasePath {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// Path component of `site_url`, percent-decoded so it names the directory
/// a static server maps requests onto.
fn extract_path(site_url: &str) -> Option<String> {
    let url = match Url::parse(site_url) {
        Ok(url) if !url.cannot_be_a_base() => url,
        Ok(_) => return None,
        Err(url::ParseError::RelativeUrlWithoutBase) => Url::parse(PLACEHOLDER_BASE)
            .and_then(|base| base.join(site_url))
            .ok()?,
        Err(_) => return None,
    };
    Some(percent_decode_str(url.path()).decode_utf8_lossy().into_owned())
}
