use crate::base_path::BasePath;
use serde::{Deserialize, Serialize};
use std::path::PathBuf;

/// Complete post-build configuration
#[derive(Debug, Clone)]
pub struct GraftConfig {
    pub site: SiteConfig,
    pub entry: EntryConfig,
    pub merge: MergeConfig,
    pub assets: AssetConfig,
    /// Derived from `site.site_url` once, when the configuration is built
    pub base_path: BasePath,
}

impl GraftConfig {
    /// Build a configuration from its sections, resolving the base path.
    pub fn new(
        site: SiteConfig,
        entry: EntryConfig,
        merge: MergeConfig,
        assets: AssetConfig,
    ) -> Self {
        let base_path = BasePath::resolve(site.site_url.as_deref());
        Self {
            site,
            entry,
            merge,
            assets,
            base_path,
        }
    }

    /// Defaults for everything except the two tree roots and the site URL.
    pub fn with_dirs(docs_dir: PathBuf, site_dir: PathBuf, site_url: Option<String>) -> Self {
        Self::new(
            SiteConfig {
                docs_dir,
                site_dir,
                site_url,
            },
            EntryConfig::default(),
            MergeConfig::default(),
            AssetConfig::default(),
        )
    }

    /// Path of the prefixed output tree, if a base path is configured
    pub fn base_dir(&self) -> Option<PathBuf> {
        self.base_path.dir_in(&self.site.site_dir)
    }
}

/// Input and output tree roots
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SiteConfig {
    pub docs_dir: PathBuf,
    pub site_dir: PathBuf,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub site_url: Option<String>,
}

/// How `./` references to local JS/CSS in the entry document are treated
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum LocalAssetPolicy {
    /// No special case, local JS/CSS go under the dist prefix like everything else
    #[default]
    Dist,
    /// Local JS/CSS stay relative
    Relative,
    /// Local JS/CSS go under the home prefix
    Home,
}

/// Entry-point (landing page) settings
#[derive(Debug, Clone)]
pub struct EntryConfig {
    /// Entry document, relative to `docs_dir`
    pub source: PathBuf,
    /// Where the rewritten document lands, relative to `site_dir`
    pub output: PathBuf,
    pub dist_prefix: String,
    pub home_prefix: String,
    pub local_assets: LocalAssetPolicy,
    pub local_suffixes: Vec<String>,
    pub local_exclude: String,
}

impl Default for EntryConfig {
    fn default() -> Self {
        Self {
            source: PathBuf::from("home/index.html"),
            output: PathBuf::from("index.html"),
            dist_prefix: "land/dist".to_string(),
            home_prefix: "home".to_string(),
            local_assets: LocalAssetPolicy::default(),
            local_suffixes: vec![".js".to_string(), ".css".to_string()],
            local_exclude: "./land/".to_string(),
        }
    }
}

/// A secondary tree copied from `docs_dir/source` to `site_dir/dest`
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StaticDir {
    pub source: PathBuf,
    pub dest: PathBuf,
}

impl StaticDir {
    pub fn new(source: impl Into<PathBuf>, dest: impl Into<PathBuf>) -> Self {
        Self {
            source: source.into(),
            dest: dest.into(),
        }
    }
}

/// Static tree merging and page duplication settings
#[derive(Debug, Clone)]
pub struct MergeConfig {
    pub static_dirs: Vec<StaticDir>,
    /// Top-level directory names never duplicated under the base path
    pub exclude_dirs: Vec<String>,
    /// Top-level file names never duplicated under the base path
    pub exclude_files: Vec<String>,
    pub exclude_suffixes: Vec<String>,
}

impl Default for MergeConfig {
    fn default() -> Self {
        Self {
            static_dirs: vec![
                StaticDir::new("global-assets", "global-assets"),
                StaticDir::new("land/dist", "land/dist"),
                StaticDir::new("land/public", "land/public"),
            ],
            exclude_dirs: vec!["global-assets".to_string(), "land".to_string()],
            exclude_files: [
                "sitemap.xml",
                "sitemap.xml.gz",
                "schema.json",
                "404.html",
                "index.html",
            ]
            .iter()
            .map(|s| s.to_string())
            .collect(),
            exclude_suffixes: vec![".map".to_string()],
        }
    }
}

/// Global asset rewriting settings
#[derive(Debug, Clone)]
pub struct AssetConfig {
    /// Name of the generated asset directory (`assets` in `../assets/x.css`)
    pub dir: String,
}

impl Default for AssetConfig {
    fn default() -> Self {
        Self {
            dir: "assets".to_string(),
        }
    }
}
