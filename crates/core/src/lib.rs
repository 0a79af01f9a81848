pub mod base_path;
pub mod config;
pub mod error;
pub mod report;
pub mod types;

pub use base_path::BasePath;
pub use config::parse_graft_toml;
pub use error::{Error, Result};
pub use report::{ItemReport, Outcome, Report, Stage};
pub use types::*;
