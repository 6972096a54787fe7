pub mod args;
pub mod build;
pub mod common;
pub mod config;
pub mod error;
pub mod logging;
pub mod passthrough;
pub mod pipeline;
pub mod prefix;
pub mod templates;

pub use build::{build, BuildSummary};
pub use config::{BuildConfig, Dirs, Layout, PassthroughRule};
pub use prefix::{resolve_path_prefix, PathPrefix};
