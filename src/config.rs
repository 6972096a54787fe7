use std::path::{Path, PathBuf};

use miette::{Context, IntoDiagnostic, Result};
use serde::{Deserialize, Serialize};
use tokio::fs;

use crate::{
    common::normalize_path,
    prefix::{PathPrefix, PATH_PREFIX_ENV},
};

pub const CONFIG_FILE_NAME: &str = "sitecfg.toml";

/// Settings for a single build. Read once at startup and never mutated afterwards.
#[derive(Clone, Debug, PartialEq, Eq, Deserialize, Serialize)]
#[serde(default)]
pub struct BuildConfig {
    /// prefix applied to generated links
    pub path_prefix: PathPrefix,

    /// file extensions treated as templates
    pub template_formats: Vec<String>,

    /// engine used for every html producing template
    pub html_template_engine: String,

    pub dirs: Dirs,

    /// directories copied verbatim into the output
    pub passthrough: Vec<PassthroughRule>,
}

#[derive(Clone, Debug, PartialEq, Eq, Deserialize, Serialize)]
#[serde(default)]
pub struct Dirs {
    pub input: PathBuf,
    pub output: PathBuf,

    /// relative to `input`
    pub data: PathBuf,

    /// relative to `input`
    pub includes: PathBuf,
}

/// Copies `source` (relative to the project root) to `dest` (relative to the output root).
/// A `dest` of `.` is the output root itself.
#[derive(Clone, Debug, PartialEq, Eq, Deserialize, Serialize)]
pub struct PassthroughRule {
    pub source: PathBuf,
    pub dest: PathBuf,
}

impl PassthroughRule {
    pub fn new(source: impl Into<PathBuf>, dest: impl Into<PathBuf>) -> Self {
        Self {
            source: source.into(),
            dest: dest.into(),
        }
    }
}

/// Directory layout resolved against a project root
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Layout {
    pub input: PathBuf,
    pub output: PathBuf,
    pub data: PathBuf,
    pub includes: PathBuf,
}

impl Default for BuildConfig {
    fn default() -> Self {
        Self {
            path_prefix: PathPrefix::default(),
            template_formats: vec!["njk".into(), "md".into()],
            html_template_engine: "njk".into(),
            dirs: Dirs::default(),
            passthrough: vec![
                PassthroughRule::new("src/css", "css"),
                PassthroughRule::new("admin", "admin"),
                PassthroughRule::new("public", "."),
            ],
        }
    }
}

impl Default for Dirs {
    fn default() -> Self {
        Self {
            input: "src".into(),
            output: "_site".into(),
            data: "../content".into(),
            includes: "_includes".into(),
        }
    }
}

impl BuildConfig {
    /// Loads the optional config file in `dir` and applies the environment on top
    #[tracing::instrument(level = "trace")]
    pub async fn load(dir: &Path) -> Result<Self> {
        let config = read_config(dir).await?;

        Ok(config.with_env_prefix(std::env::var(PATH_PREFIX_ENV).ok().as_deref()))
    }

    /// Overrides the path prefix when the given value is set and non-empty
    pub fn with_env_prefix(mut self, value: Option<&str>) -> Self {
        if value.is_some_and(|v| !v.is_empty()) {
            self.path_prefix = PathPrefix::new(value);
        }
        self
    }

    pub fn path_prefix(&self) -> &PathPrefix {
        &self.path_prefix
    }

    pub fn passthrough_rules(&self) -> &[PassthroughRule] {
        &self.passthrough
    }

    pub fn dirs(&self) -> &Dirs {
        &self.dirs
    }

    pub fn template_formats(&self) -> &[String] {
        &self.template_formats
    }

    /// Engine for a template extension, `None` if the extension isn't a template format
    pub fn engine_for(&self, extension: &str) -> Option<&str> {
        self.template_formats
            .iter()
            .any(|f| f == extension)
            .then_some(self.html_template_engine.as_str())
    }

    pub fn layout(&self, root: &Path) -> Layout {
        let input = normalize_path(&root.join(&self.dirs.input));

        Layout {
            output: normalize_path(&root.join(&self.dirs.output)),
            data: normalize_path(&input.join(&self.dirs.data)),
            includes: normalize_path(&input.join(&self.dirs.includes)),
            input,
        }
    }
}

#[tracing::instrument(level = "trace")]
async fn read_config(dir: &Path) -> Result<BuildConfig> {
    let path = dir.join(CONFIG_FILE_NAME);

    if !path.exists() {
        tracing::debug!("no {CONFIG_FILE_NAME} found, using defaults");
        return Ok(BuildConfig::default());
    }
    let cfg_string = fs::read_to_string(&path)
        .await
        .into_diagnostic()
        .context("reading config file")?;

    toml::from_str(&cfg_string)
        .into_diagnostic()
        .with_context(|| format!("parsing {}", path.display()))
}
