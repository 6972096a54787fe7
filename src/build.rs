use std::{
    path::{Path, PathBuf},
    time::{Duration, Instant},
};

use miette::{Context, IntoDiagnostic, Result};
use tokio::fs;

use crate::{
    common::{absolute_path, is_within},
    config::BuildConfig,
    error::Error,
    passthrough::PassthroughCopy,
    pipeline::ProcessingStep,
    templates::{Template, TemplateFinder},
};

#[derive(Debug)]
pub struct BuildSummary {
    pub output_dir: PathBuf,
    pub copied_files: usize,
    pub templates: Vec<Template>,
    pub duration: Duration,
}

/// Prepares the output directory, runs all passthrough rules and collects the templates.
/// Rules run in declared order, so a later rule overwrites files of an earlier one.
#[tracing::instrument(level = "trace", skip(config))]
pub async fn build(project_root: &Path, config: &BuildConfig) -> Result<BuildSummary> {
    let start = Instant::now();
    let project_root = absolute_path(project_root)
        .into_diagnostic()
        .context("resolving project root")?;
    let project_root = project_root.as_path();
    let layout = config.layout(project_root);

    if is_within(&layout.output, &layout.input) || is_within(&layout.input, &layout.output) {
        return Err(Error::OverlappingDirs {
            input: config.dirs().input.to_owned(),
            output: config.dirs().output.to_owned(),
        }
        .into());
    }
    if !layout.data.exists() {
        tracing::debug!("data dir {} does not exist", layout.data.display());
    }

    if layout.output.exists() {
        fs::remove_dir_all(&layout.output).await.into_diagnostic()?;
    }
    fs::create_dir_all(&layout.output).await.into_diagnostic()?;

    let passthrough = PassthroughCopy {
        project_root: project_root.to_owned(),
        output_dir: layout.output.to_owned(),
    };
    let mut copied_files = 0;

    for rule in config.passthrough_rules() {
        copied_files += passthrough.process(rule.to_owned()).await?;
    }

    let templates = TemplateFinder::new(config, project_root).find().await?;
    for template in &templates {
        tracing::debug!("{} ({})", template.path.display(), template.engine);
    }

    let summary = BuildSummary {
        output_dir: layout.output,
        copied_files,
        templates,
        duration: start.elapsed(),
    };
    tracing::info!(
        "copied {} files, found {} templates, path prefix {} ({:?})",
        summary.copied_files,
        summary.templates.len(),
        config.path_prefix(),
        summary.duration
    );

    Ok(summary)
}
