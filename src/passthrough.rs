use std::path::{Path, PathBuf};

use async_trait::async_trait;
use async_walkdir::WalkDir;
use futures::StreamExt;
use miette::{IntoDiagnostic, Result};

use crate::{
    common::{normalize_path, CopyFile, CopyFileParams},
    config::PassthroughRule,
    error::Error,
    pipeline::{ProcessingStep, ProcessingStepChain, ProcessingStepParallel},
};

/// Copies the contents of a rule's source verbatim beneath the output root
pub struct PassthroughCopy {
    pub project_root: PathBuf,
    pub output_dir: PathBuf,
}

/// Expands a rule into one copy job per source file
pub struct ResolvePassthrough {
    pub project_root: PathBuf,
    pub output_dir: PathBuf,
}

#[async_trait]
impl ProcessingStep for PassthroughCopy {
    type Input = PassthroughRule;

    /// number of copied files
    type Output = usize;

    #[tracing::instrument(name = "passthrough", level = "trace", skip(self))]
    async fn process(&self, rule: Self::Input) -> Result<Self::Output> {
        let source = rule.source.to_owned();
        let copied = ResolvePassthrough {
            project_root: self.project_root.to_owned(),
            output_dir: self.output_dir.to_owned(),
        }
        .chain(CopyFile.parallel())
        .process(rule)
        .await?
        .len();
        tracing::debug!("copied {copied} files from {}", source.display());

        Ok(copied)
    }
}

#[async_trait]
impl ProcessingStep for ResolvePassthrough {
    type Input = PassthroughRule;
    type Output = Vec<CopyFileParams>;

    #[tracing::instrument(name = "resolve passthrough", level = "trace", skip(self))]
    async fn process(&self, rule: Self::Input) -> Result<Self::Output> {
        let source = self.project_root.join(&rule.source);
        let dest = normalize_path(&self.output_dir.join(&rule.dest));

        if !source.exists() {
            return Err(Error::MissingPassthroughSource(rule.source).into());
        }
        if source.is_file() {
            let file_name = source.file_name().map(PathBuf::from).unwrap_or_default();

            return Ok(vec![CopyFileParams {
                to: dest.join(file_name),
                from: source,
            }]);
        }

        Ok(collect_files(&source)
            .await?
            .into_iter()
            .map(|(from, rel_path)| CopyFileParams {
                to: dest.join(rel_path),
                from,
            })
            .collect())
    }
}

/// Lists all files beneath `base` together with their path relative to it
#[tracing::instrument(level = "trace")]
async fn collect_files(base: &Path) -> Result<Vec<(PathBuf, PathBuf)>> {
    let mut entries = WalkDir::new(base);
    let mut files = Vec::new();

    while let Some(res) = entries.next().await {
        match res {
            Ok(entry) => {
                let entry_path = entry.path();
                if entry_path.is_file() {
                    let rel_path = entry_path.strip_prefix(base).into_diagnostic()?.to_owned();
                    files.push((entry_path, rel_path));
                }
            }
            Err(e) => return Err(e).into_diagnostic(),
        }
    }

    Ok(files)
}
