use std::path::PathBuf;

use async_trait::async_trait;
use miette::{IntoDiagnostic, Result, WrapErr};
use tokio::fs;

use crate::pipeline::ProcessingStep;

/// Copies a single file byte for byte, creating missing parent directories
pub struct CopyFile;

pub struct CopyFileParams {
    pub from: PathBuf,
    pub to: PathBuf,
}

#[async_trait]
impl ProcessingStep for CopyFile {
    type Input = CopyFileParams;
    type Output = u64;

    #[tracing::instrument(name = "copy file", level = "trace", skip_all)]
    async fn process(&self, CopyFileParams { from, to }: Self::Input) -> Result<Self::Output> {
        if let Some(parent) = to.parent() {
            if !parent.exists() {
                fs::create_dir_all(parent).await.into_diagnostic()?;
            }
        }
        tracing::trace!("{} -> {}", from.display(), to.display());

        fs::copy(&from, &to)
            .await
            .into_diagnostic()
            .wrap_err_with(|| format!("copying {} to {}", from.display(), to.display()))
    }
}
