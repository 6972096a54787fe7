use std::path::{Path, PathBuf};

use async_walkdir::{Filtering, WalkDir};
use futures::StreamExt;
use globset::{Glob, GlobSet, GlobSetBuilder};
use miette::{IntoDiagnostic, Result};

use crate::{common::is_within, config::BuildConfig};

/// A source file recognized as a template, paired with the engine it is routed to
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Template {
    pub path: PathBuf,
    pub engine: String,
}

/// Finds templates beneath the input directory
pub struct TemplateFinder<'a> {
    config: &'a BuildConfig,
    input_dir: PathBuf,
    excluded: Vec<PathBuf>,
}

impl<'a> TemplateFinder<'a> {
    /// Skips the includes directory, the output directory and every passthrough source
    pub fn new(config: &'a BuildConfig, project_root: &Path) -> Self {
        let layout = config.layout(project_root);
        let mut excluded = vec![layout.includes, layout.output];
        excluded.extend(
            config
                .passthrough_rules()
                .iter()
                .map(|r| project_root.join(&r.source)),
        );

        Self {
            config,
            input_dir: layout.input,
            excluded,
        }
    }

    #[tracing::instrument(level = "trace", skip(self))]
    pub async fn find(&self) -> Result<Vec<Template>> {
        if !self.input_dir.exists() {
            tracing::debug!("input dir {} is missing", self.input_dir.display());
            return Ok(Vec::new());
        }
        let matcher = build_format_set(self.config.template_formats())?;
        let excluded = self.excluded.clone();
        let mut entries = WalkDir::new(&self.input_dir).filter(move |entry| {
            let skip = excluded.iter().any(|e| is_within(&entry.path(), e));
            async move {
                if skip {
                    Filtering::IgnoreDir
                } else {
                    Filtering::Continue
                }
            }
        });
        let mut templates = Vec::new();

        while let Some(res) = entries.next().await {
            match res {
                Ok(entry) => {
                    let entry_path = entry.path();
                    if !entry_path.is_file() {
                        continue;
                    }
                    let rel_path = entry_path
                        .strip_prefix(&self.input_dir)
                        .into_diagnostic()?;

                    if matcher.is_match(rel_path) {
                        if let Some(engine) = entry_path
                            .extension()
                            .and_then(|e| self.config.engine_for(&e.to_string_lossy()))
                        {
                            templates.push(Template {
                                engine: engine.to_owned(),
                                path: entry_path,
                            });
                        }
                    }
                }
                Err(e) => return Err(e).into_diagnostic(),
            }
        }
        templates.sort_by(|a, b| a.path.cmp(&b.path));

        Ok(templates)
    }
}

#[tracing::instrument(level = "trace")]
fn build_format_set(formats: &[String]) -> Result<GlobSet> {
    let mut builder = GlobSetBuilder::new();

    for format in formats {
        builder.add(Glob::new(&format!("**/*.{format}")).into_diagnostic()?);
    }

    builder.build().into_diagnostic()
}

#[cfg(test)]
mod tests {
    use std::fs;

    use super::*;

    fn touch(path: PathBuf) {
        fs::create_dir_all(path.parent().unwrap()).unwrap();
        fs::write(path, "").unwrap();
    }

    #[test]
    fn format_set_matches_nested_files() {
        let set = build_format_set(&["njk".into(), "md".into()]).unwrap();

        assert!(set.is_match("index.njk"));
        assert!(set.is_match("posts/hello.md"));
        assert!(!set.is_match("css/site.css"));
    }

    #[tokio::test]
    async fn finds_templates_outside_excluded_dirs() {
        let dir = tempfile::tempdir().unwrap();
        let root = dir.path();
        touch(root.join("src/index.njk"));
        touch(root.join("src/posts/first.md"));
        touch(root.join("src/notes.txt"));
        touch(root.join("src/_includes/base.njk"));
        touch(root.join("src/css/site.css"));
        touch(root.join("src/css/print.md"));

        let config = BuildConfig::default();
        let templates = TemplateFinder::new(&config, root).find().await.unwrap();

        let rel: Vec<_> = templates
            .iter()
            .map(|t| t.path.strip_prefix(root.join("src")).unwrap().to_owned())
            .collect();
        assert_eq!(
            rel,
            vec![PathBuf::from("index.njk"), PathBuf::from("posts/first.md")]
        );
        assert!(templates.iter().all(|t| t.engine == "njk"));
    }

    #[tokio::test]
    async fn missing_input_dir_yields_nothing() {
        let dir = tempfile::tempdir().unwrap();
        let config = BuildConfig::default();

        assert!(TemplateFinder::new(&config, dir.path())
            .find()
            .await
            .unwrap()
            .is_empty());
    }
}
