use std::path::PathBuf;

use miette::Diagnostic;
use thiserror::Error;

/// Failures detected while building. Resolving the configuration itself never fails.
#[derive(Debug, Error, Diagnostic)]
pub enum Error {
    #[error("output directory `{output}` overlaps input directory `{input}`")]
    #[diagnostic(
        code(sitecfg::overlapping_dirs),
        help("point `dirs.output` somewhere outside of `dirs.input`")
    )]
    OverlappingDirs { input: PathBuf, output: PathBuf },

    #[error("passthrough source `{0}` does not exist")]
    #[diagnostic(code(sitecfg::missing_passthrough_source))]
    MissingPassthroughSource(PathBuf),
}
