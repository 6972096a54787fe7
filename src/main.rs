use clap::Parser;
use miette::{IntoDiagnostic, Result};
use sitecfg::{
    args::{Args, Command, ProjectArgs},
    logging::init_tracing,
    BuildConfig,
};

#[tokio::main]
async fn main() -> Result<()> {
    let args: Args = Args::parse();
    init_tracing();

    match args.command {
        Command::Build(ProjectArgs { directory }) => {
            let cfg = BuildConfig::load(&directory).await?;
            let summary = sitecfg::build(&directory, &cfg).await?;
            tracing::info!("output written to {}", summary.output_dir.display());

            Ok(())
        }
        Command::Config(ProjectArgs { directory }) => {
            let cfg = BuildConfig::load(&directory).await?;
            print!("{}", toml::to_string_pretty(&cfg).into_diagnostic()?);

            Ok(())
        }
    }
}
