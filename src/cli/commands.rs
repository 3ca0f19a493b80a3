use crate::cli::output::OutputFormat;
use clap::{Args, Parser, Subcommand};
use std::path::PathBuf;

/// Repository toolchain inference and Dockerfile generation
#[derive(Parser, Debug)]
#[command(
    name = "basewright",
    about = "Infers a repository's toolchain and build convention and emits a Dockerfile",
    version,
    long_about = "basewright inspects a remote repository's root-level marker files, infers \
                  the runtime version and dependency-management convention for its language, \
                  and emits a Dockerfile capable of building it.\n\n\
                  Examples:\n  \
                  basewright generate --config orchestration.yaml\n  \
                  basewright generate --url https://github.com/pallets/flask --name flask --language python\n  \
                  basewright inspect --url https://github.com/owner/repo --name repo --language rust --format json"
)]
pub struct CliArgs {
    #[command(subcommand)]
    pub command: Commands,

    #[arg(long, global = true, value_name = "LEVEL", help = "Set logging level")]
    pub log_level: Option<String>,

    #[arg(short = 'v', long, global = true, help = "Increase verbosity")]
    pub verbose: bool,

    #[arg(
        short = 'q',
        long,
        global = true,
        conflicts_with = "verbose",
        help = "Quiet mode - suppress non-error output"
    )]
    pub quiet: bool,
}

#[derive(Subcommand, Debug)]
pub enum Commands {
    #[command(about = "Resolve a repository's environment and write a Dockerfile")]
    Generate(GenerateArgs),

    #[command(about = "Resolve a repository's environment and print it without writing anything")]
    Inspect(InspectArgs),
}

/// Repository selection, either from a config file or from flags.
#[derive(Args, Debug)]
pub struct TargetArgs {
    #[arg(long, value_name = "FILE", help = "YAML run configuration file")]
    pub config: Option<PathBuf>,

    #[arg(long, value_name = "URL", help = "Repository URL")]
    pub url: Option<String>,

    #[arg(long, value_name = "NAME", help = "Repository name (clone directory)")]
    pub name: Option<String>,

    #[arg(
        long,
        value_name = "LANG",
        help = "Language tag (python, javascript, go, rust)"
    )]
    pub language: Option<String>,
}

#[derive(Args, Debug)]
pub struct GenerateArgs {
    #[command(flatten)]
    pub target: TargetArgs,

    #[arg(
        short,
        long,
        value_name = "PATH",
        help = "Output path for the Dockerfile (overrides the config file)"
    )]
    pub output: Option<PathBuf>,
}

#[derive(Args, Debug)]
pub struct InspectArgs {
    #[command(flatten)]
    pub target: TargetArgs,

    #[arg(long, value_enum, default_value_t = OutputFormat::Human, help = "Output format")]
    pub format: OutputFormat,
}
