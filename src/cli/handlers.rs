//! Command handlers
//!
//! Each handler runs one end-to-end flow and returns a process exit code:
//! resolve the target repository (config file or flags), fetch its indicator
//! files, run the engine, then either write the Dockerfile (`generate`) or
//! print the resolution (`inspect`).

use crate::cli::commands::{GenerateArgs, InspectArgs, TargetArgs};
use crate::cli::output::OutputFormatter;
use crate::config::RunConfig;
use crate::dockerfile;
use crate::engine::{Engine, RepoContext};
use crate::github::{FileIndexProvider, GithubProvider};
use anyhow::{bail, Result};
use std::path::PathBuf;
use tracing::{error, info};

/// A fully specified target: where the repo is, what to call it, what
/// language to resolve it as, and where the script goes.
struct Target {
    url: String,
    name: String,
    language: String,
    output: PathBuf,
}

impl Target {
    fn from_args(target: &TargetArgs, output_override: Option<&PathBuf>) -> Result<Self> {
        if let Some(config_path) = &target.config {
            let config = RunConfig::load(config_path)?;
            return Ok(Self {
                url: config.repository.url,
                name: config.repository.name,
                language: config.language,
                output: output_override.cloned().unwrap_or(config.output),
            });
        }

        match (&target.url, &target.name, &target.language) {
            (Some(url), Some(name), Some(language)) => Ok(Self {
                url: url.clone(),
                name: name.clone(),
                language: language.clone(),
                output: output_override
                    .cloned()
                    .unwrap_or_else(|| PathBuf::from("Dockerfile")),
            }),
            _ => bail!(
                "no target specified: pass --config FILE, or all of --url, --name and --language"
            ),
        }
    }
}

async fn resolve_target(target: &Target) -> Result<RepoContext> {
    let provider = GithubProvider::new();
    let engine = Engine::new();

    info!(url = %target.url, language = %target.language, "fetching indicator files");
    let snapshot = provider
        .list_indicator_files(&target.url, &target.language)
        .await?;
    info!(entries = snapshot.len(), "snapshot fetched");

    let environment = engine.resolve_tag(&target.language, &snapshot)?;
    Ok(RepoContext {
        repo_url: target.url.clone(),
        repo_name: target.name.clone(),
        environment,
    })
}

pub async fn handle_generate(args: &GenerateArgs) -> i32 {
    let result = async {
        let target = Target::from_args(&args.target, args.output.as_ref())?;
        let context = resolve_target(&target).await?;
        let env = &context.environment;
        let written = dockerfile::write(
            &env.image_tag,
            &env.instructions,
            &context.repo_name,
            &context.repo_url,
            &target.output,
        )?;
        println!("Dockerfile created at {}", written.display());
        Ok::<(), anyhow::Error>(())
    }
    .await;

    match result {
        Ok(()) => 0,
        Err(e) => {
            error!("generate failed: {:#}", e);
            eprintln!("Error: {:#}", e);
            1
        }
    }
}

pub async fn handle_inspect(args: &InspectArgs) -> i32 {
    let result = async {
        let target = Target::from_args(&args.target, None)?;
        let context = resolve_target(&target).await?;
        let output = OutputFormatter::new(args.format).format(&context)?;
        println!("{}", output);
        Ok::<(), anyhow::Error>(())
    }
    .await;

    match result {
        Ok(()) => 0,
        Err(e) => {
            error!("inspect failed: {:#}", e);
            eprintln!("Error: {:#}", e);
            1
        }
    }
}
