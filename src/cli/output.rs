//! Output formatting for resolved environments
//!
//! Formats a [`RepoContext`] as JSON (machine-readable), YAML, or
//! human-readable text for the `inspect` command.

use crate::engine::RepoContext;
use anyhow::{Context, Result};
use clap::ValueEnum;

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum OutputFormat {
    Json,
    Yaml,
    Human,
}

pub struct OutputFormatter {
    format: OutputFormat,
}

impl OutputFormatter {
    pub fn new(format: OutputFormat) -> Self {
        Self { format }
    }

    pub fn format(&self, context: &RepoContext) -> Result<String> {
        match self.format {
            OutputFormat::Json => serde_json::to_string_pretty(context)
                .context("failed to serialize resolution to JSON"),
            OutputFormat::Yaml => {
                serde_yaml::to_string(context).context("failed to serialize resolution to YAML")
            }
            OutputFormat::Human => Ok(Self::format_human(context)),
        }
    }

    fn format_human(context: &RepoContext) -> String {
        let env = &context.environment;
        let mut lines = vec![
            format!("Repository:  {} ({})", context.repo_name, context.repo_url),
            format!("Language:    {}", env.language),
            format!("Version:     {}", env.version),
            format!("Base image:  {}", env.image_tag),
            format!("Build type:  {}", env.build_type),
            "Instructions:".to_string(),
        ];
        for instruction in &env.instructions {
            lines.push(format!("  {}", instruction));
        }
        lines.join("\n")
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::engine::{Engine, RepoContext};
    use crate::languages::LanguageId;
    use crate::snapshot::FileSnapshot;

    fn sample_context() -> RepoContext {
        let snapshot = FileSnapshot::from_files([("go.mod", "go 1.21\n")]);
        RepoContext {
            repo_url: "https://github.com/owner/demo".to_string(),
            repo_name: "demo".to_string(),
            environment: Engine::new().resolve(LanguageId::Go, &snapshot),
        }
    }

    #[test]
    fn json_output_is_parseable() {
        let text = OutputFormatter::new(OutputFormat::Json)
            .format(&sample_context())
            .unwrap();
        let value: serde_json::Value = serde_json::from_str(&text).unwrap();
        assert_eq!(value["repo_name"], "demo");
        assert_eq!(value["image_tag"], "golang:1.21");
    }

    #[test]
    fn human_output_lists_instructions() {
        let text = OutputFormatter::new(OutputFormat::Human)
            .format(&sample_context())
            .unwrap();
        assert!(text.contains("Base image:  golang:1.21"));
        assert!(text.contains("  RUN go mod download"));
    }
}
