//! Dockerfile rendering
//!
//! Consumes the engine's output — a base-image tag and an ordered instruction
//! sequence — and produces the build script text. The preamble is fixed:
//! base image, noninteractive apt frontend, a bootstrap toolset, a working
//! directory, and a clone of the repository. Language-specific instructions
//! follow, and an interactive shell is appended as the terminal command when
//! the instructions did not supply one.

use crate::languages::Instruction;
use std::fs;
use std::path::{Path, PathBuf};
use thiserror::Error;
use tracing::info;

#[derive(Debug, Error)]
pub enum RenderError {
    #[error("failed to write build script to {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
}

/// Renders the complete Dockerfile text.
pub fn render(
    base_image: &str,
    instructions: &[Instruction],
    repo_name: &str,
    repo_url: &str,
) -> String {
    let mut lines = vec![
        format!("FROM {}", base_image),
        String::new(),
        "ENV DEBIAN_FRONTEND=noninteractive".to_string(),
        String::new(),
        "RUN apt-get update && apt-get install -y \\".to_string(),
        "    git \\".to_string(),
        "    build-essential \\".to_string(),
        "    bash \\".to_string(),
        "    sudo \\".to_string(),
        "    curl \\".to_string(),
        "    ca-certificates \\".to_string(),
        "    --no-install-recommends \\".to_string(),
        "    && rm -rf /var/lib/apt/lists/*".to_string(),
        String::new(),
        "RUN mkdir -p /working_directory/testbed".to_string(),
        String::new(),
        "WORKDIR /working_directory/testbed".to_string(),
        String::new(),
        format!("RUN git clone {} {}", repo_url, repo_name),
        String::new(),
        format!("WORKDIR /working_directory/testbed/{}", repo_name),
        String::new(),
    ];

    lines.extend(instructions.iter().map(|i| i.to_string()));

    if !instructions.iter().any(Instruction::is_terminal) {
        lines.push("CMD [\"/bin/bash\"]".to_string());
    }

    lines.join("\n")
}

/// Renders and persists the build script, returning the path written.
pub fn write(
    base_image: &str,
    instructions: &[Instruction],
    repo_name: &str,
    repo_url: &str,
    output_path: &Path,
) -> Result<PathBuf, RenderError> {
    let content = render(base_image, instructions, repo_name, repo_url);
    fs::write(output_path, content).map_err(|source| RenderError::Io {
        path: output_path.to_path_buf(),
        source,
    })?;

    let written = output_path
        .canonicalize()
        .unwrap_or_else(|_| output_path.to_path_buf());
    info!(path = %written.display(), "build script written");
    Ok(written)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn preamble_precedes_instructions() {
        let instructions = [
            Instruction::copy(["requirements.txt"], "."),
            Instruction::run("pip install --no-cache-dir -r requirements.txt"),
        ];
        let text = render(
            "python:3.11-slim",
            &instructions,
            "demo",
            "https://github.com/owner/demo",
        );

        assert!(text.starts_with("FROM python:3.11-slim\n"));
        assert!(text.contains("ENV DEBIAN_FRONTEND=noninteractive"));
        assert!(text.contains("    build-essential \\"));
        assert!(text.contains("RUN git clone https://github.com/owner/demo demo"));
        assert!(text.contains("WORKDIR /working_directory/testbed/demo"));

        let clone_pos = text.find("git clone").unwrap();
        let copy_pos = text.find("COPY requirements.txt").unwrap();
        assert!(clone_pos < copy_pos);
    }

    #[test]
    fn shell_fallback_when_no_terminal_command() {
        let instructions = [Instruction::run("npm ci")];
        let text = render("node:20-slim", &instructions, "demo", "url");
        assert!(text.ends_with("CMD [\"/bin/bash\"]"));
    }

    #[test]
    fn no_shell_fallback_when_terminal_command_present() {
        let instructions = [
            Instruction::run("go build -o app"),
            Instruction::cmd(["./app"]),
        ];
        let text = render("golang:1.22", &instructions, "demo", "url");
        assert!(text.ends_with("CMD [\"./app\"]"));
        assert_eq!(text.matches("CMD ").count(), 1);
    }

    #[test]
    fn write_persists_rendered_content() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("Dockerfile");
        let written = write("rust:stable", &[], "demo", "url", &path).unwrap();
        let content = fs::read_to_string(&written).unwrap();
        assert!(content.starts_with("FROM rust:stable"));
        assert!(content.ends_with("CMD [\"/bin/bash\"]"));
    }
}
