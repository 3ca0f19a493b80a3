//! Language backends
//!
//! Each supported language implements [`LanguageBackend`]: resolving a target
//! toolchain version from evidence files, classifying the build convention
//! from indicator files, mapping the build type to an ordered instruction
//! sequence, and formatting the base-image tag. The engine never branches on
//! language itself — it dispatches to one backend via the
//! [`LanguageRegistry`](registry::LanguageRegistry).

mod go;
mod javascript;
mod python;
pub mod registry;
mod rust;

pub use go::GoLanguage;
pub use javascript::JavaScriptLanguage;
pub use python::PythonLanguage;
pub use registry::LanguageRegistry;
pub use rust::RustLanguage;

use crate::snapshot::FileSnapshot;
use serde::Serialize;
use std::fmt;

/// Supported language tags. The set is closed: anything else is rejected by
/// dispatch rather than silently defaulted.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum LanguageId {
    Python,
    JavaScript,
    Go,
    Rust,
}

impl LanguageId {
    /// Normalizes a language tag, case-insensitively. "js" is an accepted
    /// alias for "javascript".
    pub fn parse(tag: &str) -> Option<Self> {
        match tag.trim().to_lowercase().as_str() {
            "python" => Some(Self::Python),
            "javascript" | "js" => Some(Self::JavaScript),
            "go" => Some(Self::Go),
            "rust" => Some(Self::Rust),
            _ => None,
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Python => "python",
            Self::JavaScript => "javascript",
            Self::Go => "go",
            Self::Rust => "rust",
        }
    }
}

impl fmt::Display for LanguageId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Build-tooling conventions, one variant set per language plus the shared
/// `Unknown` sentinel. `Unknown` is the terminal no-match result and never
/// maps to an indicator file; `Basic` exists in the Go and Rust sets but is
/// likewise never produced by detection.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum BuildType {
    // Python
    Pyproject,
    Setup,
    Requirements,
    Pipfile,
    Conda,
    // JavaScript
    Npm,
    Yarn,
    Pnpm,
    // Go
    #[serde(rename = "modules")]
    GoModules,
    Dep,
    Glide,
    Vendor,
    // Rust
    Cargo,
    // Shared
    Basic,
    Unknown,
}

impl BuildType {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Pyproject => "pyproject",
            Self::Setup => "setup",
            Self::Requirements => "requirements",
            Self::Pipfile => "pipfile",
            Self::Conda => "conda",
            Self::Npm => "npm",
            Self::Yarn => "yarn",
            Self::Pnpm => "pnpm",
            Self::GoModules => "modules",
            Self::Dep => "dep",
            Self::Glide => "glide",
            Self::Vendor => "vendor",
            Self::Cargo => "cargo",
            Self::Basic => "basic",
            Self::Unknown => "unknown",
        }
    }
}

impl fmt::Display for BuildType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// One entry of a language's build-file index. Rules are checked in
/// declaration order; the order is the detection priority.
#[derive(Debug, Clone, Copy)]
pub struct BuildRule {
    pub build_type: BuildType,
    pub indicators: &'static [&'static str],
}

/// One provisioning directive of a build script. Order within a generated
/// sequence is semantically meaningful.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Instruction {
    /// Copy files from the build context into the image.
    Copy { sources: Vec<String>, dest: String },
    /// Execute a shell command at build time.
    Run(String),
    /// Set an environment variable for subsequent steps.
    Env { key: String, value: String },
    /// The terminal run command of the image.
    Cmd(Vec<String>),
}

impl Instruction {
    pub fn copy<S: Into<String>>(sources: impl IntoIterator<Item = S>, dest: &str) -> Self {
        Self::Copy {
            sources: sources.into_iter().map(Into::into).collect(),
            dest: dest.to_string(),
        }
    }

    pub fn run(command: impl Into<String>) -> Self {
        Self::Run(command.into())
    }

    pub fn env(key: &str, value: &str) -> Self {
        Self::Env {
            key: key.to_string(),
            value: value.to_string(),
        }
    }

    pub fn cmd<S: Into<String>>(argv: impl IntoIterator<Item = S>) -> Self {
        Self::Cmd(argv.into_iter().map(Into::into).collect())
    }

    /// Whether this directive is a terminal run command.
    pub fn is_terminal(&self) -> bool {
        matches!(self, Self::Cmd(_))
    }
}

impl fmt::Display for Instruction {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Copy { sources, dest } => write!(f, "COPY {} {}", sources.join(" "), dest),
            Self::Run(command) => write!(f, "RUN {}", command),
            Self::Env { key, value } => write!(f, "ENV {}={}", key, value),
            Self::Cmd(argv) => {
                let quoted: Vec<String> = argv.iter().map(|a| format!("\"{}\"", a)).collect();
                write!(f, "CMD [{}]", quoted.join(", "))
            }
        }
    }
}

impl Serialize for Instruction {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: serde::Serializer,
    {
        serializer.collect_str(self)
    }
}

/// A language's resolver/detector/generator capability set.
///
/// All methods are pure functions of the snapshot: version resolution never
/// fails (evidence-tier misses fall through to the language default), and
/// detection is deterministic — the same snapshot always yields the same
/// build type, which callers rely on for reproducible environments.
pub trait LanguageBackend: Send + Sync {
    fn id(&self) -> LanguageId;

    /// Documented fallback version when no evidence tier yields anything.
    fn default_version(&self) -> &'static str;

    /// Files consulted as version evidence, in tier order.
    fn version_files(&self) -> &'static [&'static str];

    /// Build-file index: ordered indicator table for build-type detection.
    fn build_rules(&self) -> &'static [BuildRule];

    /// Resolves the target toolchain version from the snapshot.
    fn resolve_version(&self, snapshot: &FileSnapshot) -> String;

    /// Classifies the snapshot against the build-file index. First rule with
    /// a present indicator wins; no match is `Unknown`.
    fn detect_build_type(&self, snapshot: &FileSnapshot) -> BuildType {
        for rule in self.build_rules() {
            if rule.indicators.iter().any(|name| snapshot.has(name)) {
                return rule.build_type;
            }
        }
        BuildType::Unknown
    }

    /// Maps a build type to its ordered provisioning template.
    fn generate_instructions(
        &self,
        build_type: BuildType,
        snapshot: &FileSnapshot,
    ) -> Vec<Instruction>;

    /// Formats the base-image tag for a resolved version.
    fn image_tag(&self, version: &str) -> String;

    /// Union of version-evidence files and build-type indicators — the names
    /// the file-index provider filters a repository listing against.
    fn indicator_files(&self) -> Vec<&'static str> {
        let mut names: Vec<&'static str> = self.version_files().to_vec();
        for rule in self.build_rules() {
            for name in rule.indicators {
                if !names.contains(name) {
                    names.push(name);
                }
            }
        }
        names
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn language_tag_normalization() {
        assert_eq!(LanguageId::parse("Python"), Some(LanguageId::Python));
        assert_eq!(LanguageId::parse("JS"), Some(LanguageId::JavaScript));
        assert_eq!(
            LanguageId::parse("javascript"),
            Some(LanguageId::JavaScript)
        );
        assert_eq!(LanguageId::parse(" rust "), Some(LanguageId::Rust));
        assert_eq!(LanguageId::parse("ruby"), None);
        assert_eq!(LanguageId::parse(""), None);
    }

    #[test]
    fn instruction_rendering() {
        assert_eq!(
            Instruction::copy(["Cargo.toml", "Cargo.lock*"], "./").to_string(),
            "COPY Cargo.toml Cargo.lock* ./"
        );
        assert_eq!(
            Instruction::run("cargo build --release").to_string(),
            "RUN cargo build --release"
        );
        assert_eq!(
            Instruction::env("PATH", "/opt/conda/bin:$PATH").to_string(),
            "ENV PATH=/opt/conda/bin:$PATH"
        );
        assert_eq!(
            Instruction::cmd(["./target/release/app"]).to_string(),
            "CMD [\"./target/release/app\"]"
        );
    }

    #[test]
    fn terminal_detection() {
        assert!(Instruction::cmd(["/bin/bash"]).is_terminal());
        assert!(!Instruction::run("npm ci").is_terminal());
    }
}
