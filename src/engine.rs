//! Resolution pipeline
//!
//! One sequential, side-effect-free pass per repository: dispatch on the
//! language tag, resolve the toolchain version, format the base-image tag,
//! classify the build type, generate the instruction sequence. The engine is
//! synchronous and holds no mutable state; the static per-language tables are
//! safe for concurrent readers if a caller resolves repositories in parallel.

use crate::languages::{BuildType, Instruction, LanguageId, LanguageRegistry};
use crate::snapshot::FileSnapshot;
use serde::Serialize;
use thiserror::Error;
use tracing::debug;

/// Errors surfaced by the engine. Evidence-tier misses and unmatched
/// constraints are absorbed inside resolution and never appear here.
#[derive(Debug, Error)]
pub enum EngineError {
    /// The language tag is outside the supported set. Not defaulted: there is
    /// no sensible toolchain to guess.
    #[error("unsupported language: {0} (supported: python, javascript, go, rust)")]
    UnsupportedLanguage(String),
}

/// Outcome of one resolution pass.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ResolvedEnvironment {
    pub language: LanguageId,
    pub version: String,
    pub image_tag: String,
    pub build_type: BuildType,
    pub instructions: Vec<Instruction>,
}

/// Convenience aggregate tying a resolution to its repository, for callers
/// running the end-to-end flow.
#[derive(Debug, Clone, Serialize)]
pub struct RepoContext {
    pub repo_url: String,
    pub repo_name: String,
    #[serde(flatten)]
    pub environment: ResolvedEnvironment,
}

/// The version/build-type resolution engine.
#[derive(Clone, Default)]
pub struct Engine {
    registry: LanguageRegistry,
}

impl Engine {
    pub fn new() -> Self {
        Self {
            registry: LanguageRegistry::with_defaults(),
        }
    }

    pub fn registry(&self) -> &LanguageRegistry {
        &self.registry
    }

    /// Resolves from a raw language tag. Unrecognized tags are a hard error.
    pub fn resolve_tag(
        &self,
        tag: &str,
        snapshot: &FileSnapshot,
    ) -> Result<ResolvedEnvironment, EngineError> {
        let id = LanguageId::parse(tag)
            .ok_or_else(|| EngineError::UnsupportedLanguage(tag.to_string()))?;
        Ok(self.resolve(id, snapshot))
    }

    /// Resolves a snapshot for a known language. Never fails.
    pub fn resolve(&self, id: LanguageId, snapshot: &FileSnapshot) -> ResolvedEnvironment {
        let backend = self.registry.backend(id);

        let version = backend.resolve_version(snapshot);
        let image_tag = backend.image_tag(&version);
        let build_type = backend.detect_build_type(snapshot);
        let instructions = backend.generate_instructions(build_type, snapshot);

        debug!(
            language = %id,
            %version,
            %image_tag,
            build_type = %build_type,
            steps = instructions.len(),
            "resolved environment"
        );

        ResolvedEnvironment {
            language: id,
            version,
            image_tag,
            build_type,
            instructions,
        }
    }
}
