//! basewright - repository toolchain inference and Dockerfile generation
//!
//! This library inspects a remote repository's root-level marker files,
//! infers its toolchain version and dependency-management convention, and
//! maps the result to an ordered list of provisioning instructions plus a
//! base-image tag — everything needed to emit a Dockerfile that can build
//! the repository in isolation.
//!
//! # Core Concepts
//!
//! - **File snapshot**: the subset of a repository's root directory matching
//!   a language's indicator filenames, mapped to raw content
//! - **Version resolution**: a fixed priority order of evidence sources per
//!   language, degrading tier by tier to a documented default
//! - **Build-type detection**: an ordered indicator-file table per language;
//!   the first match wins, no match is `Unknown`
//! - **Instruction generation**: build type → ordered provisioning template,
//!   encoding dependency-layer caching (manifests copied before source)
//!
//! # Example
//!
//! ```
//! use basewright::{Engine, FileSnapshot, LanguageId};
//!
//! let snapshot = FileSnapshot::from_files([
//!     ("go.mod", "module example.com/demo\n\ngo 1.21\n"),
//! ]);
//!
//! let environment = Engine::new().resolve(LanguageId::Go, &snapshot);
//! assert_eq!(environment.image_tag, "golang:1.21");
//! ```
//!
//! # Project Structure
//!
//! - [`languages`]: per-language backends and dispatch
//! - [`engine`]: the sequential resolution pipeline
//! - [`github`]: the remote file-index provider
//! - [`dockerfile`]: build-script rendering

pub mod cli;
pub mod config;
pub mod dockerfile;
pub mod engine;
pub mod github;
pub mod languages;
pub mod snapshot;
pub mod util;
pub mod version;

// Re-export key types for convenient access
pub use config::{ConfigError, RunConfig};
pub use engine::{Engine, EngineError, RepoContext, ResolvedEnvironment};
pub use github::{FileIndexProvider, GithubProvider, ProviderError};
pub use languages::{
    BuildType, Instruction, LanguageBackend, LanguageId, LanguageRegistry,
};
pub use snapshot::FileSnapshot;

/// Library version
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

/// Library name
pub const NAME: &str = env!("CARGO_PKG_NAME");

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_version_exists() {
        assert!(!VERSION.is_empty());
    }

    #[test]
    fn test_name_is_basewright() {
        assert_eq!(NAME, "basewright");
    }
}
