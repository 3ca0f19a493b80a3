//! Rust language backend
//!
//! Version evidence: `rust-toolchain.toml` (`[toolchain] channel`), the bare
//! `rust-toolchain` file, then `Cargo.toml`'s `[package] rust-version`. The
//! manifest value is a minimum floor, not a range: the highest supported
//! toolchain at or above it is selected. The default is the "stable" channel
//! rather than a numeric version.
//!
//! The generated sequence warms the dependency cache with a dummy
//! `src/main.rs` build before copying the real source, so source-only changes
//! do not invalidate the dependency layer. The terminal command runs the
//! binary named in `Cargo.toml` ("app" when absent).

use super::{BuildRule, BuildType, Instruction, LanguageBackend, LanguageId};
use crate::snapshot::FileSnapshot;
use crate::version::select_floor;
use regex::Regex;

pub const SUPPORTED_RUST_VERSIONS: &[&str] = &["1.70", "1.71", "1.72", "1.73", "1.74", "1.75"];
pub const DEFAULT_RUST_VERSION: &str = "stable";

/// Binary name used when no `Cargo.toml` package name can be extracted.
pub const DEFAULT_BINARY_NAME: &str = "app";

const VERSION_FILES: &[&str] = &["rust-toolchain.toml", "rust-toolchain", "Cargo.toml"];

const BUILD_RULES: &[BuildRule] = &[BuildRule {
    build_type: BuildType::Cargo,
    indicators: &["Cargo.toml"],
}];

pub struct RustLanguage;

impl RustLanguage {
    fn from_toolchain_toml(snapshot: &FileSnapshot) -> Option<String> {
        let content = snapshot.content("rust-toolchain.toml")?;
        let doc: toml::Value = content.parse().ok()?;
        let channel = doc.get("toolchain")?.get("channel")?.as_str()?;
        Some(channel.to_string())
    }

    fn from_toolchain_file(snapshot: &FileSnapshot) -> Option<String> {
        let version = snapshot.content("rust-toolchain")?.trim();
        if version.is_empty() {
            return None;
        }
        Some(version.to_string())
    }

    fn from_cargo_toml(snapshot: &FileSnapshot) -> Option<String> {
        let content = snapshot.content("Cargo.toml")?;
        let doc: toml::Value = content.parse().ok()?;
        let floor = doc.get("package")?.get("rust-version")?.as_str()?;
        select_floor(floor, SUPPORTED_RUST_VERSIONS)
    }

    /// Package name from `Cargo.toml`, for the terminal run directive.
    fn binary_name(snapshot: &FileSnapshot) -> String {
        let name = snapshot.content("Cargo.toml").and_then(|content| {
            let re = Regex::new(r#"(?m)^name\s*=\s*"([^"]+)""#).expect("valid regex");
            re.captures(content).map(|c| c[1].to_string())
        });
        name.unwrap_or_else(|| DEFAULT_BINARY_NAME.to_string())
    }
}

impl LanguageBackend for RustLanguage {
    fn id(&self) -> LanguageId {
        LanguageId::Rust
    }

    fn default_version(&self) -> &'static str {
        DEFAULT_RUST_VERSION
    }

    fn version_files(&self) -> &'static [&'static str] {
        VERSION_FILES
    }

    fn build_rules(&self) -> &'static [BuildRule] {
        BUILD_RULES
    }

    fn resolve_version(&self, snapshot: &FileSnapshot) -> String {
        Self::from_toolchain_toml(snapshot)
            .or_else(|| Self::from_toolchain_file(snapshot))
            .or_else(|| Self::from_cargo_toml(snapshot))
            .unwrap_or_else(|| DEFAULT_RUST_VERSION.to_string())
    }

    /// The cargo two-phase sequence is emitted for every build type; the
    /// snapshot only influences the binary name in the terminal command.
    fn generate_instructions(
        &self,
        _build_type: BuildType,
        snapshot: &FileSnapshot,
    ) -> Vec<Instruction> {
        let binary = Self::binary_name(snapshot);
        vec![
            Instruction::copy(["Cargo.toml", "Cargo.lock*"], "./"),
            // Dummy build caches the dependency layer.
            Instruction::run("mkdir -p src && echo 'fn main() {}' > src/main.rs"),
            Instruction::run("cargo build --release"),
            Instruction::run("rm -rf src"),
            Instruction::copy(["."], "."),
            Instruction::run("cargo build --release"),
            Instruction::cmd([format!("./target/release/{}", binary)]),
        ]
    }

    fn image_tag(&self, version: &str) -> String {
        format!("rust:{}", version)
    }
}
