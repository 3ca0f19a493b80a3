//! JavaScript/Node language backend
//!
//! Version evidence: `.nvmrc` (leading `v` stripped), `.node-version`, then
//! the `engines.node` range in `package.json` via the compatibility selector.
//! Build detection prefers lockfiles over the bare manifest: pnpm, then yarn,
//! then npm — the order is load-bearing when multiple lockfiles are present.

use super::{BuildRule, BuildType, Instruction, LanguageBackend, LanguageId};
use crate::snapshot::FileSnapshot;
use crate::version::select_highest;

pub const SUPPORTED_NODE_VERSIONS: &[&str] = &["16", "18", "20", "21"];
pub const DEFAULT_NODE_VERSION: &str = "20";

const VERSION_FILES: &[&str] = &[".nvmrc", ".node-version", "package.json"];

const BUILD_RULES: &[BuildRule] = &[
    BuildRule {
        build_type: BuildType::Pnpm,
        indicators: &["pnpm-lock.yaml"],
    },
    BuildRule {
        build_type: BuildType::Yarn,
        indicators: &["yarn.lock"],
    },
    BuildRule {
        build_type: BuildType::Npm,
        indicators: &["package-lock.json", "package.json"],
    },
];

pub struct JavaScriptLanguage;

impl JavaScriptLanguage {
    fn from_nvmrc(snapshot: &FileSnapshot) -> Option<String> {
        let version = snapshot.content(".nvmrc")?.trim().trim_start_matches('v');
        if version.is_empty() {
            return None;
        }
        Some(version.to_string())
    }

    fn from_node_version_file(snapshot: &FileSnapshot) -> Option<String> {
        let version = snapshot.content(".node-version")?.trim();
        if version.is_empty() {
            return None;
        }
        Some(version.to_string())
    }

    fn from_package_json(snapshot: &FileSnapshot) -> Option<String> {
        let content = snapshot.content("package.json")?;
        let doc: serde_json::Value = serde_json::from_str(content).ok()?;
        let spec = doc.get("engines")?.get("node")?.as_str()?;
        select_highest(spec, SUPPORTED_NODE_VERSIONS)
    }
}

impl LanguageBackend for JavaScriptLanguage {
    fn id(&self) -> LanguageId {
        LanguageId::JavaScript
    }

    fn default_version(&self) -> &'static str {
        DEFAULT_NODE_VERSION
    }

    fn version_files(&self) -> &'static [&'static str] {
        VERSION_FILES
    }

    fn build_rules(&self) -> &'static [BuildRule] {
        BUILD_RULES
    }

    fn resolve_version(&self, snapshot: &FileSnapshot) -> String {
        Self::from_nvmrc(snapshot)
            .or_else(|| Self::from_node_version_file(snapshot))
            .or_else(|| Self::from_package_json(snapshot))
            .unwrap_or_else(|| DEFAULT_NODE_VERSION.to_string())
    }

    fn generate_instructions(
        &self,
        build_type: BuildType,
        _snapshot: &FileSnapshot,
    ) -> Vec<Instruction> {
        match build_type {
            BuildType::Pnpm => vec![
                Instruction::run("npm install -g pnpm"),
                Instruction::copy(["package.json", "pnpm-lock.yaml"], "./"),
                Instruction::run("pnpm install --frozen-lockfile"),
            ],
            BuildType::Yarn => vec![
                Instruction::copy(["package.json", "yarn.lock"], "./"),
                Instruction::run("yarn install --frozen-lockfile"),
            ],
            BuildType::Npm => vec![
                Instruction::copy(["package.json", "package-lock.json*"], "./"),
                Instruction::run("npm ci"),
            ],
            // Generic fallback when no lockfile convention was recognized.
            _ => vec![
                Instruction::copy(["package.json"], "./"),
                Instruction::run("npm install"),
            ],
        }
    }

    fn image_tag(&self, version: &str) -> String {
        format!("node:{}-slim", version)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn empty_snapshot_resolves_to_default_and_unknown() {
        let snapshot = FileSnapshot::new();
        assert_eq!(JavaScriptLanguage.resolve_version(&snapshot), "20");
        assert_eq!(
            JavaScriptLanguage.detect_build_type(&snapshot),
            BuildType::Unknown
        );
    }

    #[test]
    fn nvmrc_strips_leading_v() {
        let snapshot = FileSnapshot::from_files([(".nvmrc", "v18.19.0\n")]);
        assert_eq!(JavaScriptLanguage.resolve_version(&snapshot), "18.19.0");
    }

    #[test]
    fn nvmrc_wins_over_node_version_file() {
        let snapshot =
            FileSnapshot::from_files([(".nvmrc", "21\n"), (".node-version", "16.20.0\n")]);
        assert_eq!(JavaScriptLanguage.resolve_version(&snapshot), "21");
    }

    #[test]
    fn engines_node_goes_through_selector() {
        let snapshot = FileSnapshot::from_files([(
            "package.json",
            r#"{"name": "demo", "engines": {"node": ">=18"}}"#,
        )]);
        assert_eq!(JavaScriptLanguage.resolve_version(&snapshot), "21");
    }

    #[test]
    fn malformed_package_json_is_a_tier_miss() {
        let snapshot = FileSnapshot::from_files([("package.json", "{not json")]);
        assert_eq!(JavaScriptLanguage.resolve_version(&snapshot), "20");
    }

    #[test]
    fn pnpm_lockfile_beats_npm_lockfile() {
        // Regression guard: the index order (pnpm, yarn, npm) is part of the
        // engine's documented behavior.
        let snapshot = FileSnapshot::from_files([
            ("package-lock.json", "{}"),
            ("pnpm-lock.yaml", ""),
            ("package.json", "{}"),
        ]);
        assert_eq!(
            JavaScriptLanguage.detect_build_type(&snapshot),
            BuildType::Pnpm
        );
    }

    #[test]
    fn yarn_beats_npm() {
        let snapshot =
            FileSnapshot::from_files([("yarn.lock", ""), ("package-lock.json", "{}")]);
        assert_eq!(
            JavaScriptLanguage.detect_build_type(&snapshot),
            BuildType::Yarn
        );
    }

    #[test]
    fn bare_manifest_is_npm() {
        let snapshot = FileSnapshot::from_files([("package.json", "{}")]);
        assert_eq!(
            JavaScriptLanguage.detect_build_type(&snapshot),
            BuildType::Npm
        );
    }

    #[test]
    fn npm_instructions_use_ci() {
        let instructions =
            JavaScriptLanguage.generate_instructions(BuildType::Npm, &FileSnapshot::new());
        assert_eq!(
            instructions[0].to_string(),
            "COPY package.json package-lock.json* ./"
        );
        assert_eq!(instructions[1].to_string(), "RUN npm ci");
    }

    #[test]
    fn unknown_falls_back_to_plain_install() {
        let instructions =
            JavaScriptLanguage.generate_instructions(BuildType::Unknown, &FileSnapshot::new());
        assert_eq!(instructions[1].to_string(), "RUN npm install");
    }

    #[test]
    fn image_tag_is_slim() {
        assert_eq!(JavaScriptLanguage.image_tag("20"), "node:20-slim");
    }
}
