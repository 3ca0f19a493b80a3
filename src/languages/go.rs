//! Go language backend
//!
//! Version evidence is the `go` directive in `go.mod`, then `go.work`. Build
//! detection recognizes the historical tooling (dep, glide, vendored trees)
//! for reporting, but instruction generation is deliberately build-type
//! invariant: Go tooling is modules-only in practice, and the modules
//! sequence is emitted for every detected type.

use super::{BuildRule, BuildType, Instruction, LanguageBackend, LanguageId};
use crate::snapshot::FileSnapshot;
use regex::Regex;

pub const DEFAULT_GO_VERSION: &str = "1.22";

const VERSION_FILES: &[&str] = &["go.mod", "go.work"];

const BUILD_RULES: &[BuildRule] = &[
    BuildRule {
        build_type: BuildType::GoModules,
        indicators: &["go.mod"],
    },
    BuildRule {
        build_type: BuildType::Dep,
        indicators: &["Gopkg.toml"],
    },
    BuildRule {
        build_type: BuildType::Glide,
        indicators: &["glide.yaml"],
    },
    // "vendor" is a root-level directory, not a file.
    BuildRule {
        build_type: BuildType::Vendor,
        indicators: &["vendor"],
    },
];

pub struct GoLanguage;

impl GoLanguage {
    fn go_directive(content: &str) -> Option<String> {
        let re = Regex::new(r"(?m)^go\s+([\d.]+)").expect("valid regex");
        re.captures(content).map(|c| c[1].to_string())
    }
}

impl LanguageBackend for GoLanguage {
    fn id(&self) -> LanguageId {
        LanguageId::Go
    }

    fn default_version(&self) -> &'static str {
        DEFAULT_GO_VERSION
    }

    fn version_files(&self) -> &'static [&'static str] {
        VERSION_FILES
    }

    fn build_rules(&self) -> &'static [BuildRule] {
        BUILD_RULES
    }

    fn resolve_version(&self, snapshot: &FileSnapshot) -> String {
        snapshot
            .content("go.mod")
            .and_then(Self::go_directive)
            .or_else(|| snapshot.content("go.work").and_then(Self::go_directive))
            .unwrap_or_else(|| DEFAULT_GO_VERSION.to_string())
    }

    /// Always the modules-based sequence, regardless of `build_type`.
    fn generate_instructions(
        &self,
        _build_type: BuildType,
        _snapshot: &FileSnapshot,
    ) -> Vec<Instruction> {
        vec![
            Instruction::copy(["go.mod", "go.sum*"], "./"),
            Instruction::run("go mod download"),
            Instruction::copy(["."], "."),
            Instruction::run("go build -o app"),
            Instruction::cmd(["./app"]),
        ]
    }

    fn image_tag(&self, version: &str) -> String {
        format!("golang:{}", version)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn empty_snapshot_resolves_to_default_and_unknown() {
        let snapshot = FileSnapshot::new();
        assert_eq!(GoLanguage.resolve_version(&snapshot), "1.22");
        assert_eq!(GoLanguage.detect_build_type(&snapshot), BuildType::Unknown);
    }

    #[test]
    fn go_mod_directive() {
        let snapshot =
            FileSnapshot::from_files([("go.mod", "module example.com/demo\n\ngo 1.21.5\n")]);
        assert_eq!(GoLanguage.resolve_version(&snapshot), "1.21.5");
    }

    #[test]
    fn go_work_is_second_tier() {
        let snapshot = FileSnapshot::from_files([("go.work", "go 1.20\n\nuse ./demo\n")]);
        assert_eq!(GoLanguage.resolve_version(&snapshot), "1.20");
    }

    #[test]
    fn go_mod_without_directive_falls_through() {
        let snapshot = FileSnapshot::from_files([
            ("go.mod", "module example.com/demo\n"),
            ("go.work", "go 1.19\n"),
        ]);
        assert_eq!(GoLanguage.resolve_version(&snapshot), "1.19");
    }

    #[test]
    fn module_name_line_is_not_a_version() {
        // The directive must start the line; "go " inside the module path
        // does not count.
        let snapshot =
            FileSnapshot::from_files([("go.mod", "module example.com/go 1.18/demo\n")]);
        assert_eq!(GoLanguage.resolve_version(&snapshot), "1.22");
    }

    #[test]
    fn vendor_directory_detection() {
        let mut snapshot = FileSnapshot::new();
        snapshot.insert_dir("vendor");
        assert_eq!(GoLanguage.detect_build_type(&snapshot), BuildType::Vendor);
    }

    #[test]
    fn go_mod_beats_legacy_tooling() {
        let mut snapshot = FileSnapshot::from_files([("go.mod", "go 1.22\n"), ("Gopkg.toml", "")]);
        snapshot.insert_dir("vendor");
        assert_eq!(
            GoLanguage.detect_build_type(&snapshot),
            BuildType::GoModules
        );
    }

    #[test]
    fn instructions_are_build_type_invariant() {
        let snapshot = FileSnapshot::new();
        let modules = GoLanguage.generate_instructions(BuildType::GoModules, &snapshot);
        let glide = GoLanguage.generate_instructions(BuildType::Glide, &snapshot);
        let unknown = GoLanguage.generate_instructions(BuildType::Unknown, &snapshot);
        assert_eq!(modules, glide);
        assert_eq!(modules, unknown);
        assert_eq!(modules.last().unwrap().to_string(), "CMD [\"./app\"]");
    }

    #[test]
    fn image_tag_has_no_suffix() {
        assert_eq!(GoLanguage.image_tag("1.22"), "golang:1.22");
    }
}
