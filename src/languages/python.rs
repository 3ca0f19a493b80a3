//! Python language backend
//!
//! Version evidence tiers, highest precedence first: `.python-version`,
//! `runtime.txt`, `pyproject.toml` (PEP 621 `requires-python`, then Poetry's
//! `tool.poetry.dependencies.python`), `Pipfile` `[requires]`, `setup.py`
//! `python_requires`. Constraint-style tiers go through the compatibility
//! selector against the supported version set; anything malformed is a tier
//! miss, never an error.

use super::{BuildRule, BuildType, Instruction, LanguageBackend, LanguageId};
use crate::snapshot::FileSnapshot;
use crate::version::select_highest;
use regex::Regex;

pub const SUPPORTED_PYTHON_VERSIONS: &[&str] = &["3.8", "3.9", "3.10", "3.11", "3.12"];
pub const DEFAULT_PYTHON_VERSION: &str = "3.11";

const VERSION_FILES: &[&str] = &[
    ".python-version",
    "runtime.txt",
    "pyproject.toml",
    "Pipfile",
    "setup.py",
];

const BUILD_RULES: &[BuildRule] = &[
    BuildRule {
        build_type: BuildType::Pyproject,
        indicators: &["pyproject.toml"],
    },
    BuildRule {
        build_type: BuildType::Setup,
        indicators: &["setup.py"],
    },
    BuildRule {
        build_type: BuildType::Requirements,
        indicators: &["requirements.txt"],
    },
    BuildRule {
        build_type: BuildType::Pipfile,
        indicators: &["Pipfile"],
    },
    BuildRule {
        build_type: BuildType::Conda,
        indicators: &["environment.yml", "environment.yaml"],
    },
];

pub struct PythonLanguage;

impl PythonLanguage {
    fn from_version_file(snapshot: &FileSnapshot) -> Option<String> {
        let version = snapshot.content(".python-version")?.trim();
        if version.is_empty() {
            return None;
        }
        Some(version.to_string())
    }

    fn from_runtime_txt(snapshot: &FileSnapshot) -> Option<String> {
        let content = snapshot.content("runtime.txt")?;
        let re = Regex::new(r"python-?([\d.]+)").expect("valid regex");
        re.captures(content).map(|c| c[1].to_string())
    }

    fn from_pyproject(snapshot: &FileSnapshot) -> Option<String> {
        let content = snapshot.content("pyproject.toml")?;
        let doc: toml::Value = content.parse().ok()?;

        // PEP 621
        if let Some(spec) = doc
            .get("project")
            .and_then(|p| p.get("requires-python"))
            .and_then(|v| v.as_str())
        {
            if let Some(version) = select_highest(spec, SUPPORTED_PYTHON_VERSIONS) {
                return Some(version);
            }
        }

        // Poetry
        let spec = doc
            .get("tool")
            .and_then(|t| t.get("poetry"))
            .and_then(|p| p.get("dependencies"))
            .and_then(|d| d.get("python"))
            .and_then(|v| v.as_str())?;
        select_highest(spec, SUPPORTED_PYTHON_VERSIONS)
    }

    fn from_pipfile(snapshot: &FileSnapshot) -> Option<String> {
        let content = snapshot.content("Pipfile")?;
        let doc: toml::Value = content.parse().ok()?;
        let version = doc
            .get("requires")
            .and_then(|r| r.get("python_version"))
            .and_then(|v| v.as_str())?;
        Some(version.to_string())
    }

    fn from_setup_py(snapshot: &FileSnapshot) -> Option<String> {
        let content = snapshot.content("setup.py")?;
        let re = Regex::new(r#"python_requires\s*=\s*"([^"]+)""#).expect("valid regex");
        let spec = re.captures(content)?;
        select_highest(&spec[1], SUPPORTED_PYTHON_VERSIONS)
    }
}

impl LanguageBackend for PythonLanguage {
    fn id(&self) -> LanguageId {
        LanguageId::Python
    }

    fn default_version(&self) -> &'static str {
        DEFAULT_PYTHON_VERSION
    }

    fn version_files(&self) -> &'static [&'static str] {
        VERSION_FILES
    }

    fn build_rules(&self) -> &'static [BuildRule] {
        BUILD_RULES
    }

    fn resolve_version(&self, snapshot: &FileSnapshot) -> String {
        Self::from_version_file(snapshot)
            .or_else(|| Self::from_runtime_txt(snapshot))
            .or_else(|| Self::from_pyproject(snapshot))
            .or_else(|| Self::from_pipfile(snapshot))
            .or_else(|| Self::from_setup_py(snapshot))
            .unwrap_or_else(|| DEFAULT_PYTHON_VERSION.to_string())
    }

    fn generate_instructions(
        &self,
        build_type: BuildType,
        _snapshot: &FileSnapshot,
    ) -> Vec<Instruction> {
        match build_type {
            BuildType::Requirements => vec![
                Instruction::copy(["requirements.txt"], "."),
                Instruction::run("pip install --no-cache-dir -r requirements.txt"),
            ],
            BuildType::Pyproject => vec![
                Instruction::copy(["pyproject.toml"], "."),
                Instruction::run("pip install uv"),
                Instruction::run("uv sync"),
            ],
            BuildType::Pipfile => vec![
                Instruction::copy(["Pipfile", "Pipfile.lock*"], "."),
                Instruction::run("pip install pipenv"),
                Instruction::run("pipenv install --system --deploy"),
            ],
            BuildType::Conda => vec![
                Instruction::copy(["environment.yml"], "."),
                Instruction::run("apt-get update && apt-get install -y curl"),
                Instruction::run(
                    "curl -sL https://repo.anaconda.com/miniconda.sh -o miniconda.sh",
                ),
                Instruction::run("bash miniconda.sh -b -p /opt/conda"),
                Instruction::env("PATH", "/opt/conda/bin:$PATH"),
                Instruction::run("conda env update -f environment.yml"),
            ],
            // Setup, and the generic fallback for anything unclassified.
            _ => vec![
                Instruction::copy(["."], "."),
                Instruction::run("pip install ."),
            ],
        }
    }

    fn image_tag(&self, version: &str) -> String {
        format!("python:{}-slim", version)
    }
}
