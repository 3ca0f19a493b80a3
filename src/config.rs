//! Run configuration
//!
//! Declarative YAML record naming the repository and its language, loaded
//! once at process start:
//!
//! ```yaml
//! repository:
//!   url: https://github.com/pallets/flask
//!   name: flask
//! type: python
//! output: Dockerfile   # optional
//! ```

use serde::Deserialize;
use std::fs;
use std::path::{Path, PathBuf};
use thiserror::Error;

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("failed to read config file {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("failed to parse config file {path}: {source}")]
    Parse {
        path: PathBuf,
        #[source]
        source: serde_yaml::Error,
    },

    #[error("invalid config: {0}")]
    Invalid(String),
}

#[derive(Debug, Clone, Deserialize)]
pub struct RepositorySection {
    pub url: String,
    pub name: String,
}

#[derive(Debug, Clone, Deserialize)]
pub struct RunConfig {
    pub repository: RepositorySection,

    /// Language tag; validated by the engine's dispatch, not here.
    #[serde(rename = "type")]
    pub language: String,

    #[serde(default = "default_output")]
    pub output: PathBuf,
}

fn default_output() -> PathBuf {
    PathBuf::from("Dockerfile")
}

impl RunConfig {
    /// Loads and validates a config file.
    pub fn load(path: &Path) -> Result<Self, ConfigError> {
        let content = fs::read_to_string(path).map_err(|source| ConfigError::Io {
            path: path.to_path_buf(),
            source,
        })?;
        let config: Self =
            serde_yaml::from_str(&content).map_err(|source| ConfigError::Parse {
                path: path.to_path_buf(),
                source,
            })?;
        config.validate()?;
        Ok(config)
    }

    fn validate(&self) -> Result<(), ConfigError> {
        if self.repository.url.trim().is_empty() {
            return Err(ConfigError::Invalid("repository.url is empty".to_string()));
        }
        if self.repository.name.trim().is_empty() {
            return Err(ConfigError::Invalid("repository.name is empty".to_string()));
        }
        if self.language.trim().is_empty() {
            return Err(ConfigError::Invalid("type is empty".to_string()));
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    fn write_config(content: &str) -> tempfile::NamedTempFile {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        file.write_all(content.as_bytes()).unwrap();
        file
    }

    #[test]
    fn loads_full_config() {
        let file = write_config(
            "repository:\n  url: https://github.com/pallets/flask\n  name: flask\ntype: python\noutput: out/Dockerfile\n",
        );
        let config = RunConfig::load(file.path()).unwrap();
        assert_eq!(config.repository.name, "flask");
        assert_eq!(config.language, "python");
        assert_eq!(config.output, PathBuf::from("out/Dockerfile"));
    }

    #[test]
    fn output_defaults_to_dockerfile() {
        let file = write_config(
            "repository:\n  url: https://github.com/owner/repo\n  name: repo\ntype: go\n",
        );
        let config = RunConfig::load(file.path()).unwrap();
        assert_eq!(config.output, PathBuf::from("Dockerfile"));
    }

    #[test]
    fn empty_fields_are_rejected() {
        let file = write_config("repository:\n  url: \"\"\n  name: repo\ntype: go\n");
        assert!(matches!(
            RunConfig::load(file.path()),
            Err(ConfigError::Invalid(_))
        ));
    }

    #[test]
    fn malformed_yaml_is_a_parse_error() {
        let file = write_config("repository: [not a mapping\n");
        assert!(matches!(
            RunConfig::load(file.path()),
            Err(ConfigError::Parse { .. })
        ));
    }
}
