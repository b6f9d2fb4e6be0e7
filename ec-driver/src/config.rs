//! Driver configuration: an optional JSON file, overridden by flags

use anyhow::{Context, Result};
use ec_common::error::DEFAULT_ERROR_LIMIT;
use ec_frontend::{CodegenConfig, ParserConfig};
use serde::{Deserialize, Serialize};
use std::path::Path;

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct DriverConfig {
    /// C compiler used by `ec build`
    pub cc: String,
    /// Extra arguments passed to the C compiler
    pub cflags: Vec<String>,
    pub max_errors: usize,
    pub indent_width: usize,
    pub emit_prototypes: bool,
}

impl Default for DriverConfig {
    fn default() -> Self {
        let codegen = CodegenConfig::default();
        Self {
            cc: "cc".to_string(),
            cflags: Vec::new(),
            max_errors: DEFAULT_ERROR_LIMIT,
            indent_width: codegen.indent_width,
            emit_prototypes: codegen.emit_prototypes,
        }
    }
}

impl DriverConfig {
    pub fn load(path: &Path) -> Result<Self> {
        let text = std::fs::read_to_string(path)
            .with_context(|| format!("Failed to read config file {}", path.display()))?;
        let config = serde_json::from_str(&text)
            .with_context(|| format!("Invalid config file {}", path.display()))?;
        log::debug!("loaded config from {}: {:?}", path.display(), config);
        Ok(config)
    }

    /// Defaults, then the file if one is given
    pub fn resolve(path: Option<&Path>) -> Result<Self> {
        match path {
            Some(path) => Self::load(path),
            None => Ok(Self::default()),
        }
    }

    pub fn parser_config(&self) -> ParserConfig {
        ParserConfig {
            max_errors: self.max_errors,
        }
    }

    pub fn codegen_config(&self) -> CodegenConfig {
        CodegenConfig {
            indent_width: self.indent_width,
            emit_prototypes: self.emit_prototypes,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    #[test]
    fn test_partial_file_keeps_defaults() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        write!(file, r#"{{ "cc": "clang", "cflags": ["-O2"] }}"#).unwrap();

        let config = DriverConfig::load(file.path()).unwrap();
        assert_eq!(config.cc, "clang");
        assert_eq!(config.cflags, vec!["-O2".to_string()]);
        assert_eq!(config.max_errors, DEFAULT_ERROR_LIMIT);
        assert_eq!(config.codegen_config(), CodegenConfig::default());
    }

    #[test]
    fn test_invalid_file_is_an_error() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        write!(file, "not json").unwrap();
        let err = DriverConfig::load(file.path()).unwrap_err();
        assert!(err.to_string().starts_with("Invalid config file"));
    }

    #[test]
    fn test_no_file_means_defaults() {
        assert_eq!(DriverConfig::resolve(None).unwrap(), DriverConfig::default());
    }
}
