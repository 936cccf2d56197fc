//! Configuration and decoder factory.

use std::collections::HashMap;
use std::path::{Path, PathBuf};
use std::sync::Arc;

use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};

use bloomscope_core::engine::AnalysisEngineConfig;
use bloomscope_core::error::ClassifyError;
use bloomscope_core::traits::{DocumentDecoder, DocumentFormat};

use crate::csv::CsvQuestionDecoder;
use crate::text::PlainTextDecoder;

/// Top-level bloomscope configuration.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct BloomscopeConfig {
    /// Max documents analysed concurrently.
    #[serde(default = "default_parallelism")]
    pub parallelism: usize,
    /// Output directory for reports.
    #[serde(default = "default_output_dir")]
    pub output_dir: PathBuf,
    /// Report formats written by `analyze` (json, html, csv).
    #[serde(default = "default_formats")]
    pub formats: Vec<String>,
    /// Upload size limit in bytes.
    #[serde(default = "default_max_document_bytes")]
    pub max_document_bytes: usize,
    /// Formats accepted as input.
    #[serde(default = "default_allowed_formats")]
    pub allowed_formats: Vec<DocumentFormat>,
}

fn default_parallelism() -> usize {
    4
}
fn default_output_dir() -> PathBuf {
    PathBuf::from("./bloomscope-results")
}
fn default_formats() -> Vec<String> {
    vec!["json".to_string()]
}
fn default_max_document_bytes() -> usize {
    16 * 1024 * 1024
}
fn default_allowed_formats() -> Vec<DocumentFormat> {
    vec![
        DocumentFormat::Text,
        DocumentFormat::Csv,
        DocumentFormat::Pdf,
        DocumentFormat::Docx,
        DocumentFormat::Doc,
    ]
}

impl Default for BloomscopeConfig {
    fn default() -> Self {
        Self {
            parallelism: default_parallelism(),
            output_dir: default_output_dir(),
            formats: default_formats(),
            max_document_bytes: default_max_document_bytes(),
            allowed_formats: default_allowed_formats(),
        }
    }
}

impl BloomscopeConfig {
    pub fn engine_config(&self) -> AnalysisEngineConfig {
        AnalysisEngineConfig {
            parallelism: self.parallelism,
            max_document_bytes: self.max_document_bytes,
        }
    }

    pub fn is_allowed(&self, format: DocumentFormat) -> bool {
        self.allowed_formats.contains(&format)
    }
}

/// Resolve environment variable references like `${VAR_NAME}` in a string.
fn resolve_env_vars(s: &str) -> String {
    let mut result = String::with_capacity(s.len());
    let mut rest = s;
    while let Some(start) = rest.find("${") {
        let Some(end) = rest[start..].find('}') else {
            break;
        };
        let var_name = &rest[start + 2..start + end];
        result.push_str(&rest[..start]);
        // substituted values are not rescanned
        result.push_str(&std::env::var(var_name).unwrap_or_default());
        rest = &rest[start + end + 1..];
    }
    result.push_str(rest);
    result
}

/// Load configuration from well-known paths.
///
/// Search order:
/// 1. `bloomscope.toml` in the current directory
/// 2. `~/.config/bloomscope/config.toml`
///
/// `BLOOMSCOPE_OUTPUT_DIR` overrides the output directory.
pub fn load_config() -> Result<BloomscopeConfig> {
    load_config_from(None)
}

/// Load config from an explicit path, or search the default locations.
pub fn load_config_from(path: Option<&Path>) -> Result<BloomscopeConfig> {
    let config_path = if let Some(p) = path {
        if p.exists() {
            Some(p.to_path_buf())
        } else {
            anyhow::bail!("config file not found: {}", p.display());
        }
    } else {
        let local = PathBuf::from("bloomscope.toml");
        if local.exists() {
            Some(local)
        } else {
            dirs_path()
                .map(|home| home.join("config.toml"))
                .filter(|global| global.exists())
        }
    };

    let mut config = match config_path {
        Some(path) => {
            let content = std::fs::read_to_string(&path)
                .with_context(|| format!("failed to read config: {}", path.display()))?;
            tracing::debug!("loaded config from {}", path.display());
            toml::from_str::<BloomscopeConfig>(&content)
                .with_context(|| format!("failed to parse config: {}", path.display()))?
        }
        None => BloomscopeConfig::default(),
    };

    if let Ok(dir) = std::env::var("BLOOMSCOPE_OUTPUT_DIR") {
        config.output_dir = PathBuf::from(dir);
    }

    config.output_dir = PathBuf::from(resolve_env_vars(&config.output_dir.to_string_lossy()));
    config.formats = config
        .formats
        .iter()
        .map(|f| resolve_env_vars(f).trim().to_lowercase())
        .collect();

    anyhow::ensure!(config.parallelism >= 1, "parallelism must be at least 1");

    Ok(config)
}

fn dirs_path() -> Option<PathBuf> {
    std::env::var("HOME")
        .ok()
        .map(|h| PathBuf::from(h).join(".config").join("bloomscope"))
}

/// Create the decoder for `format`.
///
/// Binary office formats are recognised but must be converted to text or
/// CSV by an external tool first.
pub fn create_decoder(format: DocumentFormat) -> Result<Box<dyn DocumentDecoder>, ClassifyError> {
    match format {
        DocumentFormat::Text => Ok(Box::new(PlainTextDecoder::new())),
        DocumentFormat::Csv => Ok(Box::new(CsvQuestionDecoder::new())),
        other => Err(ClassifyError::unreadable(
            other.to_string(),
            "no built-in decoder; convert the document to .txt or .csv first",
        )),
    }
}

/// Decoders for every allowed format that has one.
pub fn decoder_registry(
    config: &BloomscopeConfig,
) -> HashMap<DocumentFormat, Arc<dyn DocumentDecoder>> {
    let mut decoders: HashMap<DocumentFormat, Arc<dyn DocumentDecoder>> = HashMap::new();
    for &format in &config.allowed_formats {
        match create_decoder(format) {
            Ok(decoder) => {
                decoders.insert(format, Arc::from(decoder));
            }
            Err(e) => tracing::debug!("{e}"),
        }
    }
    decoders
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn resolve_env_vars_basic() {
        std::env::set_var("_BLOOMSCOPE_TEST_VAR", "hello");
        assert_eq!(resolve_env_vars("${_BLOOMSCOPE_TEST_VAR}"), "hello");
        assert_eq!(
            resolve_env_vars("prefix_${_BLOOMSCOPE_TEST_VAR}_suffix"),
            "prefix_hello_suffix"
        );
        std::env::remove_var("_BLOOMSCOPE_TEST_VAR");
    }

    #[test]
    fn resolve_env_vars_does_not_expand_values() {
        std::env::set_var("_BLOOMSCOPE_SELF_REF", "${_BLOOMSCOPE_SELF_REF}");
        assert_eq!(
            resolve_env_vars("out/${_BLOOMSCOPE_SELF_REF}/x"),
            "out/${_BLOOMSCOPE_SELF_REF}/x"
        );
        assert_eq!(resolve_env_vars("${_BLOOMSCOPE_UNSET_VAR}-a"), "-a");
        assert_eq!(resolve_env_vars("keep ${unterminated"), "keep ${unterminated");
        std::env::remove_var("_BLOOMSCOPE_SELF_REF");
    }

    #[test]
    fn default_config() {
        let config = BloomscopeConfig::default();
        assert_eq!(config.parallelism, 4);
        assert_eq!(config.formats, vec!["json"]);
        assert_eq!(config.max_document_bytes, 16 * 1024 * 1024);
        assert!(config.is_allowed(DocumentFormat::Pdf));
        assert!(!config.is_allowed(DocumentFormat::Xlsx));
    }

    #[test]
    fn parse_config_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("bloomscope.toml");
        std::fs::write(
            &path,
            r#"
parallelism = 2
output_dir = "reports"
formats = ["JSON", "html"]
allowed_formats = ["txt", "csv"]
"#,
        )
        .unwrap();

        let config = load_config_from(Some(&path)).unwrap();
        assert_eq!(config.parallelism, 2);
        assert_eq!(config.formats, vec!["json", "html"]);
        assert_eq!(
            config.allowed_formats,
            vec![DocumentFormat::Text, DocumentFormat::Csv]
        );
        assert_eq!(config.max_document_bytes, 16 * 1024 * 1024);
    }

    #[test]
    fn zero_parallelism_is_rejected() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("bloomscope.toml");
        std::fs::write(&path, "parallelism = 0\n").unwrap();
        assert!(load_config_from(Some(&path)).is_err());
    }

    #[test]
    fn missing_explicit_config_fails() {
        let result = load_config_from(Some(Path::new("/nonexistent/bloomscope.toml")));
        assert!(result.is_err());
    }

    #[test]
    fn registry_only_holds_decodable_formats() {
        let registry = decoder_registry(&BloomscopeConfig::default());
        assert!(registry.contains_key(&DocumentFormat::Text));
        assert!(registry.contains_key(&DocumentFormat::Csv));
        assert!(!registry.contains_key(&DocumentFormat::Pdf));
    }

    #[test]
    fn binary_formats_have_no_decoder() {
        let err = create_decoder(DocumentFormat::Docx).err().unwrap();
        assert!(err.to_string().contains("docx"));
    }
}
