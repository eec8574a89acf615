//! Configuration loading from logmeta.toml and rule parameter resolution.
//!
//! Three layers feed the check:
//! - [`LoggerConfig`]: what the host's logging backend declares (its metadata allow-list)
//! - [`RuleParams`]: operator overrides for this rule
//! - [`CheckConfig`]: the resolved, read-only view the traversal consumes
//!
//! Resolution happens once per run in [`CheckConfig::resolve`], never inside the traversal.

use serde::{Deserialize, Serialize};
use std::collections::BTreeSet;
use std::{fs, path::Path};

use crate::error::{LogmetaError, LogmetaResult};

/// Name of the optional configuration file at the analysed root.
pub const CONFIG_FILE: &str = "logmeta.toml";

/// Module whose functions are logging calls.
pub const DEFAULT_LOGGER_MODULE: &str = "Logger";

/// Logging functions the rule recognizes. Fixed, not user-extensible.
pub const LOGGER_FUNCTIONS: &[&str] = &[
    "emergency",
    "alert",
    "critical",
    "error",
    "warning",
    "warn",
    "notice",
    "info",
    "debug",
    "log",
    "metadata",
];

/// Metadata keys a logging backend renders.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(try_from = "RawMetadataKeys", into = "RawMetadataKeys")]
pub enum MetadataKeys {
    /// The backend renders every key.
    All,
    /// The backend renders only these keys.
    Only(BTreeSet<String>),
}

impl Default for MetadataKeys {
    fn default() -> Self {
        Self::Only(BTreeSet::new())
    }
}

impl MetadataKeys {
    /// Build an explicit allow-list.
    pub fn only<I, S>(keys: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self::Only(keys.into_iter().map(Into::into).collect())
    }

    /// Whether the backend renders `key`.
    pub fn allows(&self, key: &str) -> bool {
        match self {
            Self::All => true,
            Self::Only(keys) => keys.contains(key),
        }
    }
}

/// On-disk form: either the word `"all"` or a list of keys.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(untagged)]
enum RawMetadataKeys {
    Word(String),
    List(Vec<String>),
}

impl TryFrom<RawMetadataKeys> for MetadataKeys {
    type Error = String;

    fn try_from(raw: RawMetadataKeys) -> Result<Self, Self::Error> {
        match raw {
            RawMetadataKeys::Word(w) if w == "all" => Ok(Self::All),
            RawMetadataKeys::Word(w) => Err(format!(
                "metadata must be \"all\" or a list of keys, got \"{}\"",
                w
            )),
            RawMetadataKeys::List(keys) => Ok(Self::only(keys)),
        }
    }
}

impl From<MetadataKeys> for RawMetadataKeys {
    fn from(keys: MetadataKeys) -> Self {
        match keys {
            MetadataKeys::All => Self::Word("all".to_string()),
            MetadataKeys::Only(keys) => Self::List(keys.into_iter().collect()),
        }
    }
}

/// The host logging configuration, as far as this rule cares about it.
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
pub struct LoggerConfig {
    /// Metadata keys the backend is configured to render.
    #[serde(default)]
    pub metadata: MetadataKeys,
}

/// Operator-supplied parameters for the rule.
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
pub struct RuleParams {
    /// Logging function names to exclude from checking.
    #[serde(default)]
    pub ignore_functions: BTreeSet<String>,
    /// Allowed keys. Falls back to [`LoggerConfig::metadata`] when unset.
    #[serde(default)]
    pub metadata_keys: Option<MetadataKeys>,
}

/// Main configuration structure for logmeta.toml.
#[derive(Debug, Deserialize, Default)]
pub struct LogmetaConfig {
    /// Logger module name, defaults to `Logger`.
    pub logger_module: Option<String>,
    /// Host logging configuration.
    pub logger: Option<LoggerConfig>,
    /// Rule parameters.
    pub rule: Option<RuleParams>,
    /// Output configuration.
    pub output: Option<OutputConfig>,
}

/// Output format configuration.
#[derive(Debug, Deserialize, Default)]
pub struct OutputConfig {
    /// Output format: "plain" or "json".
    pub format: Option<String>,
}

/// Resolved configuration consumed by the check.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CheckConfig {
    /// Logger module name; a dotted name is matched segment by segment against the alias.
    pub logger_module: String,
    /// Recognized logging function names, after ignores are removed.
    pub functions: BTreeSet<String>,
    /// Keys the backend renders.
    pub allowed: MetadataKeys,
}

impl Default for CheckConfig {
    fn default() -> Self {
        Self::resolve(&RuleParams::default(), &LoggerConfig::default())
    }
}

impl CheckConfig {
    /// Combine rule parameters with the host logging configuration.
    pub fn resolve(params: &RuleParams, logger: &LoggerConfig) -> Self {
        let functions = LOGGER_FUNCTIONS
            .iter()
            .filter(|f| !params.ignore_functions.contains(**f))
            .map(|f| f.to_string())
            .collect();

        let allowed = params
            .metadata_keys
            .clone()
            .unwrap_or_else(|| logger.metadata.clone());

        Self {
            logger_module: DEFAULT_LOGGER_MODULE.to_string(),
            functions,
            allowed,
        }
    }

    /// Replace the logger module name.
    pub fn with_logger_module(mut self, module: impl Into<String>) -> Self {
        self.logger_module = module.into();
        self
    }

    /// Whether `name` is a logging function this check inspects.
    pub fn is_logging_function(&self, name: &str) -> bool {
        self.functions.contains(name)
    }
}

impl LogmetaConfig {
    /// Resolve the file's settings into a [`CheckConfig`].
    pub fn check_config(&self) -> CheckConfig {
        let params = self.rule.clone().unwrap_or_default();
        let logger = self.logger.clone().unwrap_or_default();
        let resolved = CheckConfig::resolve(&params, &logger);
        match &self.logger_module {
            Some(module) => resolved.with_logger_module(module.clone()),
            None => resolved,
        }
    }
}

/// Loads configuration from logmeta.toml if it exists.
pub fn load_config(root: &Path) -> LogmetaResult<Option<LogmetaConfig>> {
    let path = root.join(CONFIG_FILE);
    if !path.exists() {
        return Ok(None);
    }

    let content = fs::read_to_string(&path).map_err(|e| LogmetaError::io(&path, e))?;
    let cfg = toml::from_str(&content)
        .map_err(|e| LogmetaError::config(&path, format!("Invalid {}: {}", CONFIG_FILE, e)))?;
    Ok(Some(cfg))
}
