//! Configuration file handling

use serde::Deserialize;
use std::path::PathBuf;

use super::paths::config_path;
use super::Result;

/// Environment flag that turns on the external tool cross-checks
pub const EXTERNAL_VALIDATE_ENV: &str = "GREENTIC_PACK_VALIDATE";

/// Environment variable selecting a live backend for the contract suite
pub const BASE_URL_ENV: &str = "WEBCHAT_BASE_URL";

/// Main configuration structure
#[derive(Debug, Deserialize, Default)]
pub struct Config {
    /// Pack layout settings
    #[serde(default)]
    pub packs: PacksConfig,

    /// Contract probe settings
    #[serde(default)]
    pub contract: ContractConfig,

    /// External tool cross-checks
    #[serde(default)]
    pub external: ExternalConfig,
}

/// Where packs live and what each pack directory must contain
#[derive(Debug, Deserialize)]
pub struct PacksConfig {
    /// Directory holding one subdirectory per pack
    #[serde(default = "default_root")]
    pub root: PathBuf,

    /// Manifest file name inside each pack directory
    #[serde(default = "default_manifest")]
    pub manifest: String,

    /// Contributor notes required beside each manifest
    #[serde(default = "default_readme")]
    pub readme: String,
}

impl Default for PacksConfig {
    fn default() -> Self {
        Self {
            root: default_root(),
            manifest: default_manifest(),
            readme: default_readme(),
        }
    }
}

fn default_root() -> PathBuf {
    PathBuf::from("packs")
}
fn default_manifest() -> String {
    "pack.json".to_string()
}
fn default_readme() -> String {
    "README.md".to_string()
}

/// Contract probe settings
#[derive(Debug, Deserialize)]
pub struct ContractConfig {
    /// Live backend to probe; the stub is used when unset
    pub base_url: Option<String>,

    /// Request timeout in seconds
    #[serde(default = "default_timeout")]
    pub timeout_secs: u64,

    /// User identifier sent with the token request
    #[serde(default = "default_user")]
    pub user: String,

    /// Tenant identifier sent with the conversation request
    #[serde(default = "default_tenant")]
    pub tenant: String,

    /// Message text posted as the probe activity
    #[serde(default = "default_text")]
    pub text: String,
}

impl Default for ContractConfig {
    fn default() -> Self {
        Self {
            base_url: None,
            timeout_secs: default_timeout(),
            user: default_user(),
            tenant: default_tenant(),
            text: default_text(),
        }
    }
}

fn default_timeout() -> u64 {
    5
}
fn default_user() -> String {
    "smoke-user".to_string()
}
fn default_tenant() -> String {
    "tenant-alpha".to_string()
}
fn default_text() -> String {
    "hi".to_string()
}

/// External validation tools run per manifest
#[derive(Debug, Deserialize)]
pub struct ExternalConfig {
    /// Commands to run; `{manifest}` in an argument is replaced by the manifest path
    #[serde(default = "default_tools")]
    pub tools: Vec<ExternalTool>,
}

impl Default for ExternalConfig {
    fn default() -> Self {
        Self {
            tools: default_tools(),
        }
    }
}

/// A single external command
#[derive(Debug, Deserialize, Clone, PartialEq, Eq)]
pub struct ExternalTool {
    /// Executable name, looked up on PATH
    pub program: String,

    /// Arguments, with `{manifest}` placeholders
    #[serde(default)]
    pub args: Vec<String>,
}

impl ExternalTool {
    pub fn new(program: &str, args: &[&str]) -> Self {
        Self {
            program: program.to_string(),
            args: args.iter().map(|a| a.to_string()).collect(),
        }
    }
}

fn default_tools() -> Vec<ExternalTool> {
    vec![
        ExternalTool::new("greentic-dev", &["pack", "validate", "{manifest}"]),
        ExternalTool::new("greentic-pack", &["sim", "{manifest}"]),
    ]
}

impl Config {
    /// Load configuration from the default config file
    ///
    /// Returns default configuration if file doesn't exist
    pub fn load() -> Result<Self> {
        if let Some(path) = config_path() {
            if path.exists() {
                let content = std::fs::read_to_string(&path).map_err(|e| {
                    super::Error::FileRead {
                        path: path.display().to_string(),
                        error: e.to_string(),
                    }
                })?;
                return Self::parse(&content);
            }
        }
        Ok(Self::default())
    }

    /// Parse configuration from TOML text
    pub fn parse(content: &str) -> Result<Self> {
        toml::from_str(content).map_err(|e| super::Error::ConfigParse(e.to_string()))
    }

    /// Whether external cross-checks are requested through the environment
    pub fn external_enabled_by_env() -> bool {
        std::env::var(EXTERNAL_VALIDATE_ENV).map(|v| v == "1").unwrap_or(false)
    }

    /// Resolve the backend base URL: flag, then environment, then config file
    pub fn base_url(&self, flag: Option<String>) -> Option<String> {
        flag.or_else(|| std::env::var(BASE_URL_ENV).ok())
            .or_else(|| self.contract.base_url.clone())
            .filter(|url| !url.trim().is_empty())
    }
}
