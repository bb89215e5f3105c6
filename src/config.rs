use crate::error::ConfigError;
use crate::sandbox::{AllowlistPolicy, DEFAULT_TIMEOUT_SECS};
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::path::{Path, PathBuf};

/// Environment variable overriding the workspace root.
pub const WORKSPACE_ENV: &str = "WEBCODER_WORKSPACE";
/// Environment variable carrying the Pexels API key.
pub const PEXELS_ENV: &str = "PEXELS_API";

/// Deepest directory-tree depth `list_dir` will report, regardless of the
/// depth the caller asks for.
pub const MAX_TREE_DEPTH: usize = 4;

/// Process-wide configuration, constructed once at startup and passed by
/// handle into the sandbox core — no ambient global lookups inside it.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Config {
    /// Workspace directory — resolved from env/CLI, not serialized.
    #[serde(skip)]
    pub workspace_dir: PathBuf,

    /// Wall-clock limit for a single `run_cmd` invocation.
    #[serde(default = "default_timeout_secs")]
    pub command_timeout_secs: u64,

    /// Maximum directory depth honored by `list_dir`.
    #[serde(default = "default_tree_depth")]
    pub max_tree_depth: usize,

    /// Allowlist policy: program name → permitted leading subcommand tokens.
    /// Data, not code; absence of a program denies it entirely.
    #[serde(default = "AllowlistPolicy::default_programs")]
    pub allowed_commands: BTreeMap<String, Vec<String>>,

    #[serde(default)]
    pub stock: StockConfig,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct StockConfig {
    /// Pexels API key. The `PEXELS_API` env var takes precedence.
    pub api_key: Option<String>,
}

fn default_timeout_secs() -> u64 {
    DEFAULT_TIMEOUT_SECS
}

fn default_tree_depth() -> usize {
    MAX_TREE_DEPTH
}

impl Default for Config {
    fn default() -> Self {
        Self {
            workspace_dir: default_workspace_dir(),
            command_timeout_secs: default_timeout_secs(),
            max_tree_depth: default_tree_depth(),
            allowed_commands: AllowlistPolicy::default_programs(),
            stock: StockConfig::default(),
        }
    }
}

impl Config {
    /// Load configuration.
    ///
    /// Precedence, lowest to highest: built-in defaults, `webcoder.toml`
    /// (explicit `path`, else `./webcoder.toml` if present), environment
    /// (`WEBCODER_WORKSPACE`, `PEXELS_API`).
    pub fn load(path: Option<&Path>) -> Result<Self, ConfigError> {
        let mut config = match config_file(path) {
            Some(file) => {
                let content = std::fs::read_to_string(&file).map_err(|error| {
                    ConfigError::Load(format!("{}: {error}", file.display()))
                })?;
                let mut parsed: Self = toml::from_str(&content).map_err(|error| {
                    ConfigError::Load(format!("{}: {error}", file.display()))
                })?;
                parsed.workspace_dir = default_workspace_dir();
                parsed
            }
            None => Self::default(),
        };

        if let Ok(workspace) = std::env::var(WORKSPACE_ENV)
            && !workspace.trim().is_empty()
        {
            config.workspace_dir = PathBuf::from(shellexpand::tilde(&workspace).into_owned());
        }
        if let Ok(key) = std::env::var(PEXELS_ENV)
            && !key.trim().is_empty()
        {
            config.stock.api_key = Some(key);
        }

        config.validate()?;
        Ok(config)
    }

    /// The allowlist as a policy value for the command gate.
    pub fn allowlist_policy(&self) -> AllowlistPolicy {
        AllowlistPolicy::new(self.allowed_commands.clone())
    }

    fn validate(&self) -> Result<(), ConfigError> {
        if self.command_timeout_secs == 0 {
            return Err(ConfigError::Validation(
                "command_timeout_secs must be at least 1".to_string(),
            ));
        }
        if self.max_tree_depth == 0 {
            return Err(ConfigError::Validation(
                "max_tree_depth must be at least 1".to_string(),
            ));
        }
        Ok(())
    }
}

fn config_file(path: Option<&Path>) -> Option<PathBuf> {
    match path {
        Some(explicit) => Some(explicit.to_path_buf()),
        None => {
            let implicit = PathBuf::from("webcoder.toml");
            implicit.is_file().then_some(implicit)
        }
    }
}

fn default_workspace_dir() -> PathBuf {
    std::env::current_dir()
        .unwrap_or_else(|_| PathBuf::from("."))
        .join("workspace")
}
