use crate::cli::{Cli, OutputFormat, VerbosityLevel};
use crate::error::{ConfigError, ConfigResult as Result};
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

/// Trait for abstracting environment variable access
pub trait EnvProvider {
    fn get(&self, key: &str) -> Option<String>;
}

/// System environment variable provider for production use
pub struct SystemEnvProvider;

impl EnvProvider for SystemEnvProvider {
    fn get(&self, key: &str) -> Option<String> {
        std::env::var(key).ok()
    }
}

/// Main application configuration
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Default)]
#[serde(default)]
pub struct Config {
    pub check: CheckConfig,
    pub output: OutputConfig,
}

/// Check-specific configuration
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Default)]
#[serde(default)]
pub struct CheckConfig {
    /// Exit with a failure status when any defect was reported
    pub fail_on_defects: bool,
    /// Resolve relative container paths against the document's directory
    pub relative_to_document: bool,
}

/// Output configuration
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(default)]
pub struct OutputConfig {
    /// Output format
    pub format: OutputFormat,
    /// Verbose output
    pub verbose: bool,
    /// Quiet mode (defects only)
    pub quiet: bool,
    /// Colorize human output when writing to a terminal
    pub color: bool,
}

impl Default for OutputConfig {
    fn default() -> Self {
        Self {
            format: OutputFormat::Human,
            verbose: false,
            quiet: false,
            color: true,
        }
    }
}

impl Config {
    pub fn verbosity(&self) -> VerbosityLevel {
        if self.output.quiet {
            VerbosityLevel::Quiet
        } else if self.output.verbose {
            VerbosityLevel::Verbose
        } else {
            VerbosityLevel::Normal
        }
    }
}

const CONFIG_NAMES: [&str; 4] = [
    "xdmf-check.toml",
    "xdmf-check.json",
    ".xdmf-check.toml",
    ".xdmf-check.json",
];

/// Configuration manager for loading and merging configurations
pub struct ConfigManager;

impl ConfigManager {
    /// Load configuration with precedence: file -> environment -> CLI
    pub fn load_config(cli: &Cli) -> Result<Config> {
        let mut config = match &cli.config {
            Some(config_path) => Self::load_from_file(config_path)?,
            None => Self::find_config_file()?.unwrap_or_default(),
        };

        config = Self::apply_environment_overrides(config)?;
        config = Self::merge_with_cli(config, cli);

        Self::validate_config(&config)?;

        Ok(config)
    }

    /// Load configuration from a file (TOML or JSON)
    pub fn load_from_file(path: &Path) -> Result<Config> {
        let content = std::fs::read_to_string(path)?;

        match path.extension().and_then(|ext| ext.to_str()) {
            Some("toml") => Ok(toml::from_str(&content)?),
            Some("json") => Ok(serde_json::from_str(&content)?),
            Some(ext) => Err(ConfigError::UnsupportedFormat(ext.to_string())),
            None => {
                // Try to parse as TOML first, then JSON
                if let Ok(config) = toml::from_str::<Config>(&content) {
                    Ok(config)
                } else {
                    Ok(serde_json::from_str(&content)?)
                }
            }
        }
    }

    /// Find configuration file in standard locations
    pub fn find_config_file() -> Result<Option<Config>> {
        for name in &CONFIG_NAMES {
            let path = PathBuf::from(name);
            if path.is_file() {
                return Ok(Some(Self::load_from_file(&path)?));
            }
        }

        if let Some(config_dir) = dirs::config_dir() {
            let app_config_dir = config_dir.join("xdmf-check");
            for name in &CONFIG_NAMES {
                let path = app_config_dir.join(name);
                if path.is_file() {
                    return Ok(Some(Self::load_from_file(&path)?));
                }
            }
        }

        Ok(None)
    }

    /// Apply environment variable overrides using the system environment
    pub fn apply_environment_overrides(config: Config) -> Result<Config> {
        Self::apply_environment_overrides_with(&SystemEnvProvider, config)
    }

    /// Apply environment variable overrides with a custom environment provider
    pub fn apply_environment_overrides_with(
        env: &impl EnvProvider,
        mut config: Config,
    ) -> Result<Config> {
        if let Some(value) = env.get("XDMF_CHECK_FAIL_ON_DEFECTS") {
            config.check.fail_on_defects = parse_bool("XDMF_CHECK_FAIL_ON_DEFECTS", &value)?;
        }

        if let Some(value) = env.get("XDMF_CHECK_RELATIVE_TO_DOCUMENT") {
            config.check.relative_to_document =
                parse_bool("XDMF_CHECK_RELATIVE_TO_DOCUMENT", &value)?;
        }

        if let Some(value) = env.get("XDMF_CHECK_VERBOSE") {
            config.output.verbose = parse_bool("XDMF_CHECK_VERBOSE", &value)?;
        }

        if let Some(value) = env.get("XDMF_CHECK_QUIET") {
            config.output.quiet = parse_bool("XDMF_CHECK_QUIET", &value)?;
        }

        if let Some(value) = env.get("XDMF_CHECK_COLOR") {
            config.output.color = parse_bool("XDMF_CHECK_COLOR", &value)?;
        }

        if let Some(format) = env.get("XDMF_CHECK_FORMAT") {
            config.output.format = match format.to_lowercase().as_str() {
                "human" => OutputFormat::Human,
                "json" => OutputFormat::Json,
                _ => {
                    return Err(ConfigError::Environment(format!(
                        "Invalid XDMF_CHECK_FORMAT value: {}",
                        format
                    )));
                }
            };
        }

        Ok(config)
    }

    /// Merge CLI arguments with configuration (flags given on the command line win)
    pub fn merge_with_cli(mut config: Config, cli: &Cli) -> Config {
        if cli.fail_on_defects {
            config.check.fail_on_defects = true;
        }
        if cli.relative_to_document {
            config.check.relative_to_document = true;
        }

        if let Some(format) = cli.format {
            config.output.format = format;
        }
        if cli.verbose > 0 {
            config.output.verbose = true;
            config.output.quiet = false;
        }
        if cli.quiet {
            config.output.quiet = true;
            config.output.verbose = false;
        }
        if cli.no_color {
            config.output.color = false;
        }

        config
    }

    /// Validate configuration values
    pub fn validate_config(config: &Config) -> Result<()> {
        if config.output.verbose && config.output.quiet {
            return Err(ConfigError::Validation(
                "Cannot enable both verbose and quiet modes".to_string(),
            ));
        }

        Ok(())
    }
}

fn parse_bool(key: &str, value: &str) -> Result<bool> {
    match value.trim().to_lowercase().as_str() {
        "1" | "true" | "yes" | "on" => Ok(true),
        "0" | "false" | "no" | "off" => Ok(false),
        _ => Err(ConfigError::Environment(format!(
            "Invalid {} value: {}",
            key, value
        ))),
    }
}
