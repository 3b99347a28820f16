use crate::cli::VerbosityLevel;
use crate::error::{CheckError, ConfigError};

/// Reporter for fatal errors with configurable verbosity
pub struct ErrorReporter {
    verbosity: VerbosityLevel,
}

impl ErrorReporter {
    /// Create a new error reporter with specified verbosity
    pub fn new(verbosity: VerbosityLevel) -> Self {
        Self { verbosity }
    }

    /// Report a fatal error on standard error
    pub fn report(&self, error: &CheckError) {
        eprintln!("{}", self.format_error(error));
    }

    /// Render a fatal error at the reporter's verbosity
    pub fn format_error(&self, error: &CheckError) -> String {
        match self.verbosity {
            VerbosityLevel::Quiet => self.format_error_brief(error),
            VerbosityLevel::Normal => error.to_string(),
            VerbosityLevel::Verbose => self.format_error_verbose(error),
            VerbosityLevel::Debug => self.format_error_debug(error),
        }
    }

    /// Format error for brief output (quiet mode)
    fn format_error_brief(&self, error: &CheckError) -> String {
        match error {
            CheckError::NotFound { path } => format!("NOT FOUND: {}", path.display()),
            CheckError::WrongRoot { path, .. } => format!("NOT XDMF: {}", path.display()),
            CheckError::MalformedDocument { path, .. } => {
                format!("MALFORMED: {}", path.display())
            }
            _ => format!("ERROR: {}", error),
        }
    }

    /// Format error for verbose output
    fn format_error_verbose(&self, error: &CheckError) -> String {
        let mut output = error.to_string();

        match error {
            CheckError::NotFound { .. } => {
                output.push_str("\nSuggestion: Pass the path of an existing .xmf document");
            }
            CheckError::WrongRoot { .. } => {
                output.push_str("\nSuggestion: The document element must be <Xdmf>");
            }
            CheckError::MalformedDocument { .. } => {
                output.push_str("\nSuggestion: Check that the document is well-formed XML");
            }
            CheckError::InvalidInteger { attribute, .. } => {
                output.push_str(&format!(
                    "\nSuggestion: {} must contain whitespace-separated non-negative integers",
                    attribute
                ));
            }
            CheckError::Config(config_error) => {
                output.push('\n');
                output.push_str(&self.get_config_help(config_error));
            }
            CheckError::Io(_) => {}
        }

        output
    }

    /// Format error for debug output
    fn format_error_debug(&self, error: &CheckError) -> String {
        let mut output = self.format_error_verbose(error);
        output.push_str(&format!("\nDebug Info: {:?}", error));

        output.push_str("\nError Chain:");
        let mut current_error: &dyn std::error::Error = error;
        let mut level = 0;
        while let Some(source) = current_error.source() {
            output.push_str(&format!("\n  {}: {}", level + 1, source));
            current_error = source;
            level += 1;
        }

        output
    }

    /// Get helpful suggestions for configuration errors
    fn get_config_help(&self, error: &ConfigError) -> String {
        match error {
            ConfigError::TomlParsing(_) | ConfigError::JsonParsing(_) => {
                "Check the configuration file syntax (TOML/JSON format expected)".to_string()
            }
            ConfigError::UnsupportedFormat(ext) => {
                format!("Rename the configuration file from .{} to .toml or .json", ext)
            }
            ConfigError::Environment(_) => {
                "Check the XDMF_CHECK_* environment variables".to_string()
            }
            ConfigError::Validation(_) => {
                "Resolve conflicting values between file, environment, and CLI".to_string()
            }
            ConfigError::Io(_) => "Check that the configuration file is readable".to_string(),
        }
    }
}
