use thiserror::Error;

#[derive(Error, Debug)]
pub enum RenderError {
    #[error("HTTP client error: {0}")]
    HttpError(#[from] reqwest::Error),

    #[error("IO error: {0}")]
    IoError(#[from] std::io::Error),

    #[error("Configuration error: {message}")]
    ConfigError { message: String },

    #[error("Invalid value for {field} ({value}): {reason}")]
    InvalidConfigValueError {
        field: String,
        value: String,
        reason: String,
    },

    #[error("Missing required configuration: {field}")]
    MissingConfigError { field: String },

    #[error("Output error: {message}")]
    OutputError { message: String },
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorCategory {
    Configuration,
    Network,
    Io,
}

impl RenderError {
    pub fn category(&self) -> ErrorCategory {
        match self {
            RenderError::HttpError(_) => ErrorCategory::Network,
            RenderError::IoError(_) | RenderError::OutputError { .. } => ErrorCategory::Io,
            RenderError::ConfigError { .. }
            | RenderError::InvalidConfigValueError { .. }
            | RenderError::MissingConfigError { .. } => ErrorCategory::Configuration,
        }
    }

    pub fn user_friendly_message(&self) -> String {
        match self {
            RenderError::HttpError(_) => "Could not set up the HTTP client".to_string(),
            RenderError::IoError(e) => format!("File system error: {}", e),
            RenderError::ConfigError { message } => format!("Configuration problem: {}", message),
            RenderError::InvalidConfigValueError { field, reason, .. } => {
                format!("Setting '{}' is invalid: {}", field, reason)
            }
            RenderError::MissingConfigError { field } => {
                format!("Setting '{}' is required", field)
            }
            RenderError::OutputError { message } => format!("Could not write output: {}", message),
        }
    }

    pub fn recovery_suggestion(&self) -> &'static str {
        match self.category() {
            ErrorCategory::Configuration => {
                "Check the TOML file and command line flags (see --help)"
            }
            ErrorCategory::Network => "Check TLS support and the configured base URL",
            ErrorCategory::Io => "Check that the output directory exists and is writable",
        }
    }
}

pub type Result<T> = std::result::Result<T, RenderError>;
