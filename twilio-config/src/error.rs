use thiserror::Error;

/// Errors that can occur when loading or validating Twilio credentials
#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("Account SID is required but was not provided.")]
    MissingAccountSid,

    #[error("No credentials configured. Provide an auth token, an API key, or both.")]
    MissingCredentials,

    #[error("API key SID and API key secret must be provided together.")]
    IncompleteApiKey,

    #[error("Invalid token TTL: {0}. The TTL must be a positive number of seconds.")]
    InvalidTtl(String),

    #[error("I/O error occurred while reading configuration: {0}")]
    IOError(String),

    #[error("Failed to parse configuration data: {0}")]
    ParseError(String),

    #[error("Environment variable error: {0}")]
    EnvVarError(String),

    #[error("Could not determine the user configuration directory.")]
    NoConfigDirectory,
}

impl From<std::io::Error> for ConfigError {
    fn from(error: std::io::Error) -> Self {
        ConfigError::IOError(error.to_string())
    }
}

impl From<serde_json::Error> for ConfigError {
    fn from(error: serde_json::Error) -> Self {
        ConfigError::ParseError(error.to_string())
    }
}

#[cfg(feature = "toml")]
impl From<toml::de::Error> for ConfigError {
    fn from(error: toml::de::Error) -> Self {
        ConfigError::ParseError(error.to_string())
    }
}

impl From<std::env::VarError> for ConfigError {
    fn from(error: std::env::VarError) -> Self {
        ConfigError::EnvVarError(error.to_string())
    }
}
