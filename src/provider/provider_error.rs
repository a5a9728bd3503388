use std::error::Error;
use std::fmt;

#[derive(Debug)]
pub enum ProviderError {
    Network(String),
    Config(String),
    JsonParse(String),
    UnexpectedShape(String),
}

impl fmt::Display for ProviderError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ProviderError::Network(msg) => write!(f, "Network error: {msg}"),
            ProviderError::Config(msg) => write!(f, "Configuration error: {msg}"),
            ProviderError::JsonParse(msg) => write!(f, "JSON parse error: {msg}"),
            ProviderError::UnexpectedShape(msg) => write!(f, "Unexpected data shape: {msg}"),
        }
    }
}

impl Error for ProviderError {}
