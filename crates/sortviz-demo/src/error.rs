use sortviz_core::{ConfigError, SortError};

/// Errors that can occur in the terminal demo.
#[derive(Debug, thiserror::Error)]
pub enum DemoError {
    /// A command-line flag was not recognized.
    #[error("unknown argument '{arg}'")]
    UnknownArgument { arg: String },

    /// A flag that takes a value was given none.
    #[error("missing value for {flag}")]
    MissingValue { flag: &'static str },

    /// A flag value could not be parsed.
    #[error("invalid value '{value}' for {flag}")]
    InvalidValue { flag: &'static str, value: String },

    /// The controller had no run to collect.
    #[error("no run is active")]
    NoActiveRun,

    /// Failed to load the engine config file.
    #[error(transparent)]
    Config(#[from] ConfigError),

    /// The engine rejected the requested run.
    #[error(transparent)]
    Engine(#[from] SortError),

    /// Writing a frame failed.
    #[error(transparent)]
    Io(#[from] std::io::Error),
}
