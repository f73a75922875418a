//! Error types for the thread factory

/// Result type for thread factory operations
pub type Result<T> = std::result::Result<T, ThreadError>;

/// Errors that can occur while configuring a factory or starting its threads
#[derive(Debug, thiserror::Error)]
#[non_exhaustive]
pub enum ThreadError {
    /// Invalid configuration with parameter
    #[error("Invalid configuration for '{parameter}': {message}")]
    InvalidConfig {
        /// Configuration parameter name
        parameter: String,
        /// Error message
        message: String,
    },

    /// The operating system refused to spawn a produced thread
    #[error("Failed to spawn thread '{thread_name}': {message}")]
    SpawnError {
        /// Name the thread would have carried
        thread_name: String,
        /// Error message
        message: String,
        /// Source IO error
        #[source]
        source: Option<std::io::Error>,
    },

    /// A job returned an error while running on a produced thread
    #[error("Job '{job_type}' failed: {message}")]
    ExecutionError {
        /// Type name of the failed job
        job_type: String,
        /// Error message
        message: String,
    },

    /// General error
    #[error("{0}")]
    Other(String),
}

impl ThreadError {
    /// Create an invalid config error
    pub fn invalid_config(parameter: impl Into<String>, message: impl Into<String>) -> Self {
        ThreadError::InvalidConfig {
            parameter: parameter.into(),
            message: message.into(),
        }
    }

    /// Create a spawn error with source
    pub fn spawn_with_source(
        thread_name: impl Into<String>,
        message: impl Into<String>,
        source: std::io::Error,
    ) -> Self {
        ThreadError::SpawnError {
            thread_name: thread_name.into(),
            message: message.into(),
            source: Some(source),
        }
    }

    /// Create an execution error
    pub fn execution(job_type: impl Into<String>, message: impl Into<String>) -> Self {
        ThreadError::ExecutionError {
            job_type: job_type.into(),
            message: message.into(),
        }
    }

    /// Create a generic error
    pub fn other<S: Into<String>>(msg: S) -> Self {
        ThreadError::Other(msg.into())
    }

    /// Returns true if this error was raised while validating configuration
    pub fn is_invalid_config(&self) -> bool {
        matches!(self, ThreadError::InvalidConfig { .. })
    }
}
