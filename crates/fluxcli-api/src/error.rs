use thiserror::Error;

/// Errors raised by module code, either while the module registers its
/// operations or while one of them runs.
#[derive(Debug, Error)]
pub enum ModuleError {
    #[error("missing required argument '{0}'")]
    MissingArgument(String),

    #[error("invalid value for argument '{name}': {reason}")]
    InvalidArgument { name: String, reason: String },

    #[error("expected at most {max} argument(s), got {got}")]
    TooManyArguments { max: usize, got: usize },

    #[error("{0}")]
    Execution(String),

    /// Displays the I/O message itself and exposes no source.
    #[error("I/O error: {0}")]
    Io(std::io::Error),

    #[error("initialization failed: {0}")]
    Init(String),
}

impl From<std::io::Error> for ModuleError {
    fn from(e: std::io::Error) -> Self {
        ModuleError::Io(e)
    }
}

impl ModuleError {
    pub fn execution(message: impl Into<String>) -> Self {
        ModuleError::Execution(message.into())
    }

    pub fn init(message: impl Into<String>) -> Self {
        ModuleError::Init(message.into())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::error::Error as _;
    use std::io;

    #[test]
    fn test_io_error_is_single_line() {
        let err = ModuleError::from(io::Error::new(io::ErrorKind::NotFound, "nmap not found"));
        assert_eq!(err.to_string(), "I/O error: nmap not found");
        assert!(err.source().is_none());
    }
}
