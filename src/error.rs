use std::path::PathBuf;

pub type AppResult<T> = Result<T, AppError>;

#[derive(thiserror::Error, Debug)]
pub enum AppError {
    #[error("I/O error: {context}")]
    Io {
        #[source]
        source: std::io::Error,
        context: String,
    },
    #[error("invalid config {}: {message}", path.display())]
    Config { path: PathBuf, message: String },
    #[error("invalid argument: {0}")]
    InvalidArgument(String),
    #[error("terminal error: {0}")]
    Terminal(String),
}

impl From<std::io::Error> for AppError {
    fn from(source: std::io::Error) -> Self {
        Self::Io {
            source,
            context: "I/O operation failed".to_string(),
        }
    }
}

impl AppError {
    pub fn io_with_context(source: std::io::Error, context: impl Into<String>) -> Self {
        Self::Io {
            source,
            context: context.into(),
        }
    }

    pub fn config(path: impl Into<PathBuf>, message: impl Into<String>) -> Self {
        Self::Config {
            path: path.into(),
            message: message.into(),
        }
    }

    pub fn invalid_argument(message: impl Into<String>) -> Self {
        Self::InvalidArgument(message.into())
    }

    pub fn terminal(message: impl Into<String>) -> Self {
        Self::Terminal(message.into())
    }
}

#[cfg(test)]
mod tests {
    use std::path::PathBuf;

    use super::AppError;

    #[test]
    fn config_error_names_path_and_message() {
        let err = AppError::config(PathBuf::from("/tmp/seb.toml"), "expected table");
        assert!(matches!(err, AppError::Config { .. }));
        assert_eq!(
            err.to_string(),
            "invalid config /tmp/seb.toml: expected table"
        );
    }

    #[test]
    fn io_error_keeps_context_message() {
        let source = std::io::Error::other("disk gone");
        let err = AppError::io_with_context(source, "failed to read config");
        assert_eq!(err.to_string(), "I/O error: failed to read config");
    }
}
