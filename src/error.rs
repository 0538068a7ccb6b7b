//! Application error type.
//!
//! Every failure carries the process exit code `main` should use:
//! - `2`: bad usage, configuration, or file I/O
//! - `3`: input data that cannot be used (empty tables, missing columns)
//! - `4`: numerical failures (singular covariance, non-finite results)

use thiserror::Error;

#[derive(Debug, Error)]
pub enum AppError {
    #[error("{0}")]
    Config(String),

    #[error("{0}")]
    Input(String),

    #[error("{0}")]
    Numerics(String),

    #[error("{context}: {source}")]
    Io {
        context: String,
        #[source]
        source: std::io::Error,
    },

    #[error("{context}: {source}")]
    Csv {
        context: String,
        #[source]
        source: csv::Error,
    },

    #[error("{context}: {source}")]
    Json {
        context: String,
        #[source]
        source: serde_json::Error,
    },

    #[error("No realization has been sampled yet; call `sample_population` first.")]
    NotSampled,
}

impl AppError {
    pub fn config(message: impl Into<String>) -> Self {
        Self::Config(message.into())
    }

    pub fn input(message: impl Into<String>) -> Self {
        Self::Input(message.into())
    }

    pub fn numerics(message: impl Into<String>) -> Self {
        Self::Numerics(message.into())
    }

    pub fn io(context: impl Into<String>, source: std::io::Error) -> Self {
        Self::Io {
            context: context.into(),
            source,
        }
    }

    pub fn csv(context: impl Into<String>, source: csv::Error) -> Self {
        Self::Csv {
            context: context.into(),
            source,
        }
    }

    pub fn json(context: impl Into<String>, source: serde_json::Error) -> Self {
        Self::Json {
            context: context.into(),
            source,
        }
    }

    pub fn exit_code(&self) -> u8 {
        match self {
            AppError::Config(_) | AppError::NotSampled => 2,
            AppError::Io { .. } | AppError::Csv { .. } | AppError::Json { .. } => 2,
            AppError::Input(_) => 3,
            AppError::Numerics(_) => 4,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn exit_codes_follow_category() {
        assert_eq!(AppError::config("x").exit_code(), 2);
        assert_eq!(AppError::input("x").exit_code(), 3);
        assert_eq!(AppError::numerics("x").exit_code(), 4);
        assert_eq!(AppError::NotSampled.exit_code(), 2);
    }

    #[test]
    fn io_error_message_includes_context() {
        let err = AppError::io(
            "Failed to open 'pop.csv'",
            std::io::Error::new(std::io::ErrorKind::NotFound, "missing"),
        );
        assert_eq!(err.to_string(), "Failed to open 'pop.csv': missing");
    }
}
