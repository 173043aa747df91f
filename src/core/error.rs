//! Error types for the logging pipeline

pub type Result<T> = std::result::Result<T, PipelineError>;

#[derive(Debug, thiserror::Error)]
pub enum PipelineError {
    /// Generic IO error
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// Invalid configuration with details
    #[error("Invalid configuration for {option}: {message}")]
    InvalidConfig { option: String, message: String },

    /// Line template compilation error
    #[error("Invalid line template '{template}': {message}")]
    Template { template: String, message: String },

    /// File sink error with path
    #[error("File sink error for '{path}': {message}")]
    Sink { path: String, message: String },

    /// File rotation error
    #[error("Rotation failed for '{path}': {message}")]
    Rotation { path: String, message: String },
}

impl PipelineError {
    /// Create an invalid configuration error
    pub fn config(option: impl Into<String>, message: impl Into<String>) -> Self {
        PipelineError::InvalidConfig {
            option: option.into(),
            message: message.into(),
        }
    }

    /// Create a line template error
    pub fn template(template: impl Into<String>, message: impl Into<String>) -> Self {
        PipelineError::Template {
            template: template.into(),
            message: message.into(),
        }
    }

    /// Create a file sink error
    pub fn sink(path: impl Into<String>, message: impl Into<String>) -> Self {
        PipelineError::Sink {
            path: path.into(),
            message: message.into(),
        }
    }

    /// Create a rotation error
    pub fn rotation(path: impl Into<String>, message: impl Into<String>) -> Self {
        PipelineError::Rotation {
            path: path.into(),
            message: message.into(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_creation() {
        let err = PipelineError::config("max_backup_count", "must be at least 1");
        assert!(matches!(err, PipelineError::InvalidConfig { .. }));

        let err = PipelineError::sink("/var/log/app.log", "Permission denied");
        assert!(matches!(err, PipelineError::Sink { .. }));
    }

    #[test]
    fn test_error_display() {
        let err = PipelineError::rotation("/var/log/app.log", "Disk full");
        assert_eq!(
            err.to_string(),
            "Rotation failed for '/var/log/app.log': Disk full"
        );

        let err = PipelineError::template("{nope}", "unknown placeholder 'nope'");
        assert_eq!(
            err.to_string(),
            "Invalid line template '{nope}': unknown placeholder 'nope'"
        );
    }
}
