use std::path::PathBuf;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum SorterError {
    #[error("Invalid folder path: {}", .path.display())]
    InvalidRoot { path: PathBuf },

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Directory walk failed: {0}")]
    Walk(#[from] walkdir::Error),

    #[error("Image metadata unreadable: {0}")]
    Exif(#[from] exif::Error),

    #[error("Malformed capture date {value:?}: {source}")]
    DateParse {
        value: String,
        source: chrono::ParseError,
    },

    #[error("No capture date in image metadata")]
    MissingCaptureDate,

    #[error("Destination already exists: {}", .path.display())]
    DestinationExists { path: PathBuf },

    #[error("Report write failed: {0}")]
    Report(#[from] csv::Error),

    #[error("Configuration error: {message}")]
    ConfigError { message: String },

    #[error("Invalid value {value:?} for {field}: {reason}")]
    InvalidConfigValueError {
        field: String,
        value: String,
        reason: String,
    },
}

impl SorterError {
    pub fn user_friendly_message(&self) -> String {
        match self {
            SorterError::InvalidRoot { path } => {
                format!("Invalid folder path: '{}' is not a directory", path.display())
            }
            SorterError::DestinationExists { path } => {
                format!("A different file already sits at {}", path.display())
            }
            SorterError::InvalidConfigValueError { field, reason, .. } => {
                format!("Setting '{}' is invalid: {}", field, reason)
            }
            other => other.to_string(),
        }
    }

    pub fn recovery_suggestion(&self) -> &'static str {
        match self {
            SorterError::InvalidRoot { .. } => "Pass an existing directory as the folder argument",
            SorterError::DestinationExists { .. } => {
                "Rename one of the two files and run the sorter again"
            }
            SorterError::Io(_) | SorterError::Walk(_) => {
                "Check file permissions and free disk space"
            }
            SorterError::Report(_) => "Make sure the report path is writable",
            SorterError::ConfigError { .. }
            | SorterError::InvalidConfigValueError { .. } => {
                "Fix the configuration file or command-line flags"
            }
            SorterError::Exif(_) | SorterError::DateParse { .. } | SorterError::MissingCaptureDate => {
                "The file modification time is used instead; no action needed"
            }
        }
    }
}

pub type Result<T> = std::result::Result<T, SorterError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_invalid_root_message() {
        let err = SorterError::InvalidRoot {
            path: PathBuf::from("/no/such/dir"),
        };
        assert!(err.user_friendly_message().contains("/no/such/dir"));
        assert!(err.recovery_suggestion().contains("existing directory"));
    }

    #[test]
    fn test_per_file_suggestions() {
        assert!(SorterError::MissingCaptureDate
            .recovery_suggestion()
            .contains("modification time"));
        let err = SorterError::DestinationExists {
            path: PathBuf::from("2021/07/a.jpg"),
        };
        assert!(err.recovery_suggestion().contains("Rename"));
    }
}
