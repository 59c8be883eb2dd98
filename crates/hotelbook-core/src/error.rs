use std::path::PathBuf;

use thiserror::Error;

/// All errors that can occur in hotelbook-core.
#[derive(Debug, Error)]
pub enum HotelbookError {
    #[error("Customer not found: {0}")]
    CustomerNotFound(u64),

    #[error("Hotel not found: {0}")]
    HotelNotFound(u64),

    #[error("Reservation not found: {0}")]
    ReservationNotFound(u64),

    #[error("Duplicate {entity} id: {id}")]
    DuplicateId { entity: &'static str, id: u64 },

    #[error("Missing required field: {0}")]
    MissingField(String),

    #[error("Unknown {entity} field: {field}")]
    UnknownField { entity: &'static str, field: String },

    #[error("Validation error: {0}")]
    Validation(String),

    #[error("Corrupt store file {}: {reason}", .path.display())]
    CorruptStore { path: PathBuf, reason: String },

    #[error("Could not replace {}: {source}", .path.display())]
    Persist {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("Config error: {0}")]
    ConfigError(String),

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("TOML parse error: {0}")]
    TomlParse(#[from] toml::de::Error),

    #[error("TOML serialize error: {0}")]
    TomlSerialize(#[from] toml::ser::Error),
}

impl HotelbookError {
    /// The CLI exit code this error maps to.
    pub fn exit_code(&self) -> ExitCode {
        match self {
            Self::CustomerNotFound(_) | Self::HotelNotFound(_) | Self::ReservationNotFound(_) => {
                ExitCode::NotFound
            }
            Self::MissingField(_) | Self::UnknownField { .. } | Self::Validation(_) => {
                ExitCode::InvalidArgs
            }
            Self::DuplicateId { .. } => ExitCode::Conflict,
            Self::CorruptStore { .. } | Self::Persist { .. } | Self::Io(_) => {
                ExitCode::FileSystemError
            }
            _ => ExitCode::GeneralError,
        }
    }
}

/// Exit codes used by the CLI.
#[repr(i32)]
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ExitCode {
    Success = 0,
    GeneralError = 1,
    NotFound = 2,
    InvalidArgs = 3,
    FileSystemError = 4,
    Conflict = 7,
}

pub type Result<T> = std::result::Result<T, HotelbookError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_exit_codes() {
        assert_eq!(HotelbookError::HotelNotFound(3).exit_code(), ExitCode::NotFound);
        assert_eq!(
            HotelbookError::DuplicateId { entity: "hotel", id: 1 }.exit_code(),
            ExitCode::Conflict
        );
        assert_eq!(
            HotelbookError::MissingField("name".into()).exit_code(),
            ExitCode::InvalidArgs
        );
        assert_eq!(ExitCode::FileSystemError as i32, 4);
    }
}
