//! Error types for cave generation.

use thiserror::Error;

/// Engine-wide error type.
///
/// Everything except [`Error::UnknownSymbol`] is a configuration error and is
/// raised before any block in the world is touched.
#[derive(Error, Debug)]
pub enum Error {
    /// I/O error
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// Serialization error
    #[error("Serialization error: {0}")]
    Serialization(String),

    /// A room parameter range is invalid
    #[error("Invalid {field} in {room} room: {reason}")]
    InvalidRange {
        /// Room type name
        room: &'static str,
        /// Offending parameter
        field: &'static str,
        /// What is wrong with it
        reason: String,
    },

    /// A required room parameter is absent
    #[error("Missing required field {field} in {room} room")]
    MissingField {
        /// Room type name
        room: &'static str,
        /// Missing parameter
        field: &'static str,
    },

    /// The `type` key names no known room
    #[error("Unknown room type: {0}")]
    UnknownRoomType(String),

    /// A room key is not exactly one character
    #[error("Invalid room symbol: {0:?}")]
    InvalidSymbol(String),

    /// Two rooms are registered under the same symbol
    #[error("Duplicate room symbol: {0:?}")]
    DuplicateSymbol(char),

    /// A cave description references a symbol with no room
    #[error("No room registered for symbol {symbol:?} at position {position}")]
    UnknownSymbol {
        /// The unresolved symbol
        symbol: char,
        /// Character index in the description string
        position: usize,
    },
}

impl Error {
    /// Returns true if this error was raised while validating configuration.
    pub fn is_config_error(&self) -> bool {
        !matches!(self, Self::UnknownSymbol { .. } | Self::Io(_))
    }
}

/// Result type alias using our Error type.
pub type Result<T> = std::result::Result<T, Error>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn unknown_symbol_is_structural() {
        let err = Error::UnknownSymbol {
            symbol: 'q',
            position: 3,
        };
        assert!(!err.is_config_error());
        assert_eq!(
            err.to_string(),
            "No room registered for symbol 'q' at position 3"
        );
    }

    #[test]
    fn range_error_message() {
        let err = Error::InvalidRange {
            room: "vertical",
            field: "length",
            reason: "max 2 < min 3".into(),
        };
        assert!(err.is_config_error());
        assert_eq!(
            err.to_string(),
            "Invalid length in vertical room: max 2 < min 3"
        );
    }
}
