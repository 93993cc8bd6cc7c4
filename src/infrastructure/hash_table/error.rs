//! Hash table error definitions

use std::error::Error;
use std::fmt;

use super::cursor::Direction;

/// Hash table error types
///
/// Every failed operation reports one of these and leaves the table as it
/// was before the call.
#[derive(Debug)]
pub enum HashtableError {
    /// Zero buckets, zero slots per bucket or a growth factor that cannot grow
    InvalidCapacity(String),
    /// The key is already stored
    DuplicateKey,
    /// The key is not stored
    KeyNotFound,
    /// No entry can live at this position
    InvalidPosition { position: usize, capacity: usize },
    /// The cursor already sits on the end sentinel for this direction
    CursorAtEnd(Direction),
    /// The cursors belong to different tables
    ForeignCursor,
    /// Capacity arithmetic overflowed
    CapacityOverflow,
    /// I/O error while reading or writing a configuration file
    IoError(std::io::Error),
    /// Malformed configuration document
    ParseError(String),
}

impl fmt::Display for HashtableError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            HashtableError::InvalidCapacity(msg) => write!(f, "Invalid capacity: {}", msg),
            HashtableError::DuplicateKey => write!(f, "The key already exists"),
            HashtableError::KeyNotFound => write!(f, "The key does not exist"),
            HashtableError::InvalidPosition { position, capacity } => write!(
                f,
                "Invalid position {} for a table with capacity {}",
                position, capacity
            ),
            HashtableError::CursorAtEnd(direction) => {
                write!(f, "Cursor is already at the {} end", direction)
            }
            HashtableError::ForeignCursor => {
                write!(f, "Cursors point to different tables")
            }
            HashtableError::CapacityOverflow => write!(f, "Capacity overflow"),
            HashtableError::IoError(err) => write!(f, "I/O error: {}", err),
            HashtableError::ParseError(msg) => write!(f, "Parse error: {}", msg),
        }
    }
}

impl Error for HashtableError {
    fn source(&self) -> Option<&(dyn Error + 'static)> {
        match self {
            HashtableError::IoError(err) => Some(err),
            _ => None,
        }
    }
}

impl From<std::io::Error> for HashtableError {
    fn from(err: std::io::Error) -> Self {
        HashtableError::IoError(err)
    }
}

impl From<serde_json::Error> for HashtableError {
    fn from(err: serde_json::Error) -> Self {
        HashtableError::ParseError(err.to_string())
    }
}

/// Result type for hash table operations
pub type HashtableResult<T> = Result<T, HashtableError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_hashtable_error_display() {
        let err = HashtableError::InvalidCapacity("zero buckets".to_string());
        assert_eq!(err.to_string(), "Invalid capacity: zero buckets");

        let err = HashtableError::InvalidPosition {
            position: 20,
            capacity: 20,
        };
        assert_eq!(
            err.to_string(),
            "Invalid position 20 for a table with capacity 20"
        );

        let err = HashtableError::CursorAtEnd(Direction::Backward);
        assert_eq!(err.to_string(), "Cursor is already at the backward end");
    }

    #[test]
    fn test_hashtable_error_from_io() {
        let io_err = std::io::Error::new(std::io::ErrorKind::NotFound, "file not found");
        let err: HashtableError = io_err.into();
        assert!(matches!(err, HashtableError::IoError(_)));
        assert!(err.source().is_some());
    }

    #[test]
    fn test_hashtable_error_from_json() {
        let json_err = serde_json::from_str::<u32>("not a number").unwrap_err();
        let err: HashtableError = json_err.into();
        assert!(matches!(err, HashtableError::ParseError(_)));
    }
}
