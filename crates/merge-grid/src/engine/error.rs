/// Broad classification of engine errors.
///
/// Every error is a synchronous contract violation at the call that raised it;
/// none of them are retryable.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorKind {
    /// The board is in the wrong lifecycle state for the call.
    InvalidState,
    /// An argument is outside the accepted domain.
    InvalidArgument,
}

#[derive(thiserror::Error, Debug, Clone, PartialEq, Eq)]
pub enum EngineError {
    #[error("board already started")]
    AlreadyStarted,
    #[error("unknown direction bits {0:#x}")]
    UnknownDirection(u8),
    #[error("can't spawn {requested} tiles when only {available} cells are free")]
    NotEnoughFreeCells { requested: usize, available: usize },
    #[error("invalid board dimensions {rows}x{columns}")]
    InvalidDimensions { rows: usize, columns: usize },
    #[error("invalid tile value {0}: must be a power of two >= 2")]
    InvalidTileValue(u32),
    #[error("expected {expected} cell values, got {actual}")]
    ShapeMismatch { expected: usize, actual: usize },
    #[error("four_percent must be within 0..=100, got {0}")]
    InvalidSpawnPolicy(u32),
}

impl EngineError {
    pub fn kind(&self) -> ErrorKind {
        match self {
            EngineError::AlreadyStarted => ErrorKind::InvalidState,
            EngineError::UnknownDirection(_)
            | EngineError::NotEnoughFreeCells { .. }
            | EngineError::InvalidDimensions { .. }
            | EngineError::InvalidTileValue(_)
            | EngineError::ShapeMismatch { .. }
            | EngineError::InvalidSpawnPolicy(_) => ErrorKind::InvalidArgument,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn kinds_follow_contract() {
        assert_eq!(EngineError::AlreadyStarted.kind(), ErrorKind::InvalidState);
        assert_eq!(
            EngineError::UnknownDirection(3).kind(),
            ErrorKind::InvalidArgument
        );
        assert_eq!(
            EngineError::NotEnoughFreeCells {
                requested: 2,
                available: 1
            }
            .kind(),
            ErrorKind::InvalidArgument
        );
    }

    #[test]
    fn messages_carry_details() {
        let err = EngineError::NotEnoughFreeCells {
            requested: 3,
            available: 1,
        };
        assert_eq!(
            err.to_string(),
            "can't spawn 3 tiles when only 1 cells are free"
        );
        assert_eq!(
            EngineError::UnknownDirection(0x10).to_string(),
            "unknown direction bits 0x10"
        );
    }
}
