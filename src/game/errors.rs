use thiserror::Error;

/// Errors raised by the progression core and its persistence layer.
///
/// Persistence variants wrap the backend failures. The remaining variants
/// describe a rejected operation: the engine has already posted a
/// notification and left state untouched when one of those is returned.
#[derive(Debug, Error)]
pub enum GameError {
    /// Wrapper around sled's error type.
    #[error("sled error: {0}")]
    Sled(#[from] sled::Error),

    /// Wrapper around bincode serialization and deserialization errors.
    #[error("serialization error: {0}")]
    Bincode(#[from] bincode::Error),

    /// Wrapper around JSON snapshot errors.
    #[error("json error: {0}")]
    Json(#[from] serde_json::Error),

    /// Wrapper around IO errors (directory creation, file locks, etc.).
    #[error("io error: {0}")]
    Io(#[from] std::io::Error),

    /// Returned when a referenced record is not present.
    #[error("record not found: {0}")]
    NotFound(String),

    /// Returned when deserializing a snapshot with an unexpected schema version.
    #[error("schema mismatch for {entity}: expected {expected}, got {found}")]
    SchemaMismatch {
        entity: &'static str,
        expected: u8,
        found: u8,
    },

    /// Not enough currency to pay for a draw batch
    #[error("insufficient {currency}: need {needed}, have {available}")]
    InsufficientFunds {
        currency: &'static str,
        needed: u64,
        available: u64,
    },

    /// Draw batches must contain at least one item
    #[error("draw count must be at least 1")]
    InvalidDrawCount,

    /// Attempt to remove the mandatory daily quest
    #[error("quest {0} is protected and cannot be removed")]
    ProtectedQuest(String),

    /// Rejected profile name
    #[error("invalid name: {0}")]
    InvalidName(String),

    /// Rejected free-form input (titles, weights, plan definitions)
    #[error("invalid input: {0}")]
    InvalidInput(String),

    /// Training operation issued while no session is running
    #[error("no training session is active")]
    NoActiveSession,

    /// `start` issued while a session is already running
    #[error("a training session is already active")]
    SessionAlreadyActive,

    /// Edit issued while no archived log is open for editing
    #[error("no archived log is open for editing")]
    NotEditing,
}

impl GameError {
    /// True for rejected operations (as opposed to storage failures).
    pub fn is_rejection(&self) -> bool {
        !matches!(
            self,
            GameError::Sled(_)
                | GameError::Bincode(_)
                | GameError::Json(_)
                | GameError::Io(_)
                | GameError::SchemaMismatch { .. }
        )
    }
}
