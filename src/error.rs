use thiserror::Error;

/// Errors surfaced by the ledger. Chain invalidity is not one of them:
/// `Blockchain::valid` answers that with a plain `bool`.
#[derive(Debug, Error)]
pub enum ChainError {
    #[error("key generation failed: {0}")]
    KeyGeneration(String),

    #[error("entropy source failed: {0}")]
    Randomness(String),

    #[error("invalid public key: {0}")]
    InvalidKey(String),

    #[error("can't sign transaction unless you're the sender")]
    NotSender,

    #[error("block does not extend the current tail (expected {expected}, found {found})")]
    StaleBlock { expected: String, found: String },

    #[error("block hash {hash} does not meet target prefix {target:?}")]
    InsufficientWork { hash: String, target: String },

    #[error("invalid configuration: {0}")]
    Config(String),

    #[error("serialization error: {0}")]
    Serialization(#[from] serde_json::Error),
}

pub type Result<T> = std::result::Result<T, ChainError>;
