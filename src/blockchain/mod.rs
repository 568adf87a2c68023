pub mod block;
pub mod model;

pub use block::{Block, BlockHash};
pub use model::Blockchain;

/// Default Proof-of-Work difficulty (number of leading zero hex characters).
pub const DEFAULT_DIFFICULTY: usize = 2;

/// Longest satisfiable target: a SHA-256 hash has 64 hex characters.
pub const MAX_DIFFICULTY: usize = 64;
