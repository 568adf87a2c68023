//! A minimal append-only ledger: hash-linked blocks admitted by a
//! proof-of-work puzzle and carrying ECDSA-signed transactions.
//!
//! ```
//! use pow_ledger::{Blockchain, Identity};
//!
//! let mut chain = Blockchain::new(2);
//! let me = Identity::generate()?;
//! let you = Identity::generate()?;
//!
//! let block = chain.new_block();
//! block.append_transaction(&me, you.public_key(), "why hello there!")?;
//! block.mine();
//!
//! assert!(chain.valid());
//! # Ok::<(), pow_ledger::ChainError>(())
//! ```

#![forbid(unsafe_code)]

pub mod blockchain;
pub mod config;
pub mod error;
pub mod identity;
pub mod transaction;
pub mod view;

pub use blockchain::{Block, Blockchain, DEFAULT_DIFFICULTY};
pub use error::{ChainError, Result};
pub use identity::{Identity, PublicKey};
pub use transaction::Transaction;
