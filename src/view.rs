//! Serializable snapshots of a chain for display. Hashes and keys are hex,
//! timestamps RFC 3339. Not a storage format: nothing reads these back.

use chrono::{DateTime, Utc};
use serde::Serialize;

use crate::blockchain::{Block, Blockchain};
use crate::transaction::Transaction;

#[derive(Debug, Serialize)]
pub struct TransactionSummary {
    pub hash: String,
    pub sender: String,
    pub receiver: String,
    pub data: String, // lossy UTF-8
    pub signature: Option<String>,
    pub verified: bool,
}

#[derive(Debug, Serialize)]
pub struct BlockSummary {
    pub index: usize,
    pub hash: String,
    pub previous_hash: Option<String>,
    pub timestamp: DateTime<Utc>,
    pub nonce: u32,
    pub target: String,
    pub work_proven: bool,
    #[serde(skip_serializing_if = "String::is_empty")]
    pub data: String,
    pub transactions: Vec<TransactionSummary>,
}

#[derive(Debug, Serialize)]
pub struct ChainSummary {
    pub length: usize,
    pub difficulty: usize,
    pub valid: bool,
    pub blocks: Vec<BlockSummary>,
}

impl From<&Transaction> for TransactionSummary {
    fn from(tx: &Transaction) -> Self {
        Self {
            hash: tx.hash_hex(),
            sender: tx.sender().to_hex(),
            receiver: tx.receiver().to_hex(),
            data: String::from_utf8_lossy(tx.data()).into_owned(),
            signature: tx.signature().map(hex::encode),
            verified: tx.verify(),
        }
    }
}

impl BlockSummary {
    pub fn new(index: usize, block: &Block) -> Self {
        Self {
            index,
            hash: block.hash_hex(),
            previous_hash: block.previous_hash().map(hex::encode),
            timestamp: block.timestamp(),
            nonce: block.nonce(),
            target: block.target().to_string(),
            work_proven: block.work_proven(),
            data: String::from_utf8_lossy(block.data()).into_owned(),
            transactions: block.transactions().iter().map(Into::into).collect(),
        }
    }
}

impl From<&Blockchain> for ChainSummary {
    fn from(chain: &Blockchain) -> Self {
        Self {
            length: chain.len(),
            difficulty: chain.difficulty(),
            valid: chain.valid(),
            blocks: chain
                .iter()
                .enumerate()
                .map(|(i, b)| BlockSummary::new(i, b))
                .collect(),
        }
    }
}
