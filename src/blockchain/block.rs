use std::fmt;

use chrono::{DateTime, Utc};
use log::debug;
use rand::RngCore;
use rand::rngs::OsRng;
use sha2::{Digest, Sha256};

use crate::error::Result;
use crate::identity::{Identity, PublicKey};
use crate::transaction::Transaction;

/// SHA-256 digest of a block.
pub type BlockHash = [u8; 32];

/// A block holding either an opaque payload, a list of signed transactions,
/// or both.
#[derive(Debug, Clone)]
pub struct Block {
    previous_hash: Option<BlockHash>, // None for the first block
    timestamp: DateTime<Utc>,
    nonce: u32, // Proof-of-Work nonce
    data: Vec<u8>,
    transactions: Vec<Transaction>,
    target: String, // required hex prefix, fixed at creation
}

impl Block {
    /// Create an unmined block. Only the chain hands these out, so the
    /// previous hash and target always come from the chain's tail and policy.
    pub(crate) fn new(previous_hash: Option<BlockHash>, target: String, data: Vec<u8>) -> Self {
        Self {
            previous_hash,
            timestamp: Utc::now(),
            nonce: 0,
            data,
            transactions: Vec::new(),
            target,
        }
    }

    /// Compute the SHA-256 hash over previous hash, timestamp, nonce (4 bytes
    /// little-endian), payload and each transaction hash in insertion order.
    /// The previous hash is tagged and the payload and transaction list are
    /// length-prefixed, so no field can bleed into its neighbour.
    /// Recomputed on every call.
    pub fn hash(&self) -> BlockHash {
        let mut hasher = Sha256::new();
        match &self.previous_hash {
            Some(prev) => {
                hasher.update([1u8]);
                hasher.update(prev);
            }
            None => hasher.update([0u8]),
        }
        hasher.update(self.timestamp.timestamp().to_le_bytes());
        hasher.update(self.timestamp.timestamp_subsec_nanos().to_le_bytes());
        hasher.update(self.nonce.to_le_bytes());
        hasher.update((self.data.len() as u64).to_le_bytes());
        hasher.update(&self.data);
        hasher.update((self.transactions.len() as u64).to_le_bytes());
        for tx in &self.transactions {
            hasher.update(tx.hash());
        }
        hasher.finalize().into()
    }

    pub fn hash_hex(&self) -> String {
        hex::encode(self.hash())
    }

    /// Whether the hex hash starts with this block's own target prefix.
    pub fn work_proven(&self) -> bool {
        self.hash_hex().starts_with(&self.target)
    }

    /// Build a transaction from `identity` to `receiver`, sign it, and append
    /// it. Changes the block hash, so mine afterwards.
    pub fn append_transaction(
        &mut self,
        identity: &Identity,
        receiver: PublicKey,
        data: impl Into<Vec<u8>>,
    ) -> Result<&Transaction> {
        self.append_transaction_with_rng(identity, receiver, data, &mut OsRng)
    }

    pub fn append_transaction_with_rng<R: RngCore + ?Sized>(
        &mut self,
        identity: &Identity,
        receiver: PublicKey,
        data: impl Into<Vec<u8>>,
        rng: &mut R,
    ) -> Result<&Transaction> {
        let mut tx = Transaction::new_with_rng(identity.public_key(), receiver, data, rng)?;
        tx.sign_with_rng(identity, rng)?;
        self.transactions.push(tx);
        Ok(&self.transactions[self.transactions.len() - 1])
    }

    /// Perform Proof-of-Work: bump the nonce until the hex hash starts with
    /// the target prefix, and return that hash. A block that already
    /// satisfies its target is left untouched.
    pub fn mine(&mut self) -> String {
        let mut hash = self.hash_hex();
        while !hash.starts_with(&self.target) {
            self.nonce = self.nonce.wrapping_add(1);
            hash = self.hash_hex();
        }
        debug!("mined block nonce={} hash={}", self.nonce, hash);
        hash
    }

    pub fn previous_hash(&self) -> Option<&BlockHash> {
        self.previous_hash.as_ref()
    }

    pub fn timestamp(&self) -> DateTime<Utc> {
        self.timestamp
    }

    pub fn nonce(&self) -> u32 {
        self.nonce
    }

    pub fn data(&self) -> &[u8] {
        &self.data
    }

    pub fn transactions(&self) -> &[Transaction] {
        &self.transactions
    }

    pub fn target(&self) -> &str {
        &self.target
    }
}

impl fmt::Display for Block {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "Block {{ hash: {}, prev: {}, time: {}, nonce: {}, txs: {} }}",
            self.hash_hex(),
            self.previous_hash.map(hex::encode).unwrap_or_default(),
            self.timestamp.to_rfc3339(),
            self.nonce,
            self.transactions.len()
        )
    }
}

#[cfg(test)]
impl Block {
    pub(crate) fn data_mut(&mut self) -> &mut Vec<u8> {
        &mut self.data
    }

    pub(crate) fn transactions_mut(&mut self) -> &mut Vec<Transaction> {
        &mut self.transactions
    }
}
