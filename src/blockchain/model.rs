use log::{debug, info, warn};

use super::DEFAULT_DIFFICULTY;
use super::block::{Block, BlockHash};
use crate::error::{ChainError, Result};

/// Simple in-memory blockchain with Proof-of-Work.
#[derive(Debug)]
pub struct Blockchain {
    blocks: Vec<Block>,
    difficulty: usize,
    target_prefix: String,
}

impl Blockchain {
    /// Create an empty chain whose blocks need `difficulty` leading zero hex
    /// characters. The difficulty is fixed for the chain's lifetime.
    pub fn new(difficulty: usize) -> Self {
        Self {
            blocks: Vec::new(),
            difficulty,
            target_prefix: "0".repeat(difficulty),
        }
    }

    fn tail_hash(&self) -> Option<BlockHash> {
        self.blocks.last().map(Block::hash)
    }

    /// Link a new, empty block onto the tail and hand it back for filling and
    /// mining. The block counts towards the chain immediately, mined or not.
    pub fn new_block(&mut self) -> &mut Block {
        self.add(Vec::new())
    }

    /// Like [`Blockchain::new_block`], with an opaque payload.
    pub fn add(&mut self, data: impl Into<Vec<u8>>) -> &mut Block {
        let block = Block::new(self.tail_hash(), self.target_prefix.clone(), data.into());
        self.blocks.push(block);
        debug!("linked block #{} (unmined)", self.blocks.len() - 1);
        let last = self.blocks.len() - 1;
        &mut self.blocks[last]
    }

    /// Build a detached block on top of the current tail. Nothing is linked
    /// until it is handed to [`Blockchain::append_mined`].
    pub fn prepare_block(&self, data: impl Into<Vec<u8>>) -> Block {
        Block::new(self.tail_hash(), self.target_prefix.clone(), data.into())
    }

    /// Commit a block from [`Blockchain::prepare_block`]. It must still extend
    /// the current tail and its hash must meet its own target.
    pub fn append_mined(&mut self, block: Block) -> Result<&Block> {
        let tail = self.tail_hash();
        if block.previous_hash() != tail.as_ref() {
            return Err(ChainError::StaleBlock {
                expected: tail.map(hex::encode).unwrap_or_default(),
                found: block.previous_hash().map(hex::encode).unwrap_or_default(),
            });
        }
        let hash = block.hash_hex();
        if !hash.starts_with(block.target()) {
            return Err(ChainError::InsufficientWork {
                hash,
                target: block.target().to_string(),
            });
        }

        self.blocks.push(block);
        info!("appended block #{} hash={}", self.blocks.len() - 1, hash);
        Ok(&self.blocks[self.blocks.len() - 1])
    }

    /// Whether a hex hash meets this chain's target prefix.
    pub fn work_proven(&self, hash_hex: &str) -> bool {
        hash_hex.starts_with(&self.target_prefix)
    }

    /// Validate the entire chain: every block meets its own target, and every
    /// block after the first points at the actual hash of its predecessor.
    /// An empty chain is valid.
    pub fn valid(&self) -> bool {
        let mut prev: Option<BlockHash> = None;
        for (index, block) in self.blocks.iter().enumerate() {
            let hash = block.hash();
            if !hex::encode(hash).starts_with(block.target()) {
                warn!("block #{index} fails proof-of-work (target {:?})", block.target());
                return false;
            }

            if index > 0 && block.previous_hash() != prev.as_ref() {
                warn!("block #{index} does not link to its predecessor");
                return false;
            }
            prev = Some(hash);
        }
        true
    }

    pub fn len(&self) -> usize {
        self.blocks.len()
    }

    pub fn is_empty(&self) -> bool {
        self.blocks.is_empty()
    }

    pub fn difficulty(&self) -> usize {
        self.difficulty
    }

    pub fn target_prefix(&self) -> &str {
        &self.target_prefix
    }

    pub fn last_block(&self) -> Option<&Block> {
        self.blocks.last()
    }

    pub fn get(&self, index: usize) -> Option<&Block> {
        self.blocks.get(index)
    }

    /// Front-to-back, read-only iteration.
    pub fn iter(&self) -> std::slice::Iter<'_, Block> {
        self.blocks.iter()
    }

    pub fn for_each<F: FnMut(&Block)>(&self, visitor: F) {
        self.blocks.iter().for_each(visitor);
    }
}

impl Default for Blockchain {
    fn default() -> Self {
        Self::new(DEFAULT_DIFFICULTY)
    }
}

impl<'a> IntoIterator for &'a Blockchain {
    type Item = &'a Block;
    type IntoIter = std::slice::Iter<'a, Block>;

    fn into_iter(self) -> Self::IntoIter {
        self.iter()
    }
}
