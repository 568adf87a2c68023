use rand::RngCore;
use rand::rngs::OsRng;
use secp256k1::ecdsa::Signature;
use sha2::{Digest, Sha256};

use crate::error::{ChainError, Result};
use crate::identity::{Identity, PublicKey, verify_digest};

/// Size of the random salt drawn for every transaction.
pub const RANDOM_LEN: usize = 4;

/// A (potentially) signed message from one public key to another.
#[derive(Debug, Clone)]
pub struct Transaction {
    sender: PublicKey,
    receiver: PublicKey,
    data: Vec<u8>,
    /// Salt so that identical (sender, receiver, data) tuples hash differently.
    random: [u8; RANDOM_LEN],
    signature: Option<Signature>,
}

impl Transaction {
    /// Build an unsigned transaction, salting it from the OS entropy source.
    pub fn new(sender: PublicKey, receiver: PublicKey, data: impl Into<Vec<u8>>) -> Result<Self> {
        Self::new_with_rng(sender, receiver, data, &mut OsRng)
    }

    pub fn new_with_rng<R: RngCore + ?Sized>(
        sender: PublicKey,
        receiver: PublicKey,
        data: impl Into<Vec<u8>>,
        rng: &mut R,
    ) -> Result<Self> {
        let mut random = [0u8; RANDOM_LEN];
        rng.try_fill_bytes(&mut random)
            .map_err(|e| ChainError::Randomness(e.to_string()))?;

        Ok(Self {
            sender,
            receiver,
            data: data.into(),
            random,
            signature: None,
        })
    }

    /// Content hash over sender, receiver, data and salt, in that order.
    /// The signature is not part of it, so signing never changes it.
    pub fn hash(&self) -> [u8; 32] {
        let mut hasher = Sha256::new();
        hasher.update(self.sender.to_bytes());
        hasher.update(self.receiver.to_bytes());
        hasher.update(&self.data);
        hasher.update(self.random);
        hasher.finalize().into()
    }

    pub fn hash_hex(&self) -> String {
        hex::encode(self.hash())
    }

    /// Sign with `identity`, which must own the sender key. The secret key is
    /// never kept in the transaction, so it has to be presented every time.
    /// Overwrites any earlier signature.
    pub fn sign(&mut self, identity: &Identity) -> Result<()> {
        self.sign_with_rng(identity, &mut OsRng)
    }

    pub fn sign_with_rng<R: RngCore + ?Sized>(
        &mut self,
        identity: &Identity,
        rng: &mut R,
    ) -> Result<()> {
        if identity.public_key() != self.sender {
            return Err(ChainError::NotSender);
        }
        let signature = identity.sign_digest(self.hash(), rng)?;
        self.signature = Some(signature);
        Ok(())
    }

    /// True iff a signature is present and it checks out against the sender
    /// key and the content hash.
    pub fn verify(&self) -> bool {
        match &self.signature {
            Some(sig) => verify_digest(&self.sender, self.hash(), sig),
            None => false,
        }
    }

    pub fn is_signed(&self) -> bool {
        self.verify()
    }

    pub fn sender(&self) -> PublicKey {
        self.sender
    }

    pub fn receiver(&self) -> PublicKey {
        self.receiver
    }

    pub fn data(&self) -> &[u8] {
        &self.data
    }

    pub fn random(&self) -> [u8; RANDOM_LEN] {
        self.random
    }

    /// Compact `r || s` signature encoding, if signed.
    pub fn signature(&self) -> Option<[u8; 64]> {
        self.signature.as_ref().map(Signature::serialize_compact)
    }
}
