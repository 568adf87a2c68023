use std::fmt;
use std::str::FromStr;

use rand::RngCore;
use rand::rngs::OsRng;
use secp256k1::{Message, Secp256k1, SecretKey, ecdsa::Signature};

use crate::error::{ChainError, Result};

/// Length of a compressed SEC1 public key.
pub const PUBLIC_KEY_LEN: usize = 33;

/// A participant's public key, compared structurally on its compressed form.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct PublicKey(secp256k1::PublicKey);

impl PublicKey {
    /// Compressed (33 byte) encoding. This is what goes into transaction hashes.
    pub fn to_bytes(&self) -> [u8; PUBLIC_KEY_LEN] {
        self.0.serialize()
    }

    pub fn to_hex(&self) -> String {
        hex::encode(self.to_bytes())
    }

    /// Parse a counterparty's key from its SEC1 encoding (compressed or not).
    pub fn from_slice(bytes: &[u8]) -> Result<Self> {
        secp256k1::PublicKey::from_slice(bytes)
            .map(PublicKey)
            .map_err(|e| ChainError::InvalidKey(e.to_string()))
    }

    pub(crate) fn inner(&self) -> &secp256k1::PublicKey {
        &self.0
    }
}

impl fmt::Display for PublicKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.to_hex())
    }
}

impl FromStr for PublicKey {
    type Err = ChainError;

    fn from_str(s: &str) -> Result<Self> {
        let bytes = hex::decode(s.trim()).map_err(|e| ChainError::InvalidKey(e.to_string()))?;
        Self::from_slice(&bytes)
    }
}

/// A participant of the ledger. Owns a secp256k1 key pair; the secret half
/// never leaves this type.
pub struct Identity {
    signer: SecretKey,
    public: PublicKey,
}

impl Identity {
    /// Generate a fresh key pair from the OS entropy source.
    pub fn generate() -> Result<Self> {
        Self::generate_with_rng(&mut OsRng)
    }

    /// Generate a key pair from the given entropy source.
    pub fn generate_with_rng<R: RngCore + ?Sized>(rng: &mut R) -> Result<Self> {
        let mut seed = [0u8; 32];
        rng.try_fill_bytes(&mut seed)
            .map_err(|e| ChainError::KeyGeneration(e.to_string()))?;
        let signer =
            SecretKey::from_slice(&seed).map_err(|e| ChainError::KeyGeneration(e.to_string()))?;

        let secp = Secp256k1::signing_only();
        let public = PublicKey(secp256k1::PublicKey::from_secret_key(&secp, &signer));

        Ok(Self { signer, public })
    }

    pub fn public_key(&self) -> PublicKey {
        self.public
    }

    /// Sign a 32-byte digest. Fresh entropy is mixed into the RFC 6979 nonce,
    /// so running out of it is an error rather than a silent downgrade.
    pub(crate) fn sign_digest<R: RngCore + ?Sized>(
        &self,
        digest: [u8; 32],
        rng: &mut R,
    ) -> Result<Signature> {
        let mut noncedata = [0u8; 32];
        rng.try_fill_bytes(&mut noncedata)
            .map_err(|e| ChainError::Randomness(e.to_string()))?;

        let secp = Secp256k1::signing_only();
        let msg = Message::from_digest(digest);
        Ok(secp.sign_ecdsa_with_noncedata(&msg, &self.signer, &noncedata))
    }
}

impl fmt::Debug for Identity {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Identity")
            .field("public_key", &self.public.to_hex())
            .finish_non_exhaustive()
    }
}

/// Check an ECDSA signature over `digest` against `key`.
pub(crate) fn verify_digest(key: &PublicKey, digest: [u8; 32], sig: &Signature) -> bool {
    let secp = Secp256k1::verification_only();
    let msg = Message::from_digest(digest);
    secp.verify_ecdsa(&msg, sig, key.inner()).is_ok()
}
