//! Key generation capability.

use k256::SecretKey;
use k256::pkcs8::{EncodePrivateKey, EncodePublicKey, LineEnding};
use rand::rngs::OsRng;

use super::Keypair;
use crate::error::Err;
use crate::{Result, tracerr};

/// Generates a new keypair for an identity.
pub trait KeyGenerator: Send + Sync {
    /// Generate a new keypair.
    ///
    /// # Errors
    ///
    /// Returns [`Err::GenerationUnavailable`] if no keypair can be produced.
    fn generate(&self) -> Result<Keypair>;
}

/// A generator for hosts without key generation support. Operators then
/// create keys externally and enter the multibase public key by hand.
#[derive(Clone, Copy, Debug, Default)]
pub struct NoGenerator;

impl KeyGenerator for NoGenerator {
    fn generate(&self) -> Result<Keypair> {
        tracerr!(Err::GenerationUnavailable, "no key generation capability configured")
    }
}

/// Generates secp256k1 keypairs: the private key as PKCS#8 PEM and the public
/// key as SPKI PEM.
#[derive(Clone, Copy, Debug, Default)]
pub struct Secp256k1Generator;

impl KeyGenerator for Secp256k1Generator {
    fn generate(&self) -> Result<Keypair> {
        let secret_key = SecretKey::random(&mut OsRng);

        let private_key = match secret_key.to_pkcs8_pem(LineEnding::LF) {
            Ok(pem) => pem.as_str().to_owned(),
            Err(e) => tracerr!(Err::GenerationUnavailable, "failed to export private key: {e}"),
        };
        let public_key = match secret_key.public_key().to_public_key_pem(LineEnding::LF) {
            Ok(pem) => pem,
            Err(e) => tracerr!(Err::GenerationUnavailable, "failed to export public key: {e}"),
        };

        Ok(Keypair {
            private_key,
            public_key,
        })
    }
}
