//! Test doubles for the capabilities `did-web-atproto` is injected with.

use std::sync::{Arc, Once};

use dashmap::DashMap;
use did_web_atproto::error::Err;
use did_web_atproto::{ConfigStore, KeyGenerator, Keypair, MultibaseCodec, Result};
use k256::SecretKey;
use k256::pkcs8::{EncodePrivateKey, EncodePublicKey, LineEnding};

/// Secret scalar behind [`fixed_keypair`].
pub const FIXED_SECRET: [u8; 32] = [7; 32];

/// Multikey of the public half of [`fixed_keypair`].
pub const FIXED_MULTIKEY: &str = "zQ3shXgWjVsCJsv9mBm6kVqFSjAnErMg3zG9CcyvmUCCaFRCr";

static INIT: Once = Once::new();

/// Install a `tracing` subscriber writing to the test output. Safe to call
/// from every test.
pub fn init_tracer() {
    INIT.call_once(|| {
        tracing_subscriber::fmt()
            .with_env_filter(tracing_subscriber::EnvFilter::from_default_env())
            .with_test_writer()
            .init();
    });
}

/// A deterministic secp256k1 keypair (PKCS#8 / SPKI PEM).
///
/// # Panics
///
/// Panics if the fixed secret cannot be exported, which never happens.
#[must_use]
pub fn fixed_keypair() -> Keypair {
    let secret = SecretKey::from_slice(&FIXED_SECRET).expect("valid scalar");
    let private_key = secret.to_pkcs8_pem(LineEnding::LF).expect("should export");
    let public_key = secret.public_key().to_public_key_pem(LineEnding::LF).expect("should export");
    Keypair::new(private_key.as_str(), public_key)
}

/// Always generates the same keypair.
#[derive(Clone, Debug)]
pub struct StaticGenerator(pub Keypair);

impl Default for StaticGenerator {
    fn default() -> Self {
        Self(fixed_keypair())
    }
}

impl KeyGenerator for StaticGenerator {
    fn generate(&self) -> Result<Keypair> {
        Ok(self.0.clone())
    }
}

/// Encodes every key as the same multibase value.
#[derive(Clone, Debug)]
pub struct FixedCodec(pub String);

impl MultibaseCodec for FixedCodec {
    fn encode(&self, _: &str) -> Result<String> {
        Ok(self.0.clone())
    }
}

/// A store that trims surrounding whitespace from every value it writes, so
/// PEM values (which end in a newline) never read back as written.
#[derive(Clone, Debug, Default)]
pub struct TrimmingStore {
    options: Arc<DashMap<String, String>>,
}

impl TrimmingStore {
    /// Create an empty store.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Number of keys currently set.
    #[must_use]
    pub fn len(&self) -> usize {
        self.options.len()
    }

    /// Returns `true` if no keys are set.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.options.is_empty()
    }
}

impl ConfigStore for TrimmingStore {
    fn get(&self, key: &str) -> Result<Option<String>> {
        Ok(self.options.get(key).map(|v| v.value().clone()))
    }

    fn set(&self, key: &str, value: &str) -> Result<()> {
        self.options.insert(key.to_string(), value.trim().to_string());
        Ok(())
    }

    fn delete(&self, key: &str) -> Result<()> {
        self.options.remove(key);
        Ok(())
    }
}

/// A store whose every operation fails.
#[derive(Clone, Copy, Debug, Default)]
pub struct BrokenStore;

impl ConfigStore for BrokenStore {
    fn get(&self, _: &str) -> Result<Option<String>> {
        Err(Err::StorageError.into())
    }

    fn set(&self, _: &str, _: &str) -> Result<()> {
        Err(Err::StorageError.into())
    }

    fn delete(&self, _: &str) -> Result<()> {
        Err(Err::StorageError.into())
    }
}
