//! Persisted key material for one identity scope.

use super::{Keypair, Scope};
use crate::error::Err;
use crate::store::ConfigStore;
use crate::{Result, tracerr};

/// Key storage for a single [`Scope`], backed by a [`ConfigStore`].
#[derive(Clone, Debug)]
pub struct KeyStore<S: ConfigStore> {
    store: S,
    scope: Scope,
}

impl<S: ConfigStore> KeyStore<S> {
    /// Create a key store for `scope`.
    pub const fn new(store: S, scope: Scope) -> Self {
        Self { store, scope }
    }

    /// The scope this store reads and writes.
    pub const fn scope(&self) -> Scope {
        self.scope
    }

    /// Persist both halves of the keypair.
    ///
    /// Both values are read back after writing; the save only succeeds if the
    /// stored values equal what was written.
    ///
    /// # Errors
    ///
    /// Returns [`Err::PersistenceMismatch`] when the read-back differs, or a
    /// storage error if the store fails.
    pub fn save(&self, keypair: &Keypair) -> Result<()> {
        self.store.set(self.scope.private_key(), &keypair.private_key)?;
        self.store.set(self.scope.public_key(), &keypair.public_key)?;

        match self.load()? {
            Some(stored) if &stored == keypair => {
                tracing::debug!(scope = ?self.scope, "keypair saved");
                Ok(())
            }
            _ => tracerr!(Err::PersistenceMismatch, "{:?} keypair read back differs", self.scope),
        }
    }

    /// Load the keypair, if both halves are present.
    ///
    /// # Errors
    ///
    /// Returns an error if the store cannot be read.
    pub fn load(&self) -> Result<Option<Keypair>> {
        let Some(private_key) = self.store.get(self.scope.private_key())? else {
            return Ok(None);
        };
        let Some(public_key) = self.store.get(self.scope.public_key())? else {
            return Ok(None);
        };
        Ok(Some(Keypair {
            private_key,
            public_key,
        }))
    }

    /// Returns `true` if both the private and the public key are present.
    ///
    /// # Errors
    ///
    /// Returns an error if the store cannot be read.
    pub fn has_keypair(&self) -> Result<bool> {
        Ok(self.store.get(self.scope.private_key())?.is_some()
            && self.store.get(self.scope.public_key())?.is_some())
    }

    /// The stored public key (PEM), if any.
    ///
    /// # Errors
    ///
    /// Returns an error if the store cannot be read.
    pub fn public_key(&self) -> Result<Option<String>> {
        self.store.get(self.scope.public_key())
    }

    /// The stored multibase public key, if any: the cached key for the
    /// component, the operator's manual key for the site. Empty values count
    /// as absent.
    ///
    /// # Errors
    ///
    /// Returns an error if the store cannot be read.
    pub fn multibase(&self) -> Result<Option<String>> {
        Ok(self.store.get(self.scope.multibase())?.filter(|mb| !mb.trim().is_empty()))
    }

    /// Cache the multibase public key derived from the keypair.
    ///
    /// # Errors
    ///
    /// Returns [`Err::InvalidInput`] for a scope that does not cache its
    /// multibase key, or an error if the store cannot be written.
    pub fn save_multibase(&self, multibase: &str) -> Result<()> {
        if !self.scope.caches_multibase() {
            tracerr!(Err::InvalidInput, "{:?} multibase key is not cached", self.scope);
        }
        self.store.set(self.scope.multibase(), multibase)
    }

    /// Remove the private key, the public key and any cached multibase value
    /// for this scope. Deleting keys that do not exist is not an error.
    ///
    /// # Errors
    ///
    /// Returns an error if the store fails to delete a value.
    pub fn delete(&self) -> Result<()> {
        self.store.delete(self.scope.private_key())?;
        self.store.delete(self.scope.public_key())?;
        if self.scope.caches_multibase() {
            self.store.delete(self.scope.multibase())?;
        }
        tracing::debug!(scope = ?self.scope, "keypair deleted");
        Ok(())
    }
}
