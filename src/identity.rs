//! # Identity Lifecycle
//!
//! Generate, inspect, export and delete the keypair of one identity: the site
//! or the component. Each manager is bound to a single [`Scope`] and never
//! touches the other scope's key material.
//!
//! Mutating operations perform no authorization of their own. Callers exposing
//! them (an admin UI, an HTTP endpoint) must check the caller's privileges
//! first.

use serde::{Deserialize, Serialize};

use crate::document::ComponentIdentity;
use crate::error::Err;
use crate::keys::{KeyGenerator, KeyStore, Keypair, MultibaseCodec, Scope};
use crate::store::ConfigStore;
use crate::web::Domain;
use crate::{Result, tracerr};

/// The public half of an identity, as shown to an operator.
#[derive(Clone, Debug, Default, Deserialize, Serialize, PartialEq, Eq)]
pub struct PublicKeyExport {
    /// Public key (PEM).
    pub pem: String,

    /// Multibase public key: the stored one, otherwise derived from the PEM.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub multibase: Option<String>,

    /// The identity's DID.
    pub did: String,
}

/// Manages the keypair of a single identity.
#[derive(Clone, Debug)]
pub struct IdentityManager<S: ConfigStore, G: KeyGenerator, C: MultibaseCodec> {
    keystore: KeyStore<S>,
    generator: G,
    codec: C,
    did: String,
}

impl<S: ConfigStore, G: KeyGenerator, C: MultibaseCodec> IdentityManager<S, G, C> {
    /// Manager for the site identity served from `domain`.
    pub fn site(store: S, domain: &Domain, generator: G, codec: C) -> Self {
        Self {
            keystore: KeyStore::new(store, Scope::Site),
            generator,
            codec,
            did: domain.did(),
        }
    }

    /// Manager for the component's own identity.
    pub fn component(store: S, identity: &ComponentIdentity, generator: G, codec: C) -> Self {
        Self {
            keystore: KeyStore::new(store, Scope::Component),
            generator,
            codec,
            did: identity.did.clone(),
        }
    }

    /// The scope this manager operates on.
    pub const fn scope(&self) -> Scope {
        self.keystore.scope()
    }

    /// The identity's DID.
    pub fn did(&self) -> &str {
        &self.did
    }

    /// Generate and persist a new keypair, replacing any existing one.
    ///
    /// For the component the multibase public key is derived and cached when
    /// the codec supports the key. The site's multibase key is derived when
    /// read, so an operator's manual key is never overwritten. A stored
    /// keypair without a multibase key is a valid outcome.
    ///
    /// # Errors
    ///
    /// Returns [`Err::GenerationUnavailable`] if no keypair could be generated,
    /// in which case nothing is written. Returns [`Err::PersistenceMismatch`]
    /// if the stored keypair does not read back as written; stored state is
    /// then unknown and the caller should `delete` and retry.
    pub fn generate(&self) -> Result<()> {
        let keypair = self.generator.generate()?;
        self.keystore.save(&keypair)?;

        if self.scope().caches_multibase() {
            match self.derive_multibase(&keypair.public_key)? {
                Some(multibase) => self.keystore.save_multibase(&multibase)?,
                None => tracing::warn!(scope = ?self.scope(), "no multibase key for keypair"),
            }
        }

        tracing::info!(scope = ?self.scope(), did = %self.did, "generated keypair");
        Ok(())
    }

    /// Delete the current keypair and generate a new one.
    ///
    /// # Errors
    ///
    /// See [`Self::generate`]. The old keypair is gone even if generation
    /// fails.
    pub fn regenerate(&self) -> Result<()> {
        self.delete()?;
        self.generate()
    }

    /// Returns `true` if both halves of the keypair are stored.
    ///
    /// # Errors
    ///
    /// Returns an error if the store cannot be read.
    pub fn has_identity(&self) -> Result<bool> {
        self.keystore.has_keypair()
    }

    /// The stored keypair.
    ///
    /// # Errors
    ///
    /// Returns [`Err::NotFound`] if no keypair has been generated.
    pub fn keypair(&self) -> Result<Keypair> {
        let Some(keypair) = self.keystore.load()? else {
            tracerr!(Err::NotFound, "no {:?} keypair has been generated", self.scope());
        };
        Ok(keypair)
    }

    /// The public key, its multibase form and the DID, or `None` if there is
    /// no identity.
    ///
    /// The multibase key is the stored one (for the site, the operator's
    /// manual key) or else one derived from the public key.
    ///
    /// # Errors
    ///
    /// Returns an error if the store cannot be read.
    pub fn export_public_key(&self) -> Result<Option<PublicKeyExport>> {
        if !self.has_identity()? {
            return Ok(None);
        }
        let Some(pem) = self.keystore.public_key()? else {
            return Ok(None);
        };

        let multibase = match self.keystore.multibase()? {
            Some(multibase) => Some(multibase),
            None => self.derive_multibase(&pem)?,
        };

        Ok(Some(PublicKeyExport {
            pem,
            multibase,
            did: self.did.clone(),
        }))
    }

    /// Delete the keypair and any cached multibase key. Deleting a missing
    /// identity is not an error.
    ///
    /// # Errors
    ///
    /// Returns an error if the store fails to delete a value.
    pub fn delete(&self) -> Result<()> {
        self.keystore.delete()?;
        tracing::info!(scope = ?self.scope(), did = %self.did, "deleted keypair");
        Ok(())
    }

    // `None` when the codec cannot encode the key.
    fn derive_multibase(&self, public_key: &str) -> Result<Option<String>> {
        match self.codec.encode(public_key) {
            Ok(multibase) => Ok(Some(multibase)),
            Err(e) if e.is(Err::EncodingUnavailable) => Ok(None),
            Err(e) => Err(e),
        }
    }
}
