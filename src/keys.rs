//! # Keys
//!
//! Key material for the two identities this crate issues documents for: the
//! site identity and the component's own identity. Each identity owns its own
//! keypair, stored under its own option keys.

mod codec;
mod generate;
mod keystore;

use std::fmt::{Debug, Formatter};

pub use self::codec::*;
pub use self::generate::*;
pub use self::keystore::*;
use crate::options;

/// A private/public keypair, both halves PEM encoded.
#[derive(Clone, PartialEq, Eq)]
pub struct Keypair {
    /// Private key (PKCS#8 PEM).
    pub private_key: String,

    /// Public key (SPKI PEM).
    pub public_key: String,
}

impl Keypair {
    /// Create a keypair from its PEM encoded halves.
    pub fn new(private_key: impl Into<String>, public_key: impl Into<String>) -> Self {
        Self {
            private_key: private_key.into(),
            public_key: public_key.into(),
        }
    }
}

// never print the private key
impl Debug for Keypair {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Keypair")
            .field("private_key", &"<redacted>")
            .field("public_key", &self.public_key)
            .finish()
    }
}

/// The identity a piece of key material belongs to.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum Scope {
    /// The site's own `did:web` identity.
    Site,

    /// The software component's fixed identity.
    Component,
}

impl Scope {
    /// Option key holding the private key.
    #[must_use]
    pub const fn private_key(self) -> &'static str {
        match self {
            Self::Site => options::SITE_PRIVATE_KEY,
            Self::Component => options::COMPONENT_PRIVATE_KEY,
        }
    }

    /// Option key holding the public key.
    #[must_use]
    pub const fn public_key(self) -> &'static str {
        match self {
            Self::Site => options::SITE_PUBLIC_KEY,
            Self::Component => options::COMPONENT_PUBLIC_KEY,
        }
    }

    /// Option key holding the multibase public key.
    ///
    /// For the site this is the key an operator enters by hand; it is never
    /// written by key management.
    #[must_use]
    pub const fn multibase(self) -> &'static str {
        match self {
            Self::Site => options::SITE_PUBLIC_KEY_MULTIBASE,
            Self::Component => options::COMPONENT_PUBLIC_KEY_MULTIBASE,
        }
    }

    /// Whether the multibase key derived from a generated keypair is cached
    /// under [`Self::multibase`]. The site derives it on every read instead.
    #[must_use]
    pub const fn caches_multibase(self) -> bool {
        matches!(self, Self::Component)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn debug_redacts_private_key() {
        let keypair = Keypair::new("secret-pem", "public-pem");
        let printed = format!("{keypair:?}");
        assert!(!printed.contains("secret-pem"));
        assert!(printed.contains("public-pem"));
    }

    #[test]
    fn scopes_are_disjoint() {
        let site = [Scope::Site.private_key(), Scope::Site.public_key(), Scope::Site.multibase()];
        for key in [
            Scope::Component.private_key(),
            Scope::Component.public_key(),
            Scope::Component.multibase(),
        ] {
            assert!(!site.contains(&key));
        }
        assert!(!Scope::Site.caches_multibase());
        assert!(Scope::Component.caches_multibase());
    }
}
