//! # DID Web for AT Protocol
//!
//! Issues `did:web` DID documents for a site and for the software component
//! itself, with the fields AT Protocol (Bluesky) verifiers look for: an
//! `at://` handle in `alsoKnownAs`, a secp256k1 `Multikey` verification method
//! and the account's Personal Data Server endpoint.
//!
//! Key material and site settings are read through an injected [`ConfigStore`];
//! key generation and multibase encoding are pluggable strategies
//! ([`KeyGenerator`], [`MultibaseCodec`]).
//!
//! # Example
//!
//! ```
//! use did_web_atproto::{Issuer, MemoryStore, SiteConfig, Unavailable};
//! use did_web_atproto::web::Domain;
//!
//! let issuer = Issuer::new(MemoryStore::new(), Unavailable);
//! let config = SiteConfig::new(Domain::new("example.com")).with_handle("alice.bsky.social");
//!
//! let doc = issuer.site_document(&config).expect("should issue");
//! assert_eq!(doc.id, "did:web:example.com");
//! assert_eq!(doc.also_known_as, Some(vec!["at://alice.bsky.social".to_string()]));
//! ```

pub mod document;
pub mod error;
pub mod handlers;
pub mod identity;
pub mod keys;
pub mod options;
pub mod store;
pub mod web;

pub use self::document::{
    ComponentIdentity, Document, DocumentBuilder, Issuer, Profile, Service, Transform,
    VerificationMethod,
};
pub use self::error::Error;
pub use self::handlers::{DocumentResponse, Route};
pub use self::identity::{IdentityManager, PublicKeyExport};
pub use self::keys::{
    KeyGenerator, KeyStore, Keypair, MultibaseCodec, NoGenerator, Scope, Secp256k1Generator,
    Secp256k1Multikey, Unavailable,
};
pub use self::options::SiteConfig;
pub use self::store::{ConfigStore, MemoryStore};

/// Result type for DID document operations.
pub type Result<T, E = Error> = std::result::Result<T, E>;
