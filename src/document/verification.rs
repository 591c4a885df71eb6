//! # Verification Methods
//!
//! A DID document can express verification methods, such as cryptographic
//! public keys, which can be used to authenticate or authorize interactions
//! with the DID subject.

use serde::{Deserialize, Serialize};

/// Verification method type for multibase encoded keys.
pub const MULTIKEY: &str = "Multikey";

/// A public key bound to a DID, encoded as a `Multikey`.
#[derive(Clone, Debug, Default, Deserialize, Serialize, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct VerificationMethod {
    /// A DID URL that identifies the verification method.
    pub id: String,

    /// The verification method type.
    #[serde(rename = "type")]
    pub type_: String,

    /// The DID of the controller of the verification method.
    pub controller: String,

    /// The public key encoded as a Multibase.
    pub public_key_multibase: String,
}

/// A builder for creating a verification method.
#[derive(Clone, Debug)]
pub struct VerificationMethodBuilder {
    multibase: String,
    key_id: String,
}

impl VerificationMethodBuilder {
    /// Creates a new `VerificationMethodBuilder` for a multibase public key.
    #[must_use]
    pub fn new(multibase: impl Into<String>) -> Self {
        Self {
            multibase: multibase.into(),
            key_id: "key-0".to_string(),
        }
    }

    /// The fragment appended to the DID to form the method ID, e.g. `atproto`
    /// for `did:web:example.com#atproto`.
    #[must_use]
    pub fn key_id(mut self, key_id: impl Into<String>) -> Self {
        self.key_id = key_id.into();
        self
    }

    /// Build the verification method for `did`, which is also its controller.
    pub(crate) fn build(self, did: &str) -> VerificationMethod {
        VerificationMethod {
            id: format!("{did}#{}", self.key_id),
            type_: MULTIKEY.to_string(),
            controller: did.to_string(),
            public_key_multibase: self.multibase,
        }
    }
}
