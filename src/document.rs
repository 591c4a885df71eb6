//! # DID Document
//!
//! A DID Document is a JSON-LD document that contains information related to a
//! DID. The documents issued here carry the fields AT Protocol verifiers look
//! for: a `Multikey` verification method and a PDS service endpoint.
//!
//! Key order in the serialized JSON follows field declaration order. Some
//! consumers parse documents naively and rely on it, so fields must not be
//! reordered.

mod builder;
mod issuer;
mod service;
mod verification;

use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

pub use self::builder::*;
pub use self::issuer::*;
pub use self::service::*;
pub use self::verification::*;
use crate::Result;

/// Contexts every issued document declares, in this order.
pub const CONTEXT: [&str; 3] = [
    "https://www.w3.org/ns/did/v1",
    "https://w3id.org/security/multikey/v1",
    "https://w3id.org/security/suites/secp256k1-2019/v1",
];

/// DID Document
#[derive(Clone, Debug, Default, Deserialize, Serialize, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct Document {
    /// The context of the DID document.
    #[serde(rename = "@context")]
    pub context: Vec<String>,

    /// The DID for a particular DID subject.
    pub id: String,

    /// Other identifiers for the subject of the DID, e.g. `at://<handle>`.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub also_known_as: Option<Vec<String>>,

    /// The DID of the entity authorized to make changes to the document.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub controller: Option<String>,

    /// Verification methods (public keys) bound to the DID.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub verification_method: Option<Vec<VerificationMethod>>,

    /// References to verification methods the subject authenticates with.
    ///
    /// <https://www.w3.org/TR/did-core/#authentication>
    #[serde(skip_serializing_if = "Option::is_none")]
    pub authentication: Option<Vec<String>>,

    /// References to verification methods the subject issues claims with.
    ///
    /// <https://www.w3.org/TR/did-core/#assertion>
    #[serde(skip_serializing_if = "Option::is_none")]
    pub assertion_method: Option<Vec<String>>,

    /// Ways of communicating with the DID subject.
    #[serde(default)]
    pub service: Vec<Service>,

    /// Members added by document transforms, serialized after the standard
    /// members in insertion order.
    #[serde(flatten)]
    pub additional: Map<String, Value>,
}

impl Document {
    /// Retrieve a service by its ID.
    #[must_use]
    pub fn service(&self, id: &str) -> Option<&Service> {
        self.service.iter().find(|s| s.id == id)
    }

    /// Retrieve a verification method by its ID.
    #[must_use]
    pub fn verification_method(&self, id: &str) -> Option<&VerificationMethod> {
        self.verification_method.as_ref()?.iter().find(|vm| vm.id == id)
    }

    /// Move members in `additional` that share a name with a standard member
    /// onto the standard member, replacing its value.
    ///
    /// # Errors
    ///
    /// Returns an error if such a member has the wrong shape, e.g. a string
    /// for `service`.
    pub fn normalize(self) -> Result<Self> {
        Ok(serde_json::from_value(serde_json::to_value(self)?)?)
    }

    /// Serialize the document as pretty-printed JSON. Forward slashes are not
    /// escaped. A member in `additional` that shares a standard member's name
    /// is written once, in the standard member's place.
    ///
    /// # Errors
    ///
    /// Returns an error if a transform added a value that cannot be serialized.
    pub fn to_json(&self) -> Result<String> {
        Ok(serde_json::to_string_pretty(&serde_json::to_value(self)?)?)
    }
}
