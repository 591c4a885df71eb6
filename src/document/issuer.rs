//! Issues the site and component DID documents from stored configuration and
//! key material.

use std::fmt::{Debug, Formatter};

use super::{Document, DocumentBuilder, ServiceBuilder, VerificationMethodBuilder};
use crate::Result;
use crate::error::Err;
use crate::keys::{KeyStore, MultibaseCodec, Scope, Unavailable};
use crate::options::SiteConfig;
use crate::store::ConfigStore;

/// The component's own DID.
pub const COMPONENT_DID: &str = "did:web:github.com:pfefferle:wordpress-did";

/// The component's homepage, also its source repository.
pub const COMPONENT_HOMEPAGE: &str = "https://github.com/pfefferle/wordpress-did";

/// Advertised in the component document until a component key is generated.
pub const PLACEHOLDER_MULTIBASE: &str = "zTODO_GENERATE_KEY";

/// A function applied to the site document before it is returned.
pub type Transform = Box<dyn Fn(Document) -> Document + Send + Sync>;

/// The fixed identity of the software component.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct ComponentIdentity {
    /// The component's DID.
    pub did: String,

    /// Where the component is published.
    pub homepage: String,

    /// The component's source repository.
    pub repository: String,
}

impl Default for ComponentIdentity {
    fn default() -> Self {
        Self {
            did: COMPONENT_DID.to_string(),
            homepage: COMPONENT_HOMEPAGE.to_string(),
            repository: COMPONENT_HOMEPAGE.to_string(),
        }
    }
}

/// Which document to issue.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum Profile {
    /// The configurable per-deployment site document. Transforms apply.
    Site(SiteConfig),

    /// The fixed component document. Transforms never apply.
    Component(ComponentIdentity),
}

/// Issues DID documents.
///
/// Site documents pass through the registered transforms, in registration
/// order, before being returned.
pub struct Issuer<S: ConfigStore, C: MultibaseCodec = Unavailable> {
    store: S,
    codec: C,
    transforms: Vec<Transform>,
}

impl<S: ConfigStore, C: MultibaseCodec> Debug for Issuer<S, C> {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Issuer")
            .field("transforms", &self.transforms.len())
            .finish_non_exhaustive()
    }
}

impl<S: ConfigStore, C: MultibaseCodec> Issuer<S, C> {
    /// Create an issuer reading key material from `store` and deriving
    /// multibase keys with `codec`.
    pub const fn new(store: S, codec: C) -> Self {
        Self {
            store,
            codec,
            transforms: Vec::new(),
        }
    }

    /// The store key material and site settings are read from.
    pub const fn store(&self) -> &S {
        &self.store
    }

    /// Register a transform for the site document. Transforms run in the order
    /// they were registered, each receiving the previous one's output.
    pub fn register(&mut self, transform: impl Fn(Document) -> Document + Send + Sync + 'static) {
        self.transforms.push(Box::new(transform));
    }

    /// Issue the document for `profile`.
    ///
    /// # Errors
    ///
    /// Returns an error if key material cannot be read from the store.
    pub fn document(&self, profile: &Profile) -> Result<Document> {
        match profile {
            Profile::Site(config) => self.site_document(config),
            Profile::Component(identity) => self.component_document(identity),
        }
    }

    /// Issue the site document.
    ///
    /// - `alsoKnownAs` is present only if a handle is configured
    /// - `verificationMethod` is present only if a multibase key resolves:
    ///   the operator's manual key first, then one derived from the site
    ///   keypair
    /// - `service` always advertises the PDS endpoint, the site origin unless
    ///   one is configured
    ///
    /// Blank settings count as not configured. Members a transform adds under
    /// a standard name replace the standard member.
    ///
    /// # Errors
    ///
    /// Returns an error if key material cannot be read from the store, or if a
    /// transform sets a standard member to a value of the wrong shape.
    pub fn site_document(&self, config: &SiteConfig) -> Result<Document> {
        let did = config.domain.did();
        let multibase = match non_blank(config.public_key_multibase.as_deref()) {
            Some(multibase) => Some(multibase.to_string()),
            None => self.derive_multibase(Scope::Site)?,
        };
        let endpoint = non_blank(Some(config.pds_endpoint.as_str()))
            .map_or_else(|| config.domain.origin(), ToString::to_string);

        let mut builder = DocumentBuilder::new();
        if let Some(handle) = non_blank(config.handle.as_deref()) {
            builder = builder.also_known_as(format!("at://{handle}"));
        }
        if let Some(multibase) = multibase {
            builder = builder.verification_method(
                VerificationMethodBuilder::new(multibase).key_id("atproto"),
            );
        }
        builder = builder.service(
            ServiceBuilder::new()
                .id("#atproto_pds")
                .service_type("AtprotoPersonalDataServer")
                .endpoint(endpoint),
        );

        let document = builder.build(&did)?;
        tracing::debug!(%did, transforms = self.transforms.len(), "issuing site document");

        self.transforms.iter().fold(document, |doc, transform| transform(doc)).normalize()
    }

    /// Issue the component document.
    ///
    /// The shape is fixed: the verification method is always present and
    /// advertises [`PLACEHOLDER_MULTIBASE`] until a component key exists.
    ///
    /// # Errors
    ///
    /// Returns an error if key material cannot be read from the store.
    pub fn component_document(&self, identity: &ComponentIdentity) -> Result<Document> {
        let keystore = KeyStore::new(self.store.clone(), Scope::Component);
        let multibase = match keystore.multibase()? {
            Some(multibase) => multibase,
            None => self
                .derive_multibase(Scope::Component)?
                .unwrap_or_else(|| PLACEHOLDER_MULTIBASE.to_string()),
        };

        tracing::debug!(did = %identity.did, "issuing component document");
        DocumentBuilder::new()
            .also_known_as(&identity.homepage)
            .controller(&identity.did)
            .verification_method(VerificationMethodBuilder::new(multibase).key_id("key-1"))
            .authentication("key-1")
            .assertion_method("key-1")
            .service(
                ServiceBuilder::new()
                    .id("#wordpress-plugin")
                    .service_type("WordPressPlugin")
                    .endpoint(&identity.homepage),
            )
            .service(
                ServiceBuilder::new()
                    .id("#repository")
                    .service_type("GitRepository")
                    .endpoint(&identity.repository),
            )
            .build(&identity.did)
    }

    // Multibase for the stored keypair of `scope`, if there is one and the
    // codec can encode it.
    fn derive_multibase(&self, scope: Scope) -> Result<Option<String>> {
        let keystore = KeyStore::new(self.store.clone(), scope);
        if !keystore.has_keypair()? {
            return Ok(None);
        }
        let Some(public_key) = keystore.public_key()? else {
            return Ok(None);
        };

        match self.codec.encode(&public_key) {
            Ok(multibase) => Ok(Some(multibase)),
            Err(e) if e.is(Err::EncodingUnavailable) => {
                tracing::warn!(?scope, "no multibase key available for stored keypair");
                Ok(None)
            }
            Err(e) => Err(e),
        }
    }
}

fn non_blank(value: Option<&str>) -> Option<&str> {
    value.map(str::trim).filter(|v| !v.is_empty())
}
