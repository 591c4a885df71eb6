//! # Options
//!
//! Option keys persisted in the [`ConfigStore`] and the site configuration
//! read from them. Every option is absent by default.

use crate::Result;
use crate::keys::decode_multikey;
use crate::store::ConfigStore;
use crate::web::Domain;

/// The site's AT Protocol handle, e.g. `alice.bsky.social`.
pub const SITE_HANDLE: &str = "did_web_handle";
/// The AT Protocol Personal Data Server endpoint advertised by the site.
pub const SITE_PDS_ENDPOINT: &str = "did_web_pds_endpoint";
/// The site's multibase public key, entered by hand or derived from the site
/// keypair.
pub const SITE_PUBLIC_KEY_MULTIBASE: &str = "did_web_public_key_multibase";
/// The site's private key.
pub const SITE_PRIVATE_KEY: &str = "did_web_private_key";
/// The site's public key.
pub const SITE_PUBLIC_KEY: &str = "did_web_public_key";
/// The component's private key.
pub const COMPONENT_PRIVATE_KEY: &str = "did_plugin_identity_private_key";
/// The component's public key.
pub const COMPONENT_PUBLIC_KEY: &str = "did_plugin_identity_public_key";
/// The component's multibase public key.
pub const COMPONENT_PUBLIC_KEY_MULTIBASE: &str = "did_plugin_identity_public_key_multibase";

/// All option keys written by this crate.
pub const ALL: [&str; 8] = [
    SITE_HANDLE,
    SITE_PDS_ENDPOINT,
    SITE_PUBLIC_KEY_MULTIBASE,
    SITE_PRIVATE_KEY,
    SITE_PUBLIC_KEY,
    COMPONENT_PRIVATE_KEY,
    COMPONENT_PUBLIC_KEY,
    COMPONENT_PUBLIC_KEY_MULTIBASE,
];

/// Site settings used to assemble the site DID document.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct SiteConfig {
    /// The origin the site is served from.
    pub domain: Domain,

    /// AT Protocol handle, without the `at://` scheme.
    pub handle: Option<String>,

    /// PDS endpoint. Defaults to the site origin.
    pub pds_endpoint: String,

    /// Multibase public key entered by the operator. Takes precedence over a
    /// key derived from the site keypair.
    pub public_key_multibase: Option<String>,
}

impl SiteConfig {
    /// Configuration with nothing set: no handle, no manual key, the site
    /// origin as PDS endpoint.
    #[must_use]
    pub fn new(domain: Domain) -> Self {
        Self {
            pds_endpoint: domain.origin(),
            domain,
            handle: None,
            public_key_multibase: None,
        }
    }

    /// Read the site configuration from `store`. Empty values are treated as
    /// not set.
    ///
    /// # Errors
    ///
    /// Returns an error if the store cannot be read.
    pub fn load(store: &impl ConfigStore, domain: Domain) -> Result<Self> {
        let mut config = Self::new(domain);
        config.handle = non_empty(store.get(SITE_HANDLE)?);
        if let Some(endpoint) = non_empty(store.get(SITE_PDS_ENDPOINT)?) {
            config.pds_endpoint = endpoint;
        }
        config.public_key_multibase = non_empty(store.get(SITE_PUBLIC_KEY_MULTIBASE)?);

        if let Some(multikey) = &config.public_key_multibase {
            if decode_multikey(multikey).is_err() {
                tracing::warn!(multikey, "configured public key is not a secp256k1 multikey");
            }
        }
        Ok(config)
    }

    /// Set the handle.
    #[must_use]
    pub fn with_handle(mut self, handle: impl Into<String>) -> Self {
        self.handle = Some(handle.into());
        self
    }

    /// Set the PDS endpoint.
    #[must_use]
    pub fn with_pds_endpoint(mut self, endpoint: impl Into<String>) -> Self {
        self.pds_endpoint = endpoint.into();
        self
    }

    /// Set a manually entered multibase public key.
    #[must_use]
    pub fn with_public_key_multibase(mut self, multibase: impl Into<String>) -> Self {
        self.public_key_multibase = Some(multibase.into());
        self
    }
}

/// Delete every option this crate writes (site settings and both identities'
/// key material).
///
/// # Errors
///
/// Returns an error if the store fails to delete a value.
pub fn purge(store: &impl ConfigStore) -> Result<()> {
    for key in ALL {
        store.delete(key)?;
    }
    tracing::info!("removed all DID options");
    Ok(())
}

fn non_empty(value: Option<String>) -> Option<String> {
    value.map(|v| v.trim().to_string()).filter(|v| !v.is_empty())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::store::MemoryStore;

    #[test]
    fn defaults() {
        let config = SiteConfig::load(&MemoryStore::new(), Domain::new("example.com"))
            .expect("should load");
        assert_eq!(config.handle, None);
        assert_eq!(config.public_key_multibase, None);
        assert_eq!(config.pds_endpoint, "https://example.com");
    }

    #[test]
    fn empty_values_are_unset() {
        let store = MemoryStore::new();
        store.set(SITE_HANDLE, "").expect("should set");
        store.set(SITE_PDS_ENDPOINT, "  ").expect("should set");
        store.set(SITE_PUBLIC_KEY_MULTIBASE, "").expect("should set");

        let domain = Domain::new("example.com").with_path("/blog");
        let config = SiteConfig::load(&store, domain).expect("should load");
        assert_eq!(config.handle, None);
        assert_eq!(config.public_key_multibase, None);
        assert_eq!(config.pds_endpoint, "https://example.com/blog");
    }

    #[test]
    fn stored_values() {
        let store = MemoryStore::new();
        store.set(SITE_HANDLE, "alice.bsky.social").expect("should set");
        store.set(SITE_PDS_ENDPOINT, "https://custom-pds.example.com").expect("should set");
        store.set(SITE_PUBLIC_KEY_MULTIBASE, "zQ3shTestKey123").expect("should set");

        let config = SiteConfig::load(&store, Domain::new("example.com")).expect("should load");
        assert_eq!(config.handle.as_deref(), Some("alice.bsky.social"));
        assert_eq!(config.pds_endpoint, "https://custom-pds.example.com");
        assert_eq!(config.public_key_multibase.as_deref(), Some("zQ3shTestKey123"));
    }

    #[test]
    fn purge_removes_everything() {
        let store = MemoryStore::new();
        for key in ALL {
            store.set(key, "value").expect("should set");
        }
        store.set("unrelated_option", "kept").expect("should set");

        purge(&store).expect("should purge");
        assert_eq!(store.len(), 1);
        assert_eq!(store.get("unrelated_option").expect("should get").as_deref(), Some("kept"));
    }
}
