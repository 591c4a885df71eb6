//! # Handlers
//!
//! Maps request paths to DID documents and renders the HTTP response, without
//! tying the crate to a particular web framework. Hosts call [`handle`] for
//! every request and fall through to their own routing when it returns `None`.

use std::fmt::{self, Display};

use serde::{Deserialize, Serialize};

use crate::Result;
use crate::document::{ComponentIdentity, Issuer, Profile};
use crate::keys::MultibaseCodec;
use crate::options::SiteConfig;
use crate::store::ConfigStore;
use crate::web::Domain;

/// Where the site document is served.
pub const SITE_DOCUMENT_PATH: &str = "/.well-known/did.json";

/// Where the component document is served.
pub const COMPONENT_DOCUMENT_PATH: &str = "/did-plugin/did.json";

/// Media type of every document response.
pub const CONTENT_TYPE: &str = "application/json";

/// The document a request path resolves to.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Route {
    /// The site's `did:web` document.
    Site,

    /// The component's own document.
    Component,
}

impl Display for Route {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Site => write!(f, "site"),
            Self::Component => write!(f, "component"),
        }
    }
}

/// A rendered DID document ready to be written to the client.
#[derive(Clone, Debug, Default, Deserialize, Serialize, PartialEq, Eq)]
pub struct DocumentResponse {
    /// Response headers, in the order they should be sent.
    pub headers: Vec<(String, String)>,

    /// Pretty-printed JSON document.
    pub body: String,
}

impl DocumentResponse {
    /// The value of header `name` (case-insensitive), if set.
    #[must_use]
    pub fn header(&self, name: &str) -> Option<&str> {
        self.headers.iter().find(|(n, _)| n.eq_ignore_ascii_case(name)).map(|(_, v)| v.as_str())
    }
}

/// Resolve a request path to the document it serves, if any.
///
/// The site document is served from `/.well-known/did.json` and, when the site
/// lives under a subdirectory, from `<path>/did.json` as `did:web` resolvers
/// expect. The query string is ignored.
#[must_use]
pub fn route(path: &str, domain: &Domain) -> Option<Route> {
    let path = path.split_once('?').map_or(path, |(p, _)| p);

    if path == COMPONENT_DOCUMENT_PATH {
        return Some(Route::Component);
    }
    if path == SITE_DOCUMENT_PATH {
        return Some(Route::Site);
    }

    let site_path = domain.path.as_deref()?.trim_matches('/');
    if site_path.is_empty() {
        return None;
    }
    let doc_path = path.strip_prefix('/')?.strip_suffix("/did.json")?;
    (doc_path.trim_end_matches('/') == site_path).then_some(Route::Site)
}

/// Render the document for `profile`.
///
/// Every response is `application/json`. The component document may also be
/// fetched cross-origin and cached for an hour.
///
/// # Errors
///
/// Returns an error if the document cannot be issued or serialized.
pub fn respond<S: ConfigStore, C: MultibaseCodec>(
    issuer: &Issuer<S, C>, profile: &Profile,
) -> Result<DocumentResponse> {
    let document = issuer.document(profile)?;

    let mut headers = vec![("Content-Type".to_string(), CONTENT_TYPE.to_string())];
    if let Profile::Component(_) = profile {
        headers.push(("Access-Control-Allow-Origin".to_string(), "*".to_string()));
        headers.push(("Cache-Control".to_string(), "max-age=3600".to_string()));
    }

    Ok(DocumentResponse {
        headers,
        body: document.to_json()?,
    })
}

/// Serve the DID document at `path`, or `None` if `path` is not a document
/// path. Site settings are read from the issuer's store on every request.
///
/// # Errors
///
/// Returns an error if settings cannot be read or the document cannot be
/// rendered.
pub fn handle<S: ConfigStore, C: MultibaseCodec>(
    issuer: &Issuer<S, C>, domain: &Domain, path: &str,
) -> Result<Option<DocumentResponse>> {
    let Some(route) = route(path, domain) else {
        return Ok(None);
    };
    tracing::debug!(%route, path, "serving DID document");

    let profile = match route {
        Route::Site => Profile::Site(SiteConfig::load(issuer.store(), domain.clone())?),
        Route::Component => Profile::Component(ComponentIdentity::default()),
    };
    respond(issuer, &profile).map(Some)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::keys::Unavailable;
    use crate::store::MemoryStore;

    #[test]
    fn routes() {
        let root = Domain::new("example.com");
        assert_eq!(route("/.well-known/did.json", &root), Some(Route::Site));
        assert_eq!(route("/.well-known/did.json?x=1", &root), Some(Route::Site));
        assert_eq!(route("/did-plugin/did.json", &root), Some(Route::Component));
        assert_eq!(route("/did.json", &root), None);
        assert_eq!(route("/", &root), None);

        let blog = Domain::new("example.com").with_path("/blog/");
        assert_eq!(route("/blog/did.json", &blog), Some(Route::Site));
        assert_eq!(route("/.well-known/did.json", &blog), Some(Route::Site));
        assert_eq!(route("/other/did.json", &blog), None);
    }

    #[test]
    fn site_headers() {
        let store = MemoryStore::new();
        let issuer = Issuer::new(store, Unavailable);
        let domain = Domain::new("example.com");

        let response = handle(&issuer, &domain, SITE_DOCUMENT_PATH)
            .expect("should render")
            .expect("should route");
        assert_eq!(response.headers.len(), 1);
        assert_eq!(response.header("content-type"), Some("application/json"));
        assert_eq!(response.header("Cache-Control"), None);
        assert!(response.body.contains(r#""id": "did:web:example.com""#));
    }

    #[test]
    fn site_settings_from_issuer() {
        let store = MemoryStore::new();
        store.set(crate::options::SITE_HANDLE, "alice.bsky.social").expect("should set");
        let issuer = Issuer::new(store, Unavailable);
        let domain = Domain::new("example.com");

        let response = handle(&issuer, &domain, SITE_DOCUMENT_PATH)
            .expect("should render")
            .expect("should route");
        assert!(response.body.contains("at://alice.bsky.social"));
    }

    #[test]
    fn component_headers() {
        let store = MemoryStore::new();
        let issuer = Issuer::new(store, Unavailable);
        let domain = Domain::new("example.com");

        let response = handle(&issuer, &domain, COMPONENT_DOCUMENT_PATH)
            .expect("should render")
            .expect("should route");
        assert_eq!(response.header("Content-Type"), Some("application/json"));
        assert_eq!(response.header("Access-Control-Allow-Origin"), Some("*"));
        assert_eq!(response.header("Cache-Control"), Some("max-age=3600"));
    }

    #[test]
    fn unknown_path() {
        let store = MemoryStore::new();
        let issuer = Issuer::new(store, Unavailable);
        let domain = Domain::new("example.com");

        let response = handle(&issuer, &domain, "/about").expect("should not fail");
        assert_eq!(response, None);
    }
}
