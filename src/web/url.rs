//! Helper functions for converting between site origins and `did:web` DIDs.

use std::fmt::Write;

use super::{Domain, STANDARD_PORTS};
use crate::error::Err;
use crate::{Result, tracerr};

/// Derive the `did:web` identifier for a domain.
///
/// - a non-standard port is appended as `%3A<port>` (the colon is the DID
///   method's own separator so it must be percent-encoded)
/// - a subdirectory path is appended with each `/` replaced by `:`
///
/// Valid examples:
/// - `example.com` → `did:web:example.com`
/// - `example.com:8080` → `did:web:example.com%3A8080`
/// - `example.com/custom/path/` → `did:web:example.com:custom:path`
#[must_use]
pub fn derive(domain: &Domain) -> String {
    let mut did = format!("did:web:{}", domain.host);

    if let Some(port) = domain.port {
        if !STANDARD_PORTS.contains(&port) {
            let _ = write!(did, "%3A{port}");
        }
    }
    if let Some(path) = domain.path.as_deref() {
        let path = path.trim_matches('/');
        if !path.is_empty() {
            let _ = write!(did, ":{}", path.replace('/', ":"));
        }
    }

    tracing::debug!(did, "derived identifier");
    did
}

/// Construct a `did:web` DID from a site URL.
///
/// # Errors
///
/// Will return an error if the url is not a valid URL or a host cannot be
/// parsed.
pub fn default_did(url: &str) -> Result<String> {
    Ok(derive(&Domain::parse(url)?))
}

/// Convert a `did:web` DID to the HTTPS URL of its DID document.
///
/// # Errors
///
/// Will return an error if `did` is not a `did:web` DID.
pub fn document_url(did: &str) -> Result<String> {
    let Some(id) = did.strip_prefix("did:web:") else {
        tracerr!(Err::InvalidInput, "not a did:web DID: {did}");
    };
    if id.is_empty() || id.starts_with(':') {
        tracerr!(Err::InvalidInput, "no host in DID: {did}");
    }

    // 1. Replace ":" with "/" in the method specific identifier to obtain the
    //    fully qualified domain name and optional path.
    let domain = id.replace(':', "/");

    // 2. If the domain contains a port percent decode the colon.
    let domain = domain.replace("%3A", ":").replace("%3a", ":");

    // 3. Generate an HTTPS URL to the expected location of the DID document.
    let mut url = format!("https://{domain}");

    // 4. If no path has been specified, append /.well-known.
    if !id.contains(':') {
        url.push_str("/.well-known");
    }

    // 5. Append /did.json to complete the URL.
    url.push_str("/did.json");
    Ok(url)
}
