//! The origin a site is served from.

use std::fmt::Write;

use url::Url;

use crate::error::Err;
use crate::{Result, tracerr};

/// Ports that are never embedded in a `did:web` identifier.
pub const STANDARD_PORTS: [u16; 2] = [80, 443];

/// The serving origin of a site: host, optional port and optional
/// subdirectory path.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Domain {
    /// URL scheme, `https` unless parsed otherwise.
    pub scheme: String,

    /// Host name, e.g. `example.com`.
    pub host: String,

    /// Port, when one was given explicitly.
    pub port: Option<u16>,

    /// Path of the site root when the site lives in a subdirectory, e.g.
    /// `/blog`.
    pub path: Option<String>,
}

impl Domain {
    /// Create an `https` domain for `host` with no port and no path.
    #[must_use]
    pub fn new(host: impl Into<String>) -> Self {
        Self {
            scheme: "https".to_string(),
            host: host.into(),
            port: None,
            path: None,
        }
    }

    /// Set the port.
    #[must_use]
    pub const fn with_port(mut self, port: u16) -> Self {
        self.port = Some(port);
        self
    }

    /// Set the subdirectory path.
    #[must_use]
    pub fn with_path(mut self, path: impl Into<String>) -> Self {
        self.path = Some(path.into());
        self
    }

    /// Parse a site URL such as `https://example.com:8443/blog/`.
    ///
    /// Ports that are the default for the URL's scheme are dropped, and a root
    /// path (`/`) is treated as no path.
    ///
    /// # Errors
    ///
    /// Will return an error if the url is not a valid URL or a host cannot be
    /// parsed.
    pub fn parse(url: &str) -> Result<Self> {
        let url = Url::parse(url)?;
        let Some(host) = url.host_str() else {
            tracerr!(Err::InvalidInput, "no host in url: {url}");
        };
        let path = match url.path() {
            "" | "/" => None,
            path => Some(path.to_string()),
        };

        Ok(Self {
            scheme: url.scheme().to_string(),
            host: host.to_string(),
            port: url.port(),
            path,
        })
    }

    /// The `did:web` identifier for this domain.
    #[must_use]
    pub fn did(&self) -> String {
        super::derive(self)
    }

    /// The site origin as a URL string with no trailing slash, e.g.
    /// `https://example.com:8443/blog`. Used as the default PDS endpoint.
    #[must_use]
    pub fn origin(&self) -> String {
        let mut origin = format!("{}://{}", self.scheme, self.host);
        if let Some(port) = self.port {
            let default_port = match self.scheme.as_str() {
                "http" => Some(80),
                "https" => Some(443),
                _ => None,
            };
            if default_port != Some(port) {
                let _ = write!(origin, ":{port}");
            }
        }
        if let Some(path) = self.path.as_deref() {
            let path = path.trim_matches('/');
            if !path.is_empty() {
                let _ = write!(origin, "/{path}");
            }
        }
        origin
    }
}
