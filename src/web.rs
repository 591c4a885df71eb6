//! # DID Web
//!
//! The `did:web` method uses a web domain's reputation to confer trust. A
//! site's identifier is derived from the origin it is served from and
//! resolves back to a `did.json` document on that origin.
//!
//! See:
//!
//! - <https://w3c-ccg.github.io/did-method-web>
//! - <https://atproto.com/specs/did>

mod domain;
mod url;

pub use self::domain::*;
pub use self::url::*;
