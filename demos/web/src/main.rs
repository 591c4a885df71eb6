//! Sample `did:web` server.
//!
//! Serves the site document at `/.well-known/did.json` and the component
//! document at `/did-plugin/did.json`. Both identities get a freshly generated
//! secp256k1 keypair on startup.
//!
//! ## Usage:
//!
//! ```text
//! DID_WEB_SITE_URL=http://localhost:3000 DID_WEB_HANDLE=alice.bsky.social cargo run -p web
//! curl http://localhost:3000/.well-known/did.json
//! ```

use std::env;
use std::sync::Arc;

use axum::extract::State;
use axum::http::{HeaderName, HeaderValue, StatusCode, Uri};
use axum::response::{IntoResponse, Response};
use axum::{Json, Router};
use did_web_atproto::web::Domain;
use did_web_atproto::{
    ComponentIdentity, ConfigStore, IdentityManager, Issuer, MemoryStore, Secp256k1Generator,
    Secp256k1Multikey, handlers, options,
};
use tracing_subscriber::EnvFilter;

// Application entry point.
#[tokio::main]
async fn main() -> anyhow::Result<()> {
    dotenv::dotenv().ok();
    tracing_subscriber::fmt().with_env_filter(EnvFilter::from_default_env()).init();

    let site_url = env::var("DID_WEB_SITE_URL").unwrap_or_else(|_| "http://localhost:3000".into());
    let listen = env::var("DID_WEB_LISTEN").unwrap_or_else(|_| "0.0.0.0:3000".into());
    let domain = Domain::parse(&site_url)?;

    let store = MemoryStore::new();
    if let Ok(handle) = env::var("DID_WEB_HANDLE") {
        store.set(options::SITE_HANDLE, &handle)?;
    }
    if let Ok(endpoint) = env::var("DID_WEB_PDS_ENDPOINT") {
        store.set(options::SITE_PDS_ENDPOINT, &endpoint)?;
    }

    IdentityManager::site(store.clone(), &domain, Secp256k1Generator, Secp256k1Multikey)
        .generate()?;
    IdentityManager::component(
        store.clone(),
        &ComponentIdentity::default(),
        Secp256k1Generator,
        Secp256k1Multikey,
    )
    .generate()?;

    tracing::info!(did = %domain.did(), "serving {site_url}");
    let state = Arc::new(AppState {
        issuer: Issuer::new(store, Secp256k1Multikey),
        domain,
    });
    let app = Router::new().fallback(document).with_state(state);

    let listener = tokio::net::TcpListener::bind(&listen).await?;
    tracing::info!("listening on {listen}");
    axum::serve(listener, app).await?;
    Ok(())
}

// Keep the issuer and site domain in state.
struct AppState {
    issuer: Issuer<MemoryStore, Secp256k1Multikey>,
    domain: Domain,
}

// Serve a DID document for any matching path, 404 otherwise.
async fn document(State(state): State<Arc<AppState>>, uri: Uri) -> Response {
    match handlers::handle(&state.issuer, &state.domain, uri.path()) {
        Ok(Some(doc)) => {
            let mut response = doc.body.into_response();
            for (name, value) in &doc.headers {
                let (Ok(name), Ok(value)) =
                    (HeaderName::try_from(name.as_str()), HeaderValue::try_from(value.as_str()))
                else {
                    continue;
                };
                response.headers_mut().insert(name, value);
            }
            response
        }
        Ok(None) => StatusCode::NOT_FOUND.into_response(),
        Err(e) => (StatusCode::INTERNAL_SERVER_ERROR, Json(e.to_json())).into_response(),
    }
}
