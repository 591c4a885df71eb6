//! Tests for issuing the component's own DID document.

use did_web_atproto::document::{COMPONENT_DID, PLACEHOLDER_MULTIBASE};
use did_web_atproto::handlers::{self, COMPONENT_DOCUMENT_PATH};
use did_web_atproto::web::Domain;
use did_web_atproto::{
    ComponentIdentity, IdentityManager, Issuer, MemoryStore, Profile, Secp256k1Multikey,
    Unavailable,
};
use insta::assert_snapshot;
use test_utils::{FIXED_MULTIKEY, StaticGenerator};

// Before a key is generated the document advertises the placeholder key.
#[test]
fn placeholder_document() {
    let issuer = Issuer::new(MemoryStore::new(), Unavailable);
    let doc = issuer
        .document(&Profile::Component(ComponentIdentity::default()))
        .expect("should issue");

    assert_snapshot!(doc.to_json().expect("json"), @r###"
    {
      "@context": [
        "https://www.w3.org/ns/did/v1",
        "https://w3id.org/security/multikey/v1",
        "https://w3id.org/security/suites/secp256k1-2019/v1"
      ],
      "id": "did:web:github.com:pfefferle:wordpress-did",
      "alsoKnownAs": [
        "https://github.com/pfefferle/wordpress-did"
      ],
      "controller": "did:web:github.com:pfefferle:wordpress-did",
      "verificationMethod": [
        {
          "id": "did:web:github.com:pfefferle:wordpress-did#key-1",
          "type": "Multikey",
          "controller": "did:web:github.com:pfefferle:wordpress-did",
          "publicKeyMultibase": "zTODO_GENERATE_KEY"
        }
      ],
      "authentication": [
        "did:web:github.com:pfefferle:wordpress-did#key-1"
      ],
      "assertionMethod": [
        "did:web:github.com:pfefferle:wordpress-did#key-1"
      ],
      "service": [
        {
          "id": "#wordpress-plugin",
          "type": "WordPressPlugin",
          "serviceEndpoint": "https://github.com/pfefferle/wordpress-did"
        },
        {
          "id": "#repository",
          "type": "GitRepository",
          "serviceEndpoint": "https://github.com/pfefferle/wordpress-did"
        }
      ]
    }
    "###);
}

// The document shape does not depend on key state.
#[test]
fn shape_is_fixed() {
    let store = MemoryStore::new();
    let identity = ComponentIdentity::default();
    let issuer = Issuer::new(store.clone(), Secp256k1Multikey);
    let manager = IdentityManager::component(
        store,
        &identity,
        StaticGenerator::default(),
        Secp256k1Multikey,
    );

    let before = issuer.component_document(&identity).expect("should issue");
    manager.generate().expect("should generate");
    let after = issuer.component_document(&identity).expect("should issue");

    for doc in [&before, &after] {
        assert_eq!(doc.id, COMPONENT_DID);
        assert_eq!(doc.verification_method.as_ref().map(Vec::len), Some(1));
        assert_eq!(doc.authentication.as_ref().map(Vec::len), Some(1));
        assert_eq!(doc.assertion_method.as_ref().map(Vec::len), Some(1));
        assert_eq!(doc.service.len(), 2);
    }

    let key_id = format!("{COMPONENT_DID}#key-1");
    let before_key = before.verification_method(&key_id).expect("should exist");
    let after_key = after.verification_method(&key_id).expect("should exist");
    assert_eq!(before_key.public_key_multibase, PLACEHOLDER_MULTIBASE);
    assert_eq!(after_key.public_key_multibase, FIXED_MULTIKEY);
}

// Site transforms never reach the component document.
#[test]
fn transforms_not_applied() {
    let mut issuer = Issuer::new(MemoryStore::new(), Unavailable);
    issuer.register(|mut doc| {
        doc.service.clear();
        doc
    });

    let doc = issuer.component_document(&ComponentIdentity::default()).expect("should issue");
    assert_eq!(doc.service.len(), 2);
}

#[test]
fn served_with_cache_headers() {
    let store = MemoryStore::new();
    let issuer = Issuer::new(store, Unavailable);
    let domain = Domain::new("example.com");

    let response = handlers::handle(&issuer, &domain, COMPONENT_DOCUMENT_PATH)
        .expect("should render")
        .expect("should route");

    assert_eq!(
        response.headers,
        [
            ("Content-Type".to_string(), "application/json".to_string()),
            ("Access-Control-Allow-Origin".to_string(), "*".to_string()),
            ("Cache-Control".to_string(), "max-age=3600".to_string()),
        ]
    );
    let doc: serde_json::Value = serde_json::from_str(&response.body).expect("should parse");
    assert_eq!(doc["id"], COMPONENT_DID);
}
