//! Tests for issuing the site's DID document.

use did_web_atproto::web::Domain;
use did_web_atproto::{
    ConfigStore, Document, IdentityManager, Issuer, MemoryStore, Secp256k1Multikey, SiteConfig,
    Unavailable, options,
};
use insta::assert_snapshot;
use serde_json::json;
use test_utils::{FIXED_MULTIKEY, StaticGenerator};

fn domain() -> Domain {
    Domain::new("example.com")
}

// A fully configured site serializes with members in a fixed order.
#[test]
fn full_document() {
    let issuer = Issuer::new(MemoryStore::new(), Unavailable);
    let config = SiteConfig::new(domain())
        .with_handle("alice.bsky.social")
        .with_public_key_multibase("zABC");

    let json = issuer.site_document(&config).expect("should issue").to_json().expect("json");
    assert_snapshot!(json, @r###"
    {
      "@context": [
        "https://www.w3.org/ns/did/v1",
        "https://w3id.org/security/multikey/v1",
        "https://w3id.org/security/suites/secp256k1-2019/v1"
      ],
      "id": "did:web:example.com",
      "alsoKnownAs": [
        "at://alice.bsky.social"
      ],
      "verificationMethod": [
        {
          "id": "did:web:example.com#atproto",
          "type": "Multikey",
          "controller": "did:web:example.com",
          "publicKeyMultibase": "zABC"
        }
      ],
      "service": [
        {
          "id": "#atproto_pds",
          "type": "AtprotoPersonalDataServer",
          "serviceEndpoint": "https://example.com"
        }
      ]
    }
    "###);
}

// Nothing configured: only `@context`, `id` and `service`.
#[test]
fn bare_document() {
    let issuer = Issuer::new(MemoryStore::new(), Unavailable);
    let doc = issuer.site_document(&SiteConfig::new(domain())).expect("should issue");

    let value = serde_json::to_value(&doc).expect("should serialize");
    let members: Vec<&str> =
        value.as_object().expect("object").keys().map(String::as_str).collect();
    assert_eq!(members, ["@context", "id", "service"]);
}

#[test]
fn handle() {
    let issuer = Issuer::new(MemoryStore::new(), Unavailable);

    let doc = issuer.site_document(&SiteConfig::new(domain())).expect("should issue");
    assert_eq!(doc.also_known_as, None);

    let config = SiteConfig::new(domain()).with_handle("u.bsky.social");
    let doc = issuer.site_document(&config).expect("should issue");
    assert_eq!(doc.also_known_as, Some(vec!["at://u.bsky.social".to_string()]));
}

// A manual multibase key wins over a generated keypair.
#[test]
fn manual_key_precedence() {
    let store = MemoryStore::new();
    let manager = IdentityManager::site(
        store.clone(),
        &domain(),
        StaticGenerator::default(),
        Secp256k1Multikey,
    );

    let issuer = Issuer::new(store.clone(), Secp256k1Multikey);
    let config = SiteConfig::new(domain()).with_public_key_multibase("zABC");
    let doc = issuer.site_document(&config).expect("should issue");
    assert_eq!(doc.verification_method.expect("manual key")[0].public_key_multibase, "zABC");

    manager.generate().expect("should generate");
    let doc = issuer.site_document(&config).expect("should issue");
    assert_eq!(doc.verification_method.expect("manual key")[0].public_key_multibase, "zABC");
}

// Generating a site keypair leaves a stored manual key in place.
#[test]
fn generate_keeps_stored_key() {
    let store = MemoryStore::new();
    store.set(options::SITE_PUBLIC_KEY_MULTIBASE, "zABC").expect("should set");
    IdentityManager::site(store.clone(), &domain(), StaticGenerator::default(), Secp256k1Multikey)
        .generate()
        .expect("should generate");

    let config = SiteConfig::load(&store, domain()).expect("should load");
    let doc = Issuer::new(store, Secp256k1Multikey).site_document(&config).expect("should issue");
    assert_eq!(doc.verification_method.expect("manual key")[0].public_key_multibase, "zABC");
}

// Without a manual key the multibase is derived from the site keypair.
#[test]
fn derived_key() {
    let store = MemoryStore::new();
    IdentityManager::site(store.clone(), &domain(), StaticGenerator::default(), Unavailable)
        .generate()
        .expect("should generate");

    let issuer = Issuer::new(store.clone(), Secp256k1Multikey);
    let doc = issuer.site_document(&SiteConfig::new(domain())).expect("should issue");
    let vm = doc.verification_method("did:web:example.com#atproto").expect("should derive");
    assert_eq!(vm.public_key_multibase, FIXED_MULTIKEY);

    // no codec, no key
    let issuer = Issuer::new(store, Unavailable);
    let doc = issuer.site_document(&SiteConfig::new(domain())).expect("should issue");
    assert_eq!(doc.verification_method, None);
}

// Settings are read from the store with empty values treated as unset.
#[test]
fn load_settings() {
    let store = MemoryStore::new();
    store.set(options::SITE_HANDLE, "alice.bsky.social").expect("should set");
    store.set(options::SITE_PDS_ENDPOINT, "https://pds.example.net").expect("should set");
    store.set(options::SITE_PUBLIC_KEY_MULTIBASE, "").expect("should set");

    let config = SiteConfig::load(&store, domain()).expect("should load");
    let issuer = Issuer::new(store, Unavailable);
    let doc = issuer.site_document(&config).expect("should issue");

    assert_eq!(doc.also_known_as, Some(vec!["at://alice.bsky.social".to_string()]));
    assert_eq!(doc.verification_method, None);
    assert_eq!(
        doc.service("#atproto_pds").expect("should have pds").service_endpoint,
        "https://pds.example.net"
    );
}

// Transforms run in registration order and their output is what gets
// serialized.
#[test]
fn transforms() {
    let mut issuer = Issuer::new(MemoryStore::new(), Unavailable);
    issuer.register(|mut doc: Document| {
        doc.additional.insert("marker".into(), json!(["first"]));
        doc
    });
    issuer.register(|mut doc: Document| {
        if let Some(marker) = doc.additional.get_mut("marker").and_then(|m| m.as_array_mut()) {
            marker.push(json!("second"));
        }
        doc.also_known_as = Some(vec!["https://example.com/@alice".to_string()]);
        doc
    });

    let json = issuer
        .site_document(&SiteConfig::new(domain()))
        .expect("should issue")
        .to_json()
        .expect("json");
    let parsed: serde_json::Value = serde_json::from_str(&json).expect("should parse");

    assert_eq!(parsed["marker"], json!(["first", "second"]));
    assert_eq!(parsed["alsoKnownAs"], json!(["https://example.com/@alice"]));
    assert!(json.trim_end().ends_with("\"marker\": [\n    \"first\",\n    \"second\"\n  ]\n}"));
}
