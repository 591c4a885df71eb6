//! Public key to multibase (`Multikey`) conversion.

use k256::PublicKey;
use k256::elliptic_curve::sec1::ToEncodedPoint;
use k256::pkcs8::DecodePublicKey;
use multibase::Base;

use crate::error::Err;
use crate::{Result, tracerr};

/// Multicodec prefix for `secp256k1-pub` (varint encoded `0xe7`).
pub const SECP256K1_CODEC: [u8; 2] = [0xe7, 0x01];

/// Converts a stored public key into its multibase representation.
///
/// Implementations must report [`Err::EncodingUnavailable`] rather than
/// fabricate a value: a made-up multibase key produces a document no verifier
/// can resolve.
pub trait MultibaseCodec: Send + Sync {
    /// Encode `public_key` (as stored, typically SPKI PEM) as a multibase
    /// string.
    ///
    /// # Errors
    ///
    /// Returns [`Err::EncodingUnavailable`] if the key cannot be encoded.
    fn encode(&self, public_key: &str) -> Result<String>;
}

/// A codec that never encodes. Documents then rely on a manually entered
/// multibase key.
#[derive(Clone, Copy, Debug, Default)]
pub struct Unavailable;

impl MultibaseCodec for Unavailable {
    fn encode(&self, _: &str) -> Result<String> {
        Err(Err::EncodingUnavailable.into())
    }
}

/// Encodes SPKI PEM secp256k1 public keys as `z`-prefixed base58btc
/// multikeys, the format AT Protocol expects in `publicKeyMultibase`.
#[derive(Clone, Copy, Debug, Default)]
pub struct Secp256k1Multikey;

impl MultibaseCodec for Secp256k1Multikey {
    fn encode(&self, public_key: &str) -> Result<String> {
        let key = match PublicKey::from_public_key_pem(public_key.trim()) {
            Ok(key) => key,
            Err(e) => {
                tracing::debug!("public key is not a secp256k1 SPKI PEM: {e}");
                return Err(Err::EncodingUnavailable.into());
            }
        };
        Ok(encode_multikey(&key))
    }
}

/// Encode a secp256k1 public key (compressed point) as a multikey.
#[must_use]
pub fn encode_multikey(key: &PublicKey) -> String {
    let point = key.to_encoded_point(true);
    let mut multi_bytes = SECP256K1_CODEC.to_vec();
    multi_bytes.extend_from_slice(point.as_bytes());
    multibase::encode(Base::Base58Btc, &multi_bytes)
}

/// Decode a secp256k1 multikey back into a public key.
///
/// # Errors
///
/// Returns [`Err::InvalidInput`] if `multikey` is not base58btc, does not
/// carry the `secp256k1-pub` multicodec prefix, or is not a valid curve point.
pub fn decode_multikey(multikey: &str) -> Result<PublicKey> {
    let (base, multi_bytes) = match multibase::decode(multikey) {
        Ok(decoded) => decoded,
        Err(e) => tracerr!(Err::InvalidInput, "failed to decode multibase key: {e}"),
    };
    if base != Base::Base58Btc {
        tracerr!(Err::InvalidInput, "multibase base is not Base58Btc");
    }
    let Some(key_bytes) = multi_bytes.strip_prefix(SECP256K1_CODEC.as_slice()) else {
        tracerr!(Err::InvalidInput, "key is not a secp256k1 key");
    };
    match PublicKey::from_sec1_bytes(key_bytes) {
        Ok(key) => Ok(key),
        Err(e) => tracerr!(Err::InvalidInput, "invalid secp256k1 point: {e}"),
    }
}
