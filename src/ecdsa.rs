// gcevm-crypto: client-side cryptography for confidential contracts
// Copyright 2026 Dark Bio AG. All rights reserved.
//
// Use of this source code is governed by a BSD-style
// license that can be found in the LICENSE file.

//! Recoverable ECDSA cryptography wrappers and parametrization.
//!
//! Signing is deterministic (RFC 6979) over secp256k1, hashing with
//! Keccak-256 either raw or wrapped in the EIP-191 personal message
//! envelope. Signatures carry the recovery id normalized to {0, 1}; the
//! legacy 27/28 convention is an explicit encoding choice at the byte
//! boundary.

use crate::error::{Error, Result};
use crate::rand;
use k256::ecdsa::signature::hazmat::PrehashVerifier;
use k256::ecdsa::{RecoveryId, SigningKey, VerifyingKey};
use serde::{de, Deserialize, Deserializer, Serialize, Serializer};
use sha3::{Digest, Keccak256};

/// Size of the secret key in bytes.
pub const SECRET_KEY_SIZE: usize = 32;

/// Size of an account address in bytes.
pub const ADDRESS_SIZE: usize = 20;

/// Size of a recoverable signature in bytes: r (32) || s (32) || v (1).
pub const SIGNATURE_SIZE: usize = 65;

/// Offset added to the recovery id by ecosystems using the legacy 27/28
/// convention.
const RECOVERY_OFFSET: u8 = 27;

/// Prefix of the EIP-191 personal message envelope, followed by the decimal
/// length of the message and the message itself.
const PERSONAL_PREFIX: &[u8] = b"\x19Ethereum Signed Message:\n";

/// Mode selects how a message is hashed before signing or recovery.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Mode {
    /// Keccak-256 over the raw message bytes.
    Raw,
    /// Keccak-256 over the EIP-191 personal message envelope.
    Personal,
}

/// SecretKey contains a secp256k1 private key usable for creating recoverable
/// signatures.
#[derive(Clone)]
pub struct SecretKey {
    inner: SigningKey,
}

impl SecretKey {
    /// generate creates a new, random private key.
    pub fn generate() -> Result<SecretKey> {
        // Rejection sample until the bytes form a valid curve scalar
        loop {
            let seed = rand::generate_array::<SECRET_KEY_SIZE>()?;
            if let Ok(inner) = SigningKey::from_slice(&seed) {
                return Ok(SecretKey { inner });
            }
        }
    }

    /// from_bytes converts a 32-byte array into a private key.
    pub fn from_bytes(bin: &[u8; SECRET_KEY_SIZE]) -> Result<SecretKey> {
        let inner = SigningKey::from_slice(bin).map_err(|e| Error::InvalidFormat {
            field: "signing key",
            details: e.to_string(),
        })?;
        Ok(SecretKey { inner })
    }

    /// from_slice converts a byte slice into a private key, rejecting any
    /// slice that is not exactly 32 bytes.
    pub fn from_slice(bin: &[u8]) -> Result<SecretKey> {
        if bin.len() != SECRET_KEY_SIZE {
            return Err(Error::InvalidLength {
                field: "signing key",
                expected: SECRET_KEY_SIZE,
                actual: bin.len(),
            });
        }
        Self::from_bytes(bin.try_into().unwrap())
    }

    /// from_hex parses a hex string (with or without a 0x prefix) into a
    /// private key.
    pub fn from_hex(hex_str: &str) -> Result<SecretKey> {
        let hex_str = hex_str.strip_prefix("0x").unwrap_or(hex_str);
        let bytes = hex::decode(hex_str).map_err(|e| Error::InvalidFormat {
            field: "signing key",
            details: e.to_string(),
        })?;
        Self::from_slice(&bytes)
    }

    /// to_bytes converts a private key into a 32-byte array.
    pub fn to_bytes(&self) -> [u8; SECRET_KEY_SIZE] {
        self.inner.to_bytes().into()
    }

    /// public_key retrieves the public counterpart of the secret key.
    pub fn public_key(&self) -> PublicKey {
        PublicKey {
            inner: self.inner.verifying_key().clone(),
        }
    }

    /// address derives the 20-byte account address of the key, the trailing
    /// bytes of the Keccak-256 hash of the uncompressed public key.
    pub fn address(&self) -> [u8; ADDRESS_SIZE] {
        self.public_key().address()
    }

    /// sign creates a recoverable signature over the Keccak-256 hash of the
    /// message.
    pub fn sign(&self, message: &[u8]) -> Signature {
        self.sign_hash(hash_message(message, Mode::Raw))
    }

    /// sign_personal creates a recoverable signature over the Keccak-256 hash
    /// of the EIP-191 personal message envelope of the message.
    pub fn sign_personal(&self, message: &[u8]) -> Signature {
        self.sign_hash(hash_message(message, Mode::Personal))
    }

    /// sign_hash signs an already hashed message, normalizing the recovery id
    /// into {0, 1}.
    fn sign_hash(&self, hash: [u8; 32]) -> Signature {
        let (sig, recid) = self.inner.sign_prehash_recoverable(&hash).unwrap();

        let mut out = [0u8; SIGNATURE_SIZE];
        out[..64].copy_from_slice(&sig.to_bytes());
        out[64] = recid.to_byte();
        Signature(out)
    }
}

impl core::fmt::Debug for SecretKey {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        // Key material stays out of debug output
        write!(f, "ecdsa::SecretKey")
    }
}

/// PublicKey contains a secp256k1 public key usable for verification and
/// address derivation.
#[derive(Debug, Clone)]
pub struct PublicKey {
    inner: VerifyingKey,
}

impl PublicKey {
    /// from_sec1 parses a SEC1 encoded (compressed or uncompressed) public
    /// key.
    pub fn from_sec1(bin: &[u8]) -> Result<PublicKey> {
        let inner = VerifyingKey::from_sec1_bytes(bin).map_err(|e| Error::InvalidFormat {
            field: "public key",
            details: e.to_string(),
        })?;
        Ok(PublicKey { inner })
    }

    /// to_sec1 converts a public key into its uncompressed 65-byte SEC1
    /// encoding (0x04 || x || y).
    pub fn to_sec1(&self) -> [u8; 65] {
        self.inner
            .to_encoded_point(false)
            .as_bytes()
            .try_into()
            .unwrap()
    }

    /// recover reconstructs the public key that produced a signature over the
    /// message, hashed per the given mode.
    pub fn recover(message: &[u8], signature: &Signature, mode: Mode) -> Result<PublicKey> {
        let hash = hash_message(message, mode);

        let sig = k256::ecdsa::Signature::from_slice(&signature.0[..64])
            .map_err(|_| Error::InvalidSignature)?;
        let recid = RecoveryId::from_byte(signature.0[64]).ok_or(Error::InvalidSignature)?;

        let inner = VerifyingKey::recover_from_prehash(&hash, &sig, recid)
            .map_err(|_| Error::InvalidSignature)?;
        Ok(PublicKey { inner })
    }

    /// address derives the 20-byte account address of the key, the trailing
    /// bytes of the Keccak-256 hash of the uncompressed public key.
    pub fn address(&self) -> [u8; ADDRESS_SIZE] {
        let point = self.inner.to_encoded_point(false);
        let digest = Keccak256::digest(&point.as_bytes()[1..]);
        digest[12..].try_into().unwrap()
    }

    /// verify verifies a signature over the message, hashed per the given
    /// mode.
    pub fn verify(&self, message: &[u8], signature: &Signature, mode: Mode) -> Result<()> {
        let hash = hash_message(message, mode);

        let sig = k256::ecdsa::Signature::from_slice(&signature.0[..64])
            .map_err(|_| Error::InvalidSignature)?;
        self.inner
            .verify_prehash(&hash, &sig)
            .map_err(|_| Error::InvalidSignature)
    }
}

/// Signature contains a recoverable secp256k1 signature, r || s || v with the
/// recovery id v held normalized in {0, 1}.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Signature([u8; SIGNATURE_SIZE]);

impl Signature {
    /// from_bytes converts a 65-byte array into a signature, accepting the
    /// recovery id in either the normalized {0, 1} or the legacy {27, 28}
    /// convention and storing it normalized.
    pub fn from_bytes(bin: &[u8; SIGNATURE_SIZE]) -> Result<Signature> {
        let mut out = *bin;
        out[64] = match bin[64] {
            v @ (0 | 1) => v,
            v @ (27 | 28) => v - RECOVERY_OFFSET,
            v => {
                return Err(Error::InvalidFormat {
                    field: "signature",
                    details: format!("recovery id {v} out of range"),
                })
            }
        };
        Ok(Signature(out))
    }

    /// from_slice converts a byte slice into a signature, rejecting any slice
    /// that is not exactly 65 bytes.
    pub fn from_slice(bin: &[u8]) -> Result<Signature> {
        if bin.len() != SIGNATURE_SIZE {
            return Err(Error::InvalidLength {
                field: "signature",
                expected: SIGNATURE_SIZE,
                actual: bin.len(),
            });
        }
        Self::from_bytes(bin.try_into().unwrap())
    }

    /// to_bytes converts a signature into a 65-byte array with the recovery
    /// id in {0, 1}.
    pub fn to_bytes(&self) -> [u8; SIGNATURE_SIZE] {
        self.0
    }

    /// to_offset_bytes converts a signature into a 65-byte array with the
    /// recovery id shifted to the legacy {27, 28} convention.
    pub fn to_offset_bytes(&self) -> [u8; SIGNATURE_SIZE] {
        let mut out = self.0;
        out[64] += RECOVERY_OFFSET;
        out
    }

    /// r returns the 32-byte r component.
    pub fn r(&self) -> [u8; 32] {
        self.0[..32].try_into().unwrap()
    }

    /// s returns the 32-byte s component.
    pub fn s(&self) -> [u8; 32] {
        self.0[32..64].try_into().unwrap()
    }

    /// v returns the recovery id, normalized into {0, 1}.
    pub fn v(&self) -> u8 {
        self.0[64]
    }
}

impl Serialize for Signature {
    fn serialize<S: Serializer>(&self, serializer: S) -> std::result::Result<S::Ok, S::Error> {
        serializer.serialize_str(&format!("0x{}", hex::encode(self.to_bytes())))
    }
}

impl<'de> Deserialize<'de> for Signature {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> std::result::Result<Self, D::Error> {
        let s = String::deserialize(deserializer)?;
        let bytes =
            hex::decode(s.strip_prefix("0x").unwrap_or(&s)).map_err(de::Error::custom)?;
        let arr: [u8; SIGNATURE_SIZE] = bytes
            .try_into()
            .map_err(|_| de::Error::custom("invalid signature length"))?;
        Signature::from_bytes(&arr).map_err(de::Error::custom)
    }
}

/// hash_message computes the 32-byte Keccak-256 digest a signature commits
/// to, either over the raw message or over its EIP-191 personal envelope.
fn hash_message(message: &[u8], mode: Mode) -> [u8; 32] {
    match mode {
        Mode::Raw => Keccak256::digest(message).into(),
        Mode::Personal => {
            let mut hasher = Keccak256::new();
            hasher.update(PERSONAL_PREFIX);
            hasher.update(message.len().to_string().as_bytes());
            hasher.update(message);
            hasher.finalize().into()
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    // Well-known development key, used here only as a published key/address
    // test vector.
    const DEV_KEY: &str = "ac0974bec39a17e36ba4a6b4d238ff944bacb478cbed5efcae784d7bf4f2ff80";
    const DEV_ADDRESS: &str = "f39fd6e51aad88f6f4ce6ab8827279cfffb92266";

    // Tests that address derivation matches the published vector for a well
    // known development key.
    #[test]
    fn test_address_derivation() {
        let secret = SecretKey::from_hex(DEV_KEY).unwrap();
        assert_eq!(hex::encode(secret.address()), DEV_ADDRESS);
        assert_eq!(hex::encode(secret.public_key().address()), DEV_ADDRESS);
    }

    // Tests signing and recovering messages in both hashing modes. Note, this
    // test is not meant to test cryptography, it is mostly an API sanity
    // check to verify that everything seems to work.
    #[test]
    fn test_sign_recover() {
        let secret = SecretKey::generate().unwrap();
        let public = secret.public_key();

        struct TestCase<'a> {
            message: &'a [u8],
            mode: Mode,
        }
        let tests = [
            TestCase {
                message: b"message to authenticate",
                mode: Mode::Raw,
            },
            TestCase {
                message: b"message to authenticate",
                mode: Mode::Personal,
            },
            TestCase {
                message: &[],
                mode: Mode::Raw,
            },
            TestCase {
                message: &[],
                mode: Mode::Personal,
            },
        ];
        for tt in &tests {
            let signature = match tt.mode {
                Mode::Raw => secret.sign(tt.message),
                Mode::Personal => secret.sign_personal(tt.message),
            };
            public
                .verify(tt.message, &signature, tt.mode)
                .unwrap_or_else(|e| panic!("failed to verify message: {}", e));

            let recovered = PublicKey::recover(tt.message, &signature, tt.mode)
                .unwrap_or_else(|e| panic!("failed to recover key: {}", e));
            assert_eq!(recovered.address(), public.address());
        }
    }

    // Tests that signing is deterministic: repeated runs over the same key
    // and message produce the same 65-byte signature.
    #[test]
    fn test_sign_deterministic() {
        let secret = SecretKey::from_hex(DEV_KEY).unwrap();

        let sig1 = secret.sign(b"deterministic nonce generation");
        let sig2 = secret.sign(b"deterministic nonce generation");
        assert_eq!(sig1, sig2);

        let sig1 = secret.sign_personal(b"deterministic nonce generation");
        let sig2 = secret.sign_personal(b"deterministic nonce generation");
        assert_eq!(sig1, sig2);
    }

    // Tests that the two hashing modes commit to different digests.
    #[test]
    fn test_modes_differ() {
        let secret = SecretKey::generate().unwrap();

        let raw = secret.sign(b"message");
        let personal = secret.sign_personal(b"message");
        assert_ne!(raw.to_bytes(), personal.to_bytes());

        assert!(secret
            .public_key()
            .verify(b"message", &raw, Mode::Personal)
            .is_err());
    }

    // Tests that the recovery id conversions between the normalized and the
    // legacy offset convention round trip, and that out-of-range ids are
    // rejected.
    #[test]
    fn test_recovery_offset() {
        let secret = SecretKey::generate().unwrap();
        let signature = secret.sign(b"offset me");

        assert!(signature.v() <= 1);

        let offset = signature.to_offset_bytes();
        assert_eq!(offset[64], signature.v() + 27);
        assert_eq!(Signature::from_bytes(&offset).unwrap(), signature);
        assert_eq!(
            Signature::from_bytes(&signature.to_bytes()).unwrap(),
            signature
        );

        let mut bad = signature.to_bytes();
        bad[64] = 5;
        assert!(matches!(
            Signature::from_bytes(&bad),
            Err(Error::InvalidFormat {
                field: "signature",
                ..
            })
        ));
    }

    // Tests that key and signature parsing reject inputs at boundary sizes
    // around their fixed contract sizes.
    #[test]
    fn test_invalid_lengths() {
        for bad in [0, SECRET_KEY_SIZE - 1, SECRET_KEY_SIZE + 1] {
            assert!(matches!(
                SecretKey::from_slice(&vec![1u8; bad]),
                Err(Error::InvalidLength {
                    field: "signing key",
                    ..
                })
            ));
        }
        for bad in [0, SIGNATURE_SIZE - 1, SIGNATURE_SIZE + 1] {
            assert!(matches!(
                Signature::from_slice(&vec![0u8; bad]),
                Err(Error::InvalidLength {
                    field: "signature",
                    ..
                })
            ));
        }
    }

    // Tests that verification fails for a signature from a different key.
    #[test]
    fn test_wrong_signer() {
        let alice = SecretKey::generate().unwrap();
        let eve = SecretKey::generate().unwrap();

        let signature = eve.sign(b"message to authenticate");
        assert!(alice
            .public_key()
            .verify(b"message to authenticate", &signature, Mode::Raw)
            .is_err());
    }

    // Tests that signatures serialize to prefixed hex strings and round trip
    // through serde.
    #[test]
    fn test_serde() {
        let secret = SecretKey::from_hex(DEV_KEY).unwrap();
        let signature = secret.sign(b"serialize me");

        let json = serde_json::to_string(&signature).unwrap();
        assert!(json.starts_with("\"0x"));

        let decoded: Signature = serde_json::from_str(&json).unwrap();
        assert_eq!(decoded, signature);
    }
}
