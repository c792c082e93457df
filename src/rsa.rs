// gcevm-crypto: client-side cryptography for confidential contracts
// Copyright 2026 Dark Bio AG. All rights reserved.
//
// Use of this source code is governed by a BSD-style
// license that can be found in the LICENSE file.

//! RSA key transport wrappers and parametrization.
//!
//! https://datatracker.ietf.org/doc/html/rfc8017
//!
//! The network onboards a user by sending the 16-byte symmetric key split
//! into two shares, each OAEP sealed to the user's transport key. This module
//! wraps RSA-2048 with OAEP-SHA256 and reassembles the shares; it is a
//! boundary utility, not part of the signing pipeline.

use crate::error::{Error, Result};
use crate::otp;
use rsa::pkcs8::{DecodePrivateKey, DecodePublicKey, EncodePrivateKey, EncodePublicKey};
use rsa::rand_core::OsRng;
use rsa::sha2::Sha256;
use rsa::{Oaep, RsaPrivateKey, RsaPublicKey};

/// Size of the RSA modulus in bits.
pub const KEY_BITS: usize = 2048;

/// Largest plaintext an RSA-2048 OAEP-SHA256 encryption can seal: the 256
/// byte modulus minus two hash blocks and two framing bytes.
pub const MAX_PLAINTEXT_SIZE: usize = 190;

/// SecretKey contains a 2048-bit RSA private key usable for opening OAEP
/// sealed key material. Whilst RSA could also be used for signing, that is
/// not exposed on the API as it's not required by the project.
#[derive(Clone)]
pub struct SecretKey {
    inner: RsaPrivateKey,
}

impl SecretKey {
    /// generate creates a new, random private key.
    pub fn generate() -> SecretKey {
        let mut rng = OsRng;

        let key = RsaPrivateKey::new(&mut rng, KEY_BITS).unwrap();
        Self { inner: key }
    }

    /// from_der parses a PKCS#8 DER buffer into a private key.
    pub fn from_der(der: &[u8]) -> Result<SecretKey> {
        let inner = RsaPrivateKey::from_pkcs8_der(der).map_err(|e| Error::InvalidFormat {
            field: "private key",
            details: e.to_string(),
        })?;
        Ok(Self { inner })
    }

    /// to_der serializes a private key into a PKCS#8 DER buffer.
    pub fn to_der(&self) -> Vec<u8> {
        self.inner.to_pkcs8_der().unwrap().as_bytes().to_vec()
    }

    /// public_key retrieves the public counterpart of the secret key.
    pub fn public_key(&self) -> PublicKey {
        PublicKey {
            inner: RsaPublicKey::from(&self.inner),
        }
    }

    /// decrypt opens an OAEP sealed ciphertext.
    ///
    /// The error is deliberately opaque: padding and format mismatches are
    /// indistinguishable to the caller.
    pub fn decrypt(&self, ciphertext: &[u8]) -> Result<Vec<u8>> {
        self.inner
            .decrypt(Oaep::new::<Sha256>(), ciphertext)
            .map_err(|_| Error::DecryptionFailed)
    }
}

/// PublicKey contains a 2048-bit RSA public key usable for OAEP sealing key
/// material towards the private key holder.
#[derive(Debug, Clone)]
pub struct PublicKey {
    inner: RsaPublicKey,
}

impl PublicKey {
    /// from_der parses an SPKI DER buffer into a public key.
    pub fn from_der(der: &[u8]) -> Result<PublicKey> {
        let inner = RsaPublicKey::from_public_key_der(der).map_err(|e| Error::InvalidFormat {
            field: "public key",
            details: e.to_string(),
        })?;
        Ok(Self { inner })
    }

    /// to_der serializes a public key into an SPKI DER buffer.
    pub fn to_der(&self) -> Vec<u8> {
        self.inner.to_public_key_der().unwrap().as_bytes().to_vec()
    }

    /// encrypt seals a plaintext with OAEP towards the private key holder.
    pub fn encrypt(&self, plaintext: &[u8]) -> Result<Vec<u8>> {
        if plaintext.len() > MAX_PLAINTEXT_SIZE {
            return Err(Error::InvalidLength {
                field: "plaintext",
                expected: MAX_PLAINTEXT_SIZE,
                actual: plaintext.len(),
            });
        }
        let mut rng = OsRng;
        Ok(self
            .inner
            .encrypt(&mut rng, Oaep::new::<Sha256>(), plaintext)
            .unwrap())
    }
}

/// generate_keypair creates a new, random key pair and returns it as raw DER
/// buffers (PKCS#8 private, SPKI public), the format the key material crosses
/// the file and process boundary in.
pub fn generate_keypair() -> (Vec<u8>, Vec<u8>) {
    let secret = SecretKey::generate();
    let public = secret.public_key();
    (secret.to_der(), public.to_der())
}

/// recover_user_key reassembles a user's symmetric key from two OAEP sealed
/// key shares: both shares are opened with the transport key and XOR-combined
/// into the 16-byte key.
pub fn recover_user_key(
    secret: &SecretKey,
    share0: &[u8],
    share1: &[u8],
) -> Result<otp::SecretKey> {
    let share0 = secret.decrypt(share0)?;
    let share1 = secret.decrypt(share1)?;

    check_share("key share", &share0)?;
    check_share("key share", &share1)?;

    let mut key = [0u8; otp::KEY_SIZE];
    for (i, k) in key.iter_mut().enumerate() {
        *k = share0[i] ^ share1[i];
    }
    Ok(otp::SecretKey::from_bytes(&key))
}

fn check_share(field: &'static str, share: &[u8]) -> Result<()> {
    if share.len() != otp::KEY_SIZE {
        return Err(Error::InvalidLength {
            field,
            expected: otp::KEY_SIZE,
            actual: share.len(),
        });
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::rand;

    // Tests sealing and opening a payload. Note, this test is not meant to
    // test cryptography, it is mostly an API sanity check to verify that
    // everything seems to work.
    #[test]
    fn test_encrypt_decrypt() {
        let secret = SecretKey::generate();
        let public = secret.public_key();

        let ciphertext = public.encrypt(b"hello world").unwrap();
        let opened = secret.decrypt(&ciphertext).unwrap();
        assert_eq!(opened, b"hello world");
    }

    // Tests that a tampered or truncated ciphertext fails to open, and that
    // the failure is the opaque decryption error.
    #[test]
    fn test_decrypt_tampered() {
        let secret = SecretKey::generate();
        let public = secret.public_key();

        let mut ciphertext = public.encrypt(b"hello world").unwrap();
        ciphertext[0] ^= 1;
        assert!(matches!(
            secret.decrypt(&ciphertext),
            Err(Error::DecryptionFailed)
        ));
        assert!(matches!(
            secret.decrypt(&ciphertext[1..]),
            Err(Error::DecryptionFailed)
        ));
    }

    // Tests that a plaintext beyond the OAEP limit is rejected before any
    // sealing is attempted.
    #[test]
    fn test_encrypt_oversized() {
        let (_, public) = generate_keypair();
        let public = PublicKey::from_der(&public).unwrap();

        assert!(public.encrypt(&[0u8; MAX_PLAINTEXT_SIZE]).is_ok());
        assert!(matches!(
            public.encrypt(&[0u8; MAX_PLAINTEXT_SIZE + 1]),
            Err(Error::InvalidLength {
                field: "plaintext",
                ..
            })
        ));
    }

    // Tests that keys round trip through their DER encodings and remain
    // usable afterwards.
    #[test]
    fn test_der_codec() {
        let (secret_der, public_der) = generate_keypair();

        let secret = SecretKey::from_der(&secret_der).unwrap();
        let public = PublicKey::from_der(&public_der).unwrap();
        assert_eq!(secret.to_der(), secret_der);
        assert_eq!(public.to_der(), public_der);

        let ciphertext = public.encrypt(b"round trip").unwrap();
        assert_eq!(secret.decrypt(&ciphertext).unwrap(), b"round trip");

        assert!(SecretKey::from_der(b"junk").is_err());
        assert!(PublicKey::from_der(b"junk").is_err());
    }

    // Tests that XOR-combining two sealed key shares reassembles the user
    // key, and that shares of the wrong size are rejected.
    #[test]
    fn test_recover_user_key() {
        let secret = SecretKey::generate();
        let public = secret.public_key();

        let user_key = otp::SecretKey::generate().unwrap();
        let share0 = rand::generate_array::<{ otp::KEY_SIZE }>().unwrap();
        let mut share1 = user_key.to_bytes();
        for (s, r) in share1.iter_mut().zip(share0.iter()) {
            *s ^= r;
        }

        let sealed0 = public.encrypt(&share0).unwrap();
        let sealed1 = public.encrypt(&share1).unwrap();

        let recovered = recover_user_key(&secret, &sealed0, &sealed1).unwrap();
        assert_eq!(recovered.to_bytes(), user_key.to_bytes());

        // A share of the wrong size decrypts fine but fails reassembly
        let sealed_short = public.encrypt(&share0[..8]).unwrap();
        assert!(matches!(
            recover_user_key(&secret, &sealed_short, &sealed1),
            Err(Error::InvalidLength {
                field: "key share",
                ..
            })
        ));
    }
}
