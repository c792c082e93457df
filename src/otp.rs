// gcevm-crypto: client-side cryptography for confidential contracts
// Copyright 2026 Dark Bio AG. All rights reserved.
//
// Use of this source code is governed by a BSD-style
// license that can be found in the LICENSE file.

//! One-block one-time-pad encryption built on AES-128.
//!
//! The block cipher is used purely as a pseudorandom generator keyed by a
//! public nonce: a fresh random block `r` is encrypted under the key and the
//! result is XOR-combined with the zero-padded plaintext. This turns AES into
//! a stream cipher for exactly one block, letting `ciphertext || r` be stored
//! as a single 256-bit integer without cipher chaining or padding modes.

use crate::error::{Error, Result};
use crate::rand;
use aes::cipher::generic_array::GenericArray;
use aes::cipher::{BlockEncrypt, KeyInit};
use aes::Aes128;

/// Size of the symmetric key in bytes.
pub const KEY_SIZE: usize = 16;

/// Size of a cipher block in bytes.
pub const BLOCK_SIZE: usize = 16;

/// Size of the per-call nonce in bytes.
pub const NONCE_SIZE: usize = 16;

/// SecretKey contains a 128-bit AES key usable for encrypting and decrypting
/// single-block values.
#[derive(Clone, PartialEq, Eq)]
pub struct SecretKey {
    inner: [u8; KEY_SIZE],
}

impl SecretKey {
    /// generate creates a new, random key.
    pub fn generate() -> Result<SecretKey> {
        Ok(Self {
            inner: rand::generate_array::<KEY_SIZE>()?,
        })
    }

    /// from_bytes converts a 16-byte array into a key.
    pub fn from_bytes(bin: &[u8; KEY_SIZE]) -> SecretKey {
        Self { inner: *bin }
    }

    /// from_slice converts a byte slice into a key, rejecting any slice that
    /// is not exactly 16 bytes.
    pub fn from_slice(bin: &[u8]) -> Result<SecretKey> {
        if bin.len() != KEY_SIZE {
            return Err(Error::InvalidLength {
                field: "key",
                expected: KEY_SIZE,
                actual: bin.len(),
            });
        }
        Ok(Self::from_bytes(bin.try_into().unwrap()))
    }

    /// from_hex parses a hex string (with or without a 0x prefix) into a key.
    pub fn from_hex(hex_str: &str) -> Result<SecretKey> {
        let hex_str = hex_str.strip_prefix("0x").unwrap_or(hex_str);
        let bytes = hex::decode(hex_str).map_err(|e| Error::InvalidFormat {
            field: "key",
            details: e.to_string(),
        })?;
        Self::from_slice(&bytes)
    }

    /// to_bytes converts a key into a 16-byte array.
    pub fn to_bytes(&self) -> [u8; KEY_SIZE] {
        self.inner
    }

    /// to_hex converts a key into a hex string.
    pub fn to_hex(&self) -> String {
        hex::encode(self.inner)
    }

    /// encrypt seals a plaintext of at most one block, returning the
    /// ciphertext block and the fresh random nonce it was sealed with.
    ///
    /// The plaintext is left-padded with zero bytes to a full block, so the
    /// original value is recovered as the big-endian integer of the decrypted
    /// block. Nonce uniqueness per key is the caller's obligation: sealing
    /// under a repeated (key, nonce) pair reveals the XOR of the plaintexts.
    pub fn encrypt(&self, plaintext: &[u8]) -> Result<([u8; BLOCK_SIZE], [u8; NONCE_SIZE])> {
        if plaintext.len() > BLOCK_SIZE {
            return Err(Error::InvalidLength {
                field: "plaintext",
                expected: BLOCK_SIZE,
                actual: plaintext.len(),
            });
        }
        let nonce = rand::generate_array::<NONCE_SIZE>()?;

        // Left-zero-pad the plaintext and XOR it with the encrypted nonce
        let mut block = [0u8; BLOCK_SIZE];
        block[BLOCK_SIZE - plaintext.len()..].copy_from_slice(plaintext);

        for (b, p) in block.iter_mut().zip(self.pad(&nonce)) {
            *b ^= p;
        }
        Ok((block, nonce))
    }

    /// decrypt opens a ciphertext block sealed under the given nonce,
    /// returning the zero-padded plaintext block.
    pub fn decrypt(&self, nonce: &[u8], ciphertext: &[u8]) -> Result<[u8; BLOCK_SIZE]> {
        if nonce.len() != NONCE_SIZE {
            return Err(Error::InvalidLength {
                field: "nonce",
                expected: NONCE_SIZE,
                actual: nonce.len(),
            });
        }
        if ciphertext.len() != BLOCK_SIZE {
            return Err(Error::InvalidLength {
                field: "ciphertext",
                expected: BLOCK_SIZE,
                actual: ciphertext.len(),
            });
        }
        // XOR is self-inverse, so recomputing the pad undoes the sealing
        let mut block = [0u8; BLOCK_SIZE];
        block.copy_from_slice(ciphertext);

        for (b, p) in block.iter_mut().zip(self.pad(nonce.try_into().unwrap())) {
            *b ^= p;
        }
        Ok(block)
    }

    /// pad computes the one-time pad for a nonce, a single-block AES-ECB
    /// encryption of the nonce under the key.
    fn pad(&self, nonce: &[u8; NONCE_SIZE]) -> [u8; BLOCK_SIZE] {
        let cipher = Aes128::new(GenericArray::from_slice(&self.inner));

        let mut block = GenericArray::clone_from_slice(nonce);
        cipher.encrypt_block(&mut block);
        block.into()
    }
}

impl core::fmt::Debug for SecretKey {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        // Key material stays out of debug output
        write!(f, "otp::SecretKey")
    }
}
