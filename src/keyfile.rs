// gcevm-crypto: client-side cryptography for confidential contracts
// Copyright 2026 Dark Bio AG. All rights reserved.
//
// Use of this source code is governed by a BSD-style
// license that can be found in the LICENSE file.

//! Hex key file persistence.
//!
//! Key material crosses the process boundary as hex-encoded text, one value
//! per line: a single line for a symmetric key, and a two or three line
//! layout for RSA transport material (private key, public key, optional
//! ciphertext). Readers tolerate trailing whitespace; files with fewer lines
//! than expected are rejected outright.

use crate::error::{Error, Result};
use crate::otp;
use std::fs;
use std::path::Path;

/// write_key stores a symmetric key as a single hex line.
pub fn write_key(path: impl AsRef<Path>, key: &otp::SecretKey) -> Result<()> {
    fs::write(path, key.to_hex())?;
    Ok(())
}

/// load_key reads a symmetric key from a single hex line, tolerating
/// surrounding whitespace.
pub fn load_key(path: impl AsRef<Path>) -> Result<otp::SecretKey> {
    let text = fs::read_to_string(path)?;
    otp::SecretKey::from_hex(text.trim())
}

/// write_transport stores RSA transport material as newline-separated hex
/// lines: private key DER, public key DER, and optionally a ciphertext.
pub fn write_transport(
    path: impl AsRef<Path>,
    secret_der: &[u8],
    public_der: &[u8],
    ciphertext: Option<&[u8]>,
) -> Result<()> {
    let mut out = format!("{}\n{}", hex::encode(secret_der), hex::encode(public_der));
    if let Some(ct) = ciphertext {
        out.push('\n');
        out.push_str(&hex::encode(ct));
    }
    fs::write(path, out)?;
    Ok(())
}

/// load_transport reads RSA transport material back from its newline
/// separated hex layout, returning the private key DER, the public key DER,
/// and the ciphertext if a third line is present.
pub fn load_transport(path: impl AsRef<Path>) -> Result<(Vec<u8>, Vec<u8>, Option<Vec<u8>>)> {
    let text = fs::read_to_string(path)?;
    let lines: Vec<&str> = text.lines().map(str::trim).filter(|l| !l.is_empty()).collect();

    if lines.len() < 2 {
        return Err(Error::TruncatedKeyFile {
            lines: lines.len(),
            expected: 2,
        });
    }
    let secret = decode_line("private key", lines[0])?;
    let public = decode_line("public key", lines[1])?;
    let ciphertext = match lines.get(2) {
        Some(line) => Some(decode_line("ciphertext", line)?),
        None => None,
    };
    Ok((secret, public, ciphertext))
}

fn decode_line(field: &'static str, line: &str) -> Result<Vec<u8>> {
    hex::decode(line).map_err(|e| Error::InvalidFormat {
        field,
        details: e.to_string(),
    })
}
