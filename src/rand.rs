// gcevm-crypto: client-side cryptography for confidential contracts
// Copyright 2026 Dark Bio AG. All rights reserved.
//
// Use of this source code is governed by a BSD-style
// license that can be found in the LICENSE file.

use crate::error::{Error, Result};

/// generate creates an arbitrarily large buffer filled with randomness.
pub fn generate(bytes: usize) -> Result<Vec<u8>> {
    // Create a random buffer with a WASM friendly source
    let mut buf = vec![0u8; bytes];
    getrandom::fill(&mut buf[..]).map_err(|e| Error::EntropyUnavailable {
        details: e.to_string(),
    })?;
    Ok(buf)
}

/// generate_array creates a fixed size array filled with randomness.
pub fn generate_array<const N: usize>() -> Result<[u8; N]> {
    let mut buf = [0u8; N];
    getrandom::fill(&mut buf[..]).map_err(|e| Error::EntropyUnavailable {
        details: e.to_string(),
    })?;
    Ok(buf)
}
