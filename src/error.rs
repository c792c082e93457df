// gcevm-crypto: client-side cryptography for confidential contracts
// Copyright 2026 Dark Bio AG. All rights reserved.
//
// Use of this source code is governed by a BSD-style
// license that can be found in the LICENSE file.

use thiserror::Error;

/// Result type used by the crate APIs.
pub type Result<T> = std::result::Result<T, Error>;

/// Error type used by the crate APIs.
///
/// All failures are immediate and non-retryable; they signal a caller error
/// rather than a transient condition. The one exception is the entropy source
/// becoming unavailable, which a caller may retry as a matter of policy.
#[derive(Debug, Error)]
pub enum Error {
    #[error("invalid {field} length: {actual} bytes, must be {expected} bytes")]
    InvalidLength {
        field: &'static str,
        expected: usize,
        actual: usize,
    },
    #[error("invalid {field}: {details}")]
    InvalidFormat {
        field: &'static str,
        details: String,
    },
    #[error("invalid signature for message")]
    InvalidSignature,
    #[error("decryption failed")]
    DecryptionFailed,
    #[error("entropy source unavailable: {details}")]
    EntropyUnavailable { details: String },
    #[error("key file too short: {lines} lines, must be at least {expected}")]
    TruncatedKeyFile { lines: usize, expected: usize },
    #[error(transparent)]
    Io(#[from] std::io::Error),
}
