// gcevm-crypto: client-side cryptography for confidential contracts
// Copyright 2026 Dark Bio AG. All rights reserved.
//
// Use of this source code is governed by a BSD-style
// license that can be found in the LICENSE file.

//! Client-side cryptography for confidential EVM contracts: single-block
//! value encryption, fixed-width message packing, recoverable signing, and
//! RSA key transport.

pub mod ecdsa;
pub mod error;
pub mod input;
pub mod keyfile;
pub mod otp;
pub mod rand;
pub mod rsa;

pub use error::{Error, Result};
