// gcevm-crypto: client-side cryptography for confidential contracts
// Copyright 2026 Dark Bio AG. All rights reserved.
//
// Use of this source code is governed by a BSD-style
// license that can be found in the LICENSE file.

//! Input text preparation for confidential contract calls.
//!
//! A confidential call argument travels as an encrypted integer plus a
//! signature binding it to the sender, the target contract, and the function
//! being called. The packed layout is fixed width so a verifying contract can
//! reconstruct the signed message byte for byte:
//!
//!   sender (20) || contract (20) || selector (4) || ciphertext (32)
//!
//! The bulk path instead ABI encodes the same fields as the tuple
//! (address, address, bytes4, uint256) and leaves signing to the caller.

use crate::ecdsa;
use crate::error::{Error, Result};
use crate::otp;
use alloy_primitives::{Address, FixedBytes, U256};
use alloy_sol_types::SolValue;
use sha3::{Digest, Keccak256};
use std::str::FromStr;

/// Size of a function selector in bytes.
pub const SELECTOR_SIZE: usize = 4;

/// Size of the combined ciphertext in bytes: cipher block (16) || nonce (16).
pub const CIPHERTEXT_SIZE: usize = otp::BLOCK_SIZE + otp::NONCE_SIZE;

/// Size of the packed message in bytes.
pub const MESSAGE_SIZE: usize = 2 * ecdsa::ADDRESS_SIZE + SELECTOR_SIZE + CIPHERTEXT_SIZE;

/// InputText is an encrypted call argument ready for submission: the combined
/// ciphertext as a 256-bit integer plus the signature authenticating it.
#[derive(Debug, Clone)]
pub struct InputText {
    pub ciphertext: U256,
    pub signature: ecdsa::Signature,
}

/// selector computes the 4-byte function selector, the leading bytes of the
/// Keccak-256 hash of the UTF-8 signature text (e.g. "transfer(address,uint256)").
pub fn selector(signature: &str) -> [u8; SELECTOR_SIZE] {
    let digest = Keccak256::digest(signature.as_bytes());
    digest[..SELECTOR_SIZE].try_into().unwrap()
}

/// pack concatenates the fixed width message fields into the 76-byte layout a
/// verifying contract reconstructs. No hashing happens here; the signer hashes
/// the packed bytes.
pub fn pack(
    sender: &[u8],
    contract: &[u8],
    selector: &[u8],
    ciphertext: &[u8],
) -> Result<[u8; MESSAGE_SIZE]> {
    check_len("sender address", sender, ecdsa::ADDRESS_SIZE)?;
    check_len("contract address", contract, ecdsa::ADDRESS_SIZE)?;
    check_len("function selector", selector, SELECTOR_SIZE)?;
    check_len("ciphertext", ciphertext, CIPHERTEXT_SIZE)?;

    let mut out = [0u8; MESSAGE_SIZE];
    out[..20].copy_from_slice(sender);
    out[20..40].copy_from_slice(contract);
    out[40..44].copy_from_slice(selector);
    out[44..].copy_from_slice(ciphertext);
    Ok(out)
}

/// pack_abi encodes the message fields as the ABI tuple
/// (address, address, bytes4, uint256), validating the textual fields before
/// encoding. This is the layout used by the bulk preparation path, where the
/// ciphertext travels as a contract call argument.
pub fn pack_abi(
    sender: &str,
    contract: &str,
    selector: &str,
    ciphertext: U256,
) -> Result<Vec<u8>> {
    let sender = parse_address("sender address", sender)?;
    let contract = parse_address("contract address", contract)?;
    let selector = parse_selector(selector)?;

    Ok((sender, contract, selector, ciphertext).abi_encode())
}

/// sign validates the fixed width message fields, packs them, and signs the
/// packed message per the requested hashing mode.
pub fn sign(
    sender: &[u8],
    contract: &[u8],
    selector: &[u8],
    ciphertext: &[u8],
    key: &ecdsa::SecretKey,
    mode: ecdsa::Mode,
) -> Result<ecdsa::Signature> {
    let message = pack(sender, contract, selector, ciphertext)?;

    Ok(match mode {
        ecdsa::Mode::Raw => key.sign(&message),
        ecdsa::Mode::Personal => key.sign_personal(&message),
    })
}

/// prepare runs the full pipeline for one confidential call argument: derive
/// the selector from the function signature text, seal the value under the
/// user key, pack the message, and sign it. The combined ciphertext is
/// returned as the 256-bit integer stored on chain.
pub fn prepare(
    value: u128,
    user_key: &otp::SecretKey,
    sender: &[u8],
    contract: &[u8],
    func_sig: &str,
    signing_key: &ecdsa::SecretKey,
    mode: ecdsa::Mode,
) -> Result<InputText> {
    let func_sel = selector(func_sig);

    let (ciphertext, nonce) = user_key.encrypt(&value.to_be_bytes())?;
    let ct = combine(ciphertext, nonce);

    let signature = sign(sender, contract, &func_sel, &ct, signing_key, mode)?;
    Ok(InputText {
        ciphertext: U256::from_be_bytes(ct),
        signature,
    })
}

/// prepare_message is the bulk preparation path: validate the textual fields,
/// seal the value under the user key, and return the ciphertext integer along
/// with the ABI encoded message for external signing.
pub fn prepare_message(
    value: u128,
    user_key: &str,
    sender: &str,
    contract: &str,
    selector: &str,
) -> Result<(U256, Vec<u8>)> {
    // Validate every textual field before touching the entropy source
    let key = otp::SecretKey::from_hex(user_key)?;
    let sender = parse_address("sender address", sender)?;
    let contract = parse_address("contract address", contract)?;
    let selector = parse_selector(selector)?;

    let (ciphertext, nonce) = key.encrypt(&value.to_be_bytes())?;
    let ct = U256::from_be_bytes(combine(ciphertext, nonce));

    let message = (sender, contract, selector, ct).abi_encode();
    Ok((ct, message))
}

/// combine concatenates a cipher block and its nonce into the combined
/// ciphertext stored on chain.
fn combine(
    ciphertext: [u8; otp::BLOCK_SIZE],
    nonce: [u8; otp::NONCE_SIZE],
) -> [u8; CIPHERTEXT_SIZE] {
    let mut out = [0u8; CIPHERTEXT_SIZE];
    out[..otp::BLOCK_SIZE].copy_from_slice(&ciphertext);
    out[otp::BLOCK_SIZE..].copy_from_slice(&nonce);
    out
}

fn check_len(field: &'static str, data: &[u8], expected: usize) -> Result<()> {
    if data.len() != expected {
        return Err(Error::InvalidLength {
            field,
            expected,
            actual: data.len(),
        });
    }
    Ok(())
}

fn parse_address(field: &'static str, addr: &str) -> Result<Address> {
    Address::from_str(addr).map_err(|e| Error::InvalidFormat {
        field,
        details: e.to_string(),
    })
}

fn parse_selector(sel: &str) -> Result<FixedBytes<4>> {
    FixedBytes::from_str(sel).map_err(|e| Error::InvalidFormat {
        field: "function selector",
        details: e.to_string(),
    })
}
