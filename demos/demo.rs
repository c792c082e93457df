// gcevm-crypto: client-side cryptography for confidential contracts
// Copyright 2026 Dark Bio AG. All rights reserved.
//
// Use of this source code is governed by a BSD-style
// license that can be found in the LICENSE file.

//! Demo: Preparing a confidential contract call argument end to end.
//!
//! This example demonstrates:
//! 1. Generating a user encryption key and a signing key
//! 2. Preparing an input text (encrypt, pack, sign) for a contract call
//! 3. Recovering the signer address from the signature on the other side
//! 4. Decrypting the on-chain integer back into the original value

use gcevm_crypto::{ecdsa, input, otp};

fn main() {
    // =========================================================================
    // Step 1: Create the user's encryption key and the account signing key
    // =========================================================================
    println!("1. Creating user and signing keys...");
    let user_key = otp::SecretKey::generate().unwrap();
    let signing_key = ecdsa::SecretKey::generate().unwrap();

    let sender = signing_key.address();
    println!("   Sender address: 0x{}", hex::encode(sender));

    // =========================================================================
    // Step 2: Prepare an input text for transfer(address,uint256)
    // =========================================================================
    println!("2. Preparing the input text...");
    let contract = [0x69u8; ecdsa::ADDRESS_SIZE];
    let value: u128 = 100;

    let it = input::prepare(
        value,
        &user_key,
        &sender,
        &contract,
        "transfer(address,uint256)",
        &signing_key,
        ecdsa::Mode::Personal,
    )
    .unwrap();
    println!("   Ciphertext integer: {}", it.ciphertext);
    println!("   Signature: 0x{}", hex::encode(it.signature.to_bytes()));

    // =========================================================================
    // Step 3: Recover the signer address, as the contract side would
    // =========================================================================
    println!("3. Recovering the signer...");
    let ct: [u8; input::CIPHERTEXT_SIZE] = it.ciphertext.to_be_bytes();
    let message = input::pack(
        &sender,
        &contract,
        &input::selector("transfer(address,uint256)"),
        &ct,
    )
    .unwrap();

    let recovered =
        ecdsa::PublicKey::recover(&message, &it.signature, ecdsa::Mode::Personal).unwrap();
    println!("   Recovered address: 0x{}", hex::encode(recovered.address()));
    assert_eq!(recovered.address(), sender);

    // =========================================================================
    // Step 4: Decrypt the on-chain integer back into the value
    // =========================================================================
    println!("4. Decrypting the ciphertext...");
    let opened = user_key
        .decrypt(&ct[otp::BLOCK_SIZE..], &ct[..otp::BLOCK_SIZE])
        .unwrap();
    println!("   Decrypted value: {}", u128::from_be_bytes(opened));
    assert_eq!(u128::from_be_bytes(opened), value);
}
