// gcevm-crypto: client-side cryptography for confidential contracts
// Copyright 2026 Dark Bio AG. All rights reserved.
//
// Use of this source code is governed by a BSD-style
// license that can be found in the LICENSE file.

#![no_main]

use gcevm_crypto::otp::{SecretKey, BLOCK_SIZE};
use libfuzzer_sys::fuzz_target;

fuzz_target!(|data: &[u8]| {
    let key = SecretKey::from_bytes(&[7u8; 16]);

    // Arbitrary nonce/ciphertext shapes must either open or error, never panic
    let _ = key.decrypt(data, data);

    // Anything within one block must seal and open back to its padded form
    if data.len() <= BLOCK_SIZE {
        let (ciphertext, nonce) = key.encrypt(data).unwrap();
        let opened = key.decrypt(&nonce, &ciphertext).unwrap();

        assert_eq!(&opened[BLOCK_SIZE - data.len()..], data);
        assert!(opened[..BLOCK_SIZE - data.len()].iter().all(|&b| b == 0));
    } else {
        assert!(key.encrypt(data).is_err());
    }
});
