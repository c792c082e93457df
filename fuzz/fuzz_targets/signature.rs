// gcevm-crypto: client-side cryptography for confidential contracts
// Copyright 2026 Dark Bio AG. All rights reserved.
//
// Use of this source code is governed by a BSD-style
// license that can be found in the LICENSE file.

#![no_main]

use gcevm_crypto::ecdsa::{Signature, SIGNATURE_SIZE};
use gcevm_crypto::input;
use libfuzzer_sys::fuzz_target;

fuzz_target!(|data: &[u8]| {
    // Signature parsing must normalize or reject, and encodings round trip
    if data.len() == SIGNATURE_SIZE {
        let arr: [u8; SIGNATURE_SIZE] = data.try_into().unwrap();
        if let Ok(sig) = Signature::from_bytes(&arr) {
            assert!(sig.v() <= 1);
            assert_eq!(Signature::from_bytes(&sig.to_bytes()).unwrap(), sig);
            assert_eq!(Signature::from_bytes(&sig.to_offset_bytes()).unwrap(), sig);
        }
    } else {
        assert!(Signature::from_slice(data).is_err());
    }

    // The packer must reject every slice that is not its exact field size
    let _ = input::pack(data, data, data, data);
});
