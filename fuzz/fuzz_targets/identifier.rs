#![no_main]

use libfuzzer_sys::fuzz_target;
use simbridge_core::{validate_identifier, BridgeError, Identifier};

fuzz_target!(|input: &str| {
    let expected_ok = !input.is_empty()
        && input.bytes().all(|b| b.is_ascii_alphanumeric() || b == b'_');

    match validate_identifier(input) {
        Ok(()) => {
            assert!(expected_ok);
            let id = Identifier::new(input).unwrap();
            assert_eq!(id.as_str(), input);
        }
        Err(BridgeError::EmptyIdentifier) => assert!(input.is_empty()),
        Err(BridgeError::InvalidIdentifier(s)) => {
            assert!(!expected_ok);
            assert_eq!(s, input);
        }
        Err(other) => panic!("unexpected error: {other}"),
    }
});
