//! Address shape checks.
//!
//! Only the `0x` + 40 hex digit shape is validated. Mixed-case input is
//! accepted without an EIP-55 checksum test.

use alloy::primitives::Address;

pub fn is_valid_address(candidate: &str) -> bool {
    match candidate.strip_prefix("0x") {
        Some(hex) => hex.len() == 40 && hex.bytes().all(|b| b.is_ascii_hexdigit()),
        None => false,
    }
}

/// Parses an address that passes [`is_valid_address`].
pub fn parse_address(candidate: &str) -> Option<Address> {
    if !is_valid_address(candidate) {
        return None;
    }
    candidate.parse().ok()
}
