// Copyright (c) 2025 Fabstir
// SPDX-License-Identifier: BUSL-1.1
//! Tests for content identifier checks used before registration

use zorai_node::storage::cid::{gateway_url, is_valid_cid};

#[test]
fn test_accepts_v0_and_v1() {
    assert!(is_valid_cid("QmYwAPJzv5CZsnA625s3Xf2nemtYgPpHdWEz79ojWnPbdG"));
    assert!(is_valid_cid(
        "bafybeigdyrzt5sfp7udm7hu76uh7y26nf3efuylqabf3oclgtqy55fbzdi"
    ));
}

#[test]
fn test_rejects_other_identifiers() {
    assert!(!is_valid_cid(""));
    assert!(!is_valid_cid("QmNotReallyACid"));
    assert!(!is_valid_cid("0x1234"));
    assert!(!is_valid_cid("bafkreigh2akiscaildcqabsyg3dfr6chu3fgpregiymsck7e7aqa4s52zy"));
}

#[test]
fn test_gateway_url_ignores_trailing_slash() {
    assert_eq!(
        gateway_url("https://gateway.pinata.cloud/", "QmYwAPJzv5CZsnA625s3Xf2nemtYgPpHdWEz79ojWnPbdG"),
        "https://gateway.pinata.cloud/ipfs/QmYwAPJzv5CZsnA625s3Xf2nemtYgPpHdWEz79ojWnPbdG"
    );
}
