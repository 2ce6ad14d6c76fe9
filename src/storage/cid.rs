// Copyright (c) 2025 Fabstir
// SPDX-License-Identifier: BUSL-1.1
//! Content identifier acceptance rules for pinned images

use cid::Cid;

/// CIDv0: base58btc sha2-256 multihash
pub const CID_V0_PREFIX: &str = "Qm";
/// CIDv1: base32 dag-pb sha2-256
pub const CID_V1_PREFIX: &str = "bafy";

/// Accept only the two recognised prefix schemes, and only when the string decodes as a CID
pub fn is_valid_cid(candidate: &str) -> bool {
    let recognised = candidate.starts_with(CID_V0_PREFIX) || candidate.starts_with(CID_V1_PREFIX);
    recognised && candidate.parse::<Cid>().is_ok()
}

pub fn gateway_url(gateway: &str, cid: &str) -> String {
    format!("{}/ipfs/{}", gateway.trim_end_matches('/'), cid)
}
