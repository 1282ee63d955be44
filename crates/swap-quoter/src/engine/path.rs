//! Hop sequences and the byte encodings adapters expect for them.

use alloy_primitives::{Address, Bytes};
use alloy_sol_types::SolValue;

use crate::types::{QuoterError, Result};

/// Largest value a 3-byte fee tier can carry.
pub const MAX_POOL_FEE: u32 = 0x00ff_ffff;

/// Plain concatenation of 20-byte addresses, used by constant-product adapters.
pub fn encode_packed(hops: &[Address]) -> Bytes {
    let mut out = Vec::with_capacity(hops.len() * 20);
    for hop in hops {
        out.extend_from_slice(hop.as_slice());
    }
    out.into()
}

/// `token ++ fee ++ token (++ fee ++ token)` with 3-byte big-endian fee tiers.
///
/// `fees` holds either one tier, reused for every hop boundary, or exactly one tier per
/// boundary, in the same order as `hops`.
pub fn encode_fee_tiered(hops: &[Address], fees: &[u32]) -> Result<Bytes> {
    if hops.len() < 2 {
        return Err(QuoterError::InvalidIntent("a path needs at least two tokens".into()));
    }
    let boundaries = hops.len() - 1;
    let tiers: Vec<u32> = match fees.len() {
        1 => vec![fees[0]; boundaries],
        n if n == boundaries => fees.to_vec(),
        0 => return Err(QuoterError::InvalidIntent("fee-tiered path requires a pool fee".into())),
        n => {
            return Err(QuoterError::InvalidIntent(format!(
                "{} pool fees given for {} hops",
                n, boundaries
            )))
        }
    };

    let mut out = Vec::with_capacity(hops.len() * 20 + boundaries * 3);
    out.extend_from_slice(hops[0].as_slice());
    for (tier, hop) in tiers.iter().zip(&hops[1..]) {
        out.extend_from_slice(&fee_tier_bytes(*tier)?);
        out.extend_from_slice(hop.as_slice());
    }
    Ok(out.into())
}

/// ABI words for a two-token pair, as the oracle-priced adapters decode it.
pub fn encode_abi_pair(token_a: Address, token_b: Address) -> Bytes {
    (token_a, token_b).abi_encode_params().into()
}

fn fee_tier_bytes(fee: u32) -> Result<[u8; 3]> {
    if fee > MAX_POOL_FEE {
        return Err(QuoterError::InvalidIntent(format!("pool fee {} does not fit in 24 bits", fee)));
    }
    let be = fee.to_be_bytes();
    Ok([be[1], be[2], be[3]])
}

/// Reverse hops and tiers together so each tier stays between the same two tokens.
pub fn reversed(hops: &[Address], fees: &[u32]) -> (Vec<Address>, Vec<u32>) {
    let hops = hops.iter().rev().copied().collect();
    let fees = fees.iter().rev().copied().collect();
    (hops, fees)
}

#[cfg(test)]
mod tests {
    use super::*;
    use alloy_primitives::address;

    const A: Address = address!("AAAAAAAAAAAAAAAAAAAAAAAAAAAAAAAAAAAAAAAA");
    const B: Address = address!("BBBBBBBBBBBBBBBBBBBBBBBBBBBBBBBBBBBBBBBB");
    const C: Address = address!("CCCCCCCCCCCCCCCCCCCCCCCCCCCCCCCCCCCCCCCC");

    #[test]
    fn test_fee_tiered_two_hop_literal() {
        let path = encode_fee_tiered(&[A, B], &[500]).unwrap();
        let expected = format!("{}{}{}", "aa".repeat(20), "0001f4", "bb".repeat(20));
        assert_eq!(hex::encode(&path), expected);
        assert_eq!(path.len(), 43);
    }

    #[test]
    fn test_fee_tiered_reuses_single_tier() {
        let path = encode_fee_tiered(&[A, B, C], &[3000]).unwrap();
        let expected = format!("{}000bb8{}000bb8{}", "aa".repeat(20), "bb".repeat(20), "cc".repeat(20));
        assert_eq!(hex::encode(&path), expected);
    }

    #[test]
    fn test_fee_tiered_per_hop_tiers() {
        let path = encode_fee_tiered(&[A, B, C], &[500, 10000]).unwrap();
        let expected = format!("{}0001f4{}002710{}", "aa".repeat(20), "bb".repeat(20), "cc".repeat(20));
        assert_eq!(hex::encode(&path), expected);
    }

    #[test]
    fn test_fee_tiered_rejects_bad_tiers() {
        assert!(encode_fee_tiered(&[A, B], &[]).is_err());
        assert!(encode_fee_tiered(&[A, B], &[0x0100_0000]).is_err());
        assert!(encode_fee_tiered(&[A, B, C], &[1, 2, 3]).is_err());
        assert!(encode_fee_tiered(&[A], &[500]).is_err());
    }

    #[test]
    fn test_packed() {
        let path = encode_packed(&[A, B, C]);
        assert_eq!(hex::encode(&path), format!("{}{}{}", "aa".repeat(20), "bb".repeat(20), "cc".repeat(20)));
    }

    #[test]
    fn test_abi_pair_is_two_padded_words() {
        let path = encode_abi_pair(A, B);
        assert_eq!(path.len(), 64);
        assert_eq!(hex::encode(&path[..32]), format!("{}{}", "00".repeat(12), "aa".repeat(20)));
        assert_eq!(hex::encode(&path[32..]), format!("{}{}", "00".repeat(12), "bb".repeat(20)));
    }

    #[test]
    fn test_reversed_keeps_tiers_between_same_tokens() {
        let (hops, fees) = reversed(&[A, B, C], &[500, 3000]);
        assert_eq!(hops, vec![C, B, A]);
        assert_eq!(fees, vec![3000, 500]);
    }
}
