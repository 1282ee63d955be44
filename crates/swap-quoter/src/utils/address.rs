use alloy_primitives::Address;
use anyhow::{anyhow, bail};
use std::str::FromStr;

/// Parse a token given either as an EVM address (`0x...`) or a Hedera entity id
/// (`shard.realm.num`).
pub fn parse_token(s: &str) -> anyhow::Result<Address> {
    let s = s.trim();
    if s.starts_with("0x") || s.starts_with("0X") {
        return Address::from_str(s).map_err(|e| anyhow!("invalid address {}: {}", s, e));
    }
    entity_id_to_address(s)
}

/// Long-zero solidity address of a Hedera entity: 4-byte shard, 8-byte realm, 8-byte num.
pub fn entity_id_to_address(id: &str) -> anyhow::Result<Address> {
    let parts: Vec<&str> = id.split('.').collect();
    let [shard, realm, num] = parts.as_slice() else {
        bail!("entity id {} is not shard.realm.num", id);
    };
    let shard: u32 = shard.parse().map_err(|e| anyhow!("invalid shard in {}: {}", id, e))?;
    let realm: u64 = realm.parse().map_err(|e| anyhow!("invalid realm in {}: {}", id, e))?;
    let num: u64 = num.parse().map_err(|e| anyhow!("invalid num in {}: {}", id, e))?;

    let mut bytes = [0u8; 20];
    bytes[..4].copy_from_slice(&shard.to_be_bytes());
    bytes[4..12].copy_from_slice(&realm.to_be_bytes());
    bytes[12..].copy_from_slice(&num.to_be_bytes());
    Ok(Address::from(bytes))
}

/// Inverse of [`entity_id_to_address`]. `None` for addresses that are not long-zero
/// (e.g. ECDSA-derived account aliases).
pub fn address_to_entity_id(address: &Address) -> Option<String> {
    let b = address.as_slice();
    let shard = u32::from_be_bytes(b[..4].try_into().ok()?);
    let realm = u64::from_be_bytes(b[4..12].try_into().ok()?);
    let num = u64::from_be_bytes(b[12..].try_into().ok()?);
    // a real EVM alias has random high bytes; long-zero ids keep shard and realm tiny
    if shard != 0 || realm > u32::MAX as u64 {
        return None;
    }
    Some(format!("{}.{}.{}", shard, realm, num))
}
