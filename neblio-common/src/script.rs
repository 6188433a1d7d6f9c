//! Script templates recognised by the staking code
//!
//! Only the shapes a kernel can take are modelled: pay-to-pubkey-hash,
//! pay-to-pubkey and pay-to-cold-stake. Everything else classifies as
//! non-standard and is never staked.

use bitcoin::hashes::Hash;
use bitcoin::opcodes::all::{
    OP_CHECKSIG, OP_DUP, OP_ELSE, OP_ENDIF, OP_EQUALVERIFY, OP_HASH160, OP_IF, OP_PUSHBYTES_20,
    OP_PUSHBYTES_33, OP_PUSHBYTES_65, OP_RETURN, OP_ROT,
};
use bitcoin::{PubkeyHash, PublicKey, Script, ScriptBuf};

/// Opcode that restricts the staker branch of a cold-stake script
pub const OP_CHECKCOLDSTAKEVERIFY: u8 = 0xd2;

const P2PKH_LEN: usize = 25;
const P2CS_LEN: usize = 51;

/// Recognised shape of a scriptPubKey
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ScriptKind {
    /// `OP_DUP OP_HASH160 <hash> OP_EQUALVERIFY OP_CHECKSIG`
    PubKeyHash(PubkeyHash),
    /// `<pubkey> OP_CHECKSIG`
    PubKey(PublicKey),
    /// Delegated staking: the staker may only create coinstakes, the owner may spend
    ColdStake {
        staker: PubkeyHash,
        owner: PubkeyHash,
    },
    /// `OP_RETURN ...`
    NullData,
    /// Anything else
    NonStandard,
}

/// Classify a scriptPubKey into one of the known templates
pub fn classify(script: &Script) -> ScriptKind {
    let bytes = script.as_bytes();

    if let Some(hash) = match_p2pkh(bytes) {
        return ScriptKind::PubKeyHash(hash);
    }

    if let Some(key) = match_p2pk(bytes) {
        return ScriptKind::PubKey(key);
    }

    if let Some((staker, owner)) = match_p2cs(bytes) {
        return ScriptKind::ColdStake { staker, owner };
    }

    if bytes.first() == Some(&OP_RETURN.to_u8()) {
        return ScriptKind::NullData;
    }

    ScriptKind::NonStandard
}

fn hash_at(bytes: &[u8], start: usize) -> Option<PubkeyHash> {
    let slice: [u8; 20] = bytes.get(start..start + 20)?.try_into().ok()?;
    Some(PubkeyHash::from_byte_array(slice))
}

fn match_p2pkh(bytes: &[u8]) -> Option<PubkeyHash> {
    if bytes.len() != P2PKH_LEN
        || bytes[0] != OP_DUP.to_u8()
        || bytes[1] != OP_HASH160.to_u8()
        || bytes[2] != OP_PUSHBYTES_20.to_u8()
        || bytes[23] != OP_EQUALVERIFY.to_u8()
        || bytes[24] != OP_CHECKSIG.to_u8()
    {
        return None;
    }
    hash_at(bytes, 3)
}

fn match_p2pk(bytes: &[u8]) -> Option<PublicKey> {
    let key_len = match bytes.first().copied() {
        Some(op) if op == OP_PUSHBYTES_33.to_u8() => 33,
        Some(op) if op == OP_PUSHBYTES_65.to_u8() => 65,
        _ => return None,
    };
    if bytes.len() != key_len + 2 || bytes[key_len + 1] != OP_CHECKSIG.to_u8() {
        return None;
    }
    PublicKey::from_slice(&bytes[1..=key_len]).ok()
}

fn match_p2cs(bytes: &[u8]) -> Option<(PubkeyHash, PubkeyHash)> {
    let prefix = [
        OP_DUP.to_u8(),
        OP_HASH160.to_u8(),
        OP_ROT.to_u8(),
        OP_IF.to_u8(),
        OP_CHECKCOLDSTAKEVERIFY,
        OP_PUSHBYTES_20.to_u8(),
    ];
    let suffix = [OP_ENDIF.to_u8(), OP_EQUALVERIFY.to_u8(), OP_CHECKSIG.to_u8()];

    if bytes.len() != P2CS_LEN
        || bytes[..6] != prefix
        || bytes[26] != OP_ELSE.to_u8()
        || bytes[27] != OP_PUSHBYTES_20.to_u8()
        || bytes[48..] != suffix
    {
        return None;
    }
    Some((hash_at(bytes, 6)?, hash_at(bytes, 28)?))
}

/// Build a pay-to-pubkey-hash script
pub fn p2pkh_script(hash: &PubkeyHash) -> ScriptBuf {
    ScriptBuf::new_p2pkh(hash)
}

/// Build a pay-to-pubkey script
pub fn p2pk_script(key: &PublicKey) -> ScriptBuf {
    ScriptBuf::new_p2pk(key)
}

/// Build a pay-to-cold-stake script delegating staking rights to `staker`
pub fn cold_stake_script(staker: &PubkeyHash, owner: &PubkeyHash) -> ScriptBuf {
    let mut bytes = Vec::with_capacity(P2CS_LEN);
    bytes.extend_from_slice(&[
        OP_DUP.to_u8(),
        OP_HASH160.to_u8(),
        OP_ROT.to_u8(),
        OP_IF.to_u8(),
        OP_CHECKCOLDSTAKEVERIFY,
        OP_PUSHBYTES_20.to_u8(),
    ]);
    bytes.extend_from_slice(&staker.to_byte_array());
    bytes.push(OP_ELSE.to_u8());
    bytes.push(OP_PUSHBYTES_20.to_u8());
    bytes.extend_from_slice(&owner.to_byte_array());
    bytes.extend_from_slice(&[OP_ENDIF.to_u8(), OP_EQUALVERIFY.to_u8(), OP_CHECKSIG.to_u8()]);
    ScriptBuf::from_bytes(bytes)
}

#[cfg(test)]
mod tests {
    use super::*;

    const COMPRESSED_KEY: &str =
        "0279be667ef9dcbbac55a06295ce870b07029bfcdb2dce28d959f2815b16f81798";

    fn key() -> PublicKey {
        PublicKey::from_slice(&hex::decode(COMPRESSED_KEY).unwrap()).unwrap()
    }

    #[test]
    fn classifies_standard_templates() {
        let key = key();
        let hash = key.pubkey_hash();

        assert_eq!(classify(&p2pkh_script(&hash)), ScriptKind::PubKeyHash(hash));
        assert_eq!(classify(&p2pk_script(&key)), ScriptKind::PubKey(key));
    }

    #[test]
    fn classifies_cold_stake() {
        let staker = PubkeyHash::from_byte_array([0x11; 20]);
        let owner = PubkeyHash::from_byte_array([0x22; 20]);
        let script = cold_stake_script(&staker, &owner);

        assert_eq!(script.len(), P2CS_LEN);
        assert_eq!(classify(&script), ScriptKind::ColdStake { staker, owner });
    }

    #[test]
    fn rejects_malformed_scripts() {
        assert_eq!(classify(&ScriptBuf::new()), ScriptKind::NonStandard);

        // P2PK shape with bytes that are not a valid point
        let mut bytes = vec![OP_PUSHBYTES_33.to_u8()];
        bytes.extend_from_slice(&[0x05; 33]);
        bytes.push(OP_CHECKSIG.to_u8());
        assert_eq!(classify(&ScriptBuf::from_bytes(bytes)), ScriptKind::NonStandard);

        let mut truncated = p2pkh_script(&key().pubkey_hash()).into_bytes();
        truncated.pop();
        assert_eq!(classify(&ScriptBuf::from_bytes(truncated)), ScriptKind::NonStandard);

        assert_eq!(classify(&ScriptBuf::from_bytes(vec![OP_RETURN.to_u8(), 0x00])), ScriptKind::NullData);
    }
}
