//! Reward destination derived from the kernel script

use bitcoin::{Script, ScriptBuf};
use neblio_common::keystore::KeyStore;
use neblio_common::script::{classify, p2pk_script, ScriptKind};

/// Script that receives the reward of a coinstake spending `kernel_script`
///
/// Pay-to-pubkey-hash kernels are paid back to the bare public key; other
/// supported kernels keep their script. Returns None when the wallet does
/// not hold the signing key or the script is not stakeable.
pub fn calculate_script_pub_key_for_stake_output<K>(key_store: &K, kernel_script: &Script) -> Option<ScriptBuf>
where
    K: KeyStore + ?Sized,
{
    match classify(kernel_script) {
        ScriptKind::PubKeyHash(hash) => key_store.get_pub_key(&hash).map(|key| p2pk_script(&key)),
        ScriptKind::PubKey(key) if key_store.have_key(&key.pubkey_hash()) => Some(kernel_script.to_owned()),
        ScriptKind::ColdStake { staker, .. } if key_store.have_key(&staker) => Some(kernel_script.to_owned()),
        kind => {
            log::debug!("No stake output script for kernel of kind {:?}", kind);
            None
        }
    }
}
