//! Signing delegation seam. The accounting core never creates signatures
//! itself: a draft plus the wallet's key lookup goes to a
//! [`TransactionSigner`], and whatever it reports comes back unchanged.

use crate::crypto::TxId;
use crate::error::WalletError;
use crate::keyring::KeyRing;
use crate::ledger::Ledger;
use crate::transaction::{OutPoint, Transaction, Witness};
use pqcrypto_traits::sign::{DetachedSignature as _, PublicKey as _};

/// The message a witness binds: transaction id plus the outpoint being
/// spent, domain-separated.
pub fn input_message(txid: &TxId, outpoint: &OutPoint) -> Vec<u8> {
    let mut msg = Vec::with_capacity(8 + 32 + 32 + 4);
    msg.extend_from_slice(b"purse-in");
    msg.extend_from_slice(txid);
    msg.extend_from_slice(&outpoint.txid);
    msg.extend_from_slice(&outpoint.index.to_le_bytes());
    msg
}

/// External signer collaborator. Implementations attach witnesses to every
/// input of `tx`; partial signing must not be reported as success.
///
/// Two signings of identical content need not produce identical bytes;
/// correctness is structural, never byte comparison.
pub trait TransactionSigner {
    fn sign_inputs(
        &self,
        tx: &mut Transaction,
        keys: &KeyRing,
        ledger: &Ledger,
    ) -> Result<(), WalletError>;
}

/// Default signer: a detached Dilithium3 signature per input, made with the
/// key that owns the spent output.
pub struct DilithiumSigner;

impl TransactionSigner for DilithiumSigner {
    fn sign_inputs(
        &self,
        tx: &mut Transaction,
        keys: &KeyRing,
        ledger: &Ledger,
    ) -> Result<(), WalletError> {
        let txid = tx.id;
        for input in &mut tx.inputs {
            let rec = ledger.lookup_output(&input.prev).ok_or_else(|| {
                WalletError::Signing(format!("unknown output {}", input.prev))
            })?;
            let key = keys.owns_destination(&rec.to).ok_or_else(|| {
                WalletError::Signing(format!("no key for destination {}", hex::encode(rec.to)))
            })?;
            let signature = key.sign(&input_message(&txid, &input.prev));
            input.witness = Some(Witness {
                pubkey: key.public_key().as_bytes().to_vec(),
                signature: signature.as_bytes().to_vec(),
            });
        }
        Ok(())
    }
}
