//! Transaction data model and the canonical binary codec.
//!
//! A transaction's id is a content hash over its input references and
//! outputs. Witness data is excluded so attaching signatures never changes
//! the id, and re-signing the same draft yields the same identity even
//! though the signature bytes differ.

use crate::crypto::{self, Address, TxId};
use crate::error::WalletError;
use pqcrypto_dilithium::dilithium3::{DetachedSignature, PublicKey};
use pqcrypto_traits::sign::{DetachedSignature as _, PublicKey as _};
use serde::{Deserialize, Serialize};
use std::fmt;

/// Reference to a single output of a prior transaction.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct OutPoint {
    pub txid: TxId,
    pub index: u32,
}

impl fmt::Display for OutPoint {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}:{}", hex::encode(self.txid), self.index)
    }
}

/// A value assignment to a destination, spendable exactly once.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TxOutput {
    pub value: u64,
    pub to: Address,
}

/// Spend authorization attached to an input by the signer collaborator.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Witness {
    pub pubkey: Vec<u8>,
    pub signature: Vec<u8>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TxInput {
    pub prev: OutPoint,
    pub witness: Option<Witness>,
}

impl TxInput {
    pub fn new(prev: OutPoint) -> Self {
        TxInput { prev, witness: None }
    }

    /// Address of the key that witnessed this input, if signed.
    pub fn from_address(&self) -> Option<Address> {
        let witness = self.witness.as_ref()?;
        let pk = PublicKey::from_bytes(&witness.pubkey).ok()?;
        Some(crypto::address_from_pk(&pk))
    }

    /// Checks the attached witness against `message`. Unsigned or
    /// undecodable witnesses fail closed.
    pub fn verify_witness(&self, message: &[u8]) -> bool {
        let Some(witness) = self.witness.as_ref() else {
            return false;
        };
        let Ok(pk) = PublicKey::from_bytes(&witness.pubkey) else {
            return false;
        };
        let Ok(sig) = DetachedSignature::from_bytes(&witness.signature) else {
            return false;
        };
        crypto::verify_detached(message, &sig, &pk)
    }
}

/// An ordered set of input references and outputs plus the content hash that
/// identifies it. The id field is authoritative: the hashing collaborator
/// guarantees collision resistance, so equal ids mean the same transaction.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Transaction {
    pub id: TxId,
    pub inputs: Vec<TxInput>,
    pub outputs: Vec<TxOutput>,
}

impl Transaction {
    pub fn new(inputs: Vec<TxInput>, outputs: Vec<TxOutput>) -> Self {
        let id = Self::content_hash(&inputs, &outputs);
        Transaction { id, inputs, outputs }
    }

    fn content_hash(inputs: &[TxInput], outputs: &[TxOutput]) -> TxId {
        let mut data = Vec::with_capacity(inputs.len() * 36 + outputs.len() * 40);
        for input in inputs {
            data.extend_from_slice(&input.prev.txid);
            data.extend_from_slice(&input.prev.index.to_le_bytes());
        }
        for output in outputs {
            data.extend_from_slice(&output.value.to_le_bytes());
            data.extend_from_slice(&output.to);
        }
        crypto::blake3_hash(&data)
    }

    /// Total value carried by the outputs, guarded against overflow.
    pub fn total_output_value(&self) -> Result<u64, WalletError> {
        self.outputs.iter().try_fold(0u64, |acc, o| {
            acc.checked_add(o.value).ok_or(WalletError::AmountOverflow)
        })
    }

    /// Structural equality of input references and outputs, ignoring
    /// witnesses. Two receipts of the same id must agree on this.
    pub fn same_content(&self, other: &Transaction) -> bool {
        self.inputs.len() == other.inputs.len()
            && self
                .inputs
                .iter()
                .zip(&other.inputs)
                .all(|(a, b)| a.prev == b.prev)
            && self.outputs == other.outputs
    }
}

/// Serializes a transaction to its canonical binary form.
pub fn encode_tx(tx: &Transaction) -> Result<Vec<u8>, WalletError> {
    bincode::serialize(tx).map_err(|e| WalletError::Codec(e.to_string()))
}

/// Inverse of [`encode_tx`].
pub fn decode_tx(bytes: &[u8]) -> Result<Transaction, WalletError> {
    bincode::deserialize(bytes).map_err(|e| WalletError::Codec(e.to_string()))
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample_tx() -> Transaction {
        let prev = OutPoint { txid: crypto::blake3_hash(b"prev"), index: 3 };
        Transaction::new(
            vec![TxInput::new(prev)],
            vec![TxOutput { value: 42, to: [7u8; 32] }],
        )
    }

    #[test]
    fn id_is_content_hash_and_witness_independent() {
        let mut a = sample_tx();
        let b = sample_tx();
        assert_eq!(a.id, b.id);

        a.inputs[0].witness = Some(Witness { pubkey: vec![1], signature: vec![2] });
        assert_eq!(a.id, b.id, "witness data must not feed the id");
        assert!(a.same_content(&b));

        let c = Transaction::new(Vec::new(), vec![TxOutput { value: 43, to: [7u8; 32] }]);
        assert_ne!(a.id, c.id);
    }

    #[test]
    fn binary_roundtrip_preserves_structure() {
        let tx = sample_tx();
        let back = decode_tx(&encode_tx(&tx).unwrap()).unwrap();
        assert_eq!(tx, back);
    }

    #[test]
    fn total_output_value_guards_overflow() {
        let tx = Transaction::new(
            Vec::new(),
            vec![
                TxOutput { value: u64::MAX, to: [0u8; 32] },
                TxOutput { value: 1, to: [0u8; 32] },
            ],
        );
        assert!(matches!(tx.total_output_value(), Err(WalletError::AmountOverflow)));
    }
}
