//! Standalone transaction encoding: build and sign a spend without any chain
//! context. Callers name the outpoints they want to spend, the keys that own
//! them and the outputs to create; a throwaway wallet is seeded with
//! synthetic funding entries so the ordinary signing path applies.

use crate::crypto::{Address, TxId};
use crate::error::WalletError;
use crate::keyring::OwnedKey;
use crate::ledger::Placement;
use crate::transaction::{OutPoint, Transaction, TxInput, TxOutput};
use crate::units::COIN;
use crate::wallet::Wallet;
use std::collections::{BTreeMap, HashSet};

struct InputSpec {
    key: OwnedKey,
    outpoint: OutPoint,
    value: u64,
}

#[derive(Default)]
pub struct StandaloneEncoder {
    inputs: Vec<InputSpec>,
    outputs: Vec<TxOutput>,
}

impl StandaloneEncoder {
    pub fn new() -> Self {
        StandaloneEncoder::default()
    }

    /// Declares an input: output `index` of the prior transaction `txid`,
    /// worth `value`, owned by `key`.
    pub fn add_input(&mut self, key: OwnedKey, txid: TxId, index: u32, value: u64) {
        self.inputs.push(InputSpec {
            key,
            outpoint: OutPoint { txid, index },
            value,
        });
    }

    pub fn add_output(&mut self, value: u64, to: Address) {
        self.outputs.push(TxOutput { value, to });
    }

    /// Assembles the spend and signs every input, consuming the encoder.
    /// Inputs and outputs keep their declaration order; declaring the same
    /// prior output twice is an error.
    pub fn create_signed_transaction(self) -> Result<Transaction, WalletError> {
        let mut seen = HashSet::new();
        for spec in &self.inputs {
            if !seen.insert(spec.outpoint) {
                return Err(WalletError::DuplicateInput(spec.outpoint));
            }
        }
        let inputs = self
            .inputs
            .iter()
            .map(|spec| TxInput::new(spec.outpoint))
            .collect();
        let mut tx = Transaction::new(inputs, self.outputs);

        // Seed a scratch wallet: keys first so the synthetic funding outputs
        // classify as owned when received.
        let mut wallet = Wallet::new();
        let mut seeds: BTreeMap<TxId, Vec<(u32, u64, Address)>> = BTreeMap::new();
        for spec in &self.inputs {
            seeds
                .entry(spec.outpoint.txid)
                .or_default()
                .push((spec.outpoint.index, spec.value, spec.key.address()));
        }
        for spec in self.inputs {
            wallet.add_key(spec.key);
        }

        // One funding transaction per distinct prior txid, wide enough to
        // cover the highest referenced index; unreferenced slots are spacer
        // outputs to a destination nobody owns. The caller-supplied txid is
        // the authoritative id, exactly as the hashing collaborator's would be.
        for (txid, slots) in seeds {
            let width = slots.iter().map(|(i, _, _)| i + 1).max().unwrap_or(1);
            let mut outputs = vec![TxOutput { value: COIN, to: [0u8; 32] }; width as usize];
            for (index, value, to) in slots {
                outputs[index as usize] = TxOutput { value, to };
            }
            let mut funding = Transaction::new(Vec::new(), outputs);
            funding.id = txid;
            wallet.receive(&funding, None, Placement::BestChain)?;
        }

        wallet.sign_inputs(&mut tx)?;
        Ok(tx)
    }
}
