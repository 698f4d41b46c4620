//! UTXO and pending-spend bookkeeping. The ledger tracks every transaction
//! the wallet has been told about, plus one record per owned output with a
//! mutable status tag. The wallet is the sole mutator; everything else reads.

use crate::crypto::{Address, BlockHash, TxId};
use crate::error::WalletError;
use crate::keyring::KeyRing;
use crate::transaction::{OutPoint, Transaction};
use std::collections::HashMap;

/// Lifecycle of an owned output.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum OutputStatus {
    /// Credited on the best chain but not yet included in a block.
    UnspentUnconfirmed,
    /// Confirmed and spendable; the only status that counts toward balance.
    UnspentConfirmed,
    /// Reserved by an uncommitted outgoing spend, or being spent by an
    /// unconfirmed transaction observed on the network.
    PendingSpend,
    /// Consumed by a confirmed best-chain transaction. Inert, kept for history.
    SpentConfirmed,
}

/// Chain placement tag attached to each delivered transaction.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Placement {
    BestChain,
    SideChain,
}

/// An owned output. Every field except `status` is immutable once created;
/// the value is never re-derived.
#[derive(Debug, Clone)]
pub struct OutputRecord {
    pub outpoint: OutPoint,
    pub value: u64,
    pub to: Address,
    pub status: OutputStatus,
}

/// A transaction known to the ledger together with its current placement.
#[derive(Debug, Clone)]
pub struct TxEntry {
    pub tx: Transaction,
    pub placement: Placement,
    pub confirming_block: Option<BlockHash>,
}

#[derive(Default)]
pub struct Ledger {
    txs: HashMap<TxId, TxEntry>,
    records: HashMap<OutPoint, OutputRecord>,
    // First-observation order of owned outputs; this is the deterministic
    // coin-selection order.
    order: Vec<OutPoint>,
}

impl Ledger {
    pub fn new() -> Self {
        Ledger::default()
    }

    /// Records a delivered transaction and reclassifies the outputs it
    /// touches. Returns the outpoints whose records changed.
    ///
    /// Re-receipt of a known id with identical placement and block is a
    /// no-op. A known id with different content is a fatal integrity
    /// violation.
    pub fn classify_and_store(
        &mut self,
        tx: &Transaction,
        placement: Placement,
        confirming_block: Option<BlockHash>,
        keys: &KeyRing,
    ) -> Result<Vec<OutPoint>, WalletError> {
        if let Some(entry) = self.txs.get(&tx.id) {
            if !entry.tx.same_content(tx) {
                return Err(WalletError::DuplicateReceiptMismatch(tx.id));
            }
            return self.reclassify(tx.id, placement, confirming_block, keys);
        }
        self.txs.insert(
            tx.id,
            TxEntry { tx: tx.clone(), placement, confirming_block },
        );
        Ok(self.apply_placement(tx.id, keys))
    }

    /// Moves a known transaction to a new placement, recomputing the statuses
    /// of affected outputs. This is how a side-chain transaction gets
    /// promoted after a reorg. Idempotent for an unchanged placement; the
    /// reverse move, best chain back to a side chain, is rejected.
    pub fn reclassify(
        &mut self,
        txid: TxId,
        placement: Placement,
        confirming_block: Option<BlockHash>,
        keys: &KeyRing,
    ) -> Result<Vec<OutPoint>, WalletError> {
        let entry = self
            .txs
            .get_mut(&txid)
            .ok_or(WalletError::UnknownTransaction(txid))?;
        if entry.placement == placement && entry.confirming_block == confirming_block {
            return Ok(Vec::new());
        }
        if entry.placement == Placement::BestChain && placement == Placement::SideChain {
            // Demotion is not modeled: records credited by a best-chain
            // receipt would stay active under a side-chain tag, so reject
            // the transition outright.
            return Err(WalletError::InvalidPlacement);
        }
        entry.placement = placement;
        entry.confirming_block = confirming_block;
        Ok(self.apply_placement(txid, keys))
    }

    /// Reserves the inputs of an outgoing spend the caller intends to
    /// broadcast, and records the transaction as known-unconfirmed so a later
    /// confirmed receipt finalizes it. Fails without mutating if any input is
    /// not currently spendable (no output may be referenced by two
    /// uncommitted spends).
    pub fn record_pending_send(
        &mut self,
        tx: &Transaction,
        keys: &KeyRing,
    ) -> Result<Vec<OutPoint>, WalletError> {
        if let Some(entry) = self.txs.get(&tx.id) {
            if !entry.tx.same_content(tx) {
                return Err(WalletError::DuplicateReceiptMismatch(tx.id));
            }
            // Already recorded; reservation is idempotent for the same spend.
            return Ok(Vec::new());
        }
        for input in &tx.inputs {
            match self.records.get(&input.prev) {
                Some(rec)
                    if matches!(
                        rec.status,
                        OutputStatus::UnspentConfirmed | OutputStatus::UnspentUnconfirmed
                    ) => {}
                _ => return Err(WalletError::OutputUnavailable(input.prev)),
            }
        }
        self.txs.insert(
            tx.id,
            TxEntry {
                tx: tx.clone(),
                placement: Placement::BestChain,
                confirming_block: None,
            },
        );
        Ok(self.apply_placement(tx.id, keys))
    }

    /// Recomputes output statuses from the stored placement of `txid`.
    /// Side-chain transactions stay recorded but activate nothing.
    fn apply_placement(&mut self, txid: TxId, keys: &KeyRing) -> Vec<OutPoint> {
        let (tx, placement, confirming_block) = match self.txs.get(&txid) {
            Some(e) => (e.tx.clone(), e.placement, e.confirming_block),
            None => return Vec::new(),
        };
        let mut affected = Vec::new();
        if placement == Placement::SideChain {
            return affected;
        }
        let confirmed = confirming_block.is_some();

        for (index, output) in tx.outputs.iter().enumerate() {
            if keys.owns_destination(&output.to).is_none() {
                continue;
            }
            let outpoint = OutPoint { txid, index: index as u32 };
            match self.records.get_mut(&outpoint) {
                Some(rec) => {
                    // Only the unconfirmed -> confirmed upgrade; spend state
                    // outranks credit state.
                    if confirmed && rec.status == OutputStatus::UnspentUnconfirmed {
                        rec.status = OutputStatus::UnspentConfirmed;
                        affected.push(outpoint);
                    }
                }
                None => {
                    let status = if confirmed {
                        OutputStatus::UnspentConfirmed
                    } else {
                        OutputStatus::UnspentUnconfirmed
                    };
                    self.records.insert(
                        outpoint,
                        OutputRecord { outpoint, value: output.value, to: output.to, status },
                    );
                    self.order.push(outpoint);
                    affected.push(outpoint);
                }
            }
        }

        for input in &tx.inputs {
            // Only owned outputs are tracked, so a hit means ours is being spent.
            if let Some(rec) = self.records.get_mut(&input.prev) {
                let status = if confirmed {
                    OutputStatus::SpentConfirmed
                } else {
                    OutputStatus::PendingSpend
                };
                if rec.status != status && rec.status != OutputStatus::SpentConfirmed {
                    rec.status = status;
                    affected.push(input.prev);
                }
            }
        }
        affected
    }

    /// Sum of all confirmed unspent owned outputs. Recomputed on read; this
    /// equality to the record set is the balance invariant.
    pub fn confirmed_balance(&self) -> u64 {
        self.unspent_confirmed().map(|rec| rec.value).sum()
    }

    /// Confirmed unspent records in first-observation order.
    pub fn unspent_confirmed(&self) -> impl Iterator<Item = &OutputRecord> + '_ {
        self.order
            .iter()
            .filter_map(move |op| self.records.get(op))
            .filter(|rec| rec.status == OutputStatus::UnspentConfirmed)
    }

    pub fn lookup_output(&self, outpoint: &OutPoint) -> Option<&OutputRecord> {
        self.records.get(outpoint)
    }

    pub fn transaction(&self, txid: &TxId) -> Option<&TxEntry> {
        self.txs.get(txid)
    }

    pub fn transactions(&self) -> impl Iterator<Item = &TxEntry> + '_ {
        self.txs.values()
    }

    /// Number of owned output records ever created.
    pub fn output_count(&self) -> usize {
        self.order.len()
    }
}
