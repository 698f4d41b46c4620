//! Coin selection and draft construction for outgoing spends. Pure reads of
//! the ledger; nothing here reserves or mutates anything.

use crate::crypto::Address;
use crate::error::WalletError;
use crate::ledger::Ledger;
use crate::transaction::{OutPoint, Transaction, TxInput, TxOutput};

/// Outcome of coin selection: the chosen outpoints and their combined value.
pub struct Selection {
    pub outpoints: Vec<OutPoint>,
    pub total: u64,
}

/// First-fit accumulation over confirmed unspent outputs in the order they
/// were first observed, stopping as soon as the running total covers
/// `amount`. Deterministic by construction; no fee or input-count
/// optimization.
pub fn select_coins(ledger: &Ledger, amount: u64) -> Result<Selection, WalletError> {
    let mut outpoints = Vec::new();
    let mut total = 0u64;
    for rec in ledger.unspent_confirmed() {
        outpoints.push(rec.outpoint);
        total = total
            .checked_add(rec.value)
            .ok_or(WalletError::AmountOverflow)?;
        if total >= amount {
            return Ok(Selection { outpoints, total });
        }
    }
    // The loop visited every spendable output, so `total` is the full
    // available balance.
    Err(WalletError::InsufficientFunds { requested: amount, available: total })
}

/// Assembles the unsigned draft: the requested output first, then a single
/// change output of `total - amount` when the selection overshoots. An exact
/// match produces no change output.
pub fn build_draft(
    selection: &Selection,
    to: Address,
    amount: u64,
    change_to: Address,
) -> Transaction {
    let inputs = selection
        .outpoints
        .iter()
        .map(|op| TxInput::new(*op))
        .collect();
    let mut outputs = vec![TxOutput { value: amount, to }];
    if selection.total > amount {
        outputs.push(TxOutput { value: selection.total - amount, to: change_to });
    }
    Transaction::new(inputs, outputs)
}
