//! The wallet: owns the key ring, the ledger and the listener list, and is
//! the sole mutator of ledger state. `receive` is the chain observer entry
//! point; `create_send`/`confirm_send` are the two-step outgoing spend path.
//!
//! One logical owner thread per instance; every operation here is a plain
//! synchronous call and independent wallets share nothing.

use crate::crypto::{Address, BlockHash};
use crate::error::WalletError;
use crate::events::WalletEventListener;
use crate::keyring::{KeyRing, OwnedKey};
use crate::ledger::{Ledger, Placement};
use crate::signer::{DilithiumSigner, TransactionSigner};
use crate::spend;
use crate::transaction::Transaction;
use std::rc::Rc;

pub struct Wallet {
    keys: KeyRing,
    ledger: Ledger,
    listeners: Vec<Rc<dyn WalletEventListener>>,
    signer: Box<dyn TransactionSigner>,
}

impl Wallet {
    pub fn new() -> Self {
        Self::with_signer(Box::new(DilithiumSigner))
    }

    /// Builds a wallet around a different signer collaborator.
    pub fn with_signer(signer: Box<dyn TransactionSigner>) -> Self {
        Wallet {
            keys: KeyRing::new(),
            ledger: Ledger::new(),
            listeners: Vec::new(),
            signer,
        }
    }

    /// Adds an owned signing identity. Keys are added before any transaction
    /// processing and never removed.
    pub fn add_key(&mut self, key: OwnedKey) {
        self.keys.add_key(key);
    }

    /// Registers a listener at the end of the notification order.
    pub fn register_listener(&mut self, listener: Rc<dyn WalletEventListener>) {
        self.listeners.push(listener);
    }

    pub fn keyring(&self) -> &KeyRing {
        &self.keys
    }

    pub fn ledger(&self) -> &Ledger {
        &self.ledger
    }

    /// Confirmed balance: the sum of unspent outputs already included in a
    /// best-chain block. Unconfirmed incoming funds and the pending change of
    /// an unconfirmed outgoing spend are excluded until their transaction
    /// confirms; this is "funds safe to spend now".
    pub fn balance(&self) -> u64 {
        self.ledger.confirmed_balance()
    }

    /// Chain observer entry point: a transaction was delivered by the chain
    /// collaborator with its placement tag and, when already mined, the block
    /// containing it.
    ///
    /// Re-delivery with identical placement is a no-op. A placement change
    /// (side chain promoted after a reorg, or an unconfirmed transaction
    /// gaining a block) reclassifies the affected outputs. Fires
    /// `on_coins_received` when the receipt credits the confirmed balance.
    pub fn receive(
        &mut self,
        tx: &Transaction,
        confirming_block: Option<BlockHash>,
        placement: Placement,
    ) -> Result<(), WalletError> {
        if confirming_block.is_some() && placement == Placement::SideChain {
            return Err(WalletError::InvalidPlacement);
        }
        let previous = self.ledger.confirmed_balance();
        let affected =
            self.ledger
                .classify_and_store(tx, placement, confirming_block, &self.keys)?;
        let new = self.ledger.confirmed_balance();
        if !affected.is_empty() && new > previous {
            self.notify_coins_received(tx, previous, new);
        }
        Ok(())
    }

    fn notify_coins_received(&mut self, tx: &Transaction, previous: u64, new: u64) {
        // Snapshot so callbacks observe the committed, post-mutation wallet
        // and may not re-enter the listener list mid-dispatch.
        let listeners = self.listeners.clone();
        for listener in listeners {
            listener.on_coins_received(self, tx, previous, new);
        }
    }

    /// Builds and signs a spend of `amount` to `to`, with change paid to
    /// `change_to` (defaulting to the wallet's first owned address).
    ///
    /// Stateless with respect to the ledger: nothing is reserved until
    /// [`confirm_send`](Self::confirm_send), so calling this repeatedly with
    /// the chain unchanged yields structurally equivalent drafts.
    pub fn create_send(
        &self,
        to: Address,
        amount: u64,
        change_to: Option<Address>,
    ) -> Result<Transaction, WalletError> {
        if amount == 0 {
            return Err(WalletError::ZeroAmount);
        }
        let selection = spend::select_coins(&self.ledger, amount)?;
        let change_to = match change_to.or_else(|| self.keys.first_address()) {
            Some(addr) => addr,
            None => return Err(WalletError::NoChangeDestination),
        };
        let mut draft = spend::build_draft(&selection, to, amount, change_to);
        self.sign_inputs(&mut draft)?;
        Ok(draft)
    }

    /// Second step of a spend: reserve the draft's inputs so they cannot be
    /// selected again and the balance stops counting them. Irreversible here;
    /// the reservation finalizes when the same transaction is later received
    /// with best-chain confirmation.
    pub fn confirm_send(&mut self, tx: &Transaction) -> Result<(), WalletError> {
        self.ledger.record_pending_send(tx, &self.keys)?;
        Ok(())
    }

    /// Runs the signer collaborator over a draft, handing it this wallet's
    /// key lookup. Signer failures propagate unchanged.
    pub fn sign_inputs(&self, tx: &mut Transaction) -> Result<(), WalletError> {
        self.signer.sign_inputs(tx, &self.keys, &self.ledger)
    }

    /// Total value of `tx`'s outputs addressed to keys this wallet owns.
    pub fn value_sent_to_me(&self, tx: &Transaction) -> u64 {
        tx.outputs
            .iter()
            .filter(|o| self.keys.owns_destination(&o.to).is_some())
            .map(|o| o.value)
            .sum()
    }

    /// Total value of owned outputs consumed by `tx`'s inputs.
    pub fn value_sent_from_me(&self, tx: &Transaction) -> u64 {
        tx.inputs
            .iter()
            .filter_map(|i| self.ledger.lookup_output(&i.prev))
            .map(|rec| rec.value)
            .sum()
    }
}

impl Default for Wallet {
    fn default() -> Self {
        Self::new()
    }
}
