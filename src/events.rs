//! Ordered, synchronous wallet event notification. Listeners run in
//! registration order, in the calling thread, after the ledger mutation has
//! committed; a panicking listener propagates to the `receive` caller but
//! cannot corrupt wallet state.

use crate::transaction::Transaction;
use crate::wallet::Wallet;

/// Observer of balance-affecting wallet events.
pub trait WalletEventListener {
    /// Called exactly once per receipt that credits the confirmed balance,
    /// with the balances immediately before and after that single receipt.
    /// The wallet reference is already in its post-mutation state.
    fn on_coins_received(
        &self,
        wallet: &Wallet,
        tx: &Transaction,
        previous_balance: u64,
        new_balance: u64,
    );
}
