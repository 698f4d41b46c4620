// Library interface for the purse wallet accounting core.
// External collaborators (block validation, script evaluation, networking)
// feed finalized decisions in; this crate only does the bookkeeping: which
// outputs are owned, what balance is safe to spend, and how to build a spend.

pub mod crypto;
pub mod encoder;
pub mod error;
pub mod events;
pub mod keyring;
pub mod ledger;
pub mod signer;
pub mod spend;
pub mod transaction;
pub mod units;
pub mod wallet;

pub use crypto::{Address, BlockHash, TxId, address_from_pk, blake3_hash};
pub use encoder::StandaloneEncoder;
pub use error::WalletError;
pub use events::WalletEventListener;
pub use keyring::{KeyRing, OwnedKey};
pub use ledger::{Ledger, OutputRecord, OutputStatus, Placement};
pub use signer::{DilithiumSigner, TransactionSigner};
pub use transaction::{OutPoint, Transaction, TxInput, TxOutput, Witness, decode_tx, encode_tx};
pub use wallet::Wallet;
