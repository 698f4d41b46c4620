use crate::crypto::TxId;
use crate::transaction::OutPoint;
use thiserror::Error;

/// Every failure this crate can signal. All variants surface synchronously to
/// the caller of the triggering operation; nothing is retried internally.
#[derive(Debug, Error)]
pub enum WalletError {
    /// The spend request exceeds the available confirmed balance. No ledger
    /// mutation happened; the caller may retry a smaller amount or wait for
    /// more confirmations.
    #[error("insufficient funds: requested {requested}, available {available}")]
    InsufficientFunds { requested: u64, available: u64 },

    /// The chain collaborator supplied a placement the ledger cannot apply:
    /// a confirming block together with a side-chain tag, or a side-chain tag
    /// for a transaction already on the best chain. Never coerced.
    #[error("invalid placement for this delivery")]
    InvalidPlacement,

    /// Propagated verbatim from the signer collaborator.
    #[error("signing failed: {0}")]
    Signing(String),

    /// The same transaction id was received twice with materially different
    /// content. Ids are collision-resistant content hashes, so this is a
    /// fatal integrity violation, never silently ignored.
    #[error("transaction {} re-received with different content", hex::encode(.0))]
    DuplicateReceiptMismatch(TxId),

    /// An output selected for a spend is unknown, already reserved by an
    /// uncommitted spend, or already spent.
    #[error("output {0} is not spendable")]
    OutputUnavailable(OutPoint),

    /// Two inputs of the same transaction name the same prior output.
    #[error("output {0} is declared by more than one input")]
    DuplicateInput(OutPoint),

    /// Attempt to reclassify a transaction the ledger has never seen.
    #[error("unknown transaction {}", hex::encode(.0))]
    UnknownTransaction(TxId),

    /// Summing output values overflowed the 64-bit smallest-unit range.
    #[error("amount overflow while summing output values")]
    AmountOverflow,

    #[error("send amount must be greater than zero")]
    ZeroAmount,

    /// No change destination was given and the wallet owns no keys to
    /// default to.
    #[error("no change destination available: wallet owns no keys")]
    NoChangeDestination,

    /// Binary (de)serialization failure at the codec seam.
    #[error("codec failure: {0}")]
    Codec(String),
}
