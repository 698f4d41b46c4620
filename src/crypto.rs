use blake3::Hasher;
use pqcrypto_dilithium::dilithium3::{
    self, DetachedSignature, PublicKey, SecretKey, keypair,
};
use pqcrypto_traits::sign::PublicKey as _;

// Constants for post-quantum crypto primitives ensure type safety and clarity.
pub const DILITHIUM3_PK_BYTES: usize = pqcrypto_dilithium::ffi::PQCLEAN_DILITHIUM3_CLEAN_CRYPTO_PUBLICKEYBYTES;
pub const DILITHIUM3_SK_BYTES: usize = pqcrypto_dilithium::ffi::PQCLEAN_DILITHIUM3_CLEAN_CRYPTO_SECRETKEYBYTES;
pub const DILITHIUM3_SIG_BYTES: usize = pqcrypto_dilithium::ffi::PQCLEAN_DILITHIUM3_CLEAN_CRYPTO_BYTES;

/// A 32-byte destination identifier, derived from a BLAKE3 hash of a public key.
/// This provides a fixed-size, user-friendly identifier.
pub type Address = [u8; 32];

/// Content hash identifying a transaction. Supplied by the hashing
/// collaborator and treated as authoritative: two transactions with the same
/// id are the same transaction.
pub type TxId = [u8; 32];

/// Hash identifying a block on some chain. The block validation layer decides
/// which blocks exist and which chain is best; this crate only carries the ids.
pub type BlockHash = [u8; 32];

pub fn address_from_pk(pk: &PublicKey) -> Address {
    *Hasher::new_derive_key("purse-address")
        .update(pk.as_bytes())
        .finalize()
        .as_bytes()
}

/// Hashes arbitrary data with a domain-specific key for internal consistency.
pub fn blake3_hash(data: &[u8]) -> [u8; 32] {
    *Hasher::new_derive_key("purse-v1").update(data).finalize().as_bytes()
}

pub fn dilithium3_keypair() -> (PublicKey, SecretKey) {
    keypair()
}

/// Produces a detached signature over `message` with the given secret key.
pub fn sign_detached(message: &[u8], sk: &SecretKey) -> DetachedSignature {
    dilithium3::detached_sign(message, sk)
}

/// Verifies a detached signature against a message and public key.
pub fn verify_detached(message: &[u8], signature: &DetachedSignature, pk: &PublicKey) -> bool {
    dilithium3::verify_detached_signature(signature, message, pk).is_ok()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn address_derivation_is_deterministic() {
        let (pk, _) = dilithium3_keypair();
        assert_eq!(address_from_pk(&pk), address_from_pk(&pk));
    }

    #[test]
    fn sign_and_verify_roundtrip() {
        let (pk, sk) = dilithium3_keypair();
        let sig = sign_detached(b"hello", &sk);
        assert!(verify_detached(b"hello", &sig, &pk));
        assert!(!verify_detached(b"tampered", &sig, &pk));
    }
}
