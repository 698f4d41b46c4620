use crate::crypto::{self, Address};
use pqcrypto_dilithium::dilithium3::{DetachedSignature, PublicKey, SecretKey};

/// A signing identity owned by the wallet: a Dilithium3 keypair plus its
/// derived destination address.
pub struct OwnedKey {
    pk: PublicKey,
    sk: SecretKey,
    address: Address,
}

impl OwnedKey {
    /// Generates a fresh keypair.
    pub fn generate() -> Self {
        let (pk, sk) = crypto::dilithium3_keypair();
        Self::from_parts(pk, sk)
    }

    pub fn from_parts(pk: PublicKey, sk: SecretKey) -> Self {
        let address = crypto::address_from_pk(&pk);
        OwnedKey { pk, sk, address }
    }

    pub fn address(&self) -> Address {
        self.address
    }

    pub fn public_key(&self) -> &PublicKey {
        &self.pk
    }

    // No direct secret key accessor; use sign() instead.

    /// Signs a message with this key, returning the detached signature.
    pub fn sign(&self, message: &[u8]) -> DetachedSignature {
        crypto::sign_detached(message, &self.sk)
    }

    /// Verifies a message/signature pair against this key.
    pub fn verify(&self, message: &[u8], signature: &DetachedSignature) -> bool {
        crypto::verify_detached(message, signature, &self.pk)
    }
}

/// The set of owned signing identities. Membership only grows; keys are
/// immutable once added. Pure data structure, no failure modes.
#[derive(Default)]
pub struct KeyRing {
    keys: Vec<OwnedKey>,
}

impl KeyRing {
    pub fn new() -> Self {
        KeyRing { keys: Vec::new() }
    }

    /// Appends a key. No duplicate detection beyond identity.
    pub fn add_key(&mut self, key: OwnedKey) {
        self.keys.push(key);
    }

    /// Answers "do I own this destination?", returning the owning key.
    pub fn owns_destination(&self, destination: &Address) -> Option<&OwnedKey> {
        self.keys.iter().find(|k| &k.address == destination)
    }

    /// Address of the first key added, used as the default change destination.
    pub fn first_address(&self) -> Option<Address> {
        self.keys.first().map(|k| k.address)
    }

    pub fn len(&self) -> usize {
        self.keys.len()
    }

    pub fn is_empty(&self) -> bool {
        self.keys.is_empty()
    }
}
