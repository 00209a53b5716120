//! Cryptographic primitives for ChaCoin

pub mod hash;
pub mod keys;
pub mod signatures;

pub use hash::{Hash256, Hashable};
pub use keys::{KeyPair, PrivateKey, PublicKey};
pub use signatures::Signature;
