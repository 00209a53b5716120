//! Key ownership and transaction construction helpers

pub mod wallet;

pub use wallet::Wallet;
