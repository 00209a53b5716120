//! Proof-of-work mining

pub mod miner;

pub use miner::{Miner, MiningReport};
