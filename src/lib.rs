//! ChaCoin - a minimal single-process UTXO ledger
//!
//! This library implements a small blockchain with:
//! - UTXO-based transaction model with ECDSA signatures
//! - Proof-of-work mining over a hex-text difficulty target
//! - Merkle commitment of block transactions
//! - Full-chain re-validation that detects any tampering
//!
//! The chain lives in process memory for the lifetime of one run; there is
//! no networking, no persistence and no fork choice.

pub mod config;
pub mod core;
pub mod crypto;
pub mod error;
pub mod mining;
pub mod wallet;

pub use error::{ChainError, Result};
