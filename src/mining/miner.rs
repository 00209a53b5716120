use crate::core::block::Block;
use crate::crypto::hash::Hash256;
use crate::{ChainError, Result};
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;

#[derive(Debug, Clone)]
pub struct MiningReport {
    pub hash: Hash256,
    pub nonce: u64,
    pub attempts: u64,
}

/// Proof-of-work search: find a nonce whose block hash starts with
/// `difficulty` zero hex characters.
///
/// The search has no deadline of its own, but it checks a shared interrupt
/// flag between attempts, so a caller holding [`Miner::interrupt_flag`] can
/// stop it from another thread. Difficulty should stay demo-scale; each
/// extra character multiplies the expected work by sixteen.
#[derive(Debug, Clone)]
pub struct Miner {
    difficulty: u32,
    interrupt: Arc<AtomicBool>,
}

impl Miner {
    pub fn new(difficulty: u32) -> Self {
        Self {
            difficulty,
            interrupt: Arc::new(AtomicBool::new(false)),
        }
    }

    pub fn difficulty(&self) -> u32 {
        self.difficulty
    }

    /// Shared flag that aborts an in-progress search when set.
    pub fn interrupt_flag(&self) -> Arc<AtomicBool> {
        self.interrupt.clone()
    }

    /// Seal `block`: commit its transactions under a Merkle root, then
    /// search nonces until the hash meets the difficulty target.
    pub fn mine(&self, block: &mut Block) -> Result<MiningReport> {
        block.merkle_root = Block::merkle_root_of(&block.transactions);
        block.hash = block.calculate_hash();
        let mut attempts = 1u64;

        while !block.hash.has_leading_zero_chars(self.difficulty) {
            if self.interrupt.load(Ordering::Relaxed) {
                return Err(ChainError::MiningInterrupted);
            }

            block.nonce = block.nonce.wrapping_add(1);
            block.hash = block.calculate_hash();
            attempts += 1;
        }

        log::info!("block mined: {} ({} attempts)", block.hash, attempts);
        Ok(MiningReport {
            hash: block.hash,
            nonce: block.nonce,
            attempts,
        })
    }
}
