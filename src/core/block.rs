use crate::core::ledger::Ledger;
use crate::core::transaction::Transaction;
use crate::crypto::hash::Hash256;
use crate::Result;
use chrono::Utc;
use serde::{Deserialize, Serialize};

/// What a block hangs off: nothing (the genesis block) or the hash of its
/// predecessor. A tagged variant instead of a magic sentinel hash.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Parent {
    Genesis,
    Block(Hash256),
}

impl Parent {
    pub fn is_genesis(&self) -> bool {
        matches!(self, Parent::Genesis)
    }

    fn write_bytes(&self, data: &mut Vec<u8>) {
        match self {
            Parent::Genesis => data.push(0x00),
            Parent::Block(hash) => {
                data.push(0x01);
                data.extend_from_slice(hash.as_bytes());
            }
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Block {
    pub parent: Parent,
    pub hash: Hash256,
    pub merkle_root: Hash256,
    /// Milliseconds since the Unix epoch, stamped at construction.
    pub timestamp: i64,
    pub nonce: u64,
    pub transactions: Vec<Transaction>,
}

impl Block {
    /// A new, unmined block. The stored hash is a pre-mining placeholder
    /// computed over an empty Merkle root; mining replaces it.
    pub fn new(parent: Parent) -> Self {
        let mut block = Self {
            parent,
            hash: Hash256::zero(),
            merkle_root: Hash256::zero(),
            timestamp: Utc::now().timestamp_millis(),
            nonce: 0,
            transactions: Vec::new(),
        };
        block.hash = block.calculate_hash();
        block
    }

    pub fn calculate_hash(&self) -> Hash256 {
        let mut data = Vec::new();
        self.parent.write_bytes(&mut data);
        data.extend_from_slice(&self.timestamp.to_le_bytes());
        data.extend_from_slice(&self.nonce.to_le_bytes());
        data.extend_from_slice(self.merkle_root.as_bytes());

        Hash256::hash(&data)
    }

    /// Process `tx` against the ledger and accept it into this block.
    ///
    /// Genesis blocks skip processing entirely; seeding the UTXO set for
    /// them is the chain's responsibility. For every other block a
    /// transaction that fails to process is refused and the block is left
    /// unchanged.
    pub fn add_transaction(&mut self, mut tx: Transaction, ledger: &mut Ledger) -> Result<()> {
        if !self.parent.is_genesis() {
            tx.process(ledger)?;
        }

        log::info!("transaction {} added to block", tx.id);
        self.transactions.push(tx);
        Ok(())
    }

    /// Merkle root over the ordered transaction ids: pairwise
    /// hash-concatenation reduction, duplicating the last element on odd
    /// levels. Mining and the chain audit must agree on this.
    pub fn merkle_root_of(transactions: &[Transaction]) -> Hash256 {
        if transactions.is_empty() {
            return Hash256::zero();
        }

        let mut hashes: Vec<Hash256> = transactions.iter().map(|tx| tx.id).collect();

        while hashes.len() > 1 {
            let mut next_level = Vec::new();

            for chunk in hashes.chunks(2) {
                let left = chunk[0];
                let right = if chunk.len() == 2 { chunk[1] } else { chunk[0] };

                let mut bytes = Vec::new();
                bytes.extend_from_slice(left.as_bytes());
                bytes.extend_from_slice(right.as_bytes());
                next_level.push(Hash256::hash(&bytes));
            }

            hashes = next_level;
        }

        hashes[0]
    }

    pub fn transaction_count(&self) -> usize {
        self.transactions.len()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::ChainConfig;
    use crate::crypto::keys::KeyPair;

    fn dummy_tx(id_seed: &[u8]) -> Result<Transaction> {
        let alice = KeyPair::new()?;
        let bob = KeyPair::new()?;
        let mut tx = Transaction::new(alice.public_key.clone(), bob.public_key, 1, vec![]);
        tx.id = Hash256::hash(id_seed);
        Ok(tx)
    }

    #[test]
    fn test_hash_covers_nonce() {
        let mut block = Block::new(Parent::Genesis);
        let before = block.calculate_hash();

        block.nonce += 1;
        assert_ne!(before, block.calculate_hash());
    }

    #[test]
    fn test_hash_covers_parent_link() {
        let genesis = Block::new(Parent::Genesis);
        let mut block = Block::new(Parent::Block(genesis.hash));
        let before = block.calculate_hash();

        block.parent = Parent::Block(Hash256::hash(b"elsewhere"));
        assert_ne!(before, block.calculate_hash());
    }

    #[test]
    fn test_merkle_root_deterministic() -> Result<()> {
        let txs = vec![dummy_tx(b"a")?, dummy_tx(b"b")?, dummy_tx(b"c")?];

        let root1 = Block::merkle_root_of(&txs);
        let root2 = Block::merkle_root_of(&txs);

        assert_eq!(root1, root2);
        assert_ne!(root1, Hash256::zero());

        Ok(())
    }

    #[test]
    fn test_merkle_root_depends_on_order() -> Result<()> {
        let a = dummy_tx(b"a")?;
        let b = dummy_tx(b"b")?;

        let forward = Block::merkle_root_of(&[a.clone(), b.clone()]);
        let backward = Block::merkle_root_of(&[b, a]);

        assert_ne!(forward, backward);

        Ok(())
    }

    #[test]
    fn test_merkle_root_single_and_empty() -> Result<()> {
        let a = dummy_tx(b"a")?;

        assert_eq!(Block::merkle_root_of(&[]), Hash256::zero());
        // A single transaction reduces to its own id.
        assert_eq!(Block::merkle_root_of(&[a.clone()]), a.id);

        Ok(())
    }

    #[test]
    fn test_genesis_block_skips_processing() -> Result<()> {
        let coinbase = KeyPair::new()?;
        let alice = KeyPair::new()?;
        let mut ledger = Ledger::new(ChainConfig::default());

        // No UTXOs exist yet; a regular block would refuse this.
        let tx = Transaction::genesis(&coinbase, alice.public_key.clone(), 100)?;
        let mut block = Block::new(Parent::Genesis);
        block.add_transaction(tx, &mut ledger)?;

        assert_eq!(block.transaction_count(), 1);

        Ok(())
    }
}
