use crate::config::ChainConfig;
use crate::core::block::{Block, Parent};
use crate::core::ledger::Ledger;
use crate::core::transaction::Transaction;
use crate::core::utxo::UtxoSet;
use crate::crypto::hash::Hash256;
use crate::crypto::keys::PublicKey;
use crate::mining::{Miner, MiningReport};
use crate::{ChainError, Result};

/// The append-only block sequence plus the live ledger state.
///
/// Single-writer by construction: every mutation takes `&mut self`, so
/// exposing a chain to concurrent callers means putting the whole value
/// behind one lock. Two transactions racing to spend the same output must
/// not both succeed.
#[derive(Debug)]
pub struct Chain {
    blocks: Vec<Block>,
    ledger: Ledger,
    genesis: Transaction,
    miner: Miner,
}

impl Chain {
    /// Start a chain from an issuance transaction.
    ///
    /// The genesis transaction's first output seeds the UTXO set; the
    /// genesis block takes the transaction without processing it, then
    /// gets mined and appended like any other block.
    pub fn new(config: ChainConfig, genesis_tx: Transaction) -> Result<Self> {
        if genesis_tx.outputs.is_empty() {
            return Err(ChainError::OutputStructureInvalid {
                height: 0,
                index: 0,
            });
        }

        let mut ledger = Ledger::new(config);
        ledger.utxo_set.insert(genesis_tx.outputs[0].clone());

        let mut block = Block::new(Parent::Genesis);
        block.add_transaction(genesis_tx.clone(), &mut ledger)?;

        let miner = Miner::new(config.difficulty);
        miner.mine(&mut block)?;

        log::info!("genesis block created: {}", block.hash);
        Ok(Self {
            blocks: vec![block],
            ledger,
            genesis: genesis_tx,
            miner,
        })
    }

    /// Mine `block` at the configured difficulty and append it. There is no
    /// re-validation at insertion time; [`Chain::validate`] is the audit.
    pub fn add_block(&mut self, mut block: Block) -> Result<MiningReport> {
        let report = self.miner.mine(&mut block)?;
        self.blocks.push(block);
        Ok(report)
    }

    pub fn blocks(&self) -> &[Block] {
        &self.blocks
    }

    pub fn height(&self) -> usize {
        self.blocks.len()
    }

    pub fn tip_hash(&self) -> Hash256 {
        // A chain always holds at least the genesis block.
        self.blocks.last().map(|block| block.hash).unwrap_or_else(Hash256::zero)
    }

    pub fn config(&self) -> &ChainConfig {
        self.ledger.config()
    }

    pub fn utxo_set(&self) -> &UtxoSet {
        &self.ledger.utxo_set
    }

    pub fn ledger_mut(&mut self) -> &mut Ledger {
        &mut self.ledger
    }

    pub fn balance(&self, owner: &PublicKey) -> u64 {
        self.ledger.balance(owner)
    }

    pub fn miner(&self) -> &Miner {
        &self.miner
    }

    /// Audit the whole chain from scratch.
    ///
    /// Replays every block after the genesis against a fresh UTXO set
    /// seeded only from the genesis transaction's first output, fully
    /// independent of the live set, and short-circuits on the first
    /// violation. The genesis block itself is trusted.
    pub fn validate(&self) -> Result<()> {
        let difficulty = self.ledger.config().difficulty;

        let mut replay = UtxoSet::new();
        replay.insert(self.genesis.outputs[0].clone());

        for height in 1..self.blocks.len() {
            let block = &self.blocks[height];
            let previous = &self.blocks[height - 1];

            if block.hash != block.calculate_hash() {
                return Err(ChainError::ChainHashMismatch { height });
            }
            if block.parent != Parent::Block(previous.hash) {
                return Err(ChainError::ChainLinkMismatch { height });
            }
            if !block.hash.has_leading_zero_chars(difficulty) {
                return Err(ChainError::ProofOfWorkUnmet { height });
            }

            for (index, tx) in block.transactions.iter().enumerate() {
                self.audit_transaction(tx, height, index, &mut replay)?;
            }
        }

        Ok(())
    }

    fn audit_transaction(
        &self,
        tx: &Transaction,
        height: usize,
        index: usize,
        replay: &mut UtxoSet,
    ) -> Result<()> {
        if !tx.verify_signature()? {
            return Err(ChainError::TransactionSignatureInvalid { height, index });
        }

        if tx.input_value() != tx.output_value() {
            return Err(ChainError::TransactionValueMismatch {
                height,
                index,
                inputs: tx.input_value(),
                outputs: tx.output_value(),
            });
        }

        for input in &tx.inputs {
            let recorded = replay
                .get(&input.output_id)
                .map(|output| output.value)
                .ok_or(ChainError::MissingReplayInput {
                    height,
                    index,
                    output_id: input.output_id,
                })?;

            let cached = input.resolved.as_ref().map(|output| output.value);
            if cached != Some(recorded) {
                return Err(ChainError::InputValueMismatch {
                    height,
                    index,
                    cached: cached.unwrap_or(0),
                    recorded,
                });
            }

            replay.remove(&input.output_id);
        }

        for output in &tx.outputs {
            replay.insert(output.clone());
        }

        let pays_recipient = tx
            .outputs
            .first()
            .is_some_and(|output| output.owner == tx.recipient);
        let change_to_sender = tx
            .outputs
            .get(1)
            .is_some_and(|output| output.owner == tx.sender);
        if !pays_recipient || !change_to_sender {
            return Err(ChainError::OutputStructureInvalid { height, index });
        }

        Ok(())
    }

    /// Boolean convenience over [`Chain::validate`], logging the violation.
    pub fn is_valid(&self) -> bool {
        match self.validate() {
            Ok(()) => true,
            Err(e) => {
                log::warn!("chain audit failed: {}", e);
                false
            }
        }
    }
}
